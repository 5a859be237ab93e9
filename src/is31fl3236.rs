//! IS31FL3236 36-channel LED driver over blocking I2C.

use core::iter::once;

use embedded_hal::i2c::I2c;

use crate::channel_map::CHANNELS_PER_DRIVER;
use crate::{Error, Result};

/// Address of the driver with AD tied low.
pub const ADDRESS_LOW: u8 = 0x3C;
/// Address of the driver with AD tied high.
pub const ADDRESS_HIGH: u8 = 0x3F;

/// Register map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    Shutdown = 0x00,
    /// First of 36 sequential PWM duty registers.
    Pwm = 0x01,
    /// Latches written PWM and control values into the outputs.
    Update = 0x25,
    /// First of 36 sequential channel control registers.
    Control = 0x26,
    Global = 0x4A,
    Frequency = 0x4B,
    Reset = 0x4F,
}

/// Output PWM frequency.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PwmFrequency {
    Khz3 = 0x00,
    /// Above audible range.
    #[default]
    Khz22 = 0x01,
}

/// Output current as a fraction of the external-resistor maximum.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum CurrentLimit {
    #[default]
    Full = 0x00,
    Half = 0x01,
    Third = 0x02,
    Quarter = 0x03,
}

/// Per-channel control byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelConfig {
    pub on: bool,
    pub current_limit: CurrentLimit,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            on: true,
            current_limit: CurrentLimit::Full,
        }
    }
}

impl ChannelConfig {
    #[must_use]
    pub const fn register_value(self) -> u8 {
        ((self.current_limit as u8) << 1) | (self.on as u8)
    }
}

/// One IS31FL3236 chip.
///
/// Remembers the last uploaded duties so unchanged frames cost no bus traffic.
pub struct Is31fl3236<I2C> {
    i2c: I2C,
    address: u8,
    channels: [ChannelConfig; CHANNELS_PER_DRIVER],
    uploaded: [u8; CHANNELS_PER_DRIVER],
}

impl<I2C: I2c> Is31fl3236<I2C> {
    /// Wrap a bus handle. Nothing is sent until [`Self::init`].
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            channels: [ChannelConfig::default(); CHANNELS_PER_DRIVER],
            uploaded: [0; CHANNELS_PER_DRIVER],
        }
    }

    #[must_use]
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Duties most recently sent to the chip.
    #[must_use]
    pub const fn uploaded(&self) -> &[u8; CHANNELS_PER_DRIVER] {
        &self.uploaded
    }

    /// Wake the chip, configure every channel and upload the current duties.
    ///
    /// # Errors
    ///
    /// Returns [`Error::I2c`] if any transfer fails.
    pub fn init(&mut self) -> Result<()> {
        self.set_software_shutdown(false)?;
        self.set_pwm_frequency(PwmFrequency::Khz22)?;
        self.set_global_enable(true)?;
        self.update_channel_configs()?;
        // The chip may have kept its state across a microcontroller reboot.
        let duties = self.uploaded;
        self.update_duties(&duties, true)?;
        Ok(())
    }

    /// Upload 36 duties, latching them with a trailing write to the update register.
    ///
    /// Returns `false` without touching the bus when the duties match the last upload
    /// and `force` is not set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::I2c`] if the transfer fails.
    pub fn update_duties(&mut self, duties: &[u8; CHANNELS_PER_DRIVER], force: bool) -> Result<bool> {
        if !force && *duties == self.uploaded {
            return Ok(false);
        }
        // The trailing zero lands in the update register.
        let mut buffer = [0; CHANNELS_PER_DRIVER + 2];
        for (slot, byte) in buffer
            .iter_mut()
            .zip(once(Register::Pwm as u8).chain(duties.iter().copied()))
        {
            *slot = byte;
        }
        self.i2c.write(self.address, &buffer).map_err(Error::i2c)?;
        self.uploaded = *duties;
        Ok(true)
    }

    /// Replace one channel's control byte. Takes effect on [`Self::update_channel_configs`].
    pub fn set_channel_config(&mut self, channel: usize, config: ChannelConfig) {
        if let Some(slot) = self.channels.get_mut(channel) {
            *slot = config;
        }
    }

    /// Write all channel control bytes in one sequential transfer, then latch them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::I2c`] if either transfer fails.
    pub fn update_channel_configs(&mut self) -> Result<()> {
        let mut buffer = [0; CHANNELS_PER_DRIVER + 1];
        let bytes = once(Register::Control as u8).chain(self.channels.iter().map(|config| config.register_value()));
        for (slot, byte) in buffer.iter_mut().zip(bytes) {
            *slot = byte;
        }
        self.i2c.write(self.address, &buffer).map_err(Error::i2c)?;
        self.write_register(Register::Update, 0x00)
    }

    /// # Errors
    ///
    /// Returns [`Error::I2c`] if the transfer fails.
    pub fn set_software_shutdown(&mut self, shutdown: bool) -> Result<()> {
        self.write_register(Register::Shutdown, if shutdown { 0x00 } else { 0x01 })
    }

    /// # Errors
    ///
    /// Returns [`Error::I2c`] if the transfer fails.
    pub fn set_pwm_frequency(&mut self, frequency: PwmFrequency) -> Result<()> {
        self.write_register(Register::Frequency, frequency as u8)
    }

    /// # Errors
    ///
    /// Returns [`Error::I2c`] if the transfer fails.
    pub fn set_global_enable(&mut self, enable: bool) -> Result<()> {
        self.write_register(Register::Global, if enable { 0x00 } else { 0x01 })
    }

    /// Return every register to its power-on default.
    ///
    /// # Errors
    ///
    /// Returns [`Error::I2c`] if the transfer fails.
    pub fn software_reset(&mut self) -> Result<()> {
        self.write_register(Register::Reset, 0x00)
    }

    fn write_register(&mut self, register: Register, value: u8) -> Result<()> {
        self.i2c
            .write(self.address, &[register as u8, value])
            .map_err(Error::i2c)
    }

    /// Give back the bus handle.
    pub fn release(self) -> I2C {
        self.i2c
    }
}
