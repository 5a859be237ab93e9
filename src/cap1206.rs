//! CAP1206 six-channel capacitive touch sensor over blocking I2C.
//!
//! The board wires four pads to sensor inputs 1..=4. Touches latch the INT bit in
//! the main control register; [`Cap1206::read_buttons`] reads and clears it.

use embedded_hal::i2c::I2c;

use crate::{Error, Result};

pub const ADDRESS: u8 = 0x28;

/// Value of the product ID register on a CAP1206.
pub const PRODUCT_ID: u8 = 0x67;

/// Sensor inputs wired to pads.
pub const PAD_MASK: u8 = 0x0F;

const MAIN_CONTROL_INT: u8 = 0x01;
const THRESHOLD_MAX: u8 = 127;

/// Touch thresholds for sensor inputs 1..=6.
pub const DEFAULT_THRESHOLDS: [u8; 6] = [40, 40, 40, 40, 10, 10];

/// Registers this driver touches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    MainControl = 0x00,
    SensorInput = 0x03,
    SensitivityControl = 0x1F,
    Config1 = 0x20,
    SensorInputEnable = 0x21,
    SensorInputConfig1 = 0x22,
    SensorInputConfig2 = 0x23,
    AveragingAndSampling = 0x24,
    CalibrationActivate = 0x26,
    InterruptEnable = 0x27,
    RepeatRateEnable = 0x28,
    MultipleTouchConfig = 0x2A,
    RecalibrationConfig = 0x2F,
    /// First of six sequential threshold registers.
    SensorThreshold1 = 0x30,
    SensorNoiseThreshold = 0x38,
    Config2 = 0x44,
    ProductId = 0xFD,
}

// Start-up configuration, written in order.
const INIT_SEQUENCE: [(Register, u8); 13] = [
    // Active, INT cleared.
    (Register::MainControl, 0x00),
    // 2x delta sensitivity, 256 base shift.
    (Register::SensitivityControl, 0x6F),
    // Recalibrate a pad held past the max duration.
    (Register::Config1, 0x04),
    // Out-of-limit recalibration, power reduction, no interrupt on release.
    (Register::Config2, 0x61),
    (Register::SensorInputEnable, PAD_MASK),
    (Register::RepeatRateEnable, PAD_MASK),
    // 5.6 s max duration, 35 ms repeat.
    (Register::SensorInputConfig1, 0xA0),
    // 560 ms before repeat.
    (Register::SensorInputConfig2, 0x0F),
    // 8 samples, 1.28 ms each, 35 ms cycle.
    (Register::AveragingAndSampling, 0x38),
    (Register::SensorNoiseThreshold, 0x01),
    (Register::CalibrationActivate, PAD_MASK),
    (Register::InterruptEnable, PAD_MASK),
    // 16 negative counts, 64 samples per update.
    (Register::RecalibrationConfig, 0x6A),
];

// Block multi-touch beyond one pad.
const MULTIPLE_TOUCH_BLOCK_ONE: u8 = 0x80;

pub struct Cap1206<I2C> {
    i2c: I2C,
}

impl<I2C: I2c> Cap1206<I2C> {
    /// Wrap a bus handle. Nothing is sent until [`Self::init`].
    pub const fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Configure the sensor and calibrate every pad.
    ///
    /// # Errors
    ///
    /// Returns [`Error::I2c`] if any transfer fails.
    pub fn init(&mut self) -> Result<()> {
        for (register, value) in INIT_SEQUENCE {
            self.write_register(register, value)?;
        }
        self.set_thresholds(&DEFAULT_THRESHOLDS)?;
        self.write_register(Register::MultipleTouchConfig, MULTIPLE_TOUCH_BLOCK_ONE)
    }

    /// Bit mask of pads touched since the last call, or 0 when nothing latched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::I2c`] if any transfer fails.
    pub fn read_buttons(&mut self) -> Result<u8> {
        let main_control = self.read_register(Register::MainControl)?;
        let buttons = if main_control & MAIN_CONTROL_INT == 0 {
            0
        } else {
            self.read_register(Register::SensorInput)?
        };
        // Clearing INT re-arms detection; without it a held pad never reports again.
        self.write_register(Register::MainControl, 0x00)?;
        Ok(buttons)
    }

    /// Force recalibration of the pads in `mask`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::I2c`] if the transfer fails.
    pub fn recalibrate(&mut self, mask: u8) -> Result<()> {
        self.write_register(Register::CalibrationActivate, mask)
    }

    /// Write all six thresholds in one sequential transfer. Values clamp to 127.
    ///
    /// # Errors
    ///
    /// Returns [`Error::I2c`] if the transfer fails.
    pub fn set_thresholds(&mut self, thresholds: &[u8; 6]) -> Result<()> {
        let mut buffer = [Register::SensorThreshold1 as u8; 7];
        for (slot, &threshold) in buffer.iter_mut().skip(1).zip(thresholds.iter()) {
            *slot = threshold.min(THRESHOLD_MAX);
        }
        self.i2c.write(ADDRESS, &buffer).map_err(Error::i2c)
    }

    /// The chip identifies itself as [`PRODUCT_ID`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::I2c`] if the transfer fails.
    pub fn product_id(&mut self) -> Result<u8> {
        self.read_register(Register::ProductId)
    }

    fn write_register(&mut self, register: Register, value: u8) -> Result<()> {
        self.i2c
            .write(ADDRESS, &[register as u8, value])
            .map_err(Error::i2c)
    }

    fn read_register(&mut self, register: Register) -> Result<u8> {
        let mut buffer = [0];
        self.i2c
            .write_read(ADDRESS, &[register as u8], &mut buffer)
            .map_err(Error::i2c)?;
        let [value] = buffer;
        Ok(value)
    }
}
