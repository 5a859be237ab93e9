//! Pin assignment for the RP2040 logo board.

use embassy_rp::adc::{self, Adc};
use embassy_rp::gpio::{self, Level, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_rp::watchdog::Watchdog;

use crate::I2C_FREQUENCY_HZ;

/// The shared I2C bus to both LED drivers and the touch sensor.
pub type I2cBus = I2c<'static, I2C0, i2c::Blocking>;

pub struct Hardware {
    pub i2c: I2cBus,
    /// Hardware shutdown lines of the two LED drivers, held high to run.
    pub driver_enables: [gpio::Output<'static>; 2],
    /// Status LEDs; the last one is red.
    pub status_leds: [gpio::Output<'static>; 3],
    pub adc: Adc<'static, adc::Blocking>,
    pub left_audio: adc::Channel<'static>,
    pub right_audio: adc::Channel<'static>,
    pub watchdog: Watchdog,
}

impl Default for Hardware {
    fn default() -> Self {
        let peripherals: embassy_rp::Peripherals =
            embassy_rp::init(embassy_rp::config::Config::default());

        let mut i2c_config = i2c::Config::default();
        i2c_config.frequency = I2C_FREQUENCY_HZ;
        let i2c = I2c::new_blocking(peripherals.I2C0, peripherals.PIN_13, peripherals.PIN_12, i2c_config);

        let driver_enables = [
            gpio::Output::new(peripherals.PIN_15, Level::High),
            gpio::Output::new(peripherals.PIN_16, Level::High),
        ];

        // Lit until bring-up finishes.
        let status_leds = [
            gpio::Output::new(peripherals.PIN_17, Level::High),
            gpio::Output::new(peripherals.PIN_18, Level::High),
            gpio::Output::new(peripherals.PIN_19, Level::High),
        ];

        let adc = Adc::new_blocking(peripherals.ADC, adc::Config::default());
        let right_audio = adc::Channel::new_pin(peripherals.PIN_26, Pull::None);
        let left_audio = adc::Channel::new_pin(peripherals.PIN_27, Pull::None);

        let watchdog = Watchdog::new(peripherals.WATCHDOG);

        Self {
            i2c,
            driver_enables,
            status_leds,
            adc,
            left_audio,
            right_audio,
            watchdog,
        }
    }
}
