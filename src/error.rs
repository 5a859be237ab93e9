use derive_more::derive::{Display, Error};

/// A specialized `Result` where the error is this crate's `Error` type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Define a unified error type for this crate.
#[derive(Debug, Display, Error)]
pub enum Error {
    /// An I2C transfer to the touch sensor or an LED driver failed.
    // `embedded_hal::i2c::ErrorKind` does not implement `core::error::Error`, so `derive_more`
    // must not treat it as the source.
    #[display("I2C transfer failed: {_0:?}")]
    I2c(#[error(not(source))] embedded_hal::i2c::ErrorKind),

    /// The executor had no room for the control task.
    // `#[error(not(source))]` below tells `derive_more` that `embassy_executor::SpawnError` does
    // not implement Rust's `core::error::Error` trait.
    #[cfg(feature = "pico1")]
    #[display("{_0:?}")]
    TaskSpawn(#[error(not(source))] embassy_executor::SpawnError),

    /// A blocking ADC conversion failed.
    #[cfg(feature = "pico1")]
    #[display("ADC conversion failed: {_0:?}")]
    Adc(#[error(not(source))] embassy_rp::adc::Error),
}

impl Error {
    /// Collapse any bus-specific I2C error into its portable kind.
    pub(crate) fn i2c(err: impl embedded_hal::i2c::Error) -> Self {
        Self::I2c(err.kind())
    }
}

#[cfg(feature = "pico1")]
impl From<embassy_executor::SpawnError> for Error {
    fn from(err: embassy_executor::SpawnError) -> Self {
        Self::TaskSpawn(err)
    }
}

#[cfg(feature = "pico1")]
impl From<embassy_rp::adc::Error> for Error {
    fn from(err: embassy_rp::adc::Error) -> Self {
        Self::Adc(err)
    }
}
