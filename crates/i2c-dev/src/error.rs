/// Errors reported by device operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// A parameter was rejected before the bus was touched.
    InvalidArgument,
    /// The bus transaction failed. The bus error is passed through unchanged.
    I2c(E),
}

impl<E> Error<E> {
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument)
    }

    /// Returns the underlying bus error, if any.
    pub fn bus_error(&self) -> Option<&E> {
        match self {
            Error::I2c(err) => Some(err),
            Error::InvalidArgument => None,
        }
    }
}

impl<E> From<E> for Error<E> {
    fn from(err: E) -> Self {
        Error::I2c(err)
    }
}

impl<E: core::fmt::Display> core::fmt::Display for Error<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::InvalidArgument => write!(f, "Invalid argument"),
            Error::I2c(err) => write!(f, "I2C communication error: {}", err),
        }
    }
}
