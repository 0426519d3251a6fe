//! Logging shims. With the `defmt` feature the macros forward to `defmt`,
//! otherwise they only type-check their arguments.

macro_rules! debug {
    ($($e:expr),* $(,)?) => {
        #[cfg(feature = "defmt")]
        ::defmt::debug!($($e),*);
        #[cfg(not(feature = "defmt"))]
        let _ = ($(&$e),*);
    };
}

pub(crate) use debug;

macro_rules! error {
    ($($e:expr),* $(,)?) => {
        #[cfg(feature = "defmt")]
        ::defmt::error!($($e),*);
        #[cfg(not(feature = "defmt"))]
        let _ = ($(&$e),*);
    };
}

pub(crate) use error;
