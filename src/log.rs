//! Logging interface, contingent on the `defmt` feature.
//!
//! The firmware enables `defmt` and gets RTT logs; host builds and tests
//! compile these calls away.

macro_rules! debug {
    ($($args:tt)*) => {
        #[cfg(feature = "defmt")]
        ::defmt::debug!($($args)*)
    };
}

macro_rules! info {
    ($($args:tt)*) => {
        #[cfg(feature = "defmt")]
        ::defmt::info!($($args)*)
    };
}

macro_rules! warn {
    ($($args:tt)*) => {
        #[cfg(feature = "defmt")]
        ::defmt::warn!($($args)*)
    };
}

macro_rules! error {
    ($($args:tt)*) => {
        #[cfg(feature = "defmt")]
        ::defmt::error!($($args)*)
    };
}
