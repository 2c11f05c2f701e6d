//! Unified error type for ac-interface.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.

use embassy_usb::driver::EndpointError;

/// Top-level error type used across the firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // USB
    /// The endpoint was disabled by a bus reset, deconfiguration or detach.
    EndpointDisabled,

    /// The host sent more data than the read buffer can hold.
    BufferOverflow,

    // Output
    /// Driving the output pin failed.
    Output,
}

// Convenience conversions

impl From<EndpointError> for Error {
    fn from(e: EndpointError) -> Self {
        match e {
            EndpointError::Disabled => Error::EndpointDisabled,
            EndpointError::BufferOverflow => Error::BufferOverflow,
        }
    }
}
