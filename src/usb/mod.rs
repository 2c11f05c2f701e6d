//! USB device subsystem - presents a vendor-specific switch device.
//!
//! The nRF52840's built-in USB 2.0 Full-Speed controller is driven by
//! `embassy-usb`, which handles enumeration and control transfers. This
//! module tracks what the stack reports:
//!
//! - [`state`]: chapter-9 device state machine, shared via [`UsbStatus`]
//! - [`handler`]: `embassy_usb::Handler` feeding bus events into it
//!
//! The device exposes one interface with one bulk OUT endpoint (EP1 OUT);
//! the application loop in [`crate::app`] consumes it.

pub mod handler;
pub mod state;

pub use handler::StatusHandler;
pub use state::{BusEvent, DeviceState, UsbStatus};
