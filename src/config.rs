//! Application-wide constants and compile-time configuration.
//!
//! USB identity, endpoint sizing and the output's power-on level live here
//! so they can be tuned in one place.

use crate::command::PinLevel;

// USB

/// USB VID/PID of the 230V output interface.
///
/// The host-side server enumerates output interfaces by this pair, so it
/// must not change without updating the server.
pub const USB_VID: u16 = 0x04D8;
pub const USB_PID: u16 = 0x5901;

/// Device release number (bcdDevice) reported for this firmware revision.
pub const USB_DEVICE_RELEASE: u16 = 0x0000;

/// USB device strings.
pub const USB_MANUFACTURER: &str = "yak";
pub const USB_PRODUCT: &str = "230V Interface";
pub const USB_SERIAL_NUMBER: &str = "000001";

/// Maximum bus current drawn, in mA.
pub const USB_MAX_POWER_MA: u16 = 100;

/// Control endpoint (EP0) max packet size.
pub const USB_EP0_MAX_PACKET: u8 = 64;

/// Vendor-specific interface class triple (class, subclass, protocol).
pub const USB_VENDOR_CLASS: u8 = 0xFF;
pub const USB_VENDOR_SUBCLASS: u8 = 0x00;
pub const USB_VENDOR_PROTOCOL: u8 = 0x00;

/// Max packet size of the switch OUT endpoint (EP1 OUT, bulk).
/// Full-speed bulk endpoints allow 8, 16, 32 or 64.
pub const SWITCH_OUT_EP_MAX_PACKET: u16 = 64;

// Output

/// Level driven on the output before the USB stack comes up.
pub const OUTPUT_INITIAL_LEVEL: PinLevel = PinLevel::High;

// GPIO pin assignment (nRF52840-DK default)
//
// The logical name is listed here; the concrete `embassy_nrf::peripherals`
// pin is selected in `main.rs`. Adjust for your custom PCB.
//
//   Switch output  → P0.13 (LED1 on the DK, active low)
