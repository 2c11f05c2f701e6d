//! nRF52840 board support - clock setup, interrupt routing and USB device
//! construction. Only built for the firmware binary.

pub mod clock;
pub mod usb_device;

use embassy_nrf::{bind_interrupts, peripherals, usb};

// USBD carries all USB traffic; CLOCK_POWER reports VBUS changes. Both are
// forwarded straight to the embassy-nrf handlers that service the stack.
bind_interrupts!(pub struct Irqs {
    USBD => usb::InterruptHandler<peripherals::USBD>;
    CLOCK_POWER => usb::vbus_detect::InterruptHandler;
});
