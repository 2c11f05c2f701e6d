//! USB vendor device - one interface, one bulk OUT endpoint.
//!
//! Initialises the Embassy USB stack on the nRF52840 hardware USB
//! peripheral and hands back the device runner plus the switch endpoint.

use ac_interface::config;
use ac_interface::usb::{StatusHandler, UsbStatus};
use defmt::info;
use embassy_nrf::peripherals;
use embassy_nrf::usb::vbus_detect::HardwareVbusDetect;
use embassy_nrf::usb::Driver;
use embassy_usb::{Builder, Config, UsbDevice};
use static_cell::StaticCell;

use super::Irqs;

pub type UsbDriver = Driver<'static, peripherals::USBD, HardwareVbusDetect>;
pub type SwitchEndpoint = <UsbDriver as embassy_usb::driver::Driver<'static>>::EndpointOut;

static USB_CONFIG_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_BOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_MSOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_CTRL_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static USB_STATUS_HANDLER: StaticCell<StatusHandler> = StaticCell::new();

/// Build result containing the USB device runner and the switch endpoint.
pub struct SwitchUsb {
    pub device: UsbDevice<'static, UsbDriver>,
    pub endpoint: SwitchEndpoint,
}

/// Initialise the USB stack and create the switch device.
///
/// Call once at startup: the descriptor buffers and the status handler live
/// in `StaticCell`s, so a second call panics.
pub fn init(usbd: peripherals::USBD, status: &'static UsbStatus) -> SwitchUsb {
    // Create the low-level USB driver with hardware VBUS detection.
    let driver = Driver::new(usbd, Irqs, HardwareVbusDetect::new(Irqs));

    // USB device-level configuration.
    let mut usb_config = Config::new(config::USB_VID, config::USB_PID);
    usb_config.manufacturer = Some(config::USB_MANUFACTURER);
    usb_config.product = Some(config::USB_PRODUCT);
    usb_config.serial_number = Some(config::USB_SERIAL_NUMBER);
    usb_config.device_release = config::USB_DEVICE_RELEASE;
    usb_config.max_power = config::USB_MAX_POWER_MA;
    usb_config.max_packet_size_0 = config::USB_EP0_MAX_PACKET;

    // Single-function device: class is declared per interface, no IADs.
    usb_config.device_class = 0x00;
    usb_config.device_sub_class = 0x00;
    usb_config.device_protocol = 0x00;
    usb_config.composite_with_iads = false;

    // Allocate static descriptor buffers.
    let config_desc = USB_CONFIG_DESC.init([0u8; 256]);
    let bos_desc = USB_BOS_DESC.init([0u8; 256]);
    let msos_desc = USB_MSOS_DESC.init([0u8; 256]);
    let ctrl_buf = USB_CTRL_BUF.init([0u8; 64]);

    // Build the USB device.
    let mut builder = Builder::new(
        driver,
        usb_config,
        config_desc,
        bos_desc,
        msos_desc,
        ctrl_buf,
    );

    let handler = USB_STATUS_HANDLER.init(StatusHandler::new(status));
    builder.handler(handler);

    let endpoint = {
        let mut function = builder.function(
            config::USB_VENDOR_CLASS,
            config::USB_VENDOR_SUBCLASS,
            config::USB_VENDOR_PROTOCOL,
        );
        let mut interface = function.interface();
        let mut alt = interface.alt_setting(
            config::USB_VENDOR_CLASS,
            config::USB_VENDOR_SUBCLASS,
            config::USB_VENDOR_PROTOCOL,
            None,
        );
        alt.endpoint_bulk_out(config::SWITCH_OUT_EP_MAX_PACKET)
    };

    let device = builder.build();

    info!(
        "USB switch device initialised ({=u16:04x}:{=u16:04x})",
        config::USB_VID,
        config::USB_PID
    );

    SwitchUsb { device, endpoint }
}

/// Embassy task driving the USB stack: enumeration, EP0 control transfers,
/// suspend/resume and servicing of the switch endpoint. Never returns.
#[embassy_executor::task]
pub async fn usb_task(mut device: UsbDevice<'static, UsbDriver>) -> ! {
    info!("USB device task started");
    device.run().await
}
