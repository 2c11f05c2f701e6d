//! ac-interface firmware - USB-controlled 230V switch on nRF52840.
//!
//! Startup order:
//!
//! 1. Clocks: HFCLK from the crystal so USBD has a stable timebase.
//! 2. Output: drive the power-on level before the host can see us.
//! 3. USB: build the vendor device and spawn the stack runner task.
//! 4. Main loop: serve the switch endpoint, one session per configuration.

#![no_std]
#![no_main]

mod board;

use ac_interface::usb::UsbStatus;
use ac_interface::{config, serve, SwitchOutput};
use defmt::{error, info, unwrap};
use embassy_executor::Spawner;
use embassy_nrf::gpio::{Level, Output, OutputDrive};
use {defmt_rtt as _, panic_probe as _};

use board::usb_device::{self, SwitchUsb};

static USB_STATUS: UsbStatus = UsbStatus::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(board::clock::config());
    info!("ac-interface starting");

    let pin = Output::new(
        p.P0_13,
        Level::from(config::OUTPUT_INITIAL_LEVEL.is_high()),
        OutputDrive::Standard,
    );
    let mut output = unwrap!(SwitchOutput::new(pin, config::OUTPUT_INITIAL_LEVEL));

    let SwitchUsb {
        device,
        mut endpoint,
    } = usb_device::init(p.USBD, &USB_STATUS);
    unwrap!(spawner.spawn(usb_device::usb_task(device)));

    loop {
        match serve(&mut endpoint, &mut output).await {
            Ok(stats) => info!(
                "Session ended ({:?}): {} applied, {} ignored",
                USB_STATUS.state(),
                stats.applied,
                stats.ignored
            ),
            Err(e) => error!("Switch output failed: {:?}", e),
        }
    }
}
