//! Bridge from `embassy-usb` device callbacks to [`UsbStatus`].

use embassy_usb::Handler;

use super::state::{BusEvent, DeviceState, UsbStatus};

/// Registered with the USB builder; records every bus event in a shared
/// [`UsbStatus`].
pub struct StatusHandler {
    status: &'static UsbStatus,
}

impl StatusHandler {
    pub const fn new(status: &'static UsbStatus) -> Self {
        Self { status }
    }

    fn record(&mut self, event: BusEvent) -> DeviceState {
        let (prev, next) = self.status.apply(event);
        if prev != next {
            info!("USB: {:?} -> {:?}", prev, next);
        } else {
            debug!("USB: {:?} in {:?}", event, next);
        }
        next
    }
}

impl Handler for StatusHandler {
    fn enabled(&mut self, enabled: bool) {
        self.record(BusEvent::Enabled(enabled));
    }

    fn reset(&mut self) {
        self.record(BusEvent::Reset);
    }

    fn addressed(&mut self, addr: u8) {
        self.record(BusEvent::Addressed(addr));
    }

    fn configured(&mut self, configured: bool) {
        if self.record(BusEvent::Configured(configured)) == DeviceState::Configured {
            info!("USB: configured, switch endpoint live");
        }
    }

    fn suspended(&mut self, suspended: bool) {
        self.record(BusEvent::Suspended(suspended));
        if suspended {
            warn!("USB: bus suspended");
        }
    }
}
