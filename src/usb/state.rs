//! USB device state tracking (USB 2.0 chapter 9 visible device states).
//!
//! ```text
//!  Detached --enabled--> Powered --reset--> Default --address n--> Addressed
//!      ^                    |                  ^  <--address 0---    |  ^
//!      |                    |                  |                     |  | deconfigure
//!      +------disabled------+------------------+-----reset------  Configured
//! ```
//!
//! Suspend is orthogonal: a suspended device keeps its state and resumes in
//! it, so it is tracked as a flag next to the state.

use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};

/// Visible device state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DeviceState {
    /// Not attached, or the peripheral is disabled (no VBUS).
    Detached = 0,
    /// VBUS present, waiting for the first bus reset.
    Powered = 1,
    /// Reset done, answering on address 0.
    Default = 2,
    /// SET_ADDRESS accepted, not configured yet.
    Addressed = 3,
    /// SET_CONFIGURATION with a non-zero value accepted. Endpoints are live.
    Configured = 4,
}

/// Something that happened on the bus, as reported by the USB stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusEvent {
    Enabled(bool),
    Reset,
    Addressed(u8),
    Configured(bool),
    Suspended(bool),
}

impl DeviceState {
    const fn from_u8(raw: u8) -> Self {
        match raw {
            1 => DeviceState::Powered,
            2 => DeviceState::Default,
            3 => DeviceState::Addressed,
            4 => DeviceState::Configured,
            _ => DeviceState::Detached,
        }
    }

    /// State after `event`. Events that make no sense in the current state
    /// leave it unchanged.
    pub const fn next(self, event: BusEvent) -> Self {
        use DeviceState::*;

        match (self, event) {
            (_, BusEvent::Enabled(false)) => Detached,
            (Detached, BusEvent::Enabled(true)) => Powered,
            (state, BusEvent::Enabled(true)) => state,

            (Detached, BusEvent::Reset) => Detached,
            (_, BusEvent::Reset) => Default,

            (Default | Addressed | Configured, BusEvent::Addressed(0)) => Default,
            (Default | Addressed | Configured, BusEvent::Addressed(_)) => Addressed,

            (Addressed | Configured, BusEvent::Configured(true)) => Configured,
            (Configured, BusEvent::Configured(false)) => Addressed,

            (state, _) => state,
        }
    }
}

/// Device state shared between the USB stack callbacks and the application.
///
/// Everything is a plain atomic so it can live in a `static` and be read
/// from any task without a lock.
pub struct UsbStatus {
    state: AtomicU8,
    address: AtomicU8,
    suspended: AtomicBool,
}

impl UsbStatus {
    pub const fn new() -> Self {
        Self {
            state: AtomicU8::new(DeviceState::Detached as u8),
            address: AtomicU8::new(0),
            suspended: AtomicBool::new(false),
        }
    }

    /// Feed one bus event through the state machine.
    ///
    /// Returns the `(previous, current)` state pair.
    pub fn apply(&self, event: BusEvent) -> (DeviceState, DeviceState) {
        let prev = self.state();
        let next = prev.next(event);

        match event {
            BusEvent::Enabled(false) | BusEvent::Reset => {
                self.address.store(0, Ordering::Relaxed);
                self.suspended.store(false, Ordering::Relaxed);
            }
            BusEvent::Addressed(addr)
                if matches!(next, DeviceState::Default | DeviceState::Addressed) =>
            {
                self.address.store(addr, Ordering::Relaxed);
            }
            BusEvent::Suspended(suspended) if prev != DeviceState::Detached => {
                self.suspended.store(suspended, Ordering::Relaxed);
            }
            _ => {}
        }

        self.state.store(next as u8, Ordering::Release);
        (prev, next)
    }

    pub fn state(&self) -> DeviceState {
        DeviceState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Whether the host has selected our configuration.
    pub fn is_configured(&self) -> bool {
        self.state() == DeviceState::Configured
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended.load(Ordering::Relaxed)
    }

    /// Bus address assigned by the host, 0 until SET_ADDRESS.
    pub fn address(&self) -> u8 {
        self.address.load(Ordering::Relaxed)
    }
}

impl Default for UsbStatus {
    fn default() -> Self {
        Self::new()
    }
}
