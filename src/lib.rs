//! Host-testable core of the ac-interface firmware.
//!
//! The firmware receives single-byte packets on a USB bulk OUT endpoint and
//! drives one output (the 230V switch) from the first byte's truth value.
//! Everything here is hardware-independent: it works against the
//! `embassy-usb` driver traits and `embedded-hal` pins, so it runs under
//! `cargo test --lib` on the host.
//!
//! The nRF52840 binary (`src/main.rs`, `embedded` feature) adds the clock
//! setup, interrupt bindings and USB device construction on top.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod log;

pub mod app;
pub mod command;
pub mod config;
pub mod error;
pub mod output;
pub mod usb;

pub use app::{serve, SessionStats};
pub use command::PinLevel;
pub use error::Error;
pub use output::SwitchOutput;

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests - serve loop against a scripted endpoint
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use embassy_futures::block_on;
    use embassy_usb::driver::{
        Direction, Endpoint, EndpointAddress, EndpointError, EndpointInfo, EndpointOut,
        EndpointType,
    };
    use embedded_hal::digital::{self, ErrorKind, ErrorType, OutputPin};

    use super::*;

    // ════════════════════════════════════════════════════════════════════════
    // Test doubles
    // ════════════════════════════════════════════════════════════════════════

    /// OUT endpoint that replays a fixed list of read results, then reports
    /// itself disabled.
    struct ScriptedEndpoint {
        info: EndpointInfo,
        script: VecDeque<Result<Vec<u8>, EndpointError>>,
        enabled_waits: usize,
    }

    impl ScriptedEndpoint {
        fn new(script: impl IntoIterator<Item = Result<Vec<u8>, EndpointError>>) -> Self {
            Self {
                info: EndpointInfo {
                    addr: EndpointAddress::from_parts(1, Direction::Out),
                    ep_type: EndpointType::Bulk,
                    max_packet_size: config::SWITCH_OUT_EP_MAX_PACKET,
                    interval_ms: 0,
                },
                script: script.into_iter().collect(),
                enabled_waits: 0,
            }
        }

        fn packets(packets: &[&[u8]]) -> Self {
            Self::new(packets.iter().map(|p| Ok(p.to_vec())))
        }
    }

    impl Endpoint for ScriptedEndpoint {
        fn info(&self) -> &EndpointInfo {
            &self.info
        }

        async fn wait_enabled(&mut self) {
            self.enabled_waits += 1;
        }
    }

    impl EndpointOut for ScriptedEndpoint {
        async fn read(&mut self, buf: &mut [u8]) -> Result<usize, EndpointError> {
            match self.script.pop_front() {
                Some(Ok(packet)) => {
                    if packet.len() > buf.len() {
                        return Err(EndpointError::BufferOverflow);
                    }
                    buf[..packet.len()].copy_from_slice(&packet);
                    Ok(packet.len())
                }
                Some(Err(e)) => Err(e),
                None => Err(EndpointError::Disabled),
            }
        }
    }

    #[derive(Debug)]
    struct PinFault;

    impl digital::Error for PinFault {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    /// Output pin that records every write (`true` = high). With
    /// `fail_after = Some(n)`, every write after the first `n` fails.
    #[derive(Default)]
    struct RecordingPin {
        writes: Vec<bool>,
        fail_after: Option<usize>,
    }

    impl RecordingPin {
        fn write(&mut self, high: bool) -> Result<(), PinFault> {
            if self.fail_after.is_some_and(|n| self.writes.len() >= n) {
                return Err(PinFault);
            }
            self.writes.push(high);
            Ok(())
        }
    }

    impl ErrorType for RecordingPin {
        type Error = PinFault;
    }

    impl OutputPin for RecordingPin {
        fn set_low(&mut self) -> Result<(), PinFault> {
            self.write(false)
        }

        fn set_high(&mut self) -> Result<(), PinFault> {
            self.write(true)
        }
    }

    fn output() -> SwitchOutput<RecordingPin> {
        SwitchOutput::new(RecordingPin::default(), config::OUTPUT_INITIAL_LEVEL).unwrap()
    }

    // ════════════════════════════════════════════════════════════════════════
    // Output Tests
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn output_drives_initial_level_on_creation() {
        let out = output();
        assert_eq!(out.level(), PinLevel::High);
        assert_eq!(out.release().writes, [true]);
    }

    #[test]
    fn output_reports_level_changes() {
        let mut out = output();
        assert!(out.set(PinLevel::Low).unwrap());
        assert!(!out.set(PinLevel::Low).unwrap());
        assert!(out.set(PinLevel::High).unwrap());
        // Unchanged levels are still written to the pin.
        assert_eq!(out.release().writes, [true, false, false, true]);
    }

    #[test]
    fn output_pin_failure_maps_to_error() {
        let pin = RecordingPin {
            fail_after: Some(0),
            ..Default::default()
        };
        assert_eq!(
            SwitchOutput::new(pin, PinLevel::Low).err(),
            Some(Error::Output)
        );
    }

    // ════════════════════════════════════════════════════════════════════════
    // Serve Loop Tests
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn serve_applies_each_packet_in_order() {
        let mut ep = ScriptedEndpoint::packets(&[&[0x00], &[0x01], &[0x00], &[0xFF]]);
        let mut out = output();

        let stats = block_on(serve(&mut ep, &mut out)).unwrap();

        assert_eq!(stats, SessionStats { applied: 4, ignored: 0 });
        assert_eq!(ep.enabled_waits, 1);
        assert_eq!(out.level(), PinLevel::High);
        assert_eq!(out.release().writes, [true, false, true, false, true]);
    }

    #[test]
    fn serve_uses_only_the_first_byte() {
        let mut ep = ScriptedEndpoint::packets(&[&[0x00, 0x01, 0x01]]);
        let mut out = output();

        block_on(serve(&mut ep, &mut out)).unwrap();

        assert_eq!(out.level(), PinLevel::Low);
    }

    #[test]
    fn serve_ignores_zero_length_packets() {
        let mut ep = ScriptedEndpoint::packets(&[&[0x00], &[], &[]]);
        let mut out = output();

        let stats = block_on(serve(&mut ep, &mut out)).unwrap();

        assert_eq!(stats, SessionStats { applied: 1, ignored: 2 });
        assert_eq!(out.level(), PinLevel::Low);
        assert_eq!(out.release().writes, [true, false]);
    }

    #[test]
    fn serve_skips_oversized_packets_and_continues() {
        let mut ep = ScriptedEndpoint::new([
            Err(EndpointError::BufferOverflow),
            Ok(vec![0x00]),
        ]);
        let mut out = output();

        let stats = block_on(serve(&mut ep, &mut out)).unwrap();

        assert_eq!(stats, SessionStats { applied: 1, ignored: 1 });
        assert_eq!(out.level(), PinLevel::Low);
    }

    #[test]
    fn serve_ends_session_on_disable_and_keeps_level() {
        let mut ep = ScriptedEndpoint::new([
            Ok(vec![0x00]),
            Err(EndpointError::Disabled),
            Ok(vec![0x01]),
        ]);
        let mut out = output();

        let stats = block_on(serve(&mut ep, &mut out)).unwrap();
        assert_eq!(stats.applied, 1);
        assert_eq!(out.level(), PinLevel::Low);

        // Next session picks up the packet queued after the reset.
        let stats = block_on(serve(&mut ep, &mut out)).unwrap();
        assert_eq!(stats.applied, 1);
        assert_eq!(ep.enabled_waits, 2);
        assert_eq!(out.level(), PinLevel::High);
    }

    #[test]
    fn serve_with_no_traffic_returns_empty_stats() {
        let mut ep = ScriptedEndpoint::packets(&[]);
        let mut out = output();

        let stats = block_on(serve(&mut ep, &mut out)).unwrap();

        assert_eq!(stats, SessionStats::default());
        assert_eq!(out.release().writes, [true]);
    }

    #[test]
    fn serve_stops_on_pin_failure() {
        let mut ep = ScriptedEndpoint::packets(&[&[0x00]]);
        let pin = RecordingPin {
            fail_after: Some(1),
            ..Default::default()
        };
        let mut out = SwitchOutput::new(pin, PinLevel::High).unwrap();

        assert_eq!(block_on(serve(&mut ep, &mut out)), Err(Error::Output));
    }

    // ════════════════════════════════════════════════════════════════════════
    // Error Conversion Tests
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn endpoint_errors_convert() {
        assert_eq!(Error::from(EndpointError::Disabled), Error::EndpointDisabled);
        assert_eq!(
            Error::from(EndpointError::BufferOverflow),
            Error::BufferOverflow
        );
    }

    // ════════════════════════════════════════════════════════════════════════
    // USB Identity Tests
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn usb_identity_matches_host_server() {
        assert_eq!(config::USB_VID, 0x04D8);
        assert_eq!(config::USB_PID, 0x5901);
        assert_eq!(config::USB_DEVICE_RELEASE, 0x0000);
    }
}
