//! Application loop - turns OUT packets into output levels.
//!
//! One call to [`serve`] covers one configured session:
//!
//! 1. wait until the OUT endpoint is enabled (host configured us),
//! 2. read a packet, which arms the endpoint and waits for the host,
//! 3. drive the output from the packet's first byte,
//! 4. go back to 2 until the endpoint is disabled.

use embassy_usb::driver::{EndpointError, EndpointOut};
use embedded_hal::digital::OutputPin;

use crate::command;
use crate::config::SWITCH_OUT_EP_MAX_PACKET;
use crate::error::Error;
use crate::output::SwitchOutput;

/// Counters for one session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SessionStats {
    /// Packets that carried a command.
    pub applied: u32,
    /// Zero-length or oversized packets.
    pub ignored: u32,
}

impl SessionStats {
    fn note_applied(&mut self) {
        self.applied = self.applied.wrapping_add(1);
    }

    fn note_ignored(&mut self) {
        self.ignored = self.ignored.wrapping_add(1);
    }
}

/// Serve the switch endpoint until it is disabled.
///
/// Returns the session counters once the endpoint goes away (bus reset,
/// deconfiguration, detach). The output keeps its last level. Only a pin
/// failure ends the session with an error.
pub async fn serve<E, P>(
    endpoint: &mut E,
    output: &mut SwitchOutput<P>,
) -> Result<SessionStats, Error>
where
    E: EndpointOut,
    P: OutputPin,
{
    endpoint.wait_enabled().await;
    info!("Switch endpoint enabled, output is {:?}", output.level());

    let mut stats = SessionStats::default();
    let mut buf = [0u8; SWITCH_OUT_EP_MAX_PACKET as usize];

    loop {
        let len = match endpoint.read(&mut buf).await {
            Ok(len) => len,
            Err(EndpointError::BufferOverflow) => {
                warn!("Switch endpoint: packet exceeds {} bytes", buf.len());
                stats.note_ignored();
                continue;
            }
            Err(EndpointError::Disabled) => {
                info!("Switch endpoint disabled: {:?}", stats);
                return Ok(stats);
            }
        };

        match command::decode(&buf[..len]) {
            Some(level) => {
                let changed = match output.set(level) {
                    Ok(changed) => changed,
                    Err(e) => {
                        error!("Output pin rejected {:?}", level);
                        return Err(e);
                    }
                };
                if changed {
                    info!("Output -> {:?}", level);
                }
                stats.note_applied();
            }
            None => {
                debug!("Switch endpoint: zero-length packet");
                stats.note_ignored();
            }
        }
    }
}
