//! Switch command decoding.
//!
//! The host writes single-byte packets to the OUT endpoint:
//! ```text
//! Byte 0: 0x00       -> output low  (lamp off)
//!         any other  -> output high (lamp on)
//! ```
//! Bytes after the first are ignored.

/// Logic level of the switch output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinLevel {
    Low,
    High,
}

impl PinLevel {
    /// Interpret a command byte by its truth value.
    pub const fn from_byte(byte: u8) -> Self {
        if byte != 0 {
            PinLevel::High
        } else {
            PinLevel::Low
        }
    }

    pub const fn is_high(self) -> bool {
        matches!(self, PinLevel::High)
    }
}

impl From<bool> for PinLevel {
    fn from(high: bool) -> Self {
        if high {
            PinLevel::High
        } else {
            PinLevel::Low
        }
    }
}

/// Decode an OUT packet into the level it requests.
///
/// Returns `None` for a zero-length packet, which carries no command.
pub fn decode(packet: &[u8]) -> Option<PinLevel> {
    packet.first().map(|&b| PinLevel::from_byte(b))
}
