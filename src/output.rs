//! Switch output - the single GPIO the host controls.

use embedded_hal::digital::OutputPin;

use crate::command::PinLevel;
use crate::error::Error;

/// Owns the output pin and remembers the level last driven onto it.
pub struct SwitchOutput<P> {
    pin: P,
    level: PinLevel,
}

impl<P: OutputPin> SwitchOutput<P> {
    /// Take ownership of `pin` and drive `initial` onto it right away.
    pub fn new(pin: P, initial: PinLevel) -> Result<Self, Error> {
        let mut output = Self {
            pin,
            level: initial,
        };
        output.drive(initial)?;
        Ok(output)
    }

    /// Drive `level` onto the pin.
    ///
    /// The pin is written even when the level is unchanged. Returns whether
    /// the level differs from the previous one.
    pub fn set(&mut self, level: PinLevel) -> Result<bool, Error> {
        self.drive(level)?;
        let changed = self.level != level;
        self.level = level;
        Ok(changed)
    }

    /// Level last driven onto the pin.
    pub fn level(&self) -> PinLevel {
        self.level
    }

    /// Give the pin back, leaving it at its current level.
    pub fn release(self) -> P {
        self.pin
    }

    fn drive(&mut self, level: PinLevel) -> Result<(), Error> {
        let result = match level {
            PinLevel::High => self.pin.set_high(),
            PinLevel::Low => self.pin.set_low(),
        };
        result.map_err(|_| Error::Output)
    }
}
