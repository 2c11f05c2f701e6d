//! Clock configuration.
//!
//! The USBD peripheral needs the high-frequency clock to come from the
//! 32 MHz crystal (HFXO); the internal RC oscillator is not accurate enough
//! for full-speed USB. `embassy_nrf::init` starts HFXO and waits for the
//! HFCLKSTARTED event when the source is set here.

use embassy_nrf::config::{Config, HfclkSource};

/// HAL configuration with the crystal as HFCLK source.
pub fn config() -> Config {
    let mut config = Config::default();
    config.hfclk_source = HfclkSource::ExternalXtal;
    config
}
