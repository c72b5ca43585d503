#[cfg(feature = "hardware-gpio")]
pub mod libgpiod;
pub mod mock;

#[cfg(feature = "hardware-gpio")]
pub use libgpiod::LibgpiodBackend;
pub use mock::{MockGpioBackend, PinHistory, PinTransition};

use crate::config::RelayConfig;
use crate::error::AppError;

#[cfg(feature = "hardware-gpio")]
pub type RelayBackend = LibgpiodBackend;
#[cfg(not(feature = "hardware-gpio"))]
pub type RelayBackend = MockGpioBackend;

/// Opens the backend the binary serves with.
///
/// `hardware-gpio` (default) opens the configured chip. Simulated relays are
/// only handed out when `mock-gpio` is enabled explicitly.
#[cfg(feature = "hardware-gpio")]
pub fn open_relay_backend(config: &RelayConfig) -> Result<RelayBackend, AppError> {
    LibgpiodBackend::new(&config.chip)
}

#[cfg(all(not(feature = "hardware-gpio"), feature = "mock-gpio"))]
pub fn open_relay_backend(_config: &RelayConfig) -> Result<RelayBackend, AppError> {
    log::warn!("Built with mock-gpio, relays are simulated");
    Ok(MockGpioBackend::new())
}

#[cfg(not(any(feature = "hardware-gpio", feature = "mock-gpio")))]
pub fn open_relay_backend(config: &RelayConfig) -> Result<RelayBackend, AppError> {
    Err(AppError::HardwareOpen(format!(
        "{}: built without hardware-gpio, enable mock-gpio to run with simulated relays",
        config.chip
    )))
}
