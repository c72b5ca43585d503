pub mod backend;
pub mod config;
mod error;
mod gpio;
mod parser;
mod relay;
mod routes;

pub use config::{AppConfig, HttpConfig, RelayConfig};
pub use error::AppError;
pub use gpio::{GpioBackend, Level};
pub use parser::{ButtonPress, parse_press};
pub use relay::RelayController;
pub use routes::{AppState, RequestCounter};

#[cfg(feature = "hardware-gpio")]
pub use backend::LibgpiodBackend;
pub use backend::{MockGpioBackend, PinHistory, PinTransition};
