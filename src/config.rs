use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_PORT: u16 = 9090;
pub const DEFAULT_CHIP: &str = "/dev/gpiochip0";
/// Button 0 drives line 20, button 1 drives line 21.
pub const DEFAULT_RELAY_LINES: [u32; 2] = [20, 21];
pub const DEFAULT_PULSE_MS: u64 = 250;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
}

impl HttpConfig {
    pub fn bind_addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub chip: String,
    /// Relay lines indexed by button number.
    pub lines: Vec<u32>,
    pub pulse_ms: u64,
}

impl RelayConfig {
    pub fn pulse(&self) -> Duration {
        Duration::from_millis(self.pulse_ms)
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            chip: DEFAULT_CHIP.to_string(),
            lines: DEFAULT_RELAY_LINES.to_vec(),
            pulse_ms: DEFAULT_PULSE_MS,
        }
    }
}

/// Fixed runtime configuration. The binary has no flags or config file, so
/// `AppConfig::default()` is what it serves with.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub relay: RelayConfig,
}
