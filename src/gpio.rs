use std::fmt;

use crate::error::AppError;

/// Physical level of an output line.
///
/// Relays are wired active-low: `High` keeps the relay open (inactive) and
/// `Low` closes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    High,
    Low,
}

impl Level {
    pub const INACTIVE: Level = Level::High;
    pub const ACTIVE: Level = Level::Low;

    pub fn flipped(self) -> Self {
        match self {
            Level::High => Level::Low,
            Level::Low => Level::High,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::High => f.write_str("high"),
            Level::Low => f.write_str("low"),
        }
    }
}

/// Access to the GPIO lines driving the relays.
///
/// A backend has a single owner; dropping it releases the underlying device.
pub trait GpioBackend: Send + 'static {
    fn configure_output(&mut self, line: u32, level: Level) -> Result<(), AppError>;
    fn write_level(&mut self, line: u32, level: Level) -> Result<(), AppError>;
    fn read_level(&mut self, line: u32) -> Result<Level, AppError>;

    /// Flips the level of `line` and returns the new level.
    fn toggle(&mut self, line: u32) -> Result<Level, AppError> {
        let level = self.read_level(line)?.flipped();
        self.write_level(line, level)?;
        Ok(level)
    }
}
