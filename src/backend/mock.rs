use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::AppError;
use crate::gpio::{GpioBackend, Level};

/// A level change observed on a mock line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinTransition {
    pub line: u32,
    pub level: Level,
    pub at: Instant,
}

/// Shared view of every level written to a `MockGpioBackend`, in order.
#[derive(Debug, Clone, Default)]
pub struct PinHistory {
    transitions: Arc<Mutex<Vec<PinTransition>>>,
}

impl PinHistory {
    fn record(&self, line: u32, level: Level) {
        self.transitions.lock().push(PinTransition {
            line,
            level,
            at: Instant::now(),
        });
    }

    pub fn transitions(&self) -> Vec<PinTransition> {
        self.transitions.lock().clone()
    }

    pub fn for_line(&self, line: u32) -> Vec<PinTransition> {
        self.transitions
            .lock()
            .iter()
            .filter(|t| t.line == line)
            .copied()
            .collect()
    }

    pub fn clear(&self) {
        self.transitions.lock().clear();
    }
}

/// In-memory GPIO lines, used for tests and `mock-gpio` builds.
#[derive(Default)]
pub struct MockGpioBackend {
    levels: FxHashMap<u32, Level>,
    faulty: FxHashSet<u32>,
    failing_write: Option<usize>,
    writes: usize,
    history: PinHistory,
}

impl MockGpioBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every write to `line` after it has been configured fails.
    pub fn with_faulty_line(mut self, line: u32) -> Self {
        self.faulty.insert(line);
        self
    }

    /// Only the `nth` write (1-based, counted after configuration) fails.
    pub fn with_failing_write(mut self, nth: usize) -> Self {
        self.failing_write = Some(nth);
        self
    }

    pub fn history(&self) -> PinHistory {
        self.history.clone()
    }

    fn configured(&self, line: u32) -> Result<Level, AppError> {
        self.levels
            .get(&line)
            .copied()
            .ok_or_else(|| AppError::Gpio(format!("line {line} is not configured as output")))
    }
}

impl GpioBackend for MockGpioBackend {
    fn configure_output(&mut self, line: u32, level: Level) -> Result<(), AppError> {
        self.levels.insert(line, level);
        self.history.record(line, level);
        Ok(())
    }

    fn write_level(&mut self, line: u32, level: Level) -> Result<(), AppError> {
        self.configured(line)?;
        self.writes += 1;
        if self.faulty.contains(&line) || self.failing_write == Some(self.writes) {
            return Err(AppError::Gpio(format!("set value on line {line}: I/O error")));
        }

        self.levels.insert(line, level);
        self.history.record(line, level);
        Ok(())
    }

    fn read_level(&mut self, line: u32) -> Result<Level, AppError> {
        self.configured(line)
    }
}
