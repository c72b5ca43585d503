use std::path::PathBuf;

use libgpiod::{chip::Chip, line, request};
use rustc_hash::FxHashMap;

use crate::error::AppError;
use crate::gpio::{GpioBackend, Level};

/// Relay lines on a Linux GPIO character device.
pub struct LibgpiodBackend {
    chip: Chip,
    requests: FxHashMap<u32, request::Request>, // keyed by line offset
}

impl LibgpiodBackend {
    /// Opens the chip at `path`. A missing or inaccessible device fails here,
    /// before any line is requested.
    pub fn new(path: &str) -> Result<Self, AppError> {
        let chip = Chip::open(&PathBuf::from(path))
            .map_err(|e| AppError::HardwareOpen(format!("{path}: {e}")))?;
        Ok(Self {
            chip,
            requests: FxHashMap::default(),
        })
    }

    fn to_value(level: Level) -> line::Value {
        match level {
            Level::High => line::Value::Active,
            Level::Low => line::Value::InActive,
        }
    }

    fn make_line_config(offset: u32, level: Level) -> Result<line::Config, AppError> {
        let mut ls =
            line::Settings::new().map_err(|e| AppError::Gpio(format!("libgpiod settings: {e}")))?;
        ls.set_direction(line::Direction::Output)
            .map_err(|e| AppError::Gpio(format!("set direction: {e}")))?;
        ls.set_drive(line::Drive::PushPull)
            .map_err(|e| AppError::Gpio(format!("set drive: {e}")))?;
        ls.set_output_value(Self::to_value(level))
            .map_err(|e| AppError::Gpio(format!("set output value: {e}")))?;

        let mut cfg =
            line::Config::new().map_err(|e| AppError::Gpio(format!("line config: {e}")))?;
        cfg.add_line_settings(&[offset], ls)
            .map_err(|e| AppError::Gpio(format!("line config add settings: {e}")))?;
        Ok(cfg)
    }

    fn request_line(&self, line_cfg: &line::Config) -> Result<request::Request, AppError> {
        let mut req_cfg =
            request::Config::new().map_err(|e| AppError::Gpio(format!("request config: {e}")))?;
        req_cfg
            .set_consumer(env!("CARGO_PKG_NAME"))
            .map_err(|e| AppError::Gpio(format!("request consumer: {e}")))?;
        self.chip
            .request_lines(Some(&req_cfg), line_cfg)
            .map_err(|e| AppError::Gpio(format!("request lines: {e}")))
    }

    fn request(&mut self, line: u32) -> Result<&mut request::Request, AppError> {
        self.requests
            .get_mut(&line)
            .ok_or_else(|| AppError::Gpio(format!("line {line} is not configured as output")))
    }
}

impl GpioBackend for LibgpiodBackend {
    fn configure_output(&mut self, line: u32, level: Level) -> Result<(), AppError> {
        let line_cfg = Self::make_line_config(line, level)?;

        match self.requests.get_mut(&line) {
            Some(req) => {
                req.reconfigure_lines(&line_cfg)
                    .map_err(|e| AppError::Gpio(format!("reconfigure lines: {e}")))?;
            }
            None => {
                let req = self.request_line(&line_cfg)?;
                self.requests.insert(line, req);
            }
        }

        Ok(())
    }

    fn write_level(&mut self, line: u32, level: Level) -> Result<(), AppError> {
        self.request(line)?
            .set_value(line, Self::to_value(level))
            .map_err(|e| AppError::Gpio(format!("set value on line {line}: {e}")))?;
        Ok(())
    }

    fn read_level(&mut self, line: u32) -> Result<Level, AppError> {
        let value = self
            .request(line)?
            .value(line)
            .map_err(|e| AppError::Gpio(format!("get value on line {line}: {e}")))?;
        Ok(match value {
            line::Value::Active => Level::High,
            line::Value::InActive => Level::Low,
        })
    }
}
