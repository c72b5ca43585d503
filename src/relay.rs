use log::{debug, error, info, warn};
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::RelayConfig;
use crate::error::AppError;
use crate::gpio::{GpioBackend, Level};

/// Drives the relay lines of a garage door remote.
///
/// Each button index maps to one output line. Lines rest at the inactive
/// level and a press pulses a single line to active for `pulse_ms`. All
/// backend access goes through one async mutex, so pulses never overlap.
pub struct RelayController<B: GpioBackend> {
    config: RelayConfig,
    backend: Mutex<B>,
}

impl<B: GpioBackend> RelayController<B> {
    /// Claims every relay line as an output at the inactive level.
    pub fn new(config: RelayConfig, mut backend: B) -> Result<Self, AppError> {
        for &line in &config.lines {
            backend.configure_output(line, Level::INACTIVE)?;
        }
        info!("Relay configured on lines {:?}", config.lines);

        Ok(Self {
            config,
            backend: Mutex::new(backend),
        })
    }

    pub fn line_for(&self, button: u32) -> Result<u32, AppError> {
        usize::try_from(button)
            .ok()
            .and_then(|idx| self.config.lines.get(idx))
            .copied()
            .ok_or(AppError::InvalidButton(button))
    }

    /// Presses `button`: the line goes active, is held for the pulse length,
    /// then goes back to inactive.
    ///
    /// The pulse runs on its own task, so it completes even if the caller is
    /// dropped while waiting.
    pub async fn toggle(self: &Arc<Self>, button: u32) -> Result<(), AppError> {
        let line = self.line_for(button)?;
        let controller = Arc::clone(self);

        actix_web::rt::spawn(async move { controller.pulse(line).await })
            .await
            .map_err(|e| AppError::Gpio(format!("pulse task on line {line}: {e}")))?
    }

    async fn pulse(&self, line: u32) -> Result<(), AppError> {
        let mut backend = self.backend.lock().await;

        let level = backend.toggle(line)?;
        debug!("line {line} driven {level}");

        tokio::time::sleep(self.config.pulse()).await;

        if let Err(e) = backend.toggle(line) {
            error!("failed to release line {line}: {e}");
            if let Err(restore) = backend.write_level(line, Level::INACTIVE) {
                warn!("line {line} may be left active: {restore}");
            }
            return Err(e);
        }
        debug!("line {line} released");

        Ok(())
    }

    pub async fn level(&self, button: u32) -> Result<Level, AppError> {
        let line = self.line_for(button)?;
        self.backend.lock().await.read_level(line)
    }

    /// Forces every relay line back to the inactive level. Waits for any
    /// pulse in progress to finish first.
    pub async fn shutdown(&self) -> Result<(), AppError> {
        let mut backend = self.backend.lock().await;
        Self::release_all(&mut *backend, &self.config.lines)?;
        info!("Relays opened");
        Ok(())
    }

    fn release_all(backend: &mut B, lines: &[u32]) -> Result<(), AppError> {
        let mut first_err = None;
        for &line in lines {
            if let Err(e) = backend.write_level(line, Level::INACTIVE) {
                warn!("failed to open relay on line {line}: {e}");
                first_err.get_or_insert(e);
            }
        }

        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl<B: GpioBackend> Drop for RelayController<B> {
    fn drop(&mut self) {
        // the backend itself is released right after this
        let _ = Self::release_all(self.backend.get_mut(), &self.config.lines);
        debug!("Relay controller released");
    }
}
