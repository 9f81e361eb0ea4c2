//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (UART / USB-CDC in production).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(mode) => {
                info!("START | initial_mode={}", mode);
            }
            AppEvent::ModeChanged { from, to } => {
                info!("MODE | {} -> {}", from, to);
            }
            AppEvent::CalibrationStage(stage) => {
                info!("CALIB | stage={} ({:?})", stage.index(), stage);
            }
            AppEvent::CalibrationSampleRejected(stage) => {
                info!("CALIB | sample rejected at stage={}", stage.index());
            }
            AppEvent::CalibrationCommitted(c) => {
                info!(
                    "CALIB | committed left={} right={} zero={}",
                    c.left_span, c.right_span, c.zero_level
                );
            }
            AppEvent::CalibrationAborted(stage) => {
                info!("CALIB | aborted at stage={}", stage.index());
            }
            AppEvent::SettingsSaved(field) => {
                info!("SETTINGS | saved field={}", field.raw());
            }
            AppEvent::SettingsSaveFailed(e) => {
                warn!("SETTINGS | save failed: {}", e);
            }
            AppEvent::FactoryReset => {
                info!("SETTINGS | factory reset");
            }
            AppEvent::RestartRequested(kind) => {
                info!("RESTART | {:?}", kind);
            }
        }
    }
}
