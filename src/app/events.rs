//! Outbound application events.
//!
//! The [`ServiceMenu`](super::service::ServiceMenu) emits these through the
//! [`EventSink`](super::ports::EventSink) port. The log adapter prints
//! them to the serial console; tests record them.

use crate::calibration::CalibrationStage;
use crate::config::CalibrationCoefficients;
use crate::fsm::Mode;
use crate::menu::FieldId;

use super::ports::{RestartKind, SettingsError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The service menu started (carries the initial mode).
    Started(Mode),

    /// The scheduler switched modes.
    ModeChanged { from: Mode, to: Mode },

    /// The calibration procedure moved to a new stage.
    CalibrationStage(CalibrationStage),

    /// An auto-calibration sample was rejected; the stage is unchanged.
    CalibrationSampleRejected(CalibrationStage),

    /// Calibration finished and the coefficients were written to settings.
    CalibrationCommitted(CalibrationCoefficients),

    /// Calibration was aborted with a long press.
    CalibrationAborted(CalibrationStage),

    /// A menu field was committed and the record persisted.
    SettingsSaved(FieldId),

    /// Persisting the record failed; the in-memory value stays applied.
    SettingsSaveFailed(SettingsError),

    /// Settings were reset to factory defaults.
    FactoryReset,

    /// A platform restart is about to be issued.
    RestartRequested(RestartKind),
}
