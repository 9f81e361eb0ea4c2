//! Shared mutable context threaded through every mode handler.
//!
//! `ModeContext` is the blackboard of the control loop: the press
//! classifier, the in-memory settings record, the menu engine and the
//! per-mode progress all live here, owned by one
//! [`ServiceMenu`](crate::app::service::ServiceMenu). Nothing is static,
//! so several instances can coexist.

use crate::calibration::CalibrationProcedure;
use crate::config::ControllerSettings;
use crate::diagnostics::RefreshTimer;
use crate::drivers::button::PressClassifier;
use crate::menu::MenuEngine;

pub struct ModeContext {
    /// Monotonic milliseconds of the current iteration.
    pub now_ms: u32,
    /// Ticks since the current mode was entered.
    pub ticks_in_mode: u64,

    pub press: PressClassifier,
    pub settings: ControllerSettings,
    /// Button-map slot the menu edits. Transient, 0..=15.
    pub cursor: u8,

    pub menu: MenuEngine,
    pub calibration: CalibrationProcedure,
    /// Display refresh gate of the diagnostic readouts.
    pub refresh: RefreshTimer,
}

impl ModeContext {
    pub fn new(settings: ControllerSettings) -> Self {
        Self {
            now_ms: 0,
            ticks_in_mode: 0,
            press: PressClassifier::new(),
            settings,
            cursor: 0,
            menu: MenuEngine::new(),
            calibration: CalibrationProcedure::new(),
            refresh: RefreshTimer::new(),
        }
    }
}
