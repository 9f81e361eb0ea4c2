//! Application service, the hexagonal core.
//!
//! [`ServiceMenu`] owns the mode machine and its context. It exposes a
//! hardware-agnostic API; all I/O flows through the [`Board`] and
//! [`EventSink`] ports injected at call sites, so the whole control loop is
//! testable with mock adapters.
//!
//! ```text
//!  SwitchPort ─┐   ┌─────────────────────────────┐
//!  RotaryPort ─┼──▶│         ServiceMenu          │──▶ EventSink
//!  Sensor     ─┘   │ PressClassifier · Fsm · Menu │
//!  CharDisplay ◀───│ Calibration · Diagnostics    │──▶ SettingsPort
//!                  └─────────────────────────────┘
//! ```

use log::{info, warn};

use crate::calibration::CalibrationStage;
use crate::config::{self, ControllerSettings};
use crate::drivers::button::{PressClassifier, SwitchState};
use crate::fsm::context::ModeContext;
use crate::fsm::states::{self, build_mode_table};
use crate::fsm::{Fsm, Mode};
use crate::menu::MenuEngine;

use super::commands::AppCommand;
use super::events::AppEvent;
use super::ports::{Board, EventSink, SettingsError, SettingsPort};

// ───────────────────────────────────────────────────────────────
// ServiceMenu
// ───────────────────────────────────────────────────────────────

pub struct ServiceMenu {
    fsm: Fsm,
    ctx: ModeContext,
}

impl ServiceMenu {
    /// Construct the service around a loaded settings record.
    ///
    /// Does **not** touch hardware; call [`start`](Self::start) next.
    pub fn new(settings: ControllerSettings) -> Self {
        Self {
            fsm: Fsm::new(build_mode_table(), Mode::Menu),
            ctx: ModeContext::new(settings),
        }
    }

    /// Load the stored record, falling back to factory defaults when it is
    /// missing, unreadable or out of range.
    pub fn load_settings(store: &(impl SettingsPort + ?Sized)) -> ControllerSettings {
        match store.load() {
            Ok(settings) => match config::validate(&settings) {
                Ok(()) => {
                    info!("settings loaded");
                    settings
                }
                Err(msg) => {
                    warn!("stored settings invalid ({}), using defaults", msg);
                    ControllerSettings::default()
                }
            },
            Err(SettingsError::NotFound) => {
                info!("no stored settings, using defaults");
                ControllerSettings::default()
            }
            Err(e) => {
                warn!("settings load failed ({}), using defaults", e);
                ControllerSettings::default()
            }
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Bring up the display and peripherals and enter the menu.
    pub fn start(&mut self, board: &mut impl Board, sink: &mut impl EventSink) {
        board.init();
        board.set_rotary_count(0);
        board.clear_output_latch();
        board.set_calibration(&self.ctx.settings.calibration);

        self.ctx.press = PressClassifier::new();
        self.ctx.cursor = 0;
        self.ctx.menu.reset();
        self.fsm.start();

        sink.emit(&AppEvent::Started(self.fsm.current_mode()));
        info!("ServiceMenu started in {}", self.fsm.current_mode());
    }

    // ── Per-iteration orchestration ───────────────────────────

    /// Run one control-loop iteration: sample the switch, advance the
    /// analog filters, dispatch the current mode.
    pub fn tick(&mut self, now_ms: u32, board: &mut impl Board, sink: &mut impl EventSink) {
        self.ctx.now_ms = now_ms;
        let line_low = board.switch_is_low();
        self.ctx.press.sample(line_low, now_ms);
        board.update_filters();
        self.fsm.tick(&mut self.ctx, board, sink);
    }

    // ── Commands ──────────────────────────────────────────────

    /// Execute a command as if the matching menu item had been run.
    pub fn handle_command(
        &mut self,
        command: AppCommand,
        board: &mut impl Board,
        sink: &mut impl EventSink,
    ) {
        info!("command: {:?}", command);
        if let Some(next) = states::execute(command, &mut self.ctx, board, sink) {
            self.fsm.force_transition(next, &mut self.ctx, board, sink);
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn mode(&self) -> Mode {
        self.fsm.current_mode()
    }

    pub fn settings(&self) -> &ControllerSettings {
        &self.ctx.settings
    }

    pub fn switch_state(&self) -> SwitchState {
        self.ctx.press.state()
    }

    pub fn calibration_stage(&self) -> CalibrationStage {
        self.ctx.calibration.stage()
    }

    pub fn zero_samples(&self) -> u8 {
        self.ctx.calibration.zero_samples()
    }

    pub fn menu(&self) -> &MenuEngine {
        &self.ctx.menu
    }

    /// Button-map slot currently selected in the menu.
    pub fn cursor(&self) -> u8 {
        self.ctx.cursor
    }

    /// Whether the current mode's entry action is still to run.
    pub fn is_entry_pending(&self) -> bool {
        self.fsm.is_enter_pending()
    }
}
