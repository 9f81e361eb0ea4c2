//! Concrete mode handlers and table builder.
//!
//! ```text
//!                 ┌──[Button Test]──▶ BUTTON_TEST ──[any press]──┐
//!                 │                                              │
//!  MENU ──────────┼──[Touch Test]───▶ POSITION_TEST ─[any press]─┤
//!    ▲            │                                              │
//!    │            └──[Touch Calib.]─▶ CALIBRATION ─[done/abort]──┤
//!    └───────────────────────────────────────────────────────────┘
//! ```

use log::{debug, info};

use super::context::ModeContext;
use super::{Mode, ModeDescriptor};
use crate::app::bridge::{self, SettingsBridge};
use crate::app::commands::AppCommand;
use crate::app::events::AppEvent;
use crate::app::navigation::{self, NavAction};
use crate::app::ports::{Board, EventSink, RestartKind};
use crate::calibration::{self, StepOutcome};
use crate::diagnostics::{self, BUTTON_TEST_TITLE, TOUCH_TEST_TITLE};
use crate::menu::Frame;

/// Title shown while the calibration procedure runs.
pub const CALIBRATION_TITLE: &str = "Touch Calib.";

/// Left on the display while the board resets.
pub const RESTART_NOTICE: &str = "Restart";
pub const BOOTLOADER_NOTICE: &str = "Jump to BL";

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

pub fn build_mode_table() -> [ModeDescriptor; Mode::COUNT] {
    [
        // Index 0: Menu
        ModeDescriptor {
            id: Mode::Menu,
            name: "Menu",
            on_enter: Some(menu_enter),
            on_exit: None,
            on_update: menu_update,
        },
        // Index 1: ButtonTest
        ModeDescriptor {
            id: Mode::ButtonTest,
            name: "ButtonTest",
            on_enter: Some(button_test_enter),
            on_exit: None,
            on_update: button_test_update,
        },
        // Index 2: PositionTest
        ModeDescriptor {
            id: Mode::PositionTest,
            name: "PositionTest",
            on_enter: Some(position_test_enter),
            on_exit: None,
            on_update: position_test_update,
        },
        // Index 3: CalibrationRun
        ModeDescriptor {
            id: Mode::CalibrationRun,
            name: "CalibrationRun",
            on_enter: Some(calibration_enter),
            on_exit: Some(calibration_exit),
            on_update: calibration_update,
        },
    ]
}

/// Execute a command from a menu run action or the host.
///
/// Returns the mode to switch to, if the command enters one.
pub fn execute(
    command: AppCommand,
    ctx: &mut ModeContext,
    board: &mut dyn Board,
    sink: &mut dyn EventSink,
) -> Option<Mode> {
    match command {
        AppCommand::EnterButtonTest => Some(Mode::ButtonTest),
        AppCommand::EnterPositionTest => Some(Mode::PositionTest),
        AppCommand::EnterCalibration => Some(Mode::CalibrationRun),
        AppCommand::FactoryReset => {
            bridge::factory_reset(&mut ctx.settings, board, sink);
            None
        }
        AppCommand::Restart(kind) => {
            info!("restart requested: {:?}", kind);
            sink.emit(&AppEvent::RestartRequested(kind));
            let notice = match kind {
                RestartKind::Main => RESTART_NOTICE,
                RestartKind::Bootloader => BOOTLOADER_NOTICE,
            };
            show_title(board, notice);
            board.restart(kind);
            None
        }
    }
}

fn draw(board: &mut dyn Board, frame: &Frame) {
    board.write_line(0, &frame.top);
    board.write_line(1, &frame.bottom);
}

fn show_title(board: &mut dyn Board, title: &str) {
    board.clear();
    board.set_cursor(0, 0);
    board.print(title);
}

// ═══════════════════════════════════════════════════════════════════════════
//  MENU
// ═══════════════════════════════════════════════════════════════════════════

fn menu_enter(ctx: &mut ModeContext, board: &mut dyn Board, _sink: &mut dyn EventSink) {
    board.set_rotary_count(0);
    board.clear();
    ctx.menu.reset();
}

fn menu_update(
    ctx: &mut ModeContext,
    board: &mut dyn Board,
    sink: &mut dyn EventSink,
) -> Option<Mode> {
    if !ctx.menu.is_active() {
        board.set_rotary_count(0);
        let frame = ctx.menu.start();
        draw(board, &frame);
        return None;
    }

    let action = navigation::poll(&mut ctx.press, &mut *board);
    if action == NavAction::None {
        return None;
    }
    debug!("MENU | nav {:?}", action);

    let mut host = SettingsBridge::new(&mut ctx.settings, &mut ctx.cursor, &mut *board, &mut *sink);
    let frame = ctx.menu.handle(action, &mut host);
    let command = host.take_command();

    if let Some(frame) = frame {
        draw(board, &frame);
    }
    command.and_then(|c| execute(c, ctx, board, sink))
}

// ═══════════════════════════════════════════════════════════════════════════
//  BUTTON_TEST
// ═══════════════════════════════════════════════════════════════════════════

fn button_test_enter(ctx: &mut ModeContext, board: &mut dyn Board, _sink: &mut dyn EventSink) {
    show_title(board, BUTTON_TEST_TITLE);
    ctx.refresh.reset();
}

fn button_test_update(
    ctx: &mut ModeContext,
    board: &mut dyn Board,
    _sink: &mut dyn EventSink,
) -> Option<Mode> {
    if ctx.press.take().is_some() {
        return Some(Mode::Menu);
    }

    if ctx.refresh.due(ctx.now_ms) {
        let line = diagnostics::format_button_mask(board.scan_buttons());
        debug!("BUTTONS | {}", line);
        board.set_cursor(0, 1);
        board.print(&line);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  POSITION_TEST
// ═══════════════════════════════════════════════════════════════════════════

fn position_test_enter(ctx: &mut ModeContext, board: &mut dyn Board, _sink: &mut dyn EventSink) {
    show_title(board, TOUCH_TEST_TITLE);
    ctx.refresh.reset();
}

fn position_test_update(
    ctx: &mut ModeContext,
    board: &mut dyn Board,
    _sink: &mut dyn EventSink,
) -> Option<Mode> {
    if ctx.press.take().is_some() {
        return Some(Mode::Menu);
    }

    if ctx.refresh.due(ctx.now_ms) {
        board.refresh();
        let line = diagnostics::format_position(&board.reading());
        board.write_line(1, &line);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  CALIBRATION
// ═══════════════════════════════════════════════════════════════════════════

fn calibration_enter(ctx: &mut ModeContext, board: &mut dyn Board, _sink: &mut dyn EventSink) {
    show_title(board, CALIBRATION_TITLE);
    ctx.calibration.reset();
    info!("CALIB: started");
}

fn calibration_exit(ctx: &mut ModeContext, _board: &mut dyn Board, _sink: &mut dyn EventSink) {
    ctx.calibration.reset();
}

fn calibration_update(
    ctx: &mut ModeContext,
    board: &mut dyn Board,
    sink: &mut dyn EventSink,
) -> Option<Mode> {
    match ctx.calibration.step(&mut ctx.press, &mut *board) {
        StepOutcome::Waiting => None,

        StepOutcome::Prompt(text) => {
            board.write_line(1, text);
            sink.emit(&AppEvent::CalibrationStage(ctx.calibration.stage()));
            None
        }

        StepOutcome::Accepted(at) => {
            let now = ctx.calibration.stage();
            debug!(
                "CALIB: sample accepted at {:?} (zero samples {})",
                at,
                ctx.calibration.zero_samples()
            );
            if now != at {
                sink.emit(&AppEvent::CalibrationStage(now));
            }
            None
        }

        StepOutcome::Rejected(at) => {
            info!("CALIB: sample rejected at {:?}", at);
            sink.emit(&AppEvent::CalibrationSampleRejected(at));
            None
        }

        StepOutcome::Commit(coefficients) => {
            board.write_line(1, calibration::SAVING_PROMPT);
            ctx.settings.calibration = coefficients;
            bridge::persist(&ctx.settings, &mut *board, &mut *sink, None);
            info!(
                "CALIB: committed left={} right={} zero={}",
                coefficients.left_span, coefficients.right_span, coefficients.zero_level
            );
            sink.emit(&AppEvent::CalibrationCommitted(coefficients));
            board.write_line(1, calibration::DONE_PROMPT);
            sink.emit(&AppEvent::CalibrationStage(ctx.calibration.stage()));
            None
        }

        StepOutcome::Finished => Some(Mode::Menu),

        StepOutcome::Aborted(at) => {
            info!("CALIB: aborted at {:?}", at);
            sink.emit(&AppEvent::CalibrationAborted(at));
            Some(Mode::Menu)
        }
    }
}
