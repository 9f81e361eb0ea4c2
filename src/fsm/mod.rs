//! Function-pointer mode machine for the service-menu control loop.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  ModeTable                                                   │
//! │  ┌────────────────┬───────────┬──────────┬────────────────┐  │
//! │  │ Mode           │ on_enter  │ on_exit  │ on_update      │  │
//! │  ├────────────────┼───────────┼──────────┼────────────────┤  │
//! │  │ Menu           │ fn(..)    │ -        │ fn(..)->Option │  │
//! │  │ ButtonTest     │ fn(..)    │ -        │ fn(..)->Option │  │
//! │  │ PositionTest   │ fn(..)    │ -        │ fn(..)->Option │  │
//! │  │ CalibrationRun │ fn(..)    │ fn(..)   │ fn(..)->Option │  │
//! │  └────────────────┴───────────┴──────────┴────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each tick the engine calls `on_update` for the current mode. When it
//! returns `Some(next)`, the engine runs `on_exit` for the current mode and
//! arms the transition latch. The next mode's `on_enter` runs on the first
//! tick after the switch, immediately before its first `on_update`.
//!
//! Handlers receive the [`ModeContext`] blackboard, the [`Board`] and the
//! [`EventSink`].

pub mod context;
pub mod states;

use core::fmt;

use context::ModeContext;
use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::{Board, EventSink};

// ---------------------------------------------------------------------------
// Mode identity
// ---------------------------------------------------------------------------

/// Top-level modes of the control loop.
/// Must stay in sync with the table built in [`states::build_mode_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Mode {
    Menu = 0,
    ButtonTest = 1,
    PositionTest = 2,
    CalibrationRun = 3,
}

impl Mode {
    /// Total number of modes, used to size the table array.
    pub const COUNT: usize = 4;

    /// Convert an index back to `Mode`. Out-of-range falls back to `Menu`.
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Menu,
            1 => Self::ButtonTest,
            2 => Self::PositionTest,
            3 => Self::CalibrationRun,
            _ => {
                debug_assert!(false, "invalid mode index: {idx}");
                Self::Menu
            }
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Menu => "Menu",
            Self::ButtonTest => "ButtonTest",
            Self::PositionTest => "PositionTest",
            Self::CalibrationRun => "CalibrationRun",
        })
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` and `on_exit` actions.
pub type ModeActionFn = fn(&mut ModeContext, &mut dyn Board, &mut dyn EventSink);

/// Per-tick handler. Returns `Some(next)` to switch modes.
pub type ModeUpdateFn = fn(&mut ModeContext, &mut dyn Board, &mut dyn EventSink) -> Option<Mode>;

/// One row of the mode table.
pub struct ModeDescriptor {
    pub id: Mode,
    pub name: &'static str,
    pub on_enter: Option<ModeActionFn>,
    pub on_exit: Option<ModeActionFn>,
    pub on_update: ModeUpdateFn,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

pub struct Fsm {
    /// Fixed-size table indexed by `Mode as usize`.
    table: [ModeDescriptor; Mode::COUNT],
    current: usize,
    /// Set on every switch; cleared when `on_enter` has run.
    enter_pending: bool,
    tick_count: u64,
    mode_entry_tick: u64,
}

impl Fsm {
    pub fn new(table: [ModeDescriptor; Mode::COUNT], initial: Mode) -> Self {
        Self {
            table,
            current: initial as usize,
            enter_pending: true,
            tick_count: 0,
            mode_entry_tick: 0,
        }
    }

    /// Re-arm the latch for the current mode so the first tick runs its
    /// `on_enter`.
    pub fn start(&mut self) {
        info!("MODE starting in: {}", self.table[self.current].name);
        self.enter_pending = true;
        self.mode_entry_tick = self.tick_count;
    }

    /// Advance by one control-loop iteration.
    pub fn tick(&mut self, ctx: &mut ModeContext, board: &mut dyn Board, sink: &mut dyn EventSink) {
        self.tick_count += 1;
        ctx.ticks_in_mode = self.tick_count - self.mode_entry_tick;

        if self.enter_pending {
            self.enter_pending = false;
            if let Some(enter) = self.table[self.current].on_enter {
                enter(ctx, board, sink);
            }
        }

        if let Some(next) = (self.table[self.current].on_update)(ctx, board, sink) {
            self.transition(next, ctx, board, sink);
        }
    }

    /// Switch modes outside `on_update` (host-injected commands).
    /// A no-op when already in `next`.
    pub fn force_transition(
        &mut self,
        next: Mode,
        ctx: &mut ModeContext,
        board: &mut dyn Board,
        sink: &mut dyn EventSink,
    ) {
        if next as usize != self.current {
            self.transition(next, ctx, board, sink);
        }
    }

    pub fn current_mode(&self) -> Mode {
        Mode::from_index(self.current)
    }

    /// Whether the current mode's `on_enter` is still to run.
    pub fn is_enter_pending(&self) -> bool {
        self.enter_pending
    }

    pub fn ticks_in_current_mode(&self) -> u64 {
        self.tick_count - self.mode_entry_tick
    }

    fn transition(
        &mut self,
        next: Mode,
        ctx: &mut ModeContext,
        board: &mut dyn Board,
        sink: &mut dyn EventSink,
    ) {
        let from = self.current_mode();
        let next_idx = next as usize;

        info!(
            "MODE transition: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        if let Some(exit) = self.table[self.current].on_exit {
            exit(ctx, board, sink);
        }

        self.current = next_idx;
        self.mode_entry_tick = self.tick_count;
        self.enter_pending = true;
        ctx.ticks_in_mode = 0;

        sink.emit(&AppEvent::ModeChanged { from, to: next });
    }
}
