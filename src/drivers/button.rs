//! Polled press classifier for the encoder's push switch.
//!
//! ## Hardware
//!
//! Active-low momentary switch with pull-up, sampled once per control-loop
//! iteration. No interrupt: the loop runs fast enough that a human press
//! spans many samples.
//!
//! ## States
//!
//! | Value | State            | Meaning                                   |
//! |------:|------------------|-------------------------------------------|
//! |     0 | `Idle`           | nothing pending                           |
//! |    -1 | `Pending`        | line low, hold shorter than threshold     |
//! |    -2 | `LongHeld`       | line still low, hold exceeded threshold   |
//! |    +1 | `ShortReady`     | released before threshold, not yet consumed |
//! |    +2 | `LongReady`      | released after threshold, not yet consumed  |
//!
//! A release negates the pending value, so a ready value always encodes the
//! gesture that produced it. Ready values latch until a consumer calls
//! [`PressClassifier::reset`]; further presses are ignored meanwhile.
//!
//! The switch is usually still held when the board powers up through the
//! service-menu entry gesture, so the classifier starts blocked: low samples
//! are ignored until the first release, which only clears the block.

/// Hold time after which a press counts as long.
pub const LONG_PRESS_THRESHOLD_MS: u32 = 500;

/// Classifier state, encoded as in the module table (negative = held,
/// positive = ready).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(i8)]
pub enum SwitchState {
    #[default]
    Idle = 0,
    Pending = -1,
    LongHeld = -2,
    ShortReady = 1,
    LongReady = 2,
}

impl SwitchState {
    /// Signed encoding of the state.
    pub fn raw(self) -> i8 {
        self as i8
    }

    /// Map a held state to the ready state its release produces.
    fn released(self) -> Self {
        match self {
            Self::Pending => Self::ShortReady,
            Self::LongHeld => Self::LongReady,
            other => other,
        }
    }
}

/// A completed, unconsumed press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Press {
    Short,
    Long,
}

/// Turns raw switch samples into short and long presses.
///
/// Feed it once per iteration with [`sample`](Self::sample); consume a
/// ready press with [`take`](Self::take). A ready press stays latched
/// until consumed.
#[derive(Debug, Clone)]
pub struct PressClassifier {
    state: SwitchState,
    hold_start_ms: u32,
    startup_block: bool,
}

impl Default for PressClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl PressClassifier {
    /// A classifier armed with the start-up block.
    pub fn new() -> Self {
        Self {
            state: SwitchState::Idle,
            hold_start_ms: 0,
            startup_block: true,
        }
    }

    /// Feed one sample of the switch line.
    ///
    /// `line_low` is the raw level (true = pressed); `now_ms` the monotonic
    /// millisecond clock.
    pub fn sample(&mut self, line_low: bool, now_ms: u32) {
        if line_low {
            if self.startup_block {
                return;
            }
            match self.state {
                SwitchState::Idle => {
                    self.state = SwitchState::Pending;
                    self.hold_start_ms = now_ms;
                }
                SwitchState::Pending
                    if now_ms.wrapping_sub(self.hold_start_ms) > LONG_PRESS_THRESHOLD_MS =>
                {
                    self.state = SwitchState::LongHeld;
                }
                _ => {}
            }
        } else if self.startup_block {
            self.startup_block = false;
        } else {
            self.state = self.state.released();
        }
    }

    pub fn state(&self) -> SwitchState {
        self.state
    }

    /// Whether the start-up block is still in force.
    pub fn is_blocked(&self) -> bool {
        self.startup_block
    }

    /// The ready press, if any. Does not consume it.
    pub fn ready(&self) -> Option<Press> {
        match self.state {
            SwitchState::ShortReady => Some(Press::Short),
            SwitchState::LongReady => Some(Press::Long),
            _ => None,
        }
    }

    /// Consume a ready press: back to idle with a cleared hold timestamp.
    pub fn reset(&mut self) {
        if self.ready().is_none() {
            log::debug!("press classifier reset while {:?}", self.state);
        }
        self.state = SwitchState::Idle;
        self.hold_start_ms = 0;
    }

    /// Return the ready press and reset, or `None` leaving state untouched.
    pub fn take(&mut self) -> Option<Press> {
        let press = self.ready()?;
        self.reset();
        Some(press)
    }
}
