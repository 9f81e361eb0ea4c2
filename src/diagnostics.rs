//! Hardware self-test displays.
//!
//! Two live readouts share one refresh cadence:
//!
//! * **Button test**: the 16-bit matrix snapshot, one character per bit,
//!   bit 0 first. `'-'` is a released button (bit set), `'X'` a pressed
//!   one (bit clear).
//! * **Touch test**: `pos1 pos2 left right`, absent positions shown as
//!   `-`, truncated to the display width.

use core::fmt::Write as _;

use crate::app::ports::PositionReading;
use crate::menu::engine::Line;

/// Display refresh period of both readouts.
pub const REFRESH_INTERVAL_MS: u32 = 100;

pub const BUTTON_TEST_TITLE: &str = "Button Test";
pub const TOUCH_TEST_TITLE: &str = "Touch Test";

/// Periodic refresh gate on the wrapping millisecond clock.
#[derive(Debug, Clone, Default)]
pub struct RefreshTimer {
    last_ms: Option<u32>,
}

impl RefreshTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the last refresh so the next [`due`](Self::due) fires at once.
    pub fn reset(&mut self) {
        self.last_ms = None;
    }

    /// `true` if the interval has elapsed (or nothing was drawn yet);
    /// records `now_ms` as the refresh time when it fires.
    pub fn due(&mut self, now_ms: u32) -> bool {
        let fire = self
            .last_ms
            .is_none_or(|last| now_ms.wrapping_sub(last) >= REFRESH_INTERVAL_MS);
        if fire {
            self.last_ms = Some(now_ms);
        }
        fire
    }
}

/// Render an active-low button mask.
pub fn format_button_mask(mask: u16) -> Line {
    let mut line = Line::new();
    for bit in 0..16 {
        let ch = if mask & (1 << bit) != 0 { '-' } else { 'X' };
        // 16 characters exactly fill the line.
        let _ = line.push(ch);
    }
    line
}

/// Render a touch-strip reading, truncated to the display width.
pub fn format_position(reading: &PositionReading) -> Line {
    // Worst case is 4+1+4+1+4+1+4 = 19 characters.
    let mut full: heapless::String<24> = heapless::String::new();
    let _ = write!(
        full,
        "{} {} {} {}",
        Pos(reading.pos1),
        Pos(reading.pos2),
        reading.left_adc,
        reading.right_adc
    );
    crate::menu::engine::fit(&full)
}

struct Pos(Option<u16>);

impl core::fmt::Display for Pos {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.0 {
            Some(p) => write!(f, "{p}"),
            None => f.write_str("-"),
        }
    }
}
