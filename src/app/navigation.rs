//! Navigation adapter: rotary delta + ready press → one menu action.

use crate::drivers::button::{Press, PressClassifier};

use super::ports::RotaryPort;

/// Quadrature counts per mechanical detent.
pub const COUNTS_PER_DETENT: i32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    None,
    Select,
    Escape,
    Increment(u16),
    Decrement(u16),
}

/// Produce the next navigation action.
///
/// A ready press wins and is consumed. Otherwise whole detents turned since
/// the last call become an increment or decrement and the accumulator is
/// zeroed; a partial detent stays in the accumulator.
pub fn poll<R: RotaryPort + ?Sized>(press: &mut PressClassifier, rotary: &mut R) -> NavAction {
    if let Some(p) = press.take() {
        return match p {
            Press::Short => NavAction::Select,
            Press::Long => NavAction::Escape,
        };
    }

    let detents = rotary.rotary_count() / COUNTS_PER_DETENT;
    if detents == 0 {
        return NavAction::None;
    }
    rotary.set_rotary_count(0);

    let step = detents.unsigned_abs().min(u32::from(u16::MAX)) as u16;
    if detents > 0 {
        NavAction::Increment(step)
    } else {
        NavAction::Decrement(step)
    }
}
