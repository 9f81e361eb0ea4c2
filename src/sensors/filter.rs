//! Responsive smoothing for noisy analog inputs.
//!
//! An exponential filter whose weight follows a snap curve of the
//! distance between the new sample and the smoothed value: small
//! differences (noise) barely move the output, large ones (a real
//! movement) pull it almost all the way at once. Samples within
//! [`ACTIVITY_THRESHOLD`] of either rail snap straight to the rail so
//! the ends of travel are reachable.

use crate::config::ADC_FULL_SCALE;

/// Scales the raw difference before it enters the snap curve.
pub const SNAP_MULTIPLIER: f32 = 0.01;

/// Distance from a rail, in counts, inside which the output snaps.
pub const ACTIVITY_THRESHOLD: f32 = 4.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct ResponsiveFilter {
    smooth: Option<f32>,
}

impl ResponsiveFilter {
    pub const fn new() -> Self {
        Self { smooth: None }
    }

    /// Feed one raw sample and return the new smoothed value.
    /// The first sample seeds the filter directly.
    pub fn update(&mut self, raw: u16) -> u16 {
        let raw_f = f32::from(raw);
        let next = match self.smooth {
            None => raw_f,
            Some(smooth) => {
                let weight = if Self::at_rail(raw_f) {
                    1.0
                } else {
                    snap_curve((raw_f - smooth).abs() * SNAP_MULTIPLIER)
                };
                smooth + (raw_f - smooth) * weight
            }
        };
        self.smooth = Some(next);
        self.value()
    }

    /// Current smoothed value, rounded. 0 before the first sample.
    pub fn value(&self) -> u16 {
        self.smooth
            .map_or(0, |v| (v + 0.5).clamp(0.0, f32::from(u16::MAX)) as u16)
    }

    pub fn reset(&mut self) {
        self.smooth = None;
    }

    fn at_rail(raw: f32) -> bool {
        raw <= ACTIVITY_THRESHOLD || raw >= f32::from(ADC_FULL_SCALE) - ACTIVITY_THRESHOLD
    }
}

/// Maps `[0, inf)` onto `[0, 1]`, steep near zero and saturating at 1.
fn snap_curve(x: f32) -> f32 {
    let y = 1.0 / (x + 1.0);
    ((1.0 - y) * 2.0).min(1.0)
}
