//! Dual-zone touch strip (soft potentiometer read from both ends).
//!
//! ```text
//!   left ADC ──▶ filter ──┐            ┌──▶ pos1 (0 at left end)
//!                         ├─ geometry ─┤
//!   right ADC ─▶ filter ──┘            └──▶ pos2 (mirrored, 0 at right end)
//! ```
//!
//! Each end reads above `zero_level` only while that zone is pressed. A
//! zone's position is its filtered reading mapped linearly from
//! `zero_level..=span` onto `0..=1023`; at or below `zero_level` the zone
//! is untouched.
//!
//! Auto-calibration keeps a minimum gap of [`MIN_GAP_RATIO`] of full
//! scale between the zero level and either span, so a sample taken with
//! the finger in the wrong place is rejected instead of collapsing the
//! usable range.

use log::debug;

use super::{AdcSource, ResponsiveFilter};
use crate::app::ports::{PositionReading, PositionSensorPort};
use crate::config::{ADC_FULL_SCALE, CalibrationCoefficients};

pub const MIN_GAP_RATIO: f32 = 0.10;

/// [`MIN_GAP_RATIO`] of full scale, in ADC counts.
pub const MIN_GAP: u16 = (ADC_FULL_SCALE as f32 * MIN_GAP_RATIO) as u16;

pub struct TouchStrip<A: AdcSource> {
    left: A,
    right: A,
    left_filter: ResponsiveFilter,
    right_filter: ResponsiveFilter,
    coefficients: CalibrationCoefficients,
    reading: PositionReading,
}

impl<A: AdcSource> TouchStrip<A> {
    pub fn new(left: A, right: A, coefficients: CalibrationCoefficients) -> Self {
        Self {
            left,
            right,
            left_filter: ResponsiveFilter::new(),
            right_filter: ResponsiveFilter::new(),
            coefficients,
            reading: PositionReading::default(),
        }
    }

    fn left_value(&self) -> u16 {
        self.left_filter.value()
    }

    fn right_value(&self) -> u16 {
        self.right_filter.value()
    }
}

/// Map `adc` from `zero..=span` onto `0..=ADC_FULL_SCALE`.
fn zone_position(adc: u16, zero: u16, span: u16) -> Option<u16> {
    if adc <= zero || span <= zero {
        return None;
    }
    let travel = u32::from(adc - zero).min(u32::from(span - zero));
    let scaled = travel * u32::from(ADC_FULL_SCALE) / u32::from(span - zero);
    Some(scaled as u16)
}

impl<A: AdcSource> PositionSensorPort for TouchStrip<A> {
    fn update_filters(&mut self) {
        if let Some(raw) = self.left.read() {
            self.left_filter.update(raw.min(ADC_FULL_SCALE));
        }
        if let Some(raw) = self.right.read() {
            self.right_filter.update(raw.min(ADC_FULL_SCALE));
        }
    }

    fn refresh(&mut self) {
        let c = &self.coefficients;
        let left_adc = self.left_value();
        let right_adc = self.right_value();
        self.reading = PositionReading {
            pos1: zone_position(left_adc, c.zero_level, c.left_span),
            pos2: zone_position(right_adc, c.zero_level, c.right_span)
                .map(|p| ADC_FULL_SCALE - p),
            left_adc,
            right_adc,
        };
    }

    fn reading(&self) -> PositionReading {
        self.reading
    }

    fn calibration(&self) -> CalibrationCoefficients {
        self.coefficients
    }

    fn set_calibration(&mut self, coefficients: &CalibrationCoefficients) {
        self.coefficients = *coefficients;
    }

    fn calibrate_left(&mut self) -> bool {
        let sample = self.left_value();
        if sample <= self.coefficients.zero_level.saturating_add(MIN_GAP) {
            debug!("touch strip: left sample {} too close to zero", sample);
            return false;
        }
        self.coefficients.left_span = sample;
        true
    }

    fn calibrate_right(&mut self) -> bool {
        let sample = self.right_value();
        if sample <= self.coefficients.zero_level.saturating_add(MIN_GAP) {
            debug!("touch strip: right sample {} too close to zero", sample);
            return false;
        }
        self.coefficients.right_span = sample;
        true
    }

    fn calibrate_zero(&mut self, first_sample: bool) -> bool {
        let sample = self.left_value().max(self.right_value());
        let floor = self
            .coefficients
            .left_span
            .min(self.coefficients.right_span);
        if sample.saturating_add(MIN_GAP) >= floor {
            debug!("touch strip: zero sample {} too close to span {}", sample, floor);
            return false;
        }
        self.coefficients.zero_level = if first_sample {
            sample
        } else {
            self.coefficients.zero_level.max(sample)
        };
        true
    }
}
