//! Touch-strip sensing: raw ADC sources, smoothing and position geometry.
//!
//! [`TouchStrip`] owns one [`AdcSource`] per strip end and a
//! [`ResponsiveFilter`] for each, and turns the filtered pair into the
//! two zone positions reported through
//! [`PositionSensorPort`](crate::app::ports::PositionSensorPort).

pub mod filter;
pub mod touch_strip;

pub use filter::ResponsiveFilter;
pub use touch_strip::TouchStrip;

/// One analog channel in the 10-bit range (0..=1023).
pub trait AdcSource {
    /// One conversion, `None` on driver error.
    fn read(&mut self) -> Option<u16>;
}
