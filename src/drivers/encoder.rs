//! Polled quadrature decoder for the rotary encoder.
//!
//! Channels A and B are sampled once per control-loop iteration and fed
//! through the standard 4×4 transition table: each valid Gray-code step
//! moves the count by one, so one mechanical detent is four counts.
//! Invalid (double) steps are dropped.

use embedded_hal::digital::InputPin;

/// Indexed by `(previous_state << 2) | current_state`, state = `A << 1 | B`.
const TRANSITIONS: [i8; 16] = [0, -1, 1, 0, 1, 0, 0, -1, -1, 0, 0, 1, 0, 1, -1, 0];

pub struct QuadratureDecoder<A: InputPin, B: InputPin> {
    a: A,
    b: B,
    state: u8,
    count: i32,
}

impl<A: InputPin, B: InputPin> QuadratureDecoder<A, B> {
    pub fn new(mut a: A, mut b: B) -> Self {
        let state = Self::read_state(&mut a, &mut b).unwrap_or(0);
        Self {
            a,
            b,
            state,
            count: 0,
        }
    }

    fn read_state(a: &mut A, b: &mut B) -> Option<u8> {
        let a = a.is_high().ok()?;
        let b = b.is_high().ok()?;
        Some(u8::from(a) << 1 | u8::from(b))
    }

    /// Sample both channels and update the count. A failed pin read skips
    /// the sample.
    pub fn poll(&mut self) {
        if let Some(state) = Self::read_state(&mut self.a, &mut self.b) {
            self.step(state);
        }
    }

    /// Feed one 2-bit channel state.
    pub fn step(&mut self, state: u8) {
        let idx = usize::from((self.state << 2) | (state & 0b11));
        self.count = self.count.wrapping_add(i32::from(TRANSITIONS[idx]));
        self.state = state & 0b11;
    }

    pub fn count(&self) -> i32 {
        self.count
    }

    pub fn set_count(&mut self, count: i32) {
        self.count = count;
    }
}
