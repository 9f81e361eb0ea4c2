//! Peripheral drivers and one-shot hardware initialisation.
//!
//! Drivers are written against `embedded-hal` traits; [`hw_init`] supplies
//! the ESP-IDF-backed pin, ADC and delay types they are instantiated with.

pub mod button;
pub mod encoder;
pub mod hw_init;
pub mod lcd;
pub mod matrix;
pub mod restart;
