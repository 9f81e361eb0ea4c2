//! Service-menu firmware library for the controller adapter board.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module, so the whole crate
//! builds and tests on the host.

#![deny(unused_must_use)]

pub mod app;
pub mod calibration;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod fsm;
pub mod menu;
pub mod pins;

pub mod adapters;
pub mod drivers;
pub mod sensors;

#[cfg(test)]
mod testing;
