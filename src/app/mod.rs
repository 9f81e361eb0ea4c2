//! Application layer: the hexagonal core of the service menu.
//!
//! * [`ports`]: trait boundaries to the board and storage
//! * [`service`]: the control loop orchestrator
//! * [`navigation`]: rotary + press → menu action
//! * [`bridge`]: menu fields ↔ settings record

pub mod bridge;
pub mod commands;
pub mod events;
pub mod navigation;
pub mod ports;
pub mod service;
