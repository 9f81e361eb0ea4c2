//! Unified error types for the service-menu firmware.
//!
//! Driver and adapter failures funnel into one `Copy` enum so the
//! hardware adapter can log them uniformly and keep the control loop
//! running. Storage errors live with their port in [`crate::app::ports`].

use core::fmt;

use crate::app::ports::{SettingsError, StorageError};

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A synchronous serial transfer to the shift registers failed.
    Bus(&'static str),
    /// A GPIO read or write failed.
    Pin(&'static str),
    /// The settings record could not be loaded or saved.
    Settings(SettingsError),
    /// Peripheral initialisation failed.
    Init(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus(msg) => write!(f, "bus: {msg}"),
            Self::Pin(msg) => write!(f, "pin: {msg}"),
            Self::Settings(e) => write!(f, "settings: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
        }
    }
}

impl From<SettingsError> for Error {
    fn from(e: SettingsError) -> Self {
        Self::Settings(e)
    }
}

impl From<StorageError> for Error {
    fn from(e: StorageError) -> Self {
        Self::Settings(SettingsError::Storage(e))
    }
}

impl core::error::Error for Error {}

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
