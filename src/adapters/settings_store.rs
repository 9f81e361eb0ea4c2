//! Settings persistence over any [`StoragePort`].
//!
//! The record is stored as one blob: a layout version byte followed by the
//! `postcard` encoding of [`ControllerSettings`]. A save whose encoding
//! equals the stored blob skips the flash write.

use log::{debug, info, warn};

use crate::app::ports::{SettingsError, SettingsPort, StorageError, StoragePort};
use crate::config::{self, ControllerSettings};

pub const SETTINGS_NAMESPACE: &str = "svcmenu";
pub const SETTINGS_KEY: &str = "settings";

/// Bumped whenever the record layout changes.
pub const SETTINGS_VERSION: u8 = 1;

/// Upper bound of an encoded record (version byte included).
pub const MAX_RECORD_SIZE: usize = 64;

pub struct SettingsStore<S: StoragePort> {
    storage: S,
}

impl<S: StoragePort> SettingsStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Remove the stored record. The next load reports `NotFound`.
    pub fn erase(&mut self) -> Result<(), SettingsError> {
        self.storage
            .delete(SETTINGS_NAMESPACE, SETTINGS_KEY)
            .map_err(SettingsError::from)
    }
}

/// Encode a record with its version header. Returns the used length.
pub fn encode(settings: &ControllerSettings, buf: &mut [u8; MAX_RECORD_SIZE]) -> Result<usize, SettingsError> {
    buf[0] = SETTINGS_VERSION;
    let used = postcard::to_slice(settings, &mut buf[1..])
        .map_err(|_| SettingsError::Encode)?
        .len();
    Ok(used + 1)
}

/// Decode a versioned blob and range-check the result.
pub fn decode(blob: &[u8]) -> Result<ControllerSettings, SettingsError> {
    let (&version, body) = blob.split_first().ok_or(SettingsError::Corrupted)?;
    if version != SETTINGS_VERSION {
        warn!("settings layout v{} != v{}", version, SETTINGS_VERSION);
        return Err(SettingsError::Corrupted);
    }
    let settings: ControllerSettings =
        postcard::from_bytes(body).map_err(|_| SettingsError::Corrupted)?;
    config::validate(&settings).map_err(SettingsError::ValidationFailed)?;
    Ok(settings)
}

impl<S: StoragePort> SettingsPort for SettingsStore<S> {
    fn load(&self) -> Result<ControllerSettings, SettingsError> {
        let mut buf = [0u8; MAX_RECORD_SIZE];
        let len = self.storage.read(SETTINGS_NAMESPACE, SETTINGS_KEY, &mut buf)?;
        let settings = decode(&buf[..len])?;
        info!("SettingsStore: loaded {} bytes", len);
        Ok(settings)
    }

    fn save(&mut self, settings: &ControllerSettings) -> Result<(), SettingsError> {
        config::validate(settings).map_err(SettingsError::ValidationFailed)?;

        let mut buf = [0u8; MAX_RECORD_SIZE];
        let len = encode(settings, &mut buf)?;

        let mut current = [0u8; MAX_RECORD_SIZE];
        match self
            .storage
            .read(SETTINGS_NAMESPACE, SETTINGS_KEY, &mut current)
        {
            Ok(n) if current[..n] == buf[..len] => {
                debug!("SettingsStore: unchanged, write skipped");
                return Ok(());
            }
            Ok(_) | Err(StorageError::NotFound) => {}
            Err(e) => warn!("SettingsStore: compare read failed: {}", e),
        }

        self.storage
            .write(SETTINGS_NAMESPACE, SETTINGS_KEY, &buf[..len])
            .map_err(SettingsError::Storage)?;
        info!("SettingsStore: saved {} bytes", len);
        Ok(())
    }
}
