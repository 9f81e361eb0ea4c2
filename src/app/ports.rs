//! Port traits: the hexagonal boundary between the service-menu core and
//! the board.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ServiceMenu (domain)
//! ```
//!
//! Driven adapters (display, rotary encoder, switch, touch strip, button
//! matrix, settings storage, restart) implement these traits. The
//! [`ServiceMenu`](super::service::ServiceMenu) consumes them through the
//! [`Board`] bundle, so the domain core never touches hardware directly.

use crate::config::{CalibrationCoefficients, ControllerSettings};

/// Width of the character display in columns.
pub const DISPLAY_COLS: usize = 16;

/// Number of display rows.
pub const DISPLAY_ROWS: u8 = 2;

const BLANK_ROW: &str = "                ";

// ───────────────────────────────────────────────────────────────
// Inputs
// ───────────────────────────────────────────────────────────────

/// Raw level of the encoder's integrated push switch (active-low).
pub trait SwitchPort {
    fn switch_is_low(&mut self) -> bool;
}

/// Resettable relative position counter of the rotary encoder.
pub trait RotaryPort {
    /// Raw quadrature counts accumulated since the last reset.
    fn rotary_count(&self) -> i32;

    /// Overwrite the accumulator (normally with 0).
    fn set_rotary_count(&mut self, count: i32);
}

// ───────────────────────────────────────────────────────────────
// Display
// ───────────────────────────────────────────────────────────────

/// Two-line, 16-column character display.
pub trait CharDisplay {
    fn init(&mut self);

    fn clear(&mut self);

    fn set_cursor(&mut self, col: u8, row: u8);

    fn print(&mut self, text: &str);

    /// Blank `row`, then print `text` from column 0 so no stale
    /// characters from a longer previous line remain.
    fn write_line(&mut self, row: u8, text: &str) {
        self.set_cursor(0, row);
        self.print(BLANK_ROW);
        self.set_cursor(0, row);
        self.print(text);
    }
}

// ───────────────────────────────────────────────────────────────
// Touch strip (dual-zone position sensor)
// ───────────────────────────────────────────────────────────────

/// Latest processed touch-strip values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PositionReading {
    /// Left-zone position, `None` when the zone is untouched.
    pub pos1: Option<u16>,
    /// Right-zone position, `None` when the zone is untouched.
    pub pos2: Option<u16>,
    /// Smoothed left-channel ADC value.
    pub left_adc: u16,
    /// Smoothed right-channel ADC value.
    pub right_adc: u16,
}

pub trait PositionSensorPort {
    /// Advance the per-channel smoothing filters by one sample.
    /// Called once per control-loop iteration.
    fn update_filters(&mut self);

    /// Recompute positions from the current filtered values.
    fn refresh(&mut self);

    fn reading(&self) -> PositionReading;

    /// Coefficients currently in use (including any in-progress
    /// auto-calibration results).
    fn calibration(&self) -> CalibrationCoefficients;

    fn set_calibration(&mut self, coefficients: &CalibrationCoefficients);

    /// Sample the left zone at full travel. `false` if the sample is unusable.
    fn calibrate_left(&mut self) -> bool;

    /// Sample the right zone at full travel. `false` if the sample is unusable.
    fn calibrate_right(&mut self) -> bool;

    /// Sample the untouched strip. `first_sample` restarts the zero-level
    /// accumulation.
    fn calibrate_zero(&mut self, first_sample: bool) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Button matrix
// ───────────────────────────────────────────────────────────────

pub trait ButtonMatrixPort {
    /// Scan the input shift registers. Active-low: bit = 0 means pressed.
    fn scan_buttons(&mut self) -> u16;

    /// Drive every output-latch bit low (done once at start-up).
    fn clear_output_latch(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Settings persistence
// ───────────────────────────────────────────────────────────────

/// Loads and persists the settings record.
///
/// `save` is synchronous: the record is durable when it returns `Ok`.
/// Saving identical content repeatedly must be harmless.
pub trait SettingsPort {
    /// Load the stored record. [`SettingsError::NotFound`] on first boot.
    fn load(&self) -> Result<ControllerSettings, SettingsError>;

    /// Validate and persist the record.
    fn save(&mut self, settings: &ControllerSettings) -> Result<(), SettingsError>;
}

/// Persistent key-value storage (NVS on the device, a map on the host).
pub trait StoragePort {
    /// Read a value.  Returns the number of bytes written to `buf`.
    fn read(&self, namespace: &str, key: &str, buf: &mut [u8]) -> Result<usize, StorageError>;

    /// Write a value atomically.
    fn write(&mut self, namespace: &str, key: &str, data: &[u8]) -> Result<(), StorageError>;

    /// Delete a key.  Returns `Ok(())` even if the key didn't exist.
    fn delete(&mut self, namespace: &str, key: &str) -> Result<(), StorageError>;

    fn exists(&self, namespace: &str, key: &str) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Restart
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestartKind {
    /// Reset the main system.
    Main,
    /// Reset into the ROM bootloader (firmware download mode).
    Bootloader,
}

/// Platform restart capability.
///
/// Device implementations issue the reset and halt; they never return.
/// Host implementations log the request and return.
pub trait RestartPort {
    fn restart(&mut self, kind: RestartKind);
}

// ───────────────────────────────────────────────────────────────
// Event sink
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Board bundle
// ───────────────────────────────────────────────────────────────

/// Everything the service menu drives, as one object.
///
/// Blanket-implemented for any type that provides all the ports, so the
/// device adapter and the test mocks opt in just by implementing them.
pub trait Board:
    SwitchPort
    + RotaryPort
    + CharDisplay
    + PositionSensorPort
    + ButtonMatrixPort
    + SettingsPort
    + RestartPort
{
}

impl<T> Board for T where
    T: SwitchPort
        + RotaryPort
        + CharDisplay
        + PositionSensorPort
        + ButtonMatrixPort
        + SettingsPort
        + RestartPort
        + ?Sized
{
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`SettingsPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsError {
    /// No record in storage (first boot).
    NotFound,
    /// Stored record failed its layout or decode check.
    Corrupted,
    /// A field failed range validation.
    ValidationFailed(&'static str),
    /// The record could not be encoded.
    Encode,
    /// Underlying storage failed.
    Storage(StorageError),
}

/// Errors from [`StoragePort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    NotFound,
    Full,
    IoError,
}

impl From<StorageError> for SettingsError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound => Self::NotFound,
            other => Self::Storage(other),
        }
    }
}

impl core::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "settings not found"),
            Self::Corrupted => write!(f, "settings corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::Encode => write!(f, "encode failed"),
            Self::Storage(e) => write!(f, "storage: {}", e),
        }
    }
}

impl core::fmt::Display for StorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "key not found"),
            Self::Full => write!(f, "storage full"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}
