//! Persistent controller settings record.
//!
//! One fixed-layout record holds everything the service menu can edit:
//! touch-strip calibration, the default touch-strip mode, the button
//! mapping table and the passthrough flag. It is loaded once at boot,
//! mutated field-by-field from the menu and saved after every mutation.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Number of physical button slots on the input shift registers.
pub const BUTTON_SLOTS: usize = 16;

/// Full-scale value of the touch-strip ADC channels (10-bit).
pub const ADC_FULL_SCALE: u16 = 1023;

// ---------------------------------------------------------------------------
// Calibration coefficients
// ---------------------------------------------------------------------------

/// Touch-strip calibration, in raw ADC units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalibrationCoefficients {
    /// Left-zone reading at full travel.
    pub left_span: u16,
    /// Right-zone reading at full travel.
    pub right_span: u16,
    /// Highest reading seen with nothing touching the strip.
    pub zero_level: u16,
}

impl Default for CalibrationCoefficients {
    fn default() -> Self {
        Self {
            left_span: 960,
            right_span: 960,
            zero_level: 48,
        }
    }
}

// ---------------------------------------------------------------------------
// Touch-strip mode
// ---------------------------------------------------------------------------

/// How the touch strip is reported to the host console by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum PositionMode {
    Touchpad = 0,
    Dpad = 1,
    LeftRight = 2,
}

impl PositionMode {
    /// Pipe-delimited option labels, in discriminant order.
    pub const OPTIONS: &'static str = "Touchpad|D-Pad|L/R";

    pub fn from_index(idx: i32) -> Option<Self> {
        match idx {
            0 => Some(Self::Touchpad),
            1 => Some(Self::Dpad),
            2 => Some(Self::LeftRight),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Output buttons
// ---------------------------------------------------------------------------

/// Button identifiers a physical slot can be mapped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum OutputButton {
    Unassigned = 0,
    Up,
    Left,
    Down,
    Right,
    Square,
    Cross,
    Circle,
    Triangle,
    L1,
    R1,
    L2,
    R2,
    Share,
    Options,
    L3,
    R3,
    Ps,
    Touchpad,
}

impl OutputButton {
    /// Pipe-delimited short names, in discriminant order.
    pub const NAMES: &'static str = "NUL|U|L|D|R|SQR|XRO|CIR|TRI|L1|R1|L2|R2|SHR|OPT|L3|R3|PS|TP";

    pub const COUNT: usize = 19;

    const ALL: [Self; Self::COUNT] = [
        Self::Unassigned,
        Self::Up,
        Self::Left,
        Self::Down,
        Self::Right,
        Self::Square,
        Self::Cross,
        Self::Circle,
        Self::Triangle,
        Self::L1,
        Self::R1,
        Self::L2,
        Self::R2,
        Self::Share,
        Self::Options,
        Self::L3,
        Self::R3,
        Self::Ps,
        Self::Touchpad,
    ];

    pub fn from_index(idx: i32) -> Option<Self> {
        usize::try_from(idx).ok().and_then(|i| Self::ALL.get(i).copied())
    }

    /// Short name as shown on the display.
    pub fn name(self) -> &'static str {
        Self::NAMES.split('|').nth(self as usize).unwrap_or("?")
    }
}

impl fmt::Display for OutputButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Settings record
// ---------------------------------------------------------------------------

/// The persisted settings record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerSettings {
    /// Touch-strip calibration coefficients.
    pub calibration: CalibrationCoefficients,
    /// Mode the touch strip starts in.
    pub default_position_mode: PositionMode,
    /// Physical slot index → output button.
    pub button_mapping: [OutputButton; BUTTON_SLOTS],
    /// Forward the attached controller's reports unmodified.
    pub passthrough: bool,
}

impl Default for ControllerSettings {
    /// Factory defaults: slots 0–15 map to `Up`..`R3` in order.
    fn default() -> Self {
        let mut button_mapping = [OutputButton::Unassigned; BUTTON_SLOTS];
        for (slot, entry) in button_mapping.iter_mut().enumerate() {
            *entry = OutputButton::from_index(slot as i32 + 1).unwrap_or(OutputButton::Unassigned);
        }
        Self {
            calibration: CalibrationCoefficients::default(),
            default_position_mode: PositionMode::Touchpad,
            button_mapping,
            passthrough: false,
        }
    }
}

/// Range-check a record before it is persisted or after it is loaded.
pub fn validate(settings: &ControllerSettings) -> Result<(), &'static str> {
    let c = &settings.calibration;
    if c.left_span > ADC_FULL_SCALE || c.right_span > ADC_FULL_SCALE {
        return Err("calibration span must be 0–1023");
    }
    if c.zero_level > ADC_FULL_SCALE {
        return Err("calibration zero_level must be 0–1023");
    }
    Ok(())
}
