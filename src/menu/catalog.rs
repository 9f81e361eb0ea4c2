//! Static menu catalog.
//!
//! Identifiers are stable: they key the settings bridge and appear in logs.
//! Menus use 10-12, items 10-21 and 31-32.

use crate::config::{OutputButton, PositionMode};

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MenuId {
    Service = 10,
    Restart = 11,
    ButtonMap = 12,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FieldId {
    ButtonTest = 10,
    TouchTest = 11,
    TouchCalibration = 12,
    TouchMode = 13,
    ButtonMapMenu = 14,
    TouchZero = 15,
    Passthrough = 16,
    ClearSettings = 18,
    RestartMenu = 19,
    RestartMain = 20,
    RestartBootloader = 21,
    MapSlot = 31,
    MapButton = 32,
}

impl FieldId {
    pub fn from_raw(raw: u8) -> Option<Self> {
        FIELDS.iter().map(|f| f.id).find(|id| *id as u8 == raw)
    }

    pub fn raw(self) -> u8 {
        self as u8
    }
}

// ---------------------------------------------------------------------------
// Descriptors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Selecting shows the prompt; a second select runs the action.
    Run { prompt: &'static str },
    /// Selecting opens another menu.
    Submenu(MenuId),
    /// Integer edited in steps, clamped to the inclusive range.
    Int { min: i32, max: i32 },
    /// Yes/no toggle, stored as 0/1.
    Bool,
    /// One of the pipe-delimited options, stored as the option index.
    List(&'static str),
}

impl FieldKind {
    /// Whether the field carries a value the host can get and set.
    pub fn has_value(self) -> bool {
        matches!(self, Self::Int { .. } | Self::Bool | Self::List(_))
    }

    /// Confirmation prompt of a run field.
    pub fn prompt(self) -> Option<&'static str> {
        match self {
            Self::Run { prompt } => Some(prompt),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    pub id: FieldId,
    pub label: &'static str,
    pub kind: FieldKind,
}

#[derive(Debug, Clone, Copy)]
pub struct MenuDescriptor {
    pub id: MenuId,
    pub title: &'static str,
    pub items: &'static [FieldId],
}

pub const ROOT_MENU: MenuId = MenuId::Service;

const PRESS_SEL: &str = "Press SEL";

pub static MENUS: [MenuDescriptor; 3] = [
    MenuDescriptor {
        id: MenuId::Service,
        title: "Service Menu",
        items: &[
            FieldId::ButtonTest,
            FieldId::TouchTest,
            FieldId::TouchCalibration,
            FieldId::TouchMode,
            FieldId::ButtonMapMenu,
            FieldId::TouchZero,
            FieldId::Passthrough,
            FieldId::ClearSettings,
            FieldId::RestartMenu,
        ],
    },
    MenuDescriptor {
        id: MenuId::Restart,
        title: "Restart",
        items: &[FieldId::RestartMain, FieldId::RestartBootloader],
    },
    MenuDescriptor {
        id: MenuId::ButtonMap,
        title: "Button Map",
        items: &[FieldId::MapSlot, FieldId::MapButton],
    },
];

pub static FIELDS: [FieldDescriptor; 13] = [
    FieldDescriptor {
        id: FieldId::ButtonTest,
        label: "Button Test",
        kind: FieldKind::Run { prompt: PRESS_SEL },
    },
    FieldDescriptor {
        id: FieldId::TouchTest,
        label: "Touch Test",
        kind: FieldKind::Run { prompt: PRESS_SEL },
    },
    FieldDescriptor {
        id: FieldId::TouchCalibration,
        label: "Touch Calib.",
        kind: FieldKind::Run { prompt: PRESS_SEL },
    },
    FieldDescriptor {
        id: FieldId::TouchMode,
        label: "Touch Mode",
        kind: FieldKind::List(PositionMode::OPTIONS),
    },
    FieldDescriptor {
        id: FieldId::ButtonMapMenu,
        label: "Button Map...",
        kind: FieldKind::Submenu(MenuId::ButtonMap),
    },
    FieldDescriptor {
        id: FieldId::TouchZero,
        label: "Touch Zero",
        kind: FieldKind::Int { min: 0, max: 1023 },
    },
    FieldDescriptor { id: FieldId::Passthrough, label: "Passthrough", kind: FieldKind::Bool },
    FieldDescriptor {
        id: FieldId::ClearSettings,
        label: "Clear Settings",
        kind: FieldKind::Run { prompt: "Clear settings?" },
    },
    FieldDescriptor {
        id: FieldId::RestartMenu,
        label: "Restart...",
        kind: FieldKind::Submenu(MenuId::Restart),
    },
    FieldDescriptor {
        id: FieldId::RestartMain,
        label: "Main System",
        kind: FieldKind::Run { prompt: "Restart?" },
    },
    FieldDescriptor {
        id: FieldId::RestartBootloader,
        label: "Bootloader",
        kind: FieldKind::Run { prompt: "Reboot to BL?" },
    },
    FieldDescriptor {
        id: FieldId::MapSlot,
        label: "Slot",
        kind: FieldKind::Int { min: 0, max: 15 },
    },
    FieldDescriptor {
        id: FieldId::MapButton,
        label: "Button",
        kind: FieldKind::List(OutputButton::NAMES),
    },
];

pub fn menu(id: MenuId) -> &'static MenuDescriptor {
    match id {
        MenuId::Service => &MENUS[0],
        MenuId::Restart => &MENUS[1],
        MenuId::ButtonMap => &MENUS[2],
    }
}

pub fn field(id: FieldId) -> &'static FieldDescriptor {
    // Every FieldId variant has exactly one descriptor (checked in tests).
    FIELDS.iter().find(|f| f.id == id).unwrap_or(&FIELDS[0])
}

/// Number of options in a pipe-delimited list.
pub fn option_count(options: &str) -> usize {
    options.split('|').count()
}

/// Option label at `index`, if in range.
pub fn option_label(options: &'static str, index: i32) -> Option<&'static str> {
    usize::try_from(index).ok().and_then(|i| options.split('|').nth(i))
}
