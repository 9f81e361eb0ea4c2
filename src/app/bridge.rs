//! Settings field bridge: menu field ids ↔ the persistent settings record.
//!
//! Every committed value is written into the record and the whole record
//! is saved immediately. The mapping-slot cursor is the one exception: it
//! only selects which slot the `Button` field edits and is never saved.

use log::{info, warn};

use crate::config::{ControllerSettings, OutputButton, PositionMode, ADC_FULL_SCALE, BUTTON_SLOTS};
use crate::menu::{FieldAccess, FieldId, MenuHost};

use super::commands::AppCommand;
use super::events::AppEvent;
use super::ports::{Board, EventSink, RestartKind, SettingsPort};

/// Mask applied to the slot cursor (16 slots).
const SLOT_MASK: i32 = 0x0f;

pub struct SettingsBridge<'a, B: Board + ?Sized> {
    settings: &'a mut ControllerSettings,
    cursor: &'a mut u8,
    board: &'a mut B,
    sink: &'a mut dyn EventSink,
    command: Option<AppCommand>,
}

impl<'a, B: Board + ?Sized> SettingsBridge<'a, B> {
    pub fn new(
        settings: &'a mut ControllerSettings,
        cursor: &'a mut u8,
        board: &'a mut B,
        sink: &'a mut dyn EventSink,
    ) -> Self {
        Self {
            settings,
            cursor,
            board,
            sink,
            command: None,
        }
    }

    /// The command recorded by the last run action, if any.
    pub fn take_command(&mut self) -> Option<AppCommand> {
        self.command.take()
    }

    fn slot(&self) -> usize {
        usize::from(*self.cursor) % BUTTON_SLOTS
    }

    fn persist(&mut self, id: FieldId) {
        persist(self.settings, &mut *self.board, &mut *self.sink, Some(id));
    }
}

impl<B: Board + ?Sized> MenuHost for SettingsBridge<'_, B> {
    fn value(&mut self, id: FieldId, access: FieldAccess) -> Option<i32> {
        match (id, access) {
            (FieldId::TouchMode, FieldAccess::Get) => {
                Some(self.settings.default_position_mode as i32)
            }
            (FieldId::TouchMode, FieldAccess::Set(v)) => {
                self.settings.default_position_mode = PositionMode::from_index(v)?;
                self.persist(id);
                Some(v)
            }

            (FieldId::TouchZero, FieldAccess::Get) => {
                Some(i32::from(self.settings.calibration.zero_level))
            }
            (FieldId::TouchZero, FieldAccess::Set(v)) => {
                let level = u16::try_from(v).ok().filter(|l| *l <= ADC_FULL_SCALE)?;
                self.settings.calibration.zero_level = level;
                self.board.set_calibration(&self.settings.calibration);
                self.persist(id);
                Some(v)
            }

            (FieldId::Passthrough, FieldAccess::Get) => Some(i32::from(self.settings.passthrough)),
            (FieldId::Passthrough, FieldAccess::Set(v)) => {
                self.settings.passthrough = v != 0;
                self.persist(id);
                Some(i32::from(self.settings.passthrough))
            }

            (FieldId::MapSlot, FieldAccess::Get) => Some(i32::from(*self.cursor)),
            (FieldId::MapSlot, FieldAccess::Set(v)) => {
                *self.cursor = (v & SLOT_MASK) as u8;
                Some(i32::from(*self.cursor))
            }

            (FieldId::MapButton, FieldAccess::Get) => {
                Some(self.settings.button_mapping[self.slot()] as i32)
            }
            (FieldId::MapButton, FieldAccess::Set(v)) => {
                let slot = self.slot();
                self.settings.button_mapping[slot] = OutputButton::from_index(v)?;
                self.persist(id);
                Some(v)
            }

            _ => {
                warn!("field {} has no value", id.raw());
                None
            }
        }
    }

    fn run(&mut self, id: FieldId) -> bool {
        let command = match id {
            FieldId::ButtonTest => AppCommand::EnterButtonTest,
            FieldId::TouchTest => AppCommand::EnterPositionTest,
            FieldId::TouchCalibration => AppCommand::EnterCalibration,
            FieldId::ClearSettings => AppCommand::FactoryReset,
            FieldId::RestartMain => AppCommand::Restart(RestartKind::Main),
            FieldId::RestartBootloader => AppCommand::Restart(RestartKind::Bootloader),
            _ => {
                warn!("field {} is not runnable", id.raw());
                return false;
            }
        };
        self.command = Some(command);
        true
    }
}

/// Save the whole record, logging and emitting the outcome.
///
/// A failed save leaves the in-memory record as it is.
pub fn persist<B: Board + ?Sized>(
    settings: &ControllerSettings,
    board: &mut B,
    sink: &mut dyn EventSink,
    field: Option<FieldId>,
) -> bool {
    match SettingsPort::save(board, settings) {
        Ok(()) => {
            if let Some(id) = field {
                info!("settings saved (field {})", id.raw());
                sink.emit(&AppEvent::SettingsSaved(id));
            }
            true
        }
        Err(e) => {
            warn!("settings save failed: {}", e);
            sink.emit(&AppEvent::SettingsSaveFailed(e));
            false
        }
    }
}

/// Reset the record to factory defaults, push the default calibration to
/// the sensor and persist. The mapping-slot cursor is not part of the
/// record and keeps its position.
pub fn factory_reset<B: Board + ?Sized>(
    settings: &mut ControllerSettings,
    board: &mut B,
    sink: &mut dyn EventSink,
) {
    *settings = ControllerSettings::default();
    board.set_calibration(&settings.calibration);
    if persist(settings, board, sink, None) {
        info!("settings reset to factory defaults");
        sink.emit(&AppEvent::FactoryReset);
    }
}
