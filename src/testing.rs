//! In-crate test doubles for unit tests.

use crate::app::events::AppEvent;
use crate::app::ports::{
    ButtonMatrixPort, CharDisplay, EventSink, PositionReading, PositionSensorPort, RestartKind,
    RestartPort, RotaryPort, SettingsError, SettingsPort, StorageError, SwitchPort,
};
use crate::config::{CalibrationCoefficients, ControllerSettings};

/// Board with settable inputs and a simulated 16x2 display.
#[derive(Default)]
pub struct NullBoard {
    pub switch_low: bool,
    pub rotary: i32,
    pub rows: [String; 2],
    pub cursor: (u8, u8),
    pub buttons: u16,
    pub reading: PositionReading,
    pub coefficients: CalibrationCoefficients,
    pub sample_ok: bool,
    pub stored: Option<ControllerSettings>,
    pub saves: usize,
    /// Make every save fail with a full store.
    pub fail_saves: bool,
    pub restarts: Vec<RestartKind>,
}

impl SwitchPort for NullBoard {
    fn switch_is_low(&mut self) -> bool {
        self.switch_low
    }
}

impl RotaryPort for NullBoard {
    fn rotary_count(&self) -> i32 {
        self.rotary
    }
    fn set_rotary_count(&mut self, count: i32) {
        self.rotary = count;
    }
}

impl CharDisplay for NullBoard {
    fn init(&mut self) {
        self.clear();
    }
    fn clear(&mut self) {
        self.rows = Default::default();
        self.cursor = (0, 0);
    }
    fn set_cursor(&mut self, col: u8, row: u8) {
        self.cursor = (col, row);
    }
    fn print(&mut self, text: &str) {
        let (col, row) = self.cursor;
        let line = &mut self.rows[usize::from(row % 2)];
        let mut chars: Vec<char> = format!("{line:<16}").chars().collect();
        for (i, ch) in text.chars().enumerate() {
            if let Some(slot) = chars.get_mut(usize::from(col) + i) {
                *slot = ch;
            }
        }
        *line = chars.into_iter().collect::<String>().trim_end().to_string();
        self.cursor.0 = col.saturating_add(text.len() as u8);
    }
}

impl PositionSensorPort for NullBoard {
    fn update_filters(&mut self) {}
    fn refresh(&mut self) {}
    fn reading(&self) -> PositionReading {
        self.reading
    }
    fn calibration(&self) -> CalibrationCoefficients {
        self.coefficients
    }
    fn set_calibration(&mut self, coefficients: &CalibrationCoefficients) {
        self.coefficients = *coefficients;
    }
    fn calibrate_left(&mut self) -> bool {
        self.sample_ok
    }
    fn calibrate_right(&mut self) -> bool {
        self.sample_ok
    }
    fn calibrate_zero(&mut self, _first_sample: bool) -> bool {
        self.sample_ok
    }
}

impl ButtonMatrixPort for NullBoard {
    fn scan_buttons(&mut self) -> u16 {
        self.buttons
    }
    fn clear_output_latch(&mut self) {}
}

impl SettingsPort for NullBoard {
    fn load(&self) -> Result<ControllerSettings, SettingsError> {
        self.stored.clone().ok_or(SettingsError::NotFound)
    }
    fn save(&mut self, settings: &ControllerSettings) -> Result<(), SettingsError> {
        if self.fail_saves {
            return Err(SettingsError::Storage(StorageError::Full));
        }
        self.saves += 1;
        self.stored = Some(settings.clone());
        Ok(())
    }
}

impl RestartPort for NullBoard {
    fn restart(&mut self, kind: RestartKind) {
        self.restarts.push(kind);
    }
}

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
