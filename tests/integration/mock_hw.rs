//! Mock board for integration tests.
//!
//! Implements every port of [`Board`] with scriptable inputs and a
//! simulated 16x2 display, and persists settings through the real
//! [`SettingsStore`] over an in-memory [`StoragePort`], so tests exercise
//! the same encode/validate/save path the device uses.

use std::collections::{HashMap, VecDeque};

use svcmenu::adapters::settings_store::SettingsStore;
use svcmenu::app::commands::AppCommand;
use svcmenu::app::events::AppEvent;
use svcmenu::app::ports::{
    ButtonMatrixPort, CharDisplay, EventSink, PositionReading, PositionSensorPort, RestartKind,
    RestartPort, RotaryPort, SettingsError, SettingsPort, StorageError, StoragePort, SwitchPort,
};
use svcmenu::app::service::ServiceMenu;
use svcmenu::config::{CalibrationCoefficients, ControllerSettings};

// ── MockNvs ───────────────────────────────────────────────────

#[derive(Default)]
pub struct MockNvs {
    store: HashMap<String, Vec<u8>>,
    pub writes: usize,
}

impl StoragePort for MockNvs {
    fn read(&self, namespace: &str, key: &str, buf: &mut [u8]) -> Result<usize, StorageError> {
        let v = self
            .store
            .get(&format!("{}::{}", namespace, key))
            .ok_or(StorageError::NotFound)?;
        let n = v.len().min(buf.len());
        buf[..n].copy_from_slice(&v[..n]);
        Ok(n)
    }

    fn write(&mut self, namespace: &str, key: &str, data: &[u8]) -> Result<(), StorageError> {
        self.writes += 1;
        self.store.insert(format!("{}::{}", namespace, key), data.to_vec());
        Ok(())
    }

    fn delete(&mut self, namespace: &str, key: &str) -> Result<(), StorageError> {
        self.store.remove(&format!("{}::{}", namespace, key));
        Ok(())
    }

    fn exists(&self, namespace: &str, key: &str) -> bool {
        self.store.contains_key(&format!("{}::{}", namespace, key))
    }
}

// ── MockBoard ─────────────────────────────────────────────────

/// Coefficients the mock sensor reports for a successful sample.
pub const SAMPLED: CalibrationCoefficients = CalibrationCoefficients {
    left_span: 911,
    right_span: 877,
    zero_level: 66,
};

pub struct MockBoard {
    pub switch_low: bool,
    pub rotary: i32,
    pub rows: [String; 2],
    cursor: (u8, u8),
    pub clears: usize,
    pub buttons: u16,
    pub scans: usize,
    pub reading: PositionReading,
    pub coefficients: CalibrationCoefficients,
    /// Outcome of the next auto-calibration samples; empty means success.
    pub sample_results: VecDeque<bool>,
    /// `first_sample` flag of every zero-calibration call.
    pub zero_calls: Vec<bool>,
    pub store: SettingsStore<MockNvs>,
    pub latch_cleared: bool,
    pub restarts: Vec<RestartKind>,
}

impl MockBoard {
    pub fn new() -> Self {
        Self {
            switch_low: false,
            rotary: 0,
            rows: Default::default(),
            cursor: (0, 0),
            clears: 0,
            buttons: 0xFFFF,
            scans: 0,
            reading: PositionReading::default(),
            coefficients: CalibrationCoefficients::default(),
            sample_results: VecDeque::new(),
            zero_calls: Vec::new(),
            store: SettingsStore::new(MockNvs::default()),
            latch_cleared: false,
            restarts: Vec::new(),
        }
    }

    pub fn row(&self, row: usize) -> &str {
        self.rows[row].as_str()
    }

    fn next_sample(&mut self) -> bool {
        self.sample_results.pop_front().unwrap_or(true)
    }
}

impl SwitchPort for MockBoard {
    fn switch_is_low(&mut self) -> bool {
        self.switch_low
    }
}

impl RotaryPort for MockBoard {
    fn rotary_count(&self) -> i32 {
        self.rotary
    }

    fn set_rotary_count(&mut self, count: i32) {
        self.rotary = count;
    }
}

impl CharDisplay for MockBoard {
    fn init(&mut self) {
        self.clear();
    }

    fn clear(&mut self) {
        self.clears += 1;
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

impl PositionSensorPort for MockBoard {
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
        let ok = self.next_sample();
        if ok {
            self.coefficients.left_span = SAMPLED.left_span;
        }
        ok
    }

    fn calibrate_right(&mut self) -> bool {
        let ok = self.next_sample();
        if ok {
            self.coefficients.right_span = SAMPLED.right_span;
        }
        ok
    }

    fn calibrate_zero(&mut self, first_sample: bool) -> bool {
        self.zero_calls.push(first_sample);
        let ok = self.next_sample();
        if ok {
            self.coefficients.zero_level = SAMPLED.zero_level;
        }
        ok
    }
}

impl ButtonMatrixPort for MockBoard {
    fn scan_buttons(&mut self) -> u16 {
        self.scans += 1;
        self.buttons
    }

    fn clear_output_latch(&mut self) {
        self.latch_cleared = true;
    }
}

impl SettingsPort for MockBoard {
    fn load(&self) -> Result<ControllerSettings, SettingsError> {
        self.store.load()
    }

    fn save(&mut self, settings: &ControllerSettings) -> Result<(), SettingsError> {
        self.store.save(settings)
    }
}

impl RestartPort for MockBoard {
    fn restart(&mut self, kind: RestartKind) {
        self.restarts.push(kind);
    }
}

// ── Event sink ────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Rig ───────────────────────────────────────────────────────

/// Control-loop period used by the rig.
pub const TICK_MS: u32 = 10;

/// A started service menu plus its board, driven tick by tick.
pub struct Rig {
    pub svc: ServiceMenu,
    pub hw: MockBoard,
    pub sink: RecordingSink,
    pub now: u32,
}

#[allow(dead_code)]
impl Rig {
    /// Start with factory defaults and run one idle tick (clears the
    /// start-up block and draws the root menu).
    pub fn new() -> Self {
        Self::with_board(MockBoard::new())
    }

    pub fn with_board(mut hw: MockBoard) -> Self {
        let settings = ServiceMenu::load_settings(&hw);
        let mut svc = ServiceMenu::new(settings);
        let mut sink = RecordingSink::default();
        svc.start(&mut hw, &mut sink);
        let mut rig = Self {
            svc,
            hw,
            sink,
            now: 1_000,
        };
        rig.tick();
        rig
    }

    pub fn tick(&mut self) {
        self.now = self.now.wrapping_add(TICK_MS);
        self.svc.tick(self.now, &mut self.hw, &mut self.sink);
    }

    pub fn idle(&mut self, ticks: usize) {
        for _ in 0..ticks {
            self.tick();
        }
    }

    /// Hold the switch low for `hold_ms`, then release. The release tick
    /// is where the press becomes ready and is handled.
    pub fn hold_for(&mut self, hold_ms: u32) {
        self.hw.switch_low = true;
        for _ in 0..=hold_ms / TICK_MS {
            self.tick();
        }
        self.hw.switch_low = false;
        self.tick();
    }

    pub fn short_press(&mut self) {
        self.hold_for(50);
    }

    pub fn long_press(&mut self) {
        self.hold_for(600);
    }

    /// Select the highlighted action item and confirm its prompt.
    pub fn run_item(&mut self) {
        self.short_press();
        self.short_press();
    }

    /// Rotate by whole detents (negative = counter-clockwise).
    pub fn turn(&mut self, detents: i32) {
        self.hw.rotary += detents * 4;
        self.tick();
    }

    pub fn handle(&mut self, command: AppCommand) {
        self.svc.handle_command(command, &mut self.hw, &mut self.sink);
    }

    pub fn screen(&self) -> (&str, &str) {
        (self.hw.row(0), self.hw.row(1))
    }
}
