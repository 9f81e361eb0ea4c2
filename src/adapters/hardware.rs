//! Hardware adapter: bridges the real peripherals to the domain ports.
//!
//! Owns every driver on the adapter board and exposes them through the
//! port traits that make up [`Board`](crate::app::ports::Board). This is
//! the only module that touches actual hardware. Driver errors are
//! logged here and swallowed so a single flaky transfer cannot stall the
//! control loop; on non-espidf targets the underlying pin and ADC calls
//! are cfg-gated simulation stubs.

use embedded_hal::spi::SpiDevice;
use log::warn;

use crate::adapters::settings_store::SettingsStore;
use crate::app::ports::{
    ButtonMatrixPort, CharDisplay, PositionReading, PositionSensorPort, RestartKind, RestartPort,
    RotaryPort, SettingsError, SettingsPort, StoragePort, SwitchPort,
};
use crate::config::{CalibrationCoefficients, ControllerSettings};
use crate::drivers::encoder::QuadratureDecoder;
use crate::drivers::hw_init::{AdcChannel, BusyDelay, GpioInput, GpioOutput};
use crate::drivers::lcd::Hd44780;
use crate::drivers::matrix::ShiftRegisterMatrix;
use crate::drivers::restart::EspRestart;
use crate::error::Result;
use crate::sensors::TouchStrip;

/// Scan result used when the shift-register read fails: all released.
const SCAN_ALL_RELEASED: u16 = 0xFFFF;

/// Concrete adapter that combines all hardware behind the port traits.
pub struct HardwareAdapter<IN: SpiDevice, OUT: SpiDevice, S: StoragePort> {
    lcd: Hd44780<GpioOutput, BusyDelay>,
    encoder: QuadratureDecoder<GpioInput, GpioInput>,
    switch: GpioInput,
    matrix: ShiftRegisterMatrix<IN, OUT>,
    strip: TouchStrip<AdcChannel>,
    settings: SettingsStore<S>,
    restart: EspRestart,
}

impl<IN: SpiDevice, OUT: SpiDevice, S: StoragePort> HardwareAdapter<IN, OUT, S> {
    pub fn new(
        lcd: Hd44780<GpioOutput, BusyDelay>,
        encoder: QuadratureDecoder<GpioInput, GpioInput>,
        switch: GpioInput,
        matrix: ShiftRegisterMatrix<IN, OUT>,
        strip: TouchStrip<AdcChannel>,
        settings: SettingsStore<S>,
        restart: EspRestart,
    ) -> Self {
        Self {
            lcd,
            encoder,
            switch,
            matrix,
            strip,
            settings,
            restart,
        }
    }

    /// Sample the encoder channels. Called from every per-tick entry
    /// point so no Gray-code step is missed between reads.
    fn poll_encoder(&mut self) {
        self.encoder.poll();
    }
}

fn log_err(what: &str, res: Result<()>) {
    if let Err(e) = res {
        warn!("hw: {} failed: {}", what, e);
    }
}

// ── Inputs ────────────────────────────────────────────────────

impl<IN: SpiDevice, OUT: SpiDevice, S: StoragePort> SwitchPort for HardwareAdapter<IN, OUT, S> {
    fn switch_is_low(&mut self) -> bool {
        use embedded_hal::digital::InputPin;
        self.poll_encoder();
        // Infallible on this board; treat a failed read as released.
        self.switch.is_low().unwrap_or(false)
    }
}

impl<IN: SpiDevice, OUT: SpiDevice, S: StoragePort> RotaryPort for HardwareAdapter<IN, OUT, S> {
    fn rotary_count(&self) -> i32 {
        self.encoder.count()
    }

    fn set_rotary_count(&mut self, count: i32) {
        self.encoder.set_count(count);
    }
}

// ── Display ───────────────────────────────────────────────────

impl<IN: SpiDevice, OUT: SpiDevice, S: StoragePort> CharDisplay for HardwareAdapter<IN, OUT, S> {
    fn init(&mut self) {
        log_err("lcd init", self.lcd.init());
    }

    fn clear(&mut self) {
        log_err("lcd clear", self.lcd.clear());
    }

    fn set_cursor(&mut self, col: u8, row: u8) {
        log_err("lcd cursor", self.lcd.set_cursor(col, row));
    }

    fn print(&mut self, text: &str) {
        log_err("lcd print", self.lcd.print(text));
    }
}

// ── Touch strip ───────────────────────────────────────────────

impl<IN: SpiDevice, OUT: SpiDevice, S: StoragePort> PositionSensorPort
    for HardwareAdapter<IN, OUT, S>
{
    fn update_filters(&mut self) {
        self.poll_encoder();
        self.strip.update_filters();
    }

    fn refresh(&mut self) {
        self.strip.refresh();
    }

    fn reading(&self) -> PositionReading {
        self.strip.reading()
    }

    fn calibration(&self) -> CalibrationCoefficients {
        self.strip.calibration()
    }

    fn set_calibration(&mut self, coefficients: &CalibrationCoefficients) {
        self.strip.set_calibration(coefficients);
    }

    fn calibrate_left(&mut self) -> bool {
        self.strip.calibrate_left()
    }

    fn calibrate_right(&mut self) -> bool {
        self.strip.calibrate_right()
    }

    fn calibrate_zero(&mut self, first_sample: bool) -> bool {
        self.strip.calibrate_zero(first_sample)
    }
}

// ── Button matrix ─────────────────────────────────────────────

impl<IN: SpiDevice, OUT: SpiDevice, S: StoragePort> ButtonMatrixPort
    for HardwareAdapter<IN, OUT, S>
{
    fn scan_buttons(&mut self) -> u16 {
        self.matrix.scan().unwrap_or_else(|e| {
            warn!("hw: button scan failed: {}", e);
            SCAN_ALL_RELEASED
        })
    }

    fn clear_output_latch(&mut self) {
        log_err("output latch clear", self.matrix.clear_outputs());
    }
}

// ── Settings / restart ────────────────────────────────────────

impl<IN: SpiDevice, OUT: SpiDevice, S: StoragePort> SettingsPort for HardwareAdapter<IN, OUT, S> {
    fn load(&self) -> core::result::Result<ControllerSettings, SettingsError> {
        self.settings.load()
    }

    fn save(&mut self, settings: &ControllerSettings) -> core::result::Result<(), SettingsError> {
        self.settings.save(settings)
    }
}

impl<IN: SpiDevice, OUT: SpiDevice, S: StoragePort> RestartPort for HardwareAdapter<IN, OUT, S> {
    fn restart(&mut self, kind: RestartKind) {
        self.restart.restart(kind);
    }
}
