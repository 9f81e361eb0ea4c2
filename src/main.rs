//! Service-menu firmware main entry point.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter              LogEventSink     Esp32Time       │
//! │  (LCD, encoder, SPI matrix,   (EventSink)      (uptime)        │
//! │   touch strip, settings,                                       │
//! │   restart)                                                     │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │            ServiceMenu (pure logic)                    │    │
//! │  │  Mode FSM · Menu engine · Calibration · Diagnostics    │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::spi::{config::Config as SpiConfig, SpiDeviceDriver, SpiDriver, SpiDriverConfig};
use esp_idf_hal::units::Hertz;
use log::{error, info};

use svcmenu::adapters::hardware::HardwareAdapter;
use svcmenu::adapters::log_sink::LogEventSink;
use svcmenu::adapters::nvs::NvsAdapter;
use svcmenu::adapters::settings_store::SettingsStore;
use svcmenu::adapters::time::Esp32TimeAdapter;
use svcmenu::app::service::ServiceMenu;
use svcmenu::drivers::encoder::QuadratureDecoder;
use svcmenu::drivers::hw_init::{self, AdcChannel, BusyDelay, GpioInput, GpioOutput};
use svcmenu::drivers::lcd::{Hd44780, LcdBus};
use svcmenu::drivers::matrix::ShiftRegisterMatrix;
use svcmenu::drivers::restart::EspRestart;
use svcmenu::pins;
use svcmenu::sensors::TouchStrip;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("svcmenu v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Peripherals ────────────────────────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        error!("HAL init failed: {}, halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    // SPI2 pins must match pins::SPI_* and pins::BTN_CS_*.
    let peripherals = Peripherals::take()?;
    let spi = SpiDriver::new(
        peripherals.spi2,
        peripherals.pins.gpio12,
        peripherals.pins.gpio11,
        Some(peripherals.pins.gpio13),
        &SpiDriverConfig::new(),
    )?;
    let spi_cfg = SpiConfig::new().baudrate(Hertz(pins::SPI_BAUD_HZ));
    let buttons_in = SpiDeviceDriver::new(&spi, Some(peripherals.pins.gpio10), &spi_cfg)?;
    let latch_out = SpiDeviceDriver::new(&spi, Some(peripherals.pins.gpio9), &spi_cfg)?;

    // ── 3. Settings ───────────────────────────────────────────
    let nvs = NvsAdapter::new().map_err(|e| anyhow::anyhow!("NVS init failed: {}", e))?;
    let store = SettingsStore::new(nvs);
    let settings = ServiceMenu::load_settings(&store);

    // ── 4. Adapters ───────────────────────────────────────────
    let lcd = Hd44780::new(
        LcdBus {
            rs: GpioOutput(pins::LCD_RS_GPIO),
            en: GpioOutput(pins::LCD_EN_GPIO),
            data: [
                GpioOutput(pins::LCD_D4_GPIO),
                GpioOutput(pins::LCD_D5_GPIO),
                GpioOutput(pins::LCD_D6_GPIO),
                GpioOutput(pins::LCD_D7_GPIO),
            ],
        },
        BusyDelay,
    );
    let encoder = QuadratureDecoder::new(GpioInput(pins::QEI_A_GPIO), GpioInput(pins::QEI_B_GPIO));
    let strip = TouchStrip::new(
        AdcChannel(pins::TOUCH_LEFT_ADC_CHANNEL),
        AdcChannel(pins::TOUCH_RIGHT_ADC_CHANNEL),
        settings.calibration,
    );

    let mut hw = HardwareAdapter::new(
        lcd,
        encoder,
        GpioInput(pins::QEI_SW_GPIO),
        ShiftRegisterMatrix::new(buttons_in, latch_out),
        strip,
        store,
        EspRestart::new(),
    );
    let mut log_sink = LogEventSink::new();
    let time = Esp32TimeAdapter::new();

    // ── 5. Service menu ───────────────────────────────────────
    let mut svc = ServiceMenu::new(settings);
    svc.start(&mut hw, &mut log_sink);

    info!("System ready. Entering control loop.");

    loop {
        svc.tick(time.uptime_ms(), &mut hw, &mut log_sink);
        // Let the idle task run so its watchdog is fed.
        FreeRtos::delay_ms(1);
    }
}
