//! GPIO / peripheral pin assignments for the controller adapter board.
//!
//! Every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Rotary encoder (quadrature + integrated push switch)
// ---------------------------------------------------------------------------

/// Encoder channel A, pulled up.
pub const QEI_A_GPIO: i32 = 4;
/// Encoder channel B, pulled up.
pub const QEI_B_GPIO: i32 = 5;
/// Push switch, active-low with pull-up.
pub const QEI_SW_GPIO: i32 = 6;

// ---------------------------------------------------------------------------
// 16x2 character LCD (HD44780, 4-bit bus, write-only)
// ---------------------------------------------------------------------------

pub const LCD_RS_GPIO: i32 = 38;
pub const LCD_EN_GPIO: i32 = 39;
pub const LCD_D4_GPIO: i32 = 40;
pub const LCD_D5_GPIO: i32 = 41;
pub const LCD_D6_GPIO: i32 = 42;
pub const LCD_D7_GPIO: i32 = 47;

// ---------------------------------------------------------------------------
// Shift registers on SPI2
// ---------------------------------------------------------------------------

pub const SPI_SCLK_GPIO: i32 = 12;
pub const SPI_MOSI_GPIO: i32 = 11;
pub const SPI_MISO_GPIO: i32 = 13;

/// Latch of the two cascaded parallel-in registers (button inputs).
pub const BTN_CS_IN_GPIO: i32 = 10;
/// Latch of the serial-in output register.
pub const BTN_CS_OUT_GPIO: i32 = 9;

/// Shift-register clock.
pub const SPI_BAUD_HZ: u32 = 1_000_000;

// ---------------------------------------------------------------------------
// Touch strip (ADC1)
// ---------------------------------------------------------------------------

/// Left end of the strip, ADC1 channel 0 (GPIO 1 on ESP32-S3).
pub const TOUCH_LEFT_ADC_CHANNEL: u32 = 0;
/// Right end of the strip, ADC1 channel 1 (GPIO 2 on ESP32-S3).
pub const TOUCH_RIGHT_ADC_CHANNEL: u32 = 1;
