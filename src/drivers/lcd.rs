//! HD44780-compatible 16x2 character LCD on a write-only 4-bit bus.
//!
//! ## Init sequence
//!
//! Power-on reset needs >40 ms, then the controller is forced into 8-bit
//! mode three times before switching to 4-bit:
//!
//! | Step | Nibble | Wait     |
//! |------|--------|----------|
//! | 1    | 0x3    | 4.1 ms   |
//! | 2    | 0x3    | 100 µs   |
//! | 3    | 0x3    | 100 µs   |
//! | 4    | 0x2    | 100 µs   |
//!
//! followed by function set (2 lines, 5x8), display on / cursor off,
//! clear and entry mode (increment, no shift).

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::error::{Error, Result};

const CMD_CLEAR: u8 = 0x01;
const CMD_ENTRY_MODE: u8 = 0x06;
const CMD_DISPLAY_ON: u8 = 0x0C;
const CMD_FUNCTION_SET_4BIT_2LINE: u8 = 0x28;
const CMD_SET_DDRAM: u8 = 0x80;

/// DDRAM start address of each row.
const ROW_OFFSETS: [u8; 2] = [0x00, 0x40];

/// Control and data lines of the 4-bit bus.
pub struct LcdBus<P: OutputPin> {
    pub rs: P,
    pub en: P,
    /// D4..D7.
    pub data: [P; 4],
}

pub struct Hd44780<P: OutputPin, D: DelayNs> {
    bus: LcdBus<P>,
    delay: D,
}

impl<P: OutputPin, D: DelayNs> Hd44780<P, D> {
    pub fn new(bus: LcdBus<P>, delay: D) -> Self {
        Self { bus, delay }
    }

    /// Run the power-on init sequence and leave the display clear.
    pub fn init(&mut self) -> Result<()> {
        self.delay.delay_ms(50);
        self.set_rs(false)?;
        for wait_us in [4100, 100, 100] {
            self.write_nibble(0x3)?;
            self.delay.delay_us(wait_us);
        }
        self.write_nibble(0x2)?;
        self.delay.delay_us(100);

        self.command(CMD_FUNCTION_SET_4BIT_2LINE)?;
        self.command(CMD_DISPLAY_ON)?;
        self.clear()?;
        self.command(CMD_ENTRY_MODE)
    }

    pub fn clear(&mut self) -> Result<()> {
        self.command(CMD_CLEAR)?;
        self.delay.delay_us(2000);
        Ok(())
    }

    pub fn set_cursor(&mut self, col: u8, row: u8) -> Result<()> {
        let offset = ROW_OFFSETS[usize::from(row) % ROW_OFFSETS.len()];
        self.command(CMD_SET_DDRAM | (offset + col.min(0x27)))
    }

    /// Write ASCII text at the cursor. Non-ASCII characters print as `?`.
    pub fn print(&mut self, text: &str) -> Result<()> {
        for ch in text.chars() {
            let byte = if ch.is_ascii() { ch as u8 } else { b'?' };
            self.data(byte)?;
        }
        Ok(())
    }

    fn command(&mut self, cmd: u8) -> Result<()> {
        self.set_rs(false)?;
        self.write_byte(cmd)?;
        self.delay.delay_us(40);
        Ok(())
    }

    fn data(&mut self, byte: u8) -> Result<()> {
        self.set_rs(true)?;
        self.write_byte(byte)?;
        self.delay.delay_us(40);
        Ok(())
    }

    fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.write_nibble(byte >> 4)?;
        self.write_nibble(byte & 0x0F)
    }

    fn write_nibble(&mut self, nibble: u8) -> Result<()> {
        for (bit, pin) in self.bus.data.iter_mut().enumerate() {
            pin.set_state((nibble >> bit & 1 == 1).into())
                .map_err(|_| Error::Pin("lcd data"))?;
        }
        self.bus.en.set_high().map_err(|_| Error::Pin("lcd enable"))?;
        self.delay.delay_us(1);
        self.bus.en.set_low().map_err(|_| Error::Pin("lcd enable"))?;
        Ok(())
    }

    fn set_rs(&mut self, data: bool) -> Result<()> {
        self.bus
            .rs
            .set_state(data.into())
            .map_err(|_| Error::Pin("lcd rs"))
    }
}
