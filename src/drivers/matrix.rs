//! Button matrix scanner over the shift-register SPI bus.
//!
//! Two cascaded parallel-in registers hold the 16 button inputs; reading
//! two bytes clocks them out, first byte = bits 0–7. Inputs are
//! active-low (bit clear = pressed). A serial-in output register on its
//! own chip select is cleared once at start-up.

use embedded_hal::spi::SpiDevice;

use crate::error::{Error, Result};

pub struct ShiftRegisterMatrix<IN: SpiDevice, OUT: SpiDevice> {
    inputs: IN,
    outputs: OUT,
}

impl<IN: SpiDevice, OUT: SpiDevice> ShiftRegisterMatrix<IN, OUT> {
    pub fn new(inputs: IN, outputs: OUT) -> Self {
        Self { inputs, outputs }
    }

    /// Latch and read all 16 inputs.
    pub fn scan(&mut self) -> Result<u16> {
        let mut buf = [0u8; 2];
        self.inputs
            .transfer_in_place(&mut buf)
            .map_err(|_| Error::Bus("button scan"))?;
        Ok(u16::from(buf[0]) | u16::from(buf[1]) << 8)
    }

    /// Drive every output-register bit low.
    pub fn clear_outputs(&mut self) -> Result<()> {
        self.outputs
            .write(&[0x00])
            .map_err(|_| Error::Bus("output latch"))
    }
}
