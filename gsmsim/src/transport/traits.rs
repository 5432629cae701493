// gsmsim-rs/gsmsim/src/transport/traits.rs

use crate::Result;

/// Transport trait abstracts the serial line away from protocol/session logic.
///
/// Implementations drive an 8-data-bit, even-parity, two-stop-bit line where
/// TX and RX are tied together, so every written byte is also read back.
/// The line settings are published in [`crate::constants`] (`LINE_*`).
pub trait Transport {
    /// Read one byte, waiting at most `timeout_ms`. Returns `Error::Timeout`
    /// when the line stays silent.
    fn read_byte(&mut self, timeout_ms: u64) -> Result<u8>;

    /// Write one byte to the line
    fn write_byte(&mut self, byte: u8) -> Result<()>;

    /// Drive the card reset line active
    fn assert_reset(&mut self) -> Result<()>;

    /// Release the card reset line
    fn release_reset(&mut self) -> Result<()>;

    /// Discard anything waiting in the receive buffer
    fn flush_input(&mut self) -> Result<()>;

    /// Write a sequence of bytes. Default implementation loops over
    /// `write_byte`; echo handling stays with the caller.
    fn write_all(&mut self, data: &[u8]) -> Result<()> {
        for &b in data {
            self.write_byte(b)?;
        }
        Ok(())
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn read_byte(&mut self, timeout_ms: u64) -> Result<u8> {
        (**self).read_byte(timeout_ms)
    }

    fn write_byte(&mut self, byte: u8) -> Result<()> {
        (**self).write_byte(byte)
    }

    fn assert_reset(&mut self) -> Result<()> {
        (**self).assert_reset()
    }

    fn release_reset(&mut self) -> Result<()> {
        (**self).release_reset()
    }

    fn flush_input(&mut self) -> Result<()> {
        (**self).flush_input()
    }
}
