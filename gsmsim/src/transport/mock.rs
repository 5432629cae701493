// gsmsim-rs/gsmsim/src/transport/mock.rs

use std::collections::VecDeque;

use crate::transport::traits::Transport;
use crate::{Error, Result};

/// Reset-line and buffer events recorded by the mock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEvent {
    AssertReset,
    ReleaseReset,
    FlushInput,
}

/// Mock transport for unit tests. It records written bytes and replays a
/// queued card-side byte stream.
///
/// `None` entries in the queue model line silence: the read returns
/// `Error::Timeout` and the queue moves on. In half-duplex mode every
/// written byte is echoed back ahead of the card-side stream, as on a real
/// SIM line where TX and RX share one wire.
#[derive(Debug, Default)]
pub struct MockTransport {
    pub written: Vec<u8>,
    pub incoming: VecDeque<Option<u8>>,
    pub events: Vec<LineEvent>,
    /// Echo written bytes back to the reader
    pub echo: bool,
    echoes: VecDeque<u8>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock wired like the SIM line: written bytes come back as echoes.
    pub fn half_duplex() -> Self {
        Self {
            echo: true,
            ..Self::default()
        }
    }

    pub fn push_byte(&mut self, b: u8) {
        self.incoming.push_back(Some(b));
    }

    pub fn push_bytes(&mut self, bytes: &[u8]) {
        self.incoming.extend(bytes.iter().copied().map(Some));
    }

    /// Queue one read timeout.
    pub fn push_silence(&mut self) {
        self.incoming.push_back(None);
    }

    /// Number of card-side entries (bytes and silences) not yet consumed.
    pub fn remaining(&self) -> usize {
        self.incoming.len()
    }
}

impl Transport for MockTransport {
    fn read_byte(&mut self, _timeout_ms: u64) -> Result<u8> {
        if let Some(b) = self.echoes.pop_front() {
            return Ok(b);
        }
        match self.incoming.pop_front() {
            Some(Some(b)) => Ok(b),
            Some(None) | None => Err(Error::Timeout),
        }
    }

    fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.written.push(byte);
        if self.echo {
            self.echoes.push_back(byte);
        }
        Ok(())
    }

    fn assert_reset(&mut self) -> Result<()> {
        self.events.push(LineEvent::AssertReset);
        Ok(())
    }

    fn release_reset(&mut self) -> Result<()> {
        self.events.push(LineEvent::ReleaseReset);
        Ok(())
    }

    fn flush_input(&mut self) -> Result<()> {
        // Only pending echoes are dropped; the queued card stream stands for
        // bytes the card has not sent yet.
        self.echoes.clear();
        self.events.push(LineEvent::FlushInput);
        Ok(())
    }
}
