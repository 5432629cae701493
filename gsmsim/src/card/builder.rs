// gsmsim-rs/gsmsim/src/card/builder.rs

use crate::card::config::SessionConfig;
use crate::card::session::{CardSession, Closed, Open};
use crate::transport::Transport;
use crate::{Error, Result};

/// Helper to construct a CardSession with optional configuration.
#[derive(Default)]
pub struct SessionBuilder {
    transport: Option<Box<dyn Transport>>,
    config: SessionConfig,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provide the line to the card (a serial driver, or MockTransport in tests)
    pub fn with_transport(mut self, transport: Box<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    pub fn reset_pulse_ms(mut self, ms: u64) -> Self {
        self.config.reset_pulse_ms = ms;
        self
    }

    pub fn refresh_chv_on_open(mut self, refresh: bool) -> Self {
        self.config.refresh_chv_on_open = refresh;
        self
    }

    pub fn max_atr_len(mut self, len: usize) -> Self {
        self.config.max_atr_len = len;
        self
    }

    /// Consume the builder and return a closed session.
    /// Requires a transport; otherwise returns NoTransport.
    pub fn build(self) -> Result<CardSession<Closed>> {
        match self.transport {
            Some(t) => Ok(CardSession::with_config(t, self.config)),
            None => Err(Error::NoTransport),
        }
    }

    /// Build and open in one step.
    pub fn open(self) -> Result<CardSession<Open>> {
        self.build()?.open()
    }
}
