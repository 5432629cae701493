// gsmsim-rs/gsmsim/src/card/config.rs

//! Session configuration

use crate::constants::MAX_ATR_LEN;
use crate::utils::{DEFAULT_READ_TIMEOUT_MS, DEFAULT_RESET_PULSE_MS};

/// Tunables for a card session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Bound on every single byte read, in milliseconds
    pub read_timeout_ms: u64,
    /// How long the reset line is held before it is released
    pub reset_pulse_ms: u64,
    /// Read CHV counters and probe for FDN as part of `open`
    pub refresh_chv_on_open: bool,
    /// Upper bound on ATR bytes consumed, TS included
    pub max_atr_len: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
            reset_pulse_ms: DEFAULT_RESET_PULSE_MS,
            refresh_chv_on_open: true,
            max_atr_len: MAX_ATR_LEN,
        }
    }
}
