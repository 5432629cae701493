//! Timeout helpers used across the crate.
//!
//! The SIM line is read one byte at a time and every read carries its own
//! bound; there is no deadline for a whole exchange.

use std::time::Duration;

/// Default per-byte read timeout in milliseconds.
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 1000;

/// Default duration the reset line is held active before the ATR is read.
pub const DEFAULT_RESET_PULSE_MS: u64 = 10;

/// Convert milliseconds to Duration.
pub fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}
