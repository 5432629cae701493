// gsmsim-rs/gsmsim/src/lib.rs

//! gsmsim
//!
//! Pure Rust access to GSM SIM cards over a half-duplex serial line:
//! ATR parsing, T=0 APDU exchange, the GSM 11.11 command set, phone book
//! and SMS decoding.
#![warn(missing_docs)]

pub mod card;
pub mod codec;
pub mod constants;
pub mod directory;
pub mod error;
pub mod prelude;
pub mod protocol;
pub mod sms;
pub mod test_support;
pub mod transport;
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// and the newtypes in `types` are available for consumers and for
// convenient `prelude` re-exports.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
