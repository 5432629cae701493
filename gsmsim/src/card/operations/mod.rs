// gsmsim-rs/gsmsim/src/card/operations/mod.rs

// Each module adds an `impl CardSession<Open>` block for one group of
// GSM 11.11 commands.
pub mod chv;
pub mod file;
pub mod toolkit;

pub use toolkit::{AUTH_RESPONSE_LEN, AuthResult, RAND_LEN};
