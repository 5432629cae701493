// gsmsim-rs/gsmsim/src/protocol/mod.rs

pub mod apdu;
pub mod atr;
pub mod exchange;
pub mod parser;
pub mod response;

pub use apdu::{ApduCommand, Direction, Instruction};
pub use atr::{CardProfile, Convention, InterfaceBytes, read_atr};
pub use exchange::exchange;
pub use response::{ApduResponse, StatusWord};
