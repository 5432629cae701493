// gsmsim-rs/gsmsim/src/error.rs

use thiserror::Error;

use crate::protocol::StatusWord;
use crate::types::{Chv, FileId};

/// Common error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("no transport configured")]
    NoTransport,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("operation timed out")]
    Timeout,

    #[error("protocol violation: expected procedure byte {expected:#04x}, got {actual:#04x}")]
    ProtocolViolation { expected: u8, actual: u8 },

    #[error("bad convention byte in answer-to-reset: {0:#04x}")]
    BadConvention(u8),

    #[error("answer-to-reset timed out")]
    AtrTimeout,

    #[error("status word mismatch: expected {expected}, got {actual}")]
    StatusWordMismatch {
        expected: StatusWord,
        actual: StatusWord,
    },

    #[error("select of {file} failed: status={status}")]
    SelectFailed { file: FileId, status: StatusWord },

    #[error("{0} is blocked")]
    PinBlocked(Chv),

    #[error("character {0:?} has no GSM 03.38 mapping")]
    UnmappedCharacter(char),

    #[error("invalid digit string: {0}")]
    InvalidDigits(String),

    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("invalid command: {0}")]
    InvalidCommand(String),

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
}

pub type Result<T> = std::result::Result<T, Error>;
