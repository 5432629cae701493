// gsmsim-rs/gsmsim/src/prelude.rs

pub use crate::card::{
    AuthResult, CardInfo, CardSession, Closed, Open, SessionBuilder, SessionConfig, SessionState,
};
pub use crate::directory::{Directory, DirectoryFile, DirectoryRecord, FileInfo, SmsStore};
pub use crate::protocol::{ApduCommand, ApduResponse, CardProfile, Instruction, StatusWord};
pub use crate::sms::{SmsMessage, SmsRecord, SmsStatus, SmsTimestamp};
pub use crate::transport::Transport;
pub use crate::{Chv, Error, FileId, Pin, RecordMode, Result};

// Re-export small utilities for convenience
pub use crate::utils::{bytes_to_hex, ms, parse_hex};
