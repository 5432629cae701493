// gsmsim-rs/gsmsim/src/sms/mod.rs

pub mod pdu;
pub mod timestamp;

pub use pdu::{FirstOctet, SmsMessage, SmsRecord, SmsStatus, decode_sms_hex, decode_sms_record};
pub use timestamp::SmsTimestamp;
