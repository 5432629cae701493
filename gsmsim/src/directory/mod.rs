// gsmsim-rs/gsmsim/src/directory/mod.rs

//! Record-oriented files under DF_TELECOM: the phone books (ADN, FDN, LND,
//! MSISDN) and the SMS store.

pub mod contacts;
pub mod fci;
pub mod messages;

pub use contacts::{Directory, DirectoryFile, DirectoryRecord, decode_contact, encode_contact};
pub use fci::{FileInfo, FileStructure};
pub use messages::SmsStore;
