// gsmsim-rs/gsmsim/src/constants.rs
//! Common protocol constants used across the crate

/// GSM 11.11 class byte
pub const CLA_GSM: u8 = 0xA0;

/// T=0 procedure byte asking the terminal to keep waiting
pub const NULL_PROCEDURE_BYTE: u8 = 0x60;

/// Length of a T=0 command header (CLA INS P1 P2 P3)
pub const APDU_HEADER_LEN: usize = 5;

/// TS byte for direct convention
pub const TS_DIRECT_CONVENTION: u8 = 0x3B;

/// TS byte for inverse convention (not supported)
pub const TS_INVERSE_CONVENTION: u8 = 0x3F;

/// Maximum answer-to-reset length including TS
pub const MAX_ATR_LEN: usize = 33;

/// Serial line settings expected by the card
pub const LINE_BAUD_RATE: u32 = 9600;
pub const LINE_DATA_BITS: u8 = 8;
pub const LINE_STOP_BITS: u8 = 2;
/// Parity is even on the SIM line
pub const LINE_PARITY_EVEN: bool = true;

/// Number of CHV attempts a card grants before blocking
pub const MAX_CHV_TRIES: u8 = 3;

/// Bytes of STATUS response that are always present for the MF
pub const STATUS_MANDATORY_LEN: u8 = 0x0D;

/// Default GET RESPONSE length for an EF when the select status gives no hint
pub const EF_FCI_LEN: u8 = 0x0F;

/// Bytes of a contact record that follow the alpha identifier
pub const CONTACT_RECORD_FIXED_LEN: usize = 14;

/// Maximum BCD number field length (TON/NPI byte + 10 digit bytes)
pub const CONTACT_NUMBER_FIELD_LEN: usize = 11;
