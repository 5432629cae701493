// gsmsim-rs/gsmsim/src/sms/pdu.rs

//! Stored SMS records (EF_SMS): one status byte followed by an
//! SMS-DELIVER TPDU prefixed with the service centre address.

use std::fmt;

use log::{debug, trace};

use crate::codec::{decode_packed_text, gsm338_to_text, gsm_to_phone, packed_len, unpack_7bit};
use crate::protocol::parser::{Cursor, byte_at};
use crate::sms::timestamp::{SmsTimestamp, TIMESTAMP_LEN};
use crate::utils::{bytes_to_hex, parse_hex};
use crate::Result;

/// Type-of-number bits for an alphanumeric originator address.
const TON_ALPHANUMERIC: u8 = 0x50;

/// Record status byte, GSM 11.11 EF_SMS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SmsStatus {
    Free,
    Read,
    Unread,
    Sent,
    Unsent,
    Other(u8),
}

impl From<u8> for SmsStatus {
    fn from(b: u8) -> Self {
        if b & 0x01 == 0 {
            return if b == 0x00 { SmsStatus::Free } else { SmsStatus::Other(b) };
        }
        match b & 0x07 {
            0x01 => SmsStatus::Read,
            0x03 => SmsStatus::Unread,
            0x05 => SmsStatus::Sent,
            _ => SmsStatus::Unsent,
        }
    }
}

/// TPDU first octet, split by bit position. Not validated further.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FirstOctet {
    /// Message type indicator (bits 0-1)
    pub mti: u8,
    /// More-messages-to-send flag (bit 2)
    pub mms: bool,
    /// Status report indication (bit 5)
    pub status_report: bool,
    /// User data header present (bit 6)
    pub udhi: bool,
    /// Reply path (bit 7)
    pub reply_path: bool,
}

impl From<u8> for FirstOctet {
    fn from(b: u8) -> Self {
        Self {
            mti: b & 0x03,
            mms: b & 0x04 != 0,
            status_report: b & 0x20 != 0,
            udhi: b & 0x40 != 0,
            reply_path: b & 0x80 != 0,
        }
    }
}

/// Message body. Only the default 7-bit alphabet is decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SmsMessage {
    Text(String),
    EightBit,
    Ucs2,
    Unknown,
}

impl SmsMessage {
    pub fn text(&self) -> Option<&str> {
        match self {
            SmsMessage::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for SmsMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SmsMessage::Text(s) => f.write_str(s),
            SmsMessage::EightBit => f.write_str("<8-bit data, decoding not supported>"),
            SmsMessage::Ucs2 => f.write_str("<UCS-2 text, decoding not supported>"),
            SmsMessage::Unknown => f.write_str("<unknown message format>"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmsRecord {
    pub status: u8,
    pub smsc: String,
    pub first_octet: FirstOctet,
    pub sender: String,
    pub protocol_id: u8,
    pub dcs: u8,
    pub timestamp: SmsTimestamp,
    pub message: SmsMessage,
}

impl SmsRecord {
    pub fn status_kind(&self) -> SmsStatus {
        SmsStatus::from(self.status)
    }
}

/// Decode one EF_SMS record, status byte included.
///
/// Returns `Ok(None)` for an unused slot: first content byte `FF` with the
/// status low bit clear.
pub fn decode_sms_record(record: &[u8]) -> Result<Option<SmsRecord>> {
    let status = byte_at(record, 0)?;
    if byte_at(record, 1)? == 0xFF && status & 0x01 == 0 {
        trace!("free SMS slot, status {:02X}", status);
        return Ok(None);
    }

    let mut c = Cursor::new(&record[1..]);

    let smsc_len = c.byte()? as usize;
    let smsc = gsm_to_phone(&bytes_to_hex(c.take(smsc_len)?), true);

    let first_octet = FirstOctet::from(c.byte()?);

    let sender_digits = c.byte()? as usize;
    let toa = c.byte()?;
    let sender_raw = c.take(sender_digits.div_ceil(2))?;
    let sender = decode_address(toa, sender_raw, sender_digits);

    let protocol_id = c.byte()?;
    let dcs = c.byte()?;
    let timestamp = SmsTimestamp::decode(c.take(TIMESTAMP_LEN)?)?;
    let udl = c.byte()? as usize;

    let message = match (dcs >> 2) & 0x03 {
        0b00 => {
            let rest = c.remaining();
            let ud = &rest[..packed_len(udl).min(rest.len())];
            SmsMessage::Text(decode_user_data(ud, udl, first_octet.udhi))
        }
        0b01 => SmsMessage::EightBit,
        0b10 => SmsMessage::Ucs2,
        _ => SmsMessage::Unknown,
    };

    debug!(
        "SMS status={:02X} from={} at={} dcs={:02X} udl={}",
        status, sender, timestamp, dcs, udl
    );

    Ok(Some(SmsRecord {
        status,
        smsc,
        first_octet,
        sender,
        protocol_id,
        dcs,
        timestamp,
        message,
    }))
}

/// Decode a record given as hex text.
pub fn decode_sms_hex(record: &str) -> Result<Option<SmsRecord>> {
    decode_sms_record(&parse_hex(record)?)
}

fn decode_address(toa: u8, raw: &[u8], digits: usize) -> String {
    if toa & 0x70 == TON_ALPHANUMERIC {
        // length counts semi-octets of packed 7-bit text
        return decode_packed_text(raw, digits * 4 / 7);
    }
    let mut hex = format!("{:02X}", toa);
    hex.push_str(&bytes_to_hex(raw));
    gsm_to_phone(&hex, true)
}

fn decode_user_data(ud: &[u8], udl: usize, udhi: bool) -> String {
    let septets = unpack_7bit(ud, udl);
    if !udhi || ud.is_empty() {
        return gsm338_to_text(&septets);
    }
    // header length octet plus header, rounded up to whole septets
    let header_septets = ((ud[0] as usize + 1) * 8).div_ceil(7);
    gsm338_to_text(septets.get(header_septets..).unwrap_or(&[]))
}
