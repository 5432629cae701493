// gsmsim-rs/gsmsim/src/protocol/apdu.rs

use crate::constants::{APDU_HEADER_LEN, CLA_GSM};
use crate::utils::{bytes_to_hex, parse_hex};
use crate::{Error, Result};

/// GSM 11.11 / 11.14 instruction bytes.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    Select = 0xA4,
    Status = 0xF2,
    ReadBinary = 0xB0,
    UpdateBinary = 0xD6,
    ReadRecord = 0xB2,
    UpdateRecord = 0xDC,
    Seek = 0xA2,
    Increase = 0x32,
    VerifyChv = 0x20,
    ChangeChv = 0x24,
    DisableChv = 0x26,
    EnableChv = 0x28,
    UnblockChv = 0x2C,
    Invalidate = 0x04,
    Rehabilitate = 0x44,
    RunGsmAlgorithm = 0x88,
    Sleep = 0xFA,
    GetResponse = 0xC0,
    TerminalProfile = 0x10,
    Envelope = 0xC2,
    Fetch = 0x12,
    TerminalResponse = 0x14,
}

impl Instruction {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        use Instruction::*;
        let ins = match code {
            0xA4 => Select,
            0xF2 => Status,
            0xB0 => ReadBinary,
            0xD6 => UpdateBinary,
            0xB2 => ReadRecord,
            0xDC => UpdateRecord,
            0xA2 => Seek,
            0x32 => Increase,
            0x20 => VerifyChv,
            0x24 => ChangeChv,
            0x26 => DisableChv,
            0x28 => EnableChv,
            0x2C => UnblockChv,
            0x04 => Invalidate,
            0x44 => Rehabilitate,
            0x88 => RunGsmAlgorithm,
            0xFA => Sleep,
            0xC0 => GetResponse,
            0x10 => TerminalProfile,
            0xC2 => Envelope,
            0x12 => Fetch,
            0x14 => TerminalResponse,
            _ => return None,
        };
        Some(ins)
    }
}

/// Direction of the T=0 data phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Card sends `P3` bytes after the procedure byte
    CardToTerminal(u8),
    /// Terminal sends the command body after the procedure byte
    TerminalToCard,
}

/// A class `A0` command. Constructed per call, never retained.
///
/// `P3` is either the expected response length (no body) or the body
/// length; the two forms are kept apart at construction so the header can
/// never disagree with the data that follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApduCommand {
    ins: Instruction,
    p1: u8,
    p2: u8,
    p3: u8,
    body: Vec<u8>,
}

impl ApduCommand {
    /// Command whose data phase runs card-to-terminal for `le` bytes.
    pub fn new(ins: Instruction, p1: u8, p2: u8, le: u8) -> Self {
        Self {
            ins,
            p1,
            p2,
            p3: le,
            body: Vec::new(),
        }
    }

    /// Command carrying an inline body; `P3` is the body length.
    pub fn with_body(ins: Instruction, p1: u8, p2: u8, body: &[u8]) -> Result<Self> {
        if body.is_empty() || body.len() > u8::MAX as usize {
            return Err(Error::InvalidCommand(format!(
                "body length {} out of range 1..=255",
                body.len()
            )));
        }
        Ok(Self {
            ins,
            p1,
            p2,
            p3: body.len() as u8,
            body: body.to_vec(),
        })
    }

    /// Parse a hex-framed command such as `"A0A40000023F00"`.
    ///
    /// A 5-byte string is a read-direction command; anything longer must
    /// carry exactly `P3` body bytes.
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = parse_hex(s)?;
        if bytes.len() < APDU_HEADER_LEN {
            return Err(Error::InvalidCommand(format!(
                "header needs {} bytes, got {}",
                APDU_HEADER_LEN,
                bytes.len()
            )));
        }
        if bytes[0] != CLA_GSM {
            return Err(Error::InvalidCommand(format!(
                "class byte {:02X} is not A0",
                bytes[0]
            )));
        }
        let ins = Instruction::from_code(bytes[1]).ok_or_else(|| {
            Error::InvalidCommand(format!("unknown instruction {:02X}", bytes[1]))
        })?;
        let (p1, p2, p3) = (bytes[2], bytes[3], bytes[4]);
        let body = &bytes[APDU_HEADER_LEN..];
        if body.is_empty() {
            return Ok(Self::new(ins, p1, p2, p3));
        }
        if body.len() != p3 as usize {
            return Err(Error::InvalidCommand(format!(
                "P3 announces {} body bytes, got {}",
                p3,
                body.len()
            )));
        }
        Self::with_body(ins, p1, p2, body)
    }

    pub fn instruction(&self) -> Instruction {
        self.ins
    }

    pub fn header(&self) -> [u8; APDU_HEADER_LEN] {
        [CLA_GSM, self.ins.code(), self.p1, self.p2, self.p3]
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn direction(&self) -> Direction {
        if self.body.is_empty() {
            Direction::CardToTerminal(self.p3)
        } else {
            Direction::TerminalToCard
        }
    }

    /// Header followed by body.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(APDU_HEADER_LEN + self.body.len());
        buf.extend_from_slice(&self.header());
        buf.extend_from_slice(&self.body);
        buf
    }

    pub fn to_hex(&self) -> String {
        bytes_to_hex(&self.encode())
    }
}
