// gsmsim-rs/gsmsim/src/types.rs

use std::convert::TryFrom;
use std::fmt;

use derive_more::Display;

use crate::Error;

/// Two-byte file identifiers of the GSM 11.11 file system.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FileId {
    /// Master File
    Mf = 0x3F00,
    DfTelecom = 0x7F10,
    DfGsm = 0x7F20,
    EfIccid = 0x2FE2,
    EfLp = 0x6F05,
    EfImsi = 0x6F07,
    EfKc = 0x6F20,
    EfHplmn = 0x6F31,
    EfSst = 0x6F38,
    EfAdn = 0x6F3A,
    EfFdn = 0x6F3B,
    EfSms = 0x6F3C,
    EfMsisdn = 0x6F40,
    EfLnd = 0x6F44,
    EfSpn = 0x6F46,
    EfBcch = 0x6F74,
    EfAcc = 0x6F78,
    EfFplmn = 0x6F7B,
    EfLoci = 0x6F7E,
    EfAd = 0x6FAD,
    EfPhase = 0x6FAE,
}

impl FileId {
    const ALL: [FileId; 21] = [
        FileId::Mf,
        FileId::DfTelecom,
        FileId::DfGsm,
        FileId::EfIccid,
        FileId::EfLp,
        FileId::EfImsi,
        FileId::EfKc,
        FileId::EfHplmn,
        FileId::EfSst,
        FileId::EfAdn,
        FileId::EfFdn,
        FileId::EfSms,
        FileId::EfMsisdn,
        FileId::EfLnd,
        FileId::EfSpn,
        FileId::EfBcch,
        FileId::EfAcc,
        FileId::EfFplmn,
        FileId::EfLoci,
        FileId::EfAd,
        FileId::EfPhase,
    ];

    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    pub fn to_be_bytes(self) -> [u8; 2] {
        self.as_u16().to_be_bytes()
    }

    pub fn from_u16(id: u16) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.as_u16() == id)
    }

    /// Dedicated files (and the MF) can hold other files.
    pub fn is_directory(self) -> bool {
        matches!(self, FileId::Mf | FileId::DfTelecom | FileId::DfGsm)
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}", self.as_u16())
    }
}

impl TryFrom<u16> for FileId {
    type Error = Error;

    fn try_from(id: u16) -> Result<Self, Self::Error> {
        Self::from_u16(id).ok_or_else(|| Error::InvalidCommand(format!("unknown file id {:04X}", id)))
    }
}

/// Card holder verification number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Chv {
    #[display(fmt = "CHV1")]
    Chv1,
    #[display(fmt = "CHV2")]
    Chv2,
}

impl Chv {
    /// P2 value used by VERIFY and CHANGE CHV.
    pub fn reference(self) -> u8 {
        match self {
            Chv::Chv1 => 0x01,
            Chv::Chv2 => 0x02,
        }
    }

    /// P2 value used by UNBLOCK CHV (CHV1 is addressed as 00).
    pub fn unblock_reference(self) -> u8 {
        match self {
            Chv::Chv1 => 0x00,
            Chv::Chv2 => 0x02,
        }
    }
}

/// READ/UPDATE RECORD addressing mode (P2).
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordMode {
    Next = 0x02,
    Previous = 0x03,
    Absolute = 0x04,
}

/// PIN/PUK value as sent on the wire: ASCII digits padded with 0xFF to 8 bytes.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Pin([u8; 8]);

impl Pin {
    pub const MIN_DIGITS: usize = 4;
    pub const MAX_DIGITS: usize = 8;

    pub fn new(digits: &str) -> crate::Result<Self> {
        let len = digits.len();
        if !(Self::MIN_DIGITS..=Self::MAX_DIGITS).contains(&len)
            || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(Error::InvalidDigits(format!(
                "PIN must be {}-{} decimal digits",
                Self::MIN_DIGITS,
                Self::MAX_DIGITS
            )));
        }
        let mut buf = [0xFFu8; 8];
        buf[..len].copy_from_slice(digits.as_bytes());
        Ok(Self(buf))
    }

    pub fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }
}

// Keep PIN digits out of logs.
impl fmt::Debug for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Pin(****)")
    }
}
