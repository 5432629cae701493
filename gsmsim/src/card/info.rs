// gsmsim-rs/gsmsim/src/card/info.rs

use log::debug;

use crate::card::{CardSession, Open};
use crate::codec::{gsm338_to_text, semi_octets_to_digits};
use crate::protocol::StatusWord;
use crate::protocol::parser::byte_at;
use crate::types::FileId;
use crate::{Error, Result};

/// Location and read length of the transparent files read whole.
fn transparent_file(file: FileId) -> Option<(&'static [FileId], u8)> {
    const UNDER_MF: &[FileId] = &[FileId::Mf];
    const UNDER_GSM: &[FileId] = &[FileId::Mf, FileId::DfGsm];
    let (parent, len) = match file {
        FileId::EfIccid => (UNDER_MF, 0x0A),
        FileId::EfLp => (UNDER_GSM, 0x01),
        FileId::EfImsi => (UNDER_GSM, 0x09),
        FileId::EfKc => (UNDER_GSM, 0x09),
        FileId::EfHplmn => (UNDER_GSM, 0x01),
        FileId::EfSst => (UNDER_GSM, 0x02),
        FileId::EfSpn => (UNDER_GSM, 0x11),
        FileId::EfBcch => (UNDER_GSM, 0x10),
        FileId::EfAcc => (UNDER_GSM, 0x02),
        FileId::EfFplmn => (UNDER_GSM, 0x0C),
        FileId::EfLoci => (UNDER_GSM, 0x0B),
        FileId::EfAd => (UNDER_GSM, 0x03),
        FileId::EfPhase => (UNDER_GSM, 0x01),
        _ => return None,
    };
    Some((parent, len))
}

/// Service provider name with its display condition byte.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ServiceProviderName {
    pub display_condition: u8,
    pub name: String,
}

/// Identity data read from a card.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardInfo {
    pub iccid: String,
    pub imsi: String,
    /// `None` when the card has no EF_SPN
    pub spn: Option<ServiceProviderName>,
    pub phase: u8,
}

/// IMSI: length byte, then semi-octets whose first digit is the parity
/// nibble.
pub fn decode_imsi(raw: &[u8]) -> Result<String> {
    let len = byte_at(raw, 0)? as usize;
    let body = raw.get(1..1 + len).ok_or(Error::InvalidLength {
        expected: 1 + len,
        actual: raw.len(),
    })?;
    let digits = semi_octets_to_digits(body);
    Ok(digits.chars().skip(1).collect())
}

pub fn decode_spn(raw: &[u8]) -> Result<ServiceProviderName> {
    let display_condition = byte_at(raw, 0)?;
    Ok(ServiceProviderName {
        display_condition,
        name: gsm338_to_text(&raw[1..]),
    })
}

impl CardSession<Open> {
    /// Select and read one of the known transparent files in full.
    pub fn read_raw(&mut self, file: FileId) -> Result<Vec<u8>> {
        let (parent, len) = transparent_file(file).ok_or_else(|| {
            Error::UnsupportedOperation(format!("{} is not a known transparent file", file))
        })?;
        self.select_checked(parent)?;
        self.select_checked(&[file])?;
        let resp = self.read_binary(0, len)?.expect(StatusWord::OK)?;
        debug!("{}: {}", file, resp.data_hex());
        Ok(resp.data)
    }

    pub fn iccid(&mut self) -> Result<String> {
        Ok(semi_octets_to_digits(&self.read_raw(FileId::EfIccid)?))
    }

    pub fn imsi(&mut self) -> Result<String> {
        decode_imsi(&self.read_raw(FileId::EfImsi)?)
    }

    pub fn spn(&mut self) -> Result<ServiceProviderName> {
        decode_spn(&self.read_raw(FileId::EfSpn)?)
    }

    pub fn phase(&mut self) -> Result<u8> {
        byte_at(&self.read_raw(FileId::EfPhase)?, 0)
    }

    /// ICCID, IMSI, SPN and phase in one go. A missing EF_SPN is not an
    /// error.
    pub fn card_info(&mut self) -> Result<CardInfo> {
        let iccid = self.iccid()?;
        let imsi = self.imsi()?;
        let spn = match self.spn() {
            Ok(spn) => Some(spn),
            Err(Error::SelectFailed { file: FileId::EfSpn, .. }) => None,
            Err(e) => return Err(e),
        };
        let phase = self.phase()?;
        Ok(CardInfo {
            iccid,
            imsi,
            spn,
            phase,
        })
    }
}
