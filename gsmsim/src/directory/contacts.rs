// gsmsim-rs/gsmsim/src/directory/contacts.rs

//! Dialling-number files (ADN, FDN, LND, MSISDN).
//!
//! Record layout: alpha identifier of `record_len - 14` bytes, FF padded;
//! BCD length (TON/NPI byte included); 11 bytes TON/NPI + swapped digits,
//! FF padded; capability and extension identifiers.

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, warn};

use crate::card::{CardSession, Open};
use crate::codec::{gsm338_to_text, gsm_to_phone, phone_to_gsm, text_to_gsm338};
use crate::constants::{CONTACT_NUMBER_FIELD_LEN, CONTACT_RECORD_FIXED_LEN};
use crate::directory::fci::FileInfo;
use crate::protocol::StatusWord;
use crate::protocol::parser::{byte_at, ensure_len};
use crate::types::{FileId, RecordMode};
use crate::utils::{bytes_to_hex, parse_hex};
use crate::{Error, Result};

const FILLER: u8 = 0xFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DirectoryFile {
    /// Abbreviated dialling numbers (phone book)
    Adn,
    /// Fixed dialling numbers
    Fdn,
    /// Last numbers dialled
    Lnd,
    /// Own numbers
    Msisdn,
}

impl DirectoryFile {
    pub fn file_id(self) -> FileId {
        match self {
            DirectoryFile::Adn => FileId::EfAdn,
            DirectoryFile::Fdn => FileId::EfFdn,
            DirectoryFile::Lnd => FileId::EfLnd,
            DirectoryFile::Msisdn => FileId::EfMsisdn,
        }
    }

    pub fn path(self) -> [FileId; 3] {
        [FileId::Mf, FileId::DfTelecom, self.file_id()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DirectoryRecord {
    /// 1-based record number
    pub slot: u8,
    pub name: String,
    pub number: String,
}

impl DirectoryRecord {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.number.is_empty()
    }
}

/// Contents of one dialling-number file.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Directory {
    pub file: DirectoryFile,
    pub record_len: u8,
    pub entries: BTreeMap<u8, DirectoryRecord>,
    pub free_slots: BTreeSet<u8>,
}

impl Directory {
    pub fn name_len(&self) -> usize {
        (self.record_len as usize).saturating_sub(CONTACT_RECORD_FIXED_LEN)
    }

    pub fn first_free_slot(&self) -> Option<u8> {
        self.free_slots.iter().next().copied()
    }
}

fn name_len_for(record_len: u8) -> Result<usize> {
    (record_len as usize)
        .checked_sub(CONTACT_RECORD_FIXED_LEN)
        .ok_or(Error::InvalidLength {
            expected: CONTACT_RECORD_FIXED_LEN,
            actual: record_len as usize,
        })
}

/// Decode a raw record into `(name, number)`. A record starting with FF is
/// unused and decodes to two empty strings.
pub fn decode_contact(raw: &[u8], name_len: usize) -> Result<(String, String)> {
    ensure_len(raw, name_len + CONTACT_RECORD_FIXED_LEN)?;
    if raw.first() == Some(&FILLER) {
        return Ok((String::new(), String::new()));
    }

    let mut alpha: Vec<u8> = raw[..name_len]
        .iter()
        .copied()
        .take_while(|&b| b != FILLER)
        .collect();
    // Some handsets append a group id, which is never a GSM code point.
    if alpha.last().is_some_and(|&b| b >= 0x80) {
        alpha.pop();
    }
    let name = gsm338_to_text(&alpha).trim_end().to_string();

    let number_len = byte_at(raw, name_len)? as usize;
    let number = if (1..=CONTACT_NUMBER_FIELD_LEN).contains(&number_len) {
        let bcd = &raw[name_len + 1..name_len + 1 + number_len];
        gsm_to_phone(&bytes_to_hex(bcd), true)
    } else {
        String::new()
    };
    Ok((name, number))
}

/// Encode `(name, number)` into a record of `name_len + 14` bytes. An empty
/// name produces an all-FF (erased) record.
pub fn encode_contact(name: &str, number: &str, name_len: usize) -> Result<Vec<u8>> {
    let record_len = name_len + CONTACT_RECORD_FIXED_LEN;
    if name.is_empty() {
        return Ok(vec![FILLER; record_len]);
    }

    let alpha = text_to_gsm338(name)?;
    if alpha.len() > name_len {
        return Err(Error::InvalidLength {
            expected: name_len,
            actual: alpha.len(),
        });
    }
    let bcd = parse_hex(&phone_to_gsm(number)?)?;
    if bcd.len() > CONTACT_NUMBER_FIELD_LEN {
        return Err(Error::InvalidLength {
            expected: CONTACT_NUMBER_FIELD_LEN,
            actual: bcd.len(),
        });
    }

    let mut record = Vec::with_capacity(record_len);
    record.extend_from_slice(&alpha);
    record.resize(name_len, FILLER);
    record.push(if bcd.is_empty() { FILLER } else { bcd.len() as u8 });
    record.extend_from_slice(&bcd);
    record.resize(record_len, FILLER);
    Ok(record)
}

impl CardSession<Open> {
    /// FCI of a dialling-number file; leaves the file selected.
    pub fn directory_info(&mut self, file: DirectoryFile) -> Result<FileInfo> {
        self.file_info(&file.path())
    }

    /// Read every record of `file`. Records with neither name nor number
    /// are reported as free slots.
    pub fn read_directory(&mut self, file: DirectoryFile) -> Result<Directory> {
        let info = self.directory_info(file)?;
        let name_len = name_len_for(info.record_len)?;
        let count = info.record_count().min(u8::MAX as usize) as u8;

        let mut dir = Directory {
            file,
            record_len: info.record_len,
            entries: BTreeMap::new(),
            free_slots: BTreeSet::new(),
        };
        for slot in 1..=count {
            let resp = self
                .read_record(slot, RecordMode::Absolute, info.record_len)?
                .expect(StatusWord::OK)?;
            let (name, number) = decode_contact(&resp.data, name_len)?;
            let record = DirectoryRecord { slot, name, number };
            if record.is_empty() {
                dir.free_slots.insert(slot);
            } else {
                dir.entries.insert(slot, record);
            }
        }
        debug!(
            "{:?}: {} entries, {} free",
            file,
            dir.entries.len(),
            dir.free_slots.len()
        );
        Ok(dir)
    }

    /// Write (or with an empty name, erase) one contact.
    ///
    /// ADN and MSISDN are written at `slot`. LND is cyclic: the record goes
    /// to the oldest position and `slot` is ignored. FDN needs CHV2 and is
    /// refused.
    pub fn write_contact(
        &mut self,
        file: DirectoryFile,
        slot: u8,
        name: &str,
        number: &str,
    ) -> Result<StatusWord> {
        if file == DirectoryFile::Fdn {
            return Err(Error::UnsupportedOperation(
                "writing fixed dialling numbers".to_string(),
            ));
        }

        let info = self.directory_info(file)?;
        let name_len = name_len_for(info.record_len)?;
        let data = encode_contact(name, number, name_len)?;

        let status = match file {
            DirectoryFile::Lnd => self.update_record(0x00, RecordMode::Previous, &data)?,
            _ => {
                let count = info.record_count();
                if slot == 0 || slot as usize > count {
                    return Err(Error::InvalidCommand(format!(
                        "slot {} out of range 1..={}",
                        slot, count
                    )));
                }
                self.update_record(slot, RecordMode::Absolute, &data)?
            }
        };
        if !status.is_success() {
            warn!("UPDATE RECORD on {:?} -> {}", file, status);
        }
        Ok(status)
    }
}
