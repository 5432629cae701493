// gsmsim-rs/gsmsim/src/directory/fci.rs

//! File control information returned by GET RESPONSE after selecting an EF.

use log::debug;

use crate::card::{CardSession, Open};
use crate::constants::EF_FCI_LEN;
use crate::protocol::StatusWord;
use crate::protocol::parser::{be_u16_at, byte_at, ensure_len};
use crate::types::FileId;
use crate::Result;

const FILE_SIZE_OFFSET: usize = 2;
const FILE_ID_OFFSET: usize = 4;
const FILE_TYPE_OFFSET: usize = 6;
const STRUCTURE_OFFSET: usize = 13;
const RECORD_LEN_OFFSET: usize = 14;

/// EF structure byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FileStructure {
    Transparent,
    LinearFixed,
    Cyclic,
    Other(u8),
}

impl From<u8> for FileStructure {
    fn from(b: u8) -> Self {
        match b {
            0x00 => FileStructure::Transparent,
            0x01 => FileStructure::LinearFixed,
            0x03 => FileStructure::Cyclic,
            other => FileStructure::Other(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileInfo {
    pub file_size: u16,
    pub file_id: u16,
    pub file_type: u8,
    pub structure: FileStructure,
    /// Zero for transparent files
    pub record_len: u8,
}

impl FileInfo {
    pub fn parse(fci: &[u8]) -> Result<Self> {
        ensure_len(fci, EF_FCI_LEN as usize)?;
        Ok(Self {
            file_size: be_u16_at(fci, FILE_SIZE_OFFSET)?,
            file_id: be_u16_at(fci, FILE_ID_OFFSET)?,
            file_type: byte_at(fci, FILE_TYPE_OFFSET)?,
            structure: FileStructure::from(byte_at(fci, STRUCTURE_OFFSET)?),
            record_len: byte_at(fci, RECORD_LEN_OFFSET)?,
        })
    }

    pub fn record_count(&self) -> usize {
        match self.record_len {
            0 => 0,
            len => self.file_size as usize / len as usize,
        }
    }
}

impl CardSession<Open> {
    /// Select `path` and fetch the FCI of its last element. The GET RESPONSE
    /// length comes from the SELECT status (`9Fxx`), else 15 bytes.
    pub fn file_info(&mut self, path: &[FileId]) -> Result<FileInfo> {
        let status = self.select_checked(path)?;
        let len = status.response_length().unwrap_or(EF_FCI_LEN);
        let resp = self.get_response(len)?.expect(StatusWord::OK)?;
        let info = FileInfo::parse(&resp.data)?;
        debug!(
            "FCI {:04X}: size={} record_len={} records={}",
            info.file_id,
            info.file_size,
            info.record_len,
            info.record_count()
        );
        Ok(info)
    }
}
