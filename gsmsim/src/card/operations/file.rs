// gsmsim-rs/gsmsim/src/card/operations/file.rs

//! File system commands: selection, transparent and record access.

use log::{debug, trace};

use crate::card::{CardSession, Open};
use crate::protocol::{ApduCommand, ApduResponse, Instruction, StatusWord};
use crate::types::{FileId, RecordMode};
use crate::{Error, Result};

/// Update the tracked path after a successful SELECT. DFs sit directly
/// under the MF; an EF replaces a previously selected EF.
pub(crate) fn track_selection(path: &mut Vec<FileId>, file: FileId) {
    match file {
        FileId::Mf => {
            path.clear();
            path.push(FileId::Mf);
        }
        df if df.is_directory() => {
            path.retain(|f| *f == FileId::Mf);
            path.push(df);
        }
        ef => {
            if path.last().is_some_and(|f| !f.is_directory()) {
                path.pop();
            }
            path.push(ef);
        }
    }
}

impl CardSession<Open> {
    /// SELECT a single file. The response is returned whatever the status;
    /// the tracked path only changes on success.
    pub fn select(&mut self, file: FileId) -> Result<ApduResponse> {
        let cmd = ApduCommand::with_body(Instruction::Select, 0x00, 0x00, &file.to_be_bytes())?;
        let resp = self.exchange(&cmd)?;
        if resp.is_success() {
            track_selection(&mut self.state.selected_path, file);
            trace!("selected path: {:?}", self.state.selected_path);
        } else {
            debug!("SELECT {} -> {}", file, resp.status);
        }
        Ok(resp)
    }

    /// SELECT every element of `path` in turn, stopping at the first status
    /// that is not a success. Returns that status, or the last one.
    pub fn select_path(&mut self, path: &[FileId]) -> Result<StatusWord> {
        let mut status = StatusWord::OK;
        for &file in path {
            status = self.select(file)?.status;
            if !status.is_success() {
                break;
            }
        }
        Ok(status)
    }

    /// Like [`select_path`](Self::select_path) but a failed step is an
    /// error naming the file.
    pub fn select_checked(&mut self, path: &[FileId]) -> Result<StatusWord> {
        let mut status = StatusWord::OK;
        for &file in path {
            status = self.select(file)?.status;
            if !status.is_success() {
                return Err(Error::SelectFailed { file, status });
            }
        }
        Ok(status)
    }

    pub fn status(&mut self, len: u8) -> Result<ApduResponse> {
        self.exchange(&ApduCommand::new(Instruction::Status, 0x00, 0x00, len))
    }

    pub fn get_response(&mut self, len: u8) -> Result<ApduResponse> {
        self.exchange(&ApduCommand::new(Instruction::GetResponse, 0x00, 0x00, len))
    }

    pub fn read_binary(&mut self, offset: u16, len: u8) -> Result<ApduResponse> {
        let [p1, p2] = offset.to_be_bytes();
        self.exchange(&ApduCommand::new(Instruction::ReadBinary, p1, p2, len))
    }

    pub fn update_binary(&mut self, offset: u16, data: &[u8]) -> Result<StatusWord> {
        let [p1, p2] = offset.to_be_bytes();
        let cmd = ApduCommand::with_body(Instruction::UpdateBinary, p1, p2, data)?;
        Ok(self.exchange(&cmd)?.status)
    }

    /// READ RECORD; `index` is 1-based in absolute mode and ignored
    /// (sent as 00) by cards in next/previous mode.
    pub fn read_record(&mut self, index: u8, mode: RecordMode, len: u8) -> Result<ApduResponse> {
        self.exchange(&ApduCommand::new(Instruction::ReadRecord, index, mode as u8, len))
    }

    pub fn update_record(&mut self, index: u8, mode: RecordMode, data: &[u8]) -> Result<StatusWord> {
        let cmd = ApduCommand::with_body(Instruction::UpdateRecord, index, mode as u8, data)?;
        Ok(self.exchange(&cmd)?.status)
    }

    /// SEEK for a record starting with `pattern`. `type_mode` is the raw P2
    /// (type in the high nibble, direction in the low nibble).
    pub fn seek(&mut self, type_mode: u8, pattern: &[u8]) -> Result<StatusWord> {
        let cmd = ApduCommand::with_body(Instruction::Seek, 0x00, type_mode, pattern)?;
        Ok(self.exchange(&cmd)?.status)
    }

    /// INCREASE the current cyclic record by a 3-byte value.
    pub fn increase(&mut self, value: [u8; 3]) -> Result<StatusWord> {
        let cmd = ApduCommand::with_body(Instruction::Increase, 0x00, 0x00, &value)?;
        Ok(self.exchange(&cmd)?.status)
    }

    pub fn invalidate(&mut self) -> Result<StatusWord> {
        Ok(self
            .exchange(&ApduCommand::new(Instruction::Invalidate, 0x00, 0x00, 0x00))?
            .status)
    }

    pub fn rehabilitate(&mut self) -> Result<StatusWord> {
        Ok(self
            .exchange(&ApduCommand::new(Instruction::Rehabilitate, 0x00, 0x00, 0x00))?
            .status)
    }
}
