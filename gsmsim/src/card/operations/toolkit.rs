// gsmsim-rs/gsmsim/src/card/operations/toolkit.rs

//! Authentication, power and SIM toolkit commands.

use log::debug;

use crate::card::{CardSession, Open};
use crate::protocol::{ApduCommand, ApduResponse, Instruction, StatusWord};
use crate::types::FileId;
use crate::{Error, Result};

/// RAND challenge length for RUN GSM ALGORITHM
pub const RAND_LEN: usize = 16;
/// SRES (4) followed by Kc (8)
pub const AUTH_RESPONSE_LEN: u8 = 12;

/// Result of the A3/A8 run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthResult {
    pub sres: [u8; 4],
    pub kc: [u8; 8],
}

impl AuthResult {
    fn from_response(data: &[u8]) -> Result<Self> {
        if data.len() != AUTH_RESPONSE_LEN as usize {
            return Err(Error::InvalidLength {
                expected: AUTH_RESPONSE_LEN as usize,
                actual: data.len(),
            });
        }
        let mut sres = [0u8; 4];
        let mut kc = [0u8; 8];
        sres.copy_from_slice(&data[..4]);
        kc.copy_from_slice(&data[4..]);
        Ok(Self { sres, kc })
    }
}

impl CardSession<Open> {
    /// RUN GSM ALGORITHM with a 16-byte RAND. The card answers `9F0C`;
    /// SRES and Kc are then fetched with GET RESPONSE.
    pub fn run_gsm_algorithm(&mut self, rand: &[u8; RAND_LEN]) -> Result<StatusWord> {
        let cmd = ApduCommand::with_body(Instruction::RunGsmAlgorithm, 0x00, 0x00, rand)?;
        Ok(self.exchange(&cmd)?.status)
    }

    /// Select DF_GSM, run the algorithm and collect SRES/Kc.
    pub fn authenticate(&mut self, rand: &[u8; RAND_LEN]) -> Result<AuthResult> {
        self.select_checked(&[FileId::Mf, FileId::DfGsm])?;

        let status = self.run_gsm_algorithm(rand)?;
        let len = match status.response_length() {
            Some(len) => len,
            None => {
                return Err(Error::StatusWordMismatch {
                    expected: StatusWord::new(0x9F, AUTH_RESPONSE_LEN),
                    actual: status,
                });
            }
        };

        let resp = self.get_response(len)?.expect(StatusWord::OK)?;
        let result = AuthResult::from_response(&resp.data)?;
        debug!("RUN GSM ALGORITHM -> SRES {:02X?}", result.sres);
        Ok(result)
    }

    pub fn sleep(&mut self) -> Result<StatusWord> {
        Ok(self
            .exchange(&ApduCommand::new(Instruction::Sleep, 0x00, 0x00, 0x00))?
            .status)
    }

    /// TERMINAL PROFILE: tell the card which toolkit features the terminal has.
    pub fn terminal_profile(&mut self, profile: &[u8]) -> Result<StatusWord> {
        let cmd = ApduCommand::with_body(Instruction::TerminalProfile, 0x00, 0x00, profile)?;
        Ok(self.exchange(&cmd)?.status)
    }

    pub fn envelope(&mut self, data: &[u8]) -> Result<StatusWord> {
        let cmd = ApduCommand::with_body(Instruction::Envelope, 0x00, 0x00, data)?;
        Ok(self.exchange(&cmd)?.status)
    }

    /// FETCH a pending proactive command of `len` bytes (from a `91xx`).
    pub fn fetch(&mut self, len: u8) -> Result<ApduResponse> {
        self.exchange(&ApduCommand::new(Instruction::Fetch, 0x00, 0x00, len))
    }

    pub fn terminal_response(&mut self, data: &[u8]) -> Result<StatusWord> {
        let cmd = ApduCommand::with_body(Instruction::TerminalResponse, 0x00, 0x00, data)?;
        Ok(self.exchange(&cmd)?.status)
    }
}
