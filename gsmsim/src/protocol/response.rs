// gsmsim-rs/gsmsim/src/protocol/response.rs

use derive_more::Display;

use crate::utils::bytes_to_hex;
use crate::{Error, Result};

/// SW1/SW2 status word closing every exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{:02X}{:02X}", sw1, sw2)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusWord {
    pub sw1: u8,
    pub sw2: u8,
}

impl StatusWord {
    /// Normal ending of the command
    pub const OK: Self = Self::new(0x90, 0x00);
    /// Directory selected, 0x17 bytes of response data available
    pub const DIRECTORY_SELECTED: Self = Self::new(0x9F, 0x17);
    /// Elementary file selected, 0x0F bytes of response data available
    pub const FILE_SELECTED: Self = Self::new(0x9F, 0x0F);
    /// CHV verification failed, attempts remain
    pub const CHV_MISMATCH: Self = Self::new(0x98, 0x04);
    /// CHV blocked after unsuccessful verifications
    pub const CHV_BLOCKED: Self = Self::new(0x98, 0x40);
    /// File id not found
    pub const FILE_NOT_FOUND: Self = Self::new(0x94, 0x04);

    pub const fn new(sw1: u8, sw2: u8) -> Self {
        Self { sw1, sw2 }
    }

    pub fn from_u16(sw: u16) -> Self {
        let [sw1, sw2] = sw.to_be_bytes();
        Self { sw1, sw2 }
    }

    pub fn as_u16(&self) -> u16 {
        u16::from_be_bytes([self.sw1, self.sw2])
    }

    /// `9000`, `9Fxx` (response data waiting) and `91xx` (proactive command
    /// pending) all report successful completion.
    pub fn is_success(&self) -> bool {
        matches!((self.sw1, self.sw2), (0x90, 0x00) | (0x9F, _) | (0x91, _))
    }

    /// Length of the response data the card holds for GET RESPONSE.
    pub fn response_length(&self) -> Option<u8> {
        (self.sw1 == 0x9F).then_some(self.sw2)
    }

    /// Strict comparison for callers that opt into it.
    pub fn expect(self, expected: StatusWord) -> Result<Self> {
        if self != expected {
            return Err(Error::StatusWordMismatch {
                expected,
                actual: self,
            });
        }
        Ok(self)
    }
}

/// Data returned by the card plus the closing status word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApduResponse {
    pub data: Vec<u8>,
    pub status: StatusWord,
}

impl ApduResponse {
    pub fn new(data: Vec<u8>, status: StatusWord) -> Self {
        Self { data, status }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Uppercase hex rendering of the data field.
    pub fn data_hex(&self) -> String {
        bytes_to_hex(&self.data)
    }

    /// Return the response only when its status word equals `expected`.
    pub fn expect(self, expected: StatusWord) -> Result<Self> {
        self.status.expect(expected)?;
        Ok(self)
    }
}
