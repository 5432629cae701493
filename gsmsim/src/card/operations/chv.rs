// gsmsim-rs/gsmsim/src/card/operations/chv.rs

//! Card holder verification.
//!
//! Counters are tracked locally. A CHV whose counter reached zero is refused
//! before anything is sent; only UNBLOCK CHV lifts that. CHANGE, ENABLE and
//! DISABLE reset the counter to the maximum without looking at the status
//! word, which is returned for the caller to check.

use log::{debug, warn};

use crate::card::{CardSession, Open};
use crate::constants::{MAX_CHV_TRIES, STATUS_MANDATORY_LEN};
use crate::protocol::parser::byte_at;
use crate::protocol::{ApduCommand, Instruction, StatusWord};
use crate::types::{Chv, FileId, Pin};
use crate::{Error, Result};

/// Offsets into the MF STATUS response
const STATUS_EXTRA_LEN_OFFSET: usize = 12;
const FILE_CHARACTERISTICS_OFFSET: usize = 13;
const CHV1_STATUS_OFFSET: usize = 18;
const CHV2_STATUS_OFFSET: usize = 20;
const CHV2_STATUS_MIN_LEN: usize = 22;

/// File characteristics bit set when CHV1 is disabled
const CHV1_DISABLED: u8 = 0x80;

fn two_pins(first: &Pin, second: &Pin) -> [u8; 16] {
    let mut body = [0u8; 16];
    body[..8].copy_from_slice(first.as_bytes());
    body[8..].copy_from_slice(second.as_bytes());
    body
}

impl CardSession<Open> {
    fn ensure_not_blocked(&self, chv: Chv) -> Result<()> {
        if self.state.is_blocked(chv) {
            warn!("{} has no tries left, not sending", chv);
            return Err(Error::PinBlocked(chv));
        }
        Ok(())
    }

    /// VERIFY CHV. Success restores the counter, a rejection costs one try
    /// and `9840` means the card blocked the CHV.
    pub fn verify_chv(&mut self, chv: Chv, pin: &Pin) -> Result<StatusWord> {
        self.ensure_not_blocked(chv)?;

        let cmd = ApduCommand::with_body(Instruction::VerifyChv, 0x00, chv.reference(), pin.as_bytes())?;
        let status = self.exchange(&cmd)?.status;

        match status {
            StatusWord::OK => self.state.set_tries_left(chv, MAX_CHV_TRIES),
            StatusWord::CHV_BLOCKED => self.state.set_tries_left(chv, 0),
            _ => self.state.record_failure(chv),
        }
        debug!("VERIFY {} -> {} ({} left)", chv, status, self.state.tries_left(chv));
        Ok(status)
    }

    /// CHANGE CHV from `old` to `new`.
    pub fn change_chv(&mut self, chv: Chv, old: &Pin, new: &Pin) -> Result<StatusWord> {
        self.ensure_not_blocked(chv)?;

        let cmd = ApduCommand::with_body(Instruction::ChangeChv, 0x00, chv.reference(), &two_pins(old, new))?;
        let status = self.exchange(&cmd)?.status;
        self.state.set_tries_left(chv, MAX_CHV_TRIES);
        debug!("CHANGE {} -> {}", chv, status);
        Ok(status)
    }

    /// ENABLE CHV1.
    pub fn enable_chv(&mut self, pin: &Pin) -> Result<StatusWord> {
        self.ensure_not_blocked(Chv::Chv1)?;

        let cmd = ApduCommand::with_body(Instruction::EnableChv, 0x00, Chv::Chv1.reference(), pin.as_bytes())?;
        let status = self.exchange(&cmd)?.status;
        self.state.set_enabled(Chv::Chv1, true);
        self.state.set_tries_left(Chv::Chv1, MAX_CHV_TRIES);
        debug!("ENABLE CHV1 -> {}", status);
        Ok(status)
    }

    /// DISABLE CHV1.
    pub fn disable_chv(&mut self, pin: &Pin) -> Result<StatusWord> {
        self.ensure_not_blocked(Chv::Chv1)?;

        let cmd = ApduCommand::with_body(Instruction::DisableChv, 0x00, Chv::Chv1.reference(), pin.as_bytes())?;
        let status = self.exchange(&cmd)?.status;
        self.state.set_enabled(Chv::Chv1, false);
        self.state.set_tries_left(Chv::Chv1, MAX_CHV_TRIES);
        debug!("DISABLE CHV1 -> {}", status);
        Ok(status)
    }

    /// UNBLOCK CHV with the unblocking key and a new CHV value. Sent even
    /// when the CHV is blocked; the counter is restored only on `9000`.
    pub fn unblock_chv(&mut self, chv: Chv, unblock_key: &Pin, new: &Pin) -> Result<StatusWord> {
        let cmd = ApduCommand::with_body(
            Instruction::UnblockChv,
            0x00,
            chv.unblock_reference(),
            &two_pins(unblock_key, new),
        )?;
        let status = self.exchange(&cmd)?.status;
        if status == StatusWord::OK {
            self.state.set_tries_left(chv, MAX_CHV_TRIES);
        }
        debug!("UNBLOCK {} -> {}", chv, status);
        Ok(status)
    }

    /// Re-read CHV state from the MF STATUS response and probe for FDN.
    ///
    /// STATUS is sent twice: first for the mandatory part, whose byte 13
    /// gives the length of the rest, then for the whole response.
    pub fn refresh_chv_status(&mut self) -> Result<()> {
        self.select_checked(&[FileId::Mf])?;

        let head = self.status(STATUS_MANDATORY_LEN)?;
        let extra = byte_at(&head.data, STATUS_EXTRA_LEN_OFFSET)?;
        let full = self.status(STATUS_MANDATORY_LEN.saturating_add(extra))?;
        let s = &full.data;

        let characteristics = byte_at(s, FILE_CHARACTERISTICS_OFFSET)?;
        self.state.chv1_enabled = characteristics & CHV1_DISABLED == 0;
        self.state
            .set_tries_left(Chv::Chv1, byte_at(s, CHV1_STATUS_OFFSET)? & 0x0F);

        if s.len() >= CHV2_STATUS_MIN_LEN {
            self.state.chv2_enabled = true;
            self.state
                .set_tries_left(Chv::Chv2, s[CHV2_STATUS_OFFSET] & 0x0F);
        } else {
            self.state.chv2_enabled = false;
        }

        self.state.fdn_available = self.probe_fdn();

        debug!(
            "CHV1 enabled={} tries={}, CHV2 enabled={} tries={}, FDN={}",
            self.state.chv1_enabled,
            self.state.chv1_tries_left,
            self.state.chv2_enabled,
            self.state.chv2_tries_left,
            self.state.fdn_available
        );
        Ok(())
    }

    /// Whether MF/Telecom/FDN can be selected. Never fails.
    pub fn probe_fdn(&mut self) -> bool {
        match self.select_path(&[FileId::Mf, FileId::DfTelecom, FileId::EfFdn]) {
            Ok(status) if status.is_success() => true,
            Ok(status) => {
                warn!("FDN not available: {}", status);
                false
            }
            Err(e) => {
                warn!("FDN probe failed: {}", e);
                false
            }
        }
    }
}
