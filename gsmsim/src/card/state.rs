// gsmsim-rs/gsmsim/src/card/state.rs

use crate::constants::MAX_CHV_TRIES;
use crate::types::{Chv, FileId};

/// Mutable view of the card kept by an open session.
///
/// Only session operations write to it: SELECT updates the path, the CHV
/// commands and the status refresh update the counters. Tries-left values
/// stay within `0..=3`; zero means blocked until UNBLOCK CHV succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionState {
    pub is_open: bool,
    /// Root to leaf
    pub selected_path: Vec<FileId>,
    pub chv1_enabled: bool,
    pub chv1_tries_left: u8,
    pub chv2_enabled: bool,
    pub chv2_tries_left: u8,
    pub fdn_available: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            is_open: false,
            selected_path: Vec::new(),
            chv1_enabled: false,
            chv1_tries_left: MAX_CHV_TRIES,
            chv2_enabled: false,
            chv2_tries_left: MAX_CHV_TRIES,
            fdn_available: false,
        }
    }
}

impl SessionState {
    pub fn tries_left(&self, chv: Chv) -> u8 {
        match chv {
            Chv::Chv1 => self.chv1_tries_left,
            Chv::Chv2 => self.chv2_tries_left,
        }
    }

    pub fn is_enabled(&self, chv: Chv) -> bool {
        match chv {
            Chv::Chv1 => self.chv1_enabled,
            Chv::Chv2 => self.chv2_enabled,
        }
    }

    pub fn is_blocked(&self, chv: Chv) -> bool {
        self.tries_left(chv) == 0
    }

    /// Set the counter, clamped to the card maximum.
    pub fn set_tries_left(&mut self, chv: Chv, tries: u8) {
        let tries = tries.min(MAX_CHV_TRIES);
        match chv {
            Chv::Chv1 => self.chv1_tries_left = tries,
            Chv::Chv2 => self.chv2_tries_left = tries,
        }
    }

    pub fn set_enabled(&mut self, chv: Chv, enabled: bool) {
        match chv {
            Chv::Chv1 => self.chv1_enabled = enabled,
            Chv::Chv2 => self.chv2_enabled = enabled,
        }
    }

    /// One failed presentation; floors at zero.
    pub(crate) fn record_failure(&mut self, chv: Chv) {
        let left = self.tries_left(chv).saturating_sub(1);
        self.set_tries_left(chv, left);
    }

    pub(crate) fn current_file(&self) -> Option<FileId> {
        self.selected_path.last().copied()
    }
}
