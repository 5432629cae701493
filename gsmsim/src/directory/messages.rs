// gsmsim-rs/gsmsim/src/directory/messages.rs

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, warn};

use crate::card::{CardSession, Open};
use crate::protocol::StatusWord;
use crate::sms::{SmsRecord, decode_sms_record};
use crate::types::{FileId, RecordMode};
use crate::Result;

const SMS_PATH: [FileId; 3] = [FileId::Mf, FileId::DfTelecom, FileId::EfSms];

/// Messages stored on the card, keyed by 1-based record number.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmsStore {
    pub record_len: u8,
    pub messages: BTreeMap<u8, SmsRecord>,
    pub free_slots: BTreeSet<u8>,
    /// Used records that failed to decode
    pub unreadable: BTreeSet<u8>,
}

impl CardSession<Open> {
    /// Read and decode one EF_SMS record. The file must already be selected.
    pub fn read_sms(&mut self, slot: u8, record_len: u8) -> Result<Option<SmsRecord>> {
        let resp = self
            .read_record(slot, RecordMode::Absolute, record_len)?
            .expect(StatusWord::OK)?;
        decode_sms_record(&resp.data)
    }

    /// Read every EF_SMS record. A record that does not decode is logged and
    /// listed in `unreadable`; transport and status errors abort the read.
    pub fn read_sms_store(&mut self) -> Result<SmsStore> {
        let info = self.file_info(&SMS_PATH)?;
        let count = info.record_count().min(u8::MAX as usize) as u8;

        let mut store = SmsStore {
            record_len: info.record_len,
            ..SmsStore::default()
        };
        for slot in 1..=count {
            let resp = self
                .read_record(slot, RecordMode::Absolute, info.record_len)?
                .expect(StatusWord::OK)?;
            match decode_sms_record(&resp.data) {
                Ok(Some(sms)) => {
                    store.messages.insert(slot, sms);
                }
                Ok(None) => {
                    store.free_slots.insert(slot);
                }
                Err(e) => {
                    warn!("SMS record {} not decoded: {}", slot, e);
                    store.unreadable.insert(slot);
                }
            }
        }
        debug!(
            "EF_SMS: {} messages, {} free, {} unreadable",
            store.messages.len(),
            store.free_slots.len(),
            store.unreadable.len()
        );
        Ok(store)
    }
}
