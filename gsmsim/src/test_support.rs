//! Test support helpers intended for use by unit and integration tests.
//!
//! `CardScript` describes what the card sends, in order; the half-duplex
//! echo of everything the terminal writes is produced by the mock itself.
//! `SharedMock` lets a test inspect the line after a session took
//! ownership of the transport.
#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use crate::card::{CardSession, Open, SessionConfig};
use crate::protocol::{Instruction, StatusWord};
use crate::transport::mock::{LineEvent, MockTransport};
use crate::transport::Transport;
use crate::types::FileId;
use crate::Result;

/// Direct convention, no interface bytes, two historical bytes.
pub const SAMPLE_ATR: [u8; 4] = [0x3B, 0x02, 0x14, 0x50];

/// GET RESPONSE data for a linear fixed EF of `records` x `record_len`.
pub fn ef_fci(file: FileId, records: u16, record_len: u8) -> Vec<u8> {
    let [hi, lo] = (records * record_len as u16).to_be_bytes();
    let [id_hi, id_lo] = file.to_be_bytes();
    vec![
        0x00, 0x00, hi, lo, id_hi, id_lo, 0x04, 0x00, 0x11, 0xFF, 0x22, 0x01, 0x02, 0x01,
        record_len,
    ]
}

/// Card-side byte script.
#[derive(Debug, Default, Clone)]
pub struct CardScript {
    steps: Vec<Option<u8>>,
}

impl CardScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// ATR bytes followed by line silence, which ends the ATR drain.
    pub fn atr(mut self, atr: &[u8]) -> Self {
        self.steps.extend(atr.iter().copied().map(Some));
        self.steps.push(None);
        self
    }

    /// Procedure byte, optional response data, then the status word.
    pub fn reply(mut self, ins: Instruction, data: &[u8], sw: StatusWord) -> Self {
        self.steps.push(Some(ins.code()));
        self.steps.extend(data.iter().copied().map(Some));
        self.steps.push(Some(sw.sw1));
        self.steps.push(Some(sw.sw2));
        self
    }

    /// `count` NULL procedure bytes.
    pub fn nulls(mut self, count: usize) -> Self {
        self.steps
            .extend(std::iter::repeat(Some(crate::constants::NULL_PROCEDURE_BYTE)).take(count));
        self
    }

    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.steps.extend(bytes.iter().copied().map(Some));
        self
    }

    /// One read that times out.
    pub fn silence(mut self) -> Self {
        self.steps.push(None);
        self
    }

    pub fn then(mut self, other: CardScript) -> Self {
        self.steps.extend(other.steps);
        self
    }

    pub fn build(self) -> MockTransport {
        let mut mock = MockTransport::half_duplex();
        mock.incoming.extend(self.steps);
        mock
    }

    pub fn shared(self) -> SharedMock {
        SharedMock(Rc::new(RefCell::new(self.build())))
    }
}

/// Cloneable handle onto one `MockTransport`.
#[derive(Debug, Clone)]
pub struct SharedMock(Rc<RefCell<MockTransport>>);

impl SharedMock {
    pub fn written(&self) -> Vec<u8> {
        self.0.borrow().written.clone()
    }

    pub fn events(&self) -> Vec<LineEvent> {
        self.0.borrow().events.clone()
    }

    /// Card bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.0.borrow().remaining()
    }

    /// Clear what has been written so far.
    pub fn clear_written(&self) {
        self.0.borrow_mut().written.clear();
    }
}

impl Transport for SharedMock {
    fn read_byte(&mut self, timeout_ms: u64) -> Result<u8> {
        self.0.borrow_mut().read_byte(timeout_ms)
    }

    fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.0.borrow_mut().write_byte(byte)
    }

    fn assert_reset(&mut self) -> Result<()> {
        self.0.borrow_mut().assert_reset()
    }

    fn release_reset(&mut self) -> Result<()> {
        self.0.borrow_mut().release_reset()
    }

    fn flush_input(&mut self) -> Result<()> {
        self.0.borrow_mut().flush_input()
    }
}

/// Config used by scripted sessions: no reset delay, no CHV refresh on open.
pub fn scripted_config() -> SessionConfig {
    SessionConfig {
        reset_pulse_ms: 0,
        refresh_chv_on_open: false,
        ..SessionConfig::default()
    }
}

/// Open a session on a mock line that answers with `SAMPLE_ATR` and then
/// plays `script`.
#[doc(hidden)]
pub fn open_session(script: CardScript) -> Result<(CardSession<Open>, SharedMock)> {
    let line = CardScript::new().atr(&SAMPLE_ATR).then(script).shared();
    let session = CardSession::with_config(Box::new(line.clone()), scripted_config()).open()?;
    Ok((session, line))
}
