// gsmsim-rs/gsmsim/src/protocol/atr.rs

//! Answer-to-reset parsing.
//!
//! Layout: `TS T0 {TAi TBi TCi TDi}* T1..TK [TCK]`. Presence of each
//! interface byte group is announced by the high nibble of T0 or of the
//! preceding TDi; the low nibble of T0 is the historical byte count K.

use log::debug;

use crate::constants::{TS_DIRECT_CONVENTION, TS_INVERSE_CONVENTION};
use crate::transport::Transport;
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Convention {
    #[default]
    Direct,
    Inverse,
}

/// Interface bytes of one level (TAi/TBi/TCi/TDi), `None` when absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InterfaceBytes {
    pub ta: Option<u8>,
    pub tb: Option<u8>,
    pub tc: Option<u8>,
    pub td: Option<u8>,
}

/// Decoded answer-to-reset. Produced once per session, immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardProfile {
    pub convention: Convention,
    pub t0: u8,
    /// Level 1 first; further levels follow the TDi chain.
    pub interface: Vec<InterfaceBytes>,
    pub historical: Vec<u8>,
    /// Bytes received after the historical bytes (TCK and anything else the
    /// card sent before falling silent).
    pub trailing: Vec<u8>,
}

impl CardProfile {
    /// Parse a complete ATR held in memory.
    pub fn from_bytes(bytes: &[u8], max_len: usize) -> Result<Self> {
        let mut it = bytes.iter().copied();
        parse_with(|| it.next().ok_or(Error::Timeout), max_len)
    }

    /// Protocols offered through the TDi chain; T=0 when TD1 is absent.
    pub fn protocols(&self) -> Vec<u8> {
        let mut out: Vec<u8> = self
            .interface
            .iter()
            .filter_map(|l| l.td.map(|td| td & 0x0F))
            .collect();
        if out.is_empty() {
            out.push(0);
        }
        out.dedup();
        out
    }

    pub fn offers_t0(&self) -> bool {
        self.protocols().contains(&0)
    }

    /// Reassemble the ATR as received.
    pub fn raw(&self) -> Vec<u8> {
        let mut out = vec![TS_DIRECT_CONVENTION, self.t0];
        for l in &self.interface {
            out.extend([l.ta, l.tb, l.tc, l.td].into_iter().flatten());
        }
        out.extend_from_slice(&self.historical);
        out.extend_from_slice(&self.trailing);
        out
    }
}

/// Read and parse the ATR from the line after the reset has been released.
///
/// The trailing bytes are drained until the line times out, bounded by
/// `max_len` bytes overall.
pub fn read_atr(transport: &mut dyn Transport, timeout_ms: u64, max_len: usize) -> Result<CardProfile> {
    parse_with(|| transport.read_byte(timeout_ms), max_len)
}

fn parse_with<F>(mut next: F, max_len: usize) -> Result<CardProfile>
where
    F: FnMut() -> Result<u8>,
{
    let mut count = 0usize;
    let mut expect = |next: &mut F| -> Result<u8> {
        count += 1;
        match next() {
            Err(Error::Timeout) => Err(Error::AtrTimeout),
            other => other,
        }
    };

    let ts = expect(&mut next)?;
    match ts {
        TS_DIRECT_CONVENTION => debug!("TS: {:02X} direct convention", ts),
        TS_INVERSE_CONVENTION => {
            debug!("TS: {:02X} inverse convention not supported", ts);
            return Err(Error::BadConvention(ts));
        }
        _ => return Err(Error::BadConvention(ts)),
    }

    let t0 = expect(&mut next)?;
    debug!("T0: {:02X}", t0);
    let k = (t0 & 0x0F) as usize;

    let mut interface = Vec::new();
    let mut presence = t0 >> 4;
    loop {
        let mut level = InterfaceBytes::default();
        if presence & 0x1 != 0 {
            level.ta = Some(expect(&mut next)?);
        }
        if presence & 0x2 != 0 {
            level.tb = Some(expect(&mut next)?);
        }
        if presence & 0x4 != 0 {
            level.tc = Some(expect(&mut next)?);
        }
        if presence & 0x8 != 0 {
            level.td = Some(expect(&mut next)?);
        }
        debug!("interface level {}: {:02X?}", interface.len() + 1, level);
        interface.push(level);

        match level.td {
            Some(td) if td >> 4 != 0 && interface.len() < max_len => presence = td >> 4,
            _ => break,
        }
    }

    let mut historical = Vec::with_capacity(k);
    for _ in 0..k {
        historical.push(expect(&mut next)?);
    }
    debug!("historical bytes: {:02X?}", historical);

    let consumed = count;
    let mut trailing = Vec::new();
    while consumed + trailing.len() < max_len {
        match next() {
            Ok(b) => trailing.push(b),
            Err(Error::Timeout) => break,
            Err(e) => return Err(e),
        }
    }
    if !trailing.is_empty() {
        debug!("trailing bytes: {:02X?}", trailing);
    }

    Ok(CardProfile {
        convention: Convention::Direct,
        t0,
        interface,
        historical,
        trailing,
    })
}
