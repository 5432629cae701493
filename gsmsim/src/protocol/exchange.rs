// gsmsim-rs/gsmsim/src/protocol/exchange.rs

use log::{debug, trace, warn};

use crate::constants::NULL_PROCEDURE_BYTE;
use crate::protocol::apdu::{ApduCommand, Direction};
use crate::protocol::response::{ApduResponse, StatusWord};
use crate::transport::Transport;
use crate::utils::bytes_to_hex_spaced;
use crate::{Error, Result};

/// Write one byte and discard the echo the tied TX/RX wiring produces.
fn write_echoed(transport: &mut dyn Transport, byte: u8, timeout_ms: u64) -> Result<()> {
    transport.write_byte(byte)?;
    let echo = transport.read_byte(timeout_ms)?;
    if echo != byte {
        trace!("echo {:02X} differs from written {:02X}", echo, byte);
    }
    Ok(())
}

/// `6x` and `9x` (other than NULL) open a status word.
fn is_sw1(b: u8) -> bool {
    matches!(b & 0xF0, 0x60 | 0x90)
}

/// Wait for the procedure byte: the INS echo means the card is ready for
/// the data phase, NULL means it wants more time.
///
/// On any other byte the line is drained before the violation is returned,
/// so the next exchange starts in sync: a status word sent in place of the
/// procedure byte is read to its SW2, and pending input is flushed.
fn await_procedure_byte(transport: &mut dyn Transport, ins: u8, timeout_ms: u64) -> Result<()> {
    loop {
        let pb = transport.read_byte(timeout_ms)?;
        if pb == ins {
            trace!("procedure byte: INS");
            return Ok(());
        }
        if pb != NULL_PROCEDURE_BYTE {
            warn!("unexpected procedure byte {:02X} (INS {:02X})", pb, ins);
            if is_sw1(pb) {
                match transport.read_byte(timeout_ms) {
                    Ok(sw2) => debug!("card answered {:02X}{:02X} in place of INS", pb, sw2),
                    Err(e) => trace!("no SW2 after {:02X}: {}", pb, e),
                }
            }
            transport.flush_input()?;
            return Err(Error::ProtocolViolation {
                expected: ins,
                actual: pb,
            });
        }
        trace!("procedure byte: NULL");
    }
}

/// SW1 may be preceded by further NULL bytes; SW2 follows SW1 directly.
fn read_status_word(transport: &mut dyn Transport, timeout_ms: u64) -> Result<StatusWord> {
    let sw1 = loop {
        let b = transport.read_byte(timeout_ms)?;
        if b != NULL_PROCEDURE_BYTE {
            break b;
        }
    };
    let sw2 = transport.read_byte(timeout_ms)?;
    Ok(StatusWord::new(sw1, sw2))
}

/// Run one T=0 command/response exchange.
///
/// Every byte read is bounded by `timeout_ms`; a timeout aborts the
/// exchange with `Error::Timeout` and nothing is retried here.
pub fn exchange(
    transport: &mut dyn Transport,
    cmd: &ApduCommand,
    timeout_ms: u64,
) -> Result<ApduResponse> {
    let header = cmd.header();
    debug!("CM: {}", cmd.to_hex());

    for &b in &header {
        write_echoed(transport, b, timeout_ms)?;
    }

    await_procedure_byte(transport, header[1], timeout_ms)?;

    let data = match cmd.direction() {
        Direction::CardToTerminal(len) => {
            let mut data = Vec::with_capacity(len as usize);
            for _ in 0..len {
                data.push(transport.read_byte(timeout_ms)?);
            }
            data
        }
        Direction::TerminalToCard => {
            for &b in cmd.body() {
                write_echoed(transport, b, timeout_ms)?;
            }
            Vec::new()
        }
    };

    if !data.is_empty() {
        trace!("RD: {}", bytes_to_hex_spaced(&data));
    }
    let status = read_status_word(transport, timeout_ms)?;
    debug!("SW: {}", status);

    Ok(ApduResponse::new(data, status))
}
