use gsmsim::protocol::{Instruction, StatusWord};
use gsmsim::test_support::{CardScript, SAMPLE_ATR, open_session};
use gsmsim::transport::mock::LineEvent;
use gsmsim::{Chv, FileId, SessionBuilder};

use crate::common::{self, fixtures};

#[test]
fn open_resets_line_and_refreshes_chv_state() {
    common::init_logging();
    let line = CardScript::new()
        .atr(&SAMPLE_ATR)
        // MF select, then STATUS for the mandatory part and the whole
        .reply(Instruction::Select, &[], StatusWord::DIRECTORY_SELECTED)
        .reply(Instruction::Status, &fixtures::mf_status(false, 2, 3)[..13], StatusWord::OK)
        .reply(Instruction::Status, &fixtures::mf_status(false, 2, 3), StatusWord::OK)
        // FDN probe
        .reply(Instruction::Select, &[], StatusWord::DIRECTORY_SELECTED)
        .reply(Instruction::Select, &[], StatusWord::DIRECTORY_SELECTED)
        .reply(Instruction::Select, &[], StatusWord::FILE_SELECTED)
        .shared();

    let session = SessionBuilder::new()
        .with_transport(Box::new(line.clone()))
        .reset_pulse_ms(0)
        .open()
        .unwrap();

    assert_eq!(
        line.events(),
        vec![
            LineEvent::AssertReset,
            LineEvent::FlushInput,
            LineEvent::ReleaseReset
        ]
    );
    let state = session.state();
    assert!(state.is_open);
    assert!(state.chv1_enabled);
    assert_eq!(state.tries_left(Chv::Chv1), 2);
    assert!(state.chv2_enabled);
    assert_eq!(state.tries_left(Chv::Chv2), 3);
    assert!(state.fdn_available);
    assert_eq!(line.remaining(), 0);
}

#[test]
fn open_still_succeeds_when_status_is_refused() -> anyhow::Result<()> {
    common::init_logging();
    let line = CardScript::new()
        .atr(&SAMPLE_ATR)
        .reply(Instruction::Select, &[], StatusWord::DIRECTORY_SELECTED)
        // STATUS answered with "instruction not supported"
        .raw(&[0x6D, 0x00])
        .reply(Instruction::ReadBinary, &[0x02], StatusWord::OK)
        .shared();

    let mut session = SessionBuilder::new()
        .with_transport(Box::new(line.clone()))
        .reset_pulse_ms(0)
        .open()?;
    assert!(session.state().is_open);
    assert!(!session.state().chv1_enabled);

    // the line is still in step for the next command
    let resp = session.exchange_hex("A0B0000001")?;
    assert_eq!(resp.data, vec![0x02]);
    assert_eq!(line.remaining(), 0);
    Ok(())
}

#[test]
fn close_clears_state_and_reopen_reads_a_new_atr() -> anyhow::Result<()> {
    let script = CardScript::new()
        .reply(Instruction::Select, &[], StatusWord::DIRECTORY_SELECTED)
        .atr(&[0x3B, 0x00]);
    let (mut session, line) = open_session(script)?;

    session.select(FileId::Mf)?;
    assert_eq!(session.state().selected_path, vec![FileId::Mf]);

    let closed = session.close();
    assert!(!closed.state().is_open);
    assert!(closed.state().selected_path.is_empty());

    let session = closed.open()?;
    assert!(session.state().is_open);
    assert_eq!(session.profile().raw(), vec![0x3B, 0x00]);
    assert_eq!(line.events().len(), 6);
    Ok(())
}

#[test]
fn raw_hex_exchange() -> anyhow::Result<()> {
    let script = CardScript::new().reply(Instruction::ReadBinary, &[0x02], StatusWord::OK);
    let (mut session, line) = open_session(script)?;

    let resp = session.exchange_hex("A0B0000001")?;
    assert_eq!(resp.data, vec![0x02]);
    assert_eq!(resp.data_hex(), "02");
    assert_eq!(line.written(), vec![0xA0, 0xB0, 0x00, 0x00, 0x01]);
    Ok(())
}
