use gsmsim::protocol::{ApduCommand, Instruction, StatusWord, exchange};
use gsmsim::test_support::{CardScript, open_session};
use gsmsim::{Error, FileId};

use crate::common;

const SELECT_MF: [u8; 7] = [0xA0, 0xA4, 0x00, 0x00, 0x02, 0x3F, 0x00];

#[test]
fn null_bytes_before_procedure_byte_are_waited_out() {
    common::init_logging();
    let mut line = CardScript::new()
        .nulls(3)
        .raw(&[0xA4])
        .raw(&[0x9F, 0x17])
        .build();

    let cmd = ApduCommand::from_hex("A0A40000023F00").unwrap();
    let resp = exchange(&mut line, &cmd, 100).unwrap();

    assert!(resp.data.is_empty());
    assert_eq!(resp.status, StatusWord::DIRECTORY_SELECTED);
    assert_eq!(line.written, SELECT_MF.to_vec());
    assert_eq!(line.remaining(), 0);
}

#[test]
fn null_bytes_before_status_word_are_skipped() {
    let mut line = CardScript::new()
        .raw(&[0xB0, 0x12, 0x34])
        .nulls(2)
        .raw(&[0x90, 0x00])
        .build();

    let cmd = ApduCommand::new(Instruction::ReadBinary, 0x00, 0x00, 2);
    let resp = exchange(&mut line, &cmd, 100).unwrap();
    assert_eq!(resp.data, vec![0x12, 0x34]);
    assert!(resp.is_success());
}

#[test]
fn unexpected_procedure_byte_is_a_violation() {
    let mut line = CardScript::new().raw(&[0x6C, 0x00]).build();
    let cmd = ApduCommand::from_hex("A0A40000023F00").unwrap();

    match exchange(&mut line, &cmd, 100) {
        Err(Error::ProtocolViolation { expected, actual }) => {
            assert_eq!(expected, 0xA4);
            assert_eq!(actual, 0x6C);
        }
        other => panic!("expected protocol violation, got {:?}", other),
    }
    // the body is never sent after a violation
    assert_eq!(line.written, SELECT_MF[..5].to_vec());
    assert_eq!(line.remaining(), 0);
}

#[test]
fn retry_after_refused_command_succeeds() {
    common::init_logging();
    let script = CardScript::new()
        .raw(&[0x6E, 0x00])
        .reply(Instruction::Select, &[], StatusWord::DIRECTORY_SELECTED);
    let (mut session, _line) = open_session(script).unwrap();

    let cmd = ApduCommand::from_hex("A0A40000023F00").unwrap();
    match session.exchange(&cmd) {
        Err(Error::ProtocolViolation { expected, actual }) => {
            assert_eq!(expected, 0xA4);
            assert_eq!(actual, 0x6E);
        }
        other => panic!("expected protocol violation, got {:?}", other),
    }

    let resp = session.exchange(&cmd).unwrap();
    assert_eq!(resp.status, StatusWord::DIRECTORY_SELECTED);
}

#[test]
fn silence_mid_exchange_is_timeout() {
    let mut line = CardScript::new().raw(&[0xB0, 0x12]).silence().build();
    let cmd = ApduCommand::new(Instruction::ReadBinary, 0x00, 0x00, 4);
    assert!(matches!(exchange(&mut line, &cmd, 100), Err(Error::Timeout)));
}

#[test]
fn status_word_is_not_checked_by_exchange() {
    let mut line = CardScript::new().raw(&[0xA4, 0x94, 0x04]).build();
    let cmd = ApduCommand::from_hex("A0A40000026F99").unwrap();
    let resp = exchange(&mut line, &cmd, 100).unwrap();
    assert_eq!(resp.status, StatusWord::FILE_NOT_FOUND);
    assert!(!resp.is_success());
}

#[test]
fn session_select_path_tracks_directories() {
    let script = CardScript::new()
        .reply(Instruction::Select, &[], StatusWord::DIRECTORY_SELECTED)
        .nulls(1)
        .reply(Instruction::Select, &[], StatusWord::DIRECTORY_SELECTED)
        .reply(Instruction::Select, &[], StatusWord::FILE_SELECTED);
    let (mut session, line) = open_session(script).unwrap();

    let sw = session
        .select_path(&[FileId::Mf, FileId::DfTelecom, FileId::EfAdn])
        .unwrap();
    assert_eq!(sw, StatusWord::FILE_SELECTED);
    assert_eq!(
        session.state().selected_path,
        vec![FileId::Mf, FileId::DfTelecom, FileId::EfAdn]
    );
    assert_eq!(line.written().len(), 21);
    assert_eq!(&line.written()[..7], &SELECT_MF);
}
