use gsmsim::Error;
use gsmsim::protocol::{ApduCommand, Direction, Instruction, StatusWord};

#[test]
fn command_from_hex_splits_header_and_body() {
    let cmd = ApduCommand::from_hex("A0 20 00 01 08 31 32 33 34 FF FF FF FF").unwrap();
    assert_eq!(cmd.instruction(), Instruction::VerifyChv);
    assert_eq!(cmd.header(), [0xA0, 0x20, 0x00, 0x01, 0x08]);
    assert_eq!(cmd.body().len(), 8);
    assert_eq!(cmd.direction(), Direction::TerminalToCard);
    assert_eq!(cmd.to_hex(), "A02000010831323334FFFFFFFF");
}

#[test]
fn read_command_has_no_body() {
    let cmd = ApduCommand::new(Instruction::ReadRecord, 0x01, 0x04, 0xB0);
    assert_eq!(cmd.direction(), Direction::CardToTerminal(0xB0));
    assert_eq!(cmd.encode(), vec![0xA0, 0xB2, 0x01, 0x04, 0xB0]);
}

#[test]
fn malformed_commands_are_rejected() {
    assert!(matches!(ApduCommand::from_hex("A0A4"), Err(Error::InvalidCommand(_))));
    assert!(matches!(ApduCommand::from_hex("A0A400000Z"), Err(Error::InvalidHex(_))));
    // P3 says two body bytes, one given
    assert!(ApduCommand::from_hex("A0A40000023F").is_err());
}

#[test]
fn status_word_display_and_length_hint() {
    let sw = StatusWord::from_u16(0x9F1A);
    assert_eq!(sw.to_string(), "9F1A");
    assert_eq!(sw.response_length(), Some(0x1A));
    assert!(sw.is_success());
    assert_eq!(StatusWord::OK.response_length(), None);
    assert!(matches!(
        StatusWord::CHV_MISMATCH.expect(StatusWord::OK),
        Err(Error::StatusWordMismatch { .. })
    ));
}
