use gsmsim::protocol::{Instruction, StatusWord};
use gsmsim::test_support::{CardScript, open_session};
use gsmsim::{Chv, Error, Pin};

use crate::common;

fn pin(digits: &str) -> Pin {
    Pin::new(digits).unwrap()
}

#[test]
fn three_wrong_pins_block_without_a_fourth_command() {
    common::init_logging();
    let script = CardScript::new()
        .reply(Instruction::VerifyChv, &[], StatusWord::CHV_MISMATCH)
        .reply(Instruction::VerifyChv, &[], StatusWord::CHV_MISMATCH)
        .reply(Instruction::VerifyChv, &[], StatusWord::CHV_MISMATCH);
    let (mut session, line) = open_session(script).unwrap();
    let wrong = pin("0000");

    for left in [2, 1, 0] {
        let sw = session.verify_chv(Chv::Chv1, &wrong).unwrap();
        assert_eq!(sw, StatusWord::CHV_MISMATCH);
        assert_eq!(session.state().tries_left(Chv::Chv1), left);
    }
    let sent = line.written().len();
    assert_eq!(sent, 3 * 13);

    assert!(matches!(
        session.verify_chv(Chv::Chv1, &wrong),
        Err(Error::PinBlocked(Chv::Chv1))
    ));
    assert_eq!(line.written().len(), sent);
    assert!(session.state().is_blocked(Chv::Chv1));
}

#[test]
fn correct_pin_restores_counter() {
    let script = CardScript::new()
        .reply(Instruction::VerifyChv, &[], StatusWord::CHV_MISMATCH)
        .reply(Instruction::VerifyChv, &[], StatusWord::OK);
    let (mut session, line) = open_session(script).unwrap();

    session.verify_chv(Chv::Chv1, &pin("1111")).unwrap();
    assert_eq!(session.state().tries_left(Chv::Chv1), 2);
    session.verify_chv(Chv::Chv1, &pin("1234")).unwrap();
    assert_eq!(session.state().tries_left(Chv::Chv1), 3);

    let written = line.written();
    assert_eq!(
        &written[13..],
        &[0xA0, 0x20, 0x00, 0x01, 0x08, 0x31, 0x32, 0x33, 0x34, 0xFF, 0xFF, 0xFF, 0xFF]
    );
}

#[test]
fn unblock_lifts_a_blocked_chv2() {
    let script = CardScript::new()
        .reply(Instruction::VerifyChv, &[], StatusWord::CHV_BLOCKED)
        .reply(Instruction::UnblockChv, &[], StatusWord::OK)
        .reply(Instruction::VerifyChv, &[], StatusWord::OK);
    let (mut session, line) = open_session(script).unwrap();

    session.verify_chv(Chv::Chv2, &pin("5678")).unwrap();
    assert!(session.state().is_blocked(Chv::Chv2));

    session
        .unblock_chv(Chv::Chv2, &pin("12345678"), &pin("8765"))
        .unwrap();
    assert_eq!(session.state().tries_left(Chv::Chv2), 3);
    // UNBLOCK CHV2 uses reference 02 in P2
    assert_eq!(&line.written()[13..18], &[0xA0, 0x2C, 0x00, 0x02, 0x10]);

    assert_eq!(
        session.verify_chv(Chv::Chv2, &pin("8765")).unwrap(),
        StatusWord::OK
    );
    assert_eq!(line.remaining(), 0);
}

#[test]
fn pin_format_is_checked() {
    assert!(matches!(Pin::new("12"), Err(Error::InvalidDigits(_))));
    assert!(matches!(Pin::new("123456789"), Err(Error::InvalidDigits(_))));
    assert!(matches!(Pin::new("12a4"), Err(Error::InvalidDigits(_))));
    assert_eq!(pin("1234").as_bytes(), &[0x31, 0x32, 0x33, 0x34, 0xFF, 0xFF, 0xFF, 0xFF]);
}
