use gsmsim::directory::DirectoryFile;
use gsmsim::protocol::{Instruction, StatusWord};
use gsmsim::test_support::{CardScript, ef_fci, open_session};
use gsmsim::{Error, FileId};

use crate::common::{self, fixtures};

fn select_ef(file: FileId, records: u16, record_len: u8) -> CardScript {
    CardScript::new()
        .reply(Instruction::Select, &[], StatusWord::DIRECTORY_SELECTED)
        .reply(Instruction::Select, &[], StatusWord::DIRECTORY_SELECTED)
        .reply(Instruction::Select, &[], StatusWord::FILE_SELECTED)
        .reply(
            Instruction::GetResponse,
            &ef_fci(file, records, record_len),
            StatusWord::OK,
        )
}

#[test]
fn phone_book_is_read_in_full() {
    common::init_logging();
    let script = select_ef(FileId::EfAdn, 4, fixtures::ADN_RECORD_LEN)
        .reply(
            Instruction::ReadRecord,
            &fixtures::adn_record("Alice", &[0x91, 0x83, 0x46, 0x10, 0x32, 0x54, 0xF6]),
            StatusWord::OK,
        )
        .reply(Instruction::ReadRecord, &fixtures::adn_empty(), StatusWord::OK)
        .reply(
            Instruction::ReadRecord,
            &fixtures::adn_record("Bob", &[0x81, 0x21, 0xF3]),
            StatusWord::OK,
        )
        .reply(Instruction::ReadRecord, &fixtures::adn_empty(), StatusWord::OK);
    let (mut session, line) = open_session(script).unwrap();

    let dir = session.read_directory(DirectoryFile::Adn).unwrap();
    assert_eq!(dir.record_len, fixtures::ADN_RECORD_LEN);
    assert_eq!(dir.entries.len(), 2);
    assert_eq!(dir.entries[&1].name, "Alice");
    assert_eq!(dir.entries[&1].number, "+38640123456");
    assert_eq!(dir.entries[&3].name, "Bob");
    assert_eq!(dir.entries[&3].number, "123");
    assert_eq!(dir.first_free_slot(), Some(2));
    assert_eq!(line.remaining(), 0);
}

#[test]
fn contact_write_then_read_back() {
    let name_len = fixtures::ADN_RECORD_LEN as usize - 14;
    let record = gsmsim::directory::encode_contact("Zoë", "+4420", name_len);
    // ë is not in the default alphabet
    assert!(matches!(record, Err(Error::UnmappedCharacter('ë'))));

    let record = gsmsim::directory::encode_contact("Zoe", "+4420", name_len).unwrap();
    let script = select_ef(FileId::EfAdn, 10, fixtures::ADN_RECORD_LEN)
        .reply(Instruction::UpdateRecord, &[], StatusWord::OK)
        .then(select_ef(FileId::EfAdn, 10, fixtures::ADN_RECORD_LEN))
        .reply(Instruction::ReadRecord, &record, StatusWord::OK);
    let (mut session, _line) = open_session(script).unwrap();

    let sw = session
        .write_contact(DirectoryFile::Adn, 7, "Zoe", "+4420")
        .unwrap();
    assert_eq!(sw, StatusWord::OK);

    session.directory_info(DirectoryFile::Adn).unwrap();
    let raw = session
        .read_record(7, gsmsim::RecordMode::Absolute, fixtures::ADN_RECORD_LEN)
        .unwrap();
    let (name, number) = gsmsim::directory::decode_contact(&raw.data, name_len).unwrap();
    assert_eq!((name.as_str(), number.as_str()), ("Zoe", "+4420"));
}

#[test]
fn sms_store_separates_messages_and_free_slots() {
    let script = select_ef(FileId::EfSms, 3, fixtures::SMS_RECORD_LEN)
        .reply(Instruction::ReadRecord, &fixtures::sms_free(), StatusWord::OK)
        .reply(
            Instruction::ReadRecord,
            &fixtures::sms_deliver(0x03, "Call me"),
            StatusWord::OK,
        )
        .reply(Instruction::ReadRecord, &fixtures::sms_free(), StatusWord::OK);
    let (mut session, line) = open_session(script).unwrap();

    let store = session.read_sms_store().unwrap();
    assert_eq!(store.messages.len(), 1);
    assert_eq!(store.messages[&2].message.text(), Some("Call me"));
    assert_eq!(store.messages[&2].sender, "+491701234567");
    assert_eq!(store.free_slots.iter().copied().collect::<Vec<_>>(), vec![1, 3]);
    assert!(store.unreadable.is_empty());
    assert_eq!(line.remaining(), 0);
}

#[test]
fn missing_file_reports_the_failing_element() {
    let script = CardScript::new()
        .reply(Instruction::Select, &[], StatusWord::DIRECTORY_SELECTED)
        .reply(Instruction::Select, &[], StatusWord::FILE_NOT_FOUND);
    let (mut session, _line) = open_session(script).unwrap();

    match session.read_directory(DirectoryFile::Msisdn) {
        Err(Error::SelectFailed { file, status }) => {
            assert_eq!(file, FileId::DfTelecom);
            assert_eq!(status, StatusWord::FILE_NOT_FOUND);
        }
        other => panic!("expected select failure, got {:?}", other),
    }
}
