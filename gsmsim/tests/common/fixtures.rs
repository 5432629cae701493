// fixtures.rs: card-side payloads shared by the integration tests

use gsmsim::codec::encode_packed_text;

pub const SMS_RECORD_LEN: u8 = 176;
pub const ADN_RECORD_LEN: u8 = 0x20;

/// MF STATUS response: mandatory part with the extra length at byte 12,
/// file characteristics at 13, CHV1 status at 18 and CHV2 status at 20.
pub fn mf_status(chv1_disabled: bool, chv1_tries: u8, chv2_tries: u8) -> Vec<u8> {
    let mut s = vec![
        0x00, 0x00, 0x1F, 0x40, 0x3F, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x09,
    ];
    s.push(if chv1_disabled { 0x80 } else { 0x00 });
    s.extend_from_slice(&[0x04, 0x00, 0x83, 0x8A]);
    s.push(0x80 | chv1_tries);
    s.push(0x8A);
    s.push(0x80 | chv2_tries);
    s.push(0x8A);
    s
}

/// SMS-DELIVER record from `+491701234567`, GSM 7-bit text, sent
/// 2019-12-24 18:30:00 UTC+01:00.
pub fn sms_deliver(status: u8, text: &str) -> Vec<u8> {
    let (ud, septets) = encode_packed_text(text).unwrap();
    let mut r = vec![status];
    // SMSC +4917
    r.extend_from_slice(&[0x03, 0x91, 0x94, 0x71]);
    r.push(0x04);
    r.extend_from_slice(&[0x0C, 0x91, 0x94, 0x71, 0x10, 0x32, 0x54, 0x76]);
    r.push(0x00);
    r.push(0x00);
    r.extend_from_slice(&[0x91, 0x21, 0x42, 0x81, 0x03, 0x00, 0x40]);
    r.push(septets as u8);
    r.extend_from_slice(&ud);
    r.resize(SMS_RECORD_LEN as usize, 0xFF);
    r
}

/// Unused EF_SMS record.
pub fn sms_free() -> Vec<u8> {
    let mut r = vec![0x00];
    r.resize(SMS_RECORD_LEN as usize, 0xFF);
    r
}

/// ADN record with an alpha identifier padded to `ADN_RECORD_LEN - 14`.
pub fn adn_record(name: &str, bcd: &[u8]) -> Vec<u8> {
    let name_len = ADN_RECORD_LEN as usize - 14;
    let mut r = name.as_bytes().to_vec();
    r.resize(name_len, 0xFF);
    r.push(bcd.len() as u8);
    r.extend_from_slice(bcd);
    r.resize(ADN_RECORD_LEN as usize, 0xFF);
    r
}

pub fn adn_empty() -> Vec<u8> {
    vec![0xFF; ADN_RECORD_LEN as usize]
}
