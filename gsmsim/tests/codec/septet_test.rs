use gsmsim::codec::{
    decode_packed_text, encode_packed_text, gsm338_to_text, pack_7bit, packed_len, text_to_gsm338,
    unpack_7bit,
};
use gsmsim::Error;
use proptest::prelude::*;

#[test]
fn hello_packs_to_known_octets() {
    let (octets, n) = encode_packed_text("hello").unwrap();
    assert_eq!(n, 5);
    assert_eq!(hex::encode_upper(&octets), "E8329BFD06");
    assert_eq!(decode_packed_text(&octets, n), "hello");
}

#[test]
fn eight_septets_fill_seven_octets() {
    let septets = [0x41u8; 8];
    let packed = pack_7bit(&septets);
    assert_eq!(packed.len(), 7);
    assert_eq!(packed_len(8), 7);
    assert_eq!(unpack_7bit(&packed, 8), septets.to_vec());
}

#[test]
fn unmapped_character_is_reported() {
    assert!(matches!(
        text_to_gsm338("price: 5€"),
        Err(Error::UnmappedCharacter('€'))
    ));
}

#[test]
fn filler_ends_decoding() {
    assert_eq!(gsm338_to_text(&[0x48, 0x69, 0xFF, 0x41]), "Hi");
}

fn mapped_code_point() -> impl Strategy<Value = u8> {
    // 0x1B is the escape to the extension table and has no character
    (0u8..0x80).prop_filter("escape", |b| *b != 0x1B)
}

proptest! {
    #[test]
    fn septet_roundtrip(septets in proptest::collection::vec(0u8..0x80, 0..200)) {
        let packed = pack_7bit(&septets);
        prop_assert_eq!(packed.len(), packed_len(septets.len()));
        prop_assert_eq!(unpack_7bit(&packed, septets.len()), septets);
    }

    #[test]
    fn alphabet_roundtrip(codes in proptest::collection::vec(mapped_code_point(), 0..100)) {
        let text = gsm338_to_text(&codes);
        prop_assert_eq!(text_to_gsm338(&text).unwrap(), codes);
    }

    #[test]
    fn unpack_never_panics(octets in proptest::collection::vec(any::<u8>(), 0..64), count in 0usize..128) {
        let septets = unpack_7bit(&octets, count);
        prop_assert!(septets.len() <= count);
        prop_assert!(septets.iter().all(|s| *s < 0x80));
    }
}
