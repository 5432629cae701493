use gsmsim::Error;
use gsmsim::codec::{gsm_to_phone, phone_to_gsm, semi_octets_to_digits, swap_nibbles};
use proptest::prelude::*;

#[test]
fn international_number_roundtrip() {
    let encoded = phone_to_gsm("+38640123456").unwrap();
    assert_eq!(encoded, "918346103254F6");
    assert_eq!(gsm_to_phone(&encoded, true), "+38640123456");
}

#[test]
fn national_number_keeps_no_prefix() {
    let encoded = phone_to_gsm("0401234").unwrap();
    assert_eq!(encoded, "81401032F4");
    assert_eq!(gsm_to_phone(&encoded, true), "0401234");
}

#[test]
fn rejects_non_digits() {
    assert!(matches!(phone_to_gsm("12a4"), Err(Error::InvalidDigits(_))));
    assert!(matches!(phone_to_gsm("+"), Err(Error::InvalidDigits(_))));
    assert_eq!(phone_to_gsm("").unwrap(), "");
}

#[test]
fn iccid_digits() {
    let raw = [0x98, 0x94, 0x00, 0x10, 0x32, 0x54, 0x76, 0x98, 0x10, 0xF2];
    assert_eq!(semi_octets_to_digits(&raw), "8949000123456789012");
}

proptest! {
    #[test]
    fn nibble_swap_is_an_involution(digits in "[0-9]{0,20}") {
        let once = swap_nibbles(&digits, 'F');
        prop_assert_eq!(swap_nibbles(&once, 'F'), digits);
    }

    // digit pairs, optionally closed by one digit and an F filler
    #[test]
    fn filler_is_stripped_on_swap_back(s in "([0-9]{2}){0,10}([0-9]F)?") {
        let digits = s.trim_end_matches('F');
        let swapped = swap_nibbles(&s, 'F');
        prop_assert_eq!(&swapped, &swap_nibbles(digits, 'F'));
        prop_assert_eq!(swap_nibbles(&swapped, 'F'), digits);
        prop_assert_eq!(gsm_to_phone(&swapped, false), digits);
    }

    #[test]
    fn phone_roundtrip(digits in "[0-9]{1,20}", international in any::<bool>()) {
        let phone = if international { format!("+{}", digits) } else { digits };
        let encoded = phone_to_gsm(&phone).unwrap();
        prop_assert_eq!(gsm_to_phone(&encoded, true), phone);
    }
}
