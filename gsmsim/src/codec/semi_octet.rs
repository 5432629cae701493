// gsmsim-rs/gsmsim/src/codec/semi_octet.rs

//! Semi-octet (swapped BCD) digit strings as used for dialling numbers,
//! ICCIDs and SMS addresses.

use crate::{Error, Result};

/// Type-of-number/numbering-plan octet for international numbers.
pub const TON_INTERNATIONAL: &str = "91";
/// Type-of-number/numbering-plan octet for unknown/national numbers.
pub const TON_UNKNOWN: &str = "81";

fn swap_pairs(chars: &[char]) -> String {
    let mut out = String::with_capacity(chars.len() + 1);
    for pair in chars.chunks(2) {
        match pair {
            [hi, lo] => {
                out.push(*lo);
                out.push(*hi);
            }
            [single] => out.push(*single),
            _ => {}
        }
    }
    out
}

/// Swap the nibbles of each hex pair.
///
/// An odd-length input is padded with `pad` before swapping. When the
/// second-to-last nibble of the input is `pad`, the swapped result ends in
/// that pad and it is dropped: `"01396643721"` becomes `"1093663427F1"`.
pub fn swap_nibbles(hex: &str, pad: char) -> String {
    let mut chars: Vec<char> = hex.chars().collect();
    let strip = chars.len() >= 2 && chars[chars.len() - 2] == pad;
    if chars.len() % 2 != 0 {
        chars.push(pad);
    }
    let mut out = swap_pairs(&chars);
    if strip {
        out.pop();
    }
    out
}

/// Encode a dialling number as TON/NPI octet plus swapped digits, in hex.
///
/// A leading `+` selects the international TON (`91`), otherwise `81`.
/// An empty number encodes to an empty string.
pub fn phone_to_gsm(phone: &str) -> Result<String> {
    if phone.is_empty() {
        return Ok(String::new());
    }
    let (ton, digits) = match phone.strip_prefix('+') {
        Some(rest) => (TON_INTERNATIONAL, rest),
        None => (TON_UNKNOWN, phone),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::InvalidDigits(phone.to_string()));
    }

    let mut chars: Vec<char> = digits.chars().collect();
    if chars.len() % 2 != 0 {
        chars.push('F');
    }
    let mut out = String::from(ton);
    out.push_str(&swap_pairs(&chars));
    Ok(out)
}

/// Decode swapped digits back into a dialling number.
///
/// With `replace_ton_npi` the leading octet is taken as TON/NPI and
/// `91` turns into a `+` prefix. A trailing `F` filler nibble is dropped.
pub fn gsm_to_phone(hex: &str, replace_ton_npi: bool) -> String {
    if hex.is_empty() {
        return String::new();
    }
    let mut prefix = String::new();
    let mut digits = hex;
    if replace_ton_npi {
        if digits.get(..2) == Some(TON_INTERNATIONAL) {
            prefix.push('+');
        }
        digits = digits.get(2..).unwrap_or("");
    }

    let chars: Vec<char> = digits.chars().collect();
    let mut out = prefix;
    out.push_str(&swap_pairs(&chars));
    if out.ends_with(['F', 'f']) {
        out.pop();
    }
    out
}

/// Decode semi-octet bytes (no TON/NPI octet) into their digit string.
pub fn semi_octets_to_digits(bytes: &[u8]) -> String {
    gsm_to_phone(&crate::utils::bytes_to_hex(bytes), false)
}
