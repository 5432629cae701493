// gsmsim-rs/gsmsim/src/codec/mod.rs

pub mod gsm338;
pub mod semi_octet;
pub mod septet;

pub use gsm338::{gsm338_to_text, text_to_gsm338};
pub use semi_octet::{gsm_to_phone, phone_to_gsm, semi_octets_to_digits, swap_nibbles};
pub use septet::{pack_7bit, packed_len, unpack_7bit};

/// Decode packed 7-bit user data straight to text.
pub fn decode_packed_text(octets: &[u8], septet_count: usize) -> String {
    gsm338_to_text(&unpack_7bit(octets, septet_count))
}

/// Encode text as packed 7-bit GSM data; returns the octets and the
/// septet count.
pub fn encode_packed_text(text: &str) -> crate::Result<(Vec<u8>, usize)> {
    let septets = text_to_gsm338(text)?;
    Ok((pack_7bit(&septets), septets.len()))
}
