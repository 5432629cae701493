// gsmsim-rs/gsmsim/src/codec/gsm338.rs

//! GSM 03.38 default alphabet translation.
//!
//! ASCII `%`..`?`, `A`..`Z` and `a`..`z` share their code points with the
//! GSM alphabet. Everything else goes through the substitution table below.

use crate::{Error, Result};

/// Record filler; decoding stops here.
pub const FILLER: u8 = 0xFF;

/// Substitutions between GSM code points and characters.
pub const SUBSTITUTIONS: [(u8, char); 48] = [
    (0x00, '@'),
    (0x01, '£'),
    (0x02, '$'),
    (0x03, '¥'),
    (0x04, 'è'),
    (0x05, 'é'),
    (0x06, 'ù'),
    (0x07, 'ì'),
    (0x08, 'ò'),
    (0x09, 'Ç'),
    (0x0A, '\n'),
    (0x0B, 'Ø'),
    (0x0C, 'ø'),
    (0x0D, '\r'),
    (0x0E, 'Å'),
    (0x0F, 'å'),
    (0x10, 'Δ'),
    (0x11, '_'),
    (0x12, 'Φ'),
    (0x13, 'Γ'),
    (0x14, 'Λ'),
    (0x15, 'Ω'),
    (0x16, 'Π'),
    (0x17, 'Ψ'),
    (0x18, 'Σ'),
    (0x19, 'Θ'),
    (0x1A, 'Ξ'),
    (0x1C, 'Æ'),
    (0x1D, 'æ'),
    (0x1E, 'ß'),
    (0x1F, 'É'),
    (0x20, ' '),
    (0x21, '!'),
    (0x22, '"'),
    (0x23, '#'),
    (0x24, '¤'),
    (0x40, '¡'),
    (0x5B, 'Ä'),
    (0x5C, 'Ö'),
    (0x5D, 'Ñ'),
    (0x5E, 'Ü'),
    (0x5F, '§'),
    (0x60, '¿'),
    (0x7B, 'ä'),
    (0x7C, 'ö'),
    (0x7D, 'ñ'),
    (0x7E, 'ü'),
    (0x7F, 'à'),
];

const fn build_decode_table() -> [Option<char>; 128] {
    let mut table = [None; 128];
    let mut i = 0;
    while i < SUBSTITUTIONS.len() {
        let (code, ch) = SUBSTITUTIONS[i];
        table[code as usize] = Some(ch);
        i += 1;
    }
    table
}

static DECODE: [Option<char>; 128] = build_decode_table();

/// Code points shared with ASCII.
fn is_passthrough(c: u32) -> bool {
    (0x25..=0x3F).contains(&c) || (0x41..=0x5A).contains(&c) || (0x61..=0x7A).contains(&c)
}

fn encode_char(ch: char) -> Result<u8> {
    if is_passthrough(ch as u32) {
        return Ok(ch as u8);
    }
    SUBSTITUTIONS
        .iter()
        .find(|(_, c)| *c == ch)
        .map(|(code, _)| *code)
        .ok_or(Error::UnmappedCharacter(ch))
}

/// Encode text into GSM 03.38 code points (one byte per character).
pub fn text_to_gsm338(text: &str) -> Result<Vec<u8>> {
    text.chars().map(encode_char).collect()
}

/// Decode GSM 03.38 bytes into text.
///
/// Stops at the first `0xFF`. Bytes without a mapping pass through as the
/// Latin-1 character of the same value, so decoding never fails.
pub fn gsm338_to_text(bytes: &[u8]) -> String {
    bytes
        .iter()
        .take_while(|&&b| b != FILLER)
        .map(|&b| {
            if is_passthrough(b as u32) {
                return b as char;
            }
            DECODE
                .get(b as usize)
                .copied()
                .flatten()
                .unwrap_or(b as char)
        })
        .collect()
}
