// gsmsim-rs/gsmsim/src/codec/septet.rs

//! GSM 03.38 septet packing: eight 7-bit characters fit in seven octets,
//! filled least significant bit first.

/// Number of octets needed to carry `septets` packed characters.
pub fn packed_len(septets: usize) -> usize {
    (septets * 7).div_ceil(8)
}

/// Pack 7-bit values. Only the low seven bits of each input are used.
pub fn pack_7bit(septets: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(packed_len(septets.len()));
    let mut acc: u32 = 0;
    let mut bits = 0u32;
    for &s in septets {
        acc |= ((s & 0x7F) as u32) << bits;
        bits += 7;
        while bits >= 8 {
            out.push(acc as u8);
            acc >>= 8;
            bits -= 8;
        }
    }
    if bits > 0 {
        out.push(acc as u8);
    }
    out
}

/// Unpack `septet_count` 7-bit values from packed octets.
///
/// Each octet yields one septet built from its low bits and the carry of the
/// previous octet; after every seventh octet the carry alone holds an eighth
/// septet. Output is truncated to `septet_count` and may be shorter when the
/// input runs out.
pub fn unpack_7bit(octets: &[u8], septet_count: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(septet_count + 1);
    let mut shift = 0u32;
    let mut mask: u8 = 0x7F;
    let mut carry: u16 = 0;

    for &c in octets {
        if out.len() >= septet_count {
            break;
        }
        let val = (((c & mask) as u16) << shift) | (carry >> (8 - shift));
        out.push((val & 0x7F) as u8);

        shift += 1;
        mask >>= 1;
        carry = c as u16;
        if shift == 7 {
            out.push((carry >> 1) as u8);
            shift = 0;
            mask = 0x7F;
            carry = 0;
        }
    }
    out.truncate(septet_count);
    out
}
