//! Base-85 radix encoding using the RFC 1924 alphabet.
//!
//! Every binary value on the wire — keys, signatures, hash digests — travels
//! as base-85 text inside a [`CryptoString`][crate::cstring::CryptoString].
//! Data is processed in big-endian 4-byte groups, each emitted as 5 digits; a
//! trailing partial group of `n` bytes is emitted as `n + 1` digits. The
//! encoding is bijective, so decode rejects anything encode could not have
//! produced.

use crate::error::{Error, Result};

const ALPHABET: &[u8; 85] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz!#$%&()*+-;<=>?@^_`{|}~";

fn digit_value(ch: u8) -> Option<u64> {
    ALPHABET.iter().position(|&c| c == ch).map(|v| v as u64)
}

/// Encode a byte slice as base-85 text.
pub fn encode(data: &[u8]) -> String {
    let mut out = String::with_capacity((data.len() / 4 + 1) * 5);
    for group in data.chunks(4) {
        let mut accum: u32 = 0;
        for (i, byte) in group.iter().enumerate() {
            accum |= u32::from(*byte) << (24 - 8 * i);
        }

        let mut digits = [0u8; 5];
        let mut rem = accum;
        for slot in digits.iter_mut().rev() {
            *slot = (rem % 85) as u8;
            rem /= 85;
        }

        for &digit in digits.iter().take(group.len() + 1) {
            out.push(ALPHABET[digit as usize] as char);
        }
    }
    out
}

/// Decode base-85 text back into bytes. Any character outside the alphabet,
/// a trailing group of one digit, or a group that overflows its 32-bit word
/// is an error.
pub fn decode(encoded: &str) -> Result<Vec<u8>> {
    let bytes = encoded.as_bytes();
    let mut out = Vec::with_capacity(bytes.len() / 5 * 4 + 4);
    for group in bytes.chunks(5) {
        if group.len() < 2 {
            return Err(Error::CryptoStringDecode);
        }

        // Missing digits in a partial group decode as the maximum digit so
        // the leading bytes come out exact.
        let mut accum: u64 = 0;
        for i in 0..5 {
            let digit = match group.get(i) {
                Some(&ch) => digit_value(ch).ok_or(Error::CryptoStringDecode)?,
                None => 84,
            };
            accum = accum * 85 + digit;
        }
        if accum > u64::from(u32::MAX) {
            return Err(Error::CryptoStringDecode);
        }

        let word = (accum as u32).to_be_bytes();
        out.extend_from_slice(&word[..group.len() - 1]);
    }
    Ok(out)
}
