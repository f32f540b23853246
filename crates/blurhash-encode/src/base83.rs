//! Base83 text encoding used by the BlurHash format.
//!
//! Values are written as fixed-width digit strings, most significant digit
//! first, over an 83-character alphabet that is safe to embed in JSON and
//! URLs. Decoding is provided only for reading digits back, e.g. the size
//! flag of an existing hash.

use crate::error::BlurhashError;

/// The 83-character alphabet used by BlurHash base83 encoding.
pub const ALPHABET: &[u8; 83] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz#$%*+,-.:;=?@[]^_{|}~";

/// Lookup table mapping ASCII byte values to their base83 digit value.
/// Invalid characters map to `255`.
const fn build_decode_lut() -> [u8; 128] {
    let mut lut = [255u8; 128];
    let mut i = 0;
    while i < 83 {
        lut[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    lut
}

static DECODE_LUT: [u8; 128] = build_decode_lut();

/// Returns `true` if `ch` belongs to the base83 alphabet.
#[inline]
pub fn is_base83_char(ch: char) -> bool {
    ch.is_ascii() && DECODE_LUT[ch as usize] != 255
}

/// Append `value` to `out` as exactly `length` base83 digits.
///
/// # Errors
///
/// Returns [`BlurhashError::Base83Overflow`] if `value >= 83^length`. Nothing
/// is appended in that case.
pub fn encode_into(value: u64, length: usize, out: &mut String) -> Result<(), BlurhashError> {
    // 83^length is the first value that does not fit; past u64 every value fits.
    let limit = u32::try_from(length)
        .ok()
        .and_then(|len| 83u64.checked_pow(len));
    if limit.is_some_and(|limit| value >= limit) {
        return Err(BlurhashError::Base83Overflow { value, length });
    }

    out.reserve(length);
    for place in (0..length).rev() {
        // Places past 83^10 cannot be reached by a u64 and are always zero.
        let digit = match u32::try_from(place).ok().and_then(|p| 83u64.checked_pow(p)) {
            Some(divisor) => (value / divisor) % 83,
            None => 0,
        };
        out.push(ALPHABET[digit as usize] as char);
    }
    Ok(())
}

/// Encode an integer into a base83 string of the specified length.
///
/// # Errors
///
/// Returns [`BlurhashError::Base83Overflow`] if the value is too large to
/// be represented in the given number of digits.
///
/// # Examples
///
/// ```
/// use blurhash_encode::base83::encode;
/// assert_eq!(encode(0, 1).unwrap(), "0");
/// assert_eq!(encode(82, 1).unwrap(), "~");
/// assert_eq!(encode(83, 2).unwrap(), "10");
/// ```
pub fn encode(value: u64, length: usize) -> Result<String, BlurhashError> {
    let mut out = String::with_capacity(length);
    encode_into(value, length, &mut out)?;
    Ok(out)
}

/// Decode a base83 digit string into an integer.
///
/// # Errors
///
/// Returns [`BlurhashError::InvalidBase83Character`] if the string contains
/// a character not in the base83 alphabet, or
/// [`BlurhashError::Base83Overflow`] if the value exceeds `u64`.
///
/// # Examples
///
/// ```
/// use blurhash_encode::base83::decode;
/// assert_eq!(decode("0").unwrap(), 0);
/// assert_eq!(decode("~").unwrap(), 82);
/// ```
pub fn decode(digits: &str) -> Result<u64, BlurhashError> {
    let mut value: u64 = 0;
    for ch in digits.chars() {
        if !is_base83_char(ch) {
            return Err(BlurhashError::InvalidBase83Character(ch));
        }
        let digit = DECODE_LUT[ch as usize];
        value = value
            .checked_mul(83)
            .and_then(|v| v.checked_add(digit as u64))
            .ok_or(BlurhashError::Base83Overflow {
                value: u64::MAX,
                length: digits.len(),
            })?;
    }
    Ok(value)
}
