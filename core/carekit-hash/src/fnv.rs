//! 64-bit FNV-1a.

/// FNV-1a 64-bit offset basis.
pub const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;

/// FNV 64-bit prime.
pub const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Hashes the UTF-16 code units of `text`.
///
/// Each unit is XORed into the accumulator, which is then multiplied by
/// [`FNV_PRIME`] modulo 2^64. For ASCII text this equals byte-wise FNV-1a.
#[must_use]
pub fn fnv1a_64(text: &str) -> u64 {
    text.encode_utf16().fold(FNV_OFFSET_BASIS, |acc, unit| {
        (acc ^ u64::from(unit)).wrapping_mul(FNV_PRIME)
    })
}
