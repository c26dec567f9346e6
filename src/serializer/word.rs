// SPDX-FileCopyrightText: 2026 TriliTech <contact@trili.tech>
//
// SPDX-License-Identifier: MIT

//! Word-level helpers shared by the encoder and the decoder: conversions
//! between 32-byte words and the numeric domain, the range predicates both
//! directions agree on, and padding arithmetic.

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Signed};

/// Size of the atomic encoding unit. Every scalar, offset and count
/// occupies exactly one word; every encoding is a whole number of words.
pub(crate) const WORD_SIZE: usize = 32;

/// Zero bytes needed to extend `len` bytes to a word boundary.
pub(crate) const fn pad_len(len: usize) -> usize {
    (WORD_SIZE - len % WORD_SIZE) % WORD_SIZE
}

/// `10^scale`, the denominator of a fixed-point type.
pub(crate) fn ten_pow(scale: u8) -> BigInt {
    BigInt::from(10).pow(u32::from(scale))
}

/// Whether `n` is representable as an unsigned integer of `bits` bits.
pub(crate) fn uint_fits(n: &BigUint, bits: u16) -> bool {
    n.bits() <= u64::from(bits)
}

/// Whether `n` is representable as a two's-complement integer of `bits`
/// bits, i.e. lies in `[-2^(bits-1), 2^(bits-1))`. `bits` must be nonzero.
pub(crate) fn int_fits(n: &BigInt, bits: u16) -> bool {
    let bound = BigInt::one() << usize::from(bits - 1);
    *n >= -&bound && *n < bound
}

/// Appends `n` as one big-endian, left-zero-padded word. `n` must fit in
/// 256 bits.
pub(crate) fn put_uint_word(n: &BigUint, out: &mut Vec<u8>) {
    let bytes = n.to_bytes_be();
    out.resize(out.len() + (WORD_SIZE - bytes.len()), 0);
    out.extend_from_slice(&bytes);
}

/// Appends `n` as one two's-complement word, sign-extended across all 32
/// bytes (`0xff` fill for negative values). `n` must fit in 256 bits
/// signed.
pub(crate) fn put_int_word(n: &BigInt, out: &mut Vec<u8>) {
    let bytes = n.to_signed_bytes_be();
    let fill = if n.is_negative() { 0xff } else { 0x00 };
    out.resize(out.len() + (WORD_SIZE - bytes.len()), fill);
    out.extend_from_slice(&bytes);
}

/// Appends a count or offset as one `uint256` word.
pub(crate) fn put_usize_word(n: usize, out: &mut Vec<u8>) {
    out.resize(out.len() + (WORD_SIZE - 8), 0);
    out.extend_from_slice(&(n as u64).to_be_bytes());
}

/// Appends `data` right-zero-padded to the next word boundary. Data that
/// is already word-aligned (including empty data) gets no padding.
pub(crate) fn put_padded_bytes(data: &[u8], out: &mut Vec<u8>) {
    out.extend_from_slice(data);
    out.resize(out.len() + pad_len(data.len()), 0);
}
