// SPDX-FileCopyrightText: 2026 TriliTech <contact@trili.tech>
//
// SPDX-License-Identifier: MIT

//! The decoder, exact inverse of the encoder on canonical data.
//!
//! Decoding is driven by the type tree alone: static children are read in
//! place at a running cursor, dynamic children through the offset word in
//! their head slot, relative to the enclosing block. Leaves are validated
//! strictly (integer range, the boolean word, every mandated zero-padding
//! run, UTF-8), and offsets must land inside their block at or after the
//! head region. Tail order, gaps between tails and trailing bytes beyond
//! the outermost block are canonicality properties of encoders; they are
//! accepted here, not validated.

use num_bigint::{BigInt, BigUint};
use num_rational::BigRational;
use primitive_types::H160;

use crate::ast::{Type, Value};
use crate::serializer::word::{self, WORD_SIZE};

/// Errors raised when a buffer is not a valid encoding of the given type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The buffer ends before the data its type requires.
    #[error("expected more data, but the buffer ends early")]
    UnexpectedEnd,
    /// A count or offset word exceeds the addressable range.
    #[error("count or offset word exceeds the addressable range")]
    OversizedWord,
    /// An offset word points outside its enclosing block.
    #[error("offset {offset} points outside its block of {block_len} bytes")]
    OffsetOutOfBounds {
        /// The decoded offset.
        offset: usize,
        /// Length of the block it must land in.
        block_len: usize,
    },
    /// An offset word points backward into the head region of its block.
    #[error("offset {offset} points into the {head_len}-byte head region")]
    OffsetIntoHead {
        /// The decoded offset.
        offset: usize,
        /// Length of the block's head region.
        head_len: usize,
    },
    /// An unsigned integer word is out of range for its declared width.
    #[error("word is not a canonical uint{0}")]
    NonCanonicalUint(u16),
    /// A signed integer word is not sign-extended for its declared width.
    #[error("word is not a canonical int{0}")]
    NonCanonicalInt(u16),
    /// A boolean word holds something other than 0 or 1.
    #[error("boolean word holds neither 0 nor 1")]
    InvalidBool,
    /// Padding bytes that must be zero are not.
    #[error("mandatory zero padding holds non-zero bytes")]
    NonZeroPadding,
    /// A `string` payload is not valid UTF-8.
    #[error("string payload is not valid UTF-8")]
    InvalidUtf8,
    /// Call data does not start with the expected selector.
    #[error("call data does not start with the expected selector")]
    SelectorMismatch,
    /// The type has no usable encoding: its widths or lengths fall outside
    /// the grammar's ranges, or its layout cannot exist on this target
    /// (arrays over zero-sized elements, static sizes past `usize`).
    #[error("type {0} has no defined encoding")]
    UnsupportedType(Type),
}

/// Decodes `bytes` as a value of type `ty`.
///
/// For every well-formed pair, `decode(t, &encode(t, v)?) == Ok(v)`.
/// Nothing is returned on failure; a partial decode is never observable.
pub fn decode(ty: &Type, bytes: &[u8]) -> Result<Value, DecodeError> {
    decode_at(ty, bytes, 0)
}

/// Decodes call data framed by a 4-byte selector.
///
/// The prefix must equal `selector`; the remainder decodes as `ty`.
pub fn decode_call(
    selector: [u8; 4],
    ty: &Type,
    bytes: &[u8],
) -> Result<Value, DecodeError> {
    let data = bytes.get(4..).ok_or(DecodeError::UnexpectedEnd)?;
    if bytes[..4] != selector {
        return Err(DecodeError::SelectorMismatch);
    }
    decode_at(ty, data, 0)
}

/// Decodes the value of `ty` whose encoding starts at byte `at` of
/// `block`.
///
/// Offsets inside a composite are relative to the composite's own block,
/// so composite arms re-slice `block` before recursing; `at` itself always
/// points into the current block's head region (or is an already validated
/// offset).
fn decode_at(ty: &Type, block: &[u8], at: usize) -> Result<Value, DecodeError> {
    if !ty.widths_in_range() {
        return Err(DecodeError::UnsupportedType(ty.clone()));
    }
    match ty {
        Type::Uint(bits) => {
            let n = BigUint::from_bytes_be(word_at(block, at)?);
            if !word::uint_fits(&n, *bits) {
                return Err(DecodeError::NonCanonicalUint(*bits));
            }
            Ok(Value::Uint(n))
        }
        Type::Int(bits) => {
            let n = BigInt::from_signed_bytes_be(word_at(block, at)?);
            if !word::int_fits(&n, *bits) {
                return Err(DecodeError::NonCanonicalInt(*bits));
            }
            Ok(Value::Int(n))
        }
        Type::Bool => {
            let word = word_at(block, at)?;
            if word[..WORD_SIZE - 1].iter().any(|b| *b != 0) {
                return Err(DecodeError::NonZeroPadding);
            }
            match word[WORD_SIZE - 1] {
                0 => Ok(Value::Bool(false)),
                1 => Ok(Value::Bool(true)),
                _ => Err(DecodeError::InvalidBool),
            }
        }
        Type::Address => {
            let word = word_at(block, at)?;
            if word[..12].iter().any(|b| *b != 0) {
                return Err(DecodeError::NonZeroPadding);
            }
            Ok(Value::Address(H160::from_slice(&word[12..])))
        }
        Type::Function => {
            let word = word_at(block, at)?;
            if word[24..].iter().any(|b| *b != 0) {
                return Err(DecodeError::NonZeroPadding);
            }
            let mut selector = [0; 4];
            selector.copy_from_slice(&word[20..24]);
            Ok(Value::Function(H160::from_slice(&word[..20]), selector))
        }
        Type::Fixed(bits, scale) => {
            let mantissa = BigInt::from_signed_bytes_be(word_at(block, at)?);
            if !word::int_fits(&mantissa, *bits) {
                return Err(DecodeError::NonCanonicalInt(*bits));
            }
            Ok(Value::Fixed(BigRational::new(
                mantissa,
                word::ten_pow(*scale),
            )))
        }
        Type::Ufixed(bits, scale) => {
            let mantissa = BigUint::from_bytes_be(word_at(block, at)?);
            if !word::uint_fits(&mantissa, *bits) {
                return Err(DecodeError::NonCanonicalUint(*bits));
            }
            Ok(Value::Ufixed(BigRational::new(
                mantissa.into(),
                word::ten_pow(*scale),
            )))
        }
        Type::FixedBytes(len) => {
            let word = word_at(block, at)?;
            if word[*len..].iter().any(|b| *b != 0) {
                return Err(DecodeError::NonZeroPadding);
            }
            Ok(Value::FixedBytes(word[..*len].to_vec()))
        }
        Type::Bytes => Ok(Value::Bytes(padded_payload(block, at)?.to_vec())),
        Type::String => {
            let payload = padded_payload(block, at)?;
            match std::str::from_utf8(payload) {
                Ok(text) => Ok(Value::String(text.to_string())),
                Err(_) => Err(DecodeError::InvalidUtf8),
            }
        }
        Type::Array(element) => {
            if element.is_zero_sized() {
                return Err(DecodeError::UnsupportedType(ty.clone()));
            }
            let len = count_word(block, at)?;
            // The element block starts right after the count word.
            let inner = block
                .get(at + WORD_SIZE..)
                .ok_or(DecodeError::UnexpectedEnd)?;
            // One multiplication bounds the whole head region, however
            // large the claimed count.
            let head = element
                .head_size()
                .ok_or_else(|| DecodeError::UnsupportedType(ty.clone()))?;
            let head_len =
                head.checked_mul(len).ok_or(DecodeError::OversizedWord)?;
            decode_block(
                std::iter::repeat(element.as_ref()).take(len),
                head_len,
                inner,
            )
            .map(Value::Array)
        }
        Type::FixedArray(element, len) => {
            if element.is_zero_sized() {
                return Err(DecodeError::UnsupportedType(ty.clone()));
            }
            let inner = block.get(at..).ok_or(DecodeError::UnexpectedEnd)?;
            let head_len = element
                .head_size()
                .and_then(|head| head.checked_mul(*len))
                .ok_or_else(|| DecodeError::UnsupportedType(ty.clone()))?;
            decode_block(
                std::iter::repeat(element.as_ref()).take(*len),
                head_len,
                inner,
            )
            .map(Value::Array)
        }
        Type::Tuple(types) => {
            let inner = block.get(at..).ok_or(DecodeError::UnexpectedEnd)?;
            // Arity is fixed by the signature, so this fold is not count
            // driven.
            let head_len = types.iter().try_fold(0usize, |sum, member| {
                member
                    .head_size()
                    .and_then(|head| sum.checked_add(head))
                    .ok_or_else(|| DecodeError::UnsupportedType(member.clone()))
            })?;
            decode_block(types.iter(), head_len, inner).map(Value::Tuple)
        }
    }
}

/// Decodes an ordered block of children laid out as heads then tails.
///
/// `block` starts at the head region; the caller has already consumed any
/// count word and computed `head_len`, the combined width of every head
/// slot, without walking the children. Static children decode in place at
/// the running cursor; dynamic children decode at the offset their head
/// word carries, measured from the start of `block`.
fn decode_block<'a>(
    types: impl Iterator<Item = &'a Type>,
    head_len: usize,
    block: &[u8],
) -> Result<Vec<Value>, DecodeError> {
    if head_len > block.len() {
        return Err(DecodeError::UnexpectedEnd);
    }
    // No pre-allocation from the (untrusted) element count.
    let mut values = Vec::new();
    let mut at = 0;
    for ty in types {
        if ty.is_dynamic() {
            let offset = count_word(block, at)?;
            if offset > block.len() {
                return Err(DecodeError::OffsetOutOfBounds {
                    offset,
                    block_len: block.len(),
                });
            }
            if offset < head_len {
                return Err(DecodeError::OffsetIntoHead { offset, head_len });
            }
            values.push(decode_at(ty, block, offset)?);
            at += WORD_SIZE;
        } else {
            let size = ty
                .head_size()
                .ok_or_else(|| DecodeError::UnsupportedType(ty.clone()))?;
            values.push(decode_at(ty, block, at)?);
            at += size;
        }
    }
    Ok(values)
}

/// The 32-byte word at `at`.
fn word_at(block: &[u8], at: usize) -> Result<&[u8; WORD_SIZE], DecodeError> {
    let end = at.checked_add(WORD_SIZE).ok_or(DecodeError::UnexpectedEnd)?;
    let bytes = block.get(at..end).ok_or(DecodeError::UnexpectedEnd)?;
    bytes.try_into().map_err(|_| DecodeError::UnexpectedEnd)
}

/// Reads a count or offset word: a `uint256` that must fit in `usize`.
fn count_word(block: &[u8], at: usize) -> Result<usize, DecodeError> {
    let n = BigUint::from_bytes_be(word_at(block, at)?);
    usize::try_from(&n).map_err(|_| DecodeError::OversizedWord)
}

/// The length-prefixed payload at `at`: count word, payload, zero padding
/// up to the word boundary. Returns the payload slice.
fn padded_payload(block: &[u8], at: usize) -> Result<&[u8], DecodeError> {
    let len = count_word(block, at)?;
    let start = at + WORD_SIZE;
    let end = start.checked_add(len).ok_or(DecodeError::UnexpectedEnd)?;
    let payload = block.get(start..end).ok_or(DecodeError::UnexpectedEnd)?;
    let padding = block
        .get(end..end + word::pad_len(len))
        .ok_or(DecodeError::UnexpectedEnd)?;
    if padding.iter().any(|b| *b != 0) {
        return Err(DecodeError::NonZeroPadding);
    }
    Ok(payload)
}
