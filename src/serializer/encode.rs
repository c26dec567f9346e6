// SPDX-FileCopyrightText: 2026 TriliTech <contact@trili.tech>
//
// SPDX-License-Identifier: MIT

//! The head/tail encoder.
//!
//! A composite value is laid out as a fixed-size head region followed by a
//! tail region. A static child is encoded directly into the head, occupying
//! exactly its own static size. A dynamic child leaves a single offset word
//! in the head and appends its encoding to the tail; the offset is the byte
//! distance from the start of the enclosing block to that tail. Dynamic
//! arrays additionally prefix the whole block with their element count.
//!
//! Offsets resolve left-to-right: the offset of the i-th dynamic child is
//! the total head length plus the lengths of all tails emitted before it,
//! so a block can be produced in a single pass.

use num_bigint::BigInt;
use num_rational::BigRational;

use crate::ast::{Type, Value};
use crate::serializer::word;

/// Errors raised when a value cannot be encoded at its claimed type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// A numeric value does not fit the width, sign or scale of its type.
    #[error("value {0} is out of range for type {1}")]
    ValueOutOfRange(String, Type),
    /// An array, tuple or fixed-bytes value disagrees with the length fixed
    /// by its type.
    #[error("value has {actual} elements, but type {ty} expects {expected}")]
    LengthMismatch {
        /// The type whose length constraint is violated.
        ty: Type,
        /// Length fixed by the type.
        expected: usize,
        /// Length found in the value.
        actual: usize,
    },
    /// The value's variant does not mirror the type's.
    #[error("invalid value {0} for type {1}")]
    InvalidValueForType(String, Type),
    /// The type has no usable encoding: its widths or lengths fall outside
    /// the grammar's ranges, or its layout cannot exist on this target
    /// (arrays over zero-sized elements, static sizes past `usize`).
    #[error("type {0} has no defined encoding")]
    UnsupportedType(Type),
}

/// Encodes `value` at type `ty` into a fresh buffer.
///
/// Produces the canonical encoding: deterministic, all mandated padding
/// zero, tails in declaration order with no gaps, total length a multiple
/// of 32. Fails if the value's shape, ranges or lengths disagree with
/// `ty`; on failure nothing is returned, there are no partial results.
pub fn encode(ty: &Type, value: &Value) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::new();
    encode_value(ty, value, &mut out)?;
    Ok(out)
}

/// Encodes call data: the 4-byte selector followed by `encode(ty, value)`.
///
/// The selector is opaque input here; deriving it from a function
/// signature is the descriptor layer's business.
pub fn encode_call(
    selector: [u8; 4],
    ty: &Type,
    value: &Value,
) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::new();
    out.extend_from_slice(&selector);
    encode_value(ty, value, &mut out)?;
    Ok(out)
}

fn out_of_range(ty: &Type, value: &Value) -> EncodeError {
    EncodeError::ValueOutOfRange(format!("{value:?}"), ty.clone())
}

fn length_mismatch(ty: &Type, expected: usize, actual: usize) -> EncodeError {
    EncodeError::LengthMismatch {
        ty: ty.clone(),
        expected,
        actual,
    }
}

/// Appends the encoding of one (type, value) pair to `out`.
fn encode_value(
    ty: &Type,
    value: &Value,
    out: &mut Vec<u8>,
) -> Result<(), EncodeError> {
    if !ty.widths_in_range() {
        return Err(EncodeError::UnsupportedType(ty.clone()));
    }
    match (ty, value) {
        (Type::Uint(bits), Value::Uint(n)) => {
            if !word::uint_fits(n, *bits) {
                return Err(out_of_range(ty, value));
            }
            word::put_uint_word(n, out);
            Ok(())
        }
        (Type::Int(bits), Value::Int(n)) => {
            if !word::int_fits(n, *bits) {
                return Err(out_of_range(ty, value));
            }
            word::put_int_word(n, out);
            Ok(())
        }
        (Type::Bool, Value::Bool(b)) => {
            word::put_usize_word(usize::from(*b), out);
            Ok(())
        }
        (Type::Address, Value::Address(address)) => {
            // Laid out as uint160: 12 zero bytes, then the address.
            out.resize(out.len() + 12, 0);
            out.extend_from_slice(address.as_bytes());
            Ok(())
        }
        (Type::Function, Value::Function(address, selector)) => {
            // 20-byte address, 4-byte selector, zero tail.
            out.extend_from_slice(address.as_bytes());
            out.extend_from_slice(selector);
            out.resize(out.len() + 8, 0);
            Ok(())
        }
        (Type::Fixed(bits, scale), Value::Fixed(x)) => {
            match scaled_mantissa(x, *scale) {
                Some(mantissa) if word::int_fits(&mantissa, *bits) => {
                    word::put_int_word(&mantissa, out);
                    Ok(())
                }
                _ => Err(out_of_range(ty, value)),
            }
        }
        (Type::Ufixed(bits, scale), Value::Ufixed(x)) => {
            // A negative mantissa has no BigUint form and is rejected.
            match scaled_mantissa(x, *scale).and_then(|m| m.to_biguint()) {
                Some(mantissa) if word::uint_fits(&mantissa, *bits) => {
                    word::put_uint_word(&mantissa, out);
                    Ok(())
                }
                _ => Err(out_of_range(ty, value)),
            }
        }
        (Type::FixedBytes(len), Value::FixedBytes(data)) => {
            if data.len() != *len {
                return Err(length_mismatch(ty, *len, data.len()));
            }
            // One full word even for bytes0.
            out.extend_from_slice(data);
            out.resize(out.len() + (word::WORD_SIZE - data.len()), 0);
            Ok(())
        }
        (Type::Bytes, Value::Bytes(data)) => {
            put_len_prefixed(data, out);
            Ok(())
        }
        (Type::String, Value::String(text)) => {
            put_len_prefixed(text.as_bytes(), out);
            Ok(())
        }
        (Type::FixedArray(element, len), Value::Array(elements)) => {
            if element.is_zero_sized() {
                return Err(EncodeError::UnsupportedType(ty.clone()));
            }
            if elements.len() != *len {
                return Err(length_mismatch(ty, *len, elements.len()));
            }
            encode_block(ty, elements.iter().map(|v| (element.as_ref(), v)), out)
        }
        (Type::Array(element), Value::Array(elements)) => {
            if element.is_zero_sized() {
                return Err(EncodeError::UnsupportedType(ty.clone()));
            }
            word::put_usize_word(elements.len(), out);
            encode_block(ty, elements.iter().map(|v| (element.as_ref(), v)), out)
        }
        (Type::Tuple(types), Value::Tuple(values)) => {
            if values.len() != types.len() {
                return Err(length_mismatch(ty, types.len(), values.len()));
            }
            encode_block(ty, types.iter().zip(values), out)
        }
        (ty, value) => Err(EncodeError::InvalidValueForType(
            format!("{value:?}"),
            ty.clone(),
        )),
    }
}

/// Encodes an ordered block of children: heads in order, then the tails of
/// the dynamic children in the same order. Offsets are measured from the
/// start of this block, which the caller has already prefixed with any
/// count word. `ty` is the composite the block belongs to, reported when
/// its layout exceeds the address space.
fn encode_block<'a>(
    ty: &Type,
    children: impl Iterator<Item = (&'a Type, &'a Value)> + Clone,
    out: &mut Vec<u8>,
) -> Result<(), EncodeError> {
    let head_len = children.clone().try_fold(0usize, |sum, (child, _)| {
        child
            .head_size()
            .and_then(|head| sum.checked_add(head))
            .ok_or_else(|| EncodeError::UnsupportedType(child.clone()))
    })?;
    let mut tails = Vec::new();
    for (child, value) in children {
        if child.is_dynamic() {
            let offset = head_len
                .checked_add(tails.len())
                .ok_or_else(|| EncodeError::UnsupportedType(ty.clone()))?;
            word::put_usize_word(offset, out);
            encode_value(child, value, &mut tails)?;
        } else {
            encode_value(child, value, out)?;
        }
    }
    out.extend_from_slice(&tails);
    Ok(())
}

/// Length word, then the payload right-zero-padded to a word boundary.
fn put_len_prefixed(data: &[u8], out: &mut Vec<u8>) {
    word::put_usize_word(data.len(), out);
    word::put_padded_bytes(data, out);
}

/// `x * 10^scale`, if that is an exact integer.
fn scaled_mantissa(x: &BigRational, scale: u8) -> Option<BigInt> {
    let scaled = x * BigRational::from_integer(word::ten_pow(scale));
    scaled.is_integer().then(|| scaled.to_integer())
}
