// SPDX-FileCopyrightText: 2026 TriliTech <contact@trili.tech>
//
// SPDX-License-Identifier: MIT

//! Type and value trees for the ABI codec.
//!
//! [Type] describes the shape of a value as declared in a textual signature
//! like `(uint256,string)`; [Value] mirrors that shape and carries the data.
//! Both are plain owned trees: composite nodes exclusively own their
//! children, there are no cycles, and a tree never changes after
//! construction, so it can be shared read-only across any number of
//! concurrent encode and decode calls.

use std::fmt;

use num_bigint::{BigInt, BigUint};
use num_rational::BigRational;
use primitive_types::H160;

use crate::serializer::word::WORD_SIZE;

/// An ABI type, as produced by [crate::parser::parse].
///
/// The numeric payloads (widths, scales, lengths) are part of the type, not
/// the value: `uint8` and `uint256` are distinct types with distinct
/// encodings. Parsed trees always satisfy the range invariants listed per
/// variant; hand-built trees that violate them are reported as
/// unsupported by the codec rather than encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// `uint<bits>`, big-endian unsigned; `bits` a multiple of 8 in
    /// `[8, 256]`. Bare `uint` parses as `uint256`.
    Uint(u16),
    /// `int<bits>`, two's complement; same width range as [Type::Uint].
    /// Bare `int` parses as `int256`.
    Int(u16),
    /// `bool`, one word holding 0 or 1.
    Bool,
    /// `address`, a 160-bit account identifier, laid out as `uint160`.
    Address,
    /// `function`, a 20-byte address followed by a 4-byte selector.
    Function,
    /// `fixed<bits>x<scale>`, a signed decimal scaled by `10^scale`;
    /// `scale` in `[1, 80]`. Bare `fixed` parses as `fixed128x18`.
    Fixed(u16, u8),
    /// `ufixed<bits>x<scale>`, the unsigned counterpart of [Type::Fixed].
    /// Bare `ufixed` parses as `ufixed128x18`.
    Ufixed(u16, u8),
    /// `bytes<len>`, a byte string of exactly `len` bytes, `len` in
    /// `[0, 32]`, right-padded into one word.
    FixedBytes(usize),
    /// `bytes`, a dynamic-length byte string.
    Bytes,
    /// `string`, dynamic-length UTF-8 text.
    String,
    /// `T[len]`, an array whose length is fixed by the type.
    FixedArray(Box<Type>, usize),
    /// `T[]`, an array whose length is carried in the encoding.
    Array(Box<Type>),
    /// `(T1,...,Tn)`, heterogeneous, arity fixed by the type.
    Tuple(Vec<Type>),
}

impl Type {
    /// Constructs a new [Type::Array] from the element type.
    pub fn new_array(element: Self) -> Self {
        Self::Array(Box::new(element))
    }

    /// Constructs a new [Type::FixedArray] from the element type and length.
    pub fn new_fixed_array(element: Self, len: usize) -> Self {
        Self::FixedArray(Box::new(element), len)
    }

    /// Whether the encoded size of this type depends on the value.
    ///
    /// Dynamic types occupy a single offset word in their parent's head
    /// region and place their payload in the tail; static types are encoded
    /// entirely in place.
    pub fn is_dynamic(&self) -> bool {
        match self {
            Type::Bytes | Type::String | Type::Array(_) => true,
            Type::FixedArray(element, _) => element.is_dynamic(),
            Type::Tuple(elements) => elements.iter().any(Type::is_dynamic),
            _ => false,
        }
    }

    /// Encoded byte length of a static type, `None` for a dynamic one.
    ///
    /// Always a multiple of the word size. Zero is possible: the empty
    /// tuple and zero-length arrays of static elements encode to nothing.
    /// `None` is also returned when the length overflows `usize`; such a
    /// type has no encodable values on this target, and the codecs report
    /// it as unsupported.
    pub fn fixed_size(&self) -> Option<usize> {
        match self {
            Type::Bytes | Type::String | Type::Array(_) => None,
            Type::FixedArray(element, len) => {
                element.fixed_size().and_then(|size| size.checked_mul(*len))
            }
            Type::Tuple(elements) => elements
                .iter()
                .try_fold(0usize, |sum, element| {
                    sum.checked_add(element.fixed_size()?)
                }),
            _ => Some(WORD_SIZE),
        }
    }

    /// Bytes this type occupies in its parent's head region: the full
    /// static size, or one offset word if dynamic. `None` under the same
    /// overflow condition as [Type::fixed_size].
    pub(crate) fn head_size(&self) -> Option<usize> {
        if self.is_dynamic() {
            Some(WORD_SIZE)
        } else {
            self.fixed_size()
        }
    }

    /// Whether values of this type encode to zero bytes, like `()` or
    /// `uint8[0]`. Arrays over such element types are refused by the
    /// codecs: their count words are backed by no bytes.
    pub(crate) fn is_zero_sized(&self) -> bool {
        self.fixed_size() == Some(0)
    }

    /// Whether the widths, scales and lengths of this node lie inside the
    /// ranges the grammar admits. Shallow: element types are checked where
    /// the codec visits them.
    pub(crate) fn widths_in_range(&self) -> bool {
        match *self {
            Type::Uint(bits) | Type::Int(bits) => valid_bits(bits as u64),
            Type::Fixed(bits, scale) | Type::Ufixed(bits, scale) => {
                valid_bits(bits as u64) && valid_scale(scale as u64)
            }
            Type::FixedBytes(len) => len <= WORD_SIZE,
            _ => true,
        }
    }
}

/// Whether `bits` is a legal integer width: a multiple of 8 in `[8, 256]`.
pub(crate) fn valid_bits(bits: u64) -> bool {
    (8..=256).contains(&bits) && bits % 8 == 0
}

/// Whether `scale` is a legal fixed-point decimal scale: in `[1, 80]`.
pub(crate) fn valid_scale(scale: u64) -> bool {
    (1..=80).contains(&scale)
}

impl fmt::Display for Type {
    /// Renders the canonical signature: aliases expanded, no whitespace.
    /// [crate::parser::parse] accepts the output and returns an equal tree.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Uint(bits) => write!(f, "uint{bits}"),
            Type::Int(bits) => write!(f, "int{bits}"),
            Type::Bool => f.write_str("bool"),
            Type::Address => f.write_str("address"),
            Type::Function => f.write_str("function"),
            Type::Fixed(bits, scale) => write!(f, "fixed{bits}x{scale}"),
            Type::Ufixed(bits, scale) => write!(f, "ufixed{bits}x{scale}"),
            Type::FixedBytes(len) => write!(f, "bytes{len}"),
            Type::Bytes => f.write_str("bytes"),
            Type::String => f.write_str("string"),
            Type::FixedArray(element, len) => write!(f, "{element}[{len}]"),
            Type::Array(element) => write!(f, "{element}[]"),
            Type::Tuple(elements) => {
                f.write_str("(")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{element}")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// A value shaped like some [Type].
///
/// Well-formedness with respect to a type (matching variant, range, arity)
/// is checked by [crate::serializer::encode], not by construction: a
/// `Value` on its own is just data. Both array kinds use [Value::Array];
/// the type distinguishes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Value of a [Type::Uint].
    Uint(BigUint),
    /// Value of a [Type::Int].
    Int(BigInt),
    /// Value of [Type::Bool].
    Bool(bool),
    /// Value of [Type::Address].
    Address(H160),
    /// Value of [Type::Function]: address and selector.
    Function(H160, [u8; 4]),
    /// Value of a [Type::Fixed]. Exact rational; the encoder rejects it
    /// unless `value * 10^scale` is an integer.
    Fixed(BigRational),
    /// Value of a [Type::Ufixed].
    Ufixed(BigRational),
    /// Value of a [Type::FixedBytes]; length must equal the type's.
    FixedBytes(Vec<u8>),
    /// Value of [Type::Bytes].
    Bytes(Vec<u8>),
    /// Value of [Type::String].
    String(String),
    /// Value of a [Type::FixedArray] or [Type::Array].
    Array(Vec<Value>),
    /// Value of a [Type::Tuple].
    Tuple(Vec<Value>),
}

impl Value {
    /// Constructs a [Value::Uint] from anything convertible to [BigUint].
    pub fn uint(n: impl Into<BigUint>) -> Self {
        Self::Uint(n.into())
    }

    /// Constructs a [Value::Int] from anything convertible to [BigInt].
    pub fn int(n: impl Into<BigInt>) -> Self {
        Self::Int(n.into())
    }
}
