// SPDX-FileCopyrightText: 2026 TriliTech <contact@trili.tech>
//
// SPDX-License-Identifier: MIT
#![warn(clippy::redundant_clone)]
#![warn(missing_docs)]
#![deny(clippy::disallowed_methods)]

//! # abi_codec -- contract ABI call data in Rust
//!
//! Encoder and decoder for the contract ABI call-data format: arguments are
//! laid out in 32-byte words, with statically-sized values placed directly
//! in the head of a block and dynamically-sized values reached through byte
//! offsets into its tail.
//!
//! The following parts of the ABI surface are deliberately not covered:
//!
//! - computing a function selector from a signature (selectors are inputs
//!   here, see [serializer::encode_call]);
//! - JSON interface descriptions;
//! - the non-standard packed encoding.
//!
//! # Usage
//!
//! The general pipeline is as follows: parse a type signature, build a value
//! of that shape, encode; decoding is the exact inverse.
//!
//! A signature such as `"(uint256,string)"` is parsed with [parser::parse]
//! into an [ast::Type] tree. [serializer::encode] takes such a type together
//! with an [ast::Value] of the same shape and produces the byte encoding;
//! [serializer::decode] is its exact inverse on everything the encoder
//! emits: word contents are validated strictly, while tail placement and
//! bytes trailing the outermost block are not re-checked.
//! [serializer::encode_call] and [serializer::decode_call]
//! additionally carry the four-byte selector that prefixes call data on
//! the wire.
//!
//! Values hold arbitrary-precision numerics: unsigned integers are
//! [num_bigint::BigUint], signed ones [num_bigint::BigInt], and fixed-point
//! numbers are exact rationals ([num_rational::BigRational]), so the full
//! range of the 256-bit types survives the round trip.
//!
//! ```
//! use abi_codec::{decode, encode, parse, Value};
//!
//! let ty = parse("(uint256,string)")?;
//! let value = Value::Tuple(vec![
//!     Value::uint(69u32),
//!     Value::String("dave".into()),
//! ]);
//!
//! let bytes = encode(&ty, &value)?;
//! // Two head words (the uint and the string offset), then the string's
//! // length word and its padded payload.
//! assert_eq!(bytes.len(), 4 * 32);
//! assert_eq!(decode(&ty, &bytes)?, value);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod ast;
pub mod parser;
pub mod serializer;

pub use ast::{Type, Value};
pub use parser::{parse, ParseError};
pub use serializer::{decode, decode_call, encode, encode_call, DecodeError, EncodeError};
