// SPDX-FileCopyrightText: 2026 TriliTech <contact@trili.tech>
//
// SPDX-License-Identifier: MIT

//! Serialization of [crate::ast::Value]s into call-data bytes and back.
//!
//! The format packs every scalar into a 32-byte word and lays composites
//! out as a head region followed by a tail region, with byte offsets
//! linking the two. [encode] and [decode] are exact inverses on canonical
//! data; [encode_call] and [decode_call] add the 4-byte selector framing
//! used at call boundaries.

mod decode;
mod encode;
pub(crate) mod word;

pub use decode::*;
pub use encode::*;
