// SPDX-FileCopyrightText: 2026 TriliTech <contact@trili.tech>
//
// SPDX-License-Identifier: MIT

//! Parsing of textual type signatures into [Type] trees.
//!
//! The grammar, informally:
//!
//! ```text
//! type       ::= base suffix*
//! base       ::= elementary | "(" ")" | "(" type ("," type)* ")"
//! suffix     ::= "[" "]" | "[" digits "]"
//! elementary ::= "uint" digits? | "int" digits? | "bool" | "address"
//!              | "function" | "fixed" (digits "x" digits)?
//!              | "ufixed" (digits "x" digits)? | "bytes" digits? | "string"
//! ```
//!
//! Suffixes apply left-to-right, so the suffix nearest the base type is the
//! innermost dimension: `uint8[2][]` is a dynamic array of `uint8[2]`.
//! Signatures are ASCII with no whitespace. Widths and scales are validated
//! here, against the ranges documented on [Type], so a syntactically placed
//! but illegal width is reported as [ParseError::BitWidthOutOfRange] rather
//! than a generic syntax error.

use std::str::FromStr;

use crate::ast::{valid_bits, valid_scale, Type};

/// Errors raised while parsing a type signature.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The signature does not match the grammar.
    #[error("invalid type signature: {0}")]
    InvalidTypeSignature(String),
    /// A width, scale or fixed-bytes length is syntactically in place but
    /// outside the range defined for its type.
    #[error("width {0} is outside the defined range")]
    BitWidthOutOfRange(u64),
}

/// Parses a type signature, e.g. `(uint256,string)` or `bytes32[2]`.
pub fn parse(signature: &str) -> Result<Type, ParseError> {
    let mut cursor = Cursor::new(signature);
    let ty = parse_type(&mut cursor)?;
    match cursor.peek() {
        None => Ok(ty),
        Some(b) => Err(unexpected(b, cursor.at)),
    }
}

impl FromStr for Type {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Byte cursor over the signature with one byte of lookahead.
struct Cursor<'a> {
    bytes: &'a [u8],
    at: usize,
}

impl<'a> Cursor<'a> {
    fn new(signature: &'a str) -> Self {
        Cursor {
            bytes: signature.as_bytes(),
            at: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.at).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.at += 1;
        Some(b)
    }

    /// Consumes the longest run of ASCII lowercase letters.
    fn name(&mut self) -> &'a [u8] {
        let start = self.at;
        while self.peek().map_or(false, |b| b.is_ascii_lowercase()) {
            self.at += 1;
        }
        &self.bytes[start..self.at]
    }

    /// Consumes a decimal digit run; `Ok(None)` if the next byte is not a
    /// digit. A literal too large for `u64` can never be a legal width,
    /// scale or array length, so overflow is a parse error rather than a
    /// wrapped or saturated number.
    fn digits(&mut self) -> Result<Option<u64>, ParseError> {
        let start = self.at;
        let mut seen = false;
        let mut n = 0u64;
        while let Some(b @ b'0'..=b'9') = self.peek() {
            seen = true;
            self.at += 1;
            n = n
                .checked_mul(10)
                .and_then(|n| n.checked_add(u64::from(b - b'0')))
                .ok_or_else(|| {
                    ParseError::InvalidTypeSignature(format!(
                        "number at byte {start} is too large"
                    ))
                })?;
        }
        Ok(seen.then_some(n))
    }
}

fn unexpected(b: u8, at: usize) -> ParseError {
    ParseError::InvalidTypeSignature(format!(
        "unexpected character `{}` at byte {at}",
        b.escape_ascii()
    ))
}

fn expect(cursor: &mut Cursor, expected: u8) -> Result<(), ParseError> {
    match cursor.bump() {
        Some(b) if b == expected => Ok(()),
        Some(b) => Err(unexpected(b, cursor.at - 1)),
        None => Err(ParseError::InvalidTypeSignature(format!(
            "expected `{}`, but the signature ends",
            expected.escape_ascii()
        ))),
    }
}

fn parse_type(cursor: &mut Cursor) -> Result<Type, ParseError> {
    let base = if cursor.peek() == Some(b'(') {
        parse_tuple(cursor)?
    } else {
        parse_elementary(cursor)?
    };
    parse_suffixes(base, cursor)
}

fn parse_tuple(cursor: &mut Cursor) -> Result<Type, ParseError> {
    cursor.bump();
    if cursor.peek() == Some(b')') {
        cursor.bump();
        return Ok(Type::Tuple(vec![]));
    }
    let mut elements = vec![];
    loop {
        elements.push(parse_type(cursor)?);
        match cursor.bump() {
            Some(b',') => continue,
            Some(b')') => return Ok(Type::Tuple(elements)),
            Some(b) => return Err(unexpected(b, cursor.at - 1)),
            None => {
                return Err(ParseError::InvalidTypeSignature(
                    "unbalanced parentheses".into(),
                ))
            }
        }
    }
}

fn parse_elementary(cursor: &mut Cursor) -> Result<Type, ParseError> {
    let start = cursor.at;
    let name = cursor.name();
    match name {
        b"uint" => int_width(cursor, Type::Uint),
        b"int" => int_width(cursor, Type::Int),
        b"bool" => Ok(Type::Bool),
        b"address" => Ok(Type::Address),
        b"function" => Ok(Type::Function),
        b"fixed" => fixed_dims(cursor, Type::Fixed),
        b"ufixed" => fixed_dims(cursor, Type::Ufixed),
        b"bytes" => match cursor.digits()? {
            None => Ok(Type::Bytes),
            Some(len) if len <= 32 => Ok(Type::FixedBytes(len as usize)),
            Some(len) => Err(ParseError::BitWidthOutOfRange(len)),
        },
        b"string" => Ok(Type::String),
        b"" => Err(ParseError::InvalidTypeSignature(format!(
            "expected a type at byte {start}"
        ))),
        _ => Err(ParseError::InvalidTypeSignature(format!(
            "unknown type name `{}`",
            String::from_utf8_lossy(name)
        ))),
    }
}

/// Optional width after `uint`/`int`; no width is an alias for 256 bits.
fn int_width(
    cursor: &mut Cursor,
    make: impl Fn(u16) -> Type,
) -> Result<Type, ParseError> {
    match cursor.digits()? {
        None => Ok(make(256)),
        Some(bits) if valid_bits(bits) => Ok(make(bits as u16)),
        Some(bits) => Err(ParseError::BitWidthOutOfRange(bits)),
    }
}

/// Optional `<bits>x<scale>` after `fixed`/`ufixed`; no dimensions is an
/// alias for 128x18.
fn fixed_dims(
    cursor: &mut Cursor,
    make: impl Fn(u16, u8) -> Type,
) -> Result<Type, ParseError> {
    let Some(bits) = cursor.digits()? else {
        return Ok(make(128, 18));
    };
    if !valid_bits(bits) {
        return Err(ParseError::BitWidthOutOfRange(bits));
    }
    expect(cursor, b'x')?;
    match cursor.digits()? {
        Some(scale) if valid_scale(scale) => Ok(make(bits as u16, scale as u8)),
        Some(scale) => Err(ParseError::BitWidthOutOfRange(scale)),
        None => Err(ParseError::InvalidTypeSignature(
            "expected a scale after `x`".into(),
        )),
    }
}

fn parse_suffixes(
    mut ty: Type,
    cursor: &mut Cursor,
) -> Result<Type, ParseError> {
    while cursor.peek() == Some(b'[') {
        cursor.bump();
        match cursor.digits()? {
            Some(len) => {
                expect(cursor, b']')?;
                let len = usize::try_from(len).map_err(|_| {
                    ParseError::InvalidTypeSignature(format!(
                        "array length {len} is too large"
                    ))
                })?;
                ty = Type::new_fixed_array(ty, len);
            }
            None => {
                expect(cursor, b']')?;
                ty = Type::new_array(ty);
            }
        }
    }
    Ok(ty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[track_caller]
    fn check(signature: &str, expected: Type) {
        assert_eq!(parse(signature), Ok(expected), "parsing {signature}");
    }

    #[track_caller]
    fn check_err(signature: &str, expected: ParseError) {
        assert_eq!(parse(signature), Err(expected), "parsing {signature}");
    }

    #[test]
    fn elementary_names() {
        check("uint256", Type::Uint(256));
        check("uint8", Type::Uint(8));
        check("int16", Type::Int(16));
        check("bool", Type::Bool);
        check("address", Type::Address);
        check("function", Type::Function);
        check("fixed128x18", Type::Fixed(128, 18));
        check("ufixed8x1", Type::Ufixed(8, 1));
        check("fixed256x80", Type::Fixed(256, 80));
        check("bytes", Type::Bytes);
        check("bytes32", Type::FixedBytes(32));
        check("bytes1", Type::FixedBytes(1));
        check("bytes0", Type::FixedBytes(0));
        check("string", Type::String);
    }

    #[test]
    fn aliases_expand() {
        check("uint", Type::Uint(256));
        check("int", Type::Int(256));
        check("fixed", Type::Fixed(128, 18));
        check("ufixed", Type::Ufixed(128, 18));
    }

    #[test]
    fn width_out_of_range() {
        check_err("uint7", ParseError::BitWidthOutOfRange(7));
        check_err("uint0", ParseError::BitWidthOutOfRange(0));
        check_err("uint264", ParseError::BitWidthOutOfRange(264));
        check_err("int12", ParseError::BitWidthOutOfRange(12));
        check_err("bytes33", ParseError::BitWidthOutOfRange(33));
        check_err("fixed127x18", ParseError::BitWidthOutOfRange(127));
        check_err("fixed128x0", ParseError::BitWidthOutOfRange(0));
        check_err("fixed128x81", ParseError::BitWidthOutOfRange(81));
    }

    #[test]
    fn overflowing_literals_are_rejected() {
        // Larger than any u64, in both the width and the array-length
        // positions: a parse error, never a wrapped number.
        check_err(
            "uint99999999999999999999999999",
            ParseError::InvalidTypeSignature(
                "number at byte 4 is too large".into(),
            ),
        );
        check_err(
            "uint8[99999999999999999999999999]",
            ParseError::InvalidTypeSignature(
                "number at byte 6 is too large".into(),
            ),
        );
        check_err(
            "fixed128x99999999999999999999999999",
            ParseError::InvalidTypeSignature(
                "number at byte 9 is too large".into(),
            ),
        );
    }

    #[test]
    fn array_suffixes() {
        check("uint256[]", Type::new_array(Type::Uint(256)));
        check("uint256[3]", Type::new_fixed_array(Type::Uint(256), 3));
        check("uint256[0]", Type::new_fixed_array(Type::Uint(256), 0));
        check("bytes[2]", Type::new_fixed_array(Type::Bytes, 2));
        check(
            "string[][]",
            Type::new_array(Type::new_array(Type::String)),
        );
    }

    #[test]
    fn suffix_nesting_order() {
        // The suffix nearest the base type is the innermost dimension.
        check(
            "uint8[2][]",
            Type::new_array(Type::new_fixed_array(Type::Uint(8), 2)),
        );
        check(
            "uint8[][2]",
            Type::new_fixed_array(Type::new_array(Type::Uint(8)), 2),
        );
    }

    #[test]
    fn tuples() {
        check("()", Type::Tuple(vec![]));
        check("(uint256)", Type::Tuple(vec![Type::Uint(256)]));
        check(
            "(uint256,string)",
            Type::Tuple(vec![Type::Uint(256), Type::String]),
        );
        check(
            "((uint256,bool),string[2])",
            Type::Tuple(vec![
                Type::Tuple(vec![Type::Uint(256), Type::Bool]),
                Type::new_fixed_array(Type::String, 2),
            ]),
        );
        check(
            "(uint256,bool)[4]",
            Type::new_fixed_array(
                Type::Tuple(vec![Type::Uint(256), Type::Bool]),
                4,
            ),
        );
        check("(())", Type::Tuple(vec![Type::Tuple(vec![])]));
    }

    #[test]
    fn syntax_errors() {
        check_err(
            "",
            ParseError::InvalidTypeSignature("expected a type at byte 0".into()),
        );
        check_err(
            "dave",
            ParseError::InvalidTypeSignature("unknown type name `dave`".into()),
        );
        check_err(
            "fixedx",
            ParseError::InvalidTypeSignature("unknown type name `fixedx`".into()),
        );
        check_err(
            "uint256)",
            ParseError::InvalidTypeSignature(
                "unexpected character `)` at byte 7".into(),
            ),
        );
        check_err(
            "(uint256",
            ParseError::InvalidTypeSignature("unbalanced parentheses".into()),
        );
        check_err(
            "(uint256,)",
            ParseError::InvalidTypeSignature("expected a type at byte 9".into()),
        );
        check_err(
            "(uint256, string)",
            ParseError::InvalidTypeSignature("expected a type at byte 9".into()),
        );
        check_err(
            "uint256[",
            ParseError::InvalidTypeSignature(
                "expected `]`, but the signature ends".into(),
            ),
        );
        check_err(
            "uint256[x]",
            ParseError::InvalidTypeSignature(
                "unexpected character `x` at byte 8".into(),
            ),
        );
        check_err(
            "[3]",
            ParseError::InvalidTypeSignature("expected a type at byte 0".into()),
        );
        check_err(
            "bool8",
            ParseError::InvalidTypeSignature(
                "unexpected character `8` at byte 4".into(),
            ),
        );
        check_err(
            "fixed128",
            ParseError::InvalidTypeSignature(
                "expected `x`, but the signature ends".into(),
            ),
        );
        check_err(
            "fixed128x",
            ParseError::InvalidTypeSignature("expected a scale after `x`".into()),
        );
    }

    #[test]
    fn digit_quirks() {
        // Digits parse as plain decimal, so leading zeros are tolerated.
        check("uint0256", Type::Uint(256));
        check("bytes032", Type::FixedBytes(32));
        check("uint256[007]", Type::new_fixed_array(Type::Uint(256), 7));
    }

    #[test]
    fn display_parse_round_trip() {
        for signature in [
            "uint256",
            "int8",
            "bool",
            "address",
            "function",
            "fixed128x18",
            "ufixed64x2",
            "bytes0",
            "bytes32",
            "bytes",
            "string",
            "uint256[]",
            "uint8[2][]",
            "()",
            "(uint256,string)",
            "((uint256,bool)[2],string[])",
        ] {
            let ty = parse(signature).unwrap();
            assert_eq!(ty.to_string(), signature);
            assert_eq!(parse(&ty.to_string()), Ok(ty));
        }
    }
}
