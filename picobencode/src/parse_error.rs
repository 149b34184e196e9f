// SPDX-License-Identifier: Apache-2.0

use crate::cursor;
use crate::int_parser::ConstParseIntegerError;

/// Errors that can occur during bencode decoding.
///
/// The first failure anywhere in the input ends the parse. Callbacks that
/// already ran are not undone, but the caller should treat any error as
/// "no usable output was produced".
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ParseError {
    /// The input violates the bencode grammar.
    InvalidData {
        /// What was wrong with the input.
        kind: InvalidDataKind,
        /// Byte offset of the token (or missing byte) that failed.
        position: usize,
    },
    /// A handler callback asked to stop.
    CanceledByUser {
        /// Byte offset just past the token whose callback stopped the parse.
        position: usize,
    },
    /// No handler was supplied.
    NoCallbacks,
    /// Reserved; never produced by the decoder.
    Unknown,
}

/// The specific grammar violation behind [`ParseError::InvalidData`].
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum InvalidDataKind {
    /// Input ended where another byte was required.
    UnexpectedEnd,
    /// A value started with a byte that is not `i`, `l`, `d` or a digit.
    UnexpectedByte(u8),
    /// The `e` closing an integer or the `:` after a length was not found.
    MissingTerminator,
    /// An integer or length literal was not a canonical decimal number.
    InvalidInteger(ConstParseIntegerError),
    /// A string declared more bytes than the input holds.
    Truncated,
    /// Lists and dictionaries were nested deeper than allowed.
    NestingTooDeep,
    /// A dictionary key was not strictly greater than the key before it.
    UnsortedKey,
}

/// Flat status code, one per top-level parse.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[repr(u8)]
pub enum ErrorCode {
    None = 0,
    InvalidData = 1,
    CanceledByUser = 2,
    NoCallbacks = 3,
    Unknown = 4,
}

impl ParseError {
    pub(crate) fn invalid(kind: InvalidDataKind, position: usize) -> Self {
        ParseError::InvalidData { kind, position }
    }

    /// The status code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ParseError::InvalidData { .. } => ErrorCode::InvalidData,
            ParseError::CanceledByUser { .. } => ErrorCode::CanceledByUser,
            ParseError::NoCallbacks => ErrorCode::NoCallbacks,
            ParseError::Unknown => ErrorCode::Unknown,
        }
    }

    /// Byte offset associated with the error, if any.
    pub fn position(&self) -> Option<usize> {
        match self {
            ParseError::InvalidData { position, .. }
            | ParseError::CanceledByUser { position } => Some(*position),
            ParseError::NoCallbacks | ParseError::Unknown => None,
        }
    }
}

impl<T> From<&Result<T, ParseError>> for ErrorCode {
    fn from(result: &Result<T, ParseError>) -> Self {
        match result {
            Ok(_) => ErrorCode::None,
            Err(e) => e.code(),
        }
    }
}

impl From<cursor::Error> for InvalidDataKind {
    fn from(err: cursor::Error) -> Self {
        match err {
            cursor::Error::ReachedEnd => InvalidDataKind::UnexpectedEnd,
            cursor::Error::InvalidSliceBounds => InvalidDataKind::Truncated,
        }
    }
}

impl From<ConstParseIntegerError> for InvalidDataKind {
    fn from(err: ConstParseIntegerError) -> Self {
        InvalidDataKind::InvalidInteger(err)
    }
}

impl core::fmt::Display for InvalidDataKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            InvalidDataKind::UnexpectedEnd => write!(f, "unexpected end of input"),
            InvalidDataKind::UnexpectedByte(b) if b.is_ascii_graphic() => {
                write!(f, "unexpected byte '{}'", *b as char)
            }
            InvalidDataKind::UnexpectedByte(b) => write!(f, "unexpected byte 0x{b:02x}"),
            InvalidDataKind::MissingTerminator => write!(f, "missing terminator"),
            InvalidDataKind::InvalidInteger(e) => write!(f, "invalid number: {e}"),
            InvalidDataKind::Truncated => write!(f, "string payload truncated"),
            InvalidDataKind::NestingTooDeep => write!(f, "nesting too deep"),
            InvalidDataKind::UnsortedKey => write!(f, "dictionary keys out of order"),
        }
    }
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParseError::InvalidData { kind, position } => {
                write!(f, "invalid data at byte {position}: {kind}")
            }
            ParseError::CanceledByUser { position } => {
                write!(f, "canceled by handler at byte {position}")
            }
            ParseError::NoCallbacks => write!(f, "no handler supplied"),
            ParseError::Unknown => write!(f, "unknown error"),
        }
    }
}

impl core::error::Error for ParseError {}
