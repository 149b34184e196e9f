// SPDX-License-Identifier: Apache-2.0

//! A no-heap, SAX-style bencode decoder and encoder.
//!
//! [`Decoder`] walks one bencode value in a resident byte buffer and pushes
//! each token into a caller-defined [`Handler`], without building a tree.
//! [`Encoder`] writes bencode into a caller-supplied buffer.

#![cfg_attr(not(test), no_std)]

mod bitstack;
pub use bitstack::{ArrayBitStack, BitStack};

mod cursor;

mod int_parser;
pub use int_parser::ConstParseIntegerError;

mod parse_error;
pub use parse_error::{ErrorCode, InvalidDataKind, ParseError};

mod handler;
pub use handler::Handler;

mod options;
pub use options::{DecoderOptions, DEFAULT_MAX_DEPTH};

mod decoder;
pub use decoder::{parse, Decoder};

mod encoder;
pub use encoder::{EncodeError, Encoder};
