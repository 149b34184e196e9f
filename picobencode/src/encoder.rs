// SPDX-License-Identifier: Apache-2.0

//! Bencode encoder writing into a caller-supplied buffer.
//!
//! The encoder is the inverse of the [`Decoder`](crate::Decoder): feeding it the
//! same sequence of calls a [`Handler`](crate::Handler) would receive produces
//! bytes that decode back to that sequence. It checks structure (balanced
//! containers, string keys, a single top-level value) but not dictionary key
//! order; keys are written in the order given.

use core::fmt::Write;

use log::debug;

use crate::bitstack::BitStack;

/// Container kind bit pushed on the bit stack.
const DICT: bool = true;
const LIST: bool = false;

/// Longest integer token: `i` + `-9223372036854775808` + `e`.
const MAX_INTEGER_TOKEN: usize = 22;
/// Longest string length prefix: 20 digits of `u64::MAX` plus `:`.
const MAX_LENGTH_PREFIX: usize = 21;

/// Errors that can occur while encoding.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum EncodeError {
    /// The output buffer has no room for the next token.
    BufferFull,
    /// A close call did not match the innermost open container.
    UnbalancedClose,
    /// A dictionary key position received something other than a string.
    KeyMustBeString,
    /// A dictionary was closed after a key with no value.
    MissingValue,
    /// `finish` was called with containers still open.
    Unclosed,
    /// A second top-level value was started.
    TrailingValue,
    /// Opening another container would exceed the bit stack capacity.
    TooDeep,
    /// `finish` was called before any value was written.
    Empty,
}

impl core::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl core::error::Error for EncodeError {}

/// A bencode encoder over a fixed output buffer.
///
/// Generic over BitStack storage type for configurable nesting depth: the
/// default `u32` allows 32 open containers, an
/// [`ArrayBitStack`](crate::ArrayBitStack) allows more.
///
/// # Example
/// ```
/// use picobencode::Encoder;
///
/// let mut buffer = [0u8; 64];
/// let mut encoder: Encoder = Encoder::new(&mut buffer);
/// encoder.dict_open().unwrap();
/// encoder.string(b"cow").unwrap();
/// encoder.string(b"moo").unwrap();
/// encoder.string(b"n").unwrap();
/// encoder.integer(-3).unwrap();
/// encoder.dict_close().unwrap();
/// assert_eq!(encoder.finish().unwrap(), b"d3:cow3:moo1:ni-3ee");
/// ```
pub struct Encoder<'buf, S: BitStack = u32> {
    buffer: &'buf mut [u8],
    len: usize,
    /// Open container kinds, innermost on top.
    containers: S,
    depth: usize,
    /// Innermost dictionary has a key written and waits for its value.
    awaiting_value: bool,
    /// A complete top-level value has been written.
    root_written: bool,
}

impl<'buf, S: BitStack> Encoder<'buf, S> {
    /// Creates an encoder writing from the start of `buffer`.
    pub fn new(buffer: &'buf mut [u8]) -> Self {
        Self {
            buffer,
            len: 0,
            containers: S::default(),
            depth: 0,
            awaiting_value: false,
            root_written: false,
        }
    }

    /// Bytes written so far.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of containers currently open.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Writes `i<value>e`.
    pub fn integer(&mut self, value: i64) -> Result<(), EncodeError> {
        self.check_value(false)?;
        let mut scratch = [0u8; MAX_INTEGER_TOKEN];
        let mut token = SliceWriter::new(&mut scratch);
        write!(token, "i{value}e").map_err(|_| EncodeError::BufferFull)?;
        self.commit(&[token.written()])?;
        self.value_written(false);
        Ok(())
    }

    /// Writes `<len>:<bytes>`, as a value or as a dictionary key.
    pub fn string(&mut self, bytes: &[u8]) -> Result<(), EncodeError> {
        let is_key = self.check_value(true)?;
        let mut scratch = [0u8; MAX_LENGTH_PREFIX];
        let mut prefix = SliceWriter::new(&mut scratch);
        write!(prefix, "{}:", bytes.len()).map_err(|_| EncodeError::BufferFull)?;
        self.commit(&[prefix.written(), bytes])?;
        self.value_written(is_key);
        Ok(())
    }

    pub fn list_open(&mut self) -> Result<(), EncodeError> {
        self.open(LIST, b"l")
    }

    pub fn list_close(&mut self) -> Result<(), EncodeError> {
        self.close(LIST)
    }

    pub fn dict_open(&mut self) -> Result<(), EncodeError> {
        self.open(DICT, b"d")
    }

    pub fn dict_close(&mut self) -> Result<(), EncodeError> {
        self.close(DICT)
    }

    /// Completes encoding and returns the encoded value.
    pub fn finish(self) -> Result<&'buf [u8], EncodeError> {
        if self.depth > 0 {
            debug!("bencode encoder finished with {} open containers", self.depth);
            return Err(EncodeError::Unclosed);
        }
        if !self.root_written {
            return Err(EncodeError::Empty);
        }
        let Encoder { buffer, len, .. } = self;
        let buffer: &'buf [u8] = buffer;
        Ok(&buffer[..len])
    }

    /// Validates that a value may start here. Returns whether it is a dictionary key.
    fn check_value(&self, is_string: bool) -> Result<bool, EncodeError> {
        if self.depth == 0 {
            if self.root_written {
                return Err(self.fail(EncodeError::TrailingValue));
            }
            return Ok(false);
        }
        if self.containers.top() == DICT && !self.awaiting_value {
            if !is_string {
                return Err(self.fail(EncodeError::KeyMustBeString));
            }
            return Ok(true);
        }
        Ok(false)
    }

    fn value_written(&mut self, is_key: bool) {
        if self.depth == 0 {
            self.root_written = true;
        } else if self.containers.top() == DICT {
            self.awaiting_value = is_key;
        }
    }

    fn open(&mut self, kind: bool, tag: &[u8]) -> Result<(), EncodeError> {
        self.check_value(false)?;
        if self.depth >= S::capacity() {
            return Err(self.fail(EncodeError::TooDeep));
        }
        self.commit(&[tag])?;
        self.containers.push(kind);
        self.depth += 1;
        self.awaiting_value = false;
        Ok(())
    }

    fn close(&mut self, kind: bool) -> Result<(), EncodeError> {
        if self.depth == 0 || self.containers.top() != kind {
            return Err(self.fail(EncodeError::UnbalancedClose));
        }
        if kind == DICT && self.awaiting_value {
            return Err(self.fail(EncodeError::MissingValue));
        }
        self.commit(&[&b"e"[..]])?;
        self.containers.pop();
        self.depth -= 1;
        // The closed container was a complete value of its parent
        self.value_written(false);
        Ok(())
    }

    /// Appends all parts, or nothing if they do not fit.
    fn commit(&mut self, parts: &[&[u8]]) -> Result<(), EncodeError> {
        let total = parts
            .iter()
            .try_fold(0usize, |acc, part| acc.checked_add(part.len()));
        let end = total.and_then(|total| self.len.checked_add(total));
        match end {
            Some(end) if end <= self.buffer.len() => {}
            _ => return Err(self.fail(EncodeError::BufferFull)),
        }

        for part in parts {
            let start = self.len;
            self.len += part.len();
            self.buffer[start..self.len].copy_from_slice(part);
        }
        Ok(())
    }

    fn fail(&self, err: EncodeError) -> EncodeError {
        debug!("bencode encoder error at byte {}: {err}", self.len);
        err
    }
}

/// `core::fmt::Write` adapter over a byte slice, used to format numbers without allocating.
struct SliceWriter<'a> {
    buf: &'a mut [u8],
    len: usize,
}

impl<'a> SliceWriter<'a> {
    fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, len: 0 }
    }

    fn written(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

impl Write for SliceWriter<'_> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        let end = self.len.checked_add(s.len()).ok_or(core::fmt::Error)?;
        let dst = self.buf.get_mut(self.len..end).ok_or(core::fmt::Error)?;
        dst.copy_from_slice(s.as_bytes());
        self.len = end;
        Ok(())
    }
}
