// SPDX-License-Identifier: Apache-2.0

//! A SAX-style bencode decoder.
//!
//! Recursive descent over a fully resident buffer. The dispatcher looks at one
//! tag byte and hands off to the reader for that value type; list and
//! dictionary readers call back into the dispatcher for their elements. Every
//! failure travels up as a `ParseError` and ends the whole parse.

use core::ops::ControlFlow;

use log::{debug, trace};

use crate::cursor::Cursor;
use crate::int_parser::{from_ascii_i64, from_ascii_usize};
use crate::{DecoderOptions, Handler, InvalidDataKind, ParseError};

/// Which callback receives a decoded byte string.
#[derive(Debug, Clone, Copy, PartialEq)]
enum StringRole {
    Value,
    DictKey,
}

/// Value type announced by a tag byte.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Integer,
    String,
    List,
    Dict,
}

/// A SAX-style bencode decoder.
///
/// The decoder holds only configuration; all parse state lives for the
/// duration of a single [`parse`](Decoder::parse) call.
///
/// # Example
/// ```
/// use core::ops::ControlFlow;
/// use picobencode::{Decoder, Handler};
///
/// #[derive(Default)]
/// struct Sum(i64);
///
/// impl Handler<'_> for Sum {
///     fn integer(&mut self, value: i64) -> ControlFlow<()> {
///         self.0 += value;
///         ControlFlow::Continue(())
///     }
/// }
///
/// let mut sum = Sum::default();
/// let consumed = Decoder::new().parse(b"li1ei2ei3ee", Some(&mut sum)).unwrap();
/// assert_eq!(sum.0, 6);
/// assert_eq!(consumed, 11);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    options: DecoderOptions,
}

impl Decoder {
    /// Creates a decoder with default options.
    pub const fn new() -> Self {
        Self::with_options(DecoderOptions::new())
    }

    /// Creates a decoder with the given options.
    pub const fn with_options(options: DecoderOptions) -> Self {
        Self { options }
    }

    /// The options every [`parse`](Decoder::parse) call runs with.
    pub fn options(&self) -> &DecoderOptions {
        &self.options
    }

    /// Decodes exactly one value from `input`, pushing events into `handler`.
    ///
    /// Returns the number of bytes the value occupied. Bytes after the first
    /// value are never examined. An empty input succeeds without calling the
    /// handler. A missing handler fails with [`ParseError::NoCallbacks`]
    /// before the input is looked at.
    pub fn parse<'input, H>(
        &self,
        input: &'input [u8],
        handler: Option<&mut H>,
    ) -> Result<usize, ParseError>
    where
        H: Handler<'input> + ?Sized,
    {
        let Some(handler) = handler else {
            debug!("bencode parse rejected: no handler supplied");
            return Err(ParseError::NoCallbacks);
        };

        if input.is_empty() {
            return Ok(0);
        }

        let mut session = Session {
            cursor: Cursor::new(input),
            handler,
            options: self.options,
            depth: 0,
        };
        match session.parse_next() {
            Ok(()) => Ok(session.cursor.position()),
            Err(e) => {
                debug!("bencode parse failed: {e}");
                Err(e)
            }
        }
    }
}

/// Decodes one value from `input` with default options.
///
/// This is [`Decoder::parse`] without the consumed byte count.
pub fn parse<'input, H>(input: &'input [u8], handler: Option<&mut H>) -> Result<(), ParseError>
where
    H: Handler<'input> + ?Sized,
{
    Decoder::new().parse(input, handler).map(|_consumed| ())
}

/// Per-call parse state.
struct Session<'input, 'h, H: ?Sized> {
    cursor: Cursor<'input>,
    handler: &'h mut H,
    options: DecoderOptions,
    /// Number of lists and dictionaries currently open.
    depth: usize,
}

impl<'input, H> Session<'input, '_, H>
where
    H: Handler<'input> + ?Sized,
{
    /// Reads the tag byte of the next value and routes to its reader.
    fn parse_next(&mut self) -> Result<(), ParseError> {
        let start = self.cursor.position();
        let token = match self.peek()? {
            b'i' => Token::Integer,
            b'0'..=b'9' => Token::String,
            b'l' => Token::List,
            b'd' => Token::Dict,
            other => {
                return Err(ParseError::invalid(
                    InvalidDataKind::UnexpectedByte(other),
                    start,
                ))
            }
        };
        // A tag byte is never a complete value on its own
        if self.cursor.remaining().len() < 2 {
            return Err(ParseError::invalid(
                InvalidDataKind::UnexpectedEnd,
                self.cursor.data_len(),
            ));
        }
        trace!("{token:?} at byte {start}");

        match token {
            Token::Integer => self.parse_integer(),
            Token::String => {
                let value = self.read_string()?;
                self.emit_string(StringRole::Value, value)
            }
            Token::List => self.parse_list(),
            Token::Dict => self.parse_dict(),
        }
    }

    /// `i` `-`? digit+ `e`
    fn parse_integer(&mut self) -> Result<(), ParseError> {
        let start = self.cursor.position();
        self.consume()?;

        let literal_start = self.cursor.position();
        let end = self
            .cursor
            .find(b'e')
            .ok_or(ParseError::invalid(InvalidDataKind::MissingTerminator, start))?;
        let literal = self
            .cursor
            .slice(literal_start, end)
            .map_err(|e| ParseError::invalid(e.into(), start))?;
        let value = from_ascii_i64(literal).map_err(|e| ParseError::invalid(e.into(), start))?;

        self.advance_to(end + 1)?;
        self.notify(|h| h.integer(value))
    }

    /// `<length>` `:` `<length bytes>`, shared by values and dictionary keys.
    fn read_string(&mut self) -> Result<&'input [u8], ParseError> {
        let start = self.cursor.position();
        let colon = self
            .cursor
            .find(b':')
            .ok_or(ParseError::invalid(InvalidDataKind::MissingTerminator, start))?;
        let prefix = self
            .cursor
            .slice(start, colon)
            .map_err(|e| ParseError::invalid(e.into(), start))?;
        let length = from_ascii_usize(prefix).map_err(|e| ParseError::invalid(e.into(), start))?;

        let payload_start = colon + 1;
        let payload_end = payload_start
            .checked_add(length)
            .ok_or(ParseError::invalid(InvalidDataKind::Truncated, start))?;
        let payload = self
            .cursor
            .slice(payload_start, payload_end)
            .map_err(|_| ParseError::invalid(InvalidDataKind::Truncated, start))?;

        self.advance_to(payload_end)?;
        Ok(payload)
    }

    fn emit_string(&mut self, role: StringRole, bytes: &'input [u8]) -> Result<(), ParseError> {
        match role {
            StringRole::Value => self.notify(|h| h.string(bytes)),
            StringRole::DictKey => self.notify(|h| h.dict_key(bytes)),
        }
    }

    /// `l` value* `e`
    fn parse_list(&mut self) -> Result<(), ParseError> {
        self.enter()?;
        self.consume()?;
        self.notify(|h| h.list_start())?;

        while self.peek()? != b'e' {
            self.parse_next()?;
        }

        // The end hook sees the cursor on the closing `e`
        self.leave();
        self.notify(|h| h.list_end())?;
        self.consume()?;
        Ok(())
    }

    /// `d` (string value)* `e`
    fn parse_dict(&mut self) -> Result<(), ParseError> {
        self.enter()?;
        self.consume()?;
        self.notify(|h| h.dict_start())?;

        let mut previous_key: Option<&'input [u8]> = None;
        while self.peek()? != b'e' {
            let key_start = self.cursor.position();
            let key = self.read_string()?;
            if self.options.strict_keys {
                if previous_key.is_some_and(|previous| key <= previous) {
                    return Err(ParseError::invalid(
                        InvalidDataKind::UnsortedKey,
                        key_start,
                    ));
                }
                previous_key = Some(key);
            }
            self.emit_string(StringRole::DictKey, key)?;
            self.parse_next()?;
        }

        // The end hook sees the cursor on the closing `e`
        self.leave();
        self.notify(|h| h.dict_end())?;
        self.consume()?;
        Ok(())
    }

    /// Opens a container, failing if that exceeds the nesting limit.
    fn enter(&mut self) -> Result<(), ParseError> {
        if self.depth >= self.options.max_depth {
            return Err(ParseError::invalid(
                InvalidDataKind::NestingTooDeep,
                self.cursor.position(),
            ));
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn peek(&self) -> Result<u8, ParseError> {
        self.cursor
            .peek()
            .map_err(|e| ParseError::invalid(e.into(), self.cursor.position()))
    }

    fn consume(&mut self) -> Result<u8, ParseError> {
        let position = self.cursor.position();
        self.cursor
            .consume_byte()
            .map_err(|e| ParseError::invalid(e.into(), position))
    }

    fn advance_to(&mut self, pos: usize) -> Result<(), ParseError> {
        let position = self.cursor.position();
        self.cursor
            .advance_to(pos)
            .map_err(|e| ParseError::invalid(e.into(), position))
    }

    /// Runs one handler hook and turns a stop request into `CanceledByUser`.
    fn notify(
        &mut self,
        hook: impl FnOnce(&mut H) -> ControlFlow<()>,
    ) -> Result<(), ParseError> {
        match hook(&mut *self.handler) {
            ControlFlow::Continue(()) => Ok(()),
            ControlFlow::Break(()) => {
                let position = self.cursor.position();
                debug!("handler stopped the parse at byte {position}");
                Err(ParseError::CanceledByUser { position })
            }
        }
    }
}
