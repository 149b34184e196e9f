// SPDX-License-Identifier: Apache-2.0

//! Callback interface for the SAX-style decoder.

use core::ops::ControlFlow;

/// Receives decoding events as tokens are recognized.
///
/// Every hook is optional: the default implementation ignores the event and
/// continues. Returning [`ControlFlow::Break`] from any hook stops the parse
/// immediately with [`ParseError::CanceledByUser`](crate::ParseError::CanceledByUser)
/// and no further hook is called.
///
/// Byte strings and keys borrow directly from the input buffer, so a handler
/// may keep them for as long as the input lives.
///
/// # Generic Parameters
///
/// * `'input` - Lifetime of the input buffer being decoded
pub trait Handler<'input> {
    /// An integer value (`i42e`).
    fn integer(&mut self, _value: i64) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    /// A byte string value (`4:spam`). The slice excludes the length prefix.
    fn string(&mut self, _value: &'input [u8]) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    /// The start of a list (`l`).
    fn list_start(&mut self) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    /// The end of a list (`e`).
    fn list_end(&mut self) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    /// The start of a dictionary (`d`).
    fn dict_start(&mut self) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    /// A dictionary key. The value that follows arrives through the other hooks.
    fn dict_key(&mut self, _key: &'input [u8]) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    /// The end of a dictionary (`e`).
    fn dict_end(&mut self) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

/// Ignores every event; useful to validate input without collecting anything.
impl Handler<'_> for () {}

