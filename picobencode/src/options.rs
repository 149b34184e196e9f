// SPDX-License-Identifier: Apache-2.0

/// Nesting limit used by [`DecoderOptions::default`].
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Configuration options for the [`Decoder`](crate::Decoder).
///
/// # Default
///
/// `max_depth` is [`DEFAULT_MAX_DEPTH`], `strict_keys` is `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderOptions {
    /// Maximum number of lists and dictionaries open at once.
    ///
    /// A container that would exceed this limit fails with
    /// [`InvalidDataKind::NestingTooDeep`](crate::InvalidDataKind::NestingTooDeep)
    /// before its start callback runs. `0` rejects every container.
    pub max_depth: usize,

    /// Require dictionary keys in strictly ascending byte order.
    ///
    /// Bencode producers are expected to sort keys, but the decoder accepts
    /// duplicates and any order unless this is set. When set, an offending
    /// key fails with [`InvalidDataKind::UnsortedKey`](crate::InvalidDataKind::UnsortedKey)
    /// before its `dict_key` callback runs.
    pub strict_keys: bool,
}

impl DecoderOptions {
    /// Default options: depth limit [`DEFAULT_MAX_DEPTH`], any key order.
    pub const fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            strict_keys: false,
        }
    }

    /// Sets [`max_depth`](Self::max_depth).
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets [`strict_keys`](Self::strict_keys).
    pub const fn with_strict_keys(mut self, strict_keys: bool) -> Self {
        self.strict_keys = strict_keys;
        self
    }
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self::new()
    }
}
