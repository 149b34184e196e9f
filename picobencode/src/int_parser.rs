// SPDX-License-Identifier: Apache-2.0

// Int parser module, strict canonical variant of core::num::parse::radix

/// A custom error type for const integer parsing.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ConstParseIntegerError {
    /// The input byte slice was empty.
    Empty,
    /// The input consisted only of a `-` sign.
    SignOnly,
    /// An invalid character was found that was not a base-10 digit.
    InvalidDigit,
    /// The number overflowed or underflowed the target integer type.
    Overflow,
    /// A multi-digit literal started with `0`.
    LeadingZero,
    /// A `-` sign was followed by `0`.
    NegativeZero,
}

impl core::fmt::Display for ConstParseIntegerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            ConstParseIntegerError::Empty => "empty literal",
            ConstParseIntegerError::SignOnly => "sign without digits",
            ConstParseIntegerError::InvalidDigit => "invalid digit",
            ConstParseIntegerError::Overflow => "out of range",
            ConstParseIntegerError::LeadingZero => "leading zero",
            ConstParseIntegerError::NegativeZero => "negative zero",
        };
        f.write_str(msg)
    }
}

/// Creates a panic-free, const-stable, base-10 parser for canonical bencode literals.
///
/// `signed` parsers accept a single leading `-`; `unsigned` parsers reject any sign.
/// `+` is never accepted.
macro_rules! define_const_parser {
    ($fn_name:ident, $int_ty:ty, signed) => {
        define_const_parser!(@impl $fn_name, $int_ty, true);
    };
    ($fn_name:ident, $int_ty:ty, unsigned) => {
        define_const_parser!(@impl $fn_name, $int_ty, false);
    };
    (@impl $fn_name:ident, $int_ty:ty, $allow_minus:expr) => {
        /// Parses a canonical decimal byte slice into a(n) `
        #[doc = stringify!($int_ty)]
        /// ` in a `const` context.
        ///
        /// This function is guaranteed not to panic.
        pub const fn $fn_name(src: &[u8]) -> Result<$int_ty, ConstParseIntegerError> {
            let (is_negative, mut digits) = match src {
                [] => return Err(ConstParseIntegerError::Empty),
                [b'-', rest @ ..] if $allow_minus => (true, rest),
                _ => (false, src),
            };

            match digits {
                [] => return Err(ConstParseIntegerError::SignOnly),
                [b'0', ..] if is_negative => return Err(ConstParseIntegerError::NegativeZero),
                [b'0', _, ..] => return Err(ConstParseIntegerError::LeadingZero),
                _ => {}
            }

            // Negative literals accumulate downwards so the type's MIN is reachable
            let mut result: $int_ty = 0;
            while let [byte, rest @ ..] = digits {
                if !byte.is_ascii_digit() {
                    return Err(ConstParseIntegerError::InvalidDigit);
                }
                let digit = (*byte - b'0') as $int_ty;
                let next = match result.checked_mul(10) {
                    Some(scaled) if is_negative => scaled.checked_sub(digit),
                    Some(scaled) => scaled.checked_add(digit),
                    None => None,
                };
                result = match next {
                    Some(value) => value,
                    None => return Err(ConstParseIntegerError::Overflow),
                };
                digits = rest;
            }

            Ok(result)
        }
    };
}

define_const_parser!(from_ascii_i64, i64, signed);
define_const_parser!(from_ascii_usize, usize, unsigned);
