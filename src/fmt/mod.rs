/*!
Parsing and printing for the two ISO 8601 textual formats this crate
speaks.

The [`duration`] module handles ISO 8601 duration strings like
`P1Y2M3DT4H5M6.007S` in both directions. The [`timestamp`] module handles
ISO 8601 date-time strings like `2024-01-01T08:15:36Z` for
[`Instant`](crate::Instant) construction and display.

The parsers and printers here are exposed for callers that want to parse
from raw bytes or print into an existing buffer. For the common cases,
prefer the `FromStr` and `Display` implementations on
[`Duration`](crate::Duration) and [`Instant`](crate::Instant), which are
thin wrappers around these types.
*/

use crate::error::{format_err, Error};

pub mod duration;
#[cfg(feature = "serde")]
pub(crate) mod serde;
pub mod timestamp;

/// The result of parsing a value out of a slice of bytes.
///
/// This contains both the parsed value and the offset at which the value
/// ended in the input given (in the form of the unconsumed remainder of
/// the input).
#[derive(Debug)]
pub(crate) struct Parsed<'i, V> {
    /// The value parsed.
    pub(crate) value: V,
    /// The remaining unparsed input.
    pub(crate) input: &'i [u8],
}

impl<'i, V> Parsed<'i, V> {
    /// Ensures that the parsed value represents the entire input. This
    /// occurs precisely when the `input` on this parsed value is empty.
    ///
    /// This is useful when one expects a parsed value to consume the
    /// entire input, and to consider it an error if it doesn't.
    pub(crate) fn into_full(self) -> Result<V, Error> {
        if self.input.is_empty() {
            return Ok(self.value);
        }
        Err(format_err!(
            "unparsed input {unparsed:?} remains after parsed value",
            unparsed = crate::util::escape::Bytes(self.input),
        ))
    }
}

/// Parses a prefix of decimal ASCII digits from `input` into an `i64`.
///
/// Returns `None` as the value when `input` does not begin with a digit.
/// Errors when the digit run does not fit into an `i64`.
pub(crate) fn i64_prefix(input: &[u8]) -> Result<Parsed<'_, Option<i64>>, Error> {
    let mut digits = 0usize;
    let mut value: i64 = 0;
    while let Some(&byte) = input.get(digits) {
        if !byte.is_ascii_digit() {
            break;
        }
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(i64::from(byte - b'0')))
            .ok_or_else(|| {
                format_err!(
                    "number in {input:?} is too big \
                     to parse into a 64-bit integer",
                    input = crate::util::escape::Bytes(input),
                )
            })?;
        digits += 1;
    }
    if digits == 0 {
        return Ok(Parsed { value: None, input });
    }
    Ok(Parsed { value: Some(value), input: &input[digits..] })
}
