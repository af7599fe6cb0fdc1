/*!
Convenience routines for printing raw parser input in error messages.

Parser input in this crate is `&[u8]`, and error messages embed the
offending input. These wrappers render arbitrary bytes losslessly: valid
UTF-8 prints as-is (with control characters escaped) and anything else
prints as hex escape sequences.
*/

/// Provides a convenient `Display` implementation for a `u8`.
///
/// The byte is treated as ASCII and emitted in a human readable form. If
/// it isn't printable ASCII, it's emitted as a hex escape sequence.
#[derive(Clone, Copy)]
pub(crate) struct Byte(pub(crate) u8);

impl core::fmt::Display for Byte {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if self.0 == b' ' {
            return write!(f, " ");
        }
        for ch in core::ascii::escape_default(self.0) {
            write!(f, "{}", char::from(ch))?;
        }
        Ok(())
    }
}

impl core::fmt::Debug for Byte {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "\"{}\"", self)
    }
}

/// Provides a convenient `Display` implementation for `&[u8]`.
///
/// This works best when the bytes are presumed to be mostly UTF-8, but
/// will work for anything. Bytes that aren't UTF-8 are emitted as hex
/// escape sequences.
pub(crate) struct Bytes<'a>(pub(crate) &'a [u8]);

impl<'a> core::fmt::Display for Bytes<'a> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut bytes = self.0;
        loop {
            match core::str::from_utf8(bytes) {
                Ok(string) => {
                    for ch in string.chars() {
                        write_char(ch, f)?;
                    }
                    return Ok(());
                }
                Err(err) => {
                    let (valid, rest) = bytes.split_at(err.valid_up_to());
                    // OK because we just split at the end of the longest
                    // valid UTF-8 prefix.
                    let valid = core::str::from_utf8(valid).unwrap();
                    for ch in valid.chars() {
                        write_char(ch, f)?;
                    }
                    write!(f, r"\x{:02x}", rest[0])?;
                    bytes = &rest[1..];
                }
            }
        }
    }
}

impl<'a> core::fmt::Debug for Bytes<'a> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "\"{}\"", self)
    }
}

fn write_char(
    ch: char,
    f: &mut core::fmt::Formatter,
) -> core::fmt::Result {
    match ch {
        '\0' => write!(f, "\\0"),
        // ASCII control characters except \0, \n, \r, \t
        '\x01'..='\x08' | '\x0b' | '\x0c' | '\x0e'..='\x19' | '\x7f' => {
            write!(f, "\\x{:02x}", u32::from(ch))
        }
        ch => write!(f, "{}", ch.escape_debug()),
    }
}
