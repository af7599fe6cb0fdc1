/*!
A parser and printer for the ISO 8601 duration format.

The grammar, informally, with the unit letters being literal:

```text
duration   = sign? ("P"|"p") date-part time-part?
sign       = "+" | "-"
date-part  = years? months? weeks? days?
time-part  = ("T"|"t") hours? minutes? seconds?
seconds    = digits ("." digits{1,9})? "S"
```

Units must be written from largest to smallest and cannot repeat. The
string must contain at least one unit, and a time designator must be
followed by at least one time unit. At most 9 fractional second digits
are supported (nanosecond resolution); they are read greedily in three
groups of up to 3 digits (milliseconds, microseconds, nanoseconds), each
right-padded with zeros to exactly 3 digits.
*/

use crate::{
    duration::Duration,
    error::{err, format_err, Error, ErrorContext},
    fmt::{i64_prefix, Parsed},
    round::Unit,
    util::escape::{Byte, Bytes},
};

/// A parser for ISO 8601 duration strings.
///
/// # Example
///
/// ```
/// use tempora::fmt::duration::DurationParser;
///
/// static PARSER: DurationParser = DurationParser::new();
///
/// let duration = PARSER.parse_duration(b"P1DT12H")?;
/// assert_eq!(duration.days(), 1);
/// assert_eq!(duration.hours(), 12);
/// # Ok::<(), tempora::Error>(())
/// ```
#[derive(Debug)]
pub struct DurationParser {
    /// There are currently no configuration options for this parser.
    _priv: (),
}

impl DurationParser {
    /// Create a new ISO 8601 duration parser with the default
    /// configuration.
    pub const fn new() -> DurationParser {
        DurationParser { _priv: () }
    }

    /// Parse an ISO 8601 duration string into a validated [`Duration`].
    ///
    /// The entire input must be consumed; trailing bytes are an error.
    /// Any failure, whether from the grammar or from [`Duration`]'s own
    /// invariants, carries the offending input in its message.
    pub fn parse_duration<I: AsRef<[u8]>>(
        &self,
        input: I,
    ) -> Result<Duration, Error> {
        fn imp(p: &DurationParser, input: &[u8]) -> Result<Duration, Error> {
            p.parse_pieces(input)
                .and_then(|parsed| parsed.into_full())
                .and_then(|pieces| pieces.to_duration())
                .with_context(|| {
                    err!(
                        "failed to parse {input:?} in \
                         the ISO 8601 duration format",
                        input = Bytes(input),
                    )
                })
        }
        imp(self, input.as_ref())
    }

    /// Parses the structured intermediate representation: an explicit
    /// sign plus a sign-free magnitude for every unit present in the
    /// input. Units absent from the input stay `None`.
    pub(crate) fn parse_pieces<'i>(
        &self,
        mut input: &'i [u8],
    ) -> Result<Parsed<'i, ParsedDuration>, Error> {
        let mut pieces = ParsedDuration::positive();
        if let Some((&first, tail)) = input.split_first() {
            if first == b'+' {
                input = tail;
            } else if first == b'-' {
                pieces.sign = -1;
                input = tail;
            }
        }

        let Some((&first, tail)) = input.split_first() else {
            return Err(format_err!(
                "expected to find duration beginning with `P` or `p`, \
                 but found end of input",
            ));
        };
        if !matches!(first, b'P' | b'p') {
            return Err(format_err!(
                "expected to find duration beginning with `P` or `p`, \
                 but found {found:?} instead",
                found = Byte(first),
            ));
        }
        input = tail;

        let parsed = self.parse_date_units(input, &mut pieces)?;
        input = parsed.input;

        if let Some((&first, tail)) = input.split_first() {
            if matches!(first, b'T' | b't') {
                let parsed = self.parse_time_units(tail, &mut pieces)?;
                input = parsed.input;
                if !pieces.has_time_unit() {
                    return Err(format_err!(
                        "found a time designator (`T` or `t`), \
                         but did not find any time units following it",
                    ));
                }
            }
        }
        if pieces.is_empty() {
            return Err(format_err!(
                "duration contains no unit fields \
                 (at least one is required)",
            ));
        }
        Ok(Parsed { value: pieces, input })
    }

    /// Parses consecutive date units (years, months, weeks, days) into
    /// the pieces given.
    fn parse_date_units<'i>(
        &self,
        mut input: &'i [u8],
        pieces: &mut ParsedDuration,
    ) -> Result<Parsed<'i, ()>, Error> {
        let mut prev: Option<Unit> = None;
        loop {
            let parsed = i64_prefix(input)?;
            let Some(value) = parsed.value else { break };
            input = parsed.input;

            let Some((&first, tail)) = input.split_first() else {
                return Err(format_err!(
                    "expected to find date unit designator suffix \
                     (`Y`, `M`, `W` or `D`), but found end of input",
                ));
            };
            let unit = match first {
                b'Y' => Unit::Year,
                b'M' => Unit::Month,
                b'W' => Unit::Week,
                b'D' => Unit::Day,
                _ => {
                    return Err(format_err!(
                        "expected to find date unit designator suffix \
                         (`Y`, `M`, `W` or `D`), but found {found:?} instead",
                        found = Byte(first),
                    ));
                }
            };
            input = tail;
            check_order(prev, unit)?;
            prev = Some(unit);
            pieces.set(unit, value);
        }
        Ok(Parsed { value: (), input })
    }

    /// Parses consecutive time units (hours, minutes, seconds) into the
    /// pieces given. A fraction may appear on seconds only, and nothing
    /// may follow it.
    fn parse_time_units<'i>(
        &self,
        mut input: &'i [u8],
        pieces: &mut ParsedDuration,
    ) -> Result<Parsed<'i, ()>, Error> {
        let mut prev: Option<Unit> = None;
        loop {
            let parsed = i64_prefix(input)?;
            let Some(value) = parsed.value else { break };
            input = parsed.input;

            let mut fraction: Option<&[u8]> = None;
            if input.first() == Some(&b'.') {
                let after_dot = &input[1..];
                let mut len = 0;
                while after_dot
                    .get(len)
                    .map_or(false, |byte| byte.is_ascii_digit())
                {
                    len += 1;
                }
                if len == 0 {
                    return Err(format_err!(
                        "expected at least one fractional second digit \
                         after a decimal point",
                    ));
                }
                if len > 9 {
                    return Err(format_err!(
                        "found {len} fractional second digits, but at \
                         most 9 digits (nanosecond resolution) \
                         are supported",
                    ));
                }
                fraction = Some(&after_dot[..len]);
                input = &after_dot[len..];
            }

            let Some((&first, tail)) = input.split_first() else {
                return Err(format_err!(
                    "expected to find time unit designator suffix \
                     (`H`, `M` or `S`), but found end of input",
                ));
            };
            let unit = match first {
                b'H' => Unit::Hour,
                b'M' => Unit::Minute,
                b'S' => Unit::Second,
                _ => {
                    return Err(format_err!(
                        "expected to find time unit designator suffix \
                         (`H`, `M` or `S`), but found {found:?} instead",
                        found = Byte(first),
                    ));
                }
            };
            input = tail;
            if fraction.is_some() && unit != Unit::Second {
                return Err(format_err!(
                    "found fractional value on unit {unit}, \
                     but fractions are only allowed on seconds",
                    unit = unit.singular(),
                ));
            }
            check_order(prev, unit)?;
            prev = Some(unit);
            pieces.set(unit, value);
            if let Some(digits) = fraction {
                pieces.set_fraction(digits);
                // A fraction can only occur on the lowest unit of time,
                // so we are done. Anything left over is a parse error.
                break;
            }
        }
        Ok(Parsed { value: (), input })
    }
}

/// Returns an error unless `unit` is strictly smaller than the previously
/// parsed unit.
fn check_order(prev: Option<Unit>, unit: Unit) -> Result<(), Error> {
    let Some(prev) = prev else { return Ok(()) };
    if unit < prev {
        return Ok(());
    }
    Err(format_err!(
        "found value with unit {after} after unit {before}, but units \
         must be written from largest to smallest \
         (and they can't be repeated)",
        after = unit.singular(),
        before = prev.singular(),
    ))
}

/// The structured intermediate form of an ISO 8601 duration string.
///
/// Every unit is a sign-free magnitude that is `None` when the unit was
/// not present in the source text. The sign is carried separately and
/// applied exactly once, in [`ParsedDuration::to_duration`]. The
/// absent-vs-zero distinction only matters for introspection; feeding a
/// `Duration` collapses absent units to zero.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ParsedDuration {
    pub(crate) sign: i8,
    pub(crate) years: Option<i64>,
    pub(crate) months: Option<i64>,
    pub(crate) weeks: Option<i64>,
    pub(crate) days: Option<i64>,
    pub(crate) hours: Option<i64>,
    pub(crate) minutes: Option<i64>,
    pub(crate) seconds: Option<i64>,
    pub(crate) milliseconds: Option<i64>,
    pub(crate) microseconds: Option<i64>,
    pub(crate) nanoseconds: Option<i64>,
}

impl ParsedDuration {
    fn positive() -> ParsedDuration {
        ParsedDuration {
            sign: 1,
            years: None,
            months: None,
            weeks: None,
            days: None,
            hours: None,
            minutes: None,
            seconds: None,
            milliseconds: None,
            microseconds: None,
            nanoseconds: None,
        }
    }

    fn set(&mut self, unit: Unit, value: i64) {
        match unit {
            Unit::Year => self.years = Some(value),
            Unit::Month => self.months = Some(value),
            Unit::Week => self.weeks = Some(value),
            Unit::Day => self.days = Some(value),
            Unit::Hour => self.hours = Some(value),
            Unit::Minute => self.minutes = Some(value),
            Unit::Second => self.seconds = Some(value),
            unit => unreachable!(
                "{unit:?} is never parsed as its own duration unit"
            ),
        }
    }

    /// Splits fractional second digits greedily into three groups of up
    /// to 3 digits (milliseconds, microseconds, nanoseconds). A group is
    /// only present when it received at least one source digit, and is
    /// right-padded with zeros to exactly 3 digits.
    fn set_fraction(&mut self, digits: &[u8]) {
        self.milliseconds = Some(fraction_group(&digits[..digits.len().min(3)]));
        if digits.len() > 3 {
            self.microseconds =
                Some(fraction_group(&digits[3..digits.len().min(6)]));
        }
        if digits.len() > 6 {
            self.nanoseconds = Some(fraction_group(&digits[6..]));
        }
    }

    fn has_time_unit(&self) -> bool {
        self.hours.is_some()
            || self.minutes.is_some()
            || self.seconds.is_some()
    }

    fn is_empty(&self) -> bool {
        self.years.is_none()
            && self.months.is_none()
            && self.weeks.is_none()
            && self.days.is_none()
            && !self.has_time_unit()
    }

    /// Applies the sign to every present magnitude, collapses absent
    /// units to zero and runs the full `Duration` validation.
    pub(crate) fn to_duration(&self) -> Result<Duration, Error> {
        let sign = i64::from(self.sign);
        let field = |value: Option<i64>| value.map_or(0, |v| v * sign);
        Duration::new(
            field(self.years),
            field(self.months),
            field(self.weeks),
            field(self.days),
            field(self.hours),
            field(self.minutes),
            field(self.seconds),
            field(self.milliseconds),
            field(self.microseconds),
            field(self.nanoseconds),
        )
    }
}

/// Reads up to 3 fractional digits as a zero-padded 3-digit group.
fn fraction_group(digits: &[u8]) -> i64 {
    let mut value = 0;
    for i in 0..3 {
        value = value * 10 + digits.get(i).map_or(0, |b| i64::from(b - b'0'));
    }
    value
}

/// A printer for ISO 8601 duration strings.
///
/// This is a vehicle for the `Display` implementation on
/// [`Duration`], exposed for callers that want to print into an existing
/// buffer.
///
/// # Example
///
/// ```
/// use tempora::{fmt::duration::DurationPrinter, Duration};
///
/// static PRINTER: DurationPrinter = DurationPrinter::new();
///
/// let duration = Duration::new(0, 0, 0, 1, 12, 0, 0, 0, 0, 0)?;
/// let mut buf = String::new();
/// PRINTER.print_duration(&duration, &mut buf).unwrap();
/// assert_eq!(buf, "P1DT12H");
/// # Ok::<(), tempora::Error>(())
/// ```
#[derive(Debug)]
pub struct DurationPrinter {
    /// There are currently no configuration options for this printer.
    _priv: (),
}

impl DurationPrinter {
    /// Create a new ISO 8601 duration printer with the default
    /// configuration.
    pub const fn new() -> DurationPrinter {
        DurationPrinter { _priv: () }
    }

    /// Print the given duration to the writer given.
    ///
    /// The printer itself is sign-naive: it writes absolute magnitudes
    /// and a leading `-` exactly when the duration's sign is negative.
    /// Zero valued units are omitted, including the whole `T` block when
    /// all time units are zero. The zero duration prints as `PT0S`.
    ///
    /// This only returns an error when the given writer returns an error.
    pub fn print_duration<W: core::fmt::Write>(
        &self,
        duration: &Duration,
        mut wtr: W,
    ) -> core::fmt::Result {
        if duration.signum() < 0 {
            wtr.write_str("-")?;
        }
        wtr.write_str("P")?;

        let abs = duration.abs();
        let mut non_zero_greater_than_second = false;
        if abs.years() != 0 {
            write!(wtr, "{}Y", abs.years())?;
            non_zero_greater_than_second = true;
        }
        if abs.months() != 0 {
            write!(wtr, "{}M", abs.months())?;
            non_zero_greater_than_second = true;
        }
        if abs.weeks() != 0 {
            write!(wtr, "{}W", abs.weeks())?;
            non_zero_greater_than_second = true;
        }
        if abs.days() != 0 {
            write!(wtr, "{}D", abs.days())?;
            non_zero_greater_than_second = true;
        }

        let mut printed_time_prefix = false;
        if abs.hours() != 0 {
            wtr.write_str("T")?;
            printed_time_prefix = true;
            write!(wtr, "{}H", abs.hours())?;
            non_zero_greater_than_second = true;
        }
        if abs.minutes() != 0 {
            if !printed_time_prefix {
                wtr.write_str("T")?;
                printed_time_prefix = true;
            }
            write!(wtr, "{}M", abs.minutes())?;
            non_zero_greater_than_second = true;
        }

        // ISO 8601 has no unit letters for milliseconds, microseconds or
        // nanoseconds. When any of them is non-zero, they are combined
        // with seconds into a single value and rebalanced into whole
        // seconds plus a nanosecond fraction.
        let (seconds, millis, micros, nanos) = (
            abs.seconds(),
            abs.milliseconds(),
            abs.microseconds(),
            abs.nanoseconds(),
        );
        if (seconds != 0 || !non_zero_greater_than_second)
            && millis == 0
            && micros == 0
            && nanos == 0
        {
            if !printed_time_prefix {
                wtr.write_str("T")?;
            }
            write!(wtr, "{}S", seconds)?;
        } else if millis != 0 || micros != 0 || nanos != 0 {
            if !printed_time_prefix {
                wtr.write_str("T")?;
            }
            let combined = i128::from(nanos)
                + i128::from(micros) * 1_000
                + i128::from(millis) * 1_000_000
                + i128::from(seconds) * 1_000_000_000;
            let second = combined / 1_000_000_000;
            let nano = combined % 1_000_000_000;
            write!(wtr, "{}", second)?;
            if nano != 0 {
                wtr.write_str(".")?;
                write_fraction(nano as i64, &mut wtr)?;
            }
            wtr.write_str("S")?;
        }
        Ok(())
    }
}

/// Writes a nanosecond value below one second as 9 fractional digits with
/// trailing zeros stripped.
pub(crate) fn write_fraction<W: core::fmt::Write>(
    nanos: i64,
    wtr: &mut W,
) -> core::fmt::Result {
    let mut digits = [b'0'; 9];
    let mut value = nanos;
    for i in (0..9).rev() {
        digits[i] = b'0' + (value % 10) as u8;
        value /= 10;
    }
    let mut end = 9;
    while end > 0 && digits[end - 1] == b'0' {
        end -= 1;
    }
    // OK because the buffer is all ASCII digits.
    wtr.write_str(core::str::from_utf8(&digits[..end]).unwrap())
}
