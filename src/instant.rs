use crate::{
    error::{invalid_args_err, Error},
    fmt::timestamp::{TimestampParser, TimestampPrinter},
    round::{RoundMode, Unit},
};

/// An instant in time: a count of nanoseconds since the Unix epoch.
///
/// An instant has no calendar fields and no time zone. It is a single
/// signed scalar, totally ordered, `Copy` and immutable; operations like
/// [`Instant::round`] return new instants.
///
/// # Construction
///
/// Build an instant from [a raw nanosecond count](Instant::from_epoch_nanoseconds),
/// [a millisecond count](Instant::from_epoch_milliseconds), or [from
/// another instant or an ISO 8601 timestamp string](Instant::from). The
/// timestamp grammar is described in [`fmt::timestamp`](crate::fmt::timestamp).
///
/// # Display
///
/// An instant prints as an ISO 8601 timestamp in UTC:
///
/// ```
/// use tempora::Instant;
///
/// let instant = Instant::from("2024-06-15T20:30:00+05:30")?;
/// assert_eq!(instant.to_string(), "2024-06-15T15:00:00Z");
/// # Ok::<(), tempora::Error>(())
/// ```
#[derive(Clone, Copy, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Instant {
    nanosecond: i128,
}

impl Instant {
    /// The Unix epoch: `1970-01-01T00:00:00Z`.
    pub const UNIX_EPOCH: Instant = Instant { nanosecond: 0 };

    /// Creates an instant from a count of nanoseconds since the Unix
    /// epoch.
    pub fn from_epoch_nanoseconds(nanosecond: i128) -> Instant {
        Instant { nanosecond }
    }

    /// Creates an instant from a count of milliseconds since the Unix
    /// epoch.
    pub fn from_epoch_milliseconds(millisecond: i64) -> Instant {
        Instant { nanosecond: i128::from(millisecond) * 1_000_000 }
    }

    /// Creates an instant from any [`InstantLike`] value: another instant
    /// (copied) or an ISO 8601 timestamp string.
    ///
    /// # Errors
    ///
    /// Returns a format error when given a string that does not match the
    /// timestamp grammar.
    ///
    /// # Example
    ///
    /// ```
    /// use tempora::Instant;
    ///
    /// let instant = Instant::from("2019-03-30T00:45Z")?;
    /// assert_eq!(instant.epoch_nanoseconds(), 1_553_906_700_000_000_000);
    ///
    /// let copy = Instant::from(instant)?;
    /// assert_eq!(copy, instant);
    /// # Ok::<(), tempora::Error>(())
    /// ```
    pub fn from<'a, L: Into<InstantLike<'a>>>(
        like: L,
    ) -> Result<Instant, Error> {
        match like.into() {
            InstantLike::Instant(instant) => Ok(instant),
            InstantLike::Str(string) => string.parse(),
        }
    }

    /// Returns this instant's count of nanoseconds since the Unix epoch.
    pub fn epoch_nanoseconds(self) -> i128 {
        self.nanosecond
    }

    /// Returns this instant's count of milliseconds since the Unix epoch,
    /// rounded toward negative infinity.
    ///
    /// # Example
    ///
    /// ```
    /// use tempora::Instant;
    ///
    /// let instant = Instant::from_epoch_nanoseconds(-1);
    /// assert_eq!(instant.epoch_milliseconds(), -1);
    /// ```
    pub fn epoch_milliseconds(self) -> i128 {
        self.nanosecond.div_euclid(1_000_000)
    }

    /// Compares two instants by their position on the timeline.
    ///
    /// This is a strict total order consistent with comparing epoch
    /// nanosecond counts, and is what the comparison operators on
    /// `Instant` use.
    ///
    /// # Example
    ///
    /// ```
    /// use core::cmp::Ordering;
    ///
    /// use tempora::Instant;
    ///
    /// let one = Instant::from_epoch_nanoseconds(1_000);
    /// let two = Instant::from_epoch_nanoseconds(2_000);
    /// assert_eq!(Instant::compare(one, two), Ordering::Less);
    /// assert_eq!(Instant::compare(two, two), Ordering::Equal);
    /// assert_eq!(Instant::compare(two, one), Ordering::Greater);
    /// ```
    pub fn compare(first: Instant, second: Instant) -> core::cmp::Ordering {
        first.nanosecond.cmp(&second.nanosecond)
    }

    /// Rounds this instant to a multiple of a unit, returning a new
    /// instant.
    ///
    /// The options can be a bare [`Unit`], a `(Unit, increment)` pair, or
    /// a full [`InstantRound`] configuration with a [`RoundMode`]. The
    /// default mode is [`RoundMode::HalfExpand`] with an increment of 1.
    ///
    /// Rounding operates on the epoch nanosecond count with exact integer
    /// arithmetic: the count is divided by `increment × unit length`,
    /// the selected mode picks an integer multiple, and the result is
    /// multiplied back.
    ///
    /// # Errors
    ///
    /// Returns an invalid-arguments error when the unit is bigger than
    /// hours or when the increment is not positive.
    ///
    /// # Example
    ///
    /// ```
    /// use tempora::{Instant, InstantRound, RoundMode, Unit};
    ///
    /// let instant = Instant::from("2024-01-01T08:15:36Z")?;
    /// assert_eq!(
    ///     instant.round(Unit::Hour)?.to_string(),
    ///     "2024-01-01T08:00:00Z",
    /// );
    /// assert_eq!(
    ///     instant.round(Unit::Minute)?.to_string(),
    ///     "2024-01-01T08:16:00Z",
    /// );
    /// let options = InstantRound::new()
    ///     .smallest(Unit::Hour)
    ///     .increment(2)
    ///     .mode(RoundMode::Ceil);
    /// assert_eq!(
    ///     instant.round(options)?.to_string(),
    ///     "2024-01-01T10:00:00Z",
    /// );
    /// # Ok::<(), tempora::Error>(())
    /// ```
    pub fn round<R: Into<InstantRound>>(
        self,
        options: R,
    ) -> Result<Instant, Error> {
        options.into().round(self)
    }
}

impl core::str::FromStr for Instant {
    type Err = Error;

    fn from_str(string: &str) -> Result<Instant, Error> {
        TimestampParser::new().parse_timestamp(string)
    }
}

impl core::fmt::Display for Instant {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        TimestampPrinter::new().print_timestamp(self, f)
    }
}

impl core::fmt::Debug for Instant {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self, f)
    }
}

/// The two input shapes an [`Instant`] can be built from with
/// [`Instant::from`].
#[derive(Clone, Copy, Debug)]
pub enum InstantLike<'a> {
    /// An existing instant, copied as-is.
    Instant(Instant),
    /// An ISO 8601 timestamp string.
    Str(&'a str),
}

impl<'a> From<Instant> for InstantLike<'a> {
    fn from(instant: Instant) -> InstantLike<'a> {
        InstantLike::Instant(instant)
    }
}

impl<'a> From<&'a str> for InstantLike<'a> {
    fn from(string: &'a str) -> InstantLike<'a> {
        InstantLike::Str(string)
    }
}

/// Options for [`Instant::round`].
///
/// The smallest unit defaults to nanoseconds, the increment to 1 and the
/// mode to [`RoundMode::HalfExpand`]. A bare [`Unit`] or a
/// `(Unit, increment)` pair convert into a configuration with the
/// remaining defaults.
///
/// # Example
///
/// Round to the nearest multiple of 30 microseconds, with ties going
/// toward positive infinity:
///
/// ```
/// use tempora::{Instant, InstantRound, RoundMode, Unit};
///
/// let instant = Instant::from("2024-01-01T08:15:36.000105Z")?;
/// let options = InstantRound::new()
///     .smallest(Unit::Microsecond)
///     .increment(30)
///     .mode(RoundMode::HalfCeil);
/// assert_eq!(
///     instant.round(options)?.to_string(),
///     "2024-01-01T08:15:36.00012Z",
/// );
/// # Ok::<(), tempora::Error>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct InstantRound {
    smallest: Unit,
    mode: RoundMode,
    increment: i64,
}

impl InstantRound {
    /// Creates a new rounding configuration with the default options.
    pub fn new() -> InstantRound {
        InstantRound::default()
    }

    /// Sets the unit to round to a multiple of.
    ///
    /// Only nanoseconds through hours are supported. Days and the
    /// calendar units vary with a reference point an instant does not
    /// have, and are rejected by [`Instant::round`].
    pub fn smallest(self, unit: Unit) -> InstantRound {
        InstantRound { smallest: unit, ..self }
    }

    /// Sets the rounding mode.
    pub fn mode(self, mode: RoundMode) -> InstantRound {
        InstantRound { mode, ..self }
    }

    /// Sets the multiple of the smallest unit to round to. For example,
    /// rounding to the nearest 5 minutes uses `Unit::Minute` with an
    /// increment of 5.
    pub fn increment(self, increment: i64) -> InstantRound {
        InstantRound { increment, ..self }
    }

    /// Rounds the given instant with this configuration.
    pub(crate) fn round(&self, instant: Instant) -> Result<Instant, Error> {
        if self.smallest > Unit::Hour {
            return Err(invalid_args_err!(
                "rounding an instant does not support unit {unit} \
                 (the smallest unit must be one of nanosecond, \
                 microsecond, millisecond, second, minute or hour)",
                unit = self.smallest.singular(),
            ));
        }
        if self.increment <= 0 {
            return Err(invalid_args_err!(
                "rounding increment {increment} for {unit} units \
                 must be greater than zero",
                increment = self.increment,
                unit = self.smallest.singular(),
            ));
        }
        let divisor =
            i128::from(self.increment) * self.smallest.nanoseconds();
        trace!(
            "rounding instant {instant} to a multiple of \
             {divisor} nanoseconds",
        );
        let rounded = self.mode.round(instant.epoch_nanoseconds(), divisor);
        Ok(Instant::from_epoch_nanoseconds(rounded))
    }
}

impl Default for InstantRound {
    fn default() -> InstantRound {
        InstantRound {
            smallest: Unit::Nanosecond,
            mode: RoundMode::default(),
            increment: 1,
        }
    }
}

impl From<Unit> for InstantRound {
    fn from(unit: Unit) -> InstantRound {
        InstantRound::default().smallest(unit)
    }
}

impl From<(Unit, i64)> for InstantRound {
    fn from((unit, increment): (Unit, i64)) -> InstantRound {
        InstantRound::default().smallest(unit).increment(increment)
    }
}
