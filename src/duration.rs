use crate::{
    error::{err, range_err, Error, ErrorContext},
    fmt::duration::{DurationParser, DurationPrinter},
    round::Unit,
};

/// The exclusive bound on the magnitude of a calendar unit field.
///
/// Years, months and weeks have no fixed length, so they can never be
/// normalized against the other units. Rather than silently approximating,
/// values this big are rejected outright.
const MAX_CALENDAR_UNIT: i64 = 1 << 32;

/// The exclusive bound on the total magnitude of the non-calendar units,
/// in nanoseconds.
///
/// The bound itself is 2^53 *seconds*: the safe integer boundary. Keeping
/// totals below it means no arithmetic in this crate can silently lose
/// precision, and durations interoperate exactly with environments that
/// represent totals as 64-bit floats.
const MAX_INVARIANT_NANOSECONDS: i128 = (1 << 53) * 1_000_000_000;

/// A signed duration of time represented as a tuple of ten unit fields,
/// from years down to nanoseconds.
///
/// A `Duration` is immutable: it is validated once, at construction, and
/// every derived value (negation, absolute value, arithmetic results) is a
/// new instance. Construction enforces three invariants:
///
/// * All non-zero fields share the same sign. An all-zero duration has
/// sign `0`.
/// * Each calendar field (years, months, weeks) has a magnitude below
/// `2^32`.
/// * The non-calendar fields (days through nanoseconds), converted to
/// seconds with their fixed factors, total less than `2^53` in magnitude.
///
/// # Calendar durations
///
/// A duration is *calendar* when any of its years, months or weeks fields
/// is non-zero. Calendar units have no fixed length, so calendar durations
/// cannot be added, numerically compared or reduced to a nanosecond total:
/// [`Duration::add`], [`Duration::subtract`] and (for non-identical
/// operands) [`Duration::equals`] return a range error instead. This is a
/// deliberate non-goal of this crate, not a missing feature; it requires
/// date arithmetic relative to a starting point.
///
/// # Construction
///
/// Build a duration [from its ten fields](Duration::new), [from a field
/// struct](Duration::from_fields), [from an ISO 8601
/// string](core::str::FromStr), or [from any of those
/// shapes](Duration::from) via [`DurationLike`].
///
/// # Equality
///
/// The derived `==` compares the ten raw fields. The fallible
/// [`Duration::equals`] additionally treats unit-equivalent non-calendar
/// durations as equal (`P1D` equals `PT24H`) and errors when asked to
/// numerically compare a calendar duration.
///
/// # Example
///
/// ```
/// use tempora::Duration;
///
/// let duration: Duration = "P1DT12H".parse()?;
/// assert_eq!(duration.days(), 1);
/// assert_eq!(duration.hours(), 12);
/// assert_eq!(duration.signum(), 1);
/// # Ok::<(), tempora::Error>(())
/// ```
#[derive(Clone, Copy, Default, Eq, PartialEq)]
pub struct Duration {
    years: i64,
    months: i64,
    weeks: i64,
    days: i64,
    hours: i64,
    minutes: i64,
    seconds: i64,
    milliseconds: i64,
    microseconds: i64,
    nanoseconds: i64,
}

impl Duration {
    /// Creates a new duration from its ten unit fields, in descending
    /// unit order.
    ///
    /// # Errors
    ///
    /// Returns a range error when the fields mix signs, when a calendar
    /// field magnitude reaches `2^32` or when the non-calendar fields
    /// total `2^53` seconds or more in magnitude.
    ///
    /// # Example
    ///
    /// ```
    /// use tempora::Duration;
    ///
    /// let duration = Duration::new(0, 0, 0, 1, 4, 0, 0, 0, 0, 0)?;
    /// assert_eq!(duration.to_string(), "P1DT4H");
    ///
    /// // Mixed signs are rejected.
    /// assert!(Duration::new(1, 0, 0, 0, 0, 0, -3, 0, 0, 0).is_err());
    /// # Ok::<(), tempora::Error>(())
    /// ```
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        years: i64,
        months: i64,
        weeks: i64,
        days: i64,
        hours: i64,
        minutes: i64,
        seconds: i64,
        milliseconds: i64,
        microseconds: i64,
        nanoseconds: i64,
    ) -> Result<Duration, Error> {
        let duration = Duration {
            years,
            months,
            weeks,
            days,
            hours,
            minutes,
            seconds,
            milliseconds,
            microseconds,
            nanoseconds,
        };
        duration.check()?;
        Ok(duration)
    }

    /// Creates a new duration from any [`DurationLike`] value: another
    /// duration (copied), a [`DurationFields`] struct or an ISO 8601
    /// duration string.
    ///
    /// # Example
    ///
    /// ```
    /// use tempora::{Duration, DurationFields};
    ///
    /// let from_text = Duration::from("PT90M")?;
    /// let from_fields = Duration::from(DurationFields {
    ///     minutes: 90,
    ///     ..DurationFields::default()
    /// })?;
    /// assert_eq!(from_text, from_fields);
    /// # Ok::<(), tempora::Error>(())
    /// ```
    pub fn from<'a, L: Into<DurationLike<'a>>>(
        like: L,
    ) -> Result<Duration, Error> {
        match like.into() {
            DurationLike::Duration(duration) => Ok(duration),
            DurationLike::Fields(fields) => Duration::from_fields(fields),
            DurationLike::Str(string) => string.parse(),
        }
    }

    /// Creates a new duration from a [`DurationFields`] struct.
    ///
    /// This is convenient when only a few fields are non-zero, via struct
    /// update syntax with [`DurationFields::default`].
    pub fn from_fields(fields: DurationFields) -> Result<Duration, Error> {
        Duration::new(
            fields.years,
            fields.months,
            fields.weeks,
            fields.days,
            fields.hours,
            fields.minutes,
            fields.seconds,
            fields.milliseconds,
            fields.microseconds,
            fields.nanoseconds,
        )
    }

    /// Rebuilds a duration from a total nanosecond count by successive
    /// signed division with each non-calendar unit's length.
    ///
    /// The decomposition operates on the signed total directly, so each
    /// per-unit quotient and remainder carries the sign of the total. The
    /// result re-validates, since a total produced by arithmetic can
    /// exceed the duration bound.
    pub(crate) fn from_nanoseconds(
        nanoseconds: i128,
    ) -> Result<Duration, Error> {
        let mut remaining = nanoseconds;
        let mut take = |unit: Unit| {
            let value = remaining / unit.nanoseconds();
            remaining %= unit.nanoseconds();
            value as i64
        };
        let days = take(Unit::Day);
        let hours = take(Unit::Hour);
        let minutes = take(Unit::Minute);
        let seconds = take(Unit::Second);
        let milliseconds = take(Unit::Millisecond);
        let microseconds = take(Unit::Microsecond);
        let nanoseconds = take(Unit::Nanosecond);
        Duration::new(
            0,
            0,
            0,
            days,
            hours,
            minutes,
            seconds,
            milliseconds,
            microseconds,
            nanoseconds,
        )
    }

    fn check(&self) -> Result<(), Error> {
        uniform_sign(&self.fields())?;
        for (unit, value) in [
            (Unit::Year, self.years),
            (Unit::Month, self.months),
            (Unit::Week, self.weeks),
        ] {
            if value.unsigned_abs() >= MAX_CALENDAR_UNIT as u64 {
                return Err(range_err!(
                    "parameter '{unit}' with value {value} is not in the \
                     required range of {min}..={max}",
                    unit = unit.singular(),
                    min = -(MAX_CALENDAR_UNIT - 1),
                    max = MAX_CALENDAR_UNIT - 1,
                ));
            }
        }
        // i64::MIN has no i64 negation, which would poison `negate` and
        // `abs`. Its magnitude is far outside the duration bound for
        // every unit it could sneak through on, so rejecting it outright
        // costs nothing real.
        for value in self.fields() {
            if value == i64::MIN {
                return Err(range_err!(
                    "duration unit value {value} is not in the required \
                     range of {min}..={max}",
                    min = -i64::MAX,
                    max = i64::MAX,
                ));
            }
        }
        let total = self.total_nanoseconds();
        if total.unsigned_abs() >= MAX_INVARIANT_NANOSECONDS as u128 {
            return Err(range_err!(
                "non-calendar units (days through nanoseconds) total \
                 {seconds} seconds, but the total magnitude must be \
                 less than 2^53 seconds",
                seconds = total / Unit::Second.nanoseconds(),
            ));
        }
        Ok(())
    }

    /// Returns the sign of this duration: `-1` when every non-zero field
    /// is negative, `1` when every non-zero field is positive and `0`
    /// when all fields are zero.
    ///
    /// Sign uniformity is a construction invariant, so this never fails:
    /// the first non-zero field determines the answer.
    pub fn signum(&self) -> i8 {
        for value in self.fields() {
            if value != 0 {
                return if value < 0 { -1 } else { 1 };
            }
        }
        0
    }

    /// Returns true when this duration is zero. That is, when its sign
    /// is `0`.
    pub fn is_blank(&self) -> bool {
        self.signum() == 0
    }

    /// Returns true when any of this duration's years, months or weeks
    /// fields is non-zero.
    ///
    /// Calendar durations cannot be added, numerically compared or
    /// reduced to a nanosecond total.
    pub fn is_calendar(&self) -> bool {
        self.years != 0 || self.months != 0 || self.weeks != 0
    }

    /// Returns a new duration with the absolute value of every field.
    pub fn abs(&self) -> Duration {
        // Fieldwise `abs` cannot break any construction invariant, so
        // this builds the value directly.
        Duration {
            years: self.years.abs(),
            months: self.months.abs(),
            weeks: self.weeks.abs(),
            days: self.days.abs(),
            hours: self.hours.abs(),
            minutes: self.minutes.abs(),
            seconds: self.seconds.abs(),
            milliseconds: self.milliseconds.abs(),
            microseconds: self.microseconds.abs(),
            nanoseconds: self.nanoseconds.abs(),
        }
    }

    /// Returns a new duration with the sign of every field flipped.
    ///
    /// Negation is an involution: `duration.negate().negate()` is always
    /// fieldwise equal to `duration`.
    ///
    /// # Example
    ///
    /// ```
    /// use tempora::Duration;
    ///
    /// let duration: Duration = "-P1DT30M".parse()?;
    /// assert_eq!(duration.negate().to_string(), "P1DT30M");
    /// assert_eq!(-duration, duration.negate());
    /// # Ok::<(), tempora::Error>(())
    /// ```
    pub fn negate(&self) -> Duration {
        Duration {
            years: -self.years,
            months: -self.months,
            weeks: -self.weeks,
            days: -self.days,
            hours: -self.hours,
            minutes: -self.minutes,
            seconds: -self.seconds,
            milliseconds: -self.milliseconds,
            microseconds: -self.microseconds,
            nanoseconds: -self.nanoseconds,
        }
    }

    /// Adds two non-calendar durations.
    ///
    /// Both operands are reduced to a total nanosecond count, summed and
    /// rebalanced into days through nanoseconds. The result never carries
    /// calendar units.
    ///
    /// # Errors
    ///
    /// Returns a range error when either operand is a calendar duration
    /// (years, months and weeks have no fixed length; adding them
    /// requires date arithmetic relative to a starting point), or when
    /// the sum exceeds the duration bound.
    ///
    /// # Example
    ///
    /// ```
    /// use tempora::Duration;
    ///
    /// let d1: Duration = "PT20H".parse()?;
    /// let d2: Duration = "PT8H".parse()?;
    /// assert_eq!(d1.add(&d2)?.to_string(), "P1DT4H");
    ///
    /// let calendar: Duration = "P1Y".parse()?;
    /// assert!(calendar.add(&d1).unwrap_err().is_range());
    /// assert!(d1.add(&calendar).unwrap_err().is_range());
    /// # Ok::<(), tempora::Error>(())
    /// ```
    pub fn add(&self, other: &Duration) -> Result<Duration, Error> {
        if self.is_calendar() || other.is_calendar() {
            return Err(range_err!(
                "for years, months or weeks arithmetic, use date \
                 arithmetic relative to a starting point",
            ));
        }
        let total = self.total_nanoseconds() + other.total_nanoseconds();
        Duration::from_nanoseconds(total)
            .with_context(|| err!("failed to add {self} to {other}"))
    }

    /// Subtracts `other` from this duration.
    ///
    /// This is `self.add(&other.negate())`, and fails in exactly the
    /// cases [`Duration::add`] fails.
    pub fn subtract(&self, other: &Duration) -> Result<Duration, Error> {
        self.add(&other.negate())
    }

    /// Compares two durations for equality as quantities of time.
    ///
    /// Durations with identical fields are always equal. Otherwise, two
    /// non-calendar durations are equal when their nanosecond totals are
    /// equal, so `P1D` equals `PT24H`.
    ///
    /// # Errors
    ///
    /// Returns a range error when the fields differ and either operand is
    /// a calendar duration: without a starting point there is no fact of
    /// the matter about whether `P1Y` equals `P12M`. Equality on
    /// durations is a partial relation.
    ///
    /// # Example
    ///
    /// ```
    /// use tempora::Duration;
    ///
    /// let day: Duration = "P1D".parse()?;
    /// let hours: Duration = "PT24H".parse()?;
    /// assert!(day.equals(&hours)?);
    ///
    /// let year: Duration = "P1Y".parse()?;
    /// let months: Duration = "P12M".parse()?;
    /// assert!(year.equals(&months).unwrap_err().is_range());
    /// # Ok::<(), tempora::Error>(())
    /// ```
    pub fn equals(&self, other: &Duration) -> Result<bool, Error> {
        if self.fields() == other.fields() {
            return Ok(true);
        }
        if self.is_calendar() || other.is_calendar() {
            return Err(range_err!(
                "a starting point is required for years, months or \
                 weeks comparison",
            ));
        }
        Ok(self.total_nanoseconds() == other.total_nanoseconds())
    }

    /// Returns a builder for replacing some of this duration's fields.
    ///
    /// The builder's [`DurationWith::build`] performs a fresh validated
    /// construction over the merged field set, so every construction
    /// invariant re-applies.
    ///
    /// # Example
    ///
    /// ```
    /// use tempora::Duration;
    ///
    /// let duration: Duration = "P1DT4H".parse()?;
    /// let longer = duration.with().hours(20).build()?;
    /// assert_eq!(longer.to_string(), "P1DT20H");
    ///
    /// // The merged field set is validated as a whole.
    /// assert!(duration.with().minutes(-30).build().is_err());
    /// # Ok::<(), tempora::Error>(())
    /// ```
    pub fn with(self) -> DurationWith {
        DurationWith::new(self)
    }

    /// The total of the non-calendar fields in nanoseconds.
    ///
    /// Only meaningful for non-calendar durations; callers check
    /// [`Duration::is_calendar`] first.
    pub(crate) fn total_nanoseconds(&self) -> i128 {
        i128::from(self.days) * Unit::Day.nanoseconds()
            + i128::from(self.hours) * Unit::Hour.nanoseconds()
            + i128::from(self.minutes) * Unit::Minute.nanoseconds()
            + i128::from(self.seconds) * Unit::Second.nanoseconds()
            + i128::from(self.milliseconds) * Unit::Millisecond.nanoseconds()
            + i128::from(self.microseconds) * Unit::Microsecond.nanoseconds()
            + i128::from(self.nanoseconds)
    }

    fn fields(&self) -> [i64; 10] {
        [
            self.years,
            self.months,
            self.weeks,
            self.days,
            self.hours,
            self.minutes,
            self.seconds,
            self.milliseconds,
            self.microseconds,
            self.nanoseconds,
        ]
    }
}

/// Accessors for each of the ten unit fields.
impl Duration {
    /// Returns the years field.
    pub fn years(&self) -> i64 {
        self.years
    }

    /// Returns the months field.
    pub fn months(&self) -> i64 {
        self.months
    }

    /// Returns the weeks field.
    pub fn weeks(&self) -> i64 {
        self.weeks
    }

    /// Returns the days field.
    pub fn days(&self) -> i64 {
        self.days
    }

    /// Returns the hours field.
    pub fn hours(&self) -> i64 {
        self.hours
    }

    /// Returns the minutes field.
    pub fn minutes(&self) -> i64 {
        self.minutes
    }

    /// Returns the seconds field.
    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    /// Returns the milliseconds field.
    pub fn milliseconds(&self) -> i64 {
        self.milliseconds
    }

    /// Returns the microseconds field.
    pub fn microseconds(&self) -> i64 {
        self.microseconds
    }

    /// Returns the nanoseconds field.
    pub fn nanoseconds(&self) -> i64 {
        self.nanoseconds
    }
}

/// Checks that every non-zero value shares one sign and returns it.
fn uniform_sign(fields: &[i64; 10]) -> Result<i8, Error> {
    let mut sign = 0i8;
    for &value in fields {
        if value == 0 {
            continue;
        }
        let value_sign = if value < 0 { -1 } else { 1 };
        if sign == 0 {
            sign = value_sign;
        } else if sign != value_sign {
            return Err(range_err!(
                "mixed-sign values not allowed as duration unit fields",
            ));
        }
    }
    Ok(sign)
}

impl core::ops::Neg for Duration {
    type Output = Duration;

    fn neg(self) -> Duration {
        self.negate()
    }
}

impl core::str::FromStr for Duration {
    type Err = Error;

    fn from_str(string: &str) -> Result<Duration, Error> {
        DurationParser::new().parse_duration(string)
    }
}

impl core::fmt::Display for Duration {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        DurationPrinter::new().print_duration(self, f)
    }
}

impl core::fmt::Debug for Duration {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self, f)
    }
}

/// The three input shapes a [`Duration`] can be built from with
/// [`Duration::from`].
///
/// This is a sum type over the shapes rather than runtime type
/// inspection: each variant has exactly one conversion path into the one
/// validated constructor.
#[derive(Clone, Copy, Debug)]
pub enum DurationLike<'a> {
    /// An existing duration, copied as-is.
    Duration(Duration),
    /// A struct of the ten unit fields.
    Fields(DurationFields),
    /// An ISO 8601 duration string.
    Str(&'a str),
}

impl<'a> From<Duration> for DurationLike<'a> {
    fn from(duration: Duration) -> DurationLike<'a> {
        DurationLike::Duration(duration)
    }
}

impl<'a> From<DurationFields> for DurationLike<'a> {
    fn from(fields: DurationFields) -> DurationLike<'a> {
        DurationLike::Fields(fields)
    }
}

impl<'a> From<&'a str> for DurationLike<'a> {
    fn from(string: &'a str) -> DurationLike<'a> {
        DurationLike::Str(string)
    }
}

/// The ten unit fields of a [`Duration`], without its invariants.
///
/// Useful with struct update syntax when only a few fields are non-zero.
/// Validation happens when the struct is fed to
/// [`Duration::from_fields`] (or [`Duration::from`]).
///
/// # Example
///
/// ```
/// use tempora::{Duration, DurationFields};
///
/// let duration = Duration::from_fields(DurationFields {
///     days: 1,
///     hours: 4,
///     ..DurationFields::default()
/// })?;
/// assert_eq!(duration.to_string(), "P1DT4H");
/// # Ok::<(), tempora::Error>(())
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DurationFields {
    /// The years field.
    pub years: i64,
    /// The months field.
    pub months: i64,
    /// The weeks field.
    pub weeks: i64,
    /// The days field.
    pub days: i64,
    /// The hours field.
    pub hours: i64,
    /// The minutes field.
    pub minutes: i64,
    /// The seconds field.
    pub seconds: i64,
    /// The milliseconds field.
    pub milliseconds: i64,
    /// The microseconds field.
    pub microseconds: i64,
    /// The nanoseconds field.
    pub nanoseconds: i64,
}

/// A builder for replacing some of a [`Duration`]'s fields.
///
/// Created by [`Duration::with`]. Fields that are not set keep the
/// original duration's values. [`DurationWith::build`] runs the full
/// construction validation over the merged field set; this is a fresh
/// construction, not a patch.
#[derive(Clone, Copy, Debug)]
pub struct DurationWith {
    original: Duration,
    years: Option<i64>,
    months: Option<i64>,
    weeks: Option<i64>,
    days: Option<i64>,
    hours: Option<i64>,
    minutes: Option<i64>,
    seconds: Option<i64>,
    milliseconds: Option<i64>,
    microseconds: Option<i64>,
    nanoseconds: Option<i64>,
}

impl DurationWith {
    fn new(original: Duration) -> DurationWith {
        DurationWith {
            original,
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

    /// Builds the new duration, re-validating every invariant over the
    /// merged field set.
    pub fn build(self) -> Result<Duration, Error> {
        Duration::new(
            self.years.unwrap_or(self.original.years),
            self.months.unwrap_or(self.original.months),
            self.weeks.unwrap_or(self.original.weeks),
            self.days.unwrap_or(self.original.days),
            self.hours.unwrap_or(self.original.hours),
            self.minutes.unwrap_or(self.original.minutes),
            self.seconds.unwrap_or(self.original.seconds),
            self.milliseconds.unwrap_or(self.original.milliseconds),
            self.microseconds.unwrap_or(self.original.microseconds),
            self.nanoseconds.unwrap_or(self.original.nanoseconds),
        )
    }

    /// Replaces the years field.
    pub fn years(self, years: i64) -> DurationWith {
        DurationWith { years: Some(years), ..self }
    }

    /// Replaces the months field.
    pub fn months(self, months: i64) -> DurationWith {
        DurationWith { months: Some(months), ..self }
    }

    /// Replaces the weeks field.
    pub fn weeks(self, weeks: i64) -> DurationWith {
        DurationWith { weeks: Some(weeks), ..self }
    }

    /// Replaces the days field.
    pub fn days(self, days: i64) -> DurationWith {
        DurationWith { days: Some(days), ..self }
    }

    /// Replaces the hours field.
    pub fn hours(self, hours: i64) -> DurationWith {
        DurationWith { hours: Some(hours), ..self }
    }

    /// Replaces the minutes field.
    pub fn minutes(self, minutes: i64) -> DurationWith {
        DurationWith { minutes: Some(minutes), ..self }
    }

    /// Replaces the seconds field.
    pub fn seconds(self, seconds: i64) -> DurationWith {
        DurationWith { seconds: Some(seconds), ..self }
    }

    /// Replaces the milliseconds field.
    pub fn milliseconds(self, milliseconds: i64) -> DurationWith {
        DurationWith { milliseconds: Some(milliseconds), ..self }
    }

    /// Replaces the microseconds field.
    pub fn microseconds(self, microseconds: i64) -> DurationWith {
        DurationWith { microseconds: Some(microseconds), ..self }
    }

    /// Replaces the nanoseconds field.
    pub fn nanoseconds(self, nanoseconds: i64) -> DurationWith {
        DurationWith { nanoseconds: Some(nanoseconds), ..self }
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Duration {
    fn arbitrary(g: &mut quickcheck::Gen) -> Duration {
        // Small magnitudes with a uniform sign: comfortably inside every
        // construction bound, so `unwrap` is fine here.
        let sign = if bool::arbitrary(g) { 1 } else { -1 };
        let mut field = || i64::from(u8::arbitrary(g) % 100) * sign;
        Duration::new(
            field(),
            field(),
            field(),
            field(),
            field(),
            field(),
            field(),
            field(),
            field(),
            field(),
        )
        .unwrap()
    }
}
