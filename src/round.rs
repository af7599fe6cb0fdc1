/// A unit of time, from nanoseconds up to years.
///
/// Every unit from days on down has a fixed length in nanoseconds.
/// Years, months and weeks do not: they are *calendar* units whose length
/// depends on a reference date this crate never has. Operations that need
/// a fixed length reject calendar units.
///
/// # Examples
///
/// `Unit` has an ordering defined such that bigger units compare greater
/// than smaller units.
///
/// ```
/// use tempora::Unit;
///
/// assert!(Unit::Year > Unit::Nanosecond);
/// assert!(Unit::Day > Unit::Hour);
/// assert!(Unit::Hour > Unit::Minute);
/// assert_eq!(Unit::Hour, Unit::Hour);
/// ```
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum Unit {
    /// A year. A calendar unit with no fixed length.
    Year = 9,
    /// A month. A calendar unit with no fixed length.
    Month = 8,
    /// A week. A calendar unit with no fixed length.
    Week = 7,
    /// A day, always `86,400` seconds long in this crate.
    Day = 6,
    /// An hour, `3,600` seconds.
    Hour = 5,
    /// A minute, `60` seconds.
    Minute = 4,
    /// A second.
    Second = 3,
    /// A millisecond, `10^-3` seconds.
    Millisecond = 2,
    /// A microsecond, `10^-6` seconds.
    Microsecond = 1,
    /// A nanosecond, `10^-9` seconds.
    Nanosecond = 0,
}

impl Unit {
    /// Returns the number of nanoseconds in this unit.
    ///
    /// # Panics
    ///
    /// When this unit is a calendar unit. That is, years, months or weeks.
    /// Callers are expected to reject calendar units before doing any
    /// invariant arithmetic.
    pub(crate) fn nanoseconds(self) -> i128 {
        match self {
            Unit::Nanosecond => 1,
            Unit::Microsecond => 1_000,
            Unit::Millisecond => 1_000_000,
            Unit::Second => 1_000_000_000,
            Unit::Minute => 60_000_000_000,
            Unit::Hour => 3_600_000_000_000,
            Unit::Day => 86_400_000_000_000,
            unit => unreachable!("{unit:?} has no definitive time interval"),
        }
    }

    /// A human readable singular description of this unit of time.
    pub(crate) fn singular(&self) -> &'static str {
        match *self {
            Unit::Year => "year",
            Unit::Month => "month",
            Unit::Week => "week",
            Unit::Day => "day",
            Unit::Hour => "hour",
            Unit::Minute => "minute",
            Unit::Second => "second",
            Unit::Millisecond => "millisecond",
            Unit::Microsecond => "microsecond",
            Unit::Nanosecond => "nanosecond",
        }
    }
}

#[cfg(test)]
impl Unit {
    fn from_usize(n: usize) -> Option<Unit> {
        match n {
            0 => Some(Unit::Nanosecond),
            1 => Some(Unit::Microsecond),
            2 => Some(Unit::Millisecond),
            3 => Some(Unit::Second),
            4 => Some(Unit::Minute),
            5 => Some(Unit::Hour),
            6 => Some(Unit::Day),
            7 => Some(Unit::Week),
            8 => Some(Unit::Month),
            9 => Some(Unit::Year),
            _ => None,
        }
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Unit {
    fn arbitrary(g: &mut quickcheck::Gen) -> Unit {
        Unit::from_usize(usize::arbitrary(g) % 10).unwrap()
    }

    fn shrink(&self) -> alloc::boxed::Box<dyn Iterator<Item = Self>> {
        alloc::boxed::Box::new(
            (*self as usize)
                .shrink()
                .map(|n| Unit::from_usize(n % 10).unwrap()),
        )
    }
}

/// The mode for rounding an [`Instant`](crate::Instant).
///
/// Instants are points on a timeline, not signed quantities, so "away from
/// zero" and "toward zero" have no useful meaning for them: `Expand` is an
/// alias of `Ceil` and `Trunc` is an alias of `Floor` (and likewise for
/// their `Half` variants). The full set of names is kept so that rounding
/// configurations written against the Temporal vocabulary port over
/// unchanged.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum RoundMode {
    /// Rounds toward positive infinity.
    Ceil,
    /// Rounds toward negative infinity.
    Floor,
    /// An alias of `Ceil`.
    Expand,
    /// An alias of `Floor`.
    Trunc,
    /// Rounds at ties toward positive infinity.
    HalfCeil,
    /// Rounds at ties toward negative infinity.
    HalfFloor,
    /// An alias of `HalfCeil`. This is the default.
    #[default]
    HalfExpand,
    /// An alias of `HalfFloor`.
    HalfTrunc,
    /// Rounds at ties toward an even rounding increment multiple.
    HalfEven,
}

impl RoundMode {
    /// Rounds `quantity` to a multiple of `increment` according to this
    /// mode.
    ///
    /// All arithmetic is exact. The quotient and remainder come from floor
    /// division, so the remainder is always non-negative and "up" always
    /// means toward positive infinity, which is what the mode semantics
    /// above are defined in terms of.
    ///
    /// Callers must ensure `increment > 0`.
    pub(crate) fn round(self, quantity: i128, increment: i128) -> i128 {
        let quotient = quantity.div_euclid(increment);
        let remainder = quantity.rem_euclid(increment);
        if remainder == 0 {
            return quantity;
        }
        let tiebreaker = remainder * 2;
        let tie = tiebreaker == increment;
        let up_is_nearer = tiebreaker > increment;
        let up = match self {
            RoundMode::Ceil | RoundMode::Expand => true,
            RoundMode::Floor | RoundMode::Trunc => false,
            RoundMode::HalfCeil | RoundMode::HalfExpand => {
                up_is_nearer || tie
            }
            RoundMode::HalfFloor | RoundMode::HalfTrunc => up_is_nearer,
            RoundMode::HalfEven => {
                up_is_nearer || (tie && quotient.rem_euclid(2) == 1)
            }
        };
        let quotient = if up { quotient + 1 } else { quotient };
        // Saturating because this can overflow when `quantity` is near the
        // maximum value. Since we're rounding, we refuse to go over the
        // maximum rather than return an error.
        quotient.saturating_mul(increment)
    }
}
