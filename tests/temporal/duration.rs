use tempora::{Duration, DurationFields};

use crate::temporal::Result;

#[test]
fn new_populates_every_field() -> Result {
    let duration = Duration::new(10, 8, 6, 4, 2, 1, 3, 5, 7, 9)?;
    assert_eq!(duration.years(), 10);
    assert_eq!(duration.months(), 8);
    assert_eq!(duration.weeks(), 6);
    assert_eq!(duration.days(), 4);
    assert_eq!(duration.hours(), 2);
    assert_eq!(duration.minutes(), 1);
    assert_eq!(duration.seconds(), 3);
    assert_eq!(duration.milliseconds(), 5);
    assert_eq!(duration.microseconds(), 7);
    assert_eq!(duration.nanoseconds(), 9);

    let zero = Duration::default();
    assert_eq!(zero.years(), 0);
    assert_eq!(zero.nanoseconds(), 0);

    Ok(())
}

#[test]
fn new_rejects_oversized_calendar_fields() {
    let big = 1i64 << 32;
    for fields in [[big, 0, 0], [0, big, 0], [0, 0, big]] {
        let result = Duration::new(
            fields[0], fields[1], fields[2], 0, 0, 0, 0, 0, 0, 0,
        );
        assert!(result.unwrap_err().is_range(), "fields: {fields:?}");
    }
}

#[test]
fn new_rejects_oversized_non_calendar_totals() {
    let day = 24 * 60 * 60;
    let cases: [[i64; 10]; 3] = [
        [0, 0, 0, (1 << 53) / day + 1, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 1 << 53, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, (1 << 53) * 1_000, 0, 0],
    ];
    for fields in cases {
        let result = Duration::new(
            fields[0], fields[1], fields[2], fields[3], fields[4],
            fields[5], fields[6], fields[7], fields[8], fields[9],
        );
        assert!(result.unwrap_err().is_range(), "fields: {fields:?}");
    }
}

#[test]
fn new_rejects_mixed_signs() {
    let result = Duration::new(1, 0, -1, 0, 4, 0, -3, 0, 2, 0);
    assert!(result.unwrap_err().is_range());
}

#[test]
fn from_duration_copies() -> Result {
    let original = Duration::new(1, 2, 3, 4, 5, 6, 7, 8, 9, 10)?;
    let copy = Duration::from(original)?;
    assert_eq!(copy, original);
    Ok(())
}

#[test]
fn from_fields_defaults_to_zero() -> Result {
    let duration = Duration::from(DurationFields {
        years: 1,
        months: 2,
        weeks: 3,
        days: 4,
        hours: 5,
        minutes: 6,
        seconds: 7,
        milliseconds: 8,
        microseconds: 9,
        nanoseconds: 10,
    })?;
    assert_eq!(duration, Duration::new(1, 2, 3, 4, 5, 6, 7, 8, 9, 10)?);

    let sparse = Duration::from(DurationFields {
        hours: 2,
        ..DurationFields::default()
    })?;
    assert_eq!(sparse.hours(), 2);
    assert_eq!(sparse.years(), 0);
    assert_eq!(sparse.nanoseconds(), 0);

    Ok(())
}

#[test]
fn from_iso8601_string() -> Result {
    let duration = Duration::from("P1Y2M40W4DT5H6M678.008009010S")?;
    assert_eq!(duration.years(), 1);
    assert_eq!(duration.months(), 2);
    assert_eq!(duration.weeks(), 40);
    assert_eq!(duration.days(), 4);
    assert_eq!(duration.hours(), 5);
    assert_eq!(duration.minutes(), 6);
    assert_eq!(duration.seconds(), 678);
    assert_eq!(duration.milliseconds(), 8);
    assert_eq!(duration.microseconds(), 9);
    assert_eq!(duration.nanoseconds(), 10);
    Ok(())
}

#[test]
fn sign() -> Result {
    assert_eq!(Duration::new(1, 0, 0, 0, 0, 0, 0, 0, 0, 0)?.signum(), 1);
    assert_eq!(Duration::new(1, 1, 1, 1, 1, 1, 1, 1, 1, 1)?.signum(), 1);
    assert_eq!(Duration::new(-1, 0, 0, 0, 0, 0, 0, 0, 0, 0)?.signum(), -1);
    assert_eq!(
        Duration::new(-1, -1, -1, -1, -1, -1, -1, -1, -1, -1)?.signum(),
        -1,
    );
    assert_eq!(Duration::default().signum(), 0);
    Ok(())
}

#[test]
fn blank() -> Result {
    assert!(!Duration::new(1, 0, 0, 0, 0, 0, 0, 0, 0, 0)?.is_blank());
    assert!(Duration::default().is_blank());
    Ok(())
}

#[test]
fn abs() -> Result {
    let ones = Duration::new(1, 1, 1, 1, 1, 1, 1, 1, 1, 1)?;
    let minus_ones = Duration::new(-1, -1, -1, -1, -1, -1, -1, -1, -1, -1)?;
    assert_eq!(minus_ones.abs(), ones);
    assert_eq!(ones.abs(), ones);
    assert_eq!(Duration::default().abs(), Duration::default());
    Ok(())
}

#[test]
fn equal_is_a_partial_relation() -> Result {
    // Numeric comparison of a calendar duration has no answer.
    let year: Duration = "P1Y".parse()?;
    let twelve_months = Duration::new(0, 12, 0, 0, 0, 0, 0, 0, 0, 0)?;
    assert!(year.equals(&twelve_months).unwrap_err().is_range());

    let day: Duration = "P1D".parse()?;
    assert!(day.equals(&Duration::new(0, 0, 0, 1, 0, 0, 0, 0, 0, 0)?)?);
    assert!(!day.equals(&Duration::new(0, 0, 0, 2, 0, 0, 0, 0, 0, 0)?)?);
    assert!(year.equals(&Duration::new(1, 0, 0, 0, 0, 0, 0, 0, 0, 0)?)?);

    assert!(day.equals(&"PT24H".parse()?)?);
    assert!("PT1H".parse::<Duration>()?.equals(&"PT60M".parse()?)?);
    assert!("PT1M".parse::<Duration>()?.equals(&"PT60S".parse()?)?);

    Ok(())
}

#[test]
fn add_rejects_calendar_operands_in_both_positions() -> Result {
    let non_calendar = Duration::new(0, 0, 0, 1, 0, 0, 0, 0, 0, 0)?;
    let calendar_cases = [
        Duration::new(1, 0, 0, 0, 0, 0, 0, 0, 0, 0)?,
        Duration::new(0, 1, 0, 0, 0, 0, 0, 0, 0, 0)?,
        Duration::new(0, 0, 1, 0, 0, 0, 0, 0, 0, 0)?,
    ];
    for calendar in calendar_cases {
        assert!(calendar.add(&non_calendar).unwrap_err().is_range());
        assert!(non_calendar.add(&calendar).unwrap_err().is_range());
    }
    Ok(())
}

#[test]
fn add_balances_through_units() -> Result {
    let sum = Duration::from("P1D")?.add(&Duration::from("P2D")?)?;
    assert!(sum.equals(&Duration::from("P3D")?)?);

    let sum = Duration::from("PT20H")?.add(&Duration::from("PT8H")?)?;
    assert!(sum.equals(&Duration::from("P1DT4H")?)?);
    assert_eq!(sum.days(), 1);
    assert_eq!(sum.hours(), 4);

    let sum = Duration::from("PT20H")?.add(&Duration::from("PT6H60M3600S")?)?;
    assert!(sum.equals(&Duration::from("P1DT4H")?)?);

    Ok(())
}

#[test]
fn subtract_is_add_of_negation() -> Result {
    let diff = Duration::from("P3D")?.subtract(&Duration::from("P1D")?)?;
    assert!(diff.equals(&Duration::from("P2D")?)?);

    let diff = Duration::from("PT4H")?.subtract(&Duration::from("PT6H")?)?;
    assert_eq!(diff.to_string(), "-PT2H");

    Ok(())
}

#[test]
fn negated_is_an_involution() -> Result {
    let all_ones = Duration::new(1, 1, 1, 1, 1, 1, 1, 1, 1, 1)?;
    let all_zeros = Duration::default();
    let all_minus_ones =
        Duration::new(-1, -1, -1, -1, -1, -1, -1, -1, -1, -1)?;

    assert_eq!(all_minus_ones.negate(), all_ones);
    assert_eq!(all_ones.negate(), all_minus_ones);
    assert_eq!(all_zeros.negate(), all_zeros);
    assert_eq!(-all_ones, all_ones.negate());
    assert_eq!(all_ones.negate().negate(), all_ones);

    Ok(())
}

#[test]
fn identity_is_a_copy() -> Result {
    let duration: Duration = "P1Y1M1W1DT1H1M1S".parse()?;
    let copy = duration;
    assert_eq!(copy, duration);
    Ok(())
}

#[test]
fn with_rebuilds_with_overrides() -> Result {
    let duration: Duration = "P1DT4H".parse()?;
    let updated = duration.with().hours(20).minutes(30).build()?;
    assert_eq!(updated.to_string(), "P1DT20H30M");
    // The original is untouched.
    assert_eq!(duration.to_string(), "P1DT4H");

    // The merged field set is re-validated in full.
    assert!(duration.with().seconds(-1).build().unwrap_err().is_range());

    Ok(())
}
