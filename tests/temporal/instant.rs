use tempora::{Instant, InstantRound, RoundMode, Unit};

use crate::temporal::Result;

#[test]
fn from_epoch_nanoseconds() {
    let instant = Instant::from_epoch_nanoseconds(1_000_000_000);
    assert_eq!(instant.epoch_nanoseconds(), 1_000_000_000);
}

#[test]
fn from_epoch_milliseconds() {
    let instant = Instant::from_epoch_milliseconds(1_234_567);
    assert_eq!(instant.epoch_nanoseconds(), 1_234_567_000_000);
}

#[test]
fn from_instant_and_string() -> Result {
    let old = Instant::from_epoch_nanoseconds(1_234);
    let new = Instant::from(old)?;
    assert_eq!(new.epoch_nanoseconds(), 1_234);

    let utc = Instant::from("2019-03-30T00:45Z")?;
    assert_eq!(utc.epoch_nanoseconds(), 1_553_906_700_000_000_000);

    assert!(Instant::from("not a timestamp").unwrap_err().is_format());

    Ok(())
}

#[test]
fn epoch_milliseconds_floors() {
    let instant = Instant::from_epoch_nanoseconds(1_000_000_000);
    assert_eq!(instant.epoch_milliseconds(), 1_000);
}

#[test]
fn compare() {
    use std::cmp::Ordering;

    let one = Instant::from_epoch_nanoseconds(1_000);
    let two = Instant::from_epoch_nanoseconds(2_000);
    assert_eq!(Instant::compare(one, two), Ordering::Less);
    assert_eq!(Instant::compare(two, two), Ordering::Equal);
    assert_eq!(Instant::compare(two, one), Ordering::Greater);
}

/// Runs one row of the rounding table: parse the input, round it, and
/// check the result against the parsed expected timestamp.
fn round_case<R: Into<InstantRound>>(
    input: &str,
    options: R,
    expected: &str,
) -> Result {
    let input_instant = Instant::from(input)?;
    let got = input_instant.round(options)?;
    let expected_instant = Instant::from(expected)?;
    assert_eq!(
        got, expected_instant,
        "rounding {input} produced {got} instead of {expected}",
    );
    Ok(())
}

#[test]
fn round_with_default_increment_and_mode() -> Result {
    round_case("2024-01-01T08:15:36Z", Unit::Hour, "2024-01-01T08:00:00Z")?;
    round_case("2024-01-01T08:15:36Z", Unit::Minute, "2024-01-01T08:16:00Z")?;
    round_case(
        "2024-01-01T08:15:36.500Z",
        Unit::Second,
        "2024-01-01T08:15:37Z",
    )?;
    round_case(
        "2024-01-01T08:15:36.5004Z",
        Unit::Millisecond,
        "2024-01-01T08:15:36.5Z",
    )?;
    round_case(
        "2024-01-01T08:15:36.0001007Z",
        Unit::Microsecond,
        "2024-01-01T08:15:36.000101Z",
    )?;
    round_case(
        "2024-01-01T08:15:36.000100201Z",
        Unit::Nanosecond,
        "2024-01-01T08:15:36.000100201Z",
    )?;
    Ok(())
}

#[test]
fn round_with_increments_and_modes() -> Result {
    round_case(
        "2024-01-01T08:15:36Z",
        InstantRound::new().smallest(Unit::Hour),
        "2024-01-01T08:00:00Z",
    )?;
    round_case(
        "2024-01-01T08:15:36Z",
        InstantRound::new()
            .smallest(Unit::Hour)
            .increment(2)
            .mode(RoundMode::Ceil),
        "2024-01-01T10:00:00Z",
    )?;
    round_case(
        "2024-01-01T08:17:36Z",
        InstantRound::new()
            .smallest(Unit::Minute)
            .increment(3)
            .mode(RoundMode::Floor),
        "2024-01-01T08:15:00Z",
    )?;
    round_case(
        "2024-01-01T08:17:37Z",
        InstantRound::new()
            .smallest(Unit::Second)
            .increment(4)
            .mode(RoundMode::Expand),
        "2024-01-01T08:17:40Z",
    )?;
    round_case(
        "2024-01-01T08:15:36.504Z",
        InstantRound::new()
            .smallest(Unit::Millisecond)
            .increment(5)
            .mode(RoundMode::Trunc),
        "2024-01-01T08:15:36.500Z",
    )?;
    round_case(
        "2024-01-01T08:15:36.000105Z",
        InstantRound::new()
            .smallest(Unit::Microsecond)
            .increment(30)
            .mode(RoundMode::HalfCeil),
        "2024-01-01T08:15:36.000120Z",
    )?;
    round_case(
        "2024-01-01T08:15:36.000100249Z",
        InstantRound::new()
            .smallest(Unit::Nanosecond)
            .increment(100)
            .mode(RoundMode::HalfFloor),
        "2024-01-01T08:15:36.000100200Z",
    )?;
    round_case(
        "2024-01-01T08:15:36.000105Z",
        InstantRound::new()
            .smallest(Unit::Microsecond)
            .increment(30)
            .mode(RoundMode::HalfExpand),
        "2024-01-01T08:15:36.000120Z",
    )?;
    round_case(
        "2024-01-01T08:15:36.000100249Z",
        InstantRound::new()
            .smallest(Unit::Nanosecond)
            .increment(100)
            .mode(RoundMode::HalfTrunc),
        "2024-01-01T08:15:36.000100200Z",
    )?;
    Ok(())
}

#[test]
fn round_half_even_breaks_ties_to_even_multiples() -> Result {
    // 30s is a tie between the 08:15 and 08:16 minute marks. The even
    // multiple differs between the two.
    round_case(
        "2024-01-01T08:15:30Z",
        InstantRound::new().smallest(Unit::Minute).mode(RoundMode::HalfEven),
        "2024-01-01T08:16:00Z",
    )?;
    round_case(
        "2024-01-01T08:16:30Z",
        InstantRound::new().smallest(Unit::Minute).mode(RoundMode::HalfEven),
        "2024-01-01T08:16:00Z",
    )?;
    Ok(())
}

#[test]
fn round_pre_epoch_instants() -> Result {
    // Modes are anchored to the timeline, not to the epoch: floor still
    // goes toward negative infinity before 1970.
    round_case(
        "1969-12-31T23:59:30Z",
        InstantRound::new().smallest(Unit::Minute).mode(RoundMode::Floor),
        "1969-12-31T23:59:00Z",
    )?;
    round_case(
        "1969-12-31T23:59:30Z",
        InstantRound::new().smallest(Unit::Minute).mode(RoundMode::Trunc),
        "1969-12-31T23:59:00Z",
    )?;
    round_case(
        "1969-12-31T23:59:30Z",
        InstantRound::new().smallest(Unit::Minute).mode(RoundMode::Ceil),
        "1970-01-01T00:00:00Z",
    )?;
    round_case(
        "1969-12-31T23:59:30Z",
        InstantRound::new().smallest(Unit::Minute).mode(RoundMode::Expand),
        "1970-01-01T00:00:00Z",
    )?;
    Ok(())
}

#[test]
fn round_rejects_unsupported_units() {
    let instant = Instant::from_epoch_nanoseconds(0);
    for unit in [Unit::Day, Unit::Week, Unit::Month, Unit::Year] {
        let err = instant.round(unit).unwrap_err();
        assert!(err.is_invalid_arguments(), "unit {unit:?}: {err}");
    }
}
