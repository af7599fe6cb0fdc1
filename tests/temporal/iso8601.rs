use tempora::Duration;

use crate::temporal::Result;

#[test]
fn invalid_strings_are_format_errors() {
    let invalid = [
        "",
        "+",
        "-",
        "P",
        "+P",
        "-P",
        "P1",
        "PY",
        "PM",
        "P1YM",
        "P1M1Y",
        "P1Y1MW",
        "P1Y1M1WD",
        "PT",
        "P1YT",
        "PTH",
        "PT1HM",
        "PT1H1MS",
        "PT1.S",
        "PT1.0000000000S",
    ];
    for input in invalid {
        let err = input.parse::<Duration>().unwrap_err();
        assert!(
            err.is_format(),
            "duration string {input:?} should be a format error, got: {err}",
        );
        // A format error is a kind of range error.
        assert!(err.is_range(), "format error for {input:?} is not range");
    }
}

#[test]
fn signs_apply_to_every_field() -> Result {
    let duration: Duration = "P12Y".parse()?;
    assert_eq!(duration.years(), 12);
    assert_eq!(duration.months(), 0);

    let duration: Duration = "+P1Y".parse()?;
    assert_eq!(duration.years(), 1);
    assert_eq!(duration.signum(), 1);

    let duration: Duration = "-P1Y".parse()?;
    assert_eq!(duration.years(), -1);
    assert_eq!(duration.signum(), -1);

    let duration: Duration = "-P1DT2H3.000000004S".parse()?;
    assert_eq!(duration.days(), -1);
    assert_eq!(duration.hours(), -2);
    assert_eq!(duration.seconds(), -3);
    assert_eq!(duration.nanoseconds(), -4);

    Ok(())
}

#[test]
fn month_and_minute_share_a_letter() -> Result {
    let duration: Duration = "P12M".parse()?;
    assert_eq!(duration.months(), 12);
    assert_eq!(duration.minutes(), 0);

    let duration: Duration = "PT12M".parse()?;
    assert_eq!(duration.months(), 0);
    assert_eq!(duration.minutes(), 12);

    let duration: Duration = "P2MT1M".parse()?;
    assert_eq!(duration.months(), 2);
    assert_eq!(duration.minutes(), 1);

    Ok(())
}

#[test]
fn fractional_seconds_group_greedily() -> Result {
    // Groups of three digits, right-padded: milliseconds, microseconds,
    // nanoseconds. Absent groups collapse to zero in a Duration.
    let duration: Duration = "PT1.2S".parse()?;
    assert_eq!(duration.seconds(), 1);
    assert_eq!(duration.milliseconds(), 200);
    assert_eq!(duration.microseconds(), 0);
    assert_eq!(duration.nanoseconds(), 0);

    let duration: Duration = "PT1.2345S".parse()?;
    assert_eq!(duration.milliseconds(), 234);
    assert_eq!(duration.microseconds(), 500);
    assert_eq!(duration.nanoseconds(), 0);

    let duration: Duration = "PT1.234567898S".parse()?;
    assert_eq!(duration.milliseconds(), 234);
    assert_eq!(duration.microseconds(), 567);
    assert_eq!(duration.nanoseconds(), 898);

    Ok(())
}

#[test]
fn full_grammar_example() -> Result {
    let duration: Duration = "P1Y2M3W4DT5H6M7.008009010S".parse()?;
    assert_eq!(duration.years(), 1);
    assert_eq!(duration.months(), 2);
    assert_eq!(duration.weeks(), 3);
    assert_eq!(duration.days(), 4);
    assert_eq!(duration.hours(), 5);
    assert_eq!(duration.minutes(), 6);
    assert_eq!(duration.seconds(), 7);
    assert_eq!(duration.milliseconds(), 8);
    assert_eq!(duration.microseconds(), 9);
    assert_eq!(duration.nanoseconds(), 10);
    Ok(())
}

#[test]
fn canonical_strings_roundtrip_exactly() -> Result {
    let canonical = [
        "PT0S",
        "PT1S",
        "-PT1S",
        "P1Y",
        "P1Y1M1W1DT1H1M1.111111111S",
        "-P1Y1M1W1DT1H1M1.111111111S",
        "P40W",
        "P1DT4H",
        "PT0.999999999S",
    ];
    for input in canonical {
        let duration: Duration = input.parse()?;
        assert_eq!(
            duration.to_string(),
            input,
            "serialize(parse({input:?}))",
        );
        let reparsed: Duration = duration.to_string().parse()?;
        assert_eq!(reparsed, duration, "parse(serialize(parse({input:?})))");
    }
    Ok(())
}

#[test]
fn non_canonical_strings_normalize() -> Result {
    // Lowercase `p`/`t` markers and an explicit plus sign are accepted
    // on input, and zero fields drop out on output. (Unit letters are
    // not case-insensitive; only the markers are.)
    let duration: Duration = "+p1Y0M2Dt0H5M".parse()?;
    assert_eq!(duration.to_string(), "P1Y2DT5M");

    // An unbalanced minute count is preserved, not normalized.
    let duration: Duration = "PT90M".parse()?;
    assert_eq!(duration.to_string(), "PT90M");
    assert_eq!(duration.minutes(), 90);

    Ok(())
}
