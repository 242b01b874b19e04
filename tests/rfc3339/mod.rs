use tinystamp::{
    civil::Weekday,
    fmt::{rfc3339::DateTimePrinter, FmtWrite, Precision},
    tz::{LocalOffset, Offset, OffsetResolver},
    Instant,
};

const SAMPLE: i64 = 1633959411;

fn sample(nanosecond: i64) -> Instant {
    Instant::from_nanosecond(SAMPLE * 1_000_000_000 + nanosecond)
}

#[test]
fn sample_at_utc_and_plus_eight() {
    let instant = Instant::from_epoch_seconds(SAMPLE).unwrap();
    assert_eq!(instant.count(), SAMPLE * 1_000_000_000);
    assert_eq!(instant.weekday(), Weekday::Monday);

    let utc = instant.format_with(Precision::None, &Offset::UTC);
    insta::assert_snapshot!(utc, @"2021-10-11T13:36:51Z");

    let cst = LocalOffset::new(Offset::constant(8), "CST").unwrap();
    let local = instant.format_with(Precision::None, &cst);
    insta::assert_snapshot!(local, @"2021-10-11T21:36:51+08:00");
}

#[test]
fn every_precision() {
    let instant = sample(123_456_789);
    let print = |p| instant.format_with(p, &Offset::UTC);
    insta::assert_snapshot!(print(Precision::None), @"2021-10-11T13:36:51Z");
    insta::assert_snapshot!(
        print(Precision::Milli),
        @"2021-10-11T13:36:51.123Z"
    );
    insta::assert_snapshot!(
        print(Precision::Micro),
        @"2021-10-11T13:36:51.123456Z"
    );
    insta::assert_snapshot!(
        print(Precision::Nano),
        @"2021-10-11T13:36:51.123456789Z"
    );
}

#[test]
fn whole_seconds_have_no_fraction() {
    let instant = sample(0);
    assert!(!instant.format_nano().contains('.'));
    assert!(!instant.format_micro().contains('.'));
    assert!(!instant.format_milli().contains('.'));
    assert!(!instant.format().contains('.'));
}

#[test]
fn format_family_agrees_with_system_offset() {
    let instant = sample(987_654_321);
    let system = tinystamp::tz::system_offset();
    assert_eq!(
        instant.format_milli(),
        instant.format_with(Precision::Milli, &system)
    );
    assert!(instant.format_milli().ends_with(&system.offset().to_string()));
}

#[test]
fn odd_offsets() {
    let instant = Instant::UNIX_EPOCH;
    let print = |seconds| {
        let offset = Offset::new(seconds).unwrap();
        instant.format_with(Precision::Nano, &offset)
    };
    assert_eq!(print(19_800), "1970-01-01T05:30:00+05:30");
    assert_eq!(print(-34_200), "1969-12-31T14:30:00-09:30");
    assert_eq!(print(-(5 * 3600 + 59)), "1969-12-31T18:59:01-05:00");
}

#[test]
fn resolver_sees_the_instant() {
    /// Pretends there is a DST transition at the Unix epoch.
    struct Toggle;

    impl OffsetResolver for Toggle {
        fn resolve(&self, instant: Instant) -> LocalOffset {
            if instant < Instant::UNIX_EPOCH {
                LocalOffset::new(Offset::constant(1), "CET").unwrap()
            } else {
                LocalOffset::new(Offset::constant(2), "CEST").unwrap()
            }
        }
    }

    let before = Instant::from_nanosecond(-1_000_000_000);
    assert_eq!(
        before.format_with(Precision::None, &Toggle),
        "1970-01-01T00:59:59+01:00"
    );
    assert_eq!(
        Instant::UNIX_EPOCH.format_with(Precision::None, &Toggle),
        "1970-01-01T02:00:00+02:00"
    );
}

#[test]
fn printing_into_sinks() {
    let printer = DateTimePrinter::new().precision(Precision::Micro);
    let instant = sample(500_000);

    let mut bytes = vec![];
    printer.print_instant(&instant, &mut bytes).unwrap();
    assert_eq!(bytes, b"2021-10-11T13:36:51.000500Z");

    let mut out = String::new();
    printer
        .print_instant_with_offset(&instant, Offset::constant(-3), &mut out)
        .unwrap();
    assert_eq!(out, "2021-10-11T10:36:51.000500-03:00");

    struct Sink(String);

    impl core::fmt::Write for Sink {
        fn write_str(&mut self, s: &str) -> core::fmt::Result {
            self.0.push_str(s);
            Ok(())
        }
    }

    let mut sink = Sink(String::new());
    DateTimePrinter::new()
        .lowercase(true)
        .print_instant(&instant, FmtWrite(&mut sink))
        .unwrap();
    assert_eq!(sink.0, "2021-10-11t13:36:51.000500000z");
}

#[cfg(feature = "std")]
#[test]
fn failing_io_sink_reports_an_error() {
    use tinystamp::fmt::StdWrite;

    struct Full;

    impl std::io::Write for Full {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let err = DateTimePrinter::new()
        .print_instant(&Instant::UNIX_EPOCH, StdWrite(Full))
        .unwrap_err();
    assert!(!err.is_range());
    insta::assert_snapshot!(
        err,
        @"failed to write timestamp to I/O sink: disk full"
    );
}

#[test]
fn fields_survive_round_trip_through_text() {
    // Not a parser: just check the printed digits line up with the
    // accessors for a spread of instants, including before the epoch.
    for nanos in [
        i64::MIN,
        -86_400_000_000_001,
        -1,
        0,
        951_782_400_000_000_000, // 2000-02-29
        SAMPLE * 1_000_000_000 + 42,
        i64::MAX,
    ] {
        let instant = Instant::from_nanosecond(nanos);
        let printed = instant.to_string();
        let dt = instant.to_datetime();
        assert_eq!(printed[0..4].parse::<i16>().unwrap(), dt.year());
        assert_eq!(printed[5..7].parse::<i8>().unwrap(), dt.month());
        assert_eq!(printed[8..10].parse::<i8>().unwrap(), dt.day());
        assert_eq!(printed[11..13].parse::<i8>().unwrap(), dt.hour());
        assert_eq!(printed[14..16].parse::<i8>().unwrap(), dt.minute());
        assert_eq!(printed[17..19].parse::<i8>().unwrap(), dt.second());
    }
}
