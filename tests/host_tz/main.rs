// These tests change `TZ` for the whole process, so they live in their own
// test binary and run one after another from a single `#[test]`.

#![cfg(all(
    feature = "tz-system",
    any(target_os = "linux", target_os = "macos"),
))]

use tinystamp::{tz::LocalOffset, Instant};

/// 2021-10-11T13:36:51Z
const SAMPLE: i64 = 1_633_959_411;

/// Runs `f` with `TZ` set to `name`, restoring the previous value after.
fn with_tz<T>(name: &str, f: impl FnOnce() -> T) -> T {
    let previous = std::env::var_os("TZ");
    std::env::set_var("TZ", name);
    let result = f();
    match previous {
        Some(value) => std::env::set_var("TZ", value),
        None => std::env::remove_var("TZ"),
    }
    result
}

/// Formats `SAMPLE` on a new thread, whose cache starts out empty.
fn format_on_fresh_thread() -> String {
    std::thread::spawn(|| {
        Instant::from_epoch_seconds(SAMPLE).unwrap().format()
    })
    .join()
    .unwrap()
}

fn check_east_of_utc() {
    let local = LocalOffset::try_system().unwrap();
    assert_eq!(local.seconds(), 28_800);
    assert_eq!(local.abbreviation(), "CST");
    assert_eq!(format_on_fresh_thread(), "2021-10-11T21:36:51+08:00");
}

fn check_west_of_utc() {
    let local = LocalOffset::try_system().unwrap();
    assert_eq!(local.seconds(), -18_000);
    assert_eq!(local.abbreviation(), "EST");
    assert_eq!(format_on_fresh_thread(), "2021-10-11T08:36:51-05:00");
}

fn check_overlong_abbreviation() {
    let local = LocalOffset::try_system().unwrap();
    assert_eq!(local.seconds(), 20_700);
    assert_eq!(local.abbreviation(), "ABCDEFG");
    assert_eq!(format_on_fresh_thread(), "2021-10-11T19:21:51+05:45");
}

#[test]
fn known_zones() {
    // POSIX `TZ` offsets are hours west of UTC, so the signs are flipped.
    with_tz("CST-8", check_east_of_utc);
    with_tz("EST5", check_west_of_utc);
    with_tz("<ABCDEFGHIJ>-5:45", check_overlong_abbreviation);
    // A later lookup sees the new value rather than a stale one.
    with_tz("CST-8", check_east_of_utc);
}
