/// The first `format` on a thread resolves the host offset and every later
/// call reuses it, so the first call is the slow one. This checks that
/// neither is unreasonably slow and that both agree.
#[cfg(feature = "std")]
#[test]
fn first_format_on_a_thread() {
    use std::time::{Duration, Instant as StdInstant};

    use tinystamp::{tz, Instant};

    let _ = crate::Logger::init();

    // Run on a fresh thread so the cache is guaranteed to be empty.
    std::thread::spawn(|| {
        let now = Instant::now().unwrap();

        let start = StdInstant::now();
        let first = now.format_nano();
        let first_elapsed = start.elapsed();
        println!(
            "first-format-elapsed-microseconds:{}",
            first_elapsed.as_micros()
        );

        let start = StdInstant::now();
        let second = now.format_nano();
        let second_elapsed = start.elapsed();
        println!(
            "second-format-elapsed-microseconds:{}",
            second_elapsed.as_micros()
        );

        assert_eq!(first, second);
        assert_eq!(tz::system_offset(), tz::system_offset());

        // Resolving the offset is one call into the C library. Even on a
        // slow CI machine this should be nowhere near the limit.
        let limit = Duration::from_millis(500);
        assert!(
            first_elapsed < limit,
            "first `format_nano` took {first_elapsed:?}, limit is {limit:?}",
        );
    })
    .join()
    .unwrap();
}

/// An uncached lookup always agrees with the cached one, unless the host
/// lookup fails, in which case the cache holds UTC.
#[cfg(feature = "std")]
#[test]
fn uncached_lookup_matches_cache() {
    use tinystamp::tz::{self, LocalOffset};

    let _ = crate::Logger::init();

    let cached = tz::system_offset();
    match LocalOffset::try_system() {
        Ok(fresh) => assert_eq!(fresh.offset(), cached.offset()),
        Err(err) => {
            println!("host lookup unavailable: {err}");
            assert_eq!(cached, LocalOffset::UTC);
        }
    }
}
