use std::cell::Cell;

use crate::{
    error::{tz::Error as E, Error},
    tz::LocalOffset,
    Instant,
};

std::thread_local! {
    /// The host offset for this thread, once it has been looked up.
    static CACHED: Cell<Option<LocalOffset>> = const { Cell::new(None) };
}

/// Returns this thread's cached host offset, looking it up first if this
/// thread hasn't done so yet.
pub(super) fn cached() -> LocalOffset {
    // `try_with` only fails while the thread is being torn down. Resolve
    // without caching in that case.
    CACHED
        .try_with(|cell| match cell.get() {
            Some(local) => local,
            None => {
                let local = resolve_or_utc();
                cell.set(Some(local));
                local
            }
        })
        .unwrap_or_else(|_| resolve_or_utc())
}

fn resolve_or_utc() -> LocalOffset {
    let result = Instant::now().and_then(lookup);
    match result {
        Ok(local) => {
            debug!(
                "resolved host UTC offset to {offset} ({abbrev:?})",
                offset = local.offset(),
                abbrev = local.abbreviation(),
            );
            local
        }
        Err(_err) => {
            warn!(
                "failed to resolve host UTC offset, \
                 falling back to UTC: {_err}",
            );
            LocalOffset::UTC
        }
    }
}

#[cfg(any(
    target_os = "linux",
    target_os = "android",
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
    target_os = "netbsd",
    target_os = "openbsd",
    target_os = "dragonfly",
))]
extern "C" {
    // POSIX, but not exported by the `libc` crate on these targets.
    fn tzset();
}

/// Asks the C library for the local offset in effect at `instant`.
#[cfg(any(
    target_os = "linux",
    target_os = "android",
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
    target_os = "netbsd",
    target_os = "openbsd",
    target_os = "dragonfly",
))]
pub(super) fn lookup(instant: Instant) -> Result<LocalOffset, Error> {
    use core::ffi::CStr;

    let second = instant.as_second();
    let time = libc::time_t::try_from(second)
        .map_err(|_| Error::from(E::LocalTime { second }))?;
    // SAFETY: `tm` is plain old data, so all zeroes is a valid value. It is
    // fully overwritten by a successful `localtime_r` call.
    let mut tm: libc::tm = unsafe { core::mem::zeroed() };
    // `localtime_r` isn't required to re-read `TZ`, so `tzset` comes first
    // in order for a fresh lookup to see the current value.
    //
    // SAFETY: `tzset` takes no arguments and only initializes the C
    // library's time zone state from the environment. `localtime_r` is
    // given valid pointers to a live `time_t` and a live `tm`, and does not
    // retain either.
    let result = unsafe {
        tzset();
        libc::localtime_r(&time, &mut tm)
    };
    if result.is_null() {
        return Err(Error::from(E::LocalTime { second }));
    }
    trace!(
        "localtime_r({second}) reported gmtoff={gmtoff}, isdst={isdst}",
        gmtoff = tm.tm_gmtoff,
        isdst = tm.tm_isdst,
    );

    let abbreviation = if tm.tm_zone.is_null() {
        ""
    } else {
        // SAFETY: A non-null `tm_zone` set by `localtime_r` points to a
        // NUL terminated string owned by the C library. It stays valid at
        // least until the next call that changes the time zone state, and
        // we copy out of it before returning.
        let zone = unsafe { CStr::from_ptr(tm.tm_zone) };
        // The offset is still good without a name.
        zone.to_str().unwrap_or_else(|_err| {
            trace!("ignoring host time zone abbreviation: {_err}");
            ""
        })
    };
    #[allow(clippy::useless_conversion)] // `c_long` is `i32` on some hosts
    let gmtoff = i64::from(tm.tm_gmtoff);
    LocalOffset::from_host(gmtoff, abbreviation)
}

#[cfg(not(any(
    target_os = "linux",
    target_os = "android",
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
    target_os = "netbsd",
    target_os = "openbsd",
    target_os = "dragonfly",
)))]
pub(super) fn lookup(_instant: Instant) -> Result<LocalOffset, Error> {
    Err(Error::from(E::Disabled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_is_stable() {
        let first = cached();
        for _ in 0..10 {
            assert_eq!(first, cached());
        }
        assert_eq!(CACHED.with(|cell| cell.get()), Some(first));
    }

    #[test]
    fn cached_offset_is_sane() {
        let local = cached();
        assert!(local.seconds().abs() < 86_400);
        assert!(local.abbreviation().len() <= 7);
    }

    #[test]
    fn each_thread_has_its_own_cache() {
        // Prime this thread, then confirm a new thread starts empty.
        let here = cached();
        let there = std::thread::spawn(|| {
            let before = CACHED.with(|cell| cell.get());
            (before, cached())
        })
        .join()
        .unwrap();
        assert_eq!(there.0, None);
        // Nothing in this test changes the host time zone.
        assert_eq!(there.1.offset(), here.offset());
    }

    #[test]
    fn lookup_epoch() {
        // A failed lookup is acceptable on exotic hosts, but anything that
        // is returned must be valid.
        if let Ok(local) = lookup(Instant::UNIX_EPOCH) {
            assert!(local.seconds().abs() < 86_400);
            assert!(local.abbreviation().len() <= 7);
        }
    }
}
