/*!
UTC offsets and the host's local offset.

This crate does not ship or read a time zone database. The only time zone
information it uses is:

* A fixed [`Offset`] given by the caller.
* The host's local offset, looked up once per thread through the C
library (see [`system_offset`]) and assumed not to change for the life of
the thread. DST transitions that happen while a thread is running are not
observed.

Printers accept anything implementing [`OffsetResolver`], so callers can
inject a fixed offset in place of the host lookup.
*/

use crate::{
    error::{tz::Error as E, Error},
    util::array_str::ArrayStr,
    Instant,
};

#[cfg(feature = "tz-system")]
mod system;

/// A fixed offset from UTC, in seconds east of UTC.
///
/// The magnitude of an offset is always less than one day. That is, the
/// number of seconds is in the range `-86_399..=86_399`.
///
/// # Display format
///
/// This type implements `Display` in the form it takes at the end of an
/// RFC 3339 timestamp: `Z` for a zero offset and `{sign}{HH}:{MM}`
/// otherwise. Seconds are not shown.
///
/// ```
/// use tinystamp::tz::Offset;
///
/// assert_eq!(Offset::UTC.to_string(), "Z");
/// assert_eq!(Offset::constant(8).to_string(), "+08:00");
/// assert_eq!(Offset::new(-18_000)?.to_string(), "-05:00");
/// assert_eq!(Offset::new(19_845)?.to_string(), "+05:30");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Offset {
    second: i32,
}

impl Offset {
    /// The minimum possible offset, `-23:59:59`.
    pub const MIN: Offset = Offset { second: -86_399 };

    /// The maximum possible offset, `+23:59:59`.
    pub const MAX: Offset = Offset { second: 86_399 };

    /// The offset of UTC. That is, no offset at all.
    pub const UTC: Offset = Offset { second: 0 };

    /// Creates an offset in a `const` context from a whole number of hours.
    ///
    /// # Panics
    ///
    /// When `hours` is outside the range `-23..=23`. In a `const` context,
    /// this is a compile error.
    pub const fn constant(hours: i8) -> Offset {
        assert!(-23 <= hours && hours <= 23, "offset hours out of range");
        Offset { second: hours as i32 * 3600 }
    }

    /// Creates an offset from a number of seconds east of UTC.
    ///
    /// # Errors
    ///
    /// When the magnitude of `seconds` is a day or more.
    pub fn new(seconds: i32) -> Result<Offset, Error> {
        if !(Offset::MIN.second..=Offset::MAX.second).contains(&seconds) {
            return Err(Error::range(
                "offset seconds",
                seconds,
                Offset::MIN.second,
                Offset::MAX.second,
            ));
        }
        Ok(Offset { second: seconds })
    }

    /// Returns the number of seconds east of UTC.
    #[inline]
    pub fn seconds(self) -> i32 {
        self.second
    }

    /// Returns true when this offset is west of UTC.
    #[inline]
    pub fn is_negative(self) -> bool {
        self.second < 0
    }

    /// Returns true when this is the UTC offset.
    #[inline]
    pub fn is_zero(self) -> bool {
        self.second == 0
    }

    /// Returns the whole hours in the magnitude of this offset, in the range
    /// `0..=23`.
    #[inline]
    pub fn abs_hours(self) -> u8 {
        (self.second.unsigned_abs() / 3600) as u8
    }

    /// Returns the whole minutes past the hour in the magnitude of this
    /// offset, in the range `0..=59`.
    ///
    /// Any leftover seconds are dropped.
    ///
    /// ```
    /// use tinystamp::tz::Offset;
    ///
    /// let offset = Offset::new(-(5 * 3600 + 45 * 60 + 30))?;
    /// assert_eq!((offset.abs_hours(), offset.abs_minutes()), (5, 45));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn abs_minutes(self) -> u8 {
        ((self.second.unsigned_abs() % 3600) / 60) as u8
    }
}

impl core::fmt::Debug for Offset {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "Offset({})", self.second)
    }
}

impl core::fmt::Display for Offset {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use crate::fmt::{rfc3339::DateTimePrinter, FmtWrite};

        static PRINTER: DateTimePrinter = DateTimePrinter::new();
        PRINTER
            .print_offset(*self, FmtWrite(f))
            .map_err(|_| core::fmt::Error)
    }
}

/// An offset paired with the short name the host uses for it.
///
/// This is what the host's local time lookup produces: for example, `+08:00`
/// with `"CST"`, or `-05:00` with `"EST"`. The abbreviation is at most seven
/// bytes and may be empty (which is what the UTC fallback uses).
///
/// A `LocalOffset` is itself an [`OffsetResolver`] that always resolves to
/// itself, so it can stand in for the host lookup.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct LocalOffset {
    offset: Offset,
    abbreviation: ArrayStr<7>,
}

impl LocalOffset {
    /// UTC with an empty abbreviation. This is what a failed host lookup
    /// falls back to.
    pub const UTC: LocalOffset =
        LocalOffset { offset: Offset::UTC, abbreviation: ArrayStr::EMPTY };

    /// Creates a new local offset.
    ///
    /// # Errors
    ///
    /// When `abbreviation` is longer than 7 bytes.
    ///
    /// # Example
    ///
    /// ```
    /// use tinystamp::tz::{LocalOffset, Offset};
    ///
    /// let local = LocalOffset::new(Offset::constant(-5), "EST")?;
    /// assert_eq!(local.offset().seconds(), -18_000);
    /// assert_eq!(local.abbreviation(), "EST");
    ///
    /// assert!(LocalOffset::new(Offset::UTC, "TOO-LONG").is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(offset: Offset, abbreviation: &str) -> Result<LocalOffset, Error> {
        let Some(abbreviation) = ArrayStr::new(abbreviation) else {
            return Err(Error::range(
                "time zone abbreviation length",
                abbreviation.len() as i128,
                0,
                7,
            ));
        };
        Ok(LocalOffset { offset, abbreviation })
    }

    /// Looks up the host's local offset at the current time, bypassing the
    /// per-thread cache.
    ///
    /// Most callers want [`system_offset`] instead, which never fails.
    ///
    /// # Errors
    ///
    /// When the current time can't be read, when the host lookup fails or
    /// reports something unusable, or when the `tz-system` crate feature is
    /// disabled.
    #[cfg(feature = "std")]
    pub fn try_system() -> Result<LocalOffset, Error> {
        let now = Instant::now()?;
        #[cfg(feature = "tz-system")]
        {
            system::lookup(now)
        }
        #[cfg(not(feature = "tz-system"))]
        {
            let _ = now;
            Err(Error::from(E::Disabled))
        }
    }

    /// Returns the offset.
    #[inline]
    pub fn offset(&self) -> Offset {
        self.offset
    }

    /// Returns the offset in seconds east of UTC.
    #[inline]
    pub fn seconds(&self) -> i32 {
        self.offset.seconds()
    }

    /// Returns the time zone abbreviation, e.g. `"EST"`. This may be empty.
    #[inline]
    pub fn abbreviation(&self) -> &str {
        self.abbreviation.as_str()
    }

    /// Validates the raw parts reported by a host lookup.
    ///
    /// Only the offset can make this fail. An abbreviation longer than 7
    /// bytes is cut down to its longest prefix that fits.
    #[allow(dead_code)] // not used when `tz-system` is disabled
    pub(crate) fn from_host(
        seconds: i64,
        abbreviation: &str,
    ) -> Result<LocalOffset, Error> {
        let offset = i32::try_from(seconds)
            .map_err(|_| {
                Error::range("offset seconds", seconds, i32::MIN, i32::MAX)
            })
            .and_then(Offset::new)
            .map_err(|err| err.context(E::InvalidOffset))?;
        let truncated = ArrayStr::truncated(abbreviation);
        if truncated.as_str().len() < abbreviation.len() {
            trace!(
                "truncated host time zone abbreviation \
                 {abbreviation:?} to {truncated:?}",
            );
        }
        Ok(LocalOffset { offset, abbreviation: truncated })
    }
}

impl Default for LocalOffset {
    fn default() -> LocalOffset {
        LocalOffset::UTC
    }
}

/// Returns the host's local offset for the current thread.
///
/// The first call on each thread asks the host for the offset at the current
/// time and caches the answer. Later calls on that thread return the cached
/// value. If the lookup fails, UTC with an empty abbreviation is cached
/// instead (and a warning is logged when the `logging` feature is enabled).
///
/// When the `tz-system` crate feature is disabled, this always returns
/// [`LocalOffset::UTC`].
///
/// # Example
///
/// ```
/// use tinystamp::tz;
///
/// let local = tz::system_offset();
/// assert!(local.seconds().abs() < 86_400);
/// assert!(local.abbreviation().len() <= 7);
/// assert_eq!(local, tz::system_offset());
/// ```
pub fn system_offset() -> LocalOffset {
    #[cfg(feature = "tz-system")]
    {
        system::cached()
    }
    #[cfg(not(feature = "tz-system"))]
    {
        LocalOffset::UTC
    }
}

/// A source of UTC offsets for printing instants.
///
/// The resolver is given the instant being printed. The implementations in
/// this crate ignore it: a [`LocalOffset`] or [`Offset`] is fixed, and
/// [`SystemOffset`] assumes the host offset never changes while a thread
/// runs. A caller with a real time zone library can implement this trait to
/// report the offset in effect at each instant.
pub trait OffsetResolver {
    /// Returns the offset (and its abbreviation) in effect at `instant`.
    fn resolve(&self, instant: Instant) -> LocalOffset;
}

impl OffsetResolver for LocalOffset {
    #[inline]
    fn resolve(&self, _: Instant) -> LocalOffset {
        *self
    }
}

impl OffsetResolver for Offset {
    #[inline]
    fn resolve(&self, _: Instant) -> LocalOffset {
        LocalOffset { offset: *self, abbreviation: ArrayStr::EMPTY }
    }
}

impl<R: OffsetResolver + ?Sized> OffsetResolver for &R {
    #[inline]
    fn resolve(&self, instant: Instant) -> LocalOffset {
        (**self).resolve(instant)
    }
}

/// The host's local offset, cached per thread.
///
/// This resolves through [`system_offset`]. It is what
/// [`Instant::format`](crate::Instant::format) and friends use.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemOffset;

impl OffsetResolver for SystemOffset {
    #[inline]
    fn resolve(&self, _: Instant) -> LocalOffset {
        system_offset()
    }
}
