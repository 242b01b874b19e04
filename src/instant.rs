use alloc::string::String;

use crate::{
    civil::{DateTime, Weekday},
    error::Error,
    fmt::{rfc3339::DateTimePrinter, Precision},
    tz::{self, Offset, OffsetResolver},
    util::itime::{IOffset, ITimestamp},
};

/// Nanoseconds in one second.
const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// An absolute point in time, as a count of nanoseconds since
/// `1970-01-01T00:00:00Z`.
///
/// The count is a signed 64-bit integer, so the representable range is
/// roughly the years 1677 through 2262. Instants before the Unix epoch are
/// fully supported. Leap seconds are not.
///
/// An `Instant` is plain data: it is `Copy`, it never changes after it is
/// created and it carries no time zone. The calendar fields reported by its
/// accessors (such as [`Instant::year`]) are always in UTC. The `format`
/// family of methods renders it at the host's local offset instead.
///
/// # Example
///
/// ```
/// use tinystamp::{civil::Weekday, Instant};
///
/// let instant = Instant::from_epoch_seconds(1633959411)?;
/// assert_eq!(instant.count(), 1_633_959_411_000_000_000);
/// assert_eq!(
///     (instant.year(), instant.month(), instant.day()),
///     (2021, 10, 11),
/// );
/// assert_eq!(instant.weekday(), Weekday::Monday);
/// assert_eq!(instant.to_string(), "2021-10-11T13:36:51Z");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Instant {
    nanosecond: i64,
}

impl Instant {
    /// The Unix epoch, `1970-01-01T00:00:00Z`.
    pub const UNIX_EPOCH: Instant = Instant { nanosecond: 0 };

    /// The earliest representable instant,
    /// `1677-09-21T00:12:43.145224192Z`.
    pub const MIN: Instant = Instant { nanosecond: i64::MIN };

    /// The latest representable instant,
    /// `2262-04-11T23:47:16.854775807Z`.
    pub const MAX: Instant = Instant { nanosecond: i64::MAX };

    /// Returns the current system time.
    ///
    /// # Errors
    ///
    /// When the system clock reports a time outside the range of `Instant`.
    /// This is rare enough that it usually indicates a misconfigured host.
    ///
    /// # Example
    ///
    /// ```
    /// use tinystamp::Instant;
    ///
    /// let a = Instant::now()?;
    /// let b = Instant::now()?;
    /// assert!(a <= b);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[cfg(feature = "std")]
    pub fn now() -> Result<Instant, Error> {
        use crate::error::timestamp::Error as E;

        Instant::try_from(std::time::SystemTime::now())
            .map_err(|err| err.context(E::SystemClock))
    }

    /// Creates an instant from a count of nanoseconds since the Unix epoch.
    ///
    /// Every `i64` is a valid instant, so this can't fail.
    #[inline]
    pub const fn from_nanosecond(nanosecond: i64) -> Instant {
        Instant { nanosecond }
    }

    /// Creates an instant from a whole number of seconds since the Unix
    /// epoch. The fractional second of the result is zero.
    ///
    /// # Errors
    ///
    /// When the number of nanoseconds in `second` overflows an `i64`.
    ///
    /// # Example
    ///
    /// ```
    /// use tinystamp::Instant;
    ///
    /// let instant = Instant::from_epoch_seconds(-1)?;
    /// assert_eq!(instant.count(), -1_000_000_000);
    /// assert_eq!(instant.to_string(), "1969-12-31T23:59:59Z");
    ///
    /// assert!(Instant::from_epoch_seconds(10_000_000_000).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_epoch_seconds(second: i64) -> Result<Instant, Error> {
        let Some(nanosecond) = second.checked_mul(NANOS_PER_SECOND) else {
            return Err(Error::range(
                "epoch seconds",
                second,
                i64::MIN / NANOS_PER_SECOND,
                i64::MAX / NANOS_PER_SECOND,
            ));
        };
        Ok(Instant { nanosecond })
    }

    /// Returns the raw count of nanoseconds since the Unix epoch.
    #[inline]
    pub const fn count(self) -> i64 {
        self.nanosecond
    }

    /// Returns the number of whole seconds since the Unix epoch.
    ///
    /// This rounds toward negative infinity, so that the remainder reported
    /// by [`Instant::nanosecond`] is never negative.
    ///
    /// # Example
    ///
    /// ```
    /// use tinystamp::Instant;
    ///
    /// let instant = Instant::from_nanosecond(-1);
    /// assert_eq!(instant.as_second(), -1);
    /// assert_eq!(instant.nanosecond(), 999_999_999);
    /// ```
    #[inline]
    pub const fn as_second(self) -> i64 {
        self.nanosecond.div_euclid(NANOS_PER_SECOND)
    }

    /// Returns the fractional second in nanoseconds, in the range
    /// `0..=999_999_999`.
    #[inline]
    pub const fn nanosecond(self) -> i32 {
        self.nanosecond.rem_euclid(NANOS_PER_SECOND) as i32
    }

    /// Returns the calendar fields of this instant in UTC.
    #[inline]
    pub fn to_datetime(self) -> DateTime {
        let its = ITimestamp::from_nanosecond(self.nanosecond);
        DateTime::from_idatetime(its.to_datetime(IOffset::UTC))
    }

    /// Returns the calendar fields of this instant as seen from the given
    /// offset.
    ///
    /// # Example
    ///
    /// ```
    /// use tinystamp::{tz::Offset, Instant};
    ///
    /// let instant = Instant::from_epoch_seconds(1633959411)?;
    /// let dt = instant.to_datetime_with_offset(Offset::constant(8));
    /// assert_eq!((dt.day(), dt.hour()), (11, 21));
    /// let dt = instant.to_datetime_with_offset(Offset::constant(-13));
    /// assert_eq!((dt.day(), dt.hour()), (11, 0));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[inline]
    pub fn to_datetime_with_offset(self, offset: Offset) -> DateTime {
        let its = ITimestamp::from_nanosecond(self.nanosecond);
        let ioffset = IOffset { second: offset.seconds() };
        DateTime::from_idatetime(its.to_datetime(ioffset))
    }

    /// Returns the year in UTC.
    #[inline]
    pub fn year(self) -> i16 {
        self.to_datetime().year()
    }

    /// Returns the month in UTC, in the range `1..=12`.
    #[inline]
    pub fn month(self) -> i8 {
        self.to_datetime().month()
    }

    /// Returns the day of the month in UTC, in the range `1..=31`.
    #[inline]
    pub fn day(self) -> i8 {
        self.to_datetime().day()
    }

    /// Returns the day of the week in UTC.
    ///
    /// Use [`Weekday::to_monday_one_offset`] for the ISO 8601 number.
    #[inline]
    pub fn weekday(self) -> Weekday {
        self.to_datetime().weekday()
    }

    /// Returns the hour in UTC, in the range `0..=23`.
    #[inline]
    pub fn hour(self) -> i8 {
        self.to_datetime().hour()
    }

    /// Returns the minute in UTC, in the range `0..=59`.
    #[inline]
    pub fn minute(self) -> i8 {
        self.to_datetime().minute()
    }

    /// Returns the second in UTC, in the range `0..=59`.
    #[inline]
    pub fn second(self) -> i8 {
        self.to_datetime().second()
    }

    /// Formats this instant as an RFC 3339 timestamp at the host's local
    /// offset, without fractional seconds.
    ///
    /// The local offset is looked up once per thread. See
    /// [`tz::system_offset`] for details.
    ///
    /// # Example
    ///
    /// ```
    /// use tinystamp::{tz, Instant};
    ///
    /// let instant = Instant::from_epoch_seconds(1633959411)?;
    /// let formatted = instant.format();
    /// if tz::system_offset().offset().is_zero() {
    ///     assert_eq!(formatted, "2021-10-11T13:36:51Z");
    /// }
    /// assert!(formatted.starts_with("2021-10-1"));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn format(&self) -> String {
        self.format_with(Precision::None, &tz::SystemOffset)
    }

    /// Like [`Instant::format`], but with millisecond precision.
    pub fn format_milli(&self) -> String {
        self.format_with(Precision::Milli, &tz::SystemOffset)
    }

    /// Like [`Instant::format`], but with microsecond precision.
    pub fn format_micro(&self) -> String {
        self.format_with(Precision::Micro, &tz::SystemOffset)
    }

    /// Like [`Instant::format`], but with nanosecond precision.
    ///
    /// As with every precision, the fraction is left off entirely when the
    /// instant falls on a whole second.
    pub fn format_nano(&self) -> String {
        self.format_with(Precision::Nano, &tz::SystemOffset)
    }

    /// Formats this instant with the given precision at whatever offset the
    /// resolver reports for it.
    ///
    /// # Example
    ///
    /// ```
    /// use tinystamp::{fmt::Precision, tz::{LocalOffset, Offset}, Instant};
    ///
    /// let instant = Instant::from_nanosecond(1_633_959_411_123_456_789);
    /// let cst = LocalOffset::new(Offset::constant(8), "CST")?;
    /// assert_eq!(
    ///     instant.format_with(Precision::Micro, &cst),
    ///     "2021-10-11T21:36:51.123456+08:00",
    /// );
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn format_with<R: OffsetResolver + ?Sized>(
        &self,
        precision: Precision,
        resolver: &R,
    ) -> String {
        let offset = resolver.resolve(*self).offset();
        DateTimePrinter::new()
            .precision(precision)
            .instant_with_offset_to_string(self, offset)
    }
}

impl core::fmt::Debug for Instant {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("Instant")
            .field("second", &self.as_second())
            .field("nanosecond", &self.nanosecond())
            .finish()
    }
}

/// Prints this instant in UTC with up to nanosecond precision.
///
/// This never consults the host time zone.
impl core::fmt::Display for Instant {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use crate::fmt::FmtWrite;

        static P: DateTimePrinter = DateTimePrinter::new();
        P.print_instant(self, FmtWrite(f)).map_err(|_| core::fmt::Error)
    }
}

#[cfg(feature = "std")]
impl TryFrom<std::time::SystemTime> for Instant {
    type Error = Error;

    fn try_from(system_time: std::time::SystemTime) -> Result<Instant, Error> {
        use crate::error::timestamp::Error as E;

        let unix_epoch = std::time::SystemTime::UNIX_EPOCH;
        let nanos = match system_time.duration_since(unix_epoch) {
            Ok(duration) => i128::try_from(duration.as_nanos()),
            Err(err) => i128::try_from(err.duration().as_nanos()).map(|n| -n),
        }
        .unwrap_or(i128::MAX);
        let nanosecond = i64::try_from(nanos).map_err(|_| {
            Error::range("system time nanoseconds", nanos, i64::MIN, i64::MAX)
                .context(E::SystemTimeUnrepresentable)
        })?;
        Ok(Instant { nanosecond })
    }
}

#[cfg(feature = "std")]
impl From<Instant> for std::time::SystemTime {
    fn from(instant: Instant) -> std::time::SystemTime {
        let unix_epoch = std::time::SystemTime::UNIX_EPOCH;
        let duration =
            std::time::Duration::from_nanos(instant.count().unsigned_abs());
        // `SystemTime` spans at least the range of an `i64` count of
        // nanoseconds on every supported platform.
        let shifted = if instant.count() >= 0 {
            unix_epoch.checked_add(duration)
        } else {
            unix_epoch.checked_sub(duration)
        };
        debug_assert!(
            shifted.is_some(),
            "{instant:?} is out of range for `SystemTime`",
        );
        shifted.unwrap_or(unix_epoch)
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Instant {
    fn arbitrary(g: &mut quickcheck::Gen) -> Instant {
        Instant::from_nanosecond(<i64 as quickcheck::Arbitrary>::arbitrary(g))
    }

    fn shrink(&self) -> alloc::boxed::Box<dyn Iterator<Item = Self>> {
        alloc::boxed::Box::new(
            quickcheck::Arbitrary::shrink(&self.nanosecond)
                .map(Instant::from_nanosecond),
        )
    }
}
