/*!
Calendar fields derived from an [`Instant`](crate::Instant).

A [`DateTime`] is never stored. It is recomputed on demand from an instant
and an offset, and it is always a valid Gregorian datetime.
*/

use crate::util::itime::IDateTime;

/// The calendar fields of an instant as seen from some UTC offset.
///
/// Values of this type are produced by [`Instant::to_datetime`] (UTC) and
/// [`Instant::to_datetime_with_offset`].
///
/// # Example
///
/// ```
/// use tinystamp::{civil::Weekday, Instant};
///
/// let dt = Instant::from_epoch_seconds(1633959411)?.to_datetime();
/// assert_eq!(dt.year(), 2021);
/// assert_eq!(dt.month(), 10);
/// assert_eq!(dt.day(), 11);
/// assert_eq!(dt.weekday(), Weekday::Monday);
/// assert_eq!((dt.hour(), dt.minute(), dt.second()), (13, 36, 51));
/// assert_eq!(dt.subsec_nanosecond(), 0);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// [`Instant::to_datetime`]: crate::Instant::to_datetime
/// [`Instant::to_datetime_with_offset`]: crate::Instant::to_datetime_with_offset
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct DateTime {
    year: i16,
    month: i8,
    day: i8,
    hour: i8,
    minute: i8,
    second: i8,
    subsec_nanosecond: i32,
    weekday: Weekday,
}

impl DateTime {
    pub(crate) const fn from_idatetime(idt: IDateTime) -> DateTime {
        DateTime {
            year: idt.date.year,
            month: idt.date.month,
            day: idt.date.day,
            hour: idt.time.hour,
            minute: idt.time.minute,
            second: idt.time.second,
            subsec_nanosecond: idt.time.subsec_nanosecond,
            weekday: Weekday::from_sunday_zero_offset(idt.weekday),
        }
    }

    /// The year. Every representable instant falls in `1677..=2262`.
    #[inline]
    pub fn year(self) -> i16 {
        self.year
    }

    /// The month of the year, in the range `1..=12`.
    #[inline]
    pub fn month(self) -> i8 {
        self.month
    }

    /// The day of the month, in the range `1..=31`.
    #[inline]
    pub fn day(self) -> i8 {
        self.day
    }

    /// The day of the week.
    #[inline]
    pub fn weekday(self) -> Weekday {
        self.weekday
    }

    /// The hour of the day, in the range `0..=23`.
    #[inline]
    pub fn hour(self) -> i8 {
        self.hour
    }

    /// The minute of the hour, in the range `0..=59`.
    #[inline]
    pub fn minute(self) -> i8 {
        self.minute
    }

    /// The second of the minute, in the range `0..=59`.
    ///
    /// Leap seconds are not represented.
    #[inline]
    pub fn second(self) -> i8 {
        self.second
    }

    /// The fractional part of the second in nanoseconds, in the range
    /// `0..=999_999_999`.
    #[inline]
    pub fn subsec_nanosecond(self) -> i32 {
        self.subsec_nanosecond
    }
}

/// A day of the week.
///
/// The integer conventions differ between standards, so this type offers
/// both. [`Weekday::to_monday_one_offset`] is ISO 8601 numbering and is what
/// [`Instant::weekday`](crate::Instant::weekday) uses.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Returns the ISO 8601 number of this weekday, where Monday is `1` and
    /// Sunday is `7`.
    ///
    /// # Example
    ///
    /// ```
    /// use tinystamp::civil::Weekday;
    ///
    /// assert_eq!(Weekday::Monday.to_monday_one_offset(), 1);
    /// assert_eq!(Weekday::Sunday.to_monday_one_offset(), 7);
    /// ```
    #[inline]
    pub fn to_monday_one_offset(self) -> i8 {
        self.to_monday_zero_offset() + 1
    }

    /// Returns the number of days since Monday, in the range `0..=6`.
    #[inline]
    pub fn to_monday_zero_offset(self) -> i8 {
        match self {
            Weekday::Monday => 0,
            Weekday::Tuesday => 1,
            Weekday::Wednesday => 2,
            Weekday::Thursday => 3,
            Weekday::Friday => 4,
            Weekday::Saturday => 5,
            Weekday::Sunday => 6,
        }
    }

    /// Returns the number of days since Sunday, in the range `0..=6`.
    ///
    /// This is the convention of C's `struct tm`.
    ///
    /// # Example
    ///
    /// ```
    /// use tinystamp::civil::Weekday;
    ///
    /// assert_eq!(Weekday::Sunday.to_sunday_zero_offset(), 0);
    /// assert_eq!(Weekday::Saturday.to_sunday_zero_offset(), 6);
    /// ```
    #[inline]
    pub fn to_sunday_zero_offset(self) -> i8 {
        (self.to_monday_zero_offset() + 1) % 7
    }

    /// Converts days since Sunday to a weekday. Values outside `0..=6` wrap.
    #[inline]
    pub(crate) const fn from_sunday_zero_offset(offset: i8) -> Weekday {
        match offset.rem_euclid(7) {
            0 => Weekday::Sunday,
            1 => Weekday::Monday,
            2 => Weekday::Tuesday,
            3 => Weekday::Wednesday,
            4 => Weekday::Thursday,
            5 => Weekday::Friday,
            _ => Weekday::Saturday,
        }
    }
}
