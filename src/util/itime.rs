/*!
This module defines the internal calendar arithmetic.

It converts a count of seconds since the Unix epoch (plus an offset) into a
Gregorian date, a clock time and a weekday. Everything here operates on
primitive integers and assumes its inputs come from a valid `Instant`, whose
range (roughly the years 1677 through 2262) keeps every intermediate value
well inside the types used.

# Naming

The types in this module are prefixed with letter `I` to make it clear that
they are internal types. Specifically, to distinguish them from the public
types. For example, `civil::DateTime` versus `IDateTime`.
*/

/// Seconds in one civil day. Leap seconds are not representable.
const SECONDS_PER_DAY: i64 = 86_400;

/// A Unix timestamp split into whole seconds and a non-negative fraction.
///
/// `nanosecond` is always in the range `0..=999_999_999`, even for instants
/// before the epoch. That is, `second` is the floor of the exact time.
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub(crate) struct ITimestamp {
    pub(crate) second: i64,
    pub(crate) nanosecond: i32,
}

impl ITimestamp {
    /// Splits a count of nanoseconds since the Unix epoch.
    #[inline(always)]
    pub(crate) const fn from_nanosecond(nanosecond: i64) -> ITimestamp {
        ITimestamp {
            second: nanosecond.div_euclid(1_000_000_000),
            nanosecond: nanosecond.rem_euclid(1_000_000_000) as i32,
        }
    }

    /// Converts this timestamp to a Gregorian datetime after shifting it by
    /// the given offset.
    ///
    /// The offset is the number of seconds to add to this timestamp to get
    /// the local wall clock time. Use `IOffset::UTC` for UTC fields.
    #[inline(always)]
    pub(crate) const fn to_datetime(&self, offset: IOffset) -> IDateTime {
        let second = self.second + offset.second as i64;
        let epoch_day = IEpochDay {
            epoch_day: second.div_euclid(SECONDS_PER_DAY) as i32,
        };
        let day_second = second.rem_euclid(SECONDS_PER_DAY) as i32;

        let date = epoch_day.to_date();
        let weekday = epoch_day.weekday();
        let mut time = ITimeSecond { second: day_second }.to_time();
        time.subsec_nanosecond = self.nanosecond;
        IDateTime { date, weekday, time }
    }
}

/// An offset from UTC in seconds. Positive values are east of UTC.
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub(crate) struct IOffset {
    pub(crate) second: i32,
}

impl IOffset {
    pub(crate) const UTC: IOffset = IOffset { second: 0 };
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub(crate) struct IDateTime {
    pub(crate) date: IDate,
    /// Days since Sunday, in the range `0..=6`.
    pub(crate) weekday: i8,
    pub(crate) time: ITime,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub(crate) struct IEpochDay {
    pub(crate) epoch_day: i32,
}

impl IEpochDay {
    /// Converts days since the Unix epoch to a Gregorian date.
    ///
    /// This is Neri-Schneider. There's no branching or divisions.
    ///
    /// Ref: <https://github.com/cassioneri/eaf/blob/684d3cc32d14eee371d0abe4f683d6d6a49ed5c1/algorithms/neri_schneider.hpp#L40C3-L40C34>
    #[inline(always)]
    #[allow(non_upper_case_globals, non_snake_case)] // to mimic source
    pub(crate) const fn to_date(&self) -> IDate {
        const s: u32 = 82;
        const K: u32 = 719468 + 146097 * s;
        const L: u32 = 400 * s;

        let N_U = self.epoch_day as u32;
        let N = N_U.wrapping_add(K);

        let N_1 = 4 * N + 3;
        let C = N_1 / 146097;
        let N_C = (N_1 % 146097) / 4;

        let N_2 = 4 * N_C + 3;
        let P_2 = 2939745 * (N_2 as u64);
        let Z = (P_2 / 4294967296) as u32;
        let N_Y = (P_2 % 4294967296) as u32 / 2939745 / 4;
        let Y = 100 * C + Z;

        let N_3 = 2141 * N_Y + 197913;
        let M = N_3 / 65536;
        let D = (N_3 % 65536) / 2141;

        let J = N_Y >= 306;
        let year = Y.wrapping_sub(L).wrapping_add(J as u32) as i16;
        let month = (if J { M - 12 } else { M }) as i8;
        let day = (D + 1) as i8;
        IDate { year, month, day }
    }

    /// Returns the day of the week as days since Sunday.
    ///
    /// 1970-01-01 was a Thursday.
    #[inline(always)]
    pub(crate) const fn weekday(&self) -> i8 {
        (self.epoch_day as i64 + 4).rem_euclid(7) as i8
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub(crate) struct IDate {
    pub(crate) year: i16,
    pub(crate) month: i8,
    pub(crate) day: i8,
}

impl IDate {
    /// Converts a Gregorian date to days since the Unix epoch.
    ///
    /// The inverse of `IEpochDay::to_date`. Only the tests need it.
    #[cfg(test)]
    #[allow(non_upper_case_globals, non_snake_case)] // to mimic source
    pub(crate) const fn to_epoch_day(&self) -> IEpochDay {
        const s: u32 = 82;
        const K: u32 = 719468 + 146097 * s;
        const L: u32 = 400 * s;

        let year = self.year as u32;
        let month = self.month as u32;
        let day = self.day as u32;

        let J = month <= 2;
        let Y = year.wrapping_add(L).wrapping_sub(J as u32);
        let M = if J { month + 12 } else { month };
        let D = day - 1;
        let C = Y / 100;

        let y_star = 1461 * Y / 4 - C + C / 4;
        let m_star = (979 * M - 2919) / 32;
        let N = y_star + m_star + D;

        let N_U = N.wrapping_sub(K);
        IEpochDay { epoch_day: N_U as i32 }
    }
}

/// A clock time to nanosecond precision.
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub(crate) struct ITime {
    pub(crate) hour: i8,
    pub(crate) minute: i8,
    pub(crate) second: i8,
    pub(crate) subsec_nanosecond: i32,
}

impl ITime {
    pub(crate) const ZERO: ITime =
        ITime { hour: 0, minute: 0, second: 0, subsec_nanosecond: 0 };
}

/// A single point in the day, to second precision.
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub(crate) struct ITimeSecond {
    pub(crate) second: i32,
}

impl ITimeSecond {
    #[inline(always)]
    pub(crate) const fn to_time(&self) -> ITime {
        let second = self.second;
        let mut time = ITime::ZERO;
        time.hour = (second / 3600) as i8;
        time.minute = ((second % 3600) / 60) as i8;
        time.second = (second % 60) as i8;
        time
    }
}

/// Returns true if and only if the given year is a leap year.
#[cfg(test)]
pub(crate) const fn is_leap_year(year: i16) -> bool {
    let d = if year % 25 != 0 { 4 } else { 16 };
    (year % d) == 0
}

/// Return the number of days in the given month.
#[cfg(test)]
pub(crate) const fn days_in_month(year: i16, month: i8) -> i8 {
    if month == 2 {
        if is_leap_year(year) {
            29
        } else {
            28
        }
    } else {
        30 | (month ^ month >> 3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(second: i64) -> IDateTime {
        ITimestamp { second, nanosecond: 0 }.to_datetime(IOffset::UTC)
    }

    #[test]
    fn roundtrip_epochday_date() {
        for year in 1677..=2262 {
            for month in 1..=12 {
                for day in 1..=days_in_month(year, month) {
                    let date = IDate { year, month, day };
                    let epoch_day = date.to_epoch_day();
                    assert_eq!(date, epoch_day.to_date());
                }
            }
        }
    }

    #[test]
    fn consecutive_epoch_days_are_consecutive_dates() {
        let mut prev = IEpochDay { epoch_day: -106_752 }.to_date();
        for epoch_day in -106_751..=106_751 {
            let date = IEpochDay { epoch_day }.to_date();
            if prev.day < days_in_month(prev.year, prev.month) {
                assert_eq!(date.year, prev.year);
                assert_eq!(date.month, prev.month);
                assert_eq!(date.day, prev.day + 1);
            } else {
                assert_eq!(date.day, 1, "after {prev:?}");
            }
            prev = date;
        }
    }

    #[test]
    fn known_datetimes() {
        let dt = utc(0);
        assert_eq!(dt.date, IDate { year: 1970, month: 1, day: 1 });
        assert_eq!(dt.weekday, 4);
        assert_eq!(dt.time, ITime::ZERO);

        let dt = utc(1633959411);
        assert_eq!(dt.date, IDate { year: 2021, month: 10, day: 11 });
        assert_eq!(dt.weekday, 1);
        assert_eq!(
            dt.time,
            ITime { hour: 13, minute: 36, second: 51, subsec_nanosecond: 0 }
        );

        let dt = utc(951_782_400);
        assert_eq!(dt.date, IDate { year: 2000, month: 2, day: 29 });
        assert_eq!(dt.weekday, 2);
    }

    #[test]
    fn negative_timestamps_use_floor() {
        let ts = ITimestamp::from_nanosecond(-1);
        assert_eq!(ts, ITimestamp { second: -1, nanosecond: 999_999_999 });

        let dt = ts.to_datetime(IOffset::UTC);
        assert_eq!(dt.date, IDate { year: 1969, month: 12, day: 31 });
        assert_eq!(dt.weekday, 3);
        assert_eq!(
            dt.time,
            ITime {
                hour: 23,
                minute: 59,
                second: 59,
                subsec_nanosecond: 999_999_999,
            }
        );
    }

    #[test]
    fn offset_shifts_wall_clock() {
        let ts = ITimestamp { second: 1633959411, nanosecond: 5 };
        let dt = ts.to_datetime(IOffset { second: 8 * 3600 });
        assert_eq!(dt.date, IDate { year: 2021, month: 10, day: 11 });
        assert_eq!(dt.time.hour, 21);
        assert_eq!(dt.time.subsec_nanosecond, 5);

        let dt = utc(0);
        let west = ITimestamp { second: 0, nanosecond: 0 }
            .to_datetime(IOffset { second: -5 * 3600 });
        assert_eq!(west.date, IDate { year: 1969, month: 12, day: 31 });
        assert_eq!(west.weekday, (dt.weekday + 6) % 7);
        assert_eq!(west.time.hour, 19);
    }
}
