/*!
An RFC 3339 printer for instants.

The output is always one of these two shapes:

```text
YYYY-MM-DDTHH:MM:SS[.fff[fff[fff]]]Z
YYYY-MM-DDTHH:MM:SS[.fff[fff[fff]]]+HH:MM
```

The calendar fields are computed by shifting the instant by the offset and
then decomposing it with the proleptic Gregorian calendar in UTC. No time
zone database is consulted while printing, so the offset passed in is the
only thing that determines the wall clock time shown.
*/

use alloc::string::String;

use crate::{
    fmt::{buffer::ArrayBuffer, Precision, Write},
    tz::{Offset, OffsetResolver},
    Error, Instant,
};

/// The size of the stack buffer a timestamp is composed in.
///
/// The longest output is `YYYY-MM-DDTHH:MM:SS.fffffffff+HH:MM`, which is 35
/// bytes.
const MAX_LEN: usize = 35;

/// A printer for RFC 3339 timestamps.
///
/// This printer is configured with a fractional second [`Precision`] and
/// whether to use lowercase `t` and `z`. It is cheap to construct and can be
/// stored in a `static`.
///
/// # Example
///
/// ```
/// use tinystamp::{
///     fmt::{rfc3339::DateTimePrinter, Precision},
///     tz::Offset,
///     Instant,
/// };
///
/// static PRINTER: DateTimePrinter =
///     DateTimePrinter::new().precision(Precision::Micro);
///
/// let instant = Instant::from_nanosecond(1_633_959_411_123_456_789);
/// assert_eq!(
///     PRINTER.instant_with_offset_to_string(&instant, Offset::constant(-5)),
///     "2021-10-11T08:36:51.123456-05:00",
/// );
/// ```
#[derive(Clone, Debug)]
pub struct DateTimePrinter {
    lowercase: bool,
    precision: Precision,
}

impl DateTimePrinter {
    /// Create a new printer with nanosecond precision and uppercase
    /// separators.
    pub const fn new() -> DateTimePrinter {
        DateTimePrinter { lowercase: false, precision: Precision::Nano }
    }

    /// When enabled, the `T` separator and the `Z` suffix are printed in
    /// lowercase.
    ///
    /// # Example
    ///
    /// ```
    /// use tinystamp::{fmt::rfc3339::DateTimePrinter, Instant};
    ///
    /// let printer = DateTimePrinter::new().lowercase(true);
    /// assert_eq!(
    ///     printer.instant_to_string(&Instant::UNIX_EPOCH),
    ///     "1970-01-01t00:00:00z",
    /// );
    /// ```
    pub const fn lowercase(self, yes: bool) -> DateTimePrinter {
        DateTimePrinter { lowercase: yes, ..self }
    }

    /// Sets the number of fractional second digits to print.
    ///
    /// A fraction is only printed when the nanosecond component of the
    /// instant is non-zero. When it is printed, digits beyond the precision
    /// are truncated.
    ///
    /// # Example
    ///
    /// ```
    /// use tinystamp::{fmt::{rfc3339::DateTimePrinter, Precision}, Instant};
    ///
    /// let instant = Instant::from_nanosecond(1_500_000_000);
    /// let printer = DateTimePrinter::new().precision(Precision::Milli);
    /// assert_eq!(
    ///     printer.instant_to_string(&instant),
    ///     "1970-01-01T00:00:01.500Z",
    /// );
    ///
    /// let instant = Instant::from_nanosecond(1_000_000_000);
    /// assert_eq!(printer.instant_to_string(&instant), "1970-01-01T00:00:01Z");
    /// ```
    pub const fn precision(self, precision: Precision) -> DateTimePrinter {
        DateTimePrinter { precision, ..self }
    }

    /// Print the given instant in UTC to a string.
    pub fn instant_to_string(&self, instant: &Instant) -> String {
        self.instant_with_offset_to_string(instant, Offset::UTC)
    }

    /// Print the given instant at the given offset to a string.
    pub fn instant_with_offset_to_string(
        &self,
        instant: &Instant,
        offset: Offset,
    ) -> String {
        let mut buf = ArrayBuffer::<MAX_LEN>::default();
        self.print_to_buffer(instant, offset, &mut buf);
        String::from(buf.filled())
    }

    /// Print the given instant in UTC to the writer given.
    ///
    /// # Errors
    ///
    /// This only returns an error when the writer returns an error.
    pub fn print_instant<W: Write>(
        &self,
        instant: &Instant,
        wtr: W,
    ) -> Result<(), Error> {
        self.print_instant_with_offset(instant, Offset::UTC, wtr)
    }

    /// Print the given instant at the given offset to the writer given.
    ///
    /// # Errors
    ///
    /// This only returns an error when the writer returns an error.
    pub fn print_instant_with_offset<W: Write>(
        &self,
        instant: &Instant,
        offset: Offset,
        mut wtr: W,
    ) -> Result<(), Error> {
        let mut buf = ArrayBuffer::<MAX_LEN>::default();
        self.print_to_buffer(instant, offset, &mut buf);
        wtr.write_str(buf.filled())
    }

    /// Print the given instant at whatever offset the resolver reports for
    /// it.
    ///
    /// # Errors
    ///
    /// This only returns an error when the writer returns an error.
    ///
    /// # Example
    ///
    /// ```
    /// use tinystamp::{fmt::rfc3339::DateTimePrinter, tz::{LocalOffset, Offset}, Instant};
    ///
    /// let tokyo = LocalOffset::new(Offset::constant(9), "JST")?;
    /// let mut buf = String::new();
    /// DateTimePrinter::new().print_instant_resolved(
    ///     &Instant::UNIX_EPOCH,
    ///     &tokyo,
    ///     &mut buf,
    /// )?;
    /// assert_eq!(buf, "1970-01-01T09:00:00+09:00");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn print_instant_resolved<R: OffsetResolver + ?Sized, W: Write>(
        &self,
        instant: &Instant,
        resolver: &R,
        wtr: W,
    ) -> Result<(), Error> {
        let offset = resolver.resolve(*instant).offset();
        self.print_instant_with_offset(instant, offset, wtr)
    }

    /// Print just an offset, as it would appear at the end of a timestamp.
    pub(crate) fn print_offset<W: Write>(
        &self,
        offset: Offset,
        mut wtr: W,
    ) -> Result<(), Error> {
        let mut buf = ArrayBuffer::<6>::default();
        self.print_offset_to_buffer(offset, &mut buf);
        wtr.write_str(buf.filled())
    }

    fn print_to_buffer<const N: usize>(
        &self,
        instant: &Instant,
        offset: Offset,
        buf: &mut ArrayBuffer<N>,
    ) {
        let dt = instant.to_datetime_with_offset(offset);

        // Every representable instant has a positive four digit year.
        buf.write_int_pad0(u64::from(dt.year().unsigned_abs()), 4);
        buf.write_ascii_char(b'-');
        buf.write_int_pad0(u64::from(dt.month().unsigned_abs()), 2);
        buf.write_ascii_char(b'-');
        buf.write_int_pad0(u64::from(dt.day().unsigned_abs()), 2);
        buf.write_ascii_char(if self.lowercase { b't' } else { b'T' });
        buf.write_int_pad0(u64::from(dt.hour().unsigned_abs()), 2);
        buf.write_ascii_char(b':');
        buf.write_int_pad0(u64::from(dt.minute().unsigned_abs()), 2);
        buf.write_ascii_char(b':');
        buf.write_int_pad0(u64::from(dt.second().unsigned_abs()), 2);

        let nanosecond = dt.subsec_nanosecond().unsigned_abs();
        let digits = self.precision.digits();
        if digits > 0 && nanosecond != 0 {
            buf.write_ascii_char(b'.');
            buf.write_fraction(nanosecond, digits);
        }
        self.print_offset_to_buffer(offset, buf);
    }

    fn print_offset_to_buffer<const N: usize>(
        &self,
        offset: Offset,
        buf: &mut ArrayBuffer<N>,
    ) {
        if offset.is_zero() {
            buf.write_ascii_char(if self.lowercase { b'z' } else { b'Z' });
            return;
        }
        buf.write_ascii_char(if offset.is_negative() { b'-' } else { b'+' });
        buf.write_int_pad0(u64::from(offset.abs_hours()), 2);
        buf.write_ascii_char(b':');
        buf.write_int_pad0(u64::from(offset.abs_minutes()), 2);
    }
}

impl Default for DateTimePrinter {
    fn default() -> DateTimePrinter {
        DateTimePrinter::new()
    }
}
