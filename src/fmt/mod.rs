/*!
Printing instants as RFC 3339 timestamps.

The printer lives in [`rfc3339`]. This module defines the [`Write`] trait
that printers write into, and the [`Precision`] of fractional seconds.

# Example

```
use tinystamp::{fmt::{rfc3339::DateTimePrinter, Precision}, tz::Offset, Instant};

let instant = Instant::from_nanosecond(1_633_959_411_123_456_789);
let printer = DateTimePrinter::new().precision(Precision::Milli);
let mut buf = String::new();
printer.print_instant_with_offset(&instant, Offset::constant(8), &mut buf)?;
assert_eq!(buf, "2021-10-11T21:36:51.123+08:00");

# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

use alloc::{string::String, vec::Vec};

use crate::error::{err, Error};

mod buffer;
pub mod rfc3339;
#[cfg(feature = "serde")]
pub mod serde;

/// The number of fractional second digits to print.
///
/// Regardless of the precision, a fraction is only printed when the instant
/// has a non-zero nanosecond component. So a `Nano` precision may still
/// print no fraction at all, which keeps whole-second timestamps short.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Precision {
    /// No fractional seconds.
    None,
    /// Three digits (milliseconds).
    Milli,
    /// Six digits (microseconds).
    Micro,
    /// Nine digits (nanoseconds).
    #[default]
    Nano,
}

impl Precision {
    /// Returns the number of fractional digits for this precision: `0`, `3`,
    /// `6` or `9`.
    pub const fn digits(self) -> u8 {
        match self {
            Precision::None => 0,
            Precision::Milli => 3,
            Precision::Micro => 6,
            Precision::Nano => 9,
        }
    }
}

/// A trait for sinks that printers write to.
///
/// This is implemented for `String`, `Vec<u8>` and `&mut W` where
/// `W: Write`. Use [`FmtWrite`] to adapt a [`core::fmt::Write`] and
/// [`StdWrite`] to adapt a [`std::io::Write`].
///
/// Printers compose their whole output on the stack first, so a sink sees
/// exactly one `write_str` call per printed timestamp.
pub trait Write {
    /// Write the given string to this sink.
    fn write_str(&mut self, string: &str) -> Result<(), Error>;

    /// Write the given character to this sink.
    #[inline]
    fn write_char(&mut self, char: char) -> Result<(), Error> {
        self.write_str(char.encode_utf8(&mut [0; 4]))
    }
}

impl Write for String {
    #[inline]
    fn write_str(&mut self, string: &str) -> Result<(), Error> {
        self.push_str(string);
        Ok(())
    }
}

impl Write for Vec<u8> {
    #[inline]
    fn write_str(&mut self, string: &str) -> Result<(), Error> {
        self.extend_from_slice(string.as_bytes());
        Ok(())
    }
}

impl<W: Write + ?Sized> Write for &mut W {
    #[inline]
    fn write_str(&mut self, string: &str) -> Result<(), Error> {
        (**self).write_str(string)
    }

    #[inline]
    fn write_char(&mut self, char: char) -> Result<(), Error> {
        (**self).write_char(char)
    }
}

/// An adapter for using `std::io::Write` implementations with [`Write`].
///
/// # Example
///
/// ```
/// use tinystamp::{fmt::{rfc3339::DateTimePrinter, StdWrite}, Instant};
///
/// let mut out = vec![];
/// DateTimePrinter::new()
///     .print_instant(&Instant::UNIX_EPOCH, StdWrite(&mut out))?;
/// assert_eq!(out, b"1970-01-01T00:00:00Z");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[cfg(feature = "std")]
#[derive(Clone, Debug)]
pub struct StdWrite<W>(pub W);

#[cfg(feature = "std")]
impl<W: std::io::Write> Write for StdWrite<W> {
    #[inline]
    fn write_str(&mut self, string: &str) -> Result<(), Error> {
        self.0.write_all(string.as_bytes()).map_err(|e| {
            err!("failed to write timestamp to I/O sink: {e}")
        })
    }
}

/// An adapter for using `core::fmt::Write` implementations with [`Write`].
///
/// This is what the `Display` impl on [`Instant`](crate::Instant) uses.
#[derive(Clone, Debug)]
pub struct FmtWrite<W>(pub W);

impl<W: core::fmt::Write> Write for FmtWrite<W> {
    #[inline]
    fn write_str(&mut self, string: &str) -> Result<(), Error> {
        self.0
            .write_str(string)
            .map_err(|_| err!("an error occurred when formatting an argument"))
    }
}
