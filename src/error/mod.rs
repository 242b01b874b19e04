use alloc::{boxed::Box, sync::Arc};

pub(crate) mod timestamp;
pub(crate) mod tz;

/// The error type for every fallible operation in this crate.
///
/// Errors are rare here. Formatting never fails once an [`Instant`] exists.
/// The cases that do produce an error are:
///
/// * A value is out of range. For example, a number of epoch seconds whose
/// nanosecond count does not fit in an `i64`, or a UTC offset of a day or
/// more.
/// * The system clock reports a time that can't be represented.
/// * The host's local time zone could not be resolved. (This is only
/// reported by the fallible `LocalOffset::try_system`. The cached lookup
/// used for formatting falls back to UTC instead.)
/// * A sink given to a printer failed to accept the output.
///
/// # Inspecting errors
///
/// Beyond `Display`, `Debug` and (with `std`) [`std::error::Error`], the
/// only way to ask what went wrong is [`Error::is_range`].
///
/// # Design
///
/// There is one error type for every fallible operation. A chain of causes
/// is kept so that a high level message ("failed to read system clock") can
/// wrap the low level reason ("value out of range").
///
/// [`Instant`]: crate::Instant
#[derive(Clone)]
pub struct Error {
    /// Behind an `Arc` so that an `Error` is one word and cheap to clone.
    inner: Arc<ErrorInner>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

impl Error {
    /// Creates an error carrying only a message.
    ///
    /// This is useful for implementations of [`fmt::Write`](crate::fmt::Write)
    /// that need to report their own failures. Build the arguments with
    /// [`format_args!`](format_args).
    ///
    /// # Example
    ///
    /// ```
    /// use tinystamp::Error;
    ///
    /// let err = Error::from_args(format_args!("sink is closed"));
    /// assert_eq!(err.to_string(), "sink is closed");
    /// ```
    pub fn from_args<'a>(message: core::fmt::Arguments<'a>) -> Error {
        Error::from(ErrorKind::Adhoc(AdhocError::from_args(message)))
    }

    /// Returns true when the root cause of this error is a value outside of
    /// its allowed range.
    ///
    /// # Example
    ///
    /// ```
    /// use tinystamp::{tz::Offset, Instant};
    ///
    /// assert!(Instant::from_epoch_seconds(i64::MAX).unwrap_err().is_range());
    /// assert!(Offset::new(86_400).unwrap_err().is_range());
    /// ```
    pub fn is_range(&self) -> bool {
        matches!(*self.root().kind(), ErrorKind::Range(_))
    }
}

impl Error {
    /// Reports that `given` is not in `min..=max`. `what` names the value in
    /// the message, e.g. "epoch seconds".
    #[inline(never)]
    #[cold]
    pub(crate) fn range(
        what: &'static str,
        given: impl Into<i128>,
        min: impl Into<i128>,
        max: impl Into<i128>,
    ) -> Error {
        Error::from(ErrorKind::Range(RangeError {
            what,
            given: given.into(),
            min: min.into(),
            max: max.into(),
        }))
    }

    /// Wraps this error with a higher level error. The higher level error
    /// is printed first and this one becomes its cause.
    #[inline(never)]
    #[cold]
    pub(crate) fn context(self, consequent: impl IntoError) -> Error {
        let mut err = consequent.into_error();
        // We just built `err`, so nothing else holds a reference to it and
        // it has no cause yet.
        match Arc::get_mut(&mut err.inner) {
            Some(inner) if inner.cause.is_none() => {
                inner.cause = Some(self);
                err
            }
            _ => self,
        }
    }

    /// Returns the root error in this chain.
    fn root(&self) -> &Error {
        let mut err = self;
        while let Some(ref cause) = err.inner.cause {
            err = cause;
        }
        err
    }

    /// Returns a chain of error values, starting with the highest level
    /// context and ending with the root cause.
    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut next = Some(self);
        core::iter::from_fn(move || {
            let err = next?;
            next = err.inner.cause.as_ref();
            Some(err)
        })
    }

    fn kind(&self) -> &ErrorKind {
        &self.inner.kind
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            f.debug_struct("Error")
                .field("kind", &self.inner.kind)
                .field("cause", &self.inner.cause)
                .finish()
        }
    }
}

/// The underlying kind of a [`Error`].
#[derive(Debug)]
enum ErrorKind {
    Adhoc(AdhocError),
    Range(RangeError),
    Timestamp(self::timestamp::Error),
    TzSystem(self::tz::Error),
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match *self {
            Adhoc(ref msg) => core::fmt::Display::fmt(msg, f),
            Range(ref err) => core::fmt::Display::fmt(err, f),
            Timestamp(ref err) => core::fmt::Display::fmt(err, f),
            TzSystem(ref err) => core::fmt::Display::fmt(err, f),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error { inner: Arc::new(ErrorInner { kind, cause: None }) }
    }
}

/// A trait for internal error types that can be turned into an [`Error`].
///
/// This is what `Error::context` accepts, so that call sites can pass the
/// small per-module error enums directly.
pub(crate) trait IntoError {
    fn into_error(self) -> Error;
}

impl IntoError for Error {
    fn into_error(self) -> Error {
        self
    }
}

/// A plain message.
///
/// This backs the `Error::from_args` public API and the errors produced by
/// writer adapters, whose underlying error types carry no information we
/// could otherwise preserve.
struct AdhocError {
    message: Box<str>,
}

impl AdhocError {
    fn from_args<'a>(message: core::fmt::Arguments<'a>) -> AdhocError {
        use alloc::string::ToString;

        AdhocError { message: message.to_string().into_boxed_str() }
    }
}

impl core::fmt::Display for AdhocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.message, f)
    }
}

impl core::fmt::Debug for AdhocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Debug::fmt(&self.message, f)
    }
}

/// A value that fell outside its allowed range. The message names the value
/// and shows both the value and the bounds.
#[derive(Debug)]
struct RangeError {
    what: &'static str,
    given: i128,
    min: i128,
    max: i128,
}

impl core::fmt::Display for RangeError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let RangeError { what, given, min, max } = *self;
        write!(
            f,
            "parameter '{what}' with value {given} \
             is not in the required range of {min}..={max}",
        )
    }
}

/// Creates a new ad hoc error value.
///
/// This accepts the same arguments as the `format!` macro.
macro_rules! err {
    ($($tt:tt)*) => {{
        crate::error::Error::from_args(format_args!($($tt)*))
    }}
}

pub(crate) use err;
