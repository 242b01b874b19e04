use crate::error;

#[derive(Clone, Debug)]
pub(crate) enum Error {
    SystemTimeUnrepresentable,
    SystemClock,
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::Timestamp(err).into()
    }
}

impl error::IntoError for Error {
    fn into_error(self) -> error::Error {
        self.into()
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::Error::*;

        match *self {
            SystemTimeUnrepresentable => f.write_str(
                "system time is not representable as nanoseconds \
                 since the Unix epoch",
            ),
            SystemClock => f.write_str("failed to read the system clock"),
        }
    }
}
