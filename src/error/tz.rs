use crate::error;

#[derive(Clone, Debug)]
pub(crate) enum Error {
    #[allow(dead_code)] // only without `tz-system` or on unsupported hosts
    Disabled,
    #[allow(dead_code)] // not used when `tz-system` is disabled
    LocalTime { second: i64 },
    InvalidOffset,
}

impl From<Error> for error::Error {
    #[cold]
    #[inline(never)]
    fn from(err: Error) -> error::Error {
        error::ErrorKind::TzSystem(err).into()
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
            Disabled => f.write_str(
                "host time zone lookup is unavailable \
                 (requires the `tz-system` crate feature on a Unix host)",
            ),
            LocalTime { second } => write!(
                f,
                "host `localtime_r` failed for Unix timestamp {second}",
            ),
            InvalidOffset => {
                f.write_str("host reported an invalid UTC offset")
            }
        }
    }
}
