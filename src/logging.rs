// With `tz-system` disabled there is no host lookup to report on, so some of
// these go unused.
#![allow(unused_macros)]

/// Expands to its input only when the `logging` feature is enabled.
///
/// Arguments that are only used for logging should be named with a leading
/// underscore, so that disabling the feature doesn't produce warnings.
macro_rules! log {
    ($($tt:tt)*) => {
        #[cfg(feature = "logging")]
        {
            $($tt)*
        }
    }
}

macro_rules! warn {
    ($($tt:tt)*) => { log!(log::warn!($($tt)*)) }
}

macro_rules! debug {
    ($($tt:tt)*) => { log!(log::debug!($($tt)*)) }
}

macro_rules! trace {
    ($($tt:tt)*) => { log!(log::trace!($($tt)*)) }
}
