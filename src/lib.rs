/*!
Capture the current time and print it as an RFC 3339 timestamp.

This crate is deliberately small. It has one time type, [`Instant`], which
is a signed 64-bit count of nanoseconds since the Unix epoch. An instant can
be decomposed into [`civil::DateTime`] calendar fields and printed as an
RFC 3339 timestamp with a choice of fractional second precision and with the
host's local UTC offset as the suffix.

Printing composes the whole timestamp in a fixed size buffer on the stack
and hands it to the sink in one write. The only allocation on the
formatting path is the returned `String`, and [`fmt::rfc3339`] can print
into a caller provided sink instead.

# Example

```
use tinystamp::{tz::Offset, Instant};

let instant = Instant::from_nanosecond(1_633_959_411_123_456_789);
// `Display` is always UTC with nanosecond precision.
assert_eq!(instant.to_string(), "2021-10-11T13:36:51.123456789Z");

// The `format` family uses the host's local offset. A fixed offset can be
// used instead with `format_with`.
let printed = instant.format_with(
    tinystamp::fmt::Precision::Milli,
    &Offset::constant(8),
);
assert_eq!(printed, "2021-10-11T21:36:51.123+08:00");
```

# Local offsets

The host's local offset is resolved once per thread, through the C
library, and then cached for the life of that thread. If it can't be
resolved, UTC is used. See [`tz::system_offset`] for details and
[`tz::OffsetResolver`] for injecting a different source.

# Crate features

* **std** (enabled by default) -
  Enables `Instant::now`, conversions with `std::time::SystemTime` and the
  `std::error::Error` impl for [`Error`].
* **tz-system** (enabled by default) -
  Enables resolving the host's local offset. When disabled, the system
  offset is always UTC.
* **logging** -
  Emits diagnostics through the [`log`](https://docs.rs/log) crate, mostly
  around resolving the host's local offset.
* **serde** -
  Enables `serde::Serialize` impls for [`Instant`] and [`tz::Offset`] and
  the helpers in `fmt::serde`.
*/

#![no_std]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
// We generally want all types to impl Debug.
#![warn(missing_debug_implementations)]

#[cfg(any(test, feature = "std"))]
extern crate std;

// Errors and the `String` returning printers need the heap.
extern crate alloc;

pub use crate::{error::Error, instant::Instant};

#[macro_use]
mod logging;

pub mod civil;
mod error;
pub mod fmt;
mod instant;
pub mod tz;
mod util;
