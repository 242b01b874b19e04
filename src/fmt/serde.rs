/*!
Serialization helpers for use with [Serde].

[`Instant`](crate::Instant) serializes as an RFC 3339 string in UTC with
nanosecond precision, and [`Offset`](crate::tz::Offset) as a signed number
of seconds east of UTC. Both are implemented directly on the types.

This module provides functions for serializing an `Instant` as an integer
instead, meant to be used with Serde's [`serialize_with` attribute]. There
are no deserializers, since this crate never parses timestamps.

# Example

```
use tinystamp::Instant;

#[derive(serde::Serialize)]
struct Record {
    at: Instant,
    #[serde(serialize_with = "tinystamp::fmt::serde::instant::second")]
    at_second: Instant,
    #[serde(serialize_with = "tinystamp::fmt::serde::instant::nanosecond")]
    at_nanosecond: Instant,
}

let at = Instant::from_nanosecond(1_633_959_411_123_456_789);
let record = Record { at, at_second: at, at_nanosecond: at };
assert_eq!(
    serde_json::to_string(&record)?,
    r#"{"at":"2021-10-11T13:36:51.123456789Z","at_second":1633959411,"at_nanosecond":1633959411123456789}"#,
);

# Ok::<(), Box<dyn std::error::Error>>(())
```

[Serde]: https://serde.rs/
[`serialize_with` attribute]: https://serde.rs/field-attrs.html#serialize_with
*/

use crate::{tz::Offset, Instant};

/// Integer serializers for [`Instant`].
pub mod instant {
    use crate::Instant;

    /// Serialize the number of whole seconds since the Unix epoch, rounded
    /// toward negative infinity.
    #[inline]
    pub fn second<S: serde::Serializer>(
        instant: &Instant,
        se: S,
    ) -> Result<S::Ok, S::Error> {
        se.serialize_i64(instant.as_second())
    }

    /// Serialize the raw count of nanoseconds since the Unix epoch.
    #[inline]
    pub fn nanosecond<S: serde::Serializer>(
        instant: &Instant,
        se: S,
    ) -> Result<S::Ok, S::Error> {
        se.serialize_i64(instant.count())
    }
}

impl serde::Serialize for Instant {
    #[inline]
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl serde::Serialize for Offset {
    #[inline]
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.seconds())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instant_as_string() {
        let instant = Instant::from_nanosecond(1_633_959_411_000_000_000);
        let json = serde_json::to_string(&instant).unwrap();
        assert_eq!(json, r#""2021-10-11T13:36:51Z""#);

        let before_epoch = Instant::from_nanosecond(-1);
        let json = serde_json::to_string(&before_epoch).unwrap();
        assert_eq!(json, r#""1969-12-31T23:59:59.999999999Z""#);
    }

    #[test]
    fn offset_as_seconds() {
        let json = serde_json::to_string(&Offset::constant(-5)).unwrap();
        assert_eq!(json, "-18000");
        let json = serde_json::to_string(&Offset::UTC).unwrap();
        assert_eq!(json, "0");
    }

    #[test]
    fn integer_helpers() {
        let at = Instant::from_nanosecond(-1_500_000_000);
        let mut out = alloc::vec::Vec::new();
        let mut se = serde_json::Serializer::new(&mut out);
        instant::second(&at, &mut se).unwrap();
        assert_eq!(out, b"-2");

        let mut out = alloc::vec::Vec::new();
        let mut se = serde_json::Serializer::new(&mut out);
        instant::nanosecond(&at, &mut se).unwrap();
        assert_eq!(out, b"-1500000000");
    }
}
