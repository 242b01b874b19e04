/// A small fixed capacity string stored inline.
///
/// This is used for time zone abbreviations so that `tz::LocalOffset` stays
/// `Copy` and never touches the heap. `N` must be less than `256` so that
/// the length fits in a `u8`.
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub(crate) struct ArrayStr<const N: usize> {
    /// The bytes of the string. Only `0..len` is meaningful, and that
    /// sub-slice is always valid UTF-8. The rest is zero.
    bytes: [u8; N],
    len: u8,
}

impl<const N: usize> ArrayStr<N> {
    /// The empty string.
    pub(crate) const EMPTY: ArrayStr<N> = ArrayStr { bytes: [0; N], len: 0 };

    /// Creates a new fixed capacity string.
    ///
    /// If the given string exceeds `N` bytes, then this returns `None`.
    pub(crate) fn new(s: &str) -> Option<ArrayStr<N>> {
        debug_assert!(N <= usize::from(u8::MAX), "ArrayStr is too big");
        let len = u8::try_from(s.len()).ok()?;
        let mut bytes = [0; N];
        bytes.get_mut(..s.len())?.copy_from_slice(s.as_bytes());
        Some(ArrayStr { bytes, len })
    }

    /// Creates a new fixed capacity string from the longest prefix of `s`
    /// that fits in `N` bytes without splitting a codepoint.
    pub(crate) fn truncated(s: &str) -> ArrayStr<N> {
        let mut end = s.len().min(N).min(usize::from(u8::MAX));
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        ArrayStr::new(&s[..end]).unwrap_or(ArrayStr::EMPTY)
    }

    /// Returns this array string as a string slice.
    pub(crate) fn as_str(&self) -> &str {
        // `new` only ever copies a whole `&str`, so this can't fail. We
        // still go through the checked conversion since the strings are
        // tiny and this is never on a hot path.
        core::str::from_utf8(&self.bytes[..usize::from(self.len)])
            .unwrap_or("")
    }
}

#[cfg(test)]
impl<const N: usize> PartialEq<&str> for ArrayStr<N> {
    fn eq(&self, rhs: &&str) -> bool {
        self.as_str() == *rhs
    }
}

impl<const N: usize> core::fmt::Debug for ArrayStr<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Debug::fmt(self.as_str(), f)
    }
}
