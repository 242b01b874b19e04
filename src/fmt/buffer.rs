/// The two ASCII digits of every integer in `0..100`, back to back.
///
/// Writing two digits per division halves the number of divisions compared
/// to peeling off one digit at a time. Every field of every timestamp goes
/// through `write_int_pad0`, so this matters.
static DIGIT_PAIRS: &[u8; 200] = b"\
    00010203040506070809101112131415161718192021222324\
    25262728293031323334353637383940414243444546474849\
    50515253545556575859606162636465666768697071727374\
    75767778798081828384858687888990919293949596979899";

// From `u64::MAX.to_string().len()`.
const MAX_INTEGER_LEN: u8 = 20;
const MAX_PRECISION: u8 = 9;

/// A fixed size buffer of ASCII bytes on the stack.
///
/// Printers compose their entire output in one of these and then hand the
/// filled portion to a `fmt::Write` sink in one call. Nothing here
/// allocates.
///
/// # Design
///
/// * Only ASCII is ever written, which is what makes `filled` safe.
/// * A write that exceeds the capacity panics. Callers size the buffer for
/// their longest possible output, so this decouples "get the maximum size
/// correct" from "is memory safe."
#[derive(Clone, Copy)]
pub(crate) struct ArrayBuffer<const N: usize> {
    data: [u8; N],
    len: usize,
}

impl<const N: usize> ArrayBuffer<N> {
    /// Writes a single ASCII byte.
    ///
    /// # Panics
    ///
    /// When the buffer is full or when `byte` is not ASCII.
    #[inline(always)]
    pub(crate) fn write_ascii_char(&mut self, byte: u8) {
        assert!(byte.is_ascii());
        self.data[self.len] = byte;
        self.len += 1;
    }

    /// Writes the given integer in decimal, left padded with `0` up to
    /// `width` digits.
    ///
    /// `width` is a minimum. An integer with more digits than `width` is
    /// written in full. The width is clamped to `20`, the number of digits
    /// in `u64::MAX`.
    ///
    /// # Panics
    ///
    /// When the available space is insufficient for the padded digits.
    #[inline(always)]
    pub(crate) fn write_int_pad0(&mut self, mut n: u64, width: u8) {
        // Digits land in `scratch` least significant first.
        let mut scratch = [0u8; MAX_INTEGER_LEN as usize];
        let mut digits = 0;
        while n >= 100 {
            let i = usize::from((n % 100) as u8) * 2;
            n /= 100;
            scratch[digits] = DIGIT_PAIRS[i + 1];
            scratch[digits + 1] = DIGIT_PAIRS[i];
            digits += 2;
        }
        if n < 10 {
            scratch[digits] = b'0' + (n as u8);
            digits += 1;
        } else {
            let i = usize::from(n as u8) * 2;
            scratch[digits] = DIGIT_PAIRS[i + 1];
            scratch[digits + 1] = DIGIT_PAIRS[i];
            digits += 2;
        }

        let width = usize::from(width.min(MAX_INTEGER_LEN));
        let pad = width.saturating_sub(digits);
        let dst = &mut self.data[self.len..self.len + pad + digits];
        let (zeros, rest) = dst.split_at_mut(pad);
        zeros.fill(b'0');
        for (d, &s) in rest.iter_mut().zip(scratch[..digits].iter().rev()) {
            *d = s;
        }
        self.len += pad + digits;
    }

    /// Writes the leading `precision` digits of a fractional second.
    ///
    /// `nanosecond` is the full nine digit fraction. The precision is
    /// clamped to `9`. A precision of `0` writes nothing. Digits past the
    /// precision are truncated, not rounded.
    ///
    /// # Panics
    ///
    /// When `nanosecond` is not less than one second, or when the available
    /// space is insufficient.
    #[inline(always)]
    pub(crate) fn write_fraction(&mut self, nanosecond: u32, precision: u8) {
        assert!(nanosecond < 1_000_000_000);
        let precision = precision.min(MAX_PRECISION);
        if precision == 0 {
            return;
        }
        let divisor = 10u32.pow(u32::from(MAX_PRECISION - precision));
        self.write_int_pad0(u64::from(nanosecond / divisor), precision);
    }

    /// Resets this buffer to empty.
    #[cfg(test)]
    pub(crate) fn clear(&mut self) {
        self.len = 0;
    }

    /// Returns the bytes written so far as a string.
    #[inline(always)]
    pub(crate) fn filled(&self) -> &str {
        // SAFETY: The only writers are `write_ascii_char`, which asserts its
        // byte is ASCII, and the integer writers, which only write ASCII
        // digits. ASCII is valid UTF-8.
        unsafe { core::str::from_utf8_unchecked(&self.data[..self.len]) }
    }
}

/// Construct an empty buffer of size `N`.
impl<const N: usize> Default for ArrayBuffer<N> {
    #[inline(always)]
    fn default() -> ArrayBuffer<N> {
        ArrayBuffer { data: [0; N], len: 0 }
    }
}

impl<const N: usize> core::fmt::Debug for ArrayBuffer<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("ArrayBuffer")
            .field("filled", &self.filled())
            .field("capacity", &N)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_pairs() {
        for n in 0..100usize {
            let expected = [b'0' + (n / 10) as u8, b'0' + (n % 10) as u8];
            assert_eq!(&DIGIT_PAIRS[n * 2..n * 2 + 2], &expected);
        }
    }

    #[test]
    fn write_ascii_chars() {
        let mut buf = ArrayBuffer::<4>::default();
        buf.write_ascii_char(b'T');
        buf.write_ascii_char(b':');
        assert_eq!(buf.filled(), "T:");
    }

    #[test]
    #[should_panic]
    fn write_non_ascii_panic() {
        let mut buf = ArrayBuffer::<4>::default();
        buf.write_ascii_char(0xFF);
    }

    #[test]
    fn write_int_no_padding() {
        let mut buf = ArrayBuffer::<100>::default();
        for (n, expected) in [
            (0, "0"),
            (7, "7"),
            (10, "10"),
            (99, "99"),
            (100, "100"),
            (101, "101"),
            (9_999, "9999"),
            (123_456_789, "123456789"),
            (u64::MAX, "18446744073709551615"),
        ] {
            buf.clear();
            buf.write_int_pad0(n, 0);
            assert_eq!(buf.filled(), expected, "n: {n}");
        }
    }

    #[test]
    fn write_int_width_is_a_minimum() {
        let mut buf = ArrayBuffer::<100>::default();
        for (n, width, expected) in [
            (0, 2, "00"),
            (5, 2, "05"),
            (12, 2, "12"),
            (7, 4, "0007"),
            (2021, 4, "2021"),
            (12345, 4, "12345"),
            (123, 2, "123"),
            (1, 9, "000000001"),
            (0, 25, "00000000000000000000"),
        ] {
            buf.clear();
            buf.write_int_pad0(n, width);
            assert_eq!(buf.filled(), expected, "n: {n}, width: {width}");
        }
    }

    #[test]
    fn writes_append() {
        let mut buf = ArrayBuffer::<10>::default();
        buf.write_int_pad0(2021, 4);
        buf.write_ascii_char(b'-');
        buf.write_int_pad0(1, 2);
        assert_eq!(buf.filled(), "2021-01");
    }

    #[test]
    #[should_panic]
    fn write_int_insufficient_capacity_panic() {
        let mut buf = ArrayBuffer::<3>::default();
        buf.write_int_pad0(5, 4);
    }

    #[test]
    fn write_fraction_precision() {
        let mut buf = ArrayBuffer::<100>::default();
        for (nanos, precision, expected) in [
            (123_456_789, 0, ""),
            (123_456_789, 3, "123"),
            (123_456_789, 6, "123456"),
            (123_456_789, 9, "123456789"),
            (123_456_789, 12, "123456789"),
            (456_789, 3, "000"),
            (456_789, 6, "000456"),
            (456_789, 9, "000456789"),
            (999_999_999, 3, "999"),
            (1, 9, "000000001"),
        ] {
            buf.clear();
            buf.write_fraction(nanos, precision);
            assert_eq!(buf.filled(), expected, "{nanos} at {precision}");
        }
    }

    #[test]
    #[should_panic]
    fn write_fraction_too_big_panic() {
        let mut buf = ArrayBuffer::<100>::default();
        buf.write_fraction(1_000_000_000, 9);
    }
}
