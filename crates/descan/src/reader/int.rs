//! Integer value reader.
//!
//! One skeleton, two digit classifications: *classic* ASCII digits via
//! `char::to_digit`, and the locale's digit range when the spec carries the
//! `n` option. Overflow is detected during accumulation, before the
//! triggering digit is consumed, so the buffer never moves past the
//! character that caused it. Negative values accumulate negatively so the
//! type's minimum parses without tricks.

use alloc::vec::Vec;

use crate::{
    buffer::ScanBuffer,
    error::{RangeError, ScanError},
    format::FormatSpec,
    locale::Locale,
};

/// Integer primitives the reader can accumulate into.
pub(crate) trait ScanInt: Copy {
    const SIGNED: bool;
    fn zero() -> Self;
    /// `self * base + digit` (or `- digit` when negative), `None` on
    /// overflow.
    fn accumulate(self, base: u32, digit: u32, negative: bool) -> Option<Self>;
}

macro_rules! impl_scan_int {
    (signed: $($t:ty),*) => {$(
        impl ScanInt for $t {
            const SIGNED: bool = true;
            fn zero() -> Self { 0 }
            #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            fn accumulate(self, base: u32, digit: u32, negative: bool) -> Option<Self> {
                let shifted = self.checked_mul(base as $t)?;
                if negative {
                    shifted.checked_sub(digit as $t)
                } else {
                    shifted.checked_add(digit as $t)
                }
            }
        }
    )*};
    (unsigned: $($t:ty),*) => {$(
        impl ScanInt for $t {
            const SIGNED: bool = false;
            fn zero() -> Self { 0 }
            #[allow(clippy::cast_possible_truncation)]
            fn accumulate(self, base: u32, digit: u32, negative: bool) -> Option<Self> {
                debug_assert!(!negative);
                self.checked_mul(base as $t)?.checked_add(digit as $t)
            }
        }
    )*};
}

impl_scan_int!(signed: i8, i16, i32, i64, i128, isize);
impl_scan_int!(unsigned: u8, u16, u32, u64, u128, usize);

/// Reads one integer literal off the buffer front.
pub(crate) fn read_int<T: ScanInt>(
    buf: &mut ScanBuffer<'_>,
    spec: &FormatSpec,
    locale: &Locale,
) -> Result<T, ScanError> {
    buf.skip_whitespace()?;

    let mut negative = false;
    match buf.peek() {
        Some('+') => {
            if spec.unsigned_only {
                return Err(ScanError::InvalidScannedValue(
                    "sign not allowed by format spec",
                ));
            }
            buf.read_one()?;
        }
        Some('-') => {
            if spec.unsigned_only {
                return Err(ScanError::InvalidScannedValue(
                    "sign not allowed by format spec",
                ));
            }
            if !T::SIGNED {
                return Err(ScanError::InvalidScannedValue(
                    "negative value into an unsigned slot",
                ));
            }
            negative = true;
            buf.read_one()?;
        }
        _ => {}
    }

    let mut base = u32::from(spec.base);
    let mut digits = 0usize;

    if spec.base_prefix && buf.peek() == Some('0') {
        buf.read_one()?;
        // A bare zero is the value zero.
        digits = 1;
        match buf.peek() {
            Some('x' | 'X') if base == 0 || base == 16 => {
                buf.read_one()?;
                base = 16;
                digits = 0;
            }
            Some('b' | 'B') if base == 0 || base == 2 => {
                buf.read_one()?;
                base = 2;
                digits = 0;
            }
            _ => {
                if base == 0 {
                    base = 8;
                }
            }
        }
    }
    if base == 0 {
        base = 10;
    }

    let sep = spec.thousands_sep.then_some(locale.thousands_sep);
    // Digit-group sizes in consumed order (most significant first).
    let mut groups: Vec<usize> = Vec::new();
    let mut group = digits;
    let mut value = T::zero();

    while let Some(ch) = buf.peek() {
        let digit = if spec.localized {
            locale.digit_value(ch, base)
        } else {
            ch.to_digit(base)
        };
        if let Some(d) = digit {
            let Some(next) = value.accumulate(base, d, negative) else {
                // Stop here: the triggering character stays unconsumed.
                return Err(ScanError::ValueOutOfRange(if negative {
                    RangeError::Underflow
                } else {
                    RangeError::Overflow
                }));
            };
            value = next;
            buf.read_one()?;
            digits += 1;
            group += 1;
        } else if sep == Some(ch) && digits > 0 {
            buf.read_one()?;
            groups.push(group);
            group = 0;
        } else {
            break;
        }
    }

    if digits == 0 {
        return Err(ScanError::InvalidScannedValue("expected digits"));
    }
    if !groups.is_empty() {
        groups.push(group);
        if !locale.groups_are_valid(&groups) {
            return Err(ScanError::InvalidScannedValue(
                "misplaced grouping separator",
            ));
        }
    }
    Ok(value)
}
