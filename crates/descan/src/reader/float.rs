//! Floating-point value reader.
//!
//! A float-shaped prefix is grabbed off the buffer first, then converted by
//! a strategy chain:
//!
//! 1. a fast exact-in-its-domain decimal parser (bounded mantissa, bounded
//!    power of ten) for the common decimal/scientific case;
//! 2. the standards-based conversion, `str::parse`, when the fast path's
//!    bounds are exceeded;
//! 3. an in-crate hex-float conversion for `0x` mantissa/exponent literals,
//!    which neither of the first two handles.
//!
//! The fast path never produces a spurious infinity: anything outside its
//! bounds falls back to the exact path, so the two always agree where both
//! apply. Range errors are qualified: a magnitude saturating to infinity
//! for input that is not textually "inf" is an overflow, a magnitude
//! collapsing to zero despite nonzero mantissa digits is an underflow.
//! Subnormal results are values, not range errors.

use alloc::string::String;

use crate::{
    buffer::ScanBuffer,
    error::{RangeError, ScanError},
    format::FormatSpec,
    locale::Locale,
    reader::text::ExpectedWord,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lexeme {
    Decimal,
    Hex,
    Inf,
    Nan,
}

#[derive(Debug)]
struct FloatLexeme {
    /// The literal, sign included, with the decimal point normalized to
    /// `.` so the conversion functions never see the locale.
    text: String,
    kind: Lexeme,
    negative: bool,
    /// Whether any mantissa digit was nonzero; distinguishes a true zero
    /// from an underflow.
    mantissa_nonzero: bool,
}

fn take_digits(
    buf: &mut ScanBuffer<'_>,
    text: &mut String,
    radix: u32,
    nonzero: &mut bool,
) -> usize {
    let mut count = 0;
    while let Some(ch) = buf.peek() {
        if !ch.is_digit(radix) {
            break;
        }
        let _ = buf.read_one();
        text.push(ch);
        if ch != '0' {
            *nonzero = true;
        }
        count += 1;
    }
    count
}

/// Consumes an exponent suffix (`e+12`, `p-3`) if one is actually there.
///
/// The marker and an optional sign are read speculatively: the longest
/// valid float literal in `"1e"` or `"1e+"` is just `"1"`, so without a
/// digit after them the cursor goes back and the suffix characters stay
/// in the input.
fn try_exponent(buf: &mut ScanBuffer<'_>, text: &mut String, marker: char) {
    let mark = buf.mark();
    let len = text.len();
    let _ = buf.read_one();
    text.push(marker);
    if let Some(sign @ ('+' | '-')) = buf.peek() {
        let _ = buf.read_one();
        text.push(sign);
    }
    let mut sink = false;
    if take_digits(buf, text, 10, &mut sink) == 0 {
        buf.reset(mark);
        text.truncate(len);
    }
}

/// Consumes the longest float-shaped prefix off the buffer front.
fn pregrab(buf: &mut ScanBuffer<'_>, decimal_point: char) -> Result<FloatLexeme, ScanError> {
    buf.skip_whitespace()?;

    let mut text = String::new();
    let mut negative = false;
    match buf.peek() {
        Some('+') => {
            buf.read_one()?;
            text.push('+');
        }
        Some('-') => {
            negative = true;
            buf.read_one()?;
            text.push('-');
        }
        _ => {}
    }

    match buf.peek() {
        Some('i' | 'I') => {
            ExpectedWord::ignore_ascii_case("inf").consume(buf)?;
            // "inf" alone is already a full literal; the longer word is
            // taken only if it completes ("infinite" scans as inf + "inite").
            if matches!(buf.peek(), Some('i' | 'I')) {
                let mark = buf.mark();
                if ExpectedWord::ignore_ascii_case("inity").consume(buf).is_err() {
                    buf.reset(mark);
                }
            }
            return Ok(FloatLexeme {
                text,
                kind: Lexeme::Inf,
                negative,
                mantissa_nonzero: true,
            });
        }
        Some('n' | 'N') => {
            ExpectedWord::ignore_ascii_case("nan").consume(buf)?;
            return Ok(FloatLexeme {
                text,
                kind: Lexeme::Nan,
                negative,
                mantissa_nonzero: true,
            });
        }
        _ => {}
    }

    let mut digits = 0;
    let mut nonzero = false;

    if buf.peek() == Some('0') {
        buf.read_one()?;
        text.push('0');
        digits += 1;
        if matches!(buf.peek(), Some('x' | 'X')) {
            let mark = buf.mark();
            let len = text.len();
            buf.read_one()?;
            text.push('x');
            let mut hex_digits = take_digits(buf, &mut text, 16, &mut nonzero);
            if buf.peek() == Some('.') {
                buf.read_one()?;
                text.push('.');
                hex_digits += take_digits(buf, &mut text, 16, &mut nonzero);
            }
            if hex_digits == 0 {
                // "0x" with nothing after it: the literal is just the zero.
                buf.reset(mark);
                text.truncate(len);
            } else {
                if matches!(buf.peek(), Some('p' | 'P')) {
                    // 'e' is a hex digit, so the hex exponent marker stays 'p'.
                    try_exponent(buf, &mut text, 'p');
                }
                return Ok(FloatLexeme {
                    text,
                    kind: Lexeme::Hex,
                    negative,
                    mantissa_nonzero: nonzero,
                });
            }
        }
    }

    digits += take_digits(buf, &mut text, 10, &mut nonzero);
    if buf.peek() == Some(decimal_point) {
        buf.read_one()?;
        text.push('.');
        digits += take_digits(buf, &mut text, 10, &mut nonzero);
    }
    if digits == 0 {
        return Err(ScanError::InvalidScannedValue(
            "expected a floating-point value",
        ));
    }
    if matches!(buf.peek(), Some('e' | 'E')) {
        try_exponent(buf, &mut text, 'e');
    }
    Ok(FloatLexeme {
        text,
        kind: Lexeme::Decimal,
        negative,
        mantissa_nonzero: nonzero,
    })
}

fn signed(value: f64, negative: bool) -> f64 {
    if negative { -value } else { value }
}

const POW10: [f64; 23] = [
    1e0, 1e1, 1e2, 1e3, 1e4, 1e5, 1e6, 1e7, 1e8, 1e9, 1e10, 1e11, 1e12, 1e13, 1e14, 1e15, 1e16,
    1e17, 1e18, 1e19, 1e20, 1e21, 1e22,
];

/// Fast decimal conversion: exact when the mantissa fits 53 bits and the
/// power of ten is one multiplication away. `None` means "fall back".
pub(crate) fn fast_decimal(text: &str) -> Option<f64> {
    let mut bytes = text.bytes().peekable();
    let mut negative = false;
    match bytes.peek() {
        Some(b'+') => {
            bytes.next();
        }
        Some(b'-') => {
            negative = true;
            bytes.next();
        }
        _ => {}
    }

    let mut mantissa: u64 = 0;
    let mut frac_exp: i32 = 0;
    let mut seen_point = false;
    let mut explicit_exp: i32 = 0;
    while let Some(&b) = bytes.peek() {
        match b {
            b'0'..=b'9' => {
                bytes.next();
                if mantissa > (u64::MAX - 9) / 10 {
                    // Too many significant digits for the fast path.
                    return None;
                }
                mantissa = mantissa * 10 + u64::from(b - b'0');
                if seen_point {
                    frac_exp -= 1;
                }
            }
            b'.' if !seen_point => {
                bytes.next();
                seen_point = true;
            }
            b'e' | b'E' => {
                bytes.next();
                let mut exp_negative = false;
                match bytes.peek() {
                    Some(b'+') => {
                        bytes.next();
                    }
                    Some(b'-') => {
                        exp_negative = true;
                        bytes.next();
                    }
                    _ => {}
                }
                for b in bytes.by_ref() {
                    explicit_exp = explicit_exp.checked_mul(10)?.checked_add(i32::from(b - b'0'))?;
                    if explicit_exp > 400 {
                        return None;
                    }
                }
                if exp_negative {
                    explicit_exp = -explicit_exp;
                }
            }
            _ => return None,
        }
    }

    if mantissa == 0 {
        return Some(signed(0.0, negative));
    }
    if mantissa >= (1 << 53) {
        return None;
    }
    let exp = frac_exp + explicit_exp;
    #[allow(clippy::cast_precision_loss, clippy::cast_sign_loss)]
    let value = if (0..=22).contains(&exp) {
        mantissa as f64 * POW10[exp as usize]
    } else if (-22..0).contains(&exp) {
        mantissa as f64 / POW10[(-exp) as usize]
    } else {
        return None;
    };
    Some(signed(value, negative))
}

/// `m >> s` with round-to-nearest, ties to even, judged on the full
/// shifted-out tail.
fn round_shift_right(m: u128, s: u32) -> u128 {
    if s == 0 {
        return m;
    }
    if s > 128 {
        return 0;
    }
    let q = if s == 128 { 0 } else { m >> s };
    let guard = (m >> (s - 1)) & 1;
    let sticky = if s == 1 { 0 } else { m & ((1u128 << (s - 1)) - 1) };
    if guard == 1 && (sticky != 0 || q & 1 == 1) {
        q + 1
    } else {
        q
    }
}

// Exact scale by a power of two; powers of two stay exact down through the
// subnormal range.
fn ldexp(value: f64, exp: i32) -> f64 {
    fn pow2(k: i32) -> f64 {
        debug_assert!((-1022..=1023).contains(&k));
        #[allow(clippy::cast_sign_loss)]
        f64::from_bits(((1023 + k) as u64) << 52)
    }
    let mut value = value;
    let mut exp = exp;
    while exp > 0 {
        let k = exp.min(1023);
        value *= pow2(k);
        exp -= k;
        if value.is_infinite() {
            break;
        }
    }
    while exp < 0 {
        let k = exp.max(-1022);
        value *= pow2(k);
        exp -= k;
        if value == 0.0 {
            break;
        }
    }
    value
}

/// Converts a `0x` mantissa / binary-exponent literal.
pub(crate) fn parse_hex_float(text: &str) -> Result<f64, ScanError> {
    let mut bytes = text.bytes().peekable();
    let mut negative = false;
    match bytes.peek() {
        Some(b'+') => {
            bytes.next();
        }
        Some(b'-') => {
            negative = true;
            bytes.next();
        }
        _ => {}
    }
    // "0x" was validated by the pregrab.
    bytes.next();
    bytes.next();

    let mut mantissa: u128 = 0;
    let mut digits = 0;
    let mut seen_point = false;
    let mut exp: i32 = 0;
    while let Some(&b) = bytes.peek() {
        match b {
            b'.' => {
                bytes.next();
                seen_point = true;
            }
            b'p' | b'P' => {
                bytes.next();
                let mut exp_negative = false;
                match bytes.peek() {
                    Some(b'+') => {
                        bytes.next();
                    }
                    Some(b'-') => {
                        exp_negative = true;
                        bytes.next();
                    }
                    _ => {}
                }
                let mut e: i32 = 0;
                for b in bytes.by_ref() {
                    e = e
                        .saturating_mul(10)
                        .saturating_add(i32::from(b - b'0'))
                        .min(100_000);
                }
                exp += if exp_negative { -e } else { e };
            }
            _ => {
                let Some(d) = (b as char).to_digit(16) else {
                    return Err(ScanError::InvalidScannedValue(
                        "malformed hex floating-point literal",
                    ));
                };
                bytes.next();
                if digits < 28 {
                    mantissa = mantissa * 16 + u128::from(d);
                    digits += 1;
                    if seen_point {
                        exp -= 4;
                    }
                } else if !seen_point {
                    exp += 4;
                }
            }
        }
    }

    if mantissa == 0 {
        return Ok(signed(0.0, negative));
    }

    // A subnormal result has fewer than 53 significand bits, so a wide
    // mantissa must be rounded onto the subnormal grid in integer space
    // first: `as f64` rounds to 53 bits, and letting the scaling round a
    // second time can be off by one ulp. After the pre-round the cast and
    // the scaling are both exact, leaving a single correctly rounded step.
    #[allow(clippy::cast_possible_wrap)]
    let top = 127 - mantissa.leading_zeros() as i32;
    if top + exp < -1022 {
        let shift = -(exp + 1074);
        if shift > 0 {
            #[allow(clippy::cast_sign_loss)]
            {
                mantissa = round_shift_right(mantissa, shift as u32);
            }
            exp = -1074;
        }
    }
    #[allow(clippy::cast_precision_loss)]
    Ok(signed(ldexp(mantissa as f64, exp), negative))
}

fn classify(value: f64, mantissa_nonzero: bool) -> Result<f64, ScanError> {
    if value.is_infinite() {
        return Err(ScanError::ValueOutOfRange(RangeError::Overflow));
    }
    if value == 0.0 && mantissa_nonzero {
        return Err(ScanError::ValueOutOfRange(RangeError::Underflow));
    }
    Ok(value)
}

pub(crate) fn read_f64(
    buf: &mut ScanBuffer<'_>,
    spec: &FormatSpec,
    locale: &Locale,
) -> Result<f64, ScanError> {
    let decimal_point = if spec.localized {
        locale.decimal_point
    } else {
        '.'
    };
    let lex = pregrab(buf, decimal_point)?;
    match lex.kind {
        Lexeme::Inf => Ok(signed(f64::INFINITY, lex.negative)),
        Lexeme::Nan => Ok(signed(f64::NAN, lex.negative)),
        Lexeme::Hex => classify(parse_hex_float(&lex.text)?, lex.mantissa_nonzero),
        Lexeme::Decimal => {
            let value = match fast_decimal(&lex.text) {
                Some(value) => value,
                None => lex.text.parse::<f64>().map_err(|_| {
                    ScanError::InvalidScannedValue("malformed floating-point literal")
                })?,
            };
            classify(value, lex.mantissa_nonzero)
        }
    }
}

pub(crate) fn read_f32(
    buf: &mut ScanBuffer<'_>,
    spec: &FormatSpec,
    locale: &Locale,
) -> Result<f32, ScanError> {
    let decimal_point = if spec.localized {
        locale.decimal_point
    } else {
        '.'
    };
    let lex = pregrab(buf, decimal_point)?;
    let value = match lex.kind {
        Lexeme::Inf => return Ok(if lex.negative { f32::NEG_INFINITY } else { f32::INFINITY }),
        Lexeme::Nan => return Ok(if lex.negative { -f32::NAN } else { f32::NAN }),
        // The fast path is tuned for the double-width type; the
        // single-width slot goes straight to the exact conversion.
        #[allow(clippy::cast_possible_truncation)]
        Lexeme::Hex => parse_hex_float(&lex.text)? as f32,
        Lexeme::Decimal => lex
            .text
            .parse::<f32>()
            .map_err(|_| ScanError::InvalidScannedValue("malformed floating-point literal"))?,
    };
    if value.is_infinite() {
        return Err(ScanError::ValueOutOfRange(RangeError::Overflow));
    }
    if value == 0.0 && lex.mantissa_nonzero {
        return Err(ScanError::ValueOutOfRange(RangeError::Underflow));
    }
    Ok(value)
}
