use alloc::string::String;

use crate::{RangeError, ScanArg, ScanError, scan, scan_named};

#[test]
fn literal_mismatch_rolls_back_to_the_failing_character() {
    let mut n = 0i32;
    let result = scan("ab 1", "ac {}", &mut [(&mut n).into()]);
    assert_eq!(
        result.error,
        Some(ScanError::InvalidScannedValue(
            "expected character from format string not found in input"
        ))
    );
    assert_eq!(result.scanned, 0);
    // 'a' matched and committed; the failing 'b' is still there.
    assert_eq!(result.remainder, "b 1");
}

#[test]
fn value_failure_keeps_earlier_arguments() {
    let mut a = 0i32;
    let mut b = 0i32;
    let result = scan("123 abc", "{} {}", &mut [(&mut a).into(), (&mut b).into()]);
    assert_eq!(
        result.error,
        Some(ScanError::InvalidScannedValue("expected digits"))
    );
    assert_eq!(result.scanned, 1);
    assert_eq!(a, 123);
    assert_eq!(result.remainder, "abc");
}

#[test]
fn failed_argument_leaves_its_slot_unwritten() {
    let mut n = 17i32;
    let result = scan("abc", "{}", &mut [(&mut n).into()]);
    assert!(result.error.is_some());
    assert_eq!(n, 17);
}

#[test]
fn input_ending_before_the_format_is_a_format_error() {
    let mut a = 0i32;
    let mut b = 0i32;
    let result = scan("42", "{} {}", &mut [(&mut a).into(), (&mut b).into()]);
    assert_eq!(
        result.error,
        Some(ScanError::InvalidFormatString("format string not exhausted"))
    );
    assert_eq!(result.scanned, 1);
    assert_eq!(a, 42);
}

#[test]
fn missing_argument_slot() {
    let mut n = 0i32;
    let result = scan("1 2", "{} {}", &mut [(&mut n).into()]);
    assert_eq!(
        result.error,
        Some(ScanError::InvalidFormatString(
            "mismatch between arguments and placeholders in the format string"
        ))
    );
    assert_eq!(result.scanned, 1);
}

#[test]
fn unknown_placeholder_name() {
    let mut n = 0i32;
    let result = scan_named("1", "{rate}", &["count"], &mut [(&mut n).into()]);
    assert_eq!(
        result.error,
        Some(ScanError::InvalidFormatString("unknown argument name"))
    );
}

#[test]
fn unterminated_placeholder() {
    let mut n = 0i32;
    let result = scan("1", "{", &mut [(&mut n).into()]);
    assert_eq!(
        result.error,
        Some(ScanError::InvalidFormatString("unterminated '{'"))
    );
}

#[test]
fn unmatched_closing_brace() {
    let result = scan("x", "}", &mut []);
    assert_eq!(
        result.error,
        Some(ScanError::InvalidFormatString(
            "unmatched '}' in format string"
        ))
    );
}

#[test]
fn unknown_spec_option() {
    let mut n = 0i32;
    let result = scan("1", "{:q}", &mut [(&mut n).into()]);
    assert_eq!(
        result.error,
        Some(ScanError::InvalidFormatString(
            "unrecognized format spec option"
        ))
    );
}

#[test]
fn spec_and_slot_disagree() {
    let mut word = String::new();
    let result = scan("ff", "{:x}", &mut [(&mut word).into()]);
    assert_eq!(
        result.error,
        Some(ScanError::InvalidFormatString(
            "presentation type does not apply to this slot"
        ))
    );
    // Rejected before any input was consumed.
    assert_eq!(result.remainder, "ff");
}

#[test]
fn overflow_is_a_range_error_and_stops_at_the_trigger() {
    let mut n = 0u8;
    let result = scan("300", "{}", &mut [ScanArg::U8(&mut n)]);
    assert_eq!(
        result.error,
        Some(ScanError::ValueOutOfRange(RangeError::Overflow))
    );
    // "30" was consumed into the accumulator; the trigger '0' was not.
    assert_eq!(result.remainder, "300");
}

#[test]
fn underflow_is_distinguished() {
    let mut n = 0i8;
    let result = scan("-129", "{}", &mut [(&mut n).into()]);
    assert_eq!(
        result.error,
        Some(ScanError::ValueOutOfRange(RangeError::Underflow))
    );
}

#[test]
fn negative_into_an_unsigned_slot() {
    let mut n = 0u32;
    let result = scan("-1", "{}", &mut [(&mut n).into()]);
    assert_eq!(
        result.error,
        Some(ScanError::InvalidScannedValue(
            "negative value into an unsigned slot"
        ))
    );
}

#[test]
fn explicit_sign_rejected_by_the_u_option() {
    let mut n = 0i32;
    let result = scan("+5", "{:u}", &mut [(&mut n).into()]);
    assert_eq!(
        result.error,
        Some(ScanError::InvalidScannedValue(
            "sign not allowed by format spec"
        ))
    );
}

#[test]
fn misplaced_thousands_separator() {
    let mut n = 0u64;
    let result = scan("1,23,4567", "{:'}", &mut [(&mut n).into()]);
    assert!(matches!(
        result.error,
        Some(ScanError::InvalidScannedValue(_))
    ));
}

#[test]
fn boolean_rejects_other_words() {
    let mut flag = false;
    let result = scan("yes", "{}", &mut [(&mut flag).into()]);
    assert_eq!(
        result.error,
        Some(ScanError::InvalidScannedValue("expected a boolean"))
    );
}

#[test]
fn alpha_boolean_rejects_digits() {
    let mut flag = false;
    let result = scan("1", "{:a}", &mut [(&mut flag).into()]);
    assert_eq!(
        result.error,
        Some(ScanError::InvalidScannedValue("expected a boolean"))
    );
}

#[test]
fn non_ascii_into_a_byte_slot() {
    let mut unit = 0u8;
    let result = scan("é", "{}", &mut [ScanArg::Byte(&mut unit)]);
    assert!(matches!(
        result.error,
        Some(ScanError::InvalidScannedValue(_))
    ));
}

#[test]
fn char_buffer_rejects_a_straddling_scalar() {
    // 'é' needs two bytes but only one slot remains.
    let mut buf = [0u8; 2];
    let result = scan("aéx", "{}", &mut [ScanArg::CharBuf(&mut buf)]);
    assert_eq!(
        result.error,
        Some(ScanError::InvalidScannedValue(
            "character does not fit the remaining buffer capacity"
        ))
    );
}

#[test]
fn char_buffer_requires_enough_input() {
    let mut buf = [0u8; 8];
    let result = scan("short", "{}", &mut [ScanArg::CharBuf(&mut buf)]);
    assert_eq!(
        result.error,
        Some(ScanError::InvalidScannedValue(
            "input ended before filling the buffer"
        ))
    );
}

#[test]
fn numeric_character_code_must_be_a_scalar_value() {
    let mut ch = ' ';
    // 55296 is a surrogate.
    let result = scan("55296", "{:d}", &mut [(&mut ch).into()]);
    assert_eq!(
        result.error,
        Some(ScanError::InvalidScannedValue(
            "numeric code is not a unicode scalar value"
        ))
    );
}

#[test]
fn hex_prefix_without_digits() {
    let mut n = 0u32;
    let result = scan("0x", "{:x}", &mut [(&mut n).into()]);
    assert_eq!(
        result.error,
        Some(ScanError::InvalidScannedValue("expected digits"))
    );
}
