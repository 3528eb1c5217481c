use alloc::string::String;

use rstest::rstest;

use crate::{Locale, ScanArg, ScanError, scan, scan_localized, scan_named};

#[test]
fn scans_three_default_placeholders() {
    let mut n = 0i32;
    let mut word = String::new();
    let mut x = 0.0f64;
    let result = scan(
        "42 foo 3.14",
        "{} {} {}",
        &mut [(&mut n).into(), (&mut word).into(), (&mut x).into()],
    );
    assert!(result.is_ok());
    assert_eq!(result.scanned, 3);
    assert_eq!(result.remainder, "");
    assert_eq!((n, word.as_str(), x), (42, "foo", 3.14));
}

#[test]
fn mixes_literals_escapes_and_specs() {
    let mut n = 0i32;
    let mut x = 0.0f64;
    let mut tail = [0u8; 6];
    let mut flag = false;
    let result = scan(
        "test {} 42 3.14 foobar true",
        "test {{}} {} {} {} {:a}",
        &mut [
            (&mut n).into(),
            (&mut x).into(),
            ScanArg::CharBuf(&mut tail),
            (&mut flag).into(),
        ],
    );
    assert!(result.is_ok());
    assert_eq!(result.scanned, 4);
    assert_eq!(n, 42);
    assert_eq!(x, 3.14);
    assert_eq!(&tail, b"foobar");
    assert!(flag);
}

#[test]
fn positional_placeholders_reorder_arguments() {
    let mut first = 0i32;
    let mut second = 0i32;
    let result = scan(
        "1 2",
        "{1} {0}",
        &mut [(&mut first).into(), (&mut second).into()],
    );
    assert!(result.is_ok());
    assert_eq!((first, second), (2, 1));
}

#[test]
fn named_placeholders_resolve_through_the_name_table() {
    let mut width = 0u32;
    let mut height = 0u32;
    let result = scan_named(
        "800x600",
        "{width}x{height}",
        &["width", "height"],
        &mut [(&mut width).into(), (&mut height).into()],
    );
    assert!(result.is_ok());
    assert_eq!((width, height), (800, 600));
}

#[rstest]
#[case("42", "{}", 42)]
#[case("-42", "{}", -42)]
#[case("+42", "{}", 42)]
#[case("ff", "{:x}", 255)]
#[case("0xff", "{:x}", 255)]
#[case("0x1F", "{:i}", 31)]
#[case("0b101", "{:i}", 5)]
#[case("017", "{:i}", 15)]
#[case("017", "{:d}", 17)]
#[case("101", "{:b}", 5)]
#[case("zz", "{:b36}", 35 * 36 + 35)]
#[case("0", "{:i}", 0)]
fn integer_specs(#[case] input: &str, #[case] fmt: &str, #[case] expected: i64) {
    let mut n = 0i64;
    let result = scan(input, fmt, &mut [(&mut n).into()]);
    assert!(result.is_ok(), "{input:?} / {fmt:?}: {:?}", result.error);
    assert_eq!(n, expected);
}

#[test]
fn thousands_separators_at_locale_boundaries() {
    let mut n = 0u64;
    let result = scan("1,234,567", "{:'}", &mut [(&mut n).into()]);
    assert!(result.is_ok());
    assert_eq!(n, 1_234_567);
}

#[test]
fn signed_minimum_parses() {
    let mut n = 0i8;
    let result = scan("-128", "{}", &mut [(&mut n).into()]);
    assert!(result.is_ok());
    assert_eq!(n, i8::MIN);
}

#[rstest]
#[case("3.14", 3.14)]
#[case("-0.5", -0.5)]
#[case("1e10", 1e10)]
#[case("inf", f64::INFINITY)]
#[case("-infinity", f64::NEG_INFINITY)]
#[case("0x1.8p1", 3.0)]
fn float_forms(#[case] input: &str, #[case] expected: f64) {
    let mut x = 0.0f64;
    let result = scan(input, "{}", &mut [(&mut x).into()]);
    assert!(result.is_ok(), "{input:?}: {:?}", result.error);
    assert_eq!(x.to_bits(), expected.to_bits());
}

#[test]
fn dangling_exponent_leaves_the_marker_in_the_input() {
    let mut x = 0.0f64;
    let result = scan("1e", "{}", &mut [(&mut x).into()]);
    assert!(result.is_ok());
    assert_eq!(x, 1.0);
    assert_eq!(result.remainder, "e");
}

#[test]
fn inf_scans_out_of_a_longer_word() {
    let mut x = 0.0f64;
    let result = scan("infinite", "{}", &mut [(&mut x).into()]);
    assert!(result.is_ok());
    assert_eq!(x, f64::INFINITY);
    assert_eq!(result.remainder, "inite");
}

#[test]
fn nan_scans_as_nan() {
    let mut x = 0.0f64;
    let result = scan("nan", "{}", &mut [(&mut x).into()]);
    assert!(result.is_ok());
    assert!(x.is_nan());
}

#[test]
fn localized_decimal_point_and_digits() {
    let locale = Locale {
        decimal_point: ',',
        thousands_sep: '.',
        ..Locale::default()
    };
    let mut x = 0.0f64;
    let result = scan_localized("3,14", "{:n}", &locale, &mut [(&mut x).into()]);
    assert!(result.is_ok());
    assert_eq!(x, 3.14);
}

#[test]
fn char_slot_takes_one_scalar_without_skipping() {
    let mut a = ' ';
    let mut b = ' ';
    let result = scan("héllo", "{}{}", &mut [(&mut a).into(), (&mut b).into()]);
    assert!(result.is_ok());
    assert_eq!((a, b), ('h', 'é'));
}

#[test]
fn char_slot_with_integer_presentation_reads_a_code() {
    let mut ch = ' ';
    let result = scan("97", "{:d}", &mut [(&mut ch).into()]);
    assert!(result.is_ok());
    assert_eq!(ch, 'a');
}

#[test]
fn byte_slot_reads_one_ascii_unit_or_a_number() {
    let mut unit = 0u8;
    let result = scan("x", "{}", &mut [ScanArg::Byte(&mut unit)]);
    assert!(result.is_ok());
    assert_eq!(unit, b'x');

    let mut value = 0u8;
    let result = scan("200", "{:d}", &mut [ScanArg::Byte(&mut value)]);
    assert!(result.is_ok());
    assert_eq!(value, 200);
}

#[test]
fn str_slot_borrows_from_the_input() {
    let input = "alpha beta";
    let mut word: &str = "";
    let mut rest = String::new();
    let result = scan(input, "{} {}", &mut [(&mut word).into(), (&mut rest).into()]);
    assert!(result.is_ok());
    assert_eq!(word, "alpha");
    assert_eq!(word.as_ptr(), input.as_ptr());
    assert_eq!(rest, "beta");
}

#[rstest]
#[case("true", "{}", true)]
#[case("false", "{}", false)]
#[case("1", "{}", true)]
#[case("0", "{}", false)]
#[case("true", "{:a}", true)]
#[case("1", "{:d}", true)]
fn bool_forms(#[case] input: &str, #[case] fmt: &str, #[case] expected: bool) {
    let mut flag = !expected;
    let result = scan(input, fmt, &mut [(&mut flag).into()]);
    assert!(result.is_ok(), "{input:?} / {fmt:?}: {:?}", result.error);
    assert_eq!(flag, expected);
}

#[test]
fn empty_format_on_empty_input_succeeds() {
    let result = scan("", "", &mut []);
    assert!(result.is_ok());
    assert_eq!(result.scanned, 0);
    assert_eq!(result.remainder, "");
}

#[test]
fn trailing_format_whitespace_tolerates_end_of_input() {
    let mut n = 0i32;
    let result = scan("7", "{} ", &mut [(&mut n).into()]);
    assert!(result.is_ok());
    assert_eq!(n, 7);
}

#[test]
fn leading_input_whitespace_is_always_skipped() {
    let mut n = 0i32;
    let result = scan("   \t 5", "{}", &mut [(&mut n).into()]);
    assert!(result.is_ok());
    assert_eq!(n, 5);
}

#[test]
fn end_of_stream_is_detectable_on_the_result() {
    let mut n = 0i32;
    let result = scan("", "{}", &mut [(&mut n).into()]);
    assert_eq!(result.error, Some(ScanError::EndOfStream));
    assert_eq!(result.scanned, 0);
}
