//! Code-unit and code-point readers.
//!
//! The buffer already hands out decoded, validated scalars, so the
//! code-point read is a single-character consume; the code-unit read
//! additionally insists that the scalar fits in one unit. Neither skips
//! leading whitespace: a character slot scans exactly what is in front of
//! the cursor.

use crate::{
    buffer::ScanBuffer,
    error::ScanError,
    format::FormatSpec,
    locale::Locale,
    reader::int::read_int,
};

/// Consumes exactly one code unit.
pub(crate) fn read_code_unit(buf: &mut ScanBuffer<'_>) -> Result<u8, ScanError> {
    let Some(ch) = buf.peek() else {
        return Err(ScanError::EndOfStream);
    };
    if !ch.is_ascii() {
        return Err(ScanError::InvalidScannedValue(
            "multi-unit scalar does not fit a single code unit",
        ));
    }
    buf.read_one()?;
    #[allow(clippy::cast_possible_truncation)]
    Ok(ch as u8)
}

/// Consumes one unicode scalar.
pub(crate) fn read_code_point(buf: &mut ScanBuffer<'_>) -> Result<char, ScanError> {
    buf.read_one()
}

/// The `{:d}`-style presentation override: scan the character's numeric
/// code through the integer reader, then narrow it to a scalar.
pub(crate) fn read_code_point_as_int(
    buf: &mut ScanBuffer<'_>,
    spec: &FormatSpec,
    locale: &Locale,
) -> Result<char, ScanError> {
    let code: u32 = read_int(buf, spec, locale)?;
    char::from_u32(code).ok_or(ScanError::InvalidScannedValue(
        "numeric code is not a unicode scalar value",
    ))
}

#[cfg(test)]
mod tests {
    use super::{read_code_point, read_code_point_as_int, read_code_unit};
    use crate::{buffer::ScanBuffer, error::ScanError, format::FormatSpec, locale::Locale};

    #[test]
    fn one_unit_exactly() {
        let mut buf = ScanBuffer::contiguous("ab");
        assert_eq!(read_code_unit(&mut buf), Ok(b'a'));
        assert_eq!(read_code_unit(&mut buf), Ok(b'b'));
        assert_eq!(read_code_unit(&mut buf), Err(ScanError::EndOfStream));
    }

    #[test]
    fn whitespace_is_not_skipped() {
        let mut buf = ScanBuffer::contiguous(" x");
        assert_eq!(read_code_unit(&mut buf), Ok(b' '));
        assert_eq!(read_code_point(&mut buf), Ok('x'));
    }

    #[test]
    fn wide_scalar_rejected_as_code_unit_but_fine_as_code_point() {
        let mut buf = ScanBuffer::contiguous("å");
        assert!(matches!(
            read_code_unit(&mut buf),
            Err(ScanError::InvalidScannedValue(_))
        ));
        let mut buf = ScanBuffer::contiguous("å");
        assert_eq!(read_code_point(&mut buf), Ok('å'));
    }

    #[test]
    fn integer_presentation_narrows_to_a_scalar() {
        let mut buf = ScanBuffer::contiguous("97");
        let spec = FormatSpec::parse("d").unwrap();
        assert_eq!(
            read_code_point_as_int(&mut buf, &spec, &Locale::default()),
            Ok('a')
        );

        // Surrogate code points are not scalar values.
        let mut buf = ScanBuffer::contiguous("55296");
        assert!(matches!(
            read_code_point_as_int(&mut buf, &spec, &Locale::default()),
            Err(ScanError::InvalidScannedValue(_))
        ));
    }
}
