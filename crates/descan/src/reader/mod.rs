//! Type dispatch: one reader per requested output slot.
//!
//! The slot's declared kind is always authoritative; the format spec only
//! selects among readers valid for that kind. The precedence among
//! structurally overlapping types is fixed by the arm order and guards
//! below: a boolean is matched before any generic integer, a code point
//! before a generic integer, and an integer presentation on a character
//! slot routes through the integer reader and narrows. A custom slot is
//! invoked blind and its result forwarded verbatim.

pub(crate) mod chars;
pub(crate) mod float;
pub(crate) mod int;
pub(crate) mod text;

use crate::{
    args::{ScanArg, ScanContext},
    buffer::ScanBuffer,
    error::ScanError,
    format::{FormatSpec, Presentation},
    locale::Locale,
};

/// Parses and validates the placeholder's spec, then runs the matching
/// value reader against the buffer and the output slot.
pub(crate) fn dispatch<'s>(
    arg: &mut ScanArg<'_, 's>,
    spec_src: &str,
    buf: &mut ScanBuffer<'s>,
    locale: &Locale,
) -> Result<(), ScanError> {
    if let ScanArg::Custom(handle) = arg {
        let mut ctx = ScanContext {
            buffer: buf,
            locale,
            spec: spec_src,
        };
        return handle.scan(&mut ctx);
    }

    let spec = FormatSpec::parse(spec_src)?;
    spec.validate(arg.kind())?;

    match arg {
        ScanArg::Bool(slot) => **slot = text::read_bool(buf, &spec)?,
        ScanArg::Char(slot) => {
            **slot = if spec.presentation == Presentation::Int {
                chars::read_code_point_as_int(buf, &spec, locale)?
            } else {
                chars::read_code_point(buf)?
            };
        }
        ScanArg::Byte(slot) => {
            **slot = if spec.presentation == Presentation::Int {
                int::read_int(buf, &spec, locale)?
            } else {
                chars::read_code_unit(buf)?
            };
        }
        ScanArg::I8(slot) => **slot = int::read_int(buf, &spec, locale)?,
        ScanArg::I16(slot) => **slot = int::read_int(buf, &spec, locale)?,
        ScanArg::I32(slot) => **slot = int::read_int(buf, &spec, locale)?,
        ScanArg::I64(slot) => **slot = int::read_int(buf, &spec, locale)?,
        ScanArg::I128(slot) => **slot = int::read_int(buf, &spec, locale)?,
        ScanArg::Isize(slot) => **slot = int::read_int(buf, &spec, locale)?,
        ScanArg::U8(slot) => **slot = int::read_int(buf, &spec, locale)?,
        ScanArg::U16(slot) => **slot = int::read_int(buf, &spec, locale)?,
        ScanArg::U32(slot) => **slot = int::read_int(buf, &spec, locale)?,
        ScanArg::U64(slot) => **slot = int::read_int(buf, &spec, locale)?,
        ScanArg::U128(slot) => **slot = int::read_int(buf, &spec, locale)?,
        ScanArg::Usize(slot) => **slot = int::read_int(buf, &spec, locale)?,
        ScanArg::F32(slot) => **slot = float::read_f32(buf, &spec, locale)?,
        ScanArg::F64(slot) => **slot = float::read_f64(buf, &spec, locale)?,
        ScanArg::CharBuf(slot) => text::read_exact(buf, slot)?,
        ScanArg::String(slot) => text::read_word(buf, slot)?,
        ScanArg::Str(slot) => **slot = text::read_word_slice(buf)?,
        ScanArg::Custom(_) => unreachable!("handled above"),
    }
    Ok(())
}
