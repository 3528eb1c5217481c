//! Format-string walking and the per-placeholder spec mini-grammar.
//!
//! [`FormatParseContext`] is a cursor over the format string that never
//! moves backward. Each driver step asks it one of three questions: is the
//! next token whitespace, a literal character (including the `{{` / `}}`
//! escapes), or an argument placeholder. Placeholders carry an optional id
//! and an optional `:SPEC` suffix, parsed here into a [`FormatSpec`] and
//! validated against the output slot's kind *before* any input character
//! is consumed.

use crate::{args::ArgKind, error::ScanError};

/// How a placeholder names its argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ArgId<'f> {
    /// `{}`: next unconsumed argument, in order.
    Implicit,
    /// `{N}`: explicit zero-based index.
    Index(usize),
    /// `{name}`: looked up in the caller's name table.
    Name(&'f str),
}

#[derive(Debug)]
pub(crate) struct FormatParseContext<'f> {
    fmt: &'f str,
    pos: usize,
    next_arg: usize,
}

impl<'f> FormatParseContext<'f> {
    pub(crate) fn new(fmt: &'f str) -> Self {
        Self {
            fmt,
            pos: 0,
            next_arg: 0,
        }
    }

    pub(crate) fn has_more(&self) -> bool {
        self.pos < self.fmt.len()
    }

    fn rest(&self) -> &'f str {
        &self.fmt[self.pos..]
    }

    /// True when the next format token is whitespace, meaning both the
    /// format string and the input should skip a whitespace run.
    pub(crate) fn should_skip_ws(&self) -> bool {
        self.rest().starts_with(char::is_whitespace)
    }

    pub(crate) fn skip_ws(&mut self) {
        let rest = self.rest();
        let trimmed = rest.trim_start();
        self.pos += rest.len() - trimmed.len();
    }

    /// True for any token that must match the next input character exactly:
    /// a plain character, or an escaped brace.
    pub(crate) fn should_read_literal(&self) -> bool {
        let rest = self.rest();
        if rest.starts_with("{{") || rest.starts_with("}}") {
            return true;
        }
        !rest.starts_with('{')
    }

    /// Consumes one literal token and returns the character the input must
    /// match.
    pub(crate) fn take_literal(&mut self) -> Result<char, ScanError> {
        let rest = self.rest();
        if rest.starts_with("{{") {
            self.pos += 2;
            return Ok('{');
        }
        if rest.starts_with("}}") {
            self.pos += 2;
            return Ok('}');
        }
        match rest.chars().next() {
            Some('}') => Err(ScanError::InvalidFormatString(
                "unmatched '}' in format string",
            )),
            Some(ch) => {
                self.pos += ch.len_utf8();
                Ok(ch)
            }
            None => Err(ScanError::InvalidFormatString(
                "unexpected end of format string",
            )),
        }
    }

    /// Consumes the opening `{` of a placeholder.
    pub(crate) fn begin_argument(&mut self) {
        debug_assert!(self.rest().starts_with('{'));
        self.pos += 1;
    }

    /// Parses the argument id between `{` and the following `:` or `}`.
    ///
    /// Index digits accumulate checked: a pathologically large explicit
    /// index is an error, never a silent wrap.
    pub(crate) fn parse_arg_id(&mut self) -> Result<ArgId<'f>, ScanError> {
        let rest = self.rest();
        let end = rest
            .find([':', '}'])
            .ok_or(ScanError::InvalidFormatString("unterminated '{'"))?;
        let id = &rest[..end];
        self.pos += end;
        if id.is_empty() {
            return Ok(ArgId::Implicit);
        }
        if id.starts_with(|c: char| c.is_ascii_digit()) {
            let mut index = 0usize;
            for ch in id.chars() {
                let digit = ch
                    .to_digit(10)
                    .ok_or(ScanError::InvalidFormatString("malformed argument index"))?;
                index = index
                    .checked_mul(10)
                    .and_then(|n| n.checked_add(digit as usize))
                    .ok_or(ScanError::InvalidFormatString("argument index overflows"))?;
            }
            return Ok(ArgId::Index(index));
        }
        Ok(ArgId::Name(id))
    }

    /// Consumes the `:SPEC}` (or bare `}`) tail of a placeholder and
    /// returns the raw spec text.
    pub(crate) fn take_spec(&mut self) -> Result<&'f str, ScanError> {
        let rest = self.rest();
        if rest.starts_with('}') {
            self.pos += 1;
            return Ok("");
        }
        let Some(rest) = rest.strip_prefix(':') else {
            return Err(ScanError::InvalidFormatString("unterminated '{'"));
        };
        let end = rest
            .find('}')
            .ok_or(ScanError::InvalidFormatString("unterminated format spec"))?;
        self.pos += 1 + end + 1;
        Ok(&rest[..end])
    }

    /// The auto-increment counter for implicit `{}` placeholders. Advances
    /// once per handled argument, explicit or not.
    pub(crate) fn next_arg_index(&self) -> usize {
        self.next_arg
    }

    pub(crate) fn arg_handled(&mut self) {
        self.next_arg += 1;
    }
}

/// Requested interpretation of a placeholder, independent of the slot's
/// underlying type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Presentation {
    #[default]
    Default,
    Char,
    Int,
    Float,
    Word,
    BoolAlpha,
}

/// A parsed `:SPEC` descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct FormatSpec {
    pub presentation: Presentation,
    /// Requested base: 0 means auto-detect from a prefix, else 2..=36.
    pub base: u8,
    /// `'`: accept grouping separators at locale-correct boundaries.
    pub thousands_sep: bool,
    /// `u`: reject a leading sign.
    pub unsigned_only: bool,
    /// Accept a `0x` / `0B` / leading-`0` base prefix.
    pub base_prefix: bool,
    /// `n`: use the locale's digit range and grouping.
    pub localized: bool,
}

impl FormatSpec {
    pub(crate) fn parse(text: &str) -> Result<Self, ScanError> {
        let mut spec = FormatSpec::default();
        let mut chars = text.chars().peekable();
        while let Some(ch) = chars.next() {
            match ch {
                'd' => spec.set_int(10, false)?,
                'i' => spec.set_int(0, true)?,
                'x' => spec.set_int(16, true)?,
                'o' => spec.set_int(8, true)?,
                'b' => {
                    let mut base = 0u32;
                    let mut digits = 0;
                    while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
                        chars.next();
                        base = base * 10 + d;
                        digits += 1;
                        if digits > 2 {
                            return Err(ScanError::InvalidFormatString(
                                "base out of range (2..=36)",
                            ));
                        }
                    }
                    if digits == 0 {
                        spec.set_int(2, true)?;
                    } else if (2..=36).contains(&base) {
                        #[allow(clippy::cast_possible_truncation)]
                        spec.set_int(base as u8, true)?;
                    } else {
                        return Err(ScanError::InvalidFormatString("base out of range (2..=36)"));
                    }
                }
                'f' | 'e' | 'g' => spec.set_presentation(Presentation::Float)?,
                'c' => spec.set_presentation(Presentation::Char)?,
                's' => spec.set_presentation(Presentation::Word)?,
                'a' => spec.set_presentation(Presentation::BoolAlpha)?,
                '\'' => spec.thousands_sep = true,
                'u' => spec.unsigned_only = true,
                'n' => spec.localized = true,
                _ => {
                    return Err(ScanError::InvalidFormatString(
                        "unrecognized format spec option",
                    ));
                }
            }
        }
        Ok(spec)
    }

    fn set_int(&mut self, base: u8, prefix: bool) -> Result<(), ScanError> {
        self.set_presentation(Presentation::Int)?;
        self.base = base;
        self.base_prefix = prefix;
        Ok(())
    }

    fn set_presentation(&mut self, p: Presentation) -> Result<(), ScanError> {
        if self.presentation != Presentation::Default {
            return Err(ScanError::InvalidFormatString(
                "conflicting presentation types in format spec",
            ));
        }
        self.presentation = p;
        Ok(())
    }

    /// Rejects option combinations the slot's type cannot honor. Runs
    /// before any input character is consumed; an invalid combination is
    /// never a partial read.
    pub(crate) fn validate(&self, kind: ArgKind) -> Result<(), ScanError> {
        use Presentation::{BoolAlpha, Char, Default, Float, Int, Word};
        let ok = match kind {
            ArgKind::SignedInt | ArgKind::UnsignedInt => {
                matches!(self.presentation, Default | Int)
            }
            ArgKind::Float => {
                if self.thousands_sep || self.unsigned_only {
                    return Err(ScanError::InvalidFormatString(
                        "integer-only option on a float slot",
                    ));
                }
                matches!(self.presentation, Default | Float)
            }
            ArgKind::Byte | ArgKind::Char => {
                if self.presentation != Int && (self.thousands_sep || self.unsigned_only) {
                    return Err(ScanError::InvalidFormatString(
                        "integer-only option on a character slot",
                    ));
                }
                matches!(self.presentation, Default | Char | Int)
            }
            ArgKind::Bool => {
                if self.thousands_sep || self.unsigned_only || self.localized {
                    return Err(ScanError::InvalidFormatString(
                        "numeric option on a boolean slot",
                    ));
                }
                if self.presentation == Int && self.base != 10 {
                    return Err(ScanError::InvalidFormatString(
                        "base override on a boolean slot",
                    ));
                }
                matches!(self.presentation, Default | BoolAlpha | Int)
            }
            ArgKind::Word => {
                if self.thousands_sep || self.unsigned_only || self.localized {
                    return Err(ScanError::InvalidFormatString(
                        "numeric option on a string slot",
                    ));
                }
                matches!(self.presentation, Default | Word)
            }
            // The engine never interprets a custom slot's spec.
            ArgKind::Custom => true,
        };
        if ok {
            Ok(())
        } else {
            Err(ScanError::InvalidFormatString(
                "presentation type does not apply to this slot",
            ))
        }
    }
}
