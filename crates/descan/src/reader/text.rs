//! Word, fixed-capacity, borrowed-slice, and boolean readers.

use alloc::string::String;

use crate::{
    buffer::ScanBuffer,
    error::ScanError,
    format::{FormatSpec, Presentation},
};

/// What happened after feeding one more character into the word matcher?
pub(crate) enum Step {
    /// Character matched, but the word is not finished yet.
    NeedMore,
    /// Character matched *and* it was the last one.
    Done,
    /// Character did **not** match the expected byte.
    Reject,
}

/// Incremental matcher for a fixed expected word (`true`, `infinity`, ...).
#[derive(Debug, Clone, Copy)]
pub(crate) struct ExpectedWord {
    rest: &'static [u8],
    ignore_case: bool,
}

impl ExpectedWord {
    pub(crate) fn exact(word: &'static str) -> Self {
        Self {
            rest: word.as_bytes(),
            ignore_case: false,
        }
    }

    pub(crate) fn ignore_ascii_case(word: &'static str) -> Self {
        Self {
            rest: word.as_bytes(),
            ignore_case: true,
        }
    }

    /// Give the matcher the next input character and learn what to do next.
    pub(crate) fn step(&mut self, ch: char) -> Step {
        let Some((&expected, rest)) = self.rest.split_first() else {
            return Step::Reject;
        };
        let matched = if self.ignore_case {
            ch.eq_ignore_ascii_case(&(expected as char))
        } else {
            ch == expected as char
        };
        if !matched {
            return Step::Reject;
        }
        self.rest = rest;
        if self.rest.is_empty() { Step::Done } else { Step::NeedMore }
    }

    /// Drives the matcher off the buffer front until done.
    pub(crate) fn consume(mut self, buf: &mut ScanBuffer<'_>) -> Result<(), ScanError> {
        loop {
            let ch = buf.read_one()?;
            match self.step(ch) {
                Step::NeedMore => {}
                Step::Done => return Ok(()),
                Step::Reject => {
                    return Err(ScanError::InvalidScannedValue("unexpected character"));
                }
            }
        }
    }
}

/// Reads one whitespace-delimited word into an owned string.
pub(crate) fn read_word(buf: &mut ScanBuffer<'_>, dst: &mut String) -> Result<(), ScanError> {
    buf.skip_whitespace()?;
    dst.clear();
    while let Some(ch) = buf.peek() {
        if ch.is_whitespace() {
            break;
        }
        buf.read_one()?;
        dst.push(ch);
    }
    Ok(())
}

/// Reads one word as a borrowed slice of the original input.
pub(crate) fn read_word_slice<'s>(buf: &mut ScanBuffer<'s>) -> Result<&'s str, ScanError> {
    let Some(start) = buf.contiguous_pos() else {
        return Err(ScanError::InvalidOperation(
            "a borrowed string slot requires contiguous input",
        ));
    };
    buf.skip_whitespace()?;
    let start = buf.contiguous_pos().unwrap_or(start);
    while let Some(ch) = buf.peek() {
        if ch.is_whitespace() {
            break;
        }
        buf.read_one()?;
    }
    let end = buf.contiguous_pos().unwrap_or(start);
    buf.contiguous_slice(start, end)
        .ok_or(ScanError::InvalidOperation(
            "a borrowed string slot requires contiguous input",
        ))
}

/// Fills a fixed-capacity buffer to exactly its length.
pub(crate) fn read_exact(buf: &mut ScanBuffer<'_>, dst: &mut [u8]) -> Result<(), ScanError> {
    buf.skip_whitespace()?;
    let mut filled = 0;
    while filled < dst.len() {
        let ch = match buf.read_one() {
            Ok(ch) => ch,
            Err(ScanError::EndOfStream) => {
                return Err(ScanError::InvalidScannedValue(
                    "input ended before filling the buffer",
                ));
            }
            Err(e) => return Err(e),
        };
        let len = ch.len_utf8();
        if len > dst.len() - filled {
            return Err(ScanError::InvalidScannedValue(
                "character does not fit the remaining buffer capacity",
            ));
        }
        ch.encode_utf8(&mut dst[filled..]);
        filled += len;
    }
    Ok(())
}

/// Reads a boolean. The spec decides which forms apply: `a` restricts to
/// the words, an integer presentation restricts to the digits, the default
/// accepts both.
pub(crate) fn read_bool(buf: &mut ScanBuffer<'_>, spec: &FormatSpec) -> Result<bool, ScanError> {
    buf.skip_whitespace()?;
    let words = spec.presentation != Presentation::Int;
    let digits = matches!(spec.presentation, Presentation::Default | Presentation::Int);
    match buf.peek() {
        Some('t') if words => {
            ExpectedWord::exact("true").consume(buf)?;
            Ok(true)
        }
        Some('f') if words => {
            ExpectedWord::exact("false").consume(buf)?;
            Ok(false)
        }
        Some('0') if digits => {
            buf.read_one()?;
            Ok(false)
        }
        Some('1') if digits => {
            buf.read_one()?;
            Ok(true)
        }
        _ => Err(ScanError::InvalidScannedValue("expected a boolean")),
    }
}
