//! The scan driver: walks the format string, interleaves literal matching
//! and argument scanning, and runs the buffer's commit/rollback protocol.
//!
//! The buffer commits after every fully successful token (a whitespace
//! run, a literal match, an argument), so on failure a single `undo`
//! puts the leftover exactly where the failing token started. The count
//! in the result only ever reflects fully committed arguments.

use crate::{
    args::ScanArg,
    buffer::ScanBuffer,
    error::ScanError,
    format::{ArgId, FormatParseContext},
    locale::Locale,
    reader,
};

/// Outcome of scanning a caller-owned buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanStatus {
    /// Arguments fully scanned and committed.
    pub scanned: usize,
    /// `None` on success.
    pub error: Option<ScanError>,
}

/// Outcome of scanning a contiguous string.
///
/// The leftover input is borrowed from the original string and positioned
/// at the last commit point, so it can be handed straight to another scan
/// call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanResult<'s> {
    /// Arguments fully scanned and committed.
    pub scanned: usize,
    /// Unconsumed (or rolled-back) input.
    pub remainder: &'s str,
    /// `None` on success.
    pub error: Option<ScanError>,
}

impl ScanResult<'_> {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Scans `input` according to `fmt` into the given slots.
///
/// ```
/// extern crate alloc;
/// use alloc::string::String;
/// use descan::scan;
///
/// let mut n = 0i32;
/// let mut word = String::new();
/// let result = scan("42 foo", "{} {}", &mut [(&mut n).into(), (&mut word).into()]);
/// assert!(result.is_ok());
/// assert_eq!((n, word.as_str()), (42, "foo"));
/// ```
pub fn scan<'s>(input: &'s str, fmt: &str, args: &mut [ScanArg<'_, 's>]) -> ScanResult<'s> {
    scan_localized(input, fmt, &Locale::default(), args)
}

/// [`scan`] with an explicit locale for the `n`-spec readers.
pub fn scan_localized<'s>(
    input: &'s str,
    fmt: &str,
    locale: &Locale,
    args: &mut [ScanArg<'_, 's>],
) -> ScanResult<'s> {
    let mut buf = ScanBuffer::contiguous(input);
    let status = run(&mut buf, fmt, &[], locale, args);
    ScanResult {
        scanned: status.scanned,
        remainder: buf.remainder().unwrap_or(""),
        error: status.error,
    }
}

/// [`scan`] with a name table resolving `{name}` placeholders. `names`
/// runs parallel to `args`.
pub fn scan_named<'s>(
    input: &'s str,
    fmt: &str,
    names: &[&str],
    args: &mut [ScanArg<'_, 's>],
) -> ScanResult<'s> {
    let mut buf = ScanBuffer::contiguous(input);
    let status = run(&mut buf, fmt, names, &Locale::default(), args);
    ScanResult {
        scanned: status.scanned,
        remainder: buf.remainder().unwrap_or(""),
        error: status.error,
    }
}

/// Scans a caller-owned buffer in place. This is the entry point for
/// forward-only streams and for chaining several scans over one source:
/// the buffer keeps its position between calls.
pub fn scan_buffer<'s>(
    buf: &mut ScanBuffer<'s>,
    fmt: &str,
    args: &mut [ScanArg<'_, 's>],
) -> ScanStatus {
    run(buf, fmt, &[], &Locale::default(), args)
}

fn run<'s>(
    buf: &mut ScanBuffer<'s>,
    fmt: &str,
    names: &[&str],
    locale: &Locale,
    args: &mut [ScanArg<'_, 's>],
) -> ScanStatus {
    let mut pctx = FormatParseContext::new(fmt);
    let mut scanned = 0;

    macro_rules! fail {
        ($err:expr) => {
            return ScanStatus {
                scanned,
                error: Some($err),
            }
        };
    }

    // Leading input whitespace is skipped unconditionally; end of input
    // here is not an error (empty input against an empty format string
    // succeeds).
    if buf.skip_whitespace().is_ok() {
        buf.commit();
    }

    while pctx.has_more() {
        if pctx.should_skip_ws() {
            // Whitespace in the format string folds a whitespace run on
            // both sides.
            pctx.skip_ws();
            match buf.skip_whitespace() {
                Ok(()) => buf.commit(),
                // Input exhausted while skipping: the loop ends; whether
                // that is a success depends on the format string being
                // exhausted too, checked below.
                Err(_) => break,
            }
            continue;
        }

        if pctx.should_read_literal() {
            let expected = match pctx.take_literal() {
                Ok(ch) => ch,
                Err(e) => fail!(e),
            };
            match buf.read_one() {
                Ok(ch) if ch == expected => buf.commit(),
                Ok(_) => {
                    buf.undo();
                    fail!(ScanError::InvalidScannedValue(
                        "expected character from format string not found in input"
                    ));
                }
                Err(e) => {
                    buf.undo();
                    fail!(e);
                }
            }
            continue;
        }

        pctx.begin_argument();
        let id = match pctx.parse_arg_id() {
            Ok(id) => id,
            Err(e) => fail!(e),
        };
        let spec_src = match pctx.take_spec() {
            Ok(spec) => spec,
            Err(e) => fail!(e),
        };
        let index = match id {
            ArgId::Implicit => pctx.next_arg_index(),
            ArgId::Index(n) => n,
            ArgId::Name(name) => match names.iter().position(|n| *n == name) {
                Some(i) => i,
                None => fail!(ScanError::InvalidFormatString("unknown argument name")),
            },
        };
        let Some(arg) = args.get_mut(index) else {
            fail!(ScanError::InvalidFormatString(
                "mismatch between arguments and placeholders in the format string"
            ));
        };
        match reader::dispatch(arg, spec_src, buf, locale) {
            Ok(()) => {
                buf.commit();
                scanned += 1;
                pctx.arg_handled();
            }
            Err(e) => {
                buf.undo();
                fail!(e);
            }
        }
    }

    if pctx.has_more() {
        fail!(ScanError::InvalidFormatString("format string not exhausted"));
    }
    buf.commit();
    ScanStatus {
        scanned,
        error: None,
    }
}
