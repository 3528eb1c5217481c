//! Formatted input scanning over strings and character streams, the
//! reading counterpart of `format!`-style output.
//!
//! A format string interleaves literal text, whitespace tokens, and
//! `{}` placeholders; [`scan`] matches it against the input and fills
//! caller-supplied slots. On failure the unconsumed input is rolled
//! back to the start of the failing token, so partial results compose.
//!
//! ```rust
//! extern crate alloc;
//! use alloc::string::String;
//! use descan::scan;
//!
//! let mut n = 0i32;
//! let mut word = String::new();
//! let mut x = 0.0f64;
//! let result = scan(
//!     "42 foo 3.14",
//!     "{} {} {}",
//!     &mut [(&mut n).into(), (&mut word).into(), (&mut x).into()],
//! );
//! assert!(result.is_ok());
//! assert_eq!(result.scanned, 3);
//! assert_eq!((n, word.as_str(), x), (42, "foo", 3.14));
//! ```

#![no_std]
#![allow(missing_docs)]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod args;
mod buffer;
mod error;
mod format;
mod locale;
mod reader;
mod scan;

#[cfg(test)]
mod tests;

pub use args::{CustomScan, ScanArg, ScanContext};
pub use buffer::ScanBuffer;
pub use error::{RangeError, ScanError};
pub use locale::Locale;
pub use scan::{ScanResult, ScanStatus, scan, scan_buffer, scan_localized, scan_named};
