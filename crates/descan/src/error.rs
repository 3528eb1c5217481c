use thiserror::Error;

/// Which end of the representable range a value fell off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeError {
    /// Magnitude saturated to the type's maximum (or infinity).
    Overflow,
    /// Magnitude collapsed to zero.
    Underflow,
}

impl core::fmt::Display for RangeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RangeError::Overflow => f.write_str("overflow"),
            RangeError::Underflow => f.write_str("underflow"),
        }
    }
}

/// Everything that can go wrong during a scan.
///
/// End of stream is a distinct kind, not a generic parse error: the driver
/// treats it as a normal outcome when it occurs between tokens, and only
/// surfaces it when a value or literal match actually needed a character.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanError {
    #[error("unexpected end of input")]
    EndOfStream,
    #[error("invalid format string: {0}")]
    InvalidFormatString(&'static str),
    #[error("invalid scanned value: {0}")]
    InvalidScannedValue(&'static str),
    #[error("value out of range: {0}")]
    ValueOutOfRange(RangeError),
    #[error("invalid operation: {0}")]
    InvalidOperation(&'static str),
}

impl ScanError {
    /// Returns `true` if the error is [`EndOfStream`].
    ///
    /// [`EndOfStream`]: ScanError::EndOfStream
    #[must_use]
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, Self::EndOfStream)
    }
}
