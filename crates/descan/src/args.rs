//! Output slots: a closed, tagged union over everything a placeholder can
//! scan into.
//!
//! A [`ScanArg`] never owns the underlying storage; it is a mutable
//! reference into a caller-supplied slot, alive for one scan call. The
//! `'s` lifetime ties borrowed-slice slots to the scanned input itself.

use alloc::string::String;

use crate::{buffer::ScanBuffer, error::ScanError, locale::Locale};

/// One output slot for a single scan call.
pub enum ScanArg<'a, 's> {
    /// A single code unit. Consumes exactly one input byte worth of text.
    Byte(&'a mut u8),
    /// One unicode scalar, fully decoded and validated.
    Char(&'a mut char),
    Bool(&'a mut bool),
    I8(&'a mut i8),
    I16(&'a mut i16),
    I32(&'a mut i32),
    I64(&'a mut i64),
    I128(&'a mut i128),
    Isize(&'a mut isize),
    U8(&'a mut u8),
    U16(&'a mut u16),
    U32(&'a mut u32),
    U64(&'a mut u64),
    U128(&'a mut u128),
    Usize(&'a mut usize),
    F32(&'a mut f32),
    F64(&'a mut f64),
    /// Fixed-capacity write target, filled to exactly its length.
    CharBuf(&'a mut [u8]),
    /// Owned growable string; receives one whitespace-delimited word.
    String(&'a mut String),
    /// Non-owning view into the scanned input. Contiguous sources only.
    Str(&'a mut &'s str),
    /// Opaque handle: the engine invokes [`CustomScan::scan`] and forwards
    /// its result without interpreting the slot.
    Custom(&'a mut dyn CustomScan),
}

/// Slot kinds the dispatcher selects readers by. The slot's declared kind
/// is always authoritative; the format spec only picks among readers valid
/// for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ArgKind {
    Byte,
    Char,
    Bool,
    SignedInt,
    UnsignedInt,
    Float,
    Word,
    Custom,
}

impl ScanArg<'_, '_> {
    pub(crate) fn kind(&self) -> ArgKind {
        match self {
            ScanArg::Byte(_) => ArgKind::Byte,
            ScanArg::Char(_) => ArgKind::Char,
            ScanArg::Bool(_) => ArgKind::Bool,
            ScanArg::I8(_)
            | ScanArg::I16(_)
            | ScanArg::I32(_)
            | ScanArg::I64(_)
            | ScanArg::I128(_)
            | ScanArg::Isize(_) => ArgKind::SignedInt,
            ScanArg::U8(_)
            | ScanArg::U16(_)
            | ScanArg::U32(_)
            | ScanArg::U64(_)
            | ScanArg::U128(_)
            | ScanArg::Usize(_) => ArgKind::UnsignedInt,
            ScanArg::F32(_) | ScanArg::F64(_) => ArgKind::Float,
            ScanArg::CharBuf(_) | ScanArg::String(_) | ScanArg::Str(_) => ArgKind::Word,
            ScanArg::Custom(_) => ArgKind::Custom,
        }
    }
}

impl core::fmt::Debug for ScanArg<'_, '_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "ScanArg::{:?}", self.kind())
    }
}

macro_rules! impl_from_slot {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl<'a, 's> From<&'a mut $ty> for ScanArg<'a, 's> {
                fn from(slot: &'a mut $ty) -> Self {
                    ScanArg::$variant(slot)
                }
            }
        )*
    };
}

// `&mut u8` is deliberately absent: a u8 slot is either a code unit
// (`ScanArg::Byte`) or an integer (`ScanArg::U8`), and the caller must say
// which.
impl_from_slot! {
    char => Char,
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    i128 => I128,
    isize => Isize,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    u128 => U128,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    String => String,
}

impl<'a, 's> From<&'a mut &'s str> for ScanArg<'a, 's> {
    fn from(slot: &'a mut &'s str) -> Self {
        ScanArg::Str(slot)
    }
}

impl<'a, 's> From<&'a mut [u8]> for ScanArg<'a, 's> {
    fn from(slot: &'a mut [u8]) -> Self {
        ScanArg::CharBuf(slot)
    }
}

/// Capability interface for user-defined scannable types.
///
/// The engine calls [`scan`](Self::scan) with the live context and
/// propagates the result verbatim; it never inspects the slot further.
pub trait CustomScan {
    /// Consume characters from the context and update `self`.
    ///
    /// # Errors
    ///
    /// Any [`ScanError`]; the driver rolls the buffer back to the last
    /// commit point and surfaces it unchanged.
    fn scan(&mut self, ctx: &mut ScanContext<'_, '_>) -> Result<(), ScanError>;
}

/// What a [`CustomScan`] implementation gets to work with: the scan buffer,
/// the locale, and the raw (uninterpreted) spec text of its placeholder.
pub struct ScanContext<'b, 's> {
    pub(crate) buffer: &'b mut ScanBuffer<'s>,
    pub(crate) locale: &'b Locale,
    pub(crate) spec: &'b str,
}

impl<'s> ScanContext<'_, 's> {
    /// Consumes and returns the next character.
    ///
    /// # Errors
    ///
    /// [`ScanError::EndOfStream`] when the input is exhausted.
    pub fn read_one(&mut self) -> Result<char, ScanError> {
        self.buffer.read_one()
    }

    /// The next character without consuming it.
    pub fn peek(&mut self) -> Option<char> {
        self.buffer.peek()
    }

    /// Consumes whitespace up to the next non-whitespace character.
    ///
    /// # Errors
    ///
    /// [`ScanError::EndOfStream`] if none is found.
    pub fn skip_whitespace(&mut self) -> Result<(), ScanError> {
        self.buffer.skip_whitespace()
    }

    #[must_use]
    pub fn locale(&self) -> &Locale {
        self.locale
    }

    /// The text between `:` and `}` of this placeholder, verbatim.
    #[must_use]
    pub fn spec(&self) -> &str {
        self.spec
    }
}
