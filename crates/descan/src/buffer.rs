//! The scan buffer: one read cursor, one rollback point.
//!
//! Two backings share the same surface and are picked at construction,
//! never mixed within one scan:
//!
//! - *contiguous*: borrows a `&str`; the cursor is a plain byte offset and
//!   the whole remaining input stays addressable, so readers can take
//!   borrowed slices out of it.
//! - *forward*: wraps a single-pass `char` iterator. Every character pulled
//!   from the source since the last commit is staged, so `undo` can
//!   re-present already-consumed characters without the source being
//!   rewindable.
//!
//! `commit` moves the rollback point to the cursor and is the only
//! operation that permanently discards staged characters. `undo` resets the
//! cursor to the rollback point and is idempotent.

use alloc::{boxed::Box, vec::Vec};

use crate::error::ScanError;

pub struct ScanBuffer<'s> {
    backing: Backing<'s>,
    read_total: usize,
}

enum Backing<'s> {
    Contiguous {
        input: &'s str,
        cursor: usize,
        rollback: usize,
        // High-water byte offset, for counting newly read characters only.
        high: usize,
    },
    Forward {
        source: Box<dyn Iterator<Item = char> + 's>,
        staged: Vec<char>,
        replay: usize,
    },
}

impl core::fmt::Debug for ScanBuffer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match &self.backing {
            Backing::Contiguous {
                cursor, rollback, ..
            } => f
                .debug_struct("ScanBuffer::Contiguous")
                .field("cursor", cursor)
                .field("rollback", rollback)
                .finish_non_exhaustive(),
            Backing::Forward { staged, replay, .. } => f
                .debug_struct("ScanBuffer::Forward")
                .field("staged", &staged.len())
                .field("replay", replay)
                .finish_non_exhaustive(),
        }
    }
}

impl<'s> ScanBuffer<'s> {
    /// Buffer over an in-memory string. The remainder after a scan stays
    /// borrowable from the original input.
    #[must_use]
    pub fn contiguous(input: &'s str) -> Self {
        Self {
            backing: Backing::Contiguous {
                input,
                cursor: 0,
                rollback: 0,
                high: 0,
            },
            read_total: 0,
        }
    }

    /// Buffer over a forward-only, non-rewindable character source.
    pub fn forward<I>(source: I) -> Self
    where
        I: Iterator<Item = char> + 's,
    {
        Self {
            backing: Backing::Forward {
                source: Box::new(source),
                staged: Vec::new(),
                replay: 0,
            },
            read_total: 0,
        }
    }

    /// Whether the whole remaining input is directly addressable.
    #[must_use]
    pub fn is_contiguous(&self) -> bool {
        matches!(self.backing, Backing::Contiguous { .. })
    }

    /// Characters pulled from the underlying source since construction.
    /// Re-reading after an `undo` does not count twice.
    #[must_use]
    pub fn characters_read(&self) -> usize {
        self.read_total
    }

    /// The next character, without consuming it.
    ///
    /// For the forward backing this may pull one character from the source
    /// into staging, which is why it takes `&mut self`.
    pub fn peek(&mut self) -> Option<char> {
        match &mut self.backing {
            Backing::Contiguous { input, cursor, .. } => input[*cursor..].chars().next(),
            Backing::Forward {
                source,
                staged,
                replay,
            } => {
                if let Some(&ch) = staged.get(*replay) {
                    return Some(ch);
                }
                let ch = source.next()?;
                staged.push(ch);
                self.read_total += 1;
                Some(ch)
            }
        }
    }

    /// Consumes and returns the next character.
    ///
    /// # Errors
    ///
    /// [`ScanError::EndOfStream`] when the source is exhausted. Callers
    /// treat this specially; it is not a generic parse error.
    pub fn read_one(&mut self) -> Result<char, ScanError> {
        match &mut self.backing {
            Backing::Contiguous {
                input,
                cursor,
                high,
                ..
            } => {
                let ch = input[*cursor..].chars().next().ok_or(ScanError::EndOfStream)?;
                *cursor += ch.len_utf8();
                if *cursor > *high {
                    *high = *cursor;
                    self.read_total += 1;
                }
                Ok(ch)
            }
            Backing::Forward {
                source,
                staged,
                replay,
            } => {
                if let Some(&ch) = staged.get(*replay) {
                    *replay += 1;
                    return Ok(ch);
                }
                let ch = source.next().ok_or(ScanError::EndOfStream)?;
                staged.push(ch);
                *replay += 1;
                self.read_total += 1;
                Ok(ch)
            }
        }
    }

    /// Moves the rollback point to the current cursor, discarding staged
    /// characters for the forward backing.
    pub fn commit(&mut self) {
        match &mut self.backing {
            Backing::Contiguous {
                cursor, rollback, ..
            } => *rollback = *cursor,
            Backing::Forward { staged, replay, .. } => {
                staged.drain(..*replay);
                *replay = 0;
            }
        }
    }

    /// Resets the cursor to the rollback point. Idempotent.
    pub fn undo(&mut self) {
        match &mut self.backing {
            Backing::Contiguous {
                cursor, rollback, ..
            } => *cursor = *rollback,
            Backing::Forward { replay, .. } => *replay = 0,
        }
    }

    /// Consumes whitespace up to the next non-whitespace character.
    ///
    /// # Errors
    ///
    /// [`ScanError::EndOfStream`] if the input runs out before one is
    /// found, whether or not any whitespace was consumed.
    pub fn skip_whitespace(&mut self) -> Result<(), ScanError> {
        loop {
            match self.peek() {
                None => return Err(ScanError::EndOfStream),
                Some(ch) if ch.is_whitespace() => {
                    self.read_one()?;
                }
                Some(_) => return Ok(()),
            }
        }
    }

    /// The unconsumed input from the rollback point on. Contiguous only.
    #[must_use]
    pub fn remainder(&self) -> Option<&'s str> {
        match &self.backing {
            Backing::Contiguous {
                input, rollback, ..
            } => Some(&input[*rollback..]),
            Backing::Forward { .. } => None,
        }
    }

    /// An opaque token for the current cursor, for speculative reads
    /// within a single value: take a mark, read ahead, and [`Self::reset`]
    /// if the speculation does not pan out. Marks are only valid until the
    /// next `commit`.
    pub(crate) fn mark(&self) -> usize {
        match &self.backing {
            Backing::Contiguous { cursor, .. } => *cursor,
            Backing::Forward { replay, .. } => *replay,
        }
    }

    /// Moves the cursor back to a previously taken [`Self::mark`].
    pub(crate) fn reset(&mut self, mark: usize) {
        match &mut self.backing {
            Backing::Contiguous { cursor, .. } => *cursor = mark,
            Backing::Forward { replay, .. } => *replay = mark,
        }
    }

    /// Current cursor byte offset into the original input. Contiguous only.
    pub(crate) fn contiguous_pos(&self) -> Option<usize> {
        match &self.backing {
            Backing::Contiguous { cursor, .. } => Some(*cursor),
            Backing::Forward { .. } => None,
        }
    }

    /// Borrows `input[start..end]` out of the original input. Contiguous
    /// only; offsets must come from [`Self::contiguous_pos`].
    pub(crate) fn contiguous_slice(&self, start: usize, end: usize) -> Option<&'s str> {
        match &self.backing {
            Backing::Contiguous { input, .. } => input.get(start..end),
            Backing::Forward { .. } => None,
        }
    }
}
