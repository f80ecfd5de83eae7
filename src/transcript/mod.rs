//! Transcript: the fixed script of prompts and output lines to reveal.
//!
//! A [`Transcript`] is built once and never changes. Cloning it is cheap,
//! so several playback engines (or an engine and its view) can hold the
//! same script.

mod file;
mod gatekey;
mod line;

pub use line::{Emphasis, TranscriptLine};

use crate::error::TranscriptError;
use std::sync::Arc;

/// An immutable, ordered sequence of [`TranscriptLine`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    lines: Arc<[TranscriptLine]>,
}

impl Transcript {
    /// Create a transcript without checking its timing.
    ///
    /// Lines scheduled before their predecessor are revealed immediately
    /// during playback.
    pub fn new(lines: Vec<TranscriptLine>) -> Self {
        Self {
            lines: lines.into(),
        }
    }

    /// Create a transcript, rejecting offsets that go backwards.
    pub fn strict(lines: Vec<TranscriptLine>) -> Result<Self, TranscriptError> {
        let transcript = Self::new(lines);
        transcript.validate()?;
        Ok(transcript)
    }

    /// Check that offsets never decrease. Equal offsets are allowed.
    pub fn validate(&self) -> Result<(), TranscriptError> {
        for (index, pair) in self.lines.windows(2).enumerate() {
            let (previous, line) = (&pair[0], &pair[1]);
            if line.offset_millis < previous.offset_millis {
                return Err(TranscriptError::OutOfOrder {
                    index: index + 1,
                    offset_millis: line.offset_millis,
                    previous_millis: previous.offset_millis,
                });
            }
        }
        Ok(())
    }

    /// Number of lines.
    #[inline]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the transcript has no lines.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line at `index`, if any.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&TranscriptLine> {
        self.lines.get(index)
    }

    /// All lines, in order.
    #[inline]
    pub fn lines(&self) -> &[TranscriptLine] {
        &self.lines
    }

    /// Iterate over the lines in order.
    pub fn iter(&self) -> std::slice::Iter<'_, TranscriptLine> {
        self.lines.iter()
    }

    /// Milliseconds between line `index - 1` and line `index`.
    ///
    /// Returns `None` for the first line (and past the end). Offsets that
    /// go backwards yield `Some(0)`.
    pub fn gap_before(&self, index: usize) -> Option<u64> {
        let previous = self.lines.get(index.checked_sub(1)?)?;
        let line = self.lines.get(index)?;
        Some(line.offset_millis.saturating_sub(previous.offset_millis))
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a TranscriptLine;
    type IntoIter = std::slice::Iter<'a, TranscriptLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<Vec<TranscriptLine>> for Transcript {
    fn from(lines: Vec<TranscriptLine>) -> Self {
        Self::new(lines)
    }
}
