//! A single timed line of a transcript.

use serde::Deserialize;

/// Styling hint for an output line.
///
/// The engine carries this through untouched; only the view reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emphasis {
    /// Plain output.
    #[default]
    None,
    /// Something went right (drawn green).
    Success,
    /// Low-importance chatter such as `wg-quick` traces (drawn gray).
    Dim,
}

/// One line of a recorded session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptLine {
    /// `true` for a typed command, `false` for program output.
    pub is_prompt: bool,
    /// Text to display. May contain ANSI SGR sequences.
    pub text: String,
    /// Milliseconds from the start of a cycle at which the line appears.
    pub offset_millis: u64,
    /// Styling hint.
    pub emphasis: Emphasis,
}

impl TranscriptLine {
    /// A typed command appearing at `offset_millis`.
    pub fn prompt(text: impl Into<String>, offset_millis: u64) -> Self {
        Self {
            is_prompt: true,
            text: text.into(),
            offset_millis,
            emphasis: Emphasis::None,
        }
    }

    /// A line of program output appearing at `offset_millis`.
    pub fn output(text: impl Into<String>, offset_millis: u64) -> Self {
        Self {
            is_prompt: false,
            text: text.into(),
            offset_millis,
            emphasis: Emphasis::None,
        }
    }

    /// Mark the line as a success message.
    #[must_use]
    pub const fn success(mut self) -> Self {
        self.emphasis = Emphasis::Success;
        self
    }

    /// Mark the line as dimmed.
    #[must_use]
    pub const fn dim(mut self) -> Self {
        self.emphasis = Emphasis::Dim;
        self
    }
}
