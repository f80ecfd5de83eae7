//! TOML transcript files.
//!
//! ```toml
//! [[line]]
//! prompt = true
//! text = "gatekey login"
//! at = 0
//!
//! [[line]]
//! text = "Authentication successful!"
//! at = 3600
//! emphasis = "success"
//! ```

use super::{Emphasis, Transcript, TranscriptLine};
use crate::error::Result;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TranscriptFile {
    #[serde(default, rename = "line")]
    lines: Vec<LineEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LineEntry {
    #[serde(default)]
    prompt: bool,
    text: String,
    at: u64,
    #[serde(default)]
    emphasis: Emphasis,
}

impl From<LineEntry> for TranscriptLine {
    fn from(entry: LineEntry) -> Self {
        Self {
            is_prompt: entry.prompt,
            text: entry.text,
            offset_millis: entry.at,
            emphasis: entry.emphasis,
        }
    }
}

impl Transcript {
    /// Parse a transcript from TOML source.
    ///
    /// Hand-authored files are validated strictly: a line scheduled before
    /// its predecessor is an error rather than an instant reveal.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let file: TranscriptFile = toml::from_str(source)?;
        let lines = file.lines.into_iter().map(TranscriptLine::from).collect();
        Ok(Self::strict(lines)?)
    }

    /// Read and parse a transcript file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let transcript = Self::from_toml_str(&source)?;
        tracing::debug!(path = %path.display(), lines = transcript.len(), "loaded transcript");
        Ok(transcript)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, TranscriptError};

    const SAMPLE: &str = r#"
[[line]]
prompt = true
text = "gatekey login"
at = 0

[[line]]
text = "Authenticating..."
at = 800

[[line]]
text = "ok"
at = 900
emphasis = "success"
"#;

    #[test]
    fn test_parse_sample() {
        let t = Transcript::from_toml_str(SAMPLE).unwrap();
        assert_eq!(t.len(), 3);
        assert!(t.get(0).unwrap().is_prompt);
        assert!(!t.get(1).unwrap().is_prompt);
        assert_eq!(t.get(1).unwrap().offset_millis, 800);
        assert_eq!(t.get(2).unwrap().emphasis, Emphasis::Success);
    }

    #[test]
    fn test_empty_file() {
        let t = Transcript::from_toml_str("").unwrap();
        assert!(t.is_empty());
    }

    #[test]
    fn test_out_of_order_rejected() {
        let src = "[[line]]\ntext = \"a\"\nat = 500\n\n[[line]]\ntext = \"b\"\nat = 100\n";
        match Transcript::from_toml_str(src) {
            Err(Error::Transcript(TranscriptError::OutOfOrder { index, .. })) => {
                assert_eq!(index, 1);
            }
            other => panic!("expected out-of-order error, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_emphasis_rejected() {
        let src = "[[line]]\ntext = \"a\"\nat = 0\nemphasis = \"loud\"\n";
        assert!(matches!(Transcript::from_toml_str(src), Err(Error::Parse(_))));
    }

    #[test]
    fn test_missing_offset_rejected() {
        let src = "[[line]]\ntext = \"a\"\n";
        assert!(matches!(Transcript::from_toml_str(src), Err(Error::Parse(_))));
    }
}
