//! Core data models for transcripts.

use serde::Serialize;

use crate::core::encoding::Encoding;

/// A decoded chat transcript.
///
/// Line endings are normalised to `\n` on construction, so `\r\n` and lone
/// `\r` exports behave the same way downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    text: String,
    encoding: Encoding,
}

impl Transcript {
    /// Wraps decoded text, normalising its line endings.
    pub fn new(text: impl Into<String>, encoding: Encoding) -> Self {
        let text = text.into();
        let text = if text.contains('\r') {
            text.replace("\r\n", "\n").replace('\r', "\n")
        } else {
            text
        };
        Self { text, encoding }
    }

    /// The full transcript text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The encoding that decoded this transcript.
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Lines with their trailing `\n` kept.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split_inclusive('\n')
    }

    pub fn line_count(&self) -> usize {
        self.lines().count()
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// The subsequence of transcript lines that fall inside a date range.
///
/// Lines are kept verbatim, including their trailing newline. Produced by
/// [`filter_transcript`](crate::core::filter::filter_transcript) and never
/// empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FilteredTranscript {
    text: String,
}

impl FilteredTranscript {
    pub(crate) fn new(text: String) -> Self {
        Self { text }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Lines with their trailing `\n` kept.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split_inclusive('\n')
    }

    pub fn line_count(&self) -> usize {
        self.lines().count()
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl AsRef<str> for FilteredTranscript {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl std::fmt::Display for FilteredTranscript {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
