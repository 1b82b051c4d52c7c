//! Transcript decoding under uncertain text encoding.
//!
//! Chat exports come out of phones, desktop clients and re-saved editors,
//! so the same transcript may arrive as plain UTF-8, UTF-8 with a byte-order
//! mark, UTF-16, or a legacy single-byte code page. [`decode_transcript`]
//! tries a fixed, ordered list of [`Encoding`] candidates and keeps the first
//! one that decodes the *entire* input. Invalid bytes are never replaced: a
//! candidate either succeeds completely or is skipped.
//!
//! Plain [`Encoding::Utf8`] refuses input that starts with a byte-order
//! mark instead of decoding it as a leading U+FEFF, which would otherwise
//! glue an invisible character onto the first timestamp. Such input falls
//! through to [`Encoding::Utf8Bom`], which strips the mark.
//!
//! # Example
//!
//! ```rust
//! use chatpulse::core::encoding::{Encoding, decode_transcript};
//!
//! let bytes = b"\xEF\xBB\xBF01/03/23, 09:15 - Alice: hi\r\n";
//! let transcript = decode_transcript(bytes, Encoding::DEFAULT_ORDER)?;
//!
//! assert_eq!(transcript.encoding(), Encoding::Utf8Bom);
//! assert_eq!(transcript.text(), "01/03/23, 09:15 - Alice: hi\n");
//! # Ok::<(), chatpulse::ChatpulseError>(())
//! ```

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::models::Transcript;
use crate::error::{ChatpulseError, Result};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A candidate text encoding for transcript files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Encoding {
    /// Strict UTF-8 without a byte-order mark. A leading BOM is rejected
    /// rather than kept as U+FEFF, so that input reaches [`Encoding::Utf8Bom`].
    Utf8,
    /// Strict UTF-8 with an optional leading byte-order mark (stripped).
    Utf8Bom,
    /// UTF-16, endianness taken from the BOM, little-endian when absent.
    Utf16,
    /// ISO-8859-1. Every byte is a valid character, so this never fails.
    Latin1,
}

impl Encoding {
    /// The candidates tried when nothing else is configured, in priority order.
    pub const DEFAULT_ORDER: &'static [Encoding] = &[
        Encoding::Utf8,
        Encoding::Utf8Bom,
        Encoding::Utf16,
        Encoding::Latin1,
    ];

    /// Decodes `bytes` completely, or returns `None`.
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            Encoding::Utf8 => {
                if bytes.starts_with(UTF8_BOM) {
                    return None;
                }
                std::str::from_utf8(bytes).ok().map(str::to_owned)
            }
            Encoding::Utf8Bom => {
                let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
                std::str::from_utf8(body).ok().map(str::to_owned)
            }
            Encoding::Utf16 => decode_utf16(bytes),
            Encoding::Latin1 => Some(bytes.iter().map(|&b| char::from(b)).collect()),
        }
    }

    /// Returns the conventional label of this encoding.
    pub fn label(self) -> &'static str {
        match self {
            Encoding::Utf8 => "UTF-8",
            Encoding::Utf8Bom => "UTF-8 (BOM)",
            Encoding::Utf16 => "UTF-16",
            Encoding::Latin1 => "Latin-1",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn decode_utf16(bytes: &[u8]) -> Option<String> {
    let (body, big_endian) = match bytes {
        [0xFF, 0xFE, rest @ ..] => (rest, false),
        [0xFE, 0xFF, rest @ ..] => (rest, true),
        _ => (bytes, false),
    };

    if body.len() % 2 != 0 {
        return None;
    }

    let units = body.chunks_exact(2).map(|pair| {
        let pair = [pair[0], pair[1]];
        if big_endian {
            u16::from_be_bytes(pair)
        } else {
            u16::from_le_bytes(pair)
        }
    });

    char::decode_utf16(units)
        .collect::<std::result::Result<String, _>>()
        .ok()
}

/// Decodes a transcript, trying each candidate encoding in order.
///
/// Line endings of the winning decode are normalised to `\n`.
///
/// # Errors
///
/// Returns [`ChatpulseError::UndecodableEncoding`] if no candidate decodes
/// the whole input.
pub fn decode_transcript(bytes: &[u8], candidates: &[Encoding]) -> Result<Transcript> {
    for &encoding in candidates {
        match encoding.decode(bytes) {
            Some(text) => {
                debug!(%encoding, bytes = bytes.len(), "decoded transcript");
                return Ok(Transcript::new(text, encoding));
            }
            None => debug!(%encoding, "encoding rejected, trying next"),
        }
    }

    Err(ChatpulseError::UndecodableEncoding {
        tried: candidates.to_vec(),
    })
}

/// Reads and decodes a transcript file from disk.
pub fn read_transcript_file(path: &Path, candidates: &[Encoding]) -> Result<Transcript> {
    let bytes = fs::read(path)?;
    decode_transcript(&bytes, candidates)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf16le(s: &str, bom: bool) -> Vec<u8> {
        let mut out = if bom { vec![0xFF, 0xFE] } else { Vec::new() };
        for unit in s.encode_utf16() {
            out.extend_from_slice(&unit.to_le_bytes());
        }
        out
    }

    #[test]
    fn test_plain_utf8_wins_first() {
        let t = decode_transcript("Olá, 01/03/23".as_bytes(), Encoding::DEFAULT_ORDER).unwrap();
        assert_eq!(t.encoding(), Encoding::Utf8);
        assert_eq!(t.text(), "Olá, 01/03/23");
    }

    #[test]
    fn test_bom_falls_through_to_utf8_bom() {
        assert_eq!(Encoding::Utf8.decode(b"\xEF\xBB\xBFhi"), None);
        assert_eq!(Encoding::Utf8Bom.decode(b"\xEF\xBB\xBFhi").as_deref(), Some("hi"));
        assert_eq!(Encoding::Utf8Bom.decode(b"hi").as_deref(), Some("hi"));

        let t = decode_transcript(b"\xEF\xBB\xBF01/03/23", Encoding::DEFAULT_ORDER).unwrap();
        assert_eq!(t.encoding(), Encoding::Utf8Bom);
        assert!(!t.text().starts_with('\u{FEFF}'));
    }

    #[test]
    fn test_utf16_with_bom() {
        let bytes = utf16le("01/03/23, 09:15 - Alice: hi", true);
        let t = decode_transcript(&bytes, Encoding::DEFAULT_ORDER).unwrap();
        assert_eq!(t.encoding(), Encoding::Utf16);
        assert_eq!(t.text(), "01/03/23, 09:15 - Alice: hi");
    }

    #[test]
    fn test_utf16_big_endian() {
        let mut bytes = vec![0xFE, 0xFF];
        for unit in "Zé".encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        assert_eq!(Encoding::Utf16.decode(&bytes).as_deref(), Some("Zé"));
    }

    #[test]
    fn test_utf16_rejects_odd_length_and_lone_surrogate() {
        assert_eq!(Encoding::Utf16.decode(&[0xFF, 0xFE, 0x41]), None);
        // High surrogate with nothing after it
        assert_eq!(Encoding::Utf16.decode(&[0x3D, 0xD8]), None);
    }

    #[test]
    fn test_latin1_fallback() {
        // "café" in ISO-8859-1, with an odd length so UTF-16 rejects it too
        let bytes = b"caf\xE9!";
        let t = decode_transcript(bytes, Encoding::DEFAULT_ORDER).unwrap();
        assert_eq!(t.encoding(), Encoding::Latin1);
        assert_eq!(t.text(), "café!");
    }

    #[test]
    fn test_no_candidate_decodes() {
        let err = decode_transcript(b"caf\xE9!", &[Encoding::Utf8, Encoding::Utf8Bom]).unwrap_err();
        match err {
            ChatpulseError::UndecodableEncoding { tried } => {
                assert_eq!(tried, vec![Encoding::Utf8, Encoding::Utf8Bom]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_candidate_list() {
        let err = decode_transcript(b"hello", &[]).unwrap_err();
        assert!(err.is_undecodable());
    }

    #[test]
    fn test_line_endings_normalised() {
        let t = decode_transcript(b"a\r\nb\rc\n", Encoding::DEFAULT_ORDER).unwrap();
        assert_eq!(t.text(), "a\nb\nc\n");
    }

    #[test]
    fn test_read_transcript_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), utf16le("hi", true)).unwrap();
        let t = read_transcript_file(file.path(), Encoding::DEFAULT_ORDER).unwrap();
        assert_eq!(t.text(), "hi");
        assert_eq!(t.encoding(), Encoding::Utf16);
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(Encoding::Utf8.to_string(), "UTF-8");
        assert_eq!(Encoding::Latin1.to_string(), "Latin-1");
    }
}
