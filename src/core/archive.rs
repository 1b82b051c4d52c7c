//! Locating the transcript inside an exported ZIP archive.
//!
//! A chat export is a ZIP holding one `.txt` transcript next to any media
//! that was attached. The archive is unpacked into a temporary directory one
//! member at a time, with every member bounded by the size limit while it is
//! decompressed. The directory is then walked depth-first, each level listing
//! its files (sorted by name) before descending into its subdirectories, and
//! the first file with the transcript extension wins. A transcript at the
//! archive root therefore beats one nested under `Attachments/`.
//!
//! A transcript member larger than the limit fails with
//! [`ChatpulseError::ArchiveTooLarge`] before more than `limit + 1` bytes of
//! it are written. Oversized media members are skipped and never written.
//!
//! The temporary directory is owned by a [`TempDir`] guard, so it is removed
//! on every exit path: success, error, or a panic inside the caller's
//! closure passed to [`with_extracted_transcript`].
//!
//! # Example
//!
//! ```rust,no_run
//! use chatpulse::core::archive::extract_transcript;
//!
//! let bytes = std::fs::read("WhatsApp Chat.zip")?;
//! let transcript = extract_transcript(&bytes, "txt")?;
//! println!("{} bytes of transcript", transcript.len());
//! # Ok::<(), chatpulse::ChatpulseError>(())
//! ```

use std::ffi::OsStr;
use std::fs;
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::{debug, warn};
use walkdir::WalkDir;
use zip::ZipArchive;

use crate::error::{ChatpulseError, Result};

/// Default upper bound on the size of an extracted transcript (256 MiB).
pub const DEFAULT_MAX_TRANSCRIPT_BYTES: u64 = 256 * 1024 * 1024;

/// Extracts the transcript with the given extension and returns its raw bytes.
///
/// # Errors
///
/// - [`ChatpulseError::Archive`] if the bytes are not a readable ZIP
/// - [`ChatpulseError::NoTranscriptFound`] if no member has `extension`
/// - [`ChatpulseError::ArchiveTooLarge`] if the transcript exceeds
///   [`DEFAULT_MAX_TRANSCRIPT_BYTES`]
pub fn extract_transcript(archive: &[u8], extension: &str) -> Result<Vec<u8>> {
    extract_transcript_with_limit(archive, extension, DEFAULT_MAX_TRANSCRIPT_BYTES)
}

/// Same as [`extract_transcript`] with an explicit size limit.
pub fn extract_transcript_with_limit(
    archive: &[u8],
    extension: &str,
    max_bytes: u64,
) -> Result<Vec<u8>> {
    with_bounded_transcript(archive, extension, max_bytes, |path| Ok(fs::read(path)?))
}

/// Unpacks `archive`, then runs `f` on the path of the selected transcript.
///
/// The path is only valid inside `f`; the extraction directory is deleted
/// before this function returns. Members are bounded by
/// [`DEFAULT_MAX_TRANSCRIPT_BYTES`].
pub fn with_extracted_transcript<T>(
    archive: &[u8],
    extension: &str,
    f: impl FnOnce(&Path) -> Result<T>,
) -> Result<T> {
    with_bounded_transcript(archive, extension, DEFAULT_MAX_TRANSCRIPT_BYTES, f)
}

fn with_bounded_transcript<T>(
    archive: &[u8],
    extension: &str,
    max_bytes: u64,
    f: impl FnOnce(&Path) -> Result<T>,
) -> Result<T> {
    let scratch = unpack(archive, extension, max_bytes)?;
    let candidates = find_transcripts(scratch.path(), extension)?;

    if candidates.len() > 1 {
        warn!(
            count = candidates.len(),
            "archive holds more than one transcript, using the first"
        );
    }

    let Some(transcript) = candidates.first() else {
        return Err(ChatpulseError::no_transcript(extension));
    };

    debug!(path = %transcript.display(), "selected transcript");
    f(transcript)
}

/// Archive-relative paths of every transcript candidate, in selection order.
pub fn list_transcripts(archive: &[u8], extension: &str) -> Result<Vec<String>> {
    let scratch = unpack(archive, extension, DEFAULT_MAX_TRANSCRIPT_BYTES)?;
    let candidates = find_transcripts(scratch.path(), extension)?;

    Ok(candidates
        .iter()
        .filter_map(|path| path.strip_prefix(scratch.path()).ok())
        .map(|rel| rel.to_string_lossy().replace('\\', "/"))
        .collect())
}

fn unpack(archive: &[u8], extension: &str, max_bytes: u64) -> Result<TempDir> {
    let mut zip = ZipArchive::new(Cursor::new(archive))?;
    let scratch = tempfile::Builder::new().prefix("chatpulse-").tempdir()?;

    debug!(
        members = zip.len(),
        dir = %scratch.path().display(),
        max_bytes,
        "unpacking archive"
    );

    for index in 0..zip.len() {
        let mut entry = zip.by_index(index)?;
        let Some(relative) = entry.enclosed_name() else {
            warn!(name = entry.name(), "skipping member with unsafe path");
            continue;
        };
        let target = scratch.path().join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&target)?;
            continue;
        }

        let is_transcript = has_extension(&target, extension);
        if entry.size() > max_bytes {
            if is_transcript {
                return Err(too_large(entry.name(), max_bytes, entry.size()));
            }
            warn!(name = entry.name(), size = entry.size(), "skipping oversized member");
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = fs::File::create(&target)?;
        let written = io::copy(&mut (&mut entry).take(max_bytes.saturating_add(1)), &mut out)?;

        // The declared size can lie; the copy above is the real bound.
        if written > max_bytes {
            drop(out);
            fs::remove_file(&target)?;
            if is_transcript {
                return Err(too_large(entry.name(), max_bytes, written));
            }
            warn!(name = entry.name(), "skipping oversized member");
        }
    }

    Ok(scratch)
}

fn too_large(name: &str, max_size: u64, actual_size: u64) -> ChatpulseError {
    ChatpulseError::ArchiveTooLarge {
        name: name.to_string(),
        max_size,
        actual_size,
    }
}

fn find_transcripts(root: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();

    let walk = WalkDir::new(root).sort_by(|a, b| {
        a.file_type()
            .is_dir()
            .cmp(&b.file_type().is_dir())
            .then_with(|| a.file_name().cmp(b.file_name()))
    });
    for entry in walk {
        let entry = entry.map_err(io::Error::from)?;
        if entry.file_type().is_file() && has_extension(entry.path(), extension) {
            found.push(entry.into_path());
        }
    }

    Ok(found)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}
