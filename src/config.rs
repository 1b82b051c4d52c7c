//! Configuration types for the analysis pipeline and its collaborators.
//!
//! - [`AnalyzerConfig`] - knobs of the parsing pipeline itself
//! - [`AppSettings`] - process-wide settings for the AI-facing side
//!   (API credential, model, default prompt), loaded once from TOML
//!
//! Both are plain values: build them at startup and pass them by reference.
//!
//! # Example
//!
//! ```rust
//! use chatpulse::config::{AnalyzerConfig, AppSettings};
//! use chatpulse::core::encoding::Encoding;
//!
//! let config = AnalyzerConfig::new()
//!     .with_encodings(vec![Encoding::Utf8, Encoding::Utf16]);
//!
//! let settings = AppSettings::from_toml_str(r#"
//!     api_key = "secret"
//!     default_prompt = "Summarise the chat from {start_date} to {end_date}."
//! "#)?;
//! assert_eq!(settings.api_key()?, "secret");
//! # Ok::<(), chatpulse::ChatpulseError>(())
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::archive::DEFAULT_MAX_TRANSCRIPT_BYTES;
use crate::core::encoding::Encoding;
use crate::error::{ChatpulseError, Result};
use crate::prompt::PromptTemplate;

/// Default settings file name looked up by the CLI.
pub const DEFAULT_SETTINGS_FILE: &str = "chatpulse.toml";

/// Model used when the settings name none.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Configuration for the transcript pipeline.
///
/// # Example
///
/// ```rust
/// use chatpulse::config::AnalyzerConfig;
///
/// let config = AnalyzerConfig::new()
///     .with_transcript_extension("log")
///     .with_max_transcript_bytes(8 * 1024 * 1024);
/// assert_eq!(config.transcript_extension, "log");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Extension of the transcript member, without the dot (default: `txt`)
    pub transcript_extension: String,

    /// Encodings tried in order when decoding (default: UTF-8, UTF-8 BOM, UTF-16, Latin-1)
    pub encodings: Vec<Encoding>,

    /// Largest transcript accepted from an archive (default: 256MB)
    pub max_transcript_bytes: u64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            transcript_extension: "txt".to_string(),
            encodings: Encoding::DEFAULT_ORDER.to_vec(),
            max_transcript_bytes: DEFAULT_MAX_TRANSCRIPT_BYTES,
        }
    }
}

impl AnalyzerConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the transcript extension. A leading dot is ignored.
    #[must_use]
    pub fn with_transcript_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        self.transcript_extension = extension.trim_start_matches('.').to_string();
        self
    }

    /// Sets the ordered list of candidate encodings.
    #[must_use]
    pub fn with_encodings(mut self, encodings: Vec<Encoding>) -> Self {
        self.encodings = encodings;
        self
    }

    /// Sets the maximum transcript size.
    #[must_use]
    pub fn with_max_transcript_bytes(mut self, size: u64) -> Self {
        self.max_transcript_bytes = size;
        self
    }
}

/// Process-wide settings for the AI collaborator.
///
/// Keys accept both snake case and the upper-case names of older settings
/// files (`GOOGLE_API_KEY`, `MODEL_VERSION`, `DEFAULT_PROMPT`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AppSettings {
    #[serde(default, alias = "GOOGLE_API_KEY")]
    api_key: Option<String>,

    #[serde(default, alias = "MODEL_VERSION")]
    model_version: Option<String>,

    #[serde(default, alias = "DEFAULT_PROMPT")]
    default_prompt: Option<String>,

    #[serde(skip)]
    source: Option<PathBuf>,
}

impl AppSettings {
    /// Loads settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let mut settings: AppSettings =
            toml::from_str(&text).map_err(|source| ChatpulseError::Config {
                source,
                path: Some(path.to_path_buf()),
            })?;
        settings.source = Some(path.to_path_buf());
        Ok(settings)
    }

    /// Parses settings from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|source| ChatpulseError::Config { source, path: None })
    }

    /// Sets the API credential.
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the model identifier.
    #[must_use]
    pub fn with_model_version(mut self, model: impl Into<String>) -> Self {
        self.model_version = Some(model.into());
        self
    }

    /// Sets the default prompt template.
    #[must_use]
    pub fn with_default_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.default_prompt = Some(prompt.into());
        self
    }

    /// The API credential.
    ///
    /// # Errors
    ///
    /// Returns [`ChatpulseError::MissingCredential`] if the key is absent or blank.
    pub fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ChatpulseError::missing_credential("GOOGLE_API_KEY", self.source.clone()))
    }

    /// The configured model, or [`DEFAULT_MODEL`].
    pub fn model_version(&self) -> &str {
        self.model_version.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    /// The default prompt template (empty when not configured).
    pub fn prompt_template(&self) -> PromptTemplate {
        PromptTemplate::new(self.default_prompt.clone().unwrap_or_default())
    }

    /// The file these settings were loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyzer_defaults() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.transcript_extension, "txt");
        assert_eq!(config.encodings, Encoding::DEFAULT_ORDER);
        assert_eq!(config.max_transcript_bytes, 256 * 1024 * 1024);
    }

    #[test]
    fn test_extension_leading_dot_ignored() {
        let config = AnalyzerConfig::new().with_transcript_extension(".log");
        assert_eq!(config.transcript_extension, "log");
    }

    #[test]
    fn test_settings_snake_case_keys() {
        let settings = AppSettings::from_toml_str(
            r#"
            api_key = "k"
            model_version = "gemini-pro"
            default_prompt = "From {start_date}"
            "#,
        )
        .unwrap();
        assert_eq!(settings.api_key().unwrap(), "k");
        assert_eq!(settings.model_version(), "gemini-pro");
        assert_eq!(settings.prompt_template().as_str(), "From {start_date}");
    }

    #[test]
    fn test_settings_legacy_keys() {
        let settings = AppSettings::from_toml_str(
            r#"
            GOOGLE_API_KEY = "k"
            MODEL_VERSION = "models/gemini-1.5-pro"
            DEFAULT_PROMPT = "Resuma"
            "#,
        )
        .unwrap();
        assert_eq!(settings.api_key().unwrap(), "k");
        assert_eq!(settings.model_version(), "models/gemini-1.5-pro");
    }

    #[test]
    fn test_missing_credential() {
        let settings = AppSettings::from_toml_str("model_version = \"x\"").unwrap();
        let err = settings.api_key().unwrap_err();
        assert!(matches!(err, ChatpulseError::MissingCredential { key: "GOOGLE_API_KEY", .. }));

        let blank = AppSettings::default().with_api_key("   ");
        assert!(blank.api_key().is_err());
    }

    #[test]
    fn test_defaults_when_empty() {
        let settings = AppSettings::from_toml_str("").unwrap();
        assert_eq!(settings.model_version(), DEFAULT_MODEL);
        assert!(settings.prompt_template().as_str().is_empty());
        assert!(settings.source().is_none());
    }

    #[test]
    fn test_invalid_toml() {
        let err = AppSettings::from_toml_str("api_key = ").unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_load_records_source() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "api_key = \"k\"\n").unwrap();
        let settings = AppSettings::load(file.path()).unwrap();
        assert_eq!(settings.source(), Some(file.path()));

        std::fs::write(file.path(), "model_version = \"m\"\n").unwrap();
        let err = AppSettings::load(file.path()).unwrap().api_key().unwrap_err();
        assert!(err.to_string().contains("is not configured in"));
    }
}
