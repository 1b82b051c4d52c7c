//! Prompt templating for the AI collaborator.
//!
//! A template is free text with two recognised placeholders, `{start_date}`
//! and `{end_date}`, replaced by the range bounds in `DD/MM/YY`. The
//! rendered prompt is then followed by the filtered transcript fenced in
//! triple quotes. Any other braces are left untouched.
//!
//! # Example
//!
//! ```rust
//! use chatpulse::core::filter::{DateRange, filter_transcript};
//! use chatpulse::prompt::PromptTemplate;
//!
//! # fn main() -> chatpulse::Result<()> {
//! let range = DateRange::parse("01/03/23", "05/03/23")?;
//! let transcript = filter_transcript("01/03/23, 09:15 - Alice: hi\n", &range)?;
//!
//! let template = PromptTemplate::new("Summarise {start_date}-{end_date}.");
//! let prompt = template.compose(&range, &transcript);
//!
//! assert_eq!(
//!     prompt,
//!     "Summarise 01/03/23-05/03/23.\n\n\"\"\"\n01/03/23, 09:15 - Alice: hi\n\n\"\"\""
//! );
//! # Ok(())
//! # }
//! ```

use crate::core::filter::DateRange;
use crate::core::models::FilteredTranscript;

/// Placeholder replaced by the first day of the range.
pub const START_DATE_PLACEHOLDER: &str = "{start_date}";
/// Placeholder replaced by the last day of the range.
pub const END_DATE_PLACEHOLDER: &str = "{end_date}";

const FENCE: &str = "\"\"\"";

/// A prompt with optional date placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.template
    }

    pub fn is_empty(&self) -> bool {
        self.template.trim().is_empty()
    }

    /// Substitutes the date placeholders.
    pub fn render(&self, range: &DateRange) -> String {
        let (start, end) = range.format_bounds();
        self.template
            .replace(START_DATE_PLACEHOLDER, &start)
            .replace(END_DATE_PLACEHOLDER, &end)
    }

    /// Renders the template and appends the fenced transcript.
    pub fn compose(&self, range: &DateRange, transcript: &FilteredTranscript) -> String {
        format!(
            "{}\n\n{FENCE}\n{}\n{FENCE}",
            self.render(range),
            transcript.as_str()
        )
    }
}

impl From<&str> for PromptTemplate {
    fn from(template: &str) -> Self {
        Self::new(template)
    }
}

impl From<String> for PromptTemplate {
    fn from(template: String) -> Self {
        Self::new(template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range() -> DateRange {
        DateRange::parse("01/03/23", "05/03/23").unwrap()
    }

    #[test]
    fn test_render_replaces_every_occurrence() {
        let template = PromptTemplate::new("{start_date} {end_date} {start_date}");
        assert_eq!(template.render(&range()), "01/03/23 05/03/23 01/03/23");
    }

    #[test]
    fn test_render_leaves_other_braces() {
        let template = PromptTemplate::new("Reply as {json} for {start_date}");
        assert_eq!(template.render(&range()), "Reply as {json} for 01/03/23");
    }

    #[test]
    fn test_empty_template() {
        assert!(PromptTemplate::default().is_empty());
        assert!(PromptTemplate::from("  \n").is_empty());
        assert!(!PromptTemplate::from("x".to_string()).is_empty());
    }
}
