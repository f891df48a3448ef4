use crate::contact_record::ContactRecord;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Core trait that all profile extractors must implement
pub trait Extractor {
    /// Extract contact records from a page
    fn extract(&self, input: &ExtractionInput) -> Result<Vec<ContactRecord>, ExtractionError>;

    /// How does this extractor find profiles on the page?
    fn method(&self) -> ExtractionMethod;
}

/// Extraction error types
///
/// A field that no strategy could fill is not an error; these only cover
/// input the extractor cannot work with at all.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Ways of finding profile containers on a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
pub enum ExtractionMethod {
    /// Walk up from an import trigger to its profile container
    TriggerScoped,
    /// Scan every profile-card-like element on the page
    BulkScan,
}

/// Input provided to extractors: the page markup and where it came from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionInput {
    pub html: String,
    pub page_url: String,

    /// Overrides the configured trigger selector for trigger-scoped extraction
    pub trigger_selector: Option<String>,
}

impl ExtractionInput {
    pub fn new(html: impl Into<String>, page_url: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            page_url: page_url.into(),
            trigger_selector: None,
        }
    }

    pub fn with_trigger(mut self, selector: impl Into<String>) -> Self {
        self.trigger_selector = Some(selector.into());
        self
    }
}
