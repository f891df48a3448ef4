use crate::profile::ProfileExtractor;
use crate::selectors::SelectorConfig;
use scraper::{ElementRef, Html};
use shared_types::{ContactRecord, ExtractionError, ExtractionInput, ExtractionMethod, Extractor};
use std::collections::HashSet;
use tracing::info;

/// Extracts every profile-card-like element on a page at once.
pub struct BulkProfileExtractor {
    profile: ProfileExtractor,
}

impl BulkProfileExtractor {
    pub fn new(config: &SelectorConfig) -> Result<Self, ExtractionError> {
        Ok(Self {
            profile: ProfileExtractor::new(config)?,
        })
    }

    pub fn with_defaults() -> Result<Self, ExtractionError> {
        Self::new(&SelectorConfig::default())
    }

    /// Card candidates from each selector in turn, without repeats, in the
    /// order they were first seen.
    pub fn find_profiles<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        let mut seen = HashSet::new();
        let mut profiles = Vec::new();

        for selector in &self.profile.selectors().profile_cards {
            for element in document.select(selector) {
                if seen.insert(element.id()) {
                    profiles.push(element);
                }
            }
        }

        profiles
    }

    /// Records with at least a first name or a work email.
    pub fn extract_document(&self, html: &str, page_url: &str) -> Vec<ContactRecord> {
        let document = Html::parse_document(html);
        let profiles = self.find_profiles(&document);

        let records: Vec<ContactRecord> = profiles
            .iter()
            .map(|profile| self.profile.extract_profile(*profile, page_url))
            .filter(|record| !record.first_name.is_empty() || !record.work_email.is_empty())
            .collect();

        info!(
            "Bulk scan kept {} of {} profile candidates",
            records.len(),
            profiles.len()
        );
        records
    }
}

impl Extractor for BulkProfileExtractor {
    fn extract(&self, input: &ExtractionInput) -> Result<Vec<ContactRecord>, ExtractionError> {
        if input.html.trim().is_empty() {
            return Err(ExtractionError::InvalidInput("Page markup is empty".to_string()));
        }
        Ok(self.extract_document(&input.html, &input.page_url))
    }

    fn method(&self) -> ExtractionMethod {
        ExtractionMethod::BulkScan
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIST: &str = r#"<html><body>
        <div data-testid="profile-card" class="profile-card">
            <h3>Ada Lovelace</h3>
        </div>
        <div class="result-row">
            <a href="mailto:grace@navy.mil">grace@navy.mil</a>
        </div>
        <div class="item"><p>nothing useful</p></div>
    </body></html>"#;

    #[test]
    fn test_cards_deduplicated() {
        let extractor = BulkProfileExtractor::with_defaults().unwrap();
        let document = Html::parse_document(LIST);

        // The first card matches three selectors but is listed once.
        let profiles = extractor.find_profiles(&document);
        assert_eq!(profiles.len(), 3);
        assert_eq!(profiles[0].value().attr("data-testid"), Some("profile-card"));
    }

    #[test]
    fn test_keeps_named_or_emailed_records() {
        let extractor = BulkProfileExtractor::with_defaults().unwrap();
        let records = extractor.extract_document(LIST, "https://contactout.com/search");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].first_name, "Ada");
        assert_eq!(records[1].work_email, "grace@navy.mil");
    }

    #[test]
    fn test_method() {
        let extractor = BulkProfileExtractor::with_defaults().unwrap();
        assert_eq!(extractor.method(), ExtractionMethod::BulkScan);
    }
}
