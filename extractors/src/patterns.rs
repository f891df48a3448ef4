use regex::Regex;
use shared_types::ExtractionError;

pub(crate) fn compile(name: &str, pattern: &str) -> Result<Regex, ExtractionError> {
    Regex::new(pattern)
        .map_err(|e| ExtractionError::ParseError(format!("Invalid pattern {}: {}", name, e)))
}

/// Free-text patterns used by the field strategies.
pub struct ProfilePatterns {
    pub masked_email: Regex,
    pub email: Regex,
    pub phone: Regex,
    pub masked_phone: Regex,
    /// "… at <Company>" inside a role element, up to an opening parenthesis
    pub role_at_company: Regex,
    pub legal_suffix: Regex,
    /// Same as `legal_suffix` plus `Partners`, used over the full text
    pub legal_suffix_wide: Regex,
    /// "at <Company>" up to " in", " (" or end of text
    pub text_at_company: Regex,
    pub formerly: Regex,
    pub parenthesised: Regex,
    pub profile_id: Regex,
    pub phone_mask_chars: Regex,
    pub whitespace: Regex,
}

impl ProfilePatterns {
    pub fn new() -> Result<Self, ExtractionError> {
        Ok(Self {
            masked_email: compile("masked_email", r"\*{3}@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}")?,
            email: compile(
                "email",
                r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b",
            )?,
            phone: compile(
                "phone",
                r"(\+?1?[-.\s]?)?\(?([0-9]{3})\)?[-.\s]?([0-9]{3})[-.\s]?([0-9]{4})",
            )?,
            masked_phone: compile(
                "masked_phone",
                r"[\*_\-]+\s*[\*_\-]+\s*[\*_\-]+\s*[\*_\-]+",
            )?,
            role_at_company: compile("role_at_company", r"(?i)\bat\s+([^(]+)")?,
            legal_suffix: compile(
                "legal_suffix",
                r"([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*\s+(?:LLC|Inc|Corp|Company|Ltd|Group))",
            )?,
            legal_suffix_wide: compile(
                "legal_suffix_wide",
                r"([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*\s+(?:LLC|Inc|Corp|Company|Ltd|Group|Partners))",
            )?,
            text_at_company: compile(
                "text_at_company",
                r"(?i)\bat\s+([^(]+?)(?:\s+in|\s+\(|$)",
            )?,
            formerly: compile("formerly", r"(?i)formerly\s+([^)]+)")?,
            parenthesised: compile("parenthesised", r"\(([^)]+)\)")?,
            profile_id: compile("profile_id", r"/([a-zA-Z0-9-]+)$")?,
            phone_mask_chars: compile("phone_mask_chars", r"[*_\-]")?,
            whitespace: compile("whitespace", r"\s+")?,
        })
    }

    /// Strips `*`, `_` and `-` from a phone candidate.
    /// Removes mask characters and the separator the phone regex may have
    /// picked up in front of the number.
    pub fn strip_phone_mask(&self, phone: &str) -> String {
        self.phone_mask_chars.replace_all(phone, "").trim().to_string()
    }

    pub fn collapse_whitespace(&self, text: &str) -> String {
        self.whitespace.replace_all(text, " ").trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns() -> ProfilePatterns {
        ProfilePatterns::new().unwrap()
    }

    #[test]
    fn test_masked_email_needs_three_stars() {
        let p = patterns();
        assert!(p.masked_email.is_match("***@acme.com"));
        assert!(!p.masked_email.is_match("**@acme.com"));
    }

    #[test]
    fn test_role_at_company_requires_word_boundary() {
        let p = patterns();
        let caps = p.role_at_company.captures("Head of Strat at Acme Corp (2020)").unwrap();
        assert_eq!(caps[1].trim(), "Acme Corp");
    }

    #[test]
    fn test_text_at_company_stops_before_in() {
        let p = patterns();
        let caps = p
            .text_at_company
            .captures("Engineer at Initech in 2019 - Present")
            .unwrap();
        assert_eq!(&caps[1], "Initech");
    }

    #[test]
    fn test_phone_mask_stripping() {
        let p = patterns();
        assert_eq!(p.strip_phone_mask("555-123-4567"), "5551234567");
        assert_eq!(p.strip_phone_mask("***-***-****"), "");
        assert_eq!(p.strip_phone_mask(" 555-123-4567"), "5551234567");
    }

    #[test]
    fn test_profile_id() {
        let p = patterns();
        let caps = p.profile_id.captures("/search/jane-doe-42").unwrap();
        assert_eq!(&caps[1], "jane-doe-42");
        assert!(p.profile_id.captures("/search/").is_none());
    }
}
