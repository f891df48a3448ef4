//! Per-field selector lists. These are the knobs to turn when host page
//! markup changes; they can be overridden from the `[selectors]` section of
//! the importer config.

use scraper::Selector;
use serde::{Deserialize, Serialize};
use shared_types::ExtractionError;

fn list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Host page elements that receive an import button
    pub trigger: Vec<String>,
    pub import_button_class: String,
    /// Any of these inside an ancestor marks it as a profile container
    pub profile_markers: Vec<String>,
    /// Elements scanned by bulk import
    pub profile_cards: Vec<String>,
    /// Added markup containing any of these schedules a re-scan
    pub change_markers: Vec<String>,

    pub name: Vec<String>,
    pub email_links: Vec<String>,
    pub current_role: Vec<String>,
    pub company: Vec<String>,
    pub title: Vec<String>,
    pub phone: Vec<String>,
    pub location: Vec<String>,
    pub summary: Vec<String>,
    pub avatar: Vec<String>,
    pub tags: Vec<String>,

    pub experience_blocks: Vec<String>,
    pub experience_role: Vec<String>,
    pub experience_organization: Vec<String>,
    pub experience_period: Vec<String>,
    pub experience_description: Vec<String>,

    pub education_blocks: Vec<String>,
    pub education_course: Vec<String>,
    pub education_institution: Vec<String>,
    pub education_field_of_study: Vec<String>,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            trigger: list(&[r#"[data-testid="ai-personalizer-button"]"#]),
            import_button_class: "contactout-import-btn".to_string(),
            profile_markers: list(&[
                "h1",
                "h2",
                "h3",
                "h4",
                "h5",
                "h6",
                r#"[class*="name"]"#,
                r#"a[href^="mailto:"]"#,
                r#"[class*="company"]"#,
                r#"[class*="org"]"#,
            ]),
            profile_cards: list(&[
                r#"[data-testid="profile-card"]"#,
                ".profile-card",
                r#"[class*="profile"]"#,
                r#"[class*="card"]"#,
                r#"[class*="result"]"#,
                r#"[class*="item"]"#,
                r#"div[class*="person"]"#,
                r#"div[class*="contact"]"#,
            ]),
            change_markers: list(&[
                r#"[data-testid="profile-card"]"#,
                ".profile-card",
                r#"[class*="profile"]"#,
                r#"[class*="card"]"#,
            ]),
            name: list(&[
                "h3",
                "h4",
                "h5",
                "h6",
                r#"[class*="name"]"#,
                r#"[class*="title"]"#,
                r#"[class*="full-name"]"#,
                r#"[class*="person-name"]"#,
                "span",
                r#"div[class*="name"]"#,
            ]),
            email_links: list(&[r#"a[href^="mailto:"]"#]),
            current_role: list(&[
                r#"[class*="current-role"]"#,
                r#"[class*="current-position"]"#,
                r#"[class*="current-job"]"#,
                r#"[class*="role"]"#,
                r#"[class*="position"]"#,
                r#"[class*="job"]"#,
            ]),
            company: list(&[
                r#"[class*="company"]"#,
                r#"[class*="org"]"#,
                r#"[class*="organization"]"#,
                r#"[class*="firm"]"#,
                r#"[class*="employer"]"#,
                r#"[class*="current-company"]"#,
                r#"[class*="workplace"]"#,
            ]),
            title: list(&[
                r#"[class*="headline"]"#,
                r#"[class*="position"]"#,
                r#"[class*="role"]"#,
                r#"[class*="job-title"]"#,
                r#"[class*="title"]"#,
                r#"[class*="occupation"]"#,
            ]),
            phone: list(&[
                r#"[class*="phone"]"#,
                r#"a[href^="tel:"]"#,
                r#"[class*="mobile"]"#,
                r#"[class*="telephone"]"#,
                r#"[class*="contact-phone"]"#,
            ]),
            location: list(&[
                r#"[class*="location"]"#,
                r#"[class*="locality"]"#,
                r#"[class*="address"]"#,
                r#"[class*="city"]"#,
                r#"[class*="country"]"#,
            ]),
            summary: list(&[
                r#"[class*="summary"]"#,
                r#"[class*="bio"]"#,
                r#"[class*="about"]"#,
                r#"[class*="description"]"#,
            ]),
            avatar: list(&[
                r#"img[class*="avatar"]"#,
                r#"img[class*="profile"]"#,
                r#"img[src*="avatar"]"#,
                r#"img[src*="profile"]"#,
            ]),
            tags: list(&[r#"[class*="tag"]"#, r#"[class*="label"]"#, r#"[class*="badge"]"#]),
            experience_blocks: list(&[
                r#"[class*="experience"]"#,
                r#"[class*="work-history"]"#,
                r#"[class*="employment"]"#,
                r#"[class*="current-role"]"#,
                r#"[class*="previous-role"]"#,
            ]),
            experience_role: list(&[r#"[class*="title"]"#, r#"[class*="role"]"#]),
            experience_organization: list(&[r#"[class*="company"]"#, r#"[class*="org"]"#]),
            experience_period: list(&[
                r#"[class*="period"]"#,
                r#"[class*="date"]"#,
                r#"[class*="duration"]"#,
            ]),
            experience_description: list(&[
                r#"[class*="description"]"#,
                r#"[class*="responsibility"]"#,
            ]),
            education_blocks: list(&[
                r#"[class*="education"]"#,
                r#"[class*="academic"]"#,
                r#"[class*="degree"]"#,
            ]),
            education_course: list(&[r#"[class*="course"]"#, r#"[class*="degree"]"#]),
            education_institution: list(&[
                r#"[class*="university"]"#,
                r#"[class*="school"]"#,
                r#"[class*="institution"]"#,
            ]),
            education_field_of_study: list(&[r#"[class*="field"]"#, r#"[class*="major"]"#]),
        }
    }
}

pub(crate) const SOCIAL_PLATFORMS: [(&str, &str); 5] = [
    ("facebook", "facebook.com"),
    ("twitter", "twitter.com"),
    ("github", "github.com"),
    ("instagram", "instagram.com"),
    ("linkedin", "linkedin.com"),
];

pub fn parse_selector(field: &str, css: &str) -> Result<Selector, ExtractionError> {
    Selector::parse(css).map_err(|e| {
        ExtractionError::ConfigError(format!("Invalid selector for {}: {:?} ({:?})", field, css, e))
    })
}

/// Ordered chain: each selector is tried on its own, in order.
fn chain(field: &str, selectors: &[String]) -> Result<Vec<Selector>, ExtractionError> {
    selectors.iter().map(|css| parse_selector(field, css)).collect()
}

/// Group: matches any of the selectors, results in document order.
fn group(field: &str, selectors: &[String]) -> Result<Selector, ExtractionError> {
    if selectors.is_empty() {
        return Err(ExtractionError::ConfigError(format!(
            "Selector list for {} must not be empty",
            field
        )));
    }
    parse_selector(field, &selectors.join(", "))
}

/// `SelectorConfig` parsed once up front.
#[derive(Debug)]
pub struct CompiledSelectors {
    pub trigger: Selector,
    pub import_button: Selector,
    pub profile_markers: Selector,
    pub profile_cards: Vec<Selector>,
    pub change_markers: Selector,

    pub name: Vec<Selector>,
    pub email_links: Vec<Selector>,
    pub current_role: Vec<Selector>,
    pub company: Vec<Selector>,
    pub title: Vec<Selector>,
    pub phone: Vec<Selector>,
    pub location: Vec<Selector>,
    pub summary: Vec<Selector>,
    pub avatar: Vec<Selector>,
    pub tags: Selector,
    pub linkedin_sales: Selector,
    pub social: Vec<(&'static str, Selector)>,

    pub experience_blocks: Vec<Selector>,
    pub experience_role: Selector,
    pub experience_organization: Selector,
    pub experience_period: Selector,
    pub experience_description: Selector,

    pub education_blocks: Vec<Selector>,
    pub education_course: Selector,
    pub education_institution: Selector,
    pub education_field_of_study: Selector,
}

impl CompiledSelectors {
    pub fn compile(config: &SelectorConfig) -> Result<Self, ExtractionError> {
        let social = SOCIAL_PLATFORMS
            .iter()
            .map(|(platform, domain)| {
                parse_selector(platform, &format!(r#"a[href*="{}"]"#, domain))
                    .map(|selector| (*platform, selector))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            trigger: group("trigger", &config.trigger)?,
            import_button: parse_selector(
                "import_button_class",
                &format!(".{}", config.import_button_class),
            )?,
            profile_markers: group("profile_markers", &config.profile_markers)?,
            profile_cards: chain("profile_cards", &config.profile_cards)?,
            change_markers: group("change_markers", &config.change_markers)?,
            name: chain("name", &config.name)?,
            email_links: chain("email_links", &config.email_links)?,
            current_role: chain("current_role", &config.current_role)?,
            company: chain("company", &config.company)?,
            title: chain("title", &config.title)?,
            phone: chain("phone", &config.phone)?,
            location: chain("location", &config.location)?,
            summary: chain("summary", &config.summary)?,
            avatar: chain("avatar", &config.avatar)?,
            tags: group("tags", &config.tags)?,
            linkedin_sales: parse_selector("linkedin_sales", r#"a[href*="linkedin.com/sales"]"#)?,
            social,
            experience_blocks: chain("experience_blocks", &config.experience_blocks)?,
            experience_role: group("experience_role", &config.experience_role)?,
            experience_organization: group(
                "experience_organization",
                &config.experience_organization,
            )?,
            experience_period: group("experience_period", &config.experience_period)?,
            experience_description: group(
                "experience_description",
                &config.experience_description,
            )?,
            education_blocks: chain("education_blocks", &config.education_blocks)?,
            education_course: group("education_course", &config.education_course)?,
            education_institution: group("education_institution", &config.education_institution)?,
            education_field_of_study: group(
                "education_field_of_study",
                &config.education_field_of_study,
            )?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_compile() {
        let compiled = CompiledSelectors::compile(&SelectorConfig::default()).unwrap();
        assert_eq!(compiled.name.len(), 10);
        assert_eq!(compiled.social.len(), 5);
    }

    #[test]
    fn test_invalid_selector_is_config_error() {
        let config = SelectorConfig {
            title: vec!["[class*=".to_string()],
            ..Default::default()
        };

        match CompiledSelectors::compile(&config) {
            Err(ExtractionError::ConfigError(msg)) => assert!(msg.contains("title")),
            other => panic!("Expected config error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_empty_group_rejected() {
        let config = SelectorConfig {
            tags: vec![],
            ..Default::default()
        };
        assert!(CompiledSelectors::compile(&config).is_err());
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config: SelectorConfig =
            serde_json::from_str(r#"{"title": ["[class*=\"tagline\"]"]}"#).unwrap();

        assert_eq!(config.title, vec![r#"[class*="tagline"]"#.to_string()]);
        assert_eq!(config.name, SelectorConfig::default().name);
    }
}
