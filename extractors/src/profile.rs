use crate::fields::{self, ProfileScope};
use crate::history::{self, HistoryMiner};
use crate::locator;
use crate::patterns::ProfilePatterns;
use crate::selectors::{parse_selector, CompiledSelectors, SelectorConfig};
use chrono::{SecondsFormat, Utc};
use rand::Rng;
use scraper::{ElementRef, Html};
use shared_types::{
    ContactRecord, ExtractionError, ExtractionInput, ExtractionMethod, Extractor, PROFILE_SOURCE,
};
use tracing::{debug, info};
use url::Url;

const USER_ID_PREFIX: &str = "contactout";

/// `contactout_<unix millis>_<9 random base-36 chars>`
pub fn generate_user_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..9)
        .filter_map(|_| std::char::from_digit(rng.gen_range(0..36), 36))
        .collect();
    format!("{}_{}_{}", USER_ID_PREFIX, Utc::now().timestamp_millis(), suffix)
}

/// Turns one profile container into a `ContactRecord`.
pub struct ProfileExtractor {
    selectors: CompiledSelectors,
    patterns: ProfilePatterns,
    history: HistoryMiner,
}

impl ProfileExtractor {
    pub fn new(config: &SelectorConfig) -> Result<Self, ExtractionError> {
        Ok(Self {
            selectors: CompiledSelectors::compile(config)?,
            patterns: ProfilePatterns::new()?,
            history: HistoryMiner::new()?,
        })
    }

    pub fn with_defaults() -> Result<Self, ExtractionError> {
        Self::new(&SelectorConfig::default())
    }

    pub fn selectors(&self) -> &CompiledSelectors {
        &self.selectors
    }

    pub fn locate_profile<'a>(&self, trigger: ElementRef<'a>) -> ElementRef<'a> {
        locator::locate_profile(trigger, &self.selectors)
    }

    /// Runs every field strategy over `profile`. Never fails: fields that no
    /// strategy filled keep their defaults.
    pub fn extract_profile(&self, profile: ElementRef<'_>, page_url: &str) -> ContactRecord {
        let base = Url::parse(page_url).ok();
        let scope = ProfileScope::new(profile, &self.selectors, &self.patterns, base.as_ref());
        let mut record = ContactRecord::default();

        scope.name(&mut record);
        fields::assign_emails(&mut record, &scope.email_candidates());
        if let Some(company) = scope.company() {
            record.company_name = company;
        }
        if let Some(title) = scope.title() {
            record.main_role_title = title;
        }
        fields::assign_phones(&mut record, &scope.phone_candidates());
        if let Some(sales_url) = scope.linkedin_sales_url() {
            record.linkedin_sales_url = sales_url;
        }
        scope.location(&mut record);
        record.company_domain = fields::company_domain(&record.work_email);
        if let Some(summary) = scope.summary() {
            record.summary = summary;
        }
        if let Some(avatar) = scope.avatar() {
            record.avatar_url = avatar.clone();
            record.full_avatar_url = avatar;
        }
        scope.social_links(&mut record);

        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        record.user_id = generate_user_id();
        record.extraction_timestamp = now.clone();
        record.page_url = page_url.to_string();
        record.profile_source = PROFILE_SOURCE.to_string();
        record.profile_id = self.profile_id(base.as_ref(), page_url);
        record.tags = scope.tags();

        self.history
            .experience_from_text(&scope.text, &mut record.professional_experiences);
        history::experience_from_blocks(profile, &self.selectors, &mut record.professional_experiences);
        self.history
            .education_from_text(&scope.text, &mut record.education_experiences);
        history::education_from_blocks(profile, &self.selectors, &mut record.education_experiences);

        if let Some(main) = fields::main_experience(&record, &now) {
            record.main_professional_experiences.push(main);
        }
        record.former_companies = scope.former_companies();
        record.company_additional_info = scope.company_additional_info();

        debug!(
            user_id = %record.user_id,
            name = %record.full_name(),
            experiences = record.professional_experiences.len(),
            educations = record.education_experiences.len(),
            "Extracted profile"
        );
        record
    }

    /// Last path segment of the page URL.
    fn profile_id(&self, base: Option<&Url>, page_url: &str) -> Option<String> {
        let path = base.map(|url| url.path()).unwrap_or(page_url);
        self.patterns
            .profile_id
            .captures(path)
            .map(|caps| caps[1].to_string())
    }

    /// Parses the page and extracts one record per trigger.
    pub fn extract_document(
        &self,
        html: &str,
        page_url: &str,
        trigger_selector: Option<&str>,
    ) -> Result<Vec<ContactRecord>, ExtractionError> {
        let document = Html::parse_document(html);

        let triggers = match trigger_selector {
            Some(css) => {
                let selector = parse_selector("trigger", css)?;
                document.select(&selector).collect::<Vec<_>>()
            }
            None => locator::find_triggers(&document, &self.selectors),
        };

        info!("Found {} import triggers", triggers.len());

        Ok(triggers
            .into_iter()
            .map(|trigger| self.extract_profile(self.locate_profile(trigger), page_url))
            .collect())
    }

    /// Triggers on the page that have not been given an import button yet.
    pub fn count_pending(&self, html: &str) -> usize {
        let document = Html::parse_document(html);
        locator::pending_triggers(&document, &self.selectors).len()
    }
}

impl Extractor for ProfileExtractor {
    fn extract(&self, input: &ExtractionInput) -> Result<Vec<ContactRecord>, ExtractionError> {
        if input.html.trim().is_empty() {
            return Err(ExtractionError::InvalidInput("Page markup is empty".to_string()));
        }
        self.extract_document(&input.html, &input.page_url, input.trigger_selector.as_deref())
    }

    fn method(&self) -> ExtractionMethod {
        ExtractionMethod::TriggerScoped
    }
}
