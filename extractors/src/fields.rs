//! Per-field strategies. Each field runs its strategies in order and the
//! first non-empty value wins; a field nothing matched stays empty.

use crate::dom::{first_text, query_all, query_first, resolved_attr, text_content, trimmed_text};
use crate::patterns::ProfilePatterns;
use crate::selectors::CompiledSelectors;
use scraper::ElementRef;
use shared_types::{ContactRecord, MainProfessionalExperience, SocialLink};
use url::Url;

/// Everything a field strategy needs to look at one profile container.
pub struct ProfileScope<'a> {
    pub profile: ElementRef<'a>,
    pub selectors: &'a CompiledSelectors,
    pub patterns: &'a ProfilePatterns,
    pub base: Option<&'a Url>,
    /// Untrimmed `textContent` of the whole container
    pub text: String,
}

fn push_unique(candidates: &mut Vec<String>, value: String) {
    if !candidates.contains(&value) {
        candidates.push(value);
    }
}

fn mailto_address(href: &str) -> Option<String> {
    let address = href.trim().strip_prefix("mailto:")?;
    let address = address.split('?').next().unwrap_or_default().trim();
    if address.is_empty() {
        None
    } else {
        Some(address.to_string())
    }
}

impl<'a> ProfileScope<'a> {
    pub fn new(
        profile: ElementRef<'a>,
        selectors: &'a CompiledSelectors,
        patterns: &'a ProfilePatterns,
        base: Option<&'a Url>,
    ) -> Self {
        Self {
            text: text_content(profile),
            profile,
            selectors,
            patterns,
            base,
        }
    }

    /// Splits the first non-empty name candidate into first name and the rest.
    pub fn name(&self, record: &mut ContactRecord) {
        let Some(full_name) = first_text(self.profile, &self.selectors.name) else {
            return;
        };

        let clean = self.patterns.collapse_whitespace(&full_name);
        let mut parts = clean.split(' ');
        record.first_name = parts.next().unwrap_or_default().to_string();
        record.last_name = parts.collect::<Vec<_>>().join(" ");
    }

    /// Email candidates in discovery order: mailto links, masked addresses,
    /// then anything email-shaped in the text.
    pub fn email_candidates(&self) -> Vec<String> {
        let mut candidates = Vec::new();

        for selector in &self.selectors.email_links {
            for link in query_all(self.profile, selector) {
                if let Some(address) = link.value().attr("href").and_then(mailto_address) {
                    push_unique(&mut candidates, address);
                }
            }
        }
        for found in self.patterns.masked_email.find_iter(&self.text) {
            push_unique(&mut candidates, found.as_str().to_string());
        }
        for found in self.patterns.email.find_iter(&self.text) {
            push_unique(&mut candidates, found.as_str().to_string());
        }

        candidates
    }

    pub fn company(&self) -> Option<String> {
        self.company_from_role()
            .or_else(|| first_text(self.profile, &self.selectors.company))
            .or_else(|| self.company_from_text())
    }

    /// "… at <Company>" or a legal-suffix name inside a role element.
    fn company_from_role(&self) -> Option<String> {
        self.selectors.current_role.iter().find_map(|selector| {
            let role_text = trimmed_text(query_first(self.profile, selector)?);

            let at_company = self
                .patterns
                .role_at_company
                .captures(&role_text)
                .map(|caps| caps[1].trim().to_string())
                .filter(|company| !company.is_empty());

            at_company.or_else(|| {
                self.patterns
                    .legal_suffix
                    .captures(&role_text)
                    .map(|caps| caps[1].trim().to_string())
            })
        })
    }

    fn company_from_text(&self) -> Option<String> {
        self.patterns
            .legal_suffix_wide
            .captures(&self.text)
            .map(|caps| caps[1].trim().to_string())
            .or_else(|| {
                self.patterns
                    .text_at_company
                    .captures(&self.text)
                    .map(|caps| caps[1].trim().to_string())
            })
            .filter(|company| !company.is_empty())
    }

    pub fn title(&self) -> Option<String> {
        first_text(self.profile, &self.selectors.title)
    }

    /// Phone candidates: labeled elements (mask characters stripped, longer
    /// than five characters), then digit runs in the text, then masked-only
    /// runs kept verbatim.
    pub fn phone_candidates(&self) -> Vec<String> {
        let mut candidates = Vec::new();

        for selector in &self.selectors.phone {
            for element in query_all(self.profile, selector) {
                let mut phone = trimmed_text(element);
                if phone.is_empty() {
                    phone = element
                        .value()
                        .attr("href")
                        .map(|href| href.trim().trim_start_matches("tel:").to_string())
                        .unwrap_or_default();
                }

                let phone = self.patterns.strip_phone_mask(&phone);
                if phone.chars().count() > 5 {
                    push_unique(&mut candidates, phone);
                }
            }
        }
        for found in self.patterns.phone.find_iter(&self.text) {
            push_unique(&mut candidates, self.patterns.strip_phone_mask(found.as_str()));
        }
        for found in self.patterns.masked_phone.find_iter(&self.text) {
            push_unique(&mut candidates, found.as_str().to_string());
        }

        candidates
    }

    pub fn linkedin_sales_url(&self) -> Option<String> {
        query_first(self.profile, &self.selectors.linkedin_sales)
            .and_then(|link| resolved_attr(link, "href", self.base))
    }

    /// Sets `<platform>_url` from the first link of each platform; further
    /// links of the same platform are kept as additional social links.
    pub fn social_links(&self, record: &mut ContactRecord) {
        for (platform, selector) in &self.selectors.social {
            let urls = query_all(self.profile, selector)
                .into_iter()
                .filter_map(|link| resolved_attr(link, "href", self.base));

            for (index, url) in urls.enumerate() {
                if index > 0 {
                    record.additional_social_links.push(SocialLink {
                        platform: platform.to_string(),
                        url,
                    });
                    continue;
                }

                match *platform {
                    "facebook" => record.facebook_url = url,
                    "twitter" => record.twitter_url = url,
                    "github" => record.github_url = url,
                    "instagram" => record.instagram_url = url,
                    "linkedin" => record.linkedin_url = url,
                    _ => {}
                }
            }
        }
    }

    /// Full address verbatim; first comma segment is the city, last one
    /// the country.
    pub fn location(&self, record: &mut ContactRecord) {
        let Some(location) = first_text(self.profile, &self.selectors.location) else {
            return;
        };

        let parts: Vec<&str> = location.split(',').map(str::trim).collect();
        if parts.len() >= 2 {
            record.city = parts[0].to_string();
            record.country = parts[parts.len() - 1].to_string();
        } else if let Some(city) = parts.first() {
            record.city = city.to_string();
        }
        record.full_address = location;

        record.personal_detail.full_address = record.full_address.clone();
        record.personal_detail.city = record.city.clone();
        record.personal_detail.country = record.country.clone();
        record.personal_detail.region = record.region.clone();
        record.personal_detail.postal_code = record.postal_code.clone();
    }

    pub fn summary(&self) -> Option<String> {
        first_text(self.profile, &self.selectors.summary)
    }

    pub fn avatar(&self) -> Option<String> {
        self.selectors.avatar.iter().find_map(|selector| {
            query_first(self.profile, selector)
                .and_then(|image| resolved_attr(image, "src", self.base))
        })
    }

    pub fn tags(&self) -> Vec<String> {
        query_all(self.profile, &self.selectors.tags)
            .into_iter()
            .map(trimmed_text)
            .collect()
    }

    /// "formerly X" mentions, up to the closing parenthesis.
    pub fn former_companies(&self) -> Vec<String> {
        self.patterns
            .formerly
            .captures_iter(&self.text)
            .map(|caps| caps[1].trim().to_string())
            .collect()
    }

    pub fn company_additional_info(&self) -> Vec<String> {
        self.patterns
            .parenthesised
            .captures_iter(&self.text)
            .map(|caps| caps[1].trim().to_string())
            .collect()
    }
}

/// Puts the first candidate in `work_email`. With several candidates, one
/// mentioning the company domain, "work" or "business" is promoted instead,
/// and the first other candidate becomes `private_email`.
pub fn assign_emails(record: &mut ContactRecord, candidates: &[String]) {
    let Some(first) = candidates.first() else {
        return;
    };
    record.work_email = first.clone();

    if candidates.len() > 1 {
        let domain = record.company_domain.as_str();
        let promoted = candidates.iter().find(|email| {
            (!domain.is_empty() && email.contains(domain))
                || email.contains("work")
                || email.contains("business")
        });
        if let Some(work) = promoted {
            record.work_email = work.clone();
        }

        if let Some(private) = candidates.iter().find(|email| **email != record.work_email) {
            record.private_email = private.clone();
        }
    }
}

pub fn assign_phones(record: &mut ContactRecord, candidates: &[String]) {
    let mut phones = candidates.iter();
    if let Some(work) = phones.next() {
        record.work_phone = work.clone();
    }
    if let Some(mobile) = phones.next() {
        record.work_mobile_phone = mobile.clone();
    }
}

/// Everything after the `@` of the work email.
pub fn company_domain(work_email: &str) -> String {
    if !work_email.contains('@') {
        return String::new();
    }
    work_email.split('@').nth(1).unwrap_or_default().to_string()
}

/// The current position, when both a title and a company were found.
pub fn main_experience(
    record: &ContactRecord,
    started_at: &str,
) -> Option<MainProfessionalExperience> {
    if record.main_role_title.is_empty() || record.company_name.is_empty() {
        return None;
    }

    Some(MainProfessionalExperience {
        role_title: record.main_role_title.clone(),
        period_from: started_at.to_string(),
        is_current: true,
        organization_name: record.company_name.clone(),
        main_location_full_address: record.full_address.clone(),
        main_location_country: record.country.clone(),
        main_location_city: record.city.clone(),
        main_location_postal_code: record.postal_code.clone(),
        description_responsibility: record.summary.clone(),
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selectors::SelectorConfig;
    use scraper::{Html, Selector};

    struct Fixture {
        html: Html,
        selectors: CompiledSelectors,
        patterns: ProfilePatterns,
    }

    impl Fixture {
        fn new(markup: &str) -> Self {
            Self {
                html: Html::parse_fragment(&format!(r#"<div id="profile">{}</div>"#, markup)),
                selectors: CompiledSelectors::compile(&SelectorConfig::default()).unwrap(),
                patterns: ProfilePatterns::new().unwrap(),
            }
        }

        fn scope(&self) -> ProfileScope<'_> {
            let profile = self
                .html
                .select(&Selector::parse("#profile").unwrap())
                .next()
                .unwrap();
            ProfileScope::new(profile, &self.selectors, &self.patterns, None)
        }
    }

    #[test]
    fn test_name_split_collapses_whitespace() {
        let fixture = Fixture::new("<h4>  Jean   Luc\n Picard </h4>");
        let mut record = ContactRecord::default();
        fixture.scope().name(&mut record);

        assert_eq!(record.first_name, "Jean");
        assert_eq!(record.last_name, "Luc Picard");
    }

    #[test]
    fn test_single_token_name_leaves_last_name_empty() {
        let fixture = Fixture::new("<h3>Cher</h3>");
        let mut record = ContactRecord::default();
        fixture.scope().name(&mut record);

        assert_eq!(record.first_name, "Cher");
        assert_eq!(record.last_name, "");
    }

    #[test]
    fn test_work_email_promoted() {
        let fixture = Fixture::new(
            r#"<a href="mailto:jane@gmail.com">personal</a>
               <a href="mailto:jane@work-acme.com?subject=hi">work</a>"#,
        );
        let candidates = fixture.scope().email_candidates();
        assert_eq!(candidates, vec!["jane@gmail.com", "jane@work-acme.com"]);

        let mut record = ContactRecord::default();
        assign_emails(&mut record, &candidates);
        assert_eq!(record.work_email, "jane@work-acme.com");
        assert_eq!(record.private_email, "jane@gmail.com");
    }

    #[test]
    fn test_masked_email_found_before_text_emails() {
        let fixture = Fixture::new("<p>***@acme.com or reach jane@acme.com</p>");
        let candidates = fixture.scope().email_candidates();
        assert_eq!(candidates, vec!["***@acme.com", "jane@acme.com"]);
    }

    #[test]
    fn test_single_email_has_no_private() {
        let mut record = ContactRecord::default();
        assign_emails(&mut record, &["jane@acme.com".to_string()]);
        assert_eq!(record.work_email, "jane@acme.com");
        assert!(record.private_email.is_empty());
    }

    #[test]
    fn test_company_from_role_text() {
        let fixture = Fixture::new(
            r#"<div class="current-role">VP Sales at Acme Widgets (2019 - Present)</div>
               <div class="company">Ignored Co</div>"#,
        );
        assert_eq!(fixture.scope().company().as_deref(), Some("Acme Widgets"));
    }

    #[test]
    fn test_company_legal_suffix_in_role() {
        let fixture = Fixture::new(r#"<div class="position">Director, Wayne Enterprises Inc</div>"#);
        assert_eq!(fixture.scope().company().as_deref(), Some("Wayne Enterprises Inc"));
    }

    #[test]
    fn test_company_label_then_full_text() {
        let fixture = Fixture::new(r#"<span class="employer">Stark Industries</span>"#);
        assert_eq!(fixture.scope().company().as_deref(), Some("Stark Industries"));

        let fixture = Fixture::new("<p>Consultant at Bluth in Newport</p>");
        assert_eq!(fixture.scope().company().as_deref(), Some("Bluth"));

        let fixture = Fixture::new("<p>Advisor with Pearson Specter Partners</p>");
        assert_eq!(
            fixture.scope().company().as_deref(),
            Some("Pearson Specter Partners")
        );
    }

    #[test]
    fn test_masked_phone_only_candidate_kept_verbatim() {
        let fixture = Fixture::new(r#"<div class="phone">***-***-****</div>"#);
        let candidates = fixture.scope().phone_candidates();
        assert_eq!(candidates, vec!["***-***-****"]);

        let mut record = ContactRecord::default();
        assign_phones(&mut record, &candidates);
        assert_eq!(record.work_phone, "***-***-****");
        assert!(record.work_mobile_phone.is_empty());
    }

    #[test]
    fn test_digits_first_then_mask() {
        let fixture = Fixture::new(
            r#"<span class="mobile">(555) 123-4567</span><span>***-***-****</span>"#,
        );
        let candidates = fixture.scope().phone_candidates();

        let mut record = ContactRecord::default();
        assign_phones(&mut record, &candidates);
        assert_eq!(record.work_phone, "(555) 1234567");
        assert_eq!(record.work_mobile_phone, "***-***-****");
    }

    #[test]
    fn test_phone_in_running_text_is_trimmed() {
        let fixture = Fixture::new("<p>Call 555-123-4567 any time</p>");
        let candidates = fixture.scope().phone_candidates();

        let mut record = ContactRecord::default();
        assign_phones(&mut record, &candidates);
        assert_eq!(record.work_phone, "5551234567");
    }

    #[test]
    fn test_tel_href_used_when_text_empty() {
        let fixture = Fixture::new(r#"<a href="tel:+15551234567"></a>"#);
        let candidates = fixture.scope().phone_candidates();
        assert_eq!(candidates[0], "+15551234567");
    }

    #[test]
    fn test_location_split() {
        let fixture = Fixture::new(r#"<span class="location">Austin, Texas, United States</span>"#);
        let mut record = ContactRecord::default();
        fixture.scope().location(&mut record);

        assert_eq!(record.full_address, "Austin, Texas, United States");
        assert_eq!(record.city, "Austin");
        assert_eq!(record.country, "United States");
        assert_eq!(record.personal_detail.city, "Austin");

        let fixture = Fixture::new(r#"<span class="city">Lisbon</span>"#);
        let mut record = ContactRecord::default();
        fixture.scope().location(&mut record);
        assert_eq!(record.city, "Lisbon");
        assert!(record.country.is_empty());
    }

    #[test]
    fn test_social_links_overflow() {
        let fixture = Fixture::new(
            r#"<a href="https://github.com/jane">gh</a>
               <a href="https://github.com/jane-work">gh2</a>
               <a href="https://www.linkedin.com/in/jane">li</a>
               <a href="https://www.linkedin.com/sales/people/123">sales</a>"#,
        );
        let scope = fixture.scope();
        let mut record = ContactRecord::default();
        scope.social_links(&mut record);

        assert_eq!(record.github_url, "https://github.com/jane");
        assert_eq!(record.linkedin_url, "https://www.linkedin.com/in/jane");
        assert_eq!(
            record.additional_social_links,
            vec![
                SocialLink {
                    platform: "github".to_string(),
                    url: "https://github.com/jane-work".to_string(),
                },
                SocialLink {
                    platform: "linkedin".to_string(),
                    url: "https://www.linkedin.com/sales/people/123".to_string(),
                },
            ]
        );
        assert_eq!(
            scope.linkedin_sales_url().as_deref(),
            Some("https://www.linkedin.com/sales/people/123")
        );
    }

    #[test]
    fn test_formerly_and_additional_info() {
        let fixture = Fixture::new("<p>CEO at Hooli (formerly Pied Piper) (Series B)</p>");
        let scope = fixture.scope();

        assert_eq!(scope.former_companies(), vec!["Pied Piper"]);
        assert_eq!(
            scope.company_additional_info(),
            vec!["formerly Pied Piper", "Series B"]
        );
    }

    #[test]
    fn test_company_domain() {
        assert_eq!(company_domain("jane@acme.io"), "acme.io");
        assert_eq!(company_domain("no-at-sign"), "");
    }

    #[test]
    fn test_main_experience_requires_title_and_company() {
        let mut record = ContactRecord {
            main_role_title: "CTO".to_string(),
            ..Default::default()
        };
        assert!(main_experience(&record, "2024-01-01T00:00:00.000Z").is_none());

        record.company_name = "Acme".to_string();
        record.summary = "Builds things".to_string();
        let main = main_experience(&record, "2024-01-01T00:00:00.000Z").unwrap();
        assert!(main.is_current);
        assert_eq!(main.organization_name, "Acme");
        assert_eq!(main.description_responsibility, "Builds things");
        assert_eq!(main.money_amount, 0.0);
    }
}
