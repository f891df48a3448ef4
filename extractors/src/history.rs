//! Work and education history mined from free text and from structured
//! history blocks.
//!
//! Both regex families are evaluated over the same text and overlap: a line
//! such as "Engineer at Acme 2015 - 2018" is considered by both. They are
//! told apart only by the organization keyword filters below.

use crate::dom::{query_all, query_first, trimmed_text};
use crate::patterns::compile;
use crate::selectors::CompiledSelectors;
use regex::{Captures, Regex};
use scraper::ElementRef;
use shared_types::{EducationExperience, ExtractionError, ProfessionalExperience};

const NON_EMPLOYER_KEYWORDS: [&str; 3] = ["university", "school", "college"];
const INSTITUTION_KEYWORDS: [&str; 4] = ["university", "school", "college", "institute"];

/// Course keywords per level, checked in order.
const EDUCATION_LEVELS: [(&str, &[&str]); 5] = [
    ("Doctorate", &["phd", "doctorate"]),
    ("Master's Degree", &["master", "ms", "mba"]),
    ("Bachelor's Degree", &["bachelor", "bs", "ba"]),
    ("Associate's Degree", &["associate", "aa"]),
    ("High School", &["high school", "diploma"]),
];

pub struct HistoryPattern {
    pub name: String,
    pub regex: Regex,
    pub title_group: usize,
    pub org_group: usize,
    pub from_group: usize,
    pub to_group: usize,
}

pub(crate) struct HistoryMatch {
    pub title: String,
    pub organization: String,
    pub from_year: String,
    pub to: String,
}

impl HistoryPattern {
    fn new(
        name: &str,
        regex: &str,
        groups: (usize, usize, usize, usize),
    ) -> Result<Self, ExtractionError> {
        Ok(Self {
            name: name.to_string(),
            regex: compile(name, regex)?,
            title_group: groups.0,
            org_group: groups.1,
            from_group: groups.2,
            to_group: groups.3,
        })
    }

    pub(crate) fn matches(&self, text: &str) -> Vec<HistoryMatch> {
        self.regex
            .captures_iter(text)
            .filter_map(|caps| self.read(&caps))
            .collect()
    }

    fn read(&self, caps: &Captures<'_>) -> Option<HistoryMatch> {
        let group = |index: usize| caps.get(index).map(|m| m.as_str().trim().to_string());

        Some(HistoryMatch {
            title: group(self.title_group)?,
            organization: group(self.org_group)?,
            from_year: group(self.from_group)?,
            to: group(self.to_group)?,
        })
    }
}

pub(crate) fn create_experience_patterns() -> Result<Vec<HistoryPattern>, ExtractionError> {
    Ok(vec![
        HistoryPattern::new(
            "experience_optional_in",
            r"(?i)([^,\n]+?)\s+at\s+([^,\n]+?)\s+(?:in\s+)?(\d{4})\s*-\s*(Present|\d{4})",
            (1, 2, 3, 4),
        )?,
        HistoryPattern::new(
            "experience_parenthesised",
            r"(?i)([^,\n]+?)\s+at\s+([^,\n]+?)\s+\((\d{4})\s*-\s*(Present|\d{4})\)",
            (1, 2, 3, 4),
        )?,
        HistoryPattern::new(
            "experience_in",
            r"(?i)([^,\n]+?)\s+at\s+([^,\n]+?)\s+in\s+(\d{4})\s*-\s*(Present|\d{4})",
            (1, 2, 3, 4),
        )?,
        HistoryPattern::new(
            "experience_formerly",
            r"(?i)([^,\n]+?)\s+at\s+([^,\n]+?)\s+\(formerly\s+([^)]+)\)\s+in\s+(\d{4})\s*-\s*(Present|\d{4})",
            (1, 2, 4, 5),
        )?,
        HistoryPattern::new(
            "experience_years",
            r"(?i)([^,\n]+?)\s+at\s+([^,\n]+?)\s+(\d{4})\s*-\s*(\d{4})",
            (1, 2, 3, 4),
        )?,
    ])
}

pub(crate) fn create_education_patterns() -> Result<Vec<HistoryPattern>, ExtractionError> {
    Ok(vec![
        HistoryPattern::new(
            "education_optional_in",
            r"(?i)([^,\n]+?)\s+at\s+([^,\n]+?)\s+(?:in\s+)?(\d{4})\s*-\s*(\d{4})",
            (1, 2, 3, 4),
        )?,
        HistoryPattern::new(
            "education_parenthesised",
            r"(?i)([^,\n]+?)\s+at\s+([^,\n]+?)\s+\((\d{4})\s*-\s*(\d{4})\)",
            (1, 2, 3, 4),
        )?,
        HistoryPattern::new(
            "education_in",
            r"(?i)([^,\n]+?)\s+at\s+([^,\n]+?)\s+in\s+(\d{4})\s*-\s*(\d{4})",
            (1, 2, 3, 4),
        )?,
        HistoryPattern::new(
            "education_years",
            r"(?i)([^,\n]+?)\s+at\s+([^,\n]+?)\s+(\d{4})\s*-\s*(\d{4})",
            (1, 2, 3, 4),
        )?,
        HistoryPattern::new(
            "education_with_note",
            r"(?i)([^,\n]+?)\s+at\s+([^,\n]+?)\s+-\s+([^,\n]+?)\s+in\s+(\d{4})\s*-\s*(\d{4})",
            (1, 2, 4, 5),
        )?,
    ])
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    let lower = text.to_lowercase();
    keywords.iter().any(|keyword| lower.contains(keyword))
}

fn year_start(year: &str) -> String {
    format!("{}-01-01T00:00:00Z", year)
}

fn year_end(year: &str) -> String {
    format!("{}-12-31T00:00:00Z", year)
}

pub fn education_level(course: &str) -> String {
    let lower = course.to_lowercase();
    EDUCATION_LEVELS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(level, _)| level.to_string())
        .unwrap_or_default()
}

pub struct HistoryMiner {
    experience_patterns: Vec<HistoryPattern>,
    education_patterns: Vec<HistoryPattern>,
}

impl HistoryMiner {
    pub fn new() -> Result<Self, ExtractionError> {
        Ok(Self {
            experience_patterns: create_experience_patterns()?,
            education_patterns: create_education_patterns()?,
        })
    }

    pub fn experience_from_text(&self, text: &str, into: &mut Vec<ProfessionalExperience>) {
        for pattern in &self.experience_patterns {
            for found in pattern.matches(text) {
                if contains_any(&found.organization, &NON_EMPLOYER_KEYWORDS) {
                    continue;
                }

                let is_current = found.to.eq_ignore_ascii_case("present");
                let experience = ProfessionalExperience {
                    role_title: found.title,
                    period_from: year_start(&found.from_year),
                    period_to: if is_current {
                        String::new()
                    } else {
                        year_end(&found.to)
                    },
                    is_current,
                    organization_name: found.organization,
                    ..Default::default()
                };

                let exists = into.iter().any(|e| {
                    e.role_title == experience.role_title
                        && e.organization_name == experience.organization_name
                });
                if !exists {
                    into.push(experience);
                }
            }
        }
    }

    pub fn education_from_text(&self, text: &str, into: &mut Vec<EducationExperience>) {
        for pattern in &self.education_patterns {
            for found in pattern.matches(text) {
                if !contains_any(&found.organization, &INSTITUTION_KEYWORDS) {
                    continue;
                }

                let education = EducationExperience {
                    educational_level_value: education_level(&found.title),
                    course: found.title,
                    period_from: year_start(&found.from_year),
                    period_to: year_end(&found.to),
                    organization_name: found.organization,
                    ..Default::default()
                };

                let exists = into.iter().any(|e| {
                    e.course == education.course
                        && e.organization_name == education.organization_name
                });
                if !exists {
                    into.push(education);
                }
            }
        }
    }
}

/// Reads experience entries out of dedicated history blocks. A block whose
/// text already mentions a captured role or organization is skipped.
pub fn experience_from_blocks(
    profile: ElementRef<'_>,
    selectors: &CompiledSelectors,
    into: &mut Vec<ProfessionalExperience>,
) {
    for block_selector in &selectors.experience_blocks {
        for block in query_all(profile, block_selector) {
            let block_text = trimmed_text(block);
            let already_captured = into.iter().any(|e| {
                block_text.contains(&e.role_title) || block_text.contains(&e.organization_name)
            });
            if already_captured {
                continue;
            }

            let mut experience = ProfessionalExperience::default();
            if let Some(role) = query_first(block, &selectors.experience_role) {
                experience.role_title = trimmed_text(role);
            }
            if let Some(org) = query_first(block, &selectors.experience_organization) {
                experience.organization_name = trimmed_text(org);
            }
            if let Some(period) = query_first(block, &selectors.experience_period) {
                let period_text = trimmed_text(period);
                experience.is_current =
                    period_text.contains("Present") || period_text.contains("Current");
                experience.period_from = period_text;
            }
            if let Some(description) = query_first(block, &selectors.experience_description) {
                experience.description_responsibility = trimmed_text(description);
            }

            if !experience.role_title.is_empty() || !experience.organization_name.is_empty() {
                into.push(experience);
            }
        }
    }
}

pub fn education_from_blocks(
    profile: ElementRef<'_>,
    selectors: &CompiledSelectors,
    into: &mut Vec<EducationExperience>,
) {
    for block_selector in &selectors.education_blocks {
        for block in query_all(profile, block_selector) {
            let block_text = trimmed_text(block);
            let already_captured = into.iter().any(|e| {
                block_text.contains(&e.course) || block_text.contains(&e.organization_name)
            });
            if already_captured {
                continue;
            }

            let mut education = EducationExperience::default();
            if let Some(course) = query_first(block, &selectors.education_course) {
                education.course = trimmed_text(course);
            }
            if let Some(institution) = query_first(block, &selectors.education_institution) {
                education.organization_name = trimmed_text(institution);
            }
            if let Some(field) = query_first(block, &selectors.education_field_of_study) {
                education.field_of_study = trimmed_text(field);
            }

            if !education.course.is_empty() || !education.organization_name.is_empty() {
                into.push(education);
            }
        }
    }
}
