use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Tag written into every record produced by the profile extractors.
pub const PROFILE_SOURCE: &str = "ContactOut";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ContactStatus {
    #[default]
    None,
    Contacted,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ValidStatus {
    #[default]
    Unverified,
    Verified,
    Invalid,
}

/// Normalized contact scraped from a single profile container.
///
/// Every string field defaults to an empty string; a field that no strategy
/// could fill simply stays empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct ContactRecord {
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub academic_title: String,
    pub gender: String,

    pub work_email: String,
    pub private_email: String,
    pub company_domain: String,

    pub company_name: String,
    pub main_role_title: String,

    pub work_phone: String,
    pub work_mobile_phone: String,
    pub private_phone: String,
    pub private_mobile_phone: String,

    pub linkedin_url: String,
    pub linkedin_sales_url: String,
    pub linkedin_talent_id: String,
    pub facebook_url: String,
    pub twitter_url: String,
    pub github_url: String,
    pub instagram_url: String,
    pub additional_social_links: Vec<SocialLink>,

    pub full_address: String,
    pub city: String,
    pub region: String,
    pub country: String,
    pub postal_code: String,

    pub summary: String,
    pub avatar_url: String,
    pub full_avatar_url: String,
    pub want: String,
    pub personal_interest: String,
    pub has_duplicate: bool,
    pub unsubscribed: bool,

    pub status: ContactStatus,
    pub valid_status: ValidStatus,

    pub user_id: String,
    pub extraction_timestamp: String,
    pub page_url: String,
    pub profile_source: String,
    pub profile_id: Option<String>,

    pub tags: Vec<String>,
    pub former_companies: Vec<String>,
    pub company_additional_info: Vec<String>,

    pub professional_experiences: Vec<ProfessionalExperience>,
    pub education_experiences: Vec<EducationExperience>,
    pub main_professional_experiences: Vec<MainProfessionalExperience>,
    pub volunteer_experiences: Vec<String>,
    pub accomplishments: Vec<String>,
    pub languages: Vec<String>,

    pub personal_detail: PersonalDetail,
}

impl ContactRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct ProfessionalExperience {
    pub role_title: String,
    pub period_from: String,
    pub period_to: String,
    pub is_current: bool,
    pub organization_name: String,
    pub organization_logo_url: String,
    pub organization_linkedin_url: String,
    pub organization_employee_count_range: String,
    pub description_responsibility: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct EducationExperience {
    pub course: String,
    pub field_of_study: String,
    pub grade: String,
    pub period_from: String,
    pub period_to: String,
    pub is_current: bool,
    pub organization_name: String,
    pub organization_logo_url: String,
    pub educational_level_value: String,
    pub educational_level_icon_name: String,
    pub description: String,
}

/// The current position, synthesized from the main title and company.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct MainProfessionalExperience {
    pub role_title: String,
    pub period_from: String,
    pub period_to: String,
    pub is_current: bool,
    pub organization_name: String,
    pub organization_logo_url: String,
    pub organization_linkedin_url: String,
    pub organization_employee_count_range: String,
    pub main_location_full_address: String,
    pub main_location_country: String,
    pub main_location_city: String,
    pub main_location_postal_code: String,
    pub organization_website: String,
    pub main_location_coord: Option<(f64, f64)>,
    pub employment_type: String,
    pub industries: Vec<String>,
    pub management_level: String,
    pub money_amount: f64,
    pub description_responsibility: String,
    pub career_level_value: String,
    pub career_level_level: i32,
    pub career_path: String,
    pub months_of_experience: i32,
}

/// Address and demographic block expected by the contacts API. Only the
/// location fields are ever filled by extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct PersonalDetail {
    pub dob_day: Option<u8>,
    pub dob_month: Option<u8>,
    pub dob_year: Option<i32>,
    pub full_address: String,
    pub country: String,
    pub region: String,
    pub city: String,
    pub postal_code: String,
    pub nationality: String,
    pub race_or_ethnicity: String,
    pub marital_status: String,
    pub children_number: u32,
    pub maiden_name: String,
    pub social_security_number: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let record = ContactRecord::default();
        assert_eq!(record.status, ContactStatus::None);
        assert_eq!(record.valid_status, ValidStatus::Unverified);
        assert!(record.professional_experiences.is_empty());
        assert_eq!(record.last_name, "");
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&ContactStatus::None).unwrap();
        assert_eq!(json, "\"none\"");

        let json = serde_json::to_string(&ValidStatus::Unverified).unwrap();
        assert_eq!(json, "\"unverified\"");
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let record: ContactRecord =
            serde_json::from_str(r#"{"first_name": "Ada", "work_email": "ada@example.com"}"#)
                .unwrap();

        assert_eq!(record.first_name, "Ada");
        assert_eq!(record.valid_status, ValidStatus::Unverified);
        assert!(record.personal_detail.full_address.is_empty());
    }

    #[test]
    fn test_full_name() {
        let record = ContactRecord {
            first_name: "Grace".to_string(),
            ..Default::default()
        };
        assert_eq!(record.full_name(), "Grace");
    }
}
