use crate::contact_record::{
    ContactRecord, ContactStatus, EducationExperience, MainProfessionalExperience,
    PersonalDetail, ProfessionalExperience, ValidStatus,
};
use crate::stored_contact::StoredContact;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Body of `POST /api/contacts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CreateContactRequest {
    pub work_email: String,
    pub first_name: String,
    pub last_name: String,
    pub company_name: String,
    pub middle_name: String,
    pub full_avatar_url: String,
    pub academic_title: String,
    pub gender: String,
    pub summary: String,
    pub want: String,
    pub personal_interest: String,
    pub has_duplicate: bool,
    pub avatar_url: String,
    pub unsubscribed: bool,
    pub private_email: String,
    pub work_mobile_phone: String,
    pub private_mobile_phone: String,
    pub work_phone: String,
    pub private_phone: String,
    pub linkedin_url: String,
    pub company_domain: String,
    pub valid_status: ValidStatus,
    pub linkedin_sales_url: String,
    pub linkedin_talent_id: String,
    pub facebook_url: String,
    pub twitter_url: String,
    pub xing_url: String,
    pub github_url: String,
    pub instagram_url: String,
    pub youtube_url: String,
    pub quora_url: String,
    pub calendly_url: String,
    pub tiktok_url: String,
    pub main_role_title: String,
    pub status: ContactStatus,
    pub user_id: String,
    pub personal_detail: PersonalDetail,
    pub professional_experiences: Vec<ProfessionalExperience>,
    pub education_experiences: Vec<EducationExperience>,
    pub volunteer_experiences: Vec<String>,
    pub accomplishments: Vec<String>,
    pub main_professional_experiences: Vec<MainProfessionalExperience>,
    pub languages: Vec<String>,
}

fn or_else(primary: &str, fallback: &str) -> String {
    if primary.is_empty() {
        fallback.to_string()
    } else {
        primary.to_string()
    }
}

impl CreateContactRequest {
    /// Maps an extracted record onto the API schema. Core fields left empty
    /// by extraction fall back to what the user entered in the import form.
    pub fn from_record(record: &ContactRecord, form: &StoredContact) -> Self {
        let mut name_parts = form.name.split_whitespace();
        let form_first = name_parts.next().unwrap_or_default().to_string();
        let form_last = name_parts.collect::<Vec<_>>().join(" ");

        let mut personal_detail = record.personal_detail.clone();
        personal_detail.full_address = or_else(&record.full_address, &form.location);
        personal_detail.country = record.country.clone();
        personal_detail.region = record.region.clone();
        personal_detail.city = record.city.clone();
        personal_detail.postal_code = record.postal_code.clone();

        Self {
            work_email: or_else(&record.work_email, &form.email),
            first_name: or_else(&record.first_name, &form_first),
            last_name: or_else(&record.last_name, &form_last),
            company_name: or_else(&record.company_name, &form.company),
            middle_name: record.middle_name.clone(),
            full_avatar_url: record.full_avatar_url.clone(),
            academic_title: record.academic_title.clone(),
            gender: record.gender.clone(),
            summary: record.summary.clone(),
            want: record.want.clone(),
            personal_interest: record.personal_interest.clone(),
            has_duplicate: record.has_duplicate,
            avatar_url: record.avatar_url.clone(),
            unsubscribed: record.unsubscribed,
            private_email: record.private_email.clone(),
            work_mobile_phone: record.work_mobile_phone.clone(),
            private_mobile_phone: record.private_mobile_phone.clone(),
            work_phone: or_else(&record.work_phone, &form.phone),
            private_phone: record.private_phone.clone(),
            linkedin_url: or_else(&record.linkedin_url, &form.linkedin),
            company_domain: record.company_domain.clone(),
            valid_status: record.valid_status,
            linkedin_sales_url: record.linkedin_sales_url.clone(),
            linkedin_talent_id: record.linkedin_talent_id.clone(),
            facebook_url: record.facebook_url.clone(),
            twitter_url: record.twitter_url.clone(),
            xing_url: String::new(),
            github_url: record.github_url.clone(),
            instagram_url: record.instagram_url.clone(),
            youtube_url: String::new(),
            quora_url: String::new(),
            calendly_url: String::new(),
            tiktok_url: String::new(),
            main_role_title: or_else(&record.main_role_title, &form.title),
            status: record.status,
            user_id: record.user_id.clone(),
            personal_detail,
            professional_experiences: record.professional_experiences.clone(),
            education_experiences: record.education_experiences.clone(),
            volunteer_experiences: record.volunteer_experiences.clone(),
            accomplishments: record.accomplishments.clone(),
            main_professional_experiences: record.main_professional_experiences.clone(),
            languages: record.languages.clone(),
        }
    }

    /// Names of the required fields that are still empty.
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.work_email.trim().is_empty() {
            missing.push("work_email");
        }
        if self.first_name.trim().is_empty() {
            missing.push("first_name");
        }
        if self.last_name.trim().is_empty() {
            missing.push("last_name");
        }
        if self.company_name.trim().is_empty() {
            missing.push("company_name");
        }
        missing
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response; older deployments send `id` instead of `user_id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LoginResponse {
    pub access_token: Option<String>,
    pub user_id: Option<serde_json::Value>,
    pub id: Option<serde_json::Value>,
}

impl LoginResponse {
    pub fn resolved_user_id(&self) -> Option<String> {
        self.user_id
            .as_ref()
            .or(self.id.as_ref())
            .and_then(|value| match value {
                serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
                serde_json::Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_values_win_over_form() {
        let record = ContactRecord {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            work_email: "ada@engines.io".to_string(),
            ..Default::default()
        };
        let form = StoredContact {
            name: "Someone Else".to_string(),
            email: "other@example.com".to_string(),
            company: "Analytical Engines Ltd".to_string(),
            ..Default::default()
        };

        let request = CreateContactRequest::from_record(&record, &form);
        assert_eq!(request.first_name, "Ada");
        assert_eq!(request.work_email, "ada@engines.io");
        assert_eq!(request.company_name, "Analytical Engines Ltd");
        assert!(request.missing_required_fields().is_empty());
    }

    #[test]
    fn test_form_name_split() {
        let form = StoredContact {
            name: "Mary Ann Evans".to_string(),
            ..Default::default()
        };

        let request = CreateContactRequest::from_record(&ContactRecord::default(), &form);
        assert_eq!(request.first_name, "Mary");
        assert_eq!(request.last_name, "Ann Evans");
        assert_eq!(
            request.missing_required_fields(),
            vec!["work_email", "company_name"]
        );
    }

    #[test]
    fn test_personal_detail_placeholders_serialize_as_null() {
        let request =
            CreateContactRequest::from_record(&ContactRecord::default(), &StoredContact::default());
        let json = serde_json::to_value(&request).unwrap();

        assert!(json["personal_detail"]["dob_day"].is_null());
        assert_eq!(json["personal_detail"]["children_number"], 0);
        assert_eq!(json["status"], "none");
        assert_eq!(json["valid_status"], "unverified");
    }

    #[test]
    fn test_login_response_user_id_fallback() {
        let response: LoginResponse =
            serde_json::from_str(r#"{"access_token": "abc", "id": 42}"#).unwrap();
        assert_eq!(response.resolved_user_id().as_deref(), Some("42"));

        let response: LoginResponse =
            serde_json::from_str(r#"{"access_token": "abc", "user_id": "u-1"}"#).unwrap();
        assert_eq!(response.resolved_user_id().as_deref(), Some("u-1"));
    }
}
