use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use shared_types::{ContactRecord, StoredContact, PROFILE_SOURCE};

/// The editable review form shown before a contact is saved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportForm {
    pub name: String,
    pub email: String,
    pub company: String,
    pub title: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub industry: String,
    pub notes: String,
}

/// Values the user typed over the prefilled form; `None` keeps the prefill.
#[derive(Debug, Clone, Default)]
pub struct FormEdits {
    pub name: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
    pub title: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub industry: Option<String>,
    pub notes: Option<String>,
}

impl ImportForm {
    pub fn from_record(record: &ContactRecord) -> Self {
        let phone = if record.work_mobile_phone.is_empty() {
            record.work_phone.clone()
        } else {
            record.work_mobile_phone.clone()
        };

        Self {
            name: record.full_name(),
            email: record.work_email.clone(),
            company: record.company_name.clone(),
            title: record.main_role_title.clone(),
            phone,
            location: record.full_address.clone(),
            linkedin: record.linkedin_url.clone(),
            industry: record.summary.clone(),
            notes: String::new(),
        }
    }

    pub fn apply(&mut self, edits: FormEdits) {
        let fields = [
            (&mut self.name, edits.name),
            (&mut self.email, edits.email),
            (&mut self.company, edits.company),
            (&mut self.title, edits.title),
            (&mut self.phone, edits.phone),
            (&mut self.location, edits.location),
            (&mut self.linkedin, edits.linkedin),
            (&mut self.industry, edits.industry),
            (&mut self.notes, edits.notes),
        ];

        for (field, edit) in fields {
            if let Some(value) = edit {
                *field = value;
            }
        }
    }

    /// Confirms the form, stamping the import time and source.
    pub fn confirm(self) -> StoredContact {
        StoredContact {
            name: self.name,
            email: self.email,
            company: self.company,
            title: self.title,
            phone: self.phone,
            location: self.location,
            linkedin: self.linkedin,
            industry: self.industry,
            notes: self.notes,
            imported_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            source: PROFILE_SOURCE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ContactRecord {
        ContactRecord {
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            work_email: "grace@navy.mil".to_string(),
            work_phone: "5551234567".to_string(),
            company_name: "US Navy".to_string(),
            summary: "Compilers".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_prefill_from_record() {
        let form = ImportForm::from_record(&record());
        assert_eq!(form.name, "Grace Hopper");
        assert_eq!(form.phone, "5551234567");
        assert_eq!(form.industry, "Compilers");
        assert!(form.notes.is_empty());
    }

    #[test]
    fn test_edits_override_prefill() {
        let mut form = ImportForm::from_record(&record());
        form.apply(FormEdits {
            title: Some("Rear Admiral".to_string()),
            notes: Some("met at conf".to_string()),
            ..Default::default()
        });

        let stored = form.confirm();
        assert_eq!(stored.title, "Rear Admiral");
        assert_eq!(stored.notes, "met at conf");
        assert_eq!(stored.company, "US Navy");
        assert_eq!(stored.source, PROFILE_SOURCE);
        assert!(stored.imported_at.ends_with('Z'));
    }
}
