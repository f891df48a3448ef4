pub mod api;
pub mod contact_record;
pub mod extraction;
pub mod stored_contact;

pub use api::{CreateContactRequest, LoginRequest, LoginResponse};
pub use contact_record::{
    ContactRecord, ContactStatus, EducationExperience, MainProfessionalExperience,
    PersonalDetail, ProfessionalExperience, SocialLink, ValidStatus, PROFILE_SOURCE,
};
pub use extraction::{ExtractionError, ExtractionInput, ExtractionMethod, Extractor};
pub use stored_contact::StoredContact;
