use crate::error::ImportError;
use std::fmt;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// Short-lived message shown to the user after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }

    pub fn contact_saved() -> Self {
        Self::success("Contact saved successfully!")
    }

    pub fn contact_imported() -> Self {
        Self::success("Contact imported successfully!")
    }

    pub fn bulk_imported(count: usize) -> Self {
        if count == 0 {
            Self::success("No contacts found to scrape!")
        } else {
            Self::success(format!("Bulk imported {} contacts!", count))
        }
    }

    pub fn exported(count: usize) -> Self {
        Self::success(format!("Exported {} contacts to CSV!", count))
    }

    pub fn logged_in() -> Self {
        Self::success("Logged in successfully")
    }

    pub fn logged_out() -> Self {
        Self::success("Logged out successfully")
    }

    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }

    /// Logs the notification and prints it for the user.
    pub fn show(&self) {
        match self.kind {
            NotificationKind::Success => info!(message = %self.message, "notification"),
            NotificationKind::Error => warn!(message = %self.message, "notification"),
        }
        println!("{}", self);
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            NotificationKind::Success => write!(f, "{}", self.message),
            NotificationKind::Error => write!(f, "[error] {}", self.message),
        }
    }
}

impl From<&ImportError> for Notification {
    fn from(error: &ImportError) -> Self {
        match error {
            ImportError::ValidationError(message) => Self::error(format!("Error: {}", message)),
            ImportError::AuthExpired => Self::error("Session expired. Please login again."),
            ImportError::SubmissionFailed(_) => {
                Self::error("Error saving contact. Please try again.")
            }
            ImportError::EmptyExport => Self::error("No contacts to export!"),
            ImportError::LoginFailed(message) => Self::error(message.clone()),
            ImportError::ExportFailed(message) => {
                Self::error(format!("Could not write CSV file: {}", message))
            }
            ImportError::Storage(e) => Self::error(format!("Storage error: {}", e)),
            ImportError::Config(message) => {
                Self::error(format!("Configuration error: {}", message))
            }
            ImportError::Extraction(e) => Self::error(format!("Could not read the page: {}", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let notification = Notification::from(&ImportError::AuthExpired);
        assert!(notification.is_error());
        assert_eq!(notification.message, "Session expired. Please login again.");

        let notification = Notification::from(&ImportError::EmptyExport);
        assert_eq!(notification.message, "No contacts to export!");

        let notification = Notification::from(&ImportError::ValidationError(
            "Email, first name, last name, and company are required!".to_string(),
        ));
        assert_eq!(
            notification.message,
            "Error: Email, first name, last name, and company are required!"
        );
    }

    #[test]
    fn test_bulk_message() {
        assert_eq!(Notification::bulk_imported(3).message, "Bulk imported 3 contacts!");
        assert_eq!(
            Notification::bulk_imported(0).message,
            "No contacts found to scrape!"
        );
    }

    #[test]
    fn test_display_marks_errors() {
        assert_eq!(Notification::error("boom").to_string(), "[error] boom");
        assert_eq!(Notification::logged_out().to_string(), "Logged out successfully");
    }
}
