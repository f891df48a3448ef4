use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Simplified contact kept in local storage and used for CSV export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct StoredContact {
    pub name: String,
    pub email: String,
    pub company: String,
    pub title: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub industry: String,
    pub notes: String,
    pub imported_at: String,
    pub source: String,
}
