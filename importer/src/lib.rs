pub mod auth;
pub mod config;
pub mod error;
pub mod export;
pub mod form;
pub mod gateway;
pub mod notification;
pub mod session;
pub mod storage;
pub mod store;
pub mod watcher;

pub use auth::AuthClient;
pub use config::ImporterConfig;
pub use error::{ImportError, Result};
pub use form::{FormEdits, ImportForm};
pub use gateway::{ServerId, SubmissionGateway};
pub use notification::Notification;
pub use session::Session;
pub use storage::LocalStorage;
pub use store::ContactStore;
pub use watcher::DomWatcher;
