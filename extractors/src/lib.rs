//! Extractors Crate
//!
//! Best-effort DOM heuristics that turn profile markup into `ContactRecord`s.
//! Every field is an ordered list of selector and pattern strategies where
//! the first non-empty value wins.
//!
//! # Architecture
//!
//! - **Types**: records, the `Extractor` trait and `ExtractionError` live in
//!   the `shared-types` crate
//! - **Locator**: walks up from an import trigger to the profile container
//! - **Fields / History**: per-field strategies and experience/education mining
//! - **Selectors**: the per-field selector lists, overridable from config
//!
//! # Available Extractors
//!
//! - `ProfileExtractor`: one record per import trigger on the page
//! - `BulkProfileExtractor`: one record per profile card on the page
//!
//! # Example
//!
//! ```rust,ignore
//! use extractors::ProfileExtractor;
//! use shared_types::{Extractor, ExtractionInput};
//!
//! let extractor = ProfileExtractor::with_defaults()?;
//! let records = extractor.extract(&ExtractionInput::new(html, page_url))?;
//! ```

pub mod bulk;
pub mod dom;
pub mod fields;
pub mod history;
pub mod locator;
pub mod patterns;
pub mod profile;
pub mod selectors;

// Re-export commonly used types
pub use bulk::BulkProfileExtractor;
pub use locator::{contains_profile_markup, find_triggers, locate_profile, pending_triggers};
pub use profile::{generate_user_id, ProfileExtractor};
pub use selectors::{CompiledSelectors, SelectorConfig};

// Re-export the Extractor trait from shared-types for convenience
pub use shared_types::Extractor;
