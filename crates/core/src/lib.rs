//! # KEDB Core
//!
//! Core domain logic for the KEDB (Known-Error Database) draft generator.
//!
//! This crate contains pure state and data operations:
//! - The draft session state machine (input → suggested → editor)
//! - Suggested-entry model and the built-in fallback entry set
//! - Draft template rendering for offline/degraded generation
//!
//! **No transport concerns**: HTTP clients, the mock API service, or file
//! export belong in `kedb-client`, `api-rest`, and `kedb-export`. The only
//! seam to the network is the [`DraftApi`] trait, which those crates
//! implement or mock.

pub mod api;
pub mod entry;
pub mod error;
pub mod session;
pub mod template;

pub use api::{ApiFailure, DraftApi};
pub use entry::{fallback_entries, SuggestedEntry};
pub use error::{DraftError, DraftResult};
pub use kedb_types::{IncidentDescription, TextError};
pub use session::{DraftSession, View};
pub use template::draft_template;

/// Incident short description a fresh session starts with.
pub const SAMPLE_DESCRIPTION: &str =
    "CTR PC3 CTR.WEEKLY_UNDETECT_REPORT_CLEANUP_V2.B - JOBTERMINATED";
