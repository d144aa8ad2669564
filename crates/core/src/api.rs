//! Collaborator seam between the draft session and the KEDB API.
//!
//! The session never talks to the network directly; it drives an
//! implementation of [`DraftApi`]. The real implementation lives in
//! `kedb-client`; tests substitute an in-memory stub.

use async_trait::async_trait;

use crate::entry::SuggestedEntry;
use kedb_types::IncidentDescription;

/// Uniform failure signal for any collaborator call.
///
/// Transport errors, non-2xx statuses and unrecognised response shapes all
/// collapse into this one type. The session does not branch on the cause,
/// only on success versus failure.
#[derive(Debug, thiserror::Error)]
#[error("API request failed: {0}")]
pub struct ApiFailure(pub String);

/// Operations the draft session needs from the KEDB API.
#[async_trait]
pub trait DraftApi {
    /// Fetches suggested KEDB entries for an incident description.
    ///
    /// The returned order is display order; callers must not re-sort.
    async fn suggested_entries(
        &self,
        description: &IncidentDescription,
    ) -> Result<Vec<SuggestedEntry>, ApiFailure>;

    /// Generates draft KEDB content for an incident description.
    async fn generated_content(
        &self,
        description: &IncidentDescription,
    ) -> Result<String, ApiFailure>;

    /// Looks up a single KEDB entry by its identifier.
    async fn entry_by_id(&self, id: &str) -> Result<SuggestedEntry, ApiFailure>;
}
