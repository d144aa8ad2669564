//! Draft session state machine.
//!
//! Holds all mutable UI state for one drafting session and mediates every
//! transition between the three views. Nothing outside this type mutates
//! session state; callers render from the read accessors and feed user
//! actions into the operation methods.
//!
//! Transitions:
//!
//! ```text
//! Input ──request_suggestions──▶ Suggested ──open_entry──▶ Editor
//!   │                                ▲                       │
//!   └────────request_generation──────┼───────────────────────┘
//!                                    └─────cancel_editing
//! ```
//!
//! There is no transition back to Input; the incident description stays
//! visible and editable in every view instead.

use crate::api::DraftApi;
use crate::entry::{fallback_entries, SuggestedEntry};
use crate::error::{DraftError, DraftResult};
use crate::template::draft_template;
use crate::SAMPLE_DESCRIPTION;
use kedb_types::IncidentDescription;

/// Which screen the session is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Initial view: description field and the two action buttons
    Input,
    /// Suggested KEDB entries fetched (or substituted) for the description
    Suggested,
    /// Free-text editor over the active document buffer
    Editor,
}

/// All state for one drafting session.
///
/// Session-scoped and in-memory only; dropping the session loses
/// everything. Collaborator failures never abort an operation: both
/// network-backed operations degrade to built-in fallback content and
/// still reach their target view, leaving only a warning banner behind.
#[derive(Debug)]
pub struct DraftSession {
    view: View,
    description: String,
    suggestions: Vec<SuggestedEntry>,
    document: String,
    selected: Option<SuggestedEntry>,
    loading: bool,
    error: Option<String>,
}

impl DraftSession {
    /// Creates a session in the Input view with the sample description.
    pub fn new() -> Self {
        Self {
            view: View::Input,
            description: SAMPLE_DESCRIPTION.to_owned(),
            suggestions: Vec::new(),
            document: String::new(),
            selected: None,
            loading: false,
            error: None,
        }
    }

    /// Current view.
    pub fn view(&self) -> View {
        self.view
    }

    /// Current incident description text, as typed.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Suggested entries from the last fetch, in display order.
    pub fn suggestions(&self) -> &[SuggestedEntry] {
        &self.suggestions
    }

    /// The active editable document buffer.
    pub fn document(&self) -> &str {
        &self.document
    }

    /// Entry the document was opened from, if any.
    pub fn selected_entry(&self) -> Option<&SuggestedEntry> {
        self.selected.as_ref()
    }

    /// True while a collaborator call is in flight; triggering controls
    /// must be disabled whilst this holds.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Current warning/validation banner, if any.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Overwrites the incident description. Legal in every view.
    pub fn set_description(&mut self, text: impl Into<String>) {
        self.description = text.into();
    }

    /// Fetches suggested entries and moves to the Suggested view.
    ///
    /// Fails fast without touching the network if the description is
    /// blank. On collaborator failure the fixed built-in entry set is
    /// substituted and the session still reaches Suggested, with a
    /// warning banner set. The loading flag is cleared on every path.
    ///
    /// # Errors
    ///
    /// * `DraftError::DescriptionRequired` - blank/whitespace description
    pub async fn request_suggestions(&mut self, api: &impl DraftApi) -> DraftResult<()> {
        let description = self.begin_request()?;

        match api.suggested_entries(&description).await {
            Ok(entries) => {
                self.suggestions = entries;
            }
            Err(failure) => {
                tracing::warn!("suggested entries fetch failed: {failure}");
                self.error = Some("Failed to fetch KEDBs. Using fallback data.".to_owned());
                self.suggestions = fallback_entries();
            }
        }

        self.view = View::Suggested;
        self.loading = false;
        Ok(())
    }

    /// Generates draft content and moves to the Editor view.
    ///
    /// Same blank-description contract as [`Self::request_suggestions`].
    /// On collaborator failure the document is seeded from the local
    /// draft template instead, interpolating the description verbatim.
    ///
    /// # Errors
    ///
    /// * `DraftError::DescriptionRequired` - blank/whitespace description
    pub async fn request_generation(&mut self, api: &impl DraftApi) -> DraftResult<()> {
        let description = self.begin_request()?;

        match api.generated_content(&description).await {
            Ok(content) => {
                self.document = content;
            }
            Err(failure) => {
                tracing::warn!("draft generation failed: {failure}");
                self.error = Some("Failed to generate KEDB. Using fallback content.".to_owned());
                self.document = draft_template(&description);
            }
        }

        self.view = View::Editor;
        self.loading = false;
        Ok(())
    }

    /// Opens an entry's content in the editor. No collaborator call.
    pub fn open_entry(&mut self, entry: &SuggestedEntry) {
        self.document = entry.content.clone();
        self.selected = Some(entry.clone());
        self.view = View::Editor;
    }

    /// Discards the document and returns to the Suggested view.
    ///
    /// Clears the document buffer, selected entry, and any banner. The
    /// previously fetched suggestions are kept as-is; no refetch happens.
    pub fn cancel_editing(&mut self) {
        self.document.clear();
        self.selected = None;
        self.error = None;
        self.view = View::Suggested;
    }

    /// Overwrites the document buffer. No validation, no length limit.
    pub fn edit_document(&mut self, text: impl Into<String>) {
        self.document = text.into();
    }

    /// Shared prologue for both collaborator-backed operations: validates
    /// the description, then flags the session as loading with the banner
    /// cleared. Re-entry needs no guard here: `&mut self` serialises the
    /// operations, and callers disable their triggers off `is_loading`.
    fn begin_request(&mut self) -> DraftResult<IncidentDescription> {
        let description = match IncidentDescription::new(&self.description) {
            Ok(description) => description,
            Err(_) => {
                self.error = Some("Please enter an incident description".to_owned());
                return Err(DraftError::DescriptionRequired);
            }
        };

        self.loading = true;
        self.error = None;
        Ok(description)
    }
}

impl Default for DraftSession {
    fn default() -> Self {
        Self::new()
    }
}
