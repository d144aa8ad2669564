/// Errors produced by draft session operations.
///
/// Network failures are deliberately absent: a failed collaborator call is
/// non-fatal and degrades to built-in fallback content inside the session,
/// surfacing only as a warning banner (see [`crate::DraftSession`]).
#[derive(Debug, thiserror::Error)]
pub enum DraftError {
    /// The incident description was blank or whitespace-only
    #[error("Please enter an incident description")]
    DescriptionRequired,
}

pub type DraftResult<T> = std::result::Result<T, DraftError>;
