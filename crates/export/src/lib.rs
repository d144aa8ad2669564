//! # KEDB Export
//!
//! Serialises the editable draft buffer into a downloadable document.
//!
//! The primary artifact is a DOCX file: a fixed bold title paragraph
//! followed by one paragraph per non-blank content line, with emphasis
//! markers stripped. If DOCX construction fails for any reason the raw
//! buffer is written out as UTF-8 plain text instead; the export never
//! fails outright unless the filesystem does.
//!
//! Filenames carry a timestamp plus a per-service counter so repeated
//! exports in one session never silently overwrite each other.

use std::fs;
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use docx_rs::{Docx, Paragraph, Run};

mod markup;

pub use markup::strip_emphasis;

/// Title paragraph placed at the top of every exported document.
const DOCUMENT_TITLE: &str = "KEDB Document";
/// Title font size, in half-points.
const TITLE_SIZE: usize = 32;
/// Body font size, in half-points.
const BODY_SIZE: usize = 24;

/// Errors that can occur during export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The draft buffer was empty; the export action must stay disabled
    #[error("nothing to export: the document is empty")]
    EmptyDocument,
    /// The output directory could not be created
    #[error("failed to create export directory: {0}")]
    OutputDir(std::io::Error),
    /// The artifact could not be written to disk
    #[error("failed to write export artifact: {0}")]
    FileWrite(std::io::Error),
}

pub type ExportResult<T> = std::result::Result<T, ExportError>;

/// Format of a produced artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Binary OOXML word-processing document
    Docx,
    /// UTF-8 plain text fallback
    PlainText,
}

/// A written export artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// Where the artifact was written
    pub path: PathBuf,
    /// Which format was actually produced
    pub format: ExportFormat,
}

/// Exports draft buffers as documents under one output directory.
#[derive(Debug)]
pub struct ExportService {
    out_dir: PathBuf,
    sequence: AtomicU64,
}

impl ExportService {
    /// Creates an export service writing into `out_dir`.
    ///
    /// The directory is created lazily on first export.
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            sequence: AtomicU64::new(0),
        }
    }

    /// Creates a service from `KEDB_EXPORT_DIR`, defaulting to the
    /// current directory.
    pub fn from_env() -> Self {
        let out_dir = std::env::var("KEDB_EXPORT_DIR").unwrap_or_else(|_| ".".into());
        Self::new(out_dir)
    }

    /// Exports the draft buffer, preferring DOCX and degrading to plain
    /// text if document construction fails.
    ///
    /// # Arguments
    ///
    /// * `content` - The raw draft buffer, markup markers and all
    ///
    /// # Returns
    ///
    /// The path and format of the written artifact. The filename is
    /// unique per export within this service's lifetime.
    ///
    /// # Errors
    ///
    /// * `ExportError::EmptyDocument` - blank/whitespace-only buffer
    /// * `ExportError::OutputDir` / `ExportError::FileWrite` - filesystem
    ///   failures, for either format
    pub fn export(&self, content: &str) -> ExportResult<ExportArtifact> {
        if content.trim().is_empty() {
            return Err(ExportError::EmptyDocument);
        }

        self.export_with(content, build_docx(content))
    }

    /// Writes the artifact for an already-attempted DOCX construction.
    ///
    /// Split out from [`Self::export`] so the plain-text fallback can be
    /// driven directly with a forced construction failure.
    fn export_with(
        &self,
        content: &str,
        docx: Result<Vec<u8>, String>,
    ) -> ExportResult<ExportArtifact> {
        fs::create_dir_all(&self.out_dir).map_err(ExportError::OutputDir)?;
        let stem = self.unique_stem();

        match docx {
            Ok(bytes) => {
                let path = self.out_dir.join(format!("{stem}.docx"));
                fs::write(&path, bytes).map_err(ExportError::FileWrite)?;
                tracing::info!("exported DOCX artifact to {}", path.display());
                Ok(ExportArtifact {
                    path,
                    format: ExportFormat::Docx,
                })
            }
            Err(reason) => {
                tracing::warn!("DOCX construction failed ({reason}); writing plain text");
                let path = self.out_dir.join(format!("{stem}.txt"));
                fs::write(&path, content).map_err(ExportError::FileWrite)?;
                Ok(ExportArtifact {
                    path,
                    format: ExportFormat::PlainText,
                })
            }
        }
    }

    /// Produces a filename stem unique per export in this session:
    /// timestamp plus a monotonically increasing counter.
    fn unique_stem(&self) -> String {
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let stamp = Utc::now().format("%Y%m%dT%H%M%S");
        format!("KEDB_Document_{stamp}_{seq:03}")
    }
}

/// Splits stripped content into the lines that become body paragraphs,
/// discarding blank ones.
fn body_lines(content: &str) -> Vec<String> {
    strip_emphasis(content)
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_owned)
        .collect()
}

/// Builds the DOCX artifact in memory.
///
/// Failures are reported as strings; the caller only needs them for the
/// fallback log line, never to branch on.
fn build_docx(content: &str) -> Result<Vec<u8>, String> {
    let mut docx = Docx::new()
        .add_paragraph(
            Paragraph::new().add_run(Run::new().add_text(DOCUMENT_TITLE).bold().size(TITLE_SIZE)),
        )
        .add_paragraph(Paragraph::new());

    for line in body_lines(content) {
        docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(line).size(BODY_SIZE)));
    }

    let mut buffer = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buffer)
        .map_err(|e| e.to_string())?;
    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_buffer_is_rejected() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let service = ExportService::new(temp.path());

        assert!(matches!(service.export(""), Err(ExportError::EmptyDocument)));
        assert!(matches!(
            service.export("   \n\t"),
            Err(ExportError::EmptyDocument)
        ));
    }

    #[test]
    fn test_export_writes_docx_artifact() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let service = ExportService::new(temp.path());

        let artifact = service
            .export("**KEDB View**\n\nStep 1: check the job status")
            .expect("Failed to export");

        assert_eq!(artifact.format, ExportFormat::Docx);
        assert_eq!(artifact.path.extension().and_then(|e| e.to_str()), Some("docx"));

        // A DOCX is a zip container; check the magic instead of the size.
        let bytes = std::fs::read(&artifact.path).expect("Failed to read artifact");
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_successive_exports_get_distinct_filenames() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let service = ExportService::new(temp.path());

        let first = service.export("draft one").expect("Failed to export");
        let second = service.export("draft one").expect("Failed to export");

        assert_ne!(first.path, second.path);
        assert!(first.path.exists());
        assert!(second.path.exists());
    }

    #[test]
    fn test_docx_failure_falls_back_to_raw_plain_text() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let service = ExportService::new(temp.path());
        let content = "**KEDB View**\n\n1. Check the job status";

        let artifact = service
            .export_with(content, Err("zip writer failed".to_owned()))
            .expect("Fallback export must not error");

        assert_eq!(artifact.format, ExportFormat::PlainText);
        assert_eq!(artifact.path.extension().and_then(|e| e.to_str()), Some("txt"));

        // The fallback writes the buffer as-is: markup markers and blank
        // lines survive, unlike the DOCX layout.
        let text = std::fs::read_to_string(&artifact.path).expect("Failed to read artifact");
        assert_eq!(text, content);
    }

    #[test]
    fn test_fallback_artifact_shares_the_unique_naming_scheme() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let service = ExportService::new(temp.path());

        let docx = service.export("draft body").expect("Failed to export");
        let txt = service
            .export_with("draft body", Err("forced failure".to_owned()))
            .expect("Fallback export must not error");

        let docx_stem = docx.path.file_stem().and_then(|s| s.to_str()).unwrap();
        let txt_stem = txt.path.file_stem().and_then(|s| s.to_str()).unwrap();
        assert!(docx_stem.starts_with("KEDB_Document_"));
        assert!(txt_stem.starts_with("KEDB_Document_"));
        assert_ne!(docx_stem, txt_stem);
    }

    #[test]
    fn test_body_lines_drop_blanks_and_markup() {
        let lines = body_lines("**KEDB View**\n\n\n1. First step\n   \n2. Second step\n");
        assert_eq!(
            lines,
            vec!["KEDB View", "1. First step", "2. Second step"]
        );
    }

    #[test]
    fn test_export_creates_missing_output_directory() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let nested = temp.path().join("exports").join("today");
        let service = ExportService::new(&nested);

        let artifact = service.export("content").expect("Failed to export");
        assert!(artifact.path.starts_with(&nested));
    }
}
