//! Input resolution: normalize user-supplied paths and byte buffers to
//! local files pdfium can open.
//!
//! ## Why temp files for byte buffers?
//!
//! `printpdf` output and the front-end contract both speak byte streams,
//! but pdfium opens documents most reliably from a file-system path.
//! Writing an in-memory buffer to a [`tempfile::NamedTempFile`] gives us a
//! path pdfium can open while ensuring cleanup happens automatically when
//! the handle is dropped, even if the batch fails mid-run. We validate the
//! PDF magic bytes (`%PDF`) before returning so callers get a meaningful
//! error rather than a pdfium crash.

use crate::error::ProcessError;
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// A batch input resolved to an openable local file.
#[derive(Debug)]
pub enum ResolvedInput {
    /// Input was already a local file.
    Local(PathBuf),
    /// Input was an in-memory buffer, spilled to a temp file.
    /// The handle is kept alive so the file survives until processing
    /// completes.
    Buffered { path: PathBuf, _file: NamedTempFile },
}

impl ResolvedInput {
    /// Path to the PDF file regardless of how it was resolved.
    pub fn path(&self) -> &Path {
        match self {
            ResolvedInput::Local(p) => p,
            ResolvedInput::Buffered { path, .. } => path,
        }
    }
}

/// Resolve a local file path, validating existence, readability, and PDF
/// magic bytes.
pub fn resolve_local(path: &Path) -> Result<ResolvedInput, ProcessError> {
    if !path.exists() {
        return Err(ProcessError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    match std::fs::File::open(path) {
        Ok(mut f) => {
            use std::io::Read;
            let mut magic = [0u8; 4];
            // A file too short to hold the magic is just as much not a PDF
            // as one with the wrong magic.
            if f.read_exact(&mut magic).is_err() || &magic != b"%PDF" {
                return Err(ProcessError::NotAPdf {
                    path: path.to_path_buf(),
                    magic,
                });
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(ProcessError::PermissionDenied {
                path: path.to_path_buf(),
            });
        }
        Err(_) => {
            return Err(ProcessError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
    }

    debug!("Resolved local PDF: {}", path.display());
    Ok(ResolvedInput::Local(path.to_path_buf()))
}

/// Spill an in-memory PDF buffer to a managed temp file.
///
/// The magic-byte check runs before any disk I/O so an obviously broken
/// upload is rejected without leaving a temp file behind.
pub fn resolve_bytes(bytes: &[u8]) -> Result<ResolvedInput, ProcessError> {
    let mut magic = [0u8; 4];
    if bytes.len() >= 4 {
        magic.copy_from_slice(&bytes[..4]);
    }
    if &magic != b"%PDF" {
        return Err(ProcessError::NotAPdf {
            path: PathBuf::from("<buffer>"),
            magic,
        });
    }

    use std::io::Write;
    let mut file = NamedTempFile::new()
        .map_err(|e| ProcessError::Internal(format!("tempfile: {e}")))?;
    file.write_all(bytes)
        .map_err(|e| ProcessError::Internal(format!("tempfile write: {e}")))?;
    let path = file.path().to_path_buf();

    debug!("Spilled {} byte buffer to {}", bytes.len(), path.display());
    Ok(ResolvedInput::Buffered { path, _file: file })
}

/// Validation capability: can this byte stream be opened as a PDF?
///
/// Intended for upload front ends that want to reject a file before
/// queueing a batch. Tries a real pdfium open rather than trusting the
/// magic bytes alone — a truncated body with an intact header is still
/// invalid.
pub fn is_valid_document(bytes: &[u8]) -> bool {
    if bytes.len() < 4 || &bytes[..4] != b"%PDF" {
        return false;
    }
    let pdfium = Pdfium::default();
    let valid = match pdfium.load_pdf_from_byte_slice(bytes, None) {
        Ok(doc) => {
            // Document handle dropped (closed) here.
            let pages = doc.pages().len();
            debug!("Validated PDF buffer: {} pages", pages);
            true
        }
        Err(e) => {
            debug!("PDF validation failed: {:?}", e);
            false
        }
    };
    valid
}
