//! Error types for the sixup library.
//!
//! [`ProcessError`] covers the fatal failure modes: the batch cannot
//! proceed (unreadable input, document that pdfium refuses to open, a page
//! that fails to rasterize, an output document that fails to serialize).
//! Fatal errors abort the whole run — the caller never receives a partial
//! or corrupt output document.
//!
//! Per-image transform problems (inversion or scaling applied to an
//! unexpected bitmap) are deliberately *not* represented here. They degrade
//! gracefully: the pipeline falls back to the untransformed image, logs a
//! `tracing` warning with the source and page index, and keeps going.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the sixup library.
#[derive(Debug, Error)]
pub enum ProcessError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    // ── Document errors ───────────────────────────────────────────────────
    /// The byte stream cannot be opened as a paged document.
    #[error("Cannot open '{path}' as a PDF document: {detail}\nTry repairing with: qpdf --decrypt input.pdf output.pdf")]
    InvalidDocument { path: PathBuf, detail: String },

    /// PDF requires a password but none was provided.
    #[error("PDF '{path}' is encrypted and requires a password.\nProvide it with --password <PASSWORD>.")]
    PasswordRequired { path: PathBuf },

    /// A password was provided but it is wrong.
    #[error("Wrong password for PDF '{path}'")]
    WrongPassword { path: PathBuf },

    /// pdfium returned an error while rendering a specific page.
    ///
    /// Fatal to the batch: a dropped page would silently shift every image
    /// that follows it into the wrong grid cell.
    #[error("Rasterization failed for page {page} of '{path}': {detail}")]
    RasterizationFailed {
        path: PathBuf,
        page: usize,
        detail: String,
    },

    // ── Output errors ─────────────────────────────────────────────────────
    /// A finished merge unit could not be encoded to PDF bytes.
    #[error("Failed to serialize output document '{unit}': {detail}")]
    SerializationFailed { unit: String, detail: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}
