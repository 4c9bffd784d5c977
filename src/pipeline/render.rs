//! PDF rasterization: render every page to a `DynamicImage` via pdfium.
//!
//! ## Why spawn_blocking?
//!
//! The `pdfium-render` crate wraps the pdfium C++ library, which uses
//! thread-local state internally and is not safe to call from async
//! contexts. `tokio::task::spawn_blocking` moves the work onto a dedicated
//! thread pool thread designed for blocking operations, preventing the
//! Tokio worker threads from stalling during CPU-heavy rendering.
//!
//! ## Why zoom, not DPI?
//!
//! Output cells are measured in PDF points, and the scaler treats one
//! source pixel as one point before fitting. Rendering at `zoom ×` the
//! page's point dimensions therefore gives the downscale into a grid cell
//! exactly `zoom ×` oversampling to work with, independent of the page's
//! physical size.

use crate::error::ProcessError;
use crate::output::DocumentMetadata;
use image::DynamicImage;
use pdfium_render::prelude::*;
use std::path::Path;
use tracing::{debug, info};

/// Rasterize every page of a PDF, in page order.
///
/// This runs inside `spawn_blocking` since pdfium operations are CPU-bound.
/// The document handle is scoped to the blocking closure and released on
/// every exit path, including a failure partway through the page loop.
pub async fn render_document(
    pdf_path: &Path,
    zoom: f32,
    password: Option<&str>,
) -> Result<Vec<DynamicImage>, ProcessError> {
    let path = pdf_path.to_path_buf();
    let password = password.map(|s| s.to_string());

    tokio::task::spawn_blocking(move || render_document_blocking(&path, zoom, password.as_deref()))
        .await
        .map_err(|e| ProcessError::Internal(format!("Render task panicked: {}", e)))?
}

/// Blocking implementation of whole-document rendering.
fn render_document_blocking(
    pdf_path: &Path,
    zoom: f32,
    password: Option<&str>,
) -> Result<Vec<DynamicImage>, ProcessError> {
    let pdfium = Pdfium::default();

    let document = pdfium
        .load_pdf_from_file(pdf_path, password)
        .map_err(|e| open_error(pdf_path, password, e))?;

    let pages = document.pages();
    let total_pages = pages.len() as usize;
    info!("PDF loaded: {} pages ({})", total_pages, pdf_path.display());

    let mut results = Vec::with_capacity(total_pages);

    for idx in 0..total_pages {
        let page = pages
            .get(idx as u16)
            .map_err(|e| ProcessError::RasterizationFailed {
                path: pdf_path.to_path_buf(),
                page: idx + 1,
                detail: format!("{:?}", e),
            })?;

        // Page dimensions are in points; zoom is a linear multiplier.
        let target_width = (page.width().value * zoom) as i32;
        let target_height = (page.height().value * zoom) as i32;

        let render_config = PdfRenderConfig::new()
            .set_target_width(target_width)
            .set_target_height(target_height);

        let bitmap = page.render_with_config(&render_config).map_err(|e| {
            ProcessError::RasterizationFailed {
                path: pdf_path.to_path_buf(),
                page: idx + 1,
                detail: format!("{:?}", e),
            }
        })?;

        let image = bitmap.as_image();
        debug!(
            "Rendered page {} → {}x{} px",
            idx + 1,
            image.width(),
            image.height()
        );

        results.push(image);
    }

    Ok(results)
}

/// Extract document metadata from a PDF without rendering pages.
pub async fn extract_metadata(
    pdf_path: &Path,
    password: Option<&str>,
) -> Result<DocumentMetadata, ProcessError> {
    let path = pdf_path.to_path_buf();
    let pwd = password.map(|s| s.to_string());

    tokio::task::spawn_blocking(move || extract_metadata_blocking(&path, pwd.as_deref()))
        .await
        .map_err(|e| ProcessError::Internal(format!("Metadata task panicked: {}", e)))?
}

/// Blocking implementation of metadata extraction.
fn extract_metadata_blocking(
    pdf_path: &Path,
    password: Option<&str>,
) -> Result<DocumentMetadata, ProcessError> {
    let pdfium = Pdfium::default();

    let document = pdfium
        .load_pdf_from_file(pdf_path, password)
        .map_err(|e| open_error(pdf_path, password, e))?;

    let metadata = document.metadata();
    let pages = document.pages();

    let get_meta = |tag: PdfDocumentMetadataTagType| -> Option<String> {
        metadata.get(tag).and_then(|t| {
            let v = t.value().to_string();
            if v.is_empty() {
                None
            } else {
                Some(v)
            }
        })
    };

    Ok(DocumentMetadata {
        title: get_meta(PdfDocumentMetadataTagType::Title),
        author: get_meta(PdfDocumentMetadataTagType::Author),
        subject: get_meta(PdfDocumentMetadataTagType::Subject),
        creator: get_meta(PdfDocumentMetadataTagType::Creator),
        producer: get_meta(PdfDocumentMetadataTagType::Producer),
        creation_date: get_meta(PdfDocumentMetadataTagType::CreationDate),
        modification_date: get_meta(PdfDocumentMetadataTagType::ModificationDate),
        page_count: pages.len() as usize,
        pdf_version: format!("{:?}", document.version()),
    })
}

/// Map a pdfium open failure to the right diagnosis.
///
/// pdfium reports password problems as a generic error string, so this is
/// a best-effort string match, same as every other pdfium consumer.
fn open_error(path: &Path, password: Option<&str>, e: PdfiumError) -> ProcessError {
    let err_str = format!("{:?}", e);
    if err_str.contains("Password") || err_str.contains("password") {
        if password.is_some() {
            ProcessError::WrongPassword {
                path: path.to_path_buf(),
            }
        } else {
            ProcessError::PasswordRequired {
                path: path.to_path_buf(),
            }
        }
    } else {
        ProcessError::InvalidDocument {
            path: path.to_path_buf(),
            detail: err_str,
        }
    }
}
