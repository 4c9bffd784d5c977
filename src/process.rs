//! Batch orchestration: rasterize → invert → group → compose → serialize.
//!
//! This is the eager, whole-batch API: all inputs are validated up front,
//! every page is rasterized and transformed in memory, and the finished
//! output documents are returned together. There is no partial result — a
//! fatal error anywhere aborts the run with `Err`, so callers never receive
//! a document that is missing pages.
//!
//! Ordering is the load-bearing invariant. The combined page sequence is
//! the concatenation of each input's pages in input order, grid groups are
//! consecutive chunks of six, and merge units are emitted in the order they
//! were determined. Concurrent rasterization (`concurrency > 1`) uses an
//! *ordered* buffered stream, so the result is identical to a sequential
//! run regardless of which document finishes first.

use crate::config::{LayoutMode, ProcessConfig};
use crate::error::ProcessError;
use crate::output::{DocumentMetadata, OutputDocument, ProcessOutput, ProcessStats};
use crate::pipeline::{compose, input, invert, render};
use futures::stream::{self, StreamExt, TryStreamExt};
use image::DynamicImage;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// One logical group of page images destined for a single output document.
struct MergeUnit {
    /// Document title and error-context label.
    label: String,
    /// Originating input file, when merging is disabled.
    source: Option<PathBuf>,
    images: Vec<DynamicImage>,
}

/// Process a batch of PDF files into recomposed output documents.
///
/// This is the primary entry point for the library.
///
/// # Errors
/// Returns `Err(ProcessError)` for any fatal condition: an input that does
/// not exist or cannot be opened as a PDF, a page that fails to rasterize,
/// or a merge unit that fails to serialize. No output is returned in that
/// case — the run never yields a partial batch.
pub async fn process_documents(
    inputs: &[PathBuf],
    config: &ProcessConfig,
) -> Result<ProcessOutput, ProcessError> {
    let resolved = inputs
        .iter()
        .map(|p| input::resolve_local(p))
        .collect::<Result<Vec<_>, _>>()?;
    process_resolved(&resolved, config).await
}

/// Process a batch of in-memory PDF buffers.
///
/// Buffers are spilled to managed temp files (pdfium opens paths, not byte
/// streams) which are cleaned up when this call returns, on success and
/// failure alike.
pub async fn process_bytes(
    buffers: &[Vec<u8>],
    config: &ProcessConfig,
) -> Result<ProcessOutput, ProcessError> {
    let resolved = buffers
        .iter()
        .map(|b| input::resolve_bytes(b))
        .collect::<Result<Vec<_>, _>>()?;
    process_resolved(&resolved, config).await
}

/// Synchronous wrapper around [`process_documents`].
///
/// Creates a temporary tokio runtime internally.
pub fn process_documents_sync(
    inputs: &[PathBuf],
    config: &ProcessConfig,
) -> Result<ProcessOutput, ProcessError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| ProcessError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(process_documents(inputs, config))
}

/// Extract PDF metadata without processing content.
pub async fn inspect(path: impl AsRef<Path>) -> Result<DocumentMetadata, ProcessError> {
    let resolved = input::resolve_local(path.as_ref())?;
    render::extract_metadata(resolved.path(), None).await
}

// ── Internal pipeline ────────────────────────────────────────────────────

async fn process_resolved(
    resolved: &[input::ResolvedInput],
    config: &ProcessConfig,
) -> Result<ProcessOutput, ProcessError> {
    let total_start = Instant::now();
    info!(
        "Starting batch: {} input(s), invert={}, merge={}, layout={:?}",
        resolved.len(),
        config.invert_colors,
        config.merge_files,
        config.layout
    );

    if resolved.is_empty() {
        return Ok(ProcessOutput {
            documents: Vec::new(),
            stats: ProcessStats::default(),
        });
    }

    // ── Rasterize every input, in input order ────────────────────────────
    let render_start = Instant::now();
    let per_input: Vec<Vec<DynamicImage>> = stream::iter(resolved.iter().map(|r| {
        let path = r.path().to_path_buf();
        let zoom = config.zoom;
        let password = config.password.clone();
        async move { render::render_document(&path, zoom, password.as_deref()).await }
    }))
    .buffered(config.concurrency)
    .try_collect()
    .await?;
    let render_duration_ms = render_start.elapsed().as_millis() as u64;

    let total_pages: usize = per_input.iter().map(|pages| pages.len()).sum();
    info!(
        "Rasterized {} pages from {} input(s) in {}ms",
        total_pages,
        per_input.len(),
        render_duration_ms
    );

    // ── Invert ───────────────────────────────────────────────────────────
    let per_input: Vec<Vec<DynamicImage>> = if config.invert_colors {
        per_input
            .into_iter()
            .map(|pages| pages.iter().map(invert::invert_image).collect())
            .collect()
    } else {
        per_input
    };

    // ── Determine merge units ────────────────────────────────────────────
    let units = build_merge_units(resolved, per_input, config.merge_files);

    // ── Compose and serialize each unit ──────────────────────────────────
    let compose_start = Instant::now();
    let layout = config.layout;
    let mut documents = Vec::with_capacity(units.len());
    for unit in units {
        let document = tokio::task::spawn_blocking(move || serialize_unit(unit, layout))
            .await
            .map_err(|e| ProcessError::Internal(format!("Compose task panicked: {}", e)))??;
        info!(
            "Serialized '{}': {} page(s), {} bytes",
            document
                .source
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "merged".into()),
            document.page_count,
            document.bytes.len()
        );
        documents.push(document);
    }
    let compose_duration_ms = compose_start.elapsed().as_millis() as u64;

    let stats = ProcessStats {
        input_documents: resolved.len(),
        total_pages,
        output_documents: documents.len(),
        render_duration_ms,
        compose_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };

    info!(
        "Batch complete: {} output document(s), {}ms total",
        stats.output_documents, stats.total_duration_ms
    );

    Ok(ProcessOutput { documents, stats })
}

/// Group per-input page sequences into merge units.
///
/// Merge on: one unit holding the whole combined sequence, input order then
/// page order. Merge off: one unit per input, each with exactly that
/// input's pages.
fn build_merge_units(
    resolved: &[input::ResolvedInput],
    per_input: Vec<Vec<DynamicImage>>,
    merge_files: bool,
) -> Vec<MergeUnit> {
    if merge_files {
        let images: Vec<DynamicImage> = per_input.into_iter().flatten().collect();
        vec![MergeUnit {
            label: "merged".to_string(),
            source: None,
            images,
        }]
    } else {
        resolved
            .iter()
            .zip(per_input)
            .map(|(r, images)| MergeUnit {
                label: r
                    .path()
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "document".to_string()),
                source: Some(r.path().to_path_buf()),
                images,
            })
            .collect()
    }
}

/// Compose a unit's pages and serialize them to PDF bytes.
fn serialize_unit(unit: MergeUnit, layout: LayoutMode) -> Result<OutputDocument, ProcessError> {
    let composed =
        compose::compose_document(&unit.images, layout, &unit.label).map_err(|detail| {
            ProcessError::SerializationFailed {
                unit: unit.label.clone(),
                detail,
            }
        })?;

    Ok(OutputDocument {
        bytes: composed.bytes,
        page_count: composed.page_count,
        source: unit.source,
    })
}
