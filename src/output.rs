//! Output types: finished documents, run statistics, document metadata.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The result of a successful processing run.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    /// Finished output documents, one per merge unit, in unit order.
    pub documents: Vec<OutputDocument>,
    /// Timing and counting statistics for the run.
    pub stats: ProcessStats,
}

/// One finished, independently valid PDF document.
///
/// Immutable once built: the assembler serializes each merge unit exactly
/// once and never patches the bytes afterwards.
#[derive(Debug, Clone)]
pub struct OutputDocument {
    /// The serialized PDF.
    pub bytes: Vec<u8>,
    /// Number of composed pages in this document.
    pub page_count: usize,
    /// The input file this unit came from, when merging is disabled.
    /// `None` for the single merged unit.
    pub source: Option<PathBuf>,
}

/// Statistics about a processing run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessStats {
    /// Number of input documents in the batch.
    pub input_documents: usize,
    /// Total pages rasterized across all inputs.
    pub total_pages: usize,
    /// Number of output documents produced.
    pub output_documents: usize,
    /// Wall-clock time spent rasterizing, in milliseconds.
    pub render_duration_ms: u64,
    /// Wall-clock time spent composing and serializing, in milliseconds.
    pub compose_duration_ms: u64,
    /// Total wall-clock time for the run, in milliseconds.
    pub total_duration_ms: u64,
}

/// Descriptive metadata extracted from a PDF, for display purposes.
///
/// Not consumed by the pipeline itself; exposed for front ends that want to
/// show what they are about to process.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub creation_date: Option<String>,
    pub modification_date: Option<String>,
    pub page_count: usize,
    pub pdf_version: String,
}

/// Suggested file name for the output at `index` (0-based) in a batch.
///
/// This is the naming contract consumed by archive bundlers and download
/// front ends: `processed_pdf_1.pdf`, `processed_pdf_2.pdf`, …
pub fn output_file_name(index: usize) -> String {
    format!("processed_pdf_{}.pdf", index + 1)
}
