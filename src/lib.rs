//! # sixup
//!
//! Rasterize PDF pages, invert their colors, and recompose them into new
//! PDFs — one page per sheet, or packed six-up on landscape A4 in a
//! 2-column × 3-row grid.
//!
//! ## Why this crate?
//!
//! Slide decks and lecture notes are usually dark text on blinding white.
//! For printing handouts (or reading in a dark room) you want the photo
//! negative, six pages to a sheet. Doing that at the vector level is
//! fragile — blend modes, transparency groups, and embedded images all
//! fight naive color remapping. Instead this crate rasterizes each page at
//! high zoom via pdfium, inverts the pixels, and rebuilds clean PDFs from
//! the images.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDFs
//!  │
//!  ├─ 1. Input    validate paths/buffers (%PDF magic, readability)
//!  ├─ 2. Render   rasterize pages via pdfium at zoom× (CPU-bound, spawn_blocking)
//!  ├─ 3. Invert   255 - v per RGB channel (optional)
//!  ├─ 4. Group    one merged unit, or one unit per input file
//!  ├─ 5. Compose  6-up landscape grid or one-per-page, Lanczos-fitted, centered
//!  └─ 6. Output   one finished PDF byte stream per merge unit
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sixup::{process_documents, output_file_name, ProcessConfig};
//! use std::path::PathBuf;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ProcessConfig::default(); // invert, merge, 3x2 grid
//!     let inputs = vec![PathBuf::from("slides.pdf"), PathBuf::from("notes.pdf")];
//!     let output = process_documents(&inputs, &config).await?;
//!     for (i, doc) in output.documents.iter().enumerate() {
//!         std::fs::write(output_file_name(i), &doc.bytes)?;
//!     }
//!     eprintln!("{} pages in {}ms", output.stats.total_pages, output.stats.total_duration_ms);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `sixup` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only
//! deps:
//! ```toml
//! sixup = { version = "0.1", default-features = false }
//! ```
//!
//! ## Guarantees
//!
//! * Page order within a document and document order within a batch are
//!   preserved end-to-end, even with `concurrency > 1`.
//! * Transforms never mutate their input image; every stage produces a new
//!   bitmap.
//! * A fatal error (unopenable input, failed render, failed serialization)
//!   aborts the whole batch — you never receive a partial document.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod process;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{LayoutMode, ProcessConfig, ProcessConfigBuilder};
pub use error::ProcessError;
pub use output::{output_file_name, DocumentMetadata, OutputDocument, ProcessOutput, ProcessStats};
pub use pipeline::input::is_valid_document;
pub use process::{inspect, process_bytes, process_documents, process_documents_sync};
