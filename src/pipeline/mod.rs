//! Pipeline stages for PDF recomposition.
//!
//! Each submodule implements exactly one transformation step.
//! Keeping stages separate makes each independently testable and lets us
//! swap implementations (e.g. switch rendering backend) without touching
//! other stages.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ render ──▶ invert ──▶ scale ──▶ compose
//! (paths)   (pdfium)   (255-v)   (Lanczos)  (printpdf pages)
//! ```
//!
//! 1. [`input`]   — resolve and validate the user-supplied paths or byte
//!    buffers
//! 2. [`render`]  — rasterize every page; runs in `spawn_blocking` because
//!    pdfium is not async-safe
//! 3. [`invert`]  — photometric RGB inversion, one new image per input image
//! 4. [`scale`]   — aspect-preserving fit into a target rectangle
//! 5. [`compose`] — place scaled images onto new A4 pages, one per bitmap
//!    or six per landscape sheet
//!
//! Stages 3 and 4 are pure image-to-image functions with a
//! degrade-gracefully contract: on malformed input they return the original
//! image and log a warning instead of failing the batch.

pub mod compose;
pub mod input;
pub mod invert;
pub mod render;
pub mod scale;
