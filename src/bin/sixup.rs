//! CLI binary for sixup.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ProcessConfig`, runs the batch, and writes the finished PDFs.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use sixup::{
    inspect, output_file_name, process_documents, LayoutMode, ProcessConfig,
};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Invert colors and pack all inputs 6-up into one landscape PDF
  sixup slides.pdf notes.pdf

  # One output per input file, written to ./out
  sixup --no-merge -o out lecture1.pdf lecture2.pdf

  # Keep original colors, one page per sheet
  sixup --no-invert --layout original scan.pdf

  # Lower rasterization zoom for faster, smaller output
  sixup --zoom 2 slides.pdf

  # Encrypted input
  sixup --password hunter2 secret.pdf

  # Inspect PDF metadata, no processing
  sixup --inspect-only document.pdf
  sixup --inspect-only --json document.pdf

PDFIUM:
  Rendering uses the pdfium shared library. If it is not on the default
  search path, point PDFIUM_DYNAMIC_LIB_PATH at the directory containing
  libpdfium.
"#;

/// Invert PDF colors and recompose pages six-up on landscape sheets.
#[derive(Parser, Debug)]
#[command(
    name = "sixup",
    version,
    about = "Invert PDF colors and recompose pages six-up on landscape sheets",
    long_about = "Rasterize one or more PDFs at high zoom, photometrically invert the page \
images, and rebuild them as new PDFs — either one image per page or packed six per sheet \
in a 2-column × 3-row landscape grid.",
    arg_required_else_help = true,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Input PDF files, processed in the order given.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Directory for the output PDFs.
    #[arg(short, long, env = "SIXUP_OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Keep original colors (skip the inversion pass).
    #[arg(long, env = "SIXUP_NO_INVERT")]
    no_invert: bool,

    /// One output PDF per input file instead of a single merged PDF.
    #[arg(long, env = "SIXUP_NO_MERGE")]
    no_merge: bool,

    /// Page layout for the output.
    #[arg(long, env = "SIXUP_LAYOUT", value_enum, default_value = "grid")]
    layout: LayoutArg,

    /// Rasterization zoom factor (1.0–8.0).
    #[arg(long, env = "SIXUP_ZOOM", default_value_t = 4.0)]
    zoom: f32,

    /// PDF user password for encrypted inputs.
    #[arg(long, env = "SIXUP_PASSWORD")]
    password: Option<String>,

    /// Number of input documents rasterized concurrently.
    #[arg(short, long, env = "SIXUP_CONCURRENCY", default_value_t = 1)]
    concurrency: usize,

    /// Print PDF metadata only, no processing.
    #[arg(long)]
    inspect_only: bool,

    /// Structured JSON output for --inspect-only.
    #[arg(long, env = "SIXUP_JSON")]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "SIXUP_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "SIXUP_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum LayoutArg {
    /// 2×3 landscape grid, six pages per sheet.
    Grid,
    /// One page image per output page.
    Original,
}

impl From<LayoutArg> for LayoutMode {
    fn from(v: LayoutArg) -> Self {
        match v {
            LayoutArg::Grid => LayoutMode::Grid3x2,
            LayoutArg::Original => LayoutMode::Original,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Inspect-only mode ────────────────────────────────────────────────
    if cli.inspect_only {
        for input in &cli.inputs {
            let meta = inspect(input)
                .await
                .with_context(|| format!("Failed to inspect {}", input.display()))?;
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&meta).context("Failed to serialize metadata")?
                );
            } else {
                println!("File:         {}", input.display());
                println!("Pages:        {}", meta.page_count);
                println!("PDF version:  {}", meta.pdf_version);
                println!("Title:        {}", meta.title.as_deref().unwrap_or("—"));
                println!("Author:       {}", meta.author.as_deref().unwrap_or("—"));
                println!("Creator:      {}", meta.creator.as_deref().unwrap_or("—"));
                println!("Producer:     {}", meta.producer.as_deref().unwrap_or("—"));
                println!(
                    "Created:      {}",
                    meta.creation_date.as_deref().unwrap_or("—")
                );
                println!(
                    "Modified:     {}",
                    meta.modification_date.as_deref().unwrap_or("—")
                );
                println!();
            }
        }
        return Ok(());
    }

    // ── Build config ─────────────────────────────────────────────────────
    let mut builder = ProcessConfig::builder()
        .zoom(cli.zoom)
        .invert_colors(!cli.no_invert)
        .merge_files(!cli.no_merge)
        .layout(cli.layout.clone().into())
        .concurrency(cli.concurrency);
    if let Some(ref pwd) = cli.password {
        builder = builder.password(pwd.clone());
    }
    let config = builder.build().context("Invalid configuration")?;

    // ── Run the batch ────────────────────────────────────────────────────
    let spinner = if cli.quiet {
        None
    } else {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(format!("Processing {} input file(s)…", cli.inputs.len()));
        bar.enable_steady_tick(Duration::from_millis(80));
        Some(bar)
    };

    let result = process_documents(&cli.inputs, &config).await;

    if let Some(ref bar) = spinner {
        bar.finish_and_clear();
    }
    let output = result.context("Processing failed")?;

    // ── Write outputs atomically (temp file + rename) ────────────────────
    tokio::fs::create_dir_all(&cli.output_dir)
        .await
        .with_context(|| format!("Failed to create {}", cli.output_dir.display()))?;

    for (i, doc) in output.documents.iter().enumerate() {
        let path = cli.output_dir.join(output_file_name(i));
        let tmp_path = path.with_extension("pdf.tmp");
        tokio::fs::write(&tmp_path, &doc.bytes)
            .await
            .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
        tokio::fs::rename(&tmp_path, &path)
            .await
            .with_context(|| format!("Failed to rename into {}", path.display()))?;

        if !cli.quiet {
            eprintln!(
                "  {} {}  {} pages  {}",
                green("✓"),
                path.display(),
                doc.page_count,
                dim(&format_size(doc.bytes.len())),
            );
        }
    }

    if !cli.quiet {
        eprintln!(
            "{} {} page(s) from {} input(s) → {} output(s) in {}",
            green("✔"),
            bold(&output.stats.total_pages.to_string()),
            output.stats.input_documents,
            output.stats.output_documents,
            dim(&format!("{}ms", output.stats.total_duration_ms)),
        );
    }

    Ok(())
}

/// Human-readable byte count (1024-based).
fn format_size(bytes: usize) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{size:.1} {}", UNITS[unit])
    }
}
