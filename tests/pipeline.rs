//! Integration tests for the pdfium-free pipeline stages.
//!
//! Everything here runs on synthetic `DynamicImage`s: inversion, fit
//! scaling, grid geometry, grouping, and full document composition. The
//! produced PDFs are re-parsed with `lopdf` to verify structure. Tests
//! that need a real pdfium library live in `tests/e2e.rs`.

use image::{DynamicImage, Rgb, RgbImage};
use sixup::pipeline::compose::{
    self, compose_document, grid_cell, IMAGES_PER_SHEET,
};
use sixup::pipeline::invert::invert_image;
use sixup::pipeline::scale::{fit_scale, scale_to_fit};
use sixup::{output_file_name, LayoutMode, ProcessConfig, ProcessError};

fn page_image(w: u32, h: u32, shade: u8) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(w, h, Rgb([shade, shade, shade])))
}

// ── Inversion ────────────────────────────────────────────────────────────────

#[test]
fn invert_is_an_exact_involution() {
    let mut img = RgbImage::new(16, 16);
    for (x, y, p) in img.enumerate_pixels_mut() {
        p.0 = [(x * 16) as u8, (y * 16) as u8, ((x + y) * 8) as u8];
    }
    let original = DynamicImage::ImageRgb8(img);

    let round_trip = invert_image(&invert_image(&original));
    assert_eq!(
        original.to_rgb8().as_raw(),
        round_trip.to_rgb8().as_raw(),
        "invert(invert(B)) must equal B exactly"
    );
}

// ── Scaling ──────────────────────────────────────────────────────────────────

#[test]
fn true_downscale_never_exceeds_the_box() {
    for (w, h) in [(800, 600), (600, 800), (1000, 1000), (999, 7)] {
        let img = page_image(w, h, 128);
        let scaled = scale_to_fit(&img, 200.0, 200.0);
        assert!(scaled.width() <= 200, "{w}x{h}: width {}", scaled.width());
        assert!(scaled.height() <= 200, "{w}x{h}: height {}", scaled.height());
    }
}

#[test]
fn scaling_preserves_aspect_ratio_within_rounding() {
    for (w, h) in [(640, 480), (480, 640), (297, 210)] {
        let img = page_image(w, h, 128);
        let scaled = scale_to_fit(&img, 150.0, 150.0);
        let before = w as f64 / h as f64;
        let after = scaled.width() as f64 / scaled.height() as f64;
        assert!(
            (before - after).abs() < 0.05,
            "{w}x{h}: ratio {before} became {after}"
        );
    }
}

#[test]
fn upscaling_is_permitted_for_oversized_targets() {
    // The fit scale is deliberately not clamped to 1.0.
    assert!(fit_scale(50, 50, 400.0, 400.0) > 1.0);
    let scaled = scale_to_fit(&page_image(50, 50, 128), 400.0, 400.0);
    assert_eq!((scaled.width(), scaled.height()), (400, 400));
}

// ── Grid geometry ────────────────────────────────────────────────────────────

#[test]
fn six_cells_cover_distinct_positions() {
    let cells: Vec<_> = (0..IMAGES_PER_SHEET).map(grid_cell).collect();
    for i in 0..cells.len() {
        for j in i + 1..cells.len() {
            assert!(
                cells[i] != cells[j],
                "cells {i} and {j} overlap at the same origin"
            );
        }
    }
    // Two distinct columns, three distinct rows.
    let xs: Vec<i64> = cells.iter().map(|c| c.x as i64).collect();
    let ys: Vec<i64> = cells.iter().map(|c| c.y as i64).collect();
    assert_eq!(xs.iter().collect::<std::collections::HashSet<_>>().len(), 2);
    assert_eq!(ys.iter().collect::<std::collections::HashSet<_>>().len(), 3);
}

#[test]
fn cell_order_is_left_to_right_then_top_to_bottom() {
    // Same row: cell 1 right of cell 0. Next row: cell 2 below cell 0.
    assert!(grid_cell(1).x > grid_cell(0).x);
    assert_eq!(grid_cell(1).y, grid_cell(0).y);
    assert_eq!(grid_cell(2).x, grid_cell(0).x);
    assert!(grid_cell(2).y < grid_cell(0).y);
}

// ── Document composition ─────────────────────────────────────────────────────

#[test]
fn seven_pages_merged_grid_gives_one_document_with_two_pages() {
    // Scenario from the contract: 7 pages, grid mode → groups of 6 and 1.
    let images: Vec<_> = (0..7).map(|i| page_image(120, 160, i * 30)).collect();
    let composed = compose_document(&images, LayoutMode::Grid3x2, "merged").unwrap();
    assert_eq!(composed.page_count, 2);

    let parsed = lopdf::Document::load_mem(&composed.bytes).expect("output must be a valid PDF");
    assert_eq!(parsed.get_pages().len(), 2);
}

#[test]
fn grid_chunking_is_ceil_of_sixths() {
    for (pages, expected) in [(1usize, 1usize), (5, 1), (6, 1), (7, 2), (12, 2), (18, 3)] {
        let images: Vec<_> = (0..pages).map(|_| page_image(60, 80, 100)).collect();
        let composed = compose_document(&images, LayoutMode::Grid3x2, "chunks").unwrap();
        assert_eq!(composed.page_count, expected, "{pages} input pages");
    }
}

#[test]
fn original_layout_keeps_one_image_per_page() {
    let images: Vec<_> = (0..4).map(|_| page_image(120, 160, 90)).collect();
    let composed = compose_document(&images, LayoutMode::Original, "plain").unwrap();
    assert_eq!(composed.page_count, 4);

    let parsed = lopdf::Document::load_mem(&composed.bytes).unwrap();
    assert_eq!(parsed.get_pages().len(), 4);
}

#[test]
fn separate_units_of_three_and_four_pages_each_fit_one_sheet() {
    // Scenario: two inputs (3 and 4 pages), merge off, grid mode →
    // two documents with one output page each.
    for pages in [3usize, 4] {
        let images: Vec<_> = (0..pages).map(|_| page_image(100, 140, 60)).collect();
        let composed = compose_document(&images, LayoutMode::Grid3x2, "unit").unwrap();
        assert_eq!(composed.page_count, 1);
        assert!(composed.bytes.starts_with(b"%PDF-"));
    }
}

#[test]
fn grid_output_pages_are_landscape() {
    let images = vec![page_image(100, 140, 50)];
    let composed = compose_document(&images, LayoutMode::Grid3x2, "landscape").unwrap();
    let parsed = lopdf::Document::load_mem(&composed.bytes).unwrap();
    let (_, page_id) = parsed.get_pages().into_iter().next().unwrap();
    let media_box = parsed
        .get_object(page_id)
        .and_then(|o| o.as_dict())
        .and_then(|d| d.get(b"MediaBox"))
        .and_then(|o| o.as_array())
        .expect("page must carry a MediaBox");
    let width = media_box[2].as_float().unwrap();
    let height = media_box[3].as_float().unwrap();
    assert!(width > height, "grid sheet must be landscape: {width}x{height}");
    assert!((width - compose::A4_HEIGHT_PT).abs() < 1.0);
}

// ── Batch surface (no rendering involved) ────────────────────────────────────

#[test]
fn config_rejects_nothing_the_builder_already_clamped() {
    let config = ProcessConfig::builder()
        .zoom(3.0)
        .merge_files(false)
        .concurrency(4)
        .build()
        .unwrap();
    assert_eq!(config.zoom, 3.0);
    assert!(!config.merge_files);
}

#[test]
fn missing_input_file_fails_before_any_work() {
    let config = ProcessConfig::default();
    let err = sixup::process_documents_sync(
        &[std::path::PathBuf::from("/no/such/file.pdf")],
        &config,
    )
    .unwrap_err();
    assert!(matches!(err, ProcessError::FileNotFound { .. }));
}

#[test]
fn non_pdf_bytes_are_diagnosed_without_output() {
    let config = ProcessConfig::default();
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let err = runtime
        .block_on(sixup::process_bytes(&[b"not a pdf at all".to_vec()], &config))
        .unwrap_err();
    assert!(matches!(err, ProcessError::NotAPdf { .. }));
}

#[test]
fn empty_batch_produces_no_documents() {
    let config = ProcessConfig::default();
    let output = sixup::process_documents_sync(&[], &config).unwrap();
    assert!(output.documents.is_empty());
    assert_eq!(output.stats.total_pages, 0);
}

#[test]
fn output_names_follow_the_bundling_contract() {
    let names: Vec<_> = (0..3).map(output_file_name).collect();
    assert_eq!(
        names,
        vec!["processed_pdf_1.pdf", "processed_pdf_2.pdf", "processed_pdf_3.pdf"]
    );
}
