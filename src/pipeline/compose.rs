//! Page composition: place scaled page images onto new A4 output pages.
//!
//! Two modes, chosen once per assembly run:
//!
//! * **Single-image**: portrait A4, one image per page, scaled to the page
//!   minus a 20 pt margin and centered both ways.
//! * **Grid**: landscape A4 partitioned into a 2-column × 3-row grid of six
//!   equal cells. Cell `i` maps to `col = i % 2`, `row = i / 2`, filled
//!   left-to-right, top-to-bottom. Each image is scaled to its cell minus a
//!   10 pt margin and centered within the cell. A short group leaves the
//!   trailing cells empty.
//!
//! Geometry is in PDF points with the origin at the bottom-left, so a cell
//! in visual row `r` (counted from the top) starts at
//! `page_height - (r + 1) * cell_height`.
//!
//! Images are PNG-encoded (lossless — these are rasterized text pages) and
//! embedded as image XObjects, one `Op::UseXobject` per placement.

use crate::config::LayoutMode;
use crate::pipeline::scale;
use ::image::DynamicImage;
use printpdf::*;
use std::io::Cursor;
use tracing::debug;

/// A4 portrait width in PDF points.
pub const A4_WIDTH_PT: f32 = 595.276;
/// A4 portrait height in PDF points.
pub const A4_HEIGHT_PT: f32 = 841.89;

/// Margin around the image in single-image mode, per side.
pub const SINGLE_MARGIN_PT: f32 = 20.0;
/// Margin around the image inside each grid cell, per side.
pub const GRID_MARGIN_PT: f32 = 10.0;

/// Grid columns on a landscape sheet.
pub const GRID_COLS: usize = 2;
/// Grid rows on a landscape sheet.
pub const GRID_ROWS: usize = 3;
/// Images per grid-mode output page.
pub const IMAGES_PER_SHEET: usize = GRID_COLS * GRID_ROWS;

/// A placement rectangle in page coordinates (bottom-left origin, points).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// The rectangle of grid cell `index` (0–5) on a landscape A4 sheet.
pub fn grid_cell(index: usize) -> Rect {
    debug_assert!(index < IMAGES_PER_SHEET);
    // Landscape: the sheet is A4 rotated, so width and height swap.
    let cell_width = A4_HEIGHT_PT / GRID_COLS as f32;
    let cell_height = A4_WIDTH_PT / GRID_ROWS as f32;

    let col = index % GRID_COLS;
    let row = index / GRID_COLS;

    Rect {
        x: col as f32 * cell_width,
        y: A4_WIDTH_PT - (row as f32 + 1.0) * cell_height,
        width: cell_width,
        height: cell_height,
    }
}

/// Bottom-left position that centers a `width × height` image inside
/// `rect`.
pub fn centered_in(rect: Rect, width: u32, height: u32) -> (f32, f32) {
    (
        rect.x + (rect.width - width as f32) / 2.0,
        rect.y + (rect.height - height as f32) / 2.0,
    )
}

/// A fully composed, serialized output document.
#[derive(Debug, Clone)]
pub struct ComposedDocument {
    /// The finished PDF bytes.
    pub bytes: Vec<u8>,
    /// Number of output pages.
    pub page_count: usize,
}

/// Compose an ordered sequence of page images into one finished PDF.
///
/// Grid mode chunks the sequence into consecutive groups of up to six, one
/// output page per group; single-image mode emits one output page per
/// image. The error value is the serialization detail; the caller attaches
/// merge-unit context.
pub fn compose_document(
    images: &[DynamicImage],
    layout: LayoutMode,
    title: &str,
) -> Result<ComposedDocument, String> {
    let mut doc = PdfDocument::new(title);
    let mut pages = Vec::new();

    match layout {
        LayoutMode::Grid3x2 => {
            for group in images.chunks(IMAGES_PER_SHEET) {
                pages.push(compose_grid_page(&mut doc, group)?);
            }
        }
        LayoutMode::Original => {
            for image in images {
                pages.push(compose_single_page(&mut doc, image)?);
            }
        }
    }

    let page_count = pages.len();
    doc.pages = pages;

    let mut warnings = Vec::new();
    let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
    if !warnings.is_empty() {
        debug!("printpdf reported {} warning(s) for '{}'", warnings.len(), title);
    }

    Ok(ComposedDocument { bytes, page_count })
}

/// Compose one landscape grid page from a group of up to six images.
///
/// Error values are the serialization detail; the caller attaches the
/// merge-unit context.
pub fn compose_grid_page(
    doc: &mut PdfDocument,
    group: &[DynamicImage],
) -> Result<PdfPage, String> {
    let mut ops = Vec::with_capacity(group.len());

    for (i, image) in group.iter().take(IMAGES_PER_SHEET).enumerate() {
        let cell = grid_cell(i);
        let fit_width = cell.width - 2.0 * GRID_MARGIN_PT;
        let fit_height = cell.height - 2.0 * GRID_MARGIN_PT;

        let scaled = scale::scale_to_fit(image, fit_width, fit_height);
        let (x, y) = centered_in(cell, scaled.width(), scaled.height());
        ops.push(place_image(doc, &scaled, x, y)?);
        debug!(
            "Placed image {} at ({:.1}, {:.1}) pt, {}x{} px",
            i,
            x,
            y,
            scaled.width(),
            scaled.height()
        );
    }

    // Landscape sheet: A4 with the axes swapped.
    Ok(blank_page(A4_HEIGHT_PT, A4_WIDTH_PT, ops))
}

/// Compose one portrait page holding a single centered image.
pub fn compose_single_page(
    doc: &mut PdfDocument,
    image: &DynamicImage,
) -> Result<PdfPage, String> {
    let page = Rect {
        x: 0.0,
        y: 0.0,
        width: A4_WIDTH_PT,
        height: A4_HEIGHT_PT,
    };
    let fit_width = page.width - 2.0 * SINGLE_MARGIN_PT;
    let fit_height = page.height - 2.0 * SINGLE_MARGIN_PT;

    let scaled = scale::scale_to_fit(image, fit_width, fit_height);
    let (x, y) = centered_in(page, scaled.width(), scaled.height());
    let op = place_image(doc, &scaled, x, y)?;

    Ok(blank_page(A4_WIDTH_PT, A4_HEIGHT_PT, vec![op]))
}

/// Register `image` with the document and return the op that draws it with
/// its bottom-left corner at `(x, y)` points, one pixel per point.
fn place_image(
    doc: &mut PdfDocument,
    image: &DynamicImage,
    x: f32,
    y: f32,
) -> Result<Op, String> {
    let mut png = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut png), ::image::ImageFormat::Png)
        .map_err(|e| format!("PNG encode: {e}"))?;

    let mut warnings = Vec::new();
    let raw = RawImage::decode_from_bytes(&png, &mut warnings)
        .map_err(|e| format!("image decode: {e}"))?;
    let image_id = doc.add_image(&raw);

    Ok(Op::UseXobject {
        id: image_id,
        transform: XObjectTransform {
            translate_x: Some(Pt(x)),
            translate_y: Some(Pt(y)),
            // 72 dpi makes the XObject's native size one point per pixel;
            // the image was already resized to its target in pixels.
            dpi: Some(72.0),
            ..Default::default()
        },
    })
}

/// A page of the given size with the given content ops.
fn blank_page(width_pt: f32, height_pt: f32, ops: Vec<Op>) -> PdfPage {
    let bounds = printpdf::Rect {
        x: Pt(0.0),
        y: Pt(0.0),
        width: Pt(width_pt),
        height: Pt(height_pt),
    };
    PdfPage {
        media_box: bounds.clone(),
        trim_box: bounds.clone(),
        crop_box: bounds,
        ops,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::image::{Rgb, RgbImage};

    fn test_image(w: u32, h: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(w, h, Rgb([200, 10, 10])))
    }

    #[test]
    fn grid_fills_left_to_right_top_to_bottom() {
        let cell_w = A4_HEIGHT_PT / 2.0;
        let cell_h = A4_WIDTH_PT / 3.0;

        // Cell 0: top-left. Cell 1: top-right. Cell 2: second row left.
        let c0 = grid_cell(0);
        assert_eq!(c0.x, 0.0);
        assert!((c0.y - (A4_WIDTH_PT - cell_h)).abs() < 1e-3);

        let c1 = grid_cell(1);
        assert!((c1.x - cell_w).abs() < 1e-3);
        assert_eq!(c1.y, c0.y);

        let c2 = grid_cell(2);
        assert_eq!(c2.x, 0.0);
        assert!((c2.y - (A4_WIDTH_PT - 2.0 * cell_h)).abs() < 1e-3);

        // Cell 5: bottom-right, flush with the page bottom.
        let c5 = grid_cell(5);
        assert!((c5.x - cell_w).abs() < 1e-3);
        assert!(c5.y.abs() < 1e-3);
    }

    #[test]
    fn cells_tile_the_sheet_exactly() {
        let c = grid_cell(0);
        assert!((c.width * GRID_COLS as f32 - A4_HEIGHT_PT).abs() < 1e-3);
        assert!((c.height * GRID_ROWS as f32 - A4_WIDTH_PT).abs() < 1e-3);
    }

    #[test]
    fn centering_is_symmetric() {
        let rect = Rect {
            x: 100.0,
            y: 50.0,
            width: 200.0,
            height: 100.0,
        };
        let (x, y) = centered_in(rect, 100, 40);
        assert_eq!(x, 150.0);
        assert_eq!(y, 80.0);
        // Equal slack on both sides.
        assert_eq!(x - rect.x, (rect.x + rect.width) - (x + 100.0));
    }

    #[test]
    fn grid_page_has_one_op_per_image() {
        let mut doc = PdfDocument::new("test");
        let group: Vec<DynamicImage> = (0..4).map(|_| test_image(40, 30)).collect();
        let page = compose_grid_page(&mut doc, &group).unwrap();
        assert_eq!(page.ops.len(), 4);
        // Landscape media box.
        assert!(page.media_box.width.0 > page.media_box.height.0);
    }

    #[test]
    fn oversized_group_is_truncated_to_six() {
        let mut doc = PdfDocument::new("test");
        let group: Vec<DynamicImage> = (0..9).map(|_| test_image(20, 20)).collect();
        let page = compose_grid_page(&mut doc, &group).unwrap();
        assert_eq!(page.ops.len(), IMAGES_PER_SHEET);
    }

    #[test]
    fn composed_document_round_trips_through_a_parser() {
        let images: Vec<DynamicImage> = (0..7).map(|_| test_image(60, 80)).collect();
        let composed = compose_document(&images, LayoutMode::Grid3x2, "seven").unwrap();
        assert!(composed.bytes.starts_with(b"%PDF-"));
        assert_eq!(composed.page_count, 2);

        let parsed = lopdf::Document::load_mem(&composed.bytes).unwrap();
        assert_eq!(parsed.get_pages().len(), 2);
    }

    #[test]
    fn empty_sequence_yields_zero_pages() {
        let composed = compose_document(&[], LayoutMode::Grid3x2, "empty").unwrap();
        assert_eq!(composed.page_count, 0);
    }

    #[test]
    fn single_page_is_portrait_with_one_op() {
        let mut doc = PdfDocument::new("test");
        let page = compose_single_page(&mut doc, &test_image(300, 500)).unwrap();
        assert_eq!(page.ops.len(), 1);
        assert!(page.media_box.height.0 > page.media_box.width.0);
    }
}
