//! Aspect-preserving scaling into a target rectangle.
//!
//! The scale factor is `min(max_w / w, max_h / h)` — the largest uniform
//! scale at which the image still fits the box. The factor is deliberately
//! NOT clamped to 1.0: an image smaller than its target cell is scaled up
//! to fill it, so a low-zoom render still fills its sheet.

use image::{imageops::FilterType, DynamicImage};
use tracing::warn;

/// Compute the uniform scale factor that fits `(width, height)` inside
/// `(max_width, max_height)` while preserving aspect ratio.
///
/// May exceed 1.0 (upscaling is permitted).
pub fn fit_scale(width: u32, height: u32, max_width: f32, max_height: f32) -> f32 {
    let width_ratio = max_width / width as f32;
    let height_ratio = max_height / height as f32;
    width_ratio.min(height_ratio)
}

/// Dimensions of `image` after fitting into the target rectangle.
///
/// Both dimensions are floored to whole pixels.
pub fn fitted_dimensions(image: &DynamicImage, max_width: f32, max_height: f32) -> (u32, u32) {
    let scale = fit_scale(image.width(), image.height(), max_width, max_height);
    (
        (image.width() as f32 * scale) as u32,
        (image.height() as f32 * scale) as u32,
    )
}

/// Produce a resized copy of `image` that fits within the target rectangle,
/// using Lanczos3 resampling.
///
/// Degrades gracefully on malformed targets: a non-positive rectangle, or
/// one so small that a dimension floors to zero, yields the *original*
/// image unchanged plus a warning — a single odd bitmap must not abort the
/// batch.
pub fn scale_to_fit(image: &DynamicImage, max_width: f32, max_height: f32) -> DynamicImage {
    if !(max_width > 0.0 && max_height > 0.0) {
        warn!(
            "Degenerate scale target {}x{}; image left at {}x{}",
            max_width,
            max_height,
            image.width(),
            image.height()
        );
        return image.clone();
    }

    let (new_width, new_height) = fitted_dimensions(image, max_width, max_height);
    if new_width == 0 || new_height == 0 {
        warn!(
            "Scale target {}x{} collapses {}x{} image to zero; image left unscaled",
            max_width,
            max_height,
            image.width(),
            image.height()
        );
        return image.clone();
    }

    image.resize_exact(new_width, new_height, FilterType::Lanczos3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn test_image(w: u32, h: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(w, h, Rgb([128, 128, 128])))
    }

    #[test]
    fn downscale_fits_the_box() {
        let img = test_image(400, 200);
        let scaled = scale_to_fit(&img, 100.0, 100.0);
        assert!(scaled.width() <= 100 && scaled.height() <= 100);
        assert_eq!((scaled.width(), scaled.height()), (100, 50));
    }

    #[test]
    fn aspect_ratio_is_preserved() {
        let img = test_image(300, 120);
        let scaled = scale_to_fit(&img, 150.0, 150.0);
        let original_ratio = 300.0 / 120.0;
        let scaled_ratio = scaled.width() as f64 / scaled.height() as f64;
        assert!((original_ratio - scaled_ratio).abs() < 0.05);
    }

    #[test]
    fn upscaling_is_not_clamped() {
        let img = test_image(10, 10);
        let scaled = scale_to_fit(&img, 100.0, 100.0);
        assert_eq!((scaled.width(), scaled.height()), (100, 100));
        assert!(fit_scale(10, 10, 100.0, 100.0) > 1.0);
    }

    #[test]
    fn limiting_axis_wins() {
        assert_eq!(fit_scale(200, 100, 100.0, 100.0), 0.5);
        assert_eq!(fit_scale(100, 200, 100.0, 100.0), 0.5);
    }

    #[test]
    fn degenerate_target_returns_original() {
        let img = test_image(50, 50);
        let scaled = scale_to_fit(&img, 0.0, 100.0);
        assert_eq!((scaled.width(), scaled.height()), (50, 50));
        let scaled = scale_to_fit(&img, -5.0, -5.0);
        assert_eq!((scaled.width(), scaled.height()), (50, 50));
    }

    #[test]
    fn collapsing_target_returns_original() {
        // 0.4pt box floors a 50px axis to 0 — fall back, don't panic.
        let img = test_image(50, 50);
        let scaled = scale_to_fit(&img, 0.4, 0.4);
        assert_eq!((scaled.width(), scaled.height()), (50, 50));
    }

    #[test]
    fn dimensions_are_floored() {
        // 3x2 into a 2x2 box: scale = 2/3, height 1.33 floors to 1.
        let img = test_image(3, 2);
        let (w, h) = fitted_dimensions(&img, 2.0, 2.0);
        assert_eq!((w, h), (2, 1));
    }
}
