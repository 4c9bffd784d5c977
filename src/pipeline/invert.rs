//! Color inversion: photometric negation of every RGB channel.
//!
//! Black text on white paper becomes white text on black paper — the whole
//! point of the pipeline for people reading slide handouts in dark rooms.
//! Images are normalized to 3-channel RGB first, so grayscale and RGBA
//! sources (pdfium renders with an alpha channel) invert identically.

use image::DynamicImage;

/// Produce a color-inverted copy of an image.
///
/// Channel value `v` becomes `255 - v` after conversion to RGB8. Always
/// returns a new image; the input is never mutated, so callers holding the
/// original for another placement path keep an untouched copy.
pub fn invert_image(image: &DynamicImage) -> DynamicImage {
    // to_rgb8 both normalizes the channel layout and copies the pixels.
    let mut rgb = image.to_rgb8();
    for pixel in rgb.pixels_mut() {
        pixel.0 = [255 - pixel.0[0], 255 - pixel.0[1], 255 - pixel.0[2]];
    }
    DynamicImage::ImageRgb8(rgb)
}
