//! Background matting
//!
//! Reclassifies every pixel of the cropped signature as either background
//! (fully transparent) or ink (fully opaque). The matte is hard: alpha is
//! 0 or 255, never in between, and the decision is a pure function of the
//! pixel's own RGB values. No smoothing and no morphological cleanup, so
//! noisy scans will produce speckled alpha.

use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};

use crate::config::WhiteThreshold;
use crate::error::ExtractError;

/// RGB written under fully transparent pixels. The value is invisible but
/// fixed so output bytes are reproducible.
const TRANSPARENT_FILL: Rgba<u8> = Rgba([255, 255, 255, 0]);

/// Per-pixel background classifier.
///
/// A pixel is background when every channel is strictly greater than its
/// cutoff (all three conditions ANDed). Everything else is ink and keeps
/// its original RGB.
#[derive(Debug, Clone, Copy, Default)]
pub struct BackgroundMatting {
    white_threshold: WhiteThreshold,
}

impl BackgroundMatting {
    /// Matting with the default cutoffs (200 on each channel).
    pub fn new() -> Self {
        Self::default()
    }

    /// Matting with custom per-channel cutoffs.
    pub fn with_thresholds(white_threshold: WhiteThreshold) -> Self {
        Self { white_threshold }
    }

    /// Produce the hard alpha matte for a cropped signature region.
    ///
    /// The output has the same dimensions as the input; the input is not
    /// mutated. Every pixel is classified independently, so the result
    /// does not depend on traversal order.
    pub fn matte(&self, region: &RgbImage) -> RgbaImage {
        let WhiteThreshold { red, green, blue } = self.white_threshold;
        RgbaImage::from_fn(region.width(), region.height(), |x, y| {
            let Rgb([r, g, b]) = *region.get_pixel(x, y);
            if r > red && g > green && b > blue {
                TRANSPARENT_FILL
            } else {
                Rgba([r, g, b, 255])
            }
        })
    }

    /// Matte an image of unverified layout.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::InvalidInput`] unless the image is
    /// three-channel 8-bit RGB.
    pub fn matte_dynamic(&self, region: &DynamicImage) -> Result<RgbaImage, ExtractError> {
        match region {
            DynamicImage::ImageRgb8(rgb) => Ok(self.matte(rgb)),
            other => Err(ExtractError::InvalidInput(format!(
                "unsupported channel count: expected 3, got {}",
                other.color().channel_count()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn one_pixel(r: u8, g: u8, b: u8) -> RgbImage {
        RgbImage::from_pixel(1, 1, Rgb([r, g, b]))
    }

    fn matte_one(r: u8, g: u8, b: u8) -> Rgba<u8> {
        *BackgroundMatting::new().matte(&one_pixel(r, g, b)).get_pixel(0, 0)
    }

    #[test]
    fn test_pure_white_is_transparent() {
        assert_eq!(matte_one(255, 255, 255), Rgba([255, 255, 255, 0]));
    }

    #[test]
    fn test_just_above_cutoff_is_transparent() {
        assert_eq!(matte_one(201, 201, 201), Rgba([255, 255, 255, 0]));
    }

    #[test]
    fn test_exactly_at_cutoff_is_opaque() {
        // The comparison is strictly greater-than, so 200 stays ink.
        assert_eq!(matte_one(200, 200, 200), Rgba([200, 200, 200, 255]));
    }

    #[test]
    fn test_near_black_ink_keeps_its_rgb() {
        assert_eq!(matte_one(10, 10, 10), Rgba([10, 10, 10, 255]));
    }

    #[test]
    fn test_all_channels_must_clear_cutoff() {
        // Two bright channels are not enough; the AND requires all three.
        assert_eq!(matte_one(255, 255, 120), Rgba([255, 255, 120, 255]));
        assert_eq!(matte_one(120, 255, 255), Rgba([120, 255, 255, 255]));
    }

    #[test]
    fn test_output_dimensions_match_input() {
        let region = RgbImage::from_pixel(17, 5, Rgb([30, 30, 30]));
        let out = BackgroundMatting::new().matte(&region);
        assert_eq!(out.dimensions(), (17, 5));
    }

    #[test]
    fn test_custom_thresholds() {
        let matting = BackgroundMatting::with_thresholds(WhiteThreshold::uniform(150));
        let out = matting.matte(&one_pixel(160, 160, 160));
        assert_eq!(*out.get_pixel(0, 0), Rgba([255, 255, 255, 0]));
    }

    #[test]
    fn test_non_rgb_input_is_rejected() {
        let gray = DynamicImage::new_luma8(4, 4);
        let result = BackgroundMatting::new().matte_dynamic(&gray);
        assert!(matches!(result, Err(ExtractError::InvalidInput(_))));

        let rgb = DynamicImage::new_rgb8(4, 4);
        assert!(BackgroundMatting::new().matte_dynamic(&rgb).is_ok());
    }
}
