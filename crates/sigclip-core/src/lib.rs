//! Signature extraction from rendered document pages
//!
//! Given a decoded color page image, this crate locates the region most
//! likely to contain a handwritten signature, crops it, and removes the
//! near-white background so the mark can be composited elsewhere.
//!
//! Two components run in strict sequence on one in-memory image:
//! - [`RegionLocator`]: page image → binary ink mask → bounding box of
//!   the largest connected dark region, plus a color crop of it
//! - [`BackgroundMatting`]: cropped region → RGBA image with a hard
//!   alpha matte (background transparent, ink opaque)
//!
//! Rasterization and file I/O live outside this crate; callers hand in a
//! decoded [`image::RgbImage`] and receive an [`image::RgbaImage`] back.
//! Every stage produces a fresh buffer, so concurrent extraction across
//! documents needs no locking.
//!
//! ## Example
//!
//! ```rust
//! use sigclip_core::{extract_signature, ExtractConfig};
//! use image::{Rgb, RgbImage};
//!
//! let mut page = RgbImage::from_pixel(100, 100, Rgb([255, 255, 255]));
//! for y in 40..60 {
//!     for x in 40..60 {
//!         page.put_pixel(x, y, Rgb([0, 0, 0]));
//!     }
//! }
//!
//! let extraction = extract_signature(&page, &ExtractConfig::default())?;
//! assert_eq!(extraction.image.dimensions(), (20, 20));
//! # Ok::<(), sigclip_core::ExtractError>(())
//! ```

use image::{RgbImage, RgbaImage};

pub mod config;
pub mod error;
pub mod locate;
pub mod matte;

pub use config::{ExtractConfig, WhiteThreshold};
pub use error::ExtractError;
pub use locate::{BoundingBox, LocatedRegion, RegionLocator};
pub use matte::BackgroundMatting;

/// A completed extraction: where the signature was found on the page and
/// the matted RGBA image, sized exactly to the bounding box.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub bounds: BoundingBox,
    pub image: RgbaImage,
}

/// Run the full pipeline on one page image.
///
/// Either both a bounding box and a matted image are produced, or an
/// error is returned and nothing is emitted — there is no partial
/// success.
///
/// # Errors
///
/// Returns [`ExtractError::InvalidInput`] for a zero-sized page and
/// [`ExtractError::NoRegionFound`] if the page has no dark regions at
/// the configured threshold.
pub fn extract_signature(
    page: &RgbImage,
    config: &ExtractConfig,
) -> Result<Extraction, ExtractError> {
    let located = RegionLocator::with_threshold(config.ink_threshold).locate(page)?;
    let matting = BackgroundMatting::with_thresholds(config.white_threshold);
    let image = matting.matte(&located.crop);
    Ok(Extraction {
        bounds: located.bounds,
        image,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba};

    fn page_with_square(left: u32, top: u32, side: u32) -> RgbImage {
        let mut page = RgbImage::from_pixel(100, 100, Rgb([255, 255, 255]));
        for y in top..top + side {
            for x in left..left + side {
                page.put_pixel(x, y, Rgb([0, 0, 0]));
            }
        }
        page
    }

    #[test]
    fn test_end_to_end_black_square() {
        let page = page_with_square(40, 40, 20);
        let extraction = extract_signature(&page, &ExtractConfig::default()).unwrap();

        assert_eq!(
            extraction.bounds,
            BoundingBox {
                left: 40,
                top: 40,
                width: 20,
                height: 20
            }
        );
        assert_eq!(extraction.image.dimensions(), (20, 20));
        for p in extraction.image.pixels() {
            assert_eq!(*p, Rgba([0, 0, 0, 255]));
        }
    }

    #[test]
    fn test_blank_page_produces_no_output() {
        let page = RgbImage::from_pixel(100, 100, Rgb([255, 255, 255]));
        let result = extract_signature(&page, &ExtractConfig::default());
        assert!(matches!(result, Err(ExtractError::NoRegionFound(_))));
    }

    #[test]
    fn test_loose_scrawl_is_matted_around_the_ink() {
        // A diagonal stroke: the crop spans its bounding box, the white
        // between the ink and the box corners goes transparent.
        let mut page = RgbImage::from_pixel(100, 100, Rgb([255, 255, 255]));
        for i in 0..30 {
            page.put_pixel(20 + i, 20 + i, Rgb([20, 20, 20]));
        }

        let extraction = extract_signature(&page, &ExtractConfig::default()).unwrap();
        assert_eq!(extraction.image.dimensions(), (30, 30));
        assert_eq!(*extraction.image.get_pixel(0, 0), Rgba([20, 20, 20, 255]));
        assert_eq!(*extraction.image.get_pixel(29, 0), Rgba([255, 255, 255, 0]));
    }

    #[test]
    fn test_config_thresholds_are_honored() {
        // Light-gray mark invisible at the default ink threshold.
        let mut page = RgbImage::from_pixel(50, 50, Rgb([255, 255, 255]));
        for x in 10..20 {
            page.put_pixel(x, 25, Rgb([210, 210, 210]));
        }

        let default = ExtractConfig::default();
        assert!(extract_signature(&page, &default).is_err());

        let relaxed = ExtractConfig {
            ink_threshold: 230,
            white_threshold: WhiteThreshold::uniform(230),
        };
        let extraction = extract_signature(&page, &relaxed).unwrap();
        assert_eq!(extraction.bounds.width, 10);
        // At the relaxed white threshold the gray mark stays opaque.
        assert_eq!(
            *extraction.image.get_pixel(0, 0),
            Rgba([210, 210, 210, 255])
        );
    }
}
