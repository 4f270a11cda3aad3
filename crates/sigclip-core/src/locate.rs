//! Signature region detection
//!
//! Finds the bounding box of the signature in four fixed steps:
//! 1. Luminance-weighted grayscale conversion
//! 2. Inverse binary threshold (dark ink becomes foreground)
//! 3. Connected-region extraction over the foreground mask
//! 4. Selection of the region with the largest bounding-box area
//!
//! Regions are ranked by bounding-box area (width × height), not by
//! foreground pixel count. A large scrawled signature with sparse ink
//! outranks a small dense blob such as a stamp. The flip side is that any
//! large sparse marking (a ruled line, a long smudge) can win instead;
//! callers relying on the ranking must keep that in mind.

use image::{imageops, GrayImage, RgbImage};
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_INK_THRESHOLD;
use crate::error::ExtractError;

/// Axis-aligned rectangle in pixel coordinates, fully inside the image it
/// was computed from. `width` and `height` are always non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    /// Bounding-box area in pixels (width × height).
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// One past the rightmost column.
    pub fn right(&self) -> u32 {
        self.left + self.width
    }

    /// One past the bottommost row.
    pub fn bottom(&self) -> u32 {
        self.top + self.height
    }
}

/// Result of region detection: where the signature is, plus an
/// independent color copy of that rectangle.
#[derive(Debug, Clone)]
pub struct LocatedRegion {
    pub bounds: BoundingBox,
    pub crop: RgbImage,
}

/// Locates the largest connected dark region on a page.
#[derive(Debug, Clone, Copy)]
pub struct RegionLocator {
    ink_threshold: u8,
}

impl Default for RegionLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl RegionLocator {
    /// Locator with the default ink threshold (200).
    pub fn new() -> Self {
        Self {
            ink_threshold: DEFAULT_INK_THRESHOLD,
        }
    }

    /// Locator with a custom grayscale cutoff. Pixels with intensity
    /// strictly below the cutoff are treated as ink.
    pub fn with_threshold(ink_threshold: u8) -> Self {
        Self { ink_threshold }
    }

    /// Find the signature region on a page image.
    ///
    /// Returns the bounding box of the largest connected dark region and
    /// a cropped copy of the original color pixels inside it. The crop is
    /// a new buffer, never a view into `page`.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::InvalidInput`] for a zero-sized page and
    /// [`ExtractError::NoRegionFound`] if the thresholded mask contains
    /// no foreground regions (e.g. a blank page).
    pub fn locate(&self, page: &RgbImage) -> Result<LocatedRegion, ExtractError> {
        if page.width() == 0 || page.height() == 0 {
            return Err(ExtractError::InvalidInput(format!(
                "empty image ({}x{} page)",
                page.width(),
                page.height()
            )));
        }

        let gray = imageops::grayscale(page);
        let mask = InkMask::binarize(&gray, self.ink_threshold);

        // Strict > keeps the first-seen region on area ties.
        let bounds = mask
            .regions()
            .into_iter()
            .reduce(|best, r| if r.area() > best.area() { r } else { best })
            .ok_or_else(|| {
                ExtractError::NoRegionFound("cannot find signature on page".into())
            })?;

        let crop = imageops::crop_imm(page, bounds.left, bounds.top, bounds.width, bounds.height)
            .to_image();

        Ok(LocatedRegion { bounds, crop })
    }
}

/// Binary ink mask: true = foreground (dark enough to be ink).
struct InkMask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl InkMask {
    /// Inverse binary threshold: intensity strictly below the cutoff is
    /// foreground, everything else background.
    fn binarize(gray: &GrayImage, threshold: u8) -> Self {
        Self {
            width: gray.width(),
            height: gray.height(),
            bits: gray.pixels().map(|p| p.0[0] < threshold).collect(),
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y * self.width + x) as usize
    }

    /// Bounding boxes of all 8-connected foreground regions.
    ///
    /// Iterative flood fill with an explicit stack; only the outer
    /// geometry of each region is recorded, holes are not tracked.
    fn regions(&self) -> Vec<BoundingBox> {
        let mut visited = vec![false; self.bits.len()];
        let mut regions = Vec::new();
        let mut stack: Vec<(u32, u32)> = Vec::new();

        for y in 0..self.height {
            for x in 0..self.width {
                let start = self.index(x, y);
                if !self.bits[start] || visited[start] {
                    continue;
                }

                let (mut min_x, mut max_x) = (x, x);
                let (mut min_y, mut max_y) = (y, y);
                visited[start] = true;
                stack.push((x, y));

                while let Some((cx, cy)) = stack.pop() {
                    min_x = min_x.min(cx);
                    max_x = max_x.max(cx);
                    min_y = min_y.min(cy);
                    max_y = max_y.max(cy);

                    for (nx, ny) in self.neighbors(cx, cy) {
                        let idx = self.index(nx, ny);
                        if self.bits[idx] && !visited[idx] {
                            visited[idx] = true;
                            stack.push((nx, ny));
                        }
                    }
                }

                regions.push(BoundingBox {
                    left: min_x,
                    top: min_y,
                    width: max_x - min_x + 1,
                    height: max_y - min_y + 1,
                });
            }
        }

        regions
    }

    /// The up-to-eight in-bounds neighbors of a pixel.
    fn neighbors(&self, x: u32, y: u32) -> impl Iterator<Item = (u32, u32)> + '_ {
        let (width, height) = (self.width, self.height);
        (-1i64..=1)
            .flat_map(move |dy| (-1i64..=1).map(move |dx| (dx, dy)))
            .filter(|&(dx, dy)| (dx, dy) != (0, 0))
            .filter_map(move |(dx, dy)| {
                let nx = i64::from(x) + dx;
                let ny = i64::from(y) + dy;
                (nx >= 0 && ny >= 0 && nx < i64::from(width) && ny < i64::from(height))
                    .then_some((nx as u32, ny as u32))
            })
    }
}
