use serde::{Deserialize, Serialize};

/// Default grayscale cutoff: pixels darker than this count as ink.
pub const DEFAULT_INK_THRESHOLD: u8 = 200;

/// Default per-channel cutoff: pixels brighter than this on every
/// channel count as background.
pub const DEFAULT_WHITE_THRESHOLD: u8 = 200;

/// Per-channel cutoffs for background classification.
///
/// A pixel is background only if it is strictly brighter than the cutoff
/// on all three channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WhiteThreshold {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Default for WhiteThreshold {
    fn default() -> Self {
        Self {
            red: DEFAULT_WHITE_THRESHOLD,
            green: DEFAULT_WHITE_THRESHOLD,
            blue: DEFAULT_WHITE_THRESHOLD,
        }
    }
}

impl WhiteThreshold {
    /// Same cutoff on all three channels.
    pub fn uniform(value: u8) -> Self {
        Self {
            red: value,
            green: value,
            blue: value,
        }
    }
}

/// Tunable parameters for a single extraction run.
///
/// Real-world scans vary in contrast, so both thresholds can be
/// overridden per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Grayscale cutoff for the ink mask (see [`crate::RegionLocator`]).
    pub ink_threshold: u8,
    /// Background cutoffs for matting (see [`crate::BackgroundMatting`]).
    pub white_threshold: WhiteThreshold,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            ink_threshold: DEFAULT_INK_THRESHOLD,
            white_threshold: WhiteThreshold::default(),
        }
    }
}
