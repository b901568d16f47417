//! Analysis result types and aggregation limits.

use serde::{Deserialize, Serialize};

/// One ranked color: a CSS color value and how many elements carried it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorEntry {
    pub value: String,
    pub count: u32,
}

/// The structured summary produced for one analyzed page.
///
/// Collections are always present; a page with no detected signals yields
/// empty arrays, never nulls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub title: String,
    /// Ordered non-increasing by `count`.
    pub colors: Vec<ColorEntry>,
    /// Normalized family names in first-occurrence order.
    pub fonts: Vec<String>,
    /// Detected technology names, deduplicated.
    pub technologies: Vec<String>,
}

/// Noise thresholds and result caps applied during aggregation.
#[derive(Debug, Clone)]
pub struct AnalysisLimits {
    /// Colors with at most this many occurrences are dropped as noise.
    pub color_noise_threshold: u32,
    pub max_colors: usize,
    pub max_fonts: usize,
}

impl Default for AnalysisLimits {
    fn default() -> Self {
        Self {
            color_noise_threshold: 3,
            max_colors: 15,
            max_fonts: 8,
        }
    }
}

impl From<&sitelens_config::AnalysisConfig> for AnalysisLimits {
    fn from(cfg: &sitelens_config::AnalysisConfig) -> Self {
        Self {
            color_noise_threshold: cfg.color_noise_threshold,
            max_colors: cfg.max_colors,
            max_fonts: cfg.max_fonts,
        }
    }
}
