//! Heading classification from font size ratios.

/// A detected heading level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HeadingLevel {
    /// Most prominent heading
    H1,
    /// Second level
    H2,
    /// Third level
    H3,
}

impl HeadingLevel {
    /// Numeric level (1-3).
    pub fn get(self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }
}

/// Configuration for heading detection.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingConfig {
    /// Minimum size/median ratio for H1
    pub h1_ratio: f64,

    /// Minimum size/median ratio for H2
    pub h2_ratio: f64,

    /// Minimum size/median ratio for H3
    pub h3_ratio: f64,

    /// Page median used when a page has no sized spans
    pub default_font_size: f64,
}

impl HeadingConfig {
    /// Create a config with the default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the three ratio thresholds, largest first.
    pub fn with_ratios(mut self, h1: f64, h2: f64, h3: f64) -> Self {
        self.h1_ratio = h1;
        self.h2_ratio = h2;
        self.h3_ratio = h3;
        self
    }

    /// Set the fallback page median.
    pub fn with_default_font_size(mut self, size: f64) -> Self {
        self.default_font_size = size;
        self
    }

    /// Classify a block's representative size against its page median.
    ///
    /// Thresholds are checked largest first with closed lower bounds, so a
    /// ratio exactly on a boundary gets the higher level. Each threshold is
    /// scaled by the median rather than dividing the size.
    pub fn classify(&self, size: f64, median: f64) -> Option<HeadingLevel> {
        if median <= 0.0 || !size.is_finite() {
            return None;
        }
        if size >= median * self.h1_ratio {
            Some(HeadingLevel::H1)
        } else if size >= median * self.h2_ratio {
            Some(HeadingLevel::H2)
        } else if size >= median * self.h3_ratio {
            Some(HeadingLevel::H3)
        } else {
            None
        }
    }
}

impl Default for HeadingConfig {
    fn default() -> Self {
        Self {
            h1_ratio: 1.6,
            h2_ratio: 1.35,
            h3_ratio: 1.2,
            default_font_size: 10.0,
        }
    }
}

/// Classify with the default thresholds.
pub fn classify(size: f64, median: f64) -> Option<HeadingLevel> {
    HeadingConfig::default().classify(size, median)
}
