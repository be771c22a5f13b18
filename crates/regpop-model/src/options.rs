//! Configuration options for registry normalization and migration analytics.

use serde::{Deserialize, Serialize};

/// Header of the column holding `"<name>(<code>)"` region labels.
pub const DEFAULT_IDENTITY_COLUMN: &str = "행정구역";

/// Raw row positions dropped by default: the nationwide total (0) and the
/// region renamed during the observation period (11).
pub const DEFAULT_EXCLUDED_ROWS: [usize; 2] = [0, 11];

/// Zero padding appended to province-level codes in the registry export.
pub const DEFAULT_CODE_PADDING: &str = "00000000";

/// Separator between the year and the category in wide column labels.
pub const DEFAULT_COLUMN_SEPARATOR: &str = "년_";

/// Population change a region must exceed to count as gaining or losing.
pub const DEFAULT_THRESHOLD: i64 = 5000;

/// Options controlling how the raw registry is reshaped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeOptions {
    /// Header of the region label column.
    pub identity_column: String,

    /// 0-based data-row positions (header excluded) to drop after
    /// backward-fill. Positions refer to the raw file, before any removal.
    pub excluded_rows: Vec<usize>,

    /// Suffix stripped from region codes.
    pub code_padding: String,

    /// Separator splitting a column label into year and category.
    pub column_separator: String,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            identity_column: DEFAULT_IDENTITY_COLUMN.to_string(),
            excluded_rows: DEFAULT_EXCLUDED_ROWS.to_vec(),
            code_padding: DEFAULT_CODE_PADDING.to_string(),
            column_separator: DEFAULT_COLUMN_SEPARATOR.to_string(),
        }
    }
}

impl NormalizeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_identity_column(mut self, column: impl Into<String>) -> Self {
        self.identity_column = column.into();
        self
    }

    #[must_use]
    pub fn with_excluded_rows(mut self, rows: impl IntoIterator<Item = usize>) -> Self {
        self.excluded_rows = rows.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_code_padding(mut self, padding: impl Into<String>) -> Self {
        self.code_padding = padding.into();
        self
    }
}

/// Rounding applied to gainer/loser percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RatioRounding {
    /// Round half to even (12.5 -> 12, 37.5 -> 38).
    #[default]
    HalfEven,
    /// Round half away from zero (12.5 -> 13).
    HalfAwayFromZero,
}

impl RatioRounding {
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Self::HalfEven => value.round_ties_even(),
            Self::HalfAwayFromZero => value.round(),
        }
    }
}

/// Options for migration delta statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsOptions {
    /// Magnitude a delta must strictly exceed to count as a gain or loss.
    pub threshold: i64,
    pub rounding: RatioRounding,
}

impl Default for AnalyticsOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            rounding: RatioRounding::default(),
        }
    }
}

impl AnalyticsOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: i64) -> Self {
        self.threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_rounding(mut self, rounding: RatioRounding) -> Self {
        self.rounding = rounding;
        self
    }
}
