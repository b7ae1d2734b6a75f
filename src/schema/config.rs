//! Inference configuration

use serde::{Deserialize, Serialize};

/// Configuration for column type inference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Maximum number of distinct values for a column to count as categorical
    pub max_unique_categories: usize,

    /// Maximum ratio of distinct values to non-missing rows for a column
    /// to count as categorical
    pub max_category_ratio: f64,

    /// Integer magnitude at which a column is classified as bigint
    pub bigint_threshold: u64,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            max_unique_categories: 30,
            max_category_ratio: 0.5,
            bigint_threshold: 1 << 32,
        }
    }
}

impl InferenceConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the maximum distinct-value count
    pub fn with_max_unique_categories(mut self, max: usize) -> Self {
        self.max_unique_categories = max;
        self
    }

    /// Builder method to set the maximum distinct-to-total ratio
    pub fn with_max_category_ratio(mut self, ratio: f64) -> Self {
        self.max_category_ratio = ratio;
        self
    }

    /// Builder method to set the bigint magnitude threshold
    pub fn with_bigint_threshold(mut self, threshold: u64) -> Self {
        self.bigint_threshold = threshold;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let config = InferenceConfig::default();
        assert_eq!(config.max_unique_categories, 30);
        assert_eq!(config.bigint_threshold, 4_294_967_296);
    }

    #[test]
    fn test_builder() {
        let config = InferenceConfig::new()
            .with_max_unique_categories(10)
            .with_max_category_ratio(0.1);
        assert_eq!(config.max_unique_categories, 10);
        assert_eq!(config.max_category_ratio, 0.1);
    }
}
