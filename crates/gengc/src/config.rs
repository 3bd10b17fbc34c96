//! Configuration Module - Collector Tuning Parameters
//!
//! Thresholds and budgets that decide when objects are promoted and when an
//! allocation triggers an implicit collection.
//!
//! The large-object boundary is not tunable: an allocation of
//! `LARGE_OBJECT_THRESHOLD` bytes or more always lands in Gen2's
//! large-object space, whatever the configuration.

use crate::latency::LatencyMode;
use serde::{Deserialize, Serialize};

/// Main configuration for the collector
///
/// # Examples
///
/// ```rust
/// use gengc::{GcConfig, LatencyMode};
///
/// // Use default configuration
/// let config = GcConfig::default();
/// assert_eq!(config.promotion_thresholds, [1, 1]);
///
/// // Tiny Gen0 budget so implicit collections happen often
/// let config = GcConfig {
///     generation_budgets: [4 * 1024, 2 * 1024 * 1024, 16 * 1024 * 1024],
///     latency_mode: LatencyMode::Batch,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GcConfig {
    /// Survived collections before promotion, for Gen0 -> Gen1 and
    /// Gen1 -> Gen2
    ///
    /// Default: [1, 1]
    pub promotion_thresholds: [u32; 2],

    /// Bytes that may enter each generation between collections of it
    ///
    /// Exceeding a budget on allocation triggers an implicit collection,
    /// subject to the latency mode.
    ///
    /// Default: Gen0 256 KiB, Gen1 2 MiB, Gen2 16 MiB
    pub generation_budgets: [usize; 3],

    /// Latency mode the collector starts in
    ///
    /// Default: Interactive
    pub latency_mode: LatencyMode,

    /// Number of recent GC events kept in memory
    ///
    /// Default: 64
    pub event_history: usize,
}

impl Default for GcConfig {
    fn default() -> Self {
        Self {
            promotion_thresholds: [1, 1],
            generation_budgets: [256 * KB, 2 * MB, 16 * MB],
            latency_mode: LatencyMode::Interactive,
            event_history: 64,
        }
    }
}

impl GcConfig {
    /// Validate configuration
    ///
    /// Returns error if any parameter is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(gen) = self.promotion_thresholds.iter().position(|&t| t == 0) {
            return Err(ConfigError::InvalidThreshold(format!(
                "promotion threshold for Gen{} must be >= 1",
                gen
            )));
        }

        if let Some(gen) = self.generation_budgets.iter().position(|&b| b == 0) {
            return Err(ConfigError::InvalidBudget(format!(
                "budget for Gen{} must be > 0",
                gen
            )));
        }

        if self.event_history == 0 {
            return Err(ConfigError::InvalidEventHistory(
                "event_history must be > 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Create configuration from environment variables
    ///
    /// Overrides defaults with environment variables:
    /// - GENGC_PROMOTION_THRESHOLD (both generations)
    /// - GENGC_GEN0_BUDGET, GENGC_GEN1_BUDGET, GENGC_GEN2_BUDGET
    /// - GENGC_LATENCY_MODE (batch, interactive, low-latency, sustained-low-latency)
    /// - GENGC_EVENT_HISTORY
    ///
    /// Unparseable values are ignored.
    ///
    /// # Examples
    ///
    /// ```bash
    /// export GENGC_GEN0_BUDGET=65536
    /// export GENGC_LATENCY_MODE=low-latency
    /// ```
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let parse_usize = |key: &str| lookup(key).and_then(|v| v.trim().parse::<usize>().ok());

        if let Some(val) = lookup("GENGC_PROMOTION_THRESHOLD") {
            if let Ok(threshold) = val.trim().parse::<u32>() {
                config.promotion_thresholds = [threshold, threshold];
            }
        }

        for (gen, key) in ["GENGC_GEN0_BUDGET", "GENGC_GEN1_BUDGET", "GENGC_GEN2_BUDGET"]
            .into_iter()
            .enumerate()
        {
            if let Some(budget) = parse_usize(key) {
                config.generation_budgets[gen] = budget;
            }
        }

        if let Some(val) = lookup("GENGC_LATENCY_MODE") {
            if let Ok(mode) = val.parse::<LatencyMode>() {
                config.latency_mode = mode;
            }
        }

        if let Some(history) = parse_usize("GENGC_EVENT_HISTORY") {
            config.event_history = history;
        }

        config
    }

    /// Parse a JSON document; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Promotion threshold for objects currently in `generation`
    ///
    /// Gen2 is terminal and has no threshold.
    pub fn promotion_threshold(&self, generation: crate::object::Generation) -> Option<u32> {
        self.promotion_thresholds.get(generation.index()).copied()
    }
}

/// Error types for configuration
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid threshold: {0}")]
    InvalidThreshold(String),

    #[error("Invalid generation budget: {0}")]
    InvalidBudget(String),

    #[error("Invalid event history: {0}")]
    InvalidEventHistory(String),

    #[error("Invalid configuration document: {0}")]
    Parse(String),
}

// ============================================================================
// CONSTANTS
// ============================================================================

/// Size in bytes at which an allocation goes to the large-object space
///
/// Large objects are born in Gen2 and never moved by compaction.
pub const LARGE_OBJECT_THRESHOLD: usize = 85_000;

const KB: usize = 1024;
const MB: usize = 1024 * 1024;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::Generation;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = GcConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.promotion_thresholds, [1, 1]);
        assert_eq!(config.generation_budgets[0], 256 * 1024);
        assert_eq!(config.latency_mode, LatencyMode::Interactive);
    }

    #[test]
    fn test_invalid_promotion_threshold() {
        let config = GcConfig {
            promotion_thresholds: [1, 0],
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidThreshold(
                "promotion threshold for Gen1 must be >= 1".to_string()
            ))
        );
    }

    #[test]
    fn test_invalid_budget() {
        let config = GcConfig {
            generation_budgets: [0, MB, MB],
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidBudget(_))));
    }

    #[test]
    fn test_promotion_threshold_lookup() {
        let config = GcConfig {
            promotion_thresholds: [2, 3],
            ..Default::default()
        };
        assert_eq!(config.promotion_threshold(Generation::Gen0), Some(2));
        assert_eq!(config.promotion_threshold(Generation::Gen1), Some(3));
        assert_eq!(config.promotion_threshold(Generation::Gen2), None);
    }

    #[test]
    fn test_from_lookup_overrides() {
        let vars: HashMap<&str, &str> = [
            ("GENGC_GEN0_BUDGET", "4096"),
            ("GENGC_PROMOTION_THRESHOLD", "2"),
            ("GENGC_LATENCY_MODE", "low-latency"),
            ("GENGC_EVENT_HISTORY", "not-a-number"),
        ]
        .into_iter()
        .collect();

        let config = GcConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.generation_budgets[0], 4096);
        assert_eq!(config.generation_budgets[1], 2 * MB);
        assert_eq!(config.promotion_thresholds, [2, 2]);
        assert_eq!(config.latency_mode, LatencyMode::LowLatency);
        assert_eq!(config.event_history, 64);
    }

    #[test]
    fn test_from_json_partial_document() {
        let config = GcConfig::from_json(r#"{ "promotion_thresholds": [2, 1], "latency_mode": "Batch" }"#)
            .unwrap();
        assert_eq!(config.promotion_thresholds, [2, 1]);
        assert_eq!(config.latency_mode, LatencyMode::Batch);
        assert_eq!(config.event_history, 64);
    }

    #[test]
    fn test_large_object_threshold_is_not_configurable() {
        assert_eq!(
            GcConfig::from_json(r#"{ "large_object_threshold": 1000 }"#),
            Ok(GcConfig::default())
        );
        let vars = |key: &str| (key == "GENGC_LARGE_OBJECT_THRESHOLD").then(|| "1000".to_string());
        assert_eq!(GcConfig::from_lookup(vars), GcConfig::default());
    }

    #[test]
    fn test_from_json_rejects_invalid() {
        assert!(matches!(
            GcConfig::from_json("{ nope"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            GcConfig::from_json(r#"{ "event_history": 0 }"#),
            Err(ConfigError::InvalidEventHistory(_))
        ));
    }
}
