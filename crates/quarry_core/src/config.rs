//! # Reset Configuration
//!
//! Tuning knobs for the reset engine, loaded once at startup from TOML.
//!
//! ```toml
//! fill_mode = false
//! page_elapsed_budget_ms = 100
//! page_check_block_stride = 500
//! broadcast_radius_blocks = 150
//! log_stats = true
//! ```
//!
//! Every key is optional; missing keys take the defaults below.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ResetError, ResetResult};

/// Soft per-page time budget.
///
/// The host ticks 20 times per second (50 ms per tick). This is the point at
/// which a page stops placing blocks and hands the thread back. It is only
/// checked every [`MINE_RESET_PAGE_TIMEOUT_CHECK_BLOCK_COUNT`] blocks, so a
/// page can overshoot by one stride's worth of work.
pub const MINE_RESET_MAX_PAGE_ELAPSED_TIME_MS: u64 = 100;

/// Blocks applied between two clock samples while paging.
///
/// Large enough that sampling the clock is not itself a source of lag.
pub const MINE_RESET_PAGE_TIMEOUT_CHECK_BLOCK_COUNT: u32 = 500;

/// Radius around the mine center that receives reset broadcasts.
pub const MINE_RESET_BROADCAST_RADIUS_BLOCKS: u32 = 150;

/// Configuration for the reset engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResetConfig {
    /// Only overwrite cells that are currently empty.
    pub fill_mode: bool,
    /// Soft time budget of a single page, in milliseconds.
    pub page_elapsed_budget_ms: u64,
    /// Blocks applied between two budget checks.
    pub page_check_block_stride: u32,
    /// Broadcast radius around the mine center, in blocks.
    pub broadcast_radius_blocks: u32,
    /// Log a stats summary after every completed reset.
    pub log_stats: bool,
}

impl Default for ResetConfig {
    fn default() -> Self {
        Self {
            fill_mode: false,
            page_elapsed_budget_ms: MINE_RESET_MAX_PAGE_ELAPSED_TIME_MS,
            page_check_block_stride: MINE_RESET_PAGE_TIMEOUT_CHECK_BLOCK_COUNT,
            broadcast_radius_blocks: MINE_RESET_BROADCAST_RADIUS_BLOCKS,
            log_stats: false,
        }
    }
}

impl ResetConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ResetError::InvalidConfig`] on malformed TOML, unknown keys
    /// or values rejected by [`ResetConfig::validate`].
    pub fn from_toml_str(source: &str) -> ResetResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| ResetError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ResetError::InvalidConfig`] if the file cannot be read or
    /// does not parse.
    pub fn load(path: impl AsRef<Path>) -> ResetResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| ResetError::InvalidConfig(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&source)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ResetError::InvalidConfig`] if the stride or the budget is 0.
    pub fn validate(&self) -> ResetResult<()> {
        if self.page_check_block_stride == 0 {
            return Err(ResetError::InvalidConfig(
                "page_check_block_stride must be at least 1".into(),
            ));
        }
        if self.page_elapsed_budget_ms == 0 {
            return Err(ResetError::InvalidConfig(
                "page_elapsed_budget_ms must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Page budget as a duration.
    #[must_use]
    pub const fn page_budget(&self) -> Duration {
        Duration::from_millis(self.page_elapsed_budget_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ResetConfig::default();
        assert!(!config.fill_mode);
        assert_eq!(config.page_elapsed_budget_ms, 100);
        assert_eq!(config.page_check_block_stride, 500);
        assert_eq!(config.broadcast_radius_blocks, 150);
        assert_eq!(config.page_budget(), Duration::from_millis(100));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ResetConfig::from_toml_str("fill_mode = true\nlog_stats = true\n").unwrap();
        assert!(config.fill_mode);
        assert!(config.log_stats);
        assert_eq!(config.page_check_block_stride, 500);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(ResetConfig::from_toml_str("").unwrap(), ResetConfig::default());
    }

    #[test]
    fn test_zero_stride_rejected() {
        let err = ResetConfig::from_toml_str("page_check_block_stride = 0").unwrap_err();
        assert!(matches!(err, ResetError::InvalidConfig(_)));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(ResetConfig::from_toml_str("fill = true").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = ResetConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ResetError::InvalidConfig(_)));
    }
}
