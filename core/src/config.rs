use crate::error::{CartError, CartResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What the assembler does with a catalog item lacking a cart line or a
/// size row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingMatchPolicy {
    /// Emit the row with the unmatched side left unset and tag it.
    #[default]
    Flag,
    /// Drop the row and count it in the diagnostics.
    Omit,
}

/// How a catalog item's size row is resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeJoin {
    /// Join on (product item, size id of the matched cart line).
    #[default]
    CartSelection,
    /// Join on product item only; the last size row listed wins.
    ProductItem,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyConfig {
    #[serde(default)]
    pub missing_match: MissingMatchPolicy,
    #[serde(default)]
    pub size_join:     SizeJoin,
    /// Log every unmatched catalog item at warn level, not just the
    /// per-call summary.
    #[serde(default = "default_log_missing")]
    pub log_missing:   bool,
}

fn default_log_missing() -> bool {
    true
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            missing_match: MissingMatchPolicy::default(),
            size_join:     SizeJoin::default(),
            log_missing:   default_log_missing(),
        }
    }
}

impl AssemblyConfig {
    /// Load from a JSON file. Absent keys take their defaults.
    pub fn load(path: impl AsRef<Path>) -> CartResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| CartError::Config {
            path:   path.display().to_string(),
            reason: e.to_string(),
        })?;
        let config = Self::from_json(&content).map_err(|e| CartError::Config {
            path:   path.display().to_string(),
            reason: e.to_string(),
        })?;
        log::debug!(
            "config: loaded {} (missing_match={:?}, size_join={:?})",
            path.display(),
            config.missing_match,
            config.size_join
        );
        Ok(config)
    }

    /// Parse a JSON document. A malformed document is `InvalidConfig`.
    pub fn from_json(json: &str) -> CartResult<Self> {
        serde_json::from_str(json).map_err(|e| CartError::InvalidConfig(e.to_string()))
    }

    /// The compatibility setup: sizes joined by product item only.
    pub fn product_item_join() -> Self {
        Self {
            size_join: SizeJoin::ProductItem,
            ..Self::default()
        }
    }
}
