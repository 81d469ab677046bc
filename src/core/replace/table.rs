//! Ordered literal replacement table.

use serde::{Deserialize, Serialize};

use crate::defaults::BUILTIN_REPLACEMENTS;
use crate::error::{Error, Result};

/// A single `old` → `new` literal mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReplacementPair {
    pub old: String,
    pub new: String,
}

impl ReplacementPair {
    pub fn new(old: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            old: old.into(),
            new: new.into(),
        }
    }
}

/// Pairs applied in sequence against the evolving content.
///
/// Pairs are kept exactly as authored: no deduplication and no overlap
/// analysis. The only rejected shape is an empty `old`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ReplacementTable {
    pairs: Vec<ReplacementPair>,
}

impl ReplacementTable {
    pub fn new(pairs: Vec<ReplacementPair>) -> Result<Self> {
        if let Some(index) = pairs.iter().position(|p| p.old.is_empty()) {
            return Err(Error::config_invalid_value(
                format!("replacements[{}].old", index),
                Some(String::new()),
                "pattern must not be empty",
            ));
        }

        Ok(Self { pairs })
    }

    /// The terminology table shipped with the tool.
    pub fn builtin() -> Self {
        Self {
            pairs: BUILTIN_REPLACEMENTS
                .iter()
                .map(|(old, new)| ReplacementPair::new(*old, *new))
                .collect(),
        }
    }

    pub fn pairs(&self) -> &[ReplacementPair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
