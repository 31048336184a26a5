use crate::packing::SplitRule;
use serde::{Deserialize, Serialize};

/// Configuration of the multi-sheet optimizer
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Policy deciding which axis of a free rectangle is cut first after a placement
    pub split_rule: SplitRule,
    /// Maximum number of sheets opened per material
    pub max_sheets: usize,
    /// Free rectangles with a side shorter than this are discarded
    pub min_rect_size: u32,
    /// Leftover rectangles with both sides at least this long are reported as reusable
    pub reusable_min_side: u32,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            split_rule: SplitRule::ShorterLeftoverAxis,
            max_sheets: 100,
            min_rect_size: 1,
            reusable_min_side: 0,
        }
    }
}

/// Configuration of the result cache
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct CacheConfig {
    /// Time-to-live of a cached result, in seconds
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl_secs: 259_200 }
    }
}
