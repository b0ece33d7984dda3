//! Tiling configuration types.
//!
//! Every constant the resolvers depend on lives here as a named field. Values can
//! be given explicitly through bon builders or picked up from the environment.

use std::str::FromStr;

use autotile_ir::{ModelGraph, OpType};
use bon::bon;

// ============================================================================
// TILING STRATEGY
// ============================================================================

/// Which resolver the driver applies to each axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display, strum::EnumString, strum::AsRefStr)]
#[strum(ascii_case_insensitive)]
pub enum TilingStrategy {
    /// Mixed-type when the graph combines reduction and element-wise operators,
    /// vectorization otherwise.
    #[default]
    #[strum(to_string = "auto")]
    Auto,

    /// Vectorization resolver only.
    #[strum(to_string = "vectorize", serialize = "vec")]
    Vectorize,

    /// Multicore-first mixed-type resolver.
    #[strum(to_string = "mix_type", serialize = "mix")]
    MixType,
}

impl TilingStrategy {
    /// Read `AUTOTILE_STRATEGY` (`auto`, `vec` or `mix`). Unknown values fall back to `Auto`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        lookup("AUTOTILE_STRATEGY").and_then(|s| Self::from_str(&s).ok()).unwrap_or_default()
    }

    /// Replace `Auto` with the concrete strategy for this graph.
    pub fn select(self, graph: &ModelGraph) -> Self {
        match self {
            Self::Auto if graph.has_mixed_priority_classes() => Self::MixType,
            Self::Auto => Self::Vectorize,
            concrete => concrete,
        }
    }
}

// ============================================================================
// MEMORY COST TABLE
// ============================================================================

/// How an operator kind changes its contribution to the buffer estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CostAdjustment {
    /// Plain contribution.
    None,
    /// Fixed scratch bytes taken off the available budget; the node is otherwise ignored.
    Scratch(f64),
    /// Divides the node's per-tile cost when it iterates over the candidate axis.
    Discount(f64),
    /// Multiplies the node's fixed cost when it does not iterate over the candidate axis.
    Amplify(f64),
}

/// Per-operator memory coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemoryCostTable {
    pub all_reduce_coef: usize,
    pub reduce_dst_coef: usize,
    pub reduce_src_discount: f64,
}

impl Default for MemoryCostTable {
    fn default() -> Self {
        Self { all_reduce_coef: 1, reduce_dst_coef: 2, reduce_src_discount: 2.0 }
    }
}

impl MemoryCostTable {
    pub fn adjustment(&self, op_type: OpType) -> CostAdjustment {
        match op_type {
            OpType::AllReduce => {
                let scratch = 2 * self.reduce_dst_coef as i64 - self.all_reduce_coef as i64;
                CostAdjustment::Scratch(scratch as f64)
            }
            OpType::ReduceSrc if self.reduce_src_discount > 0.0 => CostAdjustment::Discount(self.reduce_src_discount),
            OpType::ReduceDst => CostAdjustment::Amplify(self.reduce_dst_coef as f64),
            OpType::ReduceSrc | OpType::ReduceY | OpType::Elementwise => CostAdjustment::None,
        }
    }
}

// ============================================================================
// TILING CONFIGURATION
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct TilingConfig {
    pub strategy: TilingStrategy,
    /// Share of the recomputed `max_alloc` that must still cover the chosen tile
    /// after a multicore extension.
    pub max_alloc_percentage: f64,
    /// Preferred bytes per vector instruction group, used by granularity refinement.
    pub vectorization_granularity: usize,
    pub memory: MemoryCostTable,
}

impl Default for TilingConfig {
    fn default() -> Self {
        Self {
            strategy: TilingStrategy::Auto,
            max_alloc_percentage: 0.8,
            vectorization_granularity: 256,
            memory: MemoryCostTable::default(),
        }
    }
}

#[bon]
impl TilingConfig {
    /// Create a tiling configuration with builder pattern.
    #[builder]
    pub fn builder(
        #[builder(default)] strategy: TilingStrategy,
        #[builder(default = 0.8)] max_alloc_percentage: f64,
        #[builder(default = 256)] vectorization_granularity: usize,
        #[builder(default)] memory: MemoryCostTable,
    ) -> Self {
        Self { strategy, max_alloc_percentage, vectorization_granularity, memory }
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// * `AUTOTILE_STRATEGY` - `auto`, `vec` or `mix` (default: auto)
    /// * `AUTOTILE_MAX_ALLOC_PCT` - extension acceptance share (default: 0.8)
    /// * `AUTOTILE_VEC_GRANULARITY` - granularity in bytes (default: 256)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`TilingConfig::from_env`], reading variables through `lookup`.
    /// Unparsable values and non-positive percentages keep the defaults.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            strategy: TilingStrategy::from_lookup(&lookup),
            max_alloc_percentage: lookup("AUTOTILE_MAX_ALLOC_PCT")
                .and_then(|s| s.parse().ok())
                .filter(|pct: &f64| *pct > 0.0)
                .unwrap_or(defaults.max_alloc_percentage),
            vectorization_granularity: lookup("AUTOTILE_VEC_GRANULARITY")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.vectorization_granularity),
            memory: defaults.memory,
        }
    }
}
