//! Tile-size resolution for the autotile backend.
//!
//! Given a [`ModelGraph`](autotile_ir::ModelGraph) populated by schedule analysis
//! and a [`Hardware`] descriptor, decides per loop axis how many elements the code
//! generator processes per inner iteration.
//!
//! # Module Organization
//!
//! - [`tiling`] - Buffer estimation, vectorization sizing, multicore extension,
//!   granularity refinement and mixed-type sizing, plus the [`Tiler`] driver
//!
//! # Example
//!
//! ```ignore
//! use autotile_schedule::{Hardware, Tiler};
//!
//! let mut tiler = Tiler::new(graph, Hardware::npu())?;
//! let summary = tiler.run();
//! tracing::info!(%summary, "tiling finished");
//! let graph = tiler.into_graph(); // c0_tiling finalized for code generation
//! ```

pub mod tiling;


pub use tiling::{
    BufferEstimate, CostAdjustment, ExtendOutcome, Hardware, MemoryCostTable, MixedTile, Tiler, TilingConfig,
    TilingError, TilingStrategy, TilingSummary, extend_multicore_axis_tile, is_priority_axis, max_alloc_and_upper_bound,
    mix_type_axis_tile, tile_graph, vec_axis_tile,
};
