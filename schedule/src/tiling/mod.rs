//! Tile-size resolution.
//!
//! Resolvers walk the global axis vector in order. Each call reads the tiles
//! already decided for other axes and may adjust them (multicore extension,
//! neighbour shrinking), so the order of resolution matters.
//!
//! # Module Organization
//!
//! - [`buffer`] - How large a tile the vector-compute buffer admits
//! - [`align`] - Alignment waste of short inner axes
//! - [`vectorize`] - Vectorization tile resolver
//! - [`multicore`] - Spreading leftover capacity to outer axes
//! - [`granularity`] - Refinement of multicore-only axes
//! - [`mixed`] - Multicore-first resolver for mixed reduction graphs
//! - [`solver`] - The [`Tiler`] owning one run's state
//! - [`config`] / [`hardware`] - Tunables and target description

pub mod align;
pub mod buffer;
pub mod config;
pub mod error;
pub mod granularity;
pub mod hardware;
pub mod helpers;
pub mod mixed;
pub mod multicore;
pub mod solver;
pub mod vectorize;

pub use buffer::{BufferEstimate, live_footprint, max_alloc_and_upper_bound};
pub use config::{CostAdjustment, MemoryCostTable, TilingConfig, TilingStrategy};
pub use error::TilingError;
pub use granularity::tile_from_remaining_vec_granularity;
pub use hardware::Hardware;
pub use mixed::{MixedTile, is_priority_axis, mix_type_axis_tile};
pub use multicore::{ExtendOutcome, extend_multicore_axis_tile};
pub use solver::{AxisTile, Tiler, TilingSummary};
pub use vectorize::vec_axis_tile;

/// Resolve every global axis in order and write each tile back.
///
/// The strategy comes from the tiler's configuration; `Auto` becomes mixed-type
/// when the graph mixes reduction and element-wise operators.
pub fn tile_graph(tiler: &mut Tiler) -> TilingSummary {
    let strategy = tiler.strategy();
    tracing::debug!(%strategy, axes = tiler.axes().len(), "tiling graph");

    for position in 0..tiler.axes().len() {
        let axis = tiler.axes()[position].clone();
        let tile = match strategy {
            TilingStrategy::MixType => mix_type_axis_tile(tiler, &axis).tile,
            TilingStrategy::Auto | TilingStrategy::Vectorize => vec_axis_tile(tiler, &axis),
        };
        tiler.set_tile(position, tile);
    }

    TilingSummary::from_axes(strategy, tiler.axes())
}
