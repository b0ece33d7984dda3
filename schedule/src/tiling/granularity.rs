//! Granularity refinement for multicore-only axes.

use autotile_ir::Axis;

use super::TilingConfig;
use super::helpers::floor_pow2;

/// Grow a MultiCore-only axis so that one vector instruction group
/// (`vectorization_granularity` bytes) is covered across it and the vector axis.
///
/// The tile is multiplied by the power-of-two share of the granularity the vector
/// axis leaves unused, but only while more than one tile per core remains.
pub fn tile_from_remaining_vec_granularity(
    axis: &Axis,
    data_coef: usize,
    axis_result: usize,
    num_core: usize,
    config: &TilingConfig,
) -> usize {
    let remaining = if data_coef > 0 && axis_result > 0 {
        config.vectorization_granularity / data_coef / axis_result
    } else {
        0
    };
    let remaining = floor_pow2(remaining).max(1);

    let tiles_per_core = axis.tile_count().checked_div(num_core).unwrap_or(0);
    if tiles_per_core / remaining > 1 { axis.c0_tiling * remaining } else { axis.c0_tiling }
}
