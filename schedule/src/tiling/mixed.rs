//! Mixed-type tile resolver.
//!
//! For graphs that combine reductions with element-wise operators, axes feeding a
//! single-axis ReduceY are split across cores first and vectorized second. Other
//! axes fall back to the vectorization tile.

use autotile_ir::{Axis, ModelGraph, OpType};

use super::helpers::snap_pow2_unless;
use super::{Tiler, vec_axis_tile};

/// Tile chosen by [`mix_type_axis_tile`] and the core count it assumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MixedTile {
    pub tile: usize,
    /// Cores the tile is sized for. Lower than the hardware count when the axis
    /// is too short to feed every core with full vector instructions.
    pub num_core: usize,
}

/// The axis is split across cores before vectorization.
///
/// Axes as long as the first global axis never are. Otherwise an axis is a
/// priority axis when it is the only axis of some ReduceY node.
pub fn is_priority_axis(graph: &ModelGraph, axis: &Axis) -> bool {
    if graph.global_axis_vec.first().is_some_and(|first| first.range == axis.range) {
        return false;
    }
    graph.nodes.iter().any(|node| node.op_type == OpType::ReduceY && node.axis_of_node.len() == 1 && node.has_axis(axis))
}

/// Tile for `axis` under the mixed-type strategy.
///
/// `multi_core_size` is the smallest node extent of the axis divided by the core
/// count, and `vec_cal_size` is the [`vec_axis_tile`] result.
///
/// * At most one top-level axis: when a core's share is shorter than
///   `vblocknum` full vector instructions, the tile is `vec_cal_size` and the
///   returned `num_core` drops to the number of such tiles in the shape.
///   Otherwise the tile is the per-core share, capped at `vec_cal_size`.
/// * Priority axis ([`is_priority_axis`]): a per-core share longer than one
///   vector instruction is used as is when divisible by the vector granularity,
///   otherwise rounded down to a multiple of it. A shorter share takes one
///   vector instruction and `num_core` drops to the instructions in the shape.
/// * Any other axis takes `vec_cal_size` when the first global axis alone
///   provides work for every core, and a single vector block otherwise.
///
/// The result is snapped to a power of two unless it equals the full shape, and
/// is clamped to `[1, range]`. `num_core` equals the hardware count unless one of
/// the short-share cases above lowered it.
#[tracing::instrument(skip_all, fields(axis = %axis.name, dim = axis.dim_axis))]
pub fn mix_type_axis_tile(tiler: &mut Tiler, axis: &Axis) -> MixedTile {
    let (min_shape, data_coef) = tiler.graph().min_shape_and_data_coef(axis);
    let hardware = *tiler.hardware();
    let mut num_core = hardware.num_core;
    let multi_core_size = min_shape.checked_div(num_core).unwrap_or(min_shape);

    let vec_cal_size = vec_axis_tile(tiler, axis);
    let vec_granularity = hardware.vec_granularity(data_coef);

    let result = if tiler.graph().top_level_axis_count() <= 1 {
        if multi_core_size < vec_granularity * hardware.vblocknum {
            num_core = min_shape / vec_cal_size;
            vec_cal_size
        } else {
            multi_core_size.min(vec_cal_size)
        }
    } else if is_priority_axis(tiler.graph(), axis) {
        if multi_core_size > vec_granularity {
            if multi_core_size % vec_granularity == 0 {
                multi_core_size
            } else {
                let mut stepped = vec_granularity;
                while multi_core_size > stepped + vec_granularity {
                    stepped += vec_granularity;
                }
                stepped
            }
        } else {
            num_core = min_shape / vec_granularity;
            vec_granularity.min(vec_cal_size)
        }
    } else {
        let first = &tiler.axes()[0];
        if !first.same_dim(axis) && first.tile_count() >= num_core {
            vec_cal_size
        } else {
            let per_block = hardware.vblocksize / data_coef.max(1);
            per_block.min(vec_cal_size)
        }
    };

    let tile = snap_pow2_unless(result, min_shape).clamp(1, axis.range);
    tracing::debug!(tile, num_core, multi_core_size, vec_cal_size, vec_granularity, "mixed-type tile");
    MixedTile { tile, num_core }
}
