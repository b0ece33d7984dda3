//! Vectorization tile resolver.
//!
//! Picks the largest power-of-two tile for an axis that still fits the
//! vector-compute buffer. When the axis is the last dimension, leftover capacity
//! is handed to outer axes ([`extend_multicore_axis_tile`]). If the final tile is
//! then too small next to the neighbouring top-level axis, the neighbour is halved
//! and the axis is resolved again.

use autotile_ir::{Axis, AxisLabel};

use super::buffer::max_alloc_and_upper_bound;
use super::helpers::{floor_pow2, pow2_below, snap_pow2_unless};
use super::{Tiler, extend_multicore_axis_tile};

/// Resolve the vectorization tile of `axis`.
///
/// May shrink the second top-level axis from the back and grow outer axes as a
/// side effect. Returns a tile in `1..=axis.range`.
#[tracing::instrument(skip_all, fields(axis = %axis.name, dim = axis.dim_axis))]
pub fn vec_axis_tile(tiler: &mut Tiler, axis: &Axis) -> usize {
    // At most one pass per halving the neighbour's range allows; extension may regrow it.
    let mut shrinks_left = neighbor_position(tiler.axes())
        .map_or(0, |pos| usize::BITS - tiler.axes()[pos].range.leading_zeros());

    loop {
        let (min_shape, data_coef) = tiler.graph().min_shape_and_data_coef(axis);
        let estimate = max_alloc_and_upper_bound(tiler, axis);
        let last = tiler.last_dim_axis();

        let mut result = snap_pow2_unless(estimate.max_alloc.min(min_shape), min_shape);
        if axis.dim_axis != last {
            result = result.min(min_shape);
        }

        if last > axis.dim_axis + 1 {
            let upper_bound = snap_pow2_unless(estimate.upper_bound, min_shape);
            result = if axis.is_innermost {
                let dims = (last - axis.dim_axis + 1) as f64;
                let average = floor_pow2((estimate.max_alloc as f64).powf(dims.recip()) as usize);
                result.min(average.max(upper_bound))
            } else {
                result.min(upper_bound)
            };
        }

        let result = result.clamp(1, axis.range);
        if axis.dim_axis != last {
            tracing::debug!(tile = result, min_shape, "vectorization tile");
            return result;
        }

        extend_multicore_axis_tile(tiler, axis, estimate.max_alloc, result, data_coef);

        let Some(pos) = neighbor_position(tiler.axes()) else {
            tracing::debug!(tile = result, min_shape, "vectorization tile");
            return result;
        };
        let vblocknum = tiler.hardware().vblocknum;
        let neighbor = &mut tiler.axes_mut()[pos];
        let conflict = conflicts_with_neighbor(neighbor, axis, result, vblocknum) && result < min_shape;
        if !conflict || neighbor.c0_tiling <= 1 || shrinks_left == 0 {
            tracing::debug!(tile = result, min_shape, "vectorization tile");
            return result;
        }

        let shrunk = pow2_below(neighbor.c0_tiling);
        tracing::debug!(neighbor = %neighbor.name, from = neighbor.c0_tiling, to = shrunk, tile = result, "shrinking neighbor tile");
        neighbor.c0_tiling = shrunk;
        shrinks_left -= 1;
    }
}

/// Second top-level (non-inner) axis counted from the back.
fn neighbor_position(axes: &[Axis]) -> Option<usize> {
    axes.iter().enumerate().rev().filter(|(_, a)| !a.is_inner).nth(1).map(|(pos, _)| pos)
}

/// The neighbour's tile is out of proportion with the candidate's.
fn conflicts_with_neighbor(neighbor: &Axis, axis: &Axis, result: usize, vblocknum: usize) -> bool {
    if !neighbor.has_label(AxisLabel::Vectorization) || result >= axis.range {
        return false;
    }
    let oversized = !neighbor.is_innermost
        && neighbor.c0_tiling.saturating_mul(axis.range) > result.saturating_mul(neighbor.range)
        && neighbor.c0_tiling > vblocknum;
    result < neighbor.c0_tiling || oversized
}
