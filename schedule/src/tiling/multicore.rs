//! Multicore extension search.
//!
//! Once the last dimension has its vectorization tile, the buffer usually has room
//! left (`max_alloc / axis_result` times the tile). This search hands that room to
//! outer axes by multiplying their tiles with divisors of their tile counts, while
//! keeping per-core work divisible where the axis is split across cores.

use autotile_ir::{Axis, AxisLabel};

use super::Tiler;
use super::buffer::max_alloc_and_upper_bound;
use super::granularity::tile_from_remaining_vec_granularity;

/// What [`extend_multicore_axis_tile`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtendOutcome {
    /// No spare capacity to distribute.
    NoGain,
    /// The hardware reports zero cores; nothing was touched.
    NoCores,
    /// The walk ran; `grown` axes got a larger tile from the divisor search.
    Extended { grown: usize },
}

/// Distribute spare buffer capacity to the axes before the final one.
///
/// `max_alloc` and `axis_result` are the candidate axis' buffer estimate and
/// chosen tile. Every tentative growth is checked against a fresh estimate and
/// rolled back unless `max_alloc_percentage` of the new estimate still covers
/// `axis_result`.
#[tracing::instrument(skip_all, fields(axis = %axis.name, max_alloc = max_alloc, axis_result = axis_result))]
pub fn extend_multicore_axis_tile(
    tiler: &mut Tiler,
    axis: &Axis,
    max_alloc: usize,
    axis_result: usize,
    data_coef: usize,
) -> ExtendOutcome {
    if axis_result == 0 {
        return ExtendOutcome::NoGain;
    }
    let mut remaining = max_alloc / axis_result;
    if remaining <= 1 {
        return ExtendOutcome::NoGain;
    }
    let num_core = tiler.hardware().num_core;
    if num_core == 0 {
        tracing::warn!(axis = %axis.name, "hardware reports zero cores, skipping multicore extension");
        return ExtendOutcome::NoCores;
    }
    let percentage = tiler.config().max_alloc_percentage;

    let mut grown = 0;
    for pos in (0..tiler.axes().len().saturating_sub(1)).rev() {
        let current = &tiler.axes()[pos];
        let (range, tile, multicore) = (current.range, current.c0_tiling, current.has_label(AxisLabel::MultiCore));
        let available = current.tile_count();

        if available > 1 {
            for factor in (1..=remaining).rev().filter(|f| available % f == 0) {
                let candidate = factor * tile;
                if available > num_core
                    && ((multicore && available / num_core < factor)
                        || range % candidate != 0
                        || candidate % num_core != 0)
                {
                    tracing::trace!(pos, factor, candidate, "divisor rejected");
                    continue;
                }

                tiler.axes_mut()[pos].c0_tiling = candidate;
                let estimate = max_alloc_and_upper_bound(tiler, axis);
                let max_percentage = (estimate.max_alloc as f64 * percentage).round() as usize;
                if max_percentage < axis_result {
                    tracing::trace!(pos, factor, max_alloc = estimate.max_alloc, "growth rolled back");
                    tiler.axes_mut()[pos].c0_tiling = tile;
                    continue;
                }

                remaining /= factor;
                if factor > 1 {
                    grown += 1;
                    tracing::debug!(pos, from = tile, to = candidate, remaining, "extended axis tile");
                }
                break;
            }

            let current = &tiler.axes()[pos];
            if current.is_multicore_only() {
                let refined =
                    tile_from_remaining_vec_granularity(current, data_coef, axis_result, num_core, tiler.config());
                tiler.axes_mut()[pos].c0_tiling = refined;
            }
        }
    }

    ExtendOutcome::Extended { grown }
}
