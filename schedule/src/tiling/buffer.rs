//! Buffer estimation.
//!
//! Every critical node keeps a live buffer in the vector-compute memory. For a
//! candidate axis, each node contributes either a cost that grows with the
//! candidate's tile (it iterates over the axis) or a fixed cost (it does not).
//! [`max_alloc_and_upper_bound`] solves for the largest candidate tile that fits.

use autotile_ir::{Axis, Node};

use super::align::align_miss_factor;
use super::{CostAdjustment, Tiler};

/// Element counts the candidate axis may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferEstimate {
    /// Largest tile fitting with the current tiles of the other axes.
    pub max_alloc: usize,
    /// Largest tile fitting when axes after the candidate stay untiled.
    pub upper_bound: usize,
}

/// Bytes one critical node needs for a candidate axis.
///
/// `per_tile` is multiplied by the candidate tile; `fixed` is independent of it.
/// The `_mc` variants use the full range for axes after the candidate.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct NodeCost {
    per_tile: f64,
    per_tile_mc: f64,
    fixed: f64,
    fixed_mc: f64,
}

/// Products of the global tiles over the node's axes, skipping the candidate.
fn tile_products(tiler: &Tiler, node: &Node, candidate: &Axis) -> (f64, f64) {
    let mut tile = 1.0;
    let mut tile_mc = 1.0;
    for node_axis in node.axis_of_node.iter().filter(|a| !a.same_dim(candidate)) {
        for global in tiler.axes().iter().filter(|g| g.same_dim(node_axis)) {
            let extent_mc = if global.dim_axis > candidate.dim_axis { global.range } else { global.c0_tiling };
            tile *= global.c0_tiling as f64;
            tile_mc *= extent_mc as f64;
        }
    }
    (tile, tile_mc)
}

fn node_cost(tiler: &Tiler, node: &Node, candidate: &Axis) -> NodeCost {
    let adjustment = tiler.config().memory.adjustment(node.op_type);
    if let CostAdjustment::Scratch(bytes) = adjustment {
        return NodeCost { fixed: bytes, ..Default::default() };
    }

    let data_coef = node.data_coef().max(1);
    let coef = data_coef as f64;
    let (mut tile, mut tile_mc) = tile_products(tiler, node, candidate);

    if node.has_axis(candidate) {
        let min_to_align = tiler.hardware().mem_vc_align / data_coef;
        let amf = node
            .axis_of_node
            .iter()
            .fold(1, |factor, node_axis| align_miss_factor(factor, node_axis, tiler.axes(), min_to_align));
        if let CostAdjustment::Discount(discount) = adjustment {
            tile /= discount;
            tile_mc /= discount;
        }
        let scale = coef * amf as f64;
        NodeCost { per_tile: tile * scale, per_tile_mc: tile_mc * scale, ..Default::default() }
    } else {
        if let CostAdjustment::Amplify(factor) = adjustment {
            tile *= factor;
            tile_mc *= factor;
        }
        NodeCost { fixed: (tile * coef).round(), fixed_mc: (tile_mc * coef).round(), ..Default::default() }
    }
}

/// Largest tile the candidate axis can take so that all critical nodes fit.
///
/// Both values are at least 1, even when the fixed costs alone exceed the buffer.
#[tracing::instrument(level = "trace", skip_all, fields(axis = %axis.name))]
pub fn max_alloc_and_upper_bound(tiler: &Tiler, axis: &Axis) -> BufferEstimate {
    let mem = tiler.hardware().mem_vc_size as f64;
    let mut available = mem;
    let mut min_available = mem;
    let mut buffer_coef = 0.0;
    let mut max_buf_coef = 0.0;

    for node in &tiler.graph().critical_nodes {
        let cost = node_cost(tiler, node, axis);
        available -= cost.fixed;
        min_available -= cost.fixed_mc;
        buffer_coef += cost.per_tile;
        max_buf_coef += cost.per_tile_mc;
    }

    if buffer_coef <= 0.0 {
        buffer_coef = 1.0;
    }
    if max_buf_coef <= 0.0 {
        max_buf_coef = 1.0;
    }

    let estimate = BufferEstimate {
        max_alloc: (available / buffer_coef).max(1.0) as usize,
        upper_bound: (min_available / max_buf_coef).max(1.0) as usize,
    };
    tracing::trace!(max_alloc = estimate.max_alloc, upper_bound = estimate.upper_bound, "buffer estimate");
    estimate
}

/// Bytes all critical nodes occupy with the candidate axis at its current tile.
pub fn live_footprint(tiler: &Tiler, axis: &Axis) -> f64 {
    let tile = tiler.graph().axis_by_dim(axis.dim_axis).map_or(axis.c0_tiling, |a| a.c0_tiling) as f64;
    tiler
        .graph()
        .critical_nodes
        .iter()
        .map(|node| {
            let cost = node_cost(tiler, node, axis);
            cost.fixed + cost.per_tile * tile
        })
        .sum()
}
