//! Alignment-miss factor.
//!
//! An inner axis whose extent is smaller than the buffer alignment unit wastes the
//! rest of every aligned row. The factor scales a node's per-tile cost by that waste.

use autotile_ir::Axis;

/// Fold one node axis into the running alignment-miss factor.
///
/// `min_to_align` is the alignment unit in elements (`mem_vc_align / data_coef`).
/// Only inner global axes at the same position and with the same range as
/// `node_axis` contribute. A start value of 1 means no waste.
pub fn align_miss_factor(current: usize, node_axis: &Axis, global_axes: &[Axis], min_to_align: usize) -> usize {
    let mut factor = current;
    for global in global_axes.iter().filter(|g| g.same_dim(node_axis) && g.range == node_axis.range && g.is_inner) {
        let miss = min_to_align.checked_div(node_axis.range).unwrap_or(0);
        factor = factor.max(miss);
        tracing::debug!(axis = %global.name, range = global.range, min_to_align, factor, "alignment miss factor");
    }
    factor
}
