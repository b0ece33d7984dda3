//! Test utilities for tiling tests.
//!
//! Builders for small hand-written graphs and a permissive hardware descriptor.
//! All helpers mark every node critical.

use std::sync::Arc;

use autotile_ir::{Axis, AxisLabel, DataType, ModelGraph, Node, OpType, Shape, enum_set};

use crate::tiling::{Hardware, Tiler, TilingConfig};

/// Top-level axis with its tile at full range.
pub fn axis(name: &str, dim: usize, range: usize) -> Axis {
    Axis::builder().name(name).range(range).dim_axis(dim).build()
}

/// Top-level axis carrying the Vectorization role.
pub fn vec_axis(name: &str, dim: usize, range: usize) -> Axis {
    Axis::builder().name(name).range(range).dim_axis(dim).labels(enum_set!(AxisLabel::Vectorization)).build()
}

pub fn node(name: &str, op_type: OpType, dtype: DataType, axes: &[Axis]) -> Arc<Node> {
    let output = Shape::new(axes.iter().map(|a| a.range), dtype);
    Arc::new(Node::new(name, op_type, output, axes.iter().cloned()))
}

/// Graph whose nodes are all critical.
pub fn graph(nodes: Vec<Arc<Node>>, axes: Vec<Axis>) -> ModelGraph {
    ModelGraph::try_new(nodes.clone(), nodes, axes).unwrap()
}

/// Single core, byte alignment, `mem` bytes of buffer.
pub fn hardware(mem: usize) -> Hardware {
    Hardware::builder().mem_vc_size(mem).mem_vc_align(1).num_core(1).build()
}

pub fn tiler(graph: ModelGraph, hardware: Hardware) -> Tiler {
    Tiler::with_config(graph, hardware, TilingConfig::default()).unwrap()
}

/// One element-wise node over one axis `i` of `range` elements.
pub fn single_axis_tiler(range: usize, dtype: DataType, mem: usize) -> Tiler {
    let i = axis("i", 0, range);
    let n = node("n", OpType::Elementwise, dtype, std::slice::from_ref(&i));
    tiler(graph(vec![n], vec![i]), hardware(mem))
}

/// Current tile of the axis at `dim`.
pub fn tile_of(tiler: &Tiler, dim: usize) -> usize {
    tiler.graph().axis_by_dim(dim).map(|a| a.c0_tiling).unwrap()
}
