//! Operator nodes of the model graph.

use smallvec::SmallVec;

use crate::{Axis, OpType, Shape};

/// Axes iterated by one node. Most operators touch at most four.
pub type NodeAxes = SmallVec<[Axis; 4]>;

/// One tensor operator.
///
/// Node axes are snapshots taken by schedule analysis: their `range` is the
/// extent this node sees (which may be smaller than the global axis), and they
/// are matched against the global axis vector by `dim_axis`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub name: String,
    pub op_type: OpType,
    pub transformed_output_shape: Vec<Shape>,
    pub axis_of_node: NodeAxes,
}

impl Node {
    pub fn new(
        name: impl Into<String>,
        op_type: OpType,
        output: Shape,
        axes: impl IntoIterator<Item = Axis>,
    ) -> Self {
        Self {
            name: name.into(),
            op_type,
            transformed_output_shape: vec![output],
            axis_of_node: axes.into_iter().collect(),
        }
    }

    /// True if the node iterates over an axis at the same global position.
    pub fn has_axis(&self, axis: &Axis) -> bool {
        self.axis_of_node.iter().any(|a| a.same_dim(axis))
    }

    /// Bytes per element of the primary output; 1 when no output shape is known.
    pub fn data_coef(&self) -> usize {
        self.transformed_output_shape.first().map_or(1, Shape::data_type_coef)
    }

    /// The node's own view of the axis at `dim_axis`, if it iterates over it.
    pub fn node_axis(&self, dim_axis: usize) -> Option<&Axis> {
        self.axis_of_node.iter().find(|a| a.dim_axis == dim_axis)
    }
}
