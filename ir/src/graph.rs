//! The operator graph being tiled and its global axis vector.
//!
//! [`ModelGraph::global_axis_vec`] is the in-progress tiling solution. It is owned
//! by exactly one graph; resolvers mutate it through whoever owns the graph, and
//! independent tiling runs must each build their own graph.

use std::sync::Arc;

use snafu::ensure;

use crate::error::*;
use crate::{Axis, Node};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelGraph {
    pub nodes: Vec<Arc<Node>>,
    /// Nodes whose live buffers must fit the vector-compute buffer together.
    pub critical_nodes: Vec<Arc<Node>>,
    /// Every axis of the graph, ordered by `dim_axis`.
    pub global_axis_vec: Vec<Axis>,
}

impl ModelGraph {
    /// Build a graph, validating the invariants the tiling resolvers rely on.
    ///
    /// # Errors
    ///
    /// Fails when the axis vector is empty or unordered, an axis has a zero range
    /// or a tile outside `1..=range`, a node lacks an output shape or references an
    /// unknown axis, or a critical node is not one of `nodes`.
    pub fn try_new(nodes: Vec<Arc<Node>>, critical_nodes: Vec<Arc<Node>>, global_axis_vec: Vec<Axis>) -> Result<Self> {
        let graph = Self { nodes, critical_nodes, global_axis_vec };
        graph.validate()?;
        Ok(graph)
    }

    /// Re-check the invariants of [`ModelGraph::try_new`].
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.global_axis_vec.is_empty(), EmptyAxisVecSnafu);

        let mut previous: Option<usize> = None;
        for axis in &self.global_axis_vec {
            ensure!(axis.range > 0, ZeroRangeSnafu { name: axis.name.clone() });
            ensure!(
                (1..=axis.range).contains(&axis.c0_tiling),
                TileOutOfRangeSnafu { name: axis.name.clone(), tile: axis.c0_tiling, range: axis.range }
            );
            if let Some(previous) = previous {
                ensure!(
                    axis.dim_axis > previous,
                    UnorderedDimAxisSnafu { name: axis.name.clone(), dim_axis: axis.dim_axis, previous }
                );
            }
            previous = Some(axis.dim_axis);
        }

        for node in &self.nodes {
            ensure!(!node.transformed_output_shape.is_empty(), MissingOutputShapeSnafu { node: node.name.clone() });
            for node_axis in &node.axis_of_node {
                ensure!(
                    self.axis_by_dim(node_axis.dim_axis).is_some(),
                    UnknownNodeAxisSnafu { node: node.name.clone(), dim_axis: node_axis.dim_axis }
                );
            }
        }

        for critical in &self.critical_nodes {
            ensure!(
                self.nodes.iter().any(|n| Arc::ptr_eq(n, critical)),
                ForeignCriticalNodeSnafu { node: critical.name.clone() }
            );
        }

        Ok(())
    }

    /// Minimum extent the axis takes across the nodes iterating over it, and the
    /// largest data coefficient among those nodes (0 when no node uses the axis).
    pub fn min_shape_and_data_coef(&self, axis: &Axis) -> (usize, usize) {
        let mut min_shape = axis.range;
        let mut data_coef = 0;
        for node in &self.nodes {
            let Some(node_axis) = node.node_axis(axis.dim_axis) else {
                continue;
            };
            min_shape = min_shape.min(node_axis.range);
            data_coef = data_coef.max(node.data_coef());
        }
        (min_shape, data_coef)
    }

    pub fn axis_by_dim(&self, dim_axis: usize) -> Option<&Axis> {
        self.global_axis_vec.iter().find(|a| a.dim_axis == dim_axis)
    }

    /// Index of the axis at `dim_axis` inside the global axis vector.
    pub fn position_of_dim(&self, dim_axis: usize) -> Option<usize> {
        self.global_axis_vec.iter().position(|a| a.dim_axis == dim_axis)
    }

    /// Number of axes directly indexing the output tensor.
    pub fn top_level_axis_count(&self) -> usize {
        self.global_axis_vec.iter().filter(|a| a.is_top_level()).count()
    }

    /// The graph combines reduction operators with plain element-wise ones.
    pub fn has_mixed_priority_classes(&self) -> bool {
        let reductions = self.nodes.iter().filter(|n| n.op_type.is_reduction()).count();
        reductions > 0 && reductions < self.nodes.len()
    }

    /// `dim_axis` of the last non-inner axis in the ordering.
    ///
    /// Trailing inner axes (introduced by reductions or broadcasts) are skipped so
    /// that the last dimension is the innermost axis of the output tensor.
    pub fn last_dim_axis(&self) -> Option<usize> {
        let axes = &self.global_axis_vec;
        let mut last = axes.last()?.dim_axis;
        for idx in (1..axes.len()).rev() {
            if !axes[idx].is_inner {
                break;
            }
            last = axes[idx - 1].dim_axis;
        }
        Some(last)
    }
}
