//! The tiling driver.
//!
//! A [`Tiler`] owns one model graph, one hardware descriptor and one configuration.
//! All resolvers mutate the graph's global axis vector through it, so two runs never
//! share an in-progress solution.

use autotile_ir::{Axis, ModelGraph};
use itertools::Itertools;
use snafu::{OptionExt, ResultExt};

use super::error::*;
use super::{Hardware, TilingConfig, TilingStrategy, mix_type_axis_tile, vec_axis_tile};

#[derive(Debug, Clone)]
pub struct Tiler {
    graph: ModelGraph,
    hardware: Hardware,
    config: TilingConfig,
}

impl Tiler {
    /// Create a tiler with the default configuration.
    pub fn new(graph: ModelGraph, hardware: Hardware) -> Result<Self> {
        Self::with_config(graph, hardware, TilingConfig::default())
    }

    /// Create a tiler, re-validating the graph.
    ///
    /// # Errors
    ///
    /// [`TilingError::InvalidGraph`] when the graph breaks an invariant the
    /// resolvers rely on.
    pub fn with_config(graph: ModelGraph, hardware: Hardware, config: TilingConfig) -> Result<Self> {
        graph.validate().context(InvalidGraphSnafu)?;
        Ok(Self { graph, hardware, config })
    }

    pub fn graph(&self) -> &ModelGraph {
        &self.graph
    }

    pub fn hardware(&self) -> &Hardware {
        &self.hardware
    }

    pub fn config(&self) -> &TilingConfig {
        &self.config
    }

    /// The in-progress solution, ordered by `dim_axis`.
    pub fn axes(&self) -> &[Axis] {
        &self.graph.global_axis_vec
    }

    pub(crate) fn axes_mut(&mut self) -> &mut [Axis] {
        &mut self.graph.global_axis_vec
    }

    /// Overwrite the tile of the axis at `position`, clamped to `1..=range`.
    ///
    /// Out-of-bounds positions are ignored.
    pub fn set_tile(&mut self, position: usize, tile: usize) {
        if let Some(axis) = self.graph.global_axis_vec.get_mut(position) {
            axis.c0_tiling = tile.clamp(1, axis.range);
        }
    }

    /// `dim_axis` of the innermost non-inner axis.
    pub fn last_dim_axis(&self) -> usize {
        // The axis vector is non-empty after validation.
        self.graph.last_dim_axis().unwrap_or_default()
    }

    /// Strategy the driver applies to this graph.
    pub fn strategy(&self) -> TilingStrategy {
        self.config.strategy.select(&self.graph)
    }

    /// Resolve every global axis in order and write the tiles back.
    #[tracing::instrument(skip_all, fields(axes = self.graph.global_axis_vec.len()))]
    pub fn run(&mut self) -> TilingSummary {
        super::tile_graph(self)
    }

    /// Resolve only the axis at `dim_axis` and store its tile.
    ///
    /// # Errors
    ///
    /// [`TilingError::AxisNotFound`] if no global axis has that `dim_axis`.
    pub fn tile_axis(&mut self, dim_axis: usize) -> Result<usize> {
        let position = self.graph.position_of_dim(dim_axis).context(AxisNotFoundSnafu { dim_axis })?;
        let axis = self.graph.global_axis_vec[position].clone();
        let tile = match self.strategy() {
            TilingStrategy::MixType => mix_type_axis_tile(self, &axis).tile,
            TilingStrategy::Auto | TilingStrategy::Vectorize => vec_axis_tile(self, &axis),
        };
        self.set_tile(position, tile);
        Ok(self.graph.global_axis_vec[position].c0_tiling)
    }

    /// Hand the finalized graph to the code generator.
    pub fn into_graph(self) -> ModelGraph {
        self.graph
    }
}

// ============================================================================
// SUMMARY
// ============================================================================

/// Final tile of one axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisTile {
    pub name: String,
    pub dim_axis: usize,
    pub range: usize,
    pub tile: usize,
}

/// Outcome of [`Tiler::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TilingSummary {
    pub strategy: TilingStrategy,
    pub axes: Vec<AxisTile>,
}

impl TilingSummary {
    pub fn from_axes(strategy: TilingStrategy, axes: &[Axis]) -> Self {
        let axes = axes
            .iter()
            .map(|a| AxisTile { name: a.name.clone(), dim_axis: a.dim_axis, range: a.range, tile: a.c0_tiling })
            .collect();
        Self { strategy, axes }
    }

    pub fn tile_of(&self, dim_axis: usize) -> Option<usize> {
        self.axes.iter().find(|a| a.dim_axis == dim_axis).map(|a| a.tile)
    }
}

impl std::fmt::Display for TilingSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let axes = self.axes.iter().map(|a| format!("{}={}/{}", a.name, a.tile, a.range)).join(", ");
        write!(f, "{}: {axes}", self.strategy)
    }
}
