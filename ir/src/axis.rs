//! Loop axes of the tensor program.
//!
//! Axes are created by schedule analysis with their tile initialized to the full
//! range. The tiling resolvers only ever rewrite [`Axis::c0_tiling`]; the range,
//! position and labels are fixed inputs.

use bon::bon;
use enumset::EnumSet;

use crate::AxisLabel;

/// One loop dimension of the tensor program.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Axis {
    pub name: String,
    /// Position inside the owning tensor; `0` marks a top-level axis of the output.
    pub index: usize,
    /// Total iteration count.
    pub range: usize,
    /// Position in the graph-wide axis ordering (lower = outer).
    pub dim_axis: usize,
    /// Tile size assigned so far, `1..=range`.
    pub c0_tiling: usize,
    pub is_inner: bool,
    pub is_innermost: bool,
    pub labels: EnumSet<AxisLabel>,
}

#[bon]
impl Axis {
    /// Create an axis with builder pattern.
    ///
    /// The tile defaults to the full range, which is how schedule analysis hands
    /// axes over before any tiling decision.
    #[builder]
    pub fn builder(
        #[builder(into)] name: String,
        range: usize,
        dim_axis: usize,
        #[builder(default = 0)] index: usize,
        c0_tiling: Option<usize>,
        #[builder(default = false)] is_inner: bool,
        #[builder(default = false)] is_innermost: bool,
        #[builder(default)] labels: EnumSet<AxisLabel>,
    ) -> Self {
        Self {
            name,
            index,
            range,
            dim_axis,
            c0_tiling: c0_tiling.unwrap_or(range),
            is_inner,
            is_innermost,
            labels,
        }
    }
}

impl Axis {
    pub fn has_label(&self, label: AxisLabel) -> bool {
        self.labels.contains(label)
    }

    /// Axis directly indexing the output tensor.
    pub const fn is_top_level(&self) -> bool {
        self.index == 0
    }

    /// Carries the MultiCore role without the Vectorization role.
    pub fn is_multicore_only(&self) -> bool {
        self.has_label(AxisLabel::MultiCore) && !self.has_label(AxisLabel::Vectorization)
    }

    /// Number of tiles along this axis (`range / c0_tiling`), 0 for an unset tile.
    pub fn tile_count(&self) -> usize {
        self.range.checked_div(self.c0_tiling).unwrap_or(0)
    }

    /// Same position in the global ordering.
    pub const fn same_dim(&self, other: &Axis) -> bool {
        self.dim_axis == other.dim_axis
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[d{}]={}/{}", self.name, self.dim_axis, self.c0_tiling, self.range)
    }
}
