use snafu::Snafu;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Structural problems in a model graph handed over by schedule analysis.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// The global axis vector has no axes to tile.
    #[snafu(display("global axis vector is empty"))]
    EmptyAxisVec,

    /// An axis with zero iterations.
    #[snafu(display("axis {name} has zero range"))]
    ZeroRange { name: String },

    /// Tile size outside `1..=range`.
    #[snafu(display("axis {name} has tile {tile} outside 1..={range}"))]
    TileOutOfRange { name: String, tile: usize, range: usize },

    /// Global axes must be ordered by strictly increasing `dim_axis`.
    #[snafu(display("axis {name} has dim_axis {dim_axis} not after previous dim_axis {previous}"))]
    UnorderedDimAxis { name: String, dim_axis: usize, previous: usize },

    /// Every node needs at least one output shape to derive its data coefficient.
    #[snafu(display("node {node} has no transformed output shape"))]
    MissingOutputShape { node: String },

    /// A node iterates over an axis the global axis vector does not know.
    #[snafu(display("node {node} references unknown dim_axis {dim_axis}"))]
    UnknownNodeAxis { node: String, dim_axis: usize },

    /// Critical nodes must be drawn from the graph's own node list.
    #[snafu(display("critical node {node} is not part of the graph"))]
    ForeignCriticalNode { node: String },
}
