use snafu::Snafu;

pub type Result<T, E = TilingError> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub))]
pub enum TilingError {
    #[snafu(display("model graph rejected: {source}"))]
    InvalidGraph { source: autotile_ir::Error },
    #[snafu(display("no global axis at dim_axis {dim_axis}"))]
    AxisNotFound { dim_axis: usize },
}
