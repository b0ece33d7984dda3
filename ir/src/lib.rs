//! Axis and graph model for the autotile tiling backend.
//!
//! Schedule analysis populates these structures; the tiling resolvers in
//! `autotile-schedule` rewrite the tile size of every global axis in place, and
//! the code generator reads the final values back.
//!
//! # Module Organization
//!
//! - [`types`] - Element types, operator kinds and axis role labels
//! - [`axis`] - Loop axes and their tile sizes
//! - [`shape`] - Output shape descriptors and data coefficients
//! - [`node`] - Operator nodes
//! - [`graph`] - The model graph and its global axis vector
//! - [`error`] - Validation errors for malformed graphs

pub mod axis;
pub mod error;
pub mod graph;
pub mod node;
pub mod shape;
pub mod types;


pub use axis::Axis;
pub use error::{Error, Result};
pub use graph::ModelGraph;
pub use node::{Node, NodeAxes};
pub use shape::{Dims, Shape};
pub use types::{AxisLabel, DataType, OpType};

pub use enumset::{EnumSet, enum_set};
