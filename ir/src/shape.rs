//! Output shape descriptors of operator nodes.
//!
//! A node's transformed output shape carries its static extents and the element
//! type; the element type provides the data coefficient (bytes per element) the
//! buffer estimator scales tile sizes by.

use smallvec::SmallVec;

use crate::DataType;

/// Static extents of a shape.
///
/// Uses SmallVec with inline capacity of 4 so the common 1D-4D outputs stay on
/// the stack.
pub type Dims = SmallVec<[usize; 4]>;

/// A transformed output shape: static extents plus element type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shape {
    pub dims: Dims,
    pub dtype: DataType,
}

impl Shape {
    pub fn new(dims: impl IntoIterator<Item = usize>, dtype: DataType) -> Self {
        Self { dims: dims.into_iter().collect(), dtype }
    }

    /// Bytes per element of this shape.
    pub const fn data_type_coef(&self) -> usize {
        self.dtype.bytes()
    }
}
