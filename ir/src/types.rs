//! Fundamental type definitions shared by the axis and graph model.
//!
//! - [`DataType`]: element type of an operator output, source of the data coefficient
//! - [`OpType`]: closed set of operator kinds that change memory-cost accounting
//! - [`AxisLabel`]: role labels carried by a loop axis

/// Scalar element types of operator outputs.
///
/// Only the byte width matters to tiling: it is the per-element data coefficient
/// used to convert tile element counts into buffer bytes.
#[derive(Debug, Hash, PartialOrd, Ord)]
#[derive(strum::VariantArray, strum::Display)]
#[derive(enumset::EnumSetType)]
#[cfg_attr(feature = "proptest", derive(proptest_derive::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum DataType {
    Bool,
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Float16,
    BFloat16,
    Float32,
    Float64,
}

impl DataType {
    pub const fn bytes(&self) -> usize {
        match self {
            Self::Bool | Self::Int8 | Self::UInt8 => 1,
            Self::Int16 | Self::UInt16 | Self::Float16 | Self::BFloat16 => 2,
            Self::Int32 | Self::UInt32 | Self::Float32 => 4,
            Self::Int64 | Self::UInt64 | Self::Float64 => 8,
        }
    }
}

/// Operator kinds distinguished by the buffer estimator.
///
/// Reduction kinds need extra scratch or staging buffers; everything else is
/// accounted as a plain element-wise operator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[derive(strum::VariantArray, strum::AsRefStr, strum::Display)]
#[cfg_attr(feature = "proptest", derive(proptest_derive::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OpType {
    /// Reduction over every axis of the input.
    AllReduce,
    /// Source side of a reduction (reads the full extent, writes less).
    ReduceSrc,
    /// Destination side of a reduction (accumulator buffers).
    ReduceDst,
    /// Reduction along the Y (outer) direction.
    ReduceY,
    #[default]
    Elementwise,
}

impl OpType {
    pub const fn is_reduction(&self) -> bool {
        !matches!(self, Self::Elementwise)
    }
}

/// Role labels of a loop axis. An axis may hold several at once.
#[derive(Debug, Hash, PartialOrd, Ord)]
#[derive(strum::VariantArray, strum::Display)]
#[derive(enumset::EnumSetType)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AxisLabel {
    /// Distributed across cores.
    MultiCore,
    /// Processed by vector instructions.
    Vectorization,
    /// Reduced over by some operator.
    Reduction,
}
