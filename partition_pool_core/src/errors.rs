use crate::util::display::IterDisplay;
use failure::Fail;

/// Returned when a partition spec can't be normalized into rectangular tables.
#[derive(Debug, Fail)]
pub enum InvalidPartitionError {
	/// The spec contained no groups at all.
	#[fail(display = "InvalidPartitionError::Empty A partition spec must contain at least one group")]
	Empty,

	/// A group contained no node indices, so it has no defined length or padding element.
	#[fail(
		display = "InvalidPartitionError::EmptyGroup Group {} contains no node indices",
		group
	)]
	EmptyGroup { group: usize },

	/// A signed index was below zero and can't address the node axis.
	#[fail(
		display = "InvalidPartitionError::NegativeIndex Group {} has negative index {} at position {}",
		group, index, position
	)]
	NegativeIndex { group: usize, position: usize, index: i64 },

	#[fail(
		display = "InvalidPartitionError::IndexOverflow Group {} has index {} at position {} which does not fit in usize",
		group, index, position
	)]
	IndexOverflow { group: usize, position: usize, index: i64 },

	/// A group length or pad count has no representation in the requested element type.
	#[fail(
		display = "InvalidPartitionError::UnrepresentableCount The count {} cannot be represented in the element type",
		count
	)]
	UnrepresentableCount { count: usize },
}

/// The ways the tables or tensors handed to a pooling call can disagree.
#[derive(Debug, Fail)]
pub enum ShapeMismatchError {
	#[fail(
		display = "Weight table shape {} must equal index table shape {}",
		weights, indices
	)]
	WeightShape {
		weights: IterDisplay<usize, Vec<usize>>,
		indices: IterDisplay<usize, Vec<usize>>,
	},

	#[fail(
		display = "Partition sizes length ({}) must equal the number of partitions ({})",
		sizes, partitions
	)]
	SizesLength { sizes: usize, partitions: usize },

	/// Index tables need at least one row and one column; pooling an empty row has no defined result.
	#[fail(display = "Index table shape {} must have no zero length axes", shape)]
	EmptyTable { shape: IterDisplay<usize, Vec<usize>> },

	#[fail(
		display = "Input shape {} must have rank 3 (batch, nodes, features)",
		shape
	)]
	InputRank { shape: IterDisplay<usize, Vec<usize>> },
}

impl ShapeMismatchError {
	pub fn weight_shape(weights: &[usize], indices: &[usize]) -> Self {
		ShapeMismatchError::WeightShape {
			weights: IterDisplay { inner: weights.to_vec() },
			indices: IterDisplay { inner: indices.to_vec() },
		}
	}

	pub fn empty_table(shape: &[usize]) -> Self {
		ShapeMismatchError::EmptyTable {
			shape: IterDisplay { inner: shape.to_vec() },
		}
	}

	pub fn input_rank(shape: &[usize]) -> Self {
		ShapeMismatchError::InputRank {
			shape: IterDisplay { inner: shape.to_vec() },
		}
	}
}

/// Fail type returned from the pooling reductions and the gather they are built on.
#[derive(Debug, Fail)]
pub enum PoolError {
	/// Returned when the supplied tables or input tensor have incompatible shapes.
	#[fail(display = "PoolError::ShapeMismatch {}", error)]
	ShapeMismatch { error: ShapeMismatchError },

	/// Returned when the index table references a node beyond the input's node axis.
	///
	/// Only the first offending slot, in row major order, is reported.
	#[fail(
		display = "PoolError::IndexOutOfRange Partition {} slot {} references node {} but the input only has {} nodes",
		partition, slot, index, nodes
	)]
	IndexOutOfRange {
		partition: usize,
		slot: usize,
		index: usize,
		nodes: usize,
	},
}

impl From<ShapeMismatchError> for PoolError {
	fn from(error: ShapeMismatchError) -> PoolError {
		PoolError::ShapeMismatch { error }
	}
}
