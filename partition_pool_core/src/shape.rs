//! Shape checks shared by the pooling reductions.
use crate::errors::{PoolError, ShapeMismatchError};

/// Output shape `[batch, partitions, features]` for an input of shape `[batch, nodes, features]`.
pub fn pooled_shape(input_shape: &[usize], partitions: usize) -> Result<[usize; 3], PoolError> {
	match *input_shape {
		[batch, _nodes, features] => Ok([batch, partitions, features]),
		_ => Err(ShapeMismatchError::input_rank(input_shape).into()),
	}
}

/// Index tables must have at least one partition and at least one slot per partition.
pub fn check_index_table(index_shape: &[usize]) -> Result<(), PoolError> {
	if index_shape.iter().any(|&d| d == 0) {
		return Err(ShapeMismatchError::empty_table(index_shape).into());
	}
	Ok(())
}

pub fn check_weight_table(weight_shape: &[usize], index_shape: &[usize]) -> Result<(), PoolError> {
	if weight_shape != index_shape {
		return Err(ShapeMismatchError::weight_shape(weight_shape, index_shape).into());
	}
	Ok(())
}

pub fn check_sizes(sizes_len: usize, partitions: usize) -> Result<(), PoolError> {
	if sizes_len != partitions {
		return Err(ShapeMismatchError::SizesLength {
			sizes: sizes_len,
			partitions,
		}
		.into());
	}
	Ok(())
}
