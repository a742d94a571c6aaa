use crate::{exec::ExecConfig, gather::gather_nodes};
use log::trace;
use ndarray::{Array3, ArrayBase, ArrayView2, Axis, Data, Ix3};
use num_traits::Float;
use partition_pool_core::errors::PoolError;

/// Max Partition Pooling
///
/// Output `[b, p, f]` is the maximum of `input[b, n, f]` over the nodes `n` in row `p` of `indices`.
/// Padded slots repeat a real member of their row, so they never change the maximum and no weights are needed.
/// A NaN member makes the output NaN.
pub fn max_pool<A, S>(input: &ArrayBase<S, Ix3>, indices: ArrayView2<usize>) -> Result<Array3<A>, PoolError>
where
	A: Float + Send + Sync,
	S: Data<Elem = A>,
{
	max_pool_with(&ExecConfig::default(), input, indices)
}

pub fn max_pool_with<A, S>(
	config: &ExecConfig,
	input: &ArrayBase<S, Ix3>,
	indices: ArrayView2<usize>,
) -> Result<Array3<A>, PoolError>
where
	A: Float + Send + Sync,
	S: Data<Elem = A>,
{
	trace!("max_pool input {:?} partitions {:?}", input.shape(), indices.shape());

	let gathered = gather_nodes(input, indices, config)?;

	Ok(gathered.map_axis(Axis(2), |slots| slots.fold(A::neg_infinity(), |max, &x| nan_max(max, x))))
}

fn nan_max<A: Float>(max: A, x: A) -> A {
	if x.is_nan() || x > max {
		x
	} else {
		max
	}
}

#[cfg(test)]
mod tests {
	use super::max_pool;
	use ndarray::{arr2, arr3, Array2};
	use partition_pool_core::partition::normalize_partitions;

	#[test]
	fn forward_test() {
		let input = arr3(&[[[1.0f32], [3.0], [5.0]]]);
		let table = normalize_partitions::<f32>(vec![vec![0, 1], vec![2]]).unwrap();

		let output = max_pool(&input, table.indices()).unwrap();

		assert_eq!(arr3(&[[[3.0f32], [5.0]]]), output);
	}

	#[test]
	fn multiple_batches_and_features() {
		let input = arr3(&[
			[[1.0f64, 9.0], [2.0, 8.0], [3.0, 7.0], [-4.0, 0.0]],
			[[0.0, -1.0], [-2.0, -3.0], [6.0, -6.0], [4.0, 2.0]],
		]);
		let indices = arr2(&[[3usize, 0, 0], [1, 2, 3], [2, 2, 2]]);

		let output = max_pool(&input, indices.view()).unwrap();

		let expected = arr3(&[
			[[1.0, 9.0], [3.0, 8.0], [3.0, 7.0]],
			[[4.0, 2.0], [6.0, 2.0], [6.0, -6.0]],
		]);
		assert_eq!(expected, output);
	}

	#[test]
	fn duplicating_members_does_not_change_max() {
		let input = arr3(&[[[0.5f32, -0.5], [2.5, -2.5], [1.5, -1.5]]]);
		let unpadded = arr2(&[[0usize, 2]]);
		let padded = arr2(&[[0usize, 2, 2, 2, 2]]);

		assert_eq!(
			max_pool(&input, unpadded.view()).unwrap(),
			max_pool(&input, padded.view()).unwrap()
		);
	}

	#[test]
	fn all_negative_members() {
		let input = arr3(&[[[-7.0f32], [-3.0], [-9.0]]]);
		let indices = arr2(&[[0usize, 2], [2, 2]]);

		assert_eq!(arr3(&[[[-7.0f32], [-9.0]]]), max_pool(&input, indices.view()).unwrap());
	}

	#[test]
	fn nan_propagates() {
		let input = arr3(&[[[f32::NAN], [1.0], [2.0]]]);
		let indices = arr2(&[[1usize, 0, 2], [1, 2, 2]]);

		let output = max_pool(&input, indices.view()).unwrap();

		assert!(output[[0, 0, 0]].is_nan());
		assert_eq!(2.0, output[[0, 1, 0]]);
	}

	#[test]
	fn out_of_range_is_error() {
		let input = arr3(&[[[1.0f32], [2.0]]]);
		let indices: Array2<usize> = arr2(&[[0, 2]]);

		assert!(max_pool(&input, indices.view()).is_err());
	}
}
