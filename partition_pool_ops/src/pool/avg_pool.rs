use crate::{exec::ExecConfig, pool::sum_pool::sum_pool_with};
use log::trace;
use ndarray::{Array3, ArrayBase, ArrayView1, ArrayView2, Axis, Data, Ix3, Zip};
use num_traits::Float;
use partition_pool_core::{
	errors::PoolError,
	shape::{check_sizes, check_weight_table},
};

/// Weighted Average Partition Pooling
///
/// The weighted sum of `sum_pool` divided by `sizes[p]` for each partition. With the tables from `normalize` this is
/// the arithmetic mean over the original group, independent of padding.
pub fn avg_pool<A, S>(
	input: &ArrayBase<S, Ix3>,
	weights: ArrayView2<A>,
	sizes: ArrayView1<A>,
	indices: ArrayView2<usize>,
) -> Result<Array3<A>, PoolError>
where
	A: Float + Send + Sync,
	S: Data<Elem = A>,
{
	avg_pool_with(&ExecConfig::default(), input, weights, sizes, indices)
}

pub fn avg_pool_with<A, S>(
	config: &ExecConfig,
	input: &ArrayBase<S, Ix3>,
	weights: ArrayView2<A>,
	sizes: ArrayView1<A>,
	indices: ArrayView2<usize>,
) -> Result<Array3<A>, PoolError>
where
	A: Float + Send + Sync,
	S: Data<Elem = A>,
{
	trace!("avg_pool input {:?} partitions {:?}", input.shape(), indices.shape());

	// check everything before gathering
	check_weight_table(weights.shape(), indices.shape())?;
	check_sizes(sizes.len(), indices.nrows())?;

	let mut output = sum_pool_with(config, input, weights, indices)?;

	Zip::from(&mut output)
		.and_broadcast(sizes.insert_axis(Axis(1)))
		.for_each(|x, &size| *x = *x / size);

	Ok(output)
}
