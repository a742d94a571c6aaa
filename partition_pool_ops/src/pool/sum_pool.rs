use crate::{exec::ExecConfig, gather::gather_nodes};
use log::trace;
use ndarray::{Array3, Array4, ArrayBase, ArrayView2, Axis, Data, Ix3, Zip};
use num_traits::Float;
use partition_pool_core::{errors::PoolError, shape::check_weight_table};

/// Weighted Sum Partition Pooling
///
/// Output `[b, p, f]` is the sum over slots `w` of `weights[p, w] * input[b, indices[p, w], f]`.
/// With the tables from `normalize` this equals the unweighted sum over the original group, whatever padding the row
/// received.
pub fn sum_pool<A, S>(
	input: &ArrayBase<S, Ix3>,
	weights: ArrayView2<A>,
	indices: ArrayView2<usize>,
) -> Result<Array3<A>, PoolError>
where
	A: Float + Send + Sync,
	S: Data<Elem = A>,
{
	sum_pool_with(&ExecConfig::default(), input, weights, indices)
}

pub fn sum_pool_with<A, S>(
	config: &ExecConfig,
	input: &ArrayBase<S, Ix3>,
	weights: ArrayView2<A>,
	indices: ArrayView2<usize>,
) -> Result<Array3<A>, PoolError>
where
	A: Float + Send + Sync,
	S: Data<Elem = A>,
{
	trace!("sum_pool input {:?} partitions {:?}", input.shape(), indices.shape());

	check_weight_table(weights.shape(), indices.shape())?;

	let mut gathered = gather_nodes(input, indices, config)?;
	apply_weights(&mut gathered, weights, config);

	Ok(gathered.sum_axis(Axis(2)))
}

/// Scales `gathered[b, p, w, f]` by `weights[p, w]`.
pub(crate) fn apply_weights<A>(gathered: &mut Array4<A>, weights: ArrayView2<A>, config: &ExecConfig)
where
	A: Float + Send + Sync,
{
	let batch = gathered.len_of(Axis(0));
	let zip = Zip::from(gathered).and_broadcast(weights.insert_axis(Axis(2)));

	if config.is_parallel(batch) {
		zip.par_for_each(|x, &w| *x = *x * w);
	} else {
		zip.for_each(|x, &w| *x = *x * w);
	}
}
