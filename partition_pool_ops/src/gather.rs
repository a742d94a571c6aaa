//! Gather of feature rows along the node axis.
use crate::exec::ExecConfig;
use ndarray::{s, Array4, ArrayBase, ArrayView2, Axis, Data, Ix3, Zip};
use num_traits::Float;
use partition_pool_core::{errors::PoolError, shape::check_index_table};

/// Gathers the rows of `input` named by `indices` along the node axis.
///
/// For input shape `[batch, nodes, features]` and index table shape `[partitions, width]` the output has shape
/// `[batch, partitions, width, features]`, where `output[b, p, w, ..] == input[b, indices[p, w], ..]`.
///
/// Every index is checked against `nodes` before anything is read.
pub fn gather_nodes<A, S>(
	input: &ArrayBase<S, Ix3>,
	indices: ArrayView2<usize>,
	config: &ExecConfig,
) -> Result<Array4<A>, PoolError>
where
	A: Float + Send + Sync,
	S: Data<Elem = A>,
{
	check_index_table(indices.shape())?;

	let (batch, nodes, features) = input.dim();
	check_bounds(indices, nodes)?;

	let (partitions, width) = indices.dim();
	let mut output = Array4::from_elem((batch, partitions, width, features), A::zero());

	let input = input.view();
	let zip = Zip::indexed(output.lanes_mut(Axis(3)));

	if config.is_parallel(batch) {
		zip.par_for_each(|(b, p, w), mut lane| lane.assign(&input.slice(s![b, indices[[p, w]], ..])));
	} else {
		zip.for_each(|(b, p, w), mut lane| lane.assign(&input.slice(s![b, indices[[p, w]], ..])));
	}

	Ok(output)
}

/// Returns the first slot, in row major order, whose index is outside `0..nodes`.
pub fn check_bounds(indices: ArrayView2<usize>, nodes: usize) -> Result<(), PoolError> {
	match indices.indexed_iter().find(|&(_, &index)| index >= nodes) {
		Some(((partition, slot), &index)) => Err(PoolError::IndexOutOfRange {
			partition,
			slot,
			index,
			nodes,
		}),
		None => Ok(()),
	}
}
