//! `PartitionPooling`, a pooling reduction bound to a fixed, pre-normalized partition table.
use crate::{
	exec::ExecConfig,
	pool::{avg_pool::avg_pool_with, max_pool::max_pool_with, sum_pool::sum_pool_with},
};
use ndarray::{Array3, ArrayBase, ArrayD, ArrayViewD, Data, Ix3};
use num_traits::Float;
use partition_pool_core::{
	errors::{InvalidPartitionError, PoolError, ShapeMismatchError},
	partition::{normalize, NormalizedPartitions, PartitionSpec},
	shape::pooled_shape,
};
use serde::{Deserialize, Serialize};

/// Which reduction is applied to each partition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolingKind {
	Max,
	Sum,
	Average,
}

/// Everything needed to rebuild a `PartitionPooling`.
///
/// The normalized tables are not included, they are always rederived from `partitions`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolingConfig {
	pub kind: PoolingKind,
	pub partitions: PartitionSpec,
}

/// Pools `[batch, nodes, features]` inputs into `[batch, partitions, features]` outputs.
///
/// The partition spec is normalized once on construction and the resulting tables are reused by every call to
/// `pool`. Nothing is mutated afterwards, so a single instance can be shared between threads.
///
/// ```
/// # use partition_pool_ops::pooling::PartitionPooling;
/// # use ndarray::arr3;
/// let pooling = PartitionPooling::<f32>::average(vec![vec![0, 1], vec![2]]).unwrap();
/// let output = pooling.pool(&arr3(&[[[1.0f32], [3.0], [5.0]]])).unwrap();
/// assert_eq!(arr3(&[[[2.0f32], [5.0]]]), output);
/// ```
#[derive(Clone, Debug)]
pub struct PartitionPooling<A> {
	kind: PoolingKind,
	spec: PartitionSpec,
	table: NormalizedPartitions<A>,
	config: ExecConfig,
}

impl<A> PartitionPooling<A>
where
	A: Float + Send + Sync,
{
	pub fn new(kind: PoolingKind, spec: PartitionSpec) -> Result<Self, InvalidPartitionError> {
		let table = normalize(&spec)?;
		Ok(PartitionPooling {
			kind,
			spec,
			table,
			config: ExecConfig::default(),
		})
	}

	pub fn max(groups: Vec<Vec<usize>>) -> Result<Self, InvalidPartitionError> {
		PartitionPooling::new(PoolingKind::Max, PartitionSpec::new(groups)?)
	}

	pub fn sum(groups: Vec<Vec<usize>>) -> Result<Self, InvalidPartitionError> {
		PartitionPooling::new(PoolingKind::Sum, PartitionSpec::new(groups)?)
	}

	pub fn average(groups: Vec<Vec<usize>>) -> Result<Self, InvalidPartitionError> {
		PartitionPooling::new(PoolingKind::Average, PartitionSpec::new(groups)?)
	}

	pub fn from_config(config: PoolingConfig) -> Result<Self, InvalidPartitionError> {
		PartitionPooling::new(config.kind, config.partitions)
	}

	pub fn to_config(&self) -> PoolingConfig {
		PoolingConfig {
			kind: self.kind,
			partitions: self.spec.clone(),
		}
	}

	/// Default: `ExecConfig::default()`
	pub fn with_config(mut self, config: ExecConfig) -> Self {
		self.config = config;
		self
	}

	pub fn kind(&self) -> PoolingKind {
		self.kind
	}

	pub fn spec(&self) -> &PartitionSpec {
		&self.spec
	}

	pub fn table(&self) -> &NormalizedPartitions<A> {
		&self.table
	}

	pub fn num_partitions(&self) -> usize {
		self.table.num_partitions()
	}

	/// The `[batch, partitions, features]` shape `pool` would produce for an input of `input_shape`.
	pub fn output_shape(&self, input_shape: &[usize]) -> Result<[usize; 3], PoolError> {
		pooled_shape(input_shape, self.num_partitions())
	}

	pub fn pool<S>(&self, input: &ArrayBase<S, Ix3>) -> Result<Array3<A>, PoolError>
	where
		S: Data<Elem = A>,
	{
		let table = &self.table;
		match self.kind {
			PoolingKind::Max => max_pool_with(&self.config, input, table.indices()),
			PoolingKind::Sum => sum_pool_with(&self.config, input, table.weights(), table.indices()),
			PoolingKind::Average => avg_pool_with(
				&self.config,
				input,
				table.weights(),
				table.sizes(),
				table.indices(),
			),
		}
	}

	/// As `pool`, for inputs whose rank is only known at runtime.
	pub fn pool_dyn(&self, input: ArrayViewD<A>) -> Result<ArrayD<A>, PoolError> {
		let shape = input.shape().to_vec();
		let input = input
			.into_dimensionality::<Ix3>()
			.map_err(|_| ShapeMismatchError::input_rank(&shape))?;
		Ok(self.pool(&input)?.into_dyn())
	}
}
