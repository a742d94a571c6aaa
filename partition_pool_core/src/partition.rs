//! Partition specs and their normalization into rectangular gather tables.
//!
//! Groups of unequal length are padded to a common width by repeating each group's last index. The weight table
//! then spreads a weight of one across the last real slot and its pad copies, so that a weighted sum over any row
//! equals the plain sum over the original group.
use crate::errors::InvalidPartitionError;
use itertools::Itertools;
use log::debug;
use ndarray::{s, Array1, Array2, ArrayView1, ArrayView2};
use num_traits::{Float, NumCast};
use serde::{Deserialize, Serialize};

/// An ordered, validated list of node index groups.
///
/// Group `i` is pooled into output row `i`. Indices may repeat within and across groups, and groups may differ in
/// length, but the spec and every group are non-empty.
///
/// Serializes as a plain list of lists. Deserialization goes through the same validation as `PartitionSpec::new`,
/// and negative indices are rejected rather than wrapped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<i64>>", into = "Vec<Vec<usize>>")]
pub struct PartitionSpec {
	groups: Vec<Vec<usize>>,
}

impl PartitionSpec {
	pub fn new(groups: Vec<Vec<usize>>) -> Result<Self, InvalidPartitionError> {
		if groups.is_empty() {
			return Err(InvalidPartitionError::Empty);
		}

		if let Some(group) = groups.iter().position(Vec::is_empty) {
			return Err(InvalidPartitionError::EmptyGroup { group });
		}

		Ok(PartitionSpec { groups })
	}

	pub fn groups(&self) -> &[Vec<usize>] {
		&self.groups
	}

	pub fn num_partitions(&self) -> usize {
		self.groups.len()
	}

	/// Lengths of the groups before any padding.
	pub fn group_lens(&self) -> impl Iterator<Item = usize> + '_ {
		self.groups.iter().map(Vec::len)
	}

	/// Length of the longest group, which becomes the width of the normalized tables.
	pub fn max_len(&self) -> usize {
		self.group_lens().max().unwrap_or(0)
	}

	/// Largest node index referenced by any group.
	pub fn max_index(&self) -> usize {
		self.groups.iter().flatten().copied().max().unwrap_or(0)
	}

	pub fn into_groups(self) -> Vec<Vec<usize>> {
		self.groups
	}
}

impl TryFrom<Vec<Vec<i64>>> for PartitionSpec {
	type Error = InvalidPartitionError;

	fn try_from(groups: Vec<Vec<i64>>) -> Result<Self, Self::Error> {
		let groups = groups
			.into_iter()
			.enumerate()
			.map(|(group, indices)| {
				indices
					.into_iter()
					.enumerate()
					.map(|(position, index)| {
						if index < 0 {
							return Err(InvalidPartitionError::NegativeIndex { group, position, index });
						}
						usize::try_from(index).map_err(|_| InvalidPartitionError::IndexOverflow {
							group,
							position,
							index,
						})
					})
					.collect::<Result<Vec<usize>, _>>()
			})
			.collect::<Result<Vec<_>, _>>()?;

		PartitionSpec::new(groups)
	}
}

impl From<PartitionSpec> for Vec<Vec<usize>> {
	fn from(spec: PartitionSpec) -> Self {
		spec.groups
	}
}

/// The rectangular tables derived from a `PartitionSpec`.
///
/// * `indices`: shape `[partitions, width]`, each row is a group right padded with copies of its last index.
/// * `weights`: same shape, 1 for ordinary slots, `1/(pad + 1)` for the last real slot and each pad slot.
/// * `sizes`: the original group lengths, which each row of `weights` sums to.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedPartitions<A> {
	indices: Array2<usize>,
	weights: Array2<A>,
	sizes: Array1<A>,
}

impl<A: Float> NormalizedPartitions<A> {
	pub fn indices(&self) -> ArrayView2<usize> {
		self.indices.view()
	}

	pub fn weights(&self) -> ArrayView2<A> {
		self.weights.view()
	}

	pub fn sizes(&self) -> ArrayView1<A> {
		self.sizes.view()
	}

	pub fn num_partitions(&self) -> usize {
		self.indices.nrows()
	}

	/// Padded row length, the longest group in the spec.
	pub fn width(&self) -> usize {
		self.indices.ncols()
	}

	pub fn into_parts(self) -> (Array2<usize>, Array2<A>, Array1<A>) {
		(self.indices, self.weights, self.sizes)
	}
}

/// Pads every group of `spec` to the longest group length and builds the matching correction weights.
///
/// Row `i` of every output table corresponds to group `i` of the spec.
pub fn normalize<A: Float>(spec: &PartitionSpec) -> Result<NormalizedPartitions<A>, InvalidPartitionError> {
	let partitions = spec.num_partitions();
	let width = spec.max_len();

	let mut indices = Array2::<usize>::zeros((partitions, width));
	let mut weights = Array2::from_elem((partitions, width), A::one());
	let mut sizes = Array1::<A>::zeros(partitions);
	let mut padded_rows = 0;

	for (i, group) in spec.groups().iter().enumerate() {
		let last = *group.last().ok_or(InvalidPartitionError::EmptyGroup { group: i })?;
		let pad = width - group.len();

		indices
			.row_mut(i)
			.iter_mut()
			.zip(group.iter().copied().pad_using(width, |_| last))
			.for_each(|(slot, index)| *slot = index);

		// the last real slot shares its unit weight with its copies
		if pad > 0 {
			let share = A::one() / count::<A>(pad + 1)?;
			weights.row_mut(i).slice_mut(s![group.len() - 1..]).fill(share);
			padded_rows += 1;
		}

		sizes[i] = count(group.len())?;
	}

	debug!(
		"normalized {} partitions to width {} ({} rows padded)",
		partitions, width, padded_rows
	);

	Ok(NormalizedPartitions { indices, weights, sizes })
}

/// Validates raw groups then normalizes them, see `normalize`.
pub fn normalize_partitions<A: Float>(
	groups: Vec<Vec<usize>>,
) -> Result<NormalizedPartitions<A>, InvalidPartitionError> {
	normalize(&PartitionSpec::new(groups)?)
}

fn count<A: Float>(n: usize) -> Result<A, InvalidPartitionError> {
	<A as NumCast>::from(n).ok_or(InvalidPartitionError::UnrepresentableCount { count: n })
}

#[cfg(test)]
mod tests {
	use super::{normalize, normalize_partitions, PartitionSpec};
	use crate::errors::InvalidPartitionError;
	use ndarray::{arr1, arr2, Axis};

	#[test]
	fn pads_short_group_with_last_index() {
		let table = normalize_partitions::<f32>(vec![vec![0, 1], vec![2]]).unwrap();

		assert_eq!(arr2(&[[0usize, 1], [2, 2]]), table.indices());
		assert_eq!(arr2(&[[1.0f32, 1.0], [0.5, 0.5]]), table.weights());
		assert_eq!(arr1(&[2.0f32, 1.0]), table.sizes());
		assert_eq!(2, table.num_partitions());
		assert_eq!(2, table.width());
	}

	#[test]
	fn last_real_slot_shares_weight_with_pads() {
		let table = normalize_partitions::<f64>(vec![vec![5, 6, 7, 8, 9], vec![3, 4]]).unwrap();

		assert_eq!(arr2(&[[5usize, 6, 7, 8, 9], [3, 4, 4, 4, 4]]), table.indices());
		assert_eq!(
			arr2(&[[1.0f64, 1.0, 1.0, 1.0, 1.0], [1.0, 0.25, 0.25, 0.25, 0.25]]),
			table.weights()
		);
		assert_eq!(arr1(&[5.0f64, 2.0]), table.sizes());
	}

	#[test]
	fn singleton_group_spreads_over_full_width() {
		let table = normalize_partitions::<f32>(vec![vec![3], vec![0, 1, 2, 4]]).unwrap();

		assert_eq!(arr2(&[[3usize, 3, 3, 3], [0, 1, 2, 4]]), table.indices());
		assert_eq!(arr1(&[0.25f32, 0.25, 0.25, 0.25]), table.weights().row(0));
		assert_eq!(1.0f32, table.weights().row(0).sum());
	}

	#[test]
	fn full_width_groups_are_untouched() {
		let table = normalize_partitions::<f32>(vec![vec![0, 0, 1], vec![2, 1, 0]]).unwrap();

		assert_eq!(arr2(&[[0usize, 0, 1], [2, 1, 0]]), table.indices());
		assert!(table.weights().iter().all(|&w| w == 1.0));
		assert_eq!(arr1(&[3.0f32, 3.0]), table.sizes());
	}

	#[test]
	fn row_sums_match_group_lengths() {
		let groups = vec![
			vec![0],
			(0..11).collect(),
			vec![4, 4],
			vec![1, 2, 3],
			(0..7).rev().collect(),
			vec![9; 10],
		];
		let table = normalize_partitions::<f64>(groups.clone()).unwrap();

		for ((row_sum, &size), group) in table
			.weights()
			.sum_axis(Axis(1))
			.iter()
			.zip(table.sizes())
			.zip(&groups)
		{
			assert_eq!(group.len() as f64, size);
			assert!((row_sum - size).abs() < 1e-12, "{} vs {}", row_sum, size);
		}
	}

	#[test]
	fn row_sums_exact_for_power_of_two_shares() {
		// pads of 1, 3 and 7 give shares of 1/2, 1/4 and 1/8
		let table = normalize_partitions::<f32>(vec![(0..8).collect(), (0..7).collect(), vec![1, 2, 3, 4, 5], vec![6]])
			.unwrap();

		assert_eq!(table.sizes(), table.weights().sum_axis(Axis(1)));
	}

	#[test]
	fn order_follows_spec() {
		let forward = normalize_partitions::<f32>(vec![vec![0], vec![1, 2], vec![3, 4, 5]]).unwrap();
		let reversed = normalize_partitions::<f32>(vec![vec![3, 4, 5], vec![1, 2], vec![0]]).unwrap();

		for i in 0..3 {
			assert_eq!(forward.indices().row(i), reversed.indices().row(2 - i));
			assert_eq!(forward.weights().row(i), reversed.weights().row(2 - i));
			assert_eq!(forward.sizes()[i], reversed.sizes()[2 - i]);
		}
	}

	#[test]
	fn empty_spec_rejected() {
		assert!(matches!(
			normalize_partitions::<f32>(vec![]),
			Err(InvalidPartitionError::Empty)
		));
	}

	#[test]
	fn empty_group_rejected() {
		assert!(matches!(
			PartitionSpec::new(vec![vec![1], vec![], vec![2]]),
			Err(InvalidPartitionError::EmptyGroup { group: 1 })
		));
	}

	#[test]
	fn negative_index_rejected() {
		let result = PartitionSpec::try_from(vec![vec![0i64, 1], vec![2, -3]]);
		assert!(matches!(
			result,
			Err(InvalidPartitionError::NegativeIndex {
				group: 1,
				position: 1,
				index: -3
			})
		));
	}

	#[test]
	fn spec_accessors() {
		let spec = PartitionSpec::try_from(vec![vec![4i64, 2], vec![7], vec![1, 1, 1]]).unwrap();

		assert_eq!(3, spec.num_partitions());
		assert_eq!(vec![2, 1, 3], spec.group_lens().collect::<Vec<_>>());
		assert_eq!(3, spec.max_len());
		assert_eq!(7, spec.max_index());

		let table = normalize::<f32>(&spec).unwrap();
		assert_eq!(arr2(&[[4usize, 2, 2], [7, 7, 7], [1, 1, 1]]), table.indices());
	}

	#[test]
	fn serde_round_trip() {
		let spec = PartitionSpec::new(vec![vec![0, 1], vec![2]]).unwrap();

		let json = serde_json::to_string(&spec).unwrap();
		assert_eq!("[[0,1],[2]]", json);

		let back: PartitionSpec = serde_json::from_str(&json).unwrap();
		assert_eq!(spec, back);
	}

	#[test]
	fn serde_validates() {
		assert!(serde_json::from_str::<PartitionSpec>("[]").is_err());
		assert!(serde_json::from_str::<PartitionSpec>("[[0], []]").is_err());
		assert!(serde_json::from_str::<PartitionSpec>("[[0, -1]]").is_err());
		assert!(serde_json::from_str::<PartitionSpec>("[[0, 1.5]]").is_err());
	}
}
