//! Naive pooling straight over ragged groups, with no padding or weights involved.
use ndarray::{Array3, ArrayBase, Data, Ix3};
use num_traits::Float;
use rand::Rng;
use rand_distr::StandardNormal;

pub fn reference_max<A, S>(input: &ArrayBase<S, Ix3>, groups: &[Vec<usize>]) -> Array3<A>
where
	A: Float,
	S: Data<Elem = A>,
{
	reduce_groups(input, groups, |values| {
		values.fold(A::neg_infinity(), |max, x| if x.is_nan() || x > max { x } else { max })
	})
}

pub fn reference_sum<A, S>(input: &ArrayBase<S, Ix3>, groups: &[Vec<usize>]) -> Array3<A>
where
	A: Float,
	S: Data<Elem = A>,
{
	reduce_groups(input, groups, |values| values.fold(A::zero(), |sum, x| sum + x))
}

pub fn reference_mean<A, S>(input: &ArrayBase<S, Ix3>, groups: &[Vec<usize>]) -> Array3<A>
where
	A: Float,
	S: Data<Elem = A>,
{
	reduce_groups(input, groups, |values| {
		let (sum, count) = values.fold((A::zero(), A::zero()), |(sum, count), x| (sum + x, count + A::one()));
		sum / count
	})
}

fn reduce_groups<A, S, F>(input: &ArrayBase<S, Ix3>, groups: &[Vec<usize>], mut reduce: F) -> Array3<A>
where
	A: Float,
	S: Data<Elem = A>,
	F: FnMut(&mut dyn Iterator<Item = A>) -> A,
{
	let (batch, _nodes, features) = input.dim();
	Array3::from_shape_fn((batch, groups.len(), features), |(b, p, f)| {
		reduce(&mut groups[p].iter().map(|&n| input[[b, n, f]]))
	})
}

/// `partitions` groups with lengths uniform in `1..=max_len` and indices uniform in `0..nodes`.
///
/// Indices are drawn with replacement, so groups can contain duplicates.
pub fn random_groups<R: Rng>(rng: &mut R, partitions: usize, nodes: usize, max_len: usize) -> Vec<Vec<usize>> {
	(0..partitions)
		.map(|_| {
			let len = rng.gen_range(1..=max_len);
			(0..len).map(|_| rng.gen_range(0..nodes)).collect()
		})
		.collect()
}

/// Standard normal values of the given `[batch, nodes, features]` shape.
pub fn random_input<R: Rng>(rng: &mut R, shape: (usize, usize, usize)) -> Array3<f64> {
	Array3::from_shape_simple_fn(shape, || rng.sample(StandardNormal))
}
