use ndarray::{ArrayBase, Data, Dimension};
use num_traits::Float;
use std::fmt::Debug;

pub trait RelClose<A: Float + Debug> {
	/// Tests `(*x - *y).abs() <= tol * max(y.abs(), 1)` for each pair of elements.
	///
	/// Shapes must match exactly, no broadcasting. Two NaNs compare as close, so NaN propagation can be tested.
	/// The first failure is printed to stderr.
	fn all_relatively_close<S2, D2>(&self, rhs: &ArrayBase<S2, D2>, tol: A) -> bool
	where
		S2: Data<Elem = A>,
		D2: Dimension;
}

impl<A: Float + Debug, S1: Data<Elem = A>, D1: Dimension> RelClose<A> for ArrayBase<S1, D1> {
	fn all_relatively_close<S2, D2>(&self, rhs: &ArrayBase<S2, D2>, tol: A) -> bool
	where
		S2: Data<Elem = A>,
		D2: Dimension,
	{
		if self.shape() != rhs.shape() {
			eprintln!("shape mismatch, found: {:?}, expected: {:?}", self.shape(), rhs.shape());
			return false;
		}

		match self
			.iter()
			.zip(rhs.iter())
			.position(|(&x, &y)| !(x.is_nan() && y.is_nan()) && !((x - y).abs() <= tol * y.abs().max(A::one())))
		{
			Some(i) => {
				let (x, y) = (self.iter().nth(i), rhs.iter().nth(i));
				eprintln!(
					"tolerance failed at element {}, found: {:?}, expect within {:?} of {:?}",
					i, x, tol, y
				);
				false
			}
			None => true,
		}
	}
}
