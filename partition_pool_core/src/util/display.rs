use std::fmt::{Debug, Display, Formatter, Result};

/// Wrapper type to impl display for iterable types for use with Failure
///
/// `vec![2, 3, 4]` displays as `[2, 3, 4]`, which is how shapes appear in error messages.
pub struct IterDisplay<T, I>
where
	for<'a> &'a I: IntoIterator<Item = &'a T>,
	T: Display,
{
	pub inner: I,
}

impl<T, I> Display for IterDisplay<T, I>
where
	for<'a> &'a I: IntoIterator<Item = &'a T>,
	T: Display,
{
	fn fmt(&self, f: &mut Formatter) -> Result {
		write!(f, "[")?;
		for (i, item) in (&self.inner).into_iter().enumerate() {
			if i > 0 {
				write!(f, ", ")?;
			}
			write!(f, "{}", item)?;
		}
		write!(f, "]")
	}
}

impl<T, I> Debug for IterDisplay<T, I>
where
	for<'a> &'a I: IntoIterator<Item = &'a T>,
	T: Display,
{
	fn fmt(&self, f: &mut Formatter) -> Result {
		Display::fmt(self, f)
	}
}
