/// Scheduling options for the pooling ops. These never change results.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecConfig {
	pub parallel_batch_threshold: usize,
}

impl ExecConfig {
	/// Inputs with at least this many batch elements are gathered and weighted across the rayon thread pool.
	///
	/// Default: 64
	pub fn parallel_batch_threshold(mut self, parallel_batch_threshold: usize) -> Self {
		self.parallel_batch_threshold = parallel_batch_threshold;
		self
	}

	/// Always run on the calling thread.
	pub fn serial() -> Self {
		ExecConfig::default().parallel_batch_threshold(usize::MAX)
	}

	pub(crate) fn is_parallel(&self, batch: usize) -> bool {
		batch >= self.parallel_batch_threshold
	}
}

impl Default for ExecConfig {
	fn default() -> Self {
		ExecConfig {
			parallel_batch_threshold: 64,
		}
	}
}
