pub mod avg_pool;
pub mod max_pool;
pub mod sum_pool;
