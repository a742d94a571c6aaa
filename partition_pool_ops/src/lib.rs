//! Gather and the max, weighted sum and weighted average partition pooling reductions.

pub mod exec;
pub mod gather;
pub mod pool;
pub mod pooling;

pub use pooling::{PartitionPooling, PoolingConfig, PoolingKind};
