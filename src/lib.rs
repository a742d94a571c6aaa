//! Partition pooling: max, sum and average pooling of per-node features over a fixed set of ragged node groups.
//!
//! Groups are normalized once into a rectangular index table, a correction weight table and the original group
//! sizes. Pooling then gathers the indexed rows of a `[batch, nodes, features]` input and reduces each row of the
//! table into one `[batch, partitions, features]` output entry.

pub use partition_pool_core::{errors, partition, shape};
pub use partition_pool_ops::{
	exec, gather, pool,
	pooling::{PartitionPooling, PoolingConfig, PoolingKind},
};
