//! Partition specs, their normalized gather tables, and the error types shared by the pooling ops.

pub mod errors;
pub mod partition;
pub mod shape;
pub mod util;
