//! Helpers for testing the partition pooling crates against naive implementations.

pub mod reference;
pub mod relatively_close;
