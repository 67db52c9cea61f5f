//! Table-level structures built on top of filter policies.

pub mod filter_block;
