pub mod coding;
pub mod hash;
