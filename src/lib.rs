//! Block filters for an LSM storage engine.
//!
//! A `FilterPolicy` turns a batch of keys into a compact filter that answers
//! "possibly present" or "definitely absent" for any later lookup. Filters are
//! plain byte buffers owned by the caller; the policies themselves are
//! stateless and can be shared between threads.

mod error;
pub mod filter;
pub mod opt;
pub mod sstable;
mod util;

pub use error::{Error, IResult};
pub use filter::{BloomFilterPolicy, FilterPolicy, NoFilterPolicy, VectorBloomFilterPolicy};
pub use opt::{FilterKind, Options};
pub use util::hash::{bloom_hash, hash, BLOOM_HASH_SEED};
