//! A storage engine can be configured with a custom `FilterPolicy`. The policy
//! creates a small filter from a set of keys. Filters are stored next to the
//! data they summarize and are consulted before reading that data, which in
//! many cases cuts the number of disk seeks per point lookup down to one.
//!
//! Most callers want the builtin bloom filter (`BloomFilterPolicy`).

mod bloom;
mod noop;
mod vector;

pub use bloom::BloomFilterPolicy;
pub use noop::NoFilterPolicy;
pub use vector::VectorBloomFilterPolicy;

/// Largest probe count a filter may carry. A trailing byte above this value is
/// reserved for encodings newer readers may introduce and always matches.
pub const MAX_PROBES: usize = 30;

pub trait FilterPolicy: Send + Sync {
    /// The name of this policy. If the filter encoding changes in an
    /// incompatible way, the name returned by this method must be changed,
    /// otherwise old incompatible filters may be passed to methods of this type.
    fn name(&self) -> &str;

    /// Appends a filter that summarizes `keys` to `dst`.
    ///
    /// `keys` may contain duplicates. Bytes already in `dst` are left untouched,
    /// so several filters can be packed into one buffer as long as the caller
    /// remembers where each one starts and ends.
    fn create_filter(&self, keys: &[&[u8]], dst: &mut Vec<u8>);

    /// Returns true if `key` may be in the key set the `filter` was built from.
    /// Must return true for every such key; may return true or false for other
    /// keys, but should aim to return false with high probability.
    fn key_may_match(&self, key: &[u8], filter: &[u8]) -> bool;
}
