use crate::filter::bloom::{append_bit_array, may_contain, probes_for, set_probes};
use crate::filter::FilterPolicy;
use crate::util::hash::bloom_hash;
use tracing::trace;

/// Keys hashed per batch before their probes are scattered.
const HASH_BATCH: usize = 64;

/// A bloom filter policy that builds in two passes per batch of keys: first
/// every key of the batch is hashed into a small buffer, then the probes of
/// all those hashes are set. Hashing dominates the cost of building large
/// filters and runs as a tight loop this way.
///
/// Filters are byte-for-byte identical to the ones built by
/// `BloomFilterPolicy` with the same `bits_per_key`, so either policy can read
/// what the other wrote.
pub struct VectorBloomFilterPolicy {
    bits_per_key: usize,
    k: usize,
}

impl VectorBloomFilterPolicy {
    pub fn new(bits_per_key: usize) -> Self {
        VectorBloomFilterPolicy {
            bits_per_key,
            k: probes_for(bits_per_key),
        }
    }

    pub fn bits_per_key(&self) -> usize {
        self.bits_per_key
    }

    pub fn k(&self) -> usize {
        self.k
    }
}

impl FilterPolicy for VectorBloomFilterPolicy {
    fn name(&self) -> &str {
        "leveldb.VectorBloomFilter"
    }

    fn create_filter(&self, keys: &[&[u8]], dst: &mut Vec<u8>) {
        let (start, bits) = append_bit_array(dst, keys.len(), self.bits_per_key, self.k);
        let array = &mut dst[start..start + bits / 8];
        let mut hashes = [0u32; HASH_BATCH];
        for batch in keys.chunks(HASH_BATCH) {
            for (h, key) in hashes.iter_mut().zip(batch) {
                *h = bloom_hash(key);
            }
            for h in &hashes[..batch.len()] {
                set_probes(array, bits, *h, self.k);
            }
        }
        trace!(keys = keys.len(), bits, k = self.k, "built vector bloom filter");
    }

    fn key_may_match(&self, key: &[u8], filter: &[u8]) -> bool {
        may_contain(key, filter)
    }
}
