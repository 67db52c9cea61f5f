use crate::filter::{FilterPolicy, MAX_PROBES};
use crate::util::hash::bloom_hash;
use tracing::trace;

/// Lower bound on the bit array size. Very small arrays give a very high
/// false positive rate.
const MIN_BITS: usize = 64;

/// The classic bloom filter: one bit array per key batch, `k` probes per key
/// derived from a single hash by double hashing.
///
/// Encoded filter:
///
/// ```text
///     +------------------------------+-------------+
///     | bit array (n * 8 bits, n>=8) | k (1-byte)  |
///     +------------------------------+-------------+
/// ```
pub struct BloomFilterPolicy {
    bits_per_key: usize,
    k: usize,
}

impl BloomFilterPolicy {
    pub fn new(bits_per_key: usize) -> Self {
        BloomFilterPolicy {
            bits_per_key,
            k: probes_for(bits_per_key),
        }
    }

    pub fn bits_per_key(&self) -> usize {
        self.bits_per_key
    }

    /// The number of probes written into every filter this policy builds.
    pub fn k(&self) -> usize {
        self.k
    }
}

impl FilterPolicy for BloomFilterPolicy {
    fn name(&self) -> &str {
        "leveldb.BuiltinBloomFilter2"
    }

    fn create_filter(&self, keys: &[&[u8]], dst: &mut Vec<u8>) {
        let (start, bits) = append_bit_array(dst, keys.len(), self.bits_per_key, self.k);
        let array = &mut dst[start..start + bits / 8];
        for key in keys {
            set_probes(array, bits, bloom_hash(key), self.k);
        }
        trace!(keys = keys.len(), bits, k = self.k, "built bloom filter");
    }

    fn key_may_match(&self, key: &[u8], filter: &[u8]) -> bool {
        may_contain(key, filter)
    }
}

/// Number of probes for the given density: `bits_per_key * ln(2)`, clamped to
/// `[1, MAX_PROBES]`.
pub(crate) fn probes_for(bits_per_key: usize) -> usize {
    // We intentionally round down to reduce probing cost a little bit.
    let k = (bits_per_key as f64 * 0.69) as usize; // 0.69 =~ ln(2)
    k.clamp(1, MAX_PROBES)
}

/// Appends a zeroed bit array large enough for `n` keys followed by the probe
/// count. Returns the offset of the array inside `dst` and its size in bits.
pub(crate) fn append_bit_array(
    dst: &mut Vec<u8>,
    n: usize,
    bits_per_key: usize,
    k: usize,
) -> (usize, usize) {
    let bits = std::cmp::max(n * bits_per_key, MIN_BITS);
    let bytes = (bits + 7) / 8;
    let start = dst.len();
    dst.resize(start + bytes, 0);
    // Remember the number of probes in the filter.
    dst.push(k as u8);
    (start, bytes * 8)
}

#[inline]
fn delta(h: u32) -> u32 {
    // Rotate right 17 bits.
    h.rotate_right(17)
}

/// Sets the `k` bits of `array` selected by hash `h`.
#[inline]
pub(crate) fn set_probes(array: &mut [u8], bits: usize, mut h: u32, k: usize) {
    let delta = delta(h);
    for _ in 0..k {
        let pos = h as usize % bits;
        array[pos / 8] |= 1 << (pos % 8);
        h = h.wrapping_add(delta);
    }
}

/// Shared query path of every bloom encoding. The probe count is taken from
/// the filter itself, not from the policy that reads it.
pub(crate) fn may_contain(key: &[u8], filter: &[u8]) -> bool {
    let len = filter.len();
    if len < 2 {
        return false;
    }
    let array = &filter[..len - 1];
    let bits = array.len() * 8;

    let k = filter[len - 1] as usize;
    if k > MAX_PROBES {
        // Reserved for potentially new encodings for short bloom filters.
        // Consider it a match.
        return true;
    }

    let mut h = bloom_hash(key);
    let delta = delta(h);
    for _ in 0..k {
        let pos = h as usize % bits;
        if array[pos / 8] & (1 << (pos % 8)) == 0 {
            return false;
        }
        h = h.wrapping_add(delta);
    }
    true
}
