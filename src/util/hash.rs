use crate::util::coding::decode_fixed_32;

/// Seed used by the bloom filter policies.
pub const BLOOM_HASH_SEED: u32 = 0xbc9f1d34;

const MULTIPLIER: u32 = 0xc6a4a793;
const TAIL_SHIFT: u32 = 24;

/// Murmur-like 32-bit hash of `data`.
///
/// The input length is folded into the initial state, so inputs that only differ
/// by trailing zero bytes still scatter apart. All arithmetic wraps on purpose.
pub fn hash(data: &[u8], seed: u32) -> u32 {
    let n = data.len();
    let mut h = seed ^ (n as u32).wrapping_mul(MULTIPLIER);

    let mut chunks = data.chunks_exact(4);
    for word in &mut chunks {
        h = h.wrapping_add(decode_fixed_32(word));
        h = h.wrapping_mul(MULTIPLIER);
        h ^= h >> 16;
    }

    let rest = chunks.remainder();
    if !rest.is_empty() {
        if rest.len() == 3 {
            h = h.wrapping_add(u32::from(rest[2]) << 16);
        }
        if rest.len() >= 2 {
            h = h.wrapping_add(u32::from(rest[1]) << 8);
        }
        h = h.wrapping_add(u32::from(rest[0]));
        h = h.wrapping_mul(MULTIPLIER);
        h ^= h >> TAIL_SHIFT;
    }
    h
}

#[inline]
pub fn bloom_hash(key: &[u8]) -> u32 {
    hash(key, BLOOM_HASH_SEED)
}
