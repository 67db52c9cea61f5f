use std::sync::Arc;

use tracing::debug;

use crate::filter::FilterPolicy;
use crate::util::coding::{decode_fixed_32, put_fixed_32};

/// Generate new filter every 2KB of data.
pub const FILTER_BASE_LG: usize = 11;
const FILTER_BASE: u64 = 1 << FILTER_BASE_LG;
// 4bytes offset of the filter offsets array + 1byte base lg
const FILTER_META_LENGTH: usize = 5;
const FILTER_OFFSET_LEN: usize = 4; // u32 length

/// A `FilterBlockBuilder` is used to construct all of the filters for a
/// particular Table. It generates a single string which is stored as
/// a special block in the Table.
///
/// ```text
///
///     +----------+-----+--------------+------------+-----+----------------+--------------+---------+
///     | filter 0 | ... | filter n - 1 |  offset 0  | ... |  offset n - 1  | array offset | base lg |
///     +----------+-----+--------------+------------+-----+----------------+--------------+---------+
///                                      \                                 /   (4-bytes)    (1-byte)
///                                       +------ 4-bytes per filter -----+
///
/// ```
///
/// Filter `i` covers data blocks starting in `[i << base_lg, (i + 1) << base_lg)`.
///
/// The sequence of calls to `FilterBlockBuilder` must match the regexp:
///     (StartBlock AddKey*)* Finish
pub struct FilterBlockBuilder {
    policy: Arc<dyn FilterPolicy>,
    // Flattened key contents of the pending filter.
    keys: Vec<u8>,
    // Starting index in `keys` of each key.
    starts: Vec<usize>,
    // All the filter block data computed so far.
    // `data` includes the trailer only after calling `finish`.
    data: Vec<u8>,
    // The offset of every filter in `data`.
    filter_offsets: Vec<u32>,
}

impl FilterBlockBuilder {
    pub fn new(policy: Arc<dyn FilterPolicy>) -> Self {
        FilterBlockBuilder {
            policy,
            keys: vec![],
            starts: vec![],
            data: vec![],
            filter_offsets: vec![],
        }
    }

    /// Generate filter data for the data block on given `block_offset`.
    pub fn start_block(&mut self, block_offset: u64) {
        let filter_index = block_offset / FILTER_BASE;
        let filter_len = self.filter_offsets.len() as u64;
        assert!(
            filter_index >= filter_len,
            "[FilterBlockBuilder] the filter block index {} should larger the built filters {}.",
            filter_index,
            filter_len,
        );

        while filter_index > self.filter_offsets.len() as u64 {
            self.generate_filter();
        }
    }

    /// Adds the given key into the builder.
    pub fn add_key(&mut self, key: &[u8]) {
        self.starts.push(self.keys.len());
        self.keys.extend_from_slice(key);
    }

    /// Appends the trailer of filter block and returns the filter block data in bytes
    pub fn finish(&mut self) -> &[u8] {
        if !self.starts.is_empty() {
            // Clean up the remaining keys.
            self.generate_filter();
        }

        // Append array of per-filter offsets
        let array_offset = self.data.len() as u32;
        for offset in self.filter_offsets.iter() {
            put_fixed_32(&mut self.data, *offset);
        }

        put_fixed_32(&mut self.data, array_offset);
        // Save encoding parameter in result
        self.data.push(FILTER_BASE_LG as u8);
        debug!(
            policy = self.policy.name(),
            filters = self.filter_offsets.len(),
            bytes = self.data.len(),
            "finished filter block"
        );
        &self.data
    }

    /// Converts pending keys to an encoded filter appended to `data`.
    fn generate_filter(&mut self) {
        self.filter_offsets.push(self.data.len() as u32);
        if self.starts.is_empty() {
            // Fast path if there are no keys for this filter.
            return;
        }

        let keys: Vec<&[u8]> = self
            .starts
            .iter()
            .enumerate()
            .map(|(i, start)| {
                let end = self.starts.get(i + 1).copied().unwrap_or(self.keys.len());
                &self.keys[*start..end]
            })
            .collect();
        self.policy.create_filter(&keys, &mut self.data);

        self.keys.clear();
        self.starts.clear();
    }
}

pub struct FilterBlockReader {
    policy: Arc<dyn FilterPolicy>,
    // Filter data followed by the offsets array. The meta trailer is stripped.
    data: Vec<u8>,
    // Where the offsets array starts in `data`.
    offset: usize,
    // The amount of filters.
    num: usize,
    base_lg: usize,
}

impl FilterBlockReader {
    /// `contents` must stay the exact bytes `FilterBlockBuilder::finish`
    /// returned. A malformed trailer leaves the reader empty, which matches
    /// every key.
    pub fn new(policy: Arc<dyn FilterPolicy>, mut contents: Vec<u8>) -> Self {
        let mut r = FilterBlockReader {
            policy,
            data: vec![],
            offset: 0,
            num: 0,
            base_lg: 0,
        };
        let n = contents.len();
        if n < FILTER_META_LENGTH {
            return r;
        }
        let array_offset = decode_fixed_32(&contents[n - FILTER_META_LENGTH..n - 1]) as usize;
        if array_offset > n - FILTER_META_LENGTH {
            return r;
        }
        r.base_lg = contents[n - 1] as usize;
        r.offset = array_offset;
        r.num = (n - FILTER_META_LENGTH - array_offset) / FILTER_OFFSET_LEN;
        contents.truncate(n - FILTER_META_LENGTH);
        r.data = contents;
        r
    }

    /// Returns true if the given key is probably contained in the given `block_offset` block.
    /// `block_offset` represent the offset of data_block in sstable.
    pub fn key_may_match(&self, block_offset: u64, key: &[u8]) -> bool {
        let i = match block_offset.checked_shr(self.base_lg as u32) {
            Some(i) => i as usize,
            None => return true,
        };
        if i >= self.num {
            // Errors are treated as potential matches.
            return true;
        }
        let start = self.filter_offset(i);
        let limit = if i + 1 < self.num {
            self.filter_offset(i + 1)
        } else {
            // this is the last filter
            self.offset
        };
        if start == limit {
            // Empty filters do not match any keys.
            return false;
        }
        if start < limit && limit <= self.offset {
            return self.policy.key_may_match(key, &self.data[start..limit]);
        }
        true
    }

    #[inline]
    fn filter_offset(&self, i: usize) -> usize {
        let pos = self.offset + i * FILTER_OFFSET_LEN;
        decode_fixed_32(&self.data[pos..pos + FILTER_OFFSET_LEN]) as usize
    }
}
