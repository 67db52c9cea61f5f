use crate::filter::FilterPolicy;

/// Smallest encoding a bloom reader accepts whose probe count is above
/// `MAX_PROBES`: an empty bit array followed by a reserved probe count.
const PASS_THROUGH_FILTER: [u8; 2] = [0, u8::MAX];

/// A policy that filters nothing. Every key may match.
///
/// It still writes a tiny placeholder filter so that a reader expecting bloom
/// filters, or a filter block that treats an empty range as "no keys", never
/// turns a lookup away.
#[derive(Default)]
pub struct NoFilterPolicy {}

impl FilterPolicy for NoFilterPolicy {
    fn name(&self) -> &str {
        "leveldb.NoFilter"
    }

    fn create_filter(&self, _keys: &[&[u8]], dst: &mut Vec<u8>) {
        dst.extend_from_slice(&PASS_THROUGH_FILTER);
    }

    fn key_may_match(&self, _key: &[u8], _filter: &[u8]) -> bool {
        true
    }
}
