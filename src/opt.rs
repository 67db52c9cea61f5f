use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tracing::debug;

use crate::error::{Error, IResult};
use crate::filter::{BloomFilterPolicy, FilterPolicy, NoFilterPolicy, VectorBloomFilterPolicy};

/// Selects which `FilterPolicy` a table is built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Bloom,
    VectorBloom,
    NoFilter,
}

impl FilterKind {
    /// The policy name persisted alongside filters built by this kind.
    pub fn policy_name(&self) -> &'static str {
        match self {
            FilterKind::Bloom => "leveldb.BuiltinBloomFilter2",
            FilterKind::VectorBloom => "leveldb.VectorBloomFilter",
            FilterKind::NoFilter => "leveldb.NoFilter",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.policy_name())
    }
}

impl FromStr for FilterKind {
    type Err = Error;

    /// Accepts either a full policy name or a short alias.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bloom" | "leveldb.BuiltinBloomFilter2" => Ok(FilterKind::Bloom),
            "vector" | "leveldb.VectorBloomFilter" => Ok(FilterKind::VectorBloom),
            "none" | "leveldb.NoFilter" => Ok(FilterKind::NoFilter),
            other => Err(Error::UnknownFilterPolicy(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Options {
    /// Filter policy used for every table.
    pub filter_policy: FilterKind,
    /// Bits of filter memory spent per key. Doubling it roughly halves the
    /// false positive rate.
    pub bits_per_key: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            filter_policy: FilterKind::Bloom,
            bits_per_key: 10,
        }
    }
}

impl Options {
    pub fn validate(&self) -> IResult<()> {
        if self.bits_per_key == 0 && self.filter_policy != FilterKind::NoFilter {
            return Err(Error::Config(format!(
                "bits_per_key must be positive for {}",
                self.filter_policy
            )));
        }
        Ok(())
    }

    /// Builds the configured policy. Policies are immutable and can be shared
    /// by every table builder and reader.
    pub fn new_filter_policy(&self) -> IResult<Arc<dyn FilterPolicy>> {
        self.validate()?;
        debug!(
            policy = %self.filter_policy,
            bits_per_key = self.bits_per_key,
            "creating filter policy"
        );
        let policy: Arc<dyn FilterPolicy> = match self.filter_policy {
            FilterKind::Bloom => Arc::new(BloomFilterPolicy::new(self.bits_per_key)),
            FilterKind::VectorBloom => Arc::new(VectorBloomFilterPolicy::new(self.bits_per_key)),
            FilterKind::NoFilter => Arc::new(NoFilterPolicy::default()),
        };
        Ok(policy)
    }
}
