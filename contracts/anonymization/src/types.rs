use soroban_sdk::{contracttype, Address, BytesN, String};
use vitalshare_common::DataType;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Pool(u32),
    /// (owner, pool id, source entry index)
    Contribution(Address, u32, u32),
}

/// A category/type-bound pool of anonymized contributions.
///
/// `total_value` and `entry_count` are maintained incrementally and always
/// equal the sum and count of the pool's live contributions.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pool {
    pub category: String,
    pub data_type: DataType,
    pub entry_count: u32,
    pub total_value: u64,
    pub min_value: u64,
    pub max_value: u64,
    pub creator: Address,
    pub created_at: u64,
}

/// One owner's anonymized contribution derived from a single wallet entry.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AnonymizedEntry {
    pub anon_hash: BytesN<32>,
    pub timestamp: u64,
    pub aggregate_value: u64,
}
