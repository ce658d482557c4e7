use soroban_sdk::{contracttype, Address, Bytes, BytesN, String, Symbol};
use vitalshare_common::{DataType, EntrySummary};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Wallet(Address),
    /// (owner, entry index)
    Entry(Address, u32),
    /// (owner, entry index, accessor)
    AccessLog(Address, u32, Address),
}

/// One wallet per account.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Wallet {
    pub id: u64,
    pub created_at: u64,
    /// Dense count of live entries; the next entry lands at this index.
    pub entry_count: u32,
    pub active: bool,
    pub total_data_size: u32,
}

/// A registered personal-data entry.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DataEntry {
    pub data_hash: BytesN<32>,
    pub timestamp: u64,
    pub source: String,
    pub data_type: DataType,
    pub description: String,
    /// Only the owning account can change this.
    pub consent: bool,
    pub encryption_key: Option<BytesN<64>>,
    pub category: String,
    pub value_range_min: u64,
    pub value_range_max: u64,
    pub access_level: u32,
}

impl DataEntry {
    pub fn summary(&self) -> EntrySummary {
        EntrySummary {
            data_type: self.data_type,
            category: self.category.clone(),
            consent: self.consent,
        }
    }
}

/// Raw registration input. Hash and key arrive as unsized `Bytes` so a
/// wrong length is reported as a typed error instead of a decode failure.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DataEntryInput {
    pub data_hash: Bytes,
    pub source: String,
    pub data_type: Symbol,
    pub description: String,
    pub encryption_key: Option<Bytes>,
    pub category: String,
    pub value_range_min: u64,
    pub value_range_max: u64,
    pub access_level: u32,
}

/// Immutable audit record of an access decision on an entry.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessLog {
    pub accessed_at: u64,
    pub purpose: String,
    pub granted: bool,
}
