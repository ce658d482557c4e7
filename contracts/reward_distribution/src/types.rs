use soroban_sdk::{contracttype, Address};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Claim key: (owner, pool id, source entry index)
    Claim(Address, u32, u32),
    Transfer(u64),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardClaim {
    pub amount: i128,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum TransferDirection {
    /// Funding moving into the ledger.
    Inbound = 0,
    /// A reward paid out of the ledger.
    Outbound = 1,
}

/// A token movement the ledger requested from the token contract.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransferRecord {
    pub from: Address,
    pub to: Address,
    pub amount: i128,
    pub direction: TransferDirection,
    pub timestamp: u64,
}
