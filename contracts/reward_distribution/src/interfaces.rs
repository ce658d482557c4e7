//! Read-only views of the upstream contracts the ledger depends on.

use soroban_sdk::{Address, Env};

#[soroban_sdk::contractclient(name = "WalletClient")]
#[allow(dead_code)]
pub trait WalletInterface {
    fn has_wallet(env: Env, owner: Address) -> bool;
}

#[soroban_sdk::contractclient(name = "PoolClient")]
#[allow(dead_code)]
pub trait PoolInterface {
    fn pool_exists(env: Env, pool_id: u32) -> bool;

    /// Aggregate value of the contribution at `(owner, pool_id, entry_index)`.
    fn get_contribution(env: Env, owner: Address, pool_id: u32, entry_index: u32) -> Option<u64>;
}
