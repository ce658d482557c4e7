use soroban_sdk::{Address, Env};
use vitalshare_common::EntrySummary;

/// Read-only slice of the wallet contract the pool depends on.
#[soroban_sdk::contractclient(name = "WalletClient")]
#[allow(dead_code)]
pub trait WalletInterface {
    fn has_wallet(env: Env, owner: Address) -> bool;

    fn get_entry_summary(env: Env, owner: Address, index: u32) -> Option<EntrySummary>;
}
