//! Events emitted by the anonymization contract.

use soroban_sdk::{symbol_short, Address, Env, String};
use vitalshare_common::DataType;

fn emit<T: soroban_sdk::IntoVal<Env, soroban_sdk::Val>>(env: &Env, topic: &str, data: T) {
    #[allow(deprecated)]
    env.events()
        .publish((symbol_short!("ANON"), soroban_sdk::Symbol::new(env, topic)), data);
}

// ── Event structs ─────────────────────────────────────────────────────────────

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuthoritySetEvent {
    pub authority: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WalletLinkedEvent {
    pub wallet: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MaxPoolsUpdatedEvent {
    pub max_pools: u32,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolCreatedEvent {
    pub pool_id: u32,
    pub category: String,
    pub data_type: DataType,
    pub creator: Address,
    pub timestamp: u64,
}

/// Carries the pool aggregates as they stand after the change.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContributionChangedEvent {
    pub owner: Address,
    pub pool_id: u32,
    pub entry_index: u32,
    pub aggregate_value: u64,
    pub pool_entry_count: u32,
    pub pool_total_value: u64,
    pub timestamp: u64,
}

// ── Publishers ────────────────────────────────────────────────────────────────

pub fn publish_authority_set(env: &Env, authority: Address) {
    emit(
        env,
        "AuthSet",
        AuthoritySetEvent {
            authority,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_wallet_linked(env: &Env, wallet: Address) {
    emit(
        env,
        "WalletLink",
        WalletLinkedEvent {
            wallet,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_max_pools_updated(env: &Env, max_pools: u32) {
    emit(
        env,
        "MaxPools",
        MaxPoolsUpdatedEvent {
            max_pools,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pool_created(
    env: &Env,
    pool_id: u32,
    category: String,
    data_type: DataType,
    creator: Address,
) {
    emit(
        env,
        "PoolNew",
        PoolCreatedEvent {
            pool_id,
            category,
            data_type,
            creator,
            timestamp: env.ledger().timestamp(),
        },
    );
}

#[allow(clippy::too_many_arguments)]
fn contribution_changed(
    env: &Env,
    topic: &str,
    owner: Address,
    pool_id: u32,
    entry_index: u32,
    aggregate_value: u64,
    pool_entry_count: u32,
    pool_total_value: u64,
) {
    emit(
        env,
        topic,
        ContributionChangedEvent {
            owner,
            pool_id,
            entry_index,
            aggregate_value,
            pool_entry_count,
            pool_total_value,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_contribution_submitted(
    env: &Env,
    owner: Address,
    pool_id: u32,
    entry_index: u32,
    aggregate_value: u64,
    pool: &crate::Pool,
) {
    contribution_changed(
        env,
        "Submitted",
        owner,
        pool_id,
        entry_index,
        aggregate_value,
        pool.entry_count,
        pool.total_value,
    );
}

pub fn publish_contribution_removed(
    env: &Env,
    owner: Address,
    pool_id: u32,
    entry_index: u32,
    aggregate_value: u64,
    pool: &crate::Pool,
) {
    contribution_changed(
        env,
        "Removed",
        owner,
        pool_id,
        entry_index,
        aggregate_value,
        pool.entry_count,
        pool.total_value,
    );
}
