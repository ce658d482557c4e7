//! # Anonymization Pool Contract
//!
//! Collects anonymized aggregate values derived from wallet entries into
//! pools bound to one `(category, data type)` pair and one value range.
//!
//! A submission is accepted only when the chain of prior approvals holds:
//! the caller owns a wallet, the source entry exists, its consent flag is on,
//! and its data type and category match the pool exactly.
//!
//! ## Aggregates
//! `Pool::total_value` and `Pool::entry_count` are updated by exact
//! addition on submit and exact subtraction on removal, never recomputed.
#![no_std]

pub mod events;
pub mod types;
pub mod wallet;

pub use types::{AnonymizedEntry, DataKey, Pool};

use soroban_sdk::{
    contract, contracterror, contractimpl, symbol_short, Address, Bytes, BytesN, Env, String,
    Symbol,
};
use vitalshare_common::{self as common, AuthorityError, DataType};
use wallet::WalletClient;

// ── Storage keys ──────────────────────────────────────────────────────────────

const NEXT_POOL_ID: Symbol = symbol_short!("NEXT_PID");
const MAX_POOLS: Symbol = symbol_short!("MAX_POOL");
const WALLET: Symbol = symbol_short!("WALLET");

pub const DEFAULT_MAX_POOLS: u32 = 1000;

// ── Contract errors ───────────────────────────────────────────────────────────

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum PoolError {
    NotAuthorized = 200,
    WalletNotFound = 201,
    EntryNotFound = 202,
    NoConsent = 203,
    InvalidPoolId = 204,
    InvalidHash = 205,
    InvalidCategory = 206,
    PoolNotFound = 207,
    PoolLimitExceeded = 210,
    InvalidDataType = 211,
    AuthorityNotVerified = 212,
    InvalidAggregate = 213,
    InvalidRange = 214,
    AuthorityAlreadySet = 215,
    WalletContractNotSet = 216,
    /// The `(owner, pool, entry)` key already holds a contribution.
    AlreadySubmitted = 217,
    InvalidParam = 218,
}

fn map_authority_error(e: AuthorityError) -> PoolError {
    match e {
        AuthorityError::NullAddress => PoolError::NotAuthorized,
        AuthorityError::AlreadyBound => PoolError::AuthorityAlreadySet,
        AuthorityError::NotBound => PoolError::AuthorityNotVerified,
    }
}

// ── Storage helpers ───────────────────────────────────────────────────────────

fn extend_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, common::TTL_THRESHOLD, common::TTL_EXTEND_TO);
}

fn next_pool_id(env: &Env) -> u32 {
    env.storage().instance().get(&NEXT_POOL_ID).unwrap_or(0)
}

fn max_pools(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&MAX_POOLS)
        .unwrap_or(DEFAULT_MAX_POOLS)
}

fn save_pool(env: &Env, pool_id: u32, pool: &Pool) {
    let key = DataKey::Pool(pool_id);
    env.storage().persistent().set(&key, pool);
    extend_ttl(env, &key);
}

/// Range check followed by the existence check, shared by submit and remove.
fn check_pool_id(env: &Env, pool_id: u32) -> Result<(), PoolError> {
    if pool_id >= next_pool_id(env) {
        return Err(PoolError::InvalidPoolId);
    }
    Ok(())
}

fn read_pool(env: &Env, pool_id: u32) -> Result<Pool, PoolError> {
    env.storage()
        .persistent()
        .get(&DataKey::Pool(pool_id))
        .ok_or(PoolError::PoolNotFound)
}

fn load_pool(env: &Env, pool_id: u32) -> Result<Pool, PoolError> {
    check_pool_id(env, pool_id)?;
    read_pool(env, pool_id)
}

// ── Contract ──────────────────────────────────────────────────────────────────

#[contract]
pub struct AnonymizationContract;

#[contractimpl]
impl AnonymizationContract {
    // ── Authority & configuration ─────────────────────────────────────────────

    pub fn set_authority_contract(env: Env, authority: Address) -> Result<(), PoolError> {
        common::bind_authority(&env, &authority).map_err(map_authority_error)?;
        events::publish_authority_set(&env, authority);
        Ok(())
    }

    pub fn get_authority_contract(env: Env) -> Option<Address> {
        common::get_authority(&env)
    }

    /// Point the pool at the wallet contract it reads entries from. Authority only.
    pub fn set_wallet_contract(env: Env, wallet: Address) -> Result<(), PoolError> {
        common::set_link(&env, &WALLET, &wallet).map_err(map_authority_error)?;
        events::publish_wallet_linked(&env, wallet);
        Ok(())
    }

    pub fn get_wallet_contract(env: Env) -> Option<Address> {
        common::get_link(&env, &WALLET)
    }

    /// Change the pool-count ceiling. Authority only.
    pub fn set_max_pools(env: Env, max: u32) -> Result<(), PoolError> {
        if max == 0 {
            return Err(PoolError::InvalidParam);
        }
        common::require_authority(&env).map_err(map_authority_error)?;

        env.storage().instance().set(&MAX_POOLS, &max);
        common::extend_instance_ttl(&env);
        events::publish_max_pools_updated(&env, max);
        Ok(())
    }

    pub fn get_max_pools(env: Env) -> u32 {
        max_pools(&env)
    }

    // ── Pools ─────────────────────────────────────────────────────────────────

    /// Create a pool and return its id. Pools are never deleted.
    pub fn create_pool(
        env: Env,
        caller: Address,
        category: String,
        data_type: Symbol,
        min_value: u64,
        max_value: u64,
    ) -> Result<u32, PoolError> {
        caller.require_auth();

        let pool_id = next_pool_id(&env);
        if pool_id >= max_pools(&env) {
            return Err(PoolError::PoolLimitExceeded);
        }
        if !common::is_valid_category(&category) {
            return Err(PoolError::InvalidCategory);
        }
        let data_type = DataType::from_symbol(&data_type).ok_or(PoolError::InvalidDataType)?;
        if min_value > max_value {
            return Err(PoolError::InvalidRange);
        }

        let pool = Pool {
            category: category.clone(),
            data_type,
            entry_count: 0,
            total_value: 0,
            min_value,
            max_value,
            creator: caller.clone(),
            created_at: env.ledger().timestamp(),
        };
        save_pool(&env, pool_id, &pool);

        env.storage().instance().set(&NEXT_POOL_ID, &(pool_id + 1));
        common::extend_instance_ttl(&env);

        events::publish_pool_created(&env, pool_id, category, data_type, caller);
        Ok(pool_id)
    }

    /// Number of pools ever created.
    pub fn get_pool_count(env: Env) -> u32 {
        next_pool_id(&env)
    }

    pub fn get_pool(env: Env, pool_id: u32) -> Result<Pool, PoolError> {
        read_pool(&env, pool_id)
    }

    pub fn pool_exists(env: Env, pool_id: u32) -> bool {
        env.storage().persistent().has(&DataKey::Pool(pool_id))
    }

    // ── Contributions ─────────────────────────────────────────────────────────

    /// Submit an anonymized value derived from the caller's entry `entry_index`.
    ///
    /// Checks run in a fixed order, each with its own error: pool id range,
    /// hash length, pool existence, aggregate range, wallet, entry, consent,
    /// data type and category match, duplicate key.
    pub fn anonymize_and_submit(
        env: Env,
        caller: Address,
        entry_index: u32,
        pool_id: u32,
        anon_hash: Bytes,
        aggregate_value: u64,
    ) -> Result<(), PoolError> {
        caller.require_auth();

        check_pool_id(&env, pool_id)?;
        let anon_hash = BytesN::<32>::try_from(anon_hash).map_err(|_| PoolError::InvalidHash)?;
        let mut pool = read_pool(&env, pool_id)?;
        if aggregate_value < pool.min_value || aggregate_value > pool.max_value {
            return Err(PoolError::InvalidAggregate);
        }

        let wallet_addr =
            common::get_link(&env, &WALLET).ok_or(PoolError::WalletContractNotSet)?;
        let wallet = WalletClient::new(&env, &wallet_addr);
        if !wallet.has_wallet(&caller) {
            return Err(PoolError::WalletNotFound);
        }
        let summary = wallet
            .get_entry_summary(&caller, &entry_index)
            .ok_or(PoolError::EntryNotFound)?;
        if !summary.consent {
            return Err(PoolError::NoConsent);
        }
        if summary.data_type != pool.data_type || summary.category != pool.category {
            return Err(PoolError::InvalidDataType);
        }

        let key = DataKey::Contribution(caller.clone(), pool_id, entry_index);
        if env.storage().persistent().has(&key) {
            return Err(PoolError::AlreadySubmitted);
        }

        pool.total_value = pool
            .total_value
            .checked_add(aggregate_value)
            .ok_or(PoolError::InvalidAggregate)?;
        pool.entry_count += 1;

        let record = AnonymizedEntry {
            anon_hash,
            timestamp: env.ledger().timestamp(),
            aggregate_value,
        };
        env.storage().persistent().set(&key, &record);
        extend_ttl(&env, &key);
        save_pool(&env, pool_id, &pool);

        events::publish_contribution_submitted(
            &env,
            caller,
            pool_id,
            entry_index,
            aggregate_value,
            &pool,
        );
        Ok(())
    }

    /// Withdraw the caller's contribution, subtracting exactly its value from
    /// the pool aggregates.
    pub fn remove_from_pool(
        env: Env,
        caller: Address,
        pool_id: u32,
        entry_index: u32,
    ) -> Result<(), PoolError> {
        caller.require_auth();

        let mut pool = load_pool(&env, pool_id)?;
        let key = DataKey::Contribution(caller.clone(), pool_id, entry_index);
        let record: AnonymizedEntry = env
            .storage()
            .persistent()
            .get(&key)
            .ok_or(PoolError::EntryNotFound)?;

        pool.entry_count -= 1;
        pool.total_value -= record.aggregate_value;
        save_pool(&env, pool_id, &pool);
        env.storage().persistent().remove(&key);

        events::publish_contribution_removed(
            &env,
            caller,
            pool_id,
            entry_index,
            record.aggregate_value,
            &pool,
        );
        Ok(())
    }

    pub fn get_anonymized_entry(
        env: Env,
        owner: Address,
        pool_id: u32,
        entry_index: u32,
    ) -> Result<AnonymizedEntry, PoolError> {
        env.storage()
            .persistent()
            .get(&DataKey::Contribution(owner, pool_id, entry_index))
            .ok_or(PoolError::EntryNotFound)
    }

    /// Aggregate value of a live contribution. Lookup consumed by the reward ledger.
    pub fn get_contribution(
        env: Env,
        owner: Address,
        pool_id: u32,
        entry_index: u32,
    ) -> Option<u64> {
        env.storage()
            .persistent()
            .get::<_, AnonymizedEntry>(&DataKey::Contribution(owner, pool_id, entry_index))
            .map(|e| e.aggregate_value)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
