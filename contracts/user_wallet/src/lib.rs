//! # User Wallet Contract
//!
//! Owns every account's personal-data entries and their consent flags. It is
//! the leaf of the VitalShare suite: the anonymization pool and the reward
//! ledger read from it, it reads from nobody.
//!
//! ## Entry indexing
//! Entries are stored densely under `(owner, index)`. A new entry lands at the
//! wallet's current `entry_count`, and only the trailing entry may be deleted,
//! so every index below `entry_count` always refers to a live entry.
//!
//! ## Consent
//! Entries are registered with consent off. Only the owner can flip it, and
//! the pool refuses any entry whose consent is off.
#![no_std]

pub mod events;
pub mod types;
pub mod validation;

pub use types::{AccessLog, DataEntry, DataEntryInput, DataKey, Wallet};

use soroban_sdk::{
    contract, contracterror, contractimpl, symbol_short, Address, Env, String, Symbol,
};
use vitalshare_common::{self as common, AuthorityError, EntrySummary};

// ── Storage keys ──────────────────────────────────────────────────────────────

const MAX_ENTRIES: Symbol = symbol_short!("MAX_ENT");
const NEXT_WALLET_ID: Symbol = symbol_short!("NEXT_WID");

/// Per-wallet entry cap until the authority changes it.
pub const DEFAULT_MAX_ENTRIES: u32 = 500;

// ── Contract errors ───────────────────────────────────────────────────────────

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum WalletError {
    NotAuthorized = 100,
    InvalidHash = 101,
    InvalidSource = 102,
    InvalidDataType = 103,
    InvalidDescription = 104,
    MaxEntriesExceeded = 105,
    EntryNotFound = 106,
    InvalidIndex = 107,
    InvalidKey = 108,
    WalletNotFound = 109,
    AlreadyExists = 111,
    AuthorityNotVerified = 112,
    InvalidParam = 113,
    AlreadyLogged = 115,
    AuthorityAlreadySet = 116,
    InvalidCategory = 118,
    InvalidRange = 119,
    InvalidAccessLevel = 120,
    /// Only the highest index of a wallet can be deleted.
    NonTrailingIndex = 122,
}

fn map_authority_error(e: AuthorityError) -> WalletError {
    match e {
        AuthorityError::NullAddress => WalletError::NotAuthorized,
        AuthorityError::AlreadyBound => WalletError::AuthorityAlreadySet,
        AuthorityError::NotBound => WalletError::AuthorityNotVerified,
    }
}

// ── Storage helpers ───────────────────────────────────────────────────────────

fn extend_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, common::TTL_THRESHOLD, common::TTL_EXTEND_TO);
}

fn load_wallet(env: &Env, owner: &Address) -> Result<Wallet, WalletError> {
    env.storage()
        .persistent()
        .get(&DataKey::Wallet(owner.clone()))
        .ok_or(WalletError::WalletNotFound)
}

fn save_wallet(env: &Env, owner: &Address, wallet: &Wallet) {
    let key = DataKey::Wallet(owner.clone());
    env.storage().persistent().set(&key, wallet);
    extend_ttl(env, &key);
}

fn load_entry(env: &Env, owner: &Address, index: u32) -> Option<DataEntry> {
    env.storage()
        .persistent()
        .get(&DataKey::Entry(owner.clone(), index))
}

fn max_entries(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&MAX_ENTRIES)
        .unwrap_or(DEFAULT_MAX_ENTRIES)
}

// ── Contract ──────────────────────────────────────────────────────────────────

#[contract]
pub struct UserWalletContract;

#[contractimpl]
impl UserWalletContract {
    // ── Authority & configuration ─────────────────────────────────────────────

    /// Bind the governing authority. Succeeds once; the null address is refused.
    pub fn set_authority_contract(env: Env, authority: Address) -> Result<(), WalletError> {
        common::bind_authority(&env, &authority).map_err(map_authority_error)?;
        events::publish_authority_set(&env, authority);
        Ok(())
    }

    pub fn get_authority_contract(env: Env) -> Option<Address> {
        common::get_authority(&env)
    }

    /// Change the entry cap applied to every wallet. Authority only.
    pub fn set_max_entries_per_wallet(env: Env, max: u32) -> Result<(), WalletError> {
        if max == 0 {
            return Err(WalletError::InvalidParam);
        }
        common::require_authority(&env).map_err(map_authority_error)?;

        env.storage().instance().set(&MAX_ENTRIES, &max);
        common::extend_instance_ttl(&env);
        events::publish_max_entries_updated(&env, max);
        Ok(())
    }

    pub fn get_max_entries_per_wallet(env: Env) -> u32 {
        max_entries(&env)
    }

    // ── Wallet lifecycle ──────────────────────────────────────────────────────

    /// Create the caller's wallet and return its id.
    pub fn initialize_wallet(env: Env, caller: Address) -> Result<u64, WalletError> {
        caller.require_auth();

        if env
            .storage()
            .persistent()
            .has(&DataKey::Wallet(caller.clone()))
        {
            return Err(WalletError::AlreadyExists);
        }

        let id: u64 = env.storage().instance().get(&NEXT_WALLET_ID).unwrap_or(0);
        let wallet = Wallet {
            id,
            created_at: env.ledger().timestamp(),
            entry_count: 0,
            active: true,
            total_data_size: 0,
        };
        save_wallet(&env, &caller, &wallet);

        env.storage()
            .instance()
            .set(&NEXT_WALLET_ID, &id.saturating_add(1));
        common::extend_instance_ttl(&env);

        events::publish_wallet_initialized(&env, caller, id);
        Ok(id)
    }

    pub fn get_wallet(env: Env, owner: Address) -> Result<Wallet, WalletError> {
        load_wallet(&env, &owner)
    }

    pub fn has_wallet(env: Env, owner: Address) -> bool {
        env.storage().persistent().has(&DataKey::Wallet(owner))
    }

    /// Number of wallets ever created.
    pub fn get_wallet_count(env: Env) -> u64 {
        env.storage().instance().get(&NEXT_WALLET_ID).unwrap_or(0)
    }

    // ── Entries ───────────────────────────────────────────────────────────────

    /// Register a data entry and return its index.
    ///
    /// The entry cap is enforced before any field validation.
    pub fn register_data(
        env: Env,
        caller: Address,
        input: DataEntryInput,
    ) -> Result<u32, WalletError> {
        caller.require_auth();

        let mut wallet = load_wallet(&env, &caller)?;
        if wallet.entry_count >= max_entries(&env) {
            return Err(WalletError::MaxEntriesExceeded);
        }

        let entry = validation::validate_entry(input, env.ledger().timestamp())?;
        let data_type = entry.data_type;

        let index = wallet.entry_count;
        let key = DataKey::Entry(caller.clone(), index);
        env.storage().persistent().set(&key, &entry);
        extend_ttl(&env, &key);

        wallet.entry_count = wallet.entry_count.saturating_add(1);
        wallet.total_data_size = wallet.total_data_size.saturating_add(1);
        save_wallet(&env, &caller, &wallet);

        events::publish_data_registered(&env, caller, index, data_type);
        Ok(index)
    }

    /// Set the consent flag of one of the caller's entries. Setting the
    /// current value again is a successful no-op.
    pub fn update_consent(
        env: Env,
        caller: Address,
        index: u32,
        consent: bool,
    ) -> Result<(), WalletError> {
        caller.require_auth();

        let wallet = load_wallet(&env, &caller)?;
        if index >= wallet.entry_count {
            return Err(WalletError::InvalidIndex);
        }
        let mut entry = load_entry(&env, &caller, index).ok_or(WalletError::EntryNotFound)?;

        if entry.consent != consent {
            entry.consent = consent;
            let key = DataKey::Entry(caller.clone(), index);
            env.storage().persistent().set(&key, &entry);
            extend_ttl(&env, &key);
        }

        events::publish_consent_updated(&env, caller, index, consent);
        Ok(())
    }

    /// Append an access record for `(index, accessor)`. Each pair is logged once.
    pub fn log_access(
        env: Env,
        caller: Address,
        index: u32,
        accessor: Address,
        purpose: String,
        granted: bool,
    ) -> Result<(), WalletError> {
        caller.require_auth();

        let wallet = load_wallet(&env, &caller)?;
        if index >= wallet.entry_count {
            return Err(WalletError::InvalidIndex);
        }
        if !env
            .storage()
            .persistent()
            .has(&DataKey::Entry(caller.clone(), index))
        {
            return Err(WalletError::EntryNotFound);
        }
        let key = DataKey::AccessLog(caller.clone(), index, accessor.clone());
        if env.storage().persistent().has(&key) {
            return Err(WalletError::AlreadyLogged);
        }

        let log = AccessLog {
            accessed_at: env.ledger().timestamp(),
            purpose,
            granted,
        };
        env.storage().persistent().set(&key, &log);
        extend_ttl(&env, &key);

        events::publish_access_logged(&env, caller, index, accessor, granted);
        Ok(())
    }

    /// Delete the caller's trailing entry.
    pub fn delete_entry(env: Env, caller: Address, index: u32) -> Result<(), WalletError> {
        caller.require_auth();

        let mut wallet = load_wallet(&env, &caller)?;
        if index >= wallet.entry_count {
            return Err(WalletError::InvalidIndex);
        }
        if index != wallet.entry_count - 1 {
            return Err(WalletError::NonTrailingIndex);
        }

        env.storage()
            .persistent()
            .remove(&DataKey::Entry(caller.clone(), index));

        wallet.entry_count -= 1;
        wallet.total_data_size = wallet.total_data_size.saturating_sub(1);
        save_wallet(&env, &caller, &wallet);

        events::publish_entry_deleted(&env, caller, index);
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────────────────────

    pub fn get_entry_count(env: Env, owner: Address) -> Result<u32, WalletError> {
        load_wallet(&env, &owner).map(|w| w.entry_count)
    }

    pub fn is_entry_consented(env: Env, owner: Address, index: u32) -> Result<bool, WalletError> {
        load_entry(&env, &owner, index)
            .map(|e| e.consent)
            .ok_or(WalletError::EntryNotFound)
    }

    pub fn get_entry(env: Env, owner: Address, index: u32) -> Result<DataEntry, WalletError> {
        load_entry(&env, &owner, index).ok_or(WalletError::EntryNotFound)
    }

    /// Lookup consumed by the anonymization pool.
    pub fn get_entry_summary(env: Env, owner: Address, index: u32) -> Option<EntrySummary> {
        load_entry(&env, &owner, index).map(|e| e.summary())
    }

    pub fn get_access_log(
        env: Env,
        owner: Address,
        index: u32,
        accessor: Address,
    ) -> Result<AccessLog, WalletError> {
        env.storage()
            .persistent()
            .get(&DataKey::AccessLog(owner, index, accessor))
            .ok_or(WalletError::EntryNotFound)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
