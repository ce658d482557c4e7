//! Events emitted by the wallet contract.

use soroban_sdk::{symbol_short, Address, Env};
use vitalshare_common::DataType;

// ── Internal helper ───────────────────────────────────────────────────────────

fn emit<T: soroban_sdk::IntoVal<Env, soroban_sdk::Val>>(env: &Env, topic: &str, data: T) {
    #[allow(deprecated)]
    env.events()
        .publish((symbol_short!("WALLET"), soroban_sdk::Symbol::new(env, topic)), data);
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
pub struct MaxEntriesUpdatedEvent {
    pub max_entries: u32,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WalletInitializedEvent {
    pub owner: Address,
    pub wallet_id: u64,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DataRegisteredEvent {
    pub owner: Address,
    pub index: u32,
    pub data_type: DataType,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConsentUpdatedEvent {
    pub owner: Address,
    pub index: u32,
    pub consent: bool,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessLoggedEvent {
    pub owner: Address,
    pub index: u32,
    pub accessor: Address,
    pub granted: bool,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EntryDeletedEvent {
    pub owner: Address,
    pub index: u32,
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

pub fn publish_max_entries_updated(env: &Env, max_entries: u32) {
    emit(
        env,
        "MaxEntries",
        MaxEntriesUpdatedEvent {
            max_entries,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_wallet_initialized(env: &Env, owner: Address, wallet_id: u64) {
    emit(
        env,
        "WalletInit",
        WalletInitializedEvent {
            owner,
            wallet_id,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_data_registered(env: &Env, owner: Address, index: u32, data_type: DataType) {
    emit(
        env,
        "DataReg",
        DataRegisteredEvent {
            owner,
            index,
            data_type,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_consent_updated(env: &Env, owner: Address, index: u32, consent: bool) {
    emit(
        env,
        "Consent",
        ConsentUpdatedEvent {
            owner,
            index,
            consent,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_access_logged(
    env: &Env,
    owner: Address,
    index: u32,
    accessor: Address,
    granted: bool,
) {
    emit(
        env,
        "AccessLog",
        AccessLoggedEvent {
            owner,
            index,
            accessor,
            granted,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_entry_deleted(env: &Env, owner: Address, index: u32) {
    emit(
        env,
        "EntryDel",
        EntryDeletedEvent {
            owner,
            index,
            timestamp: env.ledger().timestamp(),
        },
    );
}
