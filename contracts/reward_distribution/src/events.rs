//! Events emitted by the reward ledger.

use soroban_sdk::{symbol_short, Address, Env, Symbol};

fn emit<T: soroban_sdk::IntoVal<Env, soroban_sdk::Val>>(env: &Env, topic: &str, data: T) {
    #[allow(deprecated)]
    env.events()
        .publish((symbol_short!("REWARD"), Symbol::new(env, topic)), data);
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuthoritySetEvent {
    pub authority: Address,
    pub timestamp: u64,
}

/// A collaborator contract (token, wallet or pool) was linked.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContractLinkedEvent {
    pub link: Symbol,
    pub address: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardRateUpdatedEvent {
    pub rate: u32,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolFundedEvent {
    pub funder: Address,
    pub amount: i128,
    pub new_balance: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardClaimedEvent {
    pub claimant: Address,
    pub pool_id: u32,
    pub entry_index: u32,
    pub amount: i128,
    pub remaining: i128,
    pub timestamp: u64,
}

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

pub fn publish_contract_linked(env: &Env, link: Symbol, address: Address) {
    emit(
        env,
        "Linked",
        ContractLinkedEvent {
            link,
            address,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_rate_updated(env: &Env, rate: u32) {
    emit(
        env,
        "RateSet",
        RewardRateUpdatedEvent {
            rate,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pool_funded(env: &Env, funder: Address, amount: i128, new_balance: i128) {
    emit(
        env,
        "Funded",
        PoolFundedEvent {
            funder,
            amount,
            new_balance,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_claimed(
    env: &Env,
    claimant: Address,
    pool_id: u32,
    entry_index: u32,
    amount: i128,
    remaining: i128,
) {
    emit(
        env,
        "Claimed",
        RewardClaimedEvent {
            claimant,
            pool_id,
            entry_index,
            amount,
            remaining,
            timestamp: env.ledger().timestamp(),
        },
    );
}
