//! # Reward Distribution Contract
//!
//! Pays owners for anonymized contributions. A claim is keyed by
//! `(owner, pool id, entry index)` and is paid at most once:
//!
//! ```text
//! amount = floor(contribution.aggregate_value * reward_rate / 100)
//! ```
//!
//! The ledger only computes amounts and requests transfers. Token movement is
//! executed by the linked SEP-41 token contract.
//!
//! ## Exactly-once
//! The claim record is written inside the same invocation that checks for it,
//! and before the outbound token call. A failed invocation rolls back every
//! write, so a claim key is either fully paid and recorded, or untouched.
#![no_std]

pub mod events;
pub mod interfaces;
pub mod ledger;
pub mod types;

pub use types::{DataKey, RewardClaim, TransferDirection, TransferRecord};

use interfaces::{PoolClient, WalletClient};
use ledger::LedgerError;
use soroban_sdk::{
    contract, contracterror, contractimpl, symbol_short, token::TokenClient, Address, Env, Symbol,
};
use vitalshare_common::{self as common, AuthorityError};

// ── Storage keys ──────────────────────────────────────────────────────────────

const RATE: Symbol = symbol_short!("RATE");
const TOTAL_REWARDS: Symbol = symbol_short!("TOT_RWD");
const TOKEN: Symbol = symbol_short!("TOKEN");
const WALLET: Symbol = symbol_short!("WALLET");
const POOL: Symbol = symbol_short!("POOL");

/// Percentage of a contribution's aggregate value paid out per claim.
pub const DEFAULT_REWARD_RATE: u32 = 10;
const MAX_REWARD_RATE: u32 = 100;

// ── Contract errors ───────────────────────────────────────────────────────────

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum RewardError {
    NotAuthorized = 300,
    WalletNotFound = 301,
    PoolNotFound = 302,
    NoContribution = 303,
    InvalidRate = 304,
    InsufficientBalance = 305,
    AuthorityNotVerified = 307,
    AlreadyClaimed = 309,
    InvalidAmount = 310,
    TokenContractNotSet = 312,
    AuthorityAlreadySet = 313,
    WalletContractNotSet = 314,
    PoolContractNotSet = 315,
}

fn map_authority_error(e: AuthorityError) -> RewardError {
    match e {
        AuthorityError::NullAddress => RewardError::NotAuthorized,
        AuthorityError::AlreadyBound => RewardError::AuthorityAlreadySet,
        AuthorityError::NotBound => RewardError::AuthorityNotVerified,
    }
}

fn map_ledger_error(e: LedgerError) -> RewardError {
    match e {
        LedgerError::Overflow => RewardError::InvalidAmount,
        LedgerError::InsufficientBalance => RewardError::InsufficientBalance,
    }
}

fn reward_rate(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&RATE)
        .unwrap_or(DEFAULT_REWARD_RATE)
}

fn total_rewards(env: &Env) -> i128 {
    env.storage().instance().get(&TOTAL_REWARDS).unwrap_or(0)
}

/// `floor(value * rate / 100)`; both factors are non-negative so integer
/// division floors.
pub fn compute_reward(aggregate_value: u64, rate: u32) -> i128 {
    (aggregate_value as i128) * (rate as i128) / 100
}

// ── Contract ──────────────────────────────────────────────────────────────────

#[contract]
pub struct RewardDistributionContract;

#[contractimpl]
impl RewardDistributionContract {
    // ── Authority & links ─────────────────────────────────────────────────────

    pub fn set_authority_contract(env: Env, authority: Address) -> Result<(), RewardError> {
        common::bind_authority(&env, &authority).map_err(map_authority_error)?;
        events::publish_authority_set(&env, authority);
        Ok(())
    }

    pub fn get_authority_contract(env: Env) -> Option<Address> {
        common::get_authority(&env)
    }

    /// Link the SEP-41 token rewards are paid in. Authority only.
    pub fn set_token_contract(env: Env, token: Address) -> Result<(), RewardError> {
        Self::link(&env, TOKEN, token)
    }

    pub fn set_wallet_contract(env: Env, wallet: Address) -> Result<(), RewardError> {
        Self::link(&env, WALLET, wallet)
    }

    pub fn set_pool_contract(env: Env, pool: Address) -> Result<(), RewardError> {
        Self::link(&env, POOL, pool)
    }

    fn link(env: &Env, key: Symbol, address: Address) -> Result<(), RewardError> {
        common::set_link(env, &key, &address).map_err(map_authority_error)?;
        events::publish_contract_linked(env, key, address);
        Ok(())
    }

    pub fn get_token_contract(env: Env) -> Option<Address> {
        common::get_link(&env, &TOKEN)
    }

    pub fn get_wallet_contract(env: Env) -> Option<Address> {
        common::get_link(&env, &WALLET)
    }

    pub fn get_pool_contract(env: Env) -> Option<Address> {
        common::get_link(&env, &POOL)
    }

    // ── Reward rate ───────────────────────────────────────────────────────────

    /// Set the payout percentage, `1..=100`. Authority only.
    pub fn set_reward_rate(env: Env, rate: u32) -> Result<(), RewardError> {
        common::require_authority(&env).map_err(map_authority_error)?;
        if rate == 0 || rate > MAX_REWARD_RATE {
            return Err(RewardError::InvalidRate);
        }

        env.storage().instance().set(&RATE, &rate);
        common::extend_instance_ttl(&env);
        events::publish_reward_rate_updated(&env, rate);
        Ok(())
    }

    pub fn get_reward_rate(env: Env) -> u32 {
        reward_rate(&env)
    }

    // ── Funding ───────────────────────────────────────────────────────────────

    /// Move `amount` tokens from `caller` into the ledger and credit the
    /// spendable balance.
    pub fn fund_reward_pool(env: Env, caller: Address, amount: i128) -> Result<(), RewardError> {
        caller.require_auth();

        let token = common::get_link(&env, &TOKEN).ok_or(RewardError::TokenContractNotSet)?;
        if amount <= 0 {
            return Err(RewardError::InvalidAmount);
        }

        let this = env.current_contract_address();
        TokenClient::new(&env, &token).transfer(&caller, &this, &amount);

        let new_balance = ledger::credit(&env, amount).map_err(map_ledger_error)?;
        ledger::record_transfer(&env, caller.clone(), this, amount, TransferDirection::Inbound);
        common::extend_instance_ttl(&env);

        events::publish_pool_funded(&env, caller, amount, new_balance);
        Ok(())
    }

    pub fn get_reward_balance(env: Env) -> i128 {
        ledger::balance(&env)
    }

    // ── Claims ────────────────────────────────────────────────────────────────

    /// Pay the reward for the caller's contribution `(pool_id, entry_index)`
    /// and return the amount paid.
    pub fn claim_reward(
        env: Env,
        caller: Address,
        pool_id: u32,
        entry_index: u32,
    ) -> Result<i128, RewardError> {
        caller.require_auth();

        let wallet = common::get_link(&env, &WALLET).ok_or(RewardError::WalletContractNotSet)?;
        if !WalletClient::new(&env, &wallet).has_wallet(&caller) {
            return Err(RewardError::WalletNotFound);
        }

        let pool_addr = common::get_link(&env, &POOL).ok_or(RewardError::PoolContractNotSet)?;
        let pool = PoolClient::new(&env, &pool_addr);
        if !pool.pool_exists(&pool_id) {
            return Err(RewardError::PoolNotFound);
        }
        let aggregate_value = pool
            .get_contribution(&caller, &pool_id, &entry_index)
            .ok_or(RewardError::NoContribution)?;

        let claim_key = DataKey::Claim(caller.clone(), pool_id, entry_index);
        if env.storage().persistent().has(&claim_key) {
            return Err(RewardError::AlreadyClaimed);
        }

        let amount = compute_reward(aggregate_value, reward_rate(&env));
        if amount == 0 {
            return Err(RewardError::InvalidAmount);
        }
        if ledger::balance(&env) < amount {
            return Err(RewardError::InsufficientBalance);
        }
        let token = common::get_link(&env, &TOKEN).ok_or(RewardError::TokenContractNotSet)?;

        let remaining = ledger::debit(&env, amount).map_err(map_ledger_error)?;
        let claim = RewardClaim {
            amount,
            timestamp: env.ledger().timestamp(),
        };
        env.storage().persistent().set(&claim_key, &claim);
        env.storage()
            .persistent()
            .extend_ttl(&claim_key, common::TTL_THRESHOLD, common::TTL_EXTEND_TO);

        let total = total_rewards(&env).saturating_add(amount);
        env.storage().instance().set(&TOTAL_REWARDS, &total);

        let this = env.current_contract_address();
        ledger::record_transfer(
            &env,
            this.clone(),
            caller.clone(),
            amount,
            TransferDirection::Outbound,
        );
        common::extend_instance_ttl(&env);

        TokenClient::new(&env, &token).transfer(&this, &caller, &amount);

        events::publish_reward_claimed(&env, caller, pool_id, entry_index, amount, remaining);
        Ok(amount)
    }

    pub fn get_claim(
        env: Env,
        owner: Address,
        pool_id: u32,
        entry_index: u32,
    ) -> Option<RewardClaim> {
        env.storage()
            .persistent()
            .get(&DataKey::Claim(owner, pool_id, entry_index))
    }

    /// Cumulative amount paid across all claims.
    pub fn get_total_rewards(env: Env) -> i128 {
        total_rewards(&env)
    }

    // ── Transfer log ──────────────────────────────────────────────────────────

    pub fn get_transfer_count(env: Env) -> u64 {
        ledger::transfer_count(&env)
    }

    pub fn get_transfer(env: Env, seq: u64) -> Option<TransferRecord> {
        ledger::get_transfer(&env, seq)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
