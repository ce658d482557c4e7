//! Spendable balance and transfer log.
//!
//! The ledger mirrors the tokens it holds for rewards in contract storage so
//! that claims can be checked against funding without querying the token.
//! Every inbound or outbound movement is appended to a sequential log.
//!
//! ## Lifecycle
//! - Funding **credits** the balance and logs an inbound transfer.
//! - A claim **debits** the balance and logs an outbound transfer.

use soroban_sdk::{symbol_short, Address, Env, Symbol};
use vitalshare_common as common;

use crate::types::{DataKey, TransferDirection, TransferRecord};

const BALANCE: Symbol = symbol_short!("BALANCE");
const TRANSFER_SEQ: Symbol = symbol_short!("XFER_SEQ");

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LedgerError {
    /// Balance would exceed `i128::MAX`.
    Overflow,
    /// Balance is lower than the requested debit.
    InsufficientBalance,
}

/// Current spendable balance (0 before any funding).
pub fn balance(env: &Env) -> i128 {
    env.storage().instance().get(&BALANCE).unwrap_or(0)
}

pub fn credit(env: &Env, amount: i128) -> Result<i128, LedgerError> {
    let new_balance = balance(env)
        .checked_add(amount)
        .ok_or(LedgerError::Overflow)?;
    env.storage().instance().set(&BALANCE, &new_balance);
    Ok(new_balance)
}

pub fn debit(env: &Env, amount: i128) -> Result<i128, LedgerError> {
    let current = balance(env);
    if current < amount {
        return Err(LedgerError::InsufficientBalance);
    }
    let new_balance = current - amount;
    env.storage().instance().set(&BALANCE, &new_balance);
    Ok(new_balance)
}

/// Append a transfer record and return its sequence number.
pub fn record_transfer(
    env: &Env,
    from: Address,
    to: Address,
    amount: i128,
    direction: TransferDirection,
) -> u64 {
    let seq = transfer_count(env);
    let key = DataKey::Transfer(seq);
    let record = TransferRecord {
        from,
        to,
        amount,
        direction,
        timestamp: env.ledger().timestamp(),
    };
    env.storage().persistent().set(&key, &record);
    env.storage()
        .persistent()
        .extend_ttl(&key, common::TTL_THRESHOLD, common::TTL_EXTEND_TO);
    env.storage().instance().set(&TRANSFER_SEQ, &(seq + 1));
    seq
}

pub fn transfer_count(env: &Env) -> u64 {
    env.storage().instance().get(&TRANSFER_SEQ).unwrap_or(0)
}

pub fn get_transfer(env: &Env, seq: u64) -> Option<TransferRecord> {
    env.storage().persistent().get(&DataKey::Transfer(seq))
}
