//! Shared utilities and types for the VitalShare contract suite.
//!
//! This crate provides:
//! - [`authority`]: the one-time authority binding every contract carries,
//!   plus authority-gated links to collaborator contracts.
//! - [`types`]: the data-type enumeration and the entry summary the wallet
//!   hands to the anonymization pool.
//! - [`validation`]: byte-length checks shared by the wallet and the pool.
//!
//! Contract-specific errors start at code **100** (wallet), **200** (pool) and
//! **300** (reward ledger), so codes never collide across the suite.

#![no_std]
#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod authority;
pub mod types;
pub mod validation;

pub use authority::*;
pub use types::*;
pub use validation::*;

// ── Storage TTL ──────────────────────────────────────────────────────────────

/// 5,184,000 ledgers ~= 300 days (@ ~5s/ledger)
pub const TTL_THRESHOLD: u32 = 5_184_000;
/// 10,368,000 ledgers ~= 600 days (@ ~5s/ledger)
pub const TTL_EXTEND_TO: u32 = 10_368_000;

/// Extends the lifetime of the calling contract's instance storage.
pub fn extend_instance_ttl(env: &soroban_sdk::Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}
