//! One-time authority binding.
//!
//! Every VitalShare contract holds an optional authority address that can be
//! bound exactly once. Until it is bound, no configuration call (linked
//! contract addresses, tunable parameters) is accepted; afterwards those calls
//! require the authority's signature.
//!
//! The module performs no error mapping of its own. Each contract converts
//! [`AuthorityError`] into its own `#[contracterror]` enum.

use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::extend_instance_ttl;

const AUTHORITY: Symbol = symbol_short!("AUTHORITY");

/// Strkey of the all-zero ed25519 account. It never signs anything, so it is
/// reserved as the "unset" sentinel and rejected everywhere an address is bound.
pub const NULL_ADDRESS_STRKEY: &str = "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF";

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AuthorityError {
    /// The supplied address is the reserved null address.
    NullAddress,
    /// An authority is already bound.
    AlreadyBound,
    /// No authority has been bound yet.
    NotBound,
}

/// The reserved null address.
pub fn null_address(env: &Env) -> Address {
    Address::from_str(env, NULL_ADDRESS_STRKEY)
}

pub fn is_null_address(env: &Env, address: &Address) -> bool {
    *address == null_address(env)
}

/// Binds `address` as the contract authority. Succeeds only once.
pub fn bind_authority(env: &Env, address: &Address) -> Result<(), AuthorityError> {
    if is_null_address(env, address) {
        return Err(AuthorityError::NullAddress);
    }
    if env.storage().instance().has(&AUTHORITY) {
        return Err(AuthorityError::AlreadyBound);
    }
    env.storage().instance().set(&AUTHORITY, address);
    extend_instance_ttl(env);
    Ok(())
}

/// Returns the bound authority, if any.
pub fn get_authority(env: &Env) -> Option<Address> {
    env.storage().instance().get(&AUTHORITY)
}

/// Guard for configuration calls: the authority must be bound and must have
/// authorized the current invocation.
pub fn require_authority(env: &Env) -> Result<Address, AuthorityError> {
    let authority = get_authority(env).ok_or(AuthorityError::NotBound)?;
    authority.require_auth();
    Ok(authority)
}

/// Points the link stored under `key` at `address`.
///
/// The authority check runs before the null-address check, so an unbound
/// contract always reports [`AuthorityError::NotBound`].
pub fn set_link(env: &Env, key: &Symbol, address: &Address) -> Result<(), AuthorityError> {
    require_authority(env)?;
    if is_null_address(env, address) {
        return Err(AuthorityError::NullAddress);
    }
    env.storage().instance().set(key, address);
    extend_instance_ttl(env);
    Ok(())
}

/// Returns the address stored under `key`, if one was linked.
pub fn get_link(env: &Env, key: &Symbol) -> Option<Address> {
    env.storage().instance().get(key)
}
