//! Pull-payment balances.
//!
//! Settlement only ever credits; value leaves the contract through
//! [`take`] followed by a token transfer in `withdraw`. A balance grows only
//! through [`credit`] and shrinks only by being taken to zero.

use soroban_sdk::{Address, Env};

use crate::{DataKey, Error, BALANCE_TTL_LEDGERS};

pub fn balance_of(env: &Env, party: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Balance(party.clone()))
        .unwrap_or(0)
}

pub fn credit(env: &Env, party: &Address, amount: i128) -> Result<(), Error> {
    if amount < 0 {
        return Err(Error::InvalidAmount);
    }
    if amount == 0 {
        return Ok(());
    }

    let key = DataKey::Balance(party.clone());
    let updated = balance_of(env, party)
        .checked_add(amount)
        .ok_or(Error::Overflow)?;
    env.storage().persistent().set(&key, &updated);
    env.storage()
        .persistent()
        .extend_ttl(&key, BALANCE_TTL_LEDGERS, BALANCE_TTL_LEDGERS);
    Ok(())
}

/// Zeroes the balance and returns what it held. Must run before the
/// outgoing transfer.
pub fn take(env: &Env, party: &Address) -> Result<i128, Error> {
    let amount = balance_of(env, party);
    if amount == 0 {
        return Err(Error::EmptyBalance);
    }
    env.storage()
        .persistent()
        .remove(&DataKey::Balance(party.clone()));
    Ok(amount)
}
