//! # Payouts
//!
//! Asset movement in and out of the contract.
//!
//! - [`pull`] is hard: a failed transfer aborts the whole invocation with
//!   `TransferFailed`, so nothing written before it survives.
//! - [`push`] is best-effort: a recipient that rejects the transfer cannot
//!   block the state transition that pays it. The amount is parked under
//!   `Pending(asset, recipient)` and released later by [`retry`].
//!
//! Callers issue pushes only after every storage write of the operation.

use soroban_sdk::{token, Address, Env};

use crate::{events, storage, Error};

pub fn pull(env: &Env, asset: &Address, from: &Address, amount: i128) -> Result<(), Error> {
    let client = token::Client::new(env, asset);
    match client.try_transfer(from, &env.current_contract_address(), &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(Error::TransferFailed),
    }
}

/// Pay `amount` of `asset` to `to`. Returns `false` if the transfer was
/// deferred.
pub fn push(env: &Env, asset: &Address, to: &Address, amount: i128) -> bool {
    if amount <= 0 {
        return true;
    }
    let client = token::Client::new(env, asset);
    match client.try_transfer(&env.current_contract_address(), to, &amount) {
        Ok(Ok(())) => true,
        _ => {
            let owed = storage::pending_payout(env, asset, to) + amount;
            storage::set_pending_payout(env, asset, to, owed);
            events::payout_deferred(env, asset.clone(), to.clone(), amount);
            false
        }
    }
}

/// Deliver everything parked for `recipient` in `asset`.
pub fn retry(env: &Env, asset: &Address, recipient: &Address) -> Result<i128, Error> {
    let owed = storage::pending_payout(env, asset, recipient);
    if owed <= 0 {
        return Err(Error::InsufficientBalance);
    }
    storage::set_pending_payout(env, asset, recipient, 0);

    let client = token::Client::new(env, asset);
    match client.try_transfer(&env.current_contract_address(), recipient, &owed) {
        Ok(Ok(())) => {
            events::payout_repaid(env, asset.clone(), recipient.clone(), owed);
            Ok(owed)
        }
        _ => Err(Error::TransferFailed),
    }
}
