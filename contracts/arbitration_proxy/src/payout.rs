//! Fee movement. `pull` and `pay` abort the invocation on failure; `push`
//! parks a refund the payer could not receive under `Pending`.

use soroban_sdk::{token, Address, Env};

use crate::{events, storage, Error};

fn transfer(env: &Env, asset: &Address, from: &Address, to: &Address, amount: i128) -> Result<(), Error> {
    match token::Client::new(env, asset).try_transfer(from, to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(Error::TransferFailed),
    }
}

pub fn pull(env: &Env, asset: &Address, from: &Address, amount: i128) -> Result<(), Error> {
    if amount <= 0 {
        return Ok(());
    }
    transfer(env, asset, from, &env.current_contract_address(), amount)
}

pub fn pay(env: &Env, asset: &Address, to: &Address, amount: i128) -> Result<(), Error> {
    if amount <= 0 {
        return Ok(());
    }
    transfer(env, asset, &env.current_contract_address(), to, amount)
}

pub fn push(env: &Env, asset: &Address, to: &Address, amount: i128) {
    if pay(env, asset, to, amount).is_err() {
        let owed = storage::pending_payout(env, asset, to) + amount;
        storage::set_pending_payout(env, asset, to, owed);
        events::payout_deferred(env, asset.clone(), to.clone(), amount);
    }
}

pub fn retry(env: &Env, asset: &Address, recipient: &Address) -> Result<i128, Error> {
    let owed = storage::pending_payout(env, asset, recipient);
    if owed <= 0 {
        return Err(Error::InsufficientBalance);
    }
    storage::set_pending_payout(env, asset, recipient, 0);
    pay(env, asset, recipient, owed)?;
    events::payout_repaid(env, asset.clone(), recipient.clone(), owed);
    Ok(owed)
}
