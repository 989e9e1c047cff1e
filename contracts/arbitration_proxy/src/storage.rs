//! # Storage
//!
//! | Tier       | Key                   | Type             |
//! |------------|-----------------------|------------------|
//! | instance   | `Config`              | `Config`         |
//! | persistent | `Request(project)`    | `DisputeRequest` |
//! | persistent | `Dispute(dispute_id)` | `u64` project id |
//! | persistent | `Pending(asset, who)` | `i128`           |
//!
//! TTL policy matches StreamFund: instance bumped 7 days below 1 day,
//! persistent entries bumped 30 days below 7 days.

use soroban_sdk::{contracttype, Address, Env};

use crate::types::{Config, DisputeRequest};
use crate::Error;

const DAY_IN_LEDGERS: u32 = 17_280;

const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Config,
    Request(u64),
    Dispute(u64),
    Pending(Address, Address),
}

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn set_config(env: &Env, config: &Config) {
    env.storage().instance().set(&DataKey::Config, config);
    bump_instance(env);
}

pub fn get_config(env: &Env) -> Result<Config, Error> {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)
}

pub fn load_request(env: &Env, project_id: u64) -> Option<DisputeRequest> {
    let key = DataKey::Request(project_id);
    let request = env.storage().persistent().get(&key);
    if request.is_some() {
        bump_persistent(env, &key);
    }
    request
}

pub fn save_request(env: &Env, request: &DisputeRequest) {
    let key = DataKey::Request(request.project_id);
    env.storage().persistent().set(&key, request);
    bump_persistent(env, &key);
}

pub fn clear_request(env: &Env, project_id: u64) {
    env.storage()
        .persistent()
        .remove(&DataKey::Request(project_id));
}

pub fn dispute_project(env: &Env, dispute_id: u64) -> Result<u64, Error> {
    let key = DataKey::Dispute(dispute_id);
    let project_id: u64 = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(Error::DisputeNotFound)?;
    bump_persistent(env, &key);
    Ok(project_id)
}

pub fn set_dispute_project(env: &Env, dispute_id: u64, project_id: u64) {
    let key = DataKey::Dispute(dispute_id);
    env.storage().persistent().set(&key, &project_id);
    bump_persistent(env, &key);
}

pub fn pending_payout(env: &Env, asset: &Address, recipient: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Pending(asset.clone(), recipient.clone()))
        .unwrap_or(0)
}

pub fn set_pending_payout(env: &Env, asset: &Address, recipient: &Address, amount: i128) {
    let key = DataKey::Pending(asset.clone(), recipient.clone());
    if amount == 0 {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, &amount);
        bump_persistent(env, &key);
    }
}
