//! # Storage
//!
//! Typed helpers over the three Soroban storage tiers used by StreamFund.
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key            | Type     | Description                          |
//! |----------------|----------|--------------------------------------|
//! | `Config`       | `Config` | Bridge and paired remote addresses   |
//! | `ProjectCount` | `u64`    | Auto-increment project ID counter    |
//! | `StreamCount`  | `u64`    | Auto-increment stream ID counter     |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                  | Type                | Description                         |
//! |----------------------|---------------------|-------------------------------------|
//! | `ProjConfig(id)`     | `ProjectConfig`     | Immutable project terms             |
//! | `ProjState(id)`      | `ProjectState`      | Mutable project totals              |
//! | `Aggregate(id)`      | `AggregateBalance`  | Rate sums for the balance formula   |
//! | `Cancel(id)`         | `CancellationState` | Exit window, snapshots, cooldown    |
//! | `Arbitration(id)`    | `Arbitration`       | Dispute slot (absent = initial)     |
//! | `Stream(id)`         | `Stream`            | Investor position or tombstone      |
//! | `Positions(id, who)` | `u32`               | Open streams of `who` in project    |
//! | `Pending(asset, who)`| `i128`              | Payout that could not be delivered  |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.
//!
//! ## Temporary storage
//!
//! `Lock(id)` marks a project as being mutated by the current invocation.

use soroban_sdk::{contracttype, Address, Env};

use crate::types::{
    AggregateBalance, Arbitration, CancellationState, Config, Project, ProjectConfig,
    ProjectState, Stream, StreamStatus,
};
use crate::Error;

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Config,
    ProjectCount,
    StreamCount,
    ProjConfig(u64),
    ProjState(u64),
    Aggregate(u64),
    Cancel(u64),
    Arbitration(u64),
    Stream(u64),
    Positions(u64, Address),
    Pending(Address, Address),
    Lock(u64),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
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

fn next_id(env: &Env, key: &DataKey) -> u64 {
    bump_instance(env);
    let current: u64 = env.storage().instance().get(key).unwrap_or(0);
    env.storage().instance().set(key, &(current + 1));
    current
}

/// Atomically reads, increments, and stores the project counter.
/// Returns the pre-increment value.
pub fn get_and_increment_project_id(env: &Env) -> u64 {
    next_id(env, &DataKey::ProjectCount)
}

/// Same as [`get_and_increment_project_id`] for streams. Ids of canceled
/// streams are never handed out again.
pub fn get_and_increment_stream_id(env: &Env) -> u64 {
    next_id(env, &DataKey::StreamCount)
}

// ── Persistent Storage Helpers ───────────────────────────────────────

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

fn write<V>(env: &Env, key: DataKey, value: &V)
where
    V: soroban_sdk::IntoVal<Env, soroban_sdk::Val>,
{
    env.storage().persistent().set(&key, value);
    bump_persistent(env, &key);
}

fn read<V>(env: &Env, key: DataKey) -> Option<V>
where
    V: soroban_sdk::TryFromVal<Env, soroban_sdk::Val>,
{
    let value = env.storage().persistent().get(&key);
    if value.is_some() {
        bump_persistent(env, &key);
    }
    value
}

/// Write config and initial state of a brand-new project.
pub fn save_project(env: &Env, project: &Project) {
    let config = ProjectConfig {
        id: project.id,
        owner: project.owner.clone(),
        sell_asset: project.sell_asset.clone(),
        fund_asset: project.fund_asset.clone(),
        sell_deposit: project.sell_deposit,
        fund_deposit: project.fund_deposit,
        start_time: project.start_time,
        stop_time: project.stop_time,
        lock_period: project.lock_period,
    };
    write(env, DataKey::ProjConfig(project.id), &config);
    write(env, DataKey::ProjState(project.id), &project.state());
}

/// Load the full `Project` by combining config and state.
pub fn load_project(env: &Env, id: u64) -> Result<Project, Error> {
    let config: ProjectConfig =
        read(env, DataKey::ProjConfig(id)).ok_or(Error::ProjectNotFound)?;
    let state: ProjectState = read(env, DataKey::ProjState(id)).ok_or(Error::ProjectNotFound)?;
    Ok(Project::from_parts(config, state))
}

/// Persist only the mutable half of `project`.
pub fn save_project_state(env: &Env, project: &Project) {
    write(env, DataKey::ProjState(project.id), &project.state());
}

pub fn load_aggregate(env: &Env, project_id: u64) -> AggregateBalance {
    read(env, DataKey::Aggregate(project_id)).unwrap_or_default()
}

pub fn save_aggregate(env: &Env, project_id: u64, aggregate: &AggregateBalance) {
    write(env, DataKey::Aggregate(project_id), aggregate);
}

pub fn load_cancellation(env: &Env, project_id: u64) -> Result<CancellationState, Error> {
    read(env, DataKey::Cancel(project_id)).ok_or(Error::ProjectNotFound)
}

pub fn save_cancellation(env: &Env, project_id: u64, state: &CancellationState) {
    write(env, DataKey::Cancel(project_id), state);
}

pub fn load_arbitration(env: &Env, project_id: u64) -> Option<Arbitration> {
    read(env, DataKey::Arbitration(project_id))
}

pub fn save_arbitration(env: &Env, project_id: u64, arbitration: &Arbitration) {
    write(env, DataKey::Arbitration(project_id), arbitration);
}

/// Return the slot to its initial (absent) state.
pub fn clear_arbitration(env: &Env, project_id: u64) {
    env.storage()
        .persistent()
        .remove(&DataKey::Arbitration(project_id));
}

/// Load an active stream. Tombstones report `StreamNotFound`.
pub fn load_stream(env: &Env, id: u64) -> Result<Stream, Error> {
    let stream: Stream = read(env, DataKey::Stream(id)).ok_or(Error::StreamNotFound)?;
    if stream.status == StreamStatus::Canceled {
        return Err(Error::StreamNotFound);
    }
    Ok(stream)
}

pub fn save_stream(env: &Env, stream: &Stream) {
    write(env, DataKey::Stream(stream.id), stream);
}

pub fn positions(env: &Env, project_id: u64, investor: &Address) -> u32 {
    read(env, DataKey::Positions(project_id, investor.clone())).unwrap_or(0)
}

pub fn set_positions(env: &Env, project_id: u64, investor: &Address, count: u32) {
    let key = DataKey::Positions(project_id, investor.clone());
    if count == 0 {
        env.storage().persistent().remove(&key);
    } else {
        write(env, key, &count);
    }
}

pub fn pending_payout(env: &Env, asset: &Address, recipient: &Address) -> i128 {
    read(env, DataKey::Pending(asset.clone(), recipient.clone())).unwrap_or(0)
}

pub fn set_pending_payout(env: &Env, asset: &Address, recipient: &Address, amount: i128) {
    let key = DataKey::Pending(asset.clone(), recipient.clone());
    if amount == 0 {
        env.storage().persistent().remove(&key);
    } else {
        write(env, key, &amount);
    }
}

// ── Temporary Storage Helpers ────────────────────────────────────────

pub fn is_locked(env: &Env, project_id: u64) -> bool {
    env.storage().temporary().has(&DataKey::Lock(project_id))
}

pub fn set_lock(env: &Env, project_id: u64) {
    env.storage().temporary().set(&DataKey::Lock(project_id), &true);
}

pub fn clear_lock(env: &Env, project_id: u64) {
    env.storage().temporary().remove(&DataKey::Lock(project_id));
}
