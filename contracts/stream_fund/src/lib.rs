//! # StreamFund Contract
//!
//! Continuous per-second fundraising. A project escrows a *sell* asset;
//! investors join at any time with a *fund* asset and the two legs stream
//! against each other until the project stops. An investor can contest the
//! project; if arbitration (or the project's silence) goes the investor's
//! way, the accounting is frozen and the remaining funds are redirected.
//!
//! | Phase        | Entry Point(s)                                               |
//! |--------------|--------------------------------------------------------------|
//! | Bootstrap    | [`StreamFund::init`]                                         |
//! | Projects     | `create_project`, `project_balance_of`, `withdraw_from_project`, `project_refund` |
//! | Investing    | `create_stream`, `invest_balance_of`, `withdraw_from_invest`, `cancel_invest` |
//! | Arbitration  | `request_reclaim`, `reclaim_timeout`, `handle_received`, `handle_rejected` |
//! | Bridge       | `receive_message`                                            |
//! | Recovery     | `retry_payout`, `pending_payout`                             |
//! | Queries      | `get_project`, `get_stream`, `get_aggregate`, `get_cancellation`, `get_arbitration`, `get_config` |
//!
//! ## Architecture
//!
//! This file contains only the entry points. Balance math lives in
//! [`accounting`], positions in [`stream`], project lifecycle in
//! [`project`], the dispute lifecycle in [`arbitration`] and the transport
//! boundary in [`bridge`]. Storage access is fully delegated to [`storage`].
//!
//! Every mutating call is a single invocation: an `Err` rolls back all of
//! its writes. Outgoing transfers are issued after the last write and never
//! abort the call; see [`payout`].

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, Address, Bytes, Env};

mod accounting;
mod arbitration;
mod bridge;
pub mod events;
mod guard;
mod payout;
mod project;
mod storage;
mod stream;
mod types;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_stream;

pub use types::{
    AggregateBalance, Arbitration, ArbitrationState, Balance, CancellationState, Config,
    ExitMode, Project, Stream, StreamStatus,
};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    NotInitialized      = 1,
    AlreadyInitialized  = 2,
    InvalidArgument     = 3,
    ProjectNotFound     = 4,
    StreamNotFound      = 5,
    Unauthorized        = 6,
    InvalidState        = 7,
    CapacityExceeded    = 8,
    InsufficientBalance = 9,
    WindowClosed        = 10,
    WindowNotElapsed    = 11,
    TransferFailed      = 12,
    Reentrant           = 13,
    MalformedMessage    = 14,
}

#[contract]
pub struct StreamFund;

#[contractimpl]
impl StreamFund {
    // ─────────────────────────────────────────────────────────
    // Initialisation
    // ─────────────────────────────────────────────────────────

    /// Bind the contract to its bridge and paired remote proxy.
    ///
    /// Must be called exactly once after deployment.
    pub fn init(env: Env, bridge: Address, remote: Address) -> Result<(), Error> {
        if storage::has_config(&env) {
            return Err(Error::AlreadyInitialized);
        }
        storage::set_config(&env, &Config { bridge, remote });
        Ok(())
    }

    pub fn get_config(env: Env) -> Result<Config, Error> {
        storage::get_config(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Projects
    // ─────────────────────────────────────────────────────────

    /// Open a fundraise and escrow `sell_deposit` of `sell_asset` from `owner`.
    ///
    /// Investors may contribute up to `fund_deposit` of `fund_asset`; the
    /// exchange ratio is `sell_deposit / fund_deposit`. Streaming runs from
    /// `start_time` to `stop_time`; unsold inventory is refundable
    /// `lock_period` seconds after the stop.
    #[allow(clippy::too_many_arguments)]
    pub fn create_project(
        env: Env,
        owner: Address,
        sell_asset: Address,
        fund_asset: Address,
        sell_deposit: i128,
        fund_deposit: i128,
        start_time: u64,
        stop_time: u64,
        lock_period: u64,
    ) -> Result<u64, Error> {
        project::create(
            &env,
            owner,
            project::Terms {
                sell_asset,
                fund_asset,
                sell_deposit,
                fund_deposit,
                start_time,
                stop_time,
                lock_period,
            },
        )
    }

    pub fn get_project(env: Env, project_id: u64) -> Result<Project, Error> {
        storage::load_project(&env, project_id)
    }

    /// `(sell, fund)`: sell asset still escrowed for investors, fund asset
    /// available to the owner.
    pub fn project_balance_of(env: Env, project_id: u64) -> Result<Balance, Error> {
        project::balance_of(&env, project_id)
    }

    pub fn project_refund(env: Env, owner: Address, project_id: u64) -> Result<i128, Error> {
        project::refund(&env, owner, project_id)
    }

    pub fn withdraw_from_project(
        env: Env,
        owner: Address,
        project_id: u64,
        amount: i128,
    ) -> Result<(), Error> {
        project::withdraw(&env, owner, project_id, amount)
    }

    pub fn get_aggregate(env: Env, project_id: u64) -> Result<AggregateBalance, Error> {
        storage::load_project(&env, project_id)?;
        Ok(storage::load_aggregate(&env, project_id))
    }

    pub fn get_cancellation(env: Env, project_id: u64) -> Result<CancellationState, Error> {
        storage::load_cancellation(&env, project_id)
    }

    // ─────────────────────────────────────────────────────────
    // Investing
    // ─────────────────────────────────────────────────────────

    /// Join `project_id` with `amount` of its fund asset. Returns the stream id.
    pub fn create_stream(
        env: Env,
        investor: Address,
        project_id: u64,
        amount: i128,
    ) -> Result<u64, Error> {
        stream::create(&env, investor, project_id, amount)
    }

    pub fn get_stream(env: Env, stream_id: u64) -> Result<Stream, Error> {
        storage::load_stream(&env, stream_id)
    }

    /// `(sell, fund)`: fund asset not yet streamed, sell asset withdrawable.
    pub fn invest_balance_of(env: Env, stream_id: u64) -> Result<Balance, Error> {
        stream::balance_of(&env, stream_id)
    }

    pub fn withdraw_from_invest(env: Env, stream_id: u64, amount: i128) -> Result<(), Error> {
        stream::withdraw(&env, stream_id, amount)
    }

    /// Close the position and pay both legs. Returns what was paid.
    pub fn cancel_invest(env: Env, stream_id: u64) -> Result<Balance, Error> {
        stream::cancel(&env, stream_id)
    }

    // ─────────────────────────────────────────────────────────
    // Arbitration
    // ─────────────────────────────────────────────────────────

    pub fn request_reclaim(env: Env, investor: Address, project_id: u64) -> Result<(), Error> {
        arbitration::request_reclaim(&env, investor, project_id)
    }

    /// Force the investor-favourable exit after the project ignored the
    /// reclaim for a full response window.
    pub fn reclaim_timeout(env: Env, project_id: u64) -> Result<(), Error> {
        arbitration::reclaim_timeout(&env, project_id)
    }

    /// Permissionless: relay an accepted request to the remote proxy.
    pub fn handle_received(env: Env, project_id: u64) -> Result<(), Error> {
        arbitration::handle_received(&env, project_id)
    }

    /// Permissionless: relay a rejected request to the remote proxy.
    pub fn handle_rejected(env: Env, project_id: u64) -> Result<(), Error> {
        arbitration::handle_rejected(&env, project_id)
    }

    pub fn get_arbitration(env: Env, project_id: u64) -> Option<Arbitration> {
        storage::load_arbitration(&env, project_id)
    }

    // ─────────────────────────────────────────────────────────
    // Bridge
    // ─────────────────────────────────────────────────────────

    /// Inbound message from the paired proxy. Only the configured bridge may
    /// call this. Redelivery of an applied message returns `InvalidState`.
    pub fn receive_message(env: Env, remote: Address, payload: Bytes) -> Result<(), Error> {
        bridge::receive(&env, remote, payload)
    }

    // ─────────────────────────────────────────────────────────
    // Recovery
    // ─────────────────────────────────────────────────────────

    pub fn pending_payout(env: Env, asset: Address, recipient: Address) -> i128 {
        storage::pending_payout(&env, &asset, &recipient)
    }

    /// Deliver a payout that was deferred because the transfer failed.
    pub fn retry_payout(env: Env, recipient: Address, asset: Address) -> Result<i128, Error> {
        recipient.require_auth();
        payout::retry(&env, &asset, &recipient)
    }
}
