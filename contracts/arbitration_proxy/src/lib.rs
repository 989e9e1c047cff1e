//! # Arbitration Proxy
//!
//! Remote-side companion of the StreamFund contract. A project owner that
//! wants to contest an investor's reclaim funds a dispute here; the proxy
//! holds the fee, asks the home contract over the bridge whether the reclaim
//! is still answerable, opens the dispute with the arbitrator and relays the
//! ruling back.
//!
//! | Phase     | Entry Point(s)                         |
//! |-----------|----------------------------------------|
//! | Bootstrap | [`ArbitrationProxy::init`]             |
//! | Disputes  | `dispute_fee`, `create_dispute`, `rule` |
//! | Bridge    | `receive_message`                      |
//! | Recovery  | `pending_payout`, `retry_payout`       |
//! | Queries   | `get_config`, `get_request`            |

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, Address, Bytes, Env};

mod dispute;
pub mod events;
mod payout;
mod storage;
mod types;

#[cfg(test)]
mod test_dispute;

pub use types::{Config, DisputeRequest, RequestStatus};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    NotInitialized      = 1,
    AlreadyInitialized  = 2,
    InvalidArgument     = 3,
    Unauthorized        = 4,
    InvalidState        = 5,
    DisputeNotFound     = 6,
    TransferFailed      = 7,
    InsufficientBalance = 8,
    MalformedMessage    = 9,
}

#[contract]
pub struct ArbitrationProxy;

#[contractimpl]
impl ArbitrationProxy {
    /// Bind the proxy to its bridge, home contract and arbitrator.
    pub fn init(
        env: Env,
        bridge: Address,
        home: Address,
        arbitrator: Address,
        extra_data: Bytes,
        fee_asset: Address,
    ) -> Result<(), Error> {
        if storage::has_config(&env) {
            return Err(Error::AlreadyInitialized);
        }
        storage::set_config(
            &env,
            &Config {
                bridge,
                home,
                arbitrator,
                extra_data,
                fee_asset,
            },
        );
        Ok(())
    }

    pub fn get_config(env: Env) -> Result<Config, Error> {
        storage::get_config(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Disputes
    // ─────────────────────────────────────────────────────────

    /// Current arbitration cost, in the fee asset.
    pub fn dispute_fee(env: Env) -> Result<i128, Error> {
        dispute::quote(&env)
    }

    /// Pay the arbitration fee for `project_id` and notify the home contract.
    pub fn create_dispute(env: Env, payer: Address, project_id: u64) -> Result<(), Error> {
        dispute::create(&env, payer, project_id)
    }

    /// Ruling callback; only the configured arbitrator may call it.
    pub fn rule(env: Env, dispute_id: u64, ruling: u32) -> Result<(), Error> {
        dispute::rule(&env, dispute_id, ruling)
    }

    pub fn get_request(env: Env, project_id: u64) -> Option<DisputeRequest> {
        storage::load_request(&env, project_id)
    }

    // ─────────────────────────────────────────────────────────
    // Bridge
    // ─────────────────────────────────────────────────────────

    pub fn receive_message(env: Env, remote: Address, payload: Bytes) -> Result<(), Error> {
        dispute::receive(&env, remote, payload)
    }

    // ─────────────────────────────────────────────────────────
    // Recovery
    // ─────────────────────────────────────────────────────────

    pub fn pending_payout(env: Env, asset: Address, recipient: Address) -> i128 {
        storage::pending_payout(&env, &asset, &recipient)
    }

    pub fn retry_payout(env: Env, recipient: Address, asset: Address) -> Result<i128, Error> {
        recipient.require_auth();
        payout::retry(&env, &asset, &recipient)
    }
}
