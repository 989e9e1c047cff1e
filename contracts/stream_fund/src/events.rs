//! # Events
//!
//! Every state change is published as `(topic, id) -> payload`. Payloads are
//! `#[contracttype]` structs so off-chain consumers decode them by schema.
//!
//! | Topic       | Key        | Payload              |
//! |-------------|------------|----------------------|
//! | `created`   | project id | [`ProjectCreated`]   |
//! | `refunded`  | project id | [`ProjectRefunded`]  |
//! | `prj_wdraw` | project id | [`ProjectWithdrawn`] |
//! | `joined`    | stream id  | [`StreamCreated`]    |
//! | `withdrew`  | stream id  | [`StreamWithdrawn`]  |
//! | `canceled`  | stream id  | [`StreamCanceled`]   |
//! | `reclaim`   | project id | [`ReclaimRequested`] |
//! | `arb_state` | project id | [`ArbitrationMoved`] |
//! | `settled`   | project id | [`ExitSettled`]      |
//! | `msg_sent`  | project id | `Message`            |
//! | `deferred`  | recipient  | [`PayoutDeferred`]   |
//! | `repaid`    | recipient  | [`PayoutDeferred`]   |

use handshake::{Message, Ruling};
use soroban_sdk::{contracttype, symbol_short, Address, Env};

use crate::types::{ArbitrationState, Balance, ExitReason};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectCreated {
    pub project_id: u64,
    pub owner: Address,
    pub sell_deposit: i128,
    pub fund_deposit: i128,
    pub start_time: u64,
    pub stop_time: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectRefunded {
    pub project_id: u64,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectWithdrawn {
    pub project_id: u64,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StreamCreated {
    pub stream_id: u64,
    pub project_id: u64,
    pub investor: Address,
    pub deposit: i128,
    pub start_time: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StreamWithdrawn {
    pub stream_id: u64,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StreamCanceled {
    pub stream_id: u64,
    pub project_id: u64,
    /// Paid in the fund asset.
    pub fund_asset_paid: i128,
    /// Paid in the sell asset.
    pub sell_asset_paid: i128,
    pub by_arbitration: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReclaimRequested {
    pub project_id: u64,
    pub investor: Address,
    pub reclaimed_at: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ArbitrationMoved {
    pub project_id: u64,
    /// [`ArbitrationState`] discriminant; `None` once the slot is cleared.
    pub state: Option<u32>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExitSettled {
    pub project_id: u64,
    pub ruling: Ruling,
    pub exit_stop_time: u64,
    pub snapshot: Balance,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PayoutDeferred {
    pub asset: Address,
    pub recipient: Address,
    pub amount: i128,
}

pub fn project_created(env: &Env, event: ProjectCreated) {
    env.events()
        .publish((symbol_short!("created"), event.project_id), event);
}

pub fn project_refunded(env: &Env, project_id: u64, amount: i128) {
    env.events().publish(
        (symbol_short!("refunded"), project_id),
        ProjectRefunded { project_id, amount },
    );
}

pub fn project_withdrawn(env: &Env, project_id: u64, amount: i128) {
    env.events().publish(
        (symbol_short!("prj_wdraw"), project_id),
        ProjectWithdrawn { project_id, amount },
    );
}

pub fn stream_created(env: &Env, event: StreamCreated) {
    env.events()
        .publish((symbol_short!("joined"), event.stream_id), event);
}

pub fn stream_withdrawn(env: &Env, stream_id: u64, amount: i128) {
    env.events().publish(
        (symbol_short!("withdrew"), stream_id),
        StreamWithdrawn { stream_id, amount },
    );
}

pub fn stream_canceled(
    env: &Env,
    stream_id: u64,
    project_id: u64,
    payout: Balance,
    reason: ExitReason,
) {
    env.events().publish(
        (symbol_short!("canceled"), stream_id),
        StreamCanceled {
            stream_id,
            project_id,
            fund_asset_paid: payout.sell,
            sell_asset_paid: payout.fund,
            by_arbitration: reason == ExitReason::ArbitrationExit,
        },
    );
}

pub fn reclaim_requested(env: &Env, project_id: u64, investor: Address, reclaimed_at: u64) {
    env.events().publish(
        (symbol_short!("reclaim"), project_id),
        ReclaimRequested {
            project_id,
            investor,
            reclaimed_at,
        },
    );
}

pub fn arbitration_moved(env: &Env, project_id: u64, state: Option<ArbitrationState>) {
    env.events().publish(
        (symbol_short!("arb_state"), project_id),
        ArbitrationMoved {
            project_id,
            state: state.map(|state| state as u32),
        },
    );
}

pub fn exit_settled(env: &Env, event: ExitSettled) {
    env.events()
        .publish((symbol_short!("settled"), event.project_id), event);
}

pub fn message_sent(env: &Env, message: &Message) {
    env.events().publish(
        (symbol_short!("msg_sent"), message.project_id()),
        message.clone(),
    );
}

pub fn payout_deferred(env: &Env, asset: Address, recipient: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("deferred"), recipient.clone()),
        PayoutDeferred {
            asset,
            recipient,
            amount,
        },
    );
}

pub fn payout_repaid(env: &Env, asset: Address, recipient: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("repaid"), recipient.clone()),
        PayoutDeferred {
            asset,
            recipient,
            amount,
        },
    );
}
