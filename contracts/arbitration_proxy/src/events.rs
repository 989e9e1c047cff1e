//! Proxy events, keyed by project id.
//!
//! | Topic       | Payload             |
//! |-------------|---------------------|
//! | `requested` | [`DisputeRequested`] |
//! | `disputed`  | [`DisputeOpened`]    |
//! | `failed`    | [`RequestClosed`]    |
//! | `canceled`  | [`RequestClosed`]    |
//! | `ruled`     | [`RulingRelayed`]    |
//! | `msg_sent`  | `Message`            |
//! | `deferred`  | [`PayoutDeferred`]   |
//! | `repaid`    | [`PayoutDeferred`]   |

use handshake::{Message, Ruling};
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DisputeRequested {
    pub project_id: u64,
    pub payer: Address,
    pub fee: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DisputeOpened {
    pub project_id: u64,
    pub dispute_id: u64,
    pub fee: i128,
}

/// A request that ended without a dispute; `refund` went back to the payer.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RequestClosed {
    pub project_id: u64,
    pub refund: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RulingRelayed {
    pub project_id: u64,
    pub dispute_id: u64,
    pub ruling: Ruling,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PayoutDeferred {
    pub asset: Address,
    pub recipient: Address,
    pub amount: i128,
}

pub fn dispute_requested(env: &Env, event: DisputeRequested) {
    env.events()
        .publish((symbol_short!("requested"), event.project_id), event);
}

pub fn dispute_opened(env: &Env, event: DisputeOpened) {
    env.events()
        .publish((symbol_short!("disputed"), event.project_id), event);
}

fn request_closed(env: &Env, topic: Symbol, project_id: u64, refund: i128) {
    env.events()
        .publish((topic, project_id), RequestClosed { project_id, refund });
}

pub fn request_failed(env: &Env, project_id: u64, refund: i128) {
    request_closed(env, symbol_short!("failed"), project_id, refund);
}

pub fn request_canceled(env: &Env, project_id: u64, refund: i128) {
    request_closed(env, symbol_short!("canceled"), project_id, refund);
}

pub fn ruling_relayed(env: &Env, event: RulingRelayed) {
    env.events()
        .publish((symbol_short!("ruled"), event.project_id), event);
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
