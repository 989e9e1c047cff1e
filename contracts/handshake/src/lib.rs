//! # Handshake
//!
//! Shared vocabulary between the home [`StreamFund`] contract and its paired
//! remote `ArbitrationProxy`:
//!
//! | Item               | Purpose                                             |
//! |--------------------|-----------------------------------------------------|
//! | [`Message`]        | Tagged union carried as an opaque bridge payload    |
//! | [`Ruling`]         | Arbitrator outcome for a project dispute            |
//! | [`BridgeClient`]   | Outbound transport (`send(target, payload)`)        |
//! | [`ArbitratorClient`] | Fee quotation and dispute creation              |
//!
//! Payloads are the XDR encoding of a [`Message`]. Decoding happens exactly
//! once, at the transport boundary, and each variant maps to one handler.
//!
//! [`StreamFund`]: ../stream_fund/index.html

#![no_std]

use soroban_sdk::{
    contractclient, contracttype,
    xdr::{FromXdr, ToXdr},
    Address, Bytes, Env,
};

/// Length of the project's response window after a reclaim request, and the
/// cooldown between two reclaim attempts on the same project (seconds).
pub const RECLAIM_WINDOW: u64 = 86_400;

/// Number of ruling options offered to the arbitrator (besides refusal).
pub const DISPUTE_CHOICES: u32 = 2;

/// Arbitrator outcome. Discriminants are the arbitrator's ruling codes.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Ruling {
    RefuseToArbitrate = 0,
    InvestorWins = 1,
    ProjectWins = 2,
}

impl Ruling {
    /// Map a raw ruling code from the arbitrator callback.
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Ruling::RefuseToArbitrate),
            1 => Some(Ruling::InvestorWins),
            2 => Some(Ruling::ProjectWins),
            _ => None,
        }
    }
}

/// Every message exchanged between the paired contracts, keyed by project id.
///
/// ```text
/// remote ── ArbitrationRequested ──► home     (fee deposited remotely)
/// home   ── ArbitrationAcknowledged ► remote  (open the dispute)
/// home   ── ArbitrationCanceled ───► remote   (refund the fee)
/// remote ── ArbitrationFailed ─────► home     (fee went up, roll back)
/// remote ── RulingGiven ───────────► home     (apply settlement)
/// ```
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Message {
    ArbitrationRequested(u64),
    ArbitrationAcknowledged(u64),
    ArbitrationCanceled(u64),
    ArbitrationFailed(u64),
    RulingGiven(u64, Ruling),
}

impl Message {
    /// Project the message refers to.
    pub fn project_id(&self) -> u64 {
        match self {
            Message::ArbitrationRequested(id)
            | Message::ArbitrationAcknowledged(id)
            | Message::ArbitrationCanceled(id)
            | Message::ArbitrationFailed(id)
            | Message::RulingGiven(id, _) => *id,
        }
    }
}

/// Serialize a message into an opaque transport payload.
pub fn encode(env: &Env, message: &Message) -> Bytes {
    message.clone().to_xdr(env)
}

/// Decode a transport payload. `None` when the payload is well-formed XDR
/// but not a [`Message`].
pub fn decode(env: &Env, payload: &Bytes) -> Option<Message> {
    Message::from_xdr(env, payload).ok()
}

/// Cross-chain transport collaborator. Delivery is at-least-once and
/// unordered; the receiving side must be idempotent.
#[contractclient(name = "BridgeClient")]
pub trait Bridge {
    fn send(env: Env, target: Address, payload: Bytes);
}

/// External arbitrator service.
#[contractclient(name = "ArbitratorClient")]
pub trait Arbitrator {
    fn quote_dispute_fee(env: Env, extra_data: Bytes) -> i128;
    fn open_dispute(env: Env, choices: u32, extra_data: Bytes) -> u64;
}
