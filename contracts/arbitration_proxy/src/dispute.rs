//! # Dispute Lifecycle
//!
//! ```text
//! create_dispute ──► Requested ──ack──► Disputed ──rule──► Ruled
//!                        │                 (fee paid, dispute opened)
//!                        ├──ack, fee rose──► (cleared, ArbitrationFailed sent)
//!                        └──canceled───────► (cleared)
//! ```
//!
//! The payer's deposit is held between `create_dispute` and the home
//! contract's answer. Whatever is not paid to the arbitrator goes back to
//! the payer.

use handshake::{ArbitratorClient, BridgeClient, Message, Ruling, DISPUTE_CHOICES};
use soroban_sdk::{Address, Bytes, Env};

use crate::types::{DisputeRequest, RequestStatus};
use crate::{events, payout, storage, Error};

pub fn quote(env: &Env) -> Result<i128, Error> {
    let config = storage::get_config(env)?;
    Ok(ArbitratorClient::new(env, &config.arbitrator).quote_dispute_fee(&config.extra_data))
}

/// Fund a dispute for `project_id` and ask the home contract to accept it.
pub fn create(env: &Env, payer: Address, project_id: u64) -> Result<(), Error> {
    payer.require_auth();
    let config = storage::get_config(env)?;
    if let Some(existing) = storage::load_request(env, project_id) {
        if existing.is_open() {
            return Err(Error::InvalidState);
        }
    }

    let fee = quote(env)?;
    if fee < 0 {
        return Err(Error::InvalidArgument);
    }

    storage::save_request(
        env,
        &DisputeRequest {
            project_id,
            payer: payer.clone(),
            deposit: fee,
            status: RequestStatus::Requested,
            dispute_id: None,
        },
    );
    events::dispute_requested(
        env,
        events::DisputeRequested {
            project_id,
            payer: payer.clone(),
            fee,
        },
    );
    payout::pull(env, &config.fee_asset, &payer, fee)?;
    forward(env, Message::ArbitrationRequested(project_id))
}

fn load_requested(env: &Env, project_id: u64) -> Result<DisputeRequest, Error> {
    match storage::load_request(env, project_id) {
        Some(request) if request.status == RequestStatus::Requested => Ok(request),
        _ => Err(Error::InvalidState),
    }
}

/// The home contract accepted the request. Opens the dispute unless the
/// arbitrator's price moved above the deposit in the meantime.
pub fn on_acknowledged(env: &Env, project_id: u64) -> Result<(), Error> {
    let config = storage::get_config(env)?;
    let mut request = load_requested(env, project_id)?;

    let fee = quote(env)?;
    if fee < 0 || fee > request.deposit {
        storage::clear_request(env, project_id);
        events::request_failed(env, project_id, request.deposit);
        payout::push(env, &config.fee_asset, &request.payer, request.deposit);
        return forward(env, Message::ArbitrationFailed(project_id));
    }

    payout::pay(env, &config.fee_asset, &config.arbitrator, fee)?;
    let dispute_id = ArbitratorClient::new(env, &config.arbitrator)
        .open_dispute(&DISPUTE_CHOICES, &config.extra_data);

    let surplus = request.deposit - fee;
    request.deposit = fee;
    request.status = RequestStatus::Disputed;
    request.dispute_id = Some(dispute_id);
    storage::save_request(env, &request);
    storage::set_dispute_project(env, dispute_id, project_id);
    events::dispute_opened(
        env,
        events::DisputeOpened {
            project_id,
            dispute_id,
            fee,
        },
    );

    payout::push(env, &config.fee_asset, &request.payer, surplus);
    Ok(())
}

/// The home contract turned the request down.
pub fn on_canceled(env: &Env, project_id: u64) -> Result<(), Error> {
    let config = storage::get_config(env)?;
    let request = load_requested(env, project_id)?;

    storage::clear_request(env, project_id);
    events::request_canceled(env, project_id, request.deposit);
    payout::push(env, &config.fee_asset, &request.payer, request.deposit);
    Ok(())
}

/// Arbitrator callback.
pub fn rule(env: &Env, dispute_id: u64, code: u32) -> Result<(), Error> {
    let config = storage::get_config(env)?;
    config.arbitrator.require_auth();
    let ruling = Ruling::from_code(code).ok_or(Error::InvalidArgument)?;

    let project_id = storage::dispute_project(env, dispute_id)?;
    let mut request = match storage::load_request(env, project_id) {
        Some(request)
            if request.status == RequestStatus::Disputed
                && request.dispute_id == Some(dispute_id) =>
        {
            request
        }
        _ => return Err(Error::InvalidState),
    };

    request.status = RequestStatus::Ruled;
    storage::save_request(env, &request);
    events::ruling_relayed(
        env,
        events::RulingRelayed {
            project_id,
            dispute_id,
            ruling,
        },
    );
    forward(env, Message::RulingGiven(project_id, ruling))
}

/// Inbound payload from the home contract.
pub fn receive(env: &Env, remote: Address, payload: Bytes) -> Result<(), Error> {
    let config = storage::get_config(env)?;
    config.bridge.require_auth();
    if remote != config.home {
        return Err(Error::Unauthorized);
    }

    match handshake::decode(env, &payload).ok_or(Error::MalformedMessage)? {
        Message::ArbitrationAcknowledged(project_id) => on_acknowledged(env, project_id),
        Message::ArbitrationCanceled(project_id) => on_canceled(env, project_id),
        Message::ArbitrationRequested(_)
        | Message::ArbitrationFailed(_)
        | Message::RulingGiven(_, _) => Err(Error::MalformedMessage),
    }
}

fn forward(env: &Env, message: Message) -> Result<(), Error> {
    let config = storage::get_config(env)?;
    let payload = handshake::encode(env, &message);
    BridgeClient::new(env, &config.bridge).send(&config.home, &payload);
    events::message_sent(env, &message);
    Ok(())
}
