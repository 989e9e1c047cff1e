//! # Cross-Chain Handshake
//!
//! Translates arbitration transitions to and from bridge payloads.
//!
//! Inbound payloads are accepted only when the configured bridge signed the
//! call and the claimed origin is the paired remote proxy. Each payload is
//! decoded once into a [`Message`] and dispatched to exactly one handler.

use handshake::{BridgeClient, Message};
use soroban_sdk::{Address, Bytes, Env};

use crate::{arbitration, events, storage, Error};

pub fn receive(env: &Env, remote: Address, payload: Bytes) -> Result<(), Error> {
    let config = storage::get_config(env)?;
    config.bridge.require_auth();
    if remote != config.remote {
        return Err(Error::Unauthorized);
    }

    let message = handshake::decode(env, &payload).ok_or(Error::MalformedMessage)?;
    match message {
        Message::ArbitrationRequested(project_id) => {
            arbitration::acknowledge_or_reject(env, project_id)
        }
        Message::ArbitrationFailed(project_id) => arbitration::receive_failure(env, project_id),
        Message::RulingGiven(project_id, ruling) => {
            arbitration::receive_ruling(env, project_id, ruling)
        }
        // Outbound-only kinds.
        Message::ArbitrationAcknowledged(_) | Message::ArbitrationCanceled(_) => {
            Err(Error::MalformedMessage)
        }
    }
}

pub fn forward(env: &Env, message: Message) -> Result<(), Error> {
    let config = storage::get_config(env)?;
    let payload = handshake::encode(env, &message);
    BridgeClient::new(env, &config.bridge).send(&config.remote, &payload);
    events::message_sent(env, &message);
    Ok(())
}
