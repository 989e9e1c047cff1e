//! # Arbitration State Machine
//!
//! One dispute slot per project. Investors open it with a reclaim; the
//! project answers by funding a dispute on the remote side, which reaches
//! this contract as `ArbitrationRequested`.
//!
//! | From              | Call                   | To                                  |
//! |-------------------|------------------------|-------------------------------------|
//! | (absent)          | `request_reclaim`      | `Reclaimed`                         |
//! | `Reclaimed`       | `acknowledge_or_reject`| `RequestReceived` / `RequestRejected` |
//! | `RequestReceived` | `handle_received`      | `Disputed` (ack sent)               |
//! | `RequestRejected` | `handle_rejected`      | `Reclaimed` (cancel sent)           |
//! | `Disputed`        | `receive_failure`      | `Reclaimed`                         |
//! | `Disputed`        | `receive_ruling`       | `Resolved` or cleared               |
//! | `Reclaimed`       | `reclaim_timeout`      | `Resolved`                          |
//! | `Resolved`        | `acknowledge_or_reject`| `Resolved` (cancel sent)            |
//!
//! Any call arriving in the wrong state returns `InvalidState` and changes
//! nothing, which makes redelivered bridge messages harmless.

use handshake::{Message, Ruling, RECLAIM_WINDOW};
use soroban_sdk::{Address, Env};

use crate::types::{Arbitration, ArbitrationState};
use crate::{accounting, bridge, events, guard, storage, Error};

fn load_in(env: &Env, project_id: u64, state: ArbitrationState) -> Result<Arbitration, Error> {
    match storage::load_arbitration(env, project_id) {
        Some(slot) if slot.state == state => Ok(slot),
        _ => Err(Error::InvalidState),
    }
}

fn save(env: &Env, project_id: u64, slot: &Arbitration) {
    storage::save_arbitration(env, project_id, slot);
    events::arbitration_moved(env, project_id, Some(slot.state));
}

fn clear(env: &Env, project_id: u64) {
    storage::clear_arbitration(env, project_id);
    events::arbitration_moved(env, project_id, None);
}

/// An active investor contests the project.
pub fn request_reclaim(env: &Env, investor: Address, project_id: u64) -> Result<(), Error> {
    investor.require_auth();

    guard::with_project_lock(env, project_id, || {
        let now = env.ledger().timestamp();
        let project = storage::load_project(env, project_id)?;
        let mut cancel = storage::load_cancellation(env, project_id)?;

        if storage::load_arbitration(env, project_id).is_some() {
            return Err(Error::InvalidState);
        }
        if storage::positions(env, project_id, &investor) == 0 {
            return Err(Error::Unauthorized);
        }
        if now < project.start_time {
            return Err(Error::WindowNotElapsed);
        }
        if now >= cancel.exit_stop_time {
            return Err(Error::WindowClosed);
        }
        if cancel.last_reclaim_at != 0 && now < cancel.last_reclaim_at + RECLAIM_WINDOW {
            return Err(Error::WindowNotElapsed);
        }

        cancel.last_reclaim_at = now;
        storage::save_cancellation(env, project_id, &cancel);
        save(
            env,
            project_id,
            &Arbitration {
                investor_requester: Some(investor.clone()),
                project_owner: project.owner,
                state: ArbitrationState::Reclaimed,
                reclaimed_at: now,
            },
        );
        events::reclaim_requested(env, project_id, investor.clone(), now);
        Ok(())
    })
}

/// The project funded a dispute remotely. Accept it while the response
/// window is open, otherwise record a rejection to be relayed back.
pub fn acknowledge_or_reject(env: &Env, project_id: u64) -> Result<(), Error> {
    let now = env.ledger().timestamp();
    let project = storage::load_project(env, project_id)?;

    let slot = match storage::load_arbitration(env, project_id) {
        None => Arbitration {
            investor_requester: None,
            project_owner: project.owner,
            state: ArbitrationState::RequestRejected,
            reclaimed_at: 0,
        },
        Some(mut slot) if slot.state == ArbitrationState::Reclaimed => {
            slot.state = if now <= slot.reclaimed_at + RECLAIM_WINDOW {
                ArbitrationState::RequestReceived
            } else {
                ArbitrationState::RequestRejected
            };
            slot
        }
        // Already settled: turn the request down so the remote fee is returned.
        Some(slot) if slot.state == ArbitrationState::Resolved => {
            return bridge::forward(env, Message::ArbitrationCanceled(project_id));
        }
        Some(_) => return Err(Error::InvalidState),
    };

    save(env, project_id, &slot);
    Ok(())
}

pub fn handle_received(env: &Env, project_id: u64) -> Result<(), Error> {
    let mut slot = load_in(env, project_id, ArbitrationState::RequestReceived)?;
    slot.state = ArbitrationState::Disputed;
    save(env, project_id, &slot);
    bridge::forward(env, Message::ArbitrationAcknowledged(project_id))
}

/// Relay a rejection. A slot that only existed to carry the rejection goes
/// back to absent; a real reclaim stays open so the investor can still time
/// out.
pub fn handle_rejected(env: &Env, project_id: u64) -> Result<(), Error> {
    let mut slot = load_in(env, project_id, ArbitrationState::RequestRejected)?;
    if slot.reclaimed_at == 0 {
        clear(env, project_id);
    } else {
        slot.state = ArbitrationState::Reclaimed;
        save(env, project_id, &slot);
    }
    bridge::forward(env, Message::ArbitrationCanceled(project_id))
}

/// Dispute creation failed remotely. The project gets a fresh response
/// window to fund it again.
pub fn receive_failure(env: &Env, project_id: u64) -> Result<(), Error> {
    let mut slot = load_in(env, project_id, ArbitrationState::Disputed)?;
    slot.state = ArbitrationState::Reclaimed;
    slot.reclaimed_at = env.ledger().timestamp();
    save(env, project_id, &slot);
    Ok(())
}

pub fn receive_ruling(env: &Env, project_id: u64, ruling: Ruling) -> Result<(), Error> {
    let mut slot = load_in(env, project_id, ArbitrationState::Disputed)?;
    match ruling {
        Ruling::InvestorWins => {
            settle(env, project_id, ruling)?;
            slot.state = ArbitrationState::Resolved;
            save(env, project_id, &slot);
        }
        Ruling::ProjectWins | Ruling::RefuseToArbitrate => clear(env, project_id),
    }
    Ok(())
}

/// The project let the response window lapse; the requesting investor
/// forces the exit without a dispute.
pub fn reclaim_timeout(env: &Env, project_id: u64) -> Result<(), Error> {
    let mut slot = load_in(env, project_id, ArbitrationState::Reclaimed)?;
    match &slot.investor_requester {
        Some(investor) => investor.require_auth(),
        None => return Err(Error::InvalidState),
    }
    if env.ledger().timestamp() <= slot.reclaimed_at + RECLAIM_WINDOW {
        return Err(Error::WindowNotElapsed);
    }

    settle(env, project_id, Ruling::InvestorWins)?;
    slot.state = ArbitrationState::Resolved;
    save(env, project_id, &slot);
    Ok(())
}

fn settle(env: &Env, project_id: u64, ruling: Ruling) -> Result<(), Error> {
    guard::with_project_lock(env, project_id, || {
        let now = env.ledger().timestamp();
        let project = storage::load_project(env, project_id)?;
        let aggregate = storage::load_aggregate(env, project_id);
        let mut cancel = storage::load_cancellation(env, project_id)?;
        if cancel.is_exited() {
            return Err(Error::InvalidState);
        }

        let snapshot = accounting::freeze(&project, &aggregate, &mut cancel, now);
        storage::save_cancellation(env, project_id, &cancel);
        events::exit_settled(
            env,
            events::ExitSettled {
                project_id,
                ruling,
                exit_stop_time: cancel.exit_stop_time,
                snapshot,
            },
        );
        Ok(())
    })
}
