//! # Project Engine
//!
//! Project lifecycle: creation (escrows the sell asset), balance query,
//! refund of unsold inventory after the lock period, and fund withdrawal.

use soroban_sdk::{Address, Env};

use crate::accounting;
use crate::types::{AggregateBalance, Balance, CancellationState, Project};
use crate::{events, guard, payout, storage, Error};

/// Terms supplied by the fundraiser.
pub struct Terms {
    pub sell_asset: Address,
    pub fund_asset: Address,
    pub sell_deposit: i128,
    pub fund_deposit: i128,
    pub start_time: u64,
    pub stop_time: u64,
    pub lock_period: u64,
}

impl Terms {
    fn validate(&self, now: u64) -> Result<(), Error> {
        if self.sell_asset == self.fund_asset {
            return Err(Error::InvalidArgument);
        }
        guard::require_positive(self.sell_deposit)?;
        guard::require_positive(self.fund_deposit)?;
        if self.start_time < now || self.stop_time <= self.start_time {
            return Err(Error::InvalidArgument);
        }
        if self.lock_period == 0 || self.stop_time.checked_add(self.lock_period).is_none() {
            return Err(Error::InvalidArgument);
        }
        Ok(())
    }
}

pub fn create(env: &Env, owner: Address, terms: Terms) -> Result<u64, Error> {
    owner.require_auth();
    terms.validate(env.ledger().timestamp())?;

    let id = storage::get_and_increment_project_id(env);
    let project = Project {
        id,
        owner: owner.clone(),
        sell_asset: terms.sell_asset,
        fund_asset: terms.fund_asset,
        sell_deposit: terms.sell_deposit,
        fund_deposit: terms.fund_deposit,
        actual_sell_deposit: 0,
        actual_fund_deposit: 0,
        withdrawal_amount: 0,
        start_time: terms.start_time,
        stop_time: terms.stop_time,
        lock_period: terms.lock_period,
        refunded: false,
    };

    storage::save_project(env, &project);
    storage::save_aggregate(env, id, &AggregateBalance::default());
    storage::save_cancellation(env, id, &CancellationState::new(project.stop_time));

    events::project_created(
        env,
        events::ProjectCreated {
            project_id: id,
            owner: owner.clone(),
            sell_deposit: project.sell_deposit,
            fund_deposit: project.fund_deposit,
            start_time: project.start_time,
            stop_time: project.stop_time,
        },
    );

    payout::pull(env, &project.sell_asset, &owner, project.sell_deposit)?;
    Ok(id)
}

pub fn balance_of(env: &Env, project_id: u64) -> Result<Balance, Error> {
    let project = storage::load_project(env, project_id)?;
    let aggregate = storage::load_aggregate(env, project_id);
    let cancel = storage::load_cancellation(env, project_id)?;
    Ok(accounting::project_balance(
        &project,
        &aggregate,
        &cancel,
        env.ledger().timestamp(),
    ))
}

/// Return unsold sell inventory, plus the frozen exit snapshot if the
/// project was exited by arbitration. One-shot.
pub fn refund(env: &Env, caller: Address, project_id: u64) -> Result<i128, Error> {
    guard::with_project_lock(env, project_id, || {
        let mut project = storage::load_project(env, project_id)?;
        guard::require_owner(&project, &caller)?;
        if project.refunded {
            return Err(Error::InvalidState);
        }
        if env.ledger().timestamp() < project.stop_time.saturating_add(project.lock_period) {
            return Err(Error::WindowNotElapsed);
        }
        let cancel = storage::load_cancellation(env, project_id)?;

        let amount = project.sell_deposit - project.actual_sell_deposit
            + cancel.exit_sell_balance_snapshot;
        project.refunded = true;
        storage::save_project_state(env, &project);
        events::project_refunded(env, project_id, amount);

        payout::push(env, &project.sell_asset, &project.owner, amount);
        Ok(amount)
    })
}

/// Withdraw earned fund asset. Blocked while a reclaim is pending.
pub fn withdraw(env: &Env, caller: Address, project_id: u64, amount: i128) -> Result<(), Error> {
    guard::require_positive(amount)?;

    guard::with_project_lock(env, project_id, || {
        let mut project = storage::load_project(env, project_id)?;
        guard::require_owner(&project, &caller)?;
        let pending = storage::load_arbitration(env, project_id)
            .map(|slot| slot.reclaimed_at != 0)
            .unwrap_or(false);
        if pending {
            return Err(Error::InvalidState);
        }

        let aggregate = storage::load_aggregate(env, project_id);
        let cancel = storage::load_cancellation(env, project_id)?;
        let available =
            accounting::project_balance(&project, &aggregate, &cancel, env.ledger().timestamp())
                .fund;
        if amount > available {
            return Err(Error::InsufficientBalance);
        }

        project.withdrawal_amount += amount;
        storage::save_project_state(env, &project);
        events::project_withdrawn(env, project_id, amount);

        payout::push(env, &project.fund_asset, &project.owner, amount);
        Ok(())
    })
}
