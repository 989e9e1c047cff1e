//! # Stream Engine
//!
//! Investor positions: join, balance, withdrawal and cancellation. Aggregate
//! bookkeeping is delegated to [`accounting`]; this module owns the
//! per-stream view and the entry-point orchestration (auth, lock, storage,
//! then transfers).

use soroban_sdk::{Address, Env};

use crate::accounting;
use crate::types::{Balance, CancellationState, ExitReason, Project, Stream};
use crate::{events, guard, payout, storage, Error};

/// Seconds the stream has been accruing at `now`.
///
/// Zero before the stream starts; never runs past the earlier of the
/// stream's stop time and the project's exit stop time.
pub fn delta(stream: &Stream, cancel: &CancellationState, now: u64) -> u64 {
    if now <= stream.start_time {
        return 0;
    }
    let end = stream.stop_time.min(cancel.exit_stop_time);
    let span = end.saturating_sub(stream.start_time);
    (now - stream.start_time).min(span)
}

/// `(sell, fund)` of a stream: `sell` is fund asset not yet streamed to the
/// project, `fund` is sell asset accrued and not yet withdrawn.
///
/// A position that ran to the project's stop is settled in full, truncation
/// dust of the per-second rates included. Once the project is exited by
/// arbitration the unstreamed leg is read at the project's contribution
/// ratio, so the positions never claim more than the project holds.
pub fn balance(stream: &Stream, project: &Project, cancel: &CancellationState, now: u64) -> Balance {
    let completed = now >= project.stop_time && cancel.exit_stop_time == project.stop_time;
    let (accrued, unstreamed) = if completed {
        (stream.invest_fund_deposit, 0)
    } else {
        let delta = delta(stream, cancel, now) as i128;
        let accrued = delta * stream.rate_per_second_fund;
        let spent = delta * stream.rate_per_second_sell;
        let unstreamed = if cancel.is_exited() {
            project
                .fund_equivalent(stream.invest_fund_deposit - accrued)
                .unwrap_or(stream.invest_sell_deposit - spent)
        } else {
            stream.invest_sell_deposit - spent
        };
        (accrued, unstreamed)
    };

    Balance {
        sell: unstreamed.max(0),
        fund: (accrued - stream.withdrawal_amount).max(0),
    }
}

/// Join `project_id` with `amount` of its fund asset.
pub fn create(env: &Env, investor: Address, project_id: u64, amount: i128) -> Result<u64, Error> {
    investor.require_auth();
    guard::require_positive(amount)?;

    guard::with_project_lock(env, project_id, || {
        let now = env.ledger().timestamp();
        let mut project = storage::load_project(env, project_id)?;
        let mut aggregate = storage::load_aggregate(env, project_id);
        let mut cancel = storage::load_cancellation(env, project_id)?;

        let stream_id = storage::get_and_increment_stream_id(env);
        let stream = accounting::on_join(
            &mut project,
            &mut aggregate,
            &mut cancel,
            stream_id,
            investor.clone(),
            amount,
            now,
        )?;

        storage::save_project_state(env, &project);
        storage::save_aggregate(env, project_id, &aggregate);
        storage::save_cancellation(env, project_id, &cancel);
        storage::save_stream(env, &stream);
        let open = storage::positions(env, project_id, &investor);
        storage::set_positions(env, project_id, &investor, open + 1);

        events::stream_created(
            env,
            events::StreamCreated {
                stream_id,
                project_id,
                investor: investor.clone(),
                deposit: amount,
                start_time: stream.start_time,
            },
        );

        payout::pull(env, &project.fund_asset, &investor, amount)?;
        Ok(stream_id)
    })
}

pub fn balance_of(env: &Env, stream_id: u64) -> Result<Balance, Error> {
    let stream = storage::load_stream(env, stream_id)?;
    let project = storage::load_project(env, stream.project_id)?;
    let cancel = storage::load_cancellation(env, stream.project_id)?;
    Ok(balance(&stream, &project, &cancel, env.ledger().timestamp()))
}

/// Withdraw `amount` of accrued sell asset.
pub fn withdraw(env: &Env, stream_id: u64, amount: i128) -> Result<(), Error> {
    let mut stream = storage::load_stream(env, stream_id)?;
    guard::require_investor(&stream);
    guard::require_positive(amount)?;

    guard::with_project_lock(env, stream.project_id, || {
        let project = storage::load_project(env, stream.project_id)?;
        let cancel = storage::load_cancellation(env, stream.project_id)?;
        let available = balance(&stream, &project, &cancel, env.ledger().timestamp()).fund;
        if amount > available {
            return Err(Error::InsufficientBalance);
        }

        stream.withdrawal_amount += amount;
        storage::save_stream(env, &stream);
        events::stream_withdrawn(env, stream_id, amount);

        payout::push(env, &project.sell_asset, &stream.investor, amount);
        Ok(())
    })
}

/// Close a position and pay out both legs.
///
/// Projects still in normal mode settle from the live balance; projects
/// exited by arbitration settle from the frozen snapshot.
pub fn cancel(env: &Env, stream_id: u64) -> Result<Balance, Error> {
    let stream = storage::load_stream(env, stream_id)?;
    guard::require_investor(&stream);
    let project_id = stream.project_id;

    guard::with_project_lock(env, project_id, || {
        let now = env.ledger().timestamp();
        let mut project = storage::load_project(env, project_id)?;
        let mut aggregate = storage::load_aggregate(env, project_id);
        let mut cancel = storage::load_cancellation(env, project_id)?;

        let reason = if cancel.is_exited() {
            ExitReason::ArbitrationExit
        } else {
            ExitReason::InvestorInitiated
        };
        let paid = accounting::on_exit(
            &mut project,
            &mut aggregate,
            &mut cancel,
            &stream,
            reason,
            now,
        );

        storage::save_project_state(env, &project);
        storage::save_aggregate(env, project_id, &aggregate);
        storage::save_cancellation(env, project_id, &cancel);
        storage::save_stream(env, &stream.tombstone());
        let open = storage::positions(env, project_id, &stream.investor);
        storage::set_positions(env, project_id, &stream.investor, open.saturating_sub(1));

        events::stream_canceled(env, stream_id, project_id, paid, reason);

        payout::push(env, &project.fund_asset, &stream.investor, paid.sell);
        payout::push(env, &project.sell_asset, &stream.investor, paid.fund);
        Ok(paid)
    })
}
