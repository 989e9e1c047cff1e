//! # Rate Accounting
//!
//! O(1) bookkeeping of a project's split balance under arbitrary join / exit
//! churn. Nothing here iterates streams; every operation touches one
//! [`Project`], its [`AggregateBalance`] and its [`CancellationState`].
//!
//! ## The formula
//!
//! For `start < t < stop` the sell asset streamed out of the project is
//!
//! ```text
//! consumed(t) = sum_rate_fund * (t - start) - sum_calibration + sum_exited
//! ```
//!
//! - `sum_rate_fund * (t - start)` pretends every active stream ran since
//!   `start`;
//! - `sum_calibration` removes the time late joiners were not there;
//! - `sum_exited` puts back what departed streams had accrued before their
//!   rate left `sum_rate_fund`.
//!
//! All functions are pure so they can be driven directly from tests; callers
//! load and persist the records.
//!
//! ## Rounding
//!
//! Divisions truncate. Dust stays with the project, never with an investor.
//! `project_balance` converts the remaining sell leg to its fund-asset
//! equivalent *before* subtracting; do not reorder the expression.

use soroban_sdk::Address;

use crate::stream;
use crate::types::{
    AggregateBalance, Balance, CancellationState, ExitMode, ExitReason, Project, Stream,
    StreamStatus,
};
use crate::Error;

/// Current `(sell, fund)` balance of a project.
///
/// `sell` is sell asset still escrowed for active investors; `fund` is fund
/// asset earned and not yet withdrawn by the owner.
pub fn project_balance(
    project: &Project,
    aggregate: &AggregateBalance,
    cancel: &CancellationState,
    now: u64,
) -> Balance {
    if cancel.is_exited() {
        return Balance {
            sell: cancel.exit_sell_balance_snapshot,
            fund: 0,
        };
    }

    if now <= project.start_time {
        return Balance {
            sell: project.actual_sell_deposit,
            fund: 0,
        };
    }

    if now < project.stop_time {
        let actual_sell = project.actual_sell_deposit;
        if actual_sell == 0 {
            return Balance::default();
        }
        let actual_fund = project.actual_fund_deposit;
        let elapsed = (now - project.start_time) as i128;
        let consumed = (aggregate.sum_rate_fund * elapsed - aggregate.sum_calibration
            + aggregate.sum_exited)
            .clamp(0, actual_sell);
        let sell = actual_sell - consumed;
        let fund = actual_fund - actual_fund * sell / actual_sell - project.withdrawal_amount;
        return Balance {
            sell,
            fund: fund.max(0),
        };
    }

    Balance {
        sell: 0,
        fund: project.actual_fund_deposit - project.withdrawal_amount,
    }
}

/// Admit a new position of `deposit` fund asset and return its stream.
///
/// Fails with `WindowClosed` once `now` reaches the exit stop time and with
/// `CapacityExceeded` if the project's fund cap would be passed. Nothing is
/// mutated on failure.
pub fn on_join(
    project: &mut Project,
    aggregate: &mut AggregateBalance,
    cancel: &mut CancellationState,
    stream_id: u64,
    investor: Address,
    deposit: i128,
    now: u64,
) -> Result<Stream, Error> {
    if now >= cancel.exit_stop_time {
        return Err(Error::WindowClosed);
    }
    let actual_fund = project.actual_fund_deposit + deposit;
    if actual_fund > project.fund_deposit {
        return Err(Error::CapacityExceeded);
    }

    let start_time = now.max(project.start_time);
    let stop_time = cancel.exit_stop_time;
    let duration = (stop_time - start_time) as i128;

    let entitlement = project.sell_equivalent(deposit);
    let rate_per_second_sell = deposit / duration;
    let rate_per_second_fund = entitlement / duration;

    project.actual_fund_deposit = actual_fund;
    project.actual_sell_deposit = project.sell_equivalent(actual_fund);

    if start_time > project.start_time {
        aggregate.sum_calibration +=
            (start_time - project.start_time) as i128 * rate_per_second_fund;
    }
    aggregate.sum_rate_fund += rate_per_second_fund;
    cancel.active_invested_total += deposit;

    Ok(Stream {
        id: stream_id,
        project_id: project.id,
        investor,
        invest_sell_deposit: deposit,
        invest_fund_deposit: entitlement,
        rate_per_second_sell,
        rate_per_second_fund,
        start_time,
        stop_time,
        withdrawal_amount: 0,
        status: StreamStatus::Active,
    })
}

/// Remove `stream` from the aggregates and compute what it is owed.
///
/// The returned [`Balance`] is the payout: `sell` in the fund asset,
/// `fund` in the sell asset (the stream's own legs). After an arbitration
/// exit the fund-asset leg never exceeds what the project still holds.
pub fn on_exit(
    project: &mut Project,
    aggregate: &mut AggregateBalance,
    cancel: &mut CancellationState,
    stream: &Stream,
    reason: ExitReason,
    now: u64,
) -> Balance {
    let balance = stream::balance(stream, project, cancel, now);

    aggregate.sum_rate_fund -= stream.rate_per_second_fund;
    if stream.start_time > project.start_time {
        aggregate.sum_calibration -=
            (stream.start_time - project.start_time) as i128 * stream.rate_per_second_fund;
    }
    aggregate.sum_exited += balance.fund + stream.withdrawal_amount;
    cancel.active_invested_total -= stream.invest_sell_deposit;

    match reason {
        ExitReason::InvestorInitiated => {
            project.actual_fund_deposit -= balance.sell;
            project.actual_sell_deposit = project.sell_equivalent(project.actual_fund_deposit);
            balance
        }
        ExitReason::ArbitrationExit => {
            let owed = (balance.sell + exit_share(cancel, stream.invest_sell_deposit))
                .min(cancel.exit_fund_remaining)
                .max(0);
            cancel.exit_fund_remaining -= owed;
            Balance {
                sell: owed,
                fund: balance.fund,
            }
        }
    }
}

/// Pro-rata part of the frozen fund snapshot owed to a position of `invested`.
pub fn exit_share(cancel: &CancellationState, invested: i128) -> i128 {
    if cancel.exit_invested_total <= 0 {
        return 0;
    }
    cancel.exit_fund_balance_snapshot * invested / cancel.exit_invested_total
}

/// Freeze the project at `now` after an investor-favourable outcome.
///
/// Snapshots the live balance, pulls the exit stop time forward if it has
/// not passed yet and switches the project to `ExitedByArbitration`.
/// Returns the snapshot.
pub fn freeze(
    project: &Project,
    aggregate: &AggregateBalance,
    cancel: &mut CancellationState,
    now: u64,
) -> Balance {
    let snapshot = project_balance(project, aggregate, cancel, now);

    cancel.exit_sell_balance_snapshot = snapshot.sell;
    cancel.exit_fund_balance_snapshot = snapshot.fund;
    cancel.exit_invested_total = cancel.active_invested_total;
    cancel.exit_fund_remaining = project.actual_fund_deposit - project.withdrawal_amount;
    if now < cancel.exit_stop_time {
        cancel.exit_stop_time = now;
    }
    cancel.exit_mode = ExitMode::ExitedByArbitration;

    snapshot
}
