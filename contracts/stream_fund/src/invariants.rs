#![allow(dead_code)]

extern crate std;

use soroban_sdk::token;

use crate::types::{AggregateBalance, Balance, Project, Stream};

/// The sell side always mirrors the fund side at the project's ratio.
pub fn assert_ratio_holds(project: &Project) {
    assert_eq!(
        project.actual_sell_deposit,
        project.sell_equivalent(project.actual_fund_deposit),
        "project {}: actual sell {} does not match actual fund {}",
        project.id,
        project.actual_sell_deposit,
        project.actual_fund_deposit
    );
}

/// Contributions never pass the cap.
pub fn assert_within_capacity(project: &Project) {
    assert!(
        project.actual_fund_deposit >= 0 && project.actual_fund_deposit <= project.fund_deposit,
        "project {}: actual fund {} outside [0, {}]",
        project.id,
        project.actual_fund_deposit,
        project.fund_deposit
    );
}

pub fn assert_balance_bounded(project: &Project, balance: &Balance) {
    assert!(
        balance.sell >= 0 && balance.sell <= project.actual_sell_deposit,
        "project {}: sell balance {} outside [0, {}]",
        project.id,
        balance.sell,
        project.actual_sell_deposit
    );
    assert!(
        balance.fund >= 0,
        "project {}: negative fund balance {}",
        project.id,
        balance.fund
    );
}

/// The aggregate rate equals the sum over live streams.
pub fn assert_aggregate_matches(aggregate: &AggregateBalance, live: &[Stream]) {
    let rate: i128 = live.iter().map(|s| s.rate_per_second_fund).sum();
    assert_eq!(
        aggregate.sum_rate_fund, rate,
        "aggregate rate {} != sum of live rates {}",
        aggregate.sum_rate_fund, rate
    );
}

/// Mid-stream, what left the project equals what live streams accrued plus
/// what departed streams took with them.
pub fn assert_conserved(
    project: &Project,
    aggregate: &AggregateBalance,
    balance: &Balance,
    live: &[(Stream, Balance)],
) {
    let accrued: i128 = live
        .iter()
        .map(|(stream, bal)| bal.fund + stream.withdrawal_amount)
        .sum();
    assert_eq!(
        project.actual_sell_deposit - balance.sell,
        accrued + aggregate.sum_exited,
        "project {}: consumed sell asset is not accounted for",
        project.id
    );
}

pub fn assert_non_decreasing(label: &str, before: i128, after: i128) {
    assert!(
        after >= before,
        "{} decreased from {} to {}",
        label,
        before,
        after
    );
}

pub fn assert_drained(token: &token::Client, holder: &soroban_sdk::Address) {
    assert_eq!(
        token.balance(holder),
        0,
        "{:?} still holds {} of {:?}",
        holder,
        token.balance(holder),
        token.address
    );
}
