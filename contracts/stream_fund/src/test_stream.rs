extern crate std;

use soroban_sdk::testutils::Address as _;
use soroban_sdk::Address;

use crate::testutils::{Fixture, T0};
use crate::{AggregateBalance, Balance, Error, StreamStatus};

const START: u64 = T0 + 100;
const STOP: u64 = START + 1_000;

#[test]
fn test_create_stream_escrows_fund_asset() {
    let f = Fixture::new();
    let project_id = f.project(1_000, 1_000, START, STOP);
    let (investor, stream_id) = f.join(project_id, 1_000);

    let stream = f.client.get_stream(&stream_id);
    assert_eq!(stream.investor, investor);
    assert_eq!(stream.start_time, START);
    assert_eq!(stream.stop_time, STOP);
    assert_eq!(stream.rate_per_second_fund, 1);
    assert_eq!(stream.status, StreamStatus::Active);

    assert_eq!(f.fund.balance(&investor), 0);
    assert_eq!(f.fund.balance(&f.client.address), 1_000);

    let project = f.client.get_project(&project_id);
    assert_eq!(project.actual_fund_deposit, 1_000);
    assert_eq!(project.actual_sell_deposit, 1_000);
}

#[test]
fn test_invest_balance_halfway() {
    let f = Fixture::new();
    let project_id = f.project(1_000, 1_000, START, STOP);
    let (_, stream_id) = f.join(project_id, 1_000);

    f.at(START + 500);
    assert_eq!(
        f.client.invest_balance_of(&stream_id),
        Balance { sell: 500, fund: 500 }
    );
    assert_eq!(
        f.client.project_balance_of(&project_id),
        Balance { sell: 500, fund: 500 }
    );
}

#[test]
fn test_create_stream_rejections() {
    let f = Fixture::new();
    let project_id = f.project(1_000, 1_000, START, STOP);
    let investor = f.investor(5_000);

    assert_eq!(
        f.client.try_create_stream(&investor, &project_id, &0),
        Err(Ok(Error::InvalidArgument))
    );
    assert_eq!(
        f.client.try_create_stream(&investor, &99, &10),
        Err(Ok(Error::ProjectNotFound))
    );
    assert_eq!(
        f.client.try_create_stream(&investor, &project_id, &1_001),
        Err(Ok(Error::CapacityExceeded))
    );

    f.at(STOP);
    assert_eq!(
        f.client.try_create_stream(&investor, &project_id, &10),
        Err(Ok(Error::WindowClosed))
    );
    // Nothing was taken by the failed attempts.
    assert_eq!(f.fund.balance(&investor), 5_000);
}

#[test]
fn test_create_stream_without_funds_fails_transfer() {
    let f = Fixture::new();
    let project_id = f.project(1_000, 1_000, START, STOP);
    let broke = Address::generate(&f.env);

    assert_eq!(
        f.client.try_create_stream(&broke, &project_id, &100),
        Err(Ok(Error::TransferFailed))
    );
    assert_eq!(f.client.get_project(&project_id).actual_fund_deposit, 0);
}

#[test]
fn test_withdraw_from_invest() {
    let f = Fixture::new();
    let project_id = f.project(1_000, 1_000, START, STOP);
    let (investor, stream_id) = f.join(project_id, 1_000);

    f.at(START + 300);
    assert_eq!(
        f.client.try_withdraw_from_invest(&stream_id, &301),
        Err(Ok(Error::InsufficientBalance))
    );
    assert_eq!(
        f.client.try_withdraw_from_invest(&stream_id, &0),
        Err(Ok(Error::InvalidArgument))
    );

    f.client.withdraw_from_invest(&stream_id, &200);
    assert_eq!(f.sell.balance(&investor), 200);
    assert_eq!(f.client.get_stream(&stream_id).withdrawal_amount, 200);
    assert_eq!(
        f.client.invest_balance_of(&stream_id),
        Balance { sell: 700, fund: 100 }
    );

    // Withdrawals reduce the investor's leg, never the project's.
    assert_eq!(f.client.project_balance_of(&project_id).fund, 300);
}

#[test]
fn test_withdraw_before_start_is_empty() {
    let f = Fixture::new();
    let project_id = f.project(1_000, 1_000, START, STOP);
    let (_, stream_id) = f.join(project_id, 500);

    assert_eq!(
        f.client.try_withdraw_from_invest(&stream_id, &1),
        Err(Ok(Error::InsufficientBalance))
    );
}

#[test]
fn test_cancel_mid_stream_pays_both_legs() {
    let f = Fixture::new();
    let project_id = f.project(1_000, 1_000, START, STOP);
    let (investor, stream_id) = f.join(project_id, 1_000);

    f.at(START + 400);
    f.client.withdraw_from_invest(&stream_id, &100);
    let paid = f.client.cancel_invest(&stream_id);

    assert_eq!(paid, Balance { sell: 600, fund: 300 });
    assert_eq!(f.fund.balance(&investor), 600);
    assert_eq!(f.sell.balance(&investor), 400);

    assert_eq!(
        f.client.try_get_stream(&stream_id),
        Err(Ok(Error::StreamNotFound))
    );
    assert_eq!(
        f.client.try_cancel_invest(&stream_id),
        Err(Ok(Error::StreamNotFound))
    );

    // The project keeps what was streamed to it.
    let project = f.client.get_project(&project_id);
    assert_eq!(project.actual_fund_deposit, 400);
    assert_eq!(project.actual_sell_deposit, 400);
    assert_eq!(
        f.client.project_balance_of(&project_id),
        Balance { sell: 0, fund: 400 }
    );
}

#[test]
fn test_cancel_before_start_round_trip() {
    let f = Fixture::new();
    let project_id = f.project(1_000, 1_000, START, STOP);
    let (investor, stream_id) = f.join(project_id, 700);

    let paid = f.client.cancel_invest(&stream_id);
    assert_eq!(paid, Balance { sell: 700, fund: 0 });
    assert_eq!(f.fund.balance(&investor), 700);
    assert_eq!(f.sell.balance(&investor), 0);

    let project = f.client.get_project(&project_id);
    assert_eq!(project.actual_fund_deposit, 0);
    assert_eq!(project.actual_sell_deposit, 0);
    assert_eq!(f.client.get_aggregate(&project_id), AggregateBalance::default());
    assert_eq!(f.client.get_cancellation(&project_id).active_invested_total, 0);
}

#[test]
fn test_cancel_after_stop_settles_in_full() {
    let f = Fixture::new();
    let project_id = f.project(300, 1_000, START, STOP);
    // 700 fund buys 210 sell: rate_fund = 210 / 1000 = 0, all of it is dust.
    let (investor, stream_id) = f.join(project_id, 700);

    f.at(STOP + 1);
    assert_eq!(
        f.client.invest_balance_of(&stream_id),
        Balance { sell: 0, fund: 210 }
    );
    f.client.cancel_invest(&stream_id);
    assert_eq!(f.sell.balance(&investor), 210);
    assert_eq!(f.fund.balance(&investor), 0);
}

#[test]
fn test_ids_are_never_reused() {
    let f = Fixture::new();
    let project_id = f.project(1_000, 1_000, START, STOP);
    let (_, first) = f.join(project_id, 100);
    f.client.cancel_invest(&first);
    let (_, second) = f.join(project_id, 100);
    assert_eq!(second, first + 1);
}

#[test]
fn test_failed_push_is_deferred_and_retried() {
    let f = Fixture::new();
    let (project_id, sell) = f.blocking_project(1_000, START, STOP);
    let (investor, stream_id) = f.join(project_id, 1_000);

    f.at(START + 250);
    sell.block(&investor, &true);

    // The sell-asset leg bounces; the fund-asset leg still arrives.
    let paid = f.client.cancel_invest(&stream_id);
    assert_eq!(paid, Balance { sell: 750, fund: 250 });
    assert_eq!(f.fund.balance(&investor), 750);
    assert_eq!(sell.balance(&investor), 0);
    assert_eq!(f.client.pending_payout(&sell.address, &investor), 250);
    assert_eq!(
        f.client.try_get_stream(&stream_id),
        Err(Ok(Error::StreamNotFound))
    );

    // Still blocked: the retry fails and the debt is kept.
    assert_eq!(
        f.client.try_retry_payout(&investor, &sell.address),
        Err(Ok(Error::TransferFailed))
    );
    assert_eq!(f.client.pending_payout(&sell.address, &investor), 250);

    sell.block(&investor, &false);
    assert_eq!(f.client.retry_payout(&investor, &sell.address), 250);
    assert_eq!(sell.balance(&investor), 250);
    assert_eq!(f.client.pending_payout(&sell.address, &investor), 0);
    assert_eq!(
        f.client.try_retry_payout(&investor, &sell.address),
        Err(Ok(Error::InsufficientBalance))
    );
}
