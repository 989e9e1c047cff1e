extern crate std;

use handshake::{Message, Ruling, DISPUTE_CHOICES};
use soroban_sdk::testutils::Address as _;
use soroban_sdk::xdr::ToXdr;
use soroban_sdk::{Address, Bytes};

use crate::testutils::{Fixture, FEE};
use crate::{Error, RequestStatus};

const PROJECT: u64 = 3;

/// A request for `PROJECT`, funded and already acknowledged by the home side.
fn disputed(f: &Fixture) -> Address {
    let payer = f.payer(FEE);
    f.client.create_dispute(&payer, &PROJECT);
    f.deliver(&Message::ArbitrationAcknowledged(PROJECT)).unwrap();
    payer
}

#[test]
fn test_init_only_once() {
    let f = Fixture::new();
    let config = f.client.get_config();
    assert_eq!(config.home, f.home);
    assert_eq!(config.extra_data, f.extra_data);

    let other = Address::generate(&f.env);
    assert_eq!(
        f.client
            .try_init(&other, &other, &other, &Bytes::new(&f.env), &other),
        Err(Ok(Error::AlreadyInitialized))
    );
}

#[test]
fn test_create_dispute_holds_fee_and_notifies_home() {
    let f = Fixture::new();
    assert_eq!(f.client.dispute_fee(), FEE);
    let payer = f.payer(150);

    f.client.create_dispute(&payer, &PROJECT);
    assert_eq!(f.fee_asset.balance(&payer), 50);
    assert_eq!(f.fee_asset.balance(&f.client.address), FEE);

    let request = f.client.get_request(&PROJECT).unwrap();
    assert_eq!(request.payer, payer);
    assert_eq!(request.deposit, FEE);
    assert_eq!(request.status, RequestStatus::Requested);
    assert_eq!(request.dispute_id, None);
    assert_eq!(f.sent(), std::vec![Message::ArbitrationRequested(PROJECT)]);

    assert_eq!(
        f.client.try_create_dispute(&payer, &PROJECT),
        Err(Ok(Error::InvalidState))
    );
}

#[test]
fn test_create_dispute_without_fee_fails() {
    let f = Fixture::new();
    let payer = f.payer(FEE - 1);
    assert_eq!(
        f.client.try_create_dispute(&payer, &PROJECT),
        Err(Ok(Error::TransferFailed))
    );
    assert_eq!(f.client.get_request(&PROJECT), None);
    assert!(f.sent().is_empty());
}

#[test]
fn test_acknowledgement_opens_dispute_and_returns_surplus() {
    let f = Fixture::new();
    let payer = f.payer(FEE);
    f.client.create_dispute(&payer, &PROJECT);

    // The arbitrator got cheaper in the meantime.
    f.arbitrator.set_fee(&60);
    f.deliver(&Message::ArbitrationAcknowledged(PROJECT)).unwrap();

    assert_eq!(f.fee_asset.balance(&f.arbitrator.address), 60);
    assert_eq!(f.fee_asset.balance(&payer), 40);
    assert_eq!(f.fee_asset.balance(&f.client.address), 0);

    let opened = f.arbitrator.opened();
    assert_eq!(opened.len(), 1);
    assert_eq!(opened.get(0).unwrap(), (DISPUTE_CHOICES, f.extra_data.clone()));

    let request = f.client.get_request(&PROJECT).unwrap();
    assert_eq!(request.status, RequestStatus::Disputed);
    assert_eq!(request.dispute_id, Some(0));
    assert_eq!(request.deposit, 60);

    assert_eq!(
        f.deliver(&Message::ArbitrationAcknowledged(PROJECT)),
        Err(Error::InvalidState)
    );
    assert_eq!(f.arbitrator.opened().len(), 1);
}

#[test]
fn test_fee_increase_fails_the_request() {
    let f = Fixture::new();
    let payer = f.payer(FEE);
    f.client.create_dispute(&payer, &PROJECT);

    f.arbitrator.set_fee(&(FEE + 1));
    f.deliver(&Message::ArbitrationAcknowledged(PROJECT)).unwrap();

    assert_eq!(f.client.get_request(&PROJECT), None);
    assert_eq!(f.fee_asset.balance(&payer), FEE);
    assert!(f.arbitrator.opened().is_empty());
    assert_eq!(
        f.sent(),
        std::vec![
            Message::ArbitrationRequested(PROJECT),
            Message::ArbitrationFailed(PROJECT),
        ]
    );
}

#[test]
fn test_cancellation_refunds_payer() {
    let f = Fixture::new();
    let payer = f.payer(FEE);
    f.client.create_dispute(&payer, &PROJECT);

    f.deliver(&Message::ArbitrationCanceled(PROJECT)).unwrap();
    assert_eq!(f.client.get_request(&PROJECT), None);
    assert_eq!(f.fee_asset.balance(&payer), FEE);
    assert_eq!(
        f.deliver(&Message::ArbitrationCanceled(PROJECT)),
        Err(Error::InvalidState)
    );

    // A new request can be made once the old one is gone.
    f.client.create_dispute(&payer, &PROJECT);
}

#[test]
fn test_ruling_is_relayed_once() {
    let f = Fixture::new();
    let payer = disputed(&f);

    assert_eq!(
        f.client.try_rule(&0, &7),
        Err(Ok(Error::InvalidArgument))
    );
    assert_eq!(
        f.client.try_rule(&9, &1),
        Err(Ok(Error::DisputeNotFound))
    );

    f.client.rule(&0, &1);
    assert_eq!(
        f.sent().last().cloned(),
        Some(Message::RulingGiven(PROJECT, Ruling::InvestorWins))
    );
    assert_eq!(
        f.client.get_request(&PROJECT).unwrap().status,
        RequestStatus::Ruled
    );
    assert_eq!(f.client.try_rule(&0, &2), Err(Ok(Error::InvalidState)));

    // A settled request does not block a later one.
    f.client.create_dispute(&f.payer(FEE), &PROJECT);
    assert_eq!(
        f.client.get_request(&PROJECT).unwrap().status,
        RequestStatus::Requested
    );
    // The old dispute id no longer matches the live request.
    assert_eq!(f.client.try_rule(&0, &1), Err(Ok(Error::InvalidState)));
    assert_eq!(f.fee_asset.balance(&payer), 0);
}

#[test]
fn test_bridge_rejects_foreign_and_malformed_payloads() {
    let f = Fixture::new();
    let impostor = Address::generate(&f.env);
    let payload = handshake::encode(&f.env, &Message::ArbitrationCanceled(PROJECT));

    assert_eq!(
        f.client.try_receive_message(&impostor, &payload),
        Err(Ok(Error::Unauthorized))
    );
    assert_eq!(
        f.client
            .try_receive_message(&f.home, &Ruling::ProjectWins.to_xdr(&f.env)),
        Err(Ok(Error::MalformedMessage))
    );
    assert_eq!(
        f.deliver(&Message::RulingGiven(PROJECT, Ruling::ProjectWins)),
        Err(Error::MalformedMessage)
    );
    assert_eq!(
        f.deliver(&Message::ArbitrationRequested(PROJECT)),
        Err(Error::MalformedMessage)
    );
    assert_eq!(
        f.deliver(&Message::ArbitrationAcknowledged(PROJECT)),
        Err(Error::InvalidState)
    );
}

#[test]
fn test_nothing_pending_to_retry() {
    let f = Fixture::new();
    let payer = f.payer(FEE);
    assert_eq!(f.client.pending_payout(&f.fee_asset.address, &payer), 0);
    assert_eq!(
        f.client.try_retry_payout(&payer, &f.fee_asset.address),
        Err(Ok(Error::InsufficientBalance))
    );
}
