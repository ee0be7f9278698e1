#![cfg(test)]

use crate::config::YIELD_INDEX_SCALE;
use crate::errors::Error;
use crate::test::{SplitterTest, STARTING_BALANCE};
use crate::types::TokenKind;
use soroban_sdk::{
    testutils::{Address as _, IssuerFlags},
    token::{Client as TokenClient, StellarAssetClient},
    vec, Address, Vec,
};

fn claimable(test: &SplitterTest, account: &Address) -> i128 {
    test.client.get_claimable_yield(&test.underlying, account)
}

fn second_holder(test: &SplitterTest) -> Address {
    let other = Address::generate(&test.env);
    test.fund(&test.underlying, &other, STARTING_BALANCE);
    other
}

#[test]
fn test_distribute_and_claim() {
    let test = SplitterTest::setup();
    test.create_market();
    test.deposit(&test.user, 200);

    let market = test.distribute(50);
    assert_eq!(market.yield_index, 50 * YIELD_INDEX_SCALE / 200);
    assert_eq!(test.token.balance(&test.yield_source), STARTING_BALANCE - 50);
    assert_eq!(claimable(&test, &test.user), 50);

    assert_eq!(test.client.claim_yield(&test.user, &test.underlying), 50);
    assert_eq!(test.token.balance(&test.user), STARTING_BALANCE - 200 + 50);
    assert_eq!(claimable(&test, &test.user), 0);

    let position = test.client.get_user_position(&test.underlying, &test.user);
    assert_eq!(position.last_yield_index, market.yield_index);
    assert_eq!(position.accrued_yield, 0);

    let market = test.client.get_market(&test.underlying);
    assert_eq!(market.total_yield_claimed, 50);

    assert_eq!(
        test.client.try_claim_yield(&test.user, &test.underlying),
        Err(Ok(Error::NoYieldToClaim))
    );
}

#[test]
fn test_claim_without_yt_fails() {
    let test = SplitterTest::setup();
    test.create_market();
    test.deposit(&test.user, 200);
    test.distribute(50);

    let stranger = Address::generate(&test.env);
    assert_eq!(
        test.client.try_claim_yield(&stranger, &test.underlying),
        Err(Ok(Error::NoYTTokens))
    );
}

#[test]
fn test_index_is_monotonic() {
    let test = SplitterTest::setup();
    test.create_market();
    test.deposit(&test.user, 300);

    let mut last = 0;
    for amount in [7, 1, 300, 2] {
        let index = test.distribute(amount).yield_index;
        assert!(index >= last);
        last = index;
    }
    // Claiming never moves the market index
    test.client.claim_yield(&test.user, &test.underlying);
    assert_eq!(test.client.get_market(&test.underlying).yield_index, last);
}

#[test]
fn test_pro_rata_rounds_down() {
    let test = SplitterTest::setup();
    test.create_market();
    let other = second_holder(&test);
    test.deposit(&test.user, 200);
    test.deposit(&other, 100);

    test.distribute(100);
    let user_share = claimable(&test, &test.user);
    let other_share = claimable(&test, &other);
    assert_eq!(user_share, 66);
    assert_eq!(other_share, 33);
    assert!(user_share + other_share <= 100);

    test.client.claim_yield(&test.user, &test.underlying);
    test.client.claim_yield(&other, &test.underlying);
    // Rounding dust stays in custody
    let market = test.client.get_market(&test.underlying);
    assert_eq!(market.total_yield_claimed, 99);
    assert_eq!(test.token.balance(&test.contract_id), 300 + 1);
}

#[test]
fn test_late_joiner_gets_no_earlier_yield() {
    let test = SplitterTest::setup();
    test.create_market();
    let other = second_holder(&test);
    test.deposit(&test.user, 200);
    test.distribute(50);

    test.deposit(&other, 200);
    assert_eq!(claimable(&test, &other), 0);
    assert_eq!(claimable(&test, &test.user), 50);

    test.distribute(40);
    assert_eq!(claimable(&test, &test.user), 70);
    assert_eq!(claimable(&test, &other), 20);
}

#[test]
fn test_split_settles_existing_yield() {
    let test = SplitterTest::setup();
    test.create_market();
    test.deposit(&test.user, 200);
    let market = test.distribute(50);

    let position = test.deposit(&test.user, 200);
    assert_eq!(position.accrued_yield, 50);
    assert_eq!(position.last_yield_index, market.yield_index);
    assert_eq!(claimable(&test, &test.user), 50);

    test.distribute(40);
    assert_eq!(claimable(&test, &test.user), 90);
    assert_eq!(test.client.claim_yield(&test.user, &test.underlying), 90);
}

#[test]
fn test_merge_pays_settled_yield() {
    let test = SplitterTest::setup();
    test.create_market();
    test.deposit(&test.user, 200);
    test.distribute(50);

    let result = test
        .client
        .merge(&test.user, &test.underlying, &100, &100);
    assert_eq!(result.yield_paid, 50);
    assert_eq!(claimable(&test, &test.user), 0);

    test.distribute(10);
    assert_eq!(claimable(&test, &test.user), 10);
}

#[test]
fn test_distribution_with_no_yt_is_unclaimable() {
    let test = SplitterTest::setup();
    test.create_market();

    let market = test.distribute(30);
    assert_eq!(market.yield_index, 0);
    assert_eq!(market.total_yield_distributed, 30);

    test.deposit(&test.user, 200);
    assert_eq!(claimable(&test, &test.user), 0);
    assert_eq!(
        test.client.try_claim_yield(&test.user, &test.underlying),
        Err(Ok(Error::NoYieldToClaim))
    );
}

#[test]
fn test_distribute_rejections() {
    let test = SplitterTest::setup();
    test.create_market();
    test.deposit(&test.user, 200);
    let unknown = Address::generate(&test.env);

    assert_eq!(
        test.client
            .try_distribute_yield(&test.yield_source, &test.underlying, &0),
        Err(Ok(Error::InvalidYieldAmount))
    );
    assert_eq!(
        test.client
            .try_distribute_yield(&test.yield_source, &unknown, &10),
        Err(Ok(Error::MarketNotFound))
    );
    assert_eq!(
        test.client.try_distribute_yield(
            &test.yield_source,
            &test.underlying,
            &(STARTING_BALANCE + 1)
        ),
        Err(Ok(Error::InsufficientBalance))
    );

    test.client.pause_market(&test.controller, &test.underlying);
    assert_eq!(
        test.client
            .try_distribute_yield(&test.yield_source, &test.underlying, &10),
        Err(Ok(Error::MarketInactive))
    );

    test.client.resume_market(&test.controller, &test.underlying);
    test.expire();
    assert_eq!(
        test.client
            .try_distribute_yield(&test.yield_source, &test.underlying, &10),
        Err(Ok(Error::MarketInactive))
    );
    assert_eq!(test.client.get_market(&test.underlying).total_yield_distributed, 0);
}

#[test]
fn test_yield_claimable_after_maturity() {
    let test = SplitterTest::setup();
    test.create_market();
    test.deposit(&test.user, 200);
    test.distribute(50);
    test.expire();

    assert_eq!(test.client.claim_yield(&test.user, &test.underlying), 50);
}

#[test]
fn test_yt_transfer_settles_both_sides() {
    let test = SplitterTest::setup();
    test.create_market();
    test.deposit(&test.user, 200);
    test.distribute(50);
    let buyer = Address::generate(&test.env);

    test.client
        .transfer(&test.user, &buyer, &test.underlying, &TokenKind::Yt, &200);
    // Seller is paid what accrued while holding
    assert_eq!(test.token.balance(&test.user), STARTING_BALANCE - 200 + 50);
    assert_eq!(claimable(&test, &buyer), 0);

    test.distribute(20);
    assert_eq!(claimable(&test, &buyer), 20);
    assert_eq!(
        test.client.try_claim_yield(&test.user, &test.underlying),
        Err(Ok(Error::NoYTTokens))
    );
    assert_eq!(test.client.claim_yield(&buyer, &test.underlying), 20);
}

#[test]
fn test_batch_distribute() {
    let test = SplitterTest::setup();
    test.create_market();
    let second = test.new_asset();
    test.create_market_for(&second);

    test.deposit(&test.user, 200);
    test.client.wrap(&test.user, &second, &400);
    test.client.split(&test.user, &second, &400, &0, &0);

    let markets = vec![&test.env, test.underlying.clone(), second.clone()];
    let amounts: Vec<i128> = vec![&test.env, 100, 60];
    assert_eq!(
        test.client
            .batch_distribute_yield(&test.yield_source, &markets, &amounts),
        2
    );

    assert_eq!(
        test.client.get_market(&test.underlying).yield_index,
        100 * YIELD_INDEX_SCALE / 200
    );
    assert_eq!(
        test.client.get_market(&second).yield_index,
        60 * YIELD_INDEX_SCALE / 400
    );
    assert_eq!(
        TokenClient::new(&test.env, &second).balance(&test.yield_source),
        STARTING_BALANCE - 60
    );
}

#[test]
fn test_batch_distribute_validation() {
    let test = SplitterTest::setup();
    test.create_market();

    let markets = vec![&test.env, test.underlying.clone()];
    let amounts: Vec<i128> = vec![&test.env, 10, 20];
    assert_eq!(
        test.client
            .try_batch_distribute_yield(&test.yield_source, &markets, &amounts),
        Err(Ok(Error::ArrayLengthMismatch))
    );

    let no_markets: Vec<Address> = Vec::new(&test.env);
    let no_amounts: Vec<i128> = Vec::new(&test.env);
    assert_eq!(
        test.client
            .try_batch_distribute_yield(&test.yield_source, &no_markets, &no_amounts),
        Err(Ok(Error::InvalidInput))
    );
}

#[test]
fn test_batch_distribute_is_all_or_nothing() {
    let test = SplitterTest::setup();
    test.create_market();
    test.deposit(&test.user, 200);
    let unknown = Address::generate(&test.env);

    let markets = vec![&test.env, test.underlying.clone(), unknown];
    let amounts: Vec<i128> = vec![&test.env, 10, 10];
    assert_eq!(
        test.client
            .try_batch_distribute_yield(&test.yield_source, &markets, &amounts),
        Err(Ok(Error::MarketNotFound))
    );

    let market = test.client.get_market(&test.underlying);
    assert_eq!(market.yield_index, 0);
    assert_eq!(market.total_yield_distributed, 0);
    assert_eq!(test.token.balance(&test.yield_source), STARTING_BALANCE);
}

#[test]
fn test_projected_yield() {
    let test = SplitterTest::setup();
    test.create_market();
    test.deposit(&test.user, 10_000);

    // 10_000 YT at 5% APR for 30 days
    assert_eq!(test.client.projected_yield(&test.underlying, &test.user), 41);

    let stranger = Address::generate(&test.env);
    assert_eq!(test.client.projected_yield(&test.underlying, &stranger), 0);

    test.expire();
    assert_eq!(test.client.projected_yield(&test.underlying, &test.user), 0);
}

#[test]
fn test_failed_claim_transfer_keeps_checkpoint() {
    let test = SplitterTest::setup();
    let sac = test
        .env
        .register_stellar_asset_contract_v2(Address::generate(&test.env));
    sac.issuer().set_flag(IssuerFlags::RevocableFlag);
    let asset = sac.address();
    test.install_asset(&asset);
    test.create_market_for(&asset);

    test.client.wrap(&test.user, &asset, &200);
    test.client.split(&test.user, &asset, &200, &0, &0);
    test.client.distribute_yield(&test.yield_source, &asset, &50);
    let before = test.client.get_user_position(&asset, &test.user);

    // User can no longer receive the asset, so the payout transfer fails
    StellarAssetClient::new(&test.env, &asset).set_authorized(&test.user, &false);
    assert!(test.client.try_claim_yield(&test.user, &asset).is_err());

    assert_eq!(test.client.get_user_position(&asset, &test.user), before);
    assert_eq!(test.client.get_claimable_yield(&asset, &test.user), 50);
    assert_eq!(test.client.get_market(&asset).total_yield_claimed, 0);

    StellarAssetClient::new(&test.env, &asset).set_authorized(&test.user, &true);
    assert_eq!(test.client.claim_yield(&test.user, &asset), 50);
    assert_eq!(test.client.get_claimable_yield(&asset, &test.user), 0);
}
