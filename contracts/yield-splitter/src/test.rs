#![cfg(test)]

use super::*;
use crate::config::{SECONDS_PER_DAY, YIELD_INDEX_SCALE};
use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token::{Client as TokenClient, StellarAssetClient},
};

/// Starting underlying balance of every funded test account.
pub(crate) const STARTING_BALANCE: i128 = 10_000;

/// Default market length used by the harness.
pub(crate) const MARKET_DURATION: u64 = 30 * SECONDS_PER_DAY;

pub(crate) struct SplitterTest<'a> {
    pub env: Env,
    pub contract_id: Address,
    pub client: YieldSplitterClient<'a>,
    pub controller: Address,
    pub user: Address,
    pub yield_source: Address,
    /// Underlying asset of the default market; also its SY identity
    pub underlying: Address,
    pub token: TokenClient<'a>,
}

impl<'a> SplitterTest<'a> {
    /// Deployed and initialized contract with one registered wrapper.
    /// `user` and `yield_source` are funded and have approved the contract.
    pub fn setup() -> Self {
        let env = Env::default();
        env.mock_all_auths();

        let controller = Address::generate(&env);
        let user = Address::generate(&env);
        let yield_source = Address::generate(&env);

        let contract_id = env.register(YieldSplitter, ());
        let client = YieldSplitterClient::new(&env, &contract_id);
        client.initialize(&controller);

        let underlying = env
            .register_stellar_asset_contract_v2(Address::generate(&env))
            .address();
        let test = Self {
            token: TokenClient::new(&env, &underlying),
            underlying,
            env,
            contract_id,
            client,
            controller,
            user,
            yield_source,
        };
        test.install_asset(&test.underlying);
        test
    }

    /// Register a fresh underlying asset with its SY wrapper.
    pub fn new_asset(&self) -> Address {
        let asset = self
            .env
            .register_stellar_asset_contract_v2(Address::generate(&self.env))
            .address();
        self.install_asset(&asset);
        asset
    }

    /// Register the SY wrapper for `asset` and fund the default accounts with it.
    pub fn install_asset(&self, asset: &Address) {
        self.client.register_wrapper(
            &self.controller,
            asset,
            &String::from_str(&self.env, "SY Wrapped Asset"),
            &500,
        );
        self.fund(asset, &self.user, STARTING_BALANCE);
        self.fund(asset, &self.yield_source, STARTING_BALANCE);
    }

    /// Mint `amount` of `asset` to `account` and approve the contract to pull it.
    pub fn fund(&self, asset: &Address, account: &Address, amount: i128) {
        StellarAssetClient::new(&self.env, asset).mint(account, &amount);
        self.approve(asset, account, i128::MAX / 2);
    }

    pub fn approve(&self, asset: &Address, account: &Address, amount: i128) {
        let expiration = self.env.ledger().sequence() + 1_000;
        TokenClient::new(&self.env, asset).approve(account, &self.contract_id, &amount, &expiration);
    }

    /// Default market: 30 days, investment bounds `[100, 1_000_000]`.
    pub fn create_market(&self) -> Market {
        self.create_market_for(&self.underlying)
    }

    pub fn create_market_for(&self, asset: &Address) -> Market {
        self.client.create_market(
            &self.controller,
            asset,
            &MARKET_DURATION,
            &String::from_str(&self.env, "PT Test"),
            &String::from_str(&self.env, "YT Test"),
            &100,
            &1_000_000,
        )
    }

    /// Wrap then split in one go.
    pub fn deposit(&self, account: &Address, amount: i128) -> UserPosition {
        self.client.wrap(account, &self.underlying, &amount);
        self.client.split(account, &self.underlying, &amount, &amount, &amount)
    }

    pub fn distribute(&self, amount: i128) -> Market {
        self.client
            .distribute_yield(&self.yield_source, &self.underlying, &amount)
    }

    pub fn advance(&self, seconds: u64) {
        let now = self.env.ledger().timestamp();
        self.env.ledger().set_timestamp(now + seconds);
    }

    pub fn expire(&self) {
        self.advance(MARKET_DURATION);
    }

    pub fn pt_balance(&self, account: &Address) -> i128 {
        self.client
            .unit_balance(&self.underlying, &TokenKind::Pt, account)
    }

    pub fn yt_balance(&self, account: &Address) -> i128 {
        self.client
            .unit_balance(&self.underlying, &TokenKind::Yt, account)
    }

    pub fn sy_balance(&self, account: &Address) -> i128 {
        self.client.sy_balance(&self.underlying, account)
    }
}

#[test]
fn test_full_market_lifecycle() {
    let test = SplitterTest::setup();
    test.create_market();

    test.client.wrap(&test.user, &test.underlying, &500);
    assert_eq!(test.sy_balance(&test.user), 500);

    let position = test
        .client
        .split(&test.user, &test.underlying, &200, &200, &200);
    assert_eq!(position.pt_amount, 200);
    assert_eq!(position.yt_amount, 200);
    assert_eq!(test.sy_balance(&test.user), 300);

    let market = test.client.get_market(&test.underlying);
    assert_eq!(market.total_sy_deposited, 200);
    assert_eq!(market.yield_index, 0);

    let market = test.distribute(50);
    assert_eq!(market.yield_index, 50 * YIELD_INDEX_SCALE / 200);
    assert_eq!(market.total_yield_distributed, 50);

    test.expire();
    assert!(test.client.is_expired(&test.underlying));

    let result = test.client.redeem(&test.user, &test.underlying, &200, &200);
    assert_eq!(result.sy_returned, 200);
    assert_eq!(result.yield_paid, 50);
    assert_eq!(test.sy_balance(&test.user), 500);
    assert_eq!(
        test.token.balance(&test.user),
        STARTING_BALANCE - 500 + 50
    );

    assert_eq!(
        test.client
            .try_redeem(&test.user, &test.underlying, &200, &200),
        Err(Ok(Error::InsufficientPTBalance))
    );

    let result = test.client.unwrap(&test.user, &test.underlying, &500);
    assert_eq!(result, 0);
    assert_eq!(test.token.balance(&test.user), STARTING_BALANCE + 50);
    assert_eq!(test.token.balance(&test.contract_id), 0);
}

#[test]
fn test_initialize_stores_controller() {
    let test = SplitterTest::setup();
    let config = test.client.get_config();
    assert_eq!(config.controller, test.controller);
}

#[test]
fn test_initialize_twice_fails() {
    let test = SplitterTest::setup();
    let other = Address::generate(&test.env);
    assert_eq!(
        test.client.try_initialize(&other),
        Err(Ok(Error::AlreadyInitialized))
    );
}

#[test]
fn test_uninitialized_contract_rejects_calls() {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(YieldSplitter, ());
    let client = YieldSplitterClient::new(&env, &contract_id);
    let user = Address::generate(&env);
    let asset = Address::generate(&env);

    assert_eq!(client.try_get_config(), Err(Ok(Error::NotInitialized)));
    assert_eq!(
        client.try_wrap(&user, &asset, &100),
        Err(Ok(Error::NotInitialized))
    );
    assert_eq!(client.get_protocol_stats().total_markets, 0);
}

#[test]
fn test_transfer_control() {
    let test = SplitterTest::setup();
    let new_controller = Address::generate(&test.env);

    let config = test
        .client
        .transfer_control(&test.controller, &new_controller);
    assert_eq!(config.controller, new_controller);

    // The previous controller has lost the capability
    assert_eq!(
        test.client
            .try_pause_market(&test.controller, &test.underlying),
        Err(Ok(Error::Unauthorized))
    );

    let asset = test.underlying.clone();
    test.client.create_market(
        &new_controller,
        &asset,
        &MARKET_DURATION,
        &String::from_str(&test.env, "PT"),
        &String::from_str(&test.env, "YT"),
        &100,
        &1_000,
    );
    assert_eq!(test.client.market_count(), 1);
}

#[test]
fn test_transfer_control_requires_controller() {
    let test = SplitterTest::setup();
    let stranger = Address::generate(&test.env);
    assert_eq!(
        test.client.try_transfer_control(&stranger, &stranger),
        Err(Ok(Error::Unauthorized))
    );
}

#[test]
fn test_guard_released_between_calls() {
    let test = SplitterTest::setup();
    test.create_market();
    test.deposit(&test.user, 200);
    test.deposit(&test.user, 300);

    let locked = test
        .env
        .as_contract(&test.contract_id, || ReentrancyGuard::is_locked(&test.env));
    assert!(!locked);
    assert_eq!(test.pt_balance(&test.user), 500);
}
