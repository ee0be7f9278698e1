use soroban_sdk::{Address, Env, String, Vec};

use crate::config::ConfigManager;
use crate::errors::Error;
use crate::events::EventEmitter;
use crate::issuer::TokenPairIssuer;
use crate::storage::MarketStorage;
use crate::types::Market;
use crate::validation::InputValidator;
use crate::wrapper::AssetWrapper;

/// Market registry: creation, lookup and lifecycle flags.
///
/// One market exists per SY unit. Markets are never deleted; the `active`
/// flag can toggle any number of times, while expiry is a pure function of
/// the ledger clock and the market's maturity.
pub struct MarketRegistry;

impl MarketRegistry {
    /// Create a market and its PT/YT pair.
    ///
    /// Validation runs in this order: controller, asset, duration, investment
    /// bounds, token names, uniqueness. The registry (this contract) becomes
    /// the sole mint/burn authority of the new pair.
    pub fn create_market(
        env: &Env,
        controller: &Address,
        sy_token: &Address,
        maturity_duration: u64,
        pt_name: &String,
        yt_name: &String,
        min_investment: i128,
        max_investment: i128,
    ) -> Result<Market, Error> {
        ConfigManager::require_controller(env, controller)?;

        if !AssetWrapper::is_registered(env, sy_token) {
            return Err(Error::InvalidAsset);
        }
        InputValidator::validate_duration(maturity_duration)?;
        InputValidator::validate_investment_bounds(min_investment, max_investment)?;
        InputValidator::validate_token_name(pt_name)?;
        InputValidator::validate_token_name(yt_name)?;

        if MarketStorage::has_market(env, sy_token) {
            return Err(Error::MarketExists);
        }

        let now = env.ledger().timestamp();
        let maturity = now
            .checked_add(maturity_duration)
            .ok_or(Error::ArithmeticOverflow)?;

        let pair = TokenPairIssuer::create_pair(
            env,
            &env.current_contract_address(),
            sy_token,
            pt_name,
            yt_name,
        );

        let market = Market {
            sy_token: sy_token.clone(),
            pt_token: pair.pt,
            yt_token: pair.yt,
            pt_name: pt_name.clone(),
            yt_name: yt_name.clone(),
            maturity,
            created_at: now,
            min_investment,
            max_investment,
            active: true,
            total_sy_deposited: 0,
            total_redeemed: 0,
            total_yield_distributed: 0,
            total_yield_claimed: 0,
            yield_index: 0,
        };
        MarketStorage::set_market(env, &market);
        MarketStorage::push_market(env, sy_token);

        EventEmitter::emit_market_created(
            env,
            sy_token,
            pt_name,
            yt_name,
            maturity,
            min_investment,
            max_investment,
        );
        Ok(market)
    }

    pub fn get_market(env: &Env, sy_token: &Address) -> Result<Market, Error> {
        MarketStorage::get_market(env, sy_token).ok_or(Error::MarketNotFound)
    }

    pub fn list_markets(env: &Env) -> Vec<Address> {
        MarketStorage::market_list(env)
    }

    pub fn market_count(env: &Env) -> u32 {
        MarketStorage::market_list(env).len()
    }

    /// `active && now < maturity`
    pub fn is_active(env: &Env, sy_token: &Address) -> Result<bool, Error> {
        let market = Self::get_market(env, sy_token)?;
        Ok(market.is_active(env.ledger().timestamp()))
    }

    pub fn is_expired(env: &Env, sy_token: &Address) -> Result<bool, Error> {
        let market = Self::get_market(env, sy_token)?;
        Ok(market.is_expired(env.ledger().timestamp()))
    }

    /// Seconds until maturity, zero once expired.
    pub fn time_to_maturity(env: &Env, sy_token: &Address) -> Result<u64, Error> {
        let market = Self::get_market(env, sy_token)?;
        Ok(market.maturity.saturating_sub(env.ledger().timestamp()))
    }

    /// Load a market that must still be live (split/merge path).
    ///
    /// Expiry is checked before the pause flag so a matured market always
    /// reports `MarketExpired`.
    pub fn require_live(env: &Env, sy_token: &Address) -> Result<Market, Error> {
        let market = Self::get_market(env, sy_token)?;
        let now = env.ledger().timestamp();
        if market.is_expired(now) {
            return Err(Error::MarketExpired);
        }
        if !market.active {
            return Err(Error::MarketInactive);
        }
        Ok(market)
    }

    /// Load a market that must have matured (redeem path). The pause flag is ignored.
    pub fn require_expired(env: &Env, sy_token: &Address) -> Result<Market, Error> {
        let market = Self::get_market(env, sy_token)?;
        if !market.is_expired(env.ledger().timestamp()) {
            return Err(Error::MarketNotExpired);
        }
        Ok(market)
    }

    pub(crate) fn set_active(env: &Env, sy_token: &Address, active: bool) -> Result<Market, Error> {
        let mut market = Self::get_market(env, sy_token)?;
        market.active = active;
        MarketStorage::set_market(env, &market);
        EventEmitter::emit_market_status(env, sy_token, active);
        Ok(market)
    }

    /// Flip every market's flag. Returns the number of markets touched.
    pub(crate) fn set_all_active(env: &Env, active: bool) -> Result<u32, Error> {
        let markets = MarketStorage::market_list(env);
        for sy_token in markets.iter() {
            let mut market = Self::get_market(env, &sy_token)?;
            market.active = active;
            MarketStorage::set_market(env, &market);
        }
        Ok(markets.len())
    }

    pub(crate) fn save(env: &Env, market: &Market) {
        MarketStorage::set_market(env, market);
    }
}
