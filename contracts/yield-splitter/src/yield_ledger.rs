use soroban_sdk::{Address, Env, Vec};

use crate::config::{BPS_DENOMINATOR, SECONDS_PER_YEAR, YIELD_INDEX_SCALE};
use crate::custody::Custody;
use crate::errors::Error;
use crate::events::EventEmitter;
use crate::issuer::TokenPairIssuer;
use crate::markets::MarketRegistry;
use crate::storage::PositionStorage;
use crate::types::{Market, TokenKind, UserPosition};
use crate::validation::InputValidator;
use crate::wrapper::AssetWrapper;

/// Index-based yield accounting.
///
/// Each market keeps a monotonically non-decreasing `yield_index`: yield per
/// unit of YT, scaled by `YIELD_INDEX_SCALE`. A deposit raises the index by
/// `amount * SCALE / yt_supply`; a holder is owed
/// `(index - checkpoint) * yt_amount / SCALE`. Both operations are O(1) in
/// the number of holders.
///
/// The formula assumes `yt_amount` was constant since the checkpoint, so any
/// path that changes a holder's YT balance must call [`YieldLedger::settle`]
/// first. Paths that lower the balance then pay the settled amount out with
/// [`YieldLedger::pay_out`].
///
/// Yield is denominated in the market's underlying asset.
pub struct YieldLedger;

impl YieldLedger {
    /// Deposit `amount` of yield into a live market.
    ///
    /// With no YT outstanding the deposit is recorded in
    /// `total_yield_distributed` but the index does not move, so nobody can
    /// ever claim it.
    pub fn distribute_yield(
        env: &Env,
        source: &Address,
        sy_token: &Address,
        amount: i128,
    ) -> Result<Market, Error> {
        source.require_auth();
        Self::distribute_one(env, source, sy_token, amount)
    }

    /// Apply several distributions from one source. Any failing entry aborts the batch.
    pub fn batch_distribute_yield(
        env: &Env,
        source: &Address,
        markets: &Vec<Address>,
        amounts: &Vec<i128>,
    ) -> Result<u32, Error> {
        source.require_auth();
        InputValidator::validate_batch(markets.len(), amounts.len())?;

        for (sy_token, amount) in markets.iter().zip(amounts.iter()) {
            Self::distribute_one(env, source, &sy_token, amount)?;
        }
        Ok(markets.len())
    }

    fn distribute_one(
        env: &Env,
        source: &Address,
        sy_token: &Address,
        amount: i128,
    ) -> Result<Market, Error> {
        if amount <= 0 {
            return Err(Error::InvalidYieldAmount);
        }
        let mut market = MarketRegistry::get_market(env, sy_token)?;
        if !market.is_active(env.ledger().timestamp()) {
            return Err(Error::MarketInactive);
        }

        Custody::transfer_in(env, sy_token, source, amount)?;

        let yt_supply = TokenPairIssuer::total_supply(env, sy_token, TokenKind::Yt);
        if yt_supply > 0 {
            let delta = amount
                .checked_mul(YIELD_INDEX_SCALE)
                .ok_or(Error::ArithmeticOverflow)?
                / yt_supply;
            market.yield_index = market
                .yield_index
                .checked_add(delta)
                .ok_or(Error::ArithmeticOverflow)?;
        }
        market.total_yield_distributed = market
            .total_yield_distributed
            .checked_add(amount)
            .ok_or(Error::ArithmeticOverflow)?;
        MarketRegistry::save(env, &market);

        EventEmitter::emit_yield_distributed(
            env,
            sy_token,
            source,
            amount,
            yt_supply,
            market.yield_index,
        );
        Ok(market)
    }

    /// Yield accrued under the current YT balance since the last checkpoint.
    pub fn pending_yield(market: &Market, position: &UserPosition) -> Result<i128, Error> {
        let index_delta = market
            .yield_index
            .checked_sub(position.last_yield_index)
            .ok_or(Error::ArithmeticOverflow)?;
        if index_delta == 0 || position.yt_amount == 0 {
            return Ok(0);
        }
        let scaled = index_delta
            .checked_mul(position.yt_amount)
            .ok_or(Error::ArithmeticOverflow)?;
        Ok(scaled / YIELD_INDEX_SCALE)
    }

    /// Settled plus pending yield.
    pub fn claimable(market: &Market, position: &UserPosition) -> Result<i128, Error> {
        position
            .accrued_yield
            .checked_add(Self::pending_yield(market, position)?)
            .ok_or(Error::ArithmeticOverflow)
    }

    pub fn claimable_yield(env: &Env, sy_token: &Address, user: &Address) -> Result<i128, Error> {
        let market = MarketRegistry::get_market(env, sy_token)?;
        let position = PositionStorage::get_or_default(env, sy_token, user);
        Self::claimable(&market, &position)
    }

    /// Fold pending yield into `accrued_yield` and move the checkpoint to the
    /// current index. Must run before `yt_amount` changes.
    pub fn settle(market: &Market, position: &mut UserPosition) -> Result<(), Error> {
        let pending = Self::pending_yield(market, position)?;
        position.accrued_yield = position
            .accrued_yield
            .checked_add(pending)
            .ok_or(Error::ArithmeticOverflow)?;
        position.last_yield_index = market.yield_index;
        Ok(())
    }

    /// Transfer everything settled for `user` and zero the bucket.
    pub fn pay_out(
        env: &Env,
        market: &mut Market,
        user: &Address,
        position: &mut UserPosition,
    ) -> Result<i128, Error> {
        let amount = position.accrued_yield;
        if amount == 0 {
            return Ok(0);
        }
        Custody::transfer_out(env, &market.sy_token, user, amount)?;
        position.accrued_yield = 0;
        market.total_yield_claimed = market
            .total_yield_claimed
            .checked_add(amount)
            .ok_or(Error::ArithmeticOverflow)?;
        Ok(amount)
    }

    /// Pay the caller's claimable yield and checkpoint.
    ///
    /// The checkpoint is written only after the transfer succeeds; if the
    /// transfer fails the invocation aborts and the checkpoint stays put.
    pub fn claim_yield(env: &Env, user: &Address, sy_token: &Address) -> Result<i128, Error> {
        user.require_auth();
        let mut market = MarketRegistry::get_market(env, sy_token)?;
        let mut position = PositionStorage::get_or_default(env, sy_token, user);

        if position.yt_amount == 0 {
            return Err(Error::NoYTTokens);
        }
        if Self::claimable(&market, &position)? == 0 {
            return Err(Error::NoYieldToClaim);
        }

        Self::settle(&market, &mut position)?;
        let amount = Self::pay_out(env, &mut market, user, &mut position)?;
        position.last_interaction = env.ledger().timestamp();

        PositionStorage::set_position(env, sy_token, user, &position);
        MarketRegistry::save(env, &market);

        EventEmitter::emit_yield_claimed(env, sy_token, user, amount, market.yield_index);
        Ok(amount)
    }

    /// Estimated yield until maturity from the wrapper's accrual rate.
    ///
    /// Read-only projection: `yt * rate_bps * seconds_left / (10_000 * year)`.
    /// Actual yield is whatever gets distributed.
    pub fn projected_yield(env: &Env, sy_token: &Address, user: &Address) -> Result<i128, Error> {
        let market = MarketRegistry::get_market(env, sy_token)?;
        let wrapper = AssetWrapper::get_wrapper(env, sy_token)?;
        let position = PositionStorage::get_or_default(env, sy_token, user);

        let remaining = market.maturity.saturating_sub(env.ledger().timestamp());
        if remaining == 0 || position.yt_amount == 0 {
            return Ok(0);
        }

        let numerator = position
            .yt_amount
            .checked_mul(wrapper.accrual_rate_bps as i128)
            .and_then(|v| v.checked_mul(remaining as i128))
            .ok_or(Error::ArithmeticOverflow)?;
        Ok(numerator / (BPS_DENOMINATOR * SECONDS_PER_YEAR as i128))
    }
}
