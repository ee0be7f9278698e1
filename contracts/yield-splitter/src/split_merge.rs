use soroban_sdk::{Address, Env};

use crate::errors::Error;
use crate::events::EventEmitter;
use crate::issuer::TokenPairIssuer;
use crate::markets::MarketRegistry;
use crate::storage::PositionStorage;
use crate::types::{BurnResult, Market, TokenKind, UserPosition};
use crate::validation::InputValidator;
use crate::wrapper::AssetWrapper;
use crate::yield_ledger::YieldLedger;

/// Converts SY into PT+YT and back before maturity.
pub struct SplitMergeEngine;

impl SplitMergeEngine {
    /// PT and YT minted for `sy_amount` of SY. Currently always 1:1:1.
    pub fn conversion_output(sy_amount: i128) -> (i128, i128) {
        (sy_amount, sy_amount)
    }

    /// Split `sy_amount` of the caller's SY into equal PT and YT.
    ///
    /// Pending yield under the caller's existing YT is settled before the new
    /// YT is minted.
    pub fn split(
        env: &Env,
        user: &Address,
        sy_token: &Address,
        sy_amount: i128,
        min_pt_out: i128,
        min_yt_out: i128,
    ) -> Result<UserPosition, Error> {
        user.require_auth();
        InputValidator::validate_amount(sy_amount)?;

        let mut market = MarketRegistry::require_live(env, sy_token)?;
        if sy_amount < market.min_investment {
            return Err(Error::BelowMinInvestment);
        }
        if sy_amount > market.max_investment {
            return Err(Error::AboveMaxInvestment);
        }

        let (pt_out, yt_out) = Self::conversion_output(sy_amount);
        if min_pt_out > pt_out {
            return Err(Error::InsufficientPTAmount);
        }
        if min_yt_out > yt_out {
            return Err(Error::InsufficientYTAmount);
        }

        let registry = env.current_contract_address();
        AssetWrapper::move_sy(env, sy_token, user, &registry, sy_amount)?;

        let mut position = PositionStorage::get_or_default(env, sy_token, user);
        YieldLedger::settle(&market, &mut position)?;

        TokenPairIssuer::mint(env, &registry, sy_token, TokenKind::Pt, user, pt_out)?;
        TokenPairIssuer::mint(env, &registry, sy_token, TokenKind::Yt, user, yt_out)?;

        position.pt_amount = position
            .pt_amount
            .checked_add(pt_out)
            .ok_or(Error::ArithmeticOverflow)?;
        position.yt_amount = position
            .yt_amount
            .checked_add(yt_out)
            .ok_or(Error::ArithmeticOverflow)?;
        position.last_interaction = env.ledger().timestamp();

        market.total_sy_deposited = market
            .total_sy_deposited
            .checked_add(sy_amount)
            .ok_or(Error::ArithmeticOverflow)?;

        PositionStorage::set_position(env, sy_token, user, &position);
        MarketRegistry::save(env, &market);

        EventEmitter::emit_split(env, sy_token, user, sy_amount, pt_out, yt_out);
        Ok(position)
    }

    /// Burn equal PT and YT before maturity and return the SY.
    pub fn merge(
        env: &Env,
        user: &Address,
        sy_token: &Address,
        pt_amount: i128,
        yt_amount: i128,
    ) -> Result<BurnResult, Error> {
        user.require_auth();
        InputValidator::validate_amount(pt_amount)?;
        InputValidator::validate_amount(yt_amount)?;
        if pt_amount != yt_amount {
            return Err(Error::AmountMismatch);
        }

        let market = MarketRegistry::require_live(env, sy_token)?;
        let result = Self::burn_pair(env, market, user, pt_amount)?;

        EventEmitter::emit_merged(env, sy_token, user, result.sy_returned, result.yield_paid);
        Ok(result)
    }

    /// Shared tail of merge and redeem.
    ///
    /// Checks balances, settles and pays out yield under the old YT balance,
    /// burns `amount` of PT and YT and releases `amount` of SY from market
    /// custody to `user`.
    pub(crate) fn burn_pair(
        env: &Env,
        mut market: Market,
        user: &Address,
        amount: i128,
    ) -> Result<BurnResult, Error> {
        let sy_token = market.sy_token.clone();
        if TokenPairIssuer::balance_of(env, &sy_token, TokenKind::Pt, user) < amount {
            return Err(Error::InsufficientPTBalance);
        }
        if TokenPairIssuer::balance_of(env, &sy_token, TokenKind::Yt, user) < amount {
            return Err(Error::InsufficientYTBalance);
        }

        let mut position = PositionStorage::get_or_default(env, &sy_token, user);
        YieldLedger::settle(&market, &mut position)?;
        let yield_paid = YieldLedger::pay_out(env, &mut market, user, &mut position)?;

        let registry = env.current_contract_address();
        TokenPairIssuer::burn(env, &registry, &sy_token, TokenKind::Pt, user, amount)?;
        TokenPairIssuer::burn(env, &registry, &sy_token, TokenKind::Yt, user, amount)?;
        AssetWrapper::move_sy(env, &sy_token, &registry, user, amount)?;

        position.pt_amount -= amount;
        position.yt_amount -= amount;
        position.last_interaction = env.ledger().timestamp();

        market.total_redeemed = market
            .total_redeemed
            .checked_add(amount)
            .ok_or(Error::ArithmeticOverflow)?;

        PositionStorage::set_position(env, &sy_token, user, &position);
        MarketRegistry::save(env, &market);

        Ok(BurnResult {
            sy_returned: amount,
            yield_paid,
        })
    }
}
