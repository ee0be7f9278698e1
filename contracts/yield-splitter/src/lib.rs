#![no_std]

//! Yield tokenization contract.
//!
//! Depositors wrap an underlying asset into SY, split SY into a principal
//! claim (PT) and a yield claim (YT), collect yield distributed to YT holders
//! through an index accumulator, and redeem PT+YT back into SY after
//! maturity.

use soroban_sdk::{contract, contractimpl, Address, Env, String, Vec};

pub mod admin;
pub mod config;
pub mod custody;
pub mod errors;
pub mod events;
pub mod issuer;
pub mod markets;
pub mod positions;
pub mod reentrancy_guard;
pub mod redemption;
pub mod split_merge;
pub mod statistics;
pub mod storage;
pub mod types;
pub mod validation;
pub mod wrapper;
pub mod yield_ledger;

use admin::AdminFunctions;
use config::ConfigManager;
use errors::Error;
use issuer::TokenPairIssuer;
use markets::MarketRegistry;
use positions::PositionManager;
use redemption::RedemptionEngine;
use reentrancy_guard::ReentrancyGuard;
use split_merge::SplitMergeEngine;
use statistics::StatisticsManager;
use storage::ConfigStorage;
use types::{BurnResult, Market, ProtocolConfig, ProtocolStats, SyWrapper, TokenKind, UserPosition};
use wrapper::AssetWrapper;
use yield_ledger::YieldLedger;

#[contract]
pub struct YieldSplitter;

/// Runs a state-changing entrypoint: initialized, single-entry.
fn execute<T, F>(env: &Env, f: F) -> Result<T, Error>
where
    F: FnOnce() -> Result<T, Error>,
{
    ConfigManager::require_initialized(env)?;
    ConfigStorage::bump_instance(env);
    ReentrancyGuard::guarded(env, f)
}

#[contractimpl]
impl YieldSplitter {
    // ===== LIFECYCLE =====

    pub fn initialize(env: Env, controller: Address) -> Result<ProtocolConfig, Error> {
        ConfigManager::initialize(&env, &controller)
    }

    pub fn transfer_control(
        env: Env,
        controller: Address,
        new_controller: Address,
    ) -> Result<ProtocolConfig, Error> {
        execute(&env, || {
            ConfigManager::transfer_control(&env, &controller, &new_controller)
        })
    }

    pub fn get_config(env: Env) -> Result<ProtocolConfig, Error> {
        ConfigManager::get_config(&env)
    }

    // ===== ASSET WRAPPER =====

    pub fn register_wrapper(
        env: Env,
        controller: Address,
        underlying: Address,
        name: String,
        accrual_rate_bps: u32,
    ) -> Result<SyWrapper, Error> {
        execute(&env, || {
            AssetWrapper::register(&env, &controller, &underlying, &name, accrual_rate_bps)
        })
    }

    pub fn set_accrual_rate(
        env: Env,
        controller: Address,
        underlying: Address,
        accrual_rate_bps: u32,
    ) -> Result<SyWrapper, Error> {
        execute(&env, || {
            AssetWrapper::set_accrual_rate(&env, &controller, &underlying, accrual_rate_bps)
        })
    }

    /// Wrap underlying into SY 1:1. Requires a prior token `approve` for this contract.
    pub fn wrap(env: Env, user: Address, underlying: Address, amount: i128) -> Result<i128, Error> {
        execute(&env, || AssetWrapper::wrap(&env, &user, &underlying, amount))
    }

    pub fn unwrap(env: Env, user: Address, underlying: Address, amount: i128) -> Result<i128, Error> {
        execute(&env, || AssetWrapper::unwrap(&env, &user, &underlying, amount))
    }

    pub fn get_wrapper(env: Env, underlying: Address) -> Result<SyWrapper, Error> {
        AssetWrapper::get_wrapper(&env, &underlying)
    }

    pub fn sy_balance(env: Env, underlying: Address, user: Address) -> i128 {
        AssetWrapper::sy_balance(&env, &underlying, &user)
    }

    // ===== MARKET REGISTRY =====

    pub fn create_market(
        env: Env,
        controller: Address,
        sy_token: Address,
        maturity_duration: u64,
        pt_name: String,
        yt_name: String,
        min_investment: i128,
        max_investment: i128,
    ) -> Result<Market, Error> {
        execute(&env, || {
            MarketRegistry::create_market(
                &env,
                &controller,
                &sy_token,
                maturity_duration,
                &pt_name,
                &yt_name,
                min_investment,
                max_investment,
            )
        })
    }

    pub fn pause_market(env: Env, controller: Address, sy_token: Address) -> Result<Market, Error> {
        execute(&env, || AdminFunctions::pause_market(&env, &controller, &sy_token))
    }

    pub fn resume_market(env: Env, controller: Address, sy_token: Address) -> Result<Market, Error> {
        execute(&env, || AdminFunctions::resume_market(&env, &controller, &sy_token))
    }

    pub fn emergency_pause_all(env: Env, controller: Address) -> Result<u32, Error> {
        execute(&env, || AdminFunctions::emergency_pause_all(&env, &controller))
    }

    pub fn emergency_resume_all(env: Env, controller: Address) -> Result<u32, Error> {
        execute(&env, || AdminFunctions::emergency_resume_all(&env, &controller))
    }

    pub fn get_market(env: Env, sy_token: Address) -> Result<Market, Error> {
        MarketRegistry::get_market(&env, &sy_token)
    }

    pub fn list_markets(env: Env) -> Vec<Address> {
        MarketRegistry::list_markets(&env)
    }

    pub fn market_count(env: Env) -> u32 {
        MarketRegistry::market_count(&env)
    }

    pub fn is_active(env: Env, sy_token: Address) -> Result<bool, Error> {
        MarketRegistry::is_active(&env, &sy_token)
    }

    pub fn is_expired(env: Env, sy_token: Address) -> Result<bool, Error> {
        MarketRegistry::is_expired(&env, &sy_token)
    }

    pub fn time_to_maturity(env: Env, sy_token: Address) -> Result<u64, Error> {
        MarketRegistry::time_to_maturity(&env, &sy_token)
    }

    // ===== SPLIT / MERGE =====

    pub fn split(
        env: Env,
        user: Address,
        sy_token: Address,
        sy_amount: i128,
        min_pt_out: i128,
        min_yt_out: i128,
    ) -> Result<UserPosition, Error> {
        execute(&env, || {
            SplitMergeEngine::split(&env, &user, &sy_token, sy_amount, min_pt_out, min_yt_out)
        })
    }

    pub fn merge(
        env: Env,
        user: Address,
        sy_token: Address,
        pt_amount: i128,
        yt_amount: i128,
    ) -> Result<BurnResult, Error> {
        execute(&env, || {
            SplitMergeEngine::merge(&env, &user, &sy_token, pt_amount, yt_amount)
        })
    }

    /// Move SY, PT or YT between holders.
    pub fn transfer(
        env: Env,
        from: Address,
        to: Address,
        sy_token: Address,
        kind: TokenKind,
        amount: i128,
    ) -> Result<(), Error> {
        execute(&env, || {
            PositionManager::transfer(&env, &from, &to, &sy_token, kind, amount)
        })
    }

    // ===== YIELD =====

    pub fn distribute_yield(
        env: Env,
        source: Address,
        sy_token: Address,
        amount: i128,
    ) -> Result<Market, Error> {
        execute(&env, || {
            YieldLedger::distribute_yield(&env, &source, &sy_token, amount)
        })
    }

    pub fn batch_distribute_yield(
        env: Env,
        source: Address,
        markets: Vec<Address>,
        amounts: Vec<i128>,
    ) -> Result<u32, Error> {
        execute(&env, || {
            YieldLedger::batch_distribute_yield(&env, &source, &markets, &amounts)
        })
    }

    pub fn claim_yield(env: Env, user: Address, sy_token: Address) -> Result<i128, Error> {
        execute(&env, || YieldLedger::claim_yield(&env, &user, &sy_token))
    }

    pub fn get_claimable_yield(env: Env, sy_token: Address, user: Address) -> Result<i128, Error> {
        YieldLedger::claimable_yield(&env, &sy_token, &user)
    }

    pub fn projected_yield(env: Env, sy_token: Address, user: Address) -> Result<i128, Error> {
        YieldLedger::projected_yield(&env, &sy_token, &user)
    }

    // ===== REDEMPTION =====

    pub fn redeem(
        env: Env,
        user: Address,
        sy_token: Address,
        pt_amount: i128,
        yt_amount: i128,
    ) -> Result<BurnResult, Error> {
        execute(&env, || {
            RedemptionEngine::redeem(&env, &user, &sy_token, pt_amount, yt_amount)
        })
    }

    // ===== VIEWS =====

    pub fn get_user_position(env: Env, sy_token: Address, user: Address) -> Result<UserPosition, Error> {
        PositionManager::get_user_position(&env, &sy_token, &user)
    }

    pub fn get_protocol_stats(env: Env) -> Result<ProtocolStats, Error> {
        StatisticsManager::get_protocol_stats(&env)
    }

    pub fn unit_balance(env: Env, sy_token: Address, kind: TokenKind, user: Address) -> i128 {
        match kind {
            TokenKind::Sy => AssetWrapper::sy_balance(&env, &sy_token, &user),
            TokenKind::Pt | TokenKind::Yt => TokenPairIssuer::balance_of(&env, &sy_token, kind, &user),
        }
    }

    pub fn unit_supply(env: Env, sy_token: Address, kind: TokenKind) -> i128 {
        TokenPairIssuer::total_supply(&env, &sy_token, kind)
    }
}

#[cfg(test)]
mod test;
#[cfg(test)]
mod yield_tests;
