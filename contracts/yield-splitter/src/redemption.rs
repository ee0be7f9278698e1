use soroban_sdk::{Address, Env};

use crate::errors::Error;
use crate::events::EventEmitter;
use crate::markets::MarketRegistry;
use crate::split_merge::SplitMergeEngine;
use crate::types::BurnResult;

/// Post-maturity path from PT+YT back to SY.
///
/// Market state machine: `Created(active) -> [Paused <-> Active]* -> Expired`.
/// Redeem is only valid once expired, and the pause flag has no effect on it.
pub struct RedemptionEngine;

impl RedemptionEngine {
    pub fn redeem(
        env: &Env,
        user: &Address,
        sy_token: &Address,
        pt_amount: i128,
        yt_amount: i128,
    ) -> Result<BurnResult, Error> {
        user.require_auth();
        let market = MarketRegistry::require_expired(env, sy_token)?;

        if pt_amount <= 0 || yt_amount <= 0 {
            return Err(Error::InvalidAmount);
        }
        if pt_amount != yt_amount {
            return Err(Error::InsufficientSYAmount);
        }

        let result = SplitMergeEngine::burn_pair(env, market, user, pt_amount)?;

        EventEmitter::emit_redeemed(env, sy_token, user, result.sy_returned, result.yield_paid);
        Ok(result)
    }
}
