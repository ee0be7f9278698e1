use soroban_sdk::Env;

use crate::errors::Error;
use crate::markets::MarketRegistry;
use crate::storage::{MarketStorage, WrapperStorage};
use crate::types::ProtocolStats;

/// Read-only protocol aggregation for dashboards.
///
/// Walks the market and wrapper lists; this is a view for off-chain
/// consumers and is never called from a state-changing path.
pub struct StatisticsManager;

impl StatisticsManager {
    pub fn get_protocol_stats(env: &Env) -> Result<ProtocolStats, Error> {
        let now = env.ledger().timestamp();
        let markets = MarketStorage::market_list(env);

        let mut stats = ProtocolStats {
            total_markets: markets.len(),
            active_markets: 0,
            total_value_locked: 0,
            total_yield_distributed: 0,
            total_sy_supply: 0,
        };

        for sy_token in markets.iter() {
            let market = MarketRegistry::get_market(env, &sy_token)?;
            if market.is_active(now) {
                stats.active_markets += 1;
            }
            stats.total_value_locked = stats
                .total_value_locked
                .checked_add(market.locked_sy())
                .ok_or(Error::ArithmeticOverflow)?;
            stats.total_yield_distributed = stats
                .total_yield_distributed
                .checked_add(market.total_yield_distributed)
                .ok_or(Error::ArithmeticOverflow)?;
        }

        for underlying in WrapperStorage::wrapper_list(env).iter() {
            if let Some(wrapper) = WrapperStorage::get_wrapper(env, &underlying) {
                stats.total_sy_supply = stats
                    .total_sy_supply
                    .checked_add(wrapper.total_supply)
                    .ok_or(Error::ArithmeticOverflow)?;
            }
        }

        Ok(stats)
    }
}
