use soroban_sdk::{Address, Env};

use crate::config::ConfigManager;
use crate::errors::Error;
use crate::events::EventEmitter;
use crate::markets::MarketRegistry;
use crate::types::Market;

/// Administrative surface of the registry.
///
/// Every function starts with the controller capability check; there is no
/// role hierarchy, only the single controller identity stored in the
/// protocol configuration.
pub struct AdminFunctions;

impl AdminFunctions {
    /// Pause one market. Pausing an already paused market is allowed.
    pub fn pause_market(env: &Env, controller: &Address, sy_token: &Address) -> Result<Market, Error> {
        ConfigManager::require_controller(env, controller)?;
        MarketRegistry::set_active(env, sy_token, false)
    }

    /// Resume one market. Resuming an already active market is allowed.
    pub fn resume_market(env: &Env, controller: &Address, sy_token: &Address) -> Result<Market, Error> {
        ConfigManager::require_controller(env, controller)?;
        MarketRegistry::set_active(env, sy_token, true)
    }

    /// Incident response: pause every market.
    ///
    /// Any failure while iterating aborts the invocation, and the host
    /// discards the markets already flipped.
    pub fn emergency_pause_all(env: &Env, controller: &Address) -> Result<u32, Error> {
        ConfigManager::require_controller(env, controller)?;
        let count = MarketRegistry::set_all_active(env, false)?;
        EventEmitter::emit_emergency(env, controller, true, count);
        Ok(count)
    }

    pub fn emergency_resume_all(env: &Env, controller: &Address) -> Result<u32, Error> {
        ConfigManager::require_controller(env, controller)?;
        let count = MarketRegistry::set_all_active(env, true)?;
        EventEmitter::emit_emergency(env, controller, false, count);
        Ok(count)
    }
}
