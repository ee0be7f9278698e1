use soroban_sdk::{Address, Env};

use crate::errors::Error;
use crate::events::EventEmitter;
use crate::storage::ConfigStorage;
use crate::types::ProtocolConfig;

// ===== TIME CONSTANTS =====

/// Seconds in one day
pub const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Seconds in a 365-day year, used to annualize accrual rates
pub const SECONDS_PER_YEAR: u64 = 365 * SECONDS_PER_DAY;

/// Shortest allowed maturity duration (1 day)
pub const MIN_MATURITY_DURATION: u64 = SECONDS_PER_DAY;

/// Longest allowed maturity duration (365 days)
pub const MAX_MATURITY_DURATION: u64 = 365 * SECONDS_PER_DAY;

// ===== ACCOUNTING CONSTANTS =====

/// Fixed-point factor for the per-market yield index
pub const YIELD_INDEX_SCALE: i128 = 1_000_000_000_000_000_000;

/// Basis point denominator (100%)
pub const BPS_DENOMINATOR: i128 = 10_000;

/// Accrual rate ceiling (100% APR)
pub const MAX_ACCRUAL_RATE_BPS: u32 = 10_000;

// ===== LIMITS =====

/// Maximum markets touched by one batch yield distribution
pub const MAX_BATCH_SIZE: u32 = 50;

/// Maximum length of a PT/YT/SY display name
pub const MAX_TOKEN_NAME_LENGTH: u32 = 64;

// ===== STORAGE LIFETIME =====

/// Ledgers closed per day at ~5s per ledger
pub const DAY_IN_LEDGERS: u32 = 17_280;

/// TTL that records are extended to on every write (120 days)
pub const PERSISTENT_BUMP_AMOUNT: u32 = 120 * DAY_IN_LEDGERS;

/// Records whose remaining TTL is below this are extended on write
pub const PERSISTENT_LIFETIME_THRESHOLD: u32 = PERSISTENT_BUMP_AMOUNT - DAY_IN_LEDGERS;

/// Stored protocol configuration: the controller identity.
pub struct ConfigManager;

impl ConfigManager {
    /// One-time setup. Fails if a configuration is already stored.
    pub fn initialize(env: &Env, controller: &Address) -> Result<ProtocolConfig, Error> {
        if ConfigStorage::has_config(env) {
            return Err(Error::AlreadyInitialized);
        }
        controller.require_auth();

        let config = ProtocolConfig {
            controller: controller.clone(),
            initialized_at: env.ledger().timestamp(),
        };
        ConfigStorage::set_config(env, &config);
        EventEmitter::emit_initialized(env, controller);
        Ok(config)
    }

    pub fn get_config(env: &Env) -> Result<ProtocolConfig, Error> {
        ConfigStorage::get_config(env).ok_or(Error::NotInitialized)
    }

    /// Hand the administrative capability to a new controller.
    pub fn transfer_control(
        env: &Env,
        controller: &Address,
        new_controller: &Address,
    ) -> Result<ProtocolConfig, Error> {
        let mut config = Self::require_controller(env, controller)?;
        new_controller.require_auth();

        config.controller = new_controller.clone();
        ConfigStorage::set_config(env, &config);
        EventEmitter::emit_control_transferred(env, controller, new_controller);
        Ok(config)
    }

    /// Capability check placed at the top of every administrative function.
    pub fn require_controller(env: &Env, caller: &Address) -> Result<ProtocolConfig, Error> {
        let config = Self::get_config(env)?;
        caller.require_auth();
        if *caller != config.controller {
            return Err(Error::Unauthorized);
        }
        Ok(config)
    }

    pub fn require_initialized(env: &Env) -> Result<(), Error> {
        if ConfigStorage::has_config(env) {
            Ok(())
        } else {
            Err(Error::NotInitialized)
        }
    }
}
