use soroban_sdk::{Address, Env, String};

use crate::config::ConfigManager;
use crate::custody::Custody;
use crate::errors::Error;
use crate::events::EventEmitter;
use crate::issuer::UnitLedger;
use crate::storage::WrapperStorage;
use crate::types::{SyWrapper, TokenKind, UnitId};
use crate::validation::InputValidator;

/// Asset wrapper: 1:1 custody of an underlying asset as SY.
///
/// This struct provides functionality to:
/// - Register an SY unit for an underlying token (controller only)
/// - Wrap underlying into SY and unwrap SY back to underlying
/// - Track the informational accrual rate consumed by yield projections
///
/// No yield logic lives here.
pub struct AssetWrapper;

impl AssetWrapper {
    pub fn register(
        env: &Env,
        controller: &Address,
        underlying: &Address,
        name: &String,
        accrual_rate_bps: u32,
    ) -> Result<SyWrapper, Error> {
        ConfigManager::require_controller(env, controller)?;
        InputValidator::validate_token_name(name)?;
        InputValidator::validate_accrual_rate(accrual_rate_bps)?;

        if WrapperStorage::get_wrapper(env, underlying).is_some() {
            return Err(Error::WrapperExists);
        }

        let wrapper = SyWrapper {
            underlying: underlying.clone(),
            name: name.clone(),
            accrual_rate_bps,
            total_supply: 0,
            created_at: env.ledger().timestamp(),
        };
        WrapperStorage::set_wrapper(env, &wrapper);
        WrapperStorage::push_wrapper(env, underlying);

        EventEmitter::emit_wrapper_registered(env, underlying, name, accrual_rate_bps);
        Ok(wrapper)
    }

    pub fn set_accrual_rate(
        env: &Env,
        controller: &Address,
        underlying: &Address,
        accrual_rate_bps: u32,
    ) -> Result<SyWrapper, Error> {
        ConfigManager::require_controller(env, controller)?;
        InputValidator::validate_accrual_rate(accrual_rate_bps)?;

        let mut wrapper = Self::get_wrapper(env, underlying)?;
        let old_rate = wrapper.accrual_rate_bps;
        wrapper.accrual_rate_bps = accrual_rate_bps;
        WrapperStorage::set_wrapper(env, &wrapper);

        EventEmitter::emit_accrual_rate_updated(env, underlying, old_rate, accrual_rate_bps);
        Ok(wrapper)
    }

    /// Pull `amount` of the underlying from `user` and mint the same amount of SY.
    ///
    /// # Returns
    /// * `Result<i128, Error>` - The user's SY balance after wrapping.
    pub fn wrap(env: &Env, user: &Address, underlying: &Address, amount: i128) -> Result<i128, Error> {
        user.require_auth();
        InputValidator::validate_amount(amount)?;

        let mut wrapper = Self::get_wrapper(env, underlying)?;
        Custody::transfer_in(env, underlying, user, amount)?;

        let balance = UnitLedger::credit(env, &Self::sy_unit(underlying), user, amount)?;
        wrapper.total_supply = wrapper
            .total_supply
            .checked_add(amount)
            .ok_or(Error::ArithmeticOverflow)?;
        WrapperStorage::set_wrapper(env, &wrapper);

        EventEmitter::emit_wrapped(env, underlying, user, amount, balance);
        Ok(balance)
    }

    /// Burn `amount` of SY from `user` and return the same amount of the underlying.
    pub fn unwrap(env: &Env, user: &Address, underlying: &Address, amount: i128) -> Result<i128, Error> {
        user.require_auth();
        InputValidator::validate_amount(amount)?;

        let mut wrapper = Self::get_wrapper(env, underlying)?;
        let balance = UnitLedger::debit(
            env,
            &Self::sy_unit(underlying),
            user,
            amount,
            Error::InsufficientBalance,
        )?;
        wrapper.total_supply -= amount;
        WrapperStorage::set_wrapper(env, &wrapper);

        Custody::transfer_out(env, underlying, user, amount)?;

        EventEmitter::emit_unwrapped(env, underlying, user, amount, balance);
        Ok(balance)
    }

    pub fn get_wrapper(env: &Env, underlying: &Address) -> Result<SyWrapper, Error> {
        WrapperStorage::get_wrapper(env, underlying).ok_or(Error::InvalidAsset)
    }

    pub fn is_registered(env: &Env, underlying: &Address) -> bool {
        WrapperStorage::get_wrapper(env, underlying).is_some()
    }

    pub fn sy_balance(env: &Env, underlying: &Address, account: &Address) -> i128 {
        UnitLedger::balance_of(env, &Self::sy_unit(underlying), account)
    }

    /// Move SY between two accounts, e.g. from a user into market custody.
    pub fn move_sy(
        env: &Env,
        underlying: &Address,
        from: &Address,
        to: &Address,
        amount: i128,
    ) -> Result<(), Error> {
        UnitLedger::transfer(
            env,
            &Self::sy_unit(underlying),
            from,
            to,
            amount,
            Error::InsufficientBalance,
        )
    }

    pub fn sy_unit(underlying: &Address) -> UnitId {
        UnitId::new(underlying, TokenKind::Sy)
    }
}
