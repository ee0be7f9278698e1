use soroban_sdk::String;

use crate::config::{
    MAX_ACCRUAL_RATE_BPS, MAX_BATCH_SIZE, MAX_MATURITY_DURATION, MAX_TOKEN_NAME_LENGTH,
    MIN_MATURITY_DURATION,
};
use crate::errors::Error;

/// Stateless input checks, run before any storage is read.
pub struct InputValidator;

impl InputValidator {
    /// Amount must be strictly positive
    pub fn validate_amount(amount: i128) -> Result<(), Error> {
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }
        Ok(())
    }

    /// Maturity duration in seconds must lie in `[1 day, 365 days]`
    pub fn validate_duration(duration: u64) -> Result<(), Error> {
        if !(MIN_MATURITY_DURATION..=MAX_MATURITY_DURATION).contains(&duration) {
            return Err(Error::InvalidDuration);
        }
        Ok(())
    }

    pub fn validate_investment_bounds(min: i128, max: i128) -> Result<(), Error> {
        if min <= 0 {
            return Err(Error::InvalidMinInvestment);
        }
        if max <= min {
            return Err(Error::InvalidMaxInvestment);
        }
        Ok(())
    }

    pub fn validate_token_name(name: &String) -> Result<(), Error> {
        let length = name.len();
        if length == 0 || length > MAX_TOKEN_NAME_LENGTH {
            return Err(Error::InvalidTokenName);
        }
        Ok(())
    }

    pub fn validate_accrual_rate(rate_bps: u32) -> Result<(), Error> {
        if rate_bps > MAX_ACCRUAL_RATE_BPS {
            return Err(Error::InvalidAccrualRate);
        }
        Ok(())
    }

    /// Parallel batch arrays must match in length and be non-empty and bounded
    pub fn validate_batch(markets_len: u32, amounts_len: u32) -> Result<(), Error> {
        if markets_len != amounts_len {
            return Err(Error::ArrayLengthMismatch);
        }
        if markets_len == 0 || markets_len > MAX_BATCH_SIZE {
            return Err(Error::InvalidInput);
        }
        Ok(())
    }
}
