use soroban_sdk::{Address, Env, String};

use crate::errors::Error;
use crate::storage::IssuerStorage;
use crate::types::{TokenKind, TokenPair, UnitId};

/// Unit ledger shared by the SY wrapper and the token pair issuer.
///
/// Holds balances and supplies for every `UnitId`. It performs no
/// authorization itself; callers are the wrapper (for `Sy`) and
/// `TokenPairIssuer` (for `Pt`/`Yt`), which check their own authority first.
pub struct UnitLedger;

impl UnitLedger {
    pub fn balance_of(env: &Env, unit: &UnitId, account: &Address) -> i128 {
        IssuerStorage::get_balance(env, unit, account)
    }

    pub fn total_supply(env: &Env, unit: &UnitId) -> i128 {
        IssuerStorage::get_supply(env, unit)
    }

    pub fn credit(env: &Env, unit: &UnitId, to: &Address, amount: i128) -> Result<i128, Error> {
        let balance = IssuerStorage::get_balance(env, unit, to)
            .checked_add(amount)
            .ok_or(Error::ArithmeticOverflow)?;
        let supply = IssuerStorage::get_supply(env, unit)
            .checked_add(amount)
            .ok_or(Error::ArithmeticOverflow)?;
        IssuerStorage::set_balance(env, unit, to, balance);
        IssuerStorage::set_supply(env, unit, supply);
        Ok(balance)
    }

    /// Removes `amount` from `from`, failing with `shortfall` if the balance is too low.
    pub fn debit(
        env: &Env,
        unit: &UnitId,
        from: &Address,
        amount: i128,
        shortfall: Error,
    ) -> Result<i128, Error> {
        let current = IssuerStorage::get_balance(env, unit, from);
        if current < amount {
            return Err(shortfall);
        }
        let supply = IssuerStorage::get_supply(env, unit)
            .checked_sub(amount)
            .ok_or(Error::ArithmeticOverflow)?;
        IssuerStorage::set_balance(env, unit, from, current - amount);
        IssuerStorage::set_supply(env, unit, supply);
        Ok(current - amount)
    }

    /// Moves balance between accounts without changing supply.
    pub fn transfer(
        env: &Env,
        unit: &UnitId,
        from: &Address,
        to: &Address,
        amount: i128,
        shortfall: Error,
    ) -> Result<(), Error> {
        let from_balance = IssuerStorage::get_balance(env, unit, from);
        if from_balance < amount {
            return Err(shortfall);
        }
        IssuerStorage::set_balance(env, unit, from, from_balance - amount);
        let to_balance = IssuerStorage::get_balance(env, unit, to)
            .checked_add(amount)
            .ok_or(Error::ArithmeticOverflow)?;
        IssuerStorage::set_balance(env, unit, to, to_balance);
        Ok(())
    }
}

/// Mints and burns the PT/YT pair of each market.
///
/// A pair is created once per market and records the address allowed to mint
/// and burn it. Every mint and burn compares the caller against that
/// authority before touching the ledger.
pub struct TokenPairIssuer;

impl TokenPairIssuer {
    /// Create the PT/YT pair for `sy_token`, owned by `authority`.
    pub fn create_pair(
        env: &Env,
        authority: &Address,
        sy_token: &Address,
        pt_name: &String,
        yt_name: &String,
    ) -> TokenPair {
        let pair = TokenPair {
            pt: UnitId::new(sy_token, TokenKind::Pt),
            yt: UnitId::new(sy_token, TokenKind::Yt),
            authority: authority.clone(),
            pt_name: pt_name.clone(),
            yt_name: yt_name.clone(),
        };
        IssuerStorage::set_pair(env, sy_token, &pair);
        pair
    }

    pub fn mint(
        env: &Env,
        authority: &Address,
        sy_token: &Address,
        kind: TokenKind,
        to: &Address,
        amount: i128,
    ) -> Result<i128, Error> {
        let unit = Self::authorized_unit(env, authority, sy_token, kind)?;
        UnitLedger::credit(env, &unit, to, amount)
    }

    pub fn burn(
        env: &Env,
        authority: &Address,
        sy_token: &Address,
        kind: TokenKind,
        from: &Address,
        amount: i128,
    ) -> Result<i128, Error> {
        let unit = Self::authorized_unit(env, authority, sy_token, kind)?;
        let shortfall = match kind {
            TokenKind::Pt => Error::InsufficientPTBalance,
            TokenKind::Yt => Error::InsufficientYTBalance,
            TokenKind::Sy => Error::InsufficientBalance,
        };
        UnitLedger::debit(env, &unit, from, amount, shortfall)
    }

    pub fn balance_of(env: &Env, sy_token: &Address, kind: TokenKind, account: &Address) -> i128 {
        UnitLedger::balance_of(env, &UnitId::new(sy_token, kind), account)
    }

    pub fn total_supply(env: &Env, sy_token: &Address, kind: TokenKind) -> i128 {
        UnitLedger::total_supply(env, &UnitId::new(sy_token, kind))
    }

    fn authorized_unit(
        env: &Env,
        authority: &Address,
        sy_token: &Address,
        kind: TokenKind,
    ) -> Result<UnitId, Error> {
        let pair = IssuerStorage::get_pair(env, sy_token).ok_or(Error::MarketNotFound)?;
        if pair.authority != *authority {
            return Err(Error::IssuerUnauthorized);
        }
        match kind {
            TokenKind::Pt => Ok(pair.pt),
            TokenKind::Yt => Ok(pair.yt),
            // SY is minted by the wrapper, never by a market's pair authority
            TokenKind::Sy => Err(Error::IssuerUnauthorized),
        }
    }
}
