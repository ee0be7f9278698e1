use soroban_sdk::{Address, Env};

use crate::errors::Error;
use crate::events::EventEmitter;
use crate::issuer::UnitLedger;
use crate::markets::MarketRegistry;
use crate::storage::PositionStorage;
use crate::types::{TokenKind, UnitId, UserPosition};
use crate::validation::InputValidator;
use crate::wrapper::AssetWrapper;
use crate::yield_ledger::YieldLedger;

/// Position queries and unit transfers between holders.
pub struct PositionManager;

impl PositionManager {
    pub fn get_user_position(env: &Env, sy_token: &Address, user: &Address) -> Result<UserPosition, Error> {
        MarketRegistry::get_market(env, sy_token)?;
        Ok(PositionStorage::get_or_default(env, sy_token, user))
    }

    /// Move SY, PT or YT from one holder to another, e.g. into an AMM pool.
    ///
    /// A YT transfer changes both holders' YT balances, so both are settled
    /// first and the sender's settled yield is paid out.
    pub fn transfer(
        env: &Env,
        from: &Address,
        to: &Address,
        sy_token: &Address,
        kind: TokenKind,
        amount: i128,
    ) -> Result<(), Error> {
        from.require_auth();
        InputValidator::validate_amount(amount)?;
        if from == to {
            return Err(Error::InvalidInput);
        }

        match kind {
            TokenKind::Sy => {
                AssetWrapper::get_wrapper(env, sy_token)?;
                AssetWrapper::move_sy(env, sy_token, from, to, amount)?;
            }
            TokenKind::Pt => {
                MarketRegistry::get_market(env, sy_token)?;
                UnitLedger::transfer(
                    env,
                    &UnitId::new(sy_token, kind),
                    from,
                    to,
                    amount,
                    Error::InsufficientPTBalance,
                )?;
                let now = env.ledger().timestamp();
                let mut sender = PositionStorage::get_or_default(env, sy_token, from);
                let mut receiver = PositionStorage::get_or_default(env, sy_token, to);
                sender.pt_amount -= amount;
                sender.last_interaction = now;
                receiver.pt_amount += amount;
                receiver.last_interaction = now;
                PositionStorage::set_position(env, sy_token, from, &sender);
                PositionStorage::set_position(env, sy_token, to, &receiver);
            }
            TokenKind::Yt => {
                let mut market = MarketRegistry::get_market(env, sy_token)?;
                let mut sender = PositionStorage::get_or_default(env, sy_token, from);
                let mut receiver = PositionStorage::get_or_default(env, sy_token, to);

                YieldLedger::settle(&market, &mut sender)?;
                YieldLedger::settle(&market, &mut receiver)?;
                YieldLedger::pay_out(env, &mut market, from, &mut sender)?;

                UnitLedger::transfer(
                    env,
                    &UnitId::new(sy_token, kind),
                    from,
                    to,
                    amount,
                    Error::InsufficientYTBalance,
                )?;

                let now = env.ledger().timestamp();
                sender.yt_amount -= amount;
                sender.last_interaction = now;
                receiver.yt_amount += amount;
                receiver.last_interaction = now;
                PositionStorage::set_position(env, sy_token, from, &sender);
                PositionStorage::set_position(env, sy_token, to, &receiver);
                MarketRegistry::save(env, &market);
            }
        }

        EventEmitter::emit_transfer(env, sy_token, from, to, kind, amount);
        Ok(())
    }
}
