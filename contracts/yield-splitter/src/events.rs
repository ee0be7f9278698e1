//! Contract event system.
//!
//! Every state change publishes one typed event. Topics are a short symbol
//! naming the operation, followed by the market or asset key where one
//! applies, so indexers can filter per market without decoding payloads.

use soroban_sdk::{contracttype, symbol_short, Address, Env, IntoVal, String, Symbol, Val};

use crate::types::TokenKind;

// ===== EVENT TYPES =====

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub controller: Address,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ControlTransferredEvent {
    pub previous: Address,
    pub controller: Address,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WrapperRegisteredEvent {
    pub underlying: Address,
    pub name: String,
    pub accrual_rate_bps: u32,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccrualRateUpdatedEvent {
    pub underlying: Address,
    pub old_rate_bps: u32,
    pub new_rate_bps: u32,
    pub timestamp: u64,
}

/// Emitted for both wrap and unwrap; the topic tells them apart.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WrapEvent {
    pub user: Address,
    pub amount: i128,
    pub sy_balance: i128,
    pub timestamp: u64,
}

/// Event emitted when a market and its PT/YT pair are created.
///
/// Carries everything an indexer needs to list the market without a
/// follow-up read: both unit names, the maturity and investment bounds.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MarketCreatedEvent {
    pub sy_token: Address,
    pub pt_name: String,
    pub yt_name: String,
    pub maturity: u64,
    pub min_investment: i128,
    pub max_investment: i128,
    pub timestamp: u64,
}

/// Emitted for pause and resume; `active` is the new flag value.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MarketStatusEvent {
    pub sy_token: Address,
    pub active: bool,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyEvent {
    pub controller: Address,
    pub markets_affected: u32,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SplitEvent {
    pub user: Address,
    pub sy_amount: i128,
    pub pt_minted: i128,
    pub yt_minted: i128,
    pub timestamp: u64,
}

/// Shared by merge and redeem: PT+YT burned, SY returned, yield paid out.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BurnEvent {
    pub user: Address,
    pub amount: i128,
    pub yield_paid: i128,
    pub timestamp: u64,
}

/// Event emitted on every yield deposit.
///
/// `new_index` equals the previous index when the market had no YT
/// outstanding; the deposit is then recorded but unclaimable.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct YieldDistributedEvent {
    pub source: Address,
    pub amount: i128,
    pub yt_supply: i128,
    pub new_index: i128,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct YieldClaimedEvent {
    pub user: Address,
    pub amount: i128,
    pub index: i128,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransferEvent {
    pub from: Address,
    pub to: Address,
    pub kind: TokenKind,
    pub amount: i128,
    pub timestamp: u64,
}

// ===== EVENT EMISSION =====

pub struct EventEmitter;

impl EventEmitter {
    pub fn emit_initialized(env: &Env, controller: &Address) {
        let event = InitializedEvent {
            controller: controller.clone(),
            timestamp: env.ledger().timestamp(),
        };
        Self::publish(env, symbol_short!("init"), event);
    }

    pub fn emit_control_transferred(env: &Env, previous: &Address, controller: &Address) {
        let event = ControlTransferredEvent {
            previous: previous.clone(),
            controller: controller.clone(),
            timestamp: env.ledger().timestamp(),
        };
        Self::publish(env, symbol_short!("ctrl_xfer"), event);
    }

    pub fn emit_wrapper_registered(env: &Env, underlying: &Address, name: &String, rate_bps: u32) {
        let event = WrapperRegisteredEvent {
            underlying: underlying.clone(),
            name: name.clone(),
            accrual_rate_bps: rate_bps,
            timestamp: env.ledger().timestamp(),
        };
        Self::publish_for(env, symbol_short!("wrap_reg"), underlying, event);
    }

    pub fn emit_accrual_rate_updated(env: &Env, underlying: &Address, old_rate: u32, new_rate: u32) {
        let event = AccrualRateUpdatedEvent {
            underlying: underlying.clone(),
            old_rate_bps: old_rate,
            new_rate_bps: new_rate,
            timestamp: env.ledger().timestamp(),
        };
        Self::publish_for(env, symbol_short!("rate_upd"), underlying, event);
    }

    pub fn emit_wrapped(env: &Env, underlying: &Address, user: &Address, amount: i128, balance: i128) {
        let event = WrapEvent {
            user: user.clone(),
            amount,
            sy_balance: balance,
            timestamp: env.ledger().timestamp(),
        };
        Self::publish_for(env, symbol_short!("wrap"), underlying, event);
    }

    pub fn emit_unwrapped(env: &Env, underlying: &Address, user: &Address, amount: i128, balance: i128) {
        let event = WrapEvent {
            user: user.clone(),
            amount,
            sy_balance: balance,
            timestamp: env.ledger().timestamp(),
        };
        Self::publish_for(env, symbol_short!("unwrap"), underlying, event);
    }

    pub fn emit_market_created(
        env: &Env,
        sy_token: &Address,
        pt_name: &String,
        yt_name: &String,
        maturity: u64,
        min_investment: i128,
        max_investment: i128,
    ) {
        let event = MarketCreatedEvent {
            sy_token: sy_token.clone(),
            pt_name: pt_name.clone(),
            yt_name: yt_name.clone(),
            maturity,
            min_investment,
            max_investment,
            timestamp: env.ledger().timestamp(),
        };
        Self::publish_for(env, symbol_short!("mkt_new"), sy_token, event);
    }

    pub fn emit_market_status(env: &Env, sy_token: &Address, active: bool) {
        let event = MarketStatusEvent {
            sy_token: sy_token.clone(),
            active,
            timestamp: env.ledger().timestamp(),
        };
        let topic = if active {
            symbol_short!("mkt_resum")
        } else {
            symbol_short!("mkt_pause")
        };
        Self::publish_for(env, topic, sy_token, event);
    }

    pub fn emit_emergency(env: &Env, controller: &Address, paused: bool, markets_affected: u32) {
        let event = EmergencyEvent {
            controller: controller.clone(),
            markets_affected,
            timestamp: env.ledger().timestamp(),
        };
        let topic = if paused {
            symbol_short!("emrg_paus")
        } else {
            symbol_short!("emrg_resm")
        };
        Self::publish(env, topic, event);
    }

    pub fn emit_split(env: &Env, sy_token: &Address, user: &Address, sy_amount: i128, pt: i128, yt: i128) {
        let event = SplitEvent {
            user: user.clone(),
            sy_amount,
            pt_minted: pt,
            yt_minted: yt,
            timestamp: env.ledger().timestamp(),
        };
        Self::publish_for(env, symbol_short!("split"), sy_token, event);
    }

    pub fn emit_merged(env: &Env, sy_token: &Address, user: &Address, amount: i128, yield_paid: i128) {
        let event = BurnEvent {
            user: user.clone(),
            amount,
            yield_paid,
            timestamp: env.ledger().timestamp(),
        };
        Self::publish_for(env, symbol_short!("merge"), sy_token, event);
    }

    pub fn emit_redeemed(env: &Env, sy_token: &Address, user: &Address, amount: i128, yield_paid: i128) {
        let event = BurnEvent {
            user: user.clone(),
            amount,
            yield_paid,
            timestamp: env.ledger().timestamp(),
        };
        Self::publish_for(env, symbol_short!("redeem"), sy_token, event);
    }

    pub fn emit_yield_distributed(
        env: &Env,
        sy_token: &Address,
        source: &Address,
        amount: i128,
        yt_supply: i128,
        new_index: i128,
    ) {
        let event = YieldDistributedEvent {
            source: source.clone(),
            amount,
            yt_supply,
            new_index,
            timestamp: env.ledger().timestamp(),
        };
        Self::publish_for(env, symbol_short!("yld_dist"), sy_token, event);
    }

    pub fn emit_yield_claimed(env: &Env, sy_token: &Address, user: &Address, amount: i128, index: i128) {
        let event = YieldClaimedEvent {
            user: user.clone(),
            amount,
            index,
            timestamp: env.ledger().timestamp(),
        };
        Self::publish_for(env, symbol_short!("yld_claim"), sy_token, event);
    }

    pub fn emit_transfer(
        env: &Env,
        sy_token: &Address,
        from: &Address,
        to: &Address,
        kind: TokenKind,
        amount: i128,
    ) {
        let event = TransferEvent {
            from: from.clone(),
            to: to.clone(),
            kind,
            amount,
            timestamp: env.ledger().timestamp(),
        };
        Self::publish_for(env, symbol_short!("xfer"), sy_token, event);
    }

    fn publish<T>(env: &Env, topic: Symbol, event: T)
    where
        T: IntoVal<Env, Val>,
    {
        env.events().publish((topic,), event);
    }

    fn publish_for<T>(env: &Env, topic: Symbol, key: &Address, event: T)
    where
        T: IntoVal<Env, Val>,
    {
        env.events().publish((topic, key.clone()), event);
    }
}
