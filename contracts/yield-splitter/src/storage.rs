use soroban_sdk::{contracttype, Address, Env, IntoVal, Val, Vec};

use crate::config::{PERSISTENT_BUMP_AMOUNT, PERSISTENT_LIFETIME_THRESHOLD};

use crate::types::{Market, ProtocolConfig, SyWrapper, TokenPair, UnitId, UserPosition};

/// Storage keys for every record the contract owns.
///
/// Instance storage holds the small deployment-wide records; persistent
/// storage holds per-market, per-user and per-unit records.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// ProtocolConfig (instance)
    Config,
    /// Reentrancy lock flag (instance)
    Lock,
    /// Vec<Address> of every market key in creation order (instance)
    MarketList,
    /// Vec<Address> of every registered underlying (instance)
    WrapperList,
    /// SyWrapper keyed by underlying
    Wrapper(Address),
    /// Market keyed by SY unit
    Market(Address),
    /// UserPosition keyed by (SY unit, user)
    Position(Address, Address),
    /// TokenPair keyed by SY unit
    Pair(Address),
    /// Issuer balance keyed by (unit, account)
    Balance(UnitId, Address),
    /// Issuer total supply keyed by unit
    Supply(UnitId),
}

/// Write a persistent record and push its TTL out so long-lived markets
/// and positions are not archived between interactions.
fn persist<V>(env: &Env, key: &DataKey, value: &V)
where
    V: IntoVal<Env, Val>,
{
    let storage = env.storage().persistent();
    storage.set(key, value);
    storage.extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub struct ConfigStorage;

impl ConfigStorage {
    pub fn has_config(env: &Env) -> bool {
        env.storage().instance().has(&DataKey::Config)
    }

    pub fn get_config(env: &Env) -> Option<ProtocolConfig> {
        env.storage().instance().get(&DataKey::Config)
    }

    pub fn set_config(env: &Env, config: &ProtocolConfig) {
        env.storage().instance().set(&DataKey::Config, config);
        Self::bump_instance(env);
    }

    /// Extend the contract instance (config, lists, lock) alongside persistent records.
    pub fn bump_instance(env: &Env) {
        env.storage()
            .instance()
            .extend_ttl(PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
    }
}

/// Market records and the ordered market list.
pub struct MarketStorage;

impl MarketStorage {
    pub fn has_market(env: &Env, sy_token: &Address) -> bool {
        env.storage()
            .persistent()
            .has(&DataKey::Market(sy_token.clone()))
    }

    pub fn get_market(env: &Env, sy_token: &Address) -> Option<Market> {
        env.storage()
            .persistent()
            .get(&DataKey::Market(sy_token.clone()))
    }

    pub fn set_market(env: &Env, market: &Market) {
        persist(env, &DataKey::Market(market.sy_token.clone()), market);
    }

    pub fn market_list(env: &Env) -> Vec<Address> {
        env.storage()
            .instance()
            .get(&DataKey::MarketList)
            .unwrap_or(Vec::new(env))
    }

    pub fn push_market(env: &Env, sy_token: &Address) {
        let mut list = Self::market_list(env);
        list.push_back(sy_token.clone());
        env.storage().instance().set(&DataKey::MarketList, &list);
    }
}

pub struct PositionStorage;

impl PositionStorage {
    pub fn get_position(env: &Env, sy_token: &Address, user: &Address) -> Option<UserPosition> {
        env.storage()
            .persistent()
            .get(&DataKey::Position(sy_token.clone(), user.clone()))
    }

    /// Position for a user, or an empty one if they never interacted.
    pub fn get_or_default(env: &Env, sy_token: &Address, user: &Address) -> UserPosition {
        Self::get_position(env, sy_token, user).unwrap_or(UserPosition::empty())
    }

    pub fn set_position(env: &Env, sy_token: &Address, user: &Address, position: &UserPosition) {
        persist(env, &DataKey::Position(sy_token.clone(), user.clone()), position);
    }
}

pub struct WrapperStorage;

impl WrapperStorage {
    pub fn get_wrapper(env: &Env, underlying: &Address) -> Option<SyWrapper> {
        env.storage()
            .persistent()
            .get(&DataKey::Wrapper(underlying.clone()))
    }

    pub fn set_wrapper(env: &Env, wrapper: &SyWrapper) {
        persist(env, &DataKey::Wrapper(wrapper.underlying.clone()), wrapper);
    }

    pub fn wrapper_list(env: &Env) -> Vec<Address> {
        env.storage()
            .instance()
            .get(&DataKey::WrapperList)
            .unwrap_or(Vec::new(env))
    }

    pub fn push_wrapper(env: &Env, underlying: &Address) {
        let mut list = Self::wrapper_list(env);
        list.push_back(underlying.clone());
        env.storage().instance().set(&DataKey::WrapperList, &list);
    }
}

/// Issuer ledger: pair records, balances and supplies.
pub struct IssuerStorage;

impl IssuerStorage {
    pub fn get_pair(env: &Env, sy_token: &Address) -> Option<TokenPair> {
        env.storage()
            .persistent()
            .get(&DataKey::Pair(sy_token.clone()))
    }

    pub fn set_pair(env: &Env, sy_token: &Address, pair: &TokenPair) {
        persist(env, &DataKey::Pair(sy_token.clone()), pair);
    }

    pub fn get_balance(env: &Env, unit: &UnitId, account: &Address) -> i128 {
        env.storage()
            .persistent()
            .get(&DataKey::Balance(unit.clone(), account.clone()))
            .unwrap_or(0)
    }

    pub fn set_balance(env: &Env, unit: &UnitId, account: &Address, amount: i128) {
        persist(env, &DataKey::Balance(unit.clone(), account.clone()), &amount);
    }

    pub fn get_supply(env: &Env, unit: &UnitId) -> i128 {
        env.storage()
            .persistent()
            .get(&DataKey::Supply(unit.clone()))
            .unwrap_or(0)
    }

    pub fn set_supply(env: &Env, unit: &UnitId, amount: i128) {
        persist(env, &DataKey::Supply(unit.clone()), &amount);
    }
}
