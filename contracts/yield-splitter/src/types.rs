use soroban_sdk::{contracttype, Address, String};

// ===== TOKEN TYPES =====

/// The closed set of units the contract keeps balances for.
///
/// `Sy` is the wrapped custody unit; `Pt` and `Yt` are the two derivative
/// units minted per market. Matching on this enum is exhaustive, so adding a
/// kind forces every issuer and statistics path to handle it.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TokenKind {
    /// Principal claim, redeemable 1:1 for SY at maturity
    Pt,
    /// Yield claim, entitled to distributed yield until maturity
    Yt,
    /// Standardized yield-bearing custody unit
    Sy,
}

/// Identity of a single unit: which SY unit it belongs to and its kind.
///
/// SY units are identified by the address of the underlying asset they wrap,
/// so `UnitId { sy_token, kind: Sy }` is the SY unit itself and the PT/YT ids
/// share the same `sy_token` as the market that minted them.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnitId {
    pub sy_token: Address,
    pub kind: TokenKind,
}

impl UnitId {
    pub fn new(sy_token: &Address, kind: TokenKind) -> Self {
        Self {
            sy_token: sy_token.clone(),
            kind,
        }
    }
}

/// Record of a PT/YT pair created by the issuer.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenPair {
    pub pt: UnitId,
    pub yt: UnitId,
    /// Only address allowed to mint or burn either unit of the pair
    pub authority: Address,
    pub pt_name: String,
    pub yt_name: String,
}

// ===== WRAPPER TYPES =====

/// An SY wrapper around one underlying asset.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SyWrapper {
    /// Underlying token contract; also the identity of the SY unit
    pub underlying: Address,
    pub name: String,
    /// Informational annual accrual rate in basis points
    pub accrual_rate_bps: u32,
    /// SY currently in existence (wrapped minus unwrapped)
    pub total_supply: i128,
    pub created_at: u64,
}

// ===== MARKET TYPES =====

/// A yield tokenization market, one per SY unit.
///
/// Invariant: `pt_supply == yt_supply == total_sy_deposited - total_redeemed`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Market {
    /// SY unit this market covers (unique key)
    pub sy_token: Address,
    pub pt_token: UnitId,
    pub yt_token: UnitId,
    pub pt_name: String,
    pub yt_name: String,
    /// Absolute ledger timestamp separating the live and expired phases
    pub maturity: u64,
    pub created_at: u64,
    pub min_investment: i128,
    pub max_investment: i128,
    /// Administrative flag, independent of maturity
    pub active: bool,
    /// SY ever split into PT+YT through this market
    pub total_sy_deposited: i128,
    /// SY returned through merge and redeem
    pub total_redeemed: i128,
    pub total_yield_distributed: i128,
    pub total_yield_claimed: i128,
    /// Yield per unit of YT, scaled by `YIELD_INDEX_SCALE`
    pub yield_index: i128,
}

impl Market {
    pub fn is_expired(&self, now: u64) -> bool {
        now >= self.maturity
    }

    pub fn is_active(&self, now: u64) -> bool {
        self.active && !self.is_expired(now)
    }

    /// SY still locked behind outstanding PT/YT.
    pub fn locked_sy(&self) -> i128 {
        self.total_sy_deposited - self.total_redeemed
    }
}

/// A user's position in a single market.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserPosition {
    pub pt_amount: i128,
    pub yt_amount: i128,
    /// Market yield index at the user's last settlement
    pub last_yield_index: i128,
    /// Yield settled under an earlier YT balance and not yet paid out
    pub accrued_yield: i128,
    pub last_interaction: u64,
}

impl UserPosition {
    pub fn empty() -> Self {
        Self {
            pt_amount: 0,
            yt_amount: 0,
            last_yield_index: 0,
            accrued_yield: 0,
            last_interaction: 0,
        }
    }
}

// ===== PROTOCOL TYPES =====

/// Deployment-wide configuration.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProtocolConfig {
    /// Single identity allowed to call administrative entrypoints
    pub controller: Address,
    pub initialized_at: u64,
}

/// Aggregated protocol view for dashboards.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProtocolStats {
    pub total_markets: u32,
    /// Markets that are unpaused and before maturity
    pub active_markets: u32,
    /// SY locked behind outstanding PT/YT across all markets
    pub total_value_locked: i128,
    pub total_yield_distributed: i128,
    /// SY in existence across every wrapper
    pub total_sy_supply: i128,
}

/// Outcome of burning a PT+YT pair back into SY (merge or redeem).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BurnResult {
    /// SY returned to the caller, equal to the PT (and YT) burned
    pub sy_returned: i128,
    /// Settled yield paid out in the underlying asset
    pub yield_paid: i128,
}
