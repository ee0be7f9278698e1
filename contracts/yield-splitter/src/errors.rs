use soroban_sdk::contracterror;

/// Error codes for the yield splitter contract.
///
/// Every state-changing entrypoint returns `Result<T, Error>`, as do the views
/// that look up a market or wrapper. A returned error aborts the whole
/// invocation and the host discards every storage write, token transfer and
/// event produced by that invocation, so callers never observe a partially
/// applied operation.
///
/// # Error Categories
///
/// **Validation Errors (100-199):**
/// - Zero or out-of-range amounts, malformed durations, mismatched arrays
/// - Cheap, checked first, never worth retrying unchanged
///
/// **State Errors (200-299):**
/// - Market lifecycle preconditions (inactive, expired, not yet expired)
/// - Callers should re-query market state before retrying
///
/// **Authorization Errors (300-399):**
/// - Non-controller calling administrative entrypoints
/// - Issuer invoked by something other than the pair's authority
///
/// **Balance Errors (400-499):**
/// - Insufficient balances or allowances, surfaced verbatim
///
/// **System Errors (500-599):**
/// - Initialization, reentrancy and arithmetic failures
///
/// # Example Usage
///
/// ```rust
/// # use yield_splitter::errors::Error;
/// let error = Error::MarketExpired;
/// assert_eq!(error.code(), "MARKET_EXPIRED");
/// assert_eq!(error as u32, 202);
/// ```
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // ===== VALIDATION ERRORS =====
    /// Amount is zero or negative
    InvalidAmount = 100,
    /// Asset has no registered SY wrapper
    InvalidAsset = 101,
    /// Maturity duration outside the allowed window
    InvalidDuration = 102,
    /// Minimum investment must be positive
    InvalidMinInvestment = 103,
    /// Maximum investment must exceed the minimum
    InvalidMaxInvestment = 104,
    /// Yield deposit amount is zero or negative
    InvalidYieldAmount = 105,
    /// Batch arrays differ in length
    ArrayLengthMismatch = 106,
    /// PT and YT amounts differ on merge
    AmountMismatch = 107,
    /// Minted PT would fall below the caller's minimum
    InsufficientPTAmount = 108,
    /// Minted YT would fall below the caller's minimum
    InsufficientYTAmount = 109,
    /// PT and YT amounts differ on redeem
    InsufficientSYAmount = 110,
    /// Split amount below the market's minimum investment
    BelowMinInvestment = 111,
    /// Split amount above the market's maximum investment
    AboveMaxInvestment = 112,
    /// Token name empty or too long
    InvalidTokenName = 113,
    /// Accrual rate above the configured ceiling
    InvalidAccrualRate = 114,
    /// Generic malformed input (empty or oversized batch)
    InvalidInput = 115,

    // ===== STATE ERRORS =====
    /// Market does not exist
    MarketNotFound = 200,
    /// Market is paused or past maturity
    MarketInactive = 201,
    /// Market has reached maturity
    MarketExpired = 202,
    /// Market has not reached maturity yet
    MarketNotExpired = 203,
    /// A market already exists for this SY unit
    MarketExists = 204,
    /// An SY wrapper already exists for this underlying
    WrapperExists = 205,
    /// Caller holds no YT in this market
    NoYTTokens = 206,
    /// Caller has no yield to claim
    NoYieldToClaim = 207,

    // ===== AUTHORIZATION ERRORS =====
    /// Caller is not the protocol controller
    Unauthorized = 300,
    /// Issuer mint/burn by an address other than the pair authority
    IssuerUnauthorized = 301,

    // ===== BALANCE ERRORS =====
    /// Balance too low for the requested amount
    InsufficientBalance = 400,
    /// Contract has not been approved to pull the amount
    InsufficientAllowance = 401,
    /// Caller holds less PT than requested
    InsufficientPTBalance = 402,
    /// Caller holds less YT than requested
    InsufficientYTBalance = 403,

    // ===== SYSTEM ERRORS =====
    /// Contract has not been initialized
    NotInitialized = 500,
    /// Contract is already initialized
    AlreadyInitialized = 501,
    /// An entrypoint was re-entered before completing
    ReentrantCall = 502,
    /// Checked arithmetic overflowed
    ArithmeticOverflow = 503,
}

impl Error {
    /// Human readable description, suitable for UI messages.
    pub fn description(&self) -> &'static str {
        match self {
            Error::InvalidAmount => "Amount must be greater than zero",
            Error::InvalidAsset => "Asset is not a registered SY unit",
            Error::InvalidDuration => "Maturity duration must be between 1 and 365 days",
            Error::InvalidMinInvestment => "Minimum investment must be greater than zero",
            Error::InvalidMaxInvestment => "Maximum investment must exceed the minimum",
            Error::InvalidYieldAmount => "Yield amount must be greater than zero",
            Error::ArrayLengthMismatch => "Market and amount lists differ in length",
            Error::AmountMismatch => "PT and YT amounts must be equal to merge",
            Error::InsufficientPTAmount => "PT output below requested minimum",
            Error::InsufficientYTAmount => "YT output below requested minimum",
            Error::InsufficientSYAmount => "PT and YT amounts must be equal to redeem",
            Error::BelowMinInvestment => "Amount below the market minimum investment",
            Error::AboveMaxInvestment => "Amount above the market maximum investment",
            Error::InvalidTokenName => "Token name is empty or too long",
            Error::InvalidAccrualRate => "Accrual rate exceeds the allowed maximum",
            Error::InvalidInput => "Invalid input",
            Error::MarketNotFound => "Market not found",
            Error::MarketInactive => "Market is not active",
            Error::MarketExpired => "Market expired, use redeem instead",
            Error::MarketNotExpired => "Market has not reached maturity",
            Error::MarketExists => "Market already exists for this asset",
            Error::WrapperExists => "SY wrapper already exists for this asset",
            Error::NoYTTokens => "No YT held in this market",
            Error::NoYieldToClaim => "No yield to claim",
            Error::Unauthorized => "Caller is not the protocol controller",
            Error::IssuerUnauthorized => "Caller may not mint or burn this token pair",
            Error::InsufficientBalance => "Insufficient balance",
            Error::InsufficientAllowance => "Insufficient allowance",
            Error::InsufficientPTBalance => "Insufficient PT balance",
            Error::InsufficientYTBalance => "Insufficient YT balance",
            Error::NotInitialized => "Contract is not initialized",
            Error::AlreadyInitialized => "Contract is already initialized",
            Error::ReentrantCall => "Reentrant call rejected",
            Error::ArithmeticOverflow => "Arithmetic overflow",
        }
    }

    /// Stable machine readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidAmount => "INVALID_AMOUNT",
            Error::InvalidAsset => "INVALID_ASSET",
            Error::InvalidDuration => "INVALID_DURATION",
            Error::InvalidMinInvestment => "INVALID_MIN_INVESTMENT",
            Error::InvalidMaxInvestment => "INVALID_MAX_INVESTMENT",
            Error::InvalidYieldAmount => "INVALID_YIELD_AMOUNT",
            Error::ArrayLengthMismatch => "ARRAY_LENGTH_MISMATCH",
            Error::AmountMismatch => "AMOUNT_MISMATCH",
            Error::InsufficientPTAmount => "INSUFFICIENT_PT_AMOUNT",
            Error::InsufficientYTAmount => "INSUFFICIENT_YT_AMOUNT",
            Error::InsufficientSYAmount => "INSUFFICIENT_SY_AMOUNT",
            Error::BelowMinInvestment => "BELOW_MIN_INVESTMENT",
            Error::AboveMaxInvestment => "ABOVE_MAX_INVESTMENT",
            Error::InvalidTokenName => "INVALID_TOKEN_NAME",
            Error::InvalidAccrualRate => "INVALID_ACCRUAL_RATE",
            Error::InvalidInput => "INVALID_INPUT",
            Error::MarketNotFound => "MARKET_NOT_FOUND",
            Error::MarketInactive => "MARKET_INACTIVE",
            Error::MarketExpired => "MARKET_EXPIRED",
            Error::MarketNotExpired => "MARKET_NOT_EXPIRED",
            Error::MarketExists => "MARKET_EXISTS",
            Error::WrapperExists => "WRAPPER_EXISTS",
            Error::NoYTTokens => "NO_YT_TOKENS",
            Error::NoYieldToClaim => "NO_YIELD_TO_CLAIM",
            Error::Unauthorized => "UNAUTHORIZED",
            Error::IssuerUnauthorized => "ISSUER_UNAUTHORIZED",
            Error::InsufficientBalance => "INSUFFICIENT_BALANCE",
            Error::InsufficientAllowance => "INSUFFICIENT_ALLOWANCE",
            Error::InsufficientPTBalance => "INSUFFICIENT_PT_BALANCE",
            Error::InsufficientYTBalance => "INSUFFICIENT_YT_BALANCE",
            Error::NotInitialized => "NOT_INITIALIZED",
            Error::AlreadyInitialized => "ALREADY_INITIALIZED",
            Error::ReentrantCall => "REENTRANT_CALL",
            Error::ArithmeticOverflow => "ARITHMETIC_OVERFLOW",
        }
    }

    /// True for errors the caller can fix by re-querying market state.
    pub fn is_state_error(&self) -> bool {
        (200..300).contains(&(*self as u32))
    }
}
