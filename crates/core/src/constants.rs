/// Default currency cashflows and market values are denominated in
pub const DEFAULT_CURRENCY: &str = "USD";

/// Root component of asset accounts in the chart of accounts
pub const DEFAULT_ASSETS_ROOT: &str = "Assets";

/// Separator between account name components
pub const ACCOUNT_SEPARATOR: char = ':';

/// Decimal places a transaction cashflow must survive to be emitted
pub const CASHFLOW_ROUNDING_DP: u32 = 2;

/// Bucket used when extracting cashflows for a single group of accounts
pub const GROUP_ASSET_ACCOUNT: &str = "Assets:_AssetAccountForCashflows";

/// Day-count basis for XNPV discounting (Actual/365)
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Starting rate for the XIRR solve
pub const XIRR_DEFAULT_GUESS: f64 = 0.1;

/// Iteration budget for the XIRR solve
pub const XIRR_MAX_ITERATIONS: usize = 100;

/// Step size under which the XIRR solve is considered converged
pub const XIRR_TOLERANCE: f64 = 1e-10;
