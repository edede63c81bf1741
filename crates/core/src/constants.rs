/// Decimal places used for percentages shown to the user (P&L %, allocation %).
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Default demat account name offered by uploads.
pub const DEFAULT_ACCOUNT_ID: &str = "Zerodha";

/// Default strategy tag for holdings snapshots uploaded as BUY transactions.
pub const DEFAULT_HOLDINGS_STRATEGY: &str = "Long Term";

/// Default strategy tag for daily trade logs.
pub const DEFAULT_TRADES_STRATEGY: &str = "Swing";

/// Number of movers kept per group in grouped performer tables.
pub const GROUPED_TOP_N: usize = 3;

/// Number of movers kept in the overall performer tables.
pub const OVERALL_TOP_N: usize = 5;

/// Default averaging trigger (percent below average cost).
pub const DEFAULT_AVERAGING_THRESHOLD_PCT: u32 = 10;

/// Inclusive bounds accepted for the averaging trigger.
pub const MIN_AVERAGING_THRESHOLD_PCT: u32 = 1;
pub const MAX_AVERAGING_THRESHOLD_PCT: u32 = 50;
