use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Decimal precision for stored and computed values
pub const DECIMAL_PRECISION: u32 = 6;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Minimum net worth change that justifies rewriting a same-day snapshot
pub const DEFAULT_SNAPSHOT_MATERIALITY_THRESHOLD: Decimal = dec!(0.01);

/// Base currency used when settings do not provide one
pub const DEFAULT_BASE_CURRENCY: &str = "USD";

/// Window used by the all-time frame when there is no data at all
pub const ALL_TIME_FALLBACK_YEARS: u32 = 100;
