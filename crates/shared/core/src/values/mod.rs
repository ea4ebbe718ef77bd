use num_bigint::BigInt;
use rust_decimal::Decimal;

/// Amount in an asset's display units (e.g. BTC, not satoshi)
pub type Amount = Decimal;

/// Quoted conversion rate between two assets
pub type Rate = f64;

/// Amount in a chain's smallest unit (satoshi, wei)
/// Unbounded: wei values routinely exceed `u64::MAX`
pub type BaseUnits = BigInt;

/// Opaque order reference issued by the exchange service
pub type OrderId = String;

/// Opaque wallet address
pub type Address = String;
