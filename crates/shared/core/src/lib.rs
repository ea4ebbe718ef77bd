//! Coinswap Core Domain
//!
//! Pure domain types for crypto-to-crypto exchange orders.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod entities;
pub mod error;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{CryptoCurrency, ExchangeOrder};
pub use error::{CurrencyError, OrderValidationError};
pub use values::{Address, Amount, BaseUnits, OrderId, Rate};
