use thiserror::Error;

/// Errors parsing a currency symbol
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurrencyError {
    #[error("Unknown currency: {0}")]
    Unknown(String),
}

/// Findings from [`ExchangeOrder::validate`](crate::ExchangeOrder::validate)
///
/// The order type never raises these on its own; callers opt in.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderValidationError {
    #[error("Source and destination currency are both {0}")]
    SameCurrency(String),

    #[error("Negative amount in {field}")]
    NegativeAmount { field: &'static str },

    #[error("Negative fee in {field}")]
    NegativeFee { field: &'static str },

    #[error("Exchange rate must be finite and positive")]
    InvalidRate,
}
