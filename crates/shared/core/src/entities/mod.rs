mod currency;
mod order;

pub use currency::CryptoCurrency;
pub use order::ExchangeOrder;
