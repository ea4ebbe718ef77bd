use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CurrencyError;

/// Crypto assets supported by the wallet
///
/// Serialized as the ticker symbol, so the transfer form carries `"BTC"`
/// rather than the variant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CryptoCurrency {
    #[serde(rename = "BTC")]
    Btc,
    #[serde(rename = "ETH")]
    Ether,
    #[serde(rename = "BCH")]
    Bch,
}

impl CryptoCurrency {
    /// Every supported asset, in display order
    pub const ALL: [CryptoCurrency; 3] = [Self::Btc, Self::Ether, Self::Bch];

    /// Ticker symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Btc => "BTC",
            Self::Ether => "ETH",
            Self::Bch => "BCH",
        }
    }

    /// Number of decimal places between the display unit and the smallest unit
    pub fn decimals(&self) -> u32 {
        match self {
            Self::Btc | Self::Bch => 8,
            Self::Ether => 18,
        }
    }

    /// Name of the chain's smallest unit
    pub fn base_unit(&self) -> &'static str {
        match self {
            Self::Btc | Self::Bch => "satoshi",
            Self::Ether => "wei",
        }
    }
}

impl fmt::Display for CryptoCurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for CryptoCurrency {
    type Err = CurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BTC" => Ok(Self::Btc),
            "ETH" | "ETHER" => Ok(Self::Ether),
            "BCH" => Ok(Self::Bch),
            _ => Err(CurrencyError::Unknown(s.to_string())),
        }
    }
}
