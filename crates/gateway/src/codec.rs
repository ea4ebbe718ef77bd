//! Transfer-form codecs
//!
//! An order crosses a component boundary as bytes, never as a live value.
//! `Json` is the default and is what gets parked in snapshots; `Binary`
//! (bincode) is the compact alternative for hot channels.

use std::fmt;
use std::str::FromStr;

use coinswap_core::ExchangeOrder;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::CodecError;

/// Transfer-form encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    #[default]
    Json,
    Binary,
}

impl Encoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Binary => "binary",
        }
    }

    /// Encode a value into its transfer form
    pub fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        match self {
            Self::Json => {
                serde_json::to_vec(value).map_err(|e| CodecError::Encode(e.to_string()))
            }
            Self::Binary => {
                bincode::serialize(value).map_err(|e| CodecError::Encode(e.to_string()))
            }
        }
    }

    /// Decode a value from its transfer form
    ///
    /// Fails rather than producing a partial value; trailing bytes are an error.
    pub fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError> {
        if bytes.is_empty() {
            return Err(CodecError::EmptyPayload);
        }

        match self {
            Self::Json => {
                serde_json::from_slice(bytes).map_err(|e| CodecError::Decode(e.to_string()))
            }
            Self::Binary => {
                use bincode::Options;

                bincode::DefaultOptions::new()
                    .with_fixint_encoding()
                    .reject_trailing_bytes()
                    .deserialize(bytes)
                    .map_err(|e| CodecError::Decode(e.to_string()))
            }
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Encoding {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "binary" | "bincode" => Ok(Self::Binary),
            _ => Err(CodecError::UnknownEncoding(s.to_string())),
        }
    }
}

/// Encode an order into its transfer form
pub fn encode_order(order: &ExchangeOrder, encoding: Encoding) -> Result<Vec<u8>, CodecError> {
    encoding.encode(order)
}

/// Rebuild an order from its transfer form
pub fn decode_order(bytes: &[u8], encoding: Encoding) -> Result<ExchangeOrder, CodecError> {
    encoding.decode(bytes)
}
