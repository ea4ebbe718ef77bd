//! Error types for the gateway crate

use thiserror::Error;

/// Errors turning values into a transfer form and back
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Encoding failed: {0}")]
    Encode(String),

    #[error("Decoding failed: {0}")]
    Decode(String),

    #[error("Empty payload")]
    EmptyPayload,

    #[error("Unknown encoding: {0}")]
    UnknownEncoding(String),
}

/// Transport-level errors
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Channel closed")]
    ChannelClosed,
}
