//! Transport abstraction layer
//!
//! Moves values between components as [`Envelope`](crate::messages::Envelope)s
//! over tokio channels. Every hop encodes and decodes, so a receiver only
//! ever sees what survived the transfer form.

pub mod channel;
pub mod config;

pub use config::{Subjects, TransportConfig};

use crate::error::TransportError;
use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};

/// Sending half of a pub/sub link
///
/// Implementors seal each message into an envelope stamped with a subject;
/// subscribers filter on that subject before decoding.
#[async_trait]
pub trait Publisher<M>: Send + Sync
where
    M: Serialize + Send + Sync,
{
    /// Seal `msg` under the publisher's own subject and send it
    async fn publish(&self, msg: &M) -> Result<(), TransportError>;

    /// Seal `msg` under `subject` instead of the publisher's own
    async fn publish_to(&self, subject: &str, msg: &M) -> Result<(), TransportError>;
}

/// Receiving half of a pub/sub link
///
/// Each call opens one envelope, so a codec failure surfaces as
/// [`TransportError::Codec`] for that message only.
#[async_trait]
pub trait Subscriber<M>: Send
where
    M: DeserializeOwned + Send,
{
    /// Wait for the next matching message; `ChannelClosed` once every
    /// publisher is gone and the buffer is drained
    async fn next(&mut self) -> Result<M, TransportError>;

    /// `Ok(None)` when nothing is buffered
    fn try_next(&mut self) -> Result<Option<M>, TransportError>;
}

/// One request, one reply, e.g. submitting an order and awaiting the verdict
#[async_trait]
pub trait Requester<Req, Res>: Send + Sync
where
    Req: Serialize + Send + Sync,
    Res: DeserializeOwned + Send,
{
    async fn request(&self, req: &Req) -> Result<Res, TransportError>;
}
