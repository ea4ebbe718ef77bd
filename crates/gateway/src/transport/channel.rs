//! Tokio channel-based transport for single-process mode
//!
//! Broadcast channels give pub/sub semantics; mpsc + oneshot give
//! request/reply. Payloads always travel sealed in an [`Envelope`].

use std::marker::PhantomData;

use async_trait::async_trait;
use log::{debug, warn};
use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::{broadcast, mpsc, oneshot};

use crate::codec::Encoding;
use crate::error::TransportError;
use crate::messages::Envelope;
use crate::transport::{Publisher, Requester, Subjects, Subscriber, TransportConfig};

/// Channel-based publisher using broadcast
pub struct ChannelPublisher<M> {
    tx: broadcast::Sender<Envelope>,
    subject: String,
    encoding: Encoding,
    _message: PhantomData<fn(M)>,
}

impl<M> ChannelPublisher<M> {
    /// Create a publisher/subscriber pair; the subscriber sees every subject
    pub fn pair(
        subject: impl Into<String>,
        config: &TransportConfig,
    ) -> (Self, ChannelSubscriber<M>) {
        let (tx, rx) = broadcast::channel(config.channel_capacity.max(1));
        let publisher = Self {
            tx,
            subject: subject.into(),
            encoding: config.encoding,
            _message: PhantomData,
        };
        let subscriber = ChannelSubscriber::new(rx, "*");
        (publisher, subscriber)
    }

    /// Get another subscriber limited to subjects matching `pattern`
    ///
    /// Subscribers never hold the sender, so once this publisher is dropped
    /// they drain what is buffered and then report `ChannelClosed`.
    pub fn subscribe(&self, pattern: impl Into<String>) -> ChannelSubscriber<M> {
        ChannelSubscriber::new(self.tx.subscribe(), pattern)
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    fn send(&self, envelope: Envelope) -> Result<(), TransportError> {
        debug!(
            "Publishing {} ({} bytes, {})",
            envelope.subject,
            envelope.len(),
            envelope.encoding
        );
        self.tx
            .send(envelope)
            .map_err(|_| TransportError::ChannelClosed)?;
        Ok(())
    }
}

#[async_trait]
impl<M> Publisher<M> for ChannelPublisher<M>
where
    M: Serialize + Send + Sync + 'static,
{
    async fn publish(&self, msg: &M) -> Result<(), TransportError> {
        self.send(Envelope::seal(self.subject.as_str(), msg, self.encoding)?)
    }

    async fn publish_to(&self, subject: &str, msg: &M) -> Result<(), TransportError> {
        self.send(Envelope::seal(subject, msg, self.encoding)?)
    }
}

/// Channel-based subscriber using broadcast receiver
pub struct ChannelSubscriber<M> {
    rx: broadcast::Receiver<Envelope>,
    pattern: String,
    _message: PhantomData<fn() -> M>,
}

impl<M> ChannelSubscriber<M> {
    fn new(rx: broadcast::Receiver<Envelope>, pattern: impl Into<String>) -> Self {
        Self {
            rx,
            pattern: pattern.into(),
            _message: PhantomData,
        }
    }

    /// Wait for the next envelope matching the pattern, still sealed
    pub async fn next_envelope(&mut self) -> Result<Envelope, TransportError> {
        loop {
            match self.rx.recv().await {
                Ok(envelope) if Subjects::matches(&self.pattern, &envelope.subject) => {
                    return Ok(envelope);
                }
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(
                        "Subscriber on {} lagged, skipped {} messages",
                        self.pattern, skipped
                    );
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => {
                    return Err(TransportError::ChannelClosed);
                }
            }
        }
    }

    fn try_next_envelope(&mut self) -> Result<Option<Envelope>, TransportError> {
        loop {
            match self.rx.try_recv() {
                Ok(envelope) if Subjects::matches(&self.pattern, &envelope.subject) => {
                    return Ok(Some(envelope));
                }
                Ok(_) => continue,
                Err(broadcast::error::TryRecvError::Empty) => return Ok(None),
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    warn!(
                        "Subscriber on {} lagged, skipped {} messages",
                        self.pattern, skipped
                    );
                    continue;
                }
                Err(broadcast::error::TryRecvError::Closed) => {
                    return Err(TransportError::ChannelClosed);
                }
            }
        }
    }
}

#[async_trait]
impl<M> Subscriber<M> for ChannelSubscriber<M>
where
    M: DeserializeOwned + Send + 'static,
{
    async fn next(&mut self) -> Result<M, TransportError> {
        let envelope = self.next_envelope().await?;
        Ok(envelope.open()?)
    }

    fn try_next(&mut self) -> Result<Option<M>, TransportError> {
        match self.try_next_envelope()? {
            Some(envelope) => Ok(Some(envelope.open()?)),
            None => Ok(None),
        }
    }
}

/// Request message wrapper for channel-based request/reply
struct ChannelRequest {
    envelope: Envelope,
    reply_tx: oneshot::Sender<Envelope>,
}

/// Channel-based requester for request/reply pattern
pub struct ChannelRequester<Req, Res> {
    tx: mpsc::Sender<ChannelRequest>,
    subject: String,
    encoding: Encoding,
    _messages: PhantomData<fn(Req) -> Res>,
}

impl<Req, Res> ChannelRequester<Req, Res> {
    /// Create a requester/responder pair for requests on `subject`
    pub fn pair(
        subject: impl Into<String>,
        config: &TransportConfig,
    ) -> (Self, ChannelResponder<Req, Res>) {
        let (tx, rx) = mpsc::channel(config.channel_capacity.max(1));
        let requester = Self {
            tx,
            subject: subject.into(),
            encoding: config.encoding,
            _messages: PhantomData,
        };
        let responder = ChannelResponder {
            rx,
            encoding: config.encoding,
            _messages: PhantomData,
        };
        (requester, responder)
    }
}

#[async_trait]
impl<Req, Res> Requester<Req, Res> for ChannelRequester<Req, Res>
where
    Req: Serialize + Send + Sync + 'static,
    Res: DeserializeOwned + Send + 'static,
{
    async fn request(&self, req: &Req) -> Result<Res, TransportError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        let request = ChannelRequest {
            envelope: Envelope::seal(self.subject.as_str(), req, self.encoding)?,
            reply_tx,
        };

        self.tx
            .send(request)
            .await
            .map_err(|_| TransportError::ChannelClosed)?;

        let reply = reply_rx.await.map_err(|_| TransportError::ChannelClosed)?;
        Ok(reply.open()?)
    }
}

/// Channel-based responder (server side of request/reply)
pub struct ChannelResponder<Req, Res> {
    rx: mpsc::Receiver<ChannelRequest>,
    encoding: Encoding,
    _messages: PhantomData<fn(Res) -> Req>,
}

impl<Req, Res> ChannelResponder<Req, Res>
where
    Req: DeserializeOwned,
    Res: Serialize,
{
    /// Receive and decode the next request
    ///
    /// If the request cannot be decoded its reply handle is dropped, so the
    /// requester sees the channel close rather than waiting forever.
    pub async fn next(&mut self) -> Result<(Req, Reply<Res>), TransportError> {
        let ChannelRequest { envelope, reply_tx } =
            self.rx.recv().await.ok_or(TransportError::ChannelClosed)?;

        let request = envelope.open()?;
        let reply = Reply {
            reply_tx,
            subject: Subjects::reply_to(&envelope.subject),
            encoding: self.encoding,
            _message: PhantomData,
        };
        Ok((request, reply))
    }
}

/// Handle for answering one request
pub struct Reply<Res> {
    reply_tx: oneshot::Sender<Envelope>,
    subject: String,
    encoding: Encoding,
    _message: PhantomData<fn(Res)>,
}

impl<Res: Serialize> Reply<Res> {
    /// Seal and send the response
    pub fn send(self, response: &Res) -> Result<(), TransportError> {
        let envelope = Envelope::seal(self.subject, response, self.encoding)?;
        self.reply_tx
            .send(envelope)
            .map_err(|_| TransportError::ChannelClosed)
    }
}
