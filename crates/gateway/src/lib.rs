//! Coinswap Gateway
//!
//! Moves exchange orders across component boundaries. Provides:
//! - Transfer-form codecs (JSON, bincode) with lossless amounts
//! - Envelope and result message types
//! - Channel transport (pub/sub and request/reply)
//! - In-memory snapshot store for lifecycle save/restore
//!
//! ## Architecture
//!
//! ```text
//! Order screen ──► orders.draft.{id} ──► Confirmation handler
//!      │                                        ▲
//!      ├──────── orders.submit (request) ───────┤
//!      ◄──────── orders.submit.reply ───────────┘
//!      │
//!      └── save/restore ──► SnapshotStore
//! ```
//!
//! ## Transport
//!
//! Currently uses tokio channels for single-process operation.
//! The `Publisher`/`Subscriber`/`Requester` traits allow plugging in other
//! transports when needed.

pub mod codec;
pub mod error;
pub mod messages;
pub mod state;
pub mod transport;

// Re-export commonly used types
pub use codec::{Encoding, decode_order, encode_order};
pub use error::{CodecError, TransportError};
pub use messages::{Envelope, OrderResult};
pub use state::SnapshotStore;
pub use transport::{
    Publisher, Requester, Subjects, Subscriber, TransportConfig,
    channel::{ChannelPublisher, ChannelRequester, ChannelResponder, ChannelSubscriber, Reply},
};
