//! Transport configuration

use crate::codec::Encoding;

/// Settings shared by every channel pair
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Transfer form used for payloads
    pub encoding: Encoding,
    /// Buffered messages per channel; zero is treated as one
    pub channel_capacity: usize,
}

impl TransportConfig {
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_capacity(mut self, channel_capacity: usize) -> Self {
        self.channel_capacity = channel_capacity.max(1);
        self
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            encoding: Encoding::Json,
            channel_capacity: 1000,
        }
    }
}

/// Subject names stamped on envelopes
///
/// A subscriber pattern ending in `.*` matches every subject under that
/// prefix; `*` alone matches everything.
pub struct Subjects;

impl Subjects {
    /// An order being shown for confirmation: `orders.draft.ORDER-123`
    pub fn order_draft(order_id: &str) -> String {
        format!("orders.draft.{}", order_id)
    }

    /// Every draft: `orders.draft.*`
    pub fn order_draft_all() -> &'static str {
        "orders.draft.*"
    }

    /// Confirmed orders handed to the exchange routine
    pub const ORDER_SUBMIT: &'static str = "orders.submit";

    /// Orders parked across a lifecycle event
    pub const ORDER_RESTORE: &'static str = "orders.restore";

    /// Reply subject for a request sent on `subject`: `orders.submit.reply`
    pub fn reply_to(subject: &str) -> String {
        format!("{}.reply", subject)
    }

    /// Whether `subject` falls under `pattern`
    pub fn matches(pattern: &str, subject: &str) -> bool {
        if pattern == "*" {
            return true;
        }
        match pattern.strip_suffix('*') {
            Some(prefix) if prefix.ends_with('.') => subject.starts_with(prefix),
            _ => pattern == subject,
        }
    }
}
