//! Order message types

use coinswap_core::{ExchangeOrder, OrderId};
use serde::{Deserialize, Serialize};

/// What a result handler did with an order it was shown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OrderResult {
    /// Confirmed as-is
    Accepted { order_id: OrderId },
    /// Confirmed after the user revised amounts, rate or fees
    Amended { order: ExchangeOrder },
    /// Abandoned
    Cancelled { order_id: OrderId, reason: String },
}

impl OrderResult {
    pub fn accepted(order_id: impl Into<OrderId>) -> Self {
        Self::Accepted {
            order_id: order_id.into(),
        }
    }

    pub fn amended(order: ExchangeOrder) -> Self {
        Self::Amended { order }
    }

    pub fn cancelled(order_id: impl Into<OrderId>, reason: impl Into<String>) -> Self {
        Self::Cancelled {
            order_id: order_id.into(),
            reason: reason.into(),
        }
    }

    /// The order this result refers to
    pub fn order_id(&self) -> &str {
        match self {
            Self::Accepted { order_id } | Self::Cancelled { order_id, .. } => order_id,
            Self::Amended { order } => order.order_id(),
        }
    }

    /// True unless the order was cancelled
    pub fn is_confirmed(&self) -> bool {
        !matches!(self, Self::Cancelled { .. })
    }
}
