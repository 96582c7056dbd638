//! Error Types

use std::time::Duration;

use rust_decimal::Decimal;
use thiserror::Error;

/// Result type alias for checkout operations
pub type Result<T> = std::result::Result<T, CheckoutError>;

/// Checkout error types
#[derive(Error, Debug)]
pub enum CheckoutError {
    /// Checkout started with nothing to pay for
    #[error("Cart total must be greater than zero")]
    EmptyCart,

    /// Total could not be expressed in minor currency units
    #[error("Amount cannot be expressed in minor units: {0}")]
    InvalidAmount(Decimal),

    /// Transport-level failure (DNS, CORS, connection reset, ...)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },

    /// Response body was not the JSON we expected
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Response parsed but had the wrong shape
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// Backend has no order reference for the payment
    #[error("Order reference missing for payment {0}")]
    MissingOrderReference(String),

    /// Widget library script never became available
    #[error("Payment widget library not loaded after {0:?}")]
    LibraryTimeout(Duration),

    /// Widget factory or mount threw
    #[error("Widget error: {0}")]
    Widget(String),

    /// Mount point is not in the document
    #[error("Mount container not found: #{0}")]
    ContainerMissing(String),

    /// A reset happened while this attempt was suspended
    #[error("Checkout attempt {0} was superseded")]
    Superseded(u64),
}

impl CheckoutError {
    /// True when the error only means a newer attempt took over
    pub const fn is_stale(&self) -> bool {
        matches!(self, Self::Superseded(_))
    }

    /// Convert to a user-friendly message
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::EmptyCart => "Add something to your basket first.",
            Self::Network(_) | Self::Status { .. } => {
                "We couldn't reach the payment service. Please try again."
            }
            Self::LibraryTimeout(_) | Self::Widget(_) | Self::ContainerMissing(_) => {
                "The payment form failed to load. Please refresh the page."
            }
            Self::MissingOrderReference(_) => "We couldn't confirm your order reference.",
            _ => "An unexpected error occurred.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_detection() {
        assert!(CheckoutError::Superseded(3).is_stale());
        assert!(!CheckoutError::EmptyCart.is_stale());
    }

    #[test]
    fn test_status_display() {
        let err = CheckoutError::Status {
            endpoint: "/api/get-order-ref".into(),
            status: 404,
        };
        assert_eq!(err.to_string(), "/api/get-order-ref returned HTTP 404");
    }
}
