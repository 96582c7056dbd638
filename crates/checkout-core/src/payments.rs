//! Recent Payments
//!
//! Payment events as the backend reports them, plus the feed state behind the
//! recent-payments table. The backend stores whatever the provider's webhook
//! carried, so every field is optional and loosely typed on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{CheckoutError, Result};

/// Placeholder for an absent field
pub const NOT_AVAILABLE: &str = "N/A";

/// Text of the single row shown when there is nothing to list
pub const EMPTY_MESSAGE: &str = "No recent payments found.";

/// Number of columns in the recent-payments table
pub const TABLE_COLUMN_COUNT: usize = PaymentField::ALL.len();

/// One stored webhook event
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentEvent {
    #[serde(default, deserialize_with = "lenient_string")]
    pub payment_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub event_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub event_type: Option<String>,
    /// Number or string on the wire
    #[serde(default, deserialize_with = "lenient_string")]
    pub amount: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub processed_on: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub response_code: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub response_summary: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub order_ref: Option<String>,
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    })
}

impl PaymentEvent {
    /// Parsed `processed_on`, when it is RFC 3339
    pub fn processed_at(&self) -> Option<DateTime<Utc>> {
        self.processed_on
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    pub fn payment_status(&self) -> PaymentStatus {
        match (&self.status, &self.event_type) {
            (Some(status), _) => PaymentStatus::parse(status),
            (None, Some(event_type)) => PaymentStatus::from_event_type(event_type),
            (None, None) => PaymentStatus::Pending,
        }
    }
}

/// Lifecycle status recorded by the webhook listener
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PaymentStatus {
    Approved,
    Declined,
    Captured,
    Voided,
    Refunded,
    Pending,
    /// Anything else, kept verbatim
    Other(String),
}

impl PaymentStatus {
    pub fn parse(value: &str) -> Self {
        match value {
            "approved" => Self::Approved,
            "declined" => Self::Declined,
            "captured" => Self::Captured,
            "voided" => Self::Voided,
            "refunded" => Self::Refunded,
            "pending" => Self::Pending,
            other => Self::Other(other.to_string()),
        }
    }

    /// Status implied by a provider event type such as `payment_captured`
    pub fn from_event_type(event_type: &str) -> Self {
        match event_type {
            "payment_approved" => Self::Approved,
            "payment_declined" => Self::Declined,
            "payment_captured" => Self::Captured,
            "payment_voided" => Self::Voided,
            "payment_refunded" => Self::Refunded,
            _ => Self::Pending,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Approved => "approved",
            Self::Declined => "declined",
            Self::Captured => "captured",
            Self::Voided => "voided",
            Self::Refunded => "refunded",
            Self::Pending => "pending",
            Self::Other(s) => s,
        }
    }

    /// Settled outcomes; pending and unknown are not
    pub const fn is_final(&self) -> bool {
        !matches!(self, Self::Pending | Self::Other(_))
    }

    /// Class of the status badge in the payments table
    pub const fn badge_class(&self) -> &'static str {
        match self {
            Self::Declined | Self::Voided => "badge badge-failed",
            _ if self.is_final() => "badge badge-settled",
            _ => "badge badge-pending",
        }
    }
}

/// A column of the recent-payments table
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PaymentField {
    PaymentId,
    EventId,
    OrderRef,
    EventType,
    Amount,
    Currency,
    Email,
    ProcessedOn,
    ResponseCode,
    ResponseSummary,
    #[default]
    Status,
}

impl PaymentField {
    /// Table order
    pub const ALL: [Self; 11] = [
        Self::PaymentId,
        Self::EventId,
        Self::OrderRef,
        Self::EventType,
        Self::Amount,
        Self::Currency,
        Self::Email,
        Self::ProcessedOn,
        Self::ResponseCode,
        Self::ResponseSummary,
        Self::Status,
    ];

    /// Fields offered by the compact-layout column selector
    pub const SELECTABLE: [Self; 9] = [
        Self::EventId,
        Self::EventType,
        Self::Amount,
        Self::Currency,
        Self::Email,
        Self::ProcessedOn,
        Self::ResponseCode,
        Self::ResponseSummary,
        Self::Status,
    ];

    /// Columns only shown on wide screens
    pub const DETAIL: [Self; 8] = [
        Self::EventType,
        Self::Amount,
        Self::Currency,
        Self::Email,
        Self::ProcessedOn,
        Self::ResponseCode,
        Self::ResponseSummary,
        Self::Status,
    ];

    /// JSON key
    pub const fn key(self) -> &'static str {
        match self {
            Self::PaymentId => "payment_id",
            Self::EventId => "event_id",
            Self::OrderRef => "order_ref",
            Self::EventType => "event_type",
            Self::Amount => "amount",
            Self::Currency => "currency",
            Self::Email => "email",
            Self::ProcessedOn => "processed_on",
            Self::ResponseCode => "response_code",
            Self::ResponseSummary => "response_summary",
            Self::Status => "status",
        }
    }

    /// Column header
    pub const fn title(self) -> &'static str {
        match self {
            Self::PaymentId => "Payment ID",
            Self::EventId => "Event ID",
            Self::OrderRef => "Order Reference",
            Self::EventType => "Event Type",
            Self::Amount => "Amount",
            Self::Currency => "Currency",
            Self::Email => "Email",
            Self::ProcessedOn => "Processed On",
            Self::ResponseCode => "Response Code",
            Self::ResponseSummary => "Response Summary",
            Self::Status => "Status",
        }
    }

    /// Selector option text: the key with spaces
    pub fn label(self) -> String {
        self.key().replace('_', " ")
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }

    fn raw(self, event: &PaymentEvent) -> Option<&str> {
        let value = match self {
            Self::PaymentId => &event.payment_id,
            Self::EventId => &event.event_id,
            Self::OrderRef => &event.order_ref,
            Self::EventType => &event.event_type,
            Self::Amount => &event.amount,
            Self::Currency => &event.currency,
            Self::Email => &event.email,
            Self::ProcessedOn => &event.processed_on,
            Self::ResponseCode => &event.response_code,
            Self::ResponseSummary => &event.response_summary,
            Self::Status => &event.status,
        };
        value.as_deref()
    }

    /// Cell text for `event`
    pub fn value(self, event: &PaymentEvent) -> String {
        match (self, event.processed_at()) {
            (Self::ProcessedOn, Some(at)) => at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            (Self::Status, _) => event.payment_status().as_str().to_string(),
            _ => self.raw(event).unwrap_or(NOT_AVAILABLE).to_string(),
        }
    }
}

/// Decode a `/api/recent-payments` body.
///
/// The body must be an object whose `payments` member is an array of
/// objects; a single bad record rejects the whole payload.
pub fn parse_payments_payload(body: &str) -> Result<Vec<PaymentEvent>> {
    let value: Value = serde_json::from_str(body)?;
    let Some(payments) = value.get("payments") else {
        return Err(CheckoutError::MalformedPayload(
            "missing `payments` field".into(),
        ));
    };
    let Value::Array(records) = payments else {
        return Err(CheckoutError::MalformedPayload(
            "`payments` is not an array".into(),
        ));
    };

    records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            if !record.is_object() {
                return Err(CheckoutError::MalformedPayload(format!(
                    "payment record {i} is not an object"
                )));
            }
            Ok(PaymentEvent::deserialize(record)?)
        })
        .collect()
}

/// Stamp for one fetch of the payments list
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

/// What [`PaymentsFeed::apply`] did with a response
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedUpdate {
    /// The list was replaced
    Replaced,
    /// A newer response was already applied; this one was discarded
    Stale,
    /// The fetch failed; the previous list stays on screen
    Retained,
}

/// Latest-wins list of payment events
#[derive(Clone, Debug, Default)]
pub struct PaymentsFeed {
    next_ticket: u64,
    applied: Option<FetchTicket>,
    events: Vec<PaymentEvent>,
}

impl PaymentsFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a ticket before starting a fetch
    pub const fn issue(&mut self) -> FetchTicket {
        let ticket = FetchTicket(self.next_ticket);
        self.next_ticket += 1;
        ticket
    }

    /// Apply the outcome of the fetch stamped with `ticket`
    pub fn apply(&mut self, ticket: FetchTicket, result: Result<Vec<PaymentEvent>>) -> FeedUpdate {
        if self.applied.is_some_and(|applied| ticket <= applied) {
            tracing::debug!(ticket = ticket.0, "Discarding out-of-order payments response");
            return FeedUpdate::Stale;
        }

        match result {
            Ok(events) => {
                tracing::debug!(ticket = ticket.0, count = events.len(), "Payments list refreshed");
                self.applied = Some(ticket);
                self.events = events;
                FeedUpdate::Replaced
            }
            Err(e) => {
                tracing::warn!(ticket = ticket.0, error = %e, "Keeping previous payments list");
                FeedUpdate::Retained
            }
        }
    }

    pub fn events(&self) -> &[PaymentEvent] {
        &self.events
    }

    pub fn body(&self) -> TableBody<'_> {
        TableBody::from_events(&self.events)
    }
}

/// Rows of the table body
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TableBody<'a> {
    /// One placeholder row spanning `colspan` columns
    Empty { message: &'static str, colspan: usize },
    Rows(&'a [PaymentEvent]),
}

impl<'a> TableBody<'a> {
    pub const fn from_events(events: &'a [PaymentEvent]) -> Self {
        if events.is_empty() {
            Self::Empty {
                message: EMPTY_MESSAGE,
                colspan: TABLE_COLUMN_COUNT,
            }
        } else {
            Self::Rows(events)
        }
    }
}
