// --- File: crates/solarify_common/src/services.rs ---
//! Service abstractions for external services.
//!
//! Trait definitions for the notification delivery channels and the
//! calendar backend. Implementations live in `solarify_notify` and
//! `solarify_gcal`; keeping the traits here lets callers depend on the
//! seam without pulling in SMTP or Google API machinery, and lets tests
//! substitute recording fakes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A wrapper error type that implements std::error::Error for Box<dyn std::error::Error + Send + Sync>
#[derive(Debug)]
pub struct BoxedError(pub Box<dyn StdError + Send + Sync>);

impl fmt::Display for BoxedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StdError for BoxedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

impl From<Box<dyn StdError + Send + Sync>> for BoxedError {
    fn from(err: Box<dyn StdError + Send + Sync>) -> Self {
        BoxedError(err)
    }
}

impl From<String> for BoxedError {
    fn from(message: String) -> Self {
        BoxedError(message.into())
    }
}

/// One notification addressed to one recipient, ready for a single channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationMessage {
    pub recipient_user_id: i64,
    pub recipient_email: Option<String>,
    pub subject: String,
    pub body: String,
}

/// The outcome of a delivery attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationResult {
    /// Channel-specific identifier, when the channel produces one
    pub id: Option<String>,
    /// Status, e.g. "stored", "sent", "logged"
    pub status: String,
}

/// A delivery channel for notifications.
///
/// Deliveries are best-effort: the fan-out logs failures and moves on, so
/// implementations should not retry internally.
pub trait NotificationChannel: Send + Sync {
    /// Short channel name used in logs ("in_app", "email", "console").
    fn name(&self) -> &'static str;

    /// Deliver one message.
    fn deliver(
        &self,
        message: NotificationMessage,
    ) -> BoxFuture<'_, NotificationResult, BoxedError>;
}

/// An appointment to place in the calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Start in RFC3339 with offset
    pub start_time: String,
    /// End in RFC3339 with offset
    pub end_time: String,
    pub summary: String,
    pub description: Option<String>,
    pub attendee_emails: Vec<String>,
    /// Request a conference link for the event. Ignored by backends that
    /// cannot create one.
    pub with_conferencing: bool,
}

/// The outcome of creating a calendar event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEventResult {
    pub event_id: Option<String>,
    /// Event status, e.g. "confirmed"
    pub status: String,
    pub html_link: Option<String>,
    pub meet_link: Option<String>,
}

/// A calendar backend: query busy intervals, insert and remove events.
///
/// The real implementation talks to Google Calendar; a degraded one may
/// simulate every operation.
pub trait CalendarService: Send + Sync {
    type Error: StdError + Send + Sync + 'static;

    /// Busy intervals within the given range, chronological.
    #[allow(clippy::type_complexity)]
    fn get_busy_times(
        &self,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<(DateTime<Utc>, DateTime<Utc>)>, Self::Error>;

    /// Insert an event into the calendar.
    fn create_event(&self, event: CalendarEvent)
        -> BoxFuture<'_, CalendarEventResult, Self::Error>;

    /// Remove an event from the calendar.
    fn delete_event(&self, event_id: &str) -> BoxFuture<'_, (), Self::Error>;
}
