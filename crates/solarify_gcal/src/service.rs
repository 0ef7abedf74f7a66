// --- File: crates/solarify_gcal/src/service.rs ---
//! Calendar backend over the credential resolver.
//!
//! Implements the shared [`CalendarService`] trait. Mock mode is handled
//! here: with no usable credentials, busy queries report an empty calendar,
//! event creation logs the payload and synthesizes an id, and deletion is
//! a no-op. Callers never see mock-mode failures.

use crate::auth::{AuthMode, CalendarAccess, GcalError};
use crate::client::{
    ConferenceCreateRequest, ConferenceData, EventAttendee, EventPayload, EventTime,
};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use solarify_common::services::{
    BoxFuture, CalendarEvent, CalendarEventResult, CalendarService,
};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Google Calendar backend with automatic mock fallback.
pub struct GoogleCalendarService {
    access: Arc<CalendarAccess>,
    time_zone: Tz,
}

impl GoogleCalendarService {
    pub fn new(access: Arc<CalendarAccess>, time_zone: Tz) -> Self {
        Self { access, time_zone }
    }

    pub fn time_zone(&self) -> Tz {
        self.time_zone
    }

    /// The calendar owner address added as an attendee, when configured.
    pub fn calendar_email(&self) -> Option<String> {
        self.access.calendar_email().map(str::to_string)
    }

    fn build_payload(&self, event: &CalendarEvent, mode: AuthMode) -> EventPayload {
        // Service-account events cannot carry conferencing data.
        let conference_data = (event.with_conferencing && mode != AuthMode::ServiceAccount)
            .then(|| ConferenceData {
                create_request: ConferenceCreateRequest {
                    request_id: Uuid::new_v4().to_string(),
                },
            });

        EventPayload {
            summary: event.summary.clone(),
            description: event.description.clone(),
            start: EventTime {
                date_time: event.start_time.clone(),
                time_zone: self.time_zone.name().to_string(),
            },
            end: EventTime {
                date_time: event.end_time.clone(),
                time_zone: self.time_zone.name().to_string(),
            },
            attendees: event
                .attendee_emails
                .iter()
                .map(|email| EventAttendee {
                    email: email.clone(),
                })
                .collect(),
            conference_data,
        }
    }
}

impl CalendarService for GoogleCalendarService {
    type Error = GcalError;

    fn get_busy_times(
        &self,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<(DateTime<Utc>, DateTime<Utc>)>, GcalError> {
        Box::pin(async move {
            match self.access.client().await? {
                Some(client) => client.free_busy(start_time, end_time).await,
                // Mock mode: the calendar is always free.
                None => Ok(Vec::new()),
            }
        })
    }

    fn create_event(
        &self,
        event: CalendarEvent,
    ) -> BoxFuture<'_, CalendarEventResult, GcalError> {
        Box::pin(async move {
            let Some(client) = self.access.client().await? else {
                let event_id = format!("mock-event-{}", Uuid::new_v4());
                info!(
                    "Mock calendar event {}: {:?} from {} to {}",
                    event_id, event.summary, event.start_time, event.end_time
                );
                return Ok(CalendarEventResult {
                    event_id: Some(event_id),
                    status: "confirmed".to_string(),
                    html_link: None,
                    meet_link: None,
                });
            };

            let payload = self.build_payload(&event, client.mode());
            let inserted = client.insert_event(&payload).await?;
            Ok(CalendarEventResult {
                event_id: inserted.id,
                status: inserted.status.unwrap_or_else(|| "confirmed".to_string()),
                html_link: inserted.html_link,
                meet_link: inserted.hangout_link,
            })
        })
    }

    fn delete_event(&self, event_id: &str) -> BoxFuture<'_, (), GcalError> {
        let event_id = event_id.to_string();
        Box::pin(async move {
            match self.access.client().await? {
                Some(client) => client.delete_event(&event_id).await,
                None => {
                    info!("Mock calendar: skipping deletion of event {}", event_id);
                    Ok(())
                }
            }
        })
    }
}

/// Busy intervals for one day, degrading to "all free" on remote failure.
///
/// The availability endpoint must not fail because the calendar is
/// unreachable; a warning is logged and every slot stays available.
pub async fn busy_times_or_available(
    service: &GoogleCalendarService,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
    match service.get_busy_times(start, end).await {
        Ok(busy) => busy,
        Err(e) => {
            warn!(
                "Free/busy query failed, treating all slots as available: {}",
                e
            );
            Vec::new()
        }
    }
}
