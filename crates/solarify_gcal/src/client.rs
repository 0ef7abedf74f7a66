// --- File: crates/solarify_gcal/src/client.rs ---
//! Thin REST client for the Google Calendar v3 API.
//!
//! Carries one bearer token; the resolver in `auth` hands out a fresh
//! client per operation so expiry is handled in one place.

use crate::auth::{AuthMode, GcalError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use solarify_common::HTTP_CLIENT;
use std::collections::HashMap;

const CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

// --- Wire types ---

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FreeBusyRequest<'a> {
    time_min: String,
    time_max: String,
    time_zone: &'a str,
    items: Vec<FreeBusyItem<'a>>,
}

#[derive(Serialize)]
struct FreeBusyItem<'a> {
    id: &'a str,
}

#[derive(Deserialize)]
struct FreeBusyResponse {
    #[serde(default)]
    calendars: HashMap<String, FreeBusyCalendar>,
}

#[derive(Deserialize)]
struct FreeBusyCalendar {
    #[serde(default)]
    busy: Vec<BusyInterval>,
}

#[derive(Deserialize)]
struct BusyInterval {
    start: String,
    end: String,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start: EventTime,
    pub end: EventTime,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attendees: Vec<EventAttendee>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conference_data: Option<ConferenceData>,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EventTime {
    pub date_time: String,
    pub time_zone: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct EventAttendee {
    pub email: String,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ConferenceData {
    pub create_request: ConferenceCreateRequest,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ConferenceCreateRequest {
    pub request_id: String,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InsertedEvent {
    pub id: Option<String>,
    pub status: Option<String>,
    pub html_link: Option<String>,
    pub hangout_link: Option<String>,
}

/// Percent-encode one path segment (RFC 3986 unreserved characters pass
/// through). Calendar ids are email-shaped, so at least `@` needs escaping.
pub fn encode_path_segment(segment: &str) -> String {
    let mut encoded = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                encoded.push(byte as char);
            }
            other => {
                encoded.push_str(&format!("%{other:02X}"));
            }
        }
    }
    encoded
}

/// REST client bound to one calendar and one bearer token.
pub struct GoogleCalendarClient {
    token: String,
    calendar_id: String,
    mode: AuthMode,
}

impl GoogleCalendarClient {
    pub fn new(token: String, calendar_id: String, mode: AuthMode) -> Self {
        Self {
            token,
            calendar_id,
            mode,
        }
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    /// Busy intervals for the calendar within the range, chronological.
    pub async fn free_busy(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<(DateTime<Utc>, DateTime<Utc>)>, GcalError> {
        let request = FreeBusyRequest {
            time_min: start.to_rfc3339(),
            time_max: end.to_rfc3339(),
            time_zone: "UTC",
            items: vec![FreeBusyItem {
                id: &self.calendar_id,
            }],
        };

        let response = HTTP_CLIENT
            .post(format!("{CALENDAR_API_BASE}/freeBusy"))
            .bearer_auth(&self.token)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(GcalError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let parsed: FreeBusyResponse = serde_json::from_str(&body)?;
        let mut periods = Vec::new();
        for calendar in parsed.calendars.into_values() {
            for interval in calendar.busy {
                let start = parse_rfc3339(&interval.start)?;
                let end = parse_rfc3339(&interval.end)?;
                periods.push((start, end));
            }
        }
        periods.sort_by_key(|(start, _)| *start);
        Ok(periods)
    }

    /// Insert an event; `conferenceDataVersion=1` is sent only when the
    /// payload actually requests a conference.
    pub async fn insert_event(&self, event: &EventPayload) -> Result<InsertedEvent, GcalError> {
        let mut url = format!(
            "{CALENDAR_API_BASE}/calendars/{}/events",
            encode_path_segment(&self.calendar_id)
        );
        if event.conference_data.is_some() {
            url.push_str("?conferenceDataVersion=1");
        }

        let response = HTTP_CLIENT
            .post(&url)
            .bearer_auth(&self.token)
            .json(event)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(GcalError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Delete an event. An already-deleted event is not an error.
    pub async fn delete_event(&self, event_id: &str) -> Result<(), GcalError> {
        let url = format!(
            "{CALENDAR_API_BASE}/calendars/{}/events/{}",
            encode_path_segment(&self.calendar_id),
            encode_path_segment(event_id)
        );

        let response = HTTP_CLIENT
            .delete(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() || status.as_u16() == 404 || status.as_u16() == 410 {
            return Ok(());
        }

        let body = response.text().await?;
        Err(GcalError::Api {
            status: status.as_u16(),
            message: body,
        })
    }
}

fn parse_rfc3339(raw: &str) -> Result<DateTime<Utc>, GcalError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| GcalError::TimeParse(format!("{raw}: {e}")))
}
