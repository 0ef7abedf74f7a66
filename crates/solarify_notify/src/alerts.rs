// --- File: crates/solarify_notify/src/alerts.rs ---
//! In-app alert storage.
//!
//! Alerts live in process memory: the inbox is a convenience surface over
//! the stock alert fan-out, not an audit log, so losing it on restart is
//! acceptable.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Mutex;
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// One in-app notification for one user.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Alert {
    pub id: String,
    pub user_id: i64,
    pub subject: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub read: bool,
}

/// Thread-safe in-memory alert inbox, shared behind an `Arc`.
#[derive(Debug, Default)]
pub struct AlertStore {
    alerts: Mutex<Vec<Alert>>,
}

impl AlertStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new unread alert and return a copy of it.
    pub fn add(&self, user_id: i64, subject: &str, body: &str) -> Alert {
        let alert = Alert {
            id: Uuid::new_v4().to_string(),
            user_id,
            subject: subject.to_string(),
            body: body.to_string(),
            created_at: Utc::now(),
            read: false,
        };

        let mut alerts = self.alerts.lock().unwrap();
        alerts.push(alert.clone());
        alert
    }

    /// All alerts for one user, newest first.
    pub fn list_for_user(&self, user_id: i64) -> Vec<Alert> {
        let alerts = self.alerts.lock().unwrap();
        let mut result: Vec<Alert> = alerts
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();
        result.reverse();
        result
    }

    /// Mark one alert as read. Returns false for an unknown id or an alert
    /// that belongs to another user.
    pub fn mark_read(&self, user_id: i64, alert_id: &str) -> bool {
        let mut alerts = self.alerts.lock().unwrap();
        match alerts
            .iter_mut()
            .find(|a| a.id == alert_id && a.user_id == user_id)
        {
            Some(alert) => {
                alert.read = true;
                true
            }
            None => false,
        }
    }

    pub fn unread_count(&self, user_id: i64) -> usize {
        let alerts = self.alerts.lock().unwrap();
        alerts
            .iter()
            .filter(|a| a.user_id == user_id && !a.read)
            .count()
    }
}
