// --- File: crates/solarify_notify/src/dispatch.rs ---
//! Stock alert thresholds and the notification fan-out.

use crate::alerts::AlertStore;
use crate::channels::{ConsoleChannel, InAppChannel, SmtpChannel};
use solarify_common::is_smtp_enabled;
use solarify_common::services::{NotificationChannel, NotificationMessage};
use solarify_config::AppConfig;
use solarify_db::models::{InventoryItem, NotificationPreference, StockChange, User};
use solarify_db::repositories::UserRepository;
use solarify_db::Repositories;
use std::sync::Arc;
use tracing::{debug, warn};

/// Coarse alert thresholds. Below 10 units every further unit counts, so
/// the effective list continues 10, 9, ... down to 1.
pub const STOCK_ALERT_THRESHOLDS: [i64; 5] = [200, 150, 100, 50, 20];

/// All alert thresholds in descending order.
pub fn alert_thresholds() -> impl Iterator<Item = i64> {
    STOCK_ALERT_THRESHOLDS
        .iter()
        .copied()
        .chain((1..=10).rev())
}

/// Thresholds crossed by a stock movement, descending.
///
/// A threshold counts as crossed when the previous quantity was strictly
/// above it and the new quantity is at or below it. A drop through several
/// thresholds yields one alert per threshold.
pub fn crossed_thresholds(previous: i64, new: i64) -> Vec<i64> {
    alert_thresholds()
        .filter(|&t| previous > t && new <= t)
        .collect()
}

pub fn stock_alert_subject(item: &InventoryItem, threshold: i64) -> String {
    format!("Stock alert: {} at or below {}", item.name, threshold)
}

pub fn stock_alert_body(item: &InventoryItem, change: &StockChange, threshold: i64) -> String {
    format!(
        "Inventory item {} ({}) dropped from {} to {} units, crossing the {}-unit threshold.",
        item.name, item.sku, change.previous, change.new, threshold
    )
}

/// Routes stock alerts to every staff user over their preferred channel.
///
/// Email falls back to the console channel when SMTP is not configured, so
/// a preference never silently swallows alerts.
pub struct NotificationDispatcher {
    repos: Repositories,
    in_app: InAppChannel,
    console: ConsoleChannel,
    email: Option<SmtpChannel>,
}

impl NotificationDispatcher {
    pub fn new(config: &Arc<AppConfig>, repos: Repositories, store: Arc<AlertStore>) -> Self {
        let email = if is_smtp_enabled(config) {
            config.smtp.clone().map(SmtpChannel::new)
        } else {
            None
        };

        Self {
            repos,
            in_app: InAppChannel::new(store),
            console: ConsoleChannel::new(),
            email,
        }
    }

    /// Channel backing a user's notification preference.
    ///
    /// An email preference without SMTP configured falls back to the console
    /// channel so the alert still lands somewhere visible.
    pub(crate) fn channel_for(&self, user: &User) -> &dyn NotificationChannel {
        match user.notification_preference {
            NotificationPreference::InApp => &self.in_app,
            NotificationPreference::Email => match &self.email {
                Some(email) => email,
                None => {
                    warn!(
                        "SMTP is not configured; delivering email alert for user {} via the console channel",
                        user.id
                    );
                    &self.console
                }
            },
            NotificationPreference::Console => &self.console,
        }
    }

    /// Fan out alerts for every threshold the stock change crossed.
    ///
    /// Deliveries are best-effort with no retry: a failed delivery is
    /// logged and must never fail the order that triggered it.
    pub async fn notify_stock_change(&self, item: &InventoryItem, change: &StockChange) {
        let thresholds = crossed_thresholds(change.previous, change.new);
        if thresholds.is_empty() {
            return;
        }

        let users = match self.repos.users.list().await {
            Ok(users) => users,
            Err(e) => {
                warn!("Skipping stock alerts, could not load users: {}", e);
                return;
            }
        };
        if users.is_empty() {
            debug!("No users to notify about stock change for item {}", item.id);
            return;
        }

        for threshold in thresholds {
            let subject = stock_alert_subject(item, threshold);
            let body = stock_alert_body(item, change, threshold);

            for user in &users {
                let message = NotificationMessage {
                    recipient_user_id: user.id,
                    recipient_email: Some(user.email.clone()),
                    subject: subject.clone(),
                    body: body.clone(),
                };

                let channel = self.channel_for(user);

                if let Err(e) = channel.deliver(message).await {
                    warn!(
                        "Failed to deliver stock alert via {} to user {}: {}",
                        channel.name(),
                        user.id,
                        e
                    );
                }
            }
        }
    }
}
