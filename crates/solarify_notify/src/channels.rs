// --- File: crates/solarify_notify/src/channels.rs ---
//! Delivery channel implementations.
//!
//! Three channels back the user notification preferences: the in-app inbox,
//! SMTP email via lettre, and a console channel that just logs. The SMTP
//! password is read from the `SMTP_PASSWORD` environment variable at send
//! time and never stored in configuration.

use crate::alerts::AlertStore;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use solarify_common::services::{
    BoxFuture, BoxedError, NotificationChannel, NotificationMessage, NotificationResult,
};
use solarify_config::SmtpConfig;
use std::sync::Arc;
use tracing::info;

/// Environment variable holding the SMTP password.
pub const SMTP_PASSWORD_ENV: &str = "SMTP_PASSWORD";

// --- In-app channel ---

pub struct InAppChannel {
    store: Arc<AlertStore>,
}

impl InAppChannel {
    pub fn new(store: Arc<AlertStore>) -> Self {
        Self { store }
    }
}

impl NotificationChannel for InAppChannel {
    fn name(&self) -> &'static str {
        "in_app"
    }

    fn deliver(
        &self,
        message: NotificationMessage,
    ) -> BoxFuture<'_, NotificationResult, BoxedError> {
        Box::pin(async move {
            let alert = self
                .store
                .add(message.recipient_user_id, &message.subject, &message.body);

            Ok(NotificationResult {
                id: Some(alert.id),
                status: "stored".to_string(),
            })
        })
    }
}

// --- Email channel ---

pub struct SmtpChannel {
    config: SmtpConfig,
}

impl SmtpChannel {
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    async fn send_mail(&self, message: &NotificationMessage) -> Result<(), BoxedError> {
        let recipient = message
            .recipient_email
            .as_deref()
            .ok_or_else(|| BoxedError::from("recipient has no email address".to_string()))?;

        let email = Message::builder()
            .from(
                self.config
                    .from
                    .parse()
                    .map_err(|e| BoxedError(Box::new(e)))?,
            )
            .to(recipient.parse().map_err(|e| BoxedError(Box::new(e)))?)
            .subject(&message.subject)
            .body(message.body.clone())
            .map_err(|e| BoxedError(Box::new(e)))?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.host)
            .map_err(|e| BoxedError(Box::new(e)))?;
        if let Some(port) = self.config.port {
            builder = builder.port(port);
        }
        if let (Some(username), Ok(password)) = (
            self.config.username.clone(),
            std::env::var(SMTP_PASSWORD_ENV),
        ) {
            builder = builder.credentials(Credentials::new(username, password));
        }

        let mailer = builder.build();
        mailer
            .send(email)
            .await
            .map_err(|e| BoxedError(Box::new(e)))?;

        Ok(())
    }
}

impl NotificationChannel for SmtpChannel {
    fn name(&self) -> &'static str {
        "email"
    }

    fn deliver(
        &self,
        message: NotificationMessage,
    ) -> BoxFuture<'_, NotificationResult, BoxedError> {
        Box::pin(async move {
            self.send_mail(&message).await?;

            Ok(NotificationResult {
                id: None,
                status: "sent".to_string(),
            })
        })
    }
}

// --- Console channel ---

/// Fallback channel that writes the notification to the log. Also used when
/// email is requested but SMTP is not configured.
#[derive(Default)]
pub struct ConsoleChannel;

impl ConsoleChannel {
    pub fn new() -> Self {
        Self
    }
}

impl NotificationChannel for ConsoleChannel {
    fn name(&self) -> &'static str {
        "console"
    }

    fn deliver(
        &self,
        message: NotificationMessage,
    ) -> BoxFuture<'_, NotificationResult, BoxedError> {
        Box::pin(async move {
            info!(
                user_id = message.recipient_user_id,
                subject = %message.subject,
                "{}",
                message.body
            );

            Ok(NotificationResult {
                id: None,
                status: "logged".to_string(),
            })
        })
    }
}
