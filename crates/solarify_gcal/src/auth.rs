// --- File: crates/solarify_gcal/src/auth.rs ---
//! Credential resolution for the calendar integration.
//!
//! Four strategies in priority order: platform connector, OAuth2 refresh
//! token, service account JWT, mock. The first strategy with a complete
//! credential set is chosen once and kept for the process lifetime; only
//! its access token is re-acquired as it nears expiry. With no usable
//! credentials every calendar operation runs in mock mode.
//!
//! Access tokens and identity tokens must never appear in logs.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use solarify_common::services::BoxFuture;
use solarify_common::HTTP_CLIENT;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{info, warn};

use crate::client::GoogleCalendarClient;

// Environment variables read during credential resolution.
pub const ENV_CONNECTORS_HOSTNAME: &str = "REPLIT_CONNECTORS_HOSTNAME";
pub const ENV_REPL_IDENTITY: &str = "REPL_IDENTITY";
pub const ENV_WEB_REPL_RENEWAL: &str = "WEB_REPL_RENEWAL";
pub const ENV_CLIENT_ID: &str = "GOOGLE_CALENDAR_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "GOOGLE_CALENDAR_CLIENT_SECRET";
pub const ENV_REFRESH_TOKEN: &str = "GOOGLE_CALENDAR_REFRESH_TOKEN";
pub const ENV_SERVICE_ACCOUNT: &str = "GOOGLE_CALENDAR_SERVICE_ACCOUNT";
pub const ENV_CALENDAR_EMAIL: &str = "GOOGLE_CALENDAR_EMAIL";

const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const CALENDAR_SCOPE: &str = "https://www.googleapis.com/auth/calendar";
/// Tokens are re-acquired this long before they would expire.
const TOKEN_EXPIRY_MARGIN_SECS: i64 = 60;
const SERVICE_ACCOUNT_ASSERTION_SECS: i64 = 3600;

/// Errors from credential resolution and calendar API calls.
#[derive(Error, Debug)]
pub enum GcalError {
    #[error("Calendar credential error: {0}")]
    Credential(String),
    #[error("HTTP error talking to Google: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Google API error (status {status}): {message}")]
    Api { status: u16, message: String },
    #[error("Failed to parse Google response: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Failed to sign service account assertion: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("Failed to parse time: {0}")]
    TimeParse(String),
}

/// Snapshot of the environment variables credential resolution reads.
///
/// Taking a snapshot keeps resolution deterministic and lets tests inject
/// arbitrary credential sets without touching the process environment.
#[derive(Debug, Clone, Default)]
pub struct CredentialEnv {
    vars: HashMap<String, String>,
}

impl CredentialEnv {
    pub fn from_process() -> Self {
        let keys = [
            ENV_CONNECTORS_HOSTNAME,
            ENV_REPL_IDENTITY,
            ENV_WEB_REPL_RENEWAL,
            ENV_CLIENT_ID,
            ENV_CLIENT_SECRET,
            ENV_REFRESH_TOKEN,
            ENV_SERVICE_ACCOUNT,
            ENV_CALENDAR_EMAIL,
        ];

        let mut vars = HashMap::new();
        for key in keys {
            if let Ok(value) = std::env::var(key) {
                if !value.is_empty() {
                    vars.insert(key.to_string(), value);
                }
            }
        }
        Self { vars }
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_string(), value.to_string());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    fn has(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }
}

/// How the active credentials were obtained.
///
/// The mode travels with the client because service-account events cannot
/// carry conferencing data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Connector,
    OauthRefresh,
    ServiceAccount,
    Mock,
}

impl AuthMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMode::Connector => "connector",
            AuthMode::OauthRefresh => "oauth_refresh",
            AuthMode::ServiceAccount => "service_account",
            AuthMode::Mock => "mock",
        }
    }
}

/// A bearer token with its expiry.
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    fn expires_soon(&self) -> bool {
        self.expires_at - Duration::seconds(TOKEN_EXPIRY_MARGIN_SECS) <= Utc::now()
    }
}

/// One way of obtaining an access token.
pub trait CredentialStrategy: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn mode(&self) -> AuthMode;

    /// Whether the environment carries this strategy's complete credential
    /// set. Must not perform any I/O.
    fn is_configured(&self, env: &CredentialEnv) -> bool;

    /// Obtain a fresh access token.
    fn acquire<'a>(&'a self, env: &'a CredentialEnv) -> BoxFuture<'a, AccessToken, GcalError>;
}

// --- Connector strategy ---

#[derive(Deserialize)]
struct ConnectorListResponse {
    items: Vec<ConnectorConnection>,
}

#[derive(Deserialize)]
struct ConnectorConnection {
    settings: Option<ConnectorSettings>,
}

#[derive(Deserialize)]
struct ConnectorSettings {
    access_token: Option<String>,
    expires_at: Option<String>,
    oauth: Option<ConnectorOauth>,
}

#[derive(Deserialize)]
struct ConnectorOauth {
    credentials: Option<ConnectorCredentials>,
}

#[derive(Deserialize)]
struct ConnectorCredentials {
    access_token: Option<String>,
    expires_at: Option<String>,
}

/// Hosted-platform connector: the platform brokers the Google connection
/// and hands out short-lived tokens over a local API.
pub struct ConnectorStrategy;

impl ConnectorStrategy {
    fn identity_token(env: &CredentialEnv) -> Result<String, GcalError> {
        if let Some(token) = env.get(ENV_REPL_IDENTITY) {
            return Ok(format!("repl {token}"));
        }
        if let Some(token) = env.get(ENV_WEB_REPL_RENEWAL) {
            return Ok(format!("depl {token}"));
        }
        Err(GcalError::Credential(
            "no identity token for the connector API".to_string(),
        ))
    }
}

impl CredentialStrategy for ConnectorStrategy {
    fn name(&self) -> &'static str {
        "connector"
    }

    fn mode(&self) -> AuthMode {
        AuthMode::Connector
    }

    fn is_configured(&self, env: &CredentialEnv) -> bool {
        env.has(ENV_CONNECTORS_HOSTNAME)
            && (env.has(ENV_REPL_IDENTITY) || env.has(ENV_WEB_REPL_RENEWAL))
    }

    fn acquire<'a>(&'a self, env: &'a CredentialEnv) -> BoxFuture<'a, AccessToken, GcalError> {
        Box::pin(async move {
            let hostname = env.get(ENV_CONNECTORS_HOSTNAME).ok_or_else(|| {
                GcalError::Credential(format!("{ENV_CONNECTORS_HOSTNAME} is not set"))
            })?;
            let identity = Self::identity_token(env)?;

            let url = format!(
                "https://{hostname}/api/v2/connection?include_secrets=true&connector_names=google-calendar"
            );
            let response = HTTP_CLIENT
                .get(&url)
                .header("Accept", "application/json")
                .header("X_REPLIT_TOKEN", identity)
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

            let parsed: ConnectorListResponse = serde_json::from_str(&body)?;
            let settings = parsed
                .items
                .into_iter()
                .next()
                .and_then(|c| c.settings)
                .ok_or_else(|| {
                    GcalError::Credential(
                        "connector API returned no google-calendar connection".to_string(),
                    )
                })?;

            let credentials = settings.oauth.and_then(|o| o.credentials);
            let token = settings
                .access_token
                .or_else(|| credentials.as_ref().and_then(|c| c.access_token.clone()))
                .ok_or_else(|| {
                    GcalError::Credential("connector connection carries no access token".to_string())
                })?;

            let expires_at = settings
                .expires_at
                .or_else(|| credentials.and_then(|c| c.expires_at))
                .and_then(|raw| DateTime::parse_from_rfc3339(&raw).ok())
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|| Utc::now() + Duration::hours(1));

            Ok(AccessToken { token, expires_at })
        })
    }
}

// --- OAuth2 refresh token strategy ---

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

/// Standard OAuth2 refresh-token exchange against Google's token endpoint.
pub struct OauthRefreshStrategy;

impl CredentialStrategy for OauthRefreshStrategy {
    fn name(&self) -> &'static str {
        "oauth_refresh"
    }

    fn mode(&self) -> AuthMode {
        AuthMode::OauthRefresh
    }

    fn is_configured(&self, env: &CredentialEnv) -> bool {
        env.has(ENV_CLIENT_ID) && env.has(ENV_CLIENT_SECRET) && env.has(ENV_REFRESH_TOKEN)
    }

    fn acquire<'a>(&'a self, env: &'a CredentialEnv) -> BoxFuture<'a, AccessToken, GcalError> {
        Box::pin(async move {
            let client_id = env
                .get(ENV_CLIENT_ID)
                .ok_or_else(|| GcalError::Credential(format!("{ENV_CLIENT_ID} is not set")))?;
            let client_secret = env
                .get(ENV_CLIENT_SECRET)
                .ok_or_else(|| GcalError::Credential(format!("{ENV_CLIENT_SECRET} is not set")))?;
            let refresh_token = env
                .get(ENV_REFRESH_TOKEN)
                .ok_or_else(|| GcalError::Credential(format!("{ENV_REFRESH_TOKEN} is not set")))?;

            let form = [
                ("client_id", client_id),
                ("client_secret", client_secret),
                ("refresh_token", refresh_token),
                ("grant_type", "refresh_token"),
            ];
            let response = HTTP_CLIENT.post(GOOGLE_TOKEN_URL).form(&form).send().await?;

            let status = response.status();
            let body = response.text().await?;
            if !status.is_success() {
                return Err(GcalError::Api {
                    status: status.as_u16(),
                    message: body,
                });
            }

            let parsed: TokenResponse = serde_json::from_str(&body)?;
            Ok(AccessToken {
                token: parsed.access_token,
                expires_at: Utc::now() + Duration::seconds(parsed.expires_in),
            })
        })
    }
}

// --- Service account strategy ---

#[derive(Deserialize)]
struct ServiceAccountKey {
    client_email: String,
    private_key: String,
    token_uri: Option<String>,
}

#[derive(Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

/// Google service account: a signed RS256 assertion is exchanged for an
/// access token. The key JSON may be given raw or base64 encoded.
pub struct ServiceAccountStrategy;

impl ServiceAccountStrategy {
    fn parse_key(raw: &str) -> Result<ServiceAccountKey, GcalError> {
        if let Ok(key) = serde_json::from_str::<ServiceAccountKey>(raw) {
            return Ok(key);
        }

        use base64::Engine as _;
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(raw.trim())
            .map_err(|e| {
                GcalError::Credential(format!("service account key is neither JSON nor base64: {e}"))
            })?;
        serde_json::from_slice(&decoded).map_err(GcalError::Parse)
    }
}

impl CredentialStrategy for ServiceAccountStrategy {
    fn name(&self) -> &'static str {
        "service_account"
    }

    fn mode(&self) -> AuthMode {
        AuthMode::ServiceAccount
    }

    fn is_configured(&self, env: &CredentialEnv) -> bool {
        env.has(ENV_SERVICE_ACCOUNT)
    }

    fn acquire<'a>(&'a self, env: &'a CredentialEnv) -> BoxFuture<'a, AccessToken, GcalError> {
        Box::pin(async move {
            let raw = env
                .get(ENV_SERVICE_ACCOUNT)
                .ok_or_else(|| GcalError::Credential(format!("{ENV_SERVICE_ACCOUNT} is not set")))?;
            let key = Self::parse_key(raw)?;
            let token_uri = key.token_uri.as_deref().unwrap_or(GOOGLE_TOKEN_URL);

            let now = Utc::now().timestamp();
            let claims = AssertionClaims {
                iss: &key.client_email,
                scope: CALENDAR_SCOPE,
                aud: token_uri,
                iat: now,
                exp: now + SERVICE_ACCOUNT_ASSERTION_SECS,
            };
            let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())?;
            let assertion = jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)?;

            let form = [
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", assertion.as_str()),
            ];
            let response = HTTP_CLIENT.post(token_uri).form(&form).send().await?;

            let status = response.status();
            let body = response.text().await?;
            if !status.is_success() {
                return Err(GcalError::Api {
                    status: status.as_u16(),
                    message: body,
                });
            }

            let parsed: TokenResponse = serde_json::from_str(&body)?;
            Ok(AccessToken {
                token: parsed.access_token,
                expires_at: Utc::now() + Duration::seconds(parsed.expires_in),
            })
        })
    }
}

/// The auth mode credential selection would pick for this environment:
/// the first strategy with a complete credential set, mock otherwise.
pub fn select_auth_mode(env: &CredentialEnv) -> AuthMode {
    for strategy in default_strategies() {
        if strategy.is_configured(env) {
            return strategy.mode();
        }
    }
    AuthMode::Mock
}

fn default_strategies() -> Vec<Box<dyn CredentialStrategy>> {
    vec![
        Box::new(ConnectorStrategy),
        Box::new(OauthRefreshStrategy),
        Box::new(ServiceAccountStrategy),
    ]
}

enum ResolverState {
    Unresolved,
    Mock,
    Chosen { index: usize, token: AccessToken },
}

/// Process-wide calendar credential resolver.
///
/// The strategy choice is sticky: once a strategy has produced a token it
/// stays selected, and mock mode, once entered, is never left. The lock is
/// held across token acquisition so concurrent callers do not race a
/// refresh.
pub struct CalendarAccess {
    env: CredentialEnv,
    calendar_id: String,
    strategies: Vec<Box<dyn CredentialStrategy>>,
    state: tokio::sync::Mutex<ResolverState>,
}

impl CalendarAccess {
    pub fn new(env: CredentialEnv, calendar_id: String) -> Self {
        Self {
            env,
            calendar_id,
            strategies: default_strategies(),
            state: tokio::sync::Mutex::new(ResolverState::Unresolved),
        }
    }

    /// The customer-facing calendar owner address, when configured.
    pub fn calendar_email(&self) -> Option<&str> {
        self.env.get(ENV_CALENDAR_EMAIL)
    }

    /// A client for the active credentials, or `None` in mock mode.
    ///
    /// Callers getting `None` must simulate the calendar operation. An
    /// error means a previously working strategy failed to refresh its
    /// token; the strategy stays selected and the next call retries.
    pub async fn client(&self) -> Result<Option<GoogleCalendarClient>, GcalError> {
        let mut state = self.state.lock().await;

        match &mut *state {
            ResolverState::Mock => return Ok(None),
            ResolverState::Chosen { index, token } => {
                if token.expires_soon() {
                    let strategy = &self.strategies[*index];
                    let fresh = strategy.acquire(&self.env).await.map_err(|e| {
                        warn!(
                            "Could not refresh calendar token via {}: {}",
                            strategy.name(),
                            e
                        );
                        e
                    })?;
                    *token = fresh;
                }
                let mode = self.strategies[*index].mode();
                return Ok(Some(GoogleCalendarClient::new(
                    token.token.clone(),
                    self.calendar_id.clone(),
                    mode,
                )));
            }
            ResolverState::Unresolved => {}
        }

        // First use: walk the configured strategies in priority order.
        for (index, strategy) in self.strategies.iter().enumerate() {
            if !strategy.is_configured(&self.env) {
                continue;
            }
            match strategy.acquire(&self.env).await {
                Ok(token) => {
                    info!("Calendar auth using {} credentials", strategy.name());
                    let client = GoogleCalendarClient::new(
                        token.token.clone(),
                        self.calendar_id.clone(),
                        strategy.mode(),
                    );
                    *state = ResolverState::Chosen { index, token };
                    return Ok(Some(client));
                }
                Err(e) => {
                    warn!(
                        "Calendar credential strategy {} failed: {}",
                        strategy.name(),
                        e
                    );
                }
            }
        }

        warn!("No usable Google Calendar credentials, calendar operations run in mock mode");
        *state = ResolverState::Mock;
        Ok(None)
    }
}
