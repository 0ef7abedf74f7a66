use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Database Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub url: String, // e.g. DATABASE_URL loaded via SOLARIFY_DATABASE__URL
    pub max_connections: Option<u32>,
}

// --- Google Calendar Config ---
// Holds non-secret calendar config. Credentials are loaded directly from
// env vars at strategy-resolution time:
//   REPLIT_CONNECTORS_HOSTNAME (+ REPL_IDENTITY / WEB_REPL_RENEWAL)
//   GOOGLE_CALENDAR_CLIENT_ID / GOOGLE_CALENDAR_CLIENT_SECRET / GOOGLE_CALENDAR_REFRESH_TOKEN
//   GOOGLE_CALENDAR_SERVICE_ACCOUNT
//   GOOGLE_CALENDAR_EMAIL
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct GcalConfig {
    pub calendar_id: Option<String>, // defaults to "primary"
    pub time_zone: Option<String>,   // IANA name for business hours
}

// --- SMTP Config ---
// Holds non-secret SMTP config. Password loaded directly from env var: SMTP_PASSWORD
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: Option<u16>, // defaults to 587
    pub username: Option<String>,
    pub from: String, // sender address on alert mails
}

// --- Session Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct SessionConfig {
    pub cookie_name: Option<String>, // defaults to "solarify_session"
    pub ttl_minutes: Option<i64>,    // defaults to 7 days
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,
    // So is the database: every feature router reads or writes relational state
    pub database: DatabaseConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_gcal: bool,
    #[serde(default)]
    pub use_smtp: bool,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub gcal: Option<GcalConfig>,
    #[serde(default)]
    pub smtp: Option<SmtpConfig>,
    #[serde(default)]
    pub session: Option<SessionConfig>,
}
