use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::PathBuf;
use tracing::debug;
pub mod models;
pub use models::*;

/// Loads the layered application configuration.
///
/// Sources, later ones overriding earlier ones:
/// 1. `config/default` (any extension the `config` crate understands)
/// 2. `config/{RUN_ENV}` (RUN_ENV defaults to `debug`)
/// 3. Environment variables with the `SOLARIFY` prefix and `__` separator,
///    e.g. `SOLARIFY_SERVER__PORT=8086`.
///
/// Secrets (calendar credentials, SMTP password) never live in config files;
/// they are read from their well-known env var names at point of use.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let prefix = env::var("PREFIX").unwrap_or_else(|_| "SOLARIFY".to_string());

    let config_root = workspace_root();
    let default_path = config_root.join("config/default");
    let env_path = config_root.join(format!("config/{}", run_env));

    debug!(
        default = %default_path.display(),
        env = %env_path.display(),
        "loading configuration"
    );

    let builder = Config::builder()
        .add_source(File::with_name(&default_path.to_string_lossy()).required(false))
        .add_source(File::with_name(&env_path.to_string_lossy()).required(false))
        .add_source(Environment::with_prefix(&prefix).separator("__"));

    builder.build()?.try_deserialize()
}

// Under `cargo run` the manifest dir points at the invoking crate; two levels
// up is the workspace root. Deployed binaries fall back to the working dir.
fn workspace_root() -> PathBuf {
    env::var("CARGO_MANIFEST_DIR")
        .ok()
        .map(PathBuf::from)
        .and_then(|dir| dir.ancestors().nth(2).map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures the dotenv file is loaded into the environment exactly once.
///
/// The path can be overridden with `DOTENV_OVERRIDE` or a leading `.env*`
/// command line argument; otherwise `.env` in the working directory is used.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path_override = std::env::var("DOTENV_OVERRIDE").ok();
    let dotenv_path_arg = env::args().nth(1).filter(|s| s.starts_with(".env"));

    let dotenv_path = dotenv_path_override
        .or(dotenv_path_arg)
        .unwrap_or_else(|| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_defaults_flags_off() {
        let config: AppConfig = serde_json::from_str(
            r#"{
                "server": {"host": "127.0.0.1", "port": 8086},
                "database": {"url": "sqlite:solarify.db"}
            }"#,
        )
        .unwrap();

        assert!(!config.use_gcal);
        assert!(!config.use_smtp);
        assert!(config.gcal.is_none());
        assert!(config.smtp.is_none());
        assert!(config.session.is_none());
        assert_eq!(config.database.max_connections, None);
    }

    #[test]
    fn feature_sections_deserialize() {
        let config: AppConfig = serde_json::from_str(
            r#"{
                "server": {"host": "0.0.0.0", "port": 8086},
                "database": {"url": "sqlite:solarify.db", "max_connections": 8},
                "use_gcal": true,
                "gcal": {"calendar_id": "ops@example.com", "time_zone": "America/New_York"},
                "use_smtp": true,
                "smtp": {"host": "smtp.example.com", "from": "alerts@example.com"},
                "session": {"ttl_minutes": 60}
            }"#,
        )
        .unwrap();

        assert!(config.use_gcal);
        let gcal = config.gcal.expect("gcal section");
        assert_eq!(gcal.calendar_id.as_deref(), Some("ops@example.com"));
        let smtp = config.smtp.expect("smtp section");
        assert_eq!(smtp.port, None);
        assert_eq!(config.session.unwrap().ttl_minutes, Some(60));
    }
}
