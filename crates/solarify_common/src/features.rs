//! Feature flag handling for the Solarify application.
//!
//! Features are gated twice: compile-time cargo features select which
//! routers get linked into the backend, and runtime configuration decides
//! whether a compiled feature is actually active. A feature counts as
//! enabled only when its `use_*` flag is set and its config section exists.

use solarify_config::AppConfig;
use std::sync::Arc;

/// Check if a feature is enabled at runtime based on configuration.
///
/// # Arguments
///
/// * `config` - The application configuration
/// * `use_feature` - The configuration flag that enables the feature
/// * `feature_config` - The configuration section for the feature
///
/// # Returns
///
/// `true` if the feature is enabled, `false` otherwise
pub fn is_feature_enabled<T>(
    _config: &Arc<AppConfig>,
    use_feature: bool,
    feature_config: Option<&T>,
) -> bool {
    use_feature && feature_config.is_some()
}

/// Check if the Google Calendar booking feature is enabled at runtime.
#[cfg(feature = "gcal")]
pub fn is_gcal_enabled(config: &Arc<AppConfig>) -> bool {
    is_feature_enabled(config, config.use_gcal, config.gcal.as_ref())
}

/// Check if SMTP email notifications are enabled at runtime.
#[cfg(feature = "smtp")]
pub fn is_smtp_enabled(config: &Arc<AppConfig>) -> bool {
    is_feature_enabled(config, config.use_smtp, config.smtp.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use solarify_config::{DatabaseConfig, GcalConfig, ServerConfig};

    fn test_config(use_gcal: bool, gcal: Option<GcalConfig>) -> Arc<AppConfig> {
        Arc::new(AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8086,
            },
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: None,
            },
            use_gcal,
            use_smtp: false,
            gcal,
            smtp: None,
            session: None,
        })
    }

    #[test]
    fn feature_needs_both_flag_and_section() {
        let flag_only = test_config(true, None);
        assert!(!is_feature_enabled(
            &flag_only,
            flag_only.use_gcal,
            flag_only.gcal.as_ref()
        ));

        let section_only = test_config(false, Some(GcalConfig::default()));
        assert!(!is_feature_enabled(
            &section_only,
            section_only.use_gcal,
            section_only.gcal.as_ref()
        ));

        let both = test_config(true, Some(GcalConfig::default()));
        assert!(is_feature_enabled(&both, both.use_gcal, both.gcal.as_ref()));
    }
}
