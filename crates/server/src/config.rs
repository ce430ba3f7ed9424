use shared_types::{AppConfig, FeatureFlags};
use std::sync::OnceLock;

static FLAGS: OnceLock<FeatureFlags> = OnceLock::new();

/// Path to the config file, relative to the project root.
const CONFIG_PATH: &str = "config.toml";

/// Fallback prefix for generated export files.
pub const DEFAULT_EXPORT_BASE_URL: &str = "https://example.com/exports";

/// Read `config.toml` once and cache the feature flags.
///
/// A missing or unparseable file leaves every flag off.
pub fn load_feature_flags() {
    FLAGS.get_or_init(|| match std::fs::read_to_string(CONFIG_PATH) {
        Ok(contents) => {
            let config: AppConfig = toml::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse {CONFIG_PATH}: {e}; all features off");
                AppConfig::default()
            });
            tracing::info!(enabled = ?config.features.enabled(), "Feature flags loaded");
            config.features
        }
        Err(e) => {
            tracing::info!("{CONFIG_PATH} not found ({e}); all features off");
            FeatureFlags::default()
        }
    });
}

/// Loaded feature flags, or all-off if `load_feature_flags()` never ran.
pub fn feature_flags() -> &'static FeatureFlags {
    static DEFAULT: FeatureFlags = FeatureFlags {
        s3: false,
        telemetry: false,
    };
    FLAGS.get().unwrap_or(&DEFAULT)
}

/// Process settings read from the environment at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub export_base_url: String,
}

impl ServerConfig {
    /// Build from `DATABASE_URL`, `DATABASE_MAX_CONNECTIONS` and `EXPORT_BASE_URL`.
    /// Loads `.env` first when present.
    pub fn from_env() -> Result<Self, String> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let database_url = lookup("DATABASE_URL").ok_or("DATABASE_URL must be set")?;

        let max_connections = lookup("DATABASE_MAX_CONNECTIONS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        let export_base_url = lookup("EXPORT_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_EXPORT_BASE_URL.to_string());

        Ok(Self {
            database_url,
            max_connections,
            export_base_url: export_base_url.trim_end_matches('/').to_string(),
        })
    }
}
