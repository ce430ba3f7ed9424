use serde::{Deserialize, Serialize};

/// Optional integrations, read from the `[features]` table of `config.toml`.
/// Anything missing stays off.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FeatureFlags {
    /// Store school logos in S3-compatible object storage.
    #[serde(default)]
    pub s3: bool,
    /// Export traces and logs over OTLP.
    #[serde(default)]
    pub telemetry: bool,
}

impl FeatureFlags {
    /// Names of the switched-on integrations, for the startup log.
    pub fn enabled(&self) -> Vec<&'static str> {
        [("s3", self.s3), ("telemetry", self.telemetry)]
            .into_iter()
            .filter_map(|(name, on)| on.then_some(name))
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub features: FeatureFlags,
}
