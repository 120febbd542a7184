use config::{Config, ConfigError, File as ConfigFile};
use serde::Deserialize;

fn default_full_hash_algorithm() -> String {
    "sha512".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Tree to pull unsorted photos from.
    pub source_dir: String,
    /// Root of the date-partitioned output tree.
    pub dest_dir: String,
    /// Glob patterns excluded from the source scan and the rescan.
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
    /// Digest used for the full-content tier (`sha1`, `sha512` or `md5`).
    #[serde(default = "default_full_hash_algorithm")]
    pub full_hash_algorithm: String,
}

pub fn load_configuration() -> Result<AppConfig, ConfigError> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name("Config").required(false))
        .build()?;
    builder.try_deserialize::<AppConfig>()
}
