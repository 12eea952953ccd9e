// --- File: crates/slotsync_config/src/lib.rs ---

pub mod models;

pub use models::{
    AppConfig, DatabaseConfig, EngineConfig, GcalConfig, RetryConfig, ServerConfig,
};

use config::{Config, ConfigError, Environment, File};
use std::sync::Once;
use tracing::debug;

static DOTENV: Once = Once::new();

/// Load `.env` exactly once per process; later calls are no-ops.
pub fn ensure_dotenv_loaded() {
    DOTENV.call_once(|| {
        if dotenv::dotenv().is_ok() {
            debug!("Loaded environment overrides from .env");
        }
    });
}

/// Loads the application configuration.
///
/// Sources, in override order: `config/default.{toml,yaml,...}`, an optional
/// `config/{RUN_ENV}` file, then `APP_*` environment variables using `__` as
/// the section separator (e.g. `APP_DATABASE__URL`, `APP_SERVER__PORT`).
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".into());

    Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{}", run_env)).required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 8086)?
        .build()?
        .try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_any_config_file() {
        let config = load_config().expect("default config should load");
        assert_eq!(config.engine.day_offset_hours, 0);
        assert_eq!(config.engine.min_gap_minutes, None);
        assert_eq!(config.engine.retry.max_attempts, 3);
    }

    #[test]
    fn engine_defaults_deserialize_from_empty_section() {
        let engine: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(engine.fetch_timeout_secs, 30);
        assert_eq!(engine.retry.backoff_ms, 500);
    }
}
