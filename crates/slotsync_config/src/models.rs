// --- File: crates/slotsync_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Database Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub url: String, // e.g. DATABASE_URL loaded via APP_DATABASE__URL
}

// --- Retry Config ---
// Bounded retry for transient collaborator failures; passed into the
// provider implementations, never into the engine itself.
#[derive(Debug, Deserialize, Serialize, Clone, Copy)]
pub struct RetryConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            backoff_ms: default_backoff_ms(),
        }
    }
}

fn default_max_attempts() -> u32 {
    3
}

fn default_backoff_ms() -> u64 {
    500
}

// --- Availability Engine Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EngineConfig {
    /// Fixed UTC offset (whole hours) used for day-boundary arithmetic.
    /// The system does not support per-user timezones.
    #[serde(default)]
    pub day_offset_hours: i32,
    /// Optional minimum gap length in minutes. When unset, every gap is
    /// emitted regardless of length.
    #[serde(default)]
    pub min_gap_minutes: Option<i64>,
    /// Per-participant fetch timeout; a timed-out participant contributes
    /// zero busy intervals.
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
    #[serde(default)]
    pub retry: RetryConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            day_offset_hours: 0,
            min_gap_minutes: None,
            fetch_timeout_secs: default_fetch_timeout_secs(),
            retry: RetryConfig::default(),
        }
    }
}

fn default_fetch_timeout_secs() -> u64 {
    30
}

// --- Google Calendar Provider Config ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct GcalConfig {
    /// Override for the Calendar API base URL, used by tests to point the
    /// provider at a local stub.
    pub base_url: Option<String>,
    // Participant OAuth tokens live in the group store, not here.
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub gcal: GcalConfig,
}
