// --- File: crates/services/slotsync_backend/src/app_state.rs ---
//! Shared state wired at startup and handed to every route.

use crate::notifier::BroadcastNotifier;
use chrono::{Duration as ChronoDuration, FixedOffset};
use slotsync_common::{BoxedError, CalendarProvider, RetryPolicy};
use slotsync_config::AppConfig;
use slotsync_db::{init_schema, DbClient, DbError, SqlGroupRepository, SqlSlotStore};
use slotsync_engine::{AvailabilityCoordinator, CoordinatorSettings, GapPolicy};
use slotsync_gcal::GcalBusyProvider;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors that can abort startup wiring.
#[derive(Debug, Error)]
pub enum AppStateError {
    /// The configured day offset does not denote a real UTC offset.
    #[error("invalid engine.day_offset_hours: {0} (must be between -23 and 23)")]
    InvalidDayOffset(i32),
    #[error(transparent)]
    Db(#[from] DbError),
}

/// Application state shared across all routes.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db_client: DbClient,
    pub groups: Arc<SqlGroupRepository>,
    pub coordinator: Arc<AvailabilityCoordinator>,
    pub slots: Arc<SqlSlotStore>,
    pub notifier: Arc<BroadcastNotifier>,
}

impl AppState {
    /// Wire the full production stack: database-backed group repository and
    /// slot store, the Google Calendar busy provider, and a broadcast
    /// notifier.
    pub async fn new(config: Arc<AppConfig>) -> Result<Self, AppStateError> {
        let db_client = DbClient::new(&config).await?;
        let retry = RetryPolicy::new(
            config.engine.retry.max_attempts,
            Duration::from_millis(config.engine.retry.backoff_ms),
        );
        let provider = Arc::new(GcalBusyProvider::from_config(&config.gcal, retry));
        Self::with_provider(config, db_client, provider).await
    }

    /// Wire the state around an injected calendar provider, used by tests to
    /// substitute a scripted provider for the real API.
    pub async fn with_provider(
        config: Arc<AppConfig>,
        db_client: DbClient,
        provider: Arc<dyn CalendarProvider<Error = BoxedError>>,
    ) -> Result<Self, AppStateError> {
        let settings = coordinator_settings(&config)?;

        init_schema(&db_client).await?;

        let groups = Arc::new(SqlGroupRepository::new(db_client.clone()));
        let slots = Arc::new(SqlSlotStore::new(db_client.clone()));
        let notifier = Arc::new(BroadcastNotifier::default());

        let coordinator = Arc::new(AvailabilityCoordinator::new(
            groups.clone(),
            provider,
            slots.clone(),
            notifier.clone(),
            settings,
        ));

        Ok(Self {
            config,
            db_client,
            groups,
            coordinator,
            slots,
            notifier,
        })
    }
}

fn coordinator_settings(config: &AppConfig) -> Result<CoordinatorSettings, AppStateError> {
    let gap_policy = match config.engine.min_gap_minutes {
        Some(minutes) => GapPolicy::with_min_duration(ChronoDuration::minutes(minutes)),
        None => GapPolicy::emit_all(),
    };
    let hours = config.engine.day_offset_hours;
    let day_offset = FixedOffset::east_opt(hours.saturating_mul(3600))
        .ok_or(AppStateError::InvalidDayOffset(hours))?;

    Ok(CoordinatorSettings {
        gap_policy,
        day_offset,
        fetch_timeout: Duration::from_secs(config.engine.fetch_timeout_secs),
    })
}
