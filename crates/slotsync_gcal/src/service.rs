// --- File: crates/slotsync_gcal/src/service.rs ---
//! Google Calendar busy-interval provider.
//!
//! Talks to the freeBusy endpoint of the Calendar REST API with each
//! participant's own OAuth access token. Malformed busy periods in the
//! response are skipped and logged, never fatal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use slotsync_common::{
    BoxFuture, BoxedError, BusyInterval, CalendarProvider, ParticipantCredential, RetryPolicy,
    HTTP_CLIENT,
};
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, info};

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/calendar/v3";

/// Errors that can occur when querying Google Calendar.
#[derive(Error, Debug)]
pub enum GcalProviderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Calendar API returned status {status}: {message}")]
    Api { status: u16, message: String },
    #[error("freeBusy response missing calendar {0}")]
    MissingCalendar(String),
}

// --- freeBusy wire format ---

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FreeBusyRequest {
    time_min: DateTime<Utc>,
    time_max: DateTime<Utc>,
    time_zone: &'static str,
    items: Vec<FreeBusyRequestItem>,
}

#[derive(Serialize)]
struct FreeBusyRequestItem {
    id: String,
}

#[derive(Deserialize)]
struct FreeBusyResponse {
    #[serde(default)]
    calendars: HashMap<String, CalendarBusy>,
}

#[derive(Deserialize)]
struct CalendarBusy {
    #[serde(default)]
    busy: Vec<BusyPeriod>,
}

#[derive(Deserialize)]
struct BusyPeriod {
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
}

/// Busy-interval provider backed by the Google Calendar freeBusy API.
pub struct GcalBusyProvider {
    client: reqwest::Client,
    base_url: String,
    retry: RetryPolicy,
}

impl GcalBusyProvider {
    pub fn new(base_url: Option<String>, retry: RetryPolicy) -> Self {
        Self {
            client: HTTP_CLIENT.clone(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            retry,
        }
    }

    /// Build from the gcal config section.
    pub fn from_config(config: &slotsync_config::GcalConfig, retry: RetryPolicy) -> Self {
        Self::new(config.base_url.clone(), retry)
    }

    async fn query_free_busy(
        &self,
        credential: &ParticipantCredential,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> Result<Vec<BusyInterval>, GcalProviderError> {
        let request = FreeBusyRequest {
            time_min,
            time_max,
            time_zone: "UTC",
            items: vec![FreeBusyRequestItem {
                id: credential.calendar_id.clone(),
            }],
        };

        let response = self
            .client
            .post(format!("{}/freeBusy", self.base_url))
            .bearer_auth(credential.access_token.as_deref().unwrap_or_default())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GcalProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: FreeBusyResponse = response.json().await?;
        let calendar = body
            .calendars
            .get(&credential.calendar_id)
            .ok_or_else(|| GcalProviderError::MissingCalendar(credential.calendar_id.clone()))?;

        Ok(collect_busy_intervals(&credential.user_id, &calendar.busy))
    }
}

/// Convert the wire periods to owned busy intervals, dropping periods with a
/// missing start or end.
fn collect_busy_intervals(owner_id: &str, periods: &[BusyPeriod]) -> Vec<BusyInterval> {
    let mut intervals = Vec::with_capacity(periods.len());
    for period in periods {
        match (period.start, period.end) {
            (Some(start), Some(end)) => intervals.push(BusyInterval {
                start,
                end,
                owner_id: owner_id.to_string(),
            }),
            _ => {
                info!(
                    "Skipping busy period with missing start/end for {}",
                    owner_id
                );
            }
        }
    }
    intervals
}

impl CalendarProvider for GcalBusyProvider {
    type Error = BoxedError;

    fn list_busy_intervals(
        &self,
        credential: &ParticipantCredential,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<BusyInterval>, Self::Error> {
        let credential = credential.clone();

        Box::pin(async move {
            debug!(
                "Fetching busy intervals for {} ({} - {})",
                credential.user_id, window_start, window_end
            );
            let intervals = self
                .retry
                .run("freeBusy query", || {
                    self.query_free_busy(&credential, window_start, window_end)
                })
                .await
                .map_err(BoxedError::new)?;
            debug!(
                "Participant {} has {} busy intervals in range",
                credential.user_id,
                intervals.len()
            );
            Ok(intervals)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn period(start: Option<&str>, end: Option<&str>) -> BusyPeriod {
        let parse = |s: &str| {
            DateTime::parse_from_rfc3339(s)
                .unwrap()
                .with_timezone(&Utc)
        };
        BusyPeriod {
            start: start.map(parse),
            end: end.map(parse),
        }
    }

    #[test]
    fn collects_well_formed_periods() {
        let periods = vec![
            period(Some("2025-04-13T09:00:00Z"), Some("2025-04-13T10:00:00Z")),
            period(Some("2025-04-13T11:00:00Z"), Some("2025-04-13T12:30:00Z")),
        ];
        let intervals = collect_busy_intervals("alice", &periods);
        assert_eq!(intervals.len(), 2);
        assert_eq!(intervals[0].owner_id, "alice");
        assert_eq!(
            intervals[0].start,
            Utc.with_ymd_and_hms(2025, 4, 13, 9, 0, 0).unwrap()
        );
    }

    #[test]
    fn skips_periods_with_missing_bounds() {
        let periods = vec![
            period(Some("2025-04-13T09:00:00Z"), None),
            period(None, Some("2025-04-13T10:00:00Z")),
            period(None, None),
            period(Some("2025-04-13T14:00:00Z"), Some("2025-04-13T15:00:00Z")),
        ];
        let intervals = collect_busy_intervals("bob", &periods);
        assert_eq!(intervals.len(), 1);
        assert_eq!(
            intervals[0].end,
            Utc.with_ymd_and_hms(2025, 4, 13, 15, 0, 0).unwrap()
        );
    }

    #[test]
    fn free_busy_response_deserializes() {
        let json = r#"{
            "kind": "calendar#freeBusy",
            "calendars": {
                "primary": {
                    "busy": [
                        {"start": "2025-04-13T18:00:00Z", "end": "2025-04-14T11:40:00Z"}
                    ]
                }
            }
        }"#;
        let parsed: FreeBusyResponse = serde_json::from_str(json).unwrap();
        let busy = &parsed.calendars["primary"].busy;
        assert_eq!(busy.len(), 1);
        assert!(busy[0].start.is_some() && busy[0].end.is_some());
    }

    #[test]
    fn free_busy_request_serializes_camel_case() {
        let request = FreeBusyRequest {
            time_min: Utc.with_ymd_and_hms(2025, 4, 13, 0, 0, 0).unwrap(),
            time_max: Utc.with_ymd_and_hms(2025, 4, 15, 0, 0, 0).unwrap(),
            time_zone: "UTC",
            items: vec![FreeBusyRequestItem {
                id: "primary".to_string(),
            }],
        };
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("timeMin").is_some());
        assert!(value.get("timeMax").is_some());
        assert_eq!(value["items"][0]["id"], "primary");
    }
}
