//! Time-series payloads returned by the metrics host and the per-app bundle
//! that groups them.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Bucketed samples keyed by label (status code, metric name, ...).
///
/// Upstream fills missing buckets with `null`; those samples are skipped by
/// every aggregate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    #[serde(default)]
    pub data: BTreeMap<String, Vec<Option<f64>>>,
}

impl Series {
    pub fn is_empty(&self) -> bool {
        self.data.values().all(|samples| samples.iter().all(Option::is_none))
    }

    pub fn samples(&self, key: &str) -> impl Iterator<Item = f64> + '_ {
        self.data
            .get(key)
            .into_iter()
            .flat_map(|samples| samples.iter().flatten().copied())
    }

    pub fn all_samples(&self) -> impl Iterator<Item = f64> + '_ {
        self.data
            .values()
            .flat_map(|samples| samples.iter().flatten().copied())
    }

    pub fn total(&self) -> f64 {
        self.all_samples().sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorSeries(pub Series);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LatencySeries(pub Series);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VolumeSeries(pub Series);

/// Summed error count for one label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorCount {
    pub count: u64,
    pub label: String,
}

/// Every field is independently optional. `None` means the fetch failed or
/// was skipped, which is not the same as a series of zeros.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsBundle {
    /// One slot per distinct process type, in formation order.
    pub process_errors: Vec<Option<ErrorSeries>>,
    pub latency: Option<LatencySeries>,
    pub router_errors: Option<ErrorSeries>,
    pub router_volume: Option<VolumeSeries>,
}

/// Trailing query window shared by every metrics call of one collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(rename = "step_seconds", with = "step_seconds")]
    pub step: TimeDelta,
}

mod step_seconds {
    use chrono::TimeDelta;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(step: &TimeDelta, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(step.num_seconds())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TimeDelta, D::Error> {
        i64::deserialize(deserializer).map(TimeDelta::seconds)
    }
}

impl TimeWindow {
    pub fn trailing(end: DateTime<Utc>, length: TimeDelta, step: TimeDelta) -> Self {
        Self {
            start: end - length,
            end,
            step,
        }
    }

    pub fn minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Step rendered the way the metrics API expects it (`1h`, `30m`, `45s`).
    pub fn step_param(&self) -> String {
        let secs = self.step.num_seconds();
        if secs > 0 && secs % 3600 == 0 {
            format!("{}h", secs / 3600)
        } else if secs > 0 && secs % 60 == 0 {
            format!("{}m", secs / 60)
        } else {
            format!("{secs}s")
        }
    }

    pub fn query(&self) -> Vec<(String, String)> {
        vec![
            ("start_time".to_string(), timestamp(self.start)),
            ("end_time".to_string(), timestamp(self.end)),
            ("step".to_string(), self.step_param()),
        ]
    }
}

/// Millisecond precision with a `Z` suffix, e.g. `2024-05-01T12:00:00.000Z`.
fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
