//! Reductions of metric series into the figures shown on the dashboard.
//!
//! All functions return `None` when there is nothing to show, so callers can
//! tell an absent or empty series apart from a real zero.

use chrono::TimeDelta;

use glance_domain::{ErrorCount, ErrorSeries, LatencySeries, MetricsBundle, VolumeSeries};

/// Key the router latency endpoint uses for the median.
pub const MEDIAN_LATENCY_KEY: &str = "latency_p50";

/// Time covered by one sparkline point.
pub const SPARKLINE_POINT_MINUTES: i64 = 180;

/// Mean latency in whole milliseconds. Uses the median series when the
/// payload carries one, otherwise every sample.
pub fn latency_ms(series: &LatencySeries) -> Option<u64> {
    let series = &series.0;
    let samples: Vec<f64> = if series.data.contains_key(MEDIAN_LATENCY_KEY) {
        series.samples(MEDIAN_LATENCY_KEY).collect()
    } else {
        series.all_samples().collect()
    };
    if samples.is_empty() {
        return None;
    }
    let mean = samples.iter().sum::<f64>() / samples.len() as f64;
    Some(mean.round().max(0.0) as u64)
}

/// Requests per minute over a window of `window_minutes`.
pub fn requests_per_minute(series: &VolumeSeries, window_minutes: i64) -> Option<u64> {
    if series.0.is_empty() || window_minutes <= 0 {
        return None;
    }
    let rate = series.0.total() / window_minutes as f64;
    Some(rate.round().max(0.0) as u64)
}

/// Summed count per label of one error series, in label order.
pub fn series_error_counts(series: &ErrorSeries) -> Vec<ErrorCount> {
    series
        .0
        .data
        .iter()
        .map(|(label, samples)| ErrorCount {
            count: samples.iter().flatten().sum::<f64>().round().max(0.0) as u64,
            label: label.clone(),
        })
        .collect()
}

/// Router errors followed by each process type's errors. Absent series add nothing.
pub fn error_counts(bundle: &MetricsBundle) -> Vec<ErrorCount> {
    bundle
        .router_errors
        .iter()
        .chain(bundle.process_errors.iter().flatten())
        .flat_map(series_error_counts)
        .collect()
}

/// Buckets of width `step` that make up one sparkline point. Steps longer
/// than a point get one bucket each.
pub fn buckets_per_point(step: TimeDelta) -> usize {
    let step = step.num_minutes();
    if step <= 0 {
        return 1;
    }
    (SPARKLINE_POINT_MINUTES / step).max(1) as usize
}

/// Volume buckets of width `step` summed across labels and grouped into
/// points of [`SPARKLINE_POINT_MINUTES`]. The trailing point covers a partial
/// period and is dropped.
pub fn sparkline_points(series: &VolumeSeries, step: TimeDelta) -> Vec<f64> {
    let per_point = buckets_per_point(step);
    let mut points: Vec<f64> = Vec::new();
    for samples in series.0.data.values() {
        for (index, sample) in samples.iter().enumerate() {
            let slot = index / per_point;
            if points.len() <= slot {
                points.resize(slot + 1, 0.0);
            }
            points[slot] += sample.unwrap_or(0.0);
        }
    }
    points.pop();
    points
}

/// Number of fields in `bundle` that came back absent.
pub fn missing_fields(bundle: &MetricsBundle) -> usize {
    let router = [
        bundle.latency.is_none(),
        bundle.router_errors.is_none(),
        bundle.router_volume.is_none(),
    ];
    bundle.process_errors.iter().filter(|slot| slot.is_none()).count()
        + router.iter().filter(|missing| **missing).count()
}
