use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use tracing::debug;

use glance_domain::{
    EnrichedApp, ErrorSeries, LatencySeries, MetricsBundle, MetricsConfig, TimeWindow,
    VolumeSeries,
};
use glance_ports::{ApiHost, ApiPort, EndpointSpec, fetch};

use crate::fanout::{settle, settle_all};

/// Fetches the trailing-window metrics of enriched apps.
///
/// Every call is tolerated on its own: a failure empties exactly one field of
/// one bundle.
#[derive(Clone)]
pub struct MetricsCollector {
    api: Arc<dyn ApiPort>,
    config: MetricsConfig,
}

impl MetricsCollector {
    pub fn new(api: Arc<dyn ApiPort>, config: MetricsConfig) -> Self {
        Self { api, config }
    }

    fn window_ending(&self, end: DateTime<Utc>) -> TimeWindow {
        TimeWindow::trailing(end, self.config.window(), self.config.step())
    }

    /// One bundle per app, in the same order, over the window ending now.
    /// The window is returned with the bundles.
    pub async fn collect(&self, apps: &[EnrichedApp]) -> (TimeWindow, Vec<MetricsBundle>) {
        let window = self.window_ending(Utc::now());
        let bundles = self.collect_within(apps, &window).await;
        (window, bundles)
    }

    pub async fn collect_within(
        &self,
        apps: &[EnrichedApp],
        window: &TimeWindow,
    ) -> Vec<MetricsBundle> {
        join_all(apps.iter().map(|app| self.collect_app(app, window))).await
    }

    async fn collect_app(&self, app: &EnrichedApp, window: &TimeWindow) -> MetricsBundle {
        let name = app.name();
        let api = self.api.as_ref();

        let process_errors = settle_all(
            "process errors",
            app.process_types().into_iter().map(|process_type| {
                fetch::<ErrorSeries>(
                    api,
                    series_endpoint(
                        format!("/apps/{name}/formation/{process_type}/metrics/errors"),
                        window,
                    ),
                )
            }),
        );

        let router = async {
            let Some(process_type) = app.router_process_type() else {
                debug!(app = name, "empty formation, skipping router metrics");
                return (None, None, None);
            };
            let router_endpoint = |metric: &str| {
                series_endpoint(format!("/apps/{name}/router-metrics/{metric}"), window)
                    .query_param("process_type", process_type)
            };
            tokio::join!(
                settle(
                    "router latency",
                    fetch::<LatencySeries>(api, router_endpoint("latency"))
                ),
                settle(
                    "router errors",
                    fetch::<ErrorSeries>(api, router_endpoint("errors"))
                ),
                settle(
                    "router status",
                    fetch::<VolumeSeries>(api, router_endpoint("status"))
                ),
            )
        };

        let (process_errors, (latency, router_errors, router_volume)) =
            tokio::join!(process_errors, router);

        MetricsBundle {
            process_errors,
            latency,
            router_errors,
            router_volume,
        }
    }
}

fn series_endpoint(path: String, window: &TimeWindow) -> EndpointSpec {
    EndpointSpec::new(ApiHost::Metrics, path)
        .header("Range", "")
        .query_params(window.query())
}
