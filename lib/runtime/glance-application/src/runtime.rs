use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{error, info};

use glance_domain::{
    Dashboard, EnrichedApp, Event, EventBus, EventLevel, MetricsBundle, MetricsConfig,
    Notification, Organization,
};
use glance_ports::{ApiHost, ApiPort, EndpointSpec, fetch};

use crate::aggregate::missing_fields;
use crate::enricher::enrich_all;
use crate::lister::list_favorites;
use crate::{DashboardError, MetricsCollector, PipelineState};

pub const ORGANIZATIONS_PATH: &str = "/organizations";
pub const NOTIFICATIONS_PATH: &str = "/user/notifications";

/// Drives one dashboard run at a time through
/// `Idle -> Listing -> Enriching -> CollectingMetrics -> Done`.
pub struct DashboardRuntime {
    api: Arc<dyn ApiPort>,
    collector: MetricsCollector,
    state: PipelineState,
    events: EventBus,
    run_count: u64,
}

impl DashboardRuntime {
    pub fn new(api: Arc<dyn ApiPort>, config: MetricsConfig) -> Self {
        let collector = MetricsCollector::new(Arc::clone(&api), config);
        let mut events = EventBus::default();
        events.push(Event::new(EventLevel::Info, "Runtime initialized"));
        Self {
            api,
            collector,
            state: PipelineState::Idle,
            events,
            run_count: 0,
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn run_count(&self) -> u64 {
        self.run_count
    }

    /// Lists favorites, then enriches them alongside the account-wide
    /// fetches, then collects metrics once every enrichment has settled.
    pub async fn run(&mut self) -> Result<Dashboard, DashboardError> {
        self.reset();
        self.run_count = self.run_count.saturating_add(1);
        let api = Arc::clone(&self.api);

        self.advance(PipelineState::Listing);
        let names = match list_favorites(api.as_ref()).await {
            Ok(names) => names,
            Err(err) => return Err(self.fail(err)),
        };
        info!(count = names.len(), "loaded favorite apps");

        self.advance(PipelineState::Enriching);
        let joined = tokio::try_join!(
            fetch_account::<Organization>(
                api.as_ref(),
                EndpointSpec::new(ApiHost::Platform, ORGANIZATIONS_PATH),
                "organizations",
            ),
            fetch_account::<Notification>(
                api.as_ref(),
                EndpointSpec::new(ApiHost::Notifications, NOTIFICATIONS_PATH),
                "notifications",
            ),
            enrich_all(api.as_ref(), &names),
        );
        let (organizations, notifications, apps) = match joined {
            Ok(joined) => joined,
            Err(err) => return Err(self.fail(err)),
        };

        self.advance(PipelineState::CollectingMetrics);
        let (window, metrics) = self.collector.collect(&apps).await;
        self.record_missing_metrics(&apps, &metrics);

        self.advance(PipelineState::Done);
        Ok(Dashboard {
            apps,
            metrics,
            organizations,
            notifications,
            window,
        })
    }

    /// A dropped run future can leave the state mid-pipeline; every run starts from `Idle`.
    fn reset(&mut self) {
        self.state = PipelineState::Idle;
    }

    fn advance(&mut self, next: PipelineState) {
        debug_assert!(
            self.state.can_advance_to(next),
            "invalid transition {} -> {}",
            self.state,
            next
        );
        info!(from = %self.state, to = %next, "pipeline transition");
        self.events.push(Event::new(
            EventLevel::Debug,
            format!("Pipeline {} -> {}", self.state, next),
        ));
        self.state = next;
    }

    fn fail(&mut self, err: DashboardError) -> DashboardError {
        error!(error = %err, state = %self.state, "dashboard run failed");
        self.events
            .push(Event::new(EventLevel::Error, format!("Run failed: {err}")));
        self.advance(PipelineState::Failed);
        err
    }

    fn record_missing_metrics(&mut self, apps: &[EnrichedApp], metrics: &[MetricsBundle]) {
        for (app, bundle) in apps.iter().zip(metrics) {
            if app.formation.is_empty() {
                self.events.push(Event::new(
                    EventLevel::Info,
                    format!("{} has no formation; router metrics skipped", app.name()),
                ));
                continue;
            }
            let missing = missing_fields(bundle);
            if missing > 0 {
                self.events.push(Event::new(
                    EventLevel::Warn,
                    format!("{missing} metric series unavailable for {}", app.name()),
                ));
            }
        }
    }
}

async fn fetch_account<T: DeserializeOwned>(
    api: &dyn ApiPort,
    endpoint: EndpointSpec,
    resource: &'static str,
) -> Result<Vec<T>, DashboardError> {
    fetch(api, endpoint)
        .await
        .map_err(|source| DashboardError::AccountFetchFailed { resource, source })
}
