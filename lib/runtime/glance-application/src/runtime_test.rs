use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use glance_domain::{EventLevel, MetricsConfig};
use glance_ports::{ApiHost, HttpError, InMemoryApiPort};

use crate::lister::FAVORITES_PATH;
use crate::runtime::{NOTIFICATIONS_PATH, ORGANIZATIONS_PATH};
use crate::{DashboardError, DashboardRuntime, PipelineState};

fn account(api: InMemoryApiPort) -> InMemoryApiPort {
    api.respond(
        ORGANIZATIONS_PATH,
        json!([{"name": "acme", "role": "admin", "created_at": "2019-03-01T00:00:00Z"}]),
    )
    .respond(
        NOTIFICATIONS_PATH,
        json!([{"id": "n1", "read": false}, {"id": "n2", "read": true}]),
    )
}

fn favorites(api: InMemoryApiPort, names: &[&str]) -> InMemoryApiPort {
    let listing: Vec<_> = names.iter().map(|name| json!({"app_name": name})).collect();
    api.respond(FAVORITES_PATH, json!(listing))
}

fn app(api: InMemoryApiPort, name: &str, types: &[&str]) -> InMemoryApiPort {
    let formation: Vec<_> = types
        .iter()
        .map(|t| json!({"type": t, "quantity": 1, "size": "standard-1x"}))
        .collect();
    api.respond(
        format!("/apps/{name}"),
        json!({"name": name, "owner": {"email": format!("{name}@example.com")}}),
    )
    .respond(format!("/apps/{name}/formation"), json!(formation))
    .respond(
        format!("/apps/{name}/pipeline-couplings"),
        json!({"pipeline": {"name": format!("{name}-pipeline")}}),
    )
    .respond(
        format!("/apps/{name}/router-metrics/latency"),
        json!({"data": {"latency_p50": [100, 200, 300]}}),
    )
}

/// Account data, favorites in the given order, and every listed app.
fn fixture(apps: Vec<(&str, Vec<&str>)>) -> InMemoryApiPort {
    let names: Vec<&str> = apps.iter().map(|(name, _)| *name).collect();
    apps.iter().fold(
        favorites(account(InMemoryApiPort::new()), &names),
        |api, (name, types)| app(api, name, types),
    )
}

fn runtime(api: &InMemoryApiPort) -> DashboardRuntime {
    DashboardRuntime::new(Arc::new(api.clone()), MetricsConfig::default())
}

fn metrics_requests(api: &InMemoryApiPort) -> usize {
    api.count_requests(|spec| spec.host == ApiHost::Metrics)
}

#[tokio::test]
async fn results_are_aligned_with_favorites() {
    let api = fixture(vec![("c", vec![]), ("a", vec!["web"]), ("b", vec!["web", "worker"])]);
    let mut runtime = runtime(&api);

    let dashboard = runtime.run().await.unwrap();

    let names: Vec<_> = dashboard.apps.iter().map(|a| a.name()).collect();
    assert_eq!(names, vec!["c", "a", "b"]);
    assert_eq!(dashboard.metrics.len(), 3);
    assert!(dashboard.metrics[0].process_errors.is_empty());
    assert_eq!(dashboard.metrics[1].process_errors.len(), 1);
    assert_eq!(dashboard.metrics[2].process_errors.len(), 2);
    assert!(dashboard.metrics[0].latency.is_none());
    assert!(dashboard.metrics[1].latency.is_some());
    assert_eq!(dashboard.organizations.len(), 1);
    assert_eq!(dashboard.notifications.len(), 2);
    assert_eq!(runtime.state(), PipelineState::Done);
}

#[tokio::test]
async fn listing_failure_stops_before_any_other_call() {
    let api = account(InMemoryApiPort::new()).fail(FAVORITES_PATH, 502);
    let mut runtime = runtime(&api);

    let err = runtime.run().await.unwrap_err();

    assert!(matches!(err, DashboardError::UpstreamUnavailable { .. }));
    assert_eq!(api.requests().len(), 1);
    assert_eq!(runtime.state(), PipelineState::Failed);
    assert_eq!(runtime.events().count(EventLevel::Error), 1);
}

#[tokio::test]
async fn one_core_record_failure_fails_the_run_without_metrics() {
    let api = fixture(vec![("a", vec!["web"]), ("b", vec!["web"])]).fail("/apps/b", 500);
    let mut runtime = runtime(&api);

    let err = runtime.run().await.unwrap_err();

    match err {
        DashboardError::EntityFetchFailed { app, .. } => assert_eq!(app, "b"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(metrics_requests(&api), 0);
    assert_eq!(runtime.state(), PipelineState::Failed);
}

#[tokio::test]
async fn coupling_failure_only_blanks_that_pipeline() {
    let api = fixture(vec![("a", vec!["web"]), ("b", vec!["web"])])
        .fail("/apps/a/pipeline-couplings", 404);
    let mut runtime = runtime(&api);

    let dashboard = runtime.run().await.unwrap();

    assert!(dashboard.apps[0].pipeline.is_none());
    assert_eq!(dashboard.apps[0].formation.len(), 1);
    assert_eq!(dashboard.apps[0].app.owner.email, "a@example.com");
    let other = dashboard.apps[1].pipeline.as_ref().expect("coupling for b");
    assert_eq!(other.pipeline.name, "b-pipeline");
}

#[tokio::test]
async fn account_failure_is_fatal() {
    let api = fixture(vec![("a", vec!["web"])]).fail_with(
        NOTIFICATIONS_PATH,
        HttpError::Timeout {
            url: NOTIFICATIONS_PATH.into(),
        },
    );
    let mut runtime = runtime(&api);

    let err = runtime.run().await.unwrap_err();

    assert!(matches!(
        err,
        DashboardError::AccountFetchFailed {
            resource: "notifications",
            ..
        }
    ));
    assert_eq!(metrics_requests(&api), 0);
}

#[tokio::test]
async fn empty_favorites_still_loads_account_data() {
    let api = fixture(Vec::new());
    let mut runtime = runtime(&api);

    let dashboard = runtime.run().await.unwrap();

    assert!(dashboard.apps.is_empty());
    assert!(dashboard.metrics.is_empty());
    assert_eq!(dashboard.organizations[0].name, "acme");
    assert_eq!(dashboard.notifications.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn metrics_start_only_after_every_enrichment_settles() {
    let api = fixture(vec![("slow", vec!["web"]), ("fast", vec!["web"])])
        .delay("/apps/slow/formation", Duration::from_secs(5))
        .delay(NOTIFICATIONS_PATH, Duration::from_secs(2));
    let mut runtime = runtime(&api);

    runtime.run().await.unwrap();

    let requests = api.requests();
    let first_metrics = requests
        .iter()
        .position(|spec| spec.host == ApiHost::Metrics)
        .expect("metrics requested");
    let last_other = requests
        .iter()
        .rposition(|spec| spec.host != ApiHost::Metrics)
        .expect("other requests");
    assert!(last_other < first_metrics);
}

#[tokio::test]
async fn repeated_runs_are_identical() {
    let api = fixture(vec![("a", vec!["web", "worker"])])
        .fail("/apps/a/router-metrics/errors", 500);
    let mut runtime = runtime(&api);

    let first = runtime.run().await.unwrap();
    let second = runtime.run().await.unwrap();

    assert_eq!(first.apps, second.apps);
    assert_eq!(first.metrics, second.metrics);
    assert_eq!(first.organizations, second.organizations);
    assert_eq!(first.notifications, second.notifications);
    assert_eq!(first.window.minutes(), second.window.minutes());
    assert_eq!(runtime.run_count(), 2);
    assert_eq!(runtime.state(), PipelineState::Done);
}

#[tokio::test]
async fn missing_metrics_are_recorded_as_warnings() {
    let api = fixture(vec![("a", vec!["web"]), ("b", vec![])]);
    let mut runtime = runtime(&api);

    runtime.run().await.unwrap();

    // "a" has latency only; the error series and status fetches 404.
    assert_eq!(runtime.events().count(EventLevel::Warn), 1);
    assert!(
        runtime
            .events()
            .events()
            .any(|event| event.message.contains("b has no formation"))
    );
}

#[tokio::test]
async fn dashboard_carries_the_configured_window() {
    let api = fixture(vec![("a", vec!["web"])]);
    let config = MetricsConfig {
        window_hours: 6,
        step_minutes: 30,
    };
    let mut runtime = DashboardRuntime::new(Arc::new(api.clone()), config);

    let dashboard = runtime.run().await.unwrap();

    assert_eq!(dashboard.window.minutes(), 6 * 60);
    assert_eq!(dashboard.window.step_param(), "30m");
    let latency = api
        .requests()
        .into_iter()
        .find(|spec| spec.path == "/apps/a/router-metrics/latency")
        .expect("latency requested");
    assert_eq!(&latency.query[..3], &dashboard.window.query()[..]);
}
