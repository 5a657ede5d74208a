use futures::future::try_join_all;
use tracing::debug;

use glance_domain::{App, AppName, EnrichedApp, Formation, PipelineCoupling};
use glance_ports::{ApiHost, ApiPort, EndpointSpec, fetch};

use crate::DashboardError;
use crate::fanout::settle;

/// Loads the app record, its formation and its pipeline coupling concurrently.
///
/// The record and formation are required. A missing or failing coupling
/// leaves `pipeline` empty.
pub async fn enrich(api: &dyn ApiPort, name: &str) -> Result<EnrichedApp, DashboardError> {
    let base = format!("/apps/{name}");
    let (app, formation, pipeline) = tokio::join!(
        fetch::<App>(api, EndpointSpec::new(ApiHost::Platform, base.clone())),
        fetch::<Vec<Formation>>(
            api,
            EndpointSpec::new(ApiHost::Platform, format!("{base}/formation"))
        ),
        settle(
            "pipeline coupling",
            fetch::<PipelineCoupling>(
                api,
                EndpointSpec::new(ApiHost::Platform, format!("{base}/pipeline-couplings"))
            )
        ),
    );

    let failed = |source| DashboardError::EntityFetchFailed {
        app: name.to_string(),
        source,
    };
    let app = app.map_err(failed)?;
    let formation = formation.map_err(failed)?;
    if pipeline.is_none() {
        debug!(app = name, "no pipeline coupling");
    }

    Ok(EnrichedApp {
        app,
        formation,
        pipeline,
    })
}

/// Enriches every app concurrently, preserving the order of `names`.
/// The first required failure aborts the rest.
pub async fn enrich_all(
    api: &dyn ApiPort,
    names: &[AppName],
) -> Result<Vec<EnrichedApp>, DashboardError> {
    try_join_all(names.iter().map(|name| enrich(api, name))).await
}
