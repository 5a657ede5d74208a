use glance_domain::AppName;
use glance_ports::HttpError;
use thiserror::Error;

/// Failures that abort the whole dashboard run.
///
/// Optional fetches (pipeline couplings, metrics) never produce one of these;
/// they degrade to an absent field instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DashboardError {
    #[error("could not load favorite apps")]
    UpstreamUnavailable {
        #[source]
        source: HttpError,
    },

    #[error("could not load app {app}")]
    EntityFetchFailed {
        app: AppName,
        #[source]
        source: HttpError,
    },

    #[error("could not load {resource}")]
    AccountFetchFailed {
        resource: &'static str,
        #[source]
        source: HttpError,
    },
}
