//! Domain models for the favorites dashboard.

pub mod account;
pub mod app;
pub mod config;
pub mod dashboard;
pub mod events;
pub mod metrics;

pub use account::{Notification, Organization};
pub use app::{App, AppName, EnrichedApp, FavoriteApp, Formation, Owner, Pipeline, PipelineCoupling};
pub use config::{ApiConfig, GlanceConfig, MetricsConfig};
pub use dashboard::Dashboard;
pub use events::{Event, EventBus, EventLevel};
pub use metrics::{
    ErrorCount, ErrorSeries, LatencySeries, MetricsBundle, Series, TimeWindow, VolumeSeries,
};
