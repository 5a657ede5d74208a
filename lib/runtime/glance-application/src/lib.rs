//! Dashboard pipeline: list favorites, enrich them, collect their metrics.
//!
//! # Examples
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use glance_application::DashboardRuntime;
//! use glance_domain::MetricsConfig;
//! use glance_ports::InMemoryApiPort;
//!
//! # async fn demo() -> Result<(), glance_application::DashboardError> {
//! let mut runtime = DashboardRuntime::new(Arc::new(InMemoryApiPort::new()), MetricsConfig::default());
//! let dashboard = runtime.run().await?;
//! assert_eq!(dashboard.apps.len(), dashboard.metrics.len());
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod collector;
pub mod enricher;
mod error;
pub mod fanout;
pub mod lister;
pub mod runtime;
mod state;

pub use collector::MetricsCollector;
pub use error::DashboardError;
pub use runtime::DashboardRuntime;
pub use state::PipelineState;

#[cfg(test)]
mod runtime_test;
