use serde::{Deserialize, Serialize};

use crate::{EnrichedApp, MetricsBundle, Notification, Organization, TimeWindow};

/// Everything one dashboard invocation gathered. `apps[i]` and `metrics[i]`
/// always describe the same app.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub apps: Vec<EnrichedApp>,
    pub metrics: Vec<MetricsBundle>,
    pub organizations: Vec<Organization>,
    pub notifications: Vec<Notification>,
    /// Window every metrics series was requested over.
    pub window: TimeWindow,
}

impl Dashboard {
    pub fn rows(&self) -> impl Iterator<Item = (&EnrichedApp, &MetricsBundle)> {
        self.apps.iter().zip(self.metrics.iter())
    }
}
