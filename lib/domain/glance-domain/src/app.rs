use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Name of a favorited app. Unique within one favorites listing.
pub type AppName = String;

/// Wrapper returned by the favorites endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteApp {
    pub app_name: AppName,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub email: String,
}

impl Owner {
    /// Managed accounts carry a synthetic address; only the local part is meaningful.
    pub fn display_name(&self) -> &str {
        match self.email.strip_suffix("@herokumanager.com") {
            Some(local) => local,
            None => &self.email,
        }
    }
}

/// Core app record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct App {
    pub name: AppName,
    pub owner: Owner,
    #[serde(default)]
    pub released_at: Option<DateTime<Utc>>,
}

/// One process type of an app's formation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formation {
    #[serde(rename = "type")]
    pub process_type: String,
    pub quantity: u32,
    #[serde(default)]
    pub size: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pipeline {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineCoupling {
    pub pipeline: Pipeline,
    #[serde(default)]
    pub stage: Option<String>,
}

/// App record merged with its formation and optional pipeline coupling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedApp {
    pub app: App,
    pub formation: Vec<Formation>,
    pub pipeline: Option<PipelineCoupling>,
}

impl EnrichedApp {
    pub fn name(&self) -> &str {
        &self.app.name
    }

    /// Distinct process types in first-seen order.
    pub fn process_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = Vec::with_capacity(self.formation.len());
        for entry in &self.formation {
            if !types.contains(&entry.process_type.as_str()) {
                types.push(entry.process_type.as_str());
            }
        }
        types
    }

    /// Process type used to scope router metrics. `None` when the formation is empty.
    pub fn router_process_type(&self) -> Option<&str> {
        self.formation
            .first()
            .map(|entry| entry.process_type.as_str())
    }

    /// Total quantity per dyno size, in first-seen size order.
    pub fn quantities_by_size(&self) -> Vec<(&str, u32)> {
        let mut sizes: Vec<(&str, u32)> = Vec::new();
        for entry in &self.formation {
            match sizes.iter_mut().find(|(size, _)| *size == entry.size) {
                Some((_, total)) => *total += entry.quantity,
                None => sizes.push((entry.size.as_str(), entry.quantity)),
            }
        }
        sizes
    }
}
