use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Organization {
    pub fn is_collaborator(&self) -> bool {
        self.role.as_deref() == Some("collaborator")
    }

    /// Oldest organization the user is more than a collaborator of.
    pub fn sample(organizations: &[Organization]) -> Option<&Organization> {
        organizations
            .iter()
            .filter(|org| !org.is_collaborator())
            .min_by_key(|org| (org.created_at.is_none(), org.created_at))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub read: bool,
}

impl Notification {
    pub fn unread_count(notifications: &[Notification]) -> usize {
        notifications.iter().filter(|n| !n.read).count()
    }
}
