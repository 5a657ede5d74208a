use glance_domain::{AppName, FavoriteApp};
use glance_ports::{ApiHost, ApiPort, EndpointSpec, fetch};

use crate::DashboardError;

pub const FAVORITES_PATH: &str = "/favorites";

/// Names of the user's favorite apps, in the order the favorites host returns them.
pub async fn list_favorites(api: &dyn ApiPort) -> Result<Vec<AppName>, DashboardError> {
    let endpoint = EndpointSpec::new(ApiHost::Favorites, FAVORITES_PATH).header("Range", "");
    let favorites: Vec<FavoriteApp> = fetch(api, endpoint)
        .await
        .map_err(|source| DashboardError::UpstreamUnavailable { source })?;
    Ok(favorites.into_iter().map(|fav| fav.app_name).collect())
}
