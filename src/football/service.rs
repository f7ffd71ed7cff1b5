//! Cached access to the competition's teams.
//!
//! Cache-aside over [`TeamsApi`]: a fresh entry is served without touching
//! the network; an expired entry triggers exactly one refresh attempt, and
//! on failure the previous value is served unchanged with a warning. No
//! retries beyond that single fallback.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::football::cache::TeamCache;
use crate::football::client::TeamsApi;
use crate::football::model::Team;

/// TTL-cached team lookups shared by every tool.
///
/// # Example
///
/// ```rust
/// # tokio_test::block_on(async {
/// use std::sync::Arc;
/// use async_trait::async_trait;
/// use pitchside::error::Result;
/// use pitchside::football::{Team, TeamService, TeamsApi};
///
/// struct EmptyLeague;
///
/// #[async_trait]
/// impl TeamsApi for EmptyLeague {
///     async fn fetch_teams(&self) -> Result<Vec<Team>> {
///         Ok(Vec::new())
///     }
/// }
///
/// let service = TeamService::new(Arc::new(EmptyLeague), 24);
/// assert!(service.teams().await.unwrap().is_empty());
/// # });
/// ```
pub struct TeamService {
    api: Arc<dyn TeamsApi>,
    cache: Mutex<TeamCache>,
}

impl TeamService {
    pub fn new(api: Arc<dyn TeamsApi>, ttl_hours: u64) -> Self {
        Self {
            api,
            cache: Mutex::new(TeamCache::new(ttl_hours * 3600)),
        }
    }

    /// The competition's teams, served from cache while fresh.
    pub async fn teams(&self) -> Result<Vec<Team>> {
        let mut cache = self.cache.lock().await;

        if let Some(teams) = cache.fresh() {
            debug!("Serving teams from cache");
            return Ok(teams.to_vec());
        }

        info!("Fetching teams from the football API");
        match self.api.fetch_teams().await {
            Ok(teams) => {
                info!(count = teams.len(), "Loaded teams");
                cache.put(teams.clone());
                Ok(teams)
            }
            Err(e) => match cache.stale() {
                Some(stale) => {
                    warn!("Football API request failed, serving stale team data: {e}");
                    Ok(stale.to_vec())
                }
                None => Err(e),
            },
        }
    }
}
