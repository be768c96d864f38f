use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;

use log::{debug, error, info, warn};

use super::cache::ProfileCache;
use super::config::SessionConfig;
use super::errors::{ProfileError, Result};
use super::profile::{validate_name, ProfileRecord};
use crate::service::ProfileService;

const OP_GET: &str = "get profiles";
const OP_SWITCH: &str = "switch profile";
const OP_REMOVE: &str = "remove profile";

/// Owns the profile cache and every call to the daemon.
///
/// Cloning is cheap: clones share the same cache and service through `Arc`s,
/// so a front-end can hand copies to as many workflows as it likes.
///
/// Mutations (`switch_active`, `remove_profile`) never touch the cache.
/// The daemon is the only authority on which profiles exist and which one is
/// active, so callers observe the effect of a mutation by calling
/// [`SessionManager::list_profiles`] afterwards.
#[derive(Clone)]
pub struct SessionManager {
    service: Arc<dyn ProfileService>,
    cache: Arc<ProfileCache>,
    config: SessionConfig,
}

impl SessionManager {
    /// The cache starts empty; nothing is fetched until `list_profiles`.
    pub fn new(service: Arc<dyn ProfileService>, config: SessionConfig) -> Self {
        Self {
            service,
            cache: Arc::new(ProfileCache::new()),
            config,
        }
    }

    /// Last snapshot pulled from the daemon, without any remote call.
    pub fn profiles(&self) -> Vec<ProfileRecord> {
        self.cache.snapshot()
    }

    /// Fetch the full list, replace the cache with it and return the new snapshot.
    ///
    /// On any failure the previous snapshot stays in place.
    pub async fn list_profiles(&self) -> Result<Vec<ProfileRecord>> {
        let records = self.bounded(OP_GET, self.service.get_profiles()).await?;

        check_listing(&records).inspect_err(|e| error!("{e}"))?;

        debug!("daemon reported {} profiles", records.len());
        self.cache.set(records.clone());
        Ok(records)
    }

    /// Ask the daemon to make `name` the active profile.
    ///
    /// Callers are expected to skip this for the profile that is already
    /// active. The cache is left as is.
    pub async fn switch_active(&self, name: &str) -> Result<()> {
        let name = validate_name(name)?;
        info!("Switching active profile to '{}'", name);

        let reply = self
            .bounded(OP_SWITCH, self.service.switch_profile(name))
            .await?;

        if !reply.success {
            error!("{}: daemon refused '{}': {}", OP_SWITCH, name, reply.error);
            return Err(ProfileError::remote(OP_SWITCH, reply.error));
        }
        info!("Profile '{}' is now active on the daemon", name);
        Ok(())
    }

    /// Ask the daemon to delete `name`. Whether the active profile may be
    /// removed is up to the daemon.
    pub async fn remove_profile(&self, name: &str) -> Result<()> {
        let name = validate_name(name)?;
        info!("Removing profile '{}'", name);

        self.bounded(OP_REMOVE, self.service.remove_profile(name))
            .await?;

        info!("Profile '{}' removed on the daemon", name);
        Ok(())
    }

    /// Validates `name` and stops there: the daemon call and the cache
    /// update for profile creation are not wired up in this revision.
    pub async fn create_profile(&self, name: &str) -> Result<()> {
        let name = validate_name(name)?;
        warn!(
            "create profile '{}': creation is not supported by this client yet, nothing sent",
            name
        );
        Ok(())
    }

    /// Drop everything cached. A deliberate reset, not an error path.
    pub fn clear_profiles(&self) {
        self.cache.clear();
    }

    /// Run one daemon call under the configured timeout.
    ///
    /// When the bound elapses the call future is dropped, which cancels the
    /// request, and `Timeout` is reported. No retry.
    async fn bounded<T, F>(&self, op: &'static str, call: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let after = self.config.rpc_timeout;
        match tokio::time::timeout(after, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                error!("{} failed ({}): {}", op, e.kind(), e);
                Err(e)
            }
            Err(_) => {
                error!("{} timed out after {:?}", op, after);
                Err(ProfileError::Timeout { op, after })
            }
        }
    }
}

/// Reject listings that break the daemon's own guarantees instead of
/// caching them.
fn check_listing(records: &[ProfileRecord]) -> Result<()> {
    let active = records.iter().filter(|p| p.is_active).count();
    if active > 1 {
        return Err(ProfileError::remote(
            OP_GET,
            format!("daemon reported {active} active profiles"),
        ));
    }

    let mut seen = HashSet::with_capacity(records.len());
    if let Some(dup) = records.iter().find(|p| !seen.insert(p.name.as_str())) {
        return Err(ProfileError::remote(
            OP_GET,
            format!("daemon reported profile '{}' twice", dup.name),
        ));
    }
    Ok(())
}
