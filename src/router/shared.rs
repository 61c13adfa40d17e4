use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::info;

use super::core::Router;
use crate::error::Result;
use crate::route::MatchResult;

/// A router that can be replaced while requests are being matched.
///
/// A [`Router`] is read-only once built. To change routes after traffic has
/// started, build a new router and [`store`](Self::store) it: in-flight
/// matches finish on the snapshot they loaded, later ones see the new table.
/// Reads never take a lock.
pub struct SharedRouter<C> {
    current: ArcSwap<Router<C>>,
}

impl<C> SharedRouter<C> {
    #[must_use]
    pub fn new(router: Router<C>) -> Self {
        Self {
            current: ArcSwap::from_pointee(router),
        }
    }

    /// Snapshot of the router in use right now.
    #[must_use]
    pub fn load(&self) -> Arc<Router<C>> {
        self.current.load_full()
    }

    /// Publish a fully built router.
    pub fn store(&self, router: Router<C>) {
        info!(routes_count = router.len(), "Publishing new routing table");
        self.current.store(Arc::new(router));
    }

    pub fn match_path<'p>(
        &self,
        method: &str,
        path: impl Into<Option<&'p str>>,
    ) -> Result<MatchResult<C>> {
        self.load().match_path(method, path)
    }

    /// Runs the handler on an owned snapshot, so a slow handler never
    /// holds up [`store`](Self::store).
    pub fn dispatch<'p>(
        &self,
        method: &str,
        path: impl Into<Option<&'p str>>,
        args: &mut C,
    ) -> Result<MatchResult<C>> {
        self.load().dispatch(method, path, args)
    }
}
