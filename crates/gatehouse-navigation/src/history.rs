//! In-memory navigation history

use parking_lot::RwLock;
use std::sync::Arc;

use crate::navigator::Navigator;
use crate::route::Route;

/// Router history kept in memory. Cloning shares the same history.
#[derive(Clone)]
pub struct HistoryNavigator {
    /// Every route pushed, in order
    pushes: Arc<RwLock<Vec<Route>>>,
}

impl HistoryNavigator {
    pub fn new() -> Self {
        Self {
            pushes: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// The most recently pushed route
    pub fn current(&self) -> Option<Route> {
        self.pushes.read().last().cloned()
    }

    pub fn pushes(&self) -> Vec<Route> {
        self.pushes.read().clone()
    }

    /// How many times `route` has been pushed
    pub fn push_count(&self, route: &Route) -> usize {
        self.pushes.read().iter().filter(|r| *r == route).count()
    }
}

impl Default for HistoryNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator for HistoryNavigator {
    fn push(&self, route: &Route) {
        self.pushes.write().push(route.clone());

        tracing::debug!(path = %route, "Navigated");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_count() {
        let nav = HistoryNavigator::new();
        assert_eq!(nav.current(), None);

        nav.push(&Route::dashboard());
        nav.push(&Route::sign_in());
        nav.push(&Route::dashboard());

        assert_eq!(nav.current(), Some(Route::dashboard()));
        assert_eq!(nav.push_count(&Route::dashboard()), 2);
        assert_eq!(nav.push_count(&Route::sign_in()), 1);
        assert_eq!(nav.pushes().len(), 3);
    }

    #[test]
    fn test_clones_share_history() {
        let nav = Arc::new(HistoryNavigator::new());
        let dyn_nav: Arc<dyn Navigator> = nav.clone();
        dyn_nav.push(&Route::sign_in());
        assert_eq!(nav.current(), Some(Route::sign_in()));

        let other = (*nav).clone();
        other.push(&Route::dashboard());
        assert_eq!(nav.pushes(), vec![Route::sign_in(), Route::dashboard()]);
    }
}
