//! Navigation capability

use crate::route::Route;

/// "Go to path". Implementations decide how the UI reacts.
///
/// `push` may run while the session store holds an internal lock. It must
/// not call back into the store synchronously; spawn instead.
pub trait Navigator: Send + Sync {
    fn push(&self, route: &Route);
}

impl<N: Navigator + ?Sized> Navigator for std::sync::Arc<N> {
    fn push(&self, route: &Route) {
        (**self).push(route)
    }
}
