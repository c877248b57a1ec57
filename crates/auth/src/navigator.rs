//! In-memory stand-in for the browser location and history.

use std::sync::{Arc, RwLock};

use signin_core::auth::Navigator;
use url::Url;

#[derive(Debug)]
struct History {
    current: Url,
    /// Addresses the page navigated away to, oldest first.
    assigned: Vec<Url>,
}

/// Navigator that records navigation instead of performing it.
///
/// Used by the CLI host (which prints or opens redirects itself) and by
/// tests. Clones share the same history.
#[derive(Debug, Clone)]
pub struct MemoryNavigator {
    history: Arc<RwLock<History>>,
}

impl MemoryNavigator {
    pub fn new(current: Url) -> Self {
        Self {
            history: Arc::new(RwLock::new(History {
                current,
                assigned: Vec::new(),
            })),
        }
    }

    /// Simulate the browser arriving at `url` (a redirect back or back/forward).
    pub fn visit(&self, url: Url) {
        if let Ok(mut history) = self.history.write() {
            history.current = url;
        }
    }

    /// Most recent address passed to `assign`.
    pub fn last_assigned(&self) -> Option<Url> {
        self.history
            .read()
            .ok()
            .and_then(|h| h.assigned.last().cloned())
    }

    pub fn assigned(&self) -> Vec<Url> {
        self.history
            .read()
            .map(|h| h.assigned.clone())
            .unwrap_or_default()
    }
}

impl Navigator for MemoryNavigator {
    fn current(&self) -> Url {
        match self.history.read() {
            Ok(history) => history.current.clone(),
            Err(poisoned) => poisoned.into_inner().current.clone(),
        }
    }

    fn replace(&self, url: Url) {
        self.visit(url);
    }

    fn assign(&self, url: Url) {
        if let Ok(mut history) = self.history.write() {
            history.assigned.push(url);
        }
    }
}
