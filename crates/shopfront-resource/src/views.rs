//! Named view invalidation.
//!
//! Pages cache what they render under a view name (e.g. `/products`). A
//! successful mutation bumps the generation of every view it names; a page
//! compares the generation it rendered against the current one to decide
//! whether to refetch. Counters only grow.

use parking_lot::Mutex;
use std::collections::HashMap;
use tracing::debug;

/// Registry of view generations.
#[derive(Debug, Default)]
pub struct ViewCache {
    generations: Mutex<HashMap<String, u64>>,
}

impl ViewCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current generation of a view. Unknown views are generation 0.
    pub fn generation(&self, view: &str) -> u64 {
        self.generations.lock().get(view).copied().unwrap_or(0)
    }

    /// Mark one view stale.
    pub fn invalidate(&self, view: &str) {
        let mut generations = self.generations.lock();
        let counter = generations.entry(view.to_string()).or_insert(0);
        *counter += 1;
        debug!(%view, generation = *counter, "view invalidated");
    }

    /// Mark several views stale.
    pub fn invalidate_all<I, S>(&self, views: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for view in views {
            self.invalidate(view.as_ref());
        }
    }

    /// True when `seen` is older than the view's current generation.
    pub fn is_stale(&self, view: &str, seen: u64) -> bool {
        self.generation(view) > seen
    }
}
