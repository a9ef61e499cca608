use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::state::PendingState;
use crate::store::Store;

/// Where a tracker's cell comes from: a fresh private cell, a shared cell
/// looked up by key, or an existing cell passed through unchanged.
pub enum StoreSource {
    Local,
    Keyed(String),
    Store(Store<PendingState>),
}

impl From<&str> for StoreSource {
    fn from(key: &str) -> Self {
        Self::Keyed(key.to_owned())
    }
}

impl From<String> for StoreSource {
    fn from(key: String) -> Self {
        Self::Keyed(key)
    }
}

impl From<Store<PendingState>> for StoreSource {
    fn from(store: Store<PendingState>) -> Self {
        Self::Store(store)
    }
}

impl From<()> for StoreSource {
    fn from(_: ()) -> Self {
        Self::Local
    }
}

impl<S: Into<StoreSource>> From<Option<S>> for StoreSource {
    fn from(source: Option<S>) -> Self {
        match source {
            Some(s) => s.into(),
            None => Self::Local,
        }
    }
}

/// String-keyed map of shared pending-state cells.
///
/// Clones share the underlying map, so one registry created at the
/// composition root can be handed to every consumer in a subtree. Entries are
/// created on demand and never removed.
#[derive(Clone, Default)]
pub struct StoreRegistry {
    stores: Arc<Mutex<HashMap<String, Store<PendingState>>>>,
}

impl StoreRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from plain initial states, wrapping each in a store.
    pub fn from_states<K, I>(states: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, PendingState)>,
    {
        let stores = states
            .into_iter()
            .map(|(key, state)| (key.into(), Store::new(state)))
            .collect();
        Self {
            stores: Arc::new(Mutex::new(stores)),
        }
    }

    /// Builds a registry around pre-built stores.
    pub fn from_stores<K, I>(stores: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Store<PendingState>)>,
    {
        let stores = stores
            .into_iter()
            .map(|(key, store)| (key.into(), store))
            .collect();
        Self {
            stores: Arc::new(Mutex::new(stores)),
        }
    }

    /// Resolves a cell: an existing store is returned unchanged, a key is
    /// looked up (inserting a fresh cell on first use), and `Local` / `()` /
    /// `None` yield a private cell that is never inserted into the registry.
    ///
    /// Resolution is idempotent: two resolutions of the same key on the same
    /// registry always return handles to the same cell.
    pub fn resolve(&self, source: impl Into<StoreSource>) -> Store<PendingState> {
        match source.into() {
            StoreSource::Store(store) => store,
            StoreSource::Keyed(key) => self.entry(key),
            StoreSource::Local => Store::new(PendingState::new()),
        }
    }

    fn entry(&self, key: String) -> Store<PendingState> {
        match self.stores.lock().entry(key) {
            Entry::Occupied(e) => e.get().clone(),
            Entry::Vacant(e) => {
                log::debug!("creating pending store for key '{}'", e.key());
                e.insert(Store::new(PendingState::new())).clone()
            }
        }
    }

    /// Looks up a key without creating it.
    pub fn get(&self, key: &str) -> Option<Store<PendingState>> {
        self.stores.lock().get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.stores.lock().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.stores.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.lock().is_empty()
    }
}
