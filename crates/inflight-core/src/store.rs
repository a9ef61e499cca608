use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// Handle returned by [`Store::subscribe`], accepted by [`Store::unsubscribe`].
    pub struct SubKey;
}

type Subscriber<T> = Box<dyn Fn(&T) + Send + Sync>;

/// Subscribers keyed for removal, notified in subscription order.
struct SubList<T> {
    entries: SlotMap<SubKey, Subscriber<T>>,
    order: Vec<SubKey>,
}

impl<T> Default for SubList<T> {
    fn default() -> Self {
        Self {
            entries: SlotMap::with_key(),
            order: Vec::new(),
        }
    }
}

/// A cloneable, subscribable holder of a single value.
///
/// Clones share the value and the subscriber list, so a `Store` handed to
/// several consumers behaves as one cell. Subscribers run synchronously after
/// every committed write, in subscription order, and must not call back into
/// the same store — not even `get`/`read` (the value lock is held while they
/// run); use the `&T` argument instead.
pub struct Store<T> {
    value: Arc<RwLock<T>>,
    subs: Arc<Mutex<SubList<T>>>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
            subs: Arc::clone(&self.subs),
        }
    }
}

impl<T: Clone> Store<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Arc::new(RwLock::new(value)),
            subs: Arc::new(Mutex::new(SubList::default())),
        }
    }

    /// Clone out the current value.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Read the current value without cloning.
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.value.read())
    }

    pub fn set(&self, next: T) {
        *self.value.write() = next;
        self.notify();
    }

    pub fn update(&self, f: impl FnOnce(&mut T)) {
        f(&mut self.value.write());
        self.notify();
    }

    pub fn subscribe(&self, f: impl Fn(&T) + Send + Sync + 'static) -> SubKey {
        let mut subs = self.subs.lock();
        let key = subs.entries.insert(Box::new(f));
        subs.order.push(key);
        key
    }

    /// Returns `false` if the key was already removed.
    pub fn unsubscribe(&self, key: SubKey) -> bool {
        let mut subs = self.subs.lock();
        if subs.entries.remove(key).is_some() {
            subs.order.retain(|k| *k != key);
            true
        } else {
            false
        }
    }

    /// Whether two handles refer to the same cell.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }

    fn notify(&self) {
        let value = self.value.read();
        let subs = self.subs.lock();
        for key in &subs.order {
            if let Some(sub) = subs.entries.get(*key) {
                sub(&value);
            }
        }
    }
}
