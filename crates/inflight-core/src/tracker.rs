use std::error::Error;
use std::future::Future;
use std::sync::Arc;

use tokio::time::{Duration, sleep};

use crate::registry::{StoreRegistry, StoreSource};
use crate::state::{PendingState, TrackError};
use crate::store::{Store, SubKey};

/// How a tracked action's visible state is reported.
#[derive(Clone, Copy, Debug, Default)]
pub struct TrackOptions {
    /// Track silently: never switch the state to pending. For background
    /// actions and optimistic updates where no busy indicator is wanted.
    pub silent: bool,
    /// Delay the switch to pending, so a busy indicator is never flashed for
    /// an action that settles within the delay.
    pub delay: Option<Duration>,
}

impl TrackOptions {
    pub fn silent() -> Self {
        Self {
            silent: true,
            ..Self::default()
        }
    }

    pub fn delayed(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }
}

/// Per-consumer handle over one pending-state cell.
///
/// Cloning a tracker shares the cell; trackers resolved from the same
/// registry key observe the same transitions.
#[derive(Clone)]
pub struct PendingTracker {
    store: Store<PendingState>,
}

impl PendingTracker {
    /// Resolves the cell through `registry` (see [`StoreRegistry::resolve`]).
    pub fn new(registry: &StoreRegistry, source: impl Into<StoreSource>) -> Self {
        Self {
            store: registry.resolve(source),
        }
    }

    /// A tracker over a private cell, not shared through any registry.
    pub fn local() -> Self {
        Self {
            store: Store::new(PendingState::new()),
        }
    }

    /// A tracker over an existing cell.
    pub fn for_store(store: Store<PendingState>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Store<PendingState> {
        &self.store
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> PendingState {
        self.store.get()
    }

    pub fn subscribe(&self, f: impl Fn(&PendingState) + Send + Sync + 'static) -> SubKey {
        self.store.subscribe(f)
    }

    pub fn unsubscribe(&self, key: SubKey) -> bool {
        self.store.unsubscribe(key)
    }

    /// Tracks `action`, propagating its error.
    ///
    /// Unless `options.silent`, the state switches to pending — immediately,
    /// or once `options.delay` elapses with the action still in flight. The
    /// delay timer is raced against the action and dropped on settlement, so
    /// a stale pending flag never appears after a fast completion.
    ///
    /// On `Ok` the state settles cleanly and the value is returned. On `Err`
    /// the rejection reason is stored on the cell and the same `Arc`'d reason
    /// is returned, so caller and state observers see one object.
    ///
    /// Overlapping calls on the same cell are last-write-wins; there is no
    /// queuing. The action itself is never cancelled.
    pub async fn try_track<T, E, F>(&self, action: F, options: TrackOptions) -> Result<T, TrackError>
    where
        F: Future<Output = Result<T, E>>,
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        tokio::pin!(action);

        if !options.silent {
            if let Some(delay) = options.delay {
                let delayed_pending = sleep(delay);
                tokio::pin!(delayed_pending);
                tokio::select! {
                    out = &mut action => return self.settle(out),
                    () = &mut delayed_pending => {
                        log::trace!("delayed pending transition fired after {delay:?}");
                        self.store.set(PendingState::in_flight());
                    }
                }
            } else {
                self.store.set(PendingState::in_flight());
            }
        }

        let out = action.await;
        self.settle(out)
    }

    /// Tracks `action`, absorbing its error into the cell.
    ///
    /// The rejection reason remains available on [`PendingState::error`];
    /// the caller's continuation receives `None`.
    pub async fn track<T, E, F>(&self, action: F, options: TrackOptions) -> Option<T>
    where
        F: Future<Output = Result<T, E>>,
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        self.try_track(action, options).await.ok()
    }

    /// Pass-through for a value that needs no awaiting: marks the state
    /// settled and returns the value unchanged.
    pub fn track_value<T>(&self, value: T) -> T {
        self.store.set(PendingState::settled());
        value
    }

    /// Patches the state in place. No validation is performed; callers may
    /// set contradictory flags.
    pub fn update(&self, f: impl FnOnce(&mut PendingState)) {
        self.store.update(f);
    }

    /// Replaces the state wholesale.
    pub fn set(&self, next: PendingState) {
        self.store.set(next);
    }

    fn settle<T, E>(&self, out: Result<T, E>) -> Result<T, TrackError>
    where
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        match out {
            Ok(value) => {
                log::trace!("tracked action settled");
                self.store.set(PendingState::settled());
                Ok(value)
            }
            Err(error) => {
                let error: TrackError = Arc::from(error.into());
                log::trace!("tracked action failed: {error}");
                self.store.set(PendingState::failed(Arc::clone(&error)));
                Err(error)
            }
        }
    }
}
