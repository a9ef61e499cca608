//! # Pending-state tracking
//!
//! inflight records whether an asynchronous action is in its initial,
//! pending, completed, or failed condition, and optionally shares that state
//! across several consumers via a named key. There are three pieces:
//!
//! - `Store<T>` — cloneable, subscribable holder of a single value.
//! - `StoreRegistry` — string-keyed map of shared pending-state cells.
//! - `PendingTracker` — the per-consumer `track` / `update` surface.
//!
//! ## Stores
//!
//! `Store<T>` is a cloneable handle to a piece of state; clones share the
//! value and the subscriber list:
//!
//! ```rust
//! use inflight_core::*;
//!
//! let cell = Store::new(0);
//! cell.set(1);
//! cell.update(|v| *v += 1);
//! assert_eq!(cell.get(), 2);
//! ```
//!
//! ## Shared cells
//!
//! A `StoreRegistry` is created once at the composition root and handed (by
//! clone) to everything that wants to share pending state. Cells are created
//! lazily on first resolution and never removed:
//!
//! ```rust
//! use inflight_core::*;
//!
//! let registry = StoreRegistry::new();
//! let a = registry.resolve("items");
//! let b = registry.resolve("items");
//! assert!(a.ptr_eq(&b));
//! ```
//!
//! Resolving `()` (or `None`) yields a private cell scoped to the caller,
//! and resolving an existing `Store` returns it unchanged.
//!
//! ## Tracking
//!
//! `PendingTracker` drives the cell through the action lifecycle. `try_track`
//! propagates the action's error (after storing it on the cell); `track`
//! absorbs it, leaving the reason on `PendingState::error` only:
//!
//! ```rust
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! use inflight_core::*;
//!
//! let registry = StoreRegistry::new();
//! let loader = PendingTracker::new(&registry, "items");
//!
//! let items = loader
//!     .try_track(
//!         async { Ok::<_, std::io::Error>(vec![1, 2, 3]) },
//!         TrackOptions::default(),
//!     )
//!     .await
//!     .unwrap();
//!
//! assert_eq!(items.len(), 3);
//! assert!(loader.state().complete());
//! # }
//! ```
//!
//! ## Silent and delayed tracking
//!
//! `TrackOptions::silent()` tracks without ever switching the state to
//! pending (background actions, optimistic updates).
//! `TrackOptions::delayed(..)` holds the pending switch back for the given
//! duration, so a busy indicator is never flashed for an action that settles
//! quickly; the timer is dropped the moment the action settles.
//!
//! Overlapping tracks on one cell are last-write-wins — there is no queuing,
//! and the underlying action is never cancelled; only the pending indicator
//! is.

pub mod registry;
pub mod state;
pub mod store;
pub mod tracker;

pub use registry::*;
pub use state::*;
pub use store::*;
pub use tracker::*;
