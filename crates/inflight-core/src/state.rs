use std::error::Error;
use std::sync::Arc;

use web_time::SystemTime;

/// Opaque rejection reason of a tracked action.
///
/// Stored verbatim on [`PendingState::error`] and handed back from
/// `try_track`; the library never inspects or classifies it.
pub type TrackError = Arc<dyn Error + Send + Sync>;

/// Lifecycle snapshot of an asynchronous action.
///
/// `initial` means no tracked action has settled yet; `pending` means one is
/// visibly in flight. The inverted-polarity readers [`initialized`] and
/// [`complete`] are provided for call sites written against the other scheme.
///
/// [`initialized`]: PendingState::initialized
/// [`complete`]: PendingState::complete
#[derive(Clone, Debug)]
pub struct PendingState {
    pub initial: bool,
    pub pending: bool,
    pub error: Option<TrackError>,
    /// Wall-clock stamp of the last transition.
    pub time: SystemTime,
}

impl PendingState {
    fn stamped(initial: bool, pending: bool, error: Option<TrackError>) -> Self {
        Self {
            initial,
            pending,
            error,
            time: SystemTime::now(),
        }
    }

    /// State of a store nothing has been tracked on yet.
    pub fn new() -> Self {
        Self::stamped(true, false, None)
    }

    /// A tracked action is visibly in flight.
    pub fn in_flight() -> Self {
        Self::stamped(false, true, None)
    }

    /// A tracked action finished without an error.
    pub fn settled() -> Self {
        Self::stamped(false, false, None)
    }

    /// A tracked action finished with the given rejection reason.
    pub fn failed(error: TrackError) -> Self {
        Self::stamped(false, false, Some(error))
    }

    /// `!initial`: at least one tracked action has started or settled.
    pub fn initialized(&self) -> bool {
        !self.initial
    }

    /// Settled and not in flight.
    pub fn complete(&self) -> bool {
        !self.initial && !self.pending
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }
}

impl Default for PendingState {
    fn default() -> Self {
        Self::new()
    }
}
