// ABOUTME: Concurrent token-to-tracker table consulted by every dispatcher callback
// ABOUTME: Defines the TrackerStore seam and a DashMap-backed default implementation

use crate::dispatcher::error::{DispatchError, DispatchResult};
use crate::dispatcher::token::Token;
use crate::dispatcher::types::SmsTracker;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;

/// Storage for in-flight trackers keyed by token
///
/// Every present token corresponds to exactly one outstanding transport
/// operation. A lookup miss is an error, never a silent no-op. All methods
/// must be safe to call from concurrent callbacks without external locking.
pub trait TrackerStore: Send + Sync {
    /// Track `tracker` under `token`; the token must not already be present
    fn insert(&self, token: Token, tracker: Arc<SmsTracker>) -> DispatchResult<()>;

    /// Look up the tracker for `token`
    fn get(&self, token: Token) -> DispatchResult<Arc<SmsTracker>>;

    /// Stop tracking `token`, returning the tracker it referenced
    fn remove(&self, token: Token) -> DispatchResult<Arc<SmsTracker>>;

    /// Whether `token` is currently tracked
    fn contains(&self, token: Token) -> bool;

    /// Number of tracked tokens
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Lock-free tracker store backed by `DashMap`
#[derive(Debug, Default)]
pub struct ConcurrentTrackerStore {
    trackers: DashMap<Token, Arc<SmsTracker>>,
}

impl ConcurrentTrackerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TrackerStore for ConcurrentTrackerStore {
    fn insert(&self, token: Token, tracker: Arc<SmsTracker>) -> DispatchResult<()> {
        match self.trackers.entry(token) {
            Entry::Occupied(_) => Err(DispatchError::DuplicateToken(token)),
            Entry::Vacant(slot) => {
                slot.insert(tracker);
                Ok(())
            }
        }
    }

    fn get(&self, token: Token) -> DispatchResult<Arc<SmsTracker>> {
        self.trackers
            .get(&token)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or(DispatchError::InvalidToken(token))
    }

    fn remove(&self, token: Token) -> DispatchResult<Arc<SmsTracker>> {
        self.trackers
            .remove(&token)
            .map(|(_, tracker)| tracker)
            .ok_or(DispatchError::InvalidToken(token))
    }

    fn contains(&self, token: Token) -> bool {
        self.trackers.contains_key(&token)
    }

    fn len(&self) -> usize {
        self.trackers.len()
    }
}
