//! Fetch lifecycle of a single keyed resource.
//!
//! A controller hands out a [`CycleId`] every time it begins a fetch and
//! only accepts a completion carrying the latest id. Results of superseded
//! cycles (the key changed, or a refetch started) are dropped on arrival, so
//! out-of-order responses can never overwrite newer state.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

use crate::error::FetchError;

/// Identity of one fetch cycle. Strictly increasing per controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct CycleId(pub u64);

impl CycleId {
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for CycleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// `loading` implies `error` is `None`. Stale `data` may be present while
/// loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<FetchError>,
}

impl<T> FetchState<T> {
    #[must_use]
    pub const fn initial() -> Self {
        Self {
            data: None,
            loading: true,
            error: None,
        }
    }

    #[must_use]
    pub const fn has_data(&self) -> bool {
        self.data.is_some()
    }
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::initial()
    }
}

/// What happens to held data when a new cycle begins for the same key. A
/// key change always drops it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClearPolicy {
    /// Keep showing the last good data while a refetch runs.
    RetainData,
    /// Drop held data as soon as the cycle begins.
    ClearData,
}

/// A begun cycle: what the caller must go and fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle<K> {
    pub id: CycleId,
    pub key: K,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Discarded,
}

#[derive(Debug, Clone)]
pub struct ResourceController<K, T> {
    policy: ClearPolicy,
    key: Option<K>,
    issued: CycleId,
    state: FetchState<T>,
}

impl<K, T> ResourceController<K, T>
where
    K: Clone + PartialEq + fmt::Debug,
{
    #[must_use]
    pub fn new(policy: ClearPolicy) -> Self {
        Self {
            policy,
            key: None,
            issued: CycleId::default(),
            state: FetchState::initial(),
        }
    }

    #[must_use]
    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    #[must_use]
    pub fn key(&self) -> Option<&K> {
        self.key.as_ref()
    }

    /// Latest cycle handed out, if any.
    #[must_use]
    pub fn current_cycle(&self) -> Option<CycleId> {
        (self.issued != CycleId::default()).then_some(self.issued)
    }

    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.current_cycle().is_some() && self.state.loading
    }

    #[must_use]
    pub const fn policy(&self) -> ClearPolicy {
        self.policy
    }

    /// Begins a cycle for `key` unless `key` is already the active key.
    /// Data held for a different key is dropped whatever the policy.
    pub fn start(&mut self, key: K) -> Option<Cycle<K>> {
        if self.key.as_ref() == Some(&key) {
            if self.current_cycle().is_some() {
                return None;
            }
        } else {
            self.state.data = None;
        }
        self.key = Some(key);
        self.begin()
    }

    /// Begins a cycle for the active key. `None` before the first `start`.
    pub fn refetch(&mut self) -> Option<Cycle<K>> {
        if self.key.is_none() {
            debug!("refetch before any key was set, ignoring");
            return None;
        }
        self.begin()
    }

    fn begin(&mut self) -> Option<Cycle<K>> {
        let key = self.key.clone()?;
        self.issued = self.issued.next();
        self.state.error = None;
        self.state.loading = true;
        if self.policy == ClearPolicy::ClearData {
            self.state.data = None;
        }
        debug!(cycle = %self.issued, ?key, "fetch cycle started");
        Some(Cycle {
            id: self.issued,
            key,
        })
    }

    pub fn complete(&mut self, cycle: CycleId, result: Result<T, FetchError>) -> Completion {
        if self.current_cycle() != Some(cycle) {
            match &result {
                Ok(_) => debug!(%cycle, current = %self.issued, "discarding stale result"),
                Err(e) => debug!(%cycle, current = %self.issued, error = %e, "discarding stale failure"),
            }
            return Completion::Discarded;
        }

        match result {
            Ok(data) => {
                self.state.data = Some(data);
                self.state.error = None;
            }
            Err(e) => {
                if self.state.has_data() {
                    warn!(%cycle, error = %e, "fetch failed, keeping last good data");
                } else {
                    warn!(%cycle, error = %e, "fetch failed");
                }
                self.state.error = Some(e);
            }
        }
        self.state.loading = false;
        Completion::Applied
    }
}
