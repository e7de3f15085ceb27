use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::FetchError;
use crate::fetch::CycleId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    Profile,
    Posts,
}

/// One fetch cycle a refresh is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RefreshTicket {
    pub resource: Resource,
    pub cycle: CycleId,
}

impl RefreshTicket {
    #[must_use]
    pub const fn new(resource: Resource, cycle: CycleId) -> Self {
        Self { resource, cycle }
    }
}

/// Result handed back to the caller once a refresh has settled: the first
/// failure among its cycles, if any.
pub type RefreshOutcome = Result<(), FetchError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshStart {
    Started,
    /// A refresh was already running; the action was not invoked.
    AlreadyRefreshing,
    /// The action launched nothing, so the refresh settled immediately.
    Settled(RefreshOutcome),
}

#[derive(Debug, Clone, Default)]
struct InFlight {
    pending: Vec<RefreshTicket>,
    first_failure: Option<FetchError>,
}

/// Single in-flight guard for pull-to-refresh.
///
/// `run` raises the flag and invokes the action, which starts fetch cycles
/// and returns the tickets it waits on. The flag drops when the last ticket
/// settles, whether its cycle succeeded, failed, or was superseded.
#[derive(Debug, Clone, Default)]
pub struct RefreshCoordinator {
    in_flight: Option<InFlight>,
}

impl RefreshCoordinator {
    #[must_use]
    pub const fn is_refreshing(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Tickets still outstanding for the running refresh.
    #[must_use]
    pub fn pending(&self) -> &[RefreshTicket] {
        match &self.in_flight {
            Some(flight) => &flight.pending,
            None => &[],
        }
    }

    pub fn run<F>(&mut self, action: F) -> RefreshStart
    where
        F: FnOnce() -> Vec<RefreshTicket>,
    {
        if self.is_refreshing() {
            debug!("refresh already in flight, ignoring");
            return RefreshStart::AlreadyRefreshing;
        }

        self.in_flight = Some(InFlight::default());
        let tickets = action();
        info!(waiting_on = tickets.len(), "refresh started");

        if tickets.is_empty() {
            self.in_flight = None;
            return RefreshStart::Settled(Ok(()));
        }
        if let Some(flight) = self.in_flight.as_mut() {
            flight.pending = tickets;
        }
        RefreshStart::Started
    }

    /// Records the outcome of one cycle. Returns the refresh outcome once
    /// nothing is left pending; tickets this refresh is not waiting on are
    /// ignored.
    pub fn settle(
        &mut self,
        ticket: RefreshTicket,
        outcome: Result<(), &FetchError>,
    ) -> Option<RefreshOutcome> {
        let flight = self.in_flight.as_mut()?;
        let idx = flight.pending.iter().position(|t| *t == ticket)?;
        flight.pending.swap_remove(idx);

        if let Err(e) = outcome {
            if flight.first_failure.is_none() {
                flight.first_failure = Some(e.clone());
            }
        }

        if !flight.pending.is_empty() {
            return None;
        }

        let flight = self.in_flight.take()?;
        match flight.first_failure {
            Some(e) => {
                warn!(error = %e, "refresh settled with failure");
                Some(Err(e))
            }
            None => {
                info!("refresh settled");
                Some(Ok(()))
            }
        }
    }
}
