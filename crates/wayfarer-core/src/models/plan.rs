//! Root plan document.

use std::collections::BTreeMap;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{CascadeState, Destination, DestinationId};

/// The whole trip plan: destinations plus the cascade side-table.
///
/// Destinations live in an ordered map so every walk over them, and so every
/// cascade plan computed from them, is deterministic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TripPlan {
    /// Destination currently in focus
    pub active_destination: DestinationId,

    /// All destinations keyed by id
    #[serde(default)]
    pub destinations: BTreeMap<DestinationId, Destination>,

    /// Dirty markers, kept apart from the domain payload
    #[serde(default)]
    pub cascade_state: CascadeState,
}

impl TripPlan {
    /// A plan with a single, active destination whose processes are empty.
    ///
    /// The focus marker is primed with the first destination so a fresh plan
    /// computes an empty cascade.
    pub fn new(first: DestinationId, at: Timestamp) -> Self {
        let mut destinations = BTreeMap::new();
        destinations.insert(first.clone(), Destination::new(at));

        let mut cascade_state = CascadeState::default();
        cascade_state.global.active_destination_last = Some(first.clone());

        Self {
            active_destination: first,
            destinations,
            cascade_state,
        }
    }

    pub fn destination(&self, id: &DestinationId) -> Option<&Destination> {
        self.destinations.get(id)
    }

    pub fn destination_mut(&mut self, id: &DestinationId) -> Option<&mut Destination> {
        self.destinations.get_mut(id)
    }

    pub fn active(&self) -> Option<&Destination> {
        self.destination(&self.active_destination)
    }
}
