//! Invalidation bookkeeping kept beside, never inside, the domain payload.

use std::collections::BTreeMap;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{DestinationId, ProcessKind};

/// Dirty flag for one process or global marker.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct DirtyMarker {
    pub dirty: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_changed: Option<Timestamp>,
}

/// Cross-cutting markers that do not belong to a single destination.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GlobalMarker {
    /// Focus moved to another destination
    ActiveDestination,
}

impl GlobalMarker {
    pub fn as_str(&self) -> &'static str {
        match self {
            GlobalMarker::ActiveDestination => "active_destination",
        }
    }
}

/// The `global` bag of the cascade state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct GlobalState {
    /// Active destination as of the last cascade pass
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_destination_last: Option<DestinationId>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub markers: BTreeMap<GlobalMarker, DirtyMarker>,
}

/// Side-table of dirty markers keyed by destination and process.
///
/// Entries are created lazily the first time something marks them, so an
/// absent entry reads as clean.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CascadeState {
    #[serde(default)]
    pub global: GlobalState,

    #[serde(default)]
    pub destinations: BTreeMap<DestinationId, BTreeMap<ProcessKind, DirtyMarker>>,
}

impl CascadeState {
    pub fn marker(&self, destination: &DestinationId, process: ProcessKind) -> Option<&DirtyMarker> {
        self.destinations
            .get(destination)
            .and_then(|markers| markers.get(&process))
    }

    pub fn is_dirty(&self, destination: &DestinationId, process: ProcessKind) -> bool {
        self.marker(destination, process)
            .is_some_and(|marker| marker.dirty)
    }

    /// Writes a process marker, creating the entry if needed.
    pub fn set_dirty(
        &mut self,
        destination: &DestinationId,
        process: ProcessKind,
        dirty: bool,
        at: Timestamp,
    ) {
        self.destinations
            .entry(destination.clone())
            .or_default()
            .insert(
                process,
                DirtyMarker {
                    dirty,
                    last_changed: Some(at),
                },
            );
    }

    pub fn global_marker(&self, marker: GlobalMarker) -> Option<&DirtyMarker> {
        self.global.markers.get(&marker)
    }

    pub fn set_global_dirty(&mut self, marker: GlobalMarker, dirty: bool, at: Timestamp) {
        self.global.markers.insert(
            marker,
            DirtyMarker {
                dirty,
                last_changed: Some(at),
            },
        );
    }

    /// Every `(destination, process)` currently marked dirty, in key order.
    pub fn dirty_processes(&self) -> Vec<(&DestinationId, ProcessKind)> {
        self.destinations
            .iter()
            .flat_map(|(destination, markers)| {
                markers
                    .iter()
                    .filter(|(_, marker)| marker.dirty)
                    .map(move |(process, _)| (destination, *process))
            })
            .collect()
    }
}
