//! Destination model: the fixed set of process slots.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{
    Accommodation, DateAnchor, DestinationSelection, Itinerary, Package, Process, ProcessKind,
    ProcessStatus, Transportation,
};

/// One destination of a trip and its six planning processes.
///
/// Every slot always exists; resetting a process zeroes its payload but never
/// removes the slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Destination {
    /// Human-facing name (e.g. "Kyoto, Feb 2026")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default)]
    pub date_anchor: Process<DateAnchor>,

    #[serde(default)]
    pub destination_selection: Process<DestinationSelection>,

    #[serde(default)]
    pub package: Process<Package>,

    #[serde(default)]
    pub transportation: Process<Transportation>,

    #[serde(default)]
    pub accommodation: Process<Accommodation>,

    #[serde(default)]
    pub itinerary: Process<Itinerary>,
}

impl Destination {
    /// A destination whose processes are all empty and in their initial
    /// status.
    pub fn new(at: Timestamp) -> Self {
        let mut destination = Self::default();
        for kind in ProcessKind::ALL {
            destination.reset(kind, at);
        }
        destination
    }

    /// Current status of the `kind` slot.
    pub fn status(&self, kind: ProcessKind) -> ProcessStatus {
        match kind {
            ProcessKind::DateAnchor => self.date_anchor.status,
            ProcessKind::DestinationSelection => self.destination_selection.status,
            ProcessKind::Package => self.package.status,
            ProcessKind::Transportation => self.transportation.status,
            ProcessKind::Accommodation => self.accommodation.status,
            ProcessKind::Itinerary => self.itinerary.status,
        }
    }

    /// Last modification time of the `kind` slot.
    pub fn updated_at(&self, kind: ProcessKind) -> Option<Timestamp> {
        match kind {
            ProcessKind::DateAnchor => self.date_anchor.updated_at,
            ProcessKind::DestinationSelection => self.destination_selection.updated_at,
            ProcessKind::Package => self.package.updated_at,
            ProcessKind::Transportation => self.transportation.updated_at,
            ProcessKind::Accommodation => self.accommodation.updated_at,
            ProcessKind::Itinerary => self.itinerary.updated_at,
        }
    }

    /// Sets the status of the `kind` slot and stamps it.
    pub fn set_status(&mut self, kind: ProcessKind, status: ProcessStatus, at: Timestamp) {
        let (slot_status, slot_updated) = match kind {
            ProcessKind::DateAnchor => (&mut self.date_anchor.status, &mut self.date_anchor.updated_at),
            ProcessKind::DestinationSelection => (
                &mut self.destination_selection.status,
                &mut self.destination_selection.updated_at,
            ),
            ProcessKind::Package => (&mut self.package.status, &mut self.package.updated_at),
            ProcessKind::Transportation => (
                &mut self.transportation.status,
                &mut self.transportation.updated_at,
            ),
            ProcessKind::Accommodation => (
                &mut self.accommodation.status,
                &mut self.accommodation.updated_at,
            ),
            ProcessKind::Itinerary => (&mut self.itinerary.status, &mut self.itinerary.updated_at),
        };
        *slot_status = status;
        *slot_updated = Some(at);
    }

    /// Returns the `kind` slot to its initial status with an empty payload.
    pub fn reset(&mut self, kind: ProcessKind, at: Timestamp) {
        let initial = kind.initial_status();
        match kind {
            ProcessKind::DateAnchor => self.date_anchor = Process::empty(initial, at),
            ProcessKind::DestinationSelection => {
                self.destination_selection = Process::empty(initial, at)
            }
            ProcessKind::Package => self.package = Process::empty(initial, at),
            ProcessKind::Transportation => self.transportation = Process::empty(initial, at),
            ProcessKind::Accommodation => self.accommodation = Process::empty(initial, at),
            ProcessKind::Itinerary => self.itinerary = Process::empty(initial, at),
        }
    }

    /// Provenance of the derived value held by the `kind` slot, if any.
    pub fn set_source(&self, kind: ProcessKind) -> Option<&str> {
        match kind {
            ProcessKind::Transportation => self
                .transportation
                .payload
                .flight
                .as_ref()
                .and_then(|flight| flight.set_source.as_deref()),
            ProcessKind::Accommodation => self
                .accommodation
                .payload
                .hotel
                .as_ref()
                .and_then(|hotel| hotel.set_source.as_deref()),
            _ => None,
        }
    }
}
