//! Cascade actions and the document paths they address.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::models::{DestinationId, FlightInfo, GlobalMarker, HotelInfo, ProcessKind};

/// Identifier of a trigger in the trigger table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TriggerId {
    DateAnchorChanged,
    DestinationSelectionChanged,
    PackageSelected,
    BookingsChanged,
    ActiveDestinationSwitched,
}

impl TriggerId {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerId::DateAnchorChanged => "date_anchor_changed",
            TriggerId::DestinationSelectionChanged => "destination_selection_changed",
            TriggerId::PackageSelected => "package_selected",
            TriggerId::BookingsChanged => "bookings_changed",
            TriggerId::ActiveDestinationSwitched => "active_destination_switched",
        }
    }
}

impl fmt::Display for TriggerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Addressable value locations within a destination.
///
/// Paths are relative to a destination; populate actions carry the
/// destination separately.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DocPath {
    #[serde(rename = "package.chosen_offer.flight")]
    ChosenOfferFlight,
    #[serde(rename = "package.chosen_offer.hotel")]
    ChosenOfferHotel,
    #[serde(rename = "transportation.flight")]
    TransportationFlight,
    #[serde(rename = "accommodation.hotel")]
    AccommodationHotel,
}

impl DocPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocPath::ChosenOfferFlight => "package.chosen_offer.flight",
            DocPath::ChosenOfferHotel => "package.chosen_offer.hotel",
            DocPath::TransportationFlight => "transportation.flight",
            DocPath::AccommodationHotel => "accommodation.hotel",
        }
    }

    /// Process whose payload holds the value.
    pub fn owner(&self) -> ProcessKind {
        match self {
            DocPath::ChosenOfferFlight | DocPath::ChosenOfferHotel => ProcessKind::Package,
            DocPath::TransportationFlight => ProcessKind::Transportation,
            DocPath::AccommodationHotel => ProcessKind::Accommodation,
        }
    }

    /// Whether a populate action may write to this path.
    ///
    /// Offer data is owned by the external selection step; only the derived
    /// slots accept writes.
    pub fn is_writable(&self) -> bool {
        matches!(self, DocPath::TransportationFlight | DocPath::AccommodationHotel)
    }
}

impl fmt::Display for DocPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocPath {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "package.chosen_offer.flight" => Ok(DocPath::ChosenOfferFlight),
            "package.chosen_offer.hotel" => Ok(DocPath::ChosenOfferHotel),
            "transportation.flight" => Ok(DocPath::TransportationFlight),
            "accommodation.hotel" => Ok(DocPath::AccommodationHotel),
            _ => Err(format!("Unknown document path: {s}")),
        }
    }
}

/// A value read from a [`DocPath`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Flight(FlightInfo),
    Hotel(HotelInfo),
}

/// One corrective step of a cascade plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Force a process back to its initial status and clear its payload.
    Reset {
        destination: DestinationId,
        process: ProcessKind,
        reason: String,
        triggered_by: TriggerId,
    },
    /// Copy a value between paths and stamp the target with provenance.
    Populate {
        destination: DestinationId,
        source_path: DocPath,
        target_path: DocPath,
        set_source: String,
        triggered_by: TriggerId,
    },
    /// Set or clear a process marker in the cascade state.
    DirtyFlag {
        destination: DestinationId,
        process: ProcessKind,
        dirty: bool,
        triggered_by: TriggerId,
    },
    /// Set or clear a global marker in the cascade state.
    GlobalDirtyFlag {
        marker: GlobalMarker,
        dirty: bool,
        triggered_by: TriggerId,
    },
}

/// Identity of an action's effect, ignoring who asked for it and why.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum EffectKey {
    Reset(DestinationId, ProcessKind),
    Populate(DestinationId, DocPath),
    DirtyFlag(DestinationId, ProcessKind, bool),
    GlobalDirtyFlag(GlobalMarker, bool),
}

impl Action {
    pub fn triggered_by(&self) -> TriggerId {
        match self {
            Action::Reset { triggered_by, .. }
            | Action::Populate { triggered_by, .. }
            | Action::DirtyFlag { triggered_by, .. }
            | Action::GlobalDirtyFlag { triggered_by, .. } => *triggered_by,
        }
    }

    /// Destination the action targets; `None` for global markers.
    pub fn destination(&self) -> Option<&DestinationId> {
        match self {
            Action::Reset { destination, .. }
            | Action::Populate { destination, .. }
            | Action::DirtyFlag { destination, .. } => Some(destination),
            Action::GlobalDirtyFlag { .. } => None,
        }
    }

    pub(crate) fn effect_key(&self) -> EffectKey {
        match self {
            Action::Reset {
                destination,
                process,
                ..
            } => EffectKey::Reset(destination.clone(), *process),
            Action::Populate {
                destination,
                target_path,
                ..
            } => EffectKey::Populate(destination.clone(), *target_path),
            Action::DirtyFlag {
                destination,
                process,
                dirty,
                ..
            } => EffectKey::DirtyFlag(destination.clone(), *process, *dirty),
            Action::GlobalDirtyFlag { marker, dirty, .. } => {
                EffectKey::GlobalDirtyFlag(*marker, *dirty)
            }
        }
    }
}
