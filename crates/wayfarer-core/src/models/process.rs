//! Process slots and their payloads.

use std::fmt;

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use super::{FlightInfo, HotelInfo, ItineraryDay, Offer, ProcessStatus};

/// A process slot: status and timestamp shared by every kind, plus a
/// kind-specific payload.
///
/// The payload is flattened into the slot when serialized, so a package slot
/// reads `{"status": "selected", "updated_at": ..., "chosen_offer": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Process<P> {
    #[serde(default)]
    pub status: ProcessStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,

    #[serde(flatten)]
    pub payload: P,
}

impl<P: Default> Process<P> {
    /// An empty slot in `status`, stamped at `at`.
    pub fn empty(status: ProcessStatus, at: Timestamp) -> Self {
        Self {
            status,
            updated_at: Some(at),
            payload: P::default(),
        }
    }
}

/// A value that may have been copied in from an upstream record.
///
/// `set_source` is only ever written by the cascade's populate action; a hand
/// entered value leaves it empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Sourced<T> {
    #[serde(flatten)]
    pub value: T,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_source: Option<String>,
}

impl<T> Sourced<T> {
    /// A hand-entered value without provenance.
    pub fn manual(value: T) -> Self {
        Self {
            value,
            set_source: None,
        }
    }

    /// A value derived from the upstream record `source`.
    pub fn derived(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            set_source: Some(source.into()),
        }
    }

    pub fn is_derived(&self) -> bool {
        self.set_source.is_some()
    }
}

/// Inclusive range of travel dates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: Date,
    pub end: Date,
}

impl DateRange {
    /// Builds a range, rejecting an end before the start.
    pub fn new(start: Date, end: Date) -> Result<Self, String> {
        if end < start {
            return Err(format!("end date {end} is before start date {start}"));
        }
        Ok(Self { start, end })
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct DateAnchor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmed_dates: Option<DateRange>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct DestinationSelection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub candidates: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Package {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chosen_offer: Option<Offer>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub candidates: Vec<Offer>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Transportation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight: Option<Sourced<FlightInfo>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Accommodation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel: Option<Sourced<HotelInfo>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Itinerary {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub days: Vec<ItineraryDay>,
}
