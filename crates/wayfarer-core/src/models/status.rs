//! Process kinds and their status enumerations.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The six fixed planning stages every destination carries.
///
/// Variants are declared in dependency order, so the derived `Ord` walks the
/// process graph from upstream to downstream.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ProcessKind {
    /// Confirmation of the travel dates everything else hangs off
    DateAnchor,

    /// Choice of where to go within the destination
    DestinationSelection,

    /// Package offer search and selection
    Package,

    /// Flights
    Transportation,

    /// Hotels
    Accommodation,

    /// Day-by-day schedule
    Itinerary,
}

impl ProcessKind {
    /// Every process kind, upstream first.
    pub const ALL: [ProcessKind; 6] = [
        ProcessKind::DateAnchor,
        ProcessKind::DestinationSelection,
        ProcessKind::Package,
        ProcessKind::Transportation,
        ProcessKind::Accommodation,
        ProcessKind::Itinerary,
    ];

    /// Processes invalidated when the date anchor moves.
    pub const DATE_DEPENDENTS: [ProcessKind; 5] = [
        ProcessKind::DestinationSelection,
        ProcessKind::Package,
        ProcessKind::Transportation,
        ProcessKind::Accommodation,
        ProcessKind::Itinerary,
    ];

    /// Processes invalidated when the destination selection changes.
    pub const SELECTION_DEPENDENTS: [ProcessKind; 4] = [
        ProcessKind::Package,
        ProcessKind::Transportation,
        ProcessKind::Accommodation,
        ProcessKind::Itinerary,
    ];

    /// Convert to the document's string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessKind::DateAnchor => "date_anchor",
            ProcessKind::DestinationSelection => "destination_selection",
            ProcessKind::Package => "package",
            ProcessKind::Transportation => "transportation",
            ProcessKind::Accommodation => "accommodation",
            ProcessKind::Itinerary => "itinerary",
        }
    }

    /// Status a process of this kind starts in, and returns to on reset.
    pub fn initial_status(&self) -> ProcessStatus {
        ProcessStatus::Pending
    }

    /// Statuses a process of this kind may hold.
    pub fn allowed_statuses(&self) -> &'static [ProcessStatus] {
        use ProcessStatus::*;

        match self {
            ProcessKind::DateAnchor => &[Pending, Researching, Confirmed, Skipped],
            ProcessKind::DestinationSelection => {
                &[Pending, Researching, Researched, Selected, Confirmed, Skipped]
            }
            ProcessKind::Package => &[
                Pending, Researching, Researched, Selected, Booking, Booked, Confirmed, Skipped,
            ],
            ProcessKind::Transportation | ProcessKind::Accommodation => &[
                Pending, Researching, Researched, Selected, Populated, Booking, Booked, Confirmed,
                Skipped,
            ],
            ProcessKind::Itinerary => &[Pending, Researching, Researched, Confirmed, Skipped],
        }
    }

    /// Whether `status` belongs to this kind's enumeration.
    pub fn allows(&self, status: ProcessStatus) -> bool {
        self.allowed_statuses().contains(&status)
    }
}

impl FromStr for ProcessKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "date_anchor" | "dates" => Ok(ProcessKind::DateAnchor),
            "destination_selection" | "destination" => Ok(ProcessKind::DestinationSelection),
            "package" => Ok(ProcessKind::Package),
            "transportation" | "flight" => Ok(ProcessKind::Transportation),
            "accommodation" | "hotel" => Ok(ProcessKind::Accommodation),
            "itinerary" => Ok(ProcessKind::Itinerary),
            _ => Err(format!("Invalid process: {s}")),
        }
    }
}

/// Type-safe enumeration of process statuses.
///
/// The main chain runs `pending → researching → researched → selected →
/// populated → booking → booked → confirmed`; `skipped` is a terminal outside
/// the chain.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProcessStatus {
    /// Nothing done yet
    #[default]
    Pending,

    /// Options are being gathered
    Researching,

    /// Options gathered, nothing chosen
    Researched,

    /// A choice has been made
    Selected,

    /// Filled in from an upstream selection
    Populated,

    /// Reservation in flight
    Booking,

    /// Reservation made
    Booked,

    /// Reservation confirmed by the provider
    Confirmed,

    /// Deliberately not needed
    Skipped,
}

impl FromStr for ProcessStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(ProcessStatus::Pending),
            "researching" => Ok(ProcessStatus::Researching),
            "researched" => Ok(ProcessStatus::Researched),
            "selected" => Ok(ProcessStatus::Selected),
            "populated" => Ok(ProcessStatus::Populated),
            "booking" => Ok(ProcessStatus::Booking),
            "booked" => Ok(ProcessStatus::Booked),
            "confirmed" => Ok(ProcessStatus::Confirmed),
            "skipped" => Ok(ProcessStatus::Skipped),
            _ => Err(format!("Invalid process status: {s}")),
        }
    }
}

impl ProcessStatus {
    /// Convert to the document's string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessStatus::Pending => "pending",
            ProcessStatus::Researching => "researching",
            ProcessStatus::Researched => "researched",
            ProcessStatus::Selected => "selected",
            ProcessStatus::Populated => "populated",
            ProcessStatus::Booking => "booking",
            ProcessStatus::Booked => "booked",
            ProcessStatus::Confirmed => "confirmed",
            ProcessStatus::Skipped => "skipped",
        }
    }

    /// Get status with consistent icon formatting for display.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use wayfarer_core::models::ProcessStatus;
    ///
    /// assert_eq!(ProcessStatus::Booked.with_icon(), "✓ booked");
    /// assert_eq!(ProcessStatus::Pending.with_icon(), "○ pending");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            ProcessStatus::Pending => "○ pending",
            ProcessStatus::Researching => "➤ researching",
            ProcessStatus::Researched => "➤ researched",
            ProcessStatus::Selected => "➤ selected",
            ProcessStatus::Populated => "➤ populated",
            ProcessStatus::Booking => "➤ booking",
            ProcessStatus::Booked => "✓ booked",
            ProcessStatus::Confirmed => "✓ confirmed",
            ProcessStatus::Skipped => "⊘ skipped",
        }
    }
}
