//! Data models for trip plans.
//!
//! This module contains the typed shape of the plan document: destinations,
//! their six process slots, the offer records those slots refer to, and the
//! cascade-state side-table of dirty markers. Display implementations for
//! these models are located in [`crate::display::models`] to keep data
//! structures apart from presentation.
//!
//! # Document Layout
//!
//! ```text
//! TripPlan
//! ├── active_destination
//! ├── destinations: { id → Destination }
//! │   └── date_anchor │ destination_selection │ package
//! │       transportation │ accommodation │ itinerary
//! │         (status, updated_at, payload)
//! └── cascade_state
//!     ├── global: active_destination_last, markers
//!     └── destinations: { id → { process → DirtyMarker } }
//! ```
//!
//! A process's `status` and its dirty marker are independent axes: a flight
//! can be `booked` and dirty at the same time, meaning it was booked against
//! data that has since changed.
//!
//! # Examples
//!
//! ```rust
//! use jiff::Timestamp;
//! use wayfarer_core::models::{DestinationId, ProcessKind, ProcessStatus, TripPlan};
//!
//! let plan = TripPlan::new(DestinationId::new("kyoto_2026"), Timestamp::UNIX_EPOCH);
//! let kyoto = plan.active().unwrap();
//! assert_eq!(kyoto.status(ProcessKind::Package), ProcessStatus::Pending);
//! assert!(plan.cascade_state.dirty_processes().is_empty());
//! ```

pub mod cascade_state;
pub mod destination;
pub mod ids;
pub mod itinerary;
pub mod offer;
pub mod plan;
pub mod process;
pub mod status;


pub use cascade_state::{CascadeState, DirtyMarker, GlobalMarker, GlobalState};
pub use destination::Destination;
pub use ids::DestinationId;
pub use itinerary::{Activity, ItineraryDay, Session, TimeOfDay};
pub use offer::{Availability, BestValue, DatePricing, FlightInfo, FlightSegment, HotelInfo, Offer, OfferType};
pub use plan::TripPlan;
pub use process::{
    Accommodation, DateAnchor, DateRange, DestinationSelection, Itinerary, Package, Process,
    Sourced, Transportation,
};
pub use status::{ProcessKind, ProcessStatus};
