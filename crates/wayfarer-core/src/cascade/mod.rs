//! Cascade invalidation and population engine.
//!
//! Changing upstream data (travel dates, the destination choice) invalidates
//! downstream processes, and selecting a package offer fills in the flight
//! and hotel processes from that offer. This module turns the dirty markers
//! in a plan's cascade state into an ordered list of corrective actions and
//! applies them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │   Loader    │───▶│  compute()  │───▶│   apply()   │───▶│   Writer    │
//! │ (PlanLoader)│    │ TripPlan →  │    │ (TripPlan,  │    │ (PlanWriter)│
//! │             │    │ CascadePlan │    │  plan) → …  │    │             │
//! └─────────────┘    └─────────────┘    └─────────────┘    └─────────────┘
//!        └───────────────────── Runner ──────────────────────────┘
//! ```
//!
//! - [`triggers`]: the ordered, declarative trigger table
//! - [`compute`](mod@compute): pure `TripPlan → CascadePlan`
//! - [`apply`](mod@apply): pure `(TripPlan, CascadePlan) → (TripPlan, errors)`
//! - [`runner`]: the only piece that touches storage, through injected
//!   [`PlanLoader`] and [`PlanWriter`] implementations
//!
//! # Key Invariants
//!
//! 1. **Snapshot evaluation**: every trigger sees the document as it was
//!    before the pass, so no trigger reacts to its own effects.
//! 2. **Stable ordering**: actions follow trigger priority, then destination
//!    id, then each trigger's declared order.
//! 3. **Idempotence**: applying a plan consumes the markers that caused it, so
//!    computing again without an outside change yields no actions.
//! 4. **Provenance**: only populate actions write `set_source`.
//!
//! # Example
//!
//! ```rust
//! use jiff::Timestamp;
//! use wayfarer_core::{
//!     cascade::{apply, compute_at},
//!     models::{DestinationId, ProcessKind, TripPlan},
//! };
//!
//! let kyoto = DestinationId::new("kyoto_2026");
//! let mut plan = TripPlan::new(kyoto.clone(), Timestamp::UNIX_EPOCH);
//! plan.cascade_state
//!     .set_dirty(&kyoto, ProcessKind::DateAnchor, true, Timestamp::UNIX_EPOCH);
//!
//! let cascade = compute_at(&plan, Timestamp::UNIX_EPOCH);
//! assert_eq!(cascade.actions.len(), 6);
//!
//! let (updated, errors) = apply(&plan, &cascade);
//! assert!(errors.is_empty());
//! assert!(compute_at(&updated, Timestamp::UNIX_EPOCH).is_empty());
//! ```

pub mod action;
pub mod apply;
pub mod compute;
pub mod runner;
pub mod triggers;

#[cfg(test)]
mod tests;

pub use action::{Action, DocPath, FieldValue, TriggerId};
pub use apply::{apply, read_path, ApplyError};
pub use compute::{compute, compute_at, CascadePlan};
pub use runner::{Locator, PlanLoader, PlanWriter, RunOptions, RunResult, Runner};
pub use triggers::{trigger, Trigger, TRIGGERS};
