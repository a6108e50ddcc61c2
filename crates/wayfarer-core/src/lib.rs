//! Core library for the wayfarer trip planner.
//!
//! A trip plan is a JSON document holding one or more destinations, each with
//! six planning processes (dates, destination choice, package, flights,
//! hotels, itinerary). When an upstream process changes, the cascade engine
//! works out which downstream work is now stale and either resets it or fills
//! it in from the changed data.
//!
//! # Layers
//!
//! - [`models`]: the typed plan document
//! - [`cascade`]: pure plan computation and copy-on-write application, plus
//!   the load/compute/apply/save [`Runner`](cascade::Runner)
//! - [`store`]: JSON file persistence and the SQLite mirror writer
//! - [`operations`]: upstream edits that raise dirty markers
//! - [`workspace`] and [`handlers`]: the async façade interfaces call into
//! - [`display`]: markdown `Display` output for the terminal renderer
//!
//! # Quick Start
//!
//! ```rust
//! use jiff::{civil::date, Timestamp};
//! use wayfarer_core::{
//!     cascade::{apply, compute_at},
//!     models::{DestinationId, ProcessKind, ProcessStatus, TripPlan},
//!     operations::set_confirmed_dates,
//!     params::SetDates,
//! };
//!
//! let kyoto = DestinationId::new("kyoto_2026");
//! let mut plan = TripPlan::new(kyoto.clone(), Timestamp::UNIX_EPOCH);
//! set_confirmed_dates(
//!     &mut plan,
//!     &SetDates {
//!         destination: kyoto.clone(),
//!         start: date(2026, 2, 24),
//!         end: date(2026, 2, 28),
//!     },
//!     Timestamp::UNIX_EPOCH,
//! )
//! .unwrap();
//!
//! let cascade = compute_at(&plan, Timestamp::UNIX_EPOCH);
//! let (updated, errors) = apply(&plan, &cascade);
//! assert!(errors.is_empty());
//! assert_eq!(
//!     updated.destination(&kyoto).unwrap().status(ProcessKind::Package),
//!     ProcessStatus::Pending
//! );
//! assert!(compute_at(&updated, Timestamp::UNIX_EPOCH).is_empty());
//! ```

pub mod cascade;
pub mod db;
pub mod display;
pub mod error;
pub mod handlers;
pub mod models;
pub mod operations;
pub mod params;
pub mod store;
pub mod workspace;

// Re-export commonly used types
pub use cascade::{
    apply, compute, Action, ApplyError, CascadePlan, Locator, PlanLoader, PlanWriter, RunOptions,
    RunResult, Runner,
};
pub use db::Database;
pub use display::{LocalDateTime, OperationStatus};
pub use error::{Result, WayfarerError};
pub use handlers::{
    handle_add_destination, handle_init, handle_mark_dirty, handle_run_cascade,
    handle_select_offer, handle_set_dates, handle_set_process_status, handle_show,
    handle_switch_destination,
};
pub use models::{DestinationId, ProcessKind, ProcessStatus, TripPlan};
pub use store::{JsonFileStore, MirrorWriter};
pub use workspace::{Workspace, WorkspaceBuilder};
