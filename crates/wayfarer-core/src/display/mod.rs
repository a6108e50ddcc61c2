//! Markdown formatting for plans, cascade plans and run results.
//!
//! Domain models implement [`std::fmt::Display`] directly; wrappers in this
//! module cover output that needs context a model does not carry on its own
//! (a destination together with its dirty markers, an optional timestamp).
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  TripPlan,      │    │ Display impls & │    │   Markdown      │
//! │  CascadePlan    │───▶│ view wrappers   │───▶│  (terminal)     │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! - [`models`]: plan dashboard, process and status names
//! - [`cascade`]: actions, cascade plans and run results
//! - [`status`]: one-line edit confirmations
//! - [`datetime`]: local timezone timestamps
//!
//! ```rust
//! use jiff::Timestamp;
//! use wayfarer_core::{cascade::compute_at, models::{DestinationId, TripPlan}};
//!
//! let plan = TripPlan::new(DestinationId::new("kyoto_2026"), Timestamp::UNIX_EPOCH);
//! let dashboard = plan.to_string();
//! assert!(dashboard.contains("## kyoto_2026 (active)"));
//! assert!(dashboard.contains("Cascade: clean"));
//!
//! let cascade = compute_at(&plan, Timestamp::UNIX_EPOCH);
//! assert!(cascade.to_string().contains("Nothing to do"));
//! ```

pub mod cascade;
pub mod datetime;
pub mod models;
pub mod status;

pub use datetime::{LocalDateTime, MaybeDateTime};
pub use models::DestinationView;
pub use status::OperationStatus;
