//! Parameter structures for wayfarer operations.
//!
//! These are interface-agnostic: the CLI defines its own clap-derived argument
//! structs and converts them into the types here, so the core never depends
//! on a command-line framework.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │  Core Params    │    │   Operations    │
//! │  (clap derives) │───▶│ (serde derives) │───▶│   & Runner      │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::{
    cascade::{Locator, RunOptions},
    models::{DestinationId, Offer, ProcessKind, ProcessStatus},
};

/// Parameters for creating a new plan document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitPlan {
    /// First destination; becomes the active one
    pub destination: DestinationId,
    /// Optional human-facing name for the destination
    pub display_name: Option<String>,
    /// Replace an existing document at the plan path
    #[serde(default)]
    pub force: bool,
}

/// Parameters for adding a destination to an existing plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddDestination {
    pub id: DestinationId,
    pub display_name: Option<String>,
}

/// Parameters for moving focus to another destination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwitchDestination {
    pub id: DestinationId,
}

/// Parameters for confirming travel dates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetDates {
    pub destination: DestinationId,
    /// First day of travel
    pub start: Date,
    /// Last day of travel, inclusive
    pub end: Date,
}

/// Parameters for choosing a package offer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectOffer {
    pub destination: DestinationId,
    /// The offer record, usually produced by an upstream scraper
    pub offer: Offer,
}

/// Parameters for setting a process status by hand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetProcessStatus {
    pub destination: DestinationId,
    pub process: ProcessKind,
    pub status: ProcessStatus,
}

/// Parameters for marking a process dirty by hand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkDirty {
    pub destination: DestinationId,
    pub process: ProcessKind,
}

/// Parameters for one cascade pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunCascade {
    /// Apply and save; otherwise only report what would change
    #[serde(default)]
    pub apply: bool,
    /// Read from here instead of the configured plan path
    pub input: Option<String>,
    /// Write here instead of back to the input
    pub output: Option<String>,
}

impl From<&RunCascade> for RunOptions {
    fn from(params: &RunCascade) -> Self {
        RunOptions {
            dry_run: !params.apply,
            input: params.input.as_deref().map(Locator::new),
            output: params.output.as_deref().map(Locator::new),
        }
    }
}
