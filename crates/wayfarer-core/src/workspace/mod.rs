//! Async façade over a plan document on disk.
//!
//! A [`Workspace`] knows where the plan document lives and, optionally, where
//! its SQLite mirror lives. Every method performs one logical unit of work
//! (load, edit and save, or a full cascade run) on a blocking thread so the
//! caller's runtime stays responsive.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Handlers     │    │   Workspace     │    │  JsonFileStore  │
//! │  (handlers.rs)  │───▶│ (plan_ops,      │───▶│  + MirrorWriter │
//! │                 │    │  cascade_ops)   │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! - [`builder`]: resolves paths (XDG default) and prepares directories
//! - [`plan_ops`]: load, create and edit the document
//! - [`cascade_ops`]: run a cascade pass through the [`Runner`]
//!
//! # Examples
//!
//! ```rust
//! use wayfarer_core::{models::DestinationId, params::InitPlan, WorkspaceBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let dir = tempfile::tempdir()?;
//! let workspace = WorkspaceBuilder::new()
//!     .with_plan_path(Some(dir.path().join("plan.json")))
//!     .build()
//!     .await?;
//!
//! let plan = workspace
//!     .create(&InitPlan {
//!         destination: DestinationId::new("kyoto_2026"),
//!         display_name: None,
//!         force: false,
//!     })
//!     .await?;
//! assert_eq!(plan.active_destination.as_str(), "kyoto_2026");
//! # Ok(())
//! # }
//! ```
//!
//! [`Runner`]: crate::cascade::Runner

use std::path::{Path, PathBuf};

use tokio::task;

use crate::{
    cascade::{Locator, PlanWriter},
    error::{Result, WayfarerError},
    store::{JsonFileStore, MirrorWriter},
};

pub mod builder;
pub mod cascade_ops;
pub mod plan_ops;

#[cfg(test)]
mod tests;

pub use builder::WorkspaceBuilder;

/// Handle on one plan document and its optional mirror.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub(crate) plan_path: PathBuf,
    pub(crate) mirror_path: Option<PathBuf>,
}

impl Workspace {
    pub(crate) fn new(plan_path: PathBuf, mirror_path: Option<PathBuf>) -> Self {
        Self {
            plan_path,
            mirror_path,
        }
    }

    /// Path of the plan document.
    pub fn plan_path(&self) -> &Path {
        &self.plan_path
    }

    /// Path of the SQLite mirror, if one is configured.
    pub fn mirror_path(&self) -> Option<&Path> {
        self.mirror_path.as_deref()
    }

    pub(crate) fn locator(&self) -> Locator {
        Locator::from(self.plan_path.as_path())
    }
}

/// The writer every save goes through: plain JSON, or JSON plus mirror.
pub(crate) fn writer_for(mirror_path: Option<&Path>) -> Box<dyn PlanWriter> {
    match mirror_path {
        Some(path) => Box::new(MirrorWriter::new(JsonFileStore, path)),
        None => Box::new(JsonFileStore),
    }
}

/// Runs blocking document work off the async runtime.
pub(crate) async fn blocking<T, F>(work: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    task::spawn_blocking(work)
        .await
        .map_err(|e| WayfarerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
}
