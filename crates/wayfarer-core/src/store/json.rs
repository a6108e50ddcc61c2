//! JSON file persistence for plan documents.

use std::{fs, path::Path};

use log::debug;

use crate::{
    cascade::{Locator, PlanLoader, PlanWriter},
    error::{IoResultExt, Result, WayfarerError},
    models::TripPlan,
};

/// Reads and writes plan documents as pretty-printed JSON files.
///
/// Writes go to a sibling temporary file that is then renamed over the
/// target, so a reader never sees a half-written document.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFileStore;

impl JsonFileStore {
    pub fn new() -> Self {
        Self
    }

    /// Reads the document at `path`.
    pub fn read(path: &Path) -> Result<TripPlan> {
        let raw = fs::read_to_string(path).fs_context(path)?;
        serde_json::from_str(&raw).map_err(|source| WayfarerError::MalformedDocument {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Writes `plan` to `path`, creating parent directories as needed.
    pub fn write(plan: &TripPlan, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).fs_context(parent)?;
        }

        let mut body = serde_json::to_string_pretty(plan)?;
        body.push('\n');

        let staging = path.with_extension("json.tmp");
        fs::write(&staging, body).fs_context(&staging)?;
        fs::rename(&staging, path).fs_context(path)?;

        debug!("Wrote plan document to {}", path.display());
        Ok(())
    }
}

impl PlanLoader for JsonFileStore {
    fn load(&self, locator: &Locator) -> Result<TripPlan> {
        Self::read(locator.as_path())
    }
}

impl PlanWriter for JsonFileStore {
    fn save(&self, plan: &TripPlan, locator: &Locator) -> Result<Locator> {
        Self::write(plan, locator.as_path())?;
        Ok(locator.clone())
    }
}
