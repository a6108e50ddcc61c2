//! Writer decorator that mirrors saved plans into SQLite query tables.

use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::{
    cascade::{Locator, PlanWriter},
    db::Database,
    error::Result,
    models::TripPlan,
};

/// Saves through an inner writer, then refreshes the SQLite mirror.
///
/// The mirror is strictly downstream: nothing in the cascade reads it back.
pub struct MirrorWriter<W> {
    inner: W,
    database_path: PathBuf,
}

impl<W: PlanWriter> MirrorWriter<W> {
    pub fn new(inner: W, database_path: impl AsRef<Path>) -> Self {
        Self {
            inner,
            database_path: database_path.as_ref().to_path_buf(),
        }
    }

    pub fn database_path(&self) -> &Path {
        &self.database_path
    }
}

impl<W: PlanWriter> MirrorWriter<W> {
    fn refresh(&self, plan: &TripPlan) -> Result<()> {
        let mut db = Database::new(&self.database_path)?;
        db.mirror_plan(plan)
    }
}

impl<W: PlanWriter> PlanWriter for MirrorWriter<W> {
    /// Saves through the inner writer, then refreshes the mirror.
    ///
    /// Once the inner save has succeeded the document is persisted, so a
    /// mirror failure is logged and the save still reports success. The
    /// next successful save rebuilds the mirror in full.
    fn save(&self, plan: &TripPlan, locator: &Locator) -> Result<Locator> {
        let saved = self.inner.save(plan, locator)?;

        match self.refresh(plan) {
            Ok(()) => debug!(
                "Mirrored {} destinations into {}",
                plan.destinations.len(),
                self.database_path.display()
            ),
            Err(e) => warn!(
                "Saved {saved} but could not refresh mirror {}: {e}",
                self.database_path.display()
            ),
        }

        Ok(saved)
    }
}
