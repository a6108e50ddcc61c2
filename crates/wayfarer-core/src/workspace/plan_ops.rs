//! Document operations for the Workspace.

use jiff::Timestamp;
use log::info;

use super::{blocking, writer_for, Workspace};
use crate::{
    cascade::PlanWriter,
    error::{Result, WayfarerError},
    models::TripPlan,
    params::InitPlan,
    store::JsonFileStore,
};

impl Workspace {
    /// Loads the plan document.
    pub async fn load(&self) -> Result<TripPlan> {
        let plan_path = self.plan_path.clone();
        blocking(move || JsonFileStore::read(&plan_path)).await
    }

    /// Creates a new document with a single, active destination.
    ///
    /// # Errors
    ///
    /// Fails with `WayfarerError::InvalidInput` if a document already exists
    /// and `force` is not set.
    pub async fn create(&self, params: &InitPlan) -> Result<TripPlan> {
        let plan_path = self.plan_path.clone();
        let mirror_path = self.mirror_path.clone();
        let locator = self.locator();
        let params = params.clone();

        blocking(move || {
            if plan_path.exists() && !params.force {
                return Err(WayfarerError::invalid_input("plan_file").with_reason(format!(
                    "{} already exists; pass --force to replace it",
                    plan_path.display()
                )));
            }

            let mut plan = TripPlan::new(params.destination.clone(), Timestamp::now());
            if let Some(destination) = plan.destination_mut(&params.destination) {
                destination.display_name = params.display_name;
            }

            writer_for(mirror_path.as_deref()).save(&plan, &locator)?;
            info!("Created plan at {locator}");
            Ok(plan)
        })
        .await
    }

    /// Loads the document, applies `edit` at the current time, and saves the
    /// result if the edit succeeded.
    ///
    /// Nothing is written when `edit` returns an error.
    pub async fn edit<T, F>(&self, edit: F) -> Result<(TripPlan, T)>
    where
        F: FnOnce(&mut TripPlan, Timestamp) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let plan_path = self.plan_path.clone();
        let mirror_path = self.mirror_path.clone();
        let locator = self.locator();

        blocking(move || {
            let mut plan = JsonFileStore::read(&plan_path)?;
            let outcome = edit(&mut plan, Timestamp::now())?;
            writer_for(mirror_path.as_deref()).save(&plan, &locator)?;
            Ok((plan, outcome))
        })
        .await
    }
}
