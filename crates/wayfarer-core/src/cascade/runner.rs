//! Load → compute → apply → persist orchestration.

use std::{fmt, path::Path};

use log::info;
use serde::{Deserialize, Serialize};

use crate::{error::Result, models::TripPlan};

use super::{apply::apply, compute::compute, CascadePlan};

/// Opaque address of a persisted plan document.
///
/// File-backed stores read it as a path; other stores may read it as a key
/// or URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locator(String);

impl Locator {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&Path> for Locator {
    fn from(path: &Path) -> Self {
        Self(path.to_string_lossy().into_owned())
    }
}

/// Reads a persisted plan.
pub trait PlanLoader {
    /// Loads the document at `locator`.
    ///
    /// # Errors
    ///
    /// Fails when the document cannot be read or does not have the expected
    /// shape; nothing downstream runs in that case.
    fn load(&self, locator: &Locator) -> Result<TripPlan>;
}

/// Persists a plan.
pub trait PlanWriter {
    /// Saves `plan` at `locator` and returns where it actually landed.
    fn save(&self, plan: &TripPlan, locator: &Locator) -> Result<Locator>;
}

impl<L: PlanLoader + ?Sized> PlanLoader for Box<L> {
    fn load(&self, locator: &Locator) -> Result<TripPlan> {
        (**self).load(locator)
    }
}

impl<W: PlanWriter + ?Sized> PlanWriter for Box<W> {
    fn save(&self, plan: &TripPlan, locator: &Locator) -> Result<Locator> {
        (**self).save(plan, locator)
    }
}

/// What a run should do.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Compute only; never apply or persist
    pub dry_run: bool,
    /// Read from here instead of the runner's default location
    pub input: Option<Locator>,
    /// Write here instead of back to the input location
    pub output: Option<Locator>,
}

impl RunOptions {
    /// Dry run against the default location.
    pub fn dry_run() -> Self {
        Self {
            dry_run: true,
            ..Self::default()
        }
    }

    /// Apply and persist against the default location.
    pub fn apply() -> Self {
        Self::default()
    }
}

/// Outcome of a cascade run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    pub plan: CascadePlan,
    pub applied: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_location: Option<Locator>,
    #[serde(default)]
    pub errors: Vec<String>,
    /// False iff an apply-time error occurred; warnings do not count
    pub success: bool,
}

/// Drives one cascade pass over a stored plan.
pub struct Runner<L, W> {
    loader: L,
    writer: W,
    location: Locator,
}

impl<L: PlanLoader, W: PlanWriter> Runner<L, W> {
    /// Creates a runner whose default document lives at `location`.
    pub fn new(loader: L, writer: W, location: Locator) -> Self {
        Self {
            loader,
            writer,
            location,
        }
    }

    /// Loads the document, computes its cascade plan and, unless dry-running,
    /// applies the plan and persists the result.
    ///
    /// # Errors
    ///
    /// Returns an error only when loading or saving fails. Apply-time
    /// failures are reported in [`RunResult::errors`].
    pub fn run(&self, options: &RunOptions) -> Result<RunResult> {
        let input = options.input.as_ref().unwrap_or(&self.location);
        let document = self.loader.load(input)?;
        let plan = compute(&document);

        info!(
            "Computed cascade for {input}: {} triggers, {} actions, {} warnings",
            plan.triggers_evaluated.len(),
            plan.actions.len(),
            plan.warnings.len()
        );

        if options.dry_run {
            return Ok(RunResult {
                plan,
                applied: false,
                output_location: None,
                errors: Vec::new(),
                success: true,
            });
        }

        let (updated, apply_errors) = apply(&document, &plan);
        let output = options.output.as_ref().unwrap_or(input);
        let saved = self.writer.save(&updated, output)?;
        let errors: Vec<String> = apply_errors.iter().map(ToString::to_string).collect();

        info!(
            "Applied cascade to {saved} with {} errors",
            errors.len()
        );

        Ok(RunResult {
            success: errors.is_empty(),
            plan,
            applied: true,
            output_location: Some(saved),
            errors,
        })
    }
}
