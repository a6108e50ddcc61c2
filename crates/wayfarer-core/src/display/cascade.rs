//! Display implementations for cascade plans and run results.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::cascade::{Action, CascadePlan, RunResult};

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Reset {
                destination,
                process,
                reason,
                triggered_by,
            } => write!(
                f,
                "reset `{destination}.{process}` ({reason}) [{triggered_by}]"
            ),
            Action::Populate {
                destination,
                source_path,
                target_path,
                set_source,
                triggered_by,
            } => write!(
                f,
                "populate `{destination}.{target_path}` from `{source_path}`, source `{set_source}` [{triggered_by}]"
            ),
            Action::DirtyFlag {
                destination,
                process,
                dirty,
                triggered_by,
            } => write!(
                f,
                "mark `{destination}.{process}` {} [{triggered_by}]",
                if *dirty { "dirty" } else { "clean" }
            ),
            Action::GlobalDirtyFlag {
                marker,
                dirty,
                triggered_by,
            } => write!(
                f,
                "mark global `{marker}` {} [{triggered_by}]",
                if *dirty { "dirty" } else { "clean" }
            ),
        }
    }
}

impl fmt::Display for CascadePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Cascade plan")?;
        writeln!(f)?;
        writeln!(f, "- Computed: {}", LocalDateTime(&self.computed_at))?;
        if self.triggers_evaluated.is_empty() {
            writeln!(f, "- Triggers: none")?;
        } else {
            let fired: Vec<&str> = self.triggers_evaluated.iter().map(|t| t.as_str()).collect();
            writeln!(f, "- Triggers: {}", fired.join(", "))?;
        }
        writeln!(f)?;

        if self.actions.is_empty() {
            writeln!(f, "Nothing to do, the plan is up to date.")?;
        } else {
            writeln!(f, "## Actions")?;
            writeln!(f)?;
            for (index, action) in self.actions.iter().enumerate() {
                writeln!(f, "{}. {action}", index + 1)?;
            }
        }

        if !self.warnings.is_empty() {
            writeln!(f)?;
            writeln!(f, "## Warnings")?;
            writeln!(f)?;
            for warning in &self.warnings {
                writeln!(f, "- {warning}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for RunResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.plan)?;
        writeln!(f)?;

        if self.applied {
            match &self.output_location {
                Some(location) => writeln!(f, "Applied and saved to `{location}`.")?,
                None => writeln!(f, "Applied.")?,
            }
        } else {
            writeln!(f, "Dry run, nothing was written.")?;
        }

        if !self.errors.is_empty() {
            writeln!(f)?;
            writeln!(f, "## Errors")?;
            writeln!(f)?;
            for error in &self.errors {
                writeln!(f, "- {error}")?;
            }
        }

        Ok(())
    }
}
