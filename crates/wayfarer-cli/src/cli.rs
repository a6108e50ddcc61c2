//! Command definitions and their handlers.
//!
//! Each command has a clap argument struct that converts into the core
//! parameter type, keeping clap out of `wayfarer-core`:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Handlers → Display
//! ```
//!
//! [`Cli`] runs a parsed command against a workspace and renders the result.

use std::{fs, path::PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use jiff::civil::Date;
use log::info;
use wayfarer_core::{
    handlers::*,
    models::{DestinationId, Offer, ProcessKind, ProcessStatus},
    params::*,
    OperationStatus, Workspace,
};

use crate::renderer::TerminalRenderer;

// ============================================================================
// CLI Argument Wrappers
// ============================================================================

/// Output format for commands that report structured data
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Markdown rendered for the terminal
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Create a new plan document
#[derive(Args)]
pub struct InitArgs {
    /// First destination id, e.g. kyoto_2026
    pub destination: DestinationId,
    /// Human-facing name for the destination
    #[arg(long)]
    pub name: Option<String>,
    /// Replace an existing document
    #[arg(long)]
    pub force: bool,
}

impl From<InitArgs> for InitPlan {
    fn from(val: InitArgs) -> Self {
        InitPlan {
            destination: val.destination,
            display_name: val.name,
            force: val.force,
        }
    }
}

/// Add a destination
#[derive(Args)]
pub struct AddDestinationArgs {
    /// Destination id
    pub id: DestinationId,
    /// Human-facing name for the destination
    #[arg(long)]
    pub name: Option<String>,
}

impl From<AddDestinationArgs> for AddDestination {
    fn from(val: AddDestinationArgs) -> Self {
        AddDestination {
            id: val.id,
            display_name: val.name,
        }
    }
}

/// Move focus to another destination
#[derive(Args)]
pub struct SwitchDestinationArgs {
    /// Destination id to make active
    pub id: DestinationId,
}

impl From<SwitchDestinationArgs> for SwitchDestination {
    fn from(val: SwitchDestinationArgs) -> Self {
        SwitchDestination { id: val.id }
    }
}

#[derive(Subcommand)]
pub enum DestCommands {
    /// Add a destination to the plan
    Add(AddDestinationArgs),
    /// Make another destination the active one
    Switch(SwitchDestinationArgs),
}

/// Confirm travel dates for a destination
///
/// Changing the dates marks the date anchor dirty; the next cascade run
/// resets everything that depended on the old dates.
#[derive(Args)]
pub struct SetDatesArgs {
    /// Destination id
    pub destination: DestinationId,
    /// First day of travel (YYYY-MM-DD)
    pub start: Date,
    /// Last day of travel (YYYY-MM-DD)
    pub end: Date,
}

impl From<SetDatesArgs> for SetDates {
    fn from(val: SetDatesArgs) -> Self {
        SetDates {
            destination: val.destination,
            start: val.start,
            end: val.end,
        }
    }
}

#[derive(Subcommand)]
pub enum DatesCommands {
    /// Set the confirmed travel dates
    Set(SetDatesArgs),
}

/// Choose a package offer for a destination
#[derive(Args)]
pub struct SelectOfferArgs {
    /// Destination id
    pub destination: DestinationId,
    /// JSON file holding the offer record
    #[arg(long)]
    pub offer: PathBuf,
}

impl SelectOfferArgs {
    /// Reads the offer file; unlike the other wrappers this can fail.
    fn into_params(self) -> Result<SelectOffer> {
        let raw = fs::read_to_string(&self.offer)
            .with_context(|| format!("Failed to read offer file {}", self.offer.display()))?;
        let offer: Offer = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse offer file {}", self.offer.display()))?;
        Ok(SelectOffer {
            destination: self.destination,
            offer,
        })
    }
}

#[derive(Subcommand)]
pub enum PackageCommands {
    /// Record the chosen offer and mark the package dirty
    Select(SelectOfferArgs),
}

/// Set a process status by hand
#[derive(Args)]
pub struct SetProcessStatusArgs {
    /// Destination id
    pub destination: DestinationId,
    /// Process, e.g. transportation or hotel
    pub process: ProcessKind,
    /// New status, e.g. booked
    pub status: ProcessStatus,
}

impl From<SetProcessStatusArgs> for SetProcessStatus {
    fn from(val: SetProcessStatusArgs) -> Self {
        SetProcessStatus {
            destination: val.destination,
            process: val.process,
            status: val.status,
        }
    }
}

/// Mark a process dirty by hand
#[derive(Args)]
pub struct MarkDirtyArgs {
    /// Destination id
    pub destination: DestinationId,
    /// Process to mark
    pub process: ProcessKind,
}

impl From<MarkDirtyArgs> for MarkDirty {
    fn from(val: MarkDirtyArgs) -> Self {
        MarkDirty {
            destination: val.destination,
            process: val.process,
        }
    }
}

#[derive(Subcommand)]
pub enum ProcessCommands {
    /// Set a process status
    Status(SetProcessStatusArgs),
    /// Mark a process dirty
    Mark(MarkDirtyArgs),
}

/// Show the plan
#[derive(Args)]
pub struct ShowArgs {
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

/// Run one cascade pass
///
/// Without --apply this is a dry run: the plan is computed and printed but
/// nothing is written.
#[derive(Args)]
pub struct RunCascadeArgs {
    /// Apply the actions and save the result
    #[arg(long)]
    pub apply: bool,
    /// Read this document instead of --plan-file
    #[arg(long)]
    pub input: Option<PathBuf>,
    /// Write the result here instead of back to the input
    #[arg(long)]
    pub output: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

impl From<&RunCascadeArgs> for RunCascade {
    fn from(val: &RunCascadeArgs) -> Self {
        RunCascade {
            apply: val.apply,
            input: val
                .input
                .as_ref()
                .map(|path| path.to_string_lossy().into_owned()),
            output: val
                .output
                .as_ref()
                .map(|path| path.to_string_lossy().into_owned()),
        }
    }
}

#[derive(Subcommand)]
pub enum CascadeCommands {
    /// Compute, and optionally apply, the cascade
    Run(RunCascadeArgs),
}

// ============================================================================
// Command Handlers
// ============================================================================

/// Runs parsed commands against a workspace.
pub struct Cli {
    workspace: Workspace,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(workspace: Workspace, renderer: TerminalRenderer) -> Self {
        Self {
            workspace,
            renderer,
        }
    }

    fn confirm(&self, message: String) -> Result<()> {
        self.renderer
            .render(&OperationStatus::success(message).to_string())
    }

    pub async fn init(&self, args: InitArgs) -> Result<()> {
        let params = InitPlan::from(args);
        let plan = handle_init(&self.workspace, &params)
            .await
            .context("Failed to create plan")?;
        self.confirm(format!(
            "Created plan at {} with destination {}",
            self.workspace.plan_path().display(),
            plan.active_destination
        ))
    }

    pub async fn handle_dest_command(&self, command: DestCommands) -> Result<()> {
        match command {
            DestCommands::Add(args) => {
                let params = AddDestination::from(args);
                handle_add_destination(&self.workspace, &params)
                    .await
                    .context("Failed to add destination")?;
                self.confirm(format!("Added destination {}", params.id))
            }
            DestCommands::Switch(args) => {
                let params = SwitchDestination::from(args);
                let (_, moved) = handle_switch_destination(&self.workspace, &params)
                    .await
                    .context("Failed to switch destination")?;
                if moved {
                    self.confirm(format!("Active destination is now {}", params.id))
                } else {
                    self.confirm(format!("{} is already active", params.id))
                }
            }
        }
    }

    pub async fn handle_dates_command(&self, command: DatesCommands) -> Result<()> {
        match command {
            DatesCommands::Set(args) => {
                let params = SetDates::from(args);
                let (_, changed) = handle_set_dates(&self.workspace, &params)
                    .await
                    .context("Failed to set dates")?;
                if changed {
                    self.confirm(format!(
                        "Dates for {} set to {}..{}; run `wf cascade run` to propagate",
                        params.destination, params.start, params.end
                    ))
                } else {
                    self.confirm(format!("Dates for {} unchanged", params.destination))
                }
            }
        }
    }

    pub async fn handle_package_command(&self, command: PackageCommands) -> Result<()> {
        match command {
            PackageCommands::Select(args) => {
                let params = args.into_params()?;
                handle_select_offer(&self.workspace, &params)
                    .await
                    .context("Failed to select offer")?;
                self.confirm(format!(
                    "Selected offer {} for {}",
                    params.offer.id, params.destination
                ))
            }
        }
    }

    pub async fn handle_process_command(&self, command: ProcessCommands) -> Result<()> {
        match command {
            ProcessCommands::Status(args) => {
                let params = SetProcessStatus::from(args);
                handle_set_process_status(&self.workspace, &params)
                    .await
                    .context("Failed to set process status")?;
                self.confirm(format!(
                    "{}.{} is now {}",
                    params.destination, params.process, params.status
                ))
            }
            ProcessCommands::Mark(args) => {
                let params = MarkDirty::from(args);
                handle_mark_dirty(&self.workspace, &params)
                    .await
                    .context("Failed to mark process")?;
                self.confirm(format!(
                    "{}.{} marked dirty",
                    params.destination, params.process
                ))
            }
        }
    }

    pub async fn show(&self, args: ShowArgs) -> Result<()> {
        let plan = handle_show(&self.workspace)
            .await
            .context("Failed to load plan")?;
        match args.format {
            OutputFormat::Text => self.renderer.render(&plan.to_string()),
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&plan)?);
                Ok(())
            }
        }
    }

    pub async fn handle_cascade_command(&self, command: CascadeCommands) -> Result<()> {
        match command {
            CascadeCommands::Run(args) => {
                let params = RunCascade::from(&args);
                let result = handle_run_cascade(&self.workspace, &params)
                    .await
                    .context("Cascade run failed")?;
                info!(
                    "Cascade run finished: {} actions, applied: {}",
                    result.plan.actions.len(),
                    result.applied
                );

                match args.format {
                    OutputFormat::Text => self.renderer.render(&result.to_string())?,
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
                }

                if !result.success {
                    bail!(
                        "Cascade finished with {} apply error(s)",
                        result.errors.len()
                    );
                }
                Ok(())
            }
        }
    }
}
