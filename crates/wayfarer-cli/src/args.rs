use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{
    CascadeCommands, DatesCommands, DestCommands, InitArgs, PackageCommands, ProcessCommands,
    ShowArgs,
};

/// Trip planner with a cascading invalidation engine
///
/// Wayfarer keeps a trip plan as a JSON document: destinations, each with
/// dates, a destination choice, a package, flights, hotels and an itinerary.
/// Edits mark upstream processes dirty; `wf cascade run` then works out which
/// downstream work is stale and resets or fills it in.
#[derive(Parser)]
#[command(version, about, name = "wf")]
pub struct Args {
    /// Path to the plan document. Defaults to
    /// $XDG_DATA_HOME/wayfarer/plan.json
    #[arg(long, global = true)]
    pub plan_file: Option<PathBuf>,

    /// Mirror every saved plan into this SQLite database
    #[arg(long, global = true)]
    pub mirror_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the wayfarer CLI
///
/// - `init`, `dest`: create the document and manage its destinations
/// - `dates`, `package`, `process`: upstream edits that mark work dirty
/// - `show`: dashboard of process statuses and dirty markers
/// - `cascade`: compute and apply the cascade
#[derive(Subcommand)]
pub enum Commands {
    /// Create a new plan document
    Init(InitArgs),
    /// Manage destinations
    #[command(alias = "d")]
    Dest {
        #[command(subcommand)]
        command: DestCommands,
    },
    /// Confirm travel dates
    Dates {
        #[command(subcommand)]
        command: DatesCommands,
    },
    /// Choose package offers
    Package {
        #[command(subcommand)]
        command: PackageCommands,
    },
    /// Edit process statuses and markers by hand
    #[command(alias = "p")]
    Process {
        #[command(subcommand)]
        command: ProcessCommands,
    },
    /// Show the plan
    Show(ShowArgs),
    /// Run the cascade engine
    #[command(alias = "c")]
    Cascade {
        #[command(subcommand)]
        command: CascadeCommands,
    },
}
