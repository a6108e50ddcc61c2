//! Wayfarer CLI Application
//!
//! Command-line interface for the wayfarer trip planner.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::{Cli, OutputFormat, ShowArgs};
use log::info;
use renderer::TerminalRenderer;
use wayfarer_core::WorkspaceBuilder;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        plan_file,
        mirror_file,
        no_color,
        command,
    } = Args::parse();

    let workspace = WorkspaceBuilder::new()
        .with_plan_path(plan_file)
        .with_mirror_path(mirror_file)
        .build()
        .await
        .context("Failed to initialize workspace")?;

    info!("Using plan document {}", workspace.plan_path().display());

    let cli = Cli::new(workspace, TerminalRenderer::new(!no_color));

    match command {
        Some(Init(args)) => cli.init(args).await,
        Some(Dest { command }) => cli.handle_dest_command(command).await,
        Some(Dates { command }) => cli.handle_dates_command(command).await,
        Some(Package { command }) => cli.handle_package_command(command).await,
        Some(Process { command }) => cli.handle_process_command(command).await,
        Some(Show(args)) => cli.show(args).await,
        Some(Cascade { command }) => cli.handle_cascade_command(command).await,
        None => {
            cli.show(ShowArgs {
                format: OutputFormat::Text,
            })
            .await
        }
    }
}
