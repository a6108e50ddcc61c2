//! Handler functions shared by every interface.
//!
//! Each handler is one complete user-facing workflow: load the document,
//! apply an [`operations`](crate::operations) edit or run the cascade, save,
//! and hand back data the caller formats.
//!
//! ```text
//! Interface → Handler → Operations + Workspace → Models
//! ```
//!
//! Edit handlers return the saved document so callers can show the result;
//! none of them run the cascade, which stays an explicit step.

use crate::{
    cascade::RunResult,
    models::TripPlan,
    operations,
    params::{
        AddDestination, InitPlan, MarkDirty, RunCascade, SelectOffer, SetDates, SetProcessStatus,
        SwitchDestination,
    },
    Result, Workspace,
};

/// Handle creating a new plan document.
///
/// # Examples
///
/// ```rust,no_run
/// # use wayfarer_core::{handlers::handle_init, params::InitPlan, models::DestinationId, WorkspaceBuilder};
/// # async {
/// let workspace = WorkspaceBuilder::new().build().await?;
/// let params = InitPlan {
///     destination: DestinationId::new("kyoto_2026"),
///     display_name: Some("Kyoto, Feb 2026".to_string()),
///     force: false,
/// };
/// let plan = handle_init(&workspace, &params).await?;
/// # Result::<(), wayfarer_core::WayfarerError>::Ok(())
/// # };
/// ```
pub async fn handle_init(workspace: &Workspace, params: &InitPlan) -> Result<TripPlan> {
    workspace.create(params).await
}

/// Handle showing the plan document.
pub async fn handle_show(workspace: &Workspace) -> Result<TripPlan> {
    workspace.load().await
}

/// Handle adding a destination.
pub async fn handle_add_destination(
    workspace: &Workspace,
    params: &AddDestination,
) -> Result<TripPlan> {
    let params = params.clone();
    let (plan, ()) = workspace
        .edit(move |plan, now| operations::add_destination(plan, &params, now))
        .await?;
    Ok(plan)
}

/// Handle moving focus to another destination.
///
/// Returns the saved document and whether the focus actually moved.
pub async fn handle_switch_destination(
    workspace: &Workspace,
    params: &SwitchDestination,
) -> Result<(TripPlan, bool)> {
    let params = params.clone();
    workspace
        .edit(move |plan, _| operations::switch_active_destination(plan, &params))
        .await
}

/// Handle confirming travel dates.
///
/// Returns the saved document and whether the dates changed; unchanged
/// dates leave the date anchor clean.
pub async fn handle_set_dates(workspace: &Workspace, params: &SetDates) -> Result<(TripPlan, bool)> {
    let params = params.clone();
    workspace
        .edit(move |plan, now| operations::set_confirmed_dates(plan, &params, now))
        .await
}

/// Handle choosing a package offer.
pub async fn handle_select_offer(workspace: &Workspace, params: &SelectOffer) -> Result<TripPlan> {
    let params = params.clone();
    let (plan, ()) = workspace
        .edit(move |plan, now| operations::select_offer(plan, &params, now))
        .await?;
    Ok(plan)
}

/// Handle setting a process status by hand.
pub async fn handle_set_process_status(
    workspace: &Workspace,
    params: &SetProcessStatus,
) -> Result<TripPlan> {
    let params = params.clone();
    let (plan, ()) = workspace
        .edit(move |plan, now| operations::set_process_status(plan, &params, now))
        .await?;
    Ok(plan)
}

/// Handle marking a process dirty by hand.
pub async fn handle_mark_dirty(workspace: &Workspace, params: &MarkDirty) -> Result<TripPlan> {
    let params = params.clone();
    let (plan, ()) = workspace
        .edit(move |plan, now| operations::mark_dirty(plan, &params, now))
        .await?;
    Ok(plan)
}

/// Handle one cascade pass, dry-run unless `params.apply` is set.
///
/// # Examples
///
/// ```rust,no_run
/// # use wayfarer_core::{handlers::handle_run_cascade, params::RunCascade, WorkspaceBuilder};
/// # async {
/// let workspace = WorkspaceBuilder::new().build().await?;
/// let result = handle_run_cascade(&workspace, &RunCascade::default()).await?;
/// println!("{result}");
/// # Result::<(), wayfarer_core::WayfarerError>::Ok(())
/// # };
/// ```
pub async fn handle_run_cascade(workspace: &Workspace, params: &RunCascade) -> Result<RunResult> {
    workspace.run_cascade(params).await
}
