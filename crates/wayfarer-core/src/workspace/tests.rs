//! Tests for the workspace module.

use jiff::civil::date;
use tempfile::TempDir;

use super::*;
use crate::{
    db::Database,
    models::{DestinationId, ProcessKind, ProcessStatus},
    operations::set_confirmed_dates,
    params::{InitPlan, RunCascade, SetDates},
};

/// Helper function to create a workspace with a fresh document
async fn create_test_workspace(mirror: bool) -> (TempDir, Workspace) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let plan_path = temp_dir.path().join("plan.json");
    let mirror_path = mirror.then(|| temp_dir.path().join("mirror.db"));

    let workspace = WorkspaceBuilder::new()
        .with_plan_path(Some(&plan_path))
        .with_mirror_path(mirror_path.as_ref())
        .build()
        .await
        .expect("Failed to build workspace");

    workspace
        .create(&InitPlan {
            destination: kyoto(),
            display_name: Some("Kyoto, Feb 2026".to_string()),
            force: false,
        })
        .await
        .expect("Failed to create plan");

    (temp_dir, workspace)
}

fn kyoto() -> DestinationId {
    DestinationId::new("kyoto_2026")
}

fn kyoto_dates() -> SetDates {
    SetDates {
        destination: kyoto(),
        start: date(2026, 2, 24),
        end: date(2026, 2, 28),
    }
}

#[tokio::test]
async fn test_create_refuses_to_overwrite() {
    let (_temp_dir, workspace) = create_test_workspace(false).await;

    let again = workspace
        .create(&InitPlan {
            destination: DestinationId::new("tokyo_2026"),
            display_name: None,
            force: false,
        })
        .await;
    assert!(again.is_err());

    let plan = workspace.load().await.expect("Failed to load plan");
    assert_eq!(plan.active_destination, kyoto());
}

#[tokio::test]
async fn test_edit_persists_changes() {
    let (_temp_dir, workspace) = create_test_workspace(false).await;
    let params = kyoto_dates();

    let (_, changed) = workspace
        .edit(move |plan, now| set_confirmed_dates(plan, &params, now))
        .await
        .expect("Failed to edit plan");
    assert!(changed);

    let plan = workspace.load().await.expect("Failed to load plan");
    assert!(plan.cascade_state.is_dirty(&kyoto(), ProcessKind::DateAnchor));
}

#[tokio::test]
async fn test_failed_edit_writes_nothing() {
    let (_temp_dir, workspace) = create_test_workspace(false).await;
    let before = std::fs::read_to_string(workspace.plan_path()).unwrap();

    let params = SetDates {
        destination: DestinationId::new("nowhere"),
        ..kyoto_dates()
    };
    let result = workspace
        .edit(move |plan, now| set_confirmed_dates(plan, &params, now))
        .await;
    assert!(result.is_err());

    let after = std::fs::read_to_string(workspace.plan_path()).unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_dry_run_leaves_document_alone() {
    let (_temp_dir, workspace) = create_test_workspace(false).await;
    let params = kyoto_dates();
    workspace
        .edit(move |plan, now| set_confirmed_dates(plan, &params, now))
        .await
        .unwrap();
    let before = std::fs::read_to_string(workspace.plan_path()).unwrap();

    let result = workspace
        .run_cascade(&RunCascade::default())
        .await
        .expect("Failed to run cascade");

    assert!(!result.applied);
    assert_eq!(result.plan.actions.len(), 6);
    assert_eq!(before, std::fs::read_to_string(workspace.plan_path()).unwrap());
}

#[tokio::test]
async fn test_applied_run_updates_mirror() {
    let (_temp_dir, workspace) = create_test_workspace(true).await;
    let params = kyoto_dates();
    workspace
        .edit(move |plan, now| set_confirmed_dates(plan, &params, now))
        .await
        .unwrap();

    let mirror_path = workspace.mirror_path().unwrap().to_path_buf();
    let db = Database::new(&mirror_path).unwrap();
    assert_eq!(db.dirty_processes().unwrap().len(), 1);

    let result = workspace
        .run_cascade(&RunCascade {
            apply: true,
            ..RunCascade::default()
        })
        .await
        .expect("Failed to run cascade");
    assert!(result.success);

    let db = Database::new(&mirror_path).unwrap();
    assert!(db.dirty_processes().unwrap().is_empty());
    let package = db
        .process_rows()
        .unwrap()
        .into_iter()
        .find(|row| row.process == ProcessKind::Package)
        .unwrap();
    assert_eq!(package.status, ProcessStatus::Pending);
}
