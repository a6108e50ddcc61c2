#![allow(dead_code)]

use jiff::Timestamp;
use tempfile::TempDir;
use wayfarer_core::{
    models::{DestinationId, FlightInfo, FlightSegment, HotelInfo, Offer},
    params::InitPlan,
    Workspace, WorkspaceBuilder,
};

pub fn kyoto() -> DestinationId {
    DestinationId::new("kyoto_2026")
}

pub fn fixed_time() -> Timestamp {
    Timestamp::from_second(1_767_225_600).expect("valid timestamp")
}

/// Helper function to create a workspace holding a fresh kyoto_2026 plan
pub async fn create_test_workspace(with_mirror: bool) -> (TempDir, Workspace) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let plan_path = temp_dir.path().join("trips").join("plan.json");
    let mirror_path = with_mirror.then(|| temp_dir.path().join("mirror.db"));

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

/// A package offer carrying both a flight and a hotel record
pub fn kyoto_package() -> Offer {
    let mut offer = Offer::new("besttour_KIX05BR260224A");
    offer.source_id = "besttour".to_string();
    offer.title = "Kyoto 5 days, Hotel Granvia".to_string();
    offer.price_per_person = Some(32900);
    offer.flight = Some(FlightInfo {
        outbound: FlightSegment {
            flight_number: "BR132".to_string(),
            departure_code: "TPE".to_string(),
            arrival_code: "KIX".to_string(),
            ..FlightSegment::default()
        },
        inbound: FlightSegment {
            flight_number: "BR131".to_string(),
            departure_code: "KIX".to_string(),
            arrival_code: "TPE".to_string(),
            ..FlightSegment::default()
        },
    });
    offer.hotel = Some(HotelInfo {
        name: "Hotel Granvia Kyoto".to_string(),
        ..HotelInfo::default()
    });
    offer
}
