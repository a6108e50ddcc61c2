//! Tests for the cascade engine.

use std::{cell::RefCell, collections::BTreeMap};

use jiff::Timestamp;
use serde_json::json;

use super::*;
use crate::{
    error::{Result, WayfarerError},
    models::{
        Destination, DestinationId, FlightInfo, FlightSegment, GlobalMarker, HotelInfo, Offer,
        ProcessKind, ProcessStatus, Sourced, TripPlan,
    },
};

fn t0() -> Timestamp {
    Timestamp::from_second(1_767_225_600).unwrap()
}

fn kyoto() -> DestinationId {
    DestinationId::new("kyoto_2026")
}

fn osaka() -> DestinationId {
    DestinationId::new("osaka_2026")
}

fn kyoto_plan() -> TripPlan {
    TripPlan::new(kyoto(), t0())
}

fn flight() -> FlightInfo {
    FlightInfo {
        outbound: FlightSegment {
            flight_number: "BR132".to_string(),
            airline: "EVA Air".to_string(),
            departure_code: "TPE".to_string(),
            arrival_code: "KIX".to_string(),
            date: "2026-02-24".to_string(),
            ..FlightSegment::default()
        },
        inbound: FlightSegment {
            flight_number: "BR131".to_string(),
            departure_code: "KIX".to_string(),
            arrival_code: "TPE".to_string(),
            date: "2026-02-28".to_string(),
            ..FlightSegment::default()
        },
    }
}

fn hotel() -> HotelInfo {
    HotelInfo {
        name: "Hotel Granvia Kyoto".to_string(),
        area: "Kyoto Station".to_string(),
        star_rating: Some(4),
        ..HotelInfo::default()
    }
}

fn package_offer(with_flight: bool, with_hotel: bool) -> Offer {
    let mut offer = Offer::new("besttour_KIX05BR260224A");
    offer.title = "Kyoto 5 days".to_string();
    offer.flight = with_flight.then(flight);
    offer.hotel = with_hotel.then(hotel);
    offer
}

/// Marks `kyoto_2026`'s package as freshly selected with `offer`.
fn select(plan: &mut TripPlan, id: &DestinationId, offer: Option<Offer>) {
    let destination = plan.destination_mut(id).unwrap();
    destination.package.payload.chosen_offer = offer;
    destination.set_status(ProcessKind::Package, ProcessStatus::Selected, t0());
    plan.cascade_state
        .set_dirty(id, ProcessKind::Package, true, t0());
}

fn mark(plan: &mut TripPlan, id: &DestinationId, process: ProcessKind) {
    plan.cascade_state.set_dirty(id, process, true, t0());
}

fn reset(id: &DestinationId, process: ProcessKind, trigger: TriggerId, reason: &str) -> Action {
    Action::Reset {
        destination: id.clone(),
        process,
        reason: reason.to_string(),
        triggered_by: trigger,
    }
}

fn clear(id: &DestinationId, process: ProcessKind, trigger: TriggerId) -> Action {
    Action::DirtyFlag {
        destination: id.clone(),
        process,
        dirty: false,
        triggered_by: trigger,
    }
}

fn plan_of(actions: Vec<Action>) -> CascadePlan {
    let mut cascade = compute_at(&kyoto_plan(), t0());
    cascade.actions = actions;
    cascade
}

#[test]
fn test_clean_plan_is_noop() {
    let cascade = compute_at(&kyoto_plan(), t0());
    assert!(cascade.is_empty());
    assert!(cascade.triggers_evaluated.is_empty());
    assert!(cascade.warnings.is_empty());
    assert_eq!(cascade.computed_at, t0());
}

#[test]
fn test_date_anchor_resets_every_dependent_in_order() {
    let mut plan = kyoto_plan();
    mark(&mut plan, &kyoto(), ProcessKind::DateAnchor);

    let cascade = compute_at(&plan, t0());

    let mut expected: Vec<Action> = ProcessKind::DATE_DEPENDENTS
        .iter()
        .map(|process| {
            reset(
                &kyoto(),
                *process,
                TriggerId::DateAnchorChanged,
                "date anchor changed",
            )
        })
        .collect();
    expected.push(clear(&kyoto(), ProcessKind::DateAnchor, TriggerId::DateAnchorChanged));

    assert_eq!(cascade.triggers_evaluated, vec![TriggerId::DateAnchorChanged]);
    assert_eq!(cascade.actions, expected);
}

#[test]
fn test_kyoto_date_change_scenario() {
    let mut plan = kyoto_plan();
    let destination = plan.destination_mut(&kyoto()).unwrap();
    destination.set_status(ProcessKind::DateAnchor, ProcessStatus::Confirmed, t0());
    destination.set_status(ProcessKind::Package, ProcessStatus::Booked, t0());
    destination.transportation.payload.flight = Some(Sourced::manual(flight()));
    destination.set_status(ProcessKind::Transportation, ProcessStatus::Booked, t0());
    mark(&mut plan, &kyoto(), ProcessKind::DateAnchor);

    let cascade = compute_at(&plan, t0());
    let (updated, errors) = apply(&plan, &cascade);

    assert!(errors.is_empty());
    let kyoto_after = updated.destination(&kyoto()).unwrap();
    assert_eq!(kyoto_after.status(ProcessKind::Package), ProcessStatus::Pending);
    assert_eq!(
        kyoto_after.status(ProcessKind::Transportation),
        ProcessStatus::Pending
    );
    assert!(kyoto_after.transportation.payload.flight.is_none());
    assert_eq!(
        kyoto_after.status(ProcessKind::DateAnchor),
        ProcessStatus::Confirmed
    );
    assert!(!updated.cascade_state.is_dirty(&kyoto(), ProcessKind::DateAnchor));
    assert_eq!(
        updated.cascade_state.marker(&kyoto(), ProcessKind::DateAnchor).unwrap().last_changed,
        Some(t0())
    );
}

#[test]
fn test_package_selection_populates_with_provenance() {
    let mut plan = kyoto_plan();
    select(&mut plan, &kyoto(), Some(package_offer(true, true)));

    let cascade = compute_at(&plan, t0());
    assert_eq!(cascade.triggers_evaluated, vec![TriggerId::PackageSelected]);
    assert_eq!(cascade.actions.len(), 3);
    assert!(cascade.warnings.is_empty());

    let (updated, errors) = apply(&plan, &cascade);
    assert!(errors.is_empty());

    let destination = updated.destination(&kyoto()).unwrap();
    let populated_flight = destination.transportation.payload.flight.as_ref().unwrap();
    assert_eq!(populated_flight.value, flight());
    assert_eq!(
        populated_flight.set_source.as_deref(),
        Some("besttour_KIX05BR260224A")
    );
    assert_eq!(
        destination.status(ProcessKind::Transportation),
        ProcessStatus::Populated
    );
    assert_eq!(destination.accommodation.payload.hotel.as_ref().unwrap().value, hotel());
    assert_eq!(
        destination.set_source(ProcessKind::Accommodation),
        Some("besttour_KIX05BR260224A")
    );
    assert_eq!(destination.status(ProcessKind::Package), ProcessStatus::Selected);
    assert!(!updated.cascade_state.is_dirty(&kyoto(), ProcessKind::Package));
}

#[test]
fn test_offer_without_flight_warns_and_populates_hotel() {
    let mut plan = kyoto_plan();
    select(&mut plan, &kyoto(), Some(package_offer(false, true)));

    let cascade = compute_at(&plan, t0());

    assert_eq!(cascade.warnings.len(), 1);
    assert!(cascade.warnings[0].contains("no flight record"));
    assert_eq!(
        cascade.actions,
        vec![
            Action::Populate {
                destination: kyoto(),
                source_path: DocPath::ChosenOfferHotel,
                target_path: DocPath::AccommodationHotel,
                set_source: "besttour_KIX05BR260224A".to_string(),
                triggered_by: TriggerId::PackageSelected,
            },
            clear(&kyoto(), ProcessKind::Package, TriggerId::PackageSelected),
        ]
    );

    let (updated, errors) = apply(&plan, &cascade);
    assert!(errors.is_empty());
    let destination = updated.destination(&kyoto()).unwrap();
    assert!(destination.transportation.payload.flight.is_none());
    assert!(destination.accommodation.payload.hotel.is_some());
}

#[test]
fn test_offer_without_hotel_warns_and_populates_flight() {
    let mut plan = kyoto_plan();
    select(&mut plan, &kyoto(), Some(package_offer(true, false)));

    let cascade = compute_at(&plan, t0());

    assert_eq!(cascade.warnings.len(), 1);
    assert!(cascade.warnings[0].contains("kyoto_2026.accommodation"));
    assert!(cascade.warnings[0].contains("no hotel record"));

    let (updated, errors) = apply(&plan, &cascade);
    assert!(errors.is_empty());
    let destination = updated.destination(&kyoto()).unwrap();
    assert_eq!(
        destination.transportation.payload.flight.as_ref().unwrap().value,
        flight()
    );
    assert_eq!(
        destination.accommodation,
        plan.destination(&kyoto()).unwrap().accommodation
    );
    assert!(!updated.cascade_state.is_dirty(&kyoto(), ProcessKind::Package));
}

#[test]
fn test_package_selection_keeps_booked_manual_flight() {
    let manual = FlightInfo {
        outbound: FlightSegment {
            flight_number: "MANUAL1".to_string(),
            departure_code: "TPE".to_string(),
            ..FlightSegment::default()
        },
        ..FlightInfo::default()
    };
    let mut plan = kyoto_plan();
    let destination = plan.destination_mut(&kyoto()).unwrap();
    destination.transportation.payload.flight = Some(Sourced::manual(manual.clone()));
    destination.set_status(ProcessKind::Transportation, ProcessStatus::Booked, t0());
    select(&mut plan, &kyoto(), Some(package_offer(true, true)));

    let cascade = compute_at(&plan, t0());

    assert_eq!(cascade.warnings.len(), 1);
    assert!(cascade.warnings[0].contains("kyoto_2026.transportation"));
    assert!(cascade.warnings[0].contains("status is booked"));
    assert!(!cascade.actions.iter().any(|action| matches!(
        action,
        Action::Populate {
            target_path: DocPath::TransportationFlight,
            ..
        }
    )));

    let (updated, errors) = apply(&plan, &cascade);
    assert!(errors.is_empty());
    let destination = updated.destination(&kyoto()).unwrap();
    let kept = destination.transportation.payload.flight.as_ref().unwrap();
    assert_eq!(kept.value, manual);
    assert!(kept.set_source.is_none());
    assert_eq!(
        destination.status(ProcessKind::Transportation),
        ProcessStatus::Booked
    );
    assert_eq!(
        destination.set_source(ProcessKind::Accommodation),
        Some("besttour_KIX05BR260224A")
    );
}

#[test]
fn test_package_selection_keeps_unbooked_manual_hotel() {
    let mut plan = kyoto_plan();
    let destination = plan.destination_mut(&kyoto()).unwrap();
    destination.accommodation.payload.hotel = Some(Sourced::manual(HotelInfo {
        name: "Airbnb Gion".to_string(),
        ..HotelInfo::default()
    }));
    select(&mut plan, &kyoto(), Some(package_offer(true, true)));

    let cascade = compute_at(&plan, t0());

    assert_eq!(cascade.warnings.len(), 1);
    assert!(cascade.warnings[0].contains("kyoto_2026.accommodation"));
    assert!(cascade.warnings[0].contains("manually entered"));
    let (updated, _) = apply(&plan, &cascade);
    let hotel = &updated.destination(&kyoto()).unwrap().accommodation.payload.hotel;
    assert_eq!(hotel.as_ref().unwrap().value.name, "Airbnb Gion");
}

#[test]
fn test_selected_package_without_offer_is_skipped() {
    let mut plan = kyoto_plan();
    select(&mut plan, &kyoto(), None);

    let cascade = compute_at(&plan, t0());

    assert!(cascade.is_empty());
    assert_eq!(cascade.triggers_evaluated, vec![TriggerId::PackageSelected]);
    assert_eq!(cascade.warnings.len(), 1);
    assert!(cascade.warnings[0].contains("no chosen_offer"));

    // Nothing consumed the marker, so the warning repeats until data arrives
    let (updated, _) = apply(&plan, &cascade);
    assert!(updated.cascade_state.is_dirty(&kyoto(), ProcessKind::Package));
    assert_eq!(compute_at(&updated, t0()).warnings, cascade.warnings);
}

#[test]
fn test_apply_then_compute_is_idempotent() {
    let mut plan = kyoto_plan();
    plan.destinations.insert(osaka(), Destination::new(t0()));
    mark(&mut plan, &osaka(), ProcessKind::DateAnchor);
    mark(&mut plan, &osaka(), ProcessKind::DestinationSelection);
    select(&mut plan, &kyoto(), Some(package_offer(true, true)));

    let (once, errors) = apply(&plan, &compute_at(&plan, t0()));
    assert!(errors.is_empty());

    let again = compute_at(&once, t0());
    assert!(again.is_empty(), "unexpected actions: {:?}", again.actions);
    let (twice, _) = apply(&once, &again);
    assert_eq!(once, twice);
}

#[test]
fn test_compute_is_deterministic() {
    let mut forward = kyoto_plan();
    forward.destinations.insert(osaka(), Destination::new(t0()));
    mark(&mut forward, &kyoto(), ProcessKind::DateAnchor);
    mark(&mut forward, &osaka(), ProcessKind::Transportation);

    // Same content built in the opposite order
    let mut backward = TripPlan::new(osaka(), t0());
    backward.destinations.insert(kyoto(), Destination::new(t0()));
    backward.active_destination = kyoto();
    backward.cascade_state.global.active_destination_last = Some(kyoto());
    mark(&mut backward, &osaka(), ProcessKind::Transportation);
    mark(&mut backward, &kyoto(), ProcessKind::DateAnchor);

    assert_eq!(forward, backward);
    assert_eq!(compute_at(&forward, t0()), compute_at(&backward, t0()));
}

#[test]
fn test_destinations_walked_in_id_order() {
    let mut plan = TripPlan::new(osaka(), t0());
    plan.destinations.insert(kyoto(), Destination::new(t0()));
    mark(&mut plan, &osaka(), ProcessKind::DateAnchor);
    mark(&mut plan, &kyoto(), ProcessKind::DateAnchor);

    let cascade = compute_at(&plan, t0());
    let order: Vec<&DestinationId> = cascade
        .actions
        .iter()
        .filter_map(Action::destination)
        .collect();

    assert_eq!(order.len(), 12);
    assert!(order[..6].iter().all(|id| **id == kyoto()));
    assert!(order[6..].iter().all(|id| **id == osaka()));
}

#[test]
fn test_overlapping_triggers_are_deduplicated() {
    let mut plan = kyoto_plan();
    mark(&mut plan, &kyoto(), ProcessKind::DateAnchor);
    mark(&mut plan, &kyoto(), ProcessKind::DestinationSelection);

    let cascade = compute_at(&plan, t0());

    assert_eq!(
        cascade.triggers_evaluated,
        vec![
            TriggerId::DateAnchorChanged,
            TriggerId::DestinationSelectionChanged
        ]
    );
    let resets = cascade
        .actions
        .iter()
        .filter(|action| matches!(action, Action::Reset { .. }))
        .count();
    assert_eq!(resets, 5);
    // The date trigger already clears the selection marker as a reset dependent
    assert_eq!(
        cascade.actions[5..],
        [
            clear(
                &kyoto(),
                ProcessKind::DestinationSelection,
                TriggerId::DateAnchorChanged
            ),
            clear(&kyoto(), ProcessKind::DateAnchor, TriggerId::DateAnchorChanged),
        ]
    );

    let (updated, errors) = apply(&plan, &cascade);
    assert!(errors.is_empty());
    assert!(updated.cascade_state.dirty_processes().is_empty());
}

#[test]
fn test_bookings_change_flags_itinerary() {
    let mut plan = kyoto_plan();
    mark(&mut plan, &kyoto(), ProcessKind::Accommodation);

    let cascade = compute_at(&plan, t0());
    assert_eq!(cascade.triggers_evaluated, vec![TriggerId::BookingsChanged]);

    let (updated, errors) = apply(&plan, &cascade);
    assert!(errors.is_empty());
    assert!(updated.cascade_state.is_dirty(&kyoto(), ProcessKind::Itinerary));
    assert!(!updated.cascade_state.is_dirty(&kyoto(), ProcessKind::Accommodation));
    assert!(compute_at(&updated, t0()).is_empty());
}

#[test]
fn test_date_change_clears_itinerary_flag_from_earlier_booking_edit() {
    let mut plan = kyoto_plan();
    mark(&mut plan, &kyoto(), ProcessKind::Transportation);
    let (flagged, _) = apply(&plan, &compute_at(&plan, t0()));
    assert!(flagged.cascade_state.is_dirty(&kyoto(), ProcessKind::Itinerary));

    let mut moved = flagged;
    mark(&mut moved, &kyoto(), ProcessKind::DateAnchor);
    let cascade = compute_at(&moved, t0());
    assert!(cascade.actions.contains(&clear(
        &kyoto(),
        ProcessKind::Itinerary,
        TriggerId::DateAnchorChanged
    )));

    let (updated, errors) = apply(&moved, &cascade);
    assert!(errors.is_empty());
    assert!(updated.cascade_state.dirty_processes().is_empty());
    assert_eq!(
        updated.destination(&kyoto()).unwrap().status(ProcessKind::Itinerary),
        ProcessStatus::Pending
    );
    assert!(compute_at(&updated, t0()).is_empty());
}

#[test]
fn test_date_change_supersedes_booking_edit_in_same_pass() {
    let mut plan = kyoto_plan();
    mark(&mut plan, &kyoto(), ProcessKind::Transportation);
    mark(&mut plan, &kyoto(), ProcessKind::DateAnchor);

    let cascade = compute_at(&plan, t0());
    assert_eq!(cascade.triggers_evaluated, vec![TriggerId::DateAnchorChanged]);

    let (updated, errors) = apply(&plan, &cascade);
    assert!(errors.is_empty());
    assert!(updated.cascade_state.dirty_processes().is_empty());
    assert!(compute_at(&updated, t0()).is_empty());
}

#[test]
fn test_active_destination_switch_is_recorded() {
    let mut plan = kyoto_plan();
    plan.destinations.insert(osaka(), Destination::new(t0()));
    plan.active_destination = osaka();

    let cascade = compute_at(&plan, t0());
    assert_eq!(
        cascade.actions,
        vec![Action::GlobalDirtyFlag {
            marker: GlobalMarker::ActiveDestination,
            dirty: true,
            triggered_by: TriggerId::ActiveDestinationSwitched,
        }]
    );

    let (updated, errors) = apply(&plan, &cascade);
    assert!(errors.is_empty());
    assert_eq!(
        updated.cascade_state.global.active_destination_last,
        Some(osaka())
    );
    assert!(
        updated
            .cascade_state
            .global_marker(GlobalMarker::ActiveDestination)
            .unwrap()
            .dirty
    );
    assert!(compute_at(&updated, t0()).is_empty());
}

#[test]
fn test_switch_to_unknown_destination_warns() {
    let mut plan = kyoto_plan();
    plan.active_destination = DestinationId::new("nowhere");

    let cascade = compute_at(&plan, t0());
    assert!(cascade.is_empty());
    assert_eq!(cascade.warnings.len(), 1);
    assert!(cascade.warnings[0].contains("nowhere"));
}

#[test]
fn test_stale_marker_warns_without_actions() {
    let mut plan = kyoto_plan();
    mark(&mut plan, &DestinationId::new("ghost_2025"), ProcessKind::DateAnchor);

    let cascade = compute_at(&plan, t0());
    assert!(cascade.is_empty());
    assert_eq!(cascade.warnings.len(), 1);
    assert!(cascade.warnings[0].contains("ghost_2025.date_anchor"));
}

#[test]
fn test_apply_leaves_input_untouched() {
    let mut plan = kyoto_plan();
    mark(&mut plan, &kyoto(), ProcessKind::DateAnchor);
    let snapshot = plan.clone();

    let (updated, _) = apply(&plan, &compute_at(&plan, t0()));

    assert_eq!(plan, snapshot);
    assert_ne!(updated, snapshot);
}

#[test]
fn test_populate_after_reset_reports_missing_source() {
    let mut plan = kyoto_plan();
    select(&mut plan, &kyoto(), Some(package_offer(true, true)));
    mark(&mut plan, &kyoto(), ProcessKind::DateAnchor);

    let cascade = compute_at(&plan, t0());
    let (updated, errors) = apply(&plan, &cascade);

    assert_eq!(errors.len(), 2);
    assert!(errors
        .iter()
        .all(|error| matches!(error, ApplyError::MissingSource { .. })));
    // The reset package was cleared by the date trigger, not the failed one
    assert!(updated.cascade_state.dirty_processes().is_empty());
    assert_eq!(
        updated.destination(&kyoto()).unwrap().status(ProcessKind::Package),
        ProcessStatus::Pending
    );
}

#[test]
fn test_unknown_destination_is_an_apply_error() {
    let ghost = DestinationId::new("ghost_2025");
    let cascade = plan_of(vec![
        reset(&ghost, ProcessKind::Package, TriggerId::DateAnchorChanged, "test"),
        reset(&kyoto(), ProcessKind::Package, TriggerId::DateAnchorChanged, "test"),
    ]);

    let (_, errors) = apply(&kyoto_plan(), &cascade);

    assert_eq!(
        errors,
        vec![ApplyError::DestinationNotFound {
            index: 0,
            trigger: TriggerId::DateAnchorChanged,
            destination: ghost,
        }]
    );
}

#[test]
fn test_populate_rejects_bad_paths() {
    let mut plan = kyoto_plan();
    select(&mut plan, &kyoto(), Some(package_offer(true, true)));
    let populate = |source_path, target_path| Action::Populate {
        destination: kyoto(),
        source_path,
        target_path,
        set_source: "test".to_string(),
        triggered_by: TriggerId::PackageSelected,
    };
    let cascade = plan_of(vec![
        populate(DocPath::AccommodationHotel, DocPath::ChosenOfferHotel),
        populate(DocPath::ChosenOfferHotel, DocPath::TransportationFlight),
    ]);

    let (updated, errors) = apply(&plan, &cascade);

    assert!(matches!(errors[0], ApplyError::ReadOnlyTarget { index: 0, .. }));
    assert!(matches!(errors[1], ApplyError::IncompatiblePaths { index: 1, .. }));
    assert_eq!(updated, plan);
}

#[test]
fn test_read_path_follows_payloads() {
    let mut destination = Destination::new(t0());
    assert_eq!(read_path(&destination, DocPath::ChosenOfferFlight), None);

    destination.package.payload.chosen_offer = Some(package_offer(true, false));
    assert_eq!(
        read_path(&destination, DocPath::ChosenOfferFlight),
        Some(FieldValue::Flight(flight()))
    );
    assert_eq!(read_path(&destination, DocPath::ChosenOfferHotel), None);
}

#[test]
fn test_actions_serialize_with_type_tag() {
    let action = reset(
        &kyoto(),
        ProcessKind::Package,
        TriggerId::DateAnchorChanged,
        "date anchor changed",
    );
    assert_eq!(
        serde_json::to_value(&action).unwrap(),
        json!({
            "type": "reset",
            "destination": "kyoto_2026",
            "process": "package",
            "reason": "date anchor changed",
            "triggered_by": "date_anchor_changed"
        })
    );

    let populate: Action = serde_json::from_value(json!({
        "type": "populate",
        "destination": "kyoto_2026",
        "source_path": "package.chosen_offer.flight",
        "target_path": "transportation.flight",
        "set_source": "besttour_KIX05BR260224A",
        "triggered_by": "package_selected"
    }))
    .unwrap();
    assert_eq!(populate.triggered_by(), TriggerId::PackageSelected);
}

#[test]
fn test_trigger_table_is_ordered_by_dependency() {
    let ids: Vec<TriggerId> = TRIGGERS.iter().map(|trigger| trigger.id).collect();
    assert_eq!(
        ids,
        vec![
            TriggerId::DateAnchorChanged,
            TriggerId::DestinationSelectionChanged,
            TriggerId::PackageSelected,
            TriggerId::BookingsChanged,
            TriggerId::ActiveDestinationSwitched,
        ]
    );
    assert!(trigger(TriggerId::PackageSelected).is_some());
}

/// In-memory loader and writer keyed by locator.
#[derive(Default)]
struct MemoryStore {
    documents: RefCell<BTreeMap<String, TripPlan>>,
}

impl MemoryStore {
    fn with(locator: &str, plan: TripPlan) -> Self {
        let store = Self::default();
        store.documents.borrow_mut().insert(locator.to_string(), plan);
        store
    }

    fn get(&self, locator: &str) -> Option<TripPlan> {
        self.documents.borrow().get(locator).cloned()
    }
}

impl PlanLoader for &MemoryStore {
    fn load(&self, locator: &Locator) -> Result<TripPlan> {
        self.get(locator.as_str())
            .ok_or_else(|| WayfarerError::Configuration {
                message: format!("no document at {locator}"),
            })
    }
}

impl PlanWriter for &MemoryStore {
    fn save(&self, plan: &TripPlan, locator: &Locator) -> Result<Locator> {
        self.documents
            .borrow_mut()
            .insert(locator.as_str().to_string(), plan.clone());
        Ok(locator.clone())
    }
}

fn dirty_kyoto() -> TripPlan {
    let mut plan = kyoto_plan();
    mark(&mut plan, &kyoto(), ProcessKind::DateAnchor);
    plan
}

#[test]
fn test_runner_dry_run_writes_nothing() {
    let store = MemoryStore::with("trip", dirty_kyoto());
    let runner = Runner::new(&store, &store, Locator::new("trip"));

    let result = runner.run(&RunOptions::dry_run()).unwrap();

    assert!(!result.applied);
    assert!(result.success);
    assert_eq!(result.plan.actions.len(), 6);
    assert!(result.output_location.is_none());
    assert_eq!(store.get("trip"), Some(dirty_kyoto()));
}

#[test]
fn test_runner_apply_saves_to_output() {
    let store = MemoryStore::with("trip", dirty_kyoto());
    let runner = Runner::new(&store, &store, Locator::new("trip"));
    let options = RunOptions {
        output: Some(Locator::new("trip.next")),
        ..RunOptions::apply()
    };

    let result = runner.run(&options).unwrap();

    assert!(result.applied);
    assert!(result.success);
    assert_eq!(result.output_location, Some(Locator::new("trip.next")));
    assert_eq!(store.get("trip"), Some(dirty_kyoto()));
    let saved = store.get("trip.next").unwrap();
    assert!(saved.cascade_state.dirty_processes().is_empty());
}

#[test]
fn test_runner_reports_apply_errors() {
    let mut plan = kyoto_plan();
    select(&mut plan, &kyoto(), Some(package_offer(true, true)));
    mark(&mut plan, &kyoto(), ProcessKind::DateAnchor);
    let store = MemoryStore::with("trip", plan);
    let runner = Runner::new(&store, &store, Locator::new("trip"));

    let result = runner.run(&RunOptions::apply()).unwrap();

    assert!(result.applied);
    assert!(!result.success);
    assert_eq!(result.errors.len(), 2);
}

#[test]
fn test_runner_load_failure_is_fatal() {
    let store = MemoryStore::default();
    let runner = Runner::new(&store, &store, Locator::new("missing"));

    assert!(runner.run(&RunOptions::apply()).is_err());
}
