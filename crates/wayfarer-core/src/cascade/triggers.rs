//! The trigger table.
//!
//! Each trigger is an immutable record pairing a predicate with an action
//! builder. Both only ever see the pre-pass snapshot of the document, so a
//! trigger cannot react to the effects of its own actions within one pass.
//! Extending the cascade means adding a record to [`TRIGGERS`], not editing
//! control flow.

use crate::models::{
    Destination, DestinationId, GlobalMarker, ProcessKind, ProcessStatus, TripPlan,
};

use super::action::{Action, DocPath, TriggerId};

/// Actions and diagnostics produced by one firing of a trigger.
#[derive(Debug, Default)]
pub struct Firing {
    pub actions: Vec<Action>,
    pub warnings: Vec<String>,
}

impl Firing {
    /// A firing whose actions could not be built.
    fn skipped(warning: String) -> Self {
        Self {
            actions: Vec::new(),
            warnings: vec![warning],
        }
    }
}

pub type DestinationPredicate = fn(&TripPlan, &DestinationId, &Destination) -> bool;
pub type DestinationActions = fn(&TripPlan, &DestinationId, &Destination) -> Firing;

/// How a trigger is scoped over the document.
pub enum Rule {
    /// Evaluated once for every destination, in ascending id order.
    PerDestination {
        predicate: DestinationPredicate,
        actions: DestinationActions,
    },
    /// Evaluated once per pass against the whole plan.
    Global {
        predicate: fn(&TripPlan) -> bool,
        actions: fn(&TripPlan) -> Firing,
    },
}

/// A declarative cascade rule.
pub struct Trigger {
    pub id: TriggerId,
    pub summary: &'static str,
    pub rule: Rule,
}

/// All triggers in priority order, mirroring the process dependency graph.
pub static TRIGGERS: [Trigger; 5] = [
    Trigger {
        id: TriggerId::DateAnchorChanged,
        summary: "travel dates changed; everything downstream is reset",
        rule: Rule::PerDestination {
            predicate: date_anchor_dirty,
            actions: reset_date_dependents,
        },
    },
    Trigger {
        id: TriggerId::DestinationSelectionChanged,
        summary: "destination choice changed; bookings and itinerary are reset",
        rule: Rule::PerDestination {
            predicate: selection_dirty,
            actions: reset_selection_dependents,
        },
    },
    Trigger {
        id: TriggerId::PackageSelected,
        summary: "package offer selected; flight and hotel are populated from it",
        rule: Rule::PerDestination {
            predicate: package_selected,
            actions: populate_from_offer,
        },
    },
    Trigger {
        id: TriggerId::BookingsChanged,
        summary: "flight or hotel edited; itinerary marked stale",
        rule: Rule::PerDestination {
            predicate: bookings_dirty,
            actions: flag_itinerary,
        },
    },
    Trigger {
        id: TriggerId::ActiveDestinationSwitched,
        summary: "focus moved to another destination",
        rule: Rule::Global {
            predicate: active_destination_switched,
            actions: flag_focus_change,
        },
    },
];

/// Looks up a trigger record by id.
pub fn trigger(id: TriggerId) -> Option<&'static Trigger> {
    TRIGGERS.iter().find(|trigger| trigger.id == id)
}

fn date_anchor_dirty(plan: &TripPlan, id: &DestinationId, _: &Destination) -> bool {
    plan.cascade_state.is_dirty(id, ProcessKind::DateAnchor)
}

fn reset_date_dependents(plan: &TripPlan, id: &DestinationId, _: &Destination) -> Firing {
    reset_and_consume(
        plan,
        id,
        &ProcessKind::DATE_DEPENDENTS,
        ProcessKind::DateAnchor,
        TriggerId::DateAnchorChanged,
        "date anchor changed",
    )
}

fn selection_dirty(plan: &TripPlan, id: &DestinationId, _: &Destination) -> bool {
    plan.cascade_state
        .is_dirty(id, ProcessKind::DestinationSelection)
}

fn reset_selection_dependents(plan: &TripPlan, id: &DestinationId, _: &Destination) -> Firing {
    reset_and_consume(
        plan,
        id,
        &ProcessKind::SELECTION_DEPENDENTS,
        ProcessKind::DestinationSelection,
        TriggerId::DestinationSelectionChanged,
        "destination selection changed",
    )
}

/// Resets `dependents`, then clears their markers and the `consumed` one.
///
/// A freshly reset process holds nothing stale, so any marker a dependent
/// carried in the snapshot is cleared along with the trigger's own.
fn reset_and_consume(
    plan: &TripPlan,
    id: &DestinationId,
    dependents: &[ProcessKind],
    consumed: ProcessKind,
    triggered_by: TriggerId,
    reason: &str,
) -> Firing {
    let mut actions: Vec<Action> = dependents
        .iter()
        .map(|process| Action::Reset {
            destination: id.clone(),
            process: *process,
            reason: reason.to_string(),
            triggered_by,
        })
        .collect();
    for process in dependents {
        if plan.cascade_state.is_dirty(id, *process) {
            actions.push(Action::DirtyFlag {
                destination: id.clone(),
                process: *process,
                dirty: false,
                triggered_by,
            });
        }
    }
    actions.push(Action::DirtyFlag {
        destination: id.clone(),
        process: consumed,
        dirty: false,
        triggered_by,
    });

    Firing {
        actions,
        warnings: Vec::new(),
    }
}

fn package_selected(plan: &TripPlan, id: &DestinationId, destination: &Destination) -> bool {
    destination.package.status == ProcessStatus::Selected
        && plan.cascade_state.is_dirty(id, ProcessKind::Package)
}

fn populate_from_offer(_: &TripPlan, id: &DestinationId, destination: &Destination) -> Firing {
    let Some(offer) = &destination.package.payload.chosen_offer else {
        return Firing::skipped(format!(
            "{id}.package is selected but has no chosen_offer; population skipped"
        ));
    };

    let mut firing = Firing::default();
    let targets = [
        (
            offer.flight.is_some(),
            DocPath::ChosenOfferFlight,
            DocPath::TransportationFlight,
            "flight",
        ),
        (
            offer.hotel.is_some(),
            DocPath::ChosenOfferHotel,
            DocPath::AccommodationHotel,
            "hotel",
        ),
    ];

    for (present, source_path, target_path, record) in targets {
        let owner = target_path.owner();
        if let Some(reason) = keeps_user_value(destination, owner) {
            firing.warnings.push(format!(
                "{id}.{}: {reason}; chosen offer '{}' not copied",
                owner.as_str(),
                offer.id,
            ));
        } else if present {
            firing.actions.push(Action::Populate {
                destination: id.clone(),
                source_path,
                target_path,
                set_source: offer.id.clone(),
                triggered_by: TriggerId::PackageSelected,
            });
        } else {
            firing.warnings.push(format!(
                "{id}.{}: chosen offer '{}' has no {record} record; left unchanged",
                owner.as_str(),
                offer.id,
            ));
        }
    }

    firing.actions.push(Action::DirtyFlag {
        destination: id.clone(),
        process: ProcessKind::Package,
        dirty: false,
        triggered_by: TriggerId::PackageSelected,
    });
    firing
}

/// Why a populate must leave the `kind` slot alone, if it must.
///
/// Hand-entered values carry no provenance, and anything past `populated`
/// reflects a booking decision the offer cannot override.
fn keeps_user_value(destination: &Destination, kind: ProcessKind) -> Option<String> {
    let status = destination.status(kind);
    if matches!(
        status,
        ProcessStatus::Booking
            | ProcessStatus::Booked
            | ProcessStatus::Confirmed
            | ProcessStatus::Skipped
    ) {
        return Some(format!("status is {}", status.as_str()));
    }

    let manual = match kind {
        ProcessKind::Transportation => destination
            .transportation
            .payload
            .flight
            .as_ref()
            .is_some_and(|flight| !flight.is_derived()),
        ProcessKind::Accommodation => destination
            .accommodation
            .payload
            .hotel
            .as_ref()
            .is_some_and(|hotel| !hotel.is_derived()),
        _ => false,
    };
    manual.then(|| "holds a manually entered value".to_string())
}

/// Upstream resets in the same pass replace the bookings outright, so this
/// trigger stands down and lets them consume the booking markers.
fn bookings_dirty(plan: &TripPlan, id: &DestinationId, _: &Destination) -> bool {
    let state = &plan.cascade_state;
    let reset_upstream = state.is_dirty(id, ProcessKind::DateAnchor)
        || state.is_dirty(id, ProcessKind::DestinationSelection);

    !reset_upstream
        && (state.is_dirty(id, ProcessKind::Transportation)
            || state.is_dirty(id, ProcessKind::Accommodation))
}

fn flag_itinerary(plan: &TripPlan, id: &DestinationId, _: &Destination) -> Firing {
    let mut actions = vec![Action::DirtyFlag {
        destination: id.clone(),
        process: ProcessKind::Itinerary,
        dirty: true,
        triggered_by: TriggerId::BookingsChanged,
    }];

    for process in [ProcessKind::Transportation, ProcessKind::Accommodation] {
        if plan.cascade_state.is_dirty(id, process) {
            actions.push(Action::DirtyFlag {
                destination: id.clone(),
                process,
                dirty: false,
                triggered_by: TriggerId::BookingsChanged,
            });
        }
    }

    Firing {
        actions,
        warnings: Vec::new(),
    }
}

fn active_destination_switched(plan: &TripPlan) -> bool {
    plan.cascade_state.global.active_destination_last.as_ref() != Some(&plan.active_destination)
}

fn flag_focus_change(plan: &TripPlan) -> Firing {
    if !plan.destinations.contains_key(&plan.active_destination) {
        return Firing::skipped(format!(
            "active destination '{}' is not in the plan; focus change not recorded",
            plan.active_destination
        ));
    }

    Firing {
        actions: vec![Action::GlobalDirtyFlag {
            marker: GlobalMarker::ActiveDestination,
            dirty: true,
            triggered_by: TriggerId::ActiveDestinationSwitched,
        }],
        warnings: Vec::new(),
    }
}
