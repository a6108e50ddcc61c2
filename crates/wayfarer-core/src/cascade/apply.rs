//! Plan application: execute a cascade plan against a copy of a document.

use std::collections::BTreeSet;

use jiff::Timestamp;
use log::{debug, info, warn};
use thiserror::Error;

use crate::models::{
    Destination, DestinationId, GlobalMarker, ProcessKind, ProcessStatus, Sourced, TripPlan,
};

use super::{
    action::{Action, DocPath, FieldValue, TriggerId},
    compute::CascadePlan,
};

/// An action of an already computed plan that could not be executed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApplyError {
    #[error("action #{index} ({trigger}): destination '{destination}' not found")]
    DestinationNotFound {
        index: usize,
        trigger: TriggerId,
        destination: DestinationId,
    },
    #[error("action #{index} ({trigger}): {destination}.{path} has no value to populate from")]
    MissingSource {
        index: usize,
        trigger: TriggerId,
        destination: DestinationId,
        path: DocPath,
    },
    #[error("action #{index} ({trigger}): {path} cannot be populated")]
    ReadOnlyTarget {
        index: usize,
        trigger: TriggerId,
        path: DocPath,
    },
    #[error("action #{index} ({trigger}): {source_path} cannot be copied into {target_path}")]
    IncompatiblePaths {
        index: usize,
        trigger: TriggerId,
        source_path: DocPath,
        target_path: DocPath,
    },
}

/// Applies `cascade` to a copy of `plan`.
///
/// Actions run strictly in plan order, and each one observes the effects of
/// those before it: a populate that follows a reset of its source reads the
/// reset state. A failing action is recorded and the rest of the plan still
/// runs. The caller's document is never modified.
///
/// A marker a trigger would clear stays dirty when an earlier action of the
/// same trigger failed for the same destination, so the next pass retries
/// the unfinished work instead of treating it as consumed.
pub fn apply(plan: &TripPlan, cascade: &CascadePlan) -> (TripPlan, Vec<ApplyError>) {
    let mut working = plan.clone();
    let mut errors = Vec::new();
    let mut failed: BTreeSet<(TriggerId, DestinationId)> = BTreeSet::new();
    let at = cascade.computed_at;

    for (index, action) in cascade.actions.iter().enumerate() {
        if is_deferred(action, &failed) {
            info!(
                "Keeping marker dirty after failed {} work: {action:?}",
                action.triggered_by()
            );
            continue;
        }

        match apply_action(&mut working, index, action, at) {
            Ok(()) => debug!("Applied action #{index}: {action:?}"),
            Err(error) => {
                warn!("{error}");
                if let Some(destination) = action.destination() {
                    failed.insert((action.triggered_by(), destination.clone()));
                }
                errors.push(error);
            }
        }
    }

    (working, errors)
}

fn is_deferred(action: &Action, failed: &BTreeSet<(TriggerId, DestinationId)>) -> bool {
    match action {
        Action::DirtyFlag {
            destination,
            dirty: false,
            triggered_by,
            ..
        } => failed.contains(&(*triggered_by, destination.clone())),
        _ => false,
    }
}

fn apply_action(
    working: &mut TripPlan,
    index: usize,
    action: &Action,
    at: Timestamp,
) -> Result<(), ApplyError> {
    let trigger = action.triggered_by();
    let not_found = |destination: &DestinationId| ApplyError::DestinationNotFound {
        index,
        trigger,
        destination: destination.clone(),
    };

    match action {
        Action::Reset {
            destination,
            process,
            ..
        } => {
            working
                .destination_mut(destination)
                .ok_or_else(|| not_found(destination))?
                .reset(*process, at);
        }
        Action::Populate {
            destination,
            source_path,
            target_path,
            set_source,
            ..
        } => {
            if !target_path.is_writable() {
                return Err(ApplyError::ReadOnlyTarget {
                    index,
                    trigger,
                    path: *target_path,
                });
            }

            let slot = working
                .destination_mut(destination)
                .ok_or_else(|| not_found(destination))?;
            let value = read_path(slot, *source_path).ok_or_else(|| ApplyError::MissingSource {
                index,
                trigger,
                destination: destination.clone(),
                path: *source_path,
            })?;

            match (target_path, value) {
                (DocPath::TransportationFlight, FieldValue::Flight(flight)) => {
                    slot.transportation.payload.flight =
                        Some(Sourced::derived(flight, set_source.clone()));
                    slot.set_status(ProcessKind::Transportation, ProcessStatus::Populated, at);
                }
                (DocPath::AccommodationHotel, FieldValue::Hotel(hotel)) => {
                    slot.accommodation.payload.hotel =
                        Some(Sourced::derived(hotel, set_source.clone()));
                    slot.set_status(ProcessKind::Accommodation, ProcessStatus::Populated, at);
                }
                _ => {
                    return Err(ApplyError::IncompatiblePaths {
                        index,
                        trigger,
                        source_path: *source_path,
                        target_path: *target_path,
                    })
                }
            }
        }
        Action::DirtyFlag {
            destination,
            process,
            dirty,
            ..
        } => {
            if !working.destinations.contains_key(destination) {
                return Err(not_found(destination));
            }
            working
                .cascade_state
                .set_dirty(destination, *process, *dirty, at);
        }
        Action::GlobalDirtyFlag { marker, dirty, .. } => {
            working.cascade_state.set_global_dirty(*marker, *dirty, at);
            match marker {
                GlobalMarker::ActiveDestination => {
                    working.cascade_state.global.active_destination_last =
                        Some(working.active_destination.clone());
                }
            }
        }
    }

    Ok(())
}

/// Reads the value at `path` from a destination, if one is set.
pub fn read_path(destination: &Destination, path: DocPath) -> Option<FieldValue> {
    match path {
        DocPath::ChosenOfferFlight => destination
            .package
            .payload
            .chosen_offer
            .as_ref()
            .and_then(|offer| offer.flight.clone())
            .map(FieldValue::Flight),
        DocPath::ChosenOfferHotel => destination
            .package
            .payload
            .chosen_offer
            .as_ref()
            .and_then(|offer| offer.hotel.clone())
            .map(FieldValue::Hotel),
        DocPath::TransportationFlight => destination
            .transportation
            .payload
            .flight
            .as_ref()
            .map(|flight| FieldValue::Flight(flight.value.clone())),
        DocPath::AccommodationHotel => destination
            .accommodation
            .payload
            .hotel
            .as_ref()
            .map(|hotel| FieldValue::Hotel(hotel.value.clone())),
    }
}
