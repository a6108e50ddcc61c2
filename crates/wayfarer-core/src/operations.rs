//! Edits a caller makes to a plan document between cascade passes.
//!
//! These are the "upstream" changes the cascade reacts to: each one updates
//! the domain payload and, where downstream work depends on it, raises the
//! matching dirty marker. None of them run the cascade themselves.
//!
//! ```rust
//! use jiff::{civil::date, Timestamp};
//! use wayfarer_core::{
//!     models::{DestinationId, ProcessKind, TripPlan},
//!     operations::set_confirmed_dates,
//!     params::SetDates,
//! };
//!
//! let kyoto = DestinationId::new("kyoto_2026");
//! let mut plan = TripPlan::new(kyoto.clone(), Timestamp::UNIX_EPOCH);
//! let params = SetDates {
//!     destination: kyoto.clone(),
//!     start: date(2026, 2, 24),
//!     end: date(2026, 2, 28),
//! };
//!
//! assert!(set_confirmed_dates(&mut plan, &params, Timestamp::UNIX_EPOCH).unwrap());
//! assert!(plan.cascade_state.is_dirty(&kyoto, ProcessKind::DateAnchor));
//! ```

use jiff::Timestamp;
use log::debug;

use crate::{
    error::{Result, WayfarerError},
    models::{DateRange, Destination, DestinationId, ProcessKind, ProcessStatus, TripPlan},
    params::{AddDestination, MarkDirty, SelectOffer, SetDates, SetProcessStatus, SwitchDestination},
};

fn destination_mut<'a>(plan: &'a mut TripPlan, id: &DestinationId) -> Result<&'a mut Destination> {
    plan.destination_mut(id)
        .ok_or_else(|| WayfarerError::DestinationNotFound { id: id.to_string() })
}

/// Adds an empty destination.
///
/// # Errors
///
/// Fails with [`WayfarerError::DestinationExists`] if the id is taken.
pub fn add_destination(plan: &mut TripPlan, params: &AddDestination, now: Timestamp) -> Result<()> {
    if plan.destinations.contains_key(&params.id) {
        return Err(WayfarerError::DestinationExists {
            id: params.id.to_string(),
        });
    }

    let mut destination = Destination::new(now);
    destination.display_name = params.display_name.clone();
    plan.destinations.insert(params.id.clone(), destination);
    debug!("Added destination {}", params.id);
    Ok(())
}

/// Moves focus to another destination.
///
/// Returns whether the focus actually moved. The cascade notices the switch
/// on its next pass by comparing against the focus it last recorded.
pub fn switch_active_destination(plan: &mut TripPlan, params: &SwitchDestination) -> Result<bool> {
    if !plan.destinations.contains_key(&params.id) {
        return Err(WayfarerError::DestinationNotFound {
            id: params.id.to_string(),
        });
    }
    if plan.active_destination == params.id {
        return Ok(false);
    }

    plan.active_destination = params.id.clone();
    Ok(true)
}

/// Confirms travel dates and marks the date anchor dirty.
///
/// Setting the dates already on record is a no-op and returns `false`, so
/// repeating an edit does not wipe downstream work.
pub fn set_confirmed_dates(plan: &mut TripPlan, params: &SetDates, now: Timestamp) -> Result<bool> {
    let range = DateRange::new(params.start, params.end)
        .map_err(|reason| WayfarerError::invalid_input("dates").with_reason(reason))?;

    let destination = destination_mut(plan, &params.destination)?;
    if destination.date_anchor.payload.confirmed_dates == Some(range) {
        return Ok(false);
    }

    destination.date_anchor.payload.confirmed_dates = Some(range);
    destination.set_status(ProcessKind::DateAnchor, ProcessStatus::Confirmed, now);
    plan.cascade_state
        .set_dirty(&params.destination, ProcessKind::DateAnchor, true, now);
    debug!("Confirmed {} for {}", range, params.destination);
    Ok(true)
}

/// Records the chosen package offer and marks the package dirty.
///
/// The offer is also added to the candidate list when not already there.
pub fn select_offer(plan: &mut TripPlan, params: &SelectOffer, now: Timestamp) -> Result<()> {
    if params.offer.id.trim().is_empty() {
        return Err(WayfarerError::invalid_input("offer.id").with_reason("must not be empty"));
    }

    let destination = destination_mut(plan, &params.destination)?;
    let package = &mut destination.package.payload;
    if !package
        .candidates
        .iter()
        .any(|candidate| candidate.id == params.offer.id)
    {
        package.candidates.push(params.offer.clone());
    }
    package.chosen_offer = Some(params.offer.clone());
    destination.set_status(ProcessKind::Package, ProcessStatus::Selected, now);

    plan.cascade_state
        .set_dirty(&params.destination, ProcessKind::Package, true, now);
    debug!("Selected offer {} for {}", params.offer.id, params.destination);
    Ok(())
}

/// Sets a process status by hand.
///
/// # Errors
///
/// Fails with [`WayfarerError::InvalidInput`] when the status is not one the
/// process kind may hold.
pub fn set_process_status(
    plan: &mut TripPlan,
    params: &SetProcessStatus,
    now: Timestamp,
) -> Result<()> {
    if !params.process.allows(params.status) {
        return Err(WayfarerError::invalid_input("status").with_reason(format!(
            "{} is not a valid status for {}",
            params.status.as_str(),
            params.process.as_str()
        )));
    }

    destination_mut(plan, &params.destination)?.set_status(params.process, params.status, now);
    Ok(())
}

/// Marks a process dirty so the next pass fires its triggers.
pub fn mark_dirty(plan: &mut TripPlan, params: &MarkDirty, now: Timestamp) -> Result<()> {
    destination_mut(plan, &params.destination)?;
    plan.cascade_state
        .set_dirty(&params.destination, params.process, true, now);
    Ok(())
}
