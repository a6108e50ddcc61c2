//! Display implementations for domain models.
//!
//! Output is markdown so the CLI can hand it straight to the terminal
//! renderer.

use std::fmt;

use super::datetime::MaybeDateTime;
use crate::models::{
    CascadeState, Destination, DestinationId, GlobalMarker, Offer, ProcessKind, ProcessStatus,
    TripPlan,
};

impl fmt::Display for ProcessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for GlobalMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Offer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.id)?;
        if let Some(best) = self.best_value() {
            write!(
                f,
                ", from {} {} per person on {}",
                self.currency, best.price_per_person, best.date
            )?;
        } else if let Some(price) = self.price_per_person {
            write!(f, ", {} {price} per person", self.currency)?;
        }
        Ok(())
    }
}

/// One destination with the dirty markers the cascade state holds for it.
pub struct DestinationView<'a> {
    pub id: &'a DestinationId,
    pub destination: &'a Destination,
    pub state: &'a CascadeState,
    pub active: bool,
}

impl fmt::Display for DestinationView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let active = if self.active { " (active)" } else { "" };
        writeln!(f, "## {}{active}", self.id)?;
        writeln!(f)?;

        if let Some(name) = &self.destination.display_name {
            writeln!(f, "{name}")?;
            writeln!(f)?;
        }

        match &self.destination.date_anchor.payload.confirmed_dates {
            Some(range) => writeln!(f, "- **Dates**: {range}")?,
            None => writeln!(f, "- **Dates**: not confirmed")?,
        }
        if let Some(offer) = &self.destination.package.payload.chosen_offer {
            writeln!(f, "- **Package**: {offer}")?;
        }
        if let Some(hotel) = &self.destination.accommodation.payload.hotel {
            writeln!(f, "- **Hotel**: {}", hotel.value.name)?;
        }
        writeln!(f)?;

        for kind in ProcessKind::ALL {
            write!(
                f,
                "- `{}`: {}",
                kind,
                self.destination.status(kind).with_icon()
            )?;
            if let Some(source) = self.destination.set_source(kind) {
                write!(f, ", from {source}")?;
            }
            if self.state.is_dirty(self.id, kind) {
                write!(f, " **(dirty)**")?;
            }
            writeln!(
                f,
                ", updated {}",
                MaybeDateTime(self.destination.updated_at(kind).as_ref())
            )?;
        }
        writeln!(f)?;

        Ok(())
    }
}

impl fmt::Display for TripPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Trip plan")?;
        writeln!(f)?;
        writeln!(f, "- Active destination: {}", self.active_destination)?;
        match &self.cascade_state.global.active_destination_last {
            Some(last) if *last != self.active_destination => {
                writeln!(f, "- Previously active: {last}")?;
            }
            _ => {}
        }

        let dirty = self.cascade_state.dirty_processes();
        if dirty.is_empty() {
            writeln!(f, "- Cascade: clean")?;
        } else {
            writeln!(f, "- Cascade: {} dirty process(es)", dirty.len())?;
        }
        writeln!(f)?;

        for (id, destination) in &self.destinations {
            write!(
                f,
                "{}",
                DestinationView {
                    id,
                    destination,
                    state: &self.cascade_state,
                    active: *id == self.active_destination,
                }
            )?;
        }

        Ok(())
    }
}
