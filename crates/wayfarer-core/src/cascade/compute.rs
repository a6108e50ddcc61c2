//! Plan computation: evaluate the trigger table against a document.

use std::collections::BTreeSet;

use jiff::Timestamp;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::models::TripPlan;

use super::{
    action::{Action, EffectKey, TriggerId},
    triggers::{Firing, Rule, TRIGGERS},
};

/// The pure output of one cascade pass: what fired, what to do, and what
/// could not be done.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CascadePlan {
    /// Clock reading the plan was computed at; also stamps applied changes
    pub computed_at: Timestamp,

    /// Triggers whose predicate held, in priority order, each listed once
    pub triggers_evaluated: Vec<TriggerId>,

    /// Actions in application order
    pub actions: Vec<Action>,

    /// Advisory diagnostics about triggers that could not act fully
    pub warnings: Vec<String>,
}

impl CascadePlan {
    fn empty(computed_at: Timestamp) -> Self {
        Self {
            computed_at,
            triggers_evaluated: Vec::new(),
            actions: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// True when applying the plan would change nothing.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    fn absorb(&mut self, firing: Firing, seen: &mut BTreeSet<EffectKey>) {
        for action in firing.actions {
            if seen.insert(action.effect_key()) {
                self.actions.push(action);
            } else {
                debug!("Dropping duplicate action {action:?}");
            }
        }
        self.warnings.extend(firing.warnings);
    }
}

/// Computes the cascade plan for `plan` using the current time.
///
/// See [`compute_at`].
pub fn compute(plan: &TripPlan) -> CascadePlan {
    compute_at(plan, Timestamp::now())
}

/// Computes the cascade plan for `plan` as of `now`.
///
/// Triggers are evaluated in priority order against the unmodified document;
/// per-destination triggers walk destinations in ascending id order. An
/// action whose effect an earlier trigger already produced in this pass is
/// dropped. Missing data yields warnings, never a panic.
pub fn compute_at(plan: &TripPlan, now: Timestamp) -> CascadePlan {
    let mut out = CascadePlan::empty(now);
    let mut seen = BTreeSet::new();

    out.warnings.extend(stale_marker_warnings(plan));

    for trigger in &TRIGGERS {
        let mut fired = false;

        match &trigger.rule {
            Rule::PerDestination { predicate, actions } => {
                for (id, destination) in &plan.destinations {
                    if predicate(plan, id, destination) {
                        debug!("Trigger {} fired for {id}", trigger.id);
                        fired = true;
                        out.absorb(actions(plan, id, destination), &mut seen);
                    }
                }
            }
            Rule::Global { predicate, actions } => {
                if predicate(plan) {
                    debug!("Trigger {} fired", trigger.id);
                    fired = true;
                    out.absorb(actions(plan), &mut seen);
                }
            }
        }

        if fired {
            out.triggers_evaluated.push(trigger.id);
        }
    }

    for warning in &out.warnings {
        warn!("{warning}");
    }

    out
}

/// Dirty markers left behind for destinations the document no longer has.
fn stale_marker_warnings(plan: &TripPlan) -> Vec<String> {
    plan.cascade_state
        .dirty_processes()
        .into_iter()
        .filter(|(destination, _)| !plan.destinations.contains_key(*destination))
        .map(|(destination, process)| {
            format!(
                "{destination}.{} is marked dirty but {destination} is not in the plan; ignored",
                process.as_str()
            )
        })
        .collect()
}
