//! Toured Units Tracker
//!
//! Insertion-ordered set of unit identifiers visited during a tour session.

use tracing::{debug, warn};

use crate::models::{Lead, TouredUnitsUpdate};

// == Toured Units Tracker ==
/// Tracks which units the current session has toured.
///
/// Units are kept in the order they were first added. Re-adding a unit
/// that was removed puts it at the end. Membership uses exact string
/// equality; session scale is tens of units so linear scans are fine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TouredUnitsTracker {
    /// Toured unit ids, oldest first
    unit_ids: Vec<String>,
}

impl TouredUnitsTracker {
    // == Constructor ==
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    // == Initialize ==
    /// Seeds a tracker from a previously persisted list.
    ///
    /// Repeated ids keep their first position; invalid ids are dropped.
    pub fn initialize<I, S>(initial_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tracker = Self::new();
        for id in initial_ids {
            let id = id.into();
            if !tracker.add_unit(&id) {
                debug!("Dropping repeated or invalid seed unit id '{}'", id);
            }
        }
        tracker
    }

    /// Seeds a tracker from a lead's persisted toured-unit list.
    pub fn from_lead(lead: &Lead) -> Self {
        Self::initialize(lead.toured_unit_ids.iter().cloned())
    }

    // == Add Unit ==
    /// Appends `unit_id` if it has not been toured yet.
    ///
    /// Returns `true` when the set changed.
    pub fn add_unit(&mut self, unit_id: &str) -> bool {
        if !is_valid_unit_id(unit_id) {
            warn!("Ignoring invalid unit id {:?}", unit_id);
            return false;
        }
        if self.is_toured(unit_id) {
            return false;
        }
        self.unit_ids.push(unit_id.to_string());
        true
    }

    // == Remove Unit ==
    /// Removes `unit_id` if present.
    ///
    /// Returns `true` when the set changed.
    pub fn remove_unit(&mut self, unit_id: &str) -> bool {
        match self.unit_ids.iter().position(|id| id == unit_id) {
            Some(index) => {
                self.unit_ids.remove(index);
                true
            }
            None => false,
        }
    }

    // == Is Toured ==
    /// Checks whether `unit_id` has been toured.
    pub fn is_toured(&self, unit_id: &str) -> bool {
        self.unit_ids.iter().any(|id| id == unit_id)
    }

    // == Update Payload ==
    /// Snapshot of the current set for the persistence API.
    pub fn update_payload(&self) -> TouredUnitsUpdate {
        TouredUnitsUpdate {
            toured_unit_ids: self.unit_ids.clone(),
        }
    }

    /// Toured unit ids, oldest first.
    pub fn unit_ids(&self) -> &[String] {
        &self.unit_ids
    }

    // == Length ==
    /// Returns the number of toured units.
    pub fn len(&self) -> usize {
        self.unit_ids.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.unit_ids.is_empty()
    }
}

/// Unit ids must contain something other than whitespace.
pub fn is_valid_unit_id(unit_id: &str) -> bool {
    !unit_id.trim().is_empty()
}
