//! Lead Models
//!
//! Shapes exchanged with the external lead schema and the toured-units
//! persistence API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Snapshot of a prospective client's record.
///
/// Only `id` and `toured_unit_ids` are read here. Every other field
/// (budget, move-in date, preferred amenities, ...) belongs to the external
/// schema and round-trips through `preferences` untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    /// Lead identifier
    pub id: String,
    /// Units persisted as toured in earlier sessions
    #[serde(default)]
    pub toured_unit_ids: Vec<String>,
    /// Remaining lead fields, opaque to this crate
    #[serde(flatten)]
    pub preferences: Map<String, Value>,
}

impl Lead {
    /// Creates a lead with no toured units and no preferences.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            toured_unit_ids: Vec::new(),
            preferences: Map::new(),
        }
    }

    /// Sets one opaque preference field.
    pub fn with_preference(mut self, name: impl Into<String>, value: Value) -> Self {
        self.preferences.insert(name.into(), value);
        self
    }

    /// Sets the persisted toured-unit list.
    pub fn with_toured_units<I, S>(mut self, unit_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.toured_unit_ids = unit_ids.into_iter().map(Into::into).collect();
        self
    }
}

/// Payload accepted by the toured-units persistence API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TouredUnitsUpdate {
    #[serde(default)]
    pub toured_unit_ids: Vec<String>,
}
