//! Tracker Module
//!
//! Keeps the set of units toured in the active session ahead of any server
//! persistence of that fact.

mod toured;


pub use toured::{is_valid_unit_id, TouredUnitsTracker};
