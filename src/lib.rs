//! Tour Session - state kept while touring apartment units with a lead
//!
//! Provides a session-scoped preference cache with lazy TTL expiry and a
//! tracker for the units toured during the session.

pub mod api;
pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod storage;
pub mod tracker;

pub use api::AppState;
pub use cache::{CacheLookup, PreferenceCache};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use models::{Lead, TouredUnitsUpdate};
pub use storage::{MemoryStorage, SessionStorage};
pub use tracker::TouredUnitsTracker;
