//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the preference cache against a simple model, with
//! time driven by a manual clock.

use proptest::prelude::*;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;

use crate::cache::{CacheLookup, PreferenceCache, DEFAULT_TTL_MS};
use crate::clock::ManualClock;
use crate::models::Lead;
use crate::storage::{MemoryStorage, SessionStorage};

// == Test Configuration ==
const T0: u64 = 1_700_000_000_000;

// == Strategies ==
/// Generates valid lead ids from a small pool so operations collide
fn lead_id_strategy() -> impl Strategy<Value = String> {
    "lead-[a-e]".prop_map(|s| s)
}

/// Generates a lead snapshot with an opaque preference payload
fn lead_strategy() -> impl Strategy<Value = Lead> {
    (
        lead_id_strategy(),
        0u32..10_000,
        prop::collection::vec("u[0-9]{1,3}", 0..5),
    )
        .prop_map(|(id, budget, units)| {
            Lead::new(id)
                .with_preference("budget_max", json!(budget))
                .with_toured_units(units)
        })
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { lead: Lead },
    Get { lead_id: String },
    Clear { lead_id: Option<String> },
    Advance { ms: u64 },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        lead_strategy().prop_map(|lead| CacheOp::Set { lead }),
        lead_id_strategy().prop_map(|lead_id| CacheOp::Get { lead_id }),
        prop::option::of(lead_id_strategy()).prop_map(|lead_id| CacheOp::Clear { lead_id }),
        (0u64..200_000).prop_map(|ms| CacheOp::Advance { ms }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Every lookup agrees with a model of (snapshot, written_at) per lead.
    #[test]
    fn prop_matches_reference_model(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let clock = Arc::new(ManualClock::new(T0));
        let mut cache = PreferenceCache::new(MemoryStorage::new(), clock.clone());
        let mut model: HashMap<String, (Lead, u64)> = HashMap::new();
        let mut now = T0;

        for op in ops {
            match op {
                CacheOp::Set { lead } => {
                    cache.set(&lead.id, &lead);
                    model.insert(lead.id.clone(), (lead, now));
                }
                CacheOp::Get { lead_id } => {
                    let expected = match model.get(&lead_id) {
                        Some((lead, at)) if now - at <= DEFAULT_TTL_MS => Some(lead.clone()),
                        Some(_) => {
                            model.remove(&lead_id);
                            None
                        }
                        None => None,
                    };
                    prop_assert_eq!(cache.get(&lead_id), expected);
                }
                CacheOp::Clear { lead_id: Some(lead_id) } => {
                    cache.clear(Some(&lead_id));
                    model.remove(&lead_id);
                }
                CacheOp::Clear { lead_id: None } => {
                    cache.clear(None);
                    model.clear();
                }
                CacheOp::Advance { ms } => {
                    clock.advance(ms);
                    now += ms;
                }
            }
        }
    }

    // Global clear never touches keys outside the cache prefix.
    #[test]
    fn prop_clear_all_spares_foreign_keys(
        leads in prop::collection::vec(lead_strategy(), 0..10),
        foreign in prop::collection::hash_map("[a-z]{1,10}", "[a-z0-9]{0,10}", 0..10)
    ) {
        let clock = Arc::new(ManualClock::new(T0));
        let mut cache = PreferenceCache::new(MemoryStorage::new(), clock);

        for (key, value) in &foreign {
            cache.storage_mut().set_item(key, value).unwrap();
        }
        for lead in &leads {
            cache.set(&lead.id, lead);
        }

        cache.clear(None);

        prop_assert_eq!(cache.storage().len(), foreign.len());
        for (key, value) in &foreign {
            let stored = cache.storage().get_item(key).unwrap();
            prop_assert_eq!(stored.as_deref(), Some(value.as_str()));
        }
        for lead in &leads {
            prop_assert_eq!(cache.lookup(&lead.id), CacheLookup::Miss);
        }
    }

    // Arbitrary text under a cache key never surfaces as a hit twice.
    #[test]
    fn prop_garbage_never_resurfaces(lead_id in lead_id_strategy(), garbage in "\\PC{0,40}") {
        let clock = Arc::new(ManualClock::new(T0));
        let mut cache = PreferenceCache::new(MemoryStorage::new(), clock);
        let key = format!("lead_prefs_{}", lead_id);
        cache.storage_mut().set_item(&key, &garbage).unwrap();

        // Whatever the first lookup says, the second one must be a plain miss
        // unless the garbage happened to be a valid fresh entry.
        let first = cache.lookup(&lead_id);
        if !first.is_hit() {
            prop_assert_eq!(cache.lookup(&lead_id), CacheLookup::Miss);
        }
    }
}
