//! Property tests for `NamedCollection` invariants.

use std::collections::HashMap;

use packrig_config::{NamedCollection, Placement};
use proptest::prelude::*;

fn placement_strategy() -> impl Strategy<Value = Placement> {
    prop_oneof![Just(Placement::Top), Just(Placement::Bottom)]
}

/// Short names so sequences revisit the same keys often.
fn ops_strategy() -> impl Strategy<Value = Vec<(String, u32, Placement)>> {
    prop::collection::vec(("[a-e]{1,2}", any::<u32>(), placement_strategy()), 0..=40)
}

fn collection_from(names: &[String]) -> NamedCollection<usize> {
    names
        .iter()
        .enumerate()
        .map(|(index, name)| (name.clone(), index))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// After every `set`, `get` sees the latest value and the length is the
    /// number of distinct names used so far.
    #[test]
    fn prop_set_keeps_latest_value_and_unique_names(ops in ops_strategy()) {
        let mut collection = NamedCollection::new();
        let mut model: HashMap<String, u32> = HashMap::new();

        for (name, value, placement) in ops {
            collection.set(name.clone(), value, placement);
            model.insert(name, value);

            prop_assert_eq!(collection.len(), model.len());
            for (name, value) in &model {
                prop_assert_eq!(collection.get(name), Some(value));
            }
        }
    }

    /// Moving an existing entry to the top puts it at index 0 and leaves the
    /// others in their original relative order.
    #[test]
    fn prop_set_top_reorders_only_the_target(
        names in prop::collection::hash_set("[a-z]{1,6}", 1..=12),
        pick in any::<prop::sample::Index>(),
    ) {
        let names: Vec<String> = names.into_iter().collect();
        let target = names[pick.index(names.len())].clone();
        let mut collection = collection_from(&names);

        collection.set(target.clone(), usize::MAX, Placement::Top);

        prop_assert_eq!(collection.index_of(&target), Some(0));
        prop_assert_eq!(collection.get(&target), Some(&usize::MAX));
        let rest: Vec<&str> = collection.names().skip(1).collect();
        let expected: Vec<&str> = names
            .iter()
            .map(String::as_str)
            .filter(|name| *name != target)
            .collect();
        prop_assert_eq!(rest, expected);
    }

    /// Removal deletes exactly one entry; a missing name changes nothing.
    #[test]
    fn prop_remove_then_get_is_none(
        names in prop::collection::hash_set("[a-z]{1,6}", 0..=12),
        target in "[a-z]{1,6}",
    ) {
        let names: Vec<String> = names.into_iter().collect();
        let mut collection = collection_from(&names);
        let before = collection.len();
        let present = names.contains(&target);

        let removed = collection.remove(&target);

        prop_assert_eq!(removed.is_some(), present);
        prop_assert_eq!(collection.get(&target), None);
        prop_assert_eq!(collection.len(), if present { before - 1 } else { before });
    }

    /// Every present name reports its real position, including index 0.
    #[test]
    fn prop_index_of_matches_position(names in prop::collection::hash_set("[a-z]{1,6}", 1..=12)) {
        let names: Vec<String> = names.into_iter().collect();
        let collection = collection_from(&names);

        for (position, name) in names.iter().enumerate() {
            prop_assert_eq!(collection.index_of(name), Some(position));
        }
        prop_assert_eq!(collection.index_of("0-not-a-name"), None);
    }
}

#[test]
fn first_entry_is_found_not_missing() {
    let mut collection = NamedCollection::new();
    collection.set("Environment", 1, Placement::Bottom);
    collection.set("Manifest", 2, Placement::Bottom);

    assert_eq!(collection.index_of("Environment"), Some(0));

    // Setting the first entry again must replace it, not append a duplicate
    collection.set("Environment", 3, Placement::Bottom);
    assert_eq!(collection.len(), 2);
    assert_eq!(collection.get("Environment"), Some(&3));

    // And removing it must work
    assert!(collection.remove("Environment").is_some());
    assert_eq!(collection.names().collect::<Vec<_>>(), ["Manifest"]);
}
