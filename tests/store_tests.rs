//! Store Tests
//!
//! Tests for insert/find/delete/update, filters, and statistics.

use gazetteer::{GazetteerError, InsertOutcome, Record, Store};

/// A valid record with fixed filler for the fields under no test
fn city(name: &str, region: &str, population: u32) -> Record {
    Record::new(
        name,
        region,
        population,
        2000,
        "ann smith",
        "1 main st",
        "founded long ago",
        10.0,
        20.0,
    )
    .expect("valid test record")
}

// =============================================================================
// Insert / Find Tests
// =============================================================================

#[test]
fn test_insert_and_find_case_insensitive() {
    let mut store = Store::new();
    store.insert(city("Paris", "France", 2_000_000)).unwrap();
    store.insert(city("Paris", "Texas", 25_000)).unwrap();

    let a = store.find("PARIS", "FRANCE").unwrap();
    assert_eq!(a.population(), 2_000_000);

    let b = store.find("paris", "Texas").unwrap();
    assert_eq!(b.population(), 25_000);

    assert_eq!(store.len(), 2);
}

#[test]
fn test_find_missing_is_not_found() {
    let store = Store::new();
    let result = store.find("atlantis", "ocean");
    assert!(matches!(result, Err(GazetteerError::NotFound { .. })));
}

#[test]
fn test_insert_conflict_carries_existing_key() {
    let mut store = Store::new();
    store.insert(city("Oslo", "Norway", 700_000)).unwrap();

    let err = store.insert(city("OSLO", "norway", 999)).unwrap_err();
    match err {
        GazetteerError::Conflict { name, region } => {
            assert_eq!(name, "oslo");
            assert_eq!(region, "norway");
        }
        other => panic!("expected Conflict, got {other:?}"),
    }

    // The store is unchanged
    assert_eq!(store.len(), 1);
    assert_eq!(store.find("oslo", "norway").unwrap().population(), 700_000);
}

#[test]
fn test_insert_or_confirm_declined_keeps_existing() {
    let mut store = Store::new();
    store.insert(city("Oslo", "Norway", 700_000)).unwrap();

    let mut asked = 0;
    let outcome = store.insert_or_confirm(city("oslo", "norway", 999), &mut |key| {
        asked += 1;
        assert_eq!(key.name, "oslo");
        false
    });

    assert_eq!(outcome, InsertOutcome::Skipped);
    assert_eq!(asked, 1);
    assert_eq!(store.find("oslo", "norway").unwrap().population(), 700_000);
}

#[test]
fn test_insert_or_confirm_accepted_replaces() {
    let mut store = Store::new();
    store.insert(city("Oslo", "Norway", 700_000)).unwrap();
    store.insert(city("Bergen", "Norway", 280_000)).unwrap();

    let outcome = store.insert_or_confirm(city("oslo", "norway", 999), &mut |_| true);

    assert_eq!(outcome, InsertOutcome::Replaced);
    assert_eq!(store.len(), 2);
    assert_eq!(store.find("oslo", "norway").unwrap().population(), 999);

    // Replacement is delete-then-append, so the record moves to the end
    let last = store.iter().last().unwrap();
    assert_eq!(last.name(), "oslo");
}

#[test]
fn test_replace_displaces_existing_record() {
    let mut store = Store::new();
    store.insert(city("Oslo", "Norway", 700_000)).unwrap();

    let displaced = store.replace(city("oslo", "NORWAY", 999));
    assert_eq!(displaced.unwrap().population(), 700_000);
    assert_eq!(store.len(), 1);
    assert_eq!(store.find("oslo", "norway").unwrap().population(), 999);

    // No conflict: nothing displaced, plain append
    assert!(store.replace(city("bergen", "norway", 280_000)).is_none());
    assert_eq!(store.len(), 2);
}

#[test]
fn test_insert_or_confirm_no_conflict_never_asks() {
    let mut store = Store::new();
    let outcome = store.insert_or_confirm(city("Lima", "Peru", 9_000_000), &mut |_| {
        panic!("confirmation must only run on a key conflict")
    });
    assert_eq!(outcome, InsertOutcome::Inserted);
}

// =============================================================================
// Delete Tests
// =============================================================================

#[test]
fn test_delete_removes_record() {
    let mut store = Store::new();
    store.insert(city("Quito", "Ecuador", 1_800_000)).unwrap();

    let removed = store.remove("QUITO", "ecuador").unwrap();
    assert_eq!(removed.population(), 1_800_000);
    assert!(store.is_empty());
}

#[test]
fn test_delete_missing_leaves_size_unchanged() {
    let mut store = Store::new();
    store.insert(city("Quito", "Ecuador", 1_800_000)).unwrap();

    let result = store.remove("la paz", "bolivia");
    assert!(matches!(result, Err(GazetteerError::NotFound { .. })));
    assert_eq!(store.len(), 1);
}

// =============================================================================
// Update Tests
// =============================================================================

#[test]
fn test_update_population() {
    let mut store = Store::new();
    store.insert(city("Quito", "Ecuador", 1_800_000)).unwrap();

    store
        .update_attribute("quito", "ecuador", "population", "2000000")
        .unwrap();
    assert_eq!(store.find("quito", "ecuador").unwrap().population(), 2_000_000);
}

#[test]
fn test_update_invalid_value_leaves_record_unchanged() {
    let mut store = Store::new();
    store.insert(city("Quito", "Ecuador", 1_800_000)).unwrap();

    let result = store.update_attribute("quito", "ecuador", "population", "0");
    assert!(matches!(result, Err(GazetteerError::InvalidAttribute { .. })));
    assert_eq!(store.find("quito", "ecuador").unwrap().population(), 1_800_000);

    let result = store.update_attribute("quito", "ecuador", "latitude", "95");
    assert!(matches!(result, Err(GazetteerError::InvalidAttribute { .. })));
    assert_eq!(store.find("quito", "ecuador").unwrap().latitude(), 10.0);
}

#[test]
fn test_update_unknown_attribute() {
    let mut store = Store::new();
    store.insert(city("Quito", "Ecuador", 1_800_000)).unwrap();

    let result = store.update_attribute("quito", "ecuador", "altitude", "2850");
    assert!(matches!(result, Err(GazetteerError::UnknownAttribute(_))));
}

#[test]
fn test_update_missing_city_reported_before_bad_attribute() {
    let mut store = Store::new();
    let result = store.update_attribute("nowhere", "void", "altitude", "1");
    assert!(matches!(result, Err(GazetteerError::NotFound { .. })));
}

#[test]
fn test_update_folds_text_values() {
    let mut store = Store::new();
    store.insert(city("Quito", "Ecuador", 1_800_000)).unwrap();

    store
        .update_attribute("quito", "ecuador", "mayorname", "  Pabel MUNOZ ")
        .unwrap();
    assert_eq!(store.find("quito", "ecuador").unwrap().mayor_name(), "pabel munoz");
}

#[test]
fn test_rename_can_create_duplicate_key() {
    // Renaming does not re-check uniqueness: legacy behavior, kept on
    // purpose. The first match keeps winning lookups.
    let mut store = Store::new();
    store.insert(city("Springfield", "Illinois", 110_000)).unwrap();
    store.insert(city("Shelbyville", "Illinois", 40_000)).unwrap();

    store
        .update_attribute("shelbyville", "illinois", "name", "Springfield")
        .unwrap();

    assert_eq!(store.len(), 2);
    let names: Vec<&str> = store.iter().map(|r| r.name()).collect();
    assert_eq!(names, vec!["springfield", "springfield"]);
    assert_eq!(
        store.find("springfield", "illinois").unwrap().population(),
        110_000
    );
}

// =============================================================================
// Sort Tests
// =============================================================================

#[test]
fn test_sort_by_population_is_non_decreasing() {
    let mut store = Store::new();
    for (name, population) in [("a", 500), ("b", 100), ("c", 900), ("d", 300), ("e", 700)] {
        store.insert(city(name, "x", population)).unwrap();
    }

    let key = store.sort_by("population");
    assert_eq!(key.as_str(), "population");

    let populations: Vec<u32> = store.iter().map(|r| r.population()).collect();
    assert!(populations.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_sort_unknown_attribute_falls_back_to_name() {
    let mut store = Store::new();
    store.insert(city("zagreb", "croatia", 800_000)).unwrap();
    store.insert(city("athens", "greece", 650_000)).unwrap();
    store.insert(city("madrid", "spain", 3_200_000)).unwrap();

    let key = store.sort_by("altitude");
    assert_eq!(key.as_str(), "name");

    let names: Vec<&str> = store.iter().map(|r| r.name()).collect();
    assert_eq!(names, vec!["athens", "madrid", "zagreb"]);
}

#[test]
fn test_sort_equal_keys_keep_arrival_order() {
    let mut store = Store::new();
    store.insert(city("first", "x", 500)).unwrap();
    store.insert(city("second", "x", 100)).unwrap();
    store.insert(city("third", "x", 500)).unwrap();
    store.insert(city("fourth", "x", 500)).unwrap();

    store.sort_by("population");

    let names: Vec<&str> = store.iter().map(|r| r.name()).collect();
    assert_eq!(names, vec!["second", "first", "third", "fourth"]);
}

// =============================================================================
// Filter Tests
// =============================================================================

#[test]
fn test_filter_population_range() {
    let mut store = Store::new();
    store.insert(city("small", "x", 100)).unwrap();
    store.insert(city("middle", "x", 5_000)).unwrap();
    store.insert(city("large", "x", 250_000)).unwrap();

    let matched: Vec<&Record> = store.filter_by_population(200, 10_000).collect();
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].population(), 5_000);
}

#[test]
fn test_filter_population_bounds_are_inclusive() {
    let mut store = Store::new();
    store.insert(city("low", "x", 200)).unwrap();
    store.insert(city("high", "x", 10_000)).unwrap();

    let matched: Vec<&Record> = store.filter_by_population(200, 10_000).collect();
    assert_eq!(matched.len(), 2);
}

#[test]
fn test_filter_population_empty_result_is_not_an_error() {
    let mut store = Store::new();
    store.insert(city("small", "x", 100)).unwrap();

    assert_eq!(store.filter_by_population(500, 600).count(), 0);
}

#[test]
fn test_filter_region_case_insensitive_in_store_order() {
    let mut store = Store::new();
    store.insert(city("lyon", "France", 500_000)).unwrap();
    store.insert(city("turin", "Italy", 850_000)).unwrap();
    store.insert(city("nice", "france", 340_000)).unwrap();

    let matched: Vec<&str> = store.filter_by_region("FRANCE").map(|r| r.name()).collect();
    assert_eq!(matched, vec!["lyon", "nice"]);
}

// =============================================================================
// Statistics Tests
// =============================================================================

#[test]
fn test_statistics_empty_store_is_no_data() {
    let store = Store::new();
    assert!(matches!(store.statistics(), Err(GazetteerError::NoData)));
}

#[test]
fn test_statistics_two_records() {
    let mut store = Store::new();
    store.insert(city("a", "x", 100)).unwrap();
    store.insert(city("b", "x", 300)).unwrap();

    let stats = store.statistics().unwrap();
    assert_eq!(stats.count, 2);
    assert_eq!(stats.average_population, 200.0);
    assert_eq!(stats.min_population, 100);
    assert_eq!(stats.max_population, 300);
    assert_eq!(stats.average_year, 2000.0);
    assert_eq!(stats.average_latitude, 10.0);
    assert_eq!(stats.average_longitude, 20.0);
}

// =============================================================================
// Record Validation Tests
// =============================================================================

#[test]
fn test_record_rejects_out_of_domain_values() {
    let valid = |population, year, latitude, longitude| {
        Record::new(
            "name", "region", population, year, "mayor", "address", "history", latitude, longitude,
        )
    };

    assert!(valid(1, 2000, 0.0, 0.0).is_ok());
    assert!(valid(40_000_000, 1980, -90.0, -180.0).is_ok());
    assert!(valid(0, 2000, 0.0, 0.0).is_err());
    assert!(valid(40_000_001, 2000, 0.0, 0.0).is_err());
    assert!(valid(1, 1979, 0.0, 0.0).is_err());
    assert!(valid(1, 9999, 0.0, 0.0).is_err());
    assert!(valid(1, 2000, 90.5, 0.0).is_err());
    assert!(valid(1, 2000, 0.0, -180.5).is_err());
}

#[test]
fn test_record_rejects_empty_required_strings() {
    let result = Record::new("", "region", 1, 2000, "m", "a", "h", 0.0, 0.0);
    assert!(matches!(result, Err(GazetteerError::InvalidAttribute { .. })));

    let result = Record::new("name", "region", 1, 2000, "m", "  ", "h", 0.0, 0.0);
    assert!(matches!(result, Err(GazetteerError::InvalidAttribute { .. })));
}

#[test]
fn test_record_case_folds_on_entry() {
    let record = Record::new(
        "  New York ",
        "USA",
        8_000_000,
        2020,
        "Eric Adams",
        "City Hall",
        "Founded 1624",
        40.7,
        -74.0,
    )
    .unwrap();

    assert_eq!(record.name(), "new york");
    assert_eq!(record.region(), "usa");
    assert_eq!(record.mayor_name(), "eric adams");
    assert_eq!(record.mayor_address(), "city hall");
    assert_eq!(record.history(), "founded 1624");
}
