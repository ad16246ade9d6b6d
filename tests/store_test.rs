//! Tests for load-replace semantics of the session store.

use chrono::NaiveDate;
use roster_reader::{
    LoaderConfig, RosterError, RosterStore, SchemaVariant, normalize_members,
};

fn config() -> LoaderConfig {
    LoaderConfig::with_reference_date(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
}

fn table_with_members(numbers: &[&str]) -> Vec<Vec<String>> {
    let header = SchemaVariant::StaffDependent
        .column_names()
        .iter()
        .map(ToString::to_string)
        .collect();
    let mut raw = vec![header];
    for number in numbers {
        raw.push(
            [
                *number, "Surname", "Other", "A", "Y", "05-Jan-1990", "M", "01-Jan-2020", "Active",
            ]
            .iter()
            .map(ToString::to_string)
            .collect(),
        );
    }
    raw
}

#[test]
fn publish_replaces_the_table_wholesale() {
    let mut store = RosterStore::new();
    assert!(store.members().is_none());

    let first = normalize_members(&table_with_members(&["1", "2"]), SchemaVariant::StaffDependent, &config()).unwrap();
    store.publish_members(first);
    let snapshot = store.members().unwrap();
    assert_eq!(snapshot.records.len(), 2);

    let second = normalize_members(&table_with_members(&["9"]), SchemaVariant::StaffDependent, &config()).unwrap();
    store.publish_members(second);

    // An aggregation running against the old snapshot still sees a complete
    // table; new reads see the replacement.
    assert_eq!(snapshot.records.len(), 2);
    assert_eq!(store.members().unwrap().records.len(), 1);
    assert_eq!(store.members().unwrap().records[0].member_number, "9");
}

#[test]
fn failed_load_leaves_prior_state_intact() {
    let mut store = RosterStore::new();
    let good = normalize_members(&table_with_members(&["1"]), SchemaVariant::StaffDependent, &config()).unwrap();
    store.publish_members(good);

    // A malformed table fails before anything can be published
    let mut bad = table_with_members(&["2"]);
    bad.push(vec!["trailing".to_string()]);
    let err = normalize_members(&bad, SchemaVariant::StaffDependent, &config()).unwrap_err();
    assert!(matches!(err, RosterError::SchemaMismatch { .. }));

    let snapshot = store.members().unwrap();
    assert_eq!(snapshot.records.len(), 1);
    assert_eq!(snapshot.records[0].member_number, "1");
}
