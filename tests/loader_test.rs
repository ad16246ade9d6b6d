//! Tests for the roster normalization engine.

use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;
use roster_reader::{
    LoadWarning, LoaderConfig, MemberType, RelationshipRole, RosterError, SchemaVariant, Sex,
    load_member_file, normalize_leavers, normalize_members,
};

fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

fn config() -> LoaderConfig {
    LoaderConfig::with_reference_date(reference_date())
}

/// A raw staff/dependent table: header plus the given 9-column rows
fn staff_table(rows: &[[&str; 9]]) -> Vec<Vec<String>> {
    let header = SchemaVariant::StaffDependent
        .column_names()
        .iter()
        .map(ToString::to_string)
        .collect();
    let mut table = vec![header];
    table.extend(rows.iter().map(|r| r.iter().map(ToString::to_string).collect()));
    table
}

fn staff_row<'a>(
    number: &'a str,
    flag: &'a str,
    birth: &'a str,
    sex: &'a str,
) -> [&'a str; 9] {
    [number, "Surname", "Other", "A", flag, birth, sex, "01-Jan-2020", "Active"]
}

#[test]
fn scenario_two_row_classification() {
    let raw = staff_table(&[
        staff_row("1", "Y", "05-Jan-1990", "M"),
        staff_row("2", "", "10-Mar-2010", "F"),
    ]);
    let outcome = normalize_members(&raw, SchemaVariant::StaffDependent, &config()).unwrap();
    assert_eq!(outcome.records.len(), 2);

    let first = &outcome.records[0];
    assert_eq!(first.member_type, MemberType::Staff);
    assert_eq!(first.relationship, RelationshipRole::Staff);
    assert_eq!(first.age, Some(34), "floor(12566 / 365) days");
    assert_eq!(first.sex, Sex::Male);

    let second = &outcome.records[1];
    assert_eq!(second.member_type, MemberType::Dependent);
    assert_eq!(second.age, Some(14));
    assert_eq!(
        second.relationship,
        RelationshipRole::Child,
        "a 14-year-old dependent is a child regardless of sex"
    );
}

#[test]
fn adult_dependent_classifies_as_spouse() {
    let raw = staff_table(&[staff_row("1", "", "05-Jan-1990", "F")]);
    let outcome = normalize_members(&raw, SchemaVariant::StaffDependent, &config()).unwrap();
    assert_eq!(outcome.records[0].relationship, RelationshipRole::Spouse);
}

#[test]
fn unparsable_birth_date_keeps_row_and_warns_once() {
    let raw = staff_table(&[
        staff_row("1", "Y", "N/A", "M"),
        staff_row("2", "", "not a date", "F"),
        staff_row("3", "", "05-Jan-1990", "F"),
    ]);
    let outcome = normalize_members(&raw, SchemaVariant::StaffDependent, &config()).unwrap();

    // The load still returns the full row count
    assert_eq!(outcome.records.len(), 3);
    assert_eq!(outcome.records[0].birth_date, None);
    assert_eq!(outcome.records[0].age, None);
    // Null age never qualifies as adult
    assert_eq!(outcome.records[1].relationship, RelationshipRole::Child);

    // One warning for the column, not one per row
    assert_eq!(
        outcome.warnings,
        vec![LoadWarning::UnparsableDates {
            column: "Birth Date"
        }]
    );
}

#[test]
fn entry_date_warning_names_its_own_column() {
    let mut rows = staff_table(&[staff_row("1", "Y", "05-Jan-1990", "M")]);
    rows[1][7] = "never".to_string();
    let outcome = normalize_members(&rows, SchemaVariant::StaffDependent, &config()).unwrap();
    assert_eq!(outcome.records[0].entry_date, None);
    assert_eq!(
        outcome.warnings,
        vec![LoadWarning::UnparsableDates {
            column: "Entry Date"
        }]
    );
}

#[test]
fn permissive_entry_parse_accepts_day_first_variants() {
    let mut rows = staff_table(&[staff_row("1", "Y", "05-Jan-1990", "M")]);
    rows[1][7] = "03/04/2020".to_string();
    let outcome = normalize_members(&rows, SchemaVariant::StaffDependent, &config()).unwrap();
    assert_eq!(
        outcome.records[0].entry_date,
        Some(NaiveDate::from_ymd_opt(2020, 4, 3).unwrap()),
        "slash dates follow the day-first convention"
    );
    assert!(outcome.warnings.is_empty());
}

#[test]
fn header_row_is_discarded() {
    let raw = staff_table(&[staff_row("1", "Y", "05-Jan-1990", "M")]);
    let outcome = normalize_members(&raw, SchemaVariant::StaffDependent, &config()).unwrap();
    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].member_number, "1");
}

#[test]
fn empty_rows_are_skipped() {
    let mut raw = staff_table(&[staff_row("1", "Y", "05-Jan-1990", "M")]);
    raw.push(vec![String::new(); 9]);
    let outcome = normalize_members(&raw, SchemaVariant::StaffDependent, &config()).unwrap();
    assert_eq!(outcome.records.len(), 1);
}

#[test]
fn column_count_mismatch_aborts_the_load() {
    let mut raw = staff_table(&[staff_row("1", "Y", "05-Jan-1990", "M")]);
    raw.push(vec!["2".to_string(), "short".to_string()]);
    let err = normalize_members(&raw, SchemaVariant::StaffDependent, &config()).unwrap_err();
    assert!(
        matches!(err, RosterError::SchemaMismatch { expected: 9, found: 2, .. }),
        "got {err}"
    );
}

#[test]
fn blank_category_becomes_not_specified() {
    let mut raw = staff_table(&[staff_row("1", "Y", "05-Jan-1990", "M")]);
    raw[1][3] = String::new();
    let outcome = normalize_members(&raw, SchemaVariant::StaffDependent, &config()).unwrap();
    assert_eq!(outcome.records[0].category, "Not Specified");
}

#[test]
fn full_list_overrides_the_raw_relationship_column() {
    let header: Vec<String> = SchemaVariant::FullList
        .column_names()
        .iter()
        .map(ToString::to_string)
        .collect();
    let row = |number: &str, relationship: &str, flag: &str| -> Vec<String> {
        [
            number, "Surname", "Other", relationship, "A", flag, "05-Jan-1990", "F",
            "01-Jan-2020", "Active", "HQ",
        ]
        .iter()
        .map(ToString::to_string)
        .collect()
    };
    let raw = vec![header, row("1", "Spouse", "Y"), row("2", "Employee", "")];

    let outcome = normalize_members(&raw, SchemaVariant::FullList, &config()).unwrap();
    assert_eq!(
        outcome.records[0].relationship,
        RelationshipRole::Member,
        "flag Y is Member regardless of the raw column"
    );
    assert_eq!(outcome.records[1].relationship, RelationshipRole::Dependent);
    assert_eq!(outcome.records[0].member_type, MemberType::Staff);
    assert_eq!(outcome.records[1].member_type, MemberType::Dependent);
}

#[test]
fn leavers_schema_is_rejected_by_the_member_loader() {
    let raw = vec![vec![String::new(); 5]];
    let err = normalize_members(&raw, SchemaVariant::Leavers, &config()).unwrap_err();
    assert!(matches!(err, RosterError::Other(_)));
}

#[test]
fn leavers_keep_their_source_label() {
    let header: Vec<String> = SchemaVariant::Leavers
        .column_names()
        .iter()
        .map(ToString::to_string)
        .collect();
    let raw = vec![
        header,
        ["Jane Doe", "05-Jan-1990", "F", " Employee ", ""]
            .iter()
            .map(ToString::to_string)
            .collect(),
        ["John Doe", "bad date", "M", "Dependent", "B"]
            .iter()
            .map(ToString::to_string)
            .collect(),
    ];

    let outcome = normalize_leavers(&raw, &config()).unwrap();
    assert_eq!(outcome.records.len(), 2);
    assert_eq!(outcome.records[0].relationship, "Employee");
    assert_eq!(outcome.records[0].age, Some(34));
    assert_eq!(outcome.records[0].category, "Not Specified");
    assert_eq!(outcome.records[1].age, None);
    assert_eq!(
        outcome.warnings,
        vec![LoadWarning::UnparsableDates {
            column: "Date of Birth"
        }]
    );
}

#[test]
fn csv_file_loads_end_to_end() {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(
        file,
        "Member Number,Surname,Other Name(s),CAT,P/Cont,Birth Date,Sex,Entry Date,Status"
    )
    .unwrap();
    writeln!(file, "1,Smith,Anna,A,Y,05-Jan-1990,F,01-Jan-2020,Active").unwrap();
    writeln!(file, "2,Smith,Ben,A,,10-Mar-2010,M,01-Jan-2020,Active").unwrap();
    file.flush().unwrap();

    let outcome =
        load_member_file(file.path(), SchemaVariant::StaffDependent, &config()).unwrap();
    assert_eq!(outcome.records.len(), 2);
    assert_eq!(outcome.records[0].relationship, RelationshipRole::Staff);
    assert_eq!(outcome.records[1].relationship, RelationshipRole::Child);
    assert!(outcome.warnings.is_empty());
}

#[test]
fn xlsx_file_loads_end_to_end() {
    let path =
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/staff_roster.xlsx");
    let outcome = load_member_file(&path, SchemaVariant::StaffDependent, &config()).unwrap();
    assert_eq!(outcome.records.len(), 2);

    let first = &outcome.records[0];
    assert_eq!(
        first.member_number, "1",
        "numeric cells stringify without a decimal point"
    );
    assert_eq!(
        first.birth_date,
        Some(NaiveDate::from_ymd_opt(1990, 1, 5).unwrap()),
        "date cells must render day-first so the strict coercion accepts them"
    );
    assert_eq!(first.age, Some(34));
    assert_eq!(first.relationship, RelationshipRole::Staff);
    assert_eq!(
        first.entry_date,
        Some(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap())
    );

    let second = &outcome.records[1];
    assert_eq!(second.member_number, "2");
    assert_eq!(
        second.member_type,
        MemberType::Dependent,
        "a missing principal-flag cell reads back as blank"
    );
    assert_eq!(second.age, Some(14));
    assert_eq!(second.relationship, RelationshipRole::Child);
    assert!(outcome.warnings.is_empty());
}

#[test]
fn unsupported_extension_fails_the_load() {
    let file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    let err =
        load_member_file(file.path(), SchemaVariant::StaffDependent, &config()).unwrap_err();
    assert!(matches!(err, RosterError::UnsupportedFormat(ext) if ext == "txt"));
}
