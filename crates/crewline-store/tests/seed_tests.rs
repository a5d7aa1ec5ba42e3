// SPDX-FileCopyrightText: 2026 Crewline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for seed loading and store construction.

use std::io::Write;

use crewline_core::{CrewlineError, ShiftStatus};
use crewline_store::{EntityStore, Seed};
use tracing_test::traced_test;

/// A seed written to disk loads back identically.
#[test]
fn seed_file_round_trip() {
    let seed = Seed::demo();
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(seed.to_json_pretty().expect("serialize").as_bytes())
        .expect("write");

    let loaded = Seed::from_path(file.path()).expect("seed file is valid");
    assert_eq!(loaded, seed);
}

/// A missing file is a seed error, not a panic.
#[test]
fn missing_seed_file_is_reported() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = Seed::from_path(&dir.path().join("absent.json")).unwrap_err();
    match err {
        CrewlineError::Seed { message, source } => {
            assert!(message.contains("absent.json"));
            assert!(source.is_some());
        }
        other => panic!("expected seed error, got {other:?}"),
    }
}

/// Unknown top-level collections are rejected.
#[test]
fn unknown_collection_is_rejected() {
    let err = Seed::from_json_str(r#"{"invoices": []}"#).unwrap_err();
    assert!(matches!(err, CrewlineError::Seed { .. }));
}

/// Lint findings are logged when the store is seeded but do not block it.
#[test]
#[traced_test]
fn open_shift_with_assignee_is_logged_and_kept() {
    let mut seed = Seed::demo();
    let open = seed
        .shifts
        .iter_mut()
        .find(|s| s.id == "s-open-1")
        .expect("open shift");
    open.assigned_to = Some("david".into());

    let store = EntityStore::from_seed(seed, "new");
    let shift = store.shift("s-open-1").expect("shift kept");
    assert_eq!(shift.status, ShiftStatus::Open);
    assert_eq!(shift.assigned_to.as_ref().expect("assignee kept"), "david");
    assert!(logs_contain("seed lint"));
    assert!(logs_contain("s-open-1 is OPEN but assigned to david"));
}

/// The demo fixture seeds without lint warnings.
#[test]
#[traced_test]
fn demo_seed_is_quiet() {
    let _store = EntityStore::from_seed(Seed::demo(), "new");
    assert!(!logs_contain("seed lint"));
}
