//! End-to-end pipeline tests against the sqlite-backed device store.

use std::path::PathBuf;

use quickdial::database::{self, queries, DeviceStore};
use quickdial::models::{CallOutcome, CallRecord, Permissions, WidgetSettings};
use quickdial::services::{aggregator, refresh_engine};
use quickdial::utils::config;

fn temp_data_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("quickdial-it-{}-{}", tag, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn seed_call(raw_number: &str, timestamp: i64, outcome: CallOutcome) -> CallRecord {
    CallRecord {
        raw_number: raw_number.to_string(),
        cached_name: None,
        cached_contact: None,
        timestamp,
        outcome,
    }
}

#[test]
fn aggregation_over_seeded_store() {
    let data_dir = temp_data_dir("aggregate");
    let conn = database::init_database(&data_dir.join(database::DB_FILE)).unwrap();

    let alice = queries::insert_contact(&conn, "lk-alice", "Alice", None).unwrap();
    queries::insert_contact_phone(&conn, alice, "+1-555-0100", 0).unwrap();
    let bob = queries::insert_contact(&conn, "lk-bob", "Bob", None).unwrap();
    queries::insert_contact_phone(&conn, bob, "5550101", 0).unwrap();

    queries::add_favorite(&conn, "lk-alice").unwrap();
    queries::add_favorite(&conn, "lk-gone").unwrap(); // deleted contact

    let now = chrono::Utc::now().timestamp_millis();
    // Alice re-contacted: must dedup against her favorite entry.
    queries::insert_call(&conn, &seed_call("+15550100", now, CallOutcome::Outgoing)).unwrap();
    // Bob resolves by reverse lookup.
    queries::insert_call(&conn, &seed_call("555-0101", now - 1_000, CallOutcome::Missed)).unwrap();
    // Unknown caller, twice: one entry, newest outcome.
    queries::insert_call(&conn, &seed_call("8675309", now - 2_000, CallOutcome::Rejected)).unwrap();
    queries::insert_call(&conn, &seed_call("867-5309", now - 3_000, CallOutcome::Incoming)).unwrap();

    let store = DeviceStore::new(&conn);
    let tokens = queries::get_favorite_tokens(&conn).unwrap();
    let entries = aggregator::build_widget_list(
        &store,
        &store,
        &tokens,
        &WidgetSettings::default(),
        Permissions::all_granted(),
    );

    let names: Vec<_> = entries
        .iter()
        .map(|e| e.display_name.clone().unwrap())
        .collect();
    assert_eq!(names, vec!["Alice", "Bob", "8675309"]);

    assert!(entries[0].is_favorite);
    assert_eq!(entries[0].last_call, CallOutcome::Outgoing);
    assert!(!entries[1].is_favorite);
    assert_eq!(entries[1].last_call, CallOutcome::Missed);
    assert!(!entries[2].contact.is_linked());
    assert_eq!(entries[2].last_call, CallOutcome::Rejected);
}

#[test]
fn unknown_callers_hidden_when_setting_is_off() {
    let data_dir = temp_data_dir("unknown");
    let conn = database::init_database(&data_dir.join(database::DB_FILE)).unwrap();

    let alice = queries::insert_contact(&conn, "lk-alice", "Alice", None).unwrap();
    queries::insert_contact_phone(&conn, alice, "5550100", 0).unwrap();

    let now = chrono::Utc::now().timestamp_millis();
    queries::insert_call(&conn, &seed_call("5550100", now, CallOutcome::Incoming)).unwrap();
    queries::insert_call(&conn, &seed_call("999", now - 1_000, CallOutcome::Missed)).unwrap();

    let settings = WidgetSettings {
        show_unknown_callers: false,
        ..Default::default()
    };
    let store = DeviceStore::new(&conn);
    let entries =
        aggregator::build_widget_list(&store, &store, &[], &settings, Permissions::all_granted());

    assert_eq!(entries.len(), 1);
    assert!(entries[0].contact.is_linked());
    assert_eq!(entries[0].display_name.as_deref(), Some("Alice"));
}

#[test]
fn snapshot_refresh_round_trip() {
    let data_dir = temp_data_dir("snapshot");
    let conn = database::init_database(&data_dir.join(database::DB_FILE)).unwrap();

    let alice = queries::insert_contact(&conn, "lk-alice", "Alice", Some("photo://a")).unwrap();
    queries::insert_contact_phone(&conn, alice, "5550100", 0).unwrap();
    queries::add_favorite(&conn, "lk-alice").unwrap();
    drop(conn);

    assert!(refresh_engine::get_widget_snapshot(&data_dir, 1)
        .unwrap()
        .is_none());

    let written =
        refresh_engine::refresh_widget_snapshot(&data_dir, 1, Permissions::all_granted()).unwrap();
    assert_eq!(written.entries.len(), 1);

    let read = refresh_engine::get_widget_snapshot(&data_dir, 1)
        .unwrap()
        .unwrap();
    assert_eq!(read.widget_id, 1);
    assert_eq!(read.entries, written.entries);
    assert_eq!(read.entries[0].photo_uri.as_deref(), Some("photo://a"));

    // A second refresh replaces the snapshot instead of stacking rows.
    refresh_engine::refresh_widget_snapshot(&data_dir, 1, Permissions::all_granted()).unwrap();
    let again = refresh_engine::get_widget_snapshot(&data_dir, 1)
        .unwrap()
        .unwrap();
    assert_eq!(again.entries, written.entries);
}

#[test]
fn snapshot_honors_persisted_settings() {
    let data_dir = temp_data_dir("settings");
    let conn = database::init_database(&data_dir.join(database::DB_FILE)).unwrap();

    let now = chrono::Utc::now().timestamp_millis();
    for i in 0..10 {
        queries::insert_call(
            &conn,
            &seed_call(&format!("555{:04}", i), now - i, CallOutcome::Incoming),
        )
        .unwrap();
    }
    drop(conn);

    let settings = WidgetSettings {
        max_items: 3,
        ..Default::default()
    };
    config::save_settings(&data_dir, &settings).unwrap();

    let snapshot =
        refresh_engine::refresh_widget_snapshot(&data_dir, 1, Permissions::all_granted()).unwrap();
    assert_eq!(snapshot.entries.len(), 3);
}

#[test]
fn denied_call_log_permission_omits_recents() {
    let data_dir = temp_data_dir("denied");
    let conn = database::init_database(&data_dir.join(database::DB_FILE)).unwrap();

    let alice = queries::insert_contact(&conn, "lk-alice", "Alice", None).unwrap();
    queries::insert_contact_phone(&conn, alice, "5550100", 0).unwrap();
    queries::add_favorite(&conn, "lk-alice").unwrap();

    let now = chrono::Utc::now().timestamp_millis();
    queries::insert_call(&conn, &seed_call("5550100", now, CallOutcome::Missed)).unwrap();
    queries::insert_call(&conn, &seed_call("999", now - 1, CallOutcome::Missed)).unwrap();
    drop(conn);

    let permissions = Permissions {
        contacts_granted: true,
        call_log_granted: false,
    };
    let snapshot = refresh_engine::refresh_widget_snapshot(&data_dir, 1, permissions).unwrap();

    assert_eq!(snapshot.entries.len(), 1);
    assert!(snapshot.entries[0].is_favorite);
    // Without call-log access the favorite's outcome is not looked up.
    assert_eq!(snapshot.entries[0].last_call, CallOutcome::None);
}
