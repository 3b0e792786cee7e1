use super::*;

fn survey(name: &str, free: u32) -> BuildingSurvey {
    BuildingSurvey { id: None, name: name.into(), free_count: free, occupied_count: 0, floors: Vec::new() }
}

// =============================================================================
// SnapshotStore / SnapshotReader
// =============================================================================

#[test]
fn store_starts_empty() {
    let store = SnapshotStore::new();
    assert!(store.latest().is_none());
    assert!(store.subscribe().latest().is_none());
}

#[test]
fn publish_assigns_increasing_sequence() {
    let store = SnapshotStore::new();
    let first = store.publish(vec![survey("A", 1)]);
    let second = store.publish(vec![survey("A", 2)]);
    assert_eq!(first.sequence(), 1);
    assert_eq!(second.sequence(), 2);
    assert_eq!(store.latest().unwrap().sequence(), 2);
}

#[test]
fn publish_replaces_snapshot_wholesale() {
    let store = SnapshotStore::new();
    let reader = store.subscribe();
    let first = store.publish(vec![survey("A", 1), survey("B", 2)]);
    let held = reader.latest().unwrap();

    store.publish(vec![survey("C", 3)]);

    // The old Arc still sees the old complete value.
    assert_eq!(*held, *first);
    assert_eq!(held.surveys().len(), 2);
    let latest = reader.latest().unwrap();
    assert_eq!(latest.surveys().len(), 1);
    assert_eq!(latest.surveys()[0].name, "C");
}

#[test]
fn take_changed_reports_each_publication_once() {
    let store = SnapshotStore::new();
    let mut reader = store.subscribe();
    assert!(reader.take_changed().is_none());

    store.publish(vec![survey("A", 1)]);
    assert_eq!(reader.take_changed().unwrap().sequence(), 1);
    assert!(reader.take_changed().is_none());

    store.publish(vec![survey("A", 2)]);
    store.publish(vec![survey("A", 3)]);
    assert_eq!(reader.take_changed().unwrap().sequence(), 3);
    assert!(reader.take_changed().is_none());
}

#[test]
fn readers_track_changes_independently() {
    let store = SnapshotStore::new();
    let mut a = store.subscribe();
    let mut b = a.clone();
    store.publish(vec![survey("A", 1)]);

    assert!(a.take_changed().is_some());
    assert!(b.take_changed().is_some());
}

#[test]
fn reader_keeps_last_snapshot_after_store_drop() {
    let store = SnapshotStore::new();
    let mut reader = store.subscribe();
    store.publish(vec![survey("A", 1)]);
    drop(store);

    assert_eq!(reader.latest().unwrap().sequence(), 1);
    assert!(reader.take_changed().is_none());
}

// =============================================================================
// SelectedBuilding
// =============================================================================

#[test]
fn selection_set_bumps_version_only_on_change() {
    let selection = SelectedBuilding::new("One Pool Street");
    assert_eq!(selection.version(), 0);

    assert!(!selection.set("One Pool Street"));
    assert_eq!(selection.version(), 0);

    assert!(selection.set("Marshgate"));
    assert_eq!(selection.version(), 1);
    assert_eq!(selection.label(), "Marshgate");
}

#[test]
fn selection_clones_share_state() {
    let selection = SelectedBuilding::new("One Pool Street");
    let other = selection.clone();
    other.select(Building::Marshgate);
    assert_eq!(selection.label(), "Marshgate");
}

#[test]
fn set_if_known_ignores_unknown_labels() {
    let selection = SelectedBuilding::new("One Pool Street");
    assert!(!selection.set_if_known("Bloomsbury"));
    assert_eq!(selection.label(), "One Pool Street");

    assert!(selection.set_if_known("Marshgate"));
    assert_eq!(selection.label(), "Marshgate");
}

#[test]
fn set_accepts_unknown_labels() {
    let selection = SelectedBuilding::new("One Pool Street");
    assert!(selection.set("Bloomsbury"));
    assert_eq!(selection.label(), "Bloomsbury");
}
