#![allow(clippy::float_cmp)]

use super::*;
use crate::state::SnapshotStore;
use crate::telemetry::FloorRecord;

fn survey(name: &str, free: u32, occupied: u32) -> BuildingSurvey {
    BuildingSurvey {
        id: None,
        name: name.into(),
        free_count: free,
        occupied_count: occupied,
        floors: vec![
            FloorRecord { name: "Ground".into(), free_count: free / 2, occupied_count: occupied / 2 },
            FloorRecord { name: "First".into(), free_count: free - free / 2, occupied_count: occupied - occupied / 2 },
        ],
    }
}

fn both(pool_free: u32, marsh_free: u32) -> Vec<BuildingSurvey> {
    vec![survey("East Campus - Pool St", pool_free, 100 - pool_free), survey("East Campus - Marshgate", marsh_free, 0)]
}

fn fixture(label: &str) -> (SnapshotStore, SelectedBuilding, DashboardPanel) {
    let store = SnapshotStore::new();
    let selection = SelectedBuilding::new(label);
    let panel = DashboardPanel::new(store.subscribe(), selection.clone(), 180);
    (store, selection, panel)
}

// =============================================================================
// DashboardView
// =============================================================================

#[test]
fn view_from_survey_fills_counts_rate_and_floors() {
    let view = DashboardView::from_survey(Building::OnePoolStreet, 3, &survey("East Campus - Pool St", 30, 70));
    assert_eq!(view.sequence, 3);
    assert_eq!(view.free, 30);
    assert_eq!(view.occupied, 70);
    assert!((view.free_rate - 0.3).abs() < 1e-6);
    assert_eq!(view.free_percent, 30);
    assert_eq!(
        view.floors,
        vec![
            FloorRow { name: "Ground".into(), free: 15, occupied: 35 },
            FloorRow { name: "First".into(), free: 15, occupied: 35 },
        ]
    );
}

#[test]
fn view_of_empty_building_has_zero_rate() {
    let view = DashboardView::from_survey(Building::Marshgate, 1, &survey("East Campus - Marshgate", 0, 0));
    assert_eq!(view.free_rate, 0.0);
    assert_eq!(view.free_percent, 0);
}

// =============================================================================
// DashboardPanel
// =============================================================================

#[test]
fn tick_without_snapshot_does_nothing() {
    let (_store, _selection, mut panel) = fixture("One Pool Street");
    assert!(panel.tick().is_none());
    assert_eq!(panel.refresh(), Err(DashboardError::NoSnapshot));
    assert!(panel.view().is_none());
}

#[test]
fn tick_rebuilds_on_new_snapshot_only() {
    let (store, _selection, mut panel) = fixture("One Pool Street");
    store.publish(both(30, 5));

    let view = panel.tick().unwrap();
    assert_eq!(view.building, Building::OnePoolStreet);
    assert_eq!(view.free, 30);

    assert!(panel.tick().is_none());
    assert_eq!(panel.history().series(&Building::OnePoolStreet), vec![30]);

    store.publish(both(40, 5));
    assert_eq!(panel.tick().unwrap().free, 40);
    assert_eq!(panel.chart_points(), vec![(0, 30), (1, 40)]);
}

#[test]
fn selection_change_rebuilds_with_held_snapshot() {
    let (store, selection, mut panel) = fixture("One Pool Street");
    store.publish(both(30, 5));
    panel.tick();

    selection.select(Building::Marshgate);
    let view = panel.tick().unwrap();
    assert_eq!(view.building, Building::Marshgate);
    assert_eq!(view.free, 5);
    assert_eq!(panel.chart_points(), vec![(0, 5)]);
    // Pool history is untouched by the switch.
    assert_eq!(panel.history().series(&Building::OnePoolStreet), vec![30]);
}

#[test]
fn unknown_label_skips_update_and_history() {
    let (store, selection, mut panel) = fixture("One Pool Street");
    store.publish(both(30, 5));
    panel.tick();

    selection.set("Bloomsbury");
    assert!(panel.tick().is_none());
    assert!(matches!(panel.refresh(), Err(DashboardError::Building(BuildingError::UnknownLabel(_)))));

    // Stale view persists, no samples written anywhere.
    assert_eq!(panel.view().unwrap().building, Building::OnePoolStreet);
    assert_eq!(panel.history().len(&Building::OnePoolStreet), 1);
    assert!(panel.history().is_empty(&Building::Marshgate));
    // Chart stays with the stale view.
    assert_eq!(panel.chart_points(), vec![(0, 30)]);
}

#[test]
fn chart_follows_view_until_next_tick() {
    let (store, selection, mut panel) = fixture("One Pool Street");
    assert!(panel.chart_points().is_empty());

    store.publish(both(30, 5));
    panel.tick();
    selection.select(Building::Marshgate);
    panel.tick();
    store.publish(both(40, 6));
    panel.tick();
    assert_eq!(panel.chart_points(), vec![(0, 5), (1, 6)]);

    // Selection moved back, but no tick has rebuilt the view yet.
    selection.select(Building::OnePoolStreet);
    assert_eq!(panel.view().unwrap().building, Building::Marshgate);
    assert_eq!(panel.chart_points(), vec![(0, 5), (1, 6)]);

    panel.tick();
    assert_eq!(panel.chart_points(), vec![(0, 30), (1, 40)]);
}

#[test]
fn building_missing_from_snapshot_keeps_stale_view() {
    let (store, _selection, mut panel) = fixture("Marshgate");
    store.publish(both(30, 5));
    panel.tick();

    store.publish(vec![survey("East Campus - Pool St", 10, 90)]);
    assert!(panel.tick().is_none());
    assert_eq!(
        panel.refresh(),
        Err(DashboardError::Building(BuildingError::NotFound { key: "East Campus - Marshgate".into() }))
    );
    let view = panel.view().unwrap();
    assert_eq!(view.sequence, 1);
    assert_eq!(view.free, 5);
    assert_eq!(panel.history().series(&Building::Marshgate), vec![5]);
}

#[test]
fn history_is_capped() {
    let store = SnapshotStore::new();
    let selection = SelectedBuilding::new("Marshgate");
    let mut panel = DashboardPanel::new(store.subscribe(), selection, 3);

    for free in 1..=5 {
        store.publish(both(50, free));
        panel.tick();
    }
    assert_eq!(panel.history().series(&Building::Marshgate), vec![3, 4, 5]);
}
