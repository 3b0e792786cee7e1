#![allow(clippy::float_cmp)]

use super::*;

fn survey(free: u32, occupied: u32) -> BuildingSurvey {
    BuildingSurvey { id: None, name: "S".into(), free_count: free, occupied_count: occupied, floors: Vec::new() }
}

#[test]
fn rate_of_thirty_free_seventy_occupied() {
    assert!((free_rate(&survey(30, 70)) - 0.3).abs() < 1e-6);
}

#[test]
fn rate_is_zero_without_seats() {
    assert_eq!(free_rate(&survey(0, 0)), 0.0);
}

#[test]
fn rate_bounds() {
    assert_eq!(free_rate(&survey(5, 0)), 1.0);
    assert_eq!(free_rate(&survey(0, 5)), 0.0);
    let huge = free_rate(&survey(u32::MAX, u32::MAX));
    assert!((huge - 0.5).abs() < 1e-6);
}

#[test]
fn rate_stays_in_unit_interval() {
    for free in [0, 1, 2, 17, 250, 1000] {
        for occupied in [0, 1, 3, 99, 1000] {
            let rate = free_rate(&survey(free, occupied));
            assert!((0.0..=1.0).contains(&rate), "rate {rate} for {free}/{occupied}");
            assert_eq!(rate == 0.0, free == 0 || free + occupied == 0);
        }
    }
}

#[test]
fn rate_applies_to_floors() {
    let floor = FloorRecord { name: "Level 1".into(), free_count: 1, occupied_count: 3 };
    assert_eq!(free_rate(&floor), 0.25);
    assert_eq!(floor.total(), 4);
}

#[test]
fn percent_rounds_like_the_display() {
    assert_eq!(percent(0.3), 30);
    assert_eq!(percent(0.0), 0);
    assert_eq!(percent(1.0), 100);
    assert_eq!(percent(0.125), 12);
    assert_eq!(percent(0.996), 100);
}
