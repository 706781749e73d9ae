//! Filter and selection resolution across the whole app state.

use dronedeck::app::App;
use dronedeck::fleet::{Drone, DroneStatus, Fleet, Location, StatusFilter};

fn drone(id: &str, status: DroneStatus, battery: f64) -> Drone {
    Drone {
        id: id.to_string(),
        location: Location {
            lat: 25.21,
            lng: 55.29,
        },
        status,
        battery,
        altitude: 100.0,
        speed: 30.0,
        payload: 1.0,
        wind: "10 km/h N".to_string(),
    }
}

fn two_drone_app() -> App {
    let fleet = Fleet::new(vec![
        drone("DR-1", DroneStatus::Active, 80.0),
        drone("DR-2", DroneStatus::Offline, 50.0),
    ])
    .unwrap();
    App::new(fleet)
}

#[test]
fn initial_selection_is_first_drone() {
    let app = two_drone_app();
    assert_eq!(app.selected_drone_id.as_deref(), Some("DR-1"));
}

#[test]
fn visible_set_matches_filter_exactly() {
    let mut app = two_drone_app();
    for filter in StatusFilter::ALL {
        app.apply_filter(filter);
        for drone in app.visible_drones() {
            assert!(filter.matches(drone.status));
        }
        let visible = app.visible_drones().len();
        let expected = app
            .fleet
            .drones()
            .iter()
            .filter(|d| filter.matches(d.status))
            .count();
        assert_eq!(visible, expected);
    }
}

#[test]
fn selection_always_member_of_visible_set_or_none() {
    let mut app = two_drone_app();
    for filter in [
        StatusFilter::Offline,
        StatusFilter::Active,
        StatusFilter::Returning,
        StatusFilter::All,
    ] {
        app.apply_filter(filter);
        match app.selected_drone_id.as_deref() {
            Some(id) => assert!(app.visible_drones().iter().any(|d| d.id == id)),
            None => assert!(app.visible_drones().is_empty()),
        }
    }
}

#[test]
fn filter_offline_selects_dr2_then_all_selects_dr1() {
    let mut app = two_drone_app();

    // DR-1 is hidden by the Offline filter, so selection falls to the
    // first (and only) visible drone.
    app.apply_filter(StatusFilter::Offline);
    assert_eq!(app.selected_drone_id.as_deref(), Some("DR-2"));

    // Drop the selection entirely, then widen the filter: first drone
    // in fleet order wins.
    app.set_selection(None);
    app.apply_filter(StatusFilter::All);
    assert_eq!(app.selected_drone_id.as_deref(), Some("DR-1"));
}

#[test]
fn surviving_selection_is_kept_on_filter_change() {
    let mut app = two_drone_app();
    app.set_selection(Some("DR-2".to_string()));
    app.apply_filter(StatusFilter::All);
    assert_eq!(app.selected_drone_id.as_deref(), Some("DR-2"));
}

#[test]
fn empty_filtered_set_clears_selection() {
    let mut app = two_drone_app();
    app.apply_filter(StatusFilter::Returning);
    assert_eq!(app.selected_drone_id, None);
    assert!(app.selected_drone().is_none());
}

#[test]
fn empty_fleet_has_no_selection() {
    let app = App::new(Fleet::new(Vec::new()).unwrap());
    assert_eq!(app.selected_drone_id, None);
}

#[test]
fn move_selection_walks_visible_set_in_order_and_clamps() {
    let fleet = Fleet::new(vec![
        drone("DR-1", DroneStatus::Active, 80.0),
        drone("DR-2", DroneStatus::Offline, 50.0),
        drone("DR-3", DroneStatus::Active, 60.0),
    ])
    .unwrap();
    let mut app = App::new(fleet);

    app.apply_filter(StatusFilter::Active);
    assert_eq!(app.selected_drone_id.as_deref(), Some("DR-1"));

    // DR-2 is filtered out: next visible drone is DR-3.
    app.move_selection(1);
    assert_eq!(app.selected_drone_id.as_deref(), Some("DR-3"));

    app.move_selection(1);
    assert_eq!(app.selected_drone_id.as_deref(), Some("DR-3"));

    app.move_selection(-1);
    assert_eq!(app.selected_drone_id.as_deref(), Some("DR-1"));
    app.move_selection(-1);
    assert_eq!(app.selected_drone_id.as_deref(), Some("DR-1"));
}

#[test]
fn cycle_filter_wraps_around() {
    let mut app = two_drone_app();
    for _ in 0..StatusFilter::ALL.len() {
        app.cycle_filter(true);
    }
    assert_eq!(app.filter, StatusFilter::All);
    app.cycle_filter(false);
    assert_eq!(app.filter, StatusFilter::Offline);
}

#[test]
fn changing_selection_discards_series() {
    let mut app = two_drone_app();
    app.telemetry_tick();
    assert!(!app.history.battery.is_empty());

    app.set_selection(Some("DR-2".to_string()));
    assert!(app.history.is_empty());
}
