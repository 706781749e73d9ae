//! Emergency modal flow: preconditions, confirm, cancel, backdrop.

use dronedeck::app::{App, StatusLevel};
use dronedeck::fleet::Fleet;
use dronedeck::modules::modal::{EmergencyAction, ModalState};
use dronedeck::ui;
use dronedeck::ui::layout::rect_contains;
use ratatui::layout::Rect;

fn app() -> App {
    App::new(Fleet::builtin())
}

#[test]
fn trigger_without_selection_reports_error_and_stays_hidden() {
    let mut app = app();
    app.set_selection(None);

    app.trigger_emergency(EmergencyAction::EmergencyLand);
    assert!(!app.modal.is_shown());
    let (_, level) = app.status_text().expect("blocking notice expected");
    assert_eq!(level, StatusLevel::Error);
    assert!(app.command_log.is_empty());
}

#[test]
fn trigger_with_selection_shows_modal_for_that_drone() {
    let mut app = app();
    app.trigger_emergency(EmergencyAction::ReturnHome);
    match app.modal.state() {
        ModalState::Shown { action, target_id } => {
            assert_eq!(*action, EmergencyAction::ReturnHome);
            assert_eq!(target_id, "DR-1");
        }
        ModalState::Hidden => panic!("modal should be shown"),
    }
    assert_eq!(app.modal.title().unwrap(), "Confirm: Return Home");
    assert_eq!(
        app.modal.message().unwrap(),
        "Initiate \"Return Home\" for drone DR-1?"
    );
}

#[test]
fn confirm_records_action_and_closes() {
    let mut app = app();
    app.trigger_emergency(EmergencyAction::EmergencyLand);
    app.confirm_modal();

    assert!(!app.modal.is_shown());
    assert_eq!(app.command_log.len(), 1);
    assert_eq!(app.command_log[0].action, EmergencyAction::EmergencyLand);
    assert_eq!(app.command_log[0].target_id, "DR-1");
}

#[test]
fn cancel_closes_without_recording() {
    let mut app = app();
    app.trigger_emergency(EmergencyAction::ResumeMission);
    app.cancel_modal();

    assert!(!app.modal.is_shown());
    assert!(app.command_log.is_empty());
}

#[test]
fn backdrop_click_geometry_closes_but_body_click_does_not() {
    let size = Rect {
        x: 0,
        y: 0,
        width: 100,
        height: 30,
    };
    let modal = ui::modal_rect(size);

    // A corner cell is always backdrop; the modal center is body.
    assert!(!rect_contains(modal, 0, 0));
    let center = (modal.x + modal.width / 2, modal.y + modal.height / 2);
    assert!(rect_contains(modal, center.0, center.1));

    // Backdrop click path: Shown -> Hidden, nothing recorded.
    let mut app = app();
    app.trigger_emergency(EmergencyAction::ReturnHome);
    assert!(app.modal.is_shown());
    if !rect_contains(modal, 0, 0) {
        app.cancel_modal();
    }
    assert!(!app.modal.is_shown());
    assert!(app.command_log.is_empty());
}

#[test]
fn retrigger_while_shown_overwrites_pending_pair() {
    let mut app = app();
    app.trigger_emergency(EmergencyAction::ReturnHome);
    app.set_selection(Some("DR-2".to_string()));
    app.trigger_emergency(EmergencyAction::EmergencyLand);

    app.confirm_modal();
    assert_eq!(app.command_log.len(), 1);
    assert_eq!(app.command_log[0].action, EmergencyAction::EmergencyLand);
    assert_eq!(app.command_log[0].target_id, "DR-2");
}

#[test]
fn dashboard_stays_usable_after_precondition_failure() {
    let mut app = app();
    app.set_selection(None);
    app.trigger_emergency(EmergencyAction::ReturnHome);
    assert!(!app.modal.is_shown());

    // Selecting a drone afterwards works normally.
    app.set_selection(Some("DR-2".to_string()));
    app.trigger_emergency(EmergencyAction::ReturnHome);
    assert!(app.modal.is_shown());
}
