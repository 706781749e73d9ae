//! Dashboard controller: owns selection, filter, tab, modal, and the
//! telemetry tick. Render functions read this state; nothing else
//! mutates the fleet.

use std::time::{Duration, Instant};

use chrono::Utc;

use crate::fleet::series::{TelemetryHistory, DEFAULT_CAPACITY};
use crate::fleet::simulator::TelemetrySimulator;
use crate::fleet::{Drone, Fleet, StatusFilter};
use crate::modules::modal::{ActionModal, CommandRecord, EmergencyAction};
use crate::ui::map::MapView;

pub const DEFAULT_TICK: Duration = Duration::from_millis(2000);

/// Main tabs in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Overview,
    Telemetry,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Overview, Tab::Telemetry];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Telemetry => "Telemetry",
        }
    }

    pub fn shortcut(&self) -> char {
        match self {
            Tab::Overview => '1',
            Tab::Telemetry => '2',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
    pub since: Instant,
}

#[derive(Debug)]
pub struct App {
    pub fleet: Fleet,
    pub simulator: TelemetrySimulator,
    pub history: TelemetryHistory,
    pub selected_drone_id: Option<String>,
    pub filter: StatusFilter,
    pub current_tab: Tab,
    pub map: MapView,
    pub modal: ActionModal,
    pub command_log: Vec<CommandRecord>,
    pub paused: bool,
    pub help_open: bool,
    pub should_quit: bool,
    pub status: Option<StatusMessage>,
    tick_interval: Duration,
    last_telemetry_at: Instant,
}

impl App {
    pub fn new(fleet: Fleet) -> Self {
        Self::with_settings(fleet, DEFAULT_TICK, DEFAULT_CAPACITY)
    }

    pub fn with_settings(fleet: Fleet, tick_interval: Duration, series_capacity: usize) -> Self {
        let selected_drone_id = fleet.drones().first().map(|drone| drone.id.clone());
        Self {
            fleet,
            simulator: TelemetrySimulator::new(),
            history: TelemetryHistory::new(series_capacity),
            selected_drone_id,
            filter: StatusFilter::All,
            current_tab: Tab::Overview,
            map: MapView::new(),
            modal: ActionModal::new(),
            command_log: Vec::new(),
            paused: false,
            help_open: false,
            should_quit: false,
            status: None,
            tick_interval,
            last_telemetry_at: Instant::now(),
        }
    }

    pub fn set_status(&mut self, text: impl Into<String>, level: StatusLevel) {
        self.status = Some(StatusMessage {
            text: text.into(),
            level,
            since: Instant::now(),
        });
    }

    pub fn status_text(&self) -> Option<(&str, StatusLevel)> {
        self.status
            .as_ref()
            .map(|status| (status.text.as_str(), status.level))
    }

    /// Drones visible under the active filter, in fleet list order.
    pub fn visible_drones(&self) -> Vec<&Drone> {
        self.fleet.filtered(self.filter)
    }

    pub fn selected_drone(&self) -> Option<&Drone> {
        self.selected_drone_id
            .as_deref()
            .and_then(|id| self.fleet.get(id))
    }

    /// Apply a status filter and resolve selection against the new
    /// visible set: keep it if still visible, else first visible drone,
    /// else none.
    pub fn apply_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
        self.resolve_selection();
    }

    pub fn cycle_filter(&mut self, forward: bool) {
        let index = StatusFilter::ALL
            .iter()
            .position(|filter| *filter == self.filter)
            .unwrap_or(0);
        let len = StatusFilter::ALL.len();
        let next = if forward {
            (index + 1) % len
        } else {
            (index + len - 1) % len
        };
        self.apply_filter(StatusFilter::ALL[next]);
    }

    fn resolve_selection(&mut self) {
        let still_visible = self
            .selected_drone_id
            .as_deref()
            .map(|id| {
                self.visible_drones()
                    .iter()
                    .any(|drone| drone.id == id)
            })
            .unwrap_or(false);
        if still_visible {
            return;
        }
        let next = self.visible_drones().first().map(|drone| drone.id.clone());
        self.set_selection(next);
    }

    /// Selection is exclusive: at most one drone, always within the
    /// visible set. Changing it discards the previous drone's series.
    pub fn set_selection(&mut self, id: Option<String>) {
        if self.selected_drone_id != id {
            self.history.clear_all();
        }
        self.selected_drone_id = id;
    }

    pub fn select_marker_at(&mut self, col: u16, row: u16) -> bool {
        let Some(id) = self.map.marker_at(col, row).map(str::to_string) else {
            return false;
        };
        self.set_selection(Some(id));
        true
    }

    /// Move selection within the visible set (keyboard navigation).
    pub fn move_selection(&mut self, delta: isize) {
        let visible: Vec<String> = self
            .visible_drones()
            .iter()
            .map(|drone| drone.id.clone())
            .collect();
        if visible.is_empty() {
            return;
        }
        let current = self
            .selected_drone_id
            .as_deref()
            .and_then(|id| visible.iter().position(|v| v == id));
        let next = match current {
            Some(index) => {
                let last = visible.len() as isize - 1;
                (index as isize + delta).clamp(0, last) as usize
            }
            None => 0,
        };
        self.set_selection(Some(visible[next].clone()));
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.current_tab = tab;
    }

    pub fn cycle_tab(&mut self) {
        self.current_tab = match self.current_tab {
            Tab::Overview => Tab::Telemetry,
            Tab::Telemetry => Tab::Overview,
        };
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        if self.paused {
            self.set_status("Paused telemetry simulation", StatusLevel::Warn);
        } else {
            self.set_status("Resumed telemetry simulation", StatusLevel::Info);
        }
    }

    /// Emergency-action trigger. Requires a selection; without one the
    /// modal stays hidden and a blocking notice is shown.
    pub fn trigger_emergency(&mut self, action: EmergencyAction) {
        let Some(id) = self.selected_drone_id.clone() else {
            self.set_status("Select a drone on the map first", StatusLevel::Error);
            return;
        };
        self.modal.open(action, id);
    }

    pub fn confirm_modal(&mut self) {
        if let Some(record) = self.modal.confirm() {
            self.set_status(
                format!("Dispatched \"{}\" to {}", record.action.title(), record.target_id),
                StatusLevel::Info,
            );
            self.command_log.push(record);
        }
    }

    pub fn cancel_modal(&mut self) {
        self.modal.cancel();
    }

    pub fn export_command_log(&mut self) {
        match crate::modules::export::export_command_log(&self.command_log) {
            Ok(path) => self.set_status(
                format!("Exported {} commands to {}", self.command_log.len(), path.display()),
                StatusLevel::Info,
            ),
            Err(err) => self.set_status(format!("Export failed: {err}"), StatusLevel::Error),
        }
    }

    /// Periodic UI tick. The telemetry step runs at its own interval:
    /// mutate every drone, then sample the selected one for the charts.
    pub fn on_tick(&mut self) {
        if let Some(status) = self.status.as_ref() {
            if status.since.elapsed() > Duration::from_secs(3) {
                self.status = None;
            }
        }
        if self.paused {
            return;
        }
        if self.last_telemetry_at.elapsed() >= self.tick_interval {
            self.telemetry_tick();
            self.last_telemetry_at = Instant::now();
        }
    }

    /// One full mutate-then-sample pass; synchronous and O(fleet size).
    pub fn telemetry_tick(&mut self) {
        self.simulator.step(&mut self.fleet);
        let sample = self
            .selected_drone()
            .map(|drone| (drone.status, drone.battery, drone.speed));
        if let Some((status, battery, speed)) = sample {
            let signal = self.simulator.signal_sample();
            self.history.record(status, battery, speed, signal, Utc::now());
        }
    }
}
