//! Map panel: projects drone positions into the terminal grid.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Widget;

use crate::fleet::{Drone, DroneStatus};

/// One on-map marker: drone id, display label, and the cells it covers.
#[derive(Debug, Clone)]
pub struct Marker {
    pub id: String,
    pub label: String,
    pub status: DroneStatus,
    pub x: u16,
    pub y: u16,
}

/// Owns the marker hit-map. Rebuilt from scratch on every render so the
/// markers always mirror the filtered drone set; stale refs cannot
/// survive a filter change.
#[derive(Debug, Default)]
pub struct MapView {
    markers: Vec<Marker>,
    area: Rect,
}

impl MapView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Clear and recreate all markers from the visible drones,
    /// projected into `area` (the map panel's inner rect).
    pub fn rebuild(&mut self, area: Rect, drones: &[&Drone]) {
        self.area = area;
        self.markers.clear();
        if area.width < 4 || area.height < 2 || drones.is_empty() {
            return;
        }

        let mut min_lat = f64::MAX;
        let mut max_lat = f64::MIN;
        let mut min_lng = f64::MAX;
        let mut max_lng = f64::MIN;
        for drone in drones {
            min_lat = min_lat.min(drone.location.lat);
            max_lat = max_lat.max(drone.location.lat);
            min_lng = min_lng.min(drone.location.lng);
            max_lng = max_lng.max(drone.location.lng);
        }
        // Degenerate spans (single drone, or all stacked) still project
        // to the panel center.
        let lat_span = (max_lat - min_lat).max(1e-6);
        let lng_span = (max_lng - min_lng).max(1e-6);

        for drone in drones {
            let label = drone.marker_label().to_string();
            let usable_w = area.width.saturating_sub(label.len() as u16).max(1);
            let usable_h = area.height.saturating_sub(1).max(1);
            let fx = (drone.location.lng - min_lng) / lng_span;
            // Latitude grows north, terminal rows grow down.
            let fy = (max_lat - drone.location.lat) / lat_span;
            let x = area.x + (fx * (usable_w - 1).max(1) as f64).round() as u16;
            let y = area.y + (fy * usable_h.saturating_sub(1).max(1) as f64).round() as u16;
            self.markers.push(Marker {
                id: drone.id.clone(),
                label,
                status: drone.status,
                x: x.min(area.right().saturating_sub(1)),
                y: y.min(area.bottom().saturating_sub(1)),
            });
        }
    }

    /// Hit-test a terminal cell against the current markers. Later
    /// markers win, matching draw order on overlap.
    pub fn marker_at(&self, col: u16, row: u16) -> Option<&str> {
        self.markers
            .iter()
            .rev()
            .find(|marker| {
                row == marker.y
                    && col >= marker.x
                    && col < marker.x.saturating_add(marker.label.len() as u16)
            })
            .map(|marker| marker.id.as_str())
    }
}

pub fn status_color(status: DroneStatus) -> Color {
    match status {
        DroneStatus::Active => Color::Green,
        DroneStatus::Returning => Color::Yellow,
        DroneStatus::Offline => Color::DarkGray,
    }
}

/// Widget pass that paints the markers built by `MapView::rebuild`.
pub struct MarkerLayer<'a> {
    pub markers: &'a [Marker],
    pub selected_id: Option<&'a str>,
}

impl Widget for MarkerLayer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for marker in self.markers {
            if marker.y < area.y || marker.y >= area.bottom() {
                continue;
            }
            if marker.x < area.x || marker.x >= area.right() {
                continue;
            }
            let mut style = Style::default()
                .fg(status_color(marker.status))
                .add_modifier(Modifier::BOLD);
            if self.selected_id == Some(marker.id.as_str()) {
                style = style.add_modifier(Modifier::REVERSED);
            }
            let width = (area.right() - marker.x) as usize;
            buf.set_stringn(marker.x, marker.y, &marker.label, width, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fleet::{Fleet, StatusFilter};

    fn panel() -> Rect {
        Rect {
            x: 2,
            y: 1,
            width: 40,
            height: 12,
        }
    }

    #[test]
    fn rebuild_creates_one_marker_per_visible_drone() {
        let fleet = Fleet::builtin();
        let visible = fleet.filtered(StatusFilter::All);
        let mut map = MapView::new();
        map.rebuild(panel(), &visible);
        assert_eq!(map.markers().len(), fleet.len());
    }

    #[test]
    fn rebuild_discards_previous_markers() {
        let fleet = Fleet::builtin();
        let mut map = MapView::new();
        map.rebuild(panel(), &fleet.filtered(StatusFilter::All));
        map.rebuild(panel(), &fleet.filtered(StatusFilter::Offline));
        assert_eq!(
            map.markers().len(),
            fleet.filtered(StatusFilter::Offline).len()
        );
        assert!(map.markers().iter().all(|m| m.status == DroneStatus::Offline));
    }

    #[test]
    fn markers_stay_inside_the_panel() {
        let fleet = Fleet::builtin();
        let area = panel();
        let mut map = MapView::new();
        map.rebuild(area, &fleet.filtered(StatusFilter::All));
        for marker in map.markers() {
            assert!(marker.x >= area.x && marker.x < area.right());
            assert!(marker.y >= area.y && marker.y < area.bottom());
        }
    }

    #[test]
    fn marker_hit_test_round_trips() {
        let fleet = Fleet::builtin();
        let mut map = MapView::new();
        map.rebuild(panel(), &fleet.filtered(StatusFilter::All));
        let marker = map.markers().last().unwrap().clone();
        assert_eq!(map.marker_at(marker.x, marker.y), Some(marker.id.as_str()));
        assert_eq!(map.marker_at(0, 0), None);
    }

    #[test]
    fn tiny_panel_renders_no_markers() {
        let fleet = Fleet::builtin();
        let mut map = MapView::new();
        map.rebuild(
            Rect {
                x: 0,
                y: 0,
                width: 3,
                height: 1,
            },
            &fleet.filtered(StatusFilter::All),
        );
        assert!(map.markers().is_empty());
    }
}
