use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Debug, Clone, Copy)]
pub struct UiAreas {
    pub size: Rect,
    pub header: Rect,
    pub main: Rect,
    pub status_line: Rect,
}

pub fn areas(size: Rect) -> UiAreas {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(size);

    UiAreas {
        size,
        header: vertical[0],
        main: vertical[1],
        status_line: vertical[2],
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OverviewAreas {
    pub map: Rect,
    pub panel: Rect,
}

pub fn overview_areas(main: Rect) -> OverviewAreas {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(main);

    OverviewAreas {
        map: chunks[0],
        panel: chunks[1],
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TelemetryAreas {
    pub battery: Rect,
    pub speed: Rect,
    pub signal: Rect,
    pub command_log: Rect,
}

pub fn telemetry_areas(main: Rect) -> TelemetryAreas {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(68), Constraint::Percentage(32)])
        .split(main);

    let charts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(chunks[0]);

    TelemetryAreas {
        battery: charts[0],
        speed: charts[1],
        signal: charts[2],
        command_log: chunks[1],
    }
}

pub fn rect_contains(rect: Rect, col: u16, row: u16) -> bool {
    col >= rect.x
        && col < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_contains_is_exclusive_of_edges() {
        let rect = Rect {
            x: 2,
            y: 3,
            width: 10,
            height: 4,
        };
        assert!(rect_contains(rect, 2, 3));
        assert!(rect_contains(rect, 11, 6));
        assert!(!rect_contains(rect, 12, 3));
        assert!(!rect_contains(rect, 2, 7));
    }

    #[test]
    fn areas_partition_the_screen() {
        let size = Rect {
            x: 0,
            y: 0,
            width: 80,
            height: 24,
        };
        let areas = areas(size);
        assert_eq!(areas.header.height, 3);
        assert_eq!(areas.status_line.height, 1);
        assert_eq!(
            areas.header.height + areas.main.height + areas.status_line.height,
            24
        );
    }
}
