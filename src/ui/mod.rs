use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Gauge, List, ListItem, Paragraph, Sparkline, Wrap};
use ratatui::Frame;

pub mod layout;
pub mod map;
pub mod widgets;

use crate::app::{App, StatusLevel, Tab};
use crate::fleet::{Drone, DroneStatus};
use crate::modules::modal::Severity;
use map::{status_color, MarkerLayer};

pub fn draw(f: &mut Frame, app: &mut App) {
    let areas = layout::areas(f.size());

    draw_header(f, areas.header, app);
    match app.current_tab {
        Tab::Overview => draw_overview(f, areas.main, app),
        Tab::Telemetry => draw_telemetry(f, areas.main, app),
    }
    draw_status_line(f, areas.status_line, app);

    if app.modal.is_shown() {
        draw_modal(f, areas.size, app);
    }
    if app.help_open {
        draw_help_popup(f, areas.size);
    }
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let mut spans = vec![
        Span::styled(
            "dronedeck",
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
    ];
    for tab in Tab::ALL {
        let style = if tab == app.current_tab {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(
            format!("[{}] {}  ", tab.shortcut(), tab.title()),
            style,
        ));
    }
    spans.push(Span::styled("Filter", Style::default().fg(Color::DarkGray)));
    spans.push(Span::raw(format!(" {}", app.filter.title())));
    if app.paused {
        spans.push(Span::styled(
            "  PAUSED",
            Style::default().fg(Color::Yellow),
        ));
    }

    let left = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Left);

    let right_line = Line::from(vec![
        Span::styled("Active ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{}  ", app.fleet.count_with(DroneStatus::Active)),
            Style::default().fg(Color::Green),
        ),
        Span::styled("Returning ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{}  ", app.fleet.count_with(DroneStatus::Returning)),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled("Offline ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{}  ", app.fleet.count_with(DroneStatus::Offline))),
        Span::styled("Fleet ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{}", app.fleet.len())),
    ]);
    let right = Paragraph::new(right_line)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Left);

    f.render_widget(left, chunks[0]);
    f.render_widget(right, chunks[1]);
}

fn draw_overview(f: &mut Frame, area: Rect, app: &mut App) {
    let overview = layout::overview_areas(area);

    let visible_count = app.visible_drones().len();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Map — {} ({} shown)", app.filter.title(), visible_count));
    let inner = block.inner(overview.map);
    f.render_widget(block, overview.map);

    // Markers are rebuilt from the filtered set on every frame; the
    // hit-map used by mouse selection always matches what is drawn.
    {
        let App {
            fleet,
            map,
            filter,
            selected_drone_id,
            ..
        } = &mut *app;
        let visible: Vec<&Drone> = fleet.filtered(*filter);
        map.rebuild(inner, &visible);
        f.render_widget(
            MarkerLayer {
                markers: map.markers(),
                selected_id: selected_drone_id.as_deref(),
            },
            inner,
        );
    }

    if visible_count == 0 {
        let empty = Paragraph::new("No drones match this filter")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(empty, inner);
    }

    draw_status_panel(f, overview.panel, app);
}

fn draw_status_panel(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().borders(Borders::ALL).title("Drone Status");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner);

    match app.selected_drone() {
        Some(drone) => {
            let title = Line::from(vec![
                Span::styled(
                    drone.id.clone(),
                    Style::default()
                        .fg(Color::LightCyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(
                    drone.status.title(),
                    Style::default().fg(status_color(drone.status)),
                ),
            ]);
            f.render_widget(Paragraph::new(title), chunks[0]);

            let ratio = (drone.battery / 100.0).clamp(0.0, 1.0);
            let gauge = Gauge::default()
                .block(Block::default().borders(Borders::ALL).title("Battery"))
                .gauge_style(Style::default().fg(battery_color(drone.battery)))
                .ratio(ratio)
                .label(format!("{}%", drone.battery.round() as i64));
            f.render_widget(gauge, chunks[1]);

            let trend = widgets::sparkline::sparkline_text(&app.history.battery.values_u64(), 24);
            let lines = vec![
                Line::from(format!("Altitude: {} m", drone.altitude.round() as i64)),
                Line::from(format!("Speed:    {} km/h", drone.speed.round() as i64)),
                Line::from(vec![
                    Span::raw("Signal:   "),
                    Span::styled(
                        drone.status.signal_label(),
                        Style::default().fg(status_color(drone.status)),
                    ),
                ]),
                Line::from(format!("Payload:  {:.1} kg", drone.payload)),
                Line::from(format!("Wind:     {}", drone.wind)),
                Line::from(""),
                Line::from(vec![
                    Span::styled("Trend  ", Style::default().fg(Color::DarkGray)),
                    Span::styled(trend, Style::default().fg(Color::Green)),
                ]),
            ];
            f.render_widget(Paragraph::new(Text::from(lines)), chunks[2]);
        }
        None => {
            // Placeholder record: nothing matches the active filter.
            let title = Line::from(vec![
                Span::styled("--", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw("  "),
                Span::styled("N/A", Style::default().fg(Color::DarkGray)),
            ]);
            f.render_widget(Paragraph::new(title), chunks[0]);

            let gauge = Gauge::default()
                .block(Block::default().borders(Borders::ALL).title("Battery"))
                .gauge_style(Style::default().fg(Color::DarkGray))
                .ratio(0.0)
                .label("0%");
            f.render_widget(gauge, chunks[1]);

            let lines = vec![
                Line::from("Altitude: 0 m"),
                Line::from("Speed:    0 km/h"),
                Line::from("Signal:   Offline"),
                Line::from("Payload:  0.0 kg"),
                Line::from("Wind:     N/A"),
            ];
            f.render_widget(
                Paragraph::new(Text::from(lines)).style(Style::default().fg(Color::DarkGray)),
                chunks[2],
            );
        }
    }
}

fn draw_telemetry(f: &mut Frame, area: Rect, app: &App) {
    let telemetry = layout::telemetry_areas(area);

    draw_chart(
        f,
        telemetry.battery,
        "Battery (%)",
        Color::Green,
        &app.history.battery.values_u64(),
        100,
        app.history.battery.latest().map(|p| p.value),
    );
    draw_chart(
        f,
        telemetry.speed,
        "Speed (km/h)",
        Color::Blue,
        &app.history.speed.values_u64(),
        50,
        app.history.speed.latest().map(|p| p.value),
    );
    draw_chart(
        f,
        telemetry.signal,
        "Signal (%)",
        Color::Yellow,
        &app.history.signal.values_u64(),
        100,
        app.history.signal.latest().map(|p| p.value),
    );

    draw_command_log(f, telemetry.command_log, app);
}

fn draw_chart(
    f: &mut Frame,
    area: Rect,
    label: &str,
    color: Color,
    values: &[u64],
    max: u64,
    latest: Option<f64>,
) {
    let title = match latest {
        Some(value) => format!("{label} — {value:.0}"),
        None => format!("{label} — no data"),
    };
    let spark = Sparkline::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .data(values)
        .max(max)
        .style(Style::default().fg(color));
    f.render_widget(spark, area);
}

fn draw_command_log(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().borders(Borders::ALL).title("Command Log");
    if app.command_log.is_empty() {
        let inner = block.inner(area);
        f.render_widget(block, area);
        let empty = Paragraph::new("No commands dispatched")
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true });
        f.render_widget(empty, inner);
        return;
    }

    let items: Vec<ListItem> = app
        .command_log
        .iter()
        .rev()
        .take(30)
        .map(|record| {
            let color = severity_color(record.action.severity());
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{} ", record.at.format("%H:%M:%S")),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(record.action.title(), Style::default().fg(color)),
                Span::raw(format!(" -> {}", record.target_id)),
            ]))
        })
        .collect();
    f.render_widget(List::new(items).block(block), area);
}

fn draw_status_line(f: &mut Frame, area: Rect, app: &App) {
    let line = match app.status_text() {
        Some((text, level)) => {
            let color = match level {
                StatusLevel::Info => Color::Green,
                StatusLevel::Warn => Color::Yellow,
                StatusLevel::Error => Color::Red,
            };
            Line::from(Span::styled(text.to_string(), Style::default().fg(color)))
        }
        None => Line::from(Span::styled(
            "q quit  ? help  [ / ] filter  j/k select  r/l/m emergency  Space pause",
            Style::default().fg(Color::DarkGray),
        )),
    };
    f.render_widget(Paragraph::new(line), area);
}

/// Rect of the modal dialog body. Everything outside it is backdrop:
/// a click there closes the modal without confirming.
pub fn modal_rect(size: Rect) -> Rect {
    centered_rect(50, 28, size)
}

fn draw_modal(f: &mut Frame, size: Rect, app: &App) {
    let popup_area = modal_rect(size);
    f.render_widget(Clear, popup_area);

    let severity = app.modal.severity().unwrap_or(Severity::Primary);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(app.modal.title().unwrap_or_default())
        .border_style(Style::default().fg(severity_color(severity)));

    let lines = vec![
        Line::from(""),
        Line::from(app.modal.message().unwrap_or_default()),
        Line::from(""),
        Line::from(Span::styled(
            "[Enter] Confirm    [Esc] Cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, popup_area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(64, 64, area);
    f.render_widget(Clear, popup_area);

    let lines = vec![
        Line::from("Navigation"),
        Line::from("  1 / 2      Overview / Telemetry tab"),
        Line::from("  Tab        Cycle tabs"),
        Line::from("  [ / ]      Prev/Next status filter"),
        Line::from("  a          Show all drones"),
        Line::from("  j / k      Move selection"),
        Line::from("  Mouse      Click a marker to select"),
        Line::from(""),
        Line::from("Actions"),
        Line::from("  r          Return Home (confirm)"),
        Line::from("  l          Emergency Land (confirm)"),
        Line::from("  m          Resume Mission (confirm)"),
        Line::from("  y          Copy selected drone id"),
        Line::from("  x          Export command log (CSV)"),
        Line::from("  Space      Pause/Resume simulation"),
        Line::from("  ?          Toggle help"),
        Line::from("  q          Quit"),
    ];

    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().title("Help").borders(Borders::ALL))
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, popup_area);
}

pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Danger => Color::Red,
        Severity::Success => Color::Green,
        Severity::Primary => Color::Blue,
    }
}

fn battery_color(battery: f64) -> Color {
    if battery < 20.0 {
        Color::Red
    } else if battery < 50.0 {
        Color::Yellow
    } else {
        Color::Green
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
