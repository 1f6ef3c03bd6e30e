//! TUI layout and widget rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph};

use super::runtime::{App, Focus};
use super::style;

/// Renders the full TUI frame.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // header
            Constraint::Length(3),  // battery gauge
            Constraint::Min(8),     // zones + devices
            Constraint::Length(11), // consumption + report
            Constraint::Length(1),  // footer
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_battery(frame, app, chunks[1]);

    let lists = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[2]);
    render_zones(frame, app, lists[0]);
    render_devices(frame, app, lists[1]);

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[3]);
    render_consumption(frame, app, panels[0]);
    render_report(frame, app, panels[1]);

    render_footer(frame, app, chunks[4]);

    if app.is_modal_open() {
        render_modal(frame, app);
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let h = app.household();
    let header = Line::from(vec![
        Span::styled(
            " HOME-GRID ",
            Style::default()
                .fg(style::HEADER_FG)
                .bg(style::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            " │ {} zones │ {} W │ {}",
            h.zones().len(),
            h.total_consumption_w(),
            if h.is_decrease_pending() {
                "DECISION PENDING"
            } else {
                "idle"
            },
        )),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

fn render_battery(frame: &mut Frame, app: &App, area: Rect) {
    let h = app.household();
    let level = h.battery_level();
    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(format!(" Battery │ zones allowed: {} ", h.allowed_zone_count()))
                .borders(Borders::ALL),
        )
        .gauge_style(Style::default().fg(style::battery_color(level)))
        .percent(u16::from(level))
        .label(format!("{level}%"));
    frame.render_widget(gauge, area);
}

fn focus_block(title: &str, focused: bool) -> Block<'_> {
    let border = if focused {
        Style::default().fg(style::SELECTED)
    } else {
        Style::default()
    };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border)
}

/// Zone list; zones beyond the admitted prefix are dimmed.
fn render_zones(frame: &mut Frame, app: &App, area: Rect) {
    let h = app.household();
    let items: Vec<ListItem> = h
        .zones()
        .iter()
        .enumerate()
        .map(|(i, z)| {
            let text = format!(
                "{} {} ({}/{} on, {} W)",
                z.icon,
                z.name,
                z.active_count(),
                z.devices.len(),
                z.active_w()
            );
            let style = if !h.is_zone_admitted(i) {
                Style::default().fg(style::DIMMED)
            } else if i == app.zone_idx {
                Style::default()
                    .fg(style::SELECTED)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(text).style(style)
        })
        .collect();

    let list = List::new(items).block(focus_block(" Zones ", app.focus == Focus::Zones));
    let mut state = ListState::default().with_selected(Some(app.zone_idx));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_devices(frame: &mut Frame, app: &App, area: Rect) {
    let (title, items): (String, Vec<ListItem>) = match app.selected_zone() {
        Some(zone) => (
            format!(" {} devices ", zone.name),
            zone.devices
                .iter()
                .enumerate()
                .map(|(i, d)| {
                    let mut style = if d.on {
                        Style::default().fg(style::DEVICE_ON)
                    } else {
                        Style::default()
                    };
                    if app.focus == Focus::Devices && i == app.device_idx {
                        style = style.add_modifier(Modifier::REVERSED);
                    }
                    ListItem::new(format!(
                        "{} {:<16} {:>5} W  [{}]",
                        d.kind.icon(),
                        d.name,
                        d.consumption_w,
                        if d.on { "on" } else { "off" }
                    ))
                    .style(style)
                })
                .collect(),
        ),
        None => (String::from(" Devices "), Vec::new()),
    };

    let list = List::new(items).block(focus_block(&title, app.focus == Focus::Devices));
    let mut state =
        ListState::default().with_selected(app.selected_device().map(|_| app.device_idx));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_consumption(frame: &mut Frame, app: &App, area: Rect) {
    let h = app.household();
    let mut lines: Vec<Line> = h
        .zone_consumption()
        .iter()
        .map(|zc| Line::from(format!("  {} {:<12} {:>6} W", zc.icon, zc.name, zc.watts)))
        .collect();
    if lines.is_empty() {
        lines.push(Line::from("  nothing is on"));
    }
    lines.push(Line::from(Span::styled(
        format!("  total          {:>6} W", h.total_consumption_w()),
        Style::default().add_modifier(Modifier::BOLD),
    )));

    let paragraph = Paragraph::new(lines)
        .block(Block::default().title(" Consumption ").borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn render_report(frame: &mut Frame, app: &App, area: Rect) {
    let r = app.household().report();
    let lines = vec![
        Line::from(format!(
            "  daily {:.2} kWh │ monthly {:.1} kWh │ annual {:.0} kWh",
            r.daily_kwh, r.monthly_kwh, r.annual_kwh
        )),
        Line::from(format!(
            "  cost  {:.2} / month │ {:.2} / year",
            r.monthly_cost, r.annual_cost
        )),
        Line::from(format!("  solar {:.0} W", r.solar_production_w)),
        Line::from(format!(
            "  panels {} ({} W installed)",
            r.panel_count, r.installed_capacity_w
        )),
        Line::from(format!(
            "  autonomy {} now │ {} full",
            r.autonomy, r.full_autonomy
        )),
    ];
    let paragraph =
        Paragraph::new(lines).block(Block::default().title(" Estimates ").borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let keys = if app.is_modal_open() {
        "↑/↓:Choose  Enter:Turn off  Esc:Cancel  +:Battery up  q:Quit"
    } else {
        "+/-:Battery  ↑/↓:Move  Tab:Switch list  Enter/Space:Toggle  q:Quit"
    };
    let footer = Paragraph::new(Line::from(vec![
        Span::styled(format!(" {keys} "), Style::default().fg(style::FOOTER_FG)),
        Span::raw(format!("│ {}", app.status)),
    ]));
    frame.render_widget(footer, area);
}

/// Deficit modal listing the devices that can be shed.
///
/// The choice list is stateful so the highlighted entry stays visible when
/// there are more active devices than rows.
fn render_modal(frame: &mut Frame, app: &App) {
    let Some(choices) = app.choices() else {
        return;
    };
    let height = u16::try_from(choices.len()).unwrap_or(u16::MAX).saturating_add(4);
    let area = centered_rect(60, height, frame.area());

    let block = Block::default()
        .title(" Energy deficit ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(style::MODAL_BORDER));
    let inner = block.inner(area);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(inner);

    let items: Vec<ListItem> = choices
        .iter()
        .map(|c| ListItem::new(format!("  {c}")))
        .collect();
    let list = List::new(items).highlight_style(
        Style::default()
            .fg(style::SELECTED)
            .add_modifier(Modifier::REVERSED),
    );
    let mut state = ListState::default().with_selected(Some(app.choice_idx));

    frame.render_widget(Clear, area);
    frame.render_widget(block, area);
    frame.render_widget(
        Paragraph::new(" Turn off a device to lower the battery:"),
        rows[0],
    );
    frame.render_stateful_widget(list, rows[1], &mut state);
}

/// Centers a box of `percent_x` width and `height` rows inside `area`.
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let height = height.min(area.height);
    let width = u32::from(area.width) * u32::from(percent_x.min(100)) / 100;
    let width = u16::try_from(width).unwrap_or(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
