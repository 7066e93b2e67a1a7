use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Gauge, Row, Sparkline, Table},
    Frame,
};

use super::state::UiState;
use crate::catalog::{Accent, AgentStatus, ACTIVE_AGENTS, STAT_CARDS};

pub fn accent_color(accent: Accent) -> Color {
    match accent {
        Accent::Blue => Color::Blue,
        Accent::Amber => Color::Yellow,
        Accent::Emerald => Color::Green,
        Accent::Indigo => Color::Magenta,
    }
}

/// Four stat cards side by side, each a gauge with the value in its title.
pub fn draw_stat_cards(area: Rect, f: &mut Frame, busy: bool) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4].as_ref())
        .split(area);

    for (card, col) in STAT_CARDS.iter().zip(cols.iter()) {
        let color = accent_color(card.accent);
        let title = Line::from(vec![
            Span::styled(card.label, Style::default().fg(Color::Gray)),
            Span::raw(" "),
            Span::styled(
                card.value,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ]);
        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title(title))
            .gauge_style(Style::default().fg(color))
            .percent(card.gauge_percent(busy))
            .label(card.detail);
        f.render_widget(gauge, *col);
    }
}

/// Simulated activity waveform; lit up while a run is in flight.
pub fn draw_waveform(area: Rect, f: &mut Frame, state: &UiState) {
    let (color, title) = if state.busy {
        (Color::Blue, "Neural Activity (running)")
    } else {
        (Color::DarkGray, "Neural Activity")
    };
    let spark = Sparkline::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .data(&state.waveform)
        .max(100)
        .style(Style::default().fg(color));
    f.render_widget(spark, area);
}

fn status_color(status: AgentStatus) -> Color {
    match status {
        AgentStatus::Optimal => Color::Green,
        AgentStatus::Stable => Color::Blue,
        AgentStatus::Maintenance => Color::Yellow,
    }
}

pub fn draw_agents(area: Rect, f: &mut Frame) {
    let header = Row::new(vec!["Agent", "Type", "Status", "Uptime", "Load"])
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));
    let rows = ACTIVE_AGENTS.iter().map(|a| {
        Row::new(vec![
            Cell::from(a.name),
            Cell::from(a.role),
            Cell::from(Span::styled(
                format!("● {}", a.status.as_str()),
                Style::default().fg(status_color(a.status)),
            )),
            Cell::from(a.uptime),
            Cell::from(format!("{:>3}%", a.load)),
        ])
    });
    let table = Table::new(
        rows,
        [
            Constraint::Length(15),
            Constraint::Length(13),
            Constraint::Length(14),
            Constraint::Length(7),
            Constraint::Length(5),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title("Active Agents"));
    f.render_widget(table, area);
}
