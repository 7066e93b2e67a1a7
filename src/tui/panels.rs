//! Static content for the non-dashboard tabs.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::catalog::Tab;

const STRATEGY_SOURCE: &str = r#"// AI Strategy v2.4.1
import { Agent } from "@lab/core";

export default async function run(ctx) {
  const res = await Agent.think(ctx.input);
  return res.execute();
}"#;

fn heading(title: &'static str, subtitle: &'static str) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            title.to_uppercase(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtitle, Style::default().fg(Color::Gray))),
    ]
}

fn card(title: impl Into<Line<'static>>, lines: Vec<Line<'static>>) -> Paragraph<'static> {
    Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title))
}

fn field(label: &'static str, value: &'static str) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(label, Style::default().fg(Color::Gray))),
        Line::from(format!("  {value}")),
    ]
}

fn split_heading(area: Rect) -> (Rect, Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)].as_ref())
        .split(area);
    (rows[0], rows[1])
}

pub fn draw_panel(tab: Tab, area: Rect, f: &mut Frame, busy: bool) {
    match tab {
        Tab::Builder => draw_builder(area, f),
        Tab::Editor => draw_editor(area, f, busy),
        Tab::Backtesting => draw_backtesting(area, f),
        Tab::Analytics => draw_analytics(area, f),
        Tab::Deployment => draw_deployment(area, f),
        Tab::Dashboard | Tab::Help => {}
    }
}

fn draw_builder(area: Rect, f: &mut Frame) {
    let (head, body) = split_heading(area);
    f.render_widget(
        Paragraph::new(heading(
            "Agent Builder",
            "Configure core parameters and cognitive architecture.",
        )),
        head,
    );
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(body);

    let mut config = field("PRIMARY MODEL", "GPT-4o (Omni)");
    config.push(Line::from(Span::styled(
        "  also available: GPT-4 Turbo, Claude 3.5 Sonnet",
        Style::default().fg(Color::DarkGray),
    )));
    f.render_widget(card("Configuration Blocks", config), cols[0]);

    let mut identity = field("AGENT NAME", "e.g. Sentinel-Alpha");
    identity.extend(field("BEHAVIOR", "Define behavior..."));
    f.render_widget(card("Agent Identity", identity), cols[1]);
}

fn draw_editor(area: Rect, f: &mut Frame, busy: bool) {
    let (head, body) = split_heading(area);
    f.render_widget(
        Paragraph::new(heading(
            "Strategy Editor",
            "Define logic flow and decision-making trees.",
        )),
        head,
    );
    let run_hint = if busy {
        Span::styled(" running… ", Style::default().fg(Color::Yellow))
    } else {
        Span::styled(" r: Run Test ", Style::default().fg(Color::Green))
    };
    let code = STRATEGY_SOURCE
        .lines()
        .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(Color::Gray))))
        .collect();
    f.render_widget(
        card(Line::from(vec![Span::raw("strategy.js"), run_hint]), code),
        body,
    );
}

fn draw_backtesting(area: Rect, f: &mut Frame) {
    let (head, body) = split_heading(area);
    f.render_widget(
        Paragraph::new(heading("Backtesting", "Historical test sessions.")),
        head,
    );
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3].as_ref())
        .split(body);
    for (i, col) in cols.iter().enumerate() {
        let lines = vec![
            Line::from(Span::styled("SUCCESS RATE", Style::default().fg(Color::Gray))),
            Line::from(vec![
                Span::styled(
                    "98.2%",
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled("PASSED", Style::default().fg(Color::Green)),
            ]),
        ];
        f.render_widget(card(format!("Test Session #{}04", i + 1), lines), *col);
    }
}

fn draw_analytics(area: Rect, f: &mut Frame) {
    let (head, body) = split_heading(area);
    f.render_widget(
        Paragraph::new(heading("Analytics", "Traffic across the edge network.")),
        head,
    );
    let lines = vec![Line::from(Span::styled(
        "Analytics graph rendering...",
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    ))];
    f.render_widget(card("Traffic Metrics", lines), body);
}

fn draw_deployment(area: Rect, f: &mut Frame) {
    let (head, body) = split_heading(area);
    f.render_widget(
        Paragraph::new(heading("Deployment", "Production rollout status.")),
        head,
    );
    let lines = vec![Line::from(vec![
        Span::styled("● ", Style::default().fg(Color::Green)),
        Span::styled("US-EAST-01", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled("ACTIVE", Style::default().fg(Color::Blue)),
    ])];
    f.render_widget(card("Production Nodes", lines), body);
}
