use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::model::{LogEntry, LogFilter, LogKind};

pub fn kind_color(kind: LogKind) -> Color {
    match kind {
        LogKind::Error => Color::Red,
        LogKind::Warning => Color::Yellow,
        LogKind::Success => Color::Green,
        LogKind::Info => Color::Blue,
    }
}

fn filter_bar(active: LogFilter) -> Line<'static> {
    let mut spans = vec![Span::raw("Debug Console ")];
    for f in LogFilter::CYCLE {
        let style = if f == active {
            Style::default().fg(Color::Black).bg(Color::Blue)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" {} ", f.label().to_uppercase()), style));
    }
    Line::from(spans)
}

pub fn console_lines(entries: &[LogEntry]) -> Vec<Line<'static>> {
    entries
        .iter()
        .map(|e| {
            Line::from(vec![
                Span::styled(format!("[{}] ", e.timestamp), Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format!("{:<8}", e.kind.as_str().to_uppercase()),
                    Style::default()
                        .fg(kind_color(e.kind))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(e.message.clone()),
            ])
        })
        .collect()
}

/// Newest entries on top, already filtered.
pub fn draw_console(area: Rect, f: &mut Frame, entries: &[LogEntry], filter: LogFilter) {
    let lines = if entries.is_empty() {
        vec![Line::from(Span::styled(
            "No log entries",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        console_lines(entries)
    };
    let p = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(filter_bar(filter)),
    );
    f.render_widget(p, area);
}
