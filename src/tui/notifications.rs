use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::model::{NotificationEntry, NotificationKind};

fn kind_color(kind: NotificationKind) -> Color {
    match kind {
        NotificationKind::Success => Color::Green,
        NotificationKind::Warning => Color::Yellow,
        NotificationKind::Info => Color::Blue,
    }
}

/// Anchor the drawer to the top-right corner of `area`.
pub fn drawer_rect(area: Rect) -> Rect {
    let width = area.width.min(48);
    let height = area.height.min(20);
    Rect {
        x: area.x + area.width - width,
        y: area.y,
        width,
        height,
    }
}

pub fn draw_drawer(
    area: Rect,
    f: &mut Frame,
    notifications: &[NotificationEntry],
    selected: usize,
    unread: usize,
) {
    let rect = drawer_rect(area);
    f.render_widget(Clear, rect);

    let mut lines: Vec<Line> = Vec::new();
    if notifications.is_empty() {
        lines.push(Line::from(Span::styled(
            "No new notifications",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for (i, n) in notifications.iter().enumerate() {
        let marker = if i == selected { "›" } else { " " };
        let mut title_style = Style::default().fg(kind_color(n.kind));
        if !n.read {
            title_style = title_style.add_modifier(Modifier::BOLD);
        }
        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(Color::Cyan)),
            Span::raw(if n.read { "  " } else { "● " }),
            Span::styled(n.title.clone(), title_style),
            Span::styled(format!("  {}", n.created_at), Style::default().fg(Color::DarkGray)),
        ]));
        lines.push(Line::from(vec![
            Span::raw("    "),
            Span::styled(n.message.clone(), Style::default().fg(Color::Gray)),
        ]));
    }

    let title = Line::from(vec![
        Span::raw("Notifications "),
        Span::styled(format!("({unread} unread)"), Style::default().fg(Color::Yellow)),
    ]);
    let hint = Line::from(Span::styled(
        " enter read · m read all · c clear · esc close ",
        Style::default().fg(Color::DarkGray),
    ));
    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .title_bottom(hint),
        );
    f.render_widget(p, rect);
}
