use ratatui::{
    layout::Rect,
    style::Color,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn key_line(key: &'static str, pad: usize, what: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::raw("  "),
        Span::styled(key, Style::default().fg(Color::Magenta)),
        Span::raw(" ".repeat(pad)),
        Span::raw(what),
    ])
}

pub fn draw_help(area: Rect, f: &mut Frame) {
    let p = Paragraph::new(vec![
        Line::from("Keybinds:"),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("q", Style::default().fg(Color::Magenta)),
            Span::raw(" / "),
            Span::styled("Ctrl-C", Style::default().fg(Color::Magenta)),
            Span::raw("  Quit"),
        ]),
        key_line("r", 11, "Run strategy"),
        key_line("tab", 9, "Next tab (shift-tab: previous)"),
        key_line("1-6", 9, "Jump to tab"),
        key_line("?", 11, "Show this help"),
        Line::from(""),
        Line::from("Debug console:"),
        key_line("f", 11, "Cycle filter (all/info/success/warning/error)"),
        key_line("x", 11, "Clear console"),
        Line::from(""),
        Line::from("Notifications:"),
        key_line("n", 11, "Toggle drawer"),
        key_line("j/k", 9, "Select"),
        key_line("enter", 7, "Mark selected read"),
        key_line("m", 11, "Mark all read and close"),
        key_line("c", 11, "Clear all"),
        key_line("esc", 9, "Close drawer"),
    ])
    .block(Block::default().borders(Borders::ALL).title("Help"));
    f.render_widget(p, area);
}
