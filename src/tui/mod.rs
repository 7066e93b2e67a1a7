mod charts;
mod console;
mod help;
mod notifications;
mod panels;
mod state;

use crate::catalog::Tab;
use crate::cli::{build_store, Cli};
use crate::model::StoreChange;
use crate::orchestrator::{self, RunController, UiCommand};
use crate::store::LabStore;
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Tabs},
    Terminal,
};
use state::{Action, UiState};
use std::{io, time::Duration, time::Instant};
use tokio::sync::mpsc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};

pub async fn run(args: Cli) -> Result<()> {
    let store = build_store(&args);
    let ctrl = RunController::new(store.clone());
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<UiCommand>();
    if args.run_on_launch {
        let _ = cmd_tx.send(UiCommand::Start);
    }

    // TUI runs in a dedicated thread to keep all blocking I/O out of the Tokio runtime.
    let changes = store.subscribe();
    let ui_ctrl = ctrl.clone();
    let ui_handle = std::thread::spawn(move || run_threaded(store, ui_ctrl, changes, cmd_tx));

    orchestrator::run_command_loop(ctrl, cmd_rx).await;

    let join_res = tokio::task::spawn_blocking(move || ui_handle.join()).await;
    if let Ok(joined) = join_res {
        match joined {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(e),
            Err(_) => return Err(anyhow::anyhow!("TUI thread panicked")),
        }
    }

    Ok(())
}

/// Decode a key press into an [`Action`].
fn key_action(k: KeyEvent, drawer_open: bool) -> Option<Action> {
    let action = match (k.modifiers, k.code) {
        (_, KeyCode::Char('q')) | (KeyModifiers::CONTROL, KeyCode::Char('c')) => Action::Quit,
        (_, KeyCode::Char('r')) => Action::RequestRun,
        (_, KeyCode::Tab) => Action::NextTab,
        (_, KeyCode::BackTab) => Action::PrevTab,
        (_, KeyCode::Char('?')) => Action::Help,
        (_, KeyCode::Char(c)) if c.is_ascii_digit() => Action::JumpTab(Tab::from_digit(c)?),
        (_, KeyCode::Char('f')) => Action::CycleFilter,
        (_, KeyCode::Char('x')) => Action::ClearLogs,
        (_, KeyCode::Char('n')) => Action::ToggleDrawer,
        (_, KeyCode::Esc) if drawer_open => Action::CloseDrawer,
        (_, KeyCode::Down) | (_, KeyCode::Char('j')) => Action::SelectNext,
        (_, KeyCode::Up) | (_, KeyCode::Char('k')) => Action::SelectPrev,
        (_, KeyCode::Enter) => Action::MarkSelectedRead,
        (_, KeyCode::Char('m')) => Action::MarkAllRead,
        (_, KeyCode::Char('c')) => Action::ClearNotifications,
        _ => return None,
    };
    Some(action)
}

/// Run the TUI loop on a dedicated thread.
fn run_threaded(
    store: LabStore,
    ctrl: RunController,
    mut changes: UnboundedReceiver<StoreChange>,
    cmd_tx: UnboundedSender<UiCommand>,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).ok();

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    // UiState is owned by the UI thread only; the store is the shared part.
    let mut state = UiState::default();
    let mut rng = rand::thread_rng();

    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();
    let mut dirty = true;

    let res = loop {
        while let Ok(change) = changes.try_recv() {
            debug!(?change, "store changed");
            dirty = true;
        }
        if state.observe_busy(ctrl.is_busy(), &mut rng) {
            dirty = true;
        }
        state.drawer_selected = state
            .drawer_selected
            .min(store.read(|log| log.notification_len()).saturating_sub(1));

        if dirty || last_tick.elapsed() >= tick_rate {
            terminal.draw(|f| draw(f.area(), f, &state, &store)).ok();
            last_tick = Instant::now();
            dirty = false;
        }

        // Poll input with a short timeout to avoid blocking the render loop.
        if event::poll(Duration::from_millis(10)).unwrap_or(false) {
            if let Ok(Event::Key(k)) = event::read() {
                if k.kind != KeyEventKind::Press {
                    continue;
                }
                let Some(action) = key_action(k, state.drawer_open) else {
                    continue;
                };
                dirty = true;
                match state.apply(action, &store) {
                    Some(UiCommand::Quit) => {
                        info!("quit from dashboard");
                        let _ = cmd_tx.send(UiCommand::Quit);
                        break Ok(());
                    }
                    Some(cmd) => {
                        let _ = cmd_tx.send(cmd);
                    }
                    None => {}
                }
            }
        }
    };

    disable_raw_mode().ok();
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen).ok();
    res
}

fn header_title(busy: bool, unread: usize) -> Line<'static> {
    let status = if busy {
        Span::styled(
            " ● RUNNING ",
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(" ○ IDLE ", Style::default().fg(Color::DarkGray))
    };
    let bell = if unread > 0 {
        Span::styled(
            format!(" notifications: {unread} "),
            Style::default().fg(Color::Black).bg(Color::Red),
        )
    } else {
        Span::styled(" notifications: 0 ", Style::default().fg(Color::DarkGray))
    };
    Line::from(vec![
        Span::styled(
            "AI STRATEGY LAB",
            Style::default().add_modifier(Modifier::BOLD | Modifier::ITALIC),
        ),
        status,
        bell,
    ])
}

fn draw(area: Rect, f: &mut ratatui::Frame, state: &UiState, store: &LabStore) {
    let show_console = state.tab != Tab::Help;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(if show_console { 12 } else { 0 }),
            ]
            .as_ref(),
        )
        .split(area);

    let unread = store.unread_count();
    let tabs = Tabs::new(Tab::ALL.iter().map(|t| Line::from(t.title())).collect::<Vec<_>>())
        .select(state.tab.index())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(header_title(state.busy, unread))
                .title_bottom(Line::from(state.info.clone()).right_aligned()),
        )
        .highlight_style(Style::default().fg(Color::Yellow));
    f.render_widget(tabs, chunks[0]);

    match state.tab {
        Tab::Dashboard => draw_dashboard(chunks[1], f, state),
        Tab::Help => help::draw_help(chunks[1], f),
        other => panels::draw_panel(other, chunks[1], f, state.busy),
    }

    if show_console {
        let entries = store.filtered_logs(state.log_filter);
        console::draw_console(chunks[2], f, &entries, state.log_filter);
    }

    if state.drawer_open {
        let notifications = store.notifications();
        notifications::draw_drawer(
            chunks[1],
            f,
            &notifications,
            state.drawer_selected,
            unread,
        );
    }
}

fn draw_dashboard(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3), // Stat cards
                Constraint::Min(0),    // Waveform + agents
            ]
            .as_ref(),
        )
        .split(area);

    charts::draw_stat_cards(main[0], f, state.busy);

    let row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)].as_ref())
        .split(main[1]);
    charts::draw_waveform(row[0], f, state);
    charts::draw_agents(row[1], f);
}
