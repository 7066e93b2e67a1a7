use crate::catalog::Tab;
use crate::model::LogFilter;
use crate::orchestrator::UiCommand;
use crate::store::LabStore;
use rand::Rng;

/// Number of bars in the dashboard waveform.
pub const WAVEFORM_BARS: usize = 40;

/// User intents decoded from key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    RequestRun,
    NextTab,
    PrevTab,
    JumpTab(Tab),
    Help,
    CycleFilter,
    ClearLogs,
    ToggleDrawer,
    CloseDrawer,
    SelectNext,
    SelectPrev,
    MarkSelectedRead,
    MarkAllRead,
    ClearNotifications,
}

pub struct UiState {
    pub tab: Tab,
    pub log_filter: LogFilter,
    pub drawer_open: bool,
    pub drawer_selected: usize,
    /// Bar heights in percent.
    pub waveform: Vec<u64>,
    /// Busy flag as last observed by the render loop.
    pub busy: bool,
    pub info: String,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            tab: Tab::Dashboard,
            log_filter: LogFilter::All,
            drawer_open: false,
            drawer_selected: 0,
            waveform: random_waveform(&mut rand::thread_rng()),
            busy: false,
            info: String::new(),
        }
    }
}

/// Heights in [10, 90).
pub fn random_waveform(rng: &mut impl Rng) -> Vec<u64> {
    (0..WAVEFORM_BARS).map(|_| rng.gen_range(10..90)).collect()
}

impl UiState {
    /// Track the controller's busy flag; the waveform is reshuffled whenever
    /// it flips. Returns whether anything changed.
    pub fn observe_busy(&mut self, busy: bool, rng: &mut impl Rng) -> bool {
        if self.busy == busy {
            return false;
        }
        self.busy = busy;
        self.waveform = random_waveform(rng);
        self.info = if busy {
            "Strategy run in progress…".into()
        } else {
            "Ready".into()
        };
        true
    }

    /// Apply an action. Returns a command for the controller, if any.
    pub fn apply(&mut self, action: Action, store: &LabStore) -> Option<UiCommand> {
        match action {
            Action::Quit => return Some(UiCommand::Quit),
            Action::RequestRun => {
                if self.busy {
                    self.info = "A run is already in progress".into();
                    return None;
                }
                self.info = "Run requested…".into();
                return Some(UiCommand::Start);
            }
            Action::NextTab => self.tab = self.tab.next(),
            Action::PrevTab => self.tab = self.tab.prev(),
            Action::JumpTab(tab) => self.tab = tab,
            Action::Help => self.tab = Tab::Help,
            Action::CycleFilter => {
                self.log_filter = self.log_filter.next();
                self.info = format!("Console filter: {}", self.log_filter.label());
            }
            Action::ClearLogs => {
                store.clear_logs();
                self.info = "Console cleared".into();
            }
            Action::ToggleDrawer => {
                self.drawer_open = !self.drawer_open;
                self.drawer_selected = 0;
            }
            Action::CloseDrawer => self.drawer_open = false,
            Action::SelectNext if self.drawer_open => {
                let len = store.read(|log| log.notification_len());
                if self.drawer_selected + 1 < len {
                    self.drawer_selected += 1;
                }
            }
            Action::SelectPrev if self.drawer_open => {
                self.drawer_selected = self.drawer_selected.saturating_sub(1);
            }
            Action::MarkSelectedRead if self.drawer_open => {
                let selected = self.drawer_selected;
                let id = store.read(|log| log.notifications().nth(selected).map(|n| n.id));
                if let Some(id) = id {
                    store.mark_read(id);
                }
            }
            Action::MarkAllRead if self.drawer_open => {
                store.mark_all_read();
                self.drawer_open = false;
                self.info = "All notifications marked read".into();
            }
            Action::ClearNotifications if self.drawer_open => {
                store.clear_notifications();
                self.drawer_selected = 0;
            }
            Action::SelectNext
            | Action::SelectPrev
            | Action::MarkSelectedRead
            | Action::MarkAllRead
            | Action::ClearNotifications => {}
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::seeded_event_log;
    use crate::model::{LogKind, NotificationKind};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded() -> (UiState, LabStore) {
        (UiState::default(), LabStore::new(seeded_event_log()))
    }

    #[test]
    fn waveform_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let wave = random_waveform(&mut rng);
        assert_eq!(wave.len(), WAVEFORM_BARS);
        assert!(wave.iter().all(|h| (10..90).contains(h)));
    }

    #[test]
    fn busy_flip_reshuffles_waveform_once() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut state = UiState::default();
        let before = state.waveform.clone();
        assert!(state.observe_busy(true, &mut rng));
        assert_ne!(state.waveform, before);
        let during = state.waveform.clone();
        assert!(!state.observe_busy(true, &mut rng));
        assert_eq!(state.waveform, during);
        assert!(state.observe_busy(false, &mut rng));
    }

    #[test]
    fn run_request_is_swallowed_while_busy() {
        let (mut state, store) = seeded();
        assert_eq!(state.apply(Action::RequestRun, &store), Some(UiCommand::Start));
        state.busy = true;
        assert_eq!(state.apply(Action::RequestRun, &store), None);
        assert_eq!(state.apply(Action::Quit, &store), Some(UiCommand::Quit));
    }

    #[test]
    fn drawer_keys_do_nothing_when_closed() {
        let (mut state, store) = seeded();
        state.apply(Action::MarkAllRead, &store);
        state.apply(Action::ClearNotifications, &store);
        assert_eq!(store.unread_count(), 2);
        assert_eq!(store.notifications().len(), 3);
    }

    #[test]
    fn mark_selected_read_follows_selection() {
        let (mut state, store) = seeded();
        state.apply(Action::ToggleDrawer, &store);
        state.apply(Action::SelectNext, &store);
        state.apply(Action::MarkSelectedRead, &store);

        let notifs = store.notifications();
        assert!(!notifs[0].read);
        assert!(notifs[1].read, "second entry selected");
        assert_eq!(store.unread_count(), 1);
    }

    #[test]
    fn selection_is_clamped() {
        let (mut state, store) = seeded();
        state.apply(Action::ToggleDrawer, &store);
        for _ in 0..10 {
            state.apply(Action::SelectNext, &store);
        }
        assert_eq!(state.drawer_selected, 2);
        for _ in 0..10 {
            state.apply(Action::SelectPrev, &store);
        }
        assert_eq!(state.drawer_selected, 0);
    }

    #[test]
    fn mark_all_read_closes_drawer() {
        let (mut state, store) = seeded();
        state.apply(Action::ToggleDrawer, &store);
        state.apply(Action::MarkAllRead, &store);
        assert!(!state.drawer_open);
        assert_eq!(store.unread_count(), 0);
    }

    #[test]
    fn clear_notifications_from_drawer() {
        let (mut state, store) = seeded();
        store.notify("x", "y", NotificationKind::Warning);
        state.apply(Action::ToggleDrawer, &store);
        state.apply(Action::ClearNotifications, &store);
        assert!(store.notifications().is_empty());
        assert_eq!(store.unread_count(), 0);
    }

    #[test]
    fn filter_and_clear_console() {
        let (mut state, store) = seeded();
        store.log(LogKind::Error, "boom");
        state.apply(Action::CycleFilter, &store);
        state.apply(Action::CycleFilter, &store);
        state.apply(Action::CycleFilter, &store);
        state.apply(Action::CycleFilter, &store);
        assert_eq!(state.log_filter, LogFilter::Only(LogKind::Error));
        assert_eq!(store.filtered_logs(state.log_filter).len(), 1);

        state.apply(Action::ClearLogs, &store);
        assert!(store.logs().is_empty());
    }

    #[test]
    fn tab_navigation() {
        let (mut state, store) = seeded();
        state.apply(Action::PrevTab, &store);
        assert_eq!(state.tab, Tab::Help);
        state.apply(Action::NextTab, &store);
        assert_eq!(state.tab, Tab::Dashboard);
        state.apply(Action::JumpTab(Tab::Backtesting), &store);
        assert_eq!(state.tab, Tab::Backtesting);
        state.apply(Action::Help, &store);
        assert_eq!(state.tab, Tab::Help);
    }
}
