//! Fixed dashboard content: stat cards, the agent roster, tab names and the
//! demo entries a fresh session starts with.

use crate::model::{LogEntry, LogKind, NotificationEntry, NotificationKind};
use crate::store::EventLog;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    Blue,
    Amber,
    Emerald,
    Indigo,
}

#[derive(Debug, Clone, Copy)]
pub struct StatCard {
    pub label: &'static str,
    pub value: &'static str,
    pub detail: &'static str,
    pub accent: Accent,
    /// Recent history, percent-ish scale; the last point drives the gauge.
    pub spark: &'static [u16],
}

impl StatCard {
    /// Gauge fill in percent. Pinned at 95 while a run is busy.
    pub fn gauge_percent(&self, busy: bool) -> u16 {
        if busy {
            return 95;
        }
        self.spark.last().copied().unwrap_or(0).min(100)
    }
}

pub const STAT_CARDS: [StatCard; 4] = [
    StatCard {
        label: "Computational Load",
        value: "42.8%",
        detail: "8/12 Clusters Active",
        accent: Accent::Blue,
        spark: &[30, 45, 32, 50, 42],
    },
    StatCard {
        label: "Neural Latency",
        value: "18ms",
        detail: "p99: 24ms (Optimal)",
        accent: Accent::Amber,
        spark: &[20, 18, 22, 19, 18],
    },
    StatCard {
        label: "Strategy Success",
        value: "94.2%",
        detail: "+2.4% this week",
        accent: Accent::Emerald,
        spark: &[80, 85, 90, 88, 94],
    },
    StatCard {
        label: "Active Ingress",
        value: "1.2k/s",
        detail: "Global Edge Network",
        accent: Accent::Indigo,
        spark: &[100, 110, 105, 120, 120],
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentStatus {
    Optimal,
    Stable,
    Maintenance,
}

impl AgentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AgentStatus::Optimal => "Optimal",
            AgentStatus::Stable => "Stable",
            AgentStatus::Maintenance => "Maintenance",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Agent {
    pub name: &'static str,
    pub role: &'static str,
    pub status: AgentStatus,
    pub uptime: &'static str,
    pub load: u16,
}

pub const ACTIVE_AGENTS: [Agent; 4] = [
    Agent {
        name: "Sentinel-Alpha",
        role: "Logic Engine",
        status: AgentStatus::Optimal,
        uptime: "14d 2h",
        load: 65,
    },
    Agent {
        name: "Vision-Core-01",
        role: "OCR/Vision",
        status: AgentStatus::Stable,
        uptime: "4d 18h",
        load: 32,
    },
    Agent {
        name: "Audit-Bot-X",
        role: "Compliance",
        status: AgentStatus::Maintenance,
        uptime: "0h 42m",
        load: 0,
    },
    Agent {
        name: "Predictor-v4",
        role: "ML Inference",
        status: AgentStatus::Optimal,
        uptime: "1d 12h",
        load: 88,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Dashboard,
    Builder,
    Editor,
    Backtesting,
    Analytics,
    Deployment,
    Help,
}

impl Tab {
    pub const ALL: [Tab; 7] = [
        Tab::Dashboard,
        Tab::Builder,
        Tab::Editor,
        Tab::Backtesting,
        Tab::Analytics,
        Tab::Deployment,
        Tab::Help,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Builder => "Agent Builder",
            Tab::Editor => "Strategy Editor",
            Tab::Backtesting => "Backtesting",
            Tab::Analytics => "Analytics",
            Tab::Deployment => "Deployment",
            Tab::Help => "Help",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Tab bound to a digit key, `1` being the dashboard.
    pub fn from_digit(c: char) -> Option<Self> {
        let n = c.to_digit(10)? as usize;
        if n == 0 {
            return None;
        }
        Self::ALL.get(n - 1).copied().filter(|t| *t != Tab::Help)
    }
}

/// Event log pre-filled with the demo console lines and notifications.
pub fn seeded_event_log() -> EventLog {
    let mut log = EventLog::new();

    // Oldest first so the newest ends up on top.
    let seed_logs = [
        (LogKind::Info, "System initialized. Ready for simulation.", "10:00:01"),
        (LogKind::Success, "Model GPT-4o connected successfully.", "10:00:05"),
        (LogKind::Warning, "Latency spikes detected in Region-US-East.", "10:05:12"),
    ];
    for (kind, message, at) in seed_logs {
        let mut entry = LogEntry::new(log.next_id(), kind, message);
        entry.timestamp = at.into();
        log.append_log(entry);
    }

    let seed_notifications = [
        (
            "New Agent Template",
            "GPT-4o Vision templates are now available.",
            NotificationKind::Info,
            "1h ago",
            true,
        ),
        (
            "High Latency Warning",
            "Region US-East is experiencing 200ms+ spikes.",
            NotificationKind::Warning,
            "15m ago",
            false,
        ),
        (
            "Deployment Success",
            "Sentinel-Alpha is now live on Prod.",
            NotificationKind::Success,
            "2m ago",
            false,
        ),
    ];
    for (title, message, kind, age, read) in seed_notifications {
        let mut entry = NotificationEntry::new(log.next_id(), title, message, kind);
        entry.created_at = age.into();
        entry.read = read;
        log.append_notification(entry);
    }

    log
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_matches_demo_session() {
        let log = seeded_event_log();
        let msgs: Vec<_> = log.logs().map(|e| e.message.as_str()).collect();
        assert_eq!(
            msgs,
            [
                "Latency spikes detected in Region-US-East.",
                "Model GPT-4o connected successfully.",
                "System initialized. Ready for simulation.",
            ]
        );
        let titles: Vec<_> = log.notifications().map(|n| n.title.as_str()).collect();
        assert_eq!(
            titles,
            ["Deployment Success", "High Latency Warning", "New Agent Template"]
        );
        assert_eq!(log.unread_count(), 2);
    }

    #[test]
    fn gauge_pins_while_busy() {
        let card = STAT_CARDS[0];
        assert_eq!(card.gauge_percent(false), 42);
        assert_eq!(card.gauge_percent(true), 95);
        assert_eq!(STAT_CARDS[3].gauge_percent(false), 100);
    }

    #[test]
    fn tabs_cycle_both_ways() {
        assert_eq!(Tab::Dashboard.next(), Tab::Builder);
        assert_eq!(Tab::Help.next(), Tab::Dashboard);
        assert_eq!(Tab::Dashboard.prev(), Tab::Help);
    }

    #[test]
    fn digits_pick_content_tabs() {
        assert_eq!(Tab::from_digit('1'), Some(Tab::Dashboard));
        assert_eq!(Tab::from_digit('6'), Some(Tab::Deployment));
        assert_eq!(Tab::from_digit('7'), None);
        assert_eq!(Tab::from_digit('0'), None);
        assert_eq!(Tab::from_digit('x'), None);
    }
}
