use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::macros::format_description;
use time::OffsetDateTime;

/// Maximum number of entries the debug console retains.
pub const LOG_CAPACITY: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    Info,
    Success,
    Warning,
    Error,
}

impl LogKind {
    pub fn as_str(self) -> &'static str {
        match self {
            LogKind::Info => "info",
            LogKind::Success => "success",
            LogKind::Warning => "warning",
            LogKind::Error => "error",
        }
    }
}

impl fmt::Display for LogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: u64,
    pub kind: LogKind,
    pub message: String,
    /// Local 24-hour clock time of creation (`HH:MM:SS`).
    pub timestamp: String,
}

impl LogEntry {
    pub fn new(id: u64, kind: LogKind, message: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            message: message.into(),
            timestamp: clock_now(),
        }
    }

    /// Render the entry the way the console shows it.
    pub fn to_line(&self) -> String {
        format!(
            "[{}] {}: {}",
            self.timestamp,
            self.kind.as_str().to_uppercase(),
            self.message
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::Info => "info",
            NotificationKind::Success => "success",
            NotificationKind::Warning => "warning",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationEntry {
    pub id: u64,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    /// Relative ("2m ago") or absolute creation label.
    pub created_at: String,
    #[serde(default)]
    pub read: bool,
}

impl NotificationEntry {
    pub fn new(
        id: u64,
        title: impl Into<String>,
        message: impl Into<String>,
        kind: NotificationKind,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            message: message.into(),
            kind,
            created_at: "Just now".into(),
            read: false,
        }
    }
}

/// Console filter: everything, or a single log kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFilter {
    #[default]
    All,
    Only(LogKind),
}

impl LogFilter {
    pub const CYCLE: [LogFilter; 5] = [
        LogFilter::All,
        LogFilter::Only(LogKind::Info),
        LogFilter::Only(LogKind::Success),
        LogFilter::Only(LogKind::Warning),
        LogFilter::Only(LogKind::Error),
    ];

    pub fn matches(self, entry: &LogEntry) -> bool {
        match self {
            LogFilter::All => true,
            LogFilter::Only(kind) => entry.kind == kind,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LogFilter::All => "all",
            LogFilter::Only(kind) => kind.as_str(),
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::CYCLE.iter().position(|f| *f == self).unwrap_or(0);
        Self::CYCLE[(idx + 1) % Self::CYCLE.len()]
    }
}

impl FromStr for LogFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::CYCLE
            .iter()
            .copied()
            .find(|f| f.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown log filter '{s}'"))
    }
}

/// Which collection a store mutation touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreChange {
    Logs,
    Notifications,
}

/// Current local wall-clock time as `HH:MM:SS`.
pub fn clock_now() -> String {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    now.format(format_description!("[hour]:[minute]:[second]"))
        .unwrap_or_else(|_| "--:--:--".into())
}

/// Milliseconds since the unix epoch, used to seed entry ids.
pub fn epoch_millis() -> u64 {
    let nanos = OffsetDateTime::now_utc().unix_timestamp_nanos();
    u64::try_from(nanos / 1_000_000).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_cycles_through_every_kind_and_wraps() {
        let mut f = LogFilter::All;
        let mut seen = vec![f.label()];
        for _ in 0..5 {
            f = f.next();
            seen.push(f.label());
        }
        assert_eq!(seen, ["all", "info", "success", "warning", "error", "all"]);
    }

    #[test]
    fn filter_parses_labels() {
        assert_eq!("all".parse::<LogFilter>(), Ok(LogFilter::All));
        assert_eq!(
            "Warning".parse::<LogFilter>(),
            Ok(LogFilter::Only(LogKind::Warning))
        );
        assert!("verbose".parse::<LogFilter>().is_err());
    }

    #[test]
    fn clock_is_24_hour_hh_mm_ss() {
        let t = clock_now();
        assert_eq!(t.len(), 8);
        let parts: Vec<u32> = t.split(':').map(|p| p.parse().unwrap()).collect();
        assert_eq!(parts.len(), 3);
        assert!(parts[0] < 24 && parts[1] < 60 && parts[2] < 61);
    }

    #[test]
    fn new_notification_is_unread() {
        let n = NotificationEntry::new(7, "t", "m", NotificationKind::Info);
        assert!(!n.read);
        assert_eq!(n.created_at, "Just now");
    }

    #[test]
    fn log_line_uppercases_kind() {
        let mut e = LogEntry::new(1, LogKind::Success, "done");
        e.timestamp = "10:00:05".into();
        assert_eq!(e.to_line(), "[10:00:05] SUCCESS: done");
    }

    #[test]
    fn kinds_serialize_lowercase() {
        let json = serde_json::to_string(&LogKind::Warning).unwrap();
        assert_eq!(json, "\"warning\"");
    }
}
