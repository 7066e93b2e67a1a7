//! Console log and notification state shared between the run controller and
//! presentation layers.
//!
//! [`EventLog`] is the plain collection pair. [`LabStore`] wraps it behind a
//! single mutex and pushes [`StoreChange`] notices to subscribers whenever a
//! mutation actually changed something.

use crate::model::{
    epoch_millis, LogEntry, LogFilter, LogKind, NotificationEntry, NotificationKind, StoreChange,
    LOG_CAPACITY,
};
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

#[derive(Debug, Default)]
pub struct EventLog {
    logs: VecDeque<LogEntry>,
    notifications: VecDeque<NotificationEntry>,
    last_id: u64,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a unique id: creation time in ms, bumped past the last id on collision.
    pub fn next_id(&mut self) -> u64 {
        self.last_id = epoch_millis().max(self.last_id.saturating_add(1));
        self.last_id
    }

    /// Prepend an entry, evicting the oldest ones beyond [`LOG_CAPACITY`].
    pub fn append_log(&mut self, entry: LogEntry) {
        self.last_id = self.last_id.max(entry.id);
        self.logs.push_front(entry);
        self.logs.truncate(LOG_CAPACITY);
    }

    pub fn append_notification(&mut self, entry: NotificationEntry) {
        self.last_id = self.last_id.max(entry.id);
        self.notifications.push_front(entry);
    }

    /// Create and append a log entry stamped with the current time.
    pub fn log(&mut self, kind: LogKind, message: impl Into<String>) -> u64 {
        let id = self.next_id();
        self.append_log(LogEntry::new(id, kind, message));
        id
    }

    /// Create and append an unread notification.
    pub fn notify(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
        kind: NotificationKind,
    ) -> u64 {
        let id = self.next_id();
        self.append_notification(NotificationEntry::new(id, title, message, kind));
        id
    }

    /// Newest first.
    pub fn logs(&self) -> impl Iterator<Item = &LogEntry> + '_ {
        self.logs.iter()
    }

    pub fn filter_logs(&self, filter: LogFilter) -> impl Iterator<Item = &LogEntry> + '_ {
        self.logs.iter().filter(move |e| filter.matches(e))
    }

    pub fn log_len(&self) -> usize {
        self.logs.len()
    }

    pub fn clear_logs(&mut self) {
        self.logs.clear();
    }

    /// Newest first.
    pub fn notifications(&self) -> impl Iterator<Item = &NotificationEntry> + '_ {
        self.notifications.iter()
    }

    pub fn notification_len(&self) -> usize {
        self.notifications.len()
    }

    /// Returns whether an unread notification was flipped.
    pub fn mark_read(&mut self, id: u64) -> bool {
        match self.notifications.iter_mut().find(|n| n.id == id) {
            Some(n) if !n.read => {
                n.read = true;
                true
            }
            _ => false,
        }
    }

    pub fn mark_all_read(&mut self) -> bool {
        let mut changed = false;
        for n in self.notifications.iter_mut().filter(|n| !n.read) {
            n.read = true;
            changed = true;
        }
        changed
    }

    pub fn clear_notifications(&mut self) {
        self.notifications.clear();
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }
}

/// Point-in-time copy of the store, used by the JSON output mode.
#[derive(Debug, Clone, Serialize)]
pub struct StoreSnapshot {
    pub logs: Vec<LogEntry>,
    pub notifications: Vec<NotificationEntry>,
    pub unread: usize,
}

struct Shared {
    log: EventLog,
    subscribers: Vec<UnboundedSender<StoreChange>>,
}

/// Cloneable handle to the session's [`EventLog`].
#[derive(Clone)]
pub struct LabStore {
    inner: Arc<Mutex<Shared>>,
}

impl Default for LabStore {
    fn default() -> Self {
        Self::new(EventLog::new())
    }
}

impl LabStore {
    pub fn new(log: EventLog) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Shared {
                log,
                subscribers: Vec::new(),
            })),
        }
    }

    // Every mutation finishes before the guard drops; a poisoned lock still
    // holds consistent collections.
    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Receive a [`StoreChange`] after every effective mutation.
    pub fn subscribe(&self) -> UnboundedReceiver<StoreChange> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.lock().subscribers.push(tx);
        rx
    }

    fn mutate<R>(&self, change: StoreChange, f: impl FnOnce(&mut EventLog) -> (R, bool)) -> R {
        let mut shared = self.lock();
        let (out, changed) = f(&mut shared.log);
        if changed {
            shared.subscribers.retain(|tx| tx.send(change).is_ok());
        }
        out
    }

    /// Read access without cloning the collections.
    pub fn read<R>(&self, f: impl FnOnce(&EventLog) -> R) -> R {
        f(&self.lock().log)
    }

    pub fn log(&self, kind: LogKind, message: impl Into<String>) -> u64 {
        self.mutate(StoreChange::Logs, |log| (log.log(kind, message), true))
    }

    pub fn notify(
        &self,
        title: impl Into<String>,
        message: impl Into<String>,
        kind: NotificationKind,
    ) -> u64 {
        self.mutate(StoreChange::Notifications, |log| {
            (log.notify(title, message, kind), true)
        })
    }

    pub fn clear_logs(&self) {
        self.mutate(StoreChange::Logs, |log| {
            let had = log.log_len() > 0;
            log.clear_logs();
            ((), had)
        })
    }

    pub fn mark_read(&self, id: u64) {
        self.mutate(StoreChange::Notifications, |log| ((), log.mark_read(id)))
    }

    pub fn mark_all_read(&self) {
        self.mutate(StoreChange::Notifications, |log| ((), log.mark_all_read()))
    }

    pub fn clear_notifications(&self) {
        self.mutate(StoreChange::Notifications, |log| {
            let had = log.notification_len() > 0;
            log.clear_notifications();
            ((), had)
        })
    }

    pub fn logs(&self) -> Vec<LogEntry> {
        self.read(|log| log.logs().cloned().collect())
    }

    pub fn filtered_logs(&self, filter: LogFilter) -> Vec<LogEntry> {
        self.read(|log| log.filter_logs(filter).cloned().collect())
    }

    pub fn notifications(&self) -> Vec<NotificationEntry> {
        self.read(|log| log.notifications().cloned().collect())
    }

    pub fn unread_count(&self) -> usize {
        self.read(EventLog::unread_count)
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        self.read(|log| StoreSnapshot {
            logs: log.logs().cloned().collect(),
            notifications: log.notifications().cloned().collect(),
            unread: log.unread_count(),
        })
    }
}
