//! Text summary builder for CLI output.
//!
//! Formats the dashboard cards, the console and the notification list as
//! plain lines for text mode.

use crate::catalog::STAT_CARDS;
use crate::store::StoreSnapshot;

/// Pre-formatted lines for text output.
pub(crate) struct TextSummary {
    pub lines: Vec<String>,
}

pub(crate) fn build_text_summary(snapshot: &StoreSnapshot) -> TextSummary {
    let mut lines = Vec::new();

    for card in STAT_CARDS.iter() {
        lines.push(format!("{:<20} {:>7}  {}", card.label, card.value, card.detail));
    }

    lines.push(String::new());
    lines.push(format!("Debug console ({} entries):", snapshot.logs.len()));
    for entry in &snapshot.logs {
        lines.push(format!("  {}", entry.to_line()));
    }

    lines.push(String::new());
    lines.push(format!(
        "Notifications ({} unread of {}):",
        snapshot.unread,
        snapshot.notifications.len()
    ));
    if snapshot.notifications.is_empty() {
        lines.push("  No new notifications".into());
    }
    for n in &snapshot.notifications {
        let marker = if n.read { ' ' } else { '*' };
        lines.push(format!(
            "{marker} [{}] {} - {} ({})",
            n.kind.as_str(),
            n.title,
            n.message,
            n.created_at
        ));
    }

    TextSummary { lines }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LogKind, NotificationKind};
    use crate::store::LabStore;

    #[test]
    fn marks_unread_notifications() {
        let store = LabStore::default();
        store.log(LogKind::Info, "Starting strategy validation...");
        let id = store.notify(
            "Optimization Complete",
            "Neural weights optimized.",
            NotificationKind::Success,
        );
        store.notify(
            "Simulation Finished",
            "Backtest passed all parameters.",
            NotificationKind::Info,
        );
        store.mark_read(id);

        let summary = build_text_summary(&store.snapshot());
        assert!(summary
            .lines
            .iter()
            .any(|l| l == "Notifications (1 unread of 2):"));
        assert!(summary
            .lines
            .iter()
            .any(|l| l.starts_with("* [info] Simulation Finished")));
        assert!(summary
            .lines
            .iter()
            .any(|l| l.starts_with("  [success] Optimization Complete")));
        assert!(summary
            .lines
            .iter()
            .any(|l| l.ends_with("INFO: Starting strategy validation...")));
    }

    #[test]
    fn empty_notifications_say_so() {
        let summary = build_text_summary(&LabStore::default().snapshot());
        assert!(summary.lines.iter().any(|l| l == "  No new notifications"));
        assert!(summary.lines.iter().any(|l| l.starts_with("Computational Load")));
    }
}
