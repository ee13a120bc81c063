// ==================== FOLLOW-UP REMINDER ====================
// Polls the loaded leads every tick and pushes a notification for each
// follow-up that just came due.

use crate::services::follow_up_service;
use crate::state::{Action, Store};
use chrono::{Local, NaiveDateTime};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::time::{interval, Duration};

/// Reminders already pushed, keyed by (lead id, scheduled time).
/// A rescheduled follow-up gets a new key and fires again. Only keys that
/// match a lead's current follow-up survive a check, so the set stays at
/// most one entry per lead.
#[derive(Debug, Default)]
pub struct FiredReminders {
    fired: HashSet<(String, String)>,
}

impl FiredReminders {
    /// Scans once and returns how many notifications were pushed
    pub fn check(&mut self, store: &Store, now: NaiveDateTime) -> usize {
        let due = store.read(|state| follow_up_service::due_reminders(&state.leads, now));
        let created_at = Local::now().timestamp();
        let mut pushed = 0;

        for reminder in due {
            let key = (reminder.lead_id.clone(), reminder.scheduled_for.clone());
            if !self.fired.insert(key) {
                continue;
            }
            log::info!("🔔 {} (lead {}, counselor {})", reminder.message, reminder.lead_id, reminder.assigned_to);
            store.dispatch(Action::NotificationPushed(reminder.into_notification(created_at)));
            pushed += 1;
        }

        self.prune(store);
        pushed
    }

    // Drop entries for deleted leads and superseded schedules
    fn prune(&mut self, store: &Store) {
        let current: HashMap<String, String> = store.read(|state| {
            state
                .leads
                .iter()
                .filter_map(|l| l.follow_up_date.clone().map(|d| (l.id.clone(), d)))
                .collect()
        });
        self.fired
            .retain(|(lead_id, scheduled_for)| current.get(lead_id) == Some(scheduled_for));
    }
}

/// Starts the reminder loop on the tokio runtime
pub async fn start_follow_up_reminder(store: Arc<Store>, interval_secs: u64) {
    log::info!("⏰ Starting follow-up reminder (checks every {}s)", interval_secs);

    tokio::spawn(async move {
        let mut ticker = interval(Duration::from_secs(interval_secs));
        let mut fired = FiredReminders::default();

        loop {
            ticker.tick().await;

            let pushed = fired.check(&store, Local::now().naive_local());
            log::debug!("⏰ Reminder check: {} new reminder(s)", pushed);
        }
    });

    log::info!("✅ Follow-up reminder started");
}
