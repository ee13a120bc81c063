use crate::models::{FollowUp, Lead, Notification, User};
use crate::services::filter_service::LeadFilter;
use crate::services::visibility_service;
use crate::state::Store;
use chrono::{DateTime, Duration, Local, NaiveDateTime};
use serde::Serialize;

/// A follow-up fires once it is due and for this long afterwards
pub const REMINDER_WINDOW_MINUTES: i64 = 2;

pub const REMINDER_TITLE: &str = "Follow-up Reminder";

/// Parses `YYYY-MM-DDTHH:MM[:SS]` (backend local time) or RFC 3339
pub fn parse_follow_up(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

fn has_follow_up(lead: &Lead) -> bool {
    lead.follow_up_date.as_deref().map_or(false, |d| !d.trim().is_empty())
}

/// Leads with a scheduled follow-up, soonest first. The date criterion
/// always applies to the follow-up date here.
pub fn follow_up_leads(leads: &[Lead], filter: &LeadFilter) -> Vec<Lead> {
    let filter = filter.clone().on_follow_up_date();
    let mut out: Vec<Lead> = leads
        .iter()
        .filter(|l| has_follow_up(l) && filter.matches(l))
        .cloned()
        .collect();
    out.sort_by(|a, b| a.follow_up_date.cmp(&b.follow_up_date));
    out
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUpReminder {
    pub lead_id: String,
    pub assigned_to: String,
    /// `followUpDate` exactly as stored
    pub scheduled_for: String,
    pub message: String,
}

impl FollowUpReminder {
    pub fn message_for(lead: &Lead) -> String {
        format!("You have to talk with {} ({})", lead.full_name, lead.phone)
    }

    pub fn into_notification(self, created_at: i64) -> Notification {
        Notification {
            id: uuid::Uuid::new_v4().to_string(),
            lead_id: self.lead_id,
            assigned_to: self.assigned_to,
            title: REMINDER_TITLE.to_string(),
            message: self.message,
            scheduled_for: self.scheduled_for,
            created_at,
            read: false,
        }
    }
}

/// Leads whose follow-up is due at `now`: `due <= now < due + window`.
/// Unparseable dates are skipped.
pub fn due_reminders(leads: &[Lead], now: NaiveDateTime) -> Vec<FollowUpReminder> {
    let window = Duration::minutes(REMINDER_WINDOW_MINUTES);

    leads
        .iter()
        .filter_map(|lead| {
            let raw = lead.follow_up_date.as_deref()?;
            let due = parse_follow_up(raw)?;
            if due <= now && now - due < window {
                Some(FollowUpReminder {
                    lead_id: lead.id.clone(),
                    assigned_to: lead.assigned_to.clone(),
                    scheduled_for: raw.to_string(),
                    message: FollowUpReminder::message_for(lead),
                })
            } else {
                None
            }
        })
        .collect()
}

/// Follow-up records of the leads the user can see
pub fn follow_up_records(store: &Store, current_user: &User) -> Vec<FollowUp> {
    store.read(|state| {
        let visible = visibility_service::visible_leads(current_user, &state.users, &state.leads);
        state
            .follow_ups
            .iter()
            .filter(|f| visible.iter().any(|l| l.id == f.lead_id))
            .cloned()
            .collect()
    })
}

/// Notifications for leads assigned to the user or their team
pub fn notifications_for(store: &Store, current_user: &User) -> Vec<Notification> {
    store.read(|state| {
        match visibility_service::allowed_assignees(current_user, &state.users) {
            None => state.notifications.clone(),
            Some(allowed) => state
                .notifications
                .iter()
                .filter(|n| allowed.contains(&n.assigned_to))
                .cloned()
                .collect(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::filter_service::DateMode;
    use chrono::NaiveDate;

    fn lead(id: &str, follow_up: Option<&str>) -> Lead {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "fullName": format!("Lead {}", id),
            "phone": "+971507313042",
            "assignedTo": "c1",
            "followUpDate": follow_up,
            "updatedAt": "2025-01-01T00:00"
        }))
        .unwrap()
    }

    fn at(raw: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    #[test]
    fn test_parse_follow_up_formats() {
        assert_eq!(parse_follow_up("2025-06-16T10:30"), Some(at("2025-06-16T10:30:00")));
        assert_eq!(parse_follow_up("2025-06-16T10:30:15"), Some(at("2025-06-16T10:30:15")));
        assert!(parse_follow_up("2025-06-16T10:30:00+05:30").is_some());
        assert_eq!(parse_follow_up("tomorrow"), None);
        assert_eq!(parse_follow_up("2025-06-16"), None);
    }

    #[test]
    fn test_due_window() {
        let leads = vec![
            lead("due", Some("2025-06-16T10:30")),
            lead("future", Some("2025-06-16T10:35")),
            lead("stale", Some("2025-06-16T10:20")),
            lead("none", None),
            lead("junk", Some("soon")),
        ];
        let reminders = due_reminders(&leads, at("2025-06-16T10:31:00"));
        assert_eq!(reminders.len(), 1);
        assert_eq!(reminders[0].lead_id, "due");
        assert_eq!(reminders[0].message, "You have to talk with Lead due (+971507313042)");

        assert_eq!(due_reminders(&leads, at("2025-06-16T10:30:00")).len(), 1);
        assert!(due_reminders(&leads, at("2025-06-16T10:32:00")).is_empty());
    }

    #[test]
    fn test_follow_up_view_filters_on_follow_up_date() {
        let leads = vec![
            lead("a", Some("2025-06-17T09:00")),
            lead("b", Some("2025-06-16T10:30")),
            lead("c", None),
        ];

        let all = follow_up_leads(&leads, &LeadFilter::default());
        let ids: Vec<&str> = all.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);

        let on_day = LeadFilter {
            date_mode: DateMode::On,
            date: NaiveDate::from_ymd_opt(2025, 6, 16),
            ..Default::default()
        };
        let hits = follow_up_leads(&leads, &on_day);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "b");
    }

    #[test]
    fn test_reminder_into_notification() {
        let reminder = due_reminders(&[lead("1", Some("2025-06-16T10:30"))], at("2025-06-16T10:30:30"))
            .pop()
            .unwrap();
        let n = reminder.into_notification(1_750_000_000);
        assert_eq!(n.title, REMINDER_TITLE);
        assert_eq!(n.scheduled_for, "2025-06-16T10:30");
        assert!(!n.read);
    }
}
