use crate::models::{Course, FollowUp, Lead, Notification, User};
use crate::services::backend_client::{DataSource, Snapshot};
use std::collections::HashSet;

/// Notification feed length; older entries fall off
pub const MAX_NOTIFICATIONS: usize = 100;

/// Everything the dashboard has loaded, plus the reminder feed
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub leads: Vec<Lead>,
    pub users: Vec<User>,
    pub courses: Vec<Course>,
    pub follow_ups: Vec<FollowUp>,
    pub source: DataSource,
    /// Set when sample data replaced a failed backend load
    pub warning: Option<String>,
    /// Unix timestamp of the last load, `None` before the first one
    pub loaded_at: Option<i64>,
    /// Newest first
    pub notifications: Vec<Notification>,
}

#[derive(Debug, Clone)]
pub enum Action {
    DataLoaded { snapshot: Snapshot, at: i64 },
    LeadAdded(Lead),
    LeadUpdated(Lead),
    LeadDeleted(String),
    LeadsImported(Vec<Lead>),
    UserAdded(User),
    UserUpdated(User),
    NotificationPushed(Notification),
    /// Marks read the notifications of these assignees; `None` marks all
    NotificationsRead(Option<HashSet<String>>),
}

impl AppState {
    pub fn reduce(mut self, action: Action) -> AppState {
        match action {
            Action::DataLoaded { snapshot, at } => {
                self.leads = snapshot.leads;
                self.users = snapshot.users;
                self.courses = snapshot.courses;
                self.follow_ups = snapshot.follow_ups;
                self.source = snapshot.source;
                self.warning = snapshot.warning;
                self.loaded_at = Some(at);
            }
            Action::LeadAdded(lead) => {
                self.leads.insert(0, lead);
            }
            Action::LeadUpdated(lead) => {
                if let Some(existing) = self.leads.iter_mut().find(|l| l.id == lead.id) {
                    *existing = lead;
                }
            }
            Action::LeadDeleted(id) => {
                self.leads.retain(|l| l.id != id);
            }
            Action::LeadsImported(mut leads) => {
                leads.append(&mut self.leads);
                self.leads = leads;
            }
            Action::UserAdded(user) => {
                self.users.push(user);
            }
            Action::UserUpdated(user) => {
                if let Some(existing) = self.users.iter_mut().find(|u| u.id == user.id) {
                    *existing = user;
                }
            }
            Action::NotificationPushed(notification) => {
                self.notifications.insert(0, notification);
                self.notifications.truncate(MAX_NOTIFICATIONS);
            }
            Action::NotificationsRead(assignees) => {
                for n in self.notifications.iter_mut() {
                    let owned = assignees.as_ref().map_or(true, |set| set.contains(&n.assigned_to));
                    if owned {
                        n.read = true;
                    }
                }
            }
        }
        self
    }

    pub fn find_lead(&self, id: &str) -> Option<&Lead> {
        self.leads.iter().find(|l| l.id == id)
    }

    pub fn find_user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }
}
