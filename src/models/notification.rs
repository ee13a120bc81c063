use serde::{Deserialize, Serialize};

/// Entry of the in-service notification feed (follow-up reminders)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub lead_id: String,
    /// Counselor the lead is assigned to
    pub assigned_to: String,
    pub title: String,
    pub message: String,
    /// Follow-up time as stored on the lead
    pub scheduled_for: String,
    /// Unix timestamp
    pub created_at: i64,
    pub read: bool,
}
