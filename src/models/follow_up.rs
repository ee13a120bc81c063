use serde::{Deserialize, Serialize};

/// Scheduled contact action recorded by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FollowUp {
    pub id: String,
    pub lead_id: String,
    pub date: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub counselor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_reminder_date: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub whatsapp_sent: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}
