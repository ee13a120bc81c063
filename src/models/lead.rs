use serde::{Deserialize, Serialize};

/// Status that requires fee details
pub const ADMISSION_DONE: &str = "Admission done";

/// Known lead statuses, in the order the dashboard dropdowns show them.
/// The backend does not validate `status`, so leads may carry anything.
pub const LEAD_STATUSES: &[&str] = &[
    "Admission done",
    "will enroll later",
    "Junk",
    "Fresh Lead",
    "Followup",
    "Hot Lead",
    "Not Answering",
    "Repeated Lead",
    "offline/cv",
    "Warm",
    "Not Interested",
    "Not Eligible",
    "Not Valid No.",
    "Interested, Detail Sent",
    "Detail Sent No responding",
    "Already enrolled",
    "Support query",
    "Call Back",
    "Fresh Leads",
    "Fresh leads",
    "Follow up Reassigned",
    "Fees issue",
    "Hot-Drop out",
    "Tried Multiple Times -No Response",
    "Fresh",
    "Hot",
    "Follow-Up",
];

/// Timestamped note written by a counselor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Note {
    pub date: String,
    pub time: String,
    pub text: String,
}

impl Note {
    /// "{date} / {time}   {text}"
    pub fn flatten(&self) -> String {
        format!("{} / {}   {}", self.date, self.time, self.text)
    }

    /// Flattens a notes list into one block of text, one note per paragraph.
    /// Lossy: the date/time/text split does not survive.
    pub fn flatten_all(notes: &[Note]) -> String {
        notes
            .iter()
            .map(Note::flatten)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Lead (prospective student) as served by the CRM backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: String,

    #[serde(default)]
    pub full_name: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub phone: String,

    #[serde(default)]
    pub country: String,

    #[serde(default)]
    pub qualification: String,

    #[serde(default)]
    pub source: String,

    #[serde(default)]
    pub course_interest: String,

    #[serde(default)]
    pub status: String,

    /// User id of the owning counselor
    #[serde(default)]
    pub assigned_to: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fees: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_fees: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fees_collected: Option<f64>,

    /// Legacy free-text notes; CSV imports put the flattened notes here
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default)]
    pub notes_list: Vec<Note>,
}

impl Lead {
    pub fn status_contains(&self, keyword: &str) -> bool {
        self.status.to_lowercase().contains(keyword)
    }

    pub fn is_admission(&self) -> bool {
        self.status == ADMISSION_DONE
    }
}

/// Request to create a lead
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeadRequest {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub qualification: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub course_interest: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub assigned_to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fees: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_fees: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fees_collected: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub notes_list: Vec<Note>,
}

/// Partial lead update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLeadRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualification: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_interest: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_up_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fees: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_fees: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fees_collected: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes_list: Option<Vec<Note>>,
}

/// Request to append a note to a lead
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddNoteRequest {
    pub text: String,
    /// Next follow-up scheduled alongside the note
    #[serde(default)]
    pub follow_up_date: Option<String>,
}

fn fees_present(total: Option<f64>, collected: Option<f64>) -> bool {
    matches!((total, collected), (Some(t), Some(c)) if t != 0.0 && c != 0.0)
}

/// "Admission done" leads must carry both total fees and fees collected.
pub fn validate_admission_fees(
    status: &str,
    total_fees: Option<f64>,
    fees_collected: Option<f64>,
) -> Result<(), String> {
    if status == ADMISSION_DONE && !fees_present(total_fees, fees_collected) {
        return Err(
            "Please enter both Total Fees and Fees Collected for Admission done leads.".to_string(),
        );
    }
    Ok(())
}

impl CreateLeadRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_admission_fees(&self.status, self.total_fees, self.fees_collected)
    }
}

impl UpdateLeadRequest {
    /// Validates the update as it would look merged onto `current`.
    pub fn validate_against(&self, current: &Lead) -> Result<(), String> {
        let status = self.status.as_deref().unwrap_or(&current.status);
        let total = self.total_fees.or(current.total_fees);
        let collected = self.fees_collected.or(current.fees_collected);
        validate_admission_fees(status, total, collected)
    }
}
