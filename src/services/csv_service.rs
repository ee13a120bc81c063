use crate::models::{CreateLeadRequest, Lead, Note, User};
use std::collections::HashMap;

/// Columns the lead table (and its CSV export) can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportColumn {
    Id,
    FullName,
    Email,
    Phone,
    Country,
    Qualification,
    Source,
    CourseInterest,
    Status,
    AssignedTo,
    CreatedAt,
    UpdatedAt,
    FollowUpDate,
    Notes,
    Fees,
    TotalFees,
    FeesCollected,
}

const ALL_COLUMNS: [ExportColumn; 17] = [
    ExportColumn::Id,
    ExportColumn::FullName,
    ExportColumn::Email,
    ExportColumn::Phone,
    ExportColumn::Country,
    ExportColumn::Qualification,
    ExportColumn::Source,
    ExportColumn::CourseInterest,
    ExportColumn::Status,
    ExportColumn::AssignedTo,
    ExportColumn::CreatedAt,
    ExportColumn::UpdatedAt,
    ExportColumn::FollowUpDate,
    ExportColumn::Notes,
    ExportColumn::Fees,
    ExportColumn::TotalFees,
    ExportColumn::FeesCollected,
];

/// Default columns of the leads page
pub const LEAD_COLUMNS: &[ExportColumn] = &[
    ExportColumn::FullName,
    ExportColumn::Phone,
    ExportColumn::Country,
    ExportColumn::Qualification,
    ExportColumn::Source,
    ExportColumn::Status,
    ExportColumn::AssignedTo,
    ExportColumn::CreatedAt,
    ExportColumn::UpdatedAt,
];

/// Default columns of the follow-ups export
pub const FOLLOW_UP_COLUMNS: &[ExportColumn] = &[
    ExportColumn::FullName,
    ExportColumn::Status,
    ExportColumn::Phone,
    ExportColumn::Country,
    ExportColumn::Qualification,
    ExportColumn::Source,
    ExportColumn::AssignedTo,
    ExportColumn::CreatedAt,
    ExportColumn::UpdatedAt,
    ExportColumn::Notes,
];

impl ExportColumn {
    /// Lead field name (camelCase, as on the wire)
    pub fn key(self) -> &'static str {
        match self {
            ExportColumn::Id => "id",
            ExportColumn::FullName => "fullName",
            ExportColumn::Email => "email",
            ExportColumn::Phone => "phone",
            ExportColumn::Country => "country",
            ExportColumn::Qualification => "qualification",
            ExportColumn::Source => "source",
            ExportColumn::CourseInterest => "courseInterest",
            ExportColumn::Status => "status",
            ExportColumn::AssignedTo => "assignedTo",
            ExportColumn::CreatedAt => "createdAt",
            ExportColumn::UpdatedAt => "updatedAt",
            ExportColumn::FollowUpDate => "followUpDate",
            ExportColumn::Notes => "notes",
            ExportColumn::Fees => "fees",
            ExportColumn::TotalFees => "totalFees",
            ExportColumn::FeesCollected => "feesCollected",
        }
    }

    /// Header text in exported files
    pub fn label(self) -> &'static str {
        match self {
            ExportColumn::Id => "ID",
            ExportColumn::FullName => "Name",
            ExportColumn::Email => "Email",
            ExportColumn::Phone => "Phone",
            ExportColumn::Country => "Country",
            ExportColumn::Qualification => "Qualification",
            ExportColumn::Source => "Source",
            ExportColumn::CourseInterest => "Course Interest",
            ExportColumn::Status => "Status",
            ExportColumn::AssignedTo => "Assigned To",
            ExportColumn::CreatedAt => "Created At",
            ExportColumn::UpdatedAt => "Updated At",
            ExportColumn::FollowUpDate => "Follow Up Date",
            ExportColumn::Notes => "Notes",
            ExportColumn::Fees => "Fees",
            ExportColumn::TotalFees => "Total Fees",
            ExportColumn::FeesCollected => "Fees Collected",
        }
    }

    /// Resolves a header cell (field key or export label, any case)
    pub fn from_header(header: &str) -> Option<Self> {
        let wanted = header.trim().to_lowercase();
        ALL_COLUMNS
            .iter()
            .copied()
            .find(|c| c.key().to_lowercase() == wanted || c.label().to_lowercase() == wanted)
    }

    /// Parses a comma list such as `fullName,phone,notes`.
    /// Unknown names are an error so typos don't silently drop columns.
    pub fn parse_list(raw: &str) -> Result<Vec<Self>, String> {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|name| Self::from_header(name).ok_or_else(|| format!("Unknown column '{}'", name)))
            .collect()
    }

    fn value(self, lead: &Lead, users: &[User]) -> String {
        let opt = |v: &Option<String>| v.clone().unwrap_or_default();
        let num = |v: Option<f64>| v.map(|n| n.to_string()).unwrap_or_default();

        match self {
            ExportColumn::Id => lead.id.clone(),
            ExportColumn::FullName => lead.full_name.clone(),
            ExportColumn::Email => lead.email.clone(),
            ExportColumn::Phone => lead.phone.clone(),
            ExportColumn::Country => lead.country.clone(),
            ExportColumn::Qualification => lead.qualification.clone(),
            ExportColumn::Source => lead.source.clone(),
            ExportColumn::CourseInterest => lead.course_interest.clone(),
            ExportColumn::Status => lead.status.clone(),
            ExportColumn::AssignedTo => users
                .iter()
                .find(|u| u.id == lead.assigned_to)
                .map(|u| u.name.clone())
                .unwrap_or_else(|| "Unknown".to_string()),
            ExportColumn::CreatedAt => opt(&lead.created_at),
            ExportColumn::UpdatedAt => opt(&lead.updated_at),
            ExportColumn::FollowUpDate => opt(&lead.follow_up_date),
            ExportColumn::Notes => {
                if lead.notes_list.is_empty() {
                    opt(&lead.notes)
                } else {
                    Note::flatten_all(&lead.notes_list)
                }
            }
            ExportColumn::Fees => num(lead.fees),
            ExportColumn::TotalFees => num(lead.total_fees),
            ExportColumn::FeesCollected => num(lead.fees_collected),
        }
    }
}

pub fn csv_quote(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

fn write_record(out: &mut String, fields: &[String]) {
    let line = fields.iter().map(|f| csv_quote(f)).collect::<Vec<_>>().join(",");
    out.push_str(&line);
    out.push_str("\r\n");
}

/// Serializes leads to CSV: one header row of labels, one row per lead
pub fn export_leads(leads: &[Lead], users: &[User], columns: &[ExportColumn]) -> String {
    let mut out = String::new();
    let header: Vec<String> = columns.iter().map(|c| c.label().to_string()).collect();
    write_record(&mut out, &header);

    for lead in leads {
        let row: Vec<String> = columns.iter().map(|c| c.value(lead, users)).collect();
        write_record(&mut out, &row);
    }
    out
}

/// Parses CSV text into records. Quoted fields may contain commas,
/// doubled quotes and line breaks; blank lines are skipped.
pub fn parse_records(text: &str) -> Vec<Vec<String>> {
    let mut records: Vec<Vec<String>> = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.trim_start_matches('\u{feff}').chars().peekable();

    let mut finish_record = |record: &mut Vec<String>, field: &mut String| {
        record.push(std::mem::take(field));
        let blank = record.iter().all(|f| f.trim().is_empty());
        let taken = std::mem::take(record);
        if !blank {
            records.push(taken);
        }
    };

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(ch);
            }
            continue;
        }

        match ch {
            '"' => in_quotes = true,
            ',' => record.push(std::mem::take(&mut field)),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                finish_record(&mut record, &mut field);
            }
            '\n' => finish_record(&mut record, &mut field),
            _ => field.push(ch),
        }
    }

    if !field.is_empty() || !record.is_empty() {
        finish_record(&mut record, &mut field);
    }

    records
}

/// Header row + data rows as key/value maps
pub fn parse_csv(text: &str) -> Vec<HashMap<String, String>> {
    let mut records = parse_records(text).into_iter();
    let Some(header) = records.next() else {
        return Vec::new();
    };
    let header: Vec<String> = header.into_iter().map(|h| h.trim().to_string()).collect();

    records
        .map(|fields| {
            header
                .iter()
                .cloned()
                .zip(fields.into_iter().chain(std::iter::repeat(String::new())))
                .collect()
        })
        .collect()
}

fn parse_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| *c != ',' && !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

/// Maps one CSV row to a lead creation request.
/// `assignedTo` may hold a user id or a display name (as exported).
/// Free-text fields are kept as written; lookups, dates and numbers are trimmed.
pub fn row_to_lead(row: &HashMap<String, String>, users: &[User]) -> CreateLeadRequest {
    let mut lead = CreateLeadRequest::default();

    for (header, raw) in row {
        let Some(column) = ExportColumn::from_header(header) else {
            continue;
        };
        let text = raw.clone();
        let value = raw.trim().to_string();
        let optional = if value.is_empty() { None } else { Some(value.clone()) };

        match column {
            ExportColumn::Id | ExportColumn::CreatedAt | ExportColumn::UpdatedAt => {}
            ExportColumn::FullName => lead.full_name = text,
            ExportColumn::Email => lead.email = text,
            ExportColumn::Phone => lead.phone = text,
            ExportColumn::Country => lead.country = text,
            ExportColumn::Qualification => lead.qualification = text,
            ExportColumn::Source => lead.source = text,
            ExportColumn::CourseInterest => lead.course_interest = text,
            ExportColumn::Status => lead.status = value,
            ExportColumn::AssignedTo => {
                lead.assigned_to = users
                    .iter()
                    .find(|u| u.id == value || u.name == value)
                    .map(|u| u.id.clone())
                    .unwrap_or(value);
            }
            ExportColumn::FollowUpDate => lead.follow_up_date = optional,
            // Flattened notes stay text; the date/time split is gone
            ExportColumn::Notes => lead.notes = Some(text).filter(|n| !n.trim().is_empty()),
            ExportColumn::Fees => lead.fees = parse_number(&value),
            ExportColumn::TotalFees => lead.total_fees = parse_number(&value),
            ExportColumn::FeesCollected => lead.fees_collected = parse_number(&value),
        }
    }

    lead
}

pub fn rows_to_leads(rows: &[HashMap<String, String>], users: &[User]) -> Vec<CreateLeadRequest> {
    rows.iter().map(|row| row_to_lead(row, users)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn counselor(id: &str, name: &str) -> User {
        User {
            id: id.into(),
            name: name.into(),
            email: String::new(),
            phone: None,
            role: Role::Counselor,
            reports_to: None,
            department: None,
            branch: None,
            preferred_language: None,
            is_active: true,
            created_at: None,
        }
    }

    fn lead_with_notes() -> Lead {
        serde_json::from_value(serde_json::json!({
            "id": "14416",
            "fullName": "Sushree Sangita Mallick, (Repeat Lead)",
            "phone": "07077065864",
            "status": "Followup",
            "assignedTo": "u-1",
            "notesList": [
                { "date": "7/5/2025", "time": "10:00:00", "text": "not answering, details sent on \"whatsapp\"" },
                { "date": "14/5/2025", "time": "16:20:00", "text": "line busy" }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_quote() {
        assert_eq!(csv_quote("plain"), "plain");
        assert_eq!(csv_quote("a,b"), "\"a,b\"");
        assert_eq!(csv_quote("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_quote("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn test_export_resolves_names_and_flattens_notes() {
        let users = vec![counselor("u-1", "Dr. Priya Sharma")];
        let csv = export_leads(
            &[lead_with_notes()],
            &users,
            &[ExportColumn::FullName, ExportColumn::AssignedTo, ExportColumn::Notes],
        );

        let records = parse_records(&csv);
        assert_eq!(records[0], vec!["Name", "Assigned To", "Notes"]);
        assert_eq!(records[1][0], "Sushree Sangita Mallick, (Repeat Lead)");
        assert_eq!(records[1][1], "Dr. Priya Sharma");
        assert_eq!(
            records[1][2],
            "7/5/2025 / 10:00:00   not answering, details sent on \"whatsapp\"\n\n14/5/2025 / 16:20:00   line busy"
        );
    }

    #[test]
    fn test_unknown_assignee_exports_unknown() {
        let csv = export_leads(&[lead_with_notes()], &[], &[ExportColumn::AssignedTo]);
        assert_eq!(parse_records(&csv)[1], vec!["Unknown"]);
    }

    #[test]
    fn test_round_trip_keeps_name_phone_and_flattened_notes() {
        let users = vec![counselor("u-1", "Dr. Priya Sharma")];
        let original = lead_with_notes();
        let csv = export_leads(
            &[original.clone()],
            &users,
            &[ExportColumn::FullName, ExportColumn::Phone, ExportColumn::AssignedTo, ExportColumn::Notes],
        );

        let imported = rows_to_leads(&parse_csv(&csv), &users);
        assert_eq!(imported.len(), 1);
        assert_eq!(imported[0].full_name, original.full_name);
        assert_eq!(imported[0].phone, original.phone);
        assert_eq!(imported[0].assigned_to, "u-1");
        assert_eq!(imported[0].notes.as_deref(), Some(Note::flatten_all(&original.notes_list).as_str()));
        assert!(imported[0].notes_list.is_empty());
    }

    #[test]
    fn test_round_trip_keeps_edge_whitespace() {
        let mut padded = lead_with_notes();
        padded.full_name = " Asha ".into();
        padded.phone = "900 ".into();
        let csv = export_leads(&[padded], &[], &[ExportColumn::FullName, ExportColumn::Phone]);
        assert_eq!(csv, "Name,Phone\r\n Asha ,900 \r\n");

        let imported = rows_to_leads(&parse_csv(&csv), &[]);
        assert_eq!(imported[0].full_name, " Asha ");
        assert_eq!(imported[0].phone, "900 ");
    }

    #[test]
    fn test_parse_csv_with_field_keys_and_blank_lines() {
        let text = "fullName,phone,status,totalFees,extra\r\n\r\nAsha,+91 90000,Admission done,\"1,80,000\",x\nRavi,123\n";
        let rows = parse_csv(text);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1]["status"], "");

        let leads = rows_to_leads(&rows, &[]);
        assert_eq!(leads[0].full_name, "Asha");
        assert_eq!(leads[0].total_fees, Some(180000.0));
        assert_eq!(leads[1].phone, "123");
        assert_eq!(leads[1].total_fees, None);
    }

    #[test]
    fn test_parse_columns() {
        let cols = ExportColumn::parse_list("fullName, Phone ,Assigned To").unwrap();
        assert_eq!(cols, vec![ExportColumn::FullName, ExportColumn::Phone, ExportColumn::AssignedTo]);
        assert!(ExportColumn::parse_list("fullName,bogus").is_err());
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_csv("").is_empty());
        assert!(parse_csv("fullName,phone\n").is_empty());
    }
}
