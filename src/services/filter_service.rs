use crate::models::{Lead, LEAD_STATUSES};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Separator for multi-select values passed in a query string.
/// Commas appear inside real statuses ("Interested, Detail Sent").
pub const MULTI_VALUE_SEPARATOR: char = '|';

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateMode {
    #[default]
    On,
    Before,
    After,
    Between,
}

/// Which lead timestamp the date predicate looks at
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DateField {
    #[default]
    UpdatedAt,
    FollowUpDate,
    CreatedAt,
}

/// Quick status views from the leads page toolbar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadView {
    #[default]
    All,
    Hot,
    Warm,
    Followup,
}

impl LeadView {
    fn keyword(self) -> Option<&'static str> {
        match self {
            LeadView::All => None,
            LeadView::Hot => Some("hot"),
            LeadView::Warm => Some("warm"),
            LeadView::Followup => Some("follow"),
        }
    }
}

/// Every criterion of the lead list. Unset criteria do not restrict.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeadFilter {
    #[serde(deserialize_with = "de::blank_as_none")]
    pub search: Option<String>,

    /// Single-select dropdowns; "All" means no restriction
    #[serde(deserialize_with = "de::blank_as_none")]
    pub status: Option<String>,
    #[serde(deserialize_with = "de::blank_as_none")]
    pub counselor: Option<String>,

    #[serde(deserialize_with = "de::multi_value")]
    pub statuses: Vec<String>,
    #[serde(deserialize_with = "de::multi_value")]
    pub counselors: Vec<String>,
    #[serde(deserialize_with = "de::multi_value")]
    pub countries: Vec<String>,
    #[serde(deserialize_with = "de::multi_value")]
    pub sources: Vec<String>,
    #[serde(deserialize_with = "de::multi_value")]
    pub qualifications: Vec<String>,

    pub view: LeadView,

    /// Day prefix ("2025-06-12") of createdAt / updatedAt
    #[serde(deserialize_with = "de::blank_as_none")]
    pub created_on: Option<String>,
    #[serde(deserialize_with = "de::blank_as_none")]
    pub updated_on: Option<String>,

    pub date_mode: DateMode,
    pub date_field: DateField,
    #[serde(deserialize_with = "de::blank_as_none_date")]
    pub date: Option<NaiveDate>,
    #[serde(deserialize_with = "de::blank_as_none_date")]
    pub date_end: Option<NaiveDate>,
}

fn is_all(value: &Option<String>) -> bool {
    match value {
        None => true,
        Some(v) => v.is_empty() || v == "All",
    }
}

fn in_set(set: &[String], value: &str) -> bool {
    set.is_empty() || set.iter().any(|s| s == value)
}

/// `YYYY-MM-DD` prefix of a backend timestamp ("2025-06-16T10:30")
pub fn leading_date(raw: &str) -> Option<NaiveDate> {
    let day = raw.get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

impl LeadFilter {
    /// Same criteria, date predicate switched to the follow-up date
    pub fn on_follow_up_date(mut self) -> Self {
        self.date_field = DateField::FollowUpDate;
        self
    }

    pub fn matches(&self, lead: &Lead) -> bool {
        self.matches_search(lead)
            && self.matches_dropdowns(lead)
            && self.matches_multi_selects(lead)
            && self.matches_view(lead)
            && self.matches_day_prefixes(lead)
            && self.matches_date(lead)
    }

    pub fn apply(&self, leads: &[Lead]) -> Vec<Lead> {
        leads.iter().filter(|l| self.matches(l)).cloned().collect()
    }

    fn matches_search(&self, lead: &Lead) -> bool {
        let term = match &self.search {
            Some(t) if !t.trim().is_empty() => t.trim().to_lowercase(),
            _ => return true,
        };

        [
            &lead.full_name,
            &lead.email,
            &lead.phone,
            &lead.course_interest,
            &lead.country,
            &lead.status,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&term))
    }

    fn matches_dropdowns(&self, lead: &Lead) -> bool {
        let status_ok = is_all(&self.status) || self.status.as_deref() == Some(lead.status.as_str());
        let counselor_ok =
            is_all(&self.counselor) || self.counselor.as_deref() == Some(lead.assigned_to.as_str());
        status_ok && counselor_ok
    }

    fn matches_multi_selects(&self, lead: &Lead) -> bool {
        in_set(&self.statuses, &lead.status)
            && in_set(&self.counselors, &lead.assigned_to)
            && in_set(&self.countries, &lead.country)
            && in_set(&self.sources, &lead.source)
            && in_set(&self.qualifications, &lead.qualification)
    }

    fn matches_view(&self, lead: &Lead) -> bool {
        match self.view.keyword() {
            Some(keyword) => lead.status_contains(keyword),
            None => true,
        }
    }

    fn matches_day_prefixes(&self, lead: &Lead) -> bool {
        let prefix_ok = |wanted: &Option<String>, actual: &Option<String>| match wanted {
            None => true,
            Some(day) => actual.as_deref().map_or(false, |a| a.starts_with(day.as_str())),
        };
        prefix_ok(&self.created_on, &lead.created_at) && prefix_ok(&self.updated_on, &lead.updated_at)
    }

    fn comparison_date(&self, lead: &Lead) -> Option<NaiveDate> {
        let raw = match self.date_field {
            DateField::UpdatedAt => lead.updated_at.as_deref(),
            DateField::FollowUpDate => lead.follow_up_date.as_deref(),
            DateField::CreatedAt => lead.created_at.as_deref(),
        };
        raw.and_then(leading_date)
    }

    /// True when the date criterion has everything its mode needs
    pub fn date_active(&self) -> bool {
        match self.date_mode {
            DateMode::Between => self.date.is_some() && self.date_end.is_some(),
            _ => self.date.is_some(),
        }
    }

    fn matches_date(&self, lead: &Lead) -> bool {
        if !self.date_active() {
            return true;
        }
        let Some(lead_date) = self.comparison_date(lead) else {
            return false;
        };

        match (self.date_mode, self.date, self.date_end) {
            (DateMode::On, Some(day), _) => lead_date == day,
            (DateMode::Before, Some(day), _) => lead_date < day,
            (DateMode::After, Some(day), _) => lead_date > day,
            (DateMode::Between, Some(start), Some(end)) => lead_date >= start && lead_date <= end,
            _ => true,
        }
    }
}

/// Distinct values for the filter dropdowns
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct FilterOptions {
    pub statuses: Vec<String>,
    pub countries: Vec<String>,
    pub sources: Vec<String>,
    pub qualifications: Vec<String>,
}

fn distinct<'a, I: Iterator<Item = &'a String>>(values: I) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for value in values {
        if !value.is_empty() && !out.contains(value) {
            out.push(value.clone());
        }
    }
    out
}

impl FilterOptions {
    pub fn from_leads(leads: &[Lead]) -> Self {
        Self {
            statuses: LEAD_STATUSES.iter().map(|s| s.to_string()).collect(),
            countries: distinct(leads.iter().map(|l| &l.country)),
            sources: distinct(leads.iter().map(|l| &l.source)),
            qualifications: distinct(leads.iter().map(|l| &l.qualification)),
        }
    }
}

mod de {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    pub fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value: Option<String> = Option::deserialize(deserializer)?;
        Ok(value.filter(|v| !v.trim().is_empty()))
    }

    pub fn blank_as_none_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match blank_as_none(deserializer)? {
            None => Ok(None),
            Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                .map(Some)
                .map_err(|e| serde::de::Error::custom(format!("invalid date '{}': {}", raw, e))),
        }
    }

    /// Accepts a JSON array or a `|`-separated query-string value
    pub fn multi_value<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let values = match Option::<OneOrMany>::deserialize(deserializer)? {
            None => Vec::new(),
            Some(OneOrMany::Many(values)) => values,
            Some(OneOrMany::One(raw)) => raw
                .split(MULTI_VALUE_SEPARATOR)
                .map(|s| s.to_string())
                .collect(),
        };
        Ok(values
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect())
    }
}
