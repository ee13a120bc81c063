use crate::models::{Lead, User};
use crate::services::filter_service::leading_date;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub total_leads: usize,
    pub hot: usize,
    pub warm: usize,
    pub follow_up: usize,
    pub admissions: usize,
    /// Admissions as a percentage of all leads, one decimal
    pub conversion_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeeSummary {
    pub total_fees: f64,
    pub fees_collected: f64,
    pub outstanding: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct CountEntry {
    pub key: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct MonthlyEntry {
    /// YYYY-MM
    pub month: String,
    pub leads: usize,
    pub admissions: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum PipelineStage {
    Fresh,
    Hot,
    Warm,
    FollowUp,
    Converted,
    Lost,
}

impl PipelineStage {
    pub const ALL: [PipelineStage; 6] = [
        PipelineStage::Fresh,
        PipelineStage::Hot,
        PipelineStage::Warm,
        PipelineStage::FollowUp,
        PipelineStage::Converted,
        PipelineStage::Lost,
    ];

    pub fn title(self) -> &'static str {
        match self {
            PipelineStage::Fresh => "Fresh",
            PipelineStage::Hot => "Hot",
            PipelineStage::Warm => "Warm",
            PipelineStage::FollowUp => "Follow-up",
            PipelineStage::Converted => "Converted",
            PipelineStage::Lost => "Lost",
        }
    }

    /// Column for a free-text status. First match wins.
    pub fn classify(lead: &Lead) -> PipelineStage {
        const LOST: &[&str] = &["junk", "not interested", "not eligible", "not valid", "drop out"];

        if lead.is_admission() {
            PipelineStage::Converted
        } else if LOST.iter().any(|k| lead.status_contains(k)) {
            PipelineStage::Lost
        } else if lead.status_contains("hot") {
            PipelineStage::Hot
        } else if lead.status_contains("warm") {
            PipelineStage::Warm
        } else if lead.status_contains("follow") {
            PipelineStage::FollowUp
        } else {
            PipelineStage::Fresh
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PipelineCard {
    pub id: String,
    pub full_name: String,
    pub status: String,
    pub assigned_to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_up_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct PipelineColumn {
    pub stage: PipelineStage,
    pub title: String,
    pub count: usize,
    pub leads: Vec<PipelineCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub totals: Totals,
    pub fees: FeeSummary,
    pub by_status: Vec<CountEntry>,
    pub by_counselor: Vec<CountEntry>,
    pub by_source: Vec<CountEntry>,
    pub by_country: Vec<CountEntry>,
    pub monthly: Vec<MonthlyEntry>,
    pub pipeline: Vec<PipelineColumn>,
}

fn or_unknown(value: &str) -> String {
    if value.trim().is_empty() {
        UNKNOWN.to_string()
    } else {
        value.to_string()
    }
}

/// Count per key, largest first, ties by key
fn breakdown<I: Iterator<Item = String>>(keys: I) -> Vec<CountEntry> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for key in keys {
        *counts.entry(key).or_default() += 1;
    }
    let mut entries: Vec<CountEntry> = counts
        .into_iter()
        .map(|(key, count)| CountEntry { key, count })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));
    entries
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn totals(leads: &[Lead]) -> Totals {
    let count = |keyword: &str| leads.iter().filter(|l| l.status_contains(keyword)).count();
    let admissions = leads.iter().filter(|l| l.is_admission()).count();
    let conversion_rate = if leads.is_empty() {
        0.0
    } else {
        round1(admissions as f64 * 100.0 / leads.len() as f64)
    };

    Totals {
        total_leads: leads.len(),
        hot: count("hot"),
        warm: count("warm"),
        follow_up: count("follow"),
        admissions,
        conversion_rate,
    }
}

pub fn fee_summary(leads: &[Lead]) -> FeeSummary {
    let (total_fees, fees_collected) = leads
        .iter()
        .filter(|l| l.is_admission())
        .fold((0.0, 0.0), |(total, collected), l| {
            (total + l.total_fees.unwrap_or(0.0), collected + l.fees_collected.unwrap_or(0.0))
        });

    FeeSummary {
        total_fees,
        fees_collected,
        outstanding: total_fees - fees_collected,
    }
}

pub fn monthly_series(leads: &[Lead]) -> Vec<MonthlyEntry> {
    let mut months: BTreeMap<String, (usize, usize)> = BTreeMap::new();
    for lead in leads {
        let Some(day) = lead.created_at.as_deref().and_then(leading_date) else {
            continue;
        };
        let entry = months.entry(day.format("%Y-%m").to_string()).or_default();
        entry.0 += 1;
        if lead.is_admission() {
            entry.1 += 1;
        }
    }

    months
        .into_iter()
        .map(|(month, (leads, admissions))| MonthlyEntry { month, leads, admissions })
        .collect()
}

pub fn pipeline(leads: &[Lead]) -> Vec<PipelineColumn> {
    PipelineStage::ALL
        .iter()
        .map(|stage| {
            let cards: Vec<PipelineCard> = leads
                .iter()
                .filter(|l| PipelineStage::classify(l) == *stage)
                .map(|l| PipelineCard {
                    id: l.id.clone(),
                    full_name: l.full_name.clone(),
                    status: l.status.clone(),
                    assigned_to: l.assigned_to.clone(),
                    follow_up_date: l.follow_up_date.clone(),
                })
                .collect();
            PipelineColumn {
                stage: *stage,
                title: stage.title().to_string(),
                count: cards.len(),
                leads: cards,
            }
        })
        .collect()
}

/// Stats over the leads the caller can see
pub fn dashboard_stats(leads: &[Lead], users: &[User]) -> DashboardStats {
    let counselor_name = |id: &str| {
        users
            .iter()
            .find(|u| u.id == id)
            .map(|u| u.name.clone())
            .unwrap_or_else(|| or_unknown(id))
    };

    DashboardStats {
        totals: totals(leads),
        fees: fee_summary(leads),
        by_status: breakdown(leads.iter().map(|l| or_unknown(&l.status))),
        by_counselor: breakdown(leads.iter().map(|l| counselor_name(&l.assigned_to))),
        by_source: breakdown(leads.iter().map(|l| or_unknown(&l.source))),
        by_country: breakdown(leads.iter().map(|l| or_unknown(&l.country))),
        monthly: monthly_series(leads),
        pipeline: pipeline(leads),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn lead(id: &str, status: &str, created_at: &str, country: &str) -> Lead {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "status": status,
            "createdAt": created_at,
            "country": country,
            "assignedTo": "c1"
        }))
        .unwrap()
    }

    fn admission(id: &str, total: f64, collected: f64) -> Lead {
        let mut l = lead(id, "Admission done", "2025-06-02T09:00", "IN");
        l.total_fees = Some(total);
        l.fees_collected = Some(collected);
        l
    }

    fn sample() -> Vec<Lead> {
        vec![
            lead("1", "Hot Lead", "2025-05-10T10:00", "IN"),
            lead("2", "Warm", "2025-05-11T10:00", "AE"),
            lead("3", "Followup", "2025-06-01T10:00", "IN"),
            lead("4", "Junk", "bad-date", ""),
            lead("5", "", "2025-06-03T10:00", "IN"),
            admission("6", 450000.0, 150000.0),
        ]
    }

    #[test]
    fn test_totals_and_conversion() {
        let t = totals(&sample());
        assert_eq!(t.total_leads, 6);
        assert_eq!((t.hot, t.warm, t.follow_up, t.admissions), (1, 1, 1, 1));
        assert_eq!(t.conversion_rate, 16.7);
        assert_eq!(totals(&[]).conversion_rate, 0.0);
    }

    #[test]
    fn test_fee_summary_counts_admissions_only() {
        let mut leads = sample();
        let mut stray = lead("7", "Hot Lead", "2025-06-04T10:00", "IN");
        stray.total_fees = Some(99.0);
        leads.push(stray);
        leads.push(admission("8", 100000.0, 100000.0));

        let fees = fee_summary(&leads);
        assert_eq!(fees.total_fees, 550000.0);
        assert_eq!(fees.fees_collected, 250000.0);
        assert_eq!(fees.outstanding, 300000.0);
    }

    #[test]
    fn test_breakdown_order() {
        let by_country = breakdown(sample().iter().map(|l| or_unknown(&l.country)));
        let keys: Vec<&str> = by_country.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["IN", "AE", "Unknown"]);
        assert_eq!(by_country[0].count, 4);
    }

    #[test]
    fn test_monthly_series_skips_bad_dates() {
        let monthly = monthly_series(&sample());
        assert_eq!(
            monthly,
            vec![
                MonthlyEntry { month: "2025-05".into(), leads: 2, admissions: 0 },
                MonthlyEntry { month: "2025-06".into(), leads: 3, admissions: 1 },
            ]
        );
    }

    #[test]
    fn test_pipeline_columns() {
        let columns = pipeline(&sample());
        let counts: Vec<(PipelineStage, usize)> = columns.iter().map(|c| (c.stage, c.count)).collect();
        assert_eq!(
            counts,
            vec![
                (PipelineStage::Fresh, 1),
                (PipelineStage::Hot, 1),
                (PipelineStage::Warm, 1),
                (PipelineStage::FollowUp, 1),
                (PipelineStage::Converted, 1),
                (PipelineStage::Lost, 1),
            ]
        );
        assert_eq!(columns[3].title, "Follow-up");

        let dropped = lead("9", "Hot-Drop out", "", "");
        assert_eq!(PipelineStage::classify(&dropped), PipelineStage::Lost);
    }

    #[test]
    fn test_counselor_names_resolved() {
        let users = vec![User {
            id: "c1".into(),
            name: "Dr. Priya Sharma".into(),
            email: String::new(),
            phone: None,
            role: Role::Counselor,
            reports_to: None,
            department: None,
            branch: None,
            preferred_language: None,
            is_active: true,
            created_at: None,
        }];
        let stats = dashboard_stats(&sample(), &users);
        assert_eq!(stats.by_counselor, vec![CountEntry { key: "Dr. Priya Sharma".into(), count: 6 }]);
    }
}
