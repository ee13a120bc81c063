use crate::models::{Course, Hospital};
use crate::seeds::hospitals::hospital_directory;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CourseQuery {
    pub search: Option<String>,
    /// Exact category ("Fellowship", "PG Diploma", ...); "All" is ignored
    pub category: Option<String>,
    pub active_only: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HospitalQuery {
    pub search: Option<String>,
    pub state: Option<String>,
}

fn term(raw: &Option<String>) -> Option<String> {
    raw.as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty() && *t != "All")
        .map(str::to_string)
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

pub fn filter_courses(courses: &[Course], query: &CourseQuery) -> Vec<Course> {
    let search = term(&query.search).map(|s| s.to_lowercase());
    let category = term(&query.category);

    courses
        .iter()
        .filter(|c| !query.active_only || c.is_active)
        .filter(|c| category.as_deref().map_or(true, |cat| c.category == cat))
        .filter(|c| {
            search.as_deref().map_or(true, |s| {
                contains_ci(&c.name, s) || contains_ci(&c.category, s) || contains_ci(&c.description, s)
            })
        })
        .cloned()
        .collect()
}

/// Distinct categories in catalog order
pub fn course_categories(courses: &[Course]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for course in courses {
        if !course.category.is_empty() && !categories.contains(&course.category) {
            categories.push(course.category.clone());
        }
    }
    categories
}

pub fn filter_hospitals(query: &HospitalQuery) -> Vec<Hospital> {
    let search = term(&query.search).map(|s| s.to_lowercase());
    let state = term(&query.state);

    hospital_directory()
        .into_iter()
        .filter(|h| state.as_deref().map_or(true, |st| h.state == st))
        .filter(|h| search.as_deref().map_or(true, |s| contains_ci(&h.name, s) || contains_ci(&h.city, s)))
        .collect()
}

pub fn hospital_states() -> Vec<String> {
    let mut states: Vec<String> = Vec::new();
    for hospital in hospital_directory() {
        if !states.contains(&hospital.state) {
            states.push(hospital.state);
        }
    }
    states
}
