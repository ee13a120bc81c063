// Saved lead-filter presets, kept per user in process memory
use crate::services::filter_service::LeadFilter;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SavedFilter {
    pub name: String,
    #[schema(value_type = Object)]
    pub config: LeadFilter,
    pub saved_at: i64,
}

lazy_static::lazy_static! {
    static ref SAVED_FILTERS: RwLock<HashMap<String, Vec<SavedFilter>>> = RwLock::new(HashMap::new());
}

pub fn list_saved_filters(user_id: &str) -> Vec<SavedFilter> {
    SAVED_FILTERS
        .read()
        .ok()
        .and_then(|filters| filters.get(user_id).cloned())
        .unwrap_or_default()
}

pub fn get_saved_filter(user_id: &str, name: &str) -> Option<SavedFilter> {
    SAVED_FILTERS
        .read()
        .ok()?
        .get(user_id)?
        .iter()
        .find(|f| f.name == name)
        .cloned()
}

/// Stores a preset; an existing preset with the same name is replaced.
pub fn save_filter(user_id: &str, name: &str, config: LeadFilter) -> Option<SavedFilter> {
    let saved = SavedFilter {
        name: name.to_string(),
        config,
        saved_at: chrono::Utc::now().timestamp(),
    };

    let mut filters = SAVED_FILTERS.write().ok()?;
    let entries = filters.entry(user_id.to_string()).or_default();
    entries.retain(|f| f.name != name);
    entries.push(saved.clone());
    Some(saved)
}

pub fn delete_saved_filter(user_id: &str, name: &str) -> bool {
    if let Ok(mut filters) = SAVED_FILTERS.write() {
        if let Some(entries) = filters.get_mut(user_id) {
            let before = entries.len();
            entries.retain(|f| f.name != name);
            return entries.len() < before;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_replace_and_delete() {
        let user = "cache-test-user";
        let hot = LeadFilter { search: Some("hot".into()), ..Default::default() };
        save_filter(user, "Hot in UAE", hot.clone()).unwrap();

        let replaced = LeadFilter { search: Some("warm".into()), ..Default::default() };
        save_filter(user, "Hot in UAE", replaced.clone()).unwrap();

        let all = list_saved_filters(user);
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].config, replaced);
        assert_eq!(get_saved_filter(user, "Hot in UAE").unwrap().config, replaced);

        assert!(delete_saved_filter(user, "Hot in UAE"));
        assert!(!delete_saved_filter(user, "Hot in UAE"));
        assert!(list_saved_filters(user).is_empty());
    }
}
