use serde::{Deserialize, Serialize};

/// Partner hospital shown in the directory and on the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Hospital {
    pub id: u32,
    pub name: String,
    pub city: String,
    pub state: String,
    pub lat: f64,
    pub lng: f64,
    pub departments: Vec<String>,
}
