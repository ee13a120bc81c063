use serde::{Deserialize, Serialize};

/// Course in the admissions catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    /// Price in INR
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub eligibility: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_active: bool,
}
