use serde::{Deserialize, Serialize};
use std::fmt;

/// Staff role. Declaration order is the hierarchy, top first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SeniorManager,
    Manager,
    FloorManager,
    TeamLeader,
    Counselor,
    #[serde(other)]
    Unknown,
}

impl Role {
    pub const HIERARCHY: [Role; 5] = [
        Role::SeniorManager,
        Role::Manager,
        Role::FloorManager,
        Role::TeamLeader,
        Role::Counselor,
    ];

    /// Position in the hierarchy (0 = top). `None` for unknown roles.
    pub fn rank(self) -> Option<usize> {
        Self::HIERARCHY.iter().position(|r| *r == self)
    }

    /// Top two roles bypass the reports-to scoping.
    pub fn sees_all_leads(self) -> bool {
        matches!(self, Role::SeniorManager | Role::Manager)
    }

    /// Roles this role may assign leads to (strictly below it).
    pub fn assignable_roles(self) -> &'static [Role] {
        match self.rank() {
            Some(idx) => &Self::HIERARCHY[idx + 1..],
            None => &[],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::SeniorManager => "Senior Manager",
            Role::Manager => "Manager",
            Role::FloorManager => "Floor Manager",
            Role::TeamLeader => "Team Leader",
            Role::Counselor => "Counselor",
            Role::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self {
            Role::SeniorManager => "senior_manager",
            Role::Manager => "manager",
            Role::FloorManager => "floor_manager",
            Role::TeamLeader => "team_leader",
            Role::Counselor => "counselor",
            Role::Unknown => "unknown",
        };
        write!(f, "{}", key)
    }
}

fn default_active() -> bool {
    true
}

/// Dashboard user (staff member)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[schema(value_type = String, example = "counselor")]
    pub role: Role,
    /// Parent in the manager tree
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reports_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_language: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[schema(value_type = String, example = "counselor")]
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reports_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_language: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reports_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_order_matches_hierarchy() {
        assert!(Role::SeniorManager < Role::Manager);
        assert!(Role::TeamLeader < Role::Counselor);
        assert_eq!(Role::FloorManager.rank(), Some(2));
        assert_eq!(Role::Unknown.rank(), None);
    }

    #[test]
    fn test_assignable_roles() {
        assert_eq!(
            Role::FloorManager.assignable_roles(),
            &[Role::TeamLeader, Role::Counselor]
        );
        assert!(Role::Counselor.assignable_roles().is_empty());
        assert!(Role::Unknown.assignable_roles().is_empty());
    }

    #[test]
    fn test_unknown_role_string() {
        let user: User = serde_json::from_str(
            r#"{"id":"9","name":"Intern","role":"intern"}"#,
        )
        .unwrap();
        assert_eq!(user.role, Role::Unknown);
        assert!(user.is_active);
        assert!(!user.role.sees_all_leads());
    }

    #[test]
    fn test_role_wire_format() {
        let json = serde_json::to_string(&Role::TeamLeader).unwrap();
        assert_eq!(json, "\"team_leader\"");
        assert_eq!(Role::TeamLeader.to_string(), "team_leader");
        assert_eq!(Role::TeamLeader.label(), "Team Leader");
    }
}
