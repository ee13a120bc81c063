use crate::models::{Lead, User};
use std::collections::{HashMap, HashSet};

/// Collects every user whose reports-to chain ends at `user_id`.
///
/// Depth-first over the `reportsTo` back-references. A visited set keeps
/// the walk finite on malformed (cyclic) data: each user is expanded at
/// most once, and the root never counts as its own subordinate.
pub fn subordinate_ids(user_id: &str, users: &[User]) -> HashSet<String> {
    let mut children: HashMap<&str, Vec<&str>> = HashMap::new();
    for user in users {
        if let Some(parent) = user.reports_to.as_deref() {
            children.entry(parent).or_default().push(user.id.as_str());
        }
    }

    let mut visited: HashSet<String> = HashSet::new();
    let mut stack: Vec<&str> = vec![user_id];

    while let Some(current) = stack.pop() {
        let Some(reports) = children.get(current) else {
            continue;
        };
        for report in reports {
            if *report == user_id {
                log::warn!("⚠️  Cyclic reportsTo chain: {} reports back to {}", current, user_id);
                continue;
            }
            if visited.insert(report.to_string()) {
                stack.push(report);
            }
        }
    }

    visited
}

/// Ids whose leads `current_user` may see; `None` means unrestricted.
pub fn allowed_assignees(current_user: &User, users: &[User]) -> Option<HashSet<String>> {
    if current_user.role.sees_all_leads() {
        return None;
    }
    let mut allowed = subordinate_ids(&current_user.id, users);
    allowed.insert(current_user.id.clone());
    Some(allowed)
}

pub fn can_see_lead(current_user: &User, users: &[User], lead: &Lead) -> bool {
    match allowed_assignees(current_user, users) {
        None => true,
        Some(allowed) => allowed.contains(&lead.assigned_to),
    }
}

/// Leads assigned to the user or anyone below them.
/// Senior managers and managers see everything.
pub fn visible_leads(current_user: &User, users: &[User], leads: &[Lead]) -> Vec<Lead> {
    match allowed_assignees(current_user, users) {
        None => leads.to_vec(),
        Some(allowed) => leads
            .iter()
            .filter(|lead| allowed.contains(&lead.assigned_to))
            .cloned()
            .collect(),
    }
}

/// Users the current user may hand leads to: roles strictly below theirs,
/// limited to their own team unless they see every lead. The caller may
/// always assign to themselves, so they are not listed.
pub fn assignable_users(current_user: &User, users: &[User]) -> Vec<User> {
    let roles = current_user.role.assignable_roles();
    let team = allowed_assignees(current_user, users);
    users
        .iter()
        .filter(|u| roles.contains(&u.role))
        .filter(|u| team.as_ref().map_or(true, |ids| ids.contains(&u.id)))
        .cloned()
        .collect()
}

/// "Reports to: {manager} ({role label})" for the user a lead is assigned to
pub fn reports_to_display(assigned_to: &str, users: &[User]) -> Option<String> {
    let user = users.iter().find(|u| u.id == assigned_to)?;
    let manager_id = user.reports_to.as_deref()?;
    let manager = users.iter().find(|u| u.id == manager_id)?;
    Some(format!("Reports to: {} ({})", manager.name, manager.role.label()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn user(id: &str, role: Role, reports_to: Option<&str>) -> User {
        User {
            id: id.to_string(),
            name: format!("User {}", id),
            email: format!("{}@dmhca.edu", id),
            phone: None,
            role,
            reports_to: reports_to.map(|s| s.to_string()),
            department: None,
            branch: None,
            preferred_language: None,
            is_active: true,
            created_at: None,
        }
    }

    fn lead(id: &str, assigned_to: &str) -> Lead {
        serde_json::from_value(serde_json::json!({ "id": id, "assignedTo": assigned_to })).unwrap()
    }

    fn roster() -> Vec<User> {
        vec![
            user("sm", Role::SeniorManager, None),
            user("m", Role::Manager, Some("sm")),
            user("fm", Role::FloorManager, Some("m")),
            user("tl-b", Role::TeamLeader, Some("fm")),
            user("c-a", Role::Counselor, Some("tl-b")),
            user("c-c", Role::Counselor, Some("tl-x")),
            user("tl-x", Role::TeamLeader, Some("fm")),
        ]
    }

    fn ids(leads: &[Lead]) -> Vec<&str> {
        leads.iter().map(|l| l.id.as_str()).collect()
    }

    #[test]
    fn test_team_leader_sees_reports_not_unrelated() {
        let users = roster();
        let leads = vec![lead("l1", "c-a"), lead("l2", "c-c"), lead("l3", "tl-b")];

        let team_leader = &users[3];
        assert_eq!(ids(&visible_leads(team_leader, &users, &leads)), vec!["l1", "l3"]);

        let counselor_c = &users[5];
        assert_eq!(ids(&visible_leads(counselor_c, &users, &leads)), vec!["l2"]);
    }

    #[test]
    fn test_transitive_subordinates() {
        let users = roster();
        let subs = subordinate_ids("fm", &users);
        let expected: HashSet<String> = ["tl-b", "c-a", "tl-x", "c-c"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(subs, expected);
        assert!(subordinate_ids("c-a", &users).is_empty());
    }

    #[test]
    fn test_managers_see_everything() {
        let users = roster();
        let leads = vec![lead("l1", "c-a"), lead("l2", "nobody")];
        assert_eq!(visible_leads(&users[0], &users, &leads).len(), 2);
        assert_eq!(visible_leads(&users[1], &users, &leads).len(), 2);
    }

    #[test]
    fn test_visible_set_is_exactly_self_plus_subordinates() {
        let users = roster();
        let leads: Vec<Lead> = users
            .iter()
            .map(|u| lead(&format!("lead-{}", u.id), &u.id))
            .collect();

        for viewer in users.iter().filter(|u| !u.role.sees_all_leads()) {
            let mut allowed = subordinate_ids(&viewer.id, &users);
            allowed.insert(viewer.id.clone());

            let visible = visible_leads(viewer, &users, &leads);
            assert_eq!(visible.len(), allowed.len());
            assert!(visible.iter().all(|l| allowed.contains(&l.assigned_to)));
        }
    }

    #[test]
    fn test_cycle_terminates() {
        let users = vec![
            user("a", Role::TeamLeader, Some("c")),
            user("b", Role::Counselor, Some("a")),
            user("c", Role::Counselor, Some("b")),
        ];
        let subs = subordinate_ids("a", &users);
        assert_eq!(subs.len(), 2);
        assert!(subs.contains("b") && subs.contains("c"));
        assert!(!subs.contains("a"));

        let self_loop = vec![user("s", Role::Counselor, Some("s"))];
        assert!(subordinate_ids("s", &self_loop).is_empty());
    }

    #[test]
    fn test_assignable_users_and_hierarchy_display() {
        let users = roster();
        let assignable = assignable_users(&users[2], &users);
        let names: Vec<&str> = assignable.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(names, vec!["tl-b", "c-a", "c-c", "tl-x"]);

        assert_eq!(
            reports_to_display("c-a", &users).as_deref(),
            Some("Reports to: User tl-b (Team Leader)")
        );
        assert_eq!(reports_to_display("sm", &users), None);
        assert_eq!(reports_to_display("ghost", &users), None);
    }

    #[test]
    fn test_assignable_users_stay_inside_the_team() {
        let mut users = roster();
        users.push(user("fm2", Role::FloorManager, Some("m")));
        users.push(user("tl-2", Role::TeamLeader, Some("fm2")));
        users.push(user("c-2", Role::Counselor, Some("tl-2")));

        let ids = |viewer: &User| -> Vec<String> {
            assignable_users(viewer, &users).into_iter().map(|u| u.id).collect()
        };
        assert_eq!(ids(&users[7]), vec!["tl-2", "c-2"]);
        assert_eq!(ids(&users[3]), vec!["c-a"]);
        assert!(ids(&users[1]).contains(&"c-2".to_string()));
        assert!(ids(&users[4]).is_empty());
    }

    #[test]
    fn test_can_see_lead() {
        let users = roster();
        assert!(can_see_lead(&users[3], &users, &lead("l", "c-a")));
        assert!(!can_see_lead(&users[3], &users, &lead("l", "c-c")));
    }
}
