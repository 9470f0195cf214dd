//! Staff account entity

use serde::{Deserialize, Serialize};

use crate::auth::RoleId;
use crate::sync::SyncRecord;

/// Fallback shown when an account carries no usable name.
pub const UNNAMED_USER: &str = "Usuario";

/// Staff account from the auth service. `status` is the active flag;
/// deactivated accounts stay listed with an inactive badge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(rename = "firstName", default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub roles: Vec<RoleId>,
    #[serde(default = "default_status")]
    pub status: bool,
}

fn default_status() -> bool {
    true
}

impl Employee {
    /// First name when present, else the username, else a placeholder.
    pub fn display_name(&self) -> &str {
        if let Some(first) = self.first_name.as_deref() {
            if !first.is_empty() {
                return first;
            }
        }
        if self.username.is_empty() {
            UNNAMED_USER
        } else {
            &self.username
        }
    }
}

impl SyncRecord for Employee {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn deactivate(&mut self) {
        self.status = false;
    }

    fn is_active(&self) -> bool {
        self.status
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn display_name_prefers_first_name_then_username() {
        let full: Employee = serde_json::from_value(json!({
            "_id": "u1",
            "username": "mgarcia",
            "firstName": "María",
        }))
        .unwrap();
        assert_eq!(full.display_name(), "María");

        let username_only: Employee =
            serde_json::from_value(json!({ "_id": "u2", "username": "jlopez" })).unwrap();
        assert_eq!(username_only.display_name(), "jlopez");

        let nameless: Employee = serde_json::from_value(json!({ "_id": "u3" })).unwrap();
        assert_eq!(nameless.display_name(), UNNAMED_USER);
    }

    #[test]
    fn empty_first_name_falls_through_to_the_username() {
        let employee: Employee = serde_json::from_value(json!({
            "_id": "u4",
            "username": "reyes",
            "firstName": "",
        }))
        .unwrap();
        assert_eq!(employee.display_name(), "reyes");
    }

    #[test]
    fn deactivation_keeps_the_account_but_flags_it() {
        let mut employee: Employee = serde_json::from_value(json!({
            "_id": "u5",
            "username": "torres",
            "status": true,
        }))
        .unwrap();
        assert!(employee.is_active());
        employee.deactivate();
        assert!(!employee.is_active());
        assert_eq!(employee.record_id(), "u5");
    }

    #[test]
    fn wire_roles_are_plain_identifier_strings() {
        let employee: Employee = serde_json::from_value(json!({
            "_id": "u6",
            "username": "admin",
            "roles": ["68703a8cbe19d4a7e175ea1a"],
        }))
        .unwrap();
        assert_eq!(employee.roles, vec![RoleId::from("68703a8cbe19d4a7e175ea1a")]);
    }
}
