//! User profile model as issued by the auth service.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque role identifier. Compared by identifier equality only;
/// display labels are a server concern and may localize.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(String);

impl RoleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RoleId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The authenticated user, as stored alongside the session token.
///
/// Wire shape: `{"_id", "username", "email", "roles": [..]}`. Roles may be
/// absent entirely; a missing list reads as no roles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub roles: Vec<RoleId>,
}

impl UserProfile {
    /// Name shown in the UI chrome.
    pub fn display_name(&self) -> &str {
        &self.username
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_wire_shape() {
        let profile: UserProfile = serde_json::from_str(
            r#"{"_id":"u1","username":"marta","email":"marta@primegym.mx","roles":["r1","r2"]}"#,
        )
        .unwrap();
        assert_eq!(profile.id, "u1");
        assert_eq!(profile.display_name(), "marta");
        assert_eq!(profile.roles, vec![RoleId::from("r1"), RoleId::from("r2")]);
    }

    #[test]
    fn missing_roles_reads_as_empty() {
        let profile: UserProfile =
            serde_json::from_str(r#"{"_id":"u1","username":"marta"}"#).unwrap();
        assert!(profile.roles.is_empty());
        assert_eq!(profile.email, "");
    }

    #[test]
    fn round_trips_through_json() {
        let profile = UserProfile {
            id: "u9".into(),
            username: "admin".into(),
            email: "admin@primegym.mx".into(),
            roles: vec![RoleId::from("68703a8cbe19d4a7e175ea1a")],
        };
        let raw = serde_json::to_string(&profile).unwrap();
        let back: UserProfile = serde_json::from_str(&raw).unwrap();
        assert_eq!(profile, back);
    }
}
