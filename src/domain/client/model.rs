//! Gym member entity

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use validator::Validate;

use crate::sync::SyncRecord;

/// Membership tiers offered at the front desk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MembershipType {
    Premium,
    #[serde(rename = "Básica")]
    Basic,
    #[serde(rename = "Estudiante")]
    Student,
}

impl Default for MembershipType {
    fn default() -> Self {
        Self::Basic
    }
}

impl fmt::Display for MembershipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Premium => write!(f, "Premium"),
            Self::Basic => write!(f, "Básica"),
            Self::Student => write!(f, "Estudiante"),
        }
    }
}

/// Registered member. Deactivated members drop out of the active view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "membershipType", default)]
    pub membership_type: MembershipType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl SyncRecord for Client {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn deactivate(&mut self) {
        self.active = false;
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

/// Front-desk form for registering or editing a member.
#[derive(Debug, Clone, Validate)]
pub struct ClientDraft {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub membership_type: MembershipType,
    pub photo: Option<String>,
}

impl ClientDraft {
    /// Body sent on create and update; saving always re-activates,
    /// matching the registration form.
    pub(crate) fn wire_body(&self) -> Value {
        json!({
            "name": self.name.trim(),
            "membershipType": self.membership_type,
            "photo": self.photo,
            "active": true,
        })
    }
}

// ── Tests ──────────────────────────────────────────────────────
