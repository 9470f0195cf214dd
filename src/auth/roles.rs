//! Role-based capability checks.
//!
//! The check is a pure function over an explicit profile. Callers read the
//! profile from the session store themselves; nothing here touches storage,
//! so the evaluation is trivially unit-testable.

use super::profile::UserProfile;

/// RoleId granting access to the administrative sections
/// (employee management).
pub const ADMINISTRATOR_ROLE_ID: &str = "68703a8cbe19d4a7e175ea1a";

/// True iff the profile carries the administrator role.
///
/// Missing profile or empty role list evaluates to false; this never
/// panics, whatever state the stored profile is in.
pub fn is_administrator(profile: Option<&UserProfile>) -> bool {
    profile
        .map(|p| p.roles.iter().any(|r| r.as_str() == ADMINISTRATOR_ROLE_ID))
        .unwrap_or(false)
}

// ── Tests ──────────────────────────────────────────────────────
