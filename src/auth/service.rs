//! Authentication flows: login, logout, own-profile update, password reset.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;
use validator::Validate;

use super::profile::UserProfile;
use crate::api::{decode, decode_entity, ApiClient};
use crate::session::SharedSessionStore;
use crate::support::{AppError, AppResult};

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(rename = "accessToken")]
    access_token: String,
    user: UserProfile,
}

/// Own-profile update form. The confirmation field never leaves the
/// client; the wire body is `{username, email, password?}`.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct ProfileUpdate {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(email(message = "invalid email address"))]
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: Option<String>,
    #[serde(skip_serializing)]
    #[validate(must_match(other = "password", message = "passwords do not match"))]
    pub confirm_password: Option<String>,
}

/// Orchestrates the session lifecycle against the auth endpoints.
pub struct AuthService {
    api: Arc<ApiClient>,
    session: SharedSessionStore,
}

impl AuthService {
    pub fn new(api: Arc<ApiClient>, session: SharedSessionStore) -> Self {
        Self { api, session }
    }

    /// Exchange credentials for a session. On success the token and
    /// profile are stored together; the established profile is returned.
    pub async fn login(&self, identifier: &str, password: &str) -> AppResult<UserProfile> {
        if identifier.trim().is_empty() {
            return Err(AppError::validation("identifier is required"));
        }
        if password.is_empty() {
            return Err(AppError::validation("password is required"));
        }

        let value: Value = self
            .api
            .post(
                "/api/auth/login-user",
                &json!({ "identifier": identifier, "password": password }),
            )
            .await?;
        let response: LoginResponse = decode(value)?;

        self.session
            .set_session(response.access_token, response.user.clone());
        info!(user = %response.user.username, "session established");
        Ok(response.user)
    }

    /// Drop the session. Purely client-side; the server keeps no session
    /// state beyond the token itself.
    pub fn logout(&self) {
        self.session.clear_session();
        info!("session cleared");
    }

    /// Update the signed-in user's profile. The stored profile is patched
    /// from the canonical response, never advanced locally.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> AppResult<UserProfile> {
        update.validate()?;

        let value: Value = self.api.put("/api/auth/users/me", update).await?;
        let profile: UserProfile = decode_entity(value, &["user", "data"])?;

        self.session.update_profile(profile.clone());
        info!(user = %profile.username, "profile updated");
        Ok(profile)
    }

    /// Finish a password reset with the token from the reset email.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> AppResult<()> {
        if token.trim().is_empty() {
            return Err(AppError::validation("reset token is required"));
        }
        if new_password.len() < 6 {
            return Err(AppError::validation(
                "password must be at least 6 characters",
            ));
        }

        let _: Value = self
            .api
            .post(
                "/api/auth/reset-password",
                &json!({ "token": token, "newPassword": new_password }),
            )
            .await?;
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────
