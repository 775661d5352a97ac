//! API route handlers.

pub mod articles;
pub mod auth;
pub mod credentials;
pub mod health;
pub mod profile;
pub mod projects;
pub mod rss;
pub mod services;

use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};

pub use crate::error::ErrorResponse;
use crate::error::{Error, Result};

/// Success envelope for deletes and other bodyless mutations.
#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

/// Extracts and verifies the bearer token on administrative operations.
/// The content core only forwards the credential; a rejection surfaces as
/// `Unauthorized` and is never retried.
pub(crate) fn require_auth(headers: &HeaderMap) -> Result<auth::Claims> {
    let token = bearer_token(headers).ok_or(Error::Unauthorized)?;
    auth::verify_access_token(token).map_err(|_| Error::Unauthorized)
}

/// Rejects malformed slug path parameters before they reach a store.
pub(crate) fn check_slug(slug: &str) -> Result<()> {
    if crate::slug::is_valid_slug(slug) {
        Ok(())
    } else {
        Err(Error::Validation(
            "slug must contain only lowercase letters, numbers, and hyphens".into(),
        ))
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use once_cell::sync::Lazy;
    use tempfile::TempDir;

    static TEST_DATA_DIR: Lazy<TempDir> = Lazy::new(|| {
        let dir = TempDir::new().expect("temp dir for fallback store");
        std::env::set_var("FALLBACK_DATA_DIR", dir.path());
        dir
    });

    /// Handlers build their repositories from the environment; this points
    /// the fallback store at a per-run temp directory before the first
    /// request is issued.
    pub fn use_test_store() {
        Lazy::force(&TEST_DATA_DIR);
    }

    /// A valid admin bearer header value for exercising gated handlers.
    pub fn admin_bearer() -> String {
        let token = super::auth::create_access_token("admin-user-id", "admin@example.com", "ADMIN")
            .expect("mint access token");
        format!("Bearer {token}")
    }
}
