//! Singleton profile routes.
//!
//! There is exactly one profile record per deployment, addressed by
//! `PROFILE_ID`. Reads never 404: when nothing was ever stored (fresh remote
//! database), the bundled default is served. The update is a merge, so the
//! admin UI can PUT just the fields it changed.

use axum::{http::HeaderMap, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{Profile, SocialLinks, PROFILE_ID};
use crate::repo::Repository;
use crate::routes::require_auth;
use crate::store::{samples, Backend};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub profile: Profile,
    pub source: Backend,
}

#[derive(Debug, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social: Option<SocialLinks>,
}

/// GET /api/profile
pub async fn get_profile() -> Result<impl IntoResponse> {
    let repo: Repository<Profile> = Repository::new();
    let resolved = repo.get_all().await?;

    let profile = match resolved.value.into_iter().next() {
        Some(profile) => profile,
        // A reachable but empty remote store: serve the bundled default
        // until the admin saves one.
        None => samples::default_profile()?,
    };

    Ok(Json(ProfileResponse {
        profile,
        source: resolved.backend,
    }))
}

/// PUT /api/profile (auth required) — merge-updates the singleton, creating
/// it from the bundled default on first save against an empty store.
pub async fn update_profile(
    headers: HeaderMap,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse> {
    require_auth(&headers)?;

    if let Some(name) = &payload.name {
        if name.trim().is_empty() {
            return Err(Error::Validation("name must not be empty".into()));
        }
    }

    let repo: Repository<Profile> = Repository::new();
    let patch = serde_json::to_value(&payload).map_err(|e| Error::Validation(e.to_string()))?;

    let updated = match repo.update(PROFILE_ID, patch.clone()).await {
        Ok(resolved) => resolved,
        Err(Error::NotFound) => {
            repo.insert(&samples::default_profile()?).await?;
            repo.update(PROFILE_ID, patch).await?
        }
        Err(err) => return Err(err),
    };

    tracing::info!("profile updated");
    Ok(Json(ProfileResponse {
        profile: updated.value,
        source: updated.backend,
    }))
}
