//! Credential routes (certifications shown on the site).

use axum::{
    extract::{Path, Query},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{Credential, CredentialStatus};
use crate::query::{self, QueryOptions, SortKey};
use crate::repo::Repository;
use crate::routes::{check_slug, require_auth, SuccessResponse};
use crate::store::Backend;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialListQuery {
    pub search: Option<String>,
    pub issuer: Option<String>,
    pub status: Option<String>,
    pub sort: Option<SortKey>,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialListResponse {
    pub items: Vec<Credential>,
    pub total: usize,
    pub source: Backend,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCredentialRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub issuer: String,
    #[serde(default)]
    pub credential_id: Option<String>,
    #[serde(default)]
    pub issued_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: CredentialStatus,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub verify_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCredentialRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CredentialStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verify_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

/// GET /api/credentials
pub async fn list(Query(params): Query<CredentialListQuery>) -> Result<impl IntoResponse> {
    let repo: Repository<Credential> = Repository::new();
    let resolved = repo.get_all().await?;

    let mut opts = QueryOptions::default().featured_only(params.featured);
    if let Some(search) = &params.search {
        opts = opts.search(search.clone());
    }
    if let Some(issuer) = &params.issuer {
        opts = opts.facet("issuer", issuer.clone());
    }
    if let Some(status) = &params.status {
        opts = opts.facet("status", status.clone());
    }
    if let Some(sort) = params.sort {
        opts = opts.sort(sort);
    }

    let items = query::apply(&resolved.value, &opts)?;
    Ok(Json(CredentialListResponse {
        total: items.len(),
        items,
        source: resolved.backend,
    }))
}

/// GET /api/credentials/{slug}
pub async fn detail(Path(slug): Path<String>) -> Result<impl IntoResponse> {
    check_slug(&slug)?;
    let repo: Repository<Credential> = Repository::new();
    Ok(Json(repo.get_by_slug(&slug).await?.value))
}

/// POST /api/credentials (auth required)
pub async fn create(
    headers: HeaderMap,
    Json(payload): Json<CreateCredentialRequest>,
) -> Result<impl IntoResponse> {
    require_auth(&headers)?;

    if payload.title.trim().is_empty() {
        return Err(Error::Validation("title is required".into()));
    }

    let repo: Repository<Credential> = Repository::new();
    let created = repo
        .create(serde_json::to_value(&payload).map_err(|e| Error::Validation(e.to_string()))?)
        .await?;

    tracing::info!(slug = %created.value.slug, "credential created");
    Ok((StatusCode::CREATED, Json(created.value)))
}

/// PATCH /api/credentials/{slug} (auth required)
pub async fn update(
    headers: HeaderMap,
    Path(slug): Path<String>,
    Json(payload): Json<UpdateCredentialRequest>,
) -> Result<impl IntoResponse> {
    require_auth(&headers)?;
    check_slug(&slug)?;

    if let Some(title) = &payload.title {
        if title.trim().is_empty() {
            return Err(Error::Validation("title must not be empty".into()));
        }
    }

    let repo: Repository<Credential> = Repository::new();
    let existing = repo.get_by_slug(&slug).await?.value;
    let updated = repo
        .update(
            existing.id,
            serde_json::to_value(&payload).map_err(|e| Error::Validation(e.to_string()))?,
        )
        .await?;

    Ok(Json(updated.value))
}

/// DELETE /api/credentials/{slug} (auth required)
pub async fn delete(headers: HeaderMap, Path(slug): Path<String>) -> Result<impl IntoResponse> {
    require_auth(&headers)?;
    check_slug(&slug)?;

    let repo: Repository<Credential> = Repository::new();
    let existing = repo.get_by_slug(&slug).await?.value;
    repo.delete(existing.id).await?;

    tracing::info!(%slug, "credential deleted");
    Ok(Json(SuccessResponse { success: true }))
}
