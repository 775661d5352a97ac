//! Service listing routes.

use axum::{
    extract::{Path, Query},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{ServiceListing, ServiceStatus};
use crate::query::{self, QueryOptions, SortKey};
use crate::repo::Repository;
use crate::routes::{check_slug, require_auth, SuccessResponse};
use crate::store::Backend;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceListQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub sort: Option<SortKey>,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceListResponse {
    pub items: Vec<ServiceListing>,
    pub total: usize,
    pub source: Backend,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub deliverables: Vec<String>,
    #[serde(default)]
    pub price_hint: Option<String>,
    #[serde(default)]
    pub status: ServiceStatus,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServiceRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deliverables: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ServiceStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

/// GET /api/services
pub async fn list(Query(params): Query<ServiceListQuery>) -> Result<impl IntoResponse> {
    let repo: Repository<ServiceListing> = Repository::new();
    let resolved = repo.get_all().await?;

    let mut opts = QueryOptions::default().featured_only(params.featured);
    if let Some(search) = &params.search {
        opts = opts.search(search.clone());
    }
    if let Some(category) = &params.category {
        opts = opts.facet("category", category.clone());
    }
    if let Some(status) = &params.status {
        opts = opts.facet("status", status.clone());
    }
    if let Some(sort) = params.sort {
        opts = opts.sort(sort);
    }

    let items = query::apply(&resolved.value, &opts)?;
    Ok(Json(ServiceListResponse {
        total: items.len(),
        items,
        source: resolved.backend,
    }))
}

/// GET /api/services/{slug}
pub async fn detail(Path(slug): Path<String>) -> Result<impl IntoResponse> {
    check_slug(&slug)?;
    let repo: Repository<ServiceListing> = Repository::new();
    Ok(Json(repo.get_by_slug(&slug).await?.value))
}

/// POST /api/services (auth required)
pub async fn create(
    headers: HeaderMap,
    Json(payload): Json<CreateServiceRequest>,
) -> Result<impl IntoResponse> {
    require_auth(&headers)?;

    if payload.title.trim().is_empty() {
        return Err(Error::Validation("title is required".into()));
    }

    let repo: Repository<ServiceListing> = Repository::new();
    let created = repo
        .create(serde_json::to_value(&payload).map_err(|e| Error::Validation(e.to_string()))?)
        .await?;

    tracing::info!(slug = %created.value.slug, "service created");
    Ok((StatusCode::CREATED, Json(created.value)))
}

/// PATCH /api/services/{slug} (auth required)
pub async fn update(
    headers: HeaderMap,
    Path(slug): Path<String>,
    Json(payload): Json<UpdateServiceRequest>,
) -> Result<impl IntoResponse> {
    require_auth(&headers)?;
    check_slug(&slug)?;

    if let Some(title) = &payload.title {
        if title.trim().is_empty() {
            return Err(Error::Validation("title must not be empty".into()));
        }
    }

    let repo: Repository<ServiceListing> = Repository::new();
    let existing = repo.get_by_slug(&slug).await?.value;
    let updated = repo
        .update(
            existing.id,
            serde_json::to_value(&payload).map_err(|e| Error::Validation(e.to_string()))?,
        )
        .await?;

    Ok(Json(updated.value))
}

/// DELETE /api/services/{slug} (auth required)
pub async fn delete(headers: HeaderMap, Path(slug): Path<String>) -> Result<impl IntoResponse> {
    require_auth(&headers)?;
    check_slug(&slug)?;

    let repo: Repository<ServiceListing> = Repository::new();
    let existing = repo.get_by_slug(&slug).await?.value;
    repo.delete(existing.id).await?;

    tracing::info!(%slug, "service deleted");
    Ok(Json(SuccessResponse { success: true }))
}
