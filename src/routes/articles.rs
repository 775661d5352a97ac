//! Article routes: public listing/detail plus authenticated CRUD.
//!
//! Listing never touches counters; the detail read increments the view count
//! of a published article exactly once per request, through a counter-only
//! write that leaves `updatedAt` alone.

use axum::{
    extract::{Path, Query},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::content::{validate_blocks, ContentBlock};
use crate::error::{Error, Result};
use crate::model::{Article, ArticleStatus};
use crate::query::{self, QueryOptions, SortKey};
use crate::repo::Repository;
use crate::routes::{check_slug, require_auth, SuccessResponse};
use crate::store::Backend;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for GET /api/articles.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleListQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub sort: Option<SortKey>,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleListResponse {
    pub items: Vec<Article>,
    pub total: usize,
    /// Which backend answered; `fallback` means degraded/demo mode.
    pub source: Backend,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateArticleRequest {
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub status: ArticleStatus,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateArticleRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<ContentBlock>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ArticleStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeResponse {
    pub slug: String,
    pub like_count: u64,
}

// ============================================================================
// Helpers
// ============================================================================

fn list_options(query: &ArticleListQuery) -> QueryOptions {
    let mut opts = QueryOptions::default().featured_only(query.featured);
    if let Some(search) = &query.search {
        opts = opts.search(search.clone());
    }
    if let Some(category) = &query.category {
        opts = opts.facet("category", category.clone());
    }
    if let Some(status) = &query.status {
        opts = opts.facet("status", status.clone());
    }
    if let Some(sort) = query.sort {
        opts = opts.sort(sort);
    }
    opts
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/articles
pub async fn list(Query(params): Query<ArticleListQuery>) -> Result<impl IntoResponse> {
    let repo: Repository<Article> = Repository::new();
    let resolved = repo.get_all().await?;
    let items = query::apply(&resolved.value, &list_options(&params))?;

    Ok(Json(ArticleListResponse {
        total: items.len(),
        items,
        source: resolved.backend,
    }))
}

/// GET /api/articles/{slug} — the read that counts a view.
pub async fn detail(Path(slug): Path<String>) -> Result<impl IntoResponse> {
    check_slug(&slug)?;

    let repo: Repository<Article> = Repository::new();
    let mut article = repo.get_by_slug(&slug).await?.value;

    if article.is_published() {
        article.view_count += 1;
        // Counting is best-effort: a failed bump must not fail the read.
        if let Err(e) = repo.replace(&article).await {
            tracing::warn!(%slug, error = %e, "failed to persist view count");
            article.view_count -= 1;
        }
    }

    Ok(Json(article))
}

/// POST /api/articles (auth required)
pub async fn create(
    headers: HeaderMap,
    Json(payload): Json<CreateArticleRequest>,
) -> Result<impl IntoResponse> {
    require_auth(&headers)?;

    if payload.title.trim().is_empty() {
        return Err(Error::Validation("title is required".into()));
    }
    validate_blocks(&payload.content)?;

    let repo: Repository<Article> = Repository::new();
    let created = repo
        .create(serde_json::to_value(&payload).map_err(|e| Error::Validation(e.to_string()))?)
        .await?;

    tracing::info!(slug = %created.value.slug, "article created");
    Ok((StatusCode::CREATED, Json(created.value)))
}

/// PATCH /api/articles/{slug} (auth required)
pub async fn update(
    headers: HeaderMap,
    Path(slug): Path<String>,
    Json(payload): Json<UpdateArticleRequest>,
) -> Result<impl IntoResponse> {
    require_auth(&headers)?;
    check_slug(&slug)?;

    if let Some(title) = &payload.title {
        if title.trim().is_empty() {
            return Err(Error::Validation("title must not be empty".into()));
        }
    }
    if let Some(content) = &payload.content {
        validate_blocks(content)?;
    }

    let repo: Repository<Article> = Repository::new();
    let existing = repo.get_by_slug(&slug).await?.value;
    let updated = repo
        .update(
            existing.id,
            serde_json::to_value(&payload).map_err(|e| Error::Validation(e.to_string()))?,
        )
        .await?;

    Ok(Json(updated.value))
}

/// DELETE /api/articles/{slug} (auth required)
pub async fn delete(headers: HeaderMap, Path(slug): Path<String>) -> Result<impl IntoResponse> {
    require_auth(&headers)?;
    check_slug(&slug)?;

    let repo: Repository<Article> = Repository::new();
    let existing = repo.get_by_slug(&slug).await?.value;
    repo.delete(existing.id).await?;

    tracing::info!(%slug, "article deleted");
    Ok(Json(SuccessResponse { success: true }))
}

/// POST /api/articles/{slug}/like — public, monotonic.
pub async fn like(Path(slug): Path<String>) -> Result<impl IntoResponse> {
    check_slug(&slug)?;

    let repo: Repository<Article> = Repository::new();
    let mut article = repo.get_by_slug(&slug).await?.value;
    article.like_count += 1;
    repo.replace(&article).await?;

    Ok(Json(LikeResponse {
        slug: article.slug,
        like_count: article.like_count,
    }))
}
