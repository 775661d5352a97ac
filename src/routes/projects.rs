//! Portfolio entry routes.

use axum::{
    extract::{Path, Query},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{PortfolioEntry, PortfolioStatus};
use crate::query::{self, QueryOptions, SortKey};
use crate::repo::Repository;
use crate::routes::{check_slug, require_auth, SuccessResponse};
use crate::store::Backend;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectListQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub sort: Option<SortKey>,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectListResponse {
    pub items: Vec<PortfolioEntry>,
    pub total: usize,
    pub source: Backend,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub repo_url: Option<String>,
    #[serde(default)]
    pub live_url: Option<String>,
    #[serde(default)]
    pub status: PortfolioStatus,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technologies: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PortfolioStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

/// GET /api/projects
pub async fn list(Query(params): Query<ProjectListQuery>) -> Result<impl IntoResponse> {
    let repo: Repository<PortfolioEntry> = Repository::new();
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
    Ok(Json(ProjectListResponse {
        total: items.len(),
        items,
        source: resolved.backend,
    }))
}

/// GET /api/projects/{slug}
pub async fn detail(Path(slug): Path<String>) -> Result<impl IntoResponse> {
    check_slug(&slug)?;
    let repo: Repository<PortfolioEntry> = Repository::new();
    Ok(Json(repo.get_by_slug(&slug).await?.value))
}

/// POST /api/projects (auth required)
pub async fn create(
    headers: HeaderMap,
    Json(payload): Json<CreateProjectRequest>,
) -> Result<impl IntoResponse> {
    require_auth(&headers)?;

    if payload.title.trim().is_empty() {
        return Err(Error::Validation("title is required".into()));
    }

    let repo: Repository<PortfolioEntry> = Repository::new();
    let created = repo
        .create(serde_json::to_value(&payload).map_err(|e| Error::Validation(e.to_string()))?)
        .await?;

    tracing::info!(slug = %created.value.slug, "project created");
    Ok((StatusCode::CREATED, Json(created.value)))
}

/// PATCH /api/projects/{slug} (auth required)
pub async fn update(
    headers: HeaderMap,
    Path(slug): Path<String>,
    Json(payload): Json<UpdateProjectRequest>,
) -> Result<impl IntoResponse> {
    require_auth(&headers)?;
    check_slug(&slug)?;

    if let Some(title) = &payload.title {
        if title.trim().is_empty() {
            return Err(Error::Validation("title must not be empty".into()));
        }
    }

    let repo: Repository<PortfolioEntry> = Repository::new();
    let existing = repo.get_by_slug(&slug).await?.value;
    let updated = repo
        .update(
            existing.id,
            serde_json::to_value(&payload).map_err(|e| Error::Validation(e.to_string()))?,
        )
        .await?;

    Ok(Json(updated.value))
}

/// DELETE /api/projects/{slug} (auth required)
pub async fn delete(headers: HeaderMap, Path(slug): Path<String>) -> Result<impl IntoResponse> {
    require_auth(&headers)?;
    check_slug(&slug)?;

    let repo: Repository<PortfolioEntry> = Repository::new();
    let existing = repo.get_by_slug(&slug).await?.value;
    repo.delete(existing.id).await?;

    tracing::info!(%slug, "project deleted");
    Ok(Json(SuccessResponse { success: true }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::testutil;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    fn app() -> Router {
        testutil::use_test_store();
        Router::new()
            .route("/api/projects", get(list).post(create))
            .route(
                "/api/projects/{slug}",
                get(detail).patch(update).delete(delete),
            )
    }

    async fn body_json(res: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_list_filters_by_status_facet() {
        let res = app()
            .oneshot(
                Request::get("/api/projects?status=completed")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        for item in body["items"].as_array().unwrap() {
            assert_eq!(item["status"], "completed");
        }
    }

    #[tokio::test]
    async fn test_list_all_sentinel_disables_facet() {
        let res = app()
            .oneshot(
                Request::get("/api/projects?status=All")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = body_json(res).await;
        assert!(body["total"].as_u64().unwrap() >= 3);
    }

    #[tokio::test]
    async fn test_detail_serves_seeded_project() {
        let res = app()
            .oneshot(
                Request::get("/api/projects/terminal-portfolio")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        assert_eq!(body["title"], "Terminal Portfolio");
    }

    #[tokio::test]
    async fn test_mutations_require_token() {
        let res = app()
            .oneshot(
                Request::delete("/api/projects/terminal-portfolio")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_update_rederives_slug_on_rename() {
        let app = app();
        let payload = serde_json::json!({ "title": "Demo Project For Rename" });
        let res = app
            .clone()
            .oneshot(
                Request::post("/api/projects")
                    .header("content-type", "application/json")
                    .header("authorization", testutil::admin_bearer())
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);

        let patch = serde_json::json!({ "title": "Renamed Demo Project" });
        let res = app
            .oneshot(
                Request::patch("/api/projects/demo-project-for-rename")
                    .header("content-type", "application/json")
                    .header("authorization", testutil::admin_bearer())
                    .body(Body::from(patch.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        assert_eq!(body["slug"], "renamed-demo-project");
    }
}
