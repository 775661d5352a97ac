//! Generic entity repository.
//!
//! One implementation serves all five collections through the `Entity`
//! descriptor instead of per-type CRUD blocks. The repository owns the
//! identity invariants: ids are assigned here and never overwritten,
//! `created_at` is immutable, `updated_at` refreshes on every update, and
//! slugs are (re)derived from titles — callers cannot fabricate any of them
//! through a payload.
//!
//! Payloads and partials are JSON objects in the entities' own serde shape
//! (camelCase keys); rebuilding the typed entity after a merge is what
//! validates the result.

use std::marker::PhantomData;

use chrono::Utc;
use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::model::Entity;
use crate::slug::derive_slug;
use crate::store::{Backend, LocalStore, Resolved, Resolver};

/// Keys owned by the repository; stripped from every incoming payload.
const IMMUTABLE_KEYS: &[&str] = &["id", "createdAt"];

pub struct Repository<T: Entity> {
    resolver: Resolver,
    _entity: PhantomData<T>,
}

impl<T: Entity> Default for Repository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> Repository<T> {
    pub fn new() -> Self {
        Self {
            resolver: Resolver::default(),
            _entity: PhantomData,
        }
    }

    /// Repository over an explicit fallback store. Production uses
    /// [`Repository::new`]; tests point this at a temp directory.
    pub fn with_store(store: LocalStore) -> Self {
        Self {
            resolver: Resolver::new(store),
            _entity: PhantomData,
        }
    }

    /// Collection in backend order, tagged with the serving backend.
    pub async fn get_all(&self) -> Result<Resolved<Vec<T>>> {
        self.resolver.fetch_all().await
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Resolved<T>> {
        self.resolver.fetch_by_slug(slug).await
    }

    /// The remote boundary has no fetch-by-id, so ids resolve against the
    /// materialized collection.
    pub async fn get_by_id(&self, id: Uuid) -> Result<Resolved<T>> {
        let all = self.get_all().await?;
        let backend = all.backend;
        all.value
            .into_iter()
            .find(|item| item.id() == id)
            .map(|value| Resolved { value, backend })
            .ok_or(Error::NotFound)
    }

    /// Creates a record from a payload of business fields. Identity, slug
    /// and both timestamps are assigned here regardless of what the payload
    /// claims; business-field validation stays with the caller.
    pub async fn create(&self, payload: Value) -> Result<Resolved<T>> {
        let mut fields = into_object(payload)?;
        for key in IMMUTABLE_KEYS {
            fields.remove(*key);
        }
        fields.remove("updatedAt");

        let id = Uuid::new_v4();
        fields.insert("id".into(), json!(id));
        if T::HAS_SLUG {
            let title = fields.get("title").and_then(Value::as_str).unwrap_or_default();
            fields.insert("slug".into(), json!(derive_slug(title)));
        }
        let now = Utc::now();
        fields.insert("createdAt".into(), json!(now));
        fields.insert("updatedAt".into(), json!(now));

        let mut entity: T = rebuild(fields)?;
        entity.normalize();

        let backend = self.resolver.insert(&entity).await?;
        Ok(Resolved { value: entity, backend })
    }

    /// Merges a partial payload onto the stored record.
    ///
    /// `id` and `createdAt` in the partial are ignored, the slug is
    /// re-derived only when the partial carries a differing title, and
    /// `updatedAt` always refreshes — even for an empty partial.
    pub async fn update(&self, id: Uuid, partial: Value) -> Result<Resolved<T>> {
        let mut patch = into_object(partial)?;
        for key in IMMUTABLE_KEYS {
            patch.remove(*key);
        }
        patch.remove("updatedAt");

        let existing = self.get_by_id(id).await?.value;
        let title_changed = patch
            .get("title")
            .and_then(Value::as_str)
            .is_some_and(|title| title != existing.title());

        let current = serde_json::to_value(&existing)
            .map_err(|e| Error::Storage(format!("serialize current record: {e}")))?;
        let mut fields = into_object(current)?;
        for (key, value) in patch {
            fields.insert(key, value);
        }

        if T::HAS_SLUG && title_changed {
            let title = fields.get("title").and_then(Value::as_str).unwrap_or_default();
            fields.insert("slug".into(), json!(derive_slug(title)));
        }
        fields.insert("updatedAt".into(), json!(Utc::now()));

        let mut entity: T = rebuild(fields)?;
        entity.normalize();

        let backend = self.resolver.update(&entity).await?;
        Ok(Resolved { value: entity, backend })
    }

    /// Idempotent in effect: deleting an absent id is a no-op here. Slug
    /// resolution (and its 404) happens at the HTTP layer before this call.
    pub async fn delete(&self, id: Uuid) -> Result<Backend> {
        self.resolver.delete::<T>(id).await
    }

    /// Persists an already-mutated record verbatim, without touching
    /// `updatedAt`. Counter bumps (views, likes) go through here so reader
    /// traffic does not churn the editorial timestamp.
    pub async fn replace(&self, entity: &T) -> Result<Backend> {
        self.resolver.update(entity).await
    }

    /// Persists a fully-formed record as-is, keeping its identity. Used by
    /// the singleton profile seed and the bulk-seed CLI.
    pub async fn insert(&self, entity: &T) -> Result<Backend> {
        self.resolver.insert(entity).await
    }
}

fn into_object(value: Value) -> Result<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(Error::Validation(format!(
            "payload must be a JSON object, got {}",
            kind(&other)
        ))),
    }
}

fn rebuild<T: Entity>(fields: Map<String, Value>) -> Result<T> {
    serde_json::from_value(Value::Object(fields)).map_err(|e| {
        Error::Validation(format!("invalid {} payload: {e}", T::COLLECTION))
    })
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Article, PortfolioEntry};
    use tempfile::TempDir;

    // No database pool exists under test, so every call resolves through
    // the local fallback: writes must succeed with the remote permanently
    // unreachable, and that is the path exercised here.

    fn repo<T: Entity>(dir: &TempDir) -> Repository<T> {
        Repository::with_store(LocalStore::new(dir.path()))
    }

    fn article_payload(title: &str) -> Value {
        json!({
            "title": title,
            "excerpt": "Short summary",
            "category": "engineering",
            "tags": ["rust"],
            "status": "published",
            "content": [
                { "type": "paragraph", "text": "Some words to count." }
            ],
        })
    }

    #[tokio::test]
    async fn test_create_assigns_identity_slug_and_timestamps() {
        let dir = TempDir::new().unwrap();
        let repo: Repository<Article> = repo(&dir);

        let created = repo
            .create(article_payload("A Fresh Take on Testing"))
            .await
            .unwrap();
        let article = created.value;

        assert_eq!(created.backend, Backend::Fallback);
        assert_eq!(article.slug, "a-fresh-take-on-testing");
        assert_eq!(article.created_at, article.updated_at);
        assert!(article.reading_time >= 1, "normalize ran on create");
    }

    #[tokio::test]
    async fn test_create_ignores_fabricated_identity() {
        let dir = TempDir::new().unwrap();
        let repo: Repository<Article> = repo(&dir);

        let mut payload = article_payload("Honest Title");
        payload["id"] = json!("11111111-1111-1111-1111-111111111111");
        payload["createdAt"] = json!("1999-01-01T00:00:00Z");

        let article = repo.create(payload).await.unwrap().value;
        assert_ne!(article.id.to_string(), "11111111-1111-1111-1111-111111111111");
        let cutoff = chrono::DateTime::parse_from_rfc3339("2000-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert!(article.created_at > cutoff);
    }

    #[tokio::test]
    async fn test_create_then_get_all_includes_record() {
        let dir = TempDir::new().unwrap();
        let repo: Repository<Article> = repo(&dir);

        let created = repo.create(article_payload("Offline Creation")).await.unwrap();
        let all = repo.get_all().await.unwrap();

        assert_eq!(all.backend, Backend::Fallback);
        assert!(all.value.iter().any(|a| a.id == created.value.id));
    }

    #[tokio::test]
    async fn test_empty_partial_touches_only_updated_at() {
        let dir = TempDir::new().unwrap();
        let repo: Repository<Article> = repo(&dir);

        let created = repo.create(article_payload("Stable Fields")).await.unwrap().value;
        let updated = repo.update(created.id, json!({})).await.unwrap().value;

        assert!(updated.updated_at > created.updated_at);
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.title, created.title);
        assert_eq!(updated.slug, created.slug);
        assert_eq!(updated.content, created.content);
        assert_eq!(updated.view_count, created.view_count);
    }

    #[tokio::test]
    async fn test_update_cannot_overwrite_id_or_created_at() {
        let dir = TempDir::new().unwrap();
        let repo: Repository<Article> = repo(&dir);

        let created = repo.create(article_payload("Pinned Identity")).await.unwrap().value;
        let updated = repo
            .update(
                created.id,
                json!({
                    "id": "22222222-2222-2222-2222-222222222222",
                    "createdAt": "1999-01-01T00:00:00Z",
                    "excerpt": "changed",
                }),
            )
            .await
            .unwrap()
            .value;

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.excerpt, "changed");
    }

    #[tokio::test]
    async fn test_title_change_rederives_slug_and_reading_time() {
        let dir = TempDir::new().unwrap();
        let repo: Repository<Article> = repo(&dir);

        let created = repo.create(article_payload("Original Name")).await.unwrap().value;
        assert_eq!(created.slug, "original-name");

        let updated = repo
            .update(created.id, json!({ "title": "Renamed Entirely!" }))
            .await
            .unwrap()
            .value;
        assert_eq!(updated.slug, "renamed-entirely");

        // Same title back does not count as a change.
        let unchanged = repo
            .update(updated.id, json!({ "title": "Renamed Entirely!" }))
            .await
            .unwrap()
            .value;
        assert_eq!(unchanged.slug, "renamed-entirely");
    }

    #[tokio::test]
    async fn test_update_recomputes_reading_time_on_content_change() {
        let dir = TempDir::new().unwrap();
        let repo: Repository<Article> = repo(&dir);

        let created = repo.create(article_payload("Reading Time")).await.unwrap().value;
        assert_eq!(created.reading_time, 1);

        let long_text = "word ".repeat(500);
        let updated = repo
            .update(
                created.id,
                json!({ "content": [{ "type": "paragraph", "text": long_text }] }),
            )
            .await
            .unwrap()
            .value;
        assert_eq!(
            updated.reading_time,
            crate::content::reading_time_minutes(updated.word_count())
        );
        assert!(updated.reading_time >= 3);
    }

    #[tokio::test]
    async fn test_update_absent_id_is_not_found() {
        let dir = TempDir::new().unwrap();
        let repo: Repository<Article> = repo(&dir);
        let err = repo.update(Uuid::new_v4(), json!({})).await.unwrap_err();
        assert!(matches!(err, Error::NotFound));
    }

    #[tokio::test]
    async fn test_delete_then_get_by_slug_is_not_found() {
        let dir = TempDir::new().unwrap();
        let repo: Repository<Article> = repo(&dir);

        let created = repo.create(article_payload("Doomed Record")).await.unwrap().value;
        repo.delete(created.id).await.unwrap();

        let err = repo.get_by_slug(&created.slug).await.unwrap_err();
        assert!(matches!(err, Error::NotFound));
    }

    #[tokio::test]
    async fn test_delete_absent_id_is_noop() {
        let dir = TempDir::new().unwrap();
        let repo: Repository<Article> = repo(&dir);

        let before = repo.get_all().await.unwrap().value.len();
        repo.delete(Uuid::new_v4()).await.unwrap();
        assert_eq!(repo.get_all().await.unwrap().value.len(), before);
    }

    #[tokio::test]
    async fn test_colliding_slugs_first_in_collection_order_wins() {
        let dir = TempDir::new().unwrap();
        let repo: Repository<Article> = repo(&dir);

        let first = repo.create(article_payload("Twin Title")).await.unwrap().value;
        let second = repo.create(article_payload("Twin Title")).await.unwrap().value;
        assert_eq!(first.slug, second.slug);

        let found = repo.get_by_slug(&first.slug).await.unwrap().value;
        assert_eq!(found.id, first.id);
    }

    #[tokio::test]
    async fn test_malformed_payload_is_validation_error() {
        let dir = TempDir::new().unwrap();
        let repo: Repository<Article> = repo(&dir);

        let err = repo.create(json!("just a string")).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        // Title carrying a non-string is rejected when the entity rebuilds.
        let err = repo.create(json!({ "title": 42 })).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn test_generic_repository_serves_other_collections() {
        let dir = TempDir::new().unwrap();
        let repo: Repository<PortfolioEntry> = repo(&dir);

        let created = repo
            .create(json!({
                "title": "Side Project",
                "description": "Weekend build",
                "technologies": ["Rust"],
                "category": "tooling",
                "status": "in-progress",
            }))
            .await
            .unwrap()
            .value;

        assert_eq!(created.slug, "side-project");
        assert_eq!(created.status.as_str(), "in-progress");
    }

    #[tokio::test]
    async fn test_replace_keeps_updated_at() {
        let dir = TempDir::new().unwrap();
        let repo: Repository<Article> = repo(&dir);

        let mut article = repo.create(article_payload("View Counter")).await.unwrap().value;
        let stamp = article.updated_at;
        article.view_count += 1;
        repo.replace(&article).await.unwrap();

        let reloaded = repo.get_by_slug(&article.slug).await.unwrap().value;
        assert_eq!(reloaded.view_count, 1);
        assert_eq!(reloaded.updated_at, stamp);
    }
}
