//! Domain model: the five persisted collections and the entity descriptor
//! trait the generic repository and stores are parameterized over.

pub mod article;
pub mod credential;
pub mod portfolio;
pub mod profile;
pub mod service;

pub use article::{Article, ArticleStatus};
pub use credential::{Credential, CredentialStatus};
pub use portfolio::{PortfolioEntry, PortfolioStatus};
pub use profile::{Profile, SocialLinks, PROFILE_ID};
pub use service::{ServiceListing, ServiceStatus};

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

/// Persisted collection keys. One remote table and one fallback cache file
/// exist per variant; the key doubles as both names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Articles,
    Projects,
    Credentials,
    Services,
    Profile,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Articles,
        Collection::Projects,
        Collection::Credentials,
        Collection::Services,
        Collection::Profile,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Collection::Articles => "articles",
            Collection::Projects => "projects",
            Collection::Credentials => "credentials",
            Collection::Services => "services",
            Collection::Profile => "profile",
        }
    }

    /// Remote table name. Kept identical to the cache key so operators see
    /// one vocabulary everywhere.
    pub fn table(self) -> &'static str {
        self.key()
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Descriptor every persisted entity type implements.
///
/// The repository relies on this instead of five copy-pasted CRUD blocks:
/// where the record lives, whether it carries a slug, how to read its
/// identity, and a hook to re-derive denormalized fields after a mutation.
pub trait Entity:
    Clone + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + Unpin + 'static
{
    const COLLECTION: Collection;

    /// Whether a public slug is derived from the title. The singleton
    /// profile is the one type without.
    const HAS_SLUG: bool = true;

    fn id(&self) -> Uuid;
    fn title(&self) -> &str;
    fn slug(&self) -> Option<&str>;
    fn created_at(&self) -> DateTime<Utc>;
    fn updated_at(&self) -> DateTime<Utc>;

    /// Re-derives denormalized fields (e.g. reading time) after the record
    /// was rebuilt from a merge. Default: nothing to derive.
    fn normalize(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_keys_are_distinct() {
        let mut keys: Vec<_> = Collection::ALL.iter().map(|c| c.key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), Collection::ALL.len());
    }

    #[test]
    fn test_slug_bearing_flags() {
        assert!(Article::HAS_SLUG);
        assert!(PortfolioEntry::HAS_SLUG);
        assert!(Credential::HAS_SLUG);
        assert!(ServiceListing::HAS_SLUG);
        assert!(!Profile::HAS_SLUG);
    }
}
