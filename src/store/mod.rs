//! Persistence: the remote Postgres document store, the local fallback
//! cache, and the resolver that picks between them per call.

pub mod local;
pub mod remote;
pub mod resolver;
pub mod samples;

pub use local::LocalStore;
pub use resolver::{Backend, Resolved, Resolver};

use thiserror::Error;

use crate::model::Collection;

/// Typed failure surface of the remote store boundary.
///
/// `NotFound` is a successful query with no match and never routes a call to
/// the fallback; everything else does.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("no matching record")]
    NotFound,

    /// The remote reports the collection's table does not exist. First-class
    /// because its remedy is one-time administrative initialization
    /// (`db::run_migrations`), not retrying.
    #[error("collection '{0}' missing on the remote store")]
    CollectionMissing(Collection),

    /// No pool was ever configured for this process.
    #[error("remote store not configured")]
    Unavailable,

    #[error("remote transport failure: {0}")]
    Transport(String),

    /// The stored record no longer matches the entity's shape.
    #[error("malformed remote record: {0}")]
    Malformed(String),
}

impl RemoteError {
    /// Whether this failure routes the call to the local fallback.
    pub fn triggers_fallback(&self) -> bool {
        !matches!(self, RemoteError::NotFound)
    }
}
