//! Singleton site-owner profile.
//!
//! Exactly one record exists per deployment, addressed by [`PROFILE_ID`].
//! It carries no slug; public reads go through the fixed identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{Collection, Entity};

/// Fixed identity of the singleton profile record.
pub const PROFILE_ID: Uuid = Uuid::from_u128(1);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLinks {
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub social: SocialLinks,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Profile {
    const COLLECTION: Collection = Collection::Profile;
    const HAS_SLUG: bool = false;

    fn id(&self) -> Uuid {
        self.id
    }

    fn title(&self) -> &str {
        &self.name
    }

    fn slug(&self) -> Option<&str> {
        None
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_id_is_stable() {
        assert_eq!(
            PROFILE_ID.to_string(),
            "00000000-0000-0000-0000-000000000001"
        );
    }

    #[test]
    fn test_social_links_default_to_empty() {
        let profile: Profile = serde_json::from_value(serde_json::json!({
            "id": PROFILE_ID,
            "name": "Dimas",
            "createdAt": Utc::now(),
            "updatedAt": Utc::now(),
        }))
        .unwrap();
        assert_eq!(profile.social, SocialLinks::default());
        assert!(profile.skills.is_empty());
    }
}
