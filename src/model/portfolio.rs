//! Portfolio entry entity (projects shown on the site).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{Collection, Entity};
use crate::query::Filterable;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PortfolioStatus {
    #[default]
    Draft,
    InProgress,
    Completed,
}

impl PortfolioStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PortfolioStatus::Draft => "draft",
            PortfolioStatus::InProgress => "in-progress",
            PortfolioStatus::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioEntry {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for PortfolioEntry {
    const COLLECTION: Collection = Collection::Projects;

    fn id(&self) -> Uuid {
        self.id
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn slug(&self) -> Option<&str> {
        Some(&self.slug)
    }
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl Filterable for PortfolioEntry {
    const FACETS: &'static [&'static str] = &["category", "status"];

    fn facet(&self, field: &str) -> Option<String> {
        match field {
            "category" => Some(self.category.clone()),
            "status" => Some(self.status.as_str().to_string()),
            _ => None,
        }
    }

    fn search_text(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str(), self.description.as_str()];
        fields.extend(self.technologies.iter().map(String::as_str));
        fields
    }

    fn is_featured(&self) -> bool {
        self.featured
    }
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
