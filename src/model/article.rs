//! Long-form article entity with a structured block body.
//!
//! # Invariants
//! - `reading_time` is always `max(1, ceil(word_count / 200))` over the
//!   current title, excerpt and block contents; every mutating method below
//!   recomputes it, and the repository's normalize hook covers merges.
//! - `view_count` and `like_count` only ever grow.
//! - Block order is publish order; `move_block` swaps neighbors in place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::content::{self, ContentBlock, MoveDirection};
use crate::error::{Error, Result};
use crate::model::{Collection, Entity};
use crate::query::Filterable;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleStatus {
    #[default]
    Draft,
    Published,
}

impl ArticleStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ArticleStatus::Draft => "draft",
            ArticleStatus::Published => "published",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
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
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub reading_time: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    pub fn is_published(&self) -> bool {
        self.status == ArticleStatus::Published
    }

    /// Whitespace-delimited tokens across title, excerpt and every block.
    pub fn word_count(&self) -> usize {
        content::count_words(&self.title)
            + content::count_words(&self.excerpt)
            + self.content.iter().map(ContentBlock::words).sum::<usize>()
    }

    pub fn recompute_reading_time(&mut self) {
        self.reading_time = content::reading_time_minutes(self.word_count());
    }

    /// Appends a block after validating it. Invalid blocks are rejected,
    /// never silently dropped.
    pub fn append_block(&mut self, block: ContentBlock) -> Result<()> {
        block.validate()?;
        self.content.push(block);
        self.recompute_reading_time();
        Ok(())
    }

    pub fn remove_block(&mut self, index: usize) -> Result<ContentBlock> {
        if index >= self.content.len() {
            return Err(Error::Validation(format!(
                "block index {index} out of range (len {})",
                self.content.len()
            )));
        }
        let removed = self.content.remove(index);
        self.recompute_reading_time();
        Ok(removed)
    }

    /// Swaps a block with its neighbor. Moving the first block up or the
    /// last block down is a no-op, not an error.
    pub fn move_block(&mut self, index: usize, direction: MoveDirection) -> Result<()> {
        if index >= self.content.len() {
            return Err(Error::Validation(format!(
                "block index {index} out of range (len {})",
                self.content.len()
            )));
        }
        match direction {
            MoveDirection::Up if index > 0 => self.content.swap(index, index - 1),
            MoveDirection::Down if index + 1 < self.content.len() => {
                self.content.swap(index, index + 1)
            }
            _ => {}
        }
        self.recompute_reading_time();
        Ok(())
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.recompute_reading_time();
    }

    pub fn set_excerpt(&mut self, excerpt: impl Into<String>) {
        self.excerpt = excerpt.into();
        self.recompute_reading_time();
    }
}

impl Entity for Article {
    const COLLECTION: Collection = Collection::Articles;

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

    fn normalize(&mut self) {
        self.recompute_reading_time();
    }
}

impl Filterable for Article {
    const FACETS: &'static [&'static str] = &["category", "status"];

    fn facet(&self, field: &str) -> Option<String> {
        match field {
            "category" => Some(self.category.clone()),
            "status" => Some(self.status.as_str().to_string()),
            _ => None,
        }
    }

    fn search_text(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str(), self.excerpt.as_str(), self.author.as_str()];
        fields.extend(self.tags.iter().map(String::as_str));
        fields
    }

    fn is_featured(&self) -> bool {
        self.featured
    }
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
    fn popularity(&self) -> u64 {
        self.view_count
    }
    fn likes(&self) -> u64 {
        self.like_count
    }
}
