//! In-memory search, facet filtering and sorting over a materialized
//! collection. Every listing surface goes through [`apply`]; the function is
//! pure so it composes the same way against remote- and fallback-served data.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::{Error, Result};

/// Sentinel facet value that disables filtering on that facet.
pub const FACET_ALL: &str = "All";

/// Closed set of list orderings. Ties keep collection order (stable sort).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Latest,
    Oldest,
    Popular,
    Liked,
}

/// Entities declare their filterable surface statically. Facet keys outside
/// [`Filterable::FACETS`] are rejected when a query is applied instead of
/// silently matching nothing.
pub trait Filterable {
    const FACETS: &'static [&'static str];

    /// Value of a declared facet field. Only called with declared keys.
    fn facet(&self, field: &str) -> Option<String>;

    /// Fields searched by case-insensitive substring: title, the secondary
    /// text fields and any tag/skill/tech list.
    fn search_text(&self) -> Vec<&str>;

    fn is_featured(&self) -> bool;
    fn created_at(&self) -> DateTime<Utc>;

    /// View-count style metric backing [`SortKey::Popular`].
    fn popularity(&self) -> u64 {
        0
    }

    /// Like-count style metric backing [`SortKey::Liked`].
    fn likes(&self) -> u64 {
        0
    }
}

#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    pub search: Option<String>,
    pub facets: BTreeMap<String, String>,
    pub sort: Option<SortKey>,
    pub featured_only: bool,
}

impl QueryOptions {
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn facet(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.facets.insert(field.into(), value.into());
        self
    }

    pub fn sort(mut self, key: SortKey) -> Self {
        self.sort = Some(key);
        self
    }

    pub fn featured_only(mut self, on: bool) -> Self {
        self.featured_only = on;
        self
    }
}

/// Applies search, facets, the featured filter and the sort to `items`.
///
/// All predicates AND-compose. With no options set this is the identity:
/// the input comes back unchanged, in order. Unknown facet keys are a
/// `ValidationError`.
pub fn apply<T: Filterable + Clone>(items: &[T], opts: &QueryOptions) -> Result<Vec<T>> {
    for key in opts.facets.keys() {
        if !T::FACETS.contains(&key.as_str()) {
            return Err(Error::Validation(format!(
                "unknown facet '{key}' (declared: {})",
                T::FACETS.join(", ")
            )));
        }
    }

    let needle = opts
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let mut out: Vec<T> = items
        .iter()
        .filter(|item| {
            if opts.featured_only && !item.is_featured() {
                return false;
            }
            for (field, value) in &opts.facets {
                if value == FACET_ALL {
                    continue;
                }
                if item.facet(field).as_deref() != Some(value.as_str()) {
                    return false;
                }
            }
            match &needle {
                Some(needle) => item
                    .search_text()
                    .iter()
                    .any(|text| text.to_lowercase().contains(needle)),
                None => true,
            }
        })
        .cloned()
        .collect();

    if let Some(sort) = opts.sort {
        match sort {
            SortKey::Latest => out.sort_by(|a, b| b.created_at().cmp(&a.created_at())),
            SortKey::Oldest => out.sort_by(|a, b| a.created_at().cmp(&b.created_at())),
            SortKey::Popular => out.sort_by(|a, b| b.popularity().cmp(&a.popularity())),
            SortKey::Liked => out.sort_by(|a, b| b.likes().cmp(&a.likes())),
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        title: String,
        author: String,
        tags: Vec<String>,
        category: String,
        featured: bool,
        created_at: DateTime<Utc>,
        views: u64,
    }

    impl Filterable for Item {
        const FACETS: &'static [&'static str] = &["category"];

        fn facet(&self, field: &str) -> Option<String> {
            (field == "category").then(|| self.category.clone())
        }
        fn search_text(&self) -> Vec<&str> {
            let mut fields = vec![self.title.as_str(), self.author.as_str()];
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
            self.views
        }
    }

    fn item(title: &str, category: &str, featured: bool, age_days: i64, views: u64) -> Item {
        Item {
            title: title.into(),
            author: "dimas".into(),
            tags: vec!["rust".into()],
            category: category.into(),
            featured,
            created_at: Utc::now() - Duration::days(age_days),
            views,
        }
    }

    fn corpus() -> Vec<Item> {
        vec![
            item("Intro to X", "guides", true, 3, 10),
            item("Intro to Y", "guides", false, 2, 30),
            item("Guide to Z", "reference", false, 1, 20),
        ]
    }

    #[test]
    fn test_empty_options_is_identity() {
        let items = corpus();
        let out = apply(&items, &QueryOptions::default().search("")).unwrap();
        assert_eq!(out, items);
    }

    #[test]
    fn test_search_is_substring_and_case_insensitive() {
        let items = corpus();
        let out = apply(&items, &QueryOptions::default().search("INTRO")).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].title, "Intro to X");
        assert_eq!(out[1].title, "Intro to Y");
    }

    #[test]
    fn test_search_covers_tag_lists() {
        let items = corpus();
        let out = apply(&items, &QueryOptions::default().search("rust")).unwrap();
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn test_facet_exact_match_and_all_sentinel() {
        let items = corpus();
        let out = apply(&items, &QueryOptions::default().facet("category", "guides")).unwrap();
        assert_eq!(out.len(), 2);

        // Substring does not count as a facet match.
        let out = apply(&items, &QueryOptions::default().facet("category", "guide")).unwrap();
        assert!(out.is_empty());

        let out = apply(&items, &QueryOptions::default().facet("category", FACET_ALL)).unwrap();
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn test_undeclared_facet_is_rejected() {
        let items = corpus();
        let err = apply(&items, &QueryOptions::default().facet("issuer", "AWS")).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_featured_composes_with_other_filters() {
        let items = corpus();
        let opts = QueryOptions::default()
            .search("intro")
            .facet("category", "guides")
            .featured_only(true);
        let out = apply(&items, &opts).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "Intro to X");
    }

    #[test]
    fn test_sort_latest_and_popular() {
        let items = corpus();
        let out = apply(&items, &QueryOptions::default().sort(SortKey::Latest)).unwrap();
        assert_eq!(out[0].title, "Guide to Z");

        let out = apply(&items, &QueryOptions::default().sort(SortKey::Popular)).unwrap();
        assert_eq!(out[0].title, "Intro to Y");
    }

    #[test]
    fn test_sort_ties_keep_collection_order() {
        let mut items = corpus();
        for item in &mut items {
            item.views = 7;
        }
        let out = apply(&items, &QueryOptions::default().sort(SortKey::Popular)).unwrap();
        let titles: Vec<_> = out.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, ["Intro to X", "Intro to Y", "Guide to Z"]);
    }
}
