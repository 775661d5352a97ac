//! RSS 2.0 feed of published articles.
//!
//! Served through the repository so the feed keeps working (from samples or
//! saved fallback data) when the remote store is down.

use axum::{body::Body, http::header, response::Response};
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::model::Article;
use crate::query::{self, QueryOptions, SortKey};
use crate::repo::Repository;

const FEED_LIMIT: usize = 50;

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn rfc822(dt: &DateTime<Utc>) -> String {
    dt.format("%a, %d %b %Y %H:%M:%S +0000").to_string()
}

/// GET /rss.xml
pub async fn rss_feed() -> Result<Response> {
    let base_url = std::env::var("SITE_URL").unwrap_or_else(|_| "https://example.site".to_string());
    let site_title = std::env::var("SITE_TITLE").unwrap_or_else(|_| "Personal Site".to_string());
    let site_description = std::env::var("SITE_DESCRIPTION")
        .unwrap_or_else(|_| "Latest articles and notes".to_string());

    let repo: Repository<Article> = Repository::new();
    let articles = repo.get_all().await?.value;
    let published = query::apply(
        &articles,
        &QueryOptions::default()
            .facet("status", "published")
            .sort(SortKey::Latest),
    )?;

    let mut items = String::new();
    for article in published.iter().take(FEED_LIMIT) {
        items.push_str(&format!(
            "    <item>\n      <title>{}</title>\n      <link>{}/articles/{}</link>\n      <guid>{}/articles/{}</guid>\n      <description>{}</description>\n      <pubDate>{}</pubDate>\n    </item>\n",
            escape_xml(&article.title),
            base_url,
            article.slug,
            base_url,
            article.slug,
            escape_xml(&article.excerpt),
            rfc822(&article.created_at),
        ));
    }

    let feed = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<rss version=\"2.0\">\n  <channel>\n    <title>{}</title>\n    <link>{}</link>\n    <description>{}</description>\n    <lastBuildDate>{}</lastBuildDate>\n{}  </channel>\n</rss>\n",
        escape_xml(&site_title),
        base_url,
        escape_xml(&site_description),
        rfc822(&Utc::now()),
        items,
    );

    Ok(Response::builder()
        .status(200)
        .header(header::CONTENT_TYPE, "application/rss+xml; charset=utf-8")
        .body(Body::from(feed))
        .expect("static response parts are valid"))
}
