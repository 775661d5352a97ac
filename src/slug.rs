//! Slug derivation and validation.
//!
//! `derive_slug` is the write side of the contract `SLUG_REGEX` checks on the
//! read side: anything derived here (except the empty string) validates, and
//! re-deriving an already-valid slug is a fixed point.

use regex::Regex;

/// Upper bound on derived slug length.
pub const MAX_SLUG_LEN: usize = 50;

lazy_static::lazy_static! {
    /// Valid slug pattern: lowercase alphanumeric runs separated by single hyphens.
    static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
}

pub fn is_valid_slug(slug: &str) -> bool {
    SLUG_REGEX.is_match(slug)
}

/// Derives a URL-safe slug from a title.
///
/// Lower-cases, strips everything outside `[a-z0-9\s-]`, collapses whitespace
/// runs and repeated hyphens to a single hyphen, trims hyphens at both ends
/// and caps the result at [`MAX_SLUG_LEN`]. Pure and infallible: an empty or
/// all-symbol title yields an empty string, which callers treat as "no slug
/// available" rather than an error.
pub fn derive_slug(title: &str) -> String {
    let mut slug = String::with_capacity(title.len().min(MAX_SLUG_LEN));
    let mut pending_hyphen = false;

    for c in title.to_lowercase().chars() {
        let c = match c {
            'a'..='z' | '0'..='9' => c,
            c if c.is_whitespace() => '-',
            '-' => '-',
            _ => continue,
        };
        if c == '-' {
            // Collapse runs and drop leading hyphens in one pass.
            pending_hyphen = !slug.is_empty();
        } else {
            if pending_hyphen {
                slug.push('-');
                pending_hyphen = false;
            }
            slug.push(c);
        }
    }

    // Slug is pure ASCII at this point, so byte truncation is safe.
    slug.truncate(MAX_SLUG_LEN);
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}
