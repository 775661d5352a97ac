//! Structured article bodies: typed content blocks and derived metrics.
//!
//! An article body is an ordered sequence of [`ContentBlock`]s. Block order is
//! publish order; reordering happens through explicit moves, never a re-sort.
//! The reading-time figure is derived from the word count and owned by the
//! article that embeds the blocks (see `model::article`), which recomputes it
//! on every structural mutation.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Reading-speed assumption behind the reading-time estimate.
pub const WORDS_PER_MINUTE: usize = 200;

/// One typed unit of an article body.
///
/// The tag fully determines the shape; a block can only carry its variant's
/// fields. Adding a fifth variant is a compile-visible change at every
/// `match` below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Heading { level: u8, text: String },
    Paragraph { text: String },
    List { items: Vec<String> },
    Code { language: String, text: String },
}

/// Direction for [`move_block`](crate::model::Article::move_block).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}

impl ContentBlock {
    /// Checks that the fields required by this block's tag are populated.
    pub fn validate(&self) -> Result<()> {
        match self {
            ContentBlock::Heading { level, text } => {
                if !(1..=6).contains(level) {
                    return Err(Error::Validation(format!(
                        "heading level must be 1..=6, got {level}"
                    )));
                }
                if text.trim().is_empty() {
                    return Err(Error::Validation("heading text must not be empty".into()));
                }
            }
            ContentBlock::Paragraph { text } => {
                if text.trim().is_empty() {
                    return Err(Error::Validation("paragraph text must not be empty".into()));
                }
            }
            ContentBlock::List { items } => {
                if items.is_empty() {
                    return Err(Error::Validation("list needs at least one item".into()));
                }
            }
            ContentBlock::Code { language: _, text } => {
                if text.trim().is_empty() {
                    return Err(Error::Validation("code text must not be empty".into()));
                }
            }
        }
        Ok(())
    }

    /// Word count of the block's textual content. List items all count; a
    /// code block's language tag does not.
    pub fn words(&self) -> usize {
        match self {
            ContentBlock::Heading { text, .. } => count_words(text),
            ContentBlock::Paragraph { text } => count_words(text),
            ContentBlock::List { items } => items.iter().map(|i| count_words(i)).sum(),
            ContentBlock::Code { text, .. } => count_words(text),
        }
    }
}

/// Validates every block of a body, reporting the first offender by index.
pub fn validate_blocks(blocks: &[ContentBlock]) -> Result<()> {
    for (index, block) in blocks.iter().enumerate() {
        block
            .validate()
            .map_err(|e| Error::Validation(format!("block {index}: {e}")))?;
    }
    Ok(())
}

/// Whitespace-delimited token count.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// `max(1, ceil(words / 200))` minutes.
pub fn reading_time_minutes(word_count: usize) -> u32 {
    (word_count.div_ceil(WORDS_PER_MINUTE)).max(1) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(text: &str) -> ContentBlock {
        ContentBlock::Paragraph { text: text.into() }
    }

    #[test]
    fn test_block_tagged_serialization() {
        let block = ContentBlock::Code {
            language: "rust".into(),
            text: "fn main() {}".into(),
        };
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["type"], "code");
        assert_eq!(json["language"], "rust");

        let back: ContentBlock = serde_json::from_value(json).unwrap();
        assert_eq!(back, block);
    }

    #[test]
    fn test_block_missing_required_field_is_rejected() {
        let raw = serde_json::json!({ "type": "paragraph" });
        assert!(serde_json::from_value::<ContentBlock>(raw).is_err());

        let raw = serde_json::json!({ "type": "heading", "text": "no level" });
        assert!(serde_json::from_value::<ContentBlock>(raw).is_err());
    }

    #[test]
    fn test_validate_rejects_empty_required_fields() {
        assert!(paragraph("   ").validate().is_err());
        assert!(ContentBlock::Heading { level: 2, text: "".into() }.validate().is_err());
        assert!(ContentBlock::Heading { level: 7, text: "deep".into() }.validate().is_err());
        assert!(ContentBlock::List { items: vec![] }.validate().is_err());
        assert!(ContentBlock::Code { language: "sh".into(), text: " ".into() }
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_accepts_well_formed_blocks() {
        assert!(paragraph("one two").validate().is_ok());
        assert!(ContentBlock::Heading { level: 1, text: "Title".into() }.validate().is_ok());
        assert!(ContentBlock::List { items: vec!["a".into()] }.validate().is_ok());
    }

    #[test]
    fn test_validate_blocks_reports_index() {
        let blocks = vec![paragraph("fine"), ContentBlock::List { items: vec![] }];
        let err = validate_blocks(&blocks).unwrap_err();
        assert!(err.to_string().contains("block 1"));
    }

    #[test]
    fn test_word_counting_per_variant() {
        assert_eq!(paragraph("one two three").words(), 3);
        assert_eq!(
            ContentBlock::List { items: vec!["a b".into(), "c".into()] }.words(),
            3
        );
        // Language tag is metadata, not content.
        assert_eq!(
            ContentBlock::Code { language: "rust".into(), text: "let x = 1;".into() }.words(),
            4
        );
    }

    #[test]
    fn test_reading_time_floor_and_ceiling() {
        assert_eq!(reading_time_minutes(0), 1);
        assert_eq!(reading_time_minutes(1), 1);
        assert_eq!(reading_time_minutes(200), 1);
        assert_eq!(reading_time_minutes(201), 2);
        assert_eq!(reading_time_minutes(1000), 5);
    }
}
