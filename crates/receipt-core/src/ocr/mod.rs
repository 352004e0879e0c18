//! Text detection seam and document assembly.
//!
//! A detection service returns layout blocks for one stored object. Only
//! line blocks carrying text contribute to the document; they are joined in
//! the order the service returned them.

mod recorded;
#[cfg(feature = "native")]
mod local;

pub use recorded::RecordedOcr;
#[cfg(feature = "native")]
pub use local::LocalOcr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::OcrError;
use crate::models::event::ObjectRef;

/// Layout element kind reported by a detection service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BlockType {
    Page,
    Line,
    Word,
    /// Any tag we do not interpret.
    Other,
}

impl<'de> Deserialize<'de> for BlockType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(match tag.to_ascii_uppercase().as_str() {
            "PAGE" => BlockType::Page,
            "LINE" => BlockType::Line,
            "WORD" => BlockType::Word,
            _ => BlockType::Other,
        })
    }
}

/// One layout block from a detection response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Block kind, when the service tags it.
    #[serde(rename = "BlockType", default, skip_serializing_if = "Option::is_none")]
    pub block_type: Option<BlockType>,

    /// Recognized text.
    #[serde(rename = "Text", default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Alternate text field some service versions populate instead of `Text`.
    #[serde(rename = "DetectedText", default, skip_serializing_if = "Option::is_none")]
    pub detected_text: Option<String>,
}

impl Block {
    /// A tagged line block.
    pub fn line(text: impl Into<String>) -> Self {
        Self {
            block_type: Some(BlockType::Line),
            text: Some(text.into()),
            detected_text: None,
        }
    }

    /// A block of any kind.
    pub fn of_type(block_type: BlockType, text: impl Into<String>) -> Self {
        Self {
            block_type: Some(block_type),
            text: Some(text.into()),
            detected_text: None,
        }
    }

    /// Recognized text, preferring `Text` and falling back to `DetectedText`.
    pub fn recognized_text(&self) -> Option<&str> {
        self.text
            .as_deref()
            .filter(|t| !t.is_empty())
            .or(self.detected_text.as_deref())
            .filter(|t| !t.is_empty())
    }

    /// Whether this block contributes a line to the document.
    pub fn is_text_line(&self) -> bool {
        self.block_type == Some(BlockType::Line) && self.recognized_text().is_some()
    }
}

/// Full detection response envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectionResponse {
    #[serde(rename = "Blocks", default)]
    pub blocks: Vec<Block>,
}

/// Synchronous document text detection for one stored object.
///
/// Implementations make a single attempt; retries belong to whatever
/// redelivers the triggering event.
pub trait OcrService: Send + Sync {
    /// Detect text blocks in the referenced object.
    fn detect_document_text(&self, object: &ObjectRef) -> Result<Vec<Block>, OcrError>;

    /// Service name for logging.
    fn name(&self) -> &str;
}

impl<T: OcrService + ?Sized> OcrService for &T {
    fn detect_document_text(&self, object: &ObjectRef) -> Result<Vec<Block>, OcrError> {
        (**self).detect_document_text(object)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<T: OcrService + ?Sized> OcrService for Box<T> {
    fn detect_document_text(&self, object: &ObjectRef) -> Result<Vec<Block>, OcrError> {
        (**self).detect_document_text(object)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Text assembled from one detection response. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedDocument {
    text: String,
    line_count: usize,
}

impl ExtractedDocument {
    /// Join line blocks with newlines, substituting `sentinel` when none carry text.
    ///
    /// A whitespace-only join also yields the sentinel.
    pub fn from_blocks(blocks: &[Block], sentinel: &str) -> Self {
        let lines: Vec<&str> = blocks
            .iter()
            .filter(|b| b.is_text_line())
            .filter_map(|b| b.recognized_text())
            .collect();

        let text = lines.join("\n");
        if text.trim().is_empty() {
            Self {
                text: sentinel.to_string(),
                line_count: 0,
            }
        } else {
            Self {
                text,
                line_count: lines.len(),
            }
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of lines that came from the service (0 when the sentinel was used).
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// Whether the sentinel stands in for missing text.
    pub fn is_empty_extraction(&self) -> bool {
        self.line_count == 0
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SENTINEL: &str = "no text detected";

    #[test]
    fn test_only_line_blocks_are_joined_in_order() {
        let blocks = vec![
            Block::of_type(BlockType::Page, "whole page"),
            Block::line("CAFE MOCHA"),
            Block::of_type(BlockType::Word, "CAFE"),
            Block::line("Total 250.00"),
            Block { block_type: Some(BlockType::Line), text: None, detected_text: None },
        ];

        let doc = ExtractedDocument::from_blocks(&blocks, SENTINEL);
        assert_eq!(doc.text(), "CAFE MOCHA\nTotal 250.00");
        assert_eq!(doc.line_count(), 2);
        assert!(!doc.is_empty_extraction());
    }

    #[test]
    fn test_detected_text_fallback() {
        let block = Block {
            block_type: Some(BlockType::Line),
            text: Some(String::new()),
            detected_text: Some("PHARMACY".to_string()),
        };
        assert_eq!(block.recognized_text(), Some("PHARMACY"));
        assert_eq!(ExtractedDocument::from_blocks(&[block], SENTINEL).text(), "PHARMACY");
    }

    #[test]
    fn test_empty_extraction_uses_sentinel() {
        let doc = ExtractedDocument::from_blocks(&[], SENTINEL);
        assert_eq!(doc.text(), SENTINEL);
        assert!(doc.is_empty_extraction());

        let untagged = vec![Block { block_type: None, text: Some("x".into()), detected_text: None }];
        assert_eq!(ExtractedDocument::from_blocks(&untagged, SENTINEL).text(), SENTINEL);

        let blank = vec![Block::line("   "), Block::line("\t")];
        assert_eq!(ExtractedDocument::from_blocks(&blank, SENTINEL).text(), SENTINEL);
    }

    #[test]
    fn test_response_decoding() {
        let json = r#"{"Blocks": [
            {"BlockType": "PAGE"},
            {"BlockType": "LINE", "Text": "Uber"},
            {"BlockType": "KEY_VALUE_SET", "Text": "ignored"},
            {"Text": "untagged"}
        ]}"#;
        let response: DetectionResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.blocks.len(), 4);
        assert_eq!(response.blocks[0].block_type, Some(BlockType::Page));
        assert_eq!(response.blocks[2].block_type, Some(BlockType::Other));
        assert_eq!(response.blocks[3].block_type, None);
        assert_eq!(ExtractedDocument::from_blocks(&response.blocks, SENTINEL).text(), "Uber");
    }
}
