// ABOUTME: Plain-text and markdown loader emitting one segment per blank-line-separated block.
// ABOUTME: Follows the same Loader contract and ExtractedContent shape as the HTML loader.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::content::{ExtractedContent, Fragment, SourcePosition};
use crate::error::ExtractError;
use crate::loader::{decode_bytes, Loader};
use crate::registry::{Component, ComponentDefinition};
use crate::schema::{ObjectSchema, Schema};

/// Selector label recorded in partitions for text blocks.
const BLOCK_SELECTOR: &str = "block";

/// Configuration for [`TextLoader`]. Currently empty; kept as a struct so
/// the wire format can grow without breaking persisted configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextLoaderOptions {}

/// Loader for plain-text and markdown documents.
///
/// Splits the decoded text on blank lines and emits one segment per
/// block, preserving block order; the block ordinal doubles as the
/// source position. Empty input degrades to a single empty segment,
/// mirroring the HTML loader's edge-case policy.
#[derive(Debug, Clone, Default)]
pub struct TextLoader;

impl TextLoader {
    pub const IDENTIFIER: &'static str = "rag.loader.text";
    pub const DISPLAY_NAME: &'static str = "Text loader";

    pub fn new(_options: TextLoaderOptions) -> Self {
        Self
    }

    /// The options schema exposed through the component registry.
    pub fn options_schema() -> Schema {
        Schema::object(ObjectSchema::new())
    }

    /// Registry definition for this loader.
    pub fn definition() -> ComponentDefinition {
        ComponentDefinition::new(
            Self::IDENTIFIER,
            Self::DISPLAY_NAME,
            Self::options_schema(),
            |raw| {
                let options: TextLoaderOptions = serde_json::from_value(raw.clone())
                    .map_err(|e| ExtractError::construction(TextLoader::IDENTIFIER, e))?;
                Ok(Component::Loader(Arc::new(TextLoader::new(options))))
            },
        )
    }
}

impl Loader for TextLoader {
    fn supports(&self, mime: &str) -> bool {
        let mime = mime.to_ascii_lowercase();
        mime.starts_with("text/plain") || mime.contains("markdown")
    }

    fn load(&self, bytes: &[u8], _url: &str) -> Result<ExtractedContent, ExtractError> {
        let text = decode_bytes(bytes)?;
        let normalized = text.replace("\r\n", "\n");

        let mut fragments: Vec<Fragment> = normalized
            .split("\n\n")
            .map(str::trim)
            .filter(|block| !block.is_empty())
            .enumerate()
            .map(|(index, block)| Fragment {
                text: block.to_string(),
                selector: BLOCK_SELECTOR.to_string(),
                position: SourcePosition::new(index),
            })
            .collect();

        if fragments.is_empty() {
            fragments.push(Fragment {
                text: String::new(),
                selector: BLOCK_SELECTOR.to_string(),
                position: SourcePosition::new(0),
            });
        }

        Ok(ExtractedContent::from_fragments(fragments, Vec::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn splits_blocks_on_blank_lines() {
        let loader = TextLoader::default();
        let content = loader
            .load(
                b"First paragraph.\n\nSecond paragraph,\nstill one block.\n\nThird.",
                "file:///notes.txt",
            )
            .unwrap();

        assert_eq!(
            content.segments,
            vec![
                "First paragraph.",
                "Second paragraph,\nstill one block.",
                "Third."
            ]
        );
        let positions: Vec<_> = content
            .metadata
            .partitions
            .iter()
            .map(|p| p.position.index)
            .collect();
        assert_eq!(positions, [0, 1, 2]);
        assert!(content.metadata.warnings.is_none());
    }

    #[test]
    fn windows_line_endings_are_normalized() {
        let loader = TextLoader::default();
        let content = loader.load(b"a\r\n\r\nb", "file:///x.txt").unwrap();
        assert_eq!(content.segments, vec!["a", "b"]);
    }

    #[test]
    fn empty_input_yields_single_empty_segment() {
        let loader = TextLoader::default();
        let content = loader.load(b"", "file:///empty.txt").unwrap();
        assert_eq!(content.segments, vec![""]);
        assert_eq!(content.metadata.partitions.len(), 1);
        assert_eq!(content.metadata.partitions[0].selector, "block");
    }

    #[test]
    fn digest_is_stable_across_loads() {
        let loader = TextLoader::default();
        let a = loader.load(b"one\n\ntwo", "file:///a.md").unwrap();
        let b = loader.load(b"one\n\ntwo", "file:///b.md").unwrap();
        assert_eq!(a.digest, b.digest);
    }

    #[test]
    fn supports_text_mime_types() {
        let loader = TextLoader::default();
        assert!(loader.supports("text/plain"));
        assert!(loader.supports("text/plain; charset=utf-8"));
        assert!(loader.supports("text/markdown"));
        assert!(!loader.supports("text/html"));
    }
}
