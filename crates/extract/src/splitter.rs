// ABOUTME: The Splitter capability contract and a paragraph-packing implementation.
// ABOUTME: Splitters rechunk extracted segments for embedding; registered through the same component registry as loaders.

//! Text splitters.
//!
//! Splitters take extracted text and rechunk it into pieces sized for an
//! embedding model. Only the registry contract is load-bearing here; the
//! paragraph splitter is the reference strategy.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::ExtractError;
use crate::registry::{Component, ComponentDefinition};
use crate::schema::{ObjectSchema, Schema};

/// The splitter capability. Immutable after construction, shareable
/// across threads.
pub trait Splitter: Send + Sync {
    /// Splits text into chunks, preserving order.
    fn split(&self, text: &str) -> Vec<String>;
}

fn default_chunk_size() -> usize {
    1000
}

/// Configuration for [`ParagraphSplitter`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParagraphSplitterOptions {
    /// Maximum chunk length in characters.
    pub chunk_size: usize,
}

impl Default for ParagraphSplitterOptions {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
        }
    }
}

/// Packs blank-line-separated paragraphs into chunks of at most
/// `chunk_size` characters; a paragraph longer than the limit is cut at
/// character boundaries.
#[derive(Debug, Clone)]
pub struct ParagraphSplitter {
    chunk_size: usize,
}

impl ParagraphSplitter {
    pub const IDENTIFIER: &'static str = "rag.splitter.paragraph";
    pub const DISPLAY_NAME: &'static str = "Paragraph splitter";

    /// Builds a splitter. A zero chunk size cannot pack anything and is
    /// rejected as a construction failure.
    pub fn new(options: ParagraphSplitterOptions) -> Result<Self, ExtractError> {
        if options.chunk_size == 0 {
            return Err(ExtractError::construction(
                Self::IDENTIFIER,
                "chunkSize must be greater than zero",
            ));
        }
        Ok(Self {
            chunk_size: options.chunk_size,
        })
    }

    /// The options schema exposed through the component registry.
    pub fn options_schema() -> Schema {
        Schema::object(ObjectSchema::new().optional("chunkSize", Schema::Integer))
    }

    /// Registry definition for this splitter.
    pub fn definition() -> ComponentDefinition {
        ComponentDefinition::new(
            Self::IDENTIFIER,
            Self::DISPLAY_NAME,
            Self::options_schema(),
            |raw| {
                let options: ParagraphSplitterOptions = serde_json::from_value(raw.clone())
                    .map_err(|e| ExtractError::construction(ParagraphSplitter::IDENTIFIER, e))?;
                Ok(Component::Splitter(Arc::new(ParagraphSplitter::new(
                    options,
                )?)))
            },
        )
    }

    fn push_paragraph(&self, chunks: &mut Vec<String>, current: &mut String, paragraph: &str) {
        if paragraph.chars().count() > self.chunk_size {
            // Oversized paragraph: flush and cut at character boundaries.
            if !current.is_empty() {
                chunks.push(std::mem::take(current));
            }
            let chars: Vec<char> = paragraph.chars().collect();
            for piece in chars.chunks(self.chunk_size) {
                chunks.push(piece.iter().collect());
            }
            return;
        }

        let needed = if current.is_empty() {
            paragraph.chars().count()
        } else {
            current.chars().count() + 2 + paragraph.chars().count()
        };
        if needed > self.chunk_size && !current.is_empty() {
            chunks.push(std::mem::take(current));
        }
        if !current.is_empty() {
            current.push_str("\n\n");
        }
        current.push_str(paragraph);
    }
}

impl Splitter for ParagraphSplitter {
    fn split(&self, text: &str) -> Vec<String> {
        let normalized = text.replace("\r\n", "\n");
        let mut chunks = Vec::new();
        let mut current = String::new();

        for paragraph in normalized.split("\n\n") {
            let paragraph = paragraph.trim();
            if paragraph.is_empty() {
                continue;
            }
            self.push_paragraph(&mut chunks, &mut current, paragraph);
        }
        if !current.is_empty() {
            chunks.push(current);
        }
        chunks
    }
}
