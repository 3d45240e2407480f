// ABOUTME: Main library entry point for the corpus extraction core.
// ABOUTME: Re-exports the public API: ComponentRegistry, Loader, HtmlLoader, ExtractedContent, ExtractError, Schema.

//! Corpus extraction core.
//!
//! Converts raw document bytes plus a source URI into a normalized
//! sequence of text segments with provenance metadata and a deterministic
//! content digest, ready for a retrieval index. Interchangeable
//! processing strategies (loaders, splitters) are registered once in a
//! [`ComponentRegistry`] and constructed from externally supplied,
//! schema-validated configuration.
//!
//! # Example
//!
//! ```
//! use corpus_extract::{builtin_registry, HtmlLoader};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), corpus_extract::ExtractError> {
//! let registry = builtin_registry();
//! let component = registry.create(HtmlLoader::IDENTIFIER, &json!({
//!     "contentExtraction": [
//!         { "url": "https://example.com/*", "selectors": [{ "selector": "article" }] }
//!     ]
//! }))?;
//!
//! let loader = component.as_loader().expect("html component is a loader");
//! let content = loader.load(
//!     b"<html><body><article>Hello <b>World</b></article></body></html>",
//!     "https://example.com/page",
//! )?;
//! assert_eq!(content.segments, ["Hello World"]);
//! # Ok(())
//! # }
//! ```

pub mod content;
pub mod digest;
pub mod error;
pub mod loader;
pub mod matcher;
pub mod registry;
pub mod schema;
pub mod selector;
pub mod splitter;

pub use crate::content::{ContentMetadata, ExtractedContent, Fragment, Partition, SourcePosition};
pub use crate::digest::{digest, SEGMENT_SEPARATOR};
pub use crate::error::ExtractError;
pub use crate::loader::{HtmlLoader, Loader, TextLoader};
pub use crate::matcher::UrlMatcher;
pub use crate::registry::{builtin_registry, Component, ComponentDefinition, ComponentRegistry};
pub use crate::schema::{ObjectSchema, Schema, Violation};
pub use crate::splitter::{ParagraphSplitter, Splitter};
