// ABOUTME: Rule-driven HTML loader: URL-scoped selection rules over a parsed DOM.
// ABOUTME: Pre-compiles matchers and selectors at construction; load applies them with fallback and warning semantics.

//! The HTML loader.
//!
//! Configuration supplies URL-scoped selection rules. On `load`, the rules
//! whose pattern matches the document URL contribute their selectors in
//! order; if none of the applicable selectors extracts text, a synthetic
//! `body` selector is appended so every document gets at least one text
//! extraction attempt. Selector misses become warnings, never errors.
//!
//! All URL patterns and CSS selectors are compiled once at construction
//! and reused across `load` calls, so one loader instance can serve many
//! concurrent loads without recompilation.

use std::sync::Arc;

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::content::ExtractedContent;
use crate::error::ExtractError;
use crate::loader::{decode_bytes, Loader};
use crate::matcher::UrlMatcher;
use crate::registry::{Component, ComponentDefinition};
use crate::schema::{ObjectSchema, Schema};
use crate::selector::{resolve, CompiledSelector, ExtractionKind};

/// Selector injected when no applicable rule extracts text.
const FALLBACK_SELECTOR: &str = "body";

const FALLBACK_WARNING: &str =
    "No content selector provided for this URL. The default selector `body` always contains redundant content.";

static FALLBACK: Lazy<CompiledSelector> = Lazy::new(|| CompiledSelector {
    source: FALLBACK_SELECTOR.to_string(),
    matcher: Selector::parse(FALLBACK_SELECTOR).unwrap(),
    all: false,
    kind: ExtractionKind::Text,
});

/// How a selector item turns matched nodes into text (wire form).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectorKind {
    /// The node's flattened visible text.
    #[default]
    DomText,
    /// The node's `content` attribute (meta tags).
    DomContentAttr,
}

/// One selector item of a selection rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectorItem {
    pub selector: String,
    /// Apply to every matching node instead of the first match only.
    #[serde(default)]
    pub all: bool,
    #[serde(rename = "type", default)]
    pub kind: SelectorKind,
}

/// A selection rule: selectors applied to documents whose URL matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionRule {
    pub url: String,
    #[serde(default)]
    pub selectors: Vec<SelectorItem>,
}

/// Parser options. The object is open so callers can pass engine-specific
/// settings through opaquely; only `fragment` is interpreted here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HtmlParseOptions {
    /// Parse the input as a fragment instead of a full document.
    pub fragment: bool,
    #[serde(flatten)]
    pub rest: serde_json::Map<String, Value>,
}

/// Validated configuration for [`HtmlLoader`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HtmlLoaderOptions {
    pub parser: HtmlParseOptions,
    pub content_extraction: Vec<SelectionRule>,
}

#[derive(Debug)]
struct CompiledRule {
    matcher: UrlMatcher,
    selectors: Vec<CompiledSelector>,
}

/// Rule-driven HTML content loader.
#[derive(Debug)]
pub struct HtmlLoader {
    fragment: bool,
    rules: Vec<CompiledRule>,
}

impl HtmlLoader {
    pub const IDENTIFIER: &'static str = "rag.loader.html";
    pub const DISPLAY_NAME: &'static str = "HTML loader";

    /// Builds a loader, compiling every URL pattern and CSS selector.
    ///
    /// An invalid URL pattern fails with [`ExtractError::InvalidPattern`];
    /// an invalid CSS selector fails with [`ExtractError::Construction`].
    pub fn new(options: HtmlLoaderOptions) -> Result<Self, ExtractError> {
        let mut rules = Vec::with_capacity(options.content_extraction.len());
        for rule in &options.content_extraction {
            let matcher = UrlMatcher::compile(&rule.url)?;
            let mut selectors = Vec::with_capacity(rule.selectors.len());
            for item in &rule.selectors {
                let compiled = Selector::parse(&item.selector).map_err(|e| {
                    ExtractError::construction(
                        Self::IDENTIFIER,
                        format!("invalid selector `{}`: {e}", item.selector),
                    )
                })?;
                selectors.push(CompiledSelector {
                    source: item.selector.clone(),
                    matcher: compiled,
                    all: item.all,
                    kind: match item.kind {
                        SelectorKind::DomText => ExtractionKind::Text,
                        SelectorKind::DomContentAttr => {
                            ExtractionKind::Attribute("content".to_string())
                        }
                    },
                });
            }
            rules.push(CompiledRule { matcher, selectors });
        }
        debug!(rules = rules.len(), "compiled HTML loader configuration");
        Ok(Self {
            fragment: options.parser.fragment,
            rules,
        })
    }

    /// The options schema exposed through the component registry.
    pub fn options_schema() -> Schema {
        Schema::object(
            ObjectSchema::new()
                .optional("parser", Schema::OpenObject)
                .optional(
                    "contentExtraction",
                    Schema::array(Schema::object(
                        ObjectSchema::new()
                            .required("url", Schema::String)
                            .required(
                                "selectors",
                                Schema::array(Schema::object(
                                    ObjectSchema::new()
                                        .required("selector", Schema::String)
                                        .optional("all", Schema::Bool)
                                        .optional(
                                            "type",
                                            Schema::string_enum(["dom-text", "dom-content-attr"]),
                                        ),
                                )),
                            ),
                    )),
                ),
        )
    }

    /// Registry definition for this loader.
    pub fn definition() -> ComponentDefinition {
        ComponentDefinition::new(
            Self::IDENTIFIER,
            Self::DISPLAY_NAME,
            Self::options_schema(),
            |raw| {
                let options: HtmlLoaderOptions = serde_json::from_value(raw.clone())
                    .map_err(|e| ExtractError::construction(HtmlLoader::IDENTIFIER, e))?;
                Ok(Component::Loader(Arc::new(HtmlLoader::new(options)?)))
            },
        )
    }
}

impl Loader for HtmlLoader {
    fn supports(&self, mime: &str) -> bool {
        mime.to_ascii_lowercase().contains("html")
    }

    fn load(&self, bytes: &[u8], url: &str) -> Result<ExtractedContent, ExtractError> {
        let text = decode_bytes(bytes)?;
        let document = if self.fragment {
            Html::parse_fragment(&text)
        } else {
            Html::parse_document(&text)
        };

        // Rule order, then within-rule order.
        let mut gathered: Vec<&CompiledSelector> = Vec::new();
        for rule in &self.rules {
            if rule.matcher.matches(url) {
                gathered.extend(rule.selectors.iter());
            }
        }

        let mut warnings = Vec::new();
        let has_text_selector = gathered
            .iter()
            .any(|item| matches!(item.kind, ExtractionKind::Text));
        if !has_text_selector {
            warn!(url, "no text selector applies, falling back to `body`");
            gathered.push(&FALLBACK);
            warnings.push(FALLBACK_WARNING.to_string());
        }

        let resolution = resolve(&document, &gathered);
        if !resolution.failed.is_empty() {
            warn!(
                url,
                failed = resolution.failed.len(),
                "selectors matched nothing"
            );
            warnings.push(format!(
                "Select element failed for selector(s): {}",
                resolution
                    .failed
                    .iter()
                    .map(|s| format!("`{s}`"))
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }

        Ok(ExtractedContent::from_fragments(
            resolution.fragments,
            warnings,
        ))
    }
}
