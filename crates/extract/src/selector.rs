// ABOUTME: Selector resolution over a parsed HTML document tree.
// ABOUTME: Applies pre-compiled selector items in order, emitting fragments and recording failed selectors.

//! Selector resolution.
//!
//! Given a parsed document and an ordered list of compiled selector items,
//! produces extracted fragments plus diagnostics for selectors that matched
//! nothing. A selector miss is never an error: it is recorded and
//! extraction continues with the remaining items.
//!
//! Key behaviors:
//! - Items are applied in the given order; `all` items emit one fragment
//!   per matched node in document order, first-match items emit at most one.
//! - Text extraction flattens descendant text and normalizes whitespace.
//! - Attribute extraction yields the named attribute's value, or an empty
//!   string when the attribute is absent on the matched node.

use std::collections::HashMap;

use ego_tree::NodeId;
use scraper::{ElementRef, Html, Selector};

use crate::content::{Fragment, SourcePosition};

/// How to turn a matched node into fragment text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionKind {
    /// The node's flattened visible text content.
    Text,
    /// The named attribute's string value.
    Attribute(String),
}

/// A selector item with its CSS matcher compiled ahead of time.
///
/// Compiled once at loader construction and reused across `load` calls.
#[derive(Debug, Clone)]
pub struct CompiledSelector {
    /// Original selector source, reported in partitions and warnings.
    pub source: String,
    pub matcher: Selector,
    /// Apply to every matching node instead of the first match only.
    pub all: bool,
    pub kind: ExtractionKind,
}

/// The outcome of resolving a selector sequence against one document.
#[derive(Debug, Default)]
pub struct Resolution {
    /// Fragments in emission order (item order, then document order).
    pub fragments: Vec<Fragment>,
    /// Sources of selectors that matched nothing, in processing order.
    pub failed: Vec<String>,
}

/// Resolves selector items against a document.
pub fn resolve(document: &Html, items: &[&CompiledSelector]) -> Resolution {
    let positions = node_positions(document);
    let mut resolution = Resolution::default();

    for item in items {
        if item.all {
            let mut matched_any = false;
            for element in document.select(&item.matcher) {
                matched_any = true;
                resolution
                    .fragments
                    .push(fragment_for(element, item, &positions));
            }
            if !matched_any {
                resolution.failed.push(item.source.clone());
            }
        } else {
            match document.select(&item.matcher).next() {
                Some(element) => resolution
                    .fragments
                    .push(fragment_for(element, item, &positions)),
                None => resolution.failed.push(item.source.clone()),
            }
        }
    }

    resolution
}

/// Maps every node to its index in document (tree traversal) order.
fn node_positions(document: &Html) -> HashMap<NodeId, usize> {
    document
        .tree
        .root()
        .descendants()
        .enumerate()
        .map(|(index, node)| (node.id(), index))
        .collect()
}

fn fragment_for(
    element: ElementRef<'_>,
    item: &CompiledSelector,
    positions: &HashMap<NodeId, usize>,
) -> Fragment {
    let text = match &item.kind {
        ExtractionKind::Text => {
            normalize_whitespace(&element.text().collect::<Vec<_>>().join(" "))
        }
        ExtractionKind::Attribute(name) => element
            .value()
            .attr(name)
            .map(|value| value.trim().to_string())
            .unwrap_or_default(),
    };
    Fragment {
        text,
        selector: item.source.clone(),
        position: SourcePosition::new(positions.get(&element.id()).copied().unwrap_or(0)),
    }
}

/// Collapses runs of whitespace into single spaces.
fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
