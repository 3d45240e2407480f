// ABOUTME: Data model for extraction results: fragments, partitions, metadata, and ExtractedContent.
// ABOUTME: ExtractedContent is the sole contract between the extraction core and downstream chunking/embedding stages.

use serde::{Deserialize, Serialize};

use crate::digest::digest;

/// Opaque location of an extracted fragment within the source document.
///
/// For DOM sources this is the node's index in document (tree traversal)
/// order; for plain-text sources it is the block ordinal. Positions are
/// only meaningful relative to other positions from the same `load` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourcePosition {
    pub index: usize,
}

impl SourcePosition {
    pub fn new(index: usize) -> Self {
        Self { index }
    }
}

/// One unit of extracted text plus its originating selector and position.
///
/// Intermediate value: loaders emit fragments in processing order and
/// assemble them into [`ExtractedContent`].
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub text: String,
    pub selector: String,
    pub position: SourcePosition,
}

/// Provenance entry parallel to one segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partition {
    pub selector: String,
    #[serde(rename = "sourcePosition")]
    pub position: SourcePosition,
}

/// Metadata attached to an extraction result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentMetadata {
    /// One entry per segment, in the same order.
    pub partitions: Vec<Partition>,
    /// Soft diagnostics accumulated during extraction; absent when none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<String>>,
}

/// The result of loading a document: normalized text segments with
/// provenance metadata and a deterministic content digest.
///
/// Immutable once returned. `segments[i]` corresponds to
/// `metadata.partitions[i]` for all `i`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedContent {
    pub segments: Vec<String>,
    pub digest: String,
    pub metadata: ContentMetadata,
}

impl ExtractedContent {
    /// Assembles a result from fragments in emission order.
    ///
    /// Computes the digest over the segment sequence and drops the warning
    /// list when empty.
    pub fn from_fragments(fragments: Vec<Fragment>, warnings: Vec<String>) -> Self {
        let mut segments = Vec::with_capacity(fragments.len());
        let mut partitions = Vec::with_capacity(fragments.len());
        for fragment in fragments {
            partitions.push(Partition {
                selector: fragment.selector,
                position: fragment.position,
            });
            segments.push(fragment.text);
        }
        let digest = digest(&segments);
        Self {
            segments,
            digest,
            metadata: ContentMetadata {
                partitions,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
            },
        }
    }

    /// Returns true if no segment carries any text.
    pub fn is_empty(&self) -> bool {
        self.segments.iter().all(|s| s.is_empty())
    }

    /// Returns true if extraction accumulated warnings.
    pub fn has_warnings(&self) -> bool {
        self.metadata
            .warnings
            .as_ref()
            .map_or(false, |w| !w.is_empty())
    }
}
