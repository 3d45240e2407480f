// ABOUTME: Deterministic content digest over extracted segments.
// ABOUTME: SHA-256 of the segments joined by a fixed four-newline separator, hex-encoded.

//! Content digests.
//!
//! Downstream indexing stages use the digest as a change-detection and
//! deduplication key, so it must be a pure function of the segment
//! sequence: stable across process restarts and platforms, with no
//! timestamps or randomness mixed in.

use sha2::{Digest, Sha256};

/// Separator placed between segments before hashing.
///
/// Four newlines are distinguishable from any plausible segment content,
/// which is whitespace-normalized before it gets here.
pub const SEGMENT_SEPARATOR: &str = "\n\n\n\n";

/// Computes the hex-encoded SHA-256 digest of a segment sequence.
pub fn digest<S: AsRef<str>>(segments: &[S]) -> String {
    let mut hasher = Sha256::new();
    let mut first = true;
    for segment in segments {
        if !first {
            hasher.update(SEGMENT_SEPARATOR.as_bytes());
        }
        hasher.update(segment.as_ref().as_bytes());
        first = false;
    }
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_deterministic() {
        let a = digest(&["Hello World", "A page"]);
        let b = digest(&["Hello World", "A page"]);
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn digest_matches_known_value() {
        // SHA-256 of the single segment "Hello World".
        assert_eq!(
            digest(&["Hello World"]),
            "a591a6d40bf420404a011733cfb7b190d62c65bf0bcda32b57b277d9ad9f146e"
        );
    }

    #[test]
    fn digest_of_empty_segment_matches_empty_input() {
        // SHA-256 of the empty string.
        assert_eq!(
            digest(&[""]),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn digest_distinguishes_segment_content() {
        assert_ne!(digest(&["a", "b"]), digest(&["a", "c"]));
        assert_ne!(digest(&["ab"]), digest(&["a", "b"]));
    }
}
