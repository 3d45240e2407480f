// ABOUTME: The Loader capability contract and shared byte-decoding helper.
// ABOUTME: Loaders convert raw document bytes plus a source URI into ExtractedContent.

//! Document loaders.
//!
//! A loader converts raw document bytes into extracted text segments with
//! provenance. The contract makes no promise of exclusivity: multiple
//! loaders may claim support for a MIME type, and selection among them is
//! the caller's concern.
//!
//! Submodules:
//! - `html`: rule-driven extraction from HTML documents.
//! - `text`: plain-text and markdown documents.

use std::borrow::Cow;

use crate::content::ExtractedContent;
use crate::error::ExtractError;

pub mod html;
pub mod text;

pub use html::HtmlLoader;
pub use text::TextLoader;

/// The loader capability.
///
/// Implementations are immutable after construction and safe to share
/// across threads; `load` performs no network or disk I/O.
pub trait Loader: Send + Sync {
    /// Returns true if this loader can handle documents of the given
    /// MIME type.
    fn supports(&self, mime: &str) -> bool;

    /// Extracts content from in-memory document bytes.
    ///
    /// Fails with [`ExtractError::Parse`] only when the bytes cannot be
    /// decoded into a document at all; a document that matches zero
    /// selectors degrades to the fallback policy instead of failing.
    fn load(&self, bytes: &[u8], url: &str) -> Result<ExtractedContent, ExtractError>;
}

/// Decodes document bytes to text.
///
/// A byte-order mark wins outright; valid UTF-8 is used as-is; anything
/// else goes through chardetng detection. Input containing NUL bytes
/// (without a BOM) is rejected as binary, and so are bytes the selected
/// encoding cannot decode cleanly.
pub(crate) fn decode_bytes(bytes: &[u8]) -> Result<Cow<'_, str>, ExtractError> {
    if let Some((encoding, _)) = encoding_rs::Encoding::for_bom(bytes) {
        let (decoded, _, had_errors) = encoding.decode(bytes);
        if had_errors {
            return Err(ExtractError::parse(format!(
                "input could not be decoded as {}",
                encoding.name()
            )));
        }
        return Ok(Cow::Owned(decoded.into_owned()));
    }
    if bytes.contains(&0) {
        return Err(ExtractError::parse("input is binary, not a text document"));
    }
    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(Cow::Borrowed(text)),
        Err(_) => {
            let mut detector = chardetng::EncodingDetector::new();
            detector.feed(bytes, true);
            let encoding = detector.guess(None, true);
            let (decoded, _, had_errors) = encoding.decode(bytes);
            if had_errors {
                return Err(ExtractError::parse(format!(
                    "input could not be decoded as {}",
                    encoding.name()
                )));
            }
            Ok(Cow::Owned(decoded.into_owned()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_bytes_pass_through() {
        let decoded = decode_bytes("héllo".as_bytes()).unwrap();
        assert_eq!(decoded, "héllo");
    }

    #[test]
    fn empty_input_decodes_to_empty_text() {
        let decoded = decode_bytes(b"").unwrap();
        assert_eq!(decoded, "");
    }

    #[test]
    fn legacy_encoding_is_detected() {
        // ISO-8859-1 "café" (e-acute = 0xe9).
        let decoded = decode_bytes(&[0x63, 0x61, 0x66, 0xe9]).unwrap();
        assert_eq!(decoded, "café");
    }

    #[test]
    fn nul_bytes_are_rejected_as_binary() {
        let err = decode_bytes(&[0x3c, 0x68, 0x00, 0x74]).unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn utf16_bom_is_honored() {
        // UTF-16LE BOM followed by "hi".
        let decoded = decode_bytes(&[0xff, 0xfe, 0x68, 0x00, 0x69, 0x00]).unwrap();
        assert_eq!(decoded, "hi");
    }
}
