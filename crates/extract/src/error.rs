// ABOUTME: Error types for component construction and document extraction.
// ABOUTME: Provides ExtractError with UnknownComponent, InvalidConfiguration, Construction, Parse, and InvalidPattern variants.

use std::fmt;
use thiserror::Error;

/// Errors that can occur while constructing components or loading documents.
///
/// Selector misses are deliberately not represented here: a selector that
/// matches nothing is recorded as a warning on the successful result.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// No component is registered under the requested identifier.
    #[error("unknown component `{0}`")]
    UnknownComponent(String),

    /// The supplied options failed schema validation for the component.
    #[error("invalid configuration for `{identifier}`: {details}")]
    InvalidConfiguration { identifier: String, details: String },

    /// Options validated structurally but the component's own setup failed.
    #[error("failed to construct `{identifier}`: {details}")]
    Construction { identifier: String, details: String },

    /// The input bytes could not be decoded into a document.
    #[error("failed to parse document: {0}")]
    Parse(String),

    /// A URL pattern in a selection rule could not be compiled.
    #[error("invalid URL pattern `{pattern}`: {details}")]
    InvalidPattern { pattern: String, details: String },
}

impl ExtractError {
    /// Creates an UnknownComponent error.
    pub fn unknown_component(identifier: impl Into<String>) -> Self {
        ExtractError::UnknownComponent(identifier.into())
    }

    /// Creates an InvalidConfiguration error.
    pub fn invalid_configuration(identifier: impl Into<String>, details: impl fmt::Display) -> Self {
        ExtractError::InvalidConfiguration {
            identifier: identifier.into(),
            details: details.to_string(),
        }
    }

    /// Creates a Construction error.
    pub fn construction(identifier: impl Into<String>, details: impl fmt::Display) -> Self {
        ExtractError::Construction {
            identifier: identifier.into(),
            details: details.to_string(),
        }
    }

    /// Creates a Parse error from an underlying parser or decoder error.
    pub fn parse(details: impl fmt::Display) -> Self {
        ExtractError::Parse(details.to_string())
    }

    /// Creates an InvalidPattern error.
    pub fn invalid_pattern(pattern: impl Into<String>, details: impl fmt::Display) -> Self {
        ExtractError::InvalidPattern {
            pattern: pattern.into(),
            details: details.to_string(),
        }
    }

    /// Returns true if this is an UnknownComponent error.
    pub fn is_unknown_component(&self) -> bool {
        matches!(self, ExtractError::UnknownComponent(_))
    }

    /// Returns true if this is an InvalidConfiguration error.
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, ExtractError::InvalidConfiguration { .. })
    }

    /// Returns true if this is a Construction error.
    pub fn is_construction(&self) -> bool {
        matches!(self, ExtractError::Construction { .. })
    }

    /// Returns true if this is a Parse error.
    pub fn is_parse(&self) -> bool {
        matches!(self, ExtractError::Parse(_))
    }

    /// Returns true if this is an InvalidPattern error.
    pub fn is_invalid_pattern(&self) -> bool {
        matches!(self, ExtractError::InvalidPattern { .. })
    }
}
