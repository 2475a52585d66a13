// ABOUTME: Error types for feed building operations.
// ABOUTME: Provides FeedError enum with Xml, Encoding, Manifest, and Invalid variants.

use std::fmt;
use thiserror::Error;

use crate::validate::ValidationIssue;

/// Errors that can occur while building or serializing a feed.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The XML writer failed while serializing the document.
    #[error("failed to write feed XML: {0}")]
    Xml(String),

    /// The serialized document was not valid UTF-8.
    #[error("feed XML is not valid UTF-8: {0}")]
    Encoding(String),

    /// The feed manifest could not be read into a feed.
    #[error("invalid feed manifest: {0}")]
    Manifest(String),

    /// Strict validation found problems with the feed contents.
    #[error("feed failed validation: {}", format_issues(.0))]
    Invalid(Vec<ValidationIssue>),
}

impl FeedError {
    /// Creates an Xml error from an underlying writer error.
    pub fn xml(err: impl fmt::Display) -> Self {
        FeedError::Xml(err.to_string())
    }

    /// Creates a Manifest error with a custom message.
    pub fn manifest(msg: impl Into<String>) -> Self {
        FeedError::Manifest(msg.into())
    }

    /// Returns the validation issues if this is an Invalid error.
    pub fn issues(&self) -> &[ValidationIssue] {
        match self {
            FeedError::Invalid(issues) => issues,
            _ => &[],
        }
    }
}

fn format_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
