// ABOUTME: Opt-in strict validation of feed contents before publishing.
// ABOUTME: Checks URLs, language code, enclosures, and publish dates; rendering never calls this.

use std::fmt;

use url::Url;

use crate::error::FeedError;
use crate::feed::Feed;
use crate::item::Item;

/// Where in the feed a problem was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueLocation {
    Channel,
    /// Zero-based item index.
    Item(usize),
}

impl fmt::Display for IssueLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueLocation::Channel => write!(f, "channel"),
            IssueLocation::Item(idx) => write!(f, "item {}", idx),
        }
    }
}

/// A single problem found by [`Feed::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub location: IssueLocation,
    pub field: &'static str,
    pub message: String,
}

impl ValidationIssue {
    fn new(location: IssueLocation, field: &'static str, message: impl Into<String>) -> Self {
        Self {
            location,
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.location, self.field, self.message)
    }
}

impl Feed {
    /// Checks the feed for values that podcast directories will reject.
    ///
    /// This is stricter than rendering, which writes whatever was set.
    /// Returns every issue found as [`FeedError::Invalid`].
    pub fn validate(&self) -> Result<(), FeedError> {
        let issues = self.validation_issues();
        if issues.is_empty() {
            Ok(())
        } else {
            Err(FeedError::Invalid(issues))
        }
    }

    /// Collects validation issues without turning them into an error.
    pub fn validation_issues(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        let here = IssueLocation::Channel;

        check_url(&mut issues, here, "link", Some(self.link()));
        check_url(&mut issues, here, "atom_link", self.atom_link());
        check_url(&mut issues, here, "image", self.image().map(|i| i.url.as_str()));
        check_url(&mut issues, here, "itunes_image", self.itunes_image());

        if let Some(language) = self.language() {
            if !is_language_code(language) {
                issues.push(ValidationIssue::new(
                    here,
                    "language",
                    format!("{:?} is not a two-letter language code", language),
                ));
            }
        }

        for (idx, item) in self.items().iter().enumerate() {
            validate_item(&mut issues, IssueLocation::Item(idx), item);
        }

        issues
    }
}

fn validate_item(issues: &mut Vec<ValidationIssue>, here: IssueLocation, item: &Item) {
    check_url(issues, here, "link", item.link());
    check_url(issues, here, "itunes_image", item.itunes_image());

    let enclosure = item.enclosure();
    match enclosure.url.as_deref() {
        Some(url) => check_url(issues, here, "media_url", Some(url)),
        None => issues.push(ValidationIssue::new(here, "media_url", "missing")),
    }

    if enclosure.length.unwrap_or(0) == 0 {
        issues.push(ValidationIssue::new(here, "media_size", "missing or zero"));
    }

    match enclosure.mime_type.as_deref() {
        Some(mime) if is_mime_type(mime) => {}
        Some(mime) => issues.push(ValidationIssue::new(
            here,
            "media_mime_type",
            format!("{:?} is not a MIME type", mime),
        )),
        None => issues.push(ValidationIssue::new(here, "media_mime_type", "missing")),
    }

    if let Some(date) = item.publish_date() {
        if date.parse().is_none() {
            issues.push(ValidationIssue::new(
                here,
                "publish_date",
                format!("{:?} is not a recognizable date", date.as_str()),
            ));
        }
    }
}

fn check_url(
    issues: &mut Vec<ValidationIssue>,
    here: IssueLocation,
    field: &'static str,
    value: Option<&str>,
) {
    let Some(value) = value else {
        return;
    };
    if let Err(err) = Url::parse(value) {
        issues.push(ValidationIssue::new(
            here,
            field,
            format!("{:?} is not an absolute URL: {}", value, err),
        ));
    }
}

fn is_language_code(s: &str) -> bool {
    s.len() == 2 && s.chars().all(|c| c.is_ascii_alphabetic())
}

fn is_mime_type(s: &str) -> bool {
    match s.split_once('/') {
        Some((kind, subtype)) => {
            !kind.is_empty() && !subtype.is_empty() && !s.contains(char::is_whitespace)
        }
        None => false,
    }
}
