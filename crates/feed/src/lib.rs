// ABOUTME: Podcast RSS 2.0 feed builder with iTunes and Atom extensions.
// ABOUTME: Provides the Feed and Item builders, the XML tree writer, strict validation, and JSON manifests.

//! Builds podcast feeds as RSS 2.0 XML.
//!
//! # Example
//!
//! ```
//! use podcast_feed::{Feed, Item};
//!
//! let mut feed = Feed::new("My Show", "https://example.com", "Weekly chats");
//! feed.set_itunes_categories("Technology", ["Tech News"]);
//!
//! let mut episode = Item::new();
//! episode.set_title("Episode 1");
//! episode.set_media_url("https://example.com/ep1.mp3");
//! episode.set_media_size(1_048_576);
//! episode.set_media_mime_type("audio/mpeg");
//! episode.set_media_duration(3725);
//! feed.add_item(episode);
//!
//! let xml = feed.to_xml_string().unwrap();
//! assert!(xml.contains("<itunes:duration>1:02:05</itunes:duration>"));
//! ```

pub mod constants;
pub mod duration;
pub mod error;
pub mod feed;
pub mod item;
pub mod manifest;
pub mod publish_date;
pub mod validate;
pub mod xml;

pub use constants::Namespace;
pub use duration::{format_duration, parse_duration_seconds};
pub use error::FeedError;
pub use feed::{Feed, RssImage};
pub use item::{Enclosure, Guid, Item};
pub use manifest::{feed_from_json, FeedManifest, ItemManifest};
pub use publish_date::{parse_flexible_time, PublishDate};
pub use validate::{IssueLocation, ValidationIssue};
pub use xml::{Document, Element, Node};
