// ABOUTME: JSON feed manifests: the loosely typed input boundary for building a Feed.
// ABOUTME: Coerces strings, numbers and booleans permissively; bad scalars become zero values.

use chrono::DateTime;
use serde::Deserialize;
use serde_json::Value;
use std::io::Read;
use tracing::warn;

use crate::duration::parse_duration_seconds;
use crate::error::FeedError;
use crate::feed::Feed;
use crate::item::Item;
use crate::publish_date::PublishDate;

/// Channel-level manifest. `title`, `link` and `description` are required.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FeedManifest {
    pub title: Value,
    pub link: Value,
    pub description: Value,
    pub language: Value,
    pub copyright: Value,
    pub managing_editor: Value,
    pub atom_link: Value,
    pub image: Option<ImageManifest>,
    pub itunes: ItunesManifest,
    pub items: Vec<ItemManifest>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ImageManifest {
    pub url: Value,
    pub width: Value,
    pub height: Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ItunesManifest {
    pub image: Value,
    pub author: Value,
    pub owner_email: Value,
    pub owner_name: Value,
    pub category: Value,
    pub subcategories: Vec<Value>,
    pub explicit: Value,
    pub block: Value,
}

/// One episode. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ItemManifest {
    pub title: Value,
    pub link: Value,
    pub guid: Value,
    /// Defaults to true when absent.
    pub guid_is_permalink: Value,
    pub description: Value,
    /// Text is kept verbatim; a number is read as a Unix timestamp.
    pub publish_date: Value,
    pub itunes_subtitle: Value,
    pub itunes_summary: Value,
    pub itunes_image: Value,
    pub media_url: Value,
    pub media_size: Value,
    pub media_mime_type: Value,
    /// Seconds, `H:MM:SS`, `MM:SS` or `1h30m`.
    pub media_duration: Value,
}

impl FeedManifest {
    pub fn from_json_str(json: &str) -> Result<Self, FeedError> {
        serde_json::from_str(json).map_err(|e| FeedError::manifest(e.to_string()))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, FeedError> {
        serde_json::from_reader(reader).map_err(|e| FeedError::manifest(e.to_string()))
    }

    /// Builds the feed. Fails only when a required channel field is missing.
    pub fn into_feed(self) -> Result<Feed, FeedError> {
        let title = required(&self.title, "title")?;
        let link = required(&self.link, "link")?;
        let description = required(&self.description, "description")?;

        let mut feed = Feed::new(title, link, description);

        if let Some(language) = optional_string(&self.language, "language") {
            feed.set_language(language);
        }
        if let Some(copyright) = optional_string(&self.copyright, "copyright") {
            feed.set_copyright(copyright);
        }
        if let Some(editor) = optional_string(&self.managing_editor, "managing_editor") {
            feed.set_managing_editor(editor);
        }
        if let Some(atom_link) = optional_string(&self.atom_link, "atom_link") {
            feed.set_atom_link(atom_link);
        }
        if let Some(image) = &self.image {
            if let Some(url) = optional_string(&image.url, "image.url") {
                feed.set_image(
                    url,
                    coerce_u32(&image.width, "image.width"),
                    coerce_u32(&image.height, "image.height"),
                );
            }
        }

        let itunes = &self.itunes;
        if let Some(url) = optional_string(&itunes.image, "itunes.image") {
            feed.set_itunes_image(url);
        }
        if let Some(author) = optional_string(&itunes.author, "itunes.author") {
            feed.set_itunes_author(author);
        }
        if let Some(email) = optional_string(&itunes.owner_email, "itunes.owner_email") {
            feed.set_itunes_owner_email(email);
        }
        if let Some(name) = optional_string(&itunes.owner_name, "itunes.owner_name") {
            feed.set_itunes_owner_name(name);
        }
        let category = coerce_string(&itunes.category, "itunes.category");
        if category.is_some() || !itunes.subcategories.is_empty() {
            let subcategories: Vec<String> = itunes
                .subcategories
                .iter()
                .map(|v| coerce_string(v, "itunes.subcategories").unwrap_or_default())
                .collect();
            feed.set_itunes_categories(category.unwrap_or_default(), subcategories);
        }
        feed.set_itunes_explicit(coerce_bool(&itunes.explicit));
        feed.set_itunes_block(coerce_bool(&itunes.block));

        for item in &self.items {
            feed.add_item(item.to_item());
        }

        Ok(feed)
    }
}

impl ItemManifest {
    pub fn to_item(&self) -> Item {
        let mut item = Item::new();

        if let Some(title) = optional_string(&self.title, "item.title") {
            item.set_title(title);
        }
        if let Some(link) = optional_string(&self.link, "item.link") {
            item.set_link(link);
        }
        if let Some(guid) = optional_string(&self.guid, "item.guid") {
            let is_permalink =
                self.guid_is_permalink.is_null() || coerce_bool(&self.guid_is_permalink);
            item.set_guid(guid, is_permalink);
        }
        if let Some(description) = optional_string(&self.description, "item.description") {
            item.set_description(description);
        }
        if let Some(date) = coerce_publish_date(&self.publish_date) {
            item.set_publish_date(date);
        }
        if let Some(subtitle) = optional_string(&self.itunes_subtitle, "item.itunes_subtitle") {
            item.set_itunes_subtitle(subtitle);
        }
        if let Some(summary) = optional_string(&self.itunes_summary, "item.itunes_summary") {
            item.set_itunes_summary(summary);
        }
        if let Some(url) = optional_string(&self.itunes_image, "item.itunes_image") {
            item.set_itunes_image(url);
        }
        if let Some(url) = optional_string(&self.media_url, "item.media_url") {
            item.set_media_url(url);
        }
        if !self.media_size.is_null() {
            item.set_media_size(coerce_u64(&self.media_size, "item.media_size"));
        }
        if let Some(mime) = optional_string(&self.media_mime_type, "item.media_mime_type") {
            item.set_media_mime_type(mime);
        }
        if !self.media_duration.is_null() {
            item.set_media_duration(coerce_duration(&self.media_duration));
        }

        item
    }
}

/// Reads a manifest from JSON text and builds the feed.
pub fn feed_from_json(json: &str) -> Result<Feed, FeedError> {
    FeedManifest::from_json_str(json)?.into_feed()
}

fn required(value: &Value, field: &str) -> Result<String, FeedError> {
    coerce_string(value, field)
        .ok_or_else(|| FeedError::manifest(format!("missing required field `{}`", field)))
}

/// Scalars become text; null means unset. Arrays and objects are dropped.
fn coerce_string(value: &Value, field: &str) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(_) | Value::Object(_) => {
            warn!(field, "expected a scalar, ignoring value");
            None
        }
    }
}

/// Like [`coerce_string`], but an empty string also means unset.
fn optional_string(value: &Value, field: &str) -> Option<String> {
    coerce_string(value, field).filter(|s| !s.is_empty())
}

fn coerce_u64(value: &Value, field: &str) -> u64 {
    let coerced = match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => leading_integer(s),
        Value::Bool(b) => Some(u64::from(*b)),
        _ => None,
    };
    coerced.unwrap_or_else(|| {
        warn!(field, value = %value, "not a non-negative integer, using 0");
        0
    })
}

fn coerce_u32(value: &Value, field: &str) -> u32 {
    let wide = coerce_u64(value, field);
    u32::try_from(wide).unwrap_or_else(|_| {
        warn!(field, value = wide, "integer out of range, using 0");
        0
    })
}

fn coerce_duration(value: &Value) -> u32 {
    if let Value::String(s) = value {
        if let Some(secs) = parse_duration_seconds(s) {
            return secs;
        }
    }
    coerce_u32(value, "item.media_duration")
}

/// Truthiness: `"0"`, `"false"`, `"no"` and empty strings are false.
fn coerce_bool(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => {
            let s = s.trim().to_ascii_lowercase();
            !(s.is_empty() || s == "0" || s == "false" || s == "no")
        }
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn coerce_publish_date(value: &Value) -> Option<PublishDate> {
    match value {
        Value::Number(n) => {
            let Some(secs) = n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)) else {
                warn!(value = %n, "timestamp is not an integer, ignoring publish date");
                return None;
            };
            match DateTime::from_timestamp(secs, 0) {
                Some(dt) => Some(PublishDate::from(dt)),
                None => {
                    warn!(secs, "timestamp out of range, ignoring publish date");
                    None
                }
            }
        }
        other => optional_string(other, "item.publish_date").map(PublishDate::from),
    }
}

/// Parses leading digits like `"123abc"`, falling back to a float prefix.
fn leading_integer(s: &str) -> Option<u64> {
    let s = s.trim_start();
    let s = s.strip_prefix('+').unwrap_or(s);
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    if end == 0 {
        return None;
    }
    s[..end].parse().ok()
}
