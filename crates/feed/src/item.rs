// ABOUTME: A single podcast episode and its <item> element.
// ABOUTME: Holds optional episode metadata plus the media enclosure and emits them in a fixed order.

use tracing::trace;

use crate::constants::Namespace;
use crate::duration::format_duration;
use crate::publish_date::PublishDate;
use crate::xml::Element;

/// Item identifier, optionally also a permalink to the episode page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guid {
    pub value: String,
    pub is_permalink: bool,
}

/// Media file reference written as `<enclosure url length type/>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enclosure {
    pub url: Option<String>,
    pub length: Option<u64>,
    pub mime_type: Option<String>,
}

/// One podcast episode.
///
/// Every field is optional. A usable episode needs a media URL, size and
/// MIME type, but that is left to the caller; see [`crate::Feed::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Item {
    title: Option<String>,
    link: Option<String>,
    description: Option<String>,
    publish_date: Option<PublishDate>,
    guid: Option<Guid>,
    itunes_image_url: Option<String>,
    itunes_subtitle: Option<String>,
    itunes_summary: Option<String>,
    enclosure: Enclosure,
    duration: Option<u32>,
}

impl Item {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn set_link(&mut self, link: impl Into<String>) {
        self.link = Some(link.into());
    }

    /// Sets the GUID and whether it doubles as a permalink.
    pub fn set_guid(&mut self, guid: impl Into<String>, is_permalink: bool) {
        self.guid = Some(Guid {
            value: guid.into(),
            is_permalink,
        });
    }

    /// Sets a GUID that is also a permalink, the RSS default.
    pub fn set_guid_permalink(&mut self, guid: impl Into<String>) {
        self.set_guid(guid, true);
    }

    /// Short description, written as CDATA so it may contain HTML.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
    }

    /// Accepts pre-formatted text or a chrono `DateTime`, which is
    /// normalized to RFC 2822 here rather than at build time.
    pub fn set_publish_date(&mut self, date: impl Into<PublishDate>) {
        self.publish_date = Some(date.into());
    }

    pub fn set_media_url(&mut self, url: impl Into<String>) {
        self.enclosure.url = Some(url.into());
    }

    /// Media size in bytes.
    pub fn set_media_size(&mut self, size: u64) {
        self.enclosure.length = Some(size);
    }

    pub fn set_media_mime_type(&mut self, mime_type: impl Into<String>) {
        self.enclosure.mime_type = Some(mime_type.into());
    }

    /// Media duration in whole seconds. Zero is treated as unknown and not written.
    pub fn set_media_duration(&mut self, seconds: u32) {
        self.duration = Some(seconds);
    }

    pub fn set_itunes_subtitle(&mut self, subtitle: impl Into<String>) {
        self.itunes_subtitle = Some(subtitle.into());
    }

    pub fn set_itunes_summary(&mut self, summary: impl Into<String>) {
        self.itunes_summary = Some(summary.into());
    }

    pub fn set_itunes_image(&mut self, url: impl Into<String>) {
        self.itunes_image_url = Some(url.into());
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn publish_date(&self) -> Option<&PublishDate> {
        self.publish_date.as_ref()
    }

    pub fn guid(&self) -> Option<&Guid> {
        self.guid.as_ref()
    }

    pub fn itunes_image(&self) -> Option<&str> {
        self.itunes_image_url.as_deref()
    }

    pub fn itunes_subtitle(&self) -> Option<&str> {
        self.itunes_subtitle.as_deref()
    }

    pub fn itunes_summary(&self) -> Option<&str> {
        self.itunes_summary.as_deref()
    }

    pub fn enclosure(&self) -> &Enclosure {
        &self.enclosure
    }

    pub fn media_duration(&self) -> Option<u32> {
        self.duration
    }

    /// Appends this item's `<item>` element to `parent`.
    pub fn build(&self, parent: &mut Element) {
        parent.append_child(self.render());
    }

    /// Renders the `<item>` element without attaching it anywhere.
    pub fn render(&self) -> Element {
        let guid = self.guid.as_ref().map(|g| g.value.as_str());
        trace!(title = ?self.title, guid = ?guid, "rendering item");

        let mut item = Element::new("item");

        if let Some(title) = &self.title {
            item.append_child(Element::text(Namespace::Rss, "title", title.as_str()));
        }
        if let Some(link) = &self.link {
            item.append_child(Element::text(Namespace::Rss, "link", link.as_str()));
        }
        if let Some(guid) = &self.guid {
            item.append_child(build_guid(guid));
        }
        if let Some(subtitle) = &self.itunes_subtitle {
            item.append_child(Element::cdata(Namespace::Itunes, "subtitle", subtitle.as_str()));
        }
        if let Some(summary) = &self.itunes_summary {
            item.append_child(Element::cdata(Namespace::Itunes, "summary", summary.as_str()));
        }
        if let Some(url) = &self.itunes_image_url {
            let mut image = Element::ns(Namespace::Itunes, "image");
            image.set_attribute("href", url.as_str());
            item.append_child(image);
        }
        if let Some(description) = &self.description {
            item.append_child(Element::cdata(Namespace::Rss, "description", description.as_str()));
        }
        if let Some(date) = &self.publish_date {
            item.append_child(Element::text(Namespace::Rss, "pubDate", date.as_str()));
        }

        // Written even when the media fields are unset.
        item.append_child(build_enclosure(&self.enclosure));

        if let Some(seconds) = self.duration.filter(|s| *s > 0) {
            item.append_child(Element::text(
                Namespace::Itunes,
                "duration",
                format_duration(seconds),
            ));
        }

        item
    }
}

fn build_guid(guid: &Guid) -> Element {
    let mut node = Element::new("guid");
    if !guid.is_permalink {
        node.set_attribute("isPermaLink", "false");
    }
    node.append_text(guid.value.as_str());
    node
}

fn build_enclosure(enclosure: &Enclosure) -> Element {
    let mut node = Element::new("enclosure");
    node.set_attribute("url", enclosure.url.clone().unwrap_or_default());
    node.set_attribute("length", enclosure.length.unwrap_or(0).to_string());
    node.set_attribute("type", enclosure.mime_type.clone().unwrap_or_default());
    node
}
