// ABOUTME: The podcast channel: required identity fields, optional RSS/iTunes metadata, and items.
// ABOUTME: Builds the <channel> element in a fixed order and serializes the full <rss> document.

use std::fmt;

use tracing::debug;

use crate::constants::{Namespace, RSS_MIME_TYPE, RSS_VERSION};
use crate::error::FeedError;
use crate::item::Item;
use crate::xml::{Document, Element};

/// Standard RSS channel image. Should be at most 144x400 pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RssImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

/// A podcast feed.
///
/// Fields are set through the setters in any order and any number of times.
/// Rendering borrows the feed immutably, so [`Feed::to_xml_string`] can be
/// called repeatedly and always reflects the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feed {
    title: String,
    link: String,
    description: String,
    language: Option<String>,
    copyright: Option<String>,
    managing_editor: Option<String>,
    atom_link: Option<String>,
    image: Option<RssImage>,
    itunes_image_url: Option<String>,
    itunes_author: Option<String>,
    itunes_owner_email: Option<String>,
    itunes_owner_name: Option<String>,
    itunes_category: Option<String>,
    itunes_subcategories: Vec<String>,
    itunes_explicit: bool,
    itunes_block: bool,
    items: Vec<Item>,
}

impl Feed {
    /// Creates a feed with its required title, web link and description.
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            description: description.into(),
            language: None,
            copyright: None,
            managing_editor: None,
            atom_link: None,
            image: None,
            itunes_image_url: None,
            itunes_author: None,
            itunes_owner_email: None,
            itunes_owner_name: None,
            itunes_category: None,
            itunes_subcategories: Vec::new(),
            itunes_explicit: false,
            itunes_block: false,
            items: Vec::new(),
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_link(&mut self, link: impl Into<String>) {
        self.link = link.into();
    }

    /// Written both as `description` and `itunes:summary`, as CDATA.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Two-letter ISO 639-1 language code.
    pub fn set_language(&mut self, language: impl Into<String>) {
        self.language = Some(language.into());
    }

    pub fn set_copyright(&mut self, copyright: impl Into<String>) {
        self.copyright = Some(copyright.into());
    }

    pub fn set_managing_editor(&mut self, managing_editor: impl Into<String>) {
        self.managing_editor = Some(managing_editor.into());
    }

    /// Self-referential URL of this feed, written as an Atom link.
    pub fn set_atom_link(&mut self, atom_link: impl Into<String>) {
        self.atom_link = Some(atom_link.into());
    }

    /// Sets the RSS image. Its title and link are taken from the feed.
    pub fn set_image(&mut self, url: impl Into<String>, width: u32, height: u32) {
        self.image = Some(RssImage {
            url: url.into(),
            width,
            height,
        });
    }

    /// iTunes cover art, ideally square and at least 1400x1400 pixels.
    pub fn set_itunes_image(&mut self, url: impl Into<String>) {
        self.itunes_image_url = Some(url.into());
    }

    pub fn set_itunes_author(&mut self, author: impl Into<String>) {
        self.itunes_author = Some(author.into());
    }

    pub fn set_itunes_owner_email(&mut self, email: impl Into<String>) {
        self.itunes_owner_email = Some(email.into());
    }

    pub fn set_itunes_owner_name(&mut self, name: impl Into<String>) {
        self.itunes_owner_name = Some(name.into());
    }

    /// Sets the primary iTunes category and replaces all subcategories.
    ///
    /// Names should come from Apple's published category list. Each
    /// subcategory is nested inside the one before it.
    pub fn set_itunes_categories<I, S>(&mut self, category: impl Into<String>, subcategories: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.itunes_category = Some(category.into());
        self.itunes_subcategories = subcategories.into_iter().map(Into::into).collect();
    }

    pub fn set_itunes_explicit(&mut self, explicit: bool) {
        self.itunes_explicit = explicit;
    }

    /// Hides the feed from the public iTunes directory.
    pub fn set_itunes_block(&mut self, block: bool) {
        self.itunes_block = block;
    }

    /// Appends an item after any existing ones. Duplicates are kept.
    pub fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn copyright(&self) -> Option<&str> {
        self.copyright.as_deref()
    }

    pub fn managing_editor(&self) -> Option<&str> {
        self.managing_editor.as_deref()
    }

    pub fn atom_link(&self) -> Option<&str> {
        self.atom_link.as_deref()
    }

    pub fn image(&self) -> Option<&RssImage> {
        self.image.as_ref()
    }

    pub fn itunes_image(&self) -> Option<&str> {
        self.itunes_image_url.as_deref()
    }

    pub fn itunes_author(&self) -> Option<&str> {
        self.itunes_author.as_deref()
    }

    pub fn itunes_owner_email(&self) -> Option<&str> {
        self.itunes_owner_email.as_deref()
    }

    pub fn itunes_owner_name(&self) -> Option<&str> {
        self.itunes_owner_name.as_deref()
    }

    pub fn itunes_category(&self) -> Option<&str> {
        self.itunes_category.as_deref()
    }

    pub fn itunes_subcategories(&self) -> &[String] {
        &self.itunes_subcategories
    }

    pub fn itunes_explicit(&self) -> bool {
        self.itunes_explicit
    }

    pub fn itunes_block(&self) -> bool {
        self.itunes_block
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Renders the feed as a complete RSS document string.
    pub fn to_xml_string(&self) -> Result<String, FeedError> {
        self.render_document().to_xml_string()
    }

    /// Builds the `<rss>` document tree without serializing it.
    pub fn render_document(&self) -> Document {
        let mut rss = Element::new("rss");
        rss.set_attribute("version", RSS_VERSION);
        rss.declare_namespace(Namespace::Itunes);

        let mut document = Document::new(rss);
        self.build(document.root_mut());
        document
    }

    /// Appends the `<channel>` element, including all items, to `parent`.
    pub fn build(&self, parent: &mut Element) {
        debug!(title = %self.title, items = self.items.len(), "building feed channel");

        let mut channel = Element::new("channel");

        channel.append_child(Element::text(Namespace::Rss, "title", self.title.as_str()));
        if let Some(href) = &self.atom_link {
            channel.append_child(build_atom_link(href));
        }
        channel.append_child(Element::text(Namespace::Rss, "link", self.link.as_str()));
        channel.append_child(Element::cdata(
            Namespace::Rss,
            "description",
            self.description.as_str(),
        ));
        channel.append_child(Element::cdata(
            Namespace::Itunes,
            "summary",
            self.description.as_str(),
        ));
        if let Some(language) = &self.language {
            channel.append_child(Element::text(Namespace::Rss, "language", language.as_str()));
        }
        if let Some(copyright) = &self.copyright {
            channel.append_child(Element::text(Namespace::Rss, "copyright", copyright.as_str()));
        }
        if let Some(image) = &self.image {
            channel.append_child(self.build_image(image));
        }
        if let Some(editor) = &self.managing_editor {
            channel.append_child(Element::text(
                Namespace::Rss,
                "managingEditor",
                editor.as_str(),
            ));
        }
        channel.append_child(self.build_itunes_categories());
        if let Some(author) = &self.itunes_author {
            channel.append_child(Element::text(Namespace::Itunes, "author", author.as_str()));
        }
        if let Some(owner) = self.build_itunes_owner() {
            channel.append_child(owner);
        }
        if let Some(url) = &self.itunes_image_url {
            let mut image = Element::ns(Namespace::Itunes, "image");
            image.set_attribute("href", url.as_str());
            channel.append_child(image);
        }
        channel.append_child(Element::text(
            Namespace::Itunes,
            "explicit",
            yes_no(self.itunes_explicit),
        ));
        channel.append_child(Element::text(
            Namespace::Itunes,
            "block",
            yes_no(self.itunes_block),
        ));

        for item in &self.items {
            item.build(&mut channel);
        }

        parent.append_child(channel);
    }

    fn build_image(&self, image: &RssImage) -> Element {
        let mut node = Element::new("image");
        node.append_child(Element::text(Namespace::Rss, "url", image.url.as_str()));
        node.append_child(Element::text(Namespace::Rss, "title", self.title.as_str()));
        node.append_child(Element::text(Namespace::Rss, "link", self.link.as_str()));
        node.append_child(Element::text(Namespace::Rss, "width", image.width.to_string()));
        node.append_child(Element::text(Namespace::Rss, "height", image.height.to_string()));
        node
    }

    /// Always written; the primary category has an empty `text` when unset.
    fn build_itunes_categories(&self) -> Element {
        let nested = self
            .itunes_subcategories
            .iter()
            .rev()
            .fold(None, |inner: Option<Element>, name| {
                let mut node = category_element(name);
                if let Some(inner) = inner {
                    node.append_child(inner);
                }
                Some(node)
            });

        let mut primary = category_element(self.itunes_category.as_deref().unwrap_or(""));
        if let Some(nested) = nested {
            primary.append_child(nested);
        }
        primary
    }

    fn build_itunes_owner(&self) -> Option<Element> {
        if self.itunes_owner_email.is_none() && self.itunes_owner_name.is_none() {
            return None;
        }

        let mut owner = Element::ns(Namespace::Itunes, "owner");
        if let Some(email) = &self.itunes_owner_email {
            owner.append_child(Element::text(Namespace::Itunes, "email", email.as_str()));
        }
        if let Some(name) = &self.itunes_owner_name {
            owner.append_child(Element::text(Namespace::Itunes, "name", name.as_str()));
        }
        Some(owner)
    }
}

impl fmt::Display for Feed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let xml = self.to_xml_string().map_err(|_| fmt::Error)?;
        f.write_str(&xml)
    }
}

fn build_atom_link(href: &str) -> Element {
    let mut node = Element::ns(Namespace::Atom, "link");
    node.declare_namespace(Namespace::Atom);
    node.set_attribute("href", href);
    node.set_attribute("rel", "self");
    node.set_attribute("type", RSS_MIME_TYPE);
    node
}

fn category_element(text: &str) -> Element {
    let mut node = Element::ns(Namespace::Itunes, "category");
    node.set_attribute("text", text);
    node
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn channel_of(feed: &Feed) -> Element {
        let mut root = Element::new("rss");
        feed.build(&mut root);
        root.child("channel").cloned().unwrap()
    }

    fn child_names(e: &Element) -> Vec<&str> {
        e.child_elements().map(|c| c.name()).collect()
    }

    #[test]
    fn test_minimal_channel() {
        let feed = Feed::new("Show", "https://example.com", "About the show");
        let channel = channel_of(&feed);
        assert_eq!(
            child_names(&channel),
            vec![
                "title",
                "link",
                "description",
                "itunes:summary",
                "itunes:category",
                "itunes:explicit",
                "itunes:block",
            ]
        );
        assert_eq!(channel.child("itunes:category").unwrap().attribute("text"), Some(""));
        assert_eq!(channel.child("itunes:explicit").unwrap().text_content(), "no");
        assert_eq!(channel.child("itunes:block").unwrap().text_content(), "no");
    }

    #[test]
    fn test_full_channel_order() {
        let mut feed = Feed::new("Show", "https://example.com", "About the show");
        feed.set_itunes_block(true);
        feed.set_itunes_explicit(true);
        feed.set_itunes_image("https://example.com/cover.jpg");
        feed.set_itunes_owner_name("Jo");
        feed.set_itunes_owner_email("jo@example.com");
        feed.set_itunes_author("Jo Example");
        feed.set_itunes_categories("Technology", Vec::<String>::new());
        feed.set_managing_editor("editor@example.com (Ed)");
        feed.set_image("https://example.com/logo.png", 144, 144);
        feed.set_copyright("2024 Example");
        feed.set_language("en");
        feed.set_atom_link("https://example.com/feed.xml");
        feed.add_item(Item::new());

        let channel = channel_of(&feed);
        assert_eq!(
            child_names(&channel),
            vec![
                "title",
                "atom:link",
                "link",
                "description",
                "itunes:summary",
                "language",
                "copyright",
                "image",
                "managingEditor",
                "itunes:category",
                "itunes:author",
                "itunes:owner",
                "itunes:image",
                "itunes:explicit",
                "itunes:block",
                "item",
            ]
        );
        assert_eq!(channel.child("itunes:explicit").unwrap().text_content(), "yes");
        assert_eq!(channel.child("itunes:block").unwrap().text_content(), "yes");
    }

    #[test]
    fn test_atom_link_declares_own_namespace() {
        let mut feed = Feed::new("Show", "https://example.com", "d");
        feed.set_atom_link("https://example.com/feed.xml");
        let channel = channel_of(&feed);
        let link = channel.child("atom:link").unwrap();
        assert_eq!(
            link.attributes().to_vec(),
            vec![
                ("xmlns:atom".to_string(), crate::constants::ATOM_NAMESPACE.to_string()),
                ("href".to_string(), "https://example.com/feed.xml".to_string()),
                ("rel".to_string(), "self".to_string()),
                ("type".to_string(), "application/rss+xml".to_string()),
            ]
        );
    }

    #[test]
    fn test_image_copies_feed_title_and_link() {
        let mut feed = Feed::new("Show", "https://example.com", "d");
        feed.set_image("https://example.com/logo.png", 144, 100);
        let channel = channel_of(&feed);
        let image = channel.child("image").unwrap();
        assert_eq!(child_names(image), vec!["url", "title", "link", "width", "height"]);
        assert_eq!(image.child("title").unwrap().text_content(), "Show");
        assert_eq!(image.child("link").unwrap().text_content(), "https://example.com");
        assert_eq!(image.child("width").unwrap().text_content(), "144");
        assert_eq!(image.child("height").unwrap().text_content(), "100");
    }

    #[test]
    fn test_owner_children_independent() {
        let mut feed = Feed::new("Show", "https://example.com", "d");
        feed.set_itunes_owner_name("Jo");
        let channel = channel_of(&feed);
        let owner = channel.child("itunes:owner").unwrap();
        assert_eq!(child_names(owner), vec!["itunes:name"]);

        feed.set_itunes_owner_email("jo@example.com");
        let channel = channel_of(&feed);
        let owner = channel.child("itunes:owner").unwrap();
        assert_eq!(child_names(owner), vec!["itunes:email", "itunes:name"]);
    }

    #[test]
    fn test_categories_nest_in_order() {
        let mut feed = Feed::new("Show", "https://example.com", "d");
        feed.set_itunes_categories("Tech", ["Gadgets", "Reviews"]);
        let channel = channel_of(&feed);

        let primary = channel.child("itunes:category").unwrap();
        assert_eq!(primary.attribute("text"), Some("Tech"));
        let first = primary.child("itunes:category").unwrap();
        assert_eq!(first.attribute("text"), Some("Gadgets"));
        let second = first.child("itunes:category").unwrap();
        assert_eq!(second.attribute("text"), Some("Reviews"));
        assert_eq!(second.child_elements().count(), 0);
        assert_eq!(primary.child_elements().count(), 1);
    }

    #[test]
    fn test_set_categories_replaces_previous() {
        let mut feed = Feed::new("Show", "https://example.com", "d");
        feed.set_itunes_categories("Tech", ["Gadgets", "Reviews"]);
        feed.set_itunes_categories("Arts", ["Design"]);
        assert_eq!(feed.itunes_category(), Some("Arts"));
        assert_eq!(feed.itunes_subcategories(), &["Design".to_string()]);
    }

    #[test]
    fn test_description_mirrored_as_summary() {
        let feed = Feed::new("Show", "https://example.com", "<b>bold</b> & more");
        let channel = channel_of(&feed);
        assert_eq!(
            channel.child("description").unwrap().children(),
            channel.child("itunes:summary").unwrap().children()
        );
    }

    #[test]
    fn test_document_root() {
        let feed = Feed::new("Show", "https://example.com", "d");
        let document = feed.render_document();
        let root = document.root();
        assert_eq!(root.name(), "rss");
        assert_eq!(
            root.attributes().to_vec(),
            vec![
                ("version".to_string(), "2.0".to_string()),
                (
                    "xmlns:itunes".to_string(),
                    crate::constants::ITUNES_NAMESPACE.to_string()
                ),
            ]
        );
        assert_eq!(child_names(root), vec!["channel"]);
    }

    #[test]
    fn test_display_matches_to_xml_string() {
        let feed = Feed::new("Show", "https://example.com", "d");
        assert_eq!(feed.to_string(), feed.to_xml_string().unwrap());
    }
}
