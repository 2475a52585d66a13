// ABOUTME: Fixed protocol values for RSS 2.0 podcast feeds.
// ABOUTME: Defines the RSS version, namespace URIs, and the Namespace enum used by the XML tree.

/// RSS version written to the root `version` attribute.
pub const RSS_VERSION: &str = "2.0";

/// Namespace that `xmlns:*` declaration attributes themselves belong to.
///
/// Never written into a document, since the `xmlns` prefix is bound
/// implicitly. Exported for callers resolving the output with a
/// namespace-aware reader.
pub const XMLNS_NAMESPACE: &str = "http://www.w3.org/2000/xmlns/";

/// Apple podcast directory extension namespace.
pub const ITUNES_NAMESPACE: &str = "http://www.itunes.com/dtds/podcast-1.0.dtd";

/// Atom namespace, used only for the channel self-link.
pub const ATOM_NAMESPACE: &str = "http://www.w3.org/2005/Atom";

/// MIME type advertised by the Atom self-link.
pub const RSS_MIME_TYPE: &str = "application/rss+xml";

/// Namespaces an element can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// Plain RSS, no prefix.
    Rss,
    Atom,
    Itunes,
}

impl Namespace {
    /// Prefix used when qualifying element names.
    pub fn prefix(self) -> Option<&'static str> {
        match self {
            Namespace::Rss => None,
            Namespace::Atom => Some("atom"),
            Namespace::Itunes => Some("itunes"),
        }
    }

    /// Namespace URI, `None` for plain RSS.
    pub fn uri(self) -> Option<&'static str> {
        match self {
            Namespace::Rss => None,
            Namespace::Atom => Some(ATOM_NAMESPACE),
            Namespace::Itunes => Some(ITUNES_NAMESPACE),
        }
    }

    /// Name of the attribute that declares this namespace, e.g. `xmlns:itunes`.
    pub fn declaration(self) -> Option<String> {
        self.prefix().map(|p| format!("xmlns:{}", p))
    }

    /// Qualifies a local name with this namespace's prefix.
    pub fn qualify(self, local: &str) -> String {
        match self.prefix() {
            Some(prefix) => format!("{}:{}", prefix, local),
            None => local.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualify() {
        assert_eq!(Namespace::Rss.qualify("title"), "title");
        assert_eq!(Namespace::Itunes.qualify("owner"), "itunes:owner");
        assert_eq!(Namespace::Atom.qualify("link"), "atom:link");
    }

    #[test]
    fn test_declarations() {
        assert_eq!(Namespace::Rss.declaration(), None);
        assert_eq!(
            Namespace::Itunes.declaration().as_deref(),
            Some("xmlns:itunes")
        );
        assert_eq!(Namespace::Atom.uri(), Some(ATOM_NAMESPACE));
    }
}
