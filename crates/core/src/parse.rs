//! HTML parsing and the document handle.
//!
//! [`Document`] wraps a `dom_query` tree together with the base URL it was
//! parsed against. Relative `href`s are made
//! absolute at parse time, and HTML escaping goes through the DOM's own
//! serializer so it matches how the tree itself is written out.
//!
//! # Example
//!
//! ```rust
//! use readable_core::Document;
//! use url::Url;
//!
//! let base = Url::parse("https://example.com/blog/").unwrap();
//! let doc = Document::parse(r#"<p><a href="post">Post</a></p>"#, Some(base), None);
//! assert!(doc.outer_html().contains("https://example.com/blog/post"));
//! assert_eq!(doc.escape_html("a < b"), "a &lt; b");
//! ```

use dom_query::Document as DomDocument;
use url::Url;

/// A parsed HTML document, owned by one pipeline run.
pub struct Document {
    dom: DomDocument,
    base_url: Option<Url>,
}

impl Document {
    /// Parses `html` and resolves relative links.
    ///
    /// `content_type` is the MIME type declared by the server, if any. It
    /// only feeds diagnostics; the body is always parsed as HTML.
    ///
    /// The document's own first `<base href>` takes precedence over
    /// `base_url`. A `<base>` whose href is itself relative is resolved
    /// against `base_url`.
    pub fn parse(html: &str, base_url: Option<Url>, content_type: Option<String>) -> Self {
        let dom = DomDocument::from(html);
        let base_url = document_base(&dom, base_url.as_ref()).or(base_url);

        if let Some(base) = &base_url {
            resolve_links(&dom, base);
        }

        tracing::debug!(bytes = html.len(), base = ?base_url.as_ref().map(Url::as_str), content_type = ?content_type, "parsed document");

        Self { dom, base_url }
    }

    /// The URL relative links were resolved against.
    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    /// Serialized `<html>` element, the equivalent of `documentElement.outerHTML`.
    pub fn outer_html(&self) -> String {
        let root = self.dom.select("html");
        if root.exists() { root.html().to_string() } else { self.dom.html().to_string() }
    }

    /// Escapes `text` for use as HTML character data.
    ///
    /// Creates a detached text node and reads back its serialized form, so
    /// escaping follows the DOM serializer's own rules.
    pub fn escape_html(&self, text: &str) -> String {
        self.dom.tree.new_text(text).html().to_string()
    }
}

fn document_base(dom: &DomDocument, fallback: Option<&Url>) -> Option<Url> {
    let href = dom.select("base[href]").first().attr("href")?;
    match Url::parse(&href) {
        Ok(url) => Some(url),
        Err(_) => fallback.and_then(|base| base.join(&href).ok()),
    }
}

fn resolve_links(dom: &DomDocument, base: &Url) {
    for element in dom.select("[href]").iter() {
        let Some(href) = element.attr("href") else {
            continue;
        };

        if Url::parse(&href).is_ok() {
            continue;
        }

        if let Ok(absolute) = base.join(&href) {
            element.set_attr("href", absolute.as_str());
        }
    }
}
