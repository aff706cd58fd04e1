//! HTML sanitization.
//!
//! [`HtmlSanitizer`] is an allowlist cleaner built on `lol_html`: elements
//! outside the allowlist are unwrapped (their children survive), `script`,
//! `style` and similar elements are dropped together with their content,
//! comments are removed, attributes outside the allowlist are stripped and
//! URL attributes may only use safe schemes. Links get
//! `rel="noopener noreferrer"`.

use std::borrow::Cow;

use lol_html::html_content::Element;
use lol_html::{HtmlRewriter, Settings, doc_comments, element};
use url::Url;

use crate::{ReadableError, Result};

/// Elements removed with everything inside them.
const DROPPED_TAGS: &[&str] = &[
    "script", "style", "noscript", "template", "iframe", "object", "embed", "applet", "frame", "frameset", "form",
    "input", "button", "select", "textarea", "svg", "math", "canvas",
];

/// Elements kept as-is (minus disallowed attributes).
const ALLOWED_TAGS: &[&str] = &[
    "a", "abbr", "acronym", "area", "article", "aside", "b", "bdi", "bdo", "blockquote", "br", "caption", "center",
    "cite", "code", "col", "colgroup", "data", "dd", "del", "details", "dfn", "div", "dl", "dt", "em", "figcaption",
    "figure", "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hgroup", "hr", "i", "img", "ins", "kbd",
    "li", "map", "mark", "nav", "ol", "p", "picture", "pre", "q", "rp", "rt", "rtc", "ruby", "s", "samp", "small",
    "source", "span", "strike", "strong", "sub", "summary", "sup", "table", "tbody", "td", "th", "thead", "time",
    "tfoot", "tr", "tt", "u", "ul", "var", "wbr", "main", "section",
];

/// Extra elements kept when cleaning a whole document rather than a fragment.
const DOCUMENT_TAGS: &[&str] = &["html", "head", "body", "title", "meta"];

const GENERIC_ATTRIBUTES: &[&str] = &["lang", "title", "dir", "class", "id"];

const URL_ATTRIBUTES: &[&str] = &["href", "src", "cite"];

const URL_SCHEMES: &[&str] = &["http", "https", "mailto", "tel", "ftp", "ftps", "data"];

/// Sanitizer used by the output formatter.
pub trait Sanitize {
    /// Cleans an HTML fragment such as extracted article content.
    fn sanitize_fragment(&self, html: &str) -> Result<String>;

    /// Cleans a complete document, keeping its `html`/`head`/`body` structure.
    fn sanitize_document(&self, html: &str) -> Result<String>;
}

/// Default [`Sanitize`] implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlSanitizer;

impl HtmlSanitizer {
    pub fn new() -> Self {
        Self
    }

    fn clean(&self, html: &str, keep_document_tags: bool) -> Result<String> {
        let mut output = Vec::with_capacity(html.len());
        let mut rewriter = HtmlRewriter::new(
            Settings {
                element_content_handlers: vec![element!("*", move |el| {
                    clean_element(el, keep_document_tags);
                    Ok(())
                })],
                document_content_handlers: vec![doc_comments!(|c| {
                    c.remove();
                    Ok(())
                })],
                ..Default::default()
            },
            |c: &[u8]| output.extend_from_slice(c),
        );

        rewriter.write(html.as_bytes()).map_err(|e| ReadableError::Rewrite(e.to_string()))?;
        rewriter.end().map_err(|e| ReadableError::Rewrite(e.to_string()))?;

        Ok(String::from_utf8_lossy(&output).into_owned())
    }
}

impl Sanitize for HtmlSanitizer {
    fn sanitize_fragment(&self, html: &str) -> Result<String> {
        self.clean(html, false)
    }

    fn sanitize_document(&self, html: &str) -> Result<String> {
        self.clean(html, true)
    }
}

fn clean_element(el: &mut Element<'_, '_>, keep_document_tags: bool) {
    let tag = el.tag_name();

    if DROPPED_TAGS.contains(&tag.as_str()) {
        el.remove();
        return;
    }

    let allowed = ALLOWED_TAGS.contains(&tag.as_str()) || (keep_document_tags && DOCUMENT_TAGS.contains(&tag.as_str()));
    if !allowed {
        el.remove_and_keep_content();
        return;
    }

    let names: Vec<String> = el.attributes().iter().map(|attr| attr.name()).collect();
    for name in names {
        if !is_allowed_attribute(&tag, &name) {
            el.remove_attribute(&name);
            continue;
        }

        if URL_ATTRIBUTES.contains(&name.as_str())
            && let Some(value) = el.get_attribute(&name)
            && !is_safe_url(&value)
        {
            el.remove_attribute(&name);
        }
    }

    if tag == "a" && el.has_attribute("href") {
        el.set_attribute("rel", "noopener noreferrer").ok();
    }
}

fn is_allowed_attribute(tag: &str, name: &str) -> bool {
    if GENERIC_ATTRIBUTES.contains(&name) {
        return true;
    }

    let specific: &[&str] = match tag {
        "a" => &["href", "hreflang"],
        "img" => &["src", "alt", "width", "height"],
        "source" => &["src", "srcset", "type", "media"],
        "blockquote" | "q" | "del" | "ins" => &["cite"],
        "td" | "th" => &["colspan", "rowspan", "headers", "scope"],
        "col" | "colgroup" => &["span"],
        "ol" => &["start", "reversed", "type"],
        "li" => &["value"],
        "time" => &["datetime"],
        "data" => &["value"],
        "meta" => &["charset"],
        "area" => &["alt", "coords", "href", "shape"],
        "bdo" => &["dir"],
        _ => &[],
    };

    specific.contains(&name)
}

/// Relative URLs are fine; absolute ones need an allowed scheme.
fn is_safe_url(value: &str) -> bool {
    let trimmed: Cow<'_, str> = if value.chars().any(|c| c.is_ascii_control() || c.is_whitespace()) {
        Cow::Owned(value.chars().filter(|c| !c.is_ascii_control() && !c.is_whitespace()).collect())
    } else {
        Cow::Borrowed(value)
    };

    match Url::parse(&trimmed) {
        Ok(url) => URL_SCHEMES.contains(&url.scheme()),
        Err(_) => !trimmed.contains(':') || trimmed.starts_with('/') || trimmed.starts_with('#'),
    }
}
