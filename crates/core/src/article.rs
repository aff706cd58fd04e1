//! The extracted article.

use serde::Serialize;

/// Result of running the extractor over a document. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Article {
    pub title: String,

    /// Author line; empty when the page carries none.
    pub byline: String,

    /// Description or first paragraph; empty when none.
    pub excerpt: String,

    /// Length of the text content in characters.
    pub length: usize,

    /// Text direction (`ltr`, `rtl`, ...) when the page declares one.
    pub dir: Option<String>,

    /// Plain-text rendition of the content.
    pub text_content: String,

    /// Extracted content markup, before sanitization.
    pub html_content: String,
}

impl From<dom_smoothie::Article> for Article {
    fn from(article: dom_smoothie::Article) -> Self {
        Self {
            title: article.title,
            byline: article.byline.unwrap_or_default(),
            excerpt: article.excerpt.unwrap_or_default(),
            length: article.length,
            dir: article.dir.filter(|dir| !dir.is_empty()),
            text_content: article.text_content.to_string(),
            html_content: article.content.to_string(),
        }
    }
}
