//! Confidence heuristic and article extraction.
//!
//! The [`Extractor`] trait is the seam between the pipeline and the
//! readability engine. [`Readability`] is the default implementation, backed
//! by `dom_smoothie`, a port of Mozilla's Readability.
//!
//! # Example
//!
//! ```rust
//! use readable_core::{Document, Extractor, Readability};
//!
//! let html = "<html><body><nav><a href='#'>Home</a></nav></body></html>";
//! let doc = Document::parse(html, None, None);
//! let reader = Readability::new();
//! assert!(!reader.is_probably_readable(&doc));
//! ```

use dom_smoothie::Config;

use crate::{Article, Document, ReadableError, Result};

/// Readability engine used by the pipeline.
pub trait Extractor {
    /// Cheap judgement on whether `document` likely holds one extractable article.
    fn is_probably_readable(&self, document: &Document) -> bool;

    /// Runs full extraction.
    ///
    /// Returns `Ok(None)` when no main content region could be found. The
    /// engine may work on its own copy of the tree; callers must not rely on
    /// `document` reflecting extraction results.
    fn extract(&self, document: &Document) -> Result<Option<Article>>;
}

/// Options passed to the readability engine.
#[derive(Debug, Clone, Default)]
pub struct ReadabilityConfig {
    /// Preserve the page's CSS classes in the extracted markup.
    pub keep_classes: bool,
}

/// Default [`Extractor`] built on `dom_smoothie`.
#[derive(Debug, Clone, Default)]
pub struct Readability {
    config: ReadabilityConfig,
}

impl Readability {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ReadabilityConfig) -> Self {
        Self { config }
    }

    fn engine(&self, document: &Document) -> Result<dom_smoothie::Readability> {
        let cfg = Config { keep_classes: self.config.keep_classes, ..Default::default() };
        let url = document.base_url().map(|u| u.to_string());

        dom_smoothie::Readability::new(document.outer_html(), url.as_deref(), Some(cfg))
            .map_err(|e| ReadableError::Extraction(e.to_string()))
    }
}

impl Extractor for Readability {
    fn is_probably_readable(&self, document: &Document) -> bool {
        match self.engine(document) {
            Ok(engine) => engine.is_probably_readable(),
            Err(e) => {
                tracing::debug!(error = %e, "readability engine rejected document");
                false
            }
        }
    }

    fn extract(&self, document: &Document) -> Result<Option<Article>> {
        let mut engine = self.engine(document)?;
        match engine.parse() {
            Ok(article) => Ok(Some(Article::from(article))),
            Err(e) => {
                tracing::debug!(error = %e, "no article found");
                Ok(None)
            }
        }
    }
}
