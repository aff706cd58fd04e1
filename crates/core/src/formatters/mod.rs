pub mod html;
pub mod json;
pub mod lines;

pub use html::{DEFAULT_STYLESHEET, render_full_html};
pub use json::render_json;
pub use lines::render_property_lines;

use crate::{Article, Document, PropertyName, Result, Sanitize};

/// Rendering mode, derived from `--json` and `--properties`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Complete reader-mode HTML page.
    FullHtml,
    /// One flat JSON object keyed by property name.
    Json,
    /// One line per requested property.
    PropertyLines,
}

/// What to render and which properties to include.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSpec {
    pub format: OutputFormat,
    /// Never empty. Order is the user's; duplicates are kept.
    pub properties: Vec<PropertyName>,
    /// True when the properties came from `--properties`.
    pub explicit_properties: bool,
}

impl OutputSpec {
    /// Derives the format from `--json` and the (possibly empty) `--properties` list.
    pub fn new(json: bool, properties: Vec<PropertyName>) -> Self {
        let explicit_properties = !properties.is_empty();

        let format = match (json, explicit_properties) {
            (true, _) => OutputFormat::Json,
            (false, true) => OutputFormat::PropertyLines,
            (false, false) => OutputFormat::FullHtml,
        };

        let properties = match (explicit_properties, format) {
            (true, _) => properties,
            (false, OutputFormat::Json) => PropertyName::ALL.to_vec(),
            (false, _) => PropertyName::DEFAULT.to_vec(),
        };

        Self { format, properties, explicit_properties }
    }

    /// Collapse newlines in single-line properties.
    pub fn single_line_per_property(&self) -> bool {
        self.format == OutputFormat::PropertyLines
    }

    /// JSON or explicit properties need an article; pass-through cannot satisfy them.
    pub fn wants_properties(&self) -> bool {
        self.format == OutputFormat::Json || self.explicit_properties
    }
}

impl Default for OutputSpec {
    fn default() -> Self {
        Self::new(false, Vec::new())
    }
}

/// Presentation flags shared by every output mode.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Keep the page's own classes and use the minimal body layout.
    pub keep_classes: bool,
    /// Skip sanitization entirely.
    pub insane: bool,
    /// Stylesheet href for the full HTML page.
    pub style: Option<String>,
}

/// Renders `article` according to `spec`.
pub fn render(
    article: &Article, document: &Document, spec: &OutputSpec, options: &RenderOptions, sanitizer: &dyn Sanitize,
) -> Result<String> {
    match spec.format {
        OutputFormat::FullHtml => render_full_html(article, document, options, sanitizer),
        OutputFormat::Json => {
            render_json(article, document, &spec.properties, spec.single_line_per_property(), options, sanitizer)
        }
        OutputFormat::PropertyLines => render_property_lines(
            article,
            document,
            &spec.properties,
            spec.single_line_per_property(),
            options,
            sanitizer,
        ),
    }
}

/// The document itself, sanitized unless `--insane`.
pub fn render_pass_through(document: &Document, options: &RenderOptions, sanitizer: &dyn Sanitize) -> Result<String> {
    let html = document.outer_html();
    if options.insane { Ok(html) } else { sanitizer.sanitize_document(&html) }
}

/// `html-content`, sanitized unless `--insane`.
pub(crate) fn content_html(article: &Article, options: &RenderOptions, sanitizer: &dyn Sanitize) -> Result<String> {
    if options.insane {
        Ok(article.html_content.clone())
    } else {
        sanitizer.sanitize_fragment(&article.html_content)
    }
}
