//! Full reader-mode HTML page.
//!
//! The default layout reproduces the container/header/content structure
//! Firefox's reader view styles, so its stylesheet applies unchanged. With
//! `keep_classes` the body is a bare title, byline, rule and content.

use crate::formatters::{RenderOptions, content_html};
use crate::{Article, Document, PropertyName, Result, Sanitize};

/// Stylesheet linked when no `--style` is given.
pub const DEFAULT_STYLESHEET: &str = "chrome://global/skin/aboutReader.css";

/// Renders `article` as a complete HTML document.
pub fn render_full_html(
    article: &Article, document: &Document, options: &RenderOptions, sanitizer: &dyn Sanitize,
) -> Result<String> {
    let title = document.escape_html(&PropertyName::Title.value(article, false, document).to_string());
    let content = content_html(article, options, sanitizer)?;

    let mut out = String::with_capacity(content.len() + 1024);
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n  <meta charset=\"utf-8\">");

    let stylesheet = match (&options.style, options.keep_classes) {
        (Some(style), _) => Some(style.as_str()),
        (None, false) => Some(DEFAULT_STYLESHEET),
        (None, true) => None,
    };
    if let Some(href) = stylesheet {
        out.push_str(&format!("\n  <link rel=\"stylesheet\" href=\"{}\" type=\"text/css\">", href));
    }
    out.push_str(&format!("\n  <title>{}</title>\n</head>\n", title));

    if options.keep_classes {
        write_minimal_body(&mut out, article, document, &content);
    } else {
        write_reader_body(&mut out, article, document, &title, &content);
    }

    out.push_str("\n</body></html>");
    Ok(out)
}

fn write_reader_body(out: &mut String, article: &Article, document: &Document, title: &str, content: &str) {
    out.push_str("\n<body class=\"light sans-serif loaded\" style=\"--font-size:14pt; --content-width:40em;\">\n");
    match article.dir.as_deref() {
        Some(dir) => out.push_str(&format!("  <div class=\"container\" dir=\"{}\">", dir)),
        None => out.push_str("  <div class=\"container\">"),
    }

    out.push_str(&format!(
        "\n    <div class=\"header reader-header reader-show-element\">\n      <h1 class=\"reader-title\">{}</h1>",
        title
    ));
    if !article.byline.is_empty() {
        out.push_str(&format!(
            "\n      <div class=\"credits reader-credits\">{}</div>",
            document.escape_html(&article.byline)
        ));
    }

    out.push_str("\n    </div>\n\n    <hr>\n\n    <div class=\"content\">\n      <div class=\"moz-reader-content reader-show-element\">\n");
    out.push_str(content);
    out.push_str("\n      </div>\n    </div>\n  </div>\n");
}

fn write_minimal_body(out: &mut String, article: &Article, document: &Document, content: &str) {
    out.push_str("\n<body>\n");
    out.push_str(&PropertyName::HtmlTitle.value(article, false, document).to_string());
    out.push('\n');
    if !article.byline.is_empty() {
        out.push_str(&format!("<p><i>{}</i></p>", document.escape_html(&article.byline)));
    }
    out.push_str("\n<hr>\n");
    out.push_str(content);
}
