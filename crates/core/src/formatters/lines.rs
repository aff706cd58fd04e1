use crate::formatters::{RenderOptions, content_html};
use crate::{Article, Document, PropertyName, Result, Sanitize};

/// Writes each requested property on its own line.
///
/// Ordinary properties come first, in request order, each followed by a
/// newline; with `single_line` their inner newlines are collapsed. The
/// content properties follow, also in request order, as raw blocks written
/// verbatim.
pub fn render_property_lines(
    article: &Article, document: &Document, properties: &[PropertyName], single_line: bool,
    options: &RenderOptions, sanitizer: &dyn Sanitize,
) -> Result<String> {
    let (content, plain): (Vec<PropertyName>, Vec<PropertyName>) =
        properties.iter().copied().partition(|property| property.is_content());

    let mut out = String::new();
    for property in plain {
        out.push_str(&property.value(article, single_line, document).to_string());
        out.push('\n');
    }

    for property in content {
        match property {
            PropertyName::HtmlContent => out.push_str(&content_html(article, options, sanitizer)?),
            _ => out.push_str(&property.value(article, single_line, document).to_string()),
        }
    }

    Ok(out)
}
