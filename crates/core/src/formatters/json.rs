use serde_json::{Map, Value};

use crate::formatters::{RenderOptions, content_html};
use crate::{Article, Document, PropertyName, PropertyValue, Result, Sanitize};

/// Serializes the requested properties as one flat JSON object.
///
/// Keys follow request order; a property requested twice appears once.
/// Without `single_line` values keep their newlines.
pub fn render_json(
    article: &Article, document: &Document, properties: &[PropertyName], single_line: bool,
    options: &RenderOptions, sanitizer: &dyn Sanitize,
) -> Result<String> {
    let mut object = Map::new();

    for &property in properties {
        let value = match property {
            PropertyName::HtmlContent => PropertyValue::Text(content_html(article, options, sanitizer)?),
            _ => property.value(article, single_line, document),
        };
        object.insert(property.as_str().to_string(), serde_json::to_value(value)?);
    }

    Ok(serde_json::to_string(&Value::Object(object))?)
}
