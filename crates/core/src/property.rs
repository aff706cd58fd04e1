//! Article properties selectable with `--properties`.
//!
//! [`PropertyName`] is the closed set of names; [`PropertyName::value`]
//! computes one property of an [`Article`], either verbatim or collapsed to a
//! single line.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::{Article, Document, ReadableError};

static NEWLINES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n+").expect("NEWLINES_RE should compile"));

/// A property of the extracted article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyName {
    HtmlTitle,
    Title,
    Excerpt,
    Byline,
    Length,
    Dir,
    TextContent,
    HtmlContent,
}

impl PropertyName {
    /// Every property, in registration order.
    pub const ALL: [PropertyName; 8] = [
        Self::HtmlTitle,
        Self::Title,
        Self::Excerpt,
        Self::Byline,
        Self::Length,
        Self::Dir,
        Self::TextContent,
        Self::HtmlContent,
    ];

    /// Used when no `--properties` are given.
    pub const DEFAULT: [PropertyName; 2] = [Self::HtmlTitle, Self::HtmlContent];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::HtmlTitle => "html-title",
            Self::Title => "title",
            Self::Excerpt => "excerpt",
            Self::Byline => "byline",
            Self::Length => "length",
            Self::Dir => "dir",
            Self::TextContent => "text-content",
            Self::HtmlContent => "html-content",
        }
    }

    /// Content properties are multi-line blocks and are written last in line output.
    pub fn is_content(self) -> bool {
        matches!(self, Self::TextContent | Self::HtmlContent)
    }

    /// Computes this property for `article`.
    ///
    /// With `single_line`, runs of newlines in `title`, `excerpt` and `byline`
    /// are collapsed to one space. `html-title` is the escaped title wrapped
    /// in `<h1>`; escaping uses `document`. `html-content` is returned raw;
    /// sanitizing it is the formatter's job.
    pub fn value(self, article: &Article, single_line: bool, document: &Document) -> PropertyValue {
        let line = |s: &str| {
            if single_line { NEWLINES_RE.replace_all(s, " ").into_owned() } else { s.to_string() }
        };

        match self {
            Self::HtmlTitle => {
                let title = Self::Title.value(article, single_line, document).to_string();
                PropertyValue::Text(format!("<h1>{}</h1>", document.escape_html(&title)))
            }
            Self::Title => PropertyValue::Text(line(&article.title)),
            Self::Excerpt => PropertyValue::Text(line(&article.excerpt)),
            Self::Byline => PropertyValue::Text(line(&article.byline)),
            Self::Length => PropertyValue::Number(article.length),
            Self::Dir => PropertyValue::Text(article.dir.clone().unwrap_or_default()),
            Self::TextContent => PropertyValue::Text(article.text_content.clone()),
            Self::HtmlContent => PropertyValue::Text(article.html_content.clone()),
        }
    }
}

impl fmt::Display for PropertyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyName {
    type Err = ReadableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::ALL.iter().map(|name| name.as_str()).collect();
                ReadableError::Usage(format!("Invalid property: {}. Valid options: {}", s, valid.join(", ")))
            })
    }
}

/// Value of a single property: text or a character count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Text(String),
    Number(usize),
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(n) => write!(f, "{}", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn article() -> Article {
        Article {
            title: "Cats &\nDogs".to_string(),
            byline: "Jane\n\nDoe".to_string(),
            excerpt: "One\ntwo".to_string(),
            length: 42,
            dir: Some("rtl".to_string()),
            text_content: "Line one\nLine two".to_string(),
            html_content: "<p>Line one</p>\n<p>Line two</p>".to_string(),
        }
    }

    fn document() -> Document {
        Document::parse("<html><body></body></html>", None, None)
    }

    #[rstest]
    #[case("html-title", PropertyName::HtmlTitle)]
    #[case("title", PropertyName::Title)]
    #[case("excerpt", PropertyName::Excerpt)]
    #[case("byline", PropertyName::Byline)]
    #[case("length", PropertyName::Length)]
    #[case("dir", PropertyName::Dir)]
    #[case("text-content", PropertyName::TextContent)]
    #[case("html-content", PropertyName::HtmlContent)]
    fn test_parse_names(#[case] input: &str, #[case] expected: PropertyName) {
        let parsed: PropertyName = input.parse().unwrap();
        assert_eq!(parsed, expected);
        assert_eq!(parsed.to_string(), input);
    }

    #[rstest]
    #[case("Title")]
    #[case("content")]
    #[case("")]
    #[case("title,byline")]
    fn test_unknown_names_are_usage_errors(#[case] input: &str) {
        let err = input.parse::<PropertyName>().unwrap_err();
        assert!(matches!(err, ReadableError::Usage(_)));
    }

    #[test]
    fn test_single_line_collapses_newlines() {
        let doc = document();
        let a = article();
        assert_eq!(PropertyName::Byline.value(&a, true, &doc).to_string(), "Jane Doe");
        assert_eq!(PropertyName::Excerpt.value(&a, true, &doc).to_string(), "One two");
        assert_eq!(PropertyName::Byline.value(&a, false, &doc).to_string(), "Jane\n\nDoe");
    }

    #[test]
    fn test_content_is_never_collapsed() {
        let doc = document();
        let a = article();
        assert_eq!(PropertyName::TextContent.value(&a, true, &doc).to_string(), "Line one\nLine two");
        assert!(PropertyName::HtmlContent.value(&a, true, &doc).to_string().contains('\n'));
    }

    #[rstest]
    #[case("Foo", "<h1>Foo</h1>")]
    #[case("a < b > c", "<h1>a &lt; b &gt; c</h1>")]
    #[case("Tom & Jerry", "<h1>Tom &amp; Jerry</h1>")]
    fn test_html_title_escapes(#[case] title: &str, #[case] expected: &str) {
        let doc = document();
        let a = Article { title: title.to_string(), ..Default::default() };
        assert_eq!(PropertyName::HtmlTitle.value(&a, false, &doc).to_string(), expected);
    }

    #[test]
    fn test_html_title_matches_escaped_title() {
        let doc = document();
        let a = Article { title: r#"Say "hi" & <wave>"#.to_string(), ..Default::default() };
        let expected = format!("<h1>{}</h1>", doc.escape_html(&a.title));
        assert_eq!(PropertyName::HtmlTitle.value(&a, false, &doc).to_string(), expected);
    }

    #[test]
    fn test_length_is_number() {
        let doc = document();
        assert_eq!(PropertyName::Length.value(&article(), false, &doc), PropertyValue::Number(42));
    }

    #[test]
    fn test_missing_dir_is_empty() {
        let doc = document();
        let a = Article::default();
        assert_eq!(PropertyName::Dir.value(&a, false, &doc).to_string(), "");
    }

    #[test]
    fn test_is_content() {
        let content: Vec<_> = PropertyName::ALL.into_iter().filter(|p| p.is_content()).collect();
        assert_eq!(content, vec![PropertyName::TextContent, PropertyName::HtmlContent]);
    }

    #[test]
    fn test_value_serialization() {
        assert_eq!(serde_json::to_string(&PropertyValue::Number(3)).unwrap(), "3");
        assert_eq!(serde_json::to_string(&PropertyValue::Text("x".into())).unwrap(), r#""x""#);
    }
}
