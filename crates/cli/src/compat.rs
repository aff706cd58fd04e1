//! Normalization of legacy flag shapes.
//!
//! Runs once over the parsed flags, before source resolution, so nothing
//! downstream sees comma-joined property lists, a source swallowed by
//! `--properties`, or the `--url` spelling of `--base`.

use std::str::FromStr;

use readable_core::{PropertyName, ReadableError};

/// Deprecated flags that were used and deserve a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deprecation {
    IsUrl,
    Url,
}

/// Raw flag values subject to legacy handling.
#[derive(Debug, Clone, Default)]
pub struct LegacyFlags {
    pub source: Option<String>,
    pub properties: Vec<String>,
    pub base: Option<String>,
    pub url: Option<String>,
    pub is_url: bool,
}

/// Flags after legacy handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub source: Option<String>,
    pub base: Option<String>,
    /// Empty when no `--properties` were given.
    pub properties: Vec<PropertyName>,
    pub deprecations: Vec<Deprecation>,
}

/// Applies every compatibility rule to `flags`.
///
/// # Errors
///
/// [`ReadableError::Usage`] for a property name that is neither registered
/// nor recoverable as the source.
pub fn normalize(flags: LegacyFlags) -> Result<Normalized, ReadableError> {
    let mut deprecations = Vec::new();
    if flags.is_url {
        deprecations.push(Deprecation::IsUrl);
    }

    let base = match flags.url {
        Some(url) => {
            deprecations.push(Deprecation::Url);
            Some(url)
        }
        None => flags.base,
    };

    let mut names: Vec<String> = flags
        .properties
        .iter()
        .flat_map(|value| value.split(','))
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();

    let mut source = flags.source;
    if source.is_none() && names.last().is_some_and(|name| PropertyName::from_str(name).is_err()) {
        source = names.pop();
    }

    let properties = names.iter().map(|name| name.parse()).collect::<Result<Vec<PropertyName>, _>>()?;

    Ok(Normalized { source, base, properties, deprecations })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(values: &[&str]) -> LegacyFlags {
        LegacyFlags { properties: values.iter().map(|v| v.to_string()).collect(), ..Default::default() }
    }

    #[test]
    fn test_plain_flags_pass_through() {
        let flags = LegacyFlags {
            source: Some("page.html".to_string()),
            base: Some("https://example.com/".to_string()),
            ..Default::default()
        };
        let normalized = normalize(flags).unwrap();

        assert_eq!(normalized.source.as_deref(), Some("page.html"));
        assert_eq!(normalized.base.as_deref(), Some("https://example.com/"));
        assert!(normalized.properties.is_empty());
        assert!(normalized.deprecations.is_empty());
    }

    #[test]
    fn test_comma_joined_properties_split() {
        let mut flags = props(&["title,byline", "length"]);
        flags.source = Some("page.html".to_string());
        let normalized = normalize(flags).unwrap();

        assert_eq!(
            normalized.properties,
            vec![PropertyName::Title, PropertyName::Byline, PropertyName::Length]
        );
    }

    #[test]
    fn test_duplicates_kept() {
        let mut flags = props(&["title", "title"]);
        flags.source = Some("-".to_string());
        let normalized = normalize(flags).unwrap();
        assert_eq!(normalized.properties, vec![PropertyName::Title, PropertyName::Title]);
    }

    #[test]
    fn test_swallowed_source_recovered() {
        let normalized = normalize(props(&["title", "page.html"])).unwrap();

        assert_eq!(normalized.source.as_deref(), Some("page.html"));
        assert_eq!(normalized.properties, vec![PropertyName::Title]);
    }

    #[test]
    fn test_unknown_property_rejected_when_source_present() {
        let mut flags = props(&["title", "colour"]);
        flags.source = Some("page.html".to_string());
        let err = normalize(flags).unwrap_err();

        assert!(matches!(err, ReadableError::Usage(_)));
        assert!(err.to_string().contains("colour"));
    }

    #[test]
    fn test_unknown_property_in_middle_rejected() {
        let err = normalize(props(&["colour", "title", "page.html"])).unwrap_err();
        assert!(matches!(err, ReadableError::Usage(_)));
    }

    #[test]
    fn test_url_aliases_base_with_notice() {
        let flags = LegacyFlags {
            source: Some("-".to_string()),
            url: Some("https://example.com/".to_string()),
            is_url: true,
            ..Default::default()
        };
        let normalized = normalize(flags).unwrap();

        assert_eq!(normalized.base.as_deref(), Some("https://example.com/"));
        assert_eq!(normalized.deprecations, vec![Deprecation::IsUrl, Deprecation::Url]);
    }
}
