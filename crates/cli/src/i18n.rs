//! Locale selection and user-facing message catalog.

use readable_core::ReadableError;

const FALLBACK_LOCALE: &str = "en_US";

/// Variables consulted for the message locale, highest precedence first.
const LOCALE_VARS: [&str; 4] = ["LC_ALL", "LC_MESSAGES", "LANG", "LANGUAGE"];

/// Picks the message locale from the environment.
///
/// The first non-empty variable wins; its value is cut at the first `.` or
/// `:` so `de_DE.UTF-8` and `de_DE:en` both yield `de_DE`.
pub fn detect_locale(lookup: impl Fn(&str) -> Option<String>) -> String {
    LOCALE_VARS
        .iter()
        .filter_map(|var| lookup(var))
        .find(|value| !value.is_empty())
        .map(|value| value.split(['.', ':']).next().unwrap_or_default().to_string())
        .filter(|locale| !locale.is_empty())
        .unwrap_or_else(|| FALLBACK_LOCALE.to_string())
}

/// Status and warning strings for one locale.
#[derive(Debug)]
pub struct Catalog {
    pub reading: &'static str,
    pub retrieving: &'static str,
    pub processing: &'static str,
    pub not_confident: &'static str,
    pub missing_base: &'static str,
    pub is_url_deprecated: &'static str,
    pub url_deprecated: &'static str,
    pub use_help: &'static str,
}

static ENGLISH: Catalog = Catalog {
    reading: "Reading...",
    retrieving: "Retrieving...",
    processing: "Processing...",
    not_confident: "Not sure if this document should be processed. Not processing",
    missing_base: "Warning: piping input with unknown URL. This means that relative links will be broken. Supply the --base parameter to fix.",
    is_url_deprecated: "Note: --is-url option is deprecated.",
    url_deprecated: "Note: --url option is deprecated, please use --base instead.",
    use_help: "Use --help for more info.",
};

impl Catalog {
    /// Catalog for `locale`. English is the only built-in catalog.
    pub fn for_locale(locale: &str) -> &'static Catalog {
        tracing::debug!(locale, "selected message catalog");
        &ENGLISH
    }

    /// Human-readable line for `err`.
    pub fn describe(&self, err: &ReadableError) -> String {
        err.to_string()
    }
}
