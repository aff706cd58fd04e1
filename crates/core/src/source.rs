//! Input classification.
//!
//! Turns the raw positional argument and the `--is-file`/`--is-url`/`--base`
//! flags into a [`SourceDescriptor`] and the effective base URL used to
//! resolve relative links.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::{ReadableError, Result};

/// Marker meaning "read the document from standard input".
pub const STDIN_MARKER: &str = "-";

static SCHEME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\w+://").expect("SCHEME_RE should compile"));

/// Where the document comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    File,
    Url,
    Stdin,
}

/// Resolved classification of the input argument. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDescriptor {
    kind: SourceKind,
    location: String,
    explicit_base_url: Option<String>,
}

impl SourceDescriptor {
    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    /// File path, URL, or the stdin marker.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// `--base` if given, else the source URL for URL inputs, else nothing.
    pub fn effective_base_url(&self) -> Option<&str> {
        self.explicit_base_url.as_deref().or(match self.kind {
            SourceKind::Url => Some(self.location.as_str()),
            SourceKind::File | SourceKind::Stdin => None,
        })
    }
}

/// Normalized input flags as seen by the resolver.
#[derive(Debug, Clone, Default)]
pub struct SourceRequest<'a> {
    /// Positional source argument, if any.
    pub source: Option<&'a str>,
    pub is_file: bool,
    pub is_url: bool,
    /// `--base` (or the deprecated `--url`).
    pub base: Option<&'a str>,
    /// Whether standard input is attached to a terminal.
    pub stdin_is_terminal: bool,
}

/// Output of the resolver: the descriptor plus the parsed effective base URL.
#[derive(Debug, Clone)]
pub struct ResolvedSource {
    pub descriptor: SourceDescriptor,
    pub base_url: Option<Url>,
}

/// Returns true when `input` starts with a `scheme://` prefix.
pub fn has_scheme(input: &str) -> bool {
    SCHEME_RE.is_match(input)
}

/// Classifies the source and validates every URL involved.
///
/// # Errors
///
/// - [`ReadableError::Usage`] when no source is given and stdin is a terminal.
/// - [`ReadableError::InvalidUrl`] when the source is classified as a URL, or
///   `--base` is given, and the value does not parse as an absolute URL.
pub fn resolve(request: &SourceRequest<'_>) -> Result<ResolvedSource> {
    let mut input = match request.source {
        Some(source) => source.to_string(),
        None if request.stdin_is_terminal => return Err(ReadableError::Usage("No input provided".to_string())),
        None => STDIN_MARKER.to_string(),
    };

    if request.is_url && !has_scheme(&input) {
        input = format!("https://{}", input);
    }

    let kind = if !request.is_file && has_scheme(&input) {
        SourceKind::Url
    } else if input == STDIN_MARKER {
        SourceKind::Stdin
    } else {
        SourceKind::File
    };

    let descriptor =
        SourceDescriptor { kind, location: input, explicit_base_url: request.base.map(str::to_string) };

    let base_url = match descriptor.effective_base_url() {
        Some(base) => Some(Url::parse(base).map_err(|e| ReadableError::InvalidUrl(format!("{} ({})", base, e)))?),
        None => None,
    };

    if kind == SourceKind::Url && descriptor.explicit_base_url.is_some() {
        Url::parse(&descriptor.location)
            .map_err(|e| ReadableError::InvalidUrl(format!("{} ({})", descriptor.location, e)))?;
    }

    tracing::debug!(kind = ?descriptor.kind, location = %descriptor.location, base = ?base_url.as_ref().map(Url::as_str), "resolved source");

    Ok(ResolvedSource { descriptor, base_url })
}
