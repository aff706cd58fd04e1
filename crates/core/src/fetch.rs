//! Document acquisition from URLs, files, and stdin.
//!
//! [`acquire`] performs exactly one read of the resolved source, buffers it
//! completely and hands it to the parser. Nothing is retried.

use std::error::Error as _;
use std::path::Path;

use reqwest::{Client, Proxy, header};
use tokio::io::AsyncReadExt;
use url::Url;

use crate::source::{ResolvedSource, SourceKind};
use crate::{Document, ReadableError, Result};

/// Sent when no `--user-agent` is given.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

/// HTTP client configuration for fetching web pages.
#[derive(Debug, Clone, Default)]
pub struct FetchConfig {
    /// Custom User-Agent string; [`DEFAULT_USER_AGENT`] when unset.
    pub user_agent: Option<String>,
    /// Proxy URL applied to every scheme.
    pub proxy: Option<String>,
    /// Skip TLS certificate validation.
    pub accept_invalid_certs: bool,
}

/// Reads the source described by `source` and parses it.
pub async fn acquire(source: &ResolvedSource, config: &FetchConfig) -> Result<Document> {
    let descriptor = &source.descriptor;
    let base_url = source.base_url.clone();

    match descriptor.kind() {
        SourceKind::Url => {
            let url = Url::parse(descriptor.location())
                .map_err(|e| ReadableError::InvalidUrl(format!("{} ({})", descriptor.location(), e)))?;
            let fetched = fetch_url(&url, config).await?;
            Ok(Document::parse(&fetched.body, base_url, fetched.content_type))
        }
        SourceKind::File => {
            let html = fetch_file(Path::new(descriptor.location())).await?;
            Ok(Document::parse(&html, base_url, None))
        }
        SourceKind::Stdin => {
            let html = fetch_stdin().await?;
            Ok(Document::parse(&html, base_url, None))
        }
    }
}

/// Body and normalized MIME type of an HTTP response.
#[derive(Debug, Clone)]
pub struct Fetched {
    pub body: String,
    pub content_type: Option<String>,
}

/// Issues a single GET request and returns the decoded body.
///
/// # Errors
///
/// - [`ReadableError::HostNotFound`] when the host name does not resolve.
/// - [`ReadableError::Status`] for any non-2xx response.
/// - [`ReadableError::Http`] for every other transport failure.
pub async fn fetch_url(url: &Url, config: &FetchConfig) -> Result<Fetched> {
    let client = build_client(config)?;

    let response = client
        .get(url.clone())
        .header(
            header::ACCEPT,
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .send()
        .await
        .map_err(|e| classify_request_error(e, url))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ReadableError::Status {
            code: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown status").to_string(),
        });
    }

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(normalize_mime);

    let body = response.text().await?;
    tracing::debug!(url = %url, status = status.as_u16(), bytes = body.len(), content_type = ?content_type, "fetched");

    Ok(Fetched { body, content_type })
}

/// Reads a local file, decoding it as UTF-8 with replacement.
pub async fn fetch_file(path: &Path) -> Result<String> {
    let bytes = tokio::fs::read(path).await.map_err(|e| ReadableError::from_io(e, path))?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "read file");
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Buffers all of standard input before returning.
pub async fn fetch_stdin() -> Result<String> {
    let mut bytes = Vec::new();
    tokio::io::stdin().read_to_end(&mut bytes).await?;
    tracing::debug!(bytes = bytes.len(), "read stdin");
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn build_client(config: &FetchConfig) -> Result<Client> {
    let user_agent = config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
    let builder = Client::builder()
        .user_agent(user_agent)
        .danger_accept_invalid_certs(config.accept_invalid_certs);

    let builder = match &config.proxy {
        Some(proxy) => {
            let proxy =
                Proxy::all(proxy.as_str()).map_err(|e| ReadableError::InvalidUrl(format!("{} ({})", proxy, e)))?;
            builder.proxy(proxy)
        }
        None => builder.no_proxy(),
    };

    Ok(builder.build()?)
}

fn classify_request_error(err: reqwest::Error, url: &Url) -> ReadableError {
    if is_dns_error(&err) {
        let host = url.host_str().unwrap_or_default().to_string();
        return ReadableError::HostNotFound { host };
    }

    ReadableError::Http(err)
}

/// Walks the error chain looking for a resolver failure.
fn is_dns_error(err: &reqwest::Error) -> bool {
    if !err.is_connect() {
        return false;
    }

    let mut source = err.source();
    while let Some(inner) = source {
        let message = inner.to_string();
        if message.contains("dns error") || message.contains("failed to lookup address") {
            return true;
        }
        source = inner.source();
    }
    false
}

/// `text/html; charset=utf-8` becomes `text/html`; `text/htm` is treated as `text/html`.
fn normalize_mime(content_type: &str) -> String {
    let mime = content_type.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    if mime == "text/htm" { "text/html".to_string() } else { mime }
}
