use std::env;
use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use readable_core::source::{SourceRequest, resolve};
use readable_core::{
    ExitCategory, FetchConfig, HtmlSanitizer, LowConfidenceMode, OutputSpec, Pipeline, Readability,
    ReadabilityConfig, ReadableError, RenderOptions, RunOptions,
};

mod compat;
mod echo;
mod i18n;
mod logging;

use compat::{Deprecation, LegacyFlags};
use echo::EchoProgress;
use i18n::Catalog;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const ENGINE: &str = "Extraction engine: dom_smoothie (Mozilla Readability)";

/// Proxy variables consulted when `--proxy` is absent, in order.
const PROXY_VARS: [&str; 3] = ["https_proxy", "HTTPS_PROXY", "http_proxy"];

/// Turn a web page into a distraction-free reader-mode article
#[derive(Parser, Debug)]
#[command(name = "readable")]
#[command(about = "Turn a web page into a distraction-free reader-mode article", long_about = None)]
#[command(disable_version_flag = true)]
#[command(after_help = "Exit codes: 64 usage, 65 data error, 66 no input, 68 host not found, 69 service unavailable, 77 permission denied")]
struct Args {
    /// A file, an http(s) URL, or "-" for standard input
    #[arg(value_name = "SOURCE")]
    source: Option<String>,

    /// Base URL used to resolve relative links
    #[arg(short, long, value_name = "URL")]
    base: Option<String>,

    /// Don't sanitize HTML
    #[arg(short = 'S', long)]
    insane: bool,

    /// Allow invalid SSL certificates
    #[arg(short = 'K', long)]
    insecure: bool,

    /// Treat SOURCE as a file, even if it looks like a URL
    #[arg(short = 'f', long)]
    is_file: bool,

    /// Treat SOURCE as a URL, prepending https:// when it has no scheme (deprecated)
    #[arg(short = 'U', long)]
    is_url: bool,

    /// Output properties as a JSON payload
    #[arg(short, long)]
    json: bool,

    /// What to do when the document may not hold one article: keep, force or exit
    #[arg(short, long, value_name = "MODE")]
    low_confidence: Option<LowConfidenceMode>,

    /// Don't rewrite the article's CSS classes; use a minimal page layout
    #[arg(short = 'C', long)]
    keep_classes: bool,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output specific properties: html-title, title, excerpt, byline, length, dir, text-content, html-content
    #[arg(short, long, value_name = "PROPERTY", num_args = 1..)]
    properties: Vec<String>,

    /// Proxy URL for HTTP requests
    #[arg(short = 'x', long, value_name = "URL")]
    proxy: Option<String>,

    /// Don't print status messages to stderr
    #[arg(short, long)]
    quiet: bool,

    /// Stylesheet linked from the output page
    #[arg(short, long, value_name = "HREF")]
    style: Option<String>,

    /// Same as --base (deprecated)
    #[arg(short = 'u', long, value_name = "URL")]
    url: Option<String>,

    /// Custom User-Agent for HTTP requests
    #[arg(short = 'A', long, value_name = "UA")]
    user_agent: Option<String>,

    /// Print a shell completion script
    #[arg(long, value_name = "SHELL", num_args = 0..=1, default_missing_value = "bash")]
    completion: Option<Shell>,

    /// Print version
    #[arg(short = 'V', long)]
    version: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    logging::init();
    let catalog = Catalog::for_locale(&i18n::detect_locale(|key| env::var(key).ok()));

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let code = if err.use_stderr() { ExitCategory::Usage.code() } else { ExitCategory::Success.code() };
            let _ = err.print();
            return ExitCode::from(code);
        }
    };

    match run(args, catalog).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let (category, message) = match err.downcast_ref::<ReadableError>() {
                Some(e) => (e.exit_category(), catalog.describe(e)),
                None => (ExitCategory::DataError, format!("{:#}", err)),
            };

            echo::print_error(&message);
            if category == ExitCategory::Usage {
                echo::print_note(catalog.use_help);
            }
            ExitCode::from(category.code())
        }
    }
}

async fn run(args: Args, catalog: &'static Catalog) -> anyhow::Result<()> {
    if let Some(shell) = args.completion {
        clap_complete::generate(shell, &mut Args::command(), "readable", &mut io::stdout());
        return Ok(());
    }

    if args.version {
        println!("readable v{}", VERSION);
        println!("{}", ENGINE);
        return Ok(());
    }

    let normalized = compat::normalize(LegacyFlags {
        source: args.source,
        properties: args.properties,
        base: args.base,
        url: args.url,
        is_url: args.is_url,
    })?;

    for deprecation in &normalized.deprecations {
        echo::print_note(match deprecation {
            Deprecation::IsUrl => catalog.is_url_deprecated,
            Deprecation::Url => catalog.url_deprecated,
        });
    }

    let source = resolve(&SourceRequest {
        source: normalized.source.as_deref(),
        is_file: args.is_file,
        is_url: args.is_url,
        base: normalized.base.as_deref(),
        stdin_is_terminal: io::stdin().is_terminal(),
    })?;

    let options = RunOptions {
        low_confidence: args.low_confidence.unwrap_or_default(),
        output: OutputSpec::new(args.json, normalized.properties),
        render: RenderOptions { keep_classes: args.keep_classes, insane: args.insane, style: args.style },
        fetch: FetchConfig {
            user_agent: args.user_agent,
            proxy: args.proxy.or_else(|| proxy_from_env(|key| env::var(key).ok())),
            accept_invalid_certs: args.insecure,
        },
    };

    let reader = Readability::with_config(ReadabilityConfig { keep_classes: args.keep_classes });
    let sanitizer = HtmlSanitizer::new();
    let progress = EchoProgress::new(args.quiet, catalog);

    let output = Pipeline::new(&reader, &sanitizer, &progress).run(&source, &options).await?;
    write_output(args.output.as_deref(), &output)?;

    Ok(())
}

fn proxy_from_env(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    PROXY_VARS.iter().filter_map(|key| lookup(key)).find(|value| !value.is_empty())
}

/// Writes `output` to `path` (truncating) or to stdout.
fn write_output(path: Option<&Path>, output: &str) -> Result<(), ReadableError> {
    match path {
        Some(path) => {
            fs::write(path, output).map_err(|source| ReadableError::OutputFile { path: path.to_path_buf(), source })
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(output.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_properties_are_repeatable() {
        let args = Args::try_parse_from(["readable", "-p", "title", "-p", "byline", "--json", "page.html"]).unwrap();
        assert_eq!(args.properties, vec!["title", "byline"]);
        assert_eq!(args.source.as_deref(), Some("page.html"));
    }

    #[test]
    fn test_greedy_properties_swallow_source() {
        let args = Args::try_parse_from(["readable", "--properties", "title", "page.html"]).unwrap();
        assert_eq!(args.properties, vec!["title", "page.html"]);
        assert!(args.source.is_none());
    }

    #[test]
    fn test_completion_defaults_to_bash() {
        let args = Args::try_parse_from(["readable", "--completion"]).unwrap();
        assert_eq!(args.completion, Some(Shell::Bash));
    }

    #[test]
    fn test_proxy_env_order() {
        let lookup = |key: &str| match key {
            "HTTPS_PROXY" => Some("http://upper:3128".to_string()),
            "http_proxy" => Some("http://plain:3128".to_string()),
            _ => None,
        };
        assert_eq!(proxy_from_env(lookup), Some("http://upper:3128".to_string()));

        let lookup = |key: &str| match key {
            "https_proxy" => Some(String::new()),
            "http_proxy" => Some("http://plain:3128".to_string()),
            _ => None,
        };
        assert_eq!(proxy_from_env(lookup), Some("http://plain:3128".to_string()));
        assert_eq!(proxy_from_env(|_| None), None);
    }

    #[test]
    fn test_write_output_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.html");
        fs::write(&path, "previous contents that are longer").unwrap();

        write_output(Some(&path), "<p>new</p>").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "<p>new</p>");
    }

    #[test]
    fn test_write_output_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.html");
        let err = write_output(Some(&path), "x").unwrap_err();
        assert_eq!(err.exit_category(), ExitCategory::NoInput);
        assert!(matches!(err, ReadableError::OutputFile { .. }));
        assert!(err.to_string().starts_with("Cannot write output file "));
    }

    #[test]
    fn test_low_confidence_is_parsed_by_clap() {
        let args = Args::try_parse_from(["readable", "-l", "no-op", "page.html"]).unwrap();
        assert_eq!(args.low_confidence, Some(LowConfidenceMode::Keep));

        let args = Args::try_parse_from(["readable", "--low-confidence", "exit", "page.html"]).unwrap();
        assert_eq!(args.low_confidence, Some(LowConfidenceMode::Exit));

        let args = Args::try_parse_from(["readable", "page.html"]).unwrap();
        assert_eq!(args.low_confidence.unwrap_or_default(), LowConfidenceMode::Keep);

        let err = Args::try_parse_from(["readable", "-l", "sometimes", "page.html"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        assert!(err.to_string().contains("Unknown mode: sometimes"));
    }
}
