//! Stage sequencing: acquire → gate → extract → render.
//!
//! Each stage completes before the next starts and the first error ends the
//! run. The rendered output is returned to the caller, which owns the sink;
//! nothing is produced on failure.
//!
//! # Example
//!
//! ```no_run
//! use readable_core::{HtmlSanitizer, Pipeline, Readability, RunOptions, SilentProgress};
//! use readable_core::source::{SourceRequest, resolve};
//!
//! # async fn example() -> readable_core::Result<()> {
//! let source = resolve(&SourceRequest { source: Some("page.html"), ..Default::default() })?;
//! let (reader, sanitizer) = (Readability::new(), HtmlSanitizer::new());
//! let pipeline = Pipeline::new(&reader, &sanitizer, &SilentProgress);
//! let html = pipeline.run(&source, &RunOptions::default()).await?;
//! print!("{}", html);
//! # Ok(())
//! # }
//! ```

use crate::fetch::{FetchConfig, acquire};
use crate::formatters::{OutputSpec, RenderOptions, render, render_pass_through};
use crate::gate::{GateDecision, LowConfidenceMode, evaluate};
use crate::source::{ResolvedSource, SourceKind};
use crate::{Document, Extractor, ReadableError, Result, Sanitize};

/// Informational events for the user. None of them are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// About to buffer standard input.
    ReadingStdin,
    /// Standard input has no base URL, so relative links stay relative.
    MissingBaseUrl,
    /// About to read a file or fetch a URL.
    Retrieving,
    /// Heuristic was negative; the document is passed through.
    NotConfident,
    /// About to run the extractor.
    Processing,
}

/// Receives [`Notice`]s as the pipeline advances.
pub trait Progress {
    fn notice(&self, notice: Notice);
}

/// Discards every notice.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentProgress;

impl Progress for SilentProgress {
    fn notice(&self, _notice: Notice) {}
}

/// Everything a run needs besides the source.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub low_confidence: LowConfidenceMode,
    pub output: OutputSpec,
    pub render: RenderOptions,
    pub fetch: FetchConfig,
}

/// One reader-mode run over a single document.
pub struct Pipeline<'a> {
    extractor: &'a dyn Extractor,
    sanitizer: &'a dyn Sanitize,
    progress: &'a dyn Progress,
}

impl<'a> Pipeline<'a> {
    pub fn new(extractor: &'a dyn Extractor, sanitizer: &'a dyn Sanitize, progress: &'a dyn Progress) -> Self {
        Self { extractor, sanitizer, progress }
    }

    /// Acquires `source` and processes it.
    pub async fn run(&self, source: &ResolvedSource, options: &RunOptions) -> Result<String> {
        match source.descriptor.kind() {
            SourceKind::Stdin => {
                self.progress.notice(Notice::ReadingStdin);
                if source.base_url.is_none() {
                    self.progress.notice(Notice::MissingBaseUrl);
                }
            }
            SourceKind::File | SourceKind::Url => self.progress.notice(Notice::Retrieving),
        }

        let document = acquire(source, &options.fetch).await?;
        self.process(document, options)
    }

    /// Gates, extracts and renders an already parsed document.
    pub fn process(&self, document: Document, options: &RunOptions) -> Result<String> {
        let decision =
            evaluate(options.low_confidence, options.output.wants_properties(), self.extractor, &document)?;

        if decision == GateDecision::PassThrough {
            self.progress.notice(Notice::NotConfident);
            return render_pass_through(&document, &options.render, self.sanitizer);
        }

        self.progress.notice(Notice::Processing);
        let article = self.extractor.extract(&document)?.ok_or(ReadableError::NoContent)?;
        tracing::debug!(title = %article.title, length = article.length, format = ?options.output.format, "extracted article");

        render(&article, &document, &options.output, &options.render, self.sanitizer)
    }
}
