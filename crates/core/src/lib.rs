pub mod article;
pub mod error;
pub mod fetch;
pub mod formatters;
pub mod gate;
pub mod parse;
pub mod pipeline;
pub mod property;
pub mod readability;
pub mod sanitize;
pub mod source;

pub use article::Article;
pub use error::{ExitCategory, ReadableError, Result};
pub use fetch::{DEFAULT_USER_AGENT, FetchConfig, acquire, fetch_file, fetch_stdin, fetch_url};
pub use formatters::{OutputFormat, OutputSpec, RenderOptions};
pub use gate::{GateDecision, LowConfidenceMode};
pub use parse::Document;
pub use pipeline::{Notice, Pipeline, Progress, RunOptions, SilentProgress};
pub use property::{PropertyName, PropertyValue};
pub use readability::{Extractor, Readability, ReadabilityConfig};
pub use sanitize::{HtmlSanitizer, Sanitize};
pub use source::{ResolvedSource, SourceDescriptor, SourceKind, SourceRequest};
