//! Low-confidence policy.
//!
//! Decides whether a document goes through extraction or is passed through
//! untouched, based on [`LowConfidenceMode`] and the extractor's
//! "probably readable" heuristic.

use std::fmt;
use std::str::FromStr;

use crate::{Document, Extractor, ReadableError, Result};

/// What to do when the heuristic is not confident the page is an article.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LowConfidenceMode {
    /// Pass the document through unextracted.
    #[default]
    Keep,
    /// Skip the heuristic and always extract.
    Force,
    /// Fail with a data error.
    Exit,
}

impl LowConfidenceMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Keep => "keep",
            Self::Force => "force",
            Self::Exit => "exit",
        }
    }
}

impl fmt::Display for LowConfidenceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LowConfidenceMode {
    type Err = ReadableError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "keep" | "no-op" => Ok(Self::Keep),
            "force" => Ok(Self::Force),
            "exit" => Ok(Self::Exit),
            _ => Err(ReadableError::Usage(format!(
                "Unknown mode: {}\nPlease use one of: keep, force, exit",
                s
            ))),
        }
    }
}

/// Outcome of the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Run the extractor.
    Extract,
    /// Emit the (sanitized) document as-is.
    PassThrough,
}

/// Applies `mode` to `document`.
///
/// `wants_properties` is true when the caller asked for JSON or explicit
/// properties; those cannot be produced without an article, so the
/// pass-through case turns into [`ReadableError::PropertiesUnavailable`].
///
/// In [`LowConfidenceMode::Force`] the heuristic is never consulted.
pub fn evaluate(
    mode: LowConfidenceMode, wants_properties: bool, extractor: &dyn Extractor, document: &Document,
) -> Result<GateDecision> {
    if mode == LowConfidenceMode::Force {
        tracing::debug!("low-confidence mode is force, skipping heuristic");
        return Ok(GateDecision::Extract);
    }

    let readable = extractor.is_probably_readable(document);
    tracing::debug!(readable, mode = %mode, "confidence heuristic");

    match (readable, mode) {
        (true, _) => Ok(GateDecision::Extract),
        (false, LowConfidenceMode::Exit) => Err(ReadableError::NotReadable),
        (false, _) if wants_properties => Err(ReadableError::PropertiesUnavailable),
        (false, _) => Ok(GateDecision::PassThrough),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Article;
    use std::cell::Cell;

    struct FixedHeuristic {
        readable: bool,
        calls: Cell<usize>,
    }

    impl FixedHeuristic {
        fn new(readable: bool) -> Self {
            Self { readable, calls: Cell::new(0) }
        }
    }

    impl Extractor for FixedHeuristic {
        fn is_probably_readable(&self, _document: &Document) -> bool {
            self.calls.set(self.calls.get() + 1);
            self.readable
        }

        fn extract(&self, _document: &Document) -> Result<Option<Article>> {
            Ok(None)
        }
    }

    fn doc() -> Document {
        Document::parse("<p>x</p>", None, None)
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("keep".parse::<LowConfidenceMode>().unwrap(), LowConfidenceMode::Keep);
        assert_eq!("no-op".parse::<LowConfidenceMode>().unwrap(), LowConfidenceMode::Keep);
        assert_eq!("force".parse::<LowConfidenceMode>().unwrap(), LowConfidenceMode::Force);
        assert_eq!("exit".parse::<LowConfidenceMode>().unwrap(), LowConfidenceMode::Exit);
        assert!(matches!("maybe".parse::<LowConfidenceMode>(), Err(ReadableError::Usage(_))));
    }

    #[test]
    fn test_default_mode_is_keep() {
        assert_eq!(LowConfidenceMode::default(), LowConfidenceMode::Keep);
    }

    #[test]
    fn test_force_skips_heuristic() {
        let heuristic = FixedHeuristic::new(false);
        let decision = evaluate(LowConfidenceMode::Force, true, &heuristic, &doc()).unwrap();
        assert_eq!(decision, GateDecision::Extract);
        assert_eq!(heuristic.calls.get(), 0);
    }

    #[test]
    fn test_readable_extracts_in_every_mode() {
        for mode in [LowConfidenceMode::Keep, LowConfidenceMode::Exit] {
            let heuristic = FixedHeuristic::new(true);
            assert_eq!(evaluate(mode, true, &heuristic, &doc()).unwrap(), GateDecision::Extract);
            assert_eq!(heuristic.calls.get(), 1);
        }
    }

    #[test]
    fn test_exit_mode_rejects() {
        let heuristic = FixedHeuristic::new(false);
        let err = evaluate(LowConfidenceMode::Exit, false, &heuristic, &doc()).unwrap_err();
        assert!(matches!(err, ReadableError::NotReadable));
    }

    #[test]
    fn test_keep_mode_passes_through() {
        let heuristic = FixedHeuristic::new(false);
        let decision = evaluate(LowConfidenceMode::Keep, false, &heuristic, &doc()).unwrap();
        assert_eq!(decision, GateDecision::PassThrough);
    }

    #[test]
    fn test_keep_mode_with_properties_is_data_error() {
        let heuristic = FixedHeuristic::new(false);
        let err = evaluate(LowConfidenceMode::Keep, true, &heuristic, &doc()).unwrap_err();
        assert!(matches!(err, ReadableError::PropertiesUnavailable));
        assert_eq!(err.exit_category().code(), 65);
    }
}
