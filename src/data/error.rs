use std::io;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Ingestion error taxonomy
// ---------------------------------------------------------------------------

/// Why ingestion could not produce a dataset from the requested source.
///
/// Neither variant escapes [`super::loader::load_dataset`]: both are
/// recovered there by substituting the embedded sample dataset. They are
/// public so callers driving the pipeline stages directly (e.g. via
/// [`super::loader::load_from_str`]) can match on the cause.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The CSV resource could not be read at all.
    #[error("could not read {path}: {source}")]
    SourceUnavailable {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The CSV text was structurally unparseable.
    #[error(transparent)]
    Parse(#[from] ParseFailure),
}

/// Structural parse failures.
///
/// Per-row irregularities are collected as warnings, not failures, and
/// never appear here.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseFailure {
    #[error("source contains no data")]
    EmptyInput,

    #[error("no candidate delimiter produced a consistent multi-column layout")]
    DelimiterUndetectable,

    /// The header row does not have the expected number of columns.
    ///
    /// Column meaning is bound by position, so a layout with the wrong
    /// width would be silently misassigned; failing fast here is the guard
    /// against that.
    #[error("expected a {expected}-column header, found {found} columns")]
    HeaderColumnCount { expected: usize, found: usize },
}
