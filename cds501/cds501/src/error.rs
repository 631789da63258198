//! Error types for line decoding, record linking, and extract reading.

use cds501_core::{FieldError, FieldErrors, RecordKind};

/// Why a single physical line was not turned into a linked record.
///
/// A `LineError` never aborts processing; the line is reported through
/// [`RejectedLine`] and the next line is read.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LineError {
    /// The line is empty or whitespace only.
    #[error("blank line")]
    EmptyLine,

    /// The first value is not `1`, `2` or `3`.
    #[error("unrecognized record type '{found}'")]
    UnknownRecordType { found: String },

    /// The line does not carry exactly the number of values its kind declares.
    #[error("{kind} record has {found} fields, expected {expected}")]
    FieldCount {
        kind: RecordKind,
        expected: usize,
        found: usize,
    },

    /// One or more values do not conform to their field definitions.
    #[error("{0}")]
    Fields(FieldErrors),

    /// A vehicle or participant line appeared before any crash line.
    #[error("{kind} record for crash {crash_id} has no preceding crash record")]
    NoCrashContext { kind: RecordKind, crash_id: i64 },

    /// A vehicle or participant line names a crash other than the open one.
    #[error("{kind} record belongs to crash {found}, but the open crash is {expected}")]
    CrashMismatch {
        kind: RecordKind,
        expected: i64,
        found: i64,
    },
}

impl LineError {
    /// Per-field failures, empty for structural errors.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            LineError::Fields(errors) => errors.as_slice(),
            _ => &[],
        }
    }
}

/// A line excluded from the assembled output, kept for data-quality reporting.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {error}")]
pub struct RejectedLine {
    /// 1-based physical line number.
    pub line: usize,
    /// The line text without its terminator.
    pub raw: String,
    #[source]
    pub error: LineError,
}

impl RejectedLine {
    /// Record kind named by the line's discriminator, if it names one.
    pub fn kind(&self) -> Option<RecordKind> {
        crate::decoder::line_kind(&self.raw)
    }
}

/// Errors that stop [`ExtractReader`](crate::ExtractReader) from reading further.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The extract file could not be opened.
    #[error("failed to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The underlying reader failed.
    #[error("failed to read line {line}: {source}")]
    Io {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    /// An error returned by the user-supplied callback in
    /// [`ExtractReader::for_each_event`](crate::ExtractReader::for_each_event).
    #[error(transparent)]
    Callback(Box<dyn std::error::Error + Send + Sync>),
}
