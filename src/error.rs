//! Failure taxonomy for the report pipeline.
//!
//! Everything that talks to the API or reads a payload returns [`ReportError`].
//! The two halves are kept apart so the pipeline can tell "the request went
//! wrong" from "the request worked but the record is not shaped as expected".

use thiserror::Error;

/// The HTTP exchange itself failed.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("response from {url} is not valid JSON: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A payload arrived but a field we rely on is missing or has the wrong shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("malformed record {record}: missing or invalid `{field}`{}", detail_suffix(.detail))]
pub struct MalformedRecordError {
    /// Email id, list id or endpoint the payload belongs to.
    pub record: String,
    /// Dotted JSON path, e.g. `stats.counters`.
    pub field: String,
    /// Decoder message for type mismatches; empty when the field is absent.
    pub detail: String,
}

impl MalformedRecordError {
    pub fn new(record: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            record: record.into(),
            field: field.into(),
            detail: String::new(),
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }
}

fn detail_suffix(detail: &str) -> String {
    if detail.is_empty() {
        String::new()
    } else {
        format!(" ({detail})")
    }
}

#[derive(Error, Debug)]
pub enum ReportError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Malformed(#[from] MalformedRecordError),
}

impl ReportError {
    pub fn malformed(record: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Malformed(MalformedRecordError::new(record, field))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
