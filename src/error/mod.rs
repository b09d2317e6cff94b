use thiserror::Error;

/// Errors produced by the presentation pipeline and its fetch plumbing.
///
/// The first two are always recovered locally (raw string / placeholder);
/// only `UpstreamFetchFailure` ever reaches the viewer, and then only as an
/// opaque "could not load" state.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ViewError {
    #[error("malformed timestamp {raw:?}: {reason}")]
    MalformedTimestamp { raw: String, reason: String },

    #[error("invalid metric {field}: {value}")]
    InvalidMetric { field: &'static str, value: f64 },

    #[error("upstream fetch failed: {0}")]
    UpstreamFetchFailure(String),
}

impl ViewError {
    pub(crate) fn malformed(raw: &str, reason: impl Into<String>) -> Self {
        ViewError::MalformedTimestamp {
            raw: raw.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn upstream(err: impl std::fmt::Display) -> Self {
        ViewError::UpstreamFetchFailure(format!("{:#}", err))
    }
}

pub type Result<T> = std::result::Result<T, ViewError>;
