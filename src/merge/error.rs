use crate::model::{Ms, RecordId, Span};
use crate::timestamp::WireTime;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeError {
    InvalidTimestamp {
        id: RecordId,
        field: &'static str,
        value: WireTime,
    },
    InvertedSpan {
        id: RecordId,
        span: Span,
    },
    /// Parsed fine but falls outside the accepted timestamp window.
    OutOfRange {
        id: RecordId,
        field: &'static str,
        value: Ms,
    },
    LimitExceeded(&'static str),
}

impl std::fmt::Display for MergeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MergeError::InvalidTimestamp { id, field, value } => {
                write!(f, "record {id}: invalid timestamp in {field}: {value}")
            }
            MergeError::InvertedSpan { id, span } => {
                write!(
                    f,
                    "record {id}: end {} is before start {}",
                    span.end, span.start
                )
            }
            MergeError::OutOfRange { id, field, value } => {
                write!(f, "record {id}: {field} {value} outside accepted range")
            }
            MergeError::LimitExceeded(msg) => write!(f, "limit exceeded: {msg}"),
        }
    }
}

impl std::error::Error for MergeError {}
