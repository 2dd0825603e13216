use crate::model::Ms;

/// Maximum number of records accepted in one merge request.
pub const MAX_RECORDS: usize = 100_000;

/// Earliest accepted timestamp: 2000-01-01T00:00:00Z.
pub const MIN_VALID_TIMESTAMP_MS: Ms = 946_684_800_000;

/// Latest accepted timestamp: 2100-01-01T00:00:00Z.
pub const MAX_VALID_TIMESTAMP_MS: Ms = 4_102_444_800_000;
