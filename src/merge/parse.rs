use crate::limits::*;
use crate::model::*;
use crate::timestamp::{self, WireTime};

use super::MergeError;

// ── Boundary validation ──────────────────────────────────────────

fn resolve(id: &RecordId, field: &'static str, value: &WireTime) -> Result<Ms, MergeError> {
    let ms = timestamp::parse_ms(value).ok_or_else(|| MergeError::InvalidTimestamp {
        id: id.clone(),
        field,
        value: value.clone(),
    })?;
    if !(MIN_VALID_TIMESTAMP_MS..=MAX_VALID_TIMESTAMP_MS).contains(&ms) {
        return Err(MergeError::OutOfRange {
            id: id.clone(),
            field,
            value: ms,
        });
    }
    Ok(ms)
}

/// Zero-length spans pass; only `end < start` is rejected.
fn resolve_span(id: &RecordId, start: &WireTime, end: &WireTime) -> Result<Span, MergeError> {
    let span = Span::new(resolve(id, "startTime", start)?, resolve(id, "endTime", end)?);
    if span.end < span.start {
        return Err(MergeError::InvertedSpan {
            id: id.clone(),
            span,
        });
    }
    Ok(span)
}

fn check_count(n: usize) -> Result<(), MergeError> {
    if n > MAX_RECORDS {
        return Err(MergeError::LimitExceeded("too many records"));
    }
    Ok(())
}

impl TryFrom<&SlotRecord> for Slot {
    type Error = MergeError;

    fn try_from(rec: &SlotRecord) -> Result<Self, MergeError> {
        Ok(Slot {
            id: rec.id.clone(),
            span: resolve_span(&rec.id, &rec.start_time, &rec.end_time)?,
            user_id: rec.user_id.clone(),
            game_id: rec.game_id.clone(),
        })
    }
}

impl TryFrom<&BookingRecord> for Booking {
    type Error = MergeError;

    fn try_from(rec: &BookingRecord) -> Result<Self, MergeError> {
        Ok(Booking {
            id: rec.id.clone(),
            span: resolve_span(&rec.id, &rec.start_time, &rec.end_time)?,
            user_name: rec.user_name.clone(),
            system: rec.system.clone(),
        })
    }
}

/// Validate a batch of slot records. Fails on the first bad record.
pub fn parse_slots(records: &[SlotRecord]) -> Result<Vec<Slot>, MergeError> {
    check_count(records.len())?;
    records.iter().map(Slot::try_from).collect()
}

/// Validate a batch of booking records. Fails on the first bad record.
pub fn parse_bookings(records: &[BookingRecord]) -> Result<Vec<Booking>, MergeError> {
    check_count(records.len())?;
    records.iter().map(Booking::try_from).collect()
}
