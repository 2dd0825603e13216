mod error;
mod overlap;
mod parse;
mod runs;

pub use error::MergeError;
pub use overlap::{Overlap, find_overlaps};
pub use parse::{parse_bookings, parse_slots};
pub use runs::{is_contiguous_run, merge_consecutive_bookings, merge_consecutive_slots};

use std::fmt::Debug;
use std::time::Instant;

use tracing::{debug, warn};

use crate::model::*;
use crate::observability::{self, Kind};

/// Merged output together with the same-identity overlaps seen in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeReport<T, K> {
    pub merged: T,
    pub overlaps: Vec<Overlap<K>>,
}

pub type SlotReport = MergeReport<Vec<Vec<SlotRecord>>, SlotKey>;
pub type BookingReport = MergeReport<Vec<BookingRecord>, BookingKey>;

// ── Wire-level pipeline ──────────────────────────────────

/// Validate raw slot records, group them into contiguous runs and render the
/// groups back into wire form.
pub fn merge_slot_records(records: &[SlotRecord]) -> Result<SlotReport, MergeError> {
    let started = Instant::now();
    let slots = parse_slots(records).inspect_err(|e| rejected(Kind::Slots, e))?;

    let overlaps = find_overlaps(&slots);
    let groups = merge_consecutive_slots(&slots);
    finish(Kind::Slots, slots.len(), groups.len(), &overlaps, started);

    let merged: Vec<Vec<SlotRecord>> = groups
        .iter()
        .map(|g| g.iter().map(SlotRecord::from).collect())
        .collect();
    Ok(MergeReport { merged, overlaps })
}

/// Validate raw booking records and collapse each contiguous run into one
/// booking in wire form.
pub fn merge_booking_records(records: &[BookingRecord]) -> Result<BookingReport, MergeError> {
    let started = Instant::now();
    let bookings = parse_bookings(records).inspect_err(|e| rejected(Kind::Bookings, e))?;

    let overlaps = find_overlaps(&bookings);
    let runs = merge_consecutive_bookings(&bookings);
    finish(Kind::Bookings, bookings.len(), runs.len(), &overlaps, started);

    let merged: Vec<BookingRecord> = runs.iter().map(BookingRecord::from).collect();
    Ok(MergeReport { merged, overlaps })
}

fn rejected(kind: Kind, err: &MergeError) {
    warn!("rejected {} batch: {err}", kind.label());
    metrics::counter!(observability::REJECTED_TOTAL, "kind" => kind.label()).increment(1);
}

fn finish<K: Debug>(kind: Kind, records: usize, groups: usize, overlaps: &[Overlap<K>], started: Instant) {
    for o in overlaps {
        warn!(
            "{} {} and {} overlap on [{}, {}) for {:?}",
            kind.label(),
            o.first,
            o.second,
            o.span.start,
            o.span.end,
            o.key
        );
    }
    debug!("merged {records} {} into {groups} runs", kind.label());

    let label = kind.label();
    metrics::counter!(observability::RECORDS_TOTAL, "kind" => label).increment(records as u64);
    metrics::counter!(observability::GROUPS_TOTAL, "kind" => label).increment(groups as u64);
    metrics::counter!(observability::OVERLAPS_TOTAL, "kind" => label).increment(overlaps.len() as u64);
    metrics::histogram!(observability::MERGE_DURATION_SECONDS, "kind" => label)
        .record(started.elapsed().as_secs_f64());
}
