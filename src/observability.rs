// ── Merge pipeline metrics ──────────────────────────────────────
//
// Emitted through the `metrics` facade. Nothing is recorded until the
// embedding application installs a recorder.

/// Counter: records accepted for merging. Labels: kind.
pub const RECORDS_TOTAL: &str = "lounge_records_total";

/// Counter: groups (slots) or merged bookings produced. Labels: kind.
pub const GROUPS_TOTAL: &str = "lounge_groups_total";

/// Counter: same-identity overlaps detected. Labels: kind.
pub const OVERLAPS_TOTAL: &str = "lounge_overlaps_total";

/// Counter: batches rejected at validation. Labels: kind.
pub const REJECTED_TOTAL: &str = "lounge_rejected_total";

/// Histogram: validate + merge latency in seconds. Labels: kind.
pub const MERGE_DURATION_SECONDS: &str = "lounge_merge_duration_seconds";

/// Label value for the `kind` label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Slots,
    Bookings,
}

impl Kind {
    pub fn label(self) -> &'static str {
        match self {
            Kind::Slots => "slots",
            Kind::Bookings => "bookings",
        }
    }
}
