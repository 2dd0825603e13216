use serde::{Deserialize, Serialize};

use crate::timestamp::{self, WireTime};

/// Unix milliseconds — the only time type.
pub type Ms = i64;

/// Half-open interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: Ms,
    pub end: Ms,
}

impl Span {
    pub fn new(start: Ms, end: Ms) -> Self {
        Self { start, end }
    }

    pub fn duration_ms(&self) -> Ms {
        self.end - self.start
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// True if `next` starts exactly where `self` ends.
    pub fn abuts(&self, next: &Span) -> bool {
        self.end == next.start
    }
}

/// Backend record id. Slots come with numeric ids, bookings often with strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordId::Int(n) => write!(f, "{n}"),
            RecordId::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        RecordId::Int(n)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId::Text(s.to_string())
    }
}

/// Anything with an identity and a time span that can be chained into runs.
pub trait Reservation {
    type Key: Clone + Eq + std::hash::Hash + std::fmt::Debug;

    fn id(&self) -> &RecordId;
    fn span(&self) -> Span;
    fn key(&self) -> Self::Key;

    /// Cheaper than comparing `key()`s when the key owns strings.
    fn same_key(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

// ── Slots ───────────────────────────────────────────────────────

/// One atomic reservation unit: a user on a game for a span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub id: RecordId,
    pub span: Span,
    pub user_id: String,
    pub game_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlotKey {
    pub user_id: String,
    pub game_id: String,
}

impl Reservation for Slot {
    type Key = SlotKey;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn span(&self) -> Span {
        self.span
    }

    fn key(&self) -> SlotKey {
        SlotKey {
            user_id: self.user_id.clone(),
            game_id: self.game_id.clone(),
        }
    }

    fn same_key(&self, other: &Self) -> bool {
        self.user_id == other.user_id && self.game_id == other.game_id
    }
}

// ── Bookings ────────────────────────────────────────────────────

/// A coarser reservation: a named customer on a system type (PC, PS5, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub id: RecordId,
    pub span: Span,
    pub user_name: String,
    pub system: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BookingKey {
    pub user_name: String,
    pub system: String,
}

impl Reservation for Booking {
    type Key = BookingKey;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn span(&self) -> Span {
        self.span
    }

    fn key(&self) -> BookingKey {
        BookingKey {
            user_name: self.user_name.clone(),
            system: self.system.clone(),
        }
    }

    fn same_key(&self, other: &Self) -> bool {
        self.user_name == other.user_name && self.system == other.system
    }
}

// ── Wire records ─────────────────────────────────────────────────

/// Slot as exchanged with the backend (camelCase JSON).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotRecord {
    pub id: RecordId,
    pub start_time: WireTime,
    pub end_time: WireTime,
    pub user_id: String,
    pub game_id: String,
}

/// Booking as exchanged with the backend (camelCase JSON).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    pub id: RecordId,
    pub user_name: String,
    pub system: String,
    pub start_time: WireTime,
    pub end_time: WireTime,
}

impl From<&Slot> for SlotRecord {
    fn from(slot: &Slot) -> Self {
        Self {
            id: slot.id.clone(),
            start_time: timestamp::to_wire(slot.span.start),
            end_time: timestamp::to_wire(slot.span.end),
            user_id: slot.user_id.clone(),
            game_id: slot.game_id.clone(),
        }
    }
}

impl From<&Booking> for BookingRecord {
    fn from(booking: &Booking) -> Self {
        Self {
            id: booking.id.clone(),
            user_name: booking.user_name.clone(),
            system: booking.system.clone(),
            start_time: timestamp::to_wire(booking.span.start),
            end_time: timestamp::to_wire(booking.span.end),
        }
    }
}
