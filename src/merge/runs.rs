use crate::model::*;

// ── Contiguous runs ──────────────────────────────────────────────

/// Group slots into contiguous runs of the same user on the same game.
///
/// Slots are stably sorted by start, then scanned once. A slot joins the
/// current group only if it has the same `(user_id, game_id)` as the slot
/// added last and starts exactly where that slot ends. Anything else,
/// including an overlap or a one-millisecond gap, closes the group.
/// Groups come out ordered by the start of their first slot.
pub fn merge_consecutive_slots(slots: &[Slot]) -> Vec<Vec<Slot>> {
    let mut sorted: Vec<&Slot> = slots.iter().collect();
    sorted.sort_by_key(|s| s.span.start);

    let mut groups: Vec<Vec<Slot>> = Vec::new();
    let mut current: Vec<Slot> = Vec::new();
    for slot in sorted {
        if let Some(last) = current.last()
            && !(last.same_key(slot) && last.span.abuts(&slot.span)) {
                groups.push(std::mem::take(&mut current));
            }
        current.push(slot.clone());
    }
    if !current.is_empty() {
        groups.push(current);
    }
    groups
}

/// Collapse contiguous bookings of the same user on the same system into one
/// booking per run.
///
/// Same chaining rule as [`merge_consecutive_slots`], but each run is
/// reported as a single booking carrying the first booking's id and the
/// last booking's end.
pub fn merge_consecutive_bookings(bookings: &[Booking]) -> Vec<Booking> {
    let mut sorted: Vec<&Booking> = bookings.iter().collect();
    sorted.sort_by_key(|b| b.span.start);

    let mut merged: Vec<Booking> = Vec::new();
    for booking in sorted {
        if let Some(last) = merged.last_mut()
            && last.same_key(booking)
            && last.span.abuts(&booking.span) {
                last.span.end = booking.span.end;
                continue;
            }
        merged.push(booking.clone());
    }
    merged
}

/// True if `run` is non-empty, shares one identity, and each record starts
/// exactly where the previous one ends.
pub fn is_contiguous_run<T: Reservation>(run: &[T]) -> bool {
    !run.is_empty()
        && run
            .windows(2)
            .all(|w| w[0].same_key(&w[1]) && w[0].span().abuts(&w[1].span()))
}
