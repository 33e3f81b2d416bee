//! Initial range selection: nearest available substitute for a preferred range.

use super::AvailableRanges;
use crate::shared::Range;

/// Pick the range to show given what is available and what was asked for.
///
/// Returns `desired` when available. Otherwise searches outward from its
/// catalog position, checking the coarser neighbour (`+offset`) before the
/// finer one (`-offset`) at each distance. Unknown keys, or an exhausted
/// search, fall back to the first available range. `None` only when nothing
/// is available.
pub fn pick_initial_range(available: &AvailableRanges, desired: &str) -> Option<Range> {
    match Range::from_key(desired) {
        Some(range) => nearest_available(available, range),
        None => available.first(),
    }
}

/// Typed form of [`pick_initial_range`].
pub fn nearest_available(available: &AvailableRanges, desired: Range) -> Option<Range> {
    if available.contains(desired) {
        return Some(desired);
    }

    let catalog = &Range::ALL;
    let index = desired.index();
    for offset in 1..=catalog.len() {
        let coarser = index.checked_add(offset).and_then(|i| catalog.get(i));
        let finer = index.checked_sub(offset).and_then(|i| catalog.get(i));
        for candidate in [coarser, finer].into_iter().flatten() {
            if available.contains(*candidate) {
                return Some(*candidate);
            }
        }
    }

    available.first()
}
