//! Numeric order keys.
//!
//! Blocks are sorted by an `f64` order key. New positions are taken between
//! neighbours (midpoint) so unrelated blocks keep their keys; when two
//! neighbours are so close that no representable value lies strictly between
//! them, callers fall back to [`renumber`].

use kumitate_types::BlockInstance;

/// Order key for a slot between `prev` and `next` (either may be absent).
///
/// Returns `None` when no representable key fits strictly between them.
pub(crate) fn between(prev: Option<f64>, next: Option<f64>) -> Option<f64> {
    let key = match (prev, next) {
        (None, None) => 0.0,
        (Some(p), None) => p.floor() + 1.0,
        (None, Some(n)) => n.ceil() - 1.0,
        (Some(p), Some(n)) => p + (n - p) / 2.0,
    };
    let above = prev.is_none_or(|p| key > p);
    let below = next.is_none_or(|n| key < n);
    (key.is_finite() && above && below).then_some(key)
}

/// Key for appending after the last block.
pub(crate) fn after_last(last: Option<f64>) -> Option<f64> {
    between(last, None)
}

/// Reassign contiguous keys `0, 1, 2, …` in slice order.
pub(crate) fn renumber<'a>(blocks: impl IntoIterator<Item = &'a mut BlockInstance>) {
    for (i, block) in blocks.into_iter().enumerate() {
        block.order = i as f64;
    }
}

/// True if keys are finite and strictly increasing in slice order.
pub(crate) fn strictly_increasing(keys: &[f64]) -> bool {
    keys.iter().all(|k| k.is_finite()) && keys.windows(2).all(|w| w[0] < w[1])
}
