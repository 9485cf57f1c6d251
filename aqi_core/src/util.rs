//! Small display helpers shared by the runner and the CLI.

use chrono::NaiveDateTime;

/// 12-hour clock label, e.g. `"09 AM"`.
#[inline]
pub fn hour_label(ts: NaiveDateTime) -> String {
    ts.format("%I %p").to_string()
}

/// Keep the trailing `n` items of a slice.
#[inline]
pub fn tail<T>(items: &[T], n: usize) -> &[T] {
    &items[items.len().saturating_sub(n)..]
}
