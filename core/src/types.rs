//! Shared primitive types used across the dashboard.

use std::cmp::Ordering;

/// A stable, unique customer identifier.
pub type CustomerId = u32;

/// A percentage value already scaled to 0–100 (e.g. `7.0` for 7%).
pub type Percent = f64;

/// A probability or ratio in [0, 1].
pub type Ratio = f64;

/// Total order on sort keys that treats `-0.0` and `+0.0` as equal,
/// so stable sorts keep such records in input order.
pub fn cmp_values(a: f64, b: f64) -> Ordering {
    (a + 0.0).total_cmp(&(b + 0.0))
}
