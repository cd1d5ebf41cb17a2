//! Series assembly.

use super::formula::MockFormula;
use crate::models::{DateRange, MetricSeries, Platform};
use tracing::debug;

/// Generate one record per (platform, day) pair.
///
/// Records are platform-major in the order `platforms` is given, and
/// date-minor within each platform. Followers never decrease within a
/// platform's run.
pub fn generate(
    formula: &MockFormula,
    range: &DateRange,
    platforms: &[Platform],
    seed_offset: u64,
) -> MetricSeries {
    let mut records = Vec::with_capacity(platforms.len() * range.len_days());

    for &platform in platforms {
        for (i, date) in range.days().enumerate() {
            records.push(formula.record(platform, i as u64, date, seed_offset));
        }
    }

    debug!(
        "Generated {} records for {} platform(s) over {}",
        records.len(),
        platforms.len(),
        range
    );

    MetricSeries::new(records)
}
